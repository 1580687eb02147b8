//! Catalog seed files.
//!
//! ```yaml
//! workspaces:
//!   - name: cdf
//!     namespace_uri: http://www.opengis.net/cite/data
//!     stores:
//!       - name: cdf
//!         feature_types:
//!           - name: Deletes
//!             title: Deletes
//!             abstract: Features removed by the transaction tests
//! ```

use serde::Deserialize;
use std::path::Path;

use super::models::{DataStoreInfo, FeatureTypeInfo, StoreRef, WorkspaceInfo};
use super::store::{Catalog, CatalogState};
use crate::error::{AppError, AppResult};

#[derive(Debug, Default, Deserialize)]
pub struct CatalogSeed {
    #[serde(default)]
    pub workspaces: Vec<WorkspaceSeed>,
}

#[derive(Debug, Deserialize)]
pub struct WorkspaceSeed {
    pub name: String,
    #[serde(default)]
    pub namespace_uri: Option<String>,
    #[serde(default)]
    pub stores: Vec<StoreSeed>,
}

#[derive(Debug, Deserialize)]
pub struct StoreSeed {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub feature_types: Vec<FeatureTypeSeed>,
}

#[derive(Debug, Deserialize)]
pub struct FeatureTypeSeed {
    pub name: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, alias = "abstract")]
    pub description: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub bbox: Option<[f64; 4]>,
}

impl CatalogSeed {
    /// Read a seed file; `.json` files are parsed as JSON, everything else as YAML
    pub fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let seed = if is_json {
            serde_json::from_str(&content)?
        } else {
            serde_yaml_ng::from_str(&content)?
        };

        Ok(seed)
    }

    pub fn into_catalog(self) -> AppResult<Catalog> {
        let mut state = CatalogState::default();

        for ws in self.workspaces {
            state.add_workspace(WorkspaceInfo {
                name: ws.name.clone(),
                namespace_uri: ws.namespace_uri,
            })?;

            for store in ws.stores {
                state.add_store(DataStoreInfo {
                    workspace: ws.name.clone(),
                    name: store.name.clone(),
                    description: store.description,
                })?;

                for ft in store.feature_types {
                    state.add_feature_type(FeatureTypeInfo {
                        name: ft.name,
                        store: StoreRef::new(&ws.name, &store.name),
                        title: ft.title,
                        description: ft.description,
                        keywords: ft.keywords,
                        bbox: ft.bbox,
                    })?;
                }
            }
        }

        Ok(Catalog::from_state(state))
    }
}

impl Catalog {
    /// Build the catalog described by a seed file
    pub fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let catalog = CatalogSeed::load(path)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?
            .into_catalog()?;
        Ok(catalog)
    }
}
