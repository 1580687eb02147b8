use std::sync::Arc;

use crate::api::collections::schemas::{CollectionDocument, CollectionsDocument};
use crate::api::common::{Extent, Link, encode_query_value, media_type, rel};
use crate::api::format::OutputFormat;
use crate::catalog::{Catalog, FeatureTypeInfo, Scope};
use crate::config::{Config, ServiceConfig};
use crate::error::{AppError, AppResult};

/// Builds the collection resources out of the catalog
pub struct CollectionService {
    catalog: Arc<Catalog>,
    base_url: String,
    service: ServiceConfig,
}

impl CollectionService {
    pub fn new(catalog: Arc<Catalog>, config: &Config) -> Self {
        Self {
            catalog,
            base_url: config.base().to_string(),
            service: config.service.clone(),
        }
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn service_config(&self) -> &ServiceConfig {
        &self.service
    }

    /// Turn an optional workspace path segment into a scope, checking the
    /// workspace exists
    pub async fn resolve_scope(&self, workspace: Option<String>) -> AppResult<Scope> {
        let scope = Scope::from_workspace(workspace);
        if let Some(name) = scope.workspace() {
            if self.catalog.workspace(name).await.is_none() {
                return Err(AppError::NotFound(format!("Workspace not found: {}", name)));
            }
        }
        Ok(scope)
    }

    /// `{base}/wfs3` or `{base}/{workspace}/wfs3`
    pub fn service_url(&self, scope: &Scope) -> String {
        format!("{}/{}", self.base_url, scope.service_path())
    }

    pub fn collections_url(&self, scope: &Scope) -> String {
        format!("{}/collections", self.service_url(scope))
    }

    pub async fn list_collections(
        &self,
        scope: &Scope,
        format: OutputFormat,
    ) -> AppResult<CollectionsDocument> {
        let feature_types = self.catalog.feature_types_in(scope).await?;
        tracing::debug!(
            "Listing {} collections for {:?} as {}",
            feature_types.len(),
            scope,
            format.media_type()
        );

        let collections = feature_types
            .iter()
            .map(|ft| self.collection_document(scope, ft))
            .collect();

        Ok(CollectionsDocument {
            collections,
            links: self.format_links(&self.collections_url(scope), format, "Collections"),
        })
    }

    pub async fn get_collection(
        &self,
        scope: &Scope,
        collection_id: &str,
    ) -> AppResult<CollectionDocument> {
        let feature_type = self.catalog.find_feature_type(scope, collection_id).await?;
        Ok(self.collection_document(scope, &feature_type))
    }

    /// `self` link for the requested format plus one `alternate` per other format
    pub fn format_links(&self, url: &str, current: OutputFormat, what: &str) -> Vec<Link> {
        OutputFormat::ALL
            .iter()
            .map(|&format| {
                let (relation, title) = if format == current {
                    (rel::SELF, "This document".to_string())
                } else {
                    (rel::ALTERNATE, format!("{} as {}", what, format.label()))
                };
                Link::new(
                    format!("{}?f={}", url, encode_query_value(format.media_type())),
                    relation,
                )
                .with_type(format.media_type())
                .with_title(title)
            })
            .collect()
    }

    fn collection_document(&self, scope: &Scope, feature_type: &FeatureTypeInfo) -> CollectionDocument {
        let name = scope.collection_name(feature_type);
        let collection_url = format!("{}/{}", self.collections_url(scope), name);

        let mut links: Vec<Link> = self
            .service
            .item_formats
            .iter()
            .map(|format| {
                Link::new(
                    format!("{}/items?f={}", collection_url, encode_query_value(format)),
                    rel::ITEM,
                )
                .with_type(format.as_str())
                .with_title(format!("{} items as {}", name, format))
            })
            .collect();

        if self.service.tiles_enabled {
            // URI templates: the placeholders are filled in by the client
            links.push(
                Link::new(
                    format!("{}/tiles/{{tilingSchemeId}}", collection_url),
                    rel::TILING_SCHEME,
                )
                .with_type(media_type::JSON)
                .with_title("Tiling scheme for this collection"),
            );
            links.push(
                Link::new(
                    format!(
                        "{}/tiles/{{tilingSchemeId}}/{{level}}/{{row}}/{{col}}",
                        collection_url
                    ),
                    rel::TILES,
                )
                .with_type(media_type::GEOJSON)
                .with_title("Tiles of this collection"),
            );
        }

        CollectionDocument {
            name,
            title: feature_type.title.clone(),
            description: feature_type.description.clone(),
            extent: feature_type.bbox.map(Extent::wgs84),
            links,
        }
    }
}
