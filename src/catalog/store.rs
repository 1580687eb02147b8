use indexmap::IndexMap;
use tokio::sync::RwLock;

use super::models::{DataStoreInfo, FeatureTypeInfo, Scope, StoreRef, WorkspaceInfo};
use super::ncname;
use crate::error::{AppError, AppResult};

/// Catalog contents. Every map keeps insertion order, which is the order
/// collections are listed in.
#[derive(Debug, Default)]
pub(crate) struct CatalogState {
    workspaces: IndexMap<String, WorkspaceInfo>,
    stores: IndexMap<StoreRef, DataStoreInfo>,
    feature_types: IndexMap<(String, String), FeatureTypeInfo>,
}

impl CatalogState {
    pub(crate) fn add_workspace(&mut self, workspace: WorkspaceInfo) -> AppResult<()> {
        if self.workspaces.contains_key(&workspace.name) {
            return Err(AppError::Conflict(format!(
                "Workspace already exists: {}",
                workspace.name
            )));
        }
        self.workspaces.insert(workspace.name.clone(), workspace);
        Ok(())
    }

    pub(crate) fn add_store(&mut self, store: DataStoreInfo) -> AppResult<()> {
        if !self.workspaces.contains_key(&store.workspace) {
            return Err(AppError::NotFound(format!(
                "Workspace not found: {}",
                store.workspace
            )));
        }
        let key = store.store_ref();
        if self.stores.contains_key(&key) {
            return Err(AppError::Conflict(format!(
                "Store already exists: {}:{}",
                key.workspace, key.name
            )));
        }
        self.stores.insert(key, store);
        Ok(())
    }

    pub(crate) fn add_feature_type(&mut self, feature_type: FeatureTypeInfo) -> AppResult<()> {
        if !self.stores.contains_key(&feature_type.store) {
            return Err(AppError::NotFound(format!(
                "Store not found: {}:{}",
                feature_type.store.workspace, feature_type.store.name
            )));
        }
        // Names are unique per workspace, not per store: the published
        // identifier only carries the workspace prefix.
        let key = (
            feature_type.workspace().to_string(),
            feature_type.name.clone(),
        );
        if self.feature_types.contains_key(&key) {
            return Err(AppError::Conflict(format!(
                "Feature type already exists: {}",
                feature_type.prefixed_name()
            )));
        }
        self.feature_types.insert(key, feature_type);
        Ok(())
    }

    fn check_scope(&self, scope: &Scope) -> AppResult<()> {
        match scope.workspace() {
            Some(name) if !self.workspaces.contains_key(name) => Err(AppError::NotFound(
                format!("Workspace not found: {}", name),
            )),
            _ => Ok(()),
        }
    }

    fn find(&self, scope: &Scope, collection_id: &str) -> Option<&FeatureTypeInfo> {
        let (prefix, local) = ncname::decode(collection_id);
        match (scope, prefix) {
            (Scope::Workspace(ws), Some(prefix)) if prefix == ws.as_str() => self
                .feature_types
                .get(&(ws.clone(), local.to_string())),
            (Scope::Workspace(ws), _) => self
                .feature_types
                .get(&(ws.clone(), collection_id.to_string())),
            (Scope::Global, Some(prefix)) => self
                .feature_types
                .get(&(prefix.to_string(), local.to_string())),
            (Scope::Global, None) => {
                // Unqualified names only resolve when they are unambiguous
                let mut matches = self
                    .feature_types
                    .values()
                    .filter(|ft| ft.name == collection_id);
                match (matches.next(), matches.next()) {
                    (Some(ft), None) => Some(ft),
                    _ => None,
                }
            }
        }
    }
}

/// In-memory catalog of workspaces, stores and feature types
#[derive(Debug, Default)]
pub struct Catalog {
    state: RwLock<CatalogState>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_state(state: CatalogState) -> Self {
        Self {
            state: RwLock::new(state),
        }
    }

    pub async fn add_workspace(&self, workspace: WorkspaceInfo) -> AppResult<()> {
        tracing::debug!("Adding workspace {}", workspace.name);
        self.state.write().await.add_workspace(workspace)
    }

    pub async fn add_store(&self, store: DataStoreInfo) -> AppResult<()> {
        tracing::debug!("Adding store {}:{}", store.workspace, store.name);
        self.state.write().await.add_store(store)
    }

    pub async fn add_feature_type(&self, feature_type: FeatureTypeInfo) -> AppResult<()> {
        tracing::debug!("Adding feature type {}", feature_type.prefixed_name());
        self.state.write().await.add_feature_type(feature_type)
    }

    pub async fn workspace(&self, name: &str) -> Option<WorkspaceInfo> {
        self.state.read().await.workspaces.get(name).cloned()
    }

    pub async fn workspaces(&self) -> Vec<WorkspaceInfo> {
        self.state.read().await.workspaces.values().cloned().collect()
    }

    /// All feature types, in the order they were added
    pub async fn feature_types(&self) -> Vec<FeatureTypeInfo> {
        self.state
            .read()
            .await
            .feature_types
            .values()
            .cloned()
            .collect()
    }

    /// Feature types visible in `scope`. A workspace scope naming an unknown
    /// workspace is an error rather than an empty listing.
    pub async fn feature_types_in(&self, scope: &Scope) -> AppResult<Vec<FeatureTypeInfo>> {
        let state = self.state.read().await;
        state.check_scope(scope)?;

        Ok(state
            .feature_types
            .values()
            .filter(|ft| scope.includes(ft))
            .cloned()
            .collect())
    }

    pub async fn feature_type(&self, workspace: &str, name: &str) -> Option<FeatureTypeInfo> {
        self.state
            .read()
            .await
            .feature_types
            .get(&(workspace.to_string(), name.to_string()))
            .cloned()
    }

    /// Resolve a published collection identifier within `scope`
    pub async fn find_feature_type(
        &self,
        scope: &Scope,
        collection_id: &str,
    ) -> AppResult<FeatureTypeInfo> {
        let state = self.state.read().await;
        state.check_scope(scope)?;

        state
            .find(scope, collection_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Collection not found: {}", collection_id)))
    }

    /// Replace the descriptive metadata of an existing feature type
    pub async fn save_feature_type(&self, feature_type: FeatureTypeInfo) -> AppResult<()> {
        let mut state = self.state.write().await;
        let key = (
            feature_type.workspace().to_string(),
            feature_type.name.clone(),
        );

        let existing = state.feature_types.get_mut(&key).ok_or_else(|| {
            AppError::NotFound(format!(
                "Feature type not found: {}",
                feature_type.prefixed_name()
            ))
        })?;

        if existing.store != feature_type.store {
            return Err(AppError::BadRequest(format!(
                "Feature type {} cannot be moved to another store",
                feature_type.prefixed_name()
            )));
        }

        existing.title = feature_type.title;
        existing.description = feature_type.description;
        existing.keywords = feature_type.keywords;
        existing.bbox = feature_type.bbox;

        tracing::info!("Saved feature type {}", existing.prefixed_name());
        Ok(())
    }
}
