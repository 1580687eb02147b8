use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::ncname;

/// A namespace grouping stores and their feature types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceInfo {
    /// Workspace name, also used as the namespace prefix
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace_uri: Option<String>,
}

impl WorkspaceInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace_uri: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct StoreRef {
    pub workspace: String,
    pub name: String,
}

impl StoreRef {
    pub fn new(workspace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            workspace: workspace.into(),
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataStoreInfo {
    pub workspace: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl DataStoreInfo {
    pub fn new(workspace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            workspace: workspace.into(),
            name: name.into(),
            description: None,
        }
    }

    pub fn store_ref(&self) -> StoreRef {
        StoreRef::new(&self.workspace, &self.name)
    }
}

/// A named, queryable set of features published from a store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FeatureTypeInfo {
    pub name: String,
    pub store: StoreRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, alias = "abstract", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    /// WGS84 bounds as `[minx, miny, maxx, maxy]`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bbox: Option<[f64; 4]>,
}

impl FeatureTypeInfo {
    pub fn new(store: StoreRef, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            store,
            title: None,
            description: None,
            keywords: Vec::new(),
            bbox: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_bbox(mut self, bbox: [f64; 4]) -> Self {
        self.bbox = Some(bbox);
        self
    }

    /// Name of the workspace owning this feature type's store
    pub fn workspace(&self) -> &str {
        &self.store.workspace
    }

    /// Workspace-qualified name, e.g. `cgf__Lines`
    pub fn prefixed_name(&self) -> String {
        ncname::encode(self.workspace(), &self.name)
    }
}

/// Which part of the catalog a request sees
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    Global,
    Workspace(String),
}

impl Scope {
    pub fn from_workspace(workspace: Option<String>) -> Self {
        match workspace {
            Some(name) => Scope::Workspace(name),
            None => Scope::Global,
        }
    }

    pub fn workspace(&self) -> Option<&str> {
        match self {
            Scope::Global => None,
            Scope::Workspace(name) => Some(name),
        }
    }

    pub fn includes(&self, feature_type: &FeatureTypeInfo) -> bool {
        match self {
            Scope::Global => true,
            Scope::Workspace(name) => feature_type.workspace() == name,
        }
    }

    /// Name a feature type is published under in this scope
    pub fn collection_name(&self, feature_type: &FeatureTypeInfo) -> String {
        match self {
            Scope::Global => feature_type.prefixed_name(),
            Scope::Workspace(_) => feature_type.name.clone(),
        }
    }

    /// Service root relative to the base URL: `wfs3` or `{workspace}/wfs3`
    pub fn service_path(&self) -> String {
        match self {
            Scope::Global => "wfs3".to_string(),
            Scope::Workspace(name) => format!("{}/wfs3", name),
        }
    }
}
