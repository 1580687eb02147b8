use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::api::common::{Extent, Link, rel};

/// A single collection as listed by the service
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CollectionDocument {
    /// Collection identifier: `prefix__name` globally, bare name within a workspace
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extent: Option<Extent>,
    pub links: Vec<Link>,
}

impl CollectionDocument {
    /// Links with the given relation, in document order
    pub fn links_with_rel<'a>(&'a self, rel: &'a str) -> impl Iterator<Item = &'a Link> + 'a {
        self.links.iter().filter(move |link| link.rel == rel)
    }

    /// The `item` link serving features in `media_type`
    pub fn item_link(&self, media_type: &str) -> Option<&Link> {
        self.links.iter().find(|link| link.is(rel::ITEM, media_type))
    }
}

/// List of collections
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CollectionsDocument {
    pub collections: Vec<CollectionDocument>,
    pub links: Vec<Link>,
}
