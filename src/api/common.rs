use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// OGC API Link object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Link {
    pub href: String,
    pub rel: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Link {
    pub fn new(href: impl Into<String>, rel: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            rel: rel.into(),
            media_type: None,
            title: None,
        }
    }

    pub fn with_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_type = Some(media_type.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn is(&self, rel: &str, media_type: &str) -> bool {
        self.rel == rel && self.media_type.as_deref() == Some(media_type)
    }
}

/// Standard link relations
pub mod rel {
    pub const SELF: &str = "self";
    pub const ALTERNATE: &str = "alternate";
    pub const SERVICE: &str = "service";
    pub const CONFORMANCE: &str = "conformance";
    pub const DATA: &str = "data";
    pub const ITEM: &str = "item";
    pub const TILING_SCHEME: &str = "tilingScheme";
    pub const TILES: &str = "tiles";
}

/// Standard media types
pub mod media_type {
    pub const JSON: &str = "application/json";
    pub const GEOJSON: &str = "application/geo+json";
    pub const GML32: &str = "application/gml+xml; version=3.2";
    pub const XML: &str = "application/xml";
    pub const YAML: &str = "application/x-yaml";
    pub const HTML: &str = "text/html";
    pub const OPENAPI_JSON: &str = "application/vnd.oai.openapi+json;version=3.0";
}

/// Percent-encode a value for use in a query string (`/` → `%2F`, `+` → `%2B`)
pub fn encode_query_value(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

/// Bounding box [minx, miny, maxx, maxy]
pub type Bbox = [f64; 4];

/// Spatial extent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SpatialExtent {
    pub bbox: Vec<Bbox>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crs: Option<String>,
}

/// Collection extent. Only the spatial part is known to the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Extent {
    pub spatial: SpatialExtent,
}

impl Extent {
    pub fn wgs84(bbox: Bbox) -> Self {
        Self {
            spatial: SpatialExtent {
                bbox: vec![bbox],
                crs: Some(crs::WGS84.to_string()),
            },
        }
    }
}

/// CRS identifiers
pub mod crs {
    pub const WGS84: &str = "http://www.opengis.net/def/crs/OGC/1.3/CRS84";
}
