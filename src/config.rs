use serde::Deserialize;
use std::fmt;
use std::sync::Arc;

use crate::api::common::media_type;

#[derive(Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Public base URL, including the context path (e.g. `http://host/geoserver`)
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Catalog seed file (YAML or JSON). An empty catalog is served when unset.
    #[serde(default)]
    pub catalog_path: Option<String>,
    #[serde(default)]
    pub service: ServiceConfig,
}

// Custom Debug implementation to keep the output on one screen
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("base_url", &self.base_url)
            .field("catalog_path", &self.catalog_path)
            .field("tiles_enabled", &self.service.tiles_enabled)
            .field("item_formats", &self.service.item_formats.len())
            .finish()
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_base_url() -> String {
    "http://localhost:8080/geoserver".to_string()
}

/// Settings of the WFS3 service itself
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    /// Whether collections advertise the tiling extension links
    #[serde(default = "default_tiles_enabled")]
    pub tiles_enabled: bool,
    /// Media types items can be fetched in, in link order
    #[serde(default = "default_item_formats")]
    pub item_formats: Vec<String>,
    /// Page size used by the HTML listing when linking to items
    #[serde(default = "default_html_items_limit")]
    pub html_items_limit: u32,
    /// Identifiers of the tiling schemes the tiling extension knows about
    #[serde(default = "default_tiling_schemes")]
    pub tiling_schemes: Vec<String>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            tiles_enabled: default_tiles_enabled(),
            item_formats: default_item_formats(),
            html_items_limit: default_html_items_limit(),
            tiling_schemes: default_tiling_schemes(),
        }
    }
}

fn default_tiles_enabled() -> bool {
    true
}

fn default_item_formats() -> Vec<String> {
    vec![
        media_type::GEOJSON.to_string(),
        media_type::JSON.to_string(),
        media_type::GML32.to_string(),
        media_type::HTML.to_string(),
    ]
}

fn default_html_items_limit() -> u32 {
    50
}

fn default_tiling_schemes() -> Vec<String> {
    vec![
        "GlobalCRS84Geometric".to_string(),
        "GoogleMapsCompatible".to_string(),
    ]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            base_url: default_base_url(),
            catalog_path: None,
            service: ServiceConfig::default(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Arc<Self>, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(
                config::Environment::with_prefix("WFS3")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("service.item_formats")
                    .with_list_parse_key("service.tiling_schemes"),
            )
            .build()?;

        let settings: Config = config.try_deserialize()?;
        Ok(Arc::new(settings))
    }

    /// Base URL without a trailing slash
    pub fn base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}
