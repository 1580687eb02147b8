use quick_xml::{Reader, events::Event};
use serde::de::DeserializeOwned;
use std::fmt;

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersisterFormat {
    Json,
    Xml,
    Yaml,
}

impl PersisterFormat {
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        let essence = content_type.split(';').next().unwrap_or("").trim();
        match essence.to_ascii_lowercase().as_str() {
            "application/json" | "text/json" => Some(PersisterFormat::Json),
            "application/xml" | "text/xml" => Some(PersisterFormat::Xml),
            "application/x-yaml" | "application/yaml" | "text/yaml" => Some(PersisterFormat::Yaml),
            _ => None,
        }
    }
}

impl fmt::Display for PersisterFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersisterFormat::Json => write!(f, "JSON"),
            PersisterFormat::Xml => write!(f, "XML"),
            PersisterFormat::Yaml => write!(f, "YAML"),
        }
    }
}

/// Decodes catalog objects from REST payloads.
///
/// Payloads may be wrapped in a root named after the resource, as in
/// `{"featureType": {...}}` or `<featureType>...</featureType>`. Once a root
/// alias is configured, a payload whose root has another name is rejected;
/// for JSON and YAML an unwrapped object is accepted as-is.
#[derive(Debug, Clone)]
pub struct Persister {
    format: PersisterFormat,
    root_alias: Option<String>,
}

impl Persister {
    pub fn new(format: PersisterFormat) -> Self {
        Self {
            format,
            root_alias: None,
        }
    }

    pub fn format(&self) -> PersisterFormat {
        self.format
    }

    pub fn root_alias(&self) -> Option<&str> {
        self.root_alias.as_deref()
    }

    pub fn set_root_alias(&mut self, alias: impl Into<String>) {
        self.root_alias = Some(alias.into());
    }

    pub fn load<T: DeserializeOwned>(&self, body: &[u8]) -> AppResult<T> {
        match self.format {
            PersisterFormat::Json => {
                let value: serde_json::Value = serde_json::from_slice(body).map_err(|e| self.invalid(e))?;
                self.from_value(value)
            }
            PersisterFormat::Yaml => {
                let text = std::str::from_utf8(body).map_err(|e| self.invalid(e))?;
                let value: serde_json::Value =
                    serde_yaml_ng::from_str(text).map_err(|e| self.invalid(e))?;
                self.from_value(value)
            }
            PersisterFormat::Xml => {
                let text = std::str::from_utf8(body).map_err(|e| self.invalid(e))?;
                if let Some(alias) = &self.root_alias {
                    let root = xml_root_name(text).ok_or_else(|| self.invalid("no root element"))?;
                    if root != *alias {
                        return Err(AppError::BadRequest(format!(
                            "Expected root element <{}>, found <{}>",
                            alias, root
                        )));
                    }
                }
                quick_xml::de::from_str(text).map_err(|e| self.invalid(e))
            }
        }
    }

    fn from_value<T: DeserializeOwned>(&self, value: serde_json::Value) -> AppResult<T> {
        let value = match (&self.root_alias, value) {
            (Some(alias), serde_json::Value::Object(mut map))
                if map.len() == 1 && map.contains_key(alias) =>
            {
                map.remove(alias).unwrap_or_default()
            }
            (_, value) => value,
        };
        serde_json::from_value(value).map_err(|e| self.invalid(e))
    }

    fn invalid(&self, cause: impl fmt::Display) -> AppError {
        AppError::BadRequest(format!("Could not parse {} body: {}", self.format, cause))
    }
}

/// Name of the document element, if the text has one
fn xml_root_name(text: &str) -> Option<String> {
    let mut reader = Reader::from_str(text);
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                return Some(String::from_utf8_lossy(e.name().as_ref()).into_owned());
            }
            Ok(Event::Eof) | Err(_) => return None,
            Ok(_) => continue,
        }
    }
}
