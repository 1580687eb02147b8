//! Content negotiation for the service's own resources (landing page,
//! collections, conformance), and the encoders behind each format.

use axum::{
    http::{HeaderMap, header},
    response::{IntoResponse, Response},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::common::{Link, media_type};
use crate::config::ServiceConfig;
use crate::error::{AppError, AppResult};

/// Query parameters selecting a representation
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct FormatParams {
    /// Output format: a media type or one of json, xml, yaml, html
    #[serde(rename = "f")]
    pub format: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Xml,
    Yaml,
    Html,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 4] = [
        OutputFormat::Json,
        OutputFormat::Xml,
        OutputFormat::Yaml,
        OutputFormat::Html,
    ];

    pub fn media_type(self) -> &'static str {
        match self {
            OutputFormat::Json => media_type::JSON,
            OutputFormat::Xml => media_type::XML,
            OutputFormat::Yaml => media_type::YAML,
            OutputFormat::Html => media_type::HTML,
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            OutputFormat::Html => "text/html; charset=utf-8",
            other => other.media_type(),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            OutputFormat::Json => "JSON",
            OutputFormat::Xml => "XML",
            OutputFormat::Yaml => "YAML",
            OutputFormat::Html => "HTML",
        }
    }

    /// Parse the value of the `f` parameter
    pub fn from_param(value: &str) -> Option<Self> {
        let value = value.split(';').next().unwrap_or("").trim();
        match value.to_ascii_lowercase().as_str() {
            "json" | "application/json" => Some(OutputFormat::Json),
            "xml" | "application/xml" | "text/xml" => Some(OutputFormat::Xml),
            "yaml" | "application/x-yaml" | "application/yaml" | "text/yaml" => {
                Some(OutputFormat::Yaml)
            }
            "html" | "text/html" => Some(OutputFormat::Html),
            _ => None,
        }
    }

    /// Pick a format from the `f` parameter, falling back to the Accept header
    pub fn negotiate(headers: &HeaderMap, query_format: Option<&str>) -> AppResult<Self> {
        // Query parameter takes precedence
        if let Some(fmt) = query_format {
            return Self::from_param(fmt).ok_or_else(|| {
                AppError::InvalidParameter(format!(
                    "Unsupported output format '{}', expected one of: {}",
                    fmt,
                    Self::ALL
                        .iter()
                        .map(|f| f.media_type())
                        .collect::<Vec<_>>()
                        .join(", ")
                ))
            });
        }

        // Check Accept header (simplified - doesn't handle quality values)
        if let Some(accept) = headers.get(header::ACCEPT).and_then(|v| v.to_str().ok()) {
            for media_type in accept.split(',').map(|s| s.trim()) {
                if media_type.starts_with("*/*") {
                    return Ok(OutputFormat::Json);
                }
                if let Some(format) = Self::from_param(media_type) {
                    return Ok(format);
                }
            }
        }

        Ok(OutputFormat::Json)
    }
}

/// A resource that can be encoded in every [`OutputFormat`]. JSON and YAML
/// come from the serde representation; XML and HTML have their own layout.
pub trait Representation: Serialize {
    fn to_xml(&self) -> AppResult<String>;

    fn to_html(&self, service: &ServiceConfig) -> String;
}

pub fn render<T: Representation>(
    format: OutputFormat,
    document: &T,
    service: &ServiceConfig,
) -> AppResult<Response> {
    let body = match format {
        OutputFormat::Json => serde_json::to_string_pretty(document)?,
        OutputFormat::Yaml => serde_yaml_ng::to_string(document)?,
        OutputFormat::Xml => document.to_xml()?,
        OutputFormat::Html => document.to_html(service),
    };

    Ok(([(header::CONTENT_TYPE, format.content_type())], body).into_response())
}

/// Serialize `value` as an XML document with the given root element
pub fn xml_document<T: Serialize>(root: &str, value: &T) -> AppResult<String> {
    let body = quick_xml::se::to_string_with_root(root, value)
        .map_err(|e| AppError::Internal(format!("XML encoding failed: {}", e)))?;
    Ok(format!("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n{}", body))
}

/// Atom-style link element: `<atom:link href=".." rel=".." type=".." title=".."/>`
#[derive(Serialize)]
pub(crate) struct XmlLink<'a> {
    #[serde(rename = "@href")]
    href: &'a str,
    #[serde(rename = "@rel")]
    rel: &'a str,
    #[serde(rename = "@type", skip_serializing_if = "Option::is_none")]
    media_type: Option<&'a str>,
    #[serde(rename = "@title", skip_serializing_if = "Option::is_none")]
    title: Option<&'a str>,
}

impl<'a> From<&'a Link> for XmlLink<'a> {
    fn from(link: &'a Link) -> Self {
        Self {
            href: &link.href,
            rel: &link.rel,
            media_type: link.media_type.as_deref(),
            title: link.title.as_deref(),
        }
    }
}
