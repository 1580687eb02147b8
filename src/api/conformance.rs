use aide::{
    axum::{ApiRouter, routing::get_with},
    transform::TransformOperation,
};
use axum::{
    Json,
    extract::{Query, State},
    http::HeaderMap,
    response::Response,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::format::{FormatParams, OutputFormat, Representation, render, xml_document};
use super::html;
use crate::config::ServiceConfig;
use crate::error::AppResult;
use crate::services::CollectionService;

/// Conformance declaration
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Conformance {
    pub conforms_to: Vec<String>,
}

/// Conformance class URIs
pub mod classes {
    pub const CORE: &str = "http://www.opengis.net/spec/wfs-1/3.0/req/core";
    pub const OAS30: &str = "http://www.opengis.net/spec/wfs-1/3.0/req/oas30";
    pub const HTML: &str = "http://www.opengis.net/spec/wfs-1/3.0/req/html";
    pub const GEOJSON: &str = "http://www.opengis.net/spec/wfs-1/3.0/req/geojson";
    pub const GMLSF0: &str = "http://www.opengis.net/spec/wfs-1/3.0/req/gmlsf0";
}

#[derive(Serialize)]
struct XmlConformance<'a> {
    #[serde(rename = "ConformsTo")]
    conforms_to: &'a [String],
}

impl Representation for Conformance {
    fn to_xml(&self) -> AppResult<String> {
        xml_document(
            "Conformance",
            &XmlConformance {
                conforms_to: &self.conforms_to,
            },
        )
    }

    fn to_html(&self, _service: &ServiceConfig) -> String {
        let mut body = String::from("<ul>\n");
        for class in &self.conforms_to {
            body.push_str(&format!("<li>{}</li>\n", html::escape(class)));
        }
        body.push_str("</ul>\n");
        html::page("Conformance", &body)
    }
}

pub fn conformance() -> Conformance {
    Conformance {
        conforms_to: vec![
            classes::CORE.to_string(),
            classes::OAS30.to_string(),
            classes::HTML.to_string(),
            classes::GEOJSON.to_string(),
            classes::GMLSF0.to_string(),
        ],
    }
}

async fn get_conformance(
    State(service): State<Arc<CollectionService>>,
    headers: HeaderMap,
    Query(params): Query<FormatParams>,
) -> AppResult<Response> {
    let format = OutputFormat::negotiate(&headers, params.format.as_deref())?;
    render(format, &conformance(), service.service_config())
}

fn get_conformance_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Conformance declaration")
        .description("Returns the list of conformance classes that this API implements")
        .tag("Core")
        .response_with::<200, Json<Conformance>, _>(|res| {
            res.description("Conformance declaration response")
        })
}

pub fn routes(service: Arc<CollectionService>) -> ApiRouter {
    ApiRouter::new()
        .api_route(
            "/wfs3/conformance",
            get_with(get_conformance, get_conformance_docs),
        )
        .with_state(service)
}
