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
use crate::error::{AppError, AppResult};
use crate::services::CollectionService;

/// Tiling schemes the `tilingScheme` links of collections can be expanded with
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TilingSchemes {
    pub tiling_schemes: Vec<String>,
}

#[derive(Serialize)]
struct XmlTilingSchemes<'a> {
    #[serde(rename = "TilingScheme")]
    tiling_schemes: &'a [String],
}

impl Representation for TilingSchemes {
    fn to_xml(&self) -> AppResult<String> {
        xml_document(
            "TilingSchemes",
            &XmlTilingSchemes {
                tiling_schemes: &self.tiling_schemes,
            },
        )
    }

    fn to_html(&self, _service: &ServiceConfig) -> String {
        let mut body = String::from("<ul>\n");
        for id in &self.tiling_schemes {
            body.push_str(&format!("<li id=\"{0}\">{0}</li>\n", html::escape(id)));
        }
        body.push_str("</ul>\n");
        html::page("Tiling schemes", &body)
    }
}

async fn list_tiling_schemes(
    State(service): State<Arc<CollectionService>>,
    headers: HeaderMap,
    Query(params): Query<FormatParams>,
) -> AppResult<Response> {
    let config = service.service_config();
    if !config.tiles_enabled {
        return Err(AppError::NotFound(
            "The tiling extension is disabled".to_string(),
        ));
    }

    let format = OutputFormat::negotiate(&headers, params.format.as_deref())?;
    let document = TilingSchemes {
        tiling_schemes: config.tiling_schemes.clone(),
    };
    render(format, &document, config)
}

fn list_tiling_schemes_docs(op: TransformOperation) -> TransformOperation {
    op.summary("List tiling schemes")
        .description("Returns the identifiers usable as `tilingSchemeId` in collection tile links")
        .tag("Tiles")
        .response_with::<200, Json<TilingSchemes>, _>(|res| {
            res.description("Tiling scheme identifiers")
        })
        .response_with::<404, (), _>(|res| res.description("Tiling extension disabled"))
}

pub fn routes(service: Arc<CollectionService>) -> ApiRouter {
    ApiRouter::new()
        .api_route(
            "/wfs3/tilingSchemes",
            get_with(list_tiling_schemes, list_tiling_schemes_docs),
        )
        .with_state(service)
}
