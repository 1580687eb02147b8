use aide::{
    axum::{ApiRouter, routing::get_with},
    transform::TransformOperation,
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::HeaderMap,
    response::Response,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::collections::handlers::WorkspacePath;
use super::common::{Link, encode_query_value, media_type, rel};
use super::format::{FormatParams, OutputFormat, Representation, XmlLink, render, xml_document};
use super::html;
use crate::catalog::Scope;
use crate::config::ServiceConfig;
use crate::error::AppResult;
use crate::services::CollectionService;

/// WFS3 landing page
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct LandingPage {
    pub title: String,
    pub description: String,
    pub links: Vec<Link>,
}

#[derive(Serialize)]
struct XmlLandingPage<'a> {
    #[serde(rename = "Title")]
    title: &'a str,
    #[serde(rename = "Description")]
    description: &'a str,
    #[serde(rename = "atom:link")]
    links: Vec<XmlLink<'a>>,
}

impl Representation for LandingPage {
    fn to_xml(&self) -> AppResult<String> {
        xml_document(
            "LandingPage",
            &XmlLandingPage {
                title: &self.title,
                description: &self.description,
                links: self.links.iter().map(XmlLink::from).collect(),
            },
        )
    }

    fn to_html(&self, _service: &ServiceConfig) -> String {
        let body = format!(
            "<p>{}</p>\n{}",
            html::escape(&self.description),
            html::link_list(&self.links)
        );
        html::page(&self.title, &body)
    }
}

fn landing_page(service: &CollectionService, scope: &Scope, format: OutputFormat) -> LandingPage {
    let service_url = service.service_url(scope);
    let global_url = service.service_url(&Scope::Global);

    let mut links = service.format_links(&service_url, format, "Landing page");

    links.push(
        Link::new(format!("{}/api", global_url), rel::SERVICE)
            .with_type(media_type::OPENAPI_JSON)
            .with_title("API definition"),
    );
    links.push(
        Link::new(format!("{}/conformance", global_url), rel::CONFORMANCE)
            .with_type(media_type::JSON)
            .with_title("Conformance declaration"),
    );
    for collections_format in OutputFormat::ALL {
        links.push(
            Link::new(
                format!(
                    "{}?f={}",
                    service.collections_url(scope),
                    encode_query_value(collections_format.media_type())
                ),
                rel::DATA,
            )
            .with_type(collections_format.media_type())
            .with_title(format!("Collections as {}", collections_format.label())),
        );
    }

    let title = match scope.workspace() {
        Some(workspace) => format!("{} Web Feature Service", workspace),
        None => "Web Feature Service".to_string(),
    };

    LandingPage {
        title,
        description: "Access to the catalog's feature types through the WFS 3.0 draft API"
            .to_string(),
        links,
    }
}

async fn respond_landing(
    service: &CollectionService,
    workspace: Option<String>,
    headers: &HeaderMap,
    params: FormatParams,
) -> AppResult<Response> {
    let format = OutputFormat::negotiate(headers, params.format.as_deref())?;
    let scope = service.resolve_scope(workspace).await?;
    render(
        format,
        &landing_page(service, &scope, format),
        service.service_config(),
    )
}

async fn get_landing_page(
    State(service): State<Arc<CollectionService>>,
    headers: HeaderMap,
    Query(params): Query<FormatParams>,
) -> AppResult<Response> {
    respond_landing(&service, None, &headers, params).await
}

async fn get_workspace_landing_page(
    State(service): State<Arc<CollectionService>>,
    Path(path): Path<WorkspacePath>,
    headers: HeaderMap,
    Query(params): Query<FormatParams>,
) -> AppResult<Response> {
    respond_landing(&service, Some(path.workspace), &headers, params).await
}

fn get_landing_page_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Landing page")
        .description("Returns the landing page with links to the API capabilities")
        .tag("Core")
        .response_with::<200, Json<LandingPage>, _>(|res| res.description("Landing page response"))
}

pub fn routes(service: Arc<CollectionService>) -> ApiRouter {
    ApiRouter::new()
        .api_route("/wfs3", get_with(get_landing_page, get_landing_page_docs))
        .api_route(
            "/{workspace}/wfs3",
            get_with(get_workspace_landing_page, get_landing_page_docs),
        )
        .with_state(service)
}
