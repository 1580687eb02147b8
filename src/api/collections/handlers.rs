use aide::{
    axum::{ApiRouter, routing::get_with},
    transform::TransformOperation,
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::HeaderMap,
    response::Response,
    routing::get,
};
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;

use super::schemas::{CollectionDocument, CollectionsDocument};
use crate::api::format::{FormatParams, OutputFormat, render};
use crate::error::AppResult;
use crate::services::CollectionService;

/// Path parameters for workspace-scoped endpoints
#[derive(Debug, Deserialize, JsonSchema)]
pub struct WorkspacePath {
    /// The workspace the request is scoped to
    pub workspace: String,
}

/// Path parameters for a single collection
#[derive(Debug, Deserialize, JsonSchema)]
pub struct CollectionPath {
    /// The collection identifier
    pub collection_id: String,
}

/// Path parameters for a single collection within a workspace
#[derive(Debug, Deserialize, JsonSchema)]
pub struct WorkspaceCollectionPath {
    pub workspace: String,
    pub collection_id: String,
}

async fn respond_collections(
    service: &CollectionService,
    workspace: Option<String>,
    headers: &HeaderMap,
    params: FormatParams,
) -> AppResult<Response> {
    let format = OutputFormat::negotiate(headers, params.format.as_deref())?;
    let scope = service.resolve_scope(workspace).await?;
    let document = service.list_collections(&scope, format).await?;
    render(format, &document, service.service_config())
}

async fn respond_collection(
    service: &CollectionService,
    workspace: Option<String>,
    collection_id: &str,
    headers: &HeaderMap,
    params: FormatParams,
) -> AppResult<Response> {
    let format = OutputFormat::negotiate(headers, params.format.as_deref())?;
    let scope = service.resolve_scope(workspace).await?;
    let document = service.get_collection(&scope, collection_id).await?;
    render(format, &document, service.service_config())
}

pub async fn list_collections(
    State(service): State<Arc<CollectionService>>,
    headers: HeaderMap,
    Query(params): Query<FormatParams>,
) -> AppResult<Response> {
    respond_collections(&service, None, &headers, params).await
}

pub async fn list_workspace_collections(
    State(service): State<Arc<CollectionService>>,
    Path(path): Path<WorkspacePath>,
    headers: HeaderMap,
    Query(params): Query<FormatParams>,
) -> AppResult<Response> {
    respond_collections(&service, Some(path.workspace), &headers, params).await
}

fn list_collections_docs(op: TransformOperation) -> TransformOperation {
    op.summary("List collections")
        .description(
            "Returns every feature type in the catalog as a collection, named `workspace__name`",
        )
        .tag("Collections")
        .response_with::<200, Json<CollectionsDocument>, _>(|res| {
            res.description("List of collections")
        })
        .response_with::<400, (), _>(|res| res.description("Unsupported output format"))
}

fn list_workspace_collections_docs(op: TransformOperation) -> TransformOperation {
    op.summary("List workspace collections")
        .description(
            "Returns the feature types whose store belongs to the workspace, named without the workspace prefix",
        )
        .tag("Collections")
        .response_with::<200, Json<CollectionsDocument>, _>(|res| {
            res.description("List of collections")
        })
        .response_with::<404, (), _>(|res| res.description("Workspace not found"))
}

pub async fn get_collection(
    State(service): State<Arc<CollectionService>>,
    Path(path): Path<CollectionPath>,
    headers: HeaderMap,
    Query(params): Query<FormatParams>,
) -> AppResult<Response> {
    respond_collection(&service, None, &path.collection_id, &headers, params).await
}

pub async fn get_workspace_collection(
    State(service): State<Arc<CollectionService>>,
    Path(path): Path<WorkspaceCollectionPath>,
    headers: HeaderMap,
    Query(params): Query<FormatParams>,
) -> AppResult<Response> {
    respond_collection(
        &service,
        Some(path.workspace),
        &path.collection_id,
        &headers,
        params,
    )
    .await
}

fn get_collection_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Get collection")
        .description("Returns the metadata and links of a single collection")
        .tag("Collections")
        .response_with::<200, Json<CollectionDocument>, _>(|res| {
            res.description("Collection metadata")
        })
        .response_with::<404, (), _>(|res| res.description("Collection not found"))
}

pub fn routes(service: Arc<CollectionService>) -> ApiRouter {
    ApiRouter::new()
        .api_route(
            "/wfs3/collections",
            get_with(list_collections, list_collections_docs),
        )
        .route("/wfs3/collections/", get(list_collections))
        .api_route(
            "/{workspace}/wfs3/collections",
            get_with(list_workspace_collections, list_workspace_collections_docs),
        )
        .route(
            "/{workspace}/wfs3/collections/",
            get(list_workspace_collections),
        )
        .api_route(
            "/wfs3/collections/{collection_id}",
            get_with(get_collection, get_collection_docs),
        )
        .api_route(
            "/{workspace}/wfs3/collections/{collection_id}",
            get_with(get_workspace_collection, get_collection_docs),
        )
        .with_state(service)
}
