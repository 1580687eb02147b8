use aide::axum::ApiRouter;
use axum::{Extension, Router};
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    api::{collections, conformance, landing, tiles},
    catalog::Catalog,
    config::Config,
    openapi, rest,
    services::CollectionService,
};

/// Assemble the full application: the documented WFS3 routes plus the REST
/// configuration endpoints.
pub fn build_router(config: Arc<Config>, catalog: Arc<Catalog>) -> Router {
    let mut openapi = openapi::create_openapi(&config);

    let collection_service = Arc::new(CollectionService::new(catalog.clone(), &config));

    let api_router = ApiRouter::new()
        .merge(landing::routes(collection_service.clone()))
        .merge(conformance::routes(collection_service.clone()))
        .merge(collections::handlers::routes(collection_service.clone()))
        .merge(tiles::routes(collection_service))
        .merge(openapi::docs_routes())
        .finish_api(&mut openapi);

    let openapi = Arc::new(openapi);

    Router::from(api_router)
        .merge(rest::featuretypes::routes(catalog))
        .layer(Extension(config))
        .layer(Extension(openapi))
        .layer(CompressionLayer::new())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}
