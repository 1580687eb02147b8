use aide::{
    axum::{ApiRouter, routing::get_with},
    openapi::{Components, ExternalDocumentation, Info, License, OpenApi, Server, Tag},
    transform::TransformOperation,
};
use axum::{Extension, Json};
use indexmap::IndexMap;
use schemars::schema_for;
use std::sync::Arc;

use crate::api::collections::schemas::{CollectionDocument, CollectionsDocument};
use crate::api::common::{Extent, Link};
use crate::api::conformance::Conformance;
use crate::api::landing::LandingPage;
use crate::api::tiles::TilingSchemes;
use crate::config::Config;

/// Create the base OpenAPI specification with metadata
pub fn create_openapi(config: &Config) -> OpenApi {
    let mut schemas = IndexMap::new();

    schemas.insert("Link".to_string(), schemars_to_openapi_schema::<Link>());
    schemas.insert("Extent".to_string(), schemars_to_openapi_schema::<Extent>());
    schemas.insert(
        "LandingPage".to_string(),
        schemars_to_openapi_schema::<LandingPage>(),
    );
    schemas.insert(
        "Conformance".to_string(),
        schemars_to_openapi_schema::<Conformance>(),
    );
    schemas.insert(
        "Collection".to_string(),
        schemars_to_openapi_schema::<CollectionDocument>(),
    );
    schemas.insert(
        "Collections".to_string(),
        schemars_to_openapi_schema::<CollectionsDocument>(),
    );
    schemas.insert(
        "TilingSchemes".to_string(),
        schemars_to_openapi_schema::<TilingSchemes>(),
    );

    let components = Components {
        schemas,
        ..Default::default()
    };

    let wfs_docs = || {
        Some(ExternalDocumentation {
            url: "https://docs.ogc.org/is/17-069r3/17-069r3.html".to_string(),
            description: Some("OGC API - Features (WFS 3.0) specification".to_string()),
            extensions: IndexMap::new(),
        })
    };

    OpenApi {
        openapi: "3.0.3".into(),
        info: Info {
            title: "WFS3 API".to_string(),
            description: Some(
                "Web Feature Service 3.0 endpoints over the server catalog.\n\n\
                Every resource is available as JSON, XML, YAML and HTML. The format is \
                picked by the `f` query parameter, then by the `Accept` header, and \
                defaults to JSON.\n\n\
                Collections are published globally as `{workspace}__{name}` and under \
                `/{workspace}/wfs3` by their plain name."
                    .to_string(),
            ),
            version: env!("CARGO_PKG_VERSION").to_string(),
            license: Some(License {
                name: "MPL-2.0".to_string(),
                url: Some("https://www.mozilla.org/en-US/MPL/2.0/".to_string()),
                identifier: None,
                extensions: IndexMap::new(),
            }),
            contact: None,
            terms_of_service: None,
            summary: None,
            extensions: IndexMap::new(),
        },
        servers: vec![Server {
            url: config.base().to_string(),
            description: Some("WFS3 Server".to_string()),
            variables: IndexMap::new(),
            extensions: IndexMap::new(),
        }],
        components: Some(components),
        tags: vec![
            Tag {
                name: "Core".to_string(),
                description: Some(
                    "Landing page, conformance declaration and API definition".to_string(),
                ),
                external_docs: wfs_docs(),
                extensions: IndexMap::new(),
            },
            Tag {
                name: "Collections".to_string(),
                description: Some("Feature type collections published by the catalog".to_string()),
                external_docs: wfs_docs(),
                extensions: IndexMap::new(),
            },
            Tag {
                name: "Tiles".to_string(),
                description: Some("Tiling schemes advertised by the tiling extension".to_string()),
                external_docs: None,
                extensions: IndexMap::new(),
            },
        ],
        paths: None, // Will be populated by ApiRouter
        webhooks: IndexMap::new(),
        external_docs: None,
        extensions: IndexMap::new(),
        json_schema_dialect: None,
        security: vec![],
    }
}

/// Convert a schemars schema to an aide SchemaObject
fn schemars_to_openapi_schema<T: schemars::JsonSchema>() -> aide::openapi::SchemaObject {
    let root = schema_for!(T);
    aide::openapi::SchemaObject {
        json_schema: root.into(),
        external_docs: None,
        example: None,
    }
}

/// Handler to serve the OpenAPI specification
pub async fn openapi_handler(Extension(api): Extension<Arc<OpenApi>>) -> Json<OpenApi> {
    Json((*api).clone())
}

fn openapi_handler_docs(op: TransformOperation) -> TransformOperation {
    op.summary("API definition")
        .description("Returns the OpenAPI 3.0 definition of the WFS3 service")
        .tag("Core")
}

/// The API definition the landing page `service` link points at
pub fn docs_routes() -> ApiRouter {
    ApiRouter::new().api_route("/wfs3/api", get_with(openapi_handler, openapi_handler_docs))
}
