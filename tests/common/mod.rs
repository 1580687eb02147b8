//! Common test utilities and fixtures
//!
//! The application is built in-process over the catalog in
//! `tests/fixtures/catalog.yaml` and driven with `tower::ServiceExt::oneshot`.

use axum::{
    Router,
    body::Body,
    extract::Request,
    http::{Method, StatusCode, header},
    response::Response,
};
use http_body_util::BodyExt;
use serde::de::DeserializeOwned;
use std::sync::{Arc, Once};
use tower::ServiceExt;

use wfs3_server::{app::build_router, catalog::Catalog, config::Config};

static INIT: Once = Once::new();

pub const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/catalog.yaml");

/// Initialize test logging
pub fn init_logging() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("wfs3_server=debug")
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// Links of a JSON document with the given relation
pub fn links_with_rel<'a>(links: &'a serde_json::Value, rel: &str) -> Vec<&'a serde_json::Value> {
    links
        .as_array()
        .map(|links| {
            links
                .iter()
                .filter(|link| link.get("rel").and_then(|r| r.as_str()) == Some(rel))
                .collect()
        })
        .unwrap_or_default()
}

// ============================================================================
// Test Application Builder
// ============================================================================

/// A test application with an in-process router
pub struct TestApp {
    pub router: Router,
    pub catalog: Arc<Catalog>,
    pub config: Arc<Config>,
}

impl TestApp {
    /// Create a test application over the fixture catalog
    pub async fn new() -> Self {
        Self::with_config(Config::default()).await
    }

    pub async fn with_config(config: Config) -> Self {
        init_logging();

        let config = Arc::new(config);
        let catalog = Arc::new(Catalog::load(FIXTURE).expect("Failed to load fixture catalog"));

        // Fixture metadata edited the way an administrator would
        let mut basic = catalog
            .feature_type("cite", "BasicPolygons")
            .await
            .expect("BasicPolygons in fixture");
        basic.title = Some("Basic polygons".to_string());
        basic.description = Some("I love basic polygons!".to_string());
        catalog
            .save_feature_type(basic)
            .await
            .expect("Failed to update BasicPolygons");

        let router = build_router(config.clone(), catalog.clone());

        Self {
            router,
            catalog,
            config,
        }
    }

    /// Number of feature types in the catalog behind the app
    pub async fn feature_type_count(&self) -> usize {
        self.catalog.feature_types().await.len()
    }

    /// Make a GET request to the test app
    pub async fn get(&self, uri: &str) -> TestResponse {
        self.request(Method::GET, uri, vec![], Body::empty()).await
    }

    /// Make a GET request with an Accept header
    pub async fn get_accepting(&self, uri: &str, accept: &str) -> TestResponse {
        self.request(Method::GET, uri, vec![(header::ACCEPT, accept)], Body::empty())
            .await
    }

    /// Make a PUT request with a body of the given content type
    pub async fn put(&self, uri: &str, body: impl Into<String>, content_type: &str) -> TestResponse {
        self.request(
            Method::PUT,
            uri,
            vec![(header::CONTENT_TYPE, content_type)],
            Body::from(body.into()),
        )
        .await
    }

    /// Make a raw request
    async fn request(
        &self,
        method: Method,
        uri: &str,
        headers: Vec<(header::HeaderName, &str)>,
        body: Body,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        for (name, value) in headers {
            builder = builder.header(name, value);
        }
        let request = builder.body(body).expect("Failed to build request");

        self.send(request).await
    }

    /// Send a request to the router
    async fn send(&self, request: Request) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        TestResponse::from_response(response).await
    }
}

// ============================================================================
// Test Response
// ============================================================================

/// A test response with convenient methods for assertions
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    async fn from_response(response: Response) -> Self {
        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes()
            .to_vec();

        Self {
            status,
            headers,
            body,
        }
    }

    /// Get the response body as a string
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }

    /// Parse the response body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body).expect("Failed to parse JSON")
    }

    /// Parse the response body as YAML
    pub fn yaml<T: DeserializeOwned>(&self) -> T {
        serde_yaml_ng::from_str(&self.text()).expect("Failed to parse YAML")
    }

    /// Get a header value
    pub fn header(&self, name: &str) -> Option<String> {
        self.headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string())
    }

    /// Assert the status code
    pub fn assert_status(&self, expected: StatusCode) -> &Self {
        assert_eq!(
            self.status,
            expected,
            "Expected status {}, got {}. Body: {}",
            expected,
            self.status,
            self.text()
        );
        self
    }

    /// Assert the status is success (2xx)
    pub fn assert_success(&self) -> &Self {
        assert!(
            self.status.is_success(),
            "Expected success status, got {}. Body: {}",
            self.status,
            self.text()
        );
        self
    }

    /// Assert content type header
    pub fn assert_content_type(&self, expected: &str) -> &Self {
        let content_type = self.header("content-type").unwrap_or_default();
        assert!(
            content_type.starts_with(expected),
            "Expected content type starting with {}, got {}",
            expected,
            content_type
        );
        self
    }
}
