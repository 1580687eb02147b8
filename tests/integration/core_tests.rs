//! Landing page, conformance, API definition and tiling scheme tests

use axum::http::StatusCode;

use crate::common::{TestApp, links_with_rel};

#[tokio::test]
async fn test_landing_page() {
    let app = TestApp::new().await;

    let response = app.get("/wfs3").await;
    response
        .assert_status(StatusCode::OK)
        .assert_content_type("application/json");

    let body: serde_json::Value = response.json();
    assert_eq!(
        links_with_rel(&body["links"], "service")[0]["href"],
        "http://localhost:8080/geoserver/wfs3/api"
    );
    assert_eq!(
        links_with_rel(&body["links"], "conformance")[0]["href"],
        "http://localhost:8080/geoserver/wfs3/conformance"
    );
    assert_eq!(links_with_rel(&body["links"], "data").len(), 4);
}

#[tokio::test]
async fn test_workspace_landing_page() {
    let app = TestApp::new().await;

    let body: serde_json::Value = app.get("/cite/wfs3").await.json();
    let data = links_with_rel(&body["links"], "data");
    assert!(
        data[0]["href"]
            .as_str()
            .unwrap()
            .starts_with("http://localhost:8080/geoserver/cite/wfs3/collections?f=")
    );

    app.get("/nope/wfs3")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_conformance() {
    let app = TestApp::new().await;

    let response = app.get("/wfs3/conformance").await;
    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    let classes = body["conformsTo"].as_array().unwrap();
    assert!(
        classes
            .iter()
            .any(|c| c == "http://www.opengis.net/spec/wfs-1/3.0/req/core")
    );
}

#[tokio::test]
async fn test_conformance_html() {
    let app = TestApp::new().await;

    app.get("/wfs3/conformance?f=html")
        .await
        .assert_status(StatusCode::OK)
        .assert_content_type("text/html");
}

#[tokio::test]
async fn test_api_definition() {
    let app = TestApp::new().await;

    let response = app.get("/wfs3/api").await;
    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body["info"]["title"], "WFS3 API");
    assert!(body["paths"]["/wfs3/collections"].is_object());
}

#[tokio::test]
async fn test_tiling_schemes() {
    let app = TestApp::new().await;

    let body: serde_json::Value = app.get("/wfs3/tilingSchemes").await.json();
    let schemes = body["tilingSchemes"].as_array().unwrap();
    assert!(schemes.iter().any(|s| s == "GoogleMapsCompatible"));
}
