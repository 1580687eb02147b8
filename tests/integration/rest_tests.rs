//! REST feature type configuration tests

use axum::http::StatusCode;

use crate::common::TestApp;

const LINES: &str = "/rest/workspaces/cgf/featuretypes/Lines";

#[tokio::test]
async fn test_get_feature_type() {
    let app = TestApp::new().await;

    let response = app.get("/rest/workspaces/cite/featuretypes/BasicPolygons").await;
    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body["featureType"]["name"], "BasicPolygons");
    assert_eq!(body["featureType"]["abstract"], "I love basic polygons!");
}

/// Updates made through the REST API show up in the collections listing
#[tokio::test]
async fn test_put_json_updates_collection() {
    let app = TestApp::new().await;

    app.put(
        LINES,
        r#"{"featureType": {"title": "Lines", "abstract": "Line strings"}}"#,
        "application/json",
    )
    .await
    .assert_status(StatusCode::OK);

    let body: serde_json::Value = app.get("/wfs3/collections/cgf__Lines").await.json();
    assert_eq!(body["title"], "Lines");
    assert_eq!(body["description"], "Line strings");
}

#[tokio::test]
async fn test_put_xml_updates_collection() {
    let app = TestApp::new().await;

    app.put(
        LINES,
        "<featureType><title>XML lines</title><keywords><string>lines</string></keywords></featureType>",
        "application/xml",
    )
    .await
    .assert_status(StatusCode::OK);

    let body: serde_json::Value = app.get("/cgf/wfs3/collections/Lines").await.json();
    assert_eq!(body["title"], "XML lines");

    let body: serde_json::Value = app.get(LINES).await.json();
    assert_eq!(body["featureType"]["keywords"]["string"], serde_json::json!(["lines"]));
}

#[tokio::test]
async fn test_put_yaml_updates_collection() {
    let app = TestApp::new().await;

    app.put(LINES, "featureType:\n  title: YAML lines\n", "application/x-yaml")
        .await
        .assert_status(StatusCode::OK);

    let body: serde_json::Value = app.get("/wfs3/collections/cgf__Lines").await.json();
    assert_eq!(body["title"], "YAML lines");
}

#[tokio::test]
async fn test_put_xml_with_wrong_root_is_rejected() {
    let app = TestApp::new().await;

    app.put(LINES, "<coverage><title>x</title></coverage>", "application/xml")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_put_json_with_wrong_root_is_rejected() {
    let app = TestApp::new().await;

    app.put(LINES, r#"{"coverage": {"title": "X"}}"#, "application/json")
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let body: serde_json::Value = app.get(LINES).await.json();
    assert!(body["featureType"].get("title").is_none());
}

#[tokio::test]
async fn test_put_unknown_fields_are_rejected() {
    let app = TestApp::new().await;

    app.put(LINES, r#"{"featureType": {"titel": "X"}}"#, "application/json")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    app.put(LINES, "coverage:\n  title: X\n", "application/x-yaml")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_put_unsupported_media_type() {
    let app = TestApp::new().await;

    app.put(LINES, "title=x", "text/plain")
        .await
        .assert_status(StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[tokio::test]
async fn test_put_rename_is_rejected() {
    let app = TestApp::new().await;

    app.put(LINES, r#"{"name": "Curves"}"#, "application/json")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_put_unknown_feature_type() {
    let app = TestApp::new().await;

    app.put(
        "/rest/workspaces/cgf/featuretypes/Nope",
        r#"{"title": "x"}"#,
        "application/json",
    )
    .await
    .assert_status(StatusCode::NOT_FOUND);
}
