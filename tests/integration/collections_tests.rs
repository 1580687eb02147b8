//! Collections listing integration tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use crate::common::{TestApp, links_with_rel};
use wfs3_server::config::{Config, ServiceConfig};

const BASE: &str = "http://localhost:8080/geoserver";

/// Every collection links to its items once per configured item format
#[tokio::test]
async fn test_collections_json() {
    let app = TestApp::new().await;

    let response = app.get("/wfs3/collections").await;
    response
        .assert_status(StatusCode::OK)
        .assert_content_type("application/json");

    let body: serde_json::Value = response.json();
    let collections = body["collections"].as_array().unwrap();
    assert_eq!(collections.len(), app.feature_type_count().await);

    for collection in collections {
        let items = links_with_rel(&collection["links"], "item");
        for format in &app.config.service.item_formats {
            assert!(
                items.iter().any(|link| link["type"] == format.as_str()),
                "{} has no item link for {}",
                collection["name"],
                format
            );
        }
    }

    let lines = &collections[0];
    assert_eq!(lines["name"], "cgf__Lines");
    let geojson = links_with_rel(&lines["links"], "item")
        .into_iter()
        .find(|link| link["type"] == "application/geo+json")
        .unwrap();
    assert_eq!(
        geojson["href"],
        format!("{}/wfs3/collections/cgf__Lines/items?f=application%2Fgeo%2Bjson", BASE)
    );
}

#[tokio::test]
async fn test_collections_tiling_links() {
    let app = TestApp::new().await;

    let body: serde_json::Value = app.get("/wfs3/collections?f=json").await.json();
    let lines = &body["collections"][0];

    let tiling_scheme = links_with_rel(&lines["links"], "tilingScheme");
    assert_eq!(tiling_scheme.len(), 1);
    assert_eq!(
        tiling_scheme[0]["href"],
        format!("{}/wfs3/collections/cgf__Lines/tiles/{{tilingSchemeId}}", BASE)
    );

    let tiles = links_with_rel(&lines["links"], "tiles");
    assert_eq!(tiles.len(), 1);
    assert_eq!(
        tiles[0]["href"],
        format!(
            "{}/wfs3/collections/cgf__Lines/tiles/{{tilingSchemeId}}/{{level}}/{{row}}/{{col}}",
            BASE
        )
    );
}

#[tokio::test]
async fn test_collections_without_tiling_extension() {
    let config = Config {
        service: ServiceConfig {
            tiles_enabled: false,
            ..Default::default()
        },
        ..Default::default()
    };
    let app = TestApp::with_config(config).await;

    let body: serde_json::Value = app.get("/wfs3/collections").await.json();
    for collection in body["collections"].as_array().unwrap() {
        assert!(links_with_rel(&collection["links"], "tilingScheme").is_empty());
        assert!(links_with_rel(&collection["links"], "tiles").is_empty());
    }
}

/// Workspace scoped listings drop the prefix and qualify hrefs with the workspace
#[tokio::test]
async fn test_workspace_collections() {
    let app = TestApp::new().await;

    let response = app.get("/cdf/wfs3/collections").await;
    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    let collections = body["collections"].as_array().unwrap();
    let in_cdf = app
        .catalog
        .feature_types()
        .await
        .iter()
        .filter(|ft| ft.store.workspace == "cdf")
        .count();
    assert_eq!(collections.len(), in_cdf);

    for collection in collections {
        let name = collection["name"].as_str().unwrap();
        assert!(!name.starts_with("cdf__"), "unexpected prefix on {}", name);
    }

    let deletes = &collections[0];
    assert_eq!(deletes["name"], "Deletes");
    let geojson = links_with_rel(&deletes["links"], "item")
        .into_iter()
        .find(|link| link["type"] == "application/geo+json")
        .unwrap();
    assert_eq!(
        geojson["href"],
        format!("{}/cdf/wfs3/collections/Deletes/items?f=application%2Fgeo%2Bjson", BASE)
    );
}

#[tokio::test]
async fn test_collections_xml() {
    let app = TestApp::new().await;

    let response = app.get("/wfs3/collections?f=application%2Fxml").await;
    response
        .assert_status(StatusCode::OK)
        .assert_content_type("application/xml");

    let text = response.text();
    assert!(text.contains("<Collections xmlns=\"http://www.opengis.net/wfs/3.0\""));
    assert_eq!(
        text.matches("<Collection>").count(),
        app.feature_type_count().await
    );
    assert!(text.contains("<Name>cgf__Lines</Name>"));
}

#[tokio::test]
async fn test_collections_xml_by_accept_header() {
    let app = TestApp::new().await;

    let response = app
        .get_accepting("/wfs3/collections", "application/xml, */*;q=0.5")
        .await;
    response
        .assert_status(StatusCode::OK)
        .assert_content_type("application/xml");
}

#[tokio::test]
async fn test_collections_yaml() {
    let app = TestApp::new().await;

    let response = app.get("/wfs3/collections?f=application%2Fx-yaml").await;
    response
        .assert_status(StatusCode::OK)
        .assert_content_type("application/x-yaml");

    let body: serde_json::Value = response.yaml();
    assert_eq!(
        body["collections"].as_array().unwrap().len(),
        app.feature_type_count().await
    );
    assert_eq!(body["collections"][0]["name"], "cgf__Lines");
}

#[tokio::test]
async fn test_collections_html() {
    let app = TestApp::new().await;

    let response = app.get("/wfs3/collections?f=text%2Fhtml").await;
    response
        .assert_status(StatusCode::OK)
        .assert_content_type("text/html");

    let text = response.text();
    for ft in app.catalog.feature_types().await {
        let name = ft.prefixed_name();
        let anchor = format!(
            "<a id=\"html_{name}_link\" href=\"{BASE}/wfs3/collections/{name}/items?f=text%2Fhtml&amp;limit=50\">",
        );
        assert!(text.contains(&anchor), "missing anchor for {}", name);
    }
    assert!(text.contains("<span id=\"cite__BasicPolygons_title\">Basic polygons</span>"));
    assert!(text.contains("<p id=\"cite__BasicPolygons_description\">I love basic polygons!</p>"));
}

#[tokio::test]
async fn test_basic_polygons_metadata_in_json() {
    let app = TestApp::new().await;

    let body: serde_json::Value = app.get("/wfs3/collections").await.json();
    let basic = body["collections"]
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["name"] == "cite__BasicPolygons")
        .unwrap();
    assert_eq!(basic["title"], "Basic polygons");
    assert_eq!(basic["description"], "I love basic polygons!");
}

#[tokio::test]
async fn test_collections_self_and_alternate_links() {
    let app = TestApp::new().await;

    let body: serde_json::Value = app.get("/wfs3/collections?f=yaml").await.yaml();
    let self_links = links_with_rel(&body["links"], "self");
    assert_eq!(self_links.len(), 1);
    assert_eq!(self_links[0]["type"], "application/x-yaml");
    assert_eq!(links_with_rel(&body["links"], "alternate").len(), 3);
}

#[tokio::test]
async fn test_collections_trailing_slash() {
    let app = TestApp::new().await;

    app.get("/wfs3/collections/").await.assert_status(StatusCode::OK);
    app.get("/cdf/wfs3/collections/").await.assert_status(StatusCode::OK);
}

#[tokio::test]
async fn test_single_collection() {
    let app = TestApp::new().await;

    let body: serde_json::Value = app.get("/wfs3/collections/cite__BasicPolygons").await.json();
    assert_eq!(body["name"], "cite__BasicPolygons");
    assert_eq!(body["title"], "Basic polygons");

    let body: serde_json::Value = app.get("/cite/wfs3/collections/BasicPolygons").await.json();
    assert_eq!(body["name"], "BasicPolygons");
    assert_eq!(
        links_with_rel(&body["links"], "item")[0]["href"],
        format!("{}/cite/wfs3/collections/BasicPolygons/items?f=application%2Fgeo%2Bjson", BASE)
    );
}

#[tokio::test]
async fn test_single_collection_extent() {
    let app = TestApp::new().await;

    let body: serde_json::Value = app.get("/wfs3/collections/cgf__Lines").await.json();
    assert_eq!(
        body["extent"]["spatial"]["bbox"][0],
        serde_json::json!([-180.0, -90.0, 180.0, 90.0])
    );
}

#[tokio::test]
async fn test_unknown_collection_is_not_found() {
    let app = TestApp::new().await;

    app.get("/wfs3/collections/cite__Nope")
        .await
        .assert_status(StatusCode::NOT_FOUND);
    // Qualified names are not accepted inside another workspace
    app.get("/cdf/wfs3/collections/cite__BasicPolygons")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_workspace_is_not_found() {
    let app = TestApp::new().await;

    let response = app.get("/nope/wfs3/collections").await;
    response.assert_status(StatusCode::NOT_FOUND);

    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "NotFound");
}

#[tokio::test]
async fn test_unknown_format_is_rejected() {
    let app = TestApp::new().await;

    let response = app.get("/wfs3/collections?f=image%2Fpng").await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "InvalidParameterValue");
}
