use applet_core::catalog::Catalog;
use applet_core::config::Config;
use axum::http::StatusCode;
use http_body_util::BodyExt;
use std::collections::HashSet;
use tempfile::TempDir;
use tower::ServiceExt;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// A fixed 31-day window so feed responses are reproducible and the
/// 200-activity cap is reached.
const WINDOW: &str = "sinceTime=2024-05-01T12:00:00Z&beforeTime=2024-06-01T12:00:00Z";

fn app(dir: &TempDir) -> axum::Router {
    applet_server::build_router(dir.path().to_path_buf(), Config::default())
}

/// Send a GET request via `oneshot` and return (status, parsed JSON body).
async fn get(app: axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let req = axum::http::Request::builder()
        .uri(uri)
        .body(axum::body::Body::empty())
        .unwrap();
    let response = app.oneshot(req).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    (status, json)
}

/// Send an empty POST request via `oneshot` and return (status, parsed JSON body).
async fn post(app: axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let req = axum::http::Request::builder()
        .method("POST")
        .uri(uri)
        .body(axum::body::Body::empty())
        .unwrap();
    let response = app.oneshot(req).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    (status, json)
}

fn ids(json: &serde_json::Value) -> Vec<String> {
    json["activities"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["id"].as_str().unwrap().to_string())
        .collect()
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_services_returns_seeded_catalog() {
    let dir = TempDir::new().unwrap();
    let (status, json) = get(app(&dir), "/api/services").await;

    assert_eq!(status, StatusCode::OK);
    let services = json.as_array().unwrap();
    assert_eq!(services.len(), 10);
    assert_eq!(services[0]["slug"], "instagram");
    assert_eq!(services[0]["brandColor"], "#E1306C");
}

#[tokio::test]
async fn get_service_by_id() {
    let dir = TempDir::new().unwrap();
    let (status, json) = get(app(&dir), "/api/services/2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["name"], "Dropbox");
    assert_eq!(json["id"], "2");
}

#[tokio::test]
async fn get_unknown_service_is_404() {
    let dir = TempDir::new().unwrap();
    let (status, json) = get(app(&dir), "/api/services/99").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["error"].as_str().unwrap().contains("99"));
}

#[tokio::test]
async fn get_applet_includes_services() {
    let dir = TempDir::new().unwrap();
    let (status, json) = get(app(&dir), "/api/applets/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["name"], "Save Instagram photos to Dropbox");
    assert_eq!(json["triggerService"]["slug"], "instagram");
    assert_eq!(json["actionService"]["slug"], "dropbox");
    assert_eq!(json["enabled"], true);
}

#[tokio::test]
async fn toggle_persists_and_filters() {
    let dir = TempDir::new().unwrap();

    let (status, json) = post(app(&dir), "/api/applets/2/toggle").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["enabled"], false);
    assert!(!Catalog::load(dir.path()).unwrap().applet(2).unwrap().enabled);

    let (_, enabled) = get(app(&dir), "/api/applets?enabled=true").await;
    assert_eq!(enabled.as_array().unwrap().len(), 4);
    let (_, disabled) = get(app(&dir), "/api/applets?enabled=false").await;
    assert_eq!(disabled.as_array().unwrap().len(), 1);
    assert_eq!(disabled[0]["id"], "2");
    let (_, all) = get(app(&dir), "/api/applets").await;
    assert_eq!(all.as_array().unwrap().len(), 5);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_toggles_are_not_lost() {
    let dir = TempDir::new().unwrap();
    let app = app(&dir);

    let mut handles = Vec::new();
    for _ in 0..5 {
        let app = app.clone();
        handles.push(tokio::spawn(async move {
            post(app, "/api/applets/4/toggle").await
        }));
    }
    let mut states = Vec::new();
    for h in handles {
        let (status, json) = h.await.unwrap();
        assert_eq!(status, StatusCode::OK);
        states.push(json["enabled"].as_bool().unwrap());
    }

    // Five serialized flips from enabled: three reports of off, two of on.
    assert_eq!(states.iter().filter(|e| !**e).count(), 3);
    assert!(!Catalog::load(dir.path()).unwrap().applet(4).unwrap().enabled);
}

#[tokio::test]
async fn toggle_unknown_applet_is_404() {
    let dir = TempDir::new().unwrap();
    let (status, _) = post(app(&dir), "/api/applets/77/toggle").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(!dir.path().join(".applets/catalog.yaml").exists());
}

// ---------------------------------------------------------------------------
// Activity feed
// ---------------------------------------------------------------------------

#[tokio::test]
async fn activities_default_page_shape() {
    let dir = TempDir::new().unwrap();
    let (status, json) = get(
        app(&dir),
        &format!("/api/applets/1/activities?{WINDOW}"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["page"], 1);
    assert_eq!(json["perPage"], 20);
    assert_eq!(json["totalCount"], 200);
    assert_eq!(json["totalPages"], 10);

    let activities = json["activities"].as_array().unwrap();
    assert_eq!(activities.len(), 20);
    for a in activities {
        assert_eq!(a["appletId"], "1");
        assert_eq!(a["triggerData"]["service"], "Instagram");
        assert_eq!(a["actionData"]["service"], "Dropbox");
        assert!(a["ranAt"].as_str().unwrap().ends_with('Z'));
        let failed = a["status"] == "failed";
        assert_eq!(!a["errorMessage"].is_null(), failed);
    }
}

#[tokio::test]
async fn activities_are_reproducible() {
    let dir = TempDir::new().unwrap();
    let uri = format!("/api/applets/3/activities?{WINDOW}&perPage=50");
    let (_, a) = get(app(&dir), &uri).await;
    let (_, b) = get(app(&dir), &uri).await;
    assert_eq!(a, b);
}

#[tokio::test]
async fn activities_filter_by_status() {
    let dir = TempDir::new().unwrap();
    let (status, json) = get(
        app(&dir),
        &format!("/api/applets/1/activities?{WINDOW}&status=failed&perPage=50"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let activities = json["activities"].as_array().unwrap();
    assert!(!activities.is_empty());
    for a in activities {
        assert_eq!(a["status"], "failed");
        assert!(a["errorMessage"].is_string());
    }
    assert_eq!(json["totalCount"].as_u64().unwrap() as usize, activities.len());
}

#[tokio::test]
async fn activities_search_ignores_case() {
    let dir = TempDir::new().unwrap();
    let base = format!("/api/applets/1/activities?{WINDOW}&perPage=100");
    let (_, lower) = get(app(&dir), &format!("{base}&search=photo")).await;
    let (_, upper) = get(app(&dir), &format!("{base}&search=PHOTO")).await;
    assert!(!ids(&lower).is_empty());
    assert_eq!(ids(&lower), ids(&upper));
    assert_eq!(lower["totalCount"], upper["totalCount"]);
}

#[tokio::test]
async fn activities_pages_do_not_overlap() {
    let dir = TempDir::new().unwrap();
    let base = format!("/api/applets/1/activities?{WINDOW}&perPage=10");
    let (_, p2) = get(app(&dir), &format!("{base}&page=2")).await;
    let (_, p1) = get(app(&dir), &format!("{base}&page=1")).await;
    let first: HashSet<String> = ids(&p1).into_iter().collect();
    assert_eq!(ids(&p2).len(), 10);
    assert!(ids(&p2).iter().all(|id| !first.contains(id)));
}

#[tokio::test]
async fn malformed_params_degrade_to_defaults() {
    let dir = TempDir::new().unwrap();
    let (status, json) = get(
        app(&dir),
        &format!(
            "/api/applets/1/activities?page=abc&perPage=5000&status=exploded&sinceTime=whenever"
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["page"], 1);
    assert_eq!(json["perPage"], 100);
    assert_eq!(json["activities"].as_array().unwrap().len(), 100);
}

#[tokio::test]
async fn page_past_the_end_is_empty() {
    let dir = TempDir::new().unwrap();
    let (status, json) = get(
        app(&dir),
        &format!("/api/applets/1/activities?{WINDOW}&page=99"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["activities"].as_array().unwrap().is_empty());
    assert_eq!(json["totalCount"], 200);
}

#[tokio::test]
async fn overflowing_page_is_past_the_end() {
    let dir = TempDir::new().unwrap();
    let (status, json) = get(
        app(&dir),
        &format!("/api/applets/1/activities?{WINDOW}&page=99999999999999999999"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["activities"].as_array().unwrap().is_empty());
    assert_eq!(json["page"].as_u64(), Some(i64::MAX as u64));
    assert_eq!(json["totalCount"], 200);
}

#[tokio::test]
async fn activities_for_unknown_applet_is_404() {
    let dir = TempDir::new().unwrap();
    let (status, json) = get(app(&dir), "/api/applets/404/activities").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "applet not found: 404");

    let (status, _) = get(app(&dir), "/api/applets/not-a-number/activities").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn latest_respects_since_and_limit() {
    let dir = TempDir::new().unwrap();
    let (status, json) = get(
        app(&dir),
        "/api/applets/2/activities/latest?since=2000-01-01&limit=3",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let activities = json["activities"].as_array().unwrap();
    assert_eq!(activities.len(), 3);
    let times: Vec<&str> = activities
        .iter()
        .map(|a| a["ranAt"].as_str().unwrap())
        .collect();
    assert!(times.windows(2).all(|w| w[0] >= w[1]));
}

#[tokio::test]
async fn feed_config_caps_generation() {
    let dir = TempDir::new().unwrap();
    let mut config = Config::default();
    config.feed.max_activities = 12;
    let app = applet_server::build_router(dir.path().to_path_buf(), config);
    let (_, json) = get(app, &format!("/api/applets/1/activities?{WINDOW}")).await;
    assert_eq!(json["totalCount"], 12);
}
