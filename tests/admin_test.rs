//! Admin console tests through the real server.

use axum::http::StatusCode;
use serde_json::Value;

mod common;

#[tokio::test]
async fn admin_endpoints_require_the_bearer_token() {
    let (addr, shutdown) = common::spawn_server(common::site_config()).await;
    let client = common::client();

    for path in ["/admin/", "/admin/status/", "/admin/routes/"] {
        let res = client
            .get(format!("http://{}{}", addr, path))
            .send()
            .await
            .expect("server unreachable");
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED, "no token, {path:?}");

        let res = client
            .get(format!("http://{}{}", addr, path))
            .header("authorization", "Bearer wrong-key")
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED, "bad token, {path:?}");
    }

    shutdown.trigger();
}

#[tokio::test]
async fn status_reports_version_and_uptime() {
    let (addr, shutdown) = common::spawn_server(common::site_config()).await;
    let client = common::client();

    let res = client
        .get(format!("http://{}/admin/status/", addr))
        .header("authorization", "Bearer test-admin-key")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["status"], "operational");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(body["workouts"].as_u64(), Some(0));
    assert!(body["uptime_secs"].is_u64());

    shutdown.trigger();
}

#[tokio::test]
async fn routes_listing_shows_qualified_names() {
    let (addr, shutdown) = common::spawn_server(common::site_config()).await;
    let client = common::client();

    let res = client
        .get(format!("http://{}/admin/routes/", addr))
        .header("authorization", "Bearer test-admin-key")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let routes: Vec<Value> = res.json().await.unwrap();

    let find = |name: &str| {
        routes
            .iter()
            .find(|route| route["name"] == name)
            .unwrap_or_else(|| panic!("route {name:?} not listed"))
    };
    assert_eq!(find("home")["path"], "/");
    assert_eq!(find("api:workout-detail")["path"], "/api/workouts/{id}/");
    assert_eq!(find("admin-status")["path"], "/admin/status/");

    shutdown.trigger();
}

#[tokio::test]
async fn admin_index_points_at_the_other_endpoints() {
    let (addr, shutdown) = common::spawn_server(common::site_config()).await;
    let client = common::client();

    let res = client
        .get(format!("http://{}/admin/", addr))
        .header("authorization", "Bearer test-admin-key")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["status"], "/admin/status/");
    assert_eq!(body["routes"], "/admin/routes/");

    shutdown.trigger();
}
