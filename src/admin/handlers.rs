//! Admin console views.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use futures_util::future::BoxFuture;
use serde::Serialize;
use serde_json::json;

use crate::http::server::AppState;
use crate::routing::{PathParams, View};

#[derive(Serialize)]
pub struct SystemStatus {
    pub version: &'static str,
    pub status: &'static str,
    pub uptime_secs: u64,
    pub workouts: usize,
}

#[derive(Serialize)]
pub struct RouteEntry {
    pub name: String,
    pub path: String,
}

/// Lists the admin console's own endpoints.
pub struct AdminIndexView;

impl View for AdminIndexView {
    fn call(&self, request: Request<Body>, _params: PathParams) -> BoxFuture<'static, Response> {
        Box::pin(async move {
            let Some(state) = request.extensions().get::<AppState>() else {
                return StatusCode::INTERNAL_SERVER_ERROR.into_response();
            };
            let status = state.routes.reverse("admin-status", &[]).ok();
            let routes = state.routes.reverse("admin-routes", &[]).ok();
            Json(json!({
                "status": status,
                "routes": routes,
            }))
            .into_response()
        })
    }
}

/// Version, uptime, and store size.
pub struct StatusView;

impl View for StatusView {
    fn call(&self, request: Request<Body>, _params: PathParams) -> BoxFuture<'static, Response> {
        Box::pin(async move {
            let Some(state) = request.extensions().get::<AppState>() else {
                return StatusCode::INTERNAL_SERVER_ERROR.into_response();
            };
            Json(SystemStatus {
                version: env!("CARGO_PKG_VERSION"),
                status: "operational",
                uptime_secs: state.started_at.elapsed().as_secs(),
                workouts: state.store.len(),
            })
            .into_response()
        })
    }
}

/// Every registered route name with its pattern path.
pub struct RoutesView;

impl View for RoutesView {
    fn call(&self, request: Request<Body>, _params: PathParams) -> BoxFuture<'static, Response> {
        Box::pin(async move {
            let Some(state) = request.extensions().get::<AppState>() else {
                return StatusCode::INTERNAL_SERVER_ERROR.into_response();
            };
            let routes: Vec<RouteEntry> = state
                .routes
                .route_names()
                .into_iter()
                .map(|route| RouteEntry {
                    name: route.name,
                    path: route.path,
                })
                .collect();
            Json(routes).into_response()
        })
    }
}
