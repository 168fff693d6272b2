//! API subsystem, mounted under the `api:` namespace.
//!
//! # Routes
//! ```text
//! ""              api:index           endpoint listing
//! workouts/       api:workout-list    GET list, POST create
//! workouts/{id}/  api:workout-detail  GET one
//! whoami/         api:whoami          Host header echo
//! ```
//!
//! # Design Decisions
//! - Views branch on HTTP method and answer 405 with an Allow header for
//!   anything unsupported
//! - Views hold their own handle to the store; the route table stays free
//!   of application state

pub mod store;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, HeaderValue, Method, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use futures_util::future::BoxFuture;
use serde_json::json;

use crate::http::server::AppState;
use crate::routing::{view_fn, PathParams, PatternError, RouteTable, View};
use store::{NewWorkout, WorkoutStore};

const MAX_BODY_BYTES: usize = 1024 * 1024;

/// The API's route table, as included by the top-level configuration.
pub fn urls(store: WorkoutStore) -> Result<RouteTable, PatternError> {
    RouteTable::new()
        .view("", Some("index"), Arc::new(IndexView))?
        .view(
            "workouts/",
            Some("workout-list"),
            Arc::new(WorkoutListView {
                store: store.clone(),
            }),
        )?
        .view(
            "workouts/{id}/",
            Some("workout-detail"),
            Arc::new(WorkoutDetailView { store }),
        )?
        .view("whoami/", Some("whoami"), view_fn(whoami))
}

fn method_not_allowed(allowed: &str) -> Response {
    let mut response = (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed").into_response();
    if let Ok(value) = HeaderValue::from_str(allowed) {
        response.headers_mut().insert(header::ALLOW, value);
    }
    response
}

/// Lists the API's endpoints by introspecting the live route table.
pub struct IndexView;

impl View for IndexView {
    fn call(&self, request: Request<Body>, _params: PathParams) -> BoxFuture<'static, Response> {
        Box::pin(async move {
            let Some(state) = request.extensions().get::<AppState>() else {
                return StatusCode::INTERNAL_SERVER_ERROR.into_response();
            };
            let endpoints: Vec<_> = state
                .routes
                .route_names()
                .into_iter()
                .filter(|route| route.name.starts_with("api:"))
                .map(|route| json!({ "name": route.name, "path": route.path }))
                .collect();
            Json(json!({ "endpoints": endpoints })).into_response()
        })
    }
}

/// GET lists all workouts; POST creates one.
pub struct WorkoutListView {
    store: WorkoutStore,
}

impl View for WorkoutListView {
    fn call(&self, request: Request<Body>, _params: PathParams) -> BoxFuture<'static, Response> {
        let store = self.store.clone();
        Box::pin(async move {
            let method = request.method().clone();
            if method == Method::GET {
                Json(store.list()).into_response()
            } else if method == Method::POST {
                let body = request.into_body();
                let bytes = match axum::body::to_bytes(body, MAX_BODY_BYTES).await {
                    Ok(bytes) => bytes,
                    Err(_) => {
                        return (StatusCode::BAD_REQUEST, "Unreadable request body")
                            .into_response()
                    }
                };
                match serde_json::from_slice::<NewWorkout>(&bytes) {
                    Ok(new) => {
                        let workout = store.insert(new);
                        tracing::info!(id = workout.id, exercise = %workout.exercise, "Workout created");
                        (StatusCode::CREATED, Json(workout)).into_response()
                    }
                    Err(e) => {
                        (StatusCode::BAD_REQUEST, format!("Invalid workout: {e}")).into_response()
                    }
                }
            } else {
                method_not_allowed("GET, POST")
            }
        })
    }
}

/// GET one workout by id.
pub struct WorkoutDetailView {
    store: WorkoutStore,
}

impl View for WorkoutDetailView {
    fn call(&self, request: Request<Body>, params: PathParams) -> BoxFuture<'static, Response> {
        let store = self.store.clone();
        Box::pin(async move {
            if request.method() != Method::GET {
                return method_not_allowed("GET");
            }
            let Some(id) = params.get("id").and_then(|raw| raw.parse::<u64>().ok()) else {
                return (StatusCode::NOT_FOUND, "No such workout").into_response();
            };
            match store.get(id) {
                Some(workout) => Json(workout).into_response(),
                None => (StatusCode::NOT_FOUND, "No such workout").into_response(),
            }
        })
    }
}

/// Echoes the hostname back to the client.
async fn whoami(request: Request<Body>, _params: PathParams) -> Response {
    let host = request
        .headers()
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown host");
    tracing::debug!(host = %host, "Identity requested");
    format!("{host}, this is me.").into_response()
}
