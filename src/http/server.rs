//! HTTP server setup and dispatch.
//!
//! # Responsibilities
//! - Create the Axum router with catch-all routes into the dispatch handler
//! - Wire up middleware (tracing, timeout, request ID)
//! - Feed every request path through the route table
//! - Render NotFound as 404; pass view responses through unmodified
//! - Observability (metrics, correlation IDs)

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::{HeaderValue, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::api::store::WorkoutStore;
use crate::config::ServerConfig;
use crate::http::request::{RequestIdExt, RequestIdLayer, X_REQUEST_ID};
use crate::lifecycle::signals::shutdown_signal;
use crate::observability::metrics;
use crate::routes;
use crate::routing::{DispatchError, PatternError, RouteTable};

/// Application state injected into the dispatch handler and, via request
/// extensions, into every view.
#[derive(Clone)]
pub struct AppState {
    pub routes: Arc<RouteTable>,
    pub store: WorkoutStore,
    pub config: Arc<ServerConfig>,
    pub started_at: Instant,
}

/// HTTP server for the application.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    ///
    /// Builds the route-table variant the config selects; the table is
    /// immutable from here on.
    pub fn new(config: ServerConfig, store: WorkoutStore) -> Result<Self, PatternError> {
        let table = routes::for_config(&config, store.clone())?;
        let state = AppState {
            routes: Arc::new(table),
            store,
            config: Arc::new(config.clone()),
            started_at: Instant::now(),
        };
        let router = Self::build_router(&config, state);
        Ok(Self { router })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &ServerConfig, state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(dispatch_handler))
            .route("/", any(dispatch_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(RequestIdLayer)
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server until the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Main dispatch handler.
/// Resolves the path against the route table and invokes the matched view.
async fn dispatch_handler(State(state): State<AppState>, mut request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let request_id = request.request_id().unwrap_or("unknown").to_string();

    // Route patterns are relative; drop the leading slash.
    let path = request
        .uri()
        .path()
        .strip_prefix('/')
        .unwrap_or(request.uri().path())
        .to_string();
    let method = request.method().to_string();

    tracing::debug!(
        request_id = %request_id,
        method = %method,
        path = %path,
        "Dispatching request"
    );

    // Views read shared state through request extensions.
    request.extensions_mut().insert(state.clone());

    let mut response = match state.routes.resolve(&path) {
        Ok(resolved) => {
            let route_name = resolved.name.unwrap_or_else(|| "unnamed".to_string());
            let response = resolved.view.call(request, resolved.params).await;
            metrics::record_request(&method, response.status().as_u16(), &route_name, start_time);
            response
        }
        Err(DispatchError::NotFound) => {
            tracing::warn!(request_id = %request_id, path = %path, "No route matched");
            metrics::record_request(&method, 404, "none", start_time);
            (StatusCode::NOT_FOUND, "No matching route found").into_response()
        }
    };

    // Correlate the response with the request.
    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(X_REQUEST_ID, value);
    }
    response
}
