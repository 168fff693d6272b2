//! Bearer-token guard for admin views.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use futures_util::future::BoxFuture;

use crate::http::server::AppState;
use crate::routing::{PathParams, View};

/// Wraps a view, admitting only requests carrying the configured API key.
pub struct Protected {
    inner: Arc<dyn View>,
}

impl Protected {
    pub fn new(inner: Arc<dyn View>) -> Self {
        Self { inner }
    }
}

impl View for Protected {
    fn call(&self, request: Request<Body>, params: PathParams) -> BoxFuture<'static, Response> {
        let inner = self.inner.clone();
        Box::pin(async move {
            let Some(state) = request.extensions().get::<AppState>() else {
                return StatusCode::INTERNAL_SERVER_ERROR.into_response();
            };

            let expected = format!("Bearer {}", state.config.admin.api_key);
            let authorized = request
                .headers()
                .get(header::AUTHORIZATION)
                .and_then(|value| value.to_str().ok())
                .map(|value| value == expected)
                .unwrap_or(false);

            if !authorized {
                return StatusCode::UNAUTHORIZED.into_response();
            }

            inner.call(request, params).await
        })
    }
}
