//! Request identification.
//!
//! # Responsibilities
//! - Generate a unique request ID (UUID v4) as early as possible
//! - Preserve a caller-supplied `x-request-id` instead of replacing it
//! - Expose the ID to handlers via a request extension
//!
//! # Design Decisions
//! - The ID is added before any other processing so every log line and
//!   metric for the request can be correlated

use std::task::{Context, Poll};

use axum::body::Body;
use axum::http::{HeaderValue, Request};
use tower::{Layer, Service};
use uuid::Uuid;

/// Header carrying the request ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// The ID assigned to a request, stored as a request extension.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

/// Accessor for the request ID extension.
pub trait RequestIdExt {
    fn request_id(&self) -> Option<&str>;
}

impl<B> RequestIdExt for Request<B> {
    fn request_id(&self) -> Option<&str> {
        self.extensions()
            .get::<RequestId>()
            .map(|id| id.0.as_str())
    }
}

/// Tower layer that stamps every request with an ID.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestIdLayer;

impl<S> Layer<S> for RequestIdLayer {
    type Service = RequestIdService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RequestIdService { inner }
    }
}

#[derive(Debug, Clone)]
pub struct RequestIdService<S> {
    inner: S,
}

impl<S> Service<Request<Body>> for RequestIdService<S>
where
    S: Service<Request<Body>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut request: Request<Body>) -> Self::Future {
        let id = match request
            .headers()
            .get(X_REQUEST_ID)
            .and_then(|value| value.to_str().ok())
        {
            Some(existing) => existing.to_string(),
            None => {
                let generated = Uuid::new_v4().to_string();
                if let Ok(value) = HeaderValue::from_str(&generated) {
                    request.headers_mut().insert(X_REQUEST_ID, value);
                }
                generated
            }
        };
        request.extensions_mut().insert(RequestId(id));
        self.inner.call(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;
    use tower::ServiceExt;

    // Inner service that reports what the layer put on the request.
    fn probe() -> RequestIdService<
        impl Service<Request<Body>, Response = (String, String), Error = Infallible>,
    > {
        RequestIdLayer.layer(tower::service_fn(|request: Request<Body>| async move {
            let extension = request.request_id().unwrap_or("absent").to_string();
            let header = request
                .headers()
                .get(X_REQUEST_ID)
                .and_then(|value| value.to_str().ok())
                .unwrap_or("absent")
                .to_string();
            Ok::<_, Infallible>((extension, header))
        }))
    }

    #[tokio::test]
    async fn existing_header_is_preserved() {
        let request = Request::builder()
            .header(X_REQUEST_ID, "caller-chosen")
            .body(Body::empty())
            .unwrap();
        let (extension, header) = probe().oneshot(request).await.unwrap();
        assert_eq!(extension, "caller-chosen");
        assert_eq!(header, "caller-chosen");
    }

    #[tokio::test]
    async fn missing_header_gets_a_uuid() {
        let request = Request::builder().body(Body::empty()).unwrap();
        let (extension, header) = probe().oneshot(request).await.unwrap();
        assert!(Uuid::parse_str(&extension).is_ok());
        assert_eq!(extension, header);
    }
}
