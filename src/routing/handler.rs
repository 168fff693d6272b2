//! View invocation seam.
//!
//! # Responsibilities
//! - Define the `View` trait dispatched to by the route table
//! - Carry captured path parameters to the view
//! - Adapt plain async functions into views
//!
//! # Design Decisions
//! - Views are trait objects behind `Arc`: the table stays immutable and
//!   cheap to share while views hold their own state (stores, config)
//! - `call` takes the request by value; the view owns it from then on
//! - Handler objects and `view_fn`-adapted functions are interchangeable

use std::future::Future;
use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use futures_util::future::BoxFuture;

/// Parameters captured from the request path, in capture order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParams {
    captures: Vec<(String, String)>,
}

impl PathParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: &str, value: &str) {
        self.captures.push((name.to_string(), value.to_string()));
    }

    /// Look up a capture by name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.captures
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.captures.is_empty()
    }

    pub fn len(&self) -> usize {
        self.captures.len()
    }

    /// Append all captures from an inner match (include recursion).
    pub fn extend(&mut self, other: PathParams) {
        self.captures.extend(other.captures);
    }
}

/// The unit of code invoked when a route's pattern matches a request.
pub trait View: Send + Sync + 'static {
    fn call(&self, request: Request<Body>, params: PathParams) -> BoxFuture<'static, Response>;
}

struct FnView<F>(F);

impl<F, Fut> View for FnView<F>
where
    F: Fn(Request<Body>, PathParams) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Response> + Send + 'static,
{
    fn call(&self, request: Request<Body>, params: PathParams) -> BoxFuture<'static, Response> {
        Box::pin((self.0)(request, params))
    }
}

/// Adapt a plain async function into a view.
pub fn view_fn<F, Fut>(f: F) -> Arc<dyn View>
where
    F: Fn(Request<Body>, PathParams) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Response> + Send + 'static,
{
    Arc::new(FnView(f))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn params_lookup_by_name() {
        let mut params = PathParams::new();
        params.push("id", "5");
        params.push("rest", "a/b");
        assert_eq!(params.get("id"), Some("5"));
        assert_eq!(params.get("rest"), Some("a/b"));
        assert_eq!(params.get("missing"), None);
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn extend_preserves_capture_order() {
        let mut outer = PathParams::new();
        outer.push("version", "v1");
        let mut inner = PathParams::new();
        inner.push("id", "5");
        outer.extend(inner);
        assert_eq!(outer.get("version"), Some("v1"));
        assert_eq!(outer.get("id"), Some("5"));
    }
}
