//! Top-level views.

use axum::body::Body;
use axum::http::Request;
use axum::response::{Html, IntoResponse, Response};
use futures_util::future::BoxFuture;

use crate::routing::{PathParams, View};

const LANDING_PAGE: &str = "<!doctype html>\n\
<html>\n\
<head><title>Flywheel</title></head>\n\
<body>\n\
<h1>Flywheel</h1>\n\
<p>Workout tracking. The API lives under <a href=\"/api/\">/api/</a>.</p>\n\
</body>\n\
</html>\n";

/// Handler object bound to the root path in the site variant.
pub struct HomeView;

impl View for HomeView {
    fn call(&self, _request: Request<Body>, _params: PathParams) -> BoxFuture<'static, Response> {
        Box::pin(async { Html(LANDING_PAGE).into_response() })
    }
}
