//! Admin console, mounted at `admin/` without a namespace.
//!
//! Every view is wrapped in a bearer-token guard checking
//! `Authorization: Bearer <api_key>` against the loaded config.

pub mod auth;
pub mod handlers;

use std::sync::Arc;

use crate::routing::{PatternError, RouteTable, View};
use auth::Protected;
use handlers::{AdminIndexView, RoutesView, StatusView};

/// The admin console's route table.
pub fn urls() -> Result<RouteTable, PatternError> {
    RouteTable::new()
        .view("", Some("admin-index"), protected(AdminIndexView))?
        .view("status/", Some("admin-status"), protected(StatusView))?
        .view("routes/", Some("admin-routes"), protected(RoutesView))
}

fn protected(view: impl View) -> Arc<dyn View> {
    Arc::new(Protected::new(Arc::new(view)))
}
