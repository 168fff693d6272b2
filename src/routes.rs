//! Top-level URL configuration.
//!
//! Two deployable variants are shipped and never merged:
//! - `site`: root path bound to the home view, then the API and admin
//!   includes
//! - `headless`: the same includes with no root route, so the root path is
//!   a 404
//!
//! `site.serve_home` in the config selects one per deployment. The API is
//! included under the `api` namespace; the admin console is included
//! without one, so its route names resolve bare.

use std::sync::Arc;

use crate::admin;
use crate::api;
use crate::api::store::WorkoutStore;
use crate::config::ServerConfig;
use crate::routing::{PatternError, RouteTable};
use crate::views::HomeView;

/// The site variant: home view on the root path.
pub fn site(store: WorkoutStore) -> Result<RouteTable, PatternError> {
    RouteTable::new()
        .view("", Some("home"), Arc::new(HomeView))?
        .include("api/", Some("api"), api::urls(store)?)?
        .include("admin/", None, admin::urls()?)
}

/// The headless variant: no root route.
pub fn headless(store: WorkoutStore) -> Result<RouteTable, PatternError> {
    RouteTable::new()
        .include("api/", Some("api"), api::urls(store)?)?
        .include("admin/", None, admin::urls()?)
}

/// Build the variant the config selects.
pub fn for_config(config: &ServerConfig, store: WorkoutStore) -> Result<RouteTable, PatternError> {
    if config.site.serve_home {
        site(store)
    } else {
        headless(store)
    }
}
