//! flywheel: a workout-tracking web service with ordered, include-based
//! URL dispatch.
//!
//! The route table is built once at startup from static declarations and is
//! immutable thereafter; every request path is matched against it in
//! declaration order, first match wins.

pub mod admin;
pub mod api;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routes;
pub mod routing;
pub mod views;

pub use config::ServerConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::RouteTable;
