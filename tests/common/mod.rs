//! Shared utilities for integration tests.

use std::net::SocketAddr;

use tokio::net::TcpListener;

use flywheel::api::store::WorkoutStore;
use flywheel::{HttpServer, ServerConfig, Shutdown};

/// Spawn a real server on an ephemeral port.
///
/// The returned `Shutdown` stops the server when triggered; dropping it
/// without triggering leaves the task to die with the test runtime.
pub async fn spawn_server(config: ServerConfig) -> (SocketAddr, Shutdown) {
    let store = WorkoutStore::new();
    let server = HttpServer::new(config, store).expect("route table must build");

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });

    (addr, shutdown)
}

/// Config for the site variant with a known admin key.
pub fn site_config() -> ServerConfig {
    let mut config = ServerConfig::default();
    config.site.serve_home = true;
    config.admin.api_key = "test-admin-key".to_string();
    config
}

/// Config for the headless variant with a known admin key.
#[allow(dead_code)]
pub fn headless_config() -> ServerConfig {
    let mut config = site_config();
    config.site.serve_home = false;
    config
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .build()
        .unwrap()
}
