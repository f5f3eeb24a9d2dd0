// src/server.rs
use std::net::SocketAddr;

use tokio::net::TcpListener;

use crate::config::AppConfig;

/// Ports tried after the configured one when it is taken.
pub const EXTRA_PORTS: u16 = 20;

/// Binds the configured host on the first free port in
/// `port..=port + EXTRA_PORTS`.
pub async fn bind_listener(config: &AppConfig) -> Option<(TcpListener, SocketAddr)> {
    for offset in 0..=EXTRA_PORTS {
        let addr = SocketAddr::from((config.host, config.port.saturating_add(offset)));
        match TcpListener::bind(addr).await {
            Ok(listener) => return Some((listener, addr)),
            Err(e) if offset == 0 => tracing::warn!(%addr, error = %e, "Port in use, trying next"),
            Err(_) => {}
        }
    }

    tracing::error!(
        "Failed to bind to any port starting at {} on {}",
        config.port,
        config.host
    );
    None
}
