//! studyboard-web - Web dashboard and deployment shim for studyboard
//!
//! The dashboard is a server-rendered Axum application. The shim half of this
//! crate (`ServeConfig`, `bind`, `serve`) resolves host and port from the
//! environment and runs any router until the process is terminated.

pub mod config;
pub mod pages;
pub mod router;
pub mod session;

pub use config::{ServeConfig, ServeError, DEFAULT_PORT, PORT_ENV};
pub use router::{create_app, create_router, AppState};

use axum::Router;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::info;

/// Bind the listener described by `config`
pub async fn bind(config: &ServeConfig) -> Result<TcpListener, ServeError> {
    let addr = config.addr();
    TcpListener::bind(addr)
        .await
        .map_err(|source| ServeError::Bind { addr, source })
}

/// Serve `router` on an already bound listener until Ctrl+C
pub async fn serve_listener(listener: TcpListener, router: Router) -> Result<(), ServeError> {
    let addr: Option<SocketAddr> = listener.local_addr().ok();
    if let Some(addr) = addr {
        info!("Web server listening on http://{}", addr);
    }

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|source| ServeError::Serve { source })?;

    info!("Web server stopped");
    Ok(())
}

/// Bind and serve; any failure here is fatal for the process
pub async fn serve(router: Router, config: &ServeConfig) -> Result<(), ServeError> {
    let listener = bind(config).await?;
    serve_listener(listener, router).await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for Ctrl+C: {}", e);
        // Without a signal handler the server simply runs until killed
        std::future::pending::<()>().await;
    }
}
