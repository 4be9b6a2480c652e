//! HTTP server core
//!
//! Binds the listener and runs the axum router until shutdown.

use std::sync::Arc;
use std::time::Duration;

use log::{error, info, warn};
use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::server::routes::{AppState, build_router};
use crate::storage::{DiskStore, FileStore};

/// How long in-flight requests get to finish after a shutdown signal.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

pub struct Server {
    listener: TcpListener,
    state: Arc<AppState>,
}

impl Server {
    /// Bind the configured address and assemble the shared state.
    pub async fn new(config: &ServerConfig) -> std::io::Result<Self> {
        let listener = TcpListener::bind(config.socket_addr()).await?;
        info!("Server bound to {}", config.socket_addr());

        let root = config.root_path();
        if let Err(e) = std::fs::create_dir_all(&root) {
            warn!("Failed to create storage root {}: {}", root.display(), e);
        } else {
            info!("Storage root: {}", root.display());
        }

        let store: Arc<dyn FileStore> = Arc::new(DiskStore::new(root.clone()));
        Ok(Self {
            listener,
            state: Arc::new(AppState { store, root }),
        })
    }

    /// Serve requests until SIGINT, then give in-flight requests a bounded
    /// grace period before exiting.
    pub async fn start(self) -> std::io::Result<()> {
        let app = build_router(self.state);

        let (drained_tx, drained_rx) = tokio::sync::oneshot::channel::<()>();
        let serve = axum::serve(self.listener, app).with_graceful_shutdown(async move {
            shutdown_signal().await;
            let _ = drained_tx.send(());
        });

        tokio::select! {
            result = serve => result,
            _ = grace_expired(drained_rx) => {
                error!("Grace period expired, abandoning remaining requests");
                Ok(())
            }
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    info!("Shutdown signal received, draining in-flight requests");
}

async fn grace_expired(drained_rx: tokio::sync::oneshot::Receiver<()>) {
    let _ = drained_rx.await;
    tokio::time::sleep(SHUTDOWN_GRACE).await;
}
