//! Filevault - Entry Point
//!
//! A minimal HTTP file storage service rooted at a single directory.

use log::{error, info};

use filevault::Server;
use filevault::config::ServerConfig;

#[tokio::main]
async fn main() {
    // Initialize the logger (env_logger picks up RUST_LOG environment variable)
    env_logger::init();

    let config = match ServerConfig::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Configuration is not valid: {}", e);
            std::process::exit(1);
        }
    };

    info!(
        "Launching filevault on {} (root: {})",
        config.socket_addr(),
        config.dir
    );

    let server = match Server::new(&config).await {
        Ok(server) => server,
        Err(e) => {
            error!("Failed to start server: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = server.start().await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }
}
