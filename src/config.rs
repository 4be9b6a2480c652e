//! Configuration management for the filevault server
//!
//! Startup configuration is loaded once in `main` and handed to the
//! components that need it; storage code never reads configuration
//! ambiently.

use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Server configuration, fixed for the process lifetime
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Host address the HTTP server binds to
    pub host: String,

    /// Port the HTTP server listens on
    pub port: u16,

    /// Root directory all stored files live under
    pub dir: String,
}

impl ServerConfig {
    /// Load configuration: defaults, then an optional `config.toml`, then
    /// `FILEVAULT_*` environment overrides (FILEVAULT_DIR, FILEVAULT_HOST,
    /// FILEVAULT_PORT).
    pub fn load() -> Result<Self, config::ConfigError> {
        let settings = Config::builder()
            .set_default("host", "localhost")?
            .set_default("port", 8080)?
            .set_default("dir", "/mnt/filevault")?
            .add_source(File::with_name("config").required(false))
            .add_source(Environment::with_prefix("FILEVAULT").try_parsing(true))
            .build()?;

        let config: ServerConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validation for all configuration values
    fn validate(&self) -> Result<(), config::ConfigError> {
        if self.host.trim().is_empty() {
            return Err(config::ConfigError::Message("host cannot be empty".into()));
        }

        if self.port == 0 {
            return Err(config::ConfigError::Message("port cannot be 0".into()));
        }

        if self.dir.trim().is_empty() {
            return Err(config::ConfigError::Message("dir cannot be empty".into()));
        }

        if !Path::new(&self.dir).is_absolute() {
            return Err(config::ConfigError::Message(
                "dir must be an absolute path".into(),
            ));
        }

        Ok(())
    }

    /// Bind address for the HTTP listener
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Storage root as a PathBuf
    pub fn root_path(&self) -> PathBuf {
        PathBuf::from(&self.dir)
    }
}
