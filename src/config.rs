//! Application configuration
//!
//! Centralized configuration management with environment variable support
//! and sensible defaults.

use std::env;
use std::path::PathBuf;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,
    /// Storage configuration
    pub storage: StorageConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to bind the server to
    pub port: u16,
    /// Host address to bind to
    pub host: String,
}

/// Storage configuration
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Table the user records live in
    pub table: String,
    /// Snapshot file loaded at boot and written on shutdown
    pub snapshot_path: PathBuf,
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig {
                port: env::var("PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(8080),
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            },
            storage: StorageConfig {
                table: env::var("USERS_TABLE").unwrap_or_else(|_| "users".to_string()),
                snapshot_path: env::var("SNAPSHOT_PATH").map(PathBuf::from).unwrap_or_else(
                    |_| {
                        // Default to ~/.user-registry or current directory
                        if let Some(home) = env::var_os("HOME") {
                            let mut path = PathBuf::from(home);
                            path.push(".user-registry");
                            path.push("users.json");
                            path
                        } else {
                            PathBuf::from("users.json")
                        }
                    },
                ),
            },
        }
    }

    /// Get the server address as a string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
