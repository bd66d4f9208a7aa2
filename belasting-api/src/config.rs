use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use belasting_core::db::DbConfig;
use clap::Parser;
use serde::Deserialize;

/// Runtime settings for the API server.
///
/// Values come from an optional TOML file and are then overridden by any
/// command-line flag that was given.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub backend: String,
    pub database: String,
    pub log_level: String,
    pub log_file: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            backend: "sqlite".to_string(),
            database: "sqlite:belasting.db?mode=rwc".to_string(),
            log_level: "info".to_string(),
            log_file: None,
        }
    }
}

impl ServerConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("Failed to parse configuration")
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
        Self::from_toml_str(&contents)
            .with_context(|| format!("Invalid config file '{}'", path.display()))
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn db_config(&self) -> DbConfig {
        DbConfig {
            backend: self.backend.clone(),
            connection_string: self.database.clone(),
        }
    }
}

/// Dutch tax advice API for ZZP'ers and BV owners.
#[derive(Debug, Parser)]
#[command(name = "belasting-api")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Optional TOML configuration file.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Interface to bind to [default: 127.0.0.1]
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on [default: 8080]
    #[arg(long)]
    pub port: Option<u16>,

    /// Database backend to use [default: sqlite]
    #[arg(long)]
    pub backend: Option<String>,

    /// Database connection string [default: sqlite:belasting.db?mode=rwc]
    #[arg(long)]
    pub db: Option<String>,

    /// Log filter when RUST_LOG is unset, e.g. `debug` or `info,belasting_core=debug`
    #[arg(long)]
    pub log_level: Option<String>,

    /// Append log output to this file as well as stdout.
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Resolve the final configuration: file (if any), then flags.
    pub fn into_config(self) -> Result<ServerConfig> {
        let mut config = match &self.config {
            Some(path) => ServerConfig::from_file(path)?,
            None => ServerConfig::default(),
        };

        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(backend) = self.backend {
            config.backend = backend;
        }
        if let Some(db) = self.db {
            config.database = db;
        }
        if let Some(level) = self.log_level {
            config.log_level = level;
        }
        if self.log_file.is_some() {
            config.log_file = self.log_file;
        }

        Ok(config)
    }
}
