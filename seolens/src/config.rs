//! Runtime configuration assembled from command-line arguments.

use anyhow::{Context, Result};
use clap::ArgMatches;
use seolens_core::FetchConfig;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" => Some(LogFormat::Text),
            "json" => Some(LogFormat::Json),
            _ => None,
        }
    }
}

/// HTTP API server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Allow cross-origin requests from any origin
    pub cors_enabled: bool,
    /// Log output format
    pub log_format: LogFormat,
    /// Outbound request settings for audits
    pub fetch: FetchConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            cors_enabled: true,
            log_format: LogFormat::Text,
            fetch: FetchConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Build from the `serve` subcommand's matches.
    pub fn from_matches(args: &ArgMatches) -> Result<Self> {
        let defaults = Self::default();

        let host = args
            .get_one::<String>("host")
            .cloned()
            .unwrap_or(defaults.host);
        let port = args.get_one::<u16>("port").copied().unwrap_or(defaults.port);
        let log_format = args
            .get_one::<String>("log-format")
            .map(|s| LogFormat::from_str(s).with_context(|| format!("Unknown log format: {}", s)))
            .transpose()?
            .unwrap_or(defaults.log_format);

        Ok(Self {
            host,
            port,
            cors_enabled: !args.get_flag("no-cors"),
            log_format,
            fetch: fetch_config_from_matches(args),
        })
    }

    /// `host:port` as given; the host may be a name or an IP literal.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Outbound request settings shared by `serve` and `audit`.
pub fn fetch_config_from_matches(args: &ArgMatches) -> FetchConfig {
    let timeout_secs = args
        .get_one::<u64>("timeout")
        .copied()
        .unwrap_or(DEFAULT_TIMEOUT_SECS);
    FetchConfig::default().with_timeout(Duration::from_secs(timeout_secs))
}
