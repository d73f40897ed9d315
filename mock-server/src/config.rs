use anyhow::{Context, Result};
use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use mock_core::Variant;
use serde::{Deserialize, Serialize};
use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

/// Prefix for environment overrides, e.g. `NCD_MOCK_SERVER__PORT=7100`
pub const ENV_PREFIX: &str = "NCD_MOCK";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    /// Listen address for the mock server
    pub listen_addr: String,
    /// Port to listen on; the variant's default port when unset
    #[serde(default)]
    pub port: Option<u16>,
    /// Fixture set to serve
    pub variant: Variant,
    /// Directory served for non-API paths
    pub document_root: PathBuf,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Log format (pretty, json, compact)
    pub format: LogFormat,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
    Compact,
}

/// Command line values that win over every other source
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub port: Option<u16>,
    pub variant: Option<Variant>,
    pub listen_addr: Option<String>,
    pub document_root: Option<PathBuf>,
    pub log_level: Option<String>,
}

impl Config {
    /// Load configuration from the embedded defaults, `CONFIG_FILE` and the environment
    pub fn from_env() -> Result<Self> {
        let config_file = env::var("CONFIG_FILE").ok();
        Self::load(config_file.as_deref(), false)
    }

    /// Load configuration from a specific file path layered over the defaults
    pub fn from_file(path: &str) -> Result<Self> {
        Self::load(Some(path), true)
    }

    fn load(path: Option<&str>, required: bool) -> Result<Self> {
        let mut builder = ConfigBuilder::builder().add_source(File::from_str(
            include_str!("../config/default.toml"),
            FileFormat::Toml,
        ));

        if let Some(path) = path {
            builder = builder.add_source(
                File::with_name(path)
                    .required(required)
                    .format(FileFormat::Toml),
            );
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder
            .build()
            .context("Failed to build configuration")?;

        let mut result: Config = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        Self::apply_standard_env_vars(&mut result);

        Ok(result)
    }

    /// Apply standard environment variables (LISTEN_ADDR, LOG_LEVEL)
    fn apply_standard_env_vars(config: &mut Config) {
        if let Ok(listen_addr) = env::var("LISTEN_ADDR") {
            config.server.listen_addr = listen_addr;
        }

        if let Ok(log_level) = env::var("LOG_LEVEL") {
            config.logging.level = log_level;
        }
    }

    pub fn apply_overrides(&mut self, overrides: &Overrides) {
        if let Some(port) = overrides.port {
            self.server.port = Some(port);
        }
        if let Some(variant) = overrides.variant {
            self.server.variant = variant;
        }
        if let Some(ref listen_addr) = overrides.listen_addr {
            self.server.listen_addr = listen_addr.clone();
        }
        if let Some(ref document_root) = overrides.document_root {
            self.server.document_root = document_root.clone();
        }
        if let Some(ref log_level) = overrides.log_level {
            self.logging.level = log_level.clone();
        }
    }

    /// Configured port, or the variant's default
    pub fn port(&self) -> u16 {
        self.server
            .port
            .unwrap_or_else(|| self.server.variant.default_port())
    }

    /// `host:port` to bind, bracketing IPv6 hosts
    pub fn server_address(&self) -> String {
        match self.server.listen_addr.parse::<IpAddr>() {
            Ok(ip) => SocketAddr::new(ip, self.port()).to_string(),
            Err(_) => format!("{}:{}", self.server.listen_addr, self.port()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self.logging.level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(anyhow::anyhow!(
                    "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                    self.logging.level
                ));
            }
        }

        if self.server.port == Some(0) {
            return Err(anyhow::anyhow!("Server port cannot be 0"));
        }

        if self.server.listen_addr.parse::<IpAddr>().is_err() {
            return Err(anyhow::anyhow!(
                "Invalid listen address: {}. Must be an IPv4 or IPv6 address",
                self.server.listen_addr
            ));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                listen_addr: "0.0.0.0".to_string(),
                port: None,
                variant: Variant::Standard,
                document_root: PathBuf::from("web"),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: LogFormat::Pretty,
            },
        }
    }
}
