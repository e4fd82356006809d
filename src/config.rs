use std::path::PathBuf;

use clap::Parser;
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use serde::{Deserialize, Serialize};

/// Fallback signing secret for local development. Startup logs a warning
/// while this value is in use.
pub const DEV_JWT_SECRET: &str = "dev-secret-change-in-production";

#[derive(Debug, Parser)]
#[command(name = "barstock", about = "Bar inventory management service")]
pub struct Cli {
    /// Path to a YAML config file.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Overrides the configured listen port.
    #[arg(long)]
    pub port: Option<u16>,

    /// Prints the effective configuration and exits.
    #[arg(long)]
    pub print_config: bool,
}

/// Layered configuration: built-in defaults, then the optional YAML file,
/// then `BARSTOCK_`-prefixed environment variables, then CLI flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub seed_demo_data: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            auth: AuthConfig::default(),
            seed_demo_data: true,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: DEV_JWT_SECRET.to_string(),
            token_ttl_hours: 24,
        }
    }
}

impl AppConfig {
    pub fn load(cli: &Cli) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(AppConfig::default()));
        if let Some(path) = &cli.config {
            figment = figment.merge(Yaml::file(path));
        }
        let mut config: AppConfig = figment
            .merge(Env::prefixed("BARSTOCK_").split("__"))
            .extract()?;

        if let Some(port) = cli.port {
            config.server.port = port;
        }
        Ok(config)
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
