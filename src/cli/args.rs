//! CLI argument definitions using clap
//!
//! Every option can also be set from the environment, which is how the
//! server is normally configured.

use clap::Parser;

use crate::http_server::HttpServerConfig;
use crate::observability::LogFormat;
use crate::storage::{StoreConfig, StoreResult};

/// Exercise tracker HTTP API
#[derive(Parser, Debug, Clone)]
#[command(name = "exercise-tracker")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Address to bind to
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Store connection string: `memory://` or `file://<dir>`
    #[arg(long, env = "DATABASE_URL", default_value = "memory://")]
    pub database_url: String,

    /// Allowed CORS origins, comma-separated; empty allows any origin
    #[arg(long, env = "CORS_ORIGINS", value_delimiter = ',')]
    pub cors_origins: Vec<String>,

    /// Log line format
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

impl Cli {
    /// Parse command line arguments and environment
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    pub fn http_config(&self) -> HttpServerConfig {
        HttpServerConfig {
            host: self.host.clone(),
            port: self.port,
            cors_origins: self
                .cors_origins
                .iter()
                .map(|origin| origin.trim().to_string())
                .filter(|origin| !origin.is_empty())
                .collect(),
        }
    }

    pub fn store_config(&self) -> StoreResult<StoreConfig> {
        StoreConfig::from_url(&self.database_url)
    }
}
