use dotenvy::dotenv;
use serde::Deserialize;

use crate::error::{ApiError, Result};

/// Prefix that selects the in-process store instead of PostgreSQL.
pub const MEMORY_URL_SCHEME: &str = "memory://";

/// Runtime mode of the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppEnv {
    Development,
    #[default]
    Production,
}

/// Configuration for the application
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Port the HTTP endpoint binds to; the `--port` flag can supply it instead
    pub port: Option<u16>,
    /// Database connection URL
    pub database_url: String,
    /// Runtime mode, read from `APP_ENV`
    #[serde(default)]
    pub app_env: AppEnv,
    /// Upper bound on pooled database connections
    #[serde(default = "default_max_connections")]
    pub database_max_connections: u32,
}

fn default_max_connections() -> u32 {
    5
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Variables from a `.env` file are applied first when one exists.
    pub fn load() -> Result<Self> {
        dotenv().ok();

        Self::from_vars(std::env::vars())
    }

    /// Parse configuration from an explicit set of variables
    pub fn from_vars<I>(vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter::<_, Config>(vars).map_err(|e| ApiError::Config(e.to_string()))
    }

    /// Replace the environment's port with one given on the command line
    pub fn with_port_override(mut self, port: Option<u16>) -> Self {
        if port.is_some() {
            self.port = port;
        }
        self
    }

    /// Port to bind, required from either `PORT` or the command line
    pub fn port(&self) -> Result<u16> {
        self.port
            .ok_or_else(|| ApiError::Config("PORT is not set and no --port was given".into()))
    }

    /// Get a direct reference to the database URL
    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    /// Whether the database URL points at the in-process store
    pub fn uses_memory_store(&self) -> bool {
        self.database_url.starts_with(MEMORY_URL_SCHEME)
    }

    /// Schema exploration is only served outside production
    pub fn graphiql_enabled(&self) -> bool {
        self.app_env == AppEnv::Development
    }
}
