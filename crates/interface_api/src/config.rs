//! API configuration

use std::fs;

use anyhow::Context;
use serde::Deserialize;
use tracing::info;

use core_kernel::Currency;
use domain_catalog::{standard_spec, Catalog};

/// API configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Log level, overridden by `RUST_LOG`
    pub log_level: String,
    /// Currency of the built-in catalog
    pub currency: Currency,
    /// Optional JSON catalog document replacing the built-in one
    pub catalog_path: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            log_level: "info".to_string(),
            currency: Currency::IDR,
            catalog_path: None,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from `CLINIC_*` environment variables
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("CLINIC").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Builds the catalog this server prices encounters with
    pub fn load_catalog(&self) -> anyhow::Result<Catalog> {
        match &self.catalog_path {
            Some(path) => {
                let document = fs::read_to_string(path)
                    .with_context(|| format!("reading catalog {}", path))?;
                let catalog = Catalog::from_json(&document)
                    .with_context(|| format!("parsing catalog {}", path))?;
                info!(path = %path, currency = %catalog.currency(), "Loaded catalog from file");
                Ok(catalog)
            }
            None => {
                let mut spec = standard_spec();
                spec.currency = self.currency;
                Ok(Catalog::from_spec(spec)?)
            }
        }
    }
}
