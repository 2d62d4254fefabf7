/// Service configuration loader - parses hydromet.toml
///
/// Separates the API base URL and HTTP timeout from code so a deployment
/// can point at a mirror or a mock server without recompiling. The file is
/// optional: a missing hydromet.toml falls back to compiled defaults, a
/// malformed one is a startup error.
///
/// Environment:
///   HYDROMET_BASE_URL - overrides the base URL from file or defaults
///                       (loaded via dotenv, so a .env file works too)

use serde::Deserialize;
use std::fs;

use crate::model::HydrometError;

pub const DEFAULT_BASE_URL: &str = "https://hydromet.lcra.org";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Runtime configuration for the Hydromet API client.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Base URL of the Hydromet API, without a trailing slash.
    pub base_url: String,
    /// Per-request HTTP timeout.
    pub timeout_seconds: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

/// Loads configuration from `hydromet.toml` in the working directory,
/// then applies environment overrides.
pub fn load_config() -> Result<ServiceConfig, HydrometError> {
    dotenv::dotenv().ok();

    let mut config = load_config_from("hydromet.toml")?;

    if let Ok(base_url) = std::env::var("HYDROMET_BASE_URL") {
        if !base_url.is_empty() {
            config.base_url = base_url;
        }
    }

    Ok(config)
}

/// Loads configuration from the given path, falling back to defaults when
/// the file does not exist.
pub fn load_config_from(path: &str) -> Result<ServiceConfig, HydrometError> {
    match fs::read_to_string(path) {
        Ok(contents) => parse_config(&contents, path),
        Err(_) => Ok(ServiceConfig::default()),
    }
}

fn parse_config(contents: &str, path: &str) -> Result<ServiceConfig, HydrometError> {
    toml::from_str(contents)
        .map_err(|e| HydrometError::ParseError(format!("Failed to parse {}: {}", path, e)))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
