//! Layered configuration: defaults, then `genius.ron`, then environment, then flags.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use genius_engine::{EndpointSettings, DEFAULT_ENDPOINT, DEFAULT_MESSAGE};
use genius_logging::genius_info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "genius.ron";
pub const TOKEN_ENV_VAR: &str = "CODEBASE_GENIUS_TOKEN";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub endpoint: String,
    pub message: String,
    pub token: Option<String>,
    pub output_dir: PathBuf,
    pub request_timeout_secs: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            message: DEFAULT_MESSAGE.to_string(),
            token: None,
            output_dir: PathBuf::from("."),
            request_timeout_secs: None,
        }
    }
}

/// Values given on the command line; `None` leaves the config untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub endpoint: Option<String>,
    pub output_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Loads `path`. A missing file yields defaults unless it was asked for explicitly.
    pub fn load(path: &Path, explicit: bool) -> Result<Self, ConfigError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound && !explicit => {
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let config = Self::from_ron(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        genius_info!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn from_ron(text: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(text)
    }

    /// Applies environment overrides through `lookup`, so tests need not touch the process env.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(token) = lookup(TOKEN_ENV_VAR) {
            let token = token.trim().to_string();
            self.token = if token.is_empty() { None } else { Some(token) };
        }
    }

    pub fn apply_overrides(&mut self, overrides: &Overrides) {
        if let Some(endpoint) = &overrides.endpoint {
            self.endpoint = endpoint.clone();
        }
        if let Some(dir) = &overrides.output_dir {
            self.output_dir = dir.clone();
        }
    }

    pub fn endpoint_settings(&self) -> EndpointSettings {
        EndpointSettings {
            endpoint: self.endpoint.clone(),
            message: self.message.clone(),
            token: self.token.clone(),
            connect_timeout: None,
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
        }
    }
}
