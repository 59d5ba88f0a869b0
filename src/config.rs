//! Service configuration from environment variables
//!
//! | Variable | Default |
//! |----------|---------|
//! | `HCP_PORT` | `8080` |
//! | `HCP_BACKEND_URL` | `http://localhost:8000` |
//! | `HCP_BACKEND_TOKEN` | unset |
//! | `HCP_PROVISION_SHARD_ID` | unset |
//! | `HCP_PROVISIONER_NOOP_PROVISION` | `false` |
//! | `HCP_PROVISIONER_NOOP_DEPROVISION` | `false` |

use std::collections::BTreeMap;

use thiserror::Error;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

/// Backend cluster property selecting the provision shard
pub const PROPERTY_PROVISION_SHARD_ID: &str = "provision_shard_id";
/// Backend cluster property skipping the provision step
pub const PROPERTY_NOOP_PROVISION: &str = "provisioner_noop_provision";
/// Backend cluster property skipping the deprovision step
pub const PROPERTY_NOOP_DEPROVISION: &str = "provisioner_noop_deprovision";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub backend_url: String,
    pub backend_token: Option<String>,
    pub provision_shard_id: Option<String>,
    pub noop_provision: bool,
    pub noop_deprovision: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            backend_token: None,
            provision_shard_id: None,
            noop_provision: false,
            noop_deprovision: false,
        }
    }
}

fn is_enabled(value: Option<String>) -> bool {
    value.map(|v| v == "true" || v == "1").unwrap_or(false)
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from any variable source; empty values
    /// count as unset
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.is_empty());

        let port = match get("HCP_PORT") {
            Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
                name: "HCP_PORT",
                value,
            })?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            port,
            backend_url: get("HCP_BACKEND_URL").unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string()),
            backend_token: get("HCP_BACKEND_TOKEN"),
            provision_shard_id: get("HCP_PROVISION_SHARD_ID"),
            noop_provision: is_enabled(get("HCP_PROVISIONER_NOOP_PROVISION")),
            noop_deprovision: is_enabled(get("HCP_PROVISIONER_NOOP_DEPROVISION")),
        })
    }

    /// Properties every cluster sent to the backend must carry
    pub fn required_properties(&self) -> BTreeMap<String, String> {
        let mut properties = BTreeMap::new();
        if let Some(shard) = &self.provision_shard_id {
            properties.insert(PROPERTY_PROVISION_SHARD_ID.to_string(), shard.clone());
        }
        if self.noop_provision {
            properties.insert(PROPERTY_NOOP_PROVISION.to_string(), "true".to_string());
        }
        if self.noop_deprovision {
            properties.insert(PROPERTY_NOOP_DEPROVISION.to_string(), "true".to_string());
        }
        properties
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
