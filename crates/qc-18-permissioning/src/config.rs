//! # Permissioning Configuration
//!
//! Loaded from the node's permissions TOML file. The same file is the
//! target of [`TomlWhitelistPersistor`](crate::adapters::TomlWhitelistPersistor),
//! so whitelist edits survive a restart.
//!
//! ```toml
//! bootstrap-admin = "0x627306090abab3a6e1400e9345bc60c78a8bef57"
//! nodes-whitelist = ["enode://<128 hex>@127.0.0.1:30303"]
//! accounts-whitelist = ["0xf17f52151ebef6c7334fad080c5704d77216b732"]
//!
//! [policy]
//! gate-admin-mutations = false
//! gate-name-registration = false
//! allow-last-admin-removal = true
//! name-registration-requires-admin = true
//! ```

use crate::adapters::TomlWhitelistPersistor;
use crate::domain::{parse_address, Address, Enode};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Which operations the read-only gate and the authority check cover
/// beyond the fixed core (whitelist mutations are always gated and
/// admin-only; mode transitions are always admin-only).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct GatePolicy {
    /// Reject `add_admin` / `remove_admin` while read-only.
    pub gate_admin_mutations: bool,
    /// Reject `register_name` while read-only.
    pub gate_name_registration: bool,
    /// Allow removing the only remaining admin.
    pub allow_last_admin_removal: bool,
    /// Only admins may call `register_name`.
    pub name_registration_requires_admin: bool,
}

impl Default for GatePolicy {
    fn default() -> Self {
        Self {
            gate_admin_mutations: false,
            gate_name_registration: false,
            allow_last_admin_removal: true,
            name_registration_requires_admin: true,
        }
    }
}

impl GatePolicy {
    /// Every mutation gated, no lockout possible.
    pub fn strict() -> Self {
        Self {
            gate_admin_mutations: true,
            gate_name_registration: true,
            allow_last_admin_removal: false,
            name_registration_requires_admin: true,
        }
    }
}

/// Raw file layout.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
struct ConfigFile {
    bootstrap_admin: Option<String>,
    nodes_whitelist: Option<Vec<String>>,
    accounts_whitelist: Option<Vec<String>>,
    #[serde(default)]
    policy: GatePolicy,
}

/// Validated permissioning configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PermissioningConfig {
    /// Initial sole administrator.
    pub bootstrap_admin: Address,
    /// Initial node whitelist. `None` leaves the whitelist unset.
    pub nodes_whitelist: Option<Vec<Enode>>,
    /// Initial account whitelist. `None` leaves the whitelist unset.
    pub accounts_whitelist: Option<Vec<Address>>,
    /// Gate and authority policy.
    pub policy: GatePolicy,
    /// File the configuration was loaded from. Whitelist edits are written
    /// back here by [`whitelist_persistor`](Self::whitelist_persistor).
    pub source_path: Option<PathBuf>,
}

impl PermissioningConfig {
    /// Minimal configuration: one admin, unset whitelists, default policy.
    pub fn new(bootstrap_admin: Address) -> Self {
        Self {
            bootstrap_admin,
            nodes_whitelist: None,
            accounts_whitelist: None,
            policy: GatePolicy::default(),
            source_path: None,
        }
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read, parsed or validated.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            error: e.to_string(),
        })?;

        let mut config = Self::parse(&content)?;
        config.source_path = Some(path.as_ref().to_path_buf());
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;

        let bootstrap_admin = file
            .bootstrap_admin
            .ok_or_else(|| ConfigError::Invalid("bootstrap-admin is required".to_string()))
            .and_then(|raw| parse_address(&raw).map_err(invalid))?;

        let nodes_whitelist = file
            .nodes_whitelist
            .map(|urls| {
                urls.iter()
                    .map(|url| Enode::parse(url).map_err(invalid))
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()?;

        let accounts_whitelist = file
            .accounts_whitelist
            .map(|accounts| {
                accounts
                    .iter()
                    .map(|account| parse_address(account).map_err(invalid))
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()?;

        Ok(Self {
            bootstrap_admin,
            nodes_whitelist,
            accounts_whitelist,
            policy: file.policy,
            source_path: None,
        })
    }

    /// Persistor writing whitelist edits back to the file this
    /// configuration was loaded from. `None` for in-memory configurations.
    pub fn whitelist_persistor(&self) -> Option<TomlWhitelistPersistor> {
        self.source_path.as_ref().map(TomlWhitelistPersistor::new)
    }

    /// Builder: override the policy.
    pub fn with_policy(mut self, policy: GatePolicy) -> Self {
        self.policy = policy;
        self
    }
}

fn invalid(err: impl std::fmt::Display) -> ConfigError {
    ConfigError::Invalid(err.to_string())
}

/// Errors that can occur during config loading.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// File I/O error.
    #[error("Failed to read {path}: {error}")]
    Io {
        /// File being read
        path: String,
        /// Underlying error message
        error: String,
    },

    /// TOML parsing error.
    #[error("Failed to parse config: {0}")]
    Parse(String),

    /// Well-formed TOML with invalid content.
    #[error("Invalid config: {0}")]
    Invalid(String),
}
