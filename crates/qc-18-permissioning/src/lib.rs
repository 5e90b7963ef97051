//! # QC-18 Permissioning
//!
//! On-chain style access control for a permissioned network.
//!
//! **Subsystem ID:** 18
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//! **Status:** Production-Ready
//!
//! ## Purpose
//!
//! Decide who may join and who may transact:
//! - Administrator set: the only principals allowed to change state
//! - Node whitelist: enode descriptors allowed to peer with this node
//! - Account whitelist: addresses allowed to submit transactions
//! - Name registry: logical names resolved to `(address, version)`
//! - Read-only mode: an administrator-controlled freeze of whitelist edits
//!
//! ## Failure Model
//!
//! | Kind | Example | Surface |
//! |------|---------|---------|
//! | Value failure | duplicate add, absent remove | `Ok(Outcome::NoOp)` / `WhitelistResult` |
//! | Hard failure | non-admin caller, read-only, bad mode transition | `Err(PermissioningError)` |
//!
//! Hard failures leave no side effects. Every applied change is handed to
//! a [`ChangeSink`] with a strictly increasing sequence number.
//!
//! ## Module Structure
//!
//! ```text
//! qc-18-permissioning/
//! ├── domain/          # Core types: AdministratorSet, NodeWhitelist, Enode, Mode
//! ├── events.rs        # Change log payloads
//! ├── config.rs        # TOML configuration and gate policy
//! ├── ports/           # API traits + dependency traits
//! ├── adapters/        # Change logs, whitelist persistence
//! └── service/         # PermissioningService wiring it together
//! ```
//!
//! ## Example
//!
//! ```
//! use qc_18_permissioning::{
//!     Address, GatePolicy, InMemoryChangeLog, NoOpWhitelistStore, Outcome, PermissioningApi,
//!     PermissioningService,
//! };
//! use std::sync::Arc;
//!
//! let deployer = Address::repeat_byte(0xd1);
//! let service = PermissioningService::new(
//!     deployer,
//!     GatePolicy::default(),
//!     Arc::new(InMemoryChangeLog::new()),
//!     Arc::new(NoOpWhitelistStore),
//! );
//!
//! let operator = Address::repeat_byte(0x42);
//! assert_eq!(service.add_admin(&deployer, operator).unwrap(), Outcome::Applied);
//! assert!(service.is_authorized(&operator));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod config;
pub mod domain;
pub mod events;
pub mod ports;
pub mod service;

// Re-exports
pub use adapters::{
    InMemoryChangeLog, InMemoryWhitelistStore, NoOpChangeSink, NoOpWhitelistStore,
    TomlWhitelistPersistor,
};
pub use config::{ConfigError, GatePolicy, PermissioningConfig};
pub use domain::{
    address_to_hex, enode_bytes, invariant_admins_distinct, invariant_no_duplicates,
    invariant_strictly_increasing, invariant_whitelists_distinct, parse_address, parse_key_half,
    AccountWhitelist, Address, AdministratorSet, Enode, KeyHalf, Mode, NameRecord, NameRegistry,
    NodeWhitelist, Outcome, PermissioningError, PermissioningResult, StoreError, WhitelistKind,
    WhitelistResult, ZERO_ADDRESS,
};
pub use events::{ChangeRecord, PermissioningEvent};
pub use ports::{ChangeSink, PermissioningApi, WhitelistManagementApi, WhitelistStore};
pub use service::{PermissioningService, PermissioningStats};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    #[test]
    fn test_version() {
        assert!(!super::VERSION.is_empty());
    }
}
