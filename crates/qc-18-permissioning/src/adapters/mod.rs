//! # Adapters Layer (Hexagonal Architecture)
//!
//! Implements the outbound port traits: change log sinks and whitelist
//! stores.

mod change_log;
mod whitelist_store;

pub use change_log::{InMemoryChangeLog, NoOpChangeSink};
pub use whitelist_store::{InMemoryWhitelistStore, NoOpWhitelistStore, TomlWhitelistPersistor};
