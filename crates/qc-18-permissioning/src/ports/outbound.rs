//! # Driven Ports (Outbound SPI)
//!
//! Dependencies the permissioning service requires from adapters.

use crate::domain::{StoreError, WhitelistKind};
use crate::events::ChangeRecord;

/// Receiver of the ordered change log.
///
/// Called with the service write lock held, so implementations must not
/// call back into the service.
pub trait ChangeSink: Send + Sync {
    /// Record one applied change.
    fn record(&self, record: ChangeRecord);
}

/// Durable copy of the node and account whitelists.
pub trait WhitelistStore: Send + Sync {
    /// Replace the persisted list for `kind` with `entries`.
    ///
    /// On error the service reverts the in-memory change.
    fn update(&self, kind: WhitelistKind, entries: &[String]) -> Result<(), StoreError>;
}
