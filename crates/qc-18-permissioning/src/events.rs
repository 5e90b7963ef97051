//! # Change Events
//!
//! Every applied mutation produces exactly one [`ChangeRecord`], handed to
//! the [`ChangeSink`](crate::ports::ChangeSink) while the service still holds
//! its write lock. Sequence numbers start at 1 and follow program order.
//! No-ops and rejected calls produce nothing.

use crate::domain::{Address, Enode};
use serde::{Deserialize, Serialize};

/// A single applied change.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PermissioningEvent {
    /// Administrator added.
    AdminAdded {
        /// Calling administrator.
        caller: Address,
        /// New member.
        admin: Address,
    },
    /// Administrator removed.
    AdminRemoved {
        /// Calling administrator.
        caller: Address,
        /// Removed member.
        admin: Address,
    },
    /// Node whitelisted.
    EnodeAdded {
        /// Calling administrator.
        caller: Address,
        /// Added node.
        enode: Enode,
    },
    /// Node removed from the whitelist.
    EnodeRemoved {
        /// Calling administrator.
        caller: Address,
        /// Removed node.
        enode: Enode,
    },
    /// Account whitelisted.
    AccountAdded {
        /// Calling administrator.
        caller: Address,
        /// Added account.
        account: Address,
    },
    /// Account removed from the whitelist.
    AccountRemoved {
        /// Calling administrator.
        caller: Address,
        /// Removed account.
        account: Address,
    },
    /// Name registered or re-registered.
    NameRegistered {
        /// Caller.
        caller: Address,
        /// Registered name.
        name: String,
        /// Contract address.
        address: Address,
        /// Caller-supplied version.
        version: u64,
    },
    /// Normal -> ReadOnly.
    ReadOnlyEntered {
        /// Calling administrator.
        caller: Address,
    },
    /// ReadOnly -> Normal.
    ReadOnlyExited {
        /// Calling administrator.
        caller: Address,
    },
}

impl PermissioningEvent {
    /// Address that issued the change.
    pub fn caller(&self) -> &Address {
        match self {
            Self::AdminAdded { caller, .. }
            | Self::AdminRemoved { caller, .. }
            | Self::EnodeAdded { caller, .. }
            | Self::EnodeRemoved { caller, .. }
            | Self::AccountAdded { caller, .. }
            | Self::AccountRemoved { caller, .. }
            | Self::NameRegistered { caller, .. }
            | Self::ReadOnlyEntered { caller }
            | Self::ReadOnlyExited { caller } => caller,
        }
    }
}

/// Sequenced change log entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeRecord {
    /// Position in the change log, starting at 1.
    pub sequence: u64,
    /// The change.
    pub event: PermissioningEvent,
}
