//! # Domain Errors
//!
//! Hard-failure types for the Permissioning subsystem.
//!
//! Value failures (duplicate add, remove of an absent entry, unknown name)
//! are never errors: they come back as [`Outcome::NoOp`](super::Outcome),
//! [`WhitelistResult`](super::WhitelistResult) or an absence sentinel.

use super::value_objects::Address;
use thiserror::Error;

/// Result alias for operations that can be rejected.
pub type PermissioningResult<T> = Result<T, PermissioningError>;

/// Policy violations. A call that returns one of these changed nothing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PermissioningError {
    /// Caller is not a member of the administrator set.
    #[error("Unauthorized caller: {caller:?} is not an administrator")]
    Unauthorized {
        /// The rejected caller
        caller: Address,
    },

    /// `enter_read_only` called while read-only mode is active.
    #[error("Read-only mode is already active")]
    AlreadyReadOnly,

    /// `exit_read_only` called while in normal mode.
    #[error("Read-only mode is not active")]
    NotReadOnly,

    /// Mutation attempted while read-only mode is active.
    #[error("{operation} rejected: read-only mode is active")]
    ReadOnly {
        /// Name of the rejected operation
        operation: &'static str,
    },

    /// Removing the only remaining administrator is disabled by policy.
    #[error("Cannot remove the last administrator")]
    LastAdmin,

    /// Malformed address, key or enode URL.
    #[error("Invalid entry: {0}")]
    InvalidEntry(String),

    /// The whitelist store rejected an update; the in-memory change was reverted.
    #[error("Whitelist persistence failed: {0}")]
    Persist(String),
}

/// Errors raised by a [`WhitelistStore`](crate::ports::WhitelistStore).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// File I/O error.
    #[error("Failed to update {path}: {error}")]
    Io {
        /// Target file
        path: String,
        /// Underlying error message
        error: String,
    },

    /// Existing file is not valid TOML.
    #[error("Malformed store file {path}: {error}")]
    Malformed {
        /// Target file
        path: String,
        /// Parser or serializer message
        error: String,
    },

    /// Store refused the update.
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl From<StoreError> for PermissioningError {
    fn from(err: StoreError) -> Self {
        Self::Persist(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_error_names_caller() {
        let err = PermissioningError::Unauthorized {
            caller: Address::repeat_byte(0xab),
        };
        assert!(err.to_string().contains("abab"));
    }

    #[test]
    fn test_read_only_error_names_operation() {
        let err = PermissioningError::ReadOnly {
            operation: "add_enode",
        };
        assert!(err.to_string().contains("add_enode"));
    }

    #[test]
    fn test_store_error_converts_to_persist() {
        let err: PermissioningError = StoreError::Unavailable("disk full".to_string()).into();
        assert!(matches!(err, PermissioningError::Persist(ref msg) if msg.contains("disk full")));
    }
}
