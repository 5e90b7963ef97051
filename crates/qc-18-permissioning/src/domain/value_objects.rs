//! # Domain Value Objects
//!
//! Immutable value types for Permissioning.

use super::errors::{PermissioningError, PermissioningResult};
use serde::{Deserialize, Serialize};

/// 20-byte account / administrator identifier.
pub type Address = primitive_types::H160;

/// One 256-bit half of a node's public key.
pub type KeyHalf = primitive_types::H256;

/// Address size in bytes.
pub const ADDRESS_BYTES: usize = 20;

/// Key half size in bytes.
pub const KEY_HALF_BYTES: usize = 32;

/// All-zero address, returned for names that were never registered.
pub const ZERO_ADDRESS: Address = primitive_types::H160([0u8; ADDRESS_BYTES]);

/// Result of a mutation that can legitimately do nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// State changed.
    Applied,
    /// Entry already present (add) or absent (remove); state untouched.
    NoOp,
}

impl Outcome {
    /// Boolean view of the outcome (`true` iff applied).
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

impl From<bool> for Outcome {
    fn from(applied: bool) -> Self {
        if applied {
            Self::Applied
        } else {
            Self::NoOp
        }
    }
}

/// Global gate consulted by whitelist mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Mode {
    /// Mutations allowed.
    #[default]
    Normal,
    /// Whitelist mutations rejected.
    ReadOnly,
}

impl Mode {
    /// Check if this mode blocks gated mutations.
    pub fn is_read_only(&self) -> bool {
        matches!(self, Self::ReadOnly)
    }

    /// Normal -> ReadOnly. Any other start state is rejected.
    pub fn enter_read_only(self) -> PermissioningResult<Mode> {
        match self {
            Self::Normal => Ok(Self::ReadOnly),
            Self::ReadOnly => Err(PermissioningError::AlreadyReadOnly),
        }
    }

    /// ReadOnly -> Normal. Any other start state is rejected.
    pub fn exit_read_only(self) -> PermissioningResult<Mode> {
        match self {
            Self::ReadOnly => Ok(Self::Normal),
            Self::Normal => Err(PermissioningError::NotReadOnly),
        }
    }
}

/// Name registry entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameRecord {
    /// Registered contract address.
    pub address: Address,
    /// Caller-supplied version.
    pub version: u64,
}

impl NameRecord {
    /// Sentinel for names that were never registered.
    pub const ABSENT: NameRecord = NameRecord {
        address: ZERO_ADDRESS,
        version: 0,
    };

    /// Create a new record.
    pub fn new(address: Address, version: u64) -> Self {
        Self { address, version }
    }

    /// Check if this is the absence sentinel.
    pub fn is_absent(&self) -> bool {
        *self == Self::ABSENT
    }
}

/// Which whitelist a persisted entry list belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WhitelistKind {
    /// Permitted peer nodes (enode URLs).
    Nodes,
    /// Permitted transaction senders.
    Accounts,
}

impl WhitelistKind {
    /// Key used for this list in the TOML configuration file.
    pub fn toml_key(&self) -> &'static str {
        match self {
            Self::Nodes => "nodes-whitelist",
            Self::Accounts => "accounts-whitelist",
        }
    }
}

/// Outcome of a batch whitelist edit.
///
/// Everything other than `Success` leaves the whitelist unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WhitelistResult {
    /// All entries applied and persisted.
    Success,
    /// Input list was empty.
    EmptyEntry,
    /// Input list contains the same entry twice.
    DuplicatedEntry,
    /// An entry to add is already whitelisted.
    ExistingEntry,
    /// An entry to remove is not whitelisted.
    AbsentEntry,
    /// An entry could not be parsed.
    InvalidEntry,
    /// The store rejected the update; in-memory change reverted.
    PersistFail,
}

impl WhitelistResult {
    /// Check if the edit was applied.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

/// Parse a 20-byte address from hex (optional `0x`, any case).
pub fn parse_address(input: &str) -> PermissioningResult<Address> {
    decode_fixed(input, ADDRESS_BYTES).map(|bytes| Address::from_slice(&bytes))
}

/// Parse a 256-bit key half from hex (optional `0x`, any case).
pub fn parse_key_half(input: &str) -> PermissioningResult<KeyHalf> {
    decode_fixed(input, KEY_HALF_BYTES).map(|bytes| KeyHalf::from_slice(&bytes))
}

/// Full `0x`-prefixed lowercase hex of an address.
pub fn address_to_hex(address: &Address) -> String {
    format!("0x{}", hex::encode(address.as_bytes()))
}

fn decode_fixed(input: &str, expected: usize) -> PermissioningResult<Vec<u8>> {
    let trimmed = input.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    let bytes = hex::decode(digits)
        .map_err(|e| PermissioningError::InvalidEntry(format!("{}: {}", input, e)))?;

    if bytes.len() != expected {
        return Err(PermissioningError::InvalidEntry(format!(
            "{}: expected {} bytes, got {}",
            input,
            expected,
            bytes.len()
        )));
    }
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_strict_cycle() {
        let mode = Mode::default();
        assert_eq!(mode, Mode::Normal);

        let mode = mode.enter_read_only().unwrap();
        assert!(mode.is_read_only());
        assert_eq!(
            mode.enter_read_only(),
            Err(PermissioningError::AlreadyReadOnly)
        );

        let mode = mode.exit_read_only().unwrap();
        assert_eq!(mode.exit_read_only(), Err(PermissioningError::NotReadOnly));
    }

    #[test]
    fn test_absent_record() {
        assert!(NameRecord::ABSENT.is_absent());
        assert_eq!(NameRecord::ABSENT.address, ZERO_ADDRESS);
        assert!(!NameRecord::new(Address::repeat_byte(1), 0).is_absent());
    }

    #[test]
    fn test_parse_address_accepts_mixed_case() {
        let addr = parse_address("f17f52151EbEF6C7334FAD080c5704D77216b732").unwrap();
        assert_eq!(
            address_to_hex(&addr),
            "0xf17f52151ebef6c7334fad080c5704d77216b732"
        );
        assert_eq!(
            parse_address("0xF17F52151EBEF6C7334FAD080C5704D77216B732").unwrap(),
            addr
        );
    }

    #[test]
    fn test_parse_address_rejects_wrong_length() {
        assert!(matches!(
            parse_address("0x1234"),
            Err(PermissioningError::InvalidEntry(_))
        ));
        assert!(parse_address("0xzz7f52151ebef6c7334fad080c5704d77216b732").is_err());
    }

    #[test]
    fn test_parse_key_half() {
        let key = parse_key_half(
            "0x9bd359fdc3a2ed5df436c3d8914b1532740128929892092b7fcb320c1b62f375",
        )
        .unwrap();
        assert_eq!(key.as_bytes()[0], 0x9b);
        assert_eq!(key.as_bytes()[31], 0x75);
    }

    #[test]
    fn test_outcome_bool_view() {
        assert!(Outcome::Applied.is_applied());
        assert!(!Outcome::NoOp.is_applied());
        assert_eq!(Outcome::from(true), Outcome::Applied);
    }

    #[test]
    fn test_whitelist_kind_keys() {
        assert_eq!(WhitelistKind::Nodes.toml_key(), "nodes-whitelist");
        assert_eq!(WhitelistKind::Accounts.toml_key(), "accounts-whitelist");
    }
}
