//! # Enode Descriptors
//!
//! A whitelisted peer: both halves of its 512-bit public key plus an IPv4
//! endpoint. Canonical text form:
//!
//! ```text
//! enode://<128 hex chars: key_high || key_low>@<a.b.c.d>:<port>
//! ```

use super::errors::{PermissioningError, PermissioningResult};
use super::value_objects::{parse_key_half, KeyHalf, KEY_HALF_BYTES};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

/// URL scheme of the canonical form.
pub const ENODE_SCHEME: &str = "enode://";

/// Node descriptor. Equality (and whitelist identity) is the full 4-tuple.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Enode {
    /// High half of the node public key.
    pub key_high: KeyHalf,
    /// Low half of the node public key.
    pub key_low: KeyHalf,
    /// IPv4 host.
    pub host: Ipv4Addr,
    /// TCP listening port.
    pub port: u16,
}

impl Enode {
    /// Create a new descriptor.
    pub fn new(key_high: KeyHalf, key_low: KeyHalf, host: Ipv4Addr, port: u16) -> Self {
        Self {
            key_high,
            key_low,
            host,
            port,
        }
    }

    /// Create a descriptor from a packed big-endian IPv4 host.
    pub fn from_packed(key_high: KeyHalf, key_low: KeyHalf, host: u32, port: u16) -> Self {
        Self::new(key_high, key_low, Ipv4Addr::from(host), port)
    }

    /// Host as a packed big-endian `u32`.
    pub fn packed_host(&self) -> u32 {
        u32::from(self.host)
    }

    /// Hex node id (`key_high || key_low`), 128 lowercase chars.
    pub fn node_id_hex(&self) -> String {
        let mut id = hex::encode(self.key_high.as_bytes());
        id.push_str(&hex::encode(self.key_low.as_bytes()));
        id
    }

    /// Canonical `enode://` URL.
    pub fn to_url(&self) -> String {
        format!(
            "{}{}@{}:{}",
            ENODE_SCHEME,
            self.node_id_hex(),
            self.host,
            self.port
        )
    }

    /// Parse a canonical `enode://` URL. A trailing `?query` is ignored.
    pub fn parse(input: &str) -> PermissioningResult<Self> {
        let invalid = |reason: &str| PermissioningError::InvalidEntry(format!("{}: {}", input, reason));

        let rest = input
            .trim()
            .strip_prefix(ENODE_SCHEME)
            .ok_or_else(|| invalid("missing enode:// scheme"))?;
        let rest = rest.split('?').next().unwrap_or(rest);

        let (node_id, endpoint) = rest
            .split_once('@')
            .ok_or_else(|| invalid("missing '@' separator"))?;
        if node_id.len() != KEY_HALF_BYTES * 4 || !node_id.is_ascii() {
            return Err(invalid("node id must be 128 hex characters"));
        }
        let (high, low) = node_id.split_at(KEY_HALF_BYTES * 2);

        let (host, port) = endpoint
            .rsplit_once(':')
            .ok_or_else(|| invalid("missing port"))?;
        let host = Ipv4Addr::from_str(host).map_err(|_| invalid("host is not an IPv4 address"))?;
        let port = port.parse::<u16>().map_err(|_| invalid("invalid port"))?;

        Ok(Self::new(
            parse_key_half(high)?,
            parse_key_half(low)?,
            host,
            port,
        ))
    }
}

impl fmt::Display for Enode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_url())
    }
}

impl FromStr for Enode {
    type Err = PermissioningError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Canonical serialized form of a descriptor that need not be whitelisted.
pub fn enode_bytes(key_high: KeyHalf, key_low: KeyHalf, host: u32, port: u16) -> String {
    Enode::from_packed(key_high, key_low, host, port).to_url()
}

#[cfg(test)]
mod tests {
    use super::*;

    const HIGH: &str = "0x9bd359fdc3a2ed5df436c3d8914b1532740128929892092b7fcb320c1b62f375";
    const LOW: &str = "0x892092b7fcb320c1b62f3759bd359fdc3a2ed5df436c3d8914b1532740128929";

    fn sample() -> Enode {
        Enode::from_packed(
            parse_key_half(HIGH).unwrap(),
            parse_key_half(LOW).unwrap(),
            0x9bd3_59fd,
            30303,
        )
    }

    #[test]
    fn test_packed_host_unpacks_big_endian() {
        let enode = sample();
        assert_eq!(enode.host, Ipv4Addr::new(155, 211, 89, 253));
        assert_eq!(enode.packed_host(), 0x9bd3_59fd);
    }

    #[test]
    fn test_enode_bytes_format() {
        let url = enode_bytes(
            parse_key_half(HIGH).unwrap(),
            parse_key_half(LOW).unwrap(),
            0x9bd3_59fd,
            30303,
        );
        let expected = format!(
            "enode://{}{}@155.211.89.253:30303",
            &HIGH[2..],
            &LOW[2..]
        );
        assert_eq!(url, expected);
    }

    #[test]
    fn test_parse_inverts_to_url() {
        let enode = sample();
        assert_eq!(Enode::parse(&enode.to_url()).unwrap(), enode);
        assert_eq!(enode.to_string().parse::<Enode>().unwrap(), enode);
    }

    #[test]
    fn test_parse_ignores_query() {
        let enode = sample();
        let url = format!("{}?discport=30301", enode.to_url());
        assert_eq!(Enode::parse(&url).unwrap(), enode);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        let id = sample().node_id_hex();
        for bad in [
            "http://abc@1.2.3.4:1".to_string(),
            format!("enode://{}", id),
            format!("enode://{}@1.2.3.4", id),
            format!("enode://{}@localhost:30303", id),
            format!("enode://{}@1.2.3.4:70000", id),
            format!("enode://{}@1.2.3.4:30303", &id[2..]),
        ] {
            assert!(
                matches!(Enode::parse(&bad), Err(PermissioningError::InvalidEntry(_))),
                "accepted {}",
                bad
            );
        }
    }

    #[test]
    fn test_equality_is_full_tuple() {
        let a = sample();
        let mut b = a;
        b.port = 30304;
        assert_ne!(a, b);
    }
}
