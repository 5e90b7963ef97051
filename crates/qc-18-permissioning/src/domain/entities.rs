//! # Domain Entities
//!
//! The registries owned by the permissioning service. None of these types
//! know about authority or the read-only gate; the service checks both
//! before touching them.

use super::enode::Enode;
use super::value_objects::{Address, KeyHalf, NameRecord, Outcome};
use std::collections::HashMap;

/// Ordered set of administrator addresses, bootstrap admin first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdministratorSet {
    admins: Vec<Address>,
}

impl AdministratorSet {
    /// Create a set whose only member is the bootstrap admin.
    pub fn new(bootstrap: Address) -> Self {
        Self {
            admins: vec![bootstrap],
        }
    }

    /// Check membership.
    pub fn contains(&self, address: &Address) -> bool {
        self.admins.contains(address)
    }

    /// Append `address` unless already present.
    pub fn add(&mut self, address: Address) -> Outcome {
        if self.contains(&address) {
            return Outcome::NoOp;
        }
        self.admins.push(address);
        Outcome::Applied
    }

    /// Remove `address`; later members shift down.
    pub fn remove(&mut self, address: &Address) -> Outcome {
        match self.admins.iter().position(|a| a == address) {
            Some(index) => {
                self.admins.remove(index);
                Outcome::Applied
            }
            None => Outcome::NoOp,
        }
    }

    /// Members in insertion order.
    pub fn all(&self) -> &[Address] {
        &self.admins
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.admins.len()
    }

    /// Check if every admin has been removed.
    pub fn is_empty(&self) -> bool {
        self.admins.is_empty()
    }
}

/// Insertion-ordered, de-duplicated list of permitted nodes.
///
/// A whitelist that has never been set permits every node.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NodeWhitelist {
    nodes: Vec<Enode>,
    set: bool,
}

impl NodeWhitelist {
    /// Create an unset whitelist.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a whitelist seeded from configuration. Duplicates are dropped.
    pub fn seeded(nodes: impl IntoIterator<Item = Enode>) -> Self {
        let mut whitelist = Self {
            nodes: Vec::new(),
            set: true,
        };
        for node in nodes {
            whitelist.add(node);
        }
        whitelist
    }

    /// Check if `node` is listed.
    pub fn contains(&self, node: &Enode) -> bool {
        self.nodes.contains(node)
    }

    /// Append `node` unless an identical descriptor is present.
    pub fn add(&mut self, node: Enode) -> Outcome {
        if self.contains(&node) {
            return Outcome::NoOp;
        }
        self.nodes.push(node);
        self.set = true;
        Outcome::Applied
    }

    /// Remove `node` if listed.
    pub fn remove(&mut self, node: &Enode) -> Outcome {
        let before = self.nodes.len();
        self.nodes.retain(|n| n != node);
        Outcome::from(self.nodes.len() != before)
    }

    /// `key_high` of every listed node, in insertion order.
    pub fn key_highs(&self) -> Vec<KeyHalf> {
        self.nodes.iter().map(|n| n.key_high).collect()
    }

    /// Listed nodes in insertion order.
    pub fn all(&self) -> &[Enode] {
        &self.nodes
    }

    /// Canonical URLs of listed nodes, in insertion order.
    pub fn urls(&self) -> Vec<String> {
        self.nodes.iter().map(Enode::to_url).collect()
    }

    /// True if the whitelist is unset or lists `node`.
    pub fn is_permitted(&self, node: &Enode) -> bool {
        !self.set || self.contains(node)
    }

    /// Check if the whitelist has ever been set.
    pub fn is_set(&self) -> bool {
        self.set
    }

    /// Number of listed nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if no node is listed.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Insertion-ordered list of permitted transaction senders.
///
/// Same unset semantics as [`NodeWhitelist`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AccountWhitelist {
    accounts: Vec<Address>,
    set: bool,
}

impl AccountWhitelist {
    /// Create an unset whitelist.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a whitelist seeded from configuration. Duplicates are dropped.
    pub fn seeded(accounts: impl IntoIterator<Item = Address>) -> Self {
        let mut whitelist = Self {
            accounts: Vec::new(),
            set: true,
        };
        for account in accounts {
            whitelist.add(account);
        }
        whitelist
    }

    /// Check if `account` is listed.
    pub fn contains(&self, account: &Address) -> bool {
        self.accounts.contains(account)
    }

    /// Append `account` unless present.
    pub fn add(&mut self, account: Address) -> Outcome {
        if self.contains(&account) {
            return Outcome::NoOp;
        }
        self.accounts.push(account);
        self.set = true;
        Outcome::Applied
    }

    /// Remove `account` if listed.
    pub fn remove(&mut self, account: &Address) -> Outcome {
        let before = self.accounts.len();
        self.accounts.retain(|a| a != account);
        Outcome::from(self.accounts.len() != before)
    }

    /// True if the whitelist is unset or lists `account`.
    pub fn is_permitted(&self, account: &Address) -> bool {
        !self.set || self.contains(account)
    }

    /// Listed accounts in insertion order.
    pub fn all(&self) -> &[Address] {
        &self.accounts
    }

    /// Check if the whitelist has ever been set.
    pub fn is_set(&self) -> bool {
        self.set
    }

    /// Number of listed accounts.
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Check if no account is listed.
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

/// Name -> (address, version) table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NameRegistry {
    records: HashMap<String, NameRecord>,
}

impl NameRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set or overwrite the record for `name`. The version is trusted as given.
    pub fn register(&mut self, name: &str, address: Address, version: u64) -> Outcome {
        self.records
            .insert(name.to_string(), NameRecord::new(address, version));
        Outcome::Applied
    }

    /// Record for `name`, or [`NameRecord::ABSENT`].
    pub fn details(&self, name: &str) -> NameRecord {
        self.records.get(name).copied().unwrap_or(NameRecord::ABSENT)
    }

    /// Number of registered names.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    fn addr(byte: u8) -> Address {
        Address::repeat_byte(byte)
    }

    fn node(byte: u8, port: u16) -> Enode {
        Enode::new(
            KeyHalf::repeat_byte(byte),
            KeyHalf::repeat_byte(byte.wrapping_add(1)),
            Ipv4Addr::new(10, 0, 0, byte),
            port,
        )
    }

    #[test]
    fn test_admin_set_starts_with_bootstrap() {
        let set = AdministratorSet::new(addr(1));
        assert_eq!(set.all(), &[addr(1)]);
    }

    #[test]
    fn test_admin_add_is_idempotent() {
        let mut set = AdministratorSet::new(addr(1));
        assert_eq!(set.add(addr(2)), Outcome::Applied);
        assert_eq!(set.add(addr(2)), Outcome::NoOp);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_admin_remove_compacts_in_order() {
        let mut set = AdministratorSet::new(addr(1));
        set.add(addr(2));
        set.add(addr(3));
        set.add(addr(4));

        assert_eq!(set.remove(&addr(2)), Outcome::Applied);
        assert_eq!(set.all(), &[addr(1), addr(3), addr(4)]);
        assert_eq!(set.remove(&addr(2)), Outcome::NoOp);
    }

    #[test]
    fn test_node_whitelist_dedup_and_order() {
        let mut list = NodeWhitelist::new();
        assert!(!list.is_set());

        assert_eq!(list.add(node(1, 30303)), Outcome::Applied);
        assert_eq!(list.add(node(1, 30303)), Outcome::NoOp);
        assert_eq!(list.add(node(1, 30304)), Outcome::Applied);

        assert_eq!(list.len(), 2);
        assert_eq!(list.all()[1].port, 30304);
        assert_eq!(
            list.key_highs(),
            vec![KeyHalf::repeat_byte(1), KeyHalf::repeat_byte(1)]
        );
    }

    #[test]
    fn test_node_whitelist_remove() {
        let mut list = NodeWhitelist::seeded([node(1, 1), node(2, 2)]);
        assert_eq!(list.remove(&node(1, 1)), Outcome::Applied);
        assert_eq!(list.remove(&node(1, 1)), Outcome::NoOp);
        assert_eq!(list.all(), &[node(2, 2)]);
    }

    #[test]
    fn test_unset_node_whitelist_permits_all() {
        let list = NodeWhitelist::new();
        assert!(list.is_permitted(&node(9, 9)));

        let list = NodeWhitelist::seeded([node(1, 1)]);
        assert!(list.is_permitted(&node(1, 1)));
        assert!(!list.is_permitted(&node(9, 9)));
    }

    #[test]
    fn test_seeded_empty_whitelist_permits_nothing() {
        let list = NodeWhitelist::seeded(Vec::new());
        assert!(list.is_set());
        assert!(!list.is_permitted(&node(1, 1)));

        let accounts = AccountWhitelist::seeded(Vec::new());
        assert!(!accounts.is_permitted(&addr(1)));
    }

    #[test]
    fn test_account_whitelist() {
        let mut list = AccountWhitelist::new();
        assert!(list.is_permitted(&addr(7)));

        assert_eq!(list.add(addr(1)), Outcome::Applied);
        assert_eq!(list.add(addr(1)), Outcome::NoOp);
        assert!(list.is_permitted(&addr(1)));
        assert!(!list.is_permitted(&addr(7)));

        assert_eq!(list.remove(&addr(1)), Outcome::Applied);
        assert!(list.is_set());
        assert!(!list.is_permitted(&addr(1)));
    }

    #[test]
    fn test_name_registry_overwrites() {
        let mut names = NameRegistry::new();
        assert!(names.details("rules").is_absent());

        names.register("rules", addr(5), 1);
        assert_eq!(names.details("rules"), NameRecord::new(addr(5), 1));

        names.register("rules", addr(5), 2);
        assert_eq!(names.details("rules").version, 2);

        // Versions are trusted as given.
        names.register("rules", addr(6), 1);
        assert_eq!(names.details("rules"), NameRecord::new(addr(6), 1));
        assert_eq!(names.len(), 1);
    }
}
