//! # Domain Invariants
//!
//! Rules that must hold after every applied mutation.

use super::entities::{AccountWhitelist, AdministratorSet, NodeWhitelist};
use std::collections::HashSet;
use std::hash::Hash;

/// Invariant: no entry appears twice.
pub fn invariant_no_duplicates<T: Eq + Hash>(items: &[T]) -> bool {
    let mut seen = HashSet::with_capacity(items.len());
    items.iter().all(|item| seen.insert(item))
}

/// Invariant: the admin set holds distinct members.
pub fn invariant_admins_distinct(admins: &AdministratorSet) -> bool {
    invariant_no_duplicates(admins.all())
}

/// Invariant: both whitelists hold distinct entries.
pub fn invariant_whitelists_distinct(nodes: &NodeWhitelist, accounts: &AccountWhitelist) -> bool {
    invariant_no_duplicates(nodes.all()) && invariant_no_duplicates(accounts.all())
}

/// Invariant: change sequence numbers strictly increase.
pub fn invariant_strictly_increasing(sequences: &[u64]) -> bool {
    sequences.windows(2).all(|pair| pair[0] < pair[1])
}
