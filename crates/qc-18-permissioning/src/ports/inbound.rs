//! # Driving Ports (Inbound API)
//!
//! Every mutating call takes the caller's address explicitly; there is no
//! ambient sender. Mutations return `Ok(Outcome::NoOp)` (or a non-success
//! [`WhitelistResult`]) for value failures and `Err(PermissioningError)`
//! for policy violations.

use crate::domain::{
    Address, Enode, KeyHalf, NameRecord, Outcome, PermissioningResult, WhitelistResult,
};

/// Primary API: authority registry, node whitelist, name registry and the
/// read-only gate.
///
/// # Example
///
/// ```rust,ignore
/// use qc_18_permissioning::ports::PermissioningApi;
///
/// fn admit<T: PermissioningApi>(api: &T, admin: &Address, enode: Enode) {
///     match api.add_enode(admin, enode) {
///         Ok(outcome) => println!("whitelist: {:?}", outcome),
///         Err(e) => println!("rejected: {}", e),
///     }
/// }
/// ```
pub trait PermissioningApi: Send + Sync {
    /// Add `admin` to the administrator set.
    ///
    /// # Returns
    ///
    /// - `Ok(Applied)` if added
    /// - `Ok(NoOp)` if already a member
    /// - `Err(Unauthorized)` if `caller` is not an admin
    fn add_admin(&self, caller: &Address, admin: Address) -> PermissioningResult<Outcome>;

    /// Remove `admin` from the administrator set.
    ///
    /// # Returns
    ///
    /// - `Ok(Applied)` if removed
    /// - `Ok(NoOp)` if not a member
    /// - `Err(Unauthorized)` if `caller` is not an admin
    /// - `Err(LastAdmin)` if the policy forbids emptying the set
    fn remove_admin(&self, caller: &Address, admin: Address) -> PermissioningResult<Outcome>;

    /// Check if `address` is currently an admin.
    fn is_authorized(&self, address: &Address) -> bool;

    /// Admins in insertion order, bootstrap admin first.
    fn get_all_admins(&self) -> Vec<Address>;

    /// Whitelist a node.
    ///
    /// # Returns
    ///
    /// - `Ok(Applied)` if added
    /// - `Ok(NoOp)` if an identical descriptor is already listed
    /// - `Err(ReadOnly)` while read-only mode is active
    /// - `Err(Unauthorized)` if `caller` is not an admin
    fn add_enode(&self, caller: &Address, enode: Enode) -> PermissioningResult<Outcome>;

    /// Remove a node from the whitelist. Same failure classes as `add_enode`.
    fn remove_enode(&self, caller: &Address, enode: &Enode) -> PermissioningResult<Outcome>;

    /// `key_high` of every whitelisted node, in insertion order.
    fn get_all_enode_highs(&self) -> Vec<KeyHalf>;

    /// Canonical `enode://` form of a descriptor. Pure; touches no state.
    fn enode_bytes(&self, key_high: KeyHalf, key_low: KeyHalf, host: u32, port: u16) -> String;

    /// Set or overwrite the record for `name`.
    fn register_name(
        &self,
        caller: &Address,
        name: &str,
        address: Address,
        version: u64,
    ) -> PermissioningResult<Outcome>;

    /// `(address, version)` for `name`, or the zero sentinel if unknown.
    fn get_contract_details(&self, name: &str) -> NameRecord;

    /// Normal -> ReadOnly. Fails with `AlreadyReadOnly` from ReadOnly.
    fn enter_read_only(&self, caller: &Address) -> PermissioningResult<()>;

    /// ReadOnly -> Normal. Fails with `NotReadOnly` from Normal.
    fn exit_read_only(&self, caller: &Address) -> PermissioningResult<()>;

    /// Check if read-only mode is active.
    fn is_read_only(&self) -> bool;
}

/// Batch whitelist management and admission queries.
///
/// Batch edits are all-or-nothing: checks run in the order empty ->
/// invalid -> duplicated -> existing/absent, then the change is applied and
/// persisted, and a persistence failure reverts it.
pub trait WhitelistManagementApi: Send + Sync {
    /// Whitelist several nodes at once.
    fn add_enodes(&self, caller: &Address, enodes: &[Enode])
        -> PermissioningResult<WhitelistResult>;

    /// Remove several nodes at once.
    fn remove_enodes(
        &self,
        caller: &Address,
        enodes: &[Enode],
    ) -> PermissioningResult<WhitelistResult>;

    /// Whitelisted nodes in insertion order.
    fn get_all_enodes(&self) -> Vec<Enode>;

    /// True if the node whitelist is unset or lists `enode`.
    fn is_node_permitted(&self, enode: &Enode) -> bool;

    /// Whitelist accounts given as hex strings.
    fn add_accounts(
        &self,
        caller: &Address,
        accounts: &[String],
    ) -> PermissioningResult<WhitelistResult>;

    /// Remove accounts given as hex strings.
    fn remove_accounts(
        &self,
        caller: &Address,
        accounts: &[String],
    ) -> PermissioningResult<WhitelistResult>;

    /// Whitelisted accounts in insertion order.
    fn get_account_whitelist(&self) -> Vec<Address>;

    /// True if the account whitelist is unset or lists `account`.
    fn is_account_permitted(&self, account: &Address) -> bool;
}
