use crate::config::{GatePolicy, PermissioningConfig};
use crate::domain::{
    invariant_admins_distinct, invariant_whitelists_distinct, AccountWhitelist, Address,
    AdministratorSet, Mode, NameRegistry, NodeWhitelist, PermissioningError, PermissioningResult,
    StoreError, WhitelistKind, address_to_hex,
};
use crate::events::{ChangeRecord, PermissioningEvent};
use crate::ports::{ChangeSink, WhitelistStore};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{info, warn};

/// All mutable permissioning state, guarded as one unit.
#[derive(Clone, Debug)]
pub(crate) struct PermissioningState {
    pub(crate) admins: AdministratorSet,
    pub(crate) nodes: NodeWhitelist,
    pub(crate) accounts: AccountWhitelist,
    pub(crate) names: NameRegistry,
    pub(crate) mode: Mode,
    /// Sequence number handed to the next change record.
    pub(crate) next_sequence: u64,
}

/// Point-in-time counters for monitoring.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PermissioningStats {
    /// Administrator count.
    pub admin_count: usize,
    /// Whitelisted node count.
    pub enode_count: usize,
    /// Whitelisted account count.
    pub account_count: usize,
    /// Registered name count.
    pub name_count: usize,
    /// Read-only mode active.
    pub read_only: bool,
    /// Changes emitted so far.
    pub changes_emitted: u64,
}

/// Permissioning Service implementing both driving ports.
///
/// ## Thread Safety
///
/// State lives behind a single `RwLock`. Queries share the read lock;
/// every mutation holds the write lock across authority check, gate check,
/// mutation, persistence and change emission, so readers never observe a
/// half-applied change. Share the service across tasks via `Arc`.
///
/// ## Dependencies
///
/// - `C: ChangeSink` - receives the ordered change log
/// - `W: WhitelistStore` - durable copy of node and account whitelists
pub struct PermissioningService<C, W>
where
    C: ChangeSink,
    W: WhitelistStore,
{
    pub(crate) state: RwLock<PermissioningState>,
    pub(crate) policy: GatePolicy,
    pub(crate) changes: Arc<C>,
    pub(crate) store: Arc<W>,
}

impl<C, W> PermissioningService<C, W>
where
    C: ChangeSink,
    W: WhitelistStore,
{
    /// Create a service whose only admin is `bootstrap_admin`, with unset
    /// whitelists and normal mode.
    pub fn new(bootstrap_admin: Address, policy: GatePolicy, changes: Arc<C>, store: Arc<W>) -> Self {
        Self::from_config(
            &PermissioningConfig::new(bootstrap_admin).with_policy(policy),
            changes,
            store,
        )
    }

    /// Create a service seeded from configuration. Seeding emits no changes.
    pub fn from_config(config: &PermissioningConfig, changes: Arc<C>, store: Arc<W>) -> Self {
        let nodes = match &config.nodes_whitelist {
            Some(list) => NodeWhitelist::seeded(list.iter().copied()),
            None => NodeWhitelist::new(),
        };
        let accounts = match &config.accounts_whitelist {
            Some(list) => AccountWhitelist::seeded(list.iter().copied()),
            None => AccountWhitelist::new(),
        };

        info!(
            "[qc-18] Permissioning started: admin {}, {} nodes, {} accounts",
            address_to_hex(&config.bootstrap_admin),
            nodes.len(),
            accounts.len()
        );

        Self {
            state: RwLock::new(PermissioningState {
                admins: AdministratorSet::new(config.bootstrap_admin),
                nodes,
                accounts,
                names: NameRegistry::new(),
                mode: Mode::Normal,
                next_sequence: 1,
            }),
            policy: config.policy.clone(),
            changes,
            store,
        }
    }

    /// Active gate policy.
    pub fn policy(&self) -> &GatePolicy {
        &self.policy
    }

    /// Current mode.
    pub fn mode(&self) -> Mode {
        self.state.read().mode
    }

    /// Current counters.
    pub fn stats(&self) -> PermissioningStats {
        let state = self.state.read();
        PermissioningStats {
            admin_count: state.admins.len(),
            enode_count: state.nodes.len(),
            account_count: state.accounts.len(),
            name_count: state.names.len(),
            read_only: state.mode.is_read_only(),
            changes_emitted: state.next_sequence - 1,
        }
    }

    /// Reject callers outside the admin set.
    pub(crate) fn require_admin(
        state: &PermissioningState,
        caller: &Address,
        operation: &'static str,
    ) -> PermissioningResult<()> {
        if state.admins.contains(caller) {
            return Ok(());
        }
        warn!(
            "[qc-18] {} rejected: {} is not an administrator",
            operation,
            address_to_hex(caller)
        );
        Err(PermissioningError::Unauthorized { caller: *caller })
    }

    /// Reject gated mutations while read-only.
    pub(crate) fn require_writable(
        state: &PermissioningState,
        operation: &'static str,
    ) -> PermissioningResult<()> {
        if state.mode.is_read_only() {
            warn!("[qc-18] {} rejected: read-only mode is active", operation);
            return Err(PermissioningError::ReadOnly { operation });
        }
        Ok(())
    }

    /// Hand the next sequenced record to the change sink.
    ///
    /// Must be called with the write lock held.
    pub(crate) fn emit(&self, state: &mut PermissioningState, event: PermissioningEvent) {
        debug_assert!(invariant_admins_distinct(&state.admins));
        debug_assert!(invariant_whitelists_distinct(&state.nodes, &state.accounts));

        let sequence = state.next_sequence;
        state.next_sequence += 1;
        self.changes.record(ChangeRecord { sequence, event });
    }

    pub(crate) fn persist_nodes(&self, state: &PermissioningState) -> Result<(), StoreError> {
        self.store.update(WhitelistKind::Nodes, &state.nodes.urls())
    }

    pub(crate) fn persist_accounts(&self, state: &PermissioningState) -> Result<(), StoreError> {
        let entries: Vec<String> = state.accounts.all().iter().map(address_to_hex).collect();
        self.store.update(WhitelistKind::Accounts, &entries)
    }
}
