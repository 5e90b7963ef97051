use super::core::PermissioningService;
use crate::domain::{
    address_to_hex, enode_bytes, Address, Enode, KeyHalf, NameRecord, Outcome,
    PermissioningError, PermissioningResult,
};
use crate::events::PermissioningEvent;
use crate::ports::{ChangeSink, PermissioningApi, WhitelistStore};
use tracing::{debug, info, warn};

impl<C, W> PermissioningApi for PermissioningService<C, W>
where
    C: ChangeSink,
    W: WhitelistStore,
{
    fn add_admin(&self, caller: &Address, admin: Address) -> PermissioningResult<Outcome> {
        let mut state = self.state.write();
        Self::require_admin(&state, caller, "add_admin")?;
        if self.policy.gate_admin_mutations {
            Self::require_writable(&state, "add_admin")?;
        }

        let outcome = state.admins.add(admin);
        if outcome.is_applied() {
            info!("[qc-18] Admin added: {}", address_to_hex(&admin));
            self.emit(
                &mut state,
                PermissioningEvent::AdminAdded {
                    caller: *caller,
                    admin,
                },
            );
        } else {
            debug!("[qc-18] Admin {} already present", address_to_hex(&admin));
        }
        Ok(outcome)
    }

    fn remove_admin(&self, caller: &Address, admin: Address) -> PermissioningResult<Outcome> {
        let mut state = self.state.write();
        Self::require_admin(&state, caller, "remove_admin")?;
        if self.policy.gate_admin_mutations {
            Self::require_writable(&state, "remove_admin")?;
        }

        if !state.admins.contains(&admin) {
            debug!("[qc-18] Admin {} not present", address_to_hex(&admin));
            return Ok(Outcome::NoOp);
        }
        if state.admins.len() == 1 && !self.policy.allow_last_admin_removal {
            warn!("[qc-18] remove_admin rejected: would remove the last administrator");
            return Err(PermissioningError::LastAdmin);
        }

        let outcome = state.admins.remove(&admin);
        info!(
            "[qc-18] Admin removed: {} ({} remaining)",
            address_to_hex(&admin),
            state.admins.len()
        );
        self.emit(
            &mut state,
            PermissioningEvent::AdminRemoved {
                caller: *caller,
                admin,
            },
        );
        Ok(outcome)
    }

    fn is_authorized(&self, address: &Address) -> bool {
        self.state.read().admins.contains(address)
    }

    fn get_all_admins(&self) -> Vec<Address> {
        self.state.read().admins.all().to_vec()
    }

    fn add_enode(&self, caller: &Address, enode: Enode) -> PermissioningResult<Outcome> {
        let mut state = self.state.write();
        Self::require_admin(&state, caller, "add_enode")?;
        Self::require_writable(&state, "add_enode")?;

        let previous = state.nodes.clone();
        let outcome = state.nodes.add(enode);
        if !outcome.is_applied() {
            debug!("[qc-18] Enode {} already whitelisted", enode);
            return Ok(outcome);
        }

        if let Err(e) = self.persist_nodes(&state) {
            warn!("[qc-18] add_enode reverted: {}", e);
            state.nodes = previous;
            return Err(e.into());
        }

        info!("[qc-18] Enode whitelisted: {}", enode);
        self.emit(
            &mut state,
            PermissioningEvent::EnodeAdded {
                caller: *caller,
                enode,
            },
        );
        Ok(outcome)
    }

    fn remove_enode(&self, caller: &Address, enode: &Enode) -> PermissioningResult<Outcome> {
        let mut state = self.state.write();
        Self::require_admin(&state, caller, "remove_enode")?;
        Self::require_writable(&state, "remove_enode")?;

        let previous = state.nodes.clone();
        let outcome = state.nodes.remove(enode);
        if !outcome.is_applied() {
            debug!("[qc-18] Enode {} not whitelisted", enode);
            return Ok(outcome);
        }

        if let Err(e) = self.persist_nodes(&state) {
            warn!("[qc-18] remove_enode reverted: {}", e);
            state.nodes = previous;
            return Err(e.into());
        }

        info!("[qc-18] Enode removed: {}", enode);
        self.emit(
            &mut state,
            PermissioningEvent::EnodeRemoved {
                caller: *caller,
                enode: *enode,
            },
        );
        Ok(outcome)
    }

    fn get_all_enode_highs(&self) -> Vec<KeyHalf> {
        self.state.read().nodes.key_highs()
    }

    fn enode_bytes(&self, key_high: KeyHalf, key_low: KeyHalf, host: u32, port: u16) -> String {
        enode_bytes(key_high, key_low, host, port)
    }

    fn register_name(
        &self,
        caller: &Address,
        name: &str,
        address: Address,
        version: u64,
    ) -> PermissioningResult<Outcome> {
        let mut state = self.state.write();
        if self.policy.name_registration_requires_admin {
            Self::require_admin(&state, caller, "register_name")?;
        }
        if self.policy.gate_name_registration {
            Self::require_writable(&state, "register_name")?;
        }

        let outcome = state.names.register(name, address, version);
        info!(
            "[qc-18] Name registered: {} -> {} (v{})",
            name,
            address_to_hex(&address),
            version
        );
        self.emit(
            &mut state,
            PermissioningEvent::NameRegistered {
                caller: *caller,
                name: name.to_string(),
                address,
                version,
            },
        );
        Ok(outcome)
    }

    fn get_contract_details(&self, name: &str) -> NameRecord {
        self.state.read().names.details(name)
    }

    fn enter_read_only(&self, caller: &Address) -> PermissioningResult<()> {
        let mut state = self.state.write();
        Self::require_admin(&state, caller, "enter_read_only")?;

        state.mode = state.mode.enter_read_only().inspect_err(|e| {
            warn!("[qc-18] enter_read_only rejected: {}", e);
        })?;
        info!("[qc-18] Read-only mode entered");
        self.emit(
            &mut state,
            PermissioningEvent::ReadOnlyEntered { caller: *caller },
        );
        Ok(())
    }

    fn exit_read_only(&self, caller: &Address) -> PermissioningResult<()> {
        let mut state = self.state.write();
        Self::require_admin(&state, caller, "exit_read_only")?;

        state.mode = state.mode.exit_read_only().inspect_err(|e| {
            warn!("[qc-18] exit_read_only rejected: {}", e);
        })?;
        info!("[qc-18] Read-only mode exited");
        self.emit(
            &mut state,
            PermissioningEvent::ReadOnlyExited { caller: *caller },
        );
        Ok(())
    }

    fn is_read_only(&self) -> bool {
        self.state.read().mode.is_read_only()
    }
}
