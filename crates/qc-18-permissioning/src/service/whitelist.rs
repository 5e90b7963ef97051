use super::core::PermissioningService;
use crate::domain::{
    address_to_hex, invariant_no_duplicates, parse_address, Address, Enode, PermissioningResult,
    WhitelistResult,
};
use crate::events::PermissioningEvent;
use crate::ports::{ChangeSink, WhitelistManagementApi, WhitelistStore};
use tracing::{debug, info, warn};

impl<C, W> PermissioningService<C, W>
where
    C: ChangeSink,
    W: WhitelistStore,
{
    /// Parse every account, or report the batch as invalid.
    fn parse_accounts(accounts: &[String]) -> Option<Vec<Address>> {
        accounts
            .iter()
            .map(|raw| parse_address(raw))
            .collect::<PermissioningResult<Vec<_>>>()
            .inspect_err(|e| debug!("[qc-18] Rejected account batch: {}", e))
            .ok()
    }
}

impl<C, W> WhitelistManagementApi for PermissioningService<C, W>
where
    C: ChangeSink,
    W: WhitelistStore,
{
    fn add_enodes(
        &self,
        caller: &Address,
        enodes: &[Enode],
    ) -> PermissioningResult<WhitelistResult> {
        let mut state = self.state.write();
        Self::require_admin(&state, caller, "add_enodes")?;
        Self::require_writable(&state, "add_enodes")?;

        if enodes.is_empty() {
            return Ok(WhitelistResult::EmptyEntry);
        }
        if !invariant_no_duplicates(enodes) {
            return Ok(WhitelistResult::DuplicatedEntry);
        }
        if let Some(existing) = enodes.iter().find(|e| state.nodes.contains(e)) {
            debug!("[qc-18] Enode {} already whitelisted", existing);
            return Ok(WhitelistResult::ExistingEntry);
        }

        let previous = state.nodes.clone();
        for enode in enodes {
            state.nodes.add(*enode);
        }
        if let Err(e) = self.persist_nodes(&state) {
            warn!("[qc-18] add_enodes reverted: {}", e);
            state.nodes = previous;
            return Ok(WhitelistResult::PersistFail);
        }

        info!("[qc-18] {} enodes whitelisted", enodes.len());
        for enode in enodes {
            self.emit(
                &mut state,
                PermissioningEvent::EnodeAdded {
                    caller: *caller,
                    enode: *enode,
                },
            );
        }
        Ok(WhitelistResult::Success)
    }

    fn remove_enodes(
        &self,
        caller: &Address,
        enodes: &[Enode],
    ) -> PermissioningResult<WhitelistResult> {
        let mut state = self.state.write();
        Self::require_admin(&state, caller, "remove_enodes")?;
        Self::require_writable(&state, "remove_enodes")?;

        if enodes.is_empty() {
            return Ok(WhitelistResult::EmptyEntry);
        }
        if !invariant_no_duplicates(enodes) {
            return Ok(WhitelistResult::DuplicatedEntry);
        }
        if let Some(absent) = enodes.iter().find(|e| !state.nodes.contains(e)) {
            debug!("[qc-18] Enode {} not whitelisted", absent);
            return Ok(WhitelistResult::AbsentEntry);
        }

        let previous = state.nodes.clone();
        for enode in enodes {
            state.nodes.remove(enode);
        }
        if let Err(e) = self.persist_nodes(&state) {
            warn!("[qc-18] remove_enodes reverted: {}", e);
            state.nodes = previous;
            return Ok(WhitelistResult::PersistFail);
        }

        info!("[qc-18] {} enodes removed", enodes.len());
        for enode in enodes {
            self.emit(
                &mut state,
                PermissioningEvent::EnodeRemoved {
                    caller: *caller,
                    enode: *enode,
                },
            );
        }
        Ok(WhitelistResult::Success)
    }

    fn get_all_enodes(&self) -> Vec<Enode> {
        self.state.read().nodes.all().to_vec()
    }

    fn is_node_permitted(&self, enode: &Enode) -> bool {
        self.state.read().nodes.is_permitted(enode)
    }

    fn add_accounts(
        &self,
        caller: &Address,
        accounts: &[String],
    ) -> PermissioningResult<WhitelistResult> {
        let mut state = self.state.write();
        Self::require_admin(&state, caller, "add_accounts")?;
        Self::require_writable(&state, "add_accounts")?;

        if accounts.is_empty() {
            return Ok(WhitelistResult::EmptyEntry);
        }
        let Some(parsed) = Self::parse_accounts(accounts) else {
            return Ok(WhitelistResult::InvalidEntry);
        };
        if !invariant_no_duplicates(&parsed) {
            return Ok(WhitelistResult::DuplicatedEntry);
        }
        if let Some(existing) = parsed.iter().find(|a| state.accounts.contains(a)) {
            debug!("[qc-18] Account {} already whitelisted", address_to_hex(existing));
            return Ok(WhitelistResult::ExistingEntry);
        }

        let previous = state.accounts.clone();
        for account in &parsed {
            state.accounts.add(*account);
        }
        if let Err(e) = self.persist_accounts(&state) {
            warn!("[qc-18] add_accounts reverted: {}", e);
            state.accounts = previous;
            return Ok(WhitelistResult::PersistFail);
        }

        info!("[qc-18] {} accounts whitelisted", parsed.len());
        for account in parsed {
            self.emit(
                &mut state,
                PermissioningEvent::AccountAdded {
                    caller: *caller,
                    account,
                },
            );
        }
        Ok(WhitelistResult::Success)
    }

    fn remove_accounts(
        &self,
        caller: &Address,
        accounts: &[String],
    ) -> PermissioningResult<WhitelistResult> {
        let mut state = self.state.write();
        Self::require_admin(&state, caller, "remove_accounts")?;
        Self::require_writable(&state, "remove_accounts")?;

        if accounts.is_empty() {
            return Ok(WhitelistResult::EmptyEntry);
        }
        let Some(parsed) = Self::parse_accounts(accounts) else {
            return Ok(WhitelistResult::InvalidEntry);
        };
        if !invariant_no_duplicates(&parsed) {
            return Ok(WhitelistResult::DuplicatedEntry);
        }
        if let Some(absent) = parsed.iter().find(|a| !state.accounts.contains(a)) {
            debug!("[qc-18] Account {} not whitelisted", address_to_hex(absent));
            return Ok(WhitelistResult::AbsentEntry);
        }

        let previous = state.accounts.clone();
        for account in &parsed {
            state.accounts.remove(account);
        }
        if let Err(e) = self.persist_accounts(&state) {
            warn!("[qc-18] remove_accounts reverted: {}", e);
            state.accounts = previous;
            return Ok(WhitelistResult::PersistFail);
        }

        info!("[qc-18] {} accounts removed", parsed.len());
        for account in parsed {
            self.emit(
                &mut state,
                PermissioningEvent::AccountRemoved {
                    caller: *caller,
                    account,
                },
            );
        }
        Ok(WhitelistResult::Success)
    }

    fn get_account_whitelist(&self) -> Vec<Address> {
        self.state.read().accounts.all().to_vec()
    }

    fn is_account_permitted(&self, account: &Address) -> bool {
        self.state.read().accounts.is_permitted(account)
    }
}
