//! # Permissioning Service
//!
//! Wraps the domain registries behind one lock and implements the
//! `PermissioningApi` and `WhitelistManagementApi` ports.
//!
//! Every mutating call runs the same pipeline under the write lock:
//!
//! 1. Authority check (caller must be an admin)
//! 2. Read-only gate (whitelists always; admins and names per `GatePolicy`)
//! 3. Mutation (no-ops return here)
//! 4. Persistence for whitelist changes (revert on failure)
//! 5. One sequenced `ChangeRecord` per applied change

mod api;
mod core;
mod whitelist;

pub use self::core::{PermissioningService, PermissioningStats};
