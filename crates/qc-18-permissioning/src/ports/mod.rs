//! # Ports Layer - Hexagonal Architecture Boundaries
//!
//! - **Driving Ports (Inbound):** APIs this subsystem exposes to the
//!   peer-admission and transaction-pool consumers
//! - **Driven Ports (Outbound):** change log and whitelist persistence

pub mod inbound;
pub mod outbound;

pub use inbound::{PermissioningApi, WhitelistManagementApi};
pub use outbound::{ChangeSink, WhitelistStore};
