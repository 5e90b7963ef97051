//! # Domain Module
//!
//! Core domain types for the Permissioning subsystem: key/address types,
//! enode descriptors, the four registries and the read-only gate.

pub mod enode;
pub mod entities;
pub mod errors;
pub mod invariants;
pub mod value_objects;

pub use enode::*;
pub use entities::*;
pub use errors::*;
pub use invariants::*;
pub use value_objects::*;
