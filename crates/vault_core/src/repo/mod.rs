//! Identity and relational access over loaded collections.
//!
//! # Responsibility
//! - Allocate collection-unique sequential IDs.
//! - Resolve weak foreign keys between collections.
//! - Build resolved views consumed by the presentation layer.
//!
//! # Invariants
//! - Lookups return `Option`; a dangling reference is a normal state.
//! - Nothing here touches disk except `VaultSnapshot::load`.

pub mod id_alloc;
pub mod lookup;
pub mod snapshot;
pub mod views;
