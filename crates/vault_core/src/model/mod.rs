//! Campaign vault domain model.
//!
//! # Responsibility
//! - Define the five record types persisted by the vault.
//! - Keep derived projections (paste blocks, stat lines) as pure functions of
//!   stored fields.
//!
//! # Invariants
//! - Every record is identified by a collection-unique, prefixed string ID.
//! - Foreign keys are plain ID strings; the referent may not exist.

pub mod character;
pub mod item;
pub mod monster;
pub mod quest;
pub mod record;
pub mod shop;
