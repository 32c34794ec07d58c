//! Linear search entry points.
//!
//! # Responsibility
//! - Match records by case-insensitive substring over a per-type projection.
//! - Offer a vault-wide search with collection prefix filters.
//!
//! No index is kept; every search scans the loaded collection.

pub mod engine;
pub mod global;
