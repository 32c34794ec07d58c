//! Core domain logic for the D&D campaign vault.
//! This crate is the single source of truth for record formats and invariants.

pub mod config;
pub mod import;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;
pub mod store;

pub use config::{ConfigError, LoggingConfig, VaultConfig};
pub use import::{ImportError, ImportReport, ImportResult};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::character::{Character, NewCharacter};
pub use model::item::{Item, NewItem};
pub use model::monster::{Monster, NewMonster};
pub use model::quest::{NewQuest, Objective, ObjectiveStatus, Quest, QuestStatus};
pub use model::record::{Collection, Record, ValidationError};
pub use model::shop::{NewShop, Shop};
pub use repo::snapshot::{CollectionCounts, VaultSnapshot};
pub use repo::views::{CharacterView, LinkedRef, QuestView, ShopView};
pub use search::global::{search_vault, VaultQuery, VaultSearchResults};
pub use service::{VaultError, VaultResult, VaultService};
pub use store::{JsonFileStore, RecordStore, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
