//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store calls into use-case level APIs.
//! - Keep the CLI decoupled from storage details.

pub mod overview;
pub mod vault_service;

pub use overview::{
    group_characters_by_type, group_quests_by_type, quest_overview, QuestOverview, TypeGroup,
};
pub use vault_service::{VaultError, VaultResult, VaultService};
