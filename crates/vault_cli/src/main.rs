//! Binary entrypoint for the campaign vault CLI.
//!
//! Commands:
//! - `import-monsters [--source <dir>]` - merge external stat blocks into the vault
//! - `search <query>` - vault-wide search (`item:`, `monster:`, `char:`, `shop:`, `quest:` filters)
//! - `next-id <collection>` - print the next free ID for a collection
//! - `overview` - record counts and main quest progress
//! - `init-config <path>` - write a starter `dndvault.toml`

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use log::{info, warn};
use std::path::{Path, PathBuf};
use vault_core::{
    init_logging, Collection, ImportReport, JsonFileStore, LinkedRef, Record, VaultConfig,
    VaultSearchResults, VaultService,
};

#[derive(Parser)]
#[command(name = "dndvault")]
#[command(about = "Campaign vault for items, monsters, shops, characters and quests")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path (can be used before or after subcommand)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Vault data directory; overrides the configured one
    #[arg(short, long, global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge monster stat blocks from a directory of JSON files
    ImportMonsters {
        /// Source directory (defaults to the configured monster source)
        #[arg(short, long)]
        source: Option<PathBuf>,
    },
    /// Search every collection
    Search {
        /// Search term, optionally prefixed with a collection filter
        query: String,
    },
    /// Print the next free ID for a collection
    NextId {
        /// items, monsters, shops, characters or quests
        collection: String,
    },
    /// Show record counts and quest progress
    Overview,
    /// Write a default configuration file
    InitConfig {
        path: PathBuf,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::InitConfig { path, force } => write_config(&path, force)?,
        Commands::ImportMonsters { source } => {
            let (config, service) = open_vault(config_path, cli.data_dir)?;
            let source = source.unwrap_or_else(|| config.monster_source_dir());
            let report = service
                .import_monsters(&source)
                .with_context(|| format!("monster import from {} failed", source.display()))?;
            print_import_report(&report);
        }
        Commands::Search { query } => {
            let (_, service) = open_vault(config_path, cli.data_dir)?;
            let results = service.search_vault(&query)?;
            print_search_results(&results);
        }
        Commands::NextId { collection } => {
            let collection = Collection::parse(&collection)
                .ok_or_else(|| anyhow!("unknown collection `{collection}`"))?;
            let (_, service) = open_vault(config_path, cli.data_dir)?;
            println!("{}", service.next_id(collection)?);
        }
        Commands::Overview => {
            let (_, service) = open_vault(config_path, cli.data_dir)?;
            print_overview(&service)?;
        }
    }
    Ok(())
}

/// Loads configuration, starts file logging and opens the vault it names.
fn open_vault(
    config_path: Option<&Path>,
    data_dir: Option<PathBuf>,
) -> Result<(VaultConfig, VaultService<JsonFileStore>)> {
    let config = resolve_config(config_path, data_dir)?;
    start_logging(&config);
    let service = VaultService::new(JsonFileStore::new(&config.data_dir));
    Ok((config, service))
}

fn resolve_config(path: Option<&Path>, data_dir: Option<PathBuf>) -> Result<VaultConfig> {
    let mut config = match path {
        Some(path) => VaultConfig::load(path)?,
        None => VaultConfig::default(),
    };
    if let Some(data_dir) = data_dir {
        config.data_dir = data_dir;
    }
    Ok(config)
}

fn start_logging(config: &VaultConfig) {
    let Some(dir) = &config.logging.dir else {
        return;
    };
    match init_logging(&config.logging.level, &dir.to_string_lossy()) {
        Ok(()) => info!(
            "event=cli_start module=cli status=ok data_dir={}",
            config.data_dir.display()
        ),
        Err(err) => {
            eprintln!("warning: file logging disabled: {err}");
            warn!("event=cli_start module=cli status=degraded");
        }
    }
}

fn write_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "{} already exists; pass --force to overwrite",
            path.display()
        );
    }
    VaultConfig::write_default(path)?;
    println!("wrote default config to {}", path.display());
    Ok(())
}

fn print_import_report(report: &ImportReport) {
    for file in &report.files {
        println!(
            "{}: added {}, skipped {}, rejected {}",
            file.label,
            file.added.len(),
            file.skipped.len(),
            file.rejected.len()
        );
        for rejected in &file.rejected {
            println!("  entry #{} rejected: {}", rejected.index, rejected.reason);
        }
    }
    println!(
        "added {} new monsters, total {}",
        report.added_count(),
        report.total_monsters
    );
}

fn print_group<R: Record>(records: &[R]) {
    for record in records {
        let link = LinkedRef {
            id: record.id().to_string(),
            name: Some(record.name().to_string()),
        };
        println!("[{}] {}", R::COLLECTION, link.label());
    }
}

fn print_search_results(results: &VaultSearchResults) {
    if results.is_empty() {
        println!("no matches");
        return;
    }
    print_group(&results.items);
    print_group(&results.monsters);
    print_group(&results.shops);
    print_group(&results.characters);
    print_group(&results.quests);
    println!("{} matches", results.total());
}

fn print_overview(service: &VaultService<JsonFileStore>) -> Result<()> {
    let counts = service.snapshot()?.counts();
    for collection in Collection::ALL {
        println!("{collection}: {}", counts.get(collection));
    }

    let overview = service.quest_overview()?;
    println!(
        "quests complete {}, in progress {}, not started {}",
        overview.complete, overview.in_progress, overview.not_started
    );
    if let Some(main) = overview.main_quest {
        println!(
            "main quest: {} ({}/{} objectives)",
            main.name, main.completed_objectives, main.total_objectives
        );
        for core in main.cores {
            println!(
                "  {}: {} [{}]",
                core.emotion.as_deref().unwrap_or("?"),
                core.name,
                core.status.as_str()
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{open_vault, write_config, Cli, Commands};
    use clap::Parser;
    use std::fs;

    #[test]
    fn init_config_parses_without_a_vault() {
        let cli = Cli::try_parse_from(["dndvault", "init-config", "vault.toml", "--force"]).unwrap();
        match cli.command {
            Commands::InitConfig { path, force } => {
                assert_eq!(path.to_str(), Some("vault.toml"));
                assert!(force);
            }
            _ => panic!("expected init-config"),
        }
    }

    #[test]
    fn init_config_refuses_to_overwrite_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dndvault.toml");
        fs::write(&path, "keep me").unwrap();

        assert!(write_config(&path, false).is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "keep me");

        write_config(&path, true).unwrap();
        assert!(fs::read_to_string(&path).unwrap().contains("data_dir"));
    }

    #[test]
    fn data_dir_flag_overrides_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dndvault.toml");
        write_config(&path, false).unwrap();

        let override_dir = dir.path().join("campaign");
        let (config, _) = open_vault(Some(&path), Some(override_dir.clone())).unwrap();
        assert_eq!(config.data_dir, override_dir);
    }
}
