//! pointlog server
//!
//! A personal task-score tracker: REST API over a single-file SQLite
//! store, plus export/import tooling for the data.

use anyhow::Result;
use clap::Parser;
use pointlog::cli::export::ExportArgs;
use pointlog::cli::import::ImportArgs;
use pointlog::cli::{Cli, Command};
use pointlog::config::Config;
use pointlog::db::Database;
use pointlog::db::export::Snapshot;
use pointlog::db::import::{ImportMode, ImportSummary};
use pointlog::server;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Resolve config from file/defaults, then apply CLI overrides.
fn resolve_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::load_or_default(),
    };

    if let Some(database) = &cli.database {
        config.server.db_path = database.clone();
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    Ok(config)
}

fn run_export(config: &Config, args: ExportArgs) -> Result<()> {
    let db = Database::open(&config.server.db_path)?;
    let snapshot = db.export_snapshot()?;

    match &args.output {
        Some(path) => {
            snapshot.to_file(path, args.should_compress())?;
            eprintln!(
                "Exported {} custom tasks and {} daily tasks to {}",
                snapshot.custom_tasks.len(),
                snapshot.daily_tasks.len(),
                path.display()
            );
        }
        None => {
            print!("{}", snapshot.to_json_pretty()?);
        }
    }

    Ok(())
}

fn run_import(config: &Config, args: ImportArgs) -> Result<()> {
    let snapshot = Snapshot::from_file(&args.file)?;

    let mode = if args.merge {
        ImportMode::Merge
    } else {
        ImportMode::Replace
    };

    config.ensure_db_dir()?;
    let db = Database::open(&config.server.db_path)?;
    let ImportSummary {
        custom_tasks,
        daily_tasks,
    } = db.import_snapshot(&snapshot, mode)?;

    eprintln!("Imported {custom_tasks} custom tasks and {daily_tasks} daily tasks");

    Ok(())
}

async fn run_serve(config: Config) -> Result<()> {
    config.ensure_db_dir()?;
    let db = Database::open(&config.server.db_path)?;
    info!("database at {}", config.server.db_path.display());

    server::serve(db, &config.server.bind, config.server.port).await
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = resolve_config(&cli)?;

    match cli.command {
        None | Some(Command::Serve) => run_serve(config).await,
        Some(Command::Export(args)) => run_export(&config, args),
        Some(Command::Import(args)) => run_import(&config, args),
    }
}
