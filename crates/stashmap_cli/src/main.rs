//! Launch entry point for the stashmap inventory.
//!
//! Opens the inventory database (argument, then `STASHMAP_DB_PATH`, then a
//! temp-dir default), optionally seeds demo cupboards into an empty database,
//! and prints every place with its item count.

use clap::Parser;
use log::error;
use stashmap_core::db::open_db;
use stashmap_core::{
    core_version, init_logging, seed_demo, CoreConfig, Inventory, SqliteInventoryStore,
};
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "stashmap_cli", version)]
#[command(about = "List the places and items of a stashmap inventory")]
struct Args {
    /// Fill an empty database with demo cupboards
    #[arg(long)]
    seed: bool,

    /// Inventory database file (default: $STASHMAP_DB_PATH or a temp file)
    db_path: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_run module=cli status=error error={err}");
            eprintln!("stashmap: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let mut config = CoreConfig::from_env()?;
    if let Some(db_path) = args.db_path {
        config.db_path = db_path;
    }

    if let Some(log_dir) = &config.log_dir {
        let log_dir = log_dir
            .to_str()
            .ok_or_else(|| format!("log dir is not valid UTF-8: {}", log_dir.display()))?;
        init_logging(&config.log_level, log_dir)?;
    }

    println!("stashmap_core version={}", core_version());
    println!("database={}", config.db_path.display());

    let conn = open_db(&config.db_path)?;
    let store = SqliteInventoryStore::try_new(&conn)?;
    let mut inventory = Inventory::load(store)?;

    if args.seed {
        if inventory.places().is_empty() {
            let created = seed_demo(&mut inventory)?;
            println!("seeded {created} demo places");
        } else {
            println!("database not empty, skipping seed");
        }
    }

    for summary in inventory.place_summaries() {
        println!(
            "{}\t{}\t{}个物品",
            summary.place.name, summary.place.image, summary.item_count
        );
    }
    Ok(())
}
