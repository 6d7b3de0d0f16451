use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use flightseed::{
    config::{DEFAULT_DB_PATH, DEFAULT_TABLE_CANDIDATES},
    eraser::TableEraser,
    store::FlightStore,
};

/// Delete every flight from the flights tables.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Path to the SQLite database
    #[arg(long, default_value = DEFAULT_DB_PATH)]
    db: PathBuf,

    /// Tables to empty (default: the known flights tables)
    #[arg(long, num_args = 1..)]
    tables: Vec<String>,

    /// Actually delete. Without it only the row counts are shown.
    #[arg(long)]
    yes: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let tables: Vec<String> = if args.tables.is_empty() {
        DEFAULT_TABLE_CANDIDATES.iter().map(ToString::to_string).collect()
    } else {
        args.tables
    };

    let store = FlightStore::open(&args.db)?;
    let eraser = TableEraser::new(&store);

    if !args.yes {
        for report in eraser.dry_run(&tables).context("Dry run failed")? {
            println!(
                "Table {} has {} flights that would be deleted.",
                report.table, report.deleted
            );
        }
        println!("Nothing deleted. Pass --yes to empty the tables.");
        return Ok(());
    }

    for report in eraser.erase(&tables).context("Emptying tables failed")? {
        println!(
            "Table {} emptied: {} flights deleted.",
            report.table, report.deleted
        );
    }
    println!("The flights tables have been emptied.");

    Ok(())
}
