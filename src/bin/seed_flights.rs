use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use flightseed::{
    config::{SeedConfig, DEFAULT_DB_PATH, DEFAULT_FLIGHTS_PER_TABLE},
    populator::TablePopulator,
    store::FlightStore,
};
use rand::{rngs::StdRng, SeedableRng};

/// Insert test flights into the flight-booking database.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Path to the SQLite database
    #[arg(long, default_value = DEFAULT_DB_PATH)]
    db: PathBuf,

    /// Number of flights to insert per table
    #[arg(short, long, default_value_t = DEFAULT_FLIGHTS_PER_TABLE)]
    n: usize,

    /// Delete the existing flights before inserting
    #[arg(long)]
    reset: bool,

    /// Tables to seed (default: the known flights tables)
    #[arg(long, num_args = 1..)]
    tables: Vec<String>,

    /// JSON file overriding airports, purchase URLs and candidate tables
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for the random generator, for reproducible data
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => SeedConfig::from_json_file(path)
            .with_context(|| format!("Failed loading config {}", path.display()))?,
        None => SeedConfig::default(),
    };

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let store = FlightStore::open(&args.db)?;
    let populator = TablePopulator::new(&store, &config, chrono::Local::now().naive_local());

    let report = populator.populate(
        &args.tables,
        args.n,
        args.reset,
        &mut rng,
        |table, inserted| {
            println!(
                "Table {table}: inserted {inserted} flights{}",
                if args.reset { " (after reset)" } else { "" }
            );
        },
    )?;
    println!(
        "\nTotal inserted: {} flights in {} table(s).",
        report.total(),
        report.inserted.len()
    );

    Ok(())
}
