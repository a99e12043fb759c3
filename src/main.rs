//! Library Engine CLI
//!
//! Loads a catalog, applies a stream of issue/return commands, and writes the
//! resulting transaction ledger as CSV.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- catalog.csv commands.csv > ledger.csv
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug`, `info` or `warn` to control logging verbosity

use library_engine::{EngineError, LibraryEngine, Result};
use log::info;
use std::env;
use std::fs::File;
use std::io::{self, BufReader};
use std::process;

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        return Err(EngineError::MissingArgument);
    }

    let catalog = BufReader::new(File::open(&args[1])?);
    let commands = BufReader::new(File::open(&args[2])?);

    let mut engine = LibraryEngine::new();
    let loaded = engine.load_catalog_csv(catalog)?;
    info!("Loaded {} catalog records from {}", loaded, args[1]);

    engine.process_csv(commands)?;

    let status = engine.status_report();
    info!(
        "Items: {} total, {} available, {} issued; {} reservations pending; fines assessed {}",
        status.total,
        status.available,
        status.issued,
        engine.reservations().len(),
        engine.fines_total()
    );

    let stdout = io::stdout();
    let handle = stdout.lock();
    engine.write_output(handle)?;

    Ok(())
}
