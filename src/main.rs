mod builder;
mod cli;
mod config;
mod epoch;
mod estimate;
mod model;
mod normalize;
mod oracle;
mod planner;
mod storage;
mod transfer;
mod validate;

use std::{io, process};

use tracing_subscriber::EnvFilter;

use config::Settings;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let settings = match Settings::load() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to load settings: {e}");
            process::exit(1);
        }
    };

    if let Err(e) = cli::run(&settings) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
