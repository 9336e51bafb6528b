use std::io;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use handwerk::cli::{self, Cli};
use handwerk::{config, logging, RecordStore};

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    // Load configuration
    let config = config::init()?.with_data_file(cli.data_file);
    logging::init(&config.log);

    let mut store = RecordStore::open(config.data_file())
        .with_context(|| format!("could not open {}", config.data_file().display()))?;

    let stdout = io::stdout();
    cli::run(cli.command, &mut store, &mut stdout.lock())
}
