//! # uuid-stamp
//!
//! Reads JSON signals, one per line, from stdin or `--input`, runs them
//! through a UUID block and prints the emitted signals to stdout.
//!
//! Logs go to stderr. Set `RUST_LOG` to change the level (default `info`).

#![forbid(unsafe_code)]
#![forbid(clippy::unwrap_used)]
#![forbid(clippy::panic)]
#![deny(clippy::expect_used)]

use std::fs::File;
use std::io::{self, BufReader, BufWriter};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use uuid_stamp::{Cli, run};

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = cli
        .block_config()
        .context("Failed to load block configuration")?;
    let writer = BufWriter::new(io::stdout().lock());

    match &cli.input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open input {}", path.display()))?;
            run(config, BufReader::new(file), writer)?;
        }
        None => {
            run(config, io::stdin().lock(), writer)?;
        }
    }

    Ok(())
}

/// Initialize tracing subscriber writing to stderr.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}
