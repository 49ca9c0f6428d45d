// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! gsinks: count digraphs with a single global sink.
//!
//! Usage: `gsinks [-q] [-d] [-l] [N] [--data-dir DIR]`
//!
//! Reads every digraph on `N - 1` vertices from `dig{N-1}.d6` (or `digl{N-1}.d6`
//! with `-l`), and counts the ways to add an `N`th vertex that becomes the one
//! global sink, up to isomorphism. Totals go to stderr, generated digraphs
//! (with `-d`) to stdout.

use std::io::{self, BufWriter};
use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use gsinks::config::RunConfig;
use gsinks::driver;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("gsinks=warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn main() -> ExitCode {
    let config = match RunConfig::try_parse() {
        Ok(config) => config,
        Err(err) if err.use_stderr() => {
            let _ = err.print();
            return ExitCode::FAILURE;
        }
        Err(err) => err.exit(),
    };
    init_tracing();

    let stdout = BufWriter::new(io::stdout().lock());
    match driver::run(&config, stdout, io::stderr()) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            eprintln!("gsinks: {}", err);
            ExitCode::FAILURE
        }
    }
}
