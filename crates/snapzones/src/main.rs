#![warn(missing_docs)]

//! Entry point for the `snapzones` binary.

mod cli;
mod error;
mod fixture;
mod inspect;
mod simulate;

use std::{io, process};

use clap::Parser;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, registry};

use crate::{
    cli::{Cli, Commands},
    error::Result,
};

fn main() {
    if let Err(err) = run() {
        error!("{err}");
        eprintln!("error: {err}");
        process::exit(1);
    }
}

/// Parse CLI arguments, install logging, and dispatch to the chosen subcommand.
fn run() -> Result<()> {
    let Cli { log, command } = Cli::parse();
    let env_filter = logging::env_filter_from_spec(&log.spec());
    registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(io::stderr).without_time())
        .try_init()
        .ok();

    match command {
        Commands::Plan(args) => inspect::plan(&args),
        Commands::Resolve(args) => inspect::resolve(&args),
        Commands::Hit(args) => inspect::hit(&args),
        Commands::Simulate(args) => simulate::run(&args),
    }
}
