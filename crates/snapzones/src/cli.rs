//! Command-line interface definitions for snapzones.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use logging::LogArgs;

/// Command-line interface for the `snapzones` binary.
#[derive(Parser, Debug)]
#[command(
    name = "snapzones",
    about = "Inspect layout resolution, popup planning and zone selection",
    version
)]
pub struct Cli {
    /// Logging controls shared across snapzones binaries.
    #[command(flatten)]
    pub log: LogArgs,

    /// What to inspect.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the popup geometry planned for a screen.
    Plan(PlanArgs),
    /// Print the active layout and candidate list for a context.
    Resolve(ContextArgs),
    /// Hit test a pointer against the expanded popup.
    Hit(HitArgs),
    /// Replay a drag path through a zone selector on a virtual clock.
    Simulate(SimulateArgs),
}

/// Fixture, settings and screen context shared by every command.
#[derive(Args, Debug, Clone)]
pub struct ContextArgs {
    /// Layout fixture (RON): screens, layouts, default and assignments.
    #[arg(long, short = 'f', value_name = "PATH")]
    pub fixture: PathBuf,

    /// Settings file (RON). Defaults to ~/.config/snapzones/config.ron when present.
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Screen id from the fixture. Defaults to the first screen.
    #[arg(long, short = 's', value_name = "ID")]
    pub screen: Option<String>,

    /// Virtual desktop (1-based).
    #[arg(long, short = 'd', default_value_t = 1)]
    pub desktop: u32,

    /// Activity id; empty when activities are not in use.
    #[arg(long, short = 'a', default_value = "")]
    pub activity: String,
}

/// Arguments for `plan`.
#[derive(Args, Debug, Clone)]
pub struct PlanArgs {
    /// Context to plan for.
    #[command(flatten)]
    pub context: ContextArgs,

    /// Plan for this many items instead of the resolved candidate count.
    #[arg(long, value_name = "N")]
    pub count: Option<usize>,

    /// Also print every indicator rectangle.
    #[arg(long)]
    pub cells: bool,
}

/// Arguments for `hit`.
#[derive(Args, Debug, Clone)]
pub struct HitArgs {
    /// Context to test in.
    #[command(flatten)]
    pub context: ContextArgs,

    /// Pointer x in global pixels.
    #[arg(allow_negative_numbers = true)]
    pub x: f64,

    /// Pointer y in global pixels.
    #[arg(allow_negative_numbers = true)]
    pub y: f64,

    /// Content scroll offset in pixels.
    #[arg(long, default_value_t = 0.0)]
    pub scroll: f64,
}

/// Arguments for `simulate`.
#[derive(Args, Debug, Clone)]
pub struct SimulateArgs {
    /// Context to simulate in.
    #[command(flatten)]
    pub context: ContextArgs,

    /// Pointer positions visited in order, e.g. `960,400 960,40 960,5`.
    #[arg(value_name = "X,Y", num_args = 1.., required = true)]
    pub path: Vec<String>,

    /// Virtual time spent at each position, in milliseconds.
    #[arg(long, default_value_t = 50)]
    pub dwell_ms: u64,

    /// Keep the drag alive this long after the last position, in milliseconds.
    #[arg(long, default_value_t = 0)]
    pub hold_ms: u64,
}
