use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// SmartPark - parking lot occupancy dashboard
#[derive(Parser, Debug)]
#[command(name = "smartpark")]
#[command(about = "A parking lot occupancy dashboard with a simulated 100-spot lot")]
#[command(version)]
pub struct Cli {
    /// Directory holding the persisted lot and the TUI log file
    #[arg(long, global = true, default_value = ".smartpark")]
    pub data_dir: PathBuf,

    /// JSON configuration file (storage key, refresh interval, initial occupancy)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Seed for spot selection and plate generation, for reproducible runs
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Run the interactive dashboard (default)
    Dashboard,
    /// Print capacity, occupied, available and occupancy rate
    Status,
    /// Park a car on a random free spot
    Occupy,
    /// Free a random occupied spot
    Release,
    /// Empty the lot
    Reset,
    /// Print the spot grid and the details of every occupied spot
    Map,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
