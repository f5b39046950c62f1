//! SmartPark - Main entry point
//!
//! Launches the interactive dashboard, or runs a single lot operation
//! headlessly when a subcommand is given.

use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use ratatui::{backend::CrosstermBackend, Terminal};
use smartpark::cli::{Cli, Commands};
use smartpark::{
    App, DashboardView, DemoConfig, FileBlobStore, LotStore, SmartParkError, StatusLine,
    SystemClock,
};
use std::fs::OpenOptions;
use std::io::stdout;
use std::path::Path;
use std::sync::Mutex;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

type Lot = LotStore<FileBlobStore, ChaCha8Rng>;

/// Initialize the tracing subscriber.
///
/// The dashboard owns the terminal, so in TUI mode events go to
/// `<data_dir>/smartpark.log`; headless commands log to stderr.
fn init_logger(data_dir: &Path, tui: bool) -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(true)
        .with_line_number(true);

    if tui {
        std::fs::create_dir_all(data_dir)?;
        let log_file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(data_dir.join("smartpark.log"))?;
        builder
            .with_ansi(false)
            .with_writer(Mutex::new(log_file))
            .init();
    } else {
        builder.with_writer(std::io::stderr).init();
    }
    Ok(())
}

/// Load and validate the optional configuration file
fn load_config(cli: &Cli) -> smartpark::Result<DemoConfig> {
    let config = match &cli.config {
        Some(path) => DemoConfig::load_from_file(path),
        None => Ok(DemoConfig::default()),
    };
    config
        .and_then(|config| config.validate().map(|_| config))
        .map_err(|e| SmartParkError::config(format!("{:#}", e)))
}

/// Open the persisted lot under `--data-dir`
fn open_lot(cli: &Cli, config: &DemoConfig) -> smartpark::Result<Lot> {
    let store = FileBlobStore::open(&cli.data_dir)?;
    let rng = match cli.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    LotStore::open(store, rng, Box::new(SystemClock), config.lot_options())
}

/// Main application entry point
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse_args();
    let command = cli.command.clone().unwrap_or(Commands::Dashboard);

    // Config problems are reported before the terminal is touched
    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("✗ {}", e);
            std::process::exit(1);
        }
    };

    init_logger(&cli.data_dir, command == Commands::Dashboard)?;
    info!("SmartPark starting up");
    debug!(?command, data_dir = %cli.data_dir.display(), "CLI arguments parsed");

    let mut lot = match open_lot(&cli, &config) {
        Ok(lot) => lot,
        Err(e) => {
            error!("Failed to open parking lot: {}", e);
            eprintln!("✗ Failed to open parking lot: {}", e);
            std::process::exit(1);
        }
    };

    match command {
        Commands::Dashboard => run_dashboard(lot, &config)?,
        Commands::Status => {
            let kpis = lot.kpis();
            println!("Total capacity:  {}", kpis.capacity);
            println!("Occupied spots:  {}", kpis.occupied);
            println!("Available spots: {}", kpis.available);
            println!("Occupancy rate:  {}", kpis.occupancy_rate_display());
        }
        Commands::Occupy => {
            let result = lot.occupy_random_spot()?;
            println!("{}", result.message);
            if !result.success {
                std::process::exit(1);
            }
        }
        Commands::Release => {
            let result = lot.release_random_spot()?;
            println!("{}", result.message);
            if !result.success {
                std::process::exit(1);
            }
        }
        Commands::Reset => {
            let result = lot.reset()?;
            println!("{}", result.message);
        }
        Commands::Map => {
            let view = DashboardView::build(lot.spots(), lot.now_millis(), StatusLine::empty());
            print!("{}", view.to_text());
        }
    }

    Ok(())
}

/// Run the interactive dashboard
fn run_dashboard(lot: Lot, config: &DemoConfig) -> Result<(), Box<dyn std::error::Error>> {
    debug!("Initializing terminal for TUI mode");

    enable_raw_mode()
        .map_err(|e| SmartParkError::terminal(format!("Failed to enable raw mode: {}", e)))?;
    crossterm::execute!(stdout(), crossterm::terminal::EnterAlternateScreen).map_err(|e| {
        SmartParkError::terminal(format!("Failed to enter alternate screen: {}", e))
    })?;

    let result = match Terminal::new(CrosstermBackend::new(stdout())) {
        Ok(mut terminal) => {
            let mut app = App::new(lot, config.refresh_interval());
            app.run(&mut terminal)
        }
        Err(e) => Err(SmartParkError::terminal(format!(
            "Failed to create terminal: {}",
            e
        ))),
    };

    // Cleanup terminal (always attempt cleanup, even if app failed)
    let _ = disable_raw_mode();
    let _ = crossterm::execute!(stdout(), crossterm::terminal::LeaveAlternateScreen);

    if let Err(ref e) = result {
        error!("Dashboard exited with error: {}", e);
    } else {
        info!("Dashboard closed");
    }
    result.map_err(Into::into)
}
