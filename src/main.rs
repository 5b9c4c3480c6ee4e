// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::{Context, Result};
use std::env;

use hotel_reservations::{list_reservations, AppConfig, ReservationStore};

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let config = AppConfig::load()?;

    if args.len() > 1 && args[1] == "list" {
        // Listing mode
        run_list(&config)?;
    } else {
        // UI mode (default)
        run_ui_mode(&config)?;
    }

    Ok(())
}

fn run_list(config: &AppConfig) -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(config.level()?)
        .with_writer(std::io::stderr)
        .init();

    let (store, load_error) = ReservationStore::open_or_empty(&config.data_file);
    if let Some(err) = load_error {
        eprintln!("❌ Failed to load {}: {}", config.data_file.display(), err);
        return Ok(());
    }

    println!("{}", list_reservations(&store));
    Ok(())
}

#[cfg(feature = "tui")]
fn run_ui_mode(config: &AppConfig) -> Result<()> {
    use std::fs::OpenOptions;
    use std::sync::Mutex;

    // The form owns the terminal, so logs go to a file
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)
        .with_context(|| format!("Failed to open log file {}", config.log_file.display()))?;

    tracing_subscriber::fmt()
        .with_max_level(config.level()?)
        .with_ansi(false)
        .with_writer(Mutex::new(log_file))
        .init();

    // A load failure is shown in the form instead of aborting startup
    let (store, load_error) = ReservationStore::open_or_empty(&config.data_file);

    let mut app = ui::App::new(store);
    if let Some(err) = load_error {
        app.report_load_error(&err);
    }
    ui::run_ui(&mut app)?;

    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode(_config: &AppConfig) -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or list reservations: cargo run -- list");
    std::process::exit(1);
}
