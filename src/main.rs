mod app;
mod assets;
mod config;
mod error;
mod event;
mod host;
mod pet;
mod ui;

use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use color_eyre::eyre::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::info;

use crate::app::App;
use crate::assets::FrameStore;
use crate::config::Config;
use crate::error::FellaError;
use crate::event::EventHandler;
use crate::pet::{ScreenBounds, UniformPicker};

/// fella — an animated desktop companion that lives in your terminal
#[derive(Parser, Debug)]
#[command(name = "fella", version, about, long_about = None)]
struct Cli {
    /// Directory with idle.gif, left.gif, right.gif and drag.gif
    #[arg(short, long, default_value = "image")]
    assets: PathBuf,

    /// Behavior tick interval in milliseconds
    #[arg(short, long, default_value_t = config::TICK_INTERVAL_MS)]
    tick_rate: u64,

    /// Log file path (logging disabled if not specified)
    #[arg(short, long)]
    log: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize color-eyre with a panic hook that restores the terminal
    install_panic_hook();

    let config = Config {
        tick_rate: Duration::from_millis(cli.tick_rate),
        assets_dir: cli.assets.clone(),
        log_file: cli.log.clone(),
        ..Default::default()
    };

    let _log_guard = init_logging(&config.log_file);

    info!("fella starting");

    // Load frames before touching the terminal: a missing or corrupt asset
    // is fatal and should print like a normal CLI error
    let frames = match FrameStore::load(&config.assets_dir) {
        Ok(frames) => Arc::new(frames),
        Err(e) => {
            eprintln!("Failed to load sprite frames: {}", e);
            eprintln!(
                "Expected idle.gif, left.gif, right.gif and drag.gif in {}",
                config.assets_dir.display()
            );
            std::process::exit(1);
        }
    };

    // Setup terminal
    enable_raw_mode()
        .map_err(|e| FellaError::Terminal(format!("Failed to enable raw mode: {}", e)))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let size = terminal.size()?;
    let bounds = ScreenBounds::new(size.width as u32, size.height as u32);
    info!(width = bounds.width, height = bounds.height, "host surface ready");

    // Create event handler and app
    let mut event_handler = EventHandler::new(config.tick_rate, config.drag_frame_rate);
    let mut app = App::new(frames, bounds, Box::new(UniformPicker::new()));

    // ── Main event loop ───────────────────────────────────────────────
    loop {
        // Draw
        terminal.draw(|f| ui::draw(f, &app))?;

        // Handle events — one at a time, so ticks and pointer handlers
        // never interleave
        match event_handler.next().await {
            Some(event) => {
                app.handle_event(event);
                if app.should_quit {
                    break;
                }
            }
            None => break,
        }
    }

    // Restore terminal
    event_handler.stop();
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    info!("fella exiting");
    Ok(())
}

/// Install a panic hook that restores the terminal before printing the panic
fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Restore terminal
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        // Call default handler
        default_hook(panic_info);
    }));
    color_eyre::install().ok();
}

/// Initialize tracing to a log file. The TUI owns stdout, so without a log
/// path logging is disabled entirely. The returned guard must live for the
/// whole process to keep the non-blocking writer flushing.
fn init_logging(log_path: &Option<String>) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    use tracing_subscriber::EnvFilter;

    if let Some(ref path) = log_path {
        let file = match std::fs::File::create(path) {
            Ok(file) => file,
            Err(e) => {
                eprintln!("Failed to create log file {}: {}", path, e);
                std::process::exit(1);
            }
        };
        let (writer, guard) = tracing_appender::non_blocking(file);
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_writer(writer)
            .with_ansi(false)
            .init();
        Some(guard)
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new("off"))
            .with_writer(io::sink)
            .init();
        None
    }
}
