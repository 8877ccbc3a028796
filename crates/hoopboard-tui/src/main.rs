// hoopboard entry point.
//
// Startup sequence:
// 1. Parse the command line
// 2. Load config (seeding config/ from defaults/ when missing)
// 3. Initialize tracing (log to file, not terminal)
// 4. Run the headless `rank` subcommand, or
// 5. Build the App, load the startup document or snapshot, and run the TUI

use std::path::Path;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};

use hoopboard_core::config::{self, LoggingConfig};
use hoopboard_tui::app::App;
use hoopboard_tui::cli::{Cli, Command};
use hoopboard_tui::protocol::StatusMessage;
use hoopboard_tui::tui;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let base_dir = cli.base_dir()?;
    let (config, source) =
        config::load_config(&base_dir).context("failed to load configuration")?;

    init_tracing(&config.logging)?;
    info!("hoopboard starting (base dir {})", base_dir.display());
    info!("config: {}", source);

    if let Some(Command::Rank(args)) = &cli.command {
        return args.execute(&config);
    }

    let mut app = App::new(config);
    if let Some(path) = &cli.snapshot {
        startup_load(&mut app, path, App::restore_snapshot);
    } else if let Some(path) = &cli.file {
        startup_load(&mut app, path, App::open_document);
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .context("failed to start runtime")?;
    if let Err(e) = runtime.block_on(tui::run(&mut app)) {
        error!("TUI error: {:#}", e);
        return Err(e);
    }

    info!("hoopboard shut down cleanly");
    Ok(())
}

/// Load the startup board. Failures land in the status line so the user can
/// open another file from inside the TUI.
fn startup_load(
    app: &mut App,
    path: &Path,
    load: fn(&mut App, &Path) -> anyhow::Result<usize>,
) {
    match load(app, path) {
        Ok(count) => {
            app.status = Some(StatusMessage::info(format!(
                "Loaded {} players from {}",
                count,
                path.display()
            )));
        }
        Err(e) => {
            error!("startup load failed: {:#}", e);
            app.status = Some(StatusMessage::error(format!("{:#}", e)));
        }
    }
}

/// Initialize tracing to log to a file (not the terminal, which is used by the TUI).
fn init_tracing(logging: &LoggingConfig) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = logging.resolve_dir();
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("failed to create log directory {}", log_dir.display()))?;

    let log_file = std::fs::File::create(log_dir.join("hoopboard.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&logging.filter)),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
