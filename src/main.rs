// panelswap - interactive demo and headless runner for the panel container
//
// Without arguments the terminal demo runs; `script` drives the same
// container headlessly and `config` manages the config file.

use anyhow::Result;
use panelswap::cli::{self, Dispatch};
use panelswap::config::{Config, LogRotation};
use panelswap::effects::EffectRegistry;
use panelswap::logging::{LogBuffer, TuiLogLayer};
use panelswap::tui;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Set up tracing: TUI buffer or stderr, plus an optional rolling JSON file
///
/// The returned guard must be kept alive for the file writer to flush.
fn init_logging(
    config: &Config,
    log_buffer: &LogBuffer,
    tui_mode: bool,
) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    // Precedence: RUST_LOG env var > config file > default "info"
    let default_filter = format!("panelswap={}", config.logging.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    let console_layer = if tui_mode {
        TuiLogLayer::new(log_buffer.clone()).boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .boxed()
    };

    if !config.logging.file_enabled {
        tracing_subscriber::registry()
            .with(filter)
            .with(console_layer)
            .init();
        return None;
    }

    if let Err(e) = std::fs::create_dir_all(&config.logging.file_dir) {
        eprintln!(
            "Warning: Could not create log directory {:?}: {}",
            config.logging.file_dir, e
        );
        // Fall back to non-file logging
        tracing_subscriber::registry()
            .with(filter)
            .with(console_layer)
            .init();
        return None;
    }

    let file_appender = match config.logging.file_rotation {
        LogRotation::Hourly => {
            tracing_appender::rolling::hourly(&config.logging.file_dir, &config.logging.file_prefix)
        }
        LogRotation::Daily => {
            tracing_appender::rolling::daily(&config.logging.file_dir, &config.logging.file_prefix)
        }
        LogRotation::Never => {
            tracing_appender::rolling::never(&config.logging.file_dir, &config.logging.file_prefix)
        }
    };

    // Writes happen on a background thread
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(non_blocking)
                .with_ansi(false),
        )
        .init();

    Some(guard)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Handle config subcommands first; they exit early
    let dispatch = cli::handle_cli()?;
    if let Dispatch::Handled = dispatch {
        return Ok(());
    }

    // Ensure config template exists (helps users discover options)
    Config::ensure_config_exists();

    let config = Config::from_env()?;

    let log_buffer = LogBuffer::new();
    let tui_mode = matches!(dispatch, Dispatch::Demo);
    let _file_guard = init_logging(&config, &log_buffer, tui_mode);

    for name in config
        .presentation
        .transition
        .unresolved(EffectRegistry::builtin())
    {
        tracing::warn!(
            effect = name,
            "Unknown effect name; slots will get no directional classes and transitions will not complete"
        );
    }

    match dispatch {
        Dispatch::Script { steps, json } => cli::run_script(&config, &steps, json),
        Dispatch::Demo => tui::run_tui(log_buffer, config).await,
        Dispatch::Handled => Ok(()),
    }
}
