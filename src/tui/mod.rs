// TUI module - interactive demo of the panel container
//
// Handles terminal setup and cleanup, and runs the event loop that feeds
// key presses and timer ticks into the app.

pub mod app;
pub mod stylesheet;
pub mod surface;
pub mod ui;

use crate::config::Config;
use crate::logging::LogBuffer;
use anyhow::{Context, Result};
use app::App;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::{Duration, Instant};

/// Run the demo until the user quits
pub async fn run_tui(log_buffer: LogBuffer, config: Config) -> Result<()> {
    // Set up terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let mut app = App::with_config(log_buffer, &config);
    tracing::info!(
        panels = config.slot_count(),
        forward = %config.presentation.transition.forward,
        backward = %config.presentation.transition.backward,
        "Demo started"
    );

    let result = run_event_loop(&mut terminal, &mut app, config.tick_ms).await;

    // Restore terminal
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Main event loop: key input and ticks, whichever comes first
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    tick_ms: u64,
) -> Result<()> {
    let mut tick_interval = tokio::time::interval(Duration::from_millis(tick_ms));

    loop {
        let now = Instant::now();
        terminal
            .draw(|f| ui::draw(f, app, now))
            .context("Failed to draw terminal")?;

        tokio::select! {
            // Keyboard input
            _ = async {
                if event::poll(Duration::from_millis(5)).unwrap_or(false) {
                    if let Ok(Event::Key(key_event)) = event::read() {
                        app.handle_key(key_event, Instant::now());
                    }
                }
            } => {}

            // Periodic tick: retire finished motions and redraw
            _ = tick_interval.tick() => {
                app.tick(Instant::now());
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
