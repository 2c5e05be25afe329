//! Terminal User Interface Module
//!
//! Interactive terminal rendition of the citation dashboard.
//! Built with Ratatui; every panel is drawn from the shared page state.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  📚 Citation Analytics Dashboard        http://localhost:8000   │
//! ├─────────────────────────────────────────────────────────────────┤
//! │   Generate Data │ Most Cited │ Statistics                       │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  ┌─ Active panel ──────────────────────────────────────────┐   │
//! │  │  progress gauge / cache banner + table / cards + charts  │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │  [Enter] Cached [b] Database [Tab] Switch [F1] Help [q] Quit   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod app;
pub mod event;
pub mod theme;
pub mod ui;
pub mod widgets;

pub use app::{App, View};
pub use event::{AppAction, EventHandler};

use crate::api::DashboardApi;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{self, Stdout};
use std::sync::Arc;
use tracing::{error, info};

/// Type alias for our terminal backend
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Initialize the terminal for TUI mode
pub fn init_terminal() -> anyhow::Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to its original state
pub fn restore_terminal(terminal: &mut Tui) -> anyhow::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Run the TUI application
pub async fn run(config: crate::config::Config, api: Arc<dyn DashboardApi>) -> anyhow::Result<()> {
    info!(api = %config.api.base_url, "Starting TUI mode");

    let mut terminal = init_terminal()?;
    let mut app = App::new(&config, api);
    let mut events = EventHandler::new(std::time::Duration::from_millis(100));

    app.start();
    let result = run_app(&mut terminal, &mut app, &mut events).await;
    app.shutdown();

    if let Err(e) = restore_terminal(&mut terminal) {
        error!("Failed to restore terminal: {}", e);
    }

    result
}

/// Main application loop
async fn run_app(terminal: &mut Tui, app: &mut App, events: &mut EventHandler) -> anyhow::Result<()> {
    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        match events.next().await {
            Some(AppAction::Quit) => {
                let pending = app.in_flight();
                if pending > 0 {
                    info!(pending, "Quitting with requests in flight");
                }
                break;
            }
            Some(AppAction::ForceQuit) | None => break,
            Some(action) => app.handle_action(action),
        }

        if app.should_quit {
            break;
        }
    }

    info!("TUI exited normally");
    Ok(())
}
