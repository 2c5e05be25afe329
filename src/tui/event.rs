//! Event Handling
//!
//! Maps keyboard and timer events to dashboard actions.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::{FutureExt, StreamExt};
use std::time::Duration;
use tokio::sync::mpsc;

/// Actions that can be performed in the dashboard
#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
    /// Quit the application
    Quit,
    /// Quit even if requests are in flight
    ForceQuit,
    /// Enter: the primary action of the active tab
    Submit,
    /// Start data generation from any tab
    Generate,
    /// Query the database directly, skipping the cache
    QueryBypass,
    /// Evict the cache entry for the current topic and limit
    ClearCache,
    ReloadStats,
    ClearDatabase,
    CheckHealth,
    NextTab,
    PrevTab,
    NextTopic,
    PrevTopic,
    /// Remove every visible toast
    DismissToasts,
    ToggleHelp,
    /// Close modals
    Escape,
    /// Keystroke for the limit input
    Input(KeyEvent),
    /// Timer tick for redraws
    Tick,
}

/// Event handler for the TUI
pub struct EventHandler {
    rx: mpsc::Receiver<AppAction>,
    _tx: mpsc::Sender<AppAction>,
}

impl EventHandler {
    /// Create a new event handler with specified tick rate
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::channel(100);
        let tx_clone = tx.clone();

        tokio::spawn(async move {
            let mut reader = crossterm::event::EventStream::new();
            let mut tick_interval = tokio::time::interval(tick_rate);

            loop {
                let tick = tick_interval.tick();
                let crossterm_event = reader.next().fuse();

                tokio::select! {
                    _ = tick => {
                        if tx_clone.send(AppAction::Tick).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(evt)) = crossterm_event => {
                        if let Some(action) = map_event(evt) {
                            if tx_clone.send(action).await.is_err() {
                                break;
                            }
                        }
                    }
                }
            }
        });

        Self { rx, _tx: tx }
    }

    /// Wait for the next action
    pub async fn next(&mut self) -> Option<AppAction> {
        self.rx.recv().await
    }
}

fn map_event(event: Event) -> Option<AppAction> {
    match event {
        // Windows reports releases too
        Event::Key(key) if key.kind == KeyEventKind::Press => map_key_event(key),
        Event::Resize(_, _) => Some(AppAction::Tick),
        _ => None,
    }
}

/// Map a key event to an app action
pub fn map_key_event(key: KeyEvent) -> Option<AppAction> {
    match (key.modifiers, key.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(AppAction::ForceQuit),
        (KeyModifiers::CONTROL, KeyCode::Char('q')) => Some(AppAction::Quit),

        (KeyModifiers::SHIFT, KeyCode::BackTab) | (KeyModifiers::NONE, KeyCode::BackTab) => {
            Some(AppAction::PrevTab)
        }
        (KeyModifiers::SHIFT, KeyCode::Char('D')) => Some(AppAction::ClearDatabase),

        (KeyModifiers::NONE, code) => match code {
            KeyCode::Esc => Some(AppAction::Escape),
            KeyCode::Enter => Some(AppAction::Submit),
            KeyCode::F(1) | KeyCode::Char('?') => Some(AppAction::ToggleHelp),
            KeyCode::Tab => Some(AppAction::NextTab),
            KeyCode::Right => Some(AppAction::NextTopic),
            KeyCode::Left => Some(AppAction::PrevTopic),
            KeyCode::Char('q') => Some(AppAction::Quit),
            KeyCode::Char('g') => Some(AppAction::Generate),
            KeyCode::Char('b') => Some(AppAction::QueryBypass),
            KeyCode::Char('x') => Some(AppAction::ClearCache),
            KeyCode::Char('r') => Some(AppAction::ReloadStats),
            KeyCode::Char('h') => Some(AppAction::CheckHealth),
            KeyCode::Char('d') => Some(AppAction::DismissToasts),
            KeyCode::Char(c) if c.is_ascii_digit() => Some(AppAction::Input(key)),
            KeyCode::Backspace | KeyCode::Delete => Some(AppAction::Input(key)),
            _ => None,
        },

        _ => None,
    }
}
