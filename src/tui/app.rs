//! Application State
//!
//! Owns the wired dashboard and the terminal-only input state (topic
//! selection, limit input, help overlay). Backend work runs on spawned
//! tasks so the draw loop never waits on the network.

use crate::api::DashboardApi;
use crate::components::{Dashboard, QueryMode};
use crate::config::{Config, TOPICS};
use crate::dom::{Dom, ElementId, Tab};
use crate::tui::event::AppAction;
use crate::view::Severity;
use crossterm::event::KeyCode;
use std::future::Future;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};
use tui_textarea::TextArea;

/// Current view/screen
#[derive(Debug, Clone, PartialEq, Default)]
pub enum View {
    #[default]
    Dashboard,
    Help,
}

/// Main application state
pub struct App {
    pub dashboard: Arc<Dashboard>,
    pub api_url: String,

    // UI State
    pub view: View,
    pub should_quit: bool,

    // Top papers controls
    pub topic_index: usize,
    pub limit_input: TextArea<'static>,

    pending: Vec<JoinHandle<()>>,
}

impl App {
    /// Create a new application instance
    pub fn new(config: &Config, api: Arc<dyn DashboardApi>) -> Self {
        let dashboard = Arc::new(Dashboard::new(config, api));

        let topic_index = TOPICS
            .iter()
            .position(|t| *t == config.ui.default_topic)
            .unwrap_or(0);

        let mut limit_input = TextArea::new(vec![config.ui.default_limit.to_string()]);
        limit_input.set_cursor_line_style(ratatui::style::Style::default());
        limit_input.move_cursor(tui_textarea::CursorMove::End);

        let app = Self {
            dashboard,
            api_url: config.api.base_url.clone(),
            view: View::Dashboard,
            should_quit: false,
            topic_index,
            limit_input,
            pending: Vec::new(),
        };
        app.sync_topic();
        app
    }

    /// Kick off the initial statistics load.
    pub fn start(&mut self) {
        self.spawn("load_stats", |d| async move {
            if let Err(e) = d.stats.load_stats().await {
                error!("Initial statistics load failed: {}", e);
            }
        });
    }

    pub fn active_tab(&self) -> Tab {
        self.dashboard.tabs.active_tab().unwrap_or(Tab::Generate)
    }

    pub fn topic(&self) -> &'static str {
        TOPICS[self.topic_index % TOPICS.len()]
    }

    pub fn limit_text(&self) -> String {
        self.limit_input.lines().join("")
    }

    /// Number of spawned actions that have not finished yet.
    pub fn in_flight(&mut self) -> usize {
        self.pending.retain(|h| !h.is_finished());
        self.pending.len()
    }

    /// Abort outstanding requests and cancel every timer.
    pub fn shutdown(&mut self) {
        for handle in self.pending.drain(..) {
            handle.abort();
        }
        self.dashboard.shutdown();
    }

    /// Handle a user action
    pub fn handle_action(&mut self, action: AppAction) {
        match action {
            AppAction::Quit | AppAction::ForceQuit => {
                self.should_quit = true;
            }
            AppAction::ToggleHelp => {
                self.view = if self.view == View::Help {
                    View::Dashboard
                } else {
                    View::Help
                };
            }
            AppAction::Escape => {
                self.view = View::Dashboard;
            }
            AppAction::Tick => {
                self.pending.retain(|h| !h.is_finished());
            }
            // The help overlay swallows everything else
            _ if self.view == View::Help => {
                self.view = View::Dashboard;
            }
            AppAction::NextTab => self.switch_tab(self.active_tab().next()),
            AppAction::PrevTab => self.switch_tab(self.active_tab().previous()),
            AppAction::Submit => match self.active_tab() {
                Tab::Generate => self.generate(),
                Tab::TopPapers => self.query(QueryMode::Cached),
                Tab::Stats => self.reload_stats(),
            },
            AppAction::Generate => self.generate(),
            AppAction::QueryBypass => {
                if self.active_tab() == Tab::TopPapers {
                    self.query(QueryMode::Bypass);
                }
            }
            AppAction::ClearCache => self.clear_cache(),
            AppAction::ReloadStats => self.reload_stats(),
            AppAction::ClearDatabase => {
                self.spawn("clear_database", |d| async move {
                    d.maintenance.clear_database().await;
                });
            }
            AppAction::CheckHealth => {
                self.spawn("check_health", |d| async move {
                    d.maintenance.check_health().await;
                });
            }
            AppAction::NextTopic => self.cycle_topic(1),
            AppAction::PrevTopic => self.cycle_topic(TOPICS.len() - 1),
            AppAction::DismissToasts => {
                for toast in self.dashboard.notifier.visible() {
                    self.dashboard.notifier.dismiss(toast.id);
                }
            }
            AppAction::Input(key) => self.edit_limit(key),
        }
    }

    fn spawn<F, Fut>(&mut self, action: &'static str, task: F)
    where
        F: FnOnce(Arc<Dashboard>) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        debug!(action, "Dispatching");
        self.pending.push(tokio::spawn(task(self.dashboard.clone())));
    }

    fn switch_tab(&mut self, tab: Tab) {
        if let Err(e) = self.dashboard.tabs.activate(tab, None) {
            error!("Tab switch failed: {}", e);
        }
    }

    fn generate(&mut self) {
        self.spawn("generate", |d| async move {
            if let Err(e) = d.generator.generate().await {
                error!("Generate failed: {}", e);
            }
        });
    }

    fn query(&mut self, mode: QueryMode) {
        self.sync_limit();
        self.spawn("top_papers", move |d| async move {
            if let Err(e) = d.papers.query_from_inputs(mode).await {
                error!("Top papers query failed: {}", e);
            }
        });
    }

    fn reload_stats(&mut self) {
        self.spawn("load_stats", |d| async move {
            if let Err(e) = d.stats.load_stats().await {
                error!("Statistics reload failed: {}", e);
            }
        });
    }

    fn clear_cache(&mut self) {
        let topic = self.topic();
        let limit = match self.limit_text().parse::<u32>() {
            Ok(limit) => limit,
            Err(_) => {
                warn!(limit = %self.limit_text(), "Refusing to clear cache for invalid limit");
                self.dashboard
                    .notifier
                    .notify("Enter a valid limit first", Severity::Warning);
                return;
            }
        };
        self.spawn("clear_cache", move |d| async move {
            d.maintenance.clear_cache(topic, limit).await;
        });
    }

    fn cycle_topic(&mut self, step: usize) {
        if self.active_tab() != Tab::TopPapers {
            return;
        }
        self.topic_index = (self.topic_index + step) % TOPICS.len();
        info!(topic = self.topic(), "Topic selected");
        self.sync_topic();
    }

    fn edit_limit(&mut self, key: crossterm::event::KeyEvent) {
        if self.active_tab() != Tab::TopPapers {
            return;
        }
        let accepted = match key.code {
            KeyCode::Char(c) => c.is_ascii_digit() && self.limit_text().len() < 3,
            KeyCode::Backspace | KeyCode::Delete => true,
            _ => false,
        };
        if accepted {
            self.limit_input.input(key);
            self.sync_limit();
        }
    }

    fn sync_topic(&self) {
        if let Err(e) = self.dashboard.dom.set_value(ElementId::TopicSelect, self.topic()) {
            error!("Topic select missing: {}", e);
        }
    }

    fn sync_limit(&self) {
        if let Err(e) = self
            .dashboard
            .dom
            .set_value(ElementId::LimitInput, &self.limit_text())
        {
            error!("Limit input missing: {}", e);
        }
    }

    #[cfg(test)]
    async fn settle(&mut self) {
        for handle in self.pending.drain(..) {
            let _ = handle.await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::StubApi;
    use crate::view::Content;
    use crossterm::event::{KeyEvent, KeyModifiers};

    fn app() -> (App, Arc<StubApi>) {
        let api = Arc::new(StubApi::default());
        (App::new(&Config::default(), api.clone()), api)
    }

    fn digit(c: char) -> AppAction {
        AppAction::Input(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
    }

    #[tokio::test]
    async fn test_tab_cycle_updates_page() {
        let (mut app, _) = app();
        assert_eq!(app.active_tab(), Tab::Generate);

        app.handle_action(AppAction::NextTab);
        assert_eq!(app.active_tab(), Tab::TopPapers);
        app.handle_action(AppAction::PrevTab);
        app.handle_action(AppAction::PrevTab);
        assert_eq!(app.active_tab(), Tab::Stats);
    }

    #[tokio::test]
    async fn test_enter_on_top_papers_runs_cached_query() {
        let (mut app, api) = app();
        app.handle_action(AppAction::NextTab);
        app.handle_action(AppAction::NextTopic);
        app.handle_action(AppAction::Input(KeyEvent::new(
            KeyCode::Backspace,
            KeyModifiers::NONE,
        )));
        app.handle_action(digit('5'));
        assert_eq!(app.limit_text(), "15");

        app.handle_action(AppAction::Submit);
        app.settle().await;

        assert_eq!(api.calls(), vec!["top_papers:Machine Learning:15".to_string()]);
        assert!(matches!(
            app.dashboard.dom.content(ElementId::TopPapersResult),
            Some(Content::Papers(_))
        ));
    }

    #[tokio::test]
    async fn test_topic_and_limit_ignored_off_tab() {
        let (mut app, _) = app();
        app.handle_action(AppAction::NextTopic);
        app.handle_action(digit('9'));
        assert_eq!(app.topic(), "AI");
        assert_eq!(app.limit_text(), "10");
    }

    #[tokio::test]
    async fn test_help_swallows_actions() {
        let (mut app, api) = app();
        app.handle_action(AppAction::ToggleHelp);
        app.handle_action(AppAction::Generate);
        app.settle().await;

        assert_eq!(app.view, View::Dashboard);
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_clear_cache_with_empty_limit_warns() {
        let (mut app, api) = app();
        app.handle_action(AppAction::NextTab);
        let backspace = AppAction::Input(KeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE));
        app.handle_action(backspace.clone());
        app.handle_action(backspace);

        app.handle_action(AppAction::ClearCache);
        app.settle().await;

        assert!(api.calls().is_empty());
        assert_eq!(
            app.dashboard.notifier.visible()[0].severity,
            Severity::Warning
        );
    }

    #[tokio::test]
    async fn test_shutdown_stops_scheduler() {
        let (mut app, _) = app();
        app.start();
        app.shutdown();
        assert!(app.dashboard.scheduler.is_shut_down());
        assert_eq!(app.in_flight(), 0);
    }
}
