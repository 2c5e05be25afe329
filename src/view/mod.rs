//! View Models
//!
//! Structured content the components place into page elements. The HTML
//! snapshot and the terminal dashboard both render from these types, so the
//! formatting decisions (ranks, percentages, banner state) live here once.

pub mod chart;
pub mod papers;
pub mod stats;

pub use chart::{ChartKind, ChartSpec, TickFormat};
pub use papers::{BannerState, CacheBanner, PaperRow, PapersTable};
pub use stats::{CitedTopicRow, StatCard, StatsPanel, TopicShareRow, YearRow};

/// Message severity, shared by toasts and inline status lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    /// CSS class used by the HTML snapshot.
    pub fn css_class(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.css_class())
    }
}

/// A transient notification in the toast container.
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub severity: Severity,
    /// Set once the exit animation has started
    pub leaving: bool,
}

/// An inline status line, optionally with a bold headline.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusMessage {
    pub severity: Severity,
    pub headline: Option<String>,
    pub text: String,
}

impl StatusMessage {
    pub fn new(severity: Severity, text: impl Into<String>) -> Self {
        Self {
            severity,
            headline: None,
            text: text.into(),
        }
    }

    pub fn with_headline(mut self, headline: impl Into<String>) -> Self {
        self.headline = Some(headline.into());
        self
    }

    pub fn error(text: impl std::fmt::Display) -> Self {
        Self::new(Severity::Error, format!("Error: {}", text))
    }
}

/// What an element currently displays.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Content {
    #[default]
    Empty,
    Loading(String),
    Status(StatusMessage),
    Progress(u8),
    Banner(CacheBanner),
    Papers(PapersTable),
    Stats(StatsPanel),
    Toasts(Vec<Toast>),
    Chart(ChartSpec),
}

impl Content {
    pub fn loading(text: impl Into<String>) -> Self {
        Content::Loading(text.into())
    }

    pub fn status(severity: Severity, text: impl Into<String>) -> Self {
        Content::Status(StatusMessage::new(severity, text))
    }
}
