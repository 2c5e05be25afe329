//! Page Abstraction
//!
//! Components never touch a concrete screen. They address elements by a
//! stable [`ElementId`] through the [`Dom`] trait, and the front ends (TUI,
//! HTML snapshot) read the resulting element state back out.

pub mod memory;

pub use memory::MemoryDom;

use crate::view::Content;
use thiserror::Error;

/// Dashboard tabs, keyed by stable identifiers rather than display text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tab {
    Generate,
    TopPapers,
    Stats,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Generate, Tab::TopPapers, Tab::Stats];

    pub fn id(&self) -> &'static str {
        match self {
            Tab::Generate => "generate",
            Tab::TopPapers => "top-papers",
            Tab::Stats => "stats",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Generate => "Generate Data",
            Tab::TopPapers => "Most Cited",
            Tab::Stats => "Statistics",
        }
    }

    pub fn next(&self) -> Tab {
        match self {
            Tab::Generate => Tab::TopPapers,
            Tab::TopPapers => Tab::Stats,
            Tab::Stats => Tab::Generate,
        }
    }

    pub fn previous(&self) -> Tab {
        match self {
            Tab::Generate => Tab::Stats,
            Tab::TopPapers => Tab::Generate,
            Tab::Stats => Tab::TopPapers,
        }
    }
}

impl std::str::FromStr for Tab {
    type Err = DomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tab::ALL
            .into_iter()
            .find(|tab| tab.id() == s)
            .ok_or_else(|| DomError::UnknownTab(s.to_string()))
    }
}

impl std::fmt::Display for Tab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// Every element the page contract exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementId {
    ToastContainer,
    TabPanel(Tab),
    TabButton(Tab),
    GenerateButton,
    GenerateStatus,
    GenerateProgress,
    TopicSelect,
    LimitInput,
    TopPapersResult,
    CacheIndicator,
    StatsResult,
    TopicChart,
    CitationsChart,
}

impl ElementId {
    /// The `id` attribute used in the HTML snapshot.
    pub fn html_id(&self) -> String {
        match self {
            ElementId::ToastContainer => "toast-container".to_string(),
            ElementId::TabPanel(tab) => format!("{}-tab", tab.id()),
            ElementId::TabButton(tab) => format!("{}-btn", tab.id()),
            ElementId::GenerateButton => "generate-btn".to_string(),
            ElementId::GenerateStatus => "generate-status".to_string(),
            ElementId::GenerateProgress => "generate-progress".to_string(),
            ElementId::TopicSelect => "topic-select".to_string(),
            ElementId::LimitInput => "limit-input".to_string(),
            ElementId::TopPapersResult => "top-papers-result".to_string(),
            ElementId::CacheIndicator => "cache-indicator".to_string(),
            ElementId::StatsResult => "stats-result".to_string(),
            ElementId::TopicChart => "topicChart".to_string(),
            ElementId::CitationsChart => "citationsChart".to_string(),
        }
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.html_id())
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum DomError {
    #[error("Element not found: {0}")]
    ElementNotFound(ElementId),

    #[error("Unknown tab: {0}")]
    UnknownTab(String),
}

/// State of a single element.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub visible: bool,
    pub enabled: bool,
    pub active: bool,
    /// Button caption
    pub label: Option<String>,
    /// Current value of an input or select
    pub value: String,
    pub content: Content,
}

impl Default for Element {
    fn default() -> Self {
        Self {
            visible: true,
            enabled: true,
            active: false,
            label: None,
            value: String::new(),
            content: Content::Empty,
        }
    }
}

impl Element {
    pub fn hidden() -> Self {
        Self {
            visible: false,
            ..Self::default()
        }
    }

    pub fn button(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..Self::default()
        }
    }

    pub fn input(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..Self::default()
        }
    }

    pub fn with_content(mut self, content: Content) -> Self {
        self.content = content;
        self
    }
}

/// The injected page. Implementations must be cheap to share between tasks.
pub trait Dom: Send + Sync {
    fn contains(&self, id: ElementId) -> bool;

    /// Copy of the element's current state.
    fn element(&self, id: ElementId) -> Option<Element>;

    /// Mutate an element in place.
    fn update(&self, id: ElementId, f: &mut dyn FnMut(&mut Element)) -> Result<(), DomError>;

    fn set_content(&self, id: ElementId, content: Content) -> Result<(), DomError> {
        let mut content = Some(content);
        self.update(id, &mut |el: &mut Element| {
            if let Some(c) = content.take() {
                el.content = c;
            }
        })
    }

    fn set_visible(&self, id: ElementId, visible: bool) -> Result<(), DomError> {
        self.update(id, &mut |el: &mut Element| el.visible = visible)
    }

    fn set_enabled(&self, id: ElementId, enabled: bool) -> Result<(), DomError> {
        self.update(id, &mut |el: &mut Element| el.enabled = enabled)
    }

    fn set_active(&self, id: ElementId, active: bool) -> Result<(), DomError> {
        self.update(id, &mut |el: &mut Element| el.active = active)
    }

    fn set_label(&self, id: ElementId, label: &str) -> Result<(), DomError> {
        self.update(id, &mut |el: &mut Element| el.label = Some(label.to_string()))
    }

    fn set_value(&self, id: ElementId, value: &str) -> Result<(), DomError> {
        self.update(id, &mut |el: &mut Element| el.value = value.to_string())
    }

    fn value(&self, id: ElementId) -> Result<String, DomError> {
        self.element(id)
            .map(|el| el.value)
            .ok_or(DomError::ElementNotFound(id))
    }

    fn content(&self, id: ElementId) -> Option<Content> {
        self.element(id).map(|el| el.content)
    }
}
