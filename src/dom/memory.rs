use super::{Dom, DomError, Element, ElementId, Tab};
use crate::config::UiConfig;
use crate::view::Content;
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Label the generate button shows when idle.
pub const GENERATE_LABEL: &str = "Generate Data";

/// In-memory page shared by the components and whichever front end draws it.
#[derive(Debug, Default)]
pub struct MemoryDom {
    elements: RwLock<HashMap<ElementId, Element>>,
}

impl MemoryDom {
    /// An empty page. Useful for exercising missing-element paths.
    pub fn new() -> Self {
        Self::default()
    }

    /// The full dashboard page with every element of the page contract.
    pub fn dashboard(ui: &UiConfig) -> Self {
        let dom = Self::new();

        dom.insert(
            ElementId::ToastContainer,
            Element::default().with_content(Content::Toasts(Vec::new())),
        );

        for tab in Tab::ALL {
            let active = tab == Tab::Generate;
            dom.insert(
                ElementId::TabPanel(tab),
                Element {
                    active,
                    ..Element::default()
                },
            );
            dom.insert(
                ElementId::TabButton(tab),
                Element {
                    active,
                    ..Element::button(tab.title())
                },
            );
        }

        dom.insert(ElementId::GenerateButton, Element::button(GENERATE_LABEL));
        dom.insert(ElementId::GenerateStatus, Element::hidden());
        dom.insert(
            ElementId::GenerateProgress,
            Element::hidden().with_content(Content::Progress(0)),
        );
        dom.insert(ElementId::TopicSelect, Element::input(ui.default_topic.clone()));
        dom.insert(
            ElementId::LimitInput,
            Element::input(ui.default_limit.to_string()),
        );
        dom.insert(ElementId::TopPapersResult, Element::default());
        dom.insert(ElementId::CacheIndicator, Element::hidden());
        dom.insert(ElementId::StatsResult, Element::default());

        dom
    }

    pub fn insert(&self, id: ElementId, element: Element) {
        self.write().insert(id, element);
    }

    pub fn remove(&self, id: ElementId) -> Option<Element> {
        self.write().remove(&id)
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<ElementId, Element>> {
        self.elements.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<ElementId, Element>> {
        self.elements.write().unwrap_or_else(|e| e.into_inner())
    }
}

/// Replacing the stats panel rebuilds its chart canvases, the way assigning
/// new markup discards the old drawing surfaces.
fn sync_chart_canvases(elements: &mut HashMap<ElementId, Element>, content: &Content) {
    let (topic, citations) = match content {
        Content::Stats(panel) => (panel.has_topic_section(), panel.has_citations_section()),
        _ => (false, false),
    };

    for (id, present) in [
        (ElementId::TopicChart, topic),
        (ElementId::CitationsChart, citations),
    ] {
        if present {
            elements.insert(id, Element::default());
        } else {
            elements.remove(&id);
        }
    }
}

impl Dom for MemoryDom {
    fn contains(&self, id: ElementId) -> bool {
        self.read().contains_key(&id)
    }

    fn element(&self, id: ElementId) -> Option<Element> {
        self.read().get(&id).cloned()
    }

    fn update(&self, id: ElementId, f: &mut dyn FnMut(&mut Element)) -> Result<(), DomError> {
        let mut elements = self.write();
        let element = elements
            .get_mut(&id)
            .ok_or(DomError::ElementNotFound(id))?;

        if id != ElementId::StatsResult {
            f(element);
            return Ok(());
        }

        let before = element.content.clone();
        f(element);
        if element.content != before {
            let content = element.content.clone();
            sync_chart_canvases(&mut elements, &content);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CitedTopicEntry, StatsSummary, TopicDistributionEntry};
    use crate::view::{ChartSpec, StatsPanel};

    fn panel(topics: bool, cited: bool) -> StatsPanel {
        let summary = StatsSummary {
            total_papers: 1,
            total_citations: 1,
            average_citations_per_paper: 1.0,
            topic_distribution: if topics {
                vec![TopicDistributionEntry {
                    topic: "AI".to_string(),
                    count: 1,
                }]
            } else {
                vec![]
            },
            most_cited_topics: if cited {
                vec![CitedTopicEntry {
                    topic: "AI".to_string(),
                    citation_count: 1,
                }]
            } else {
                vec![]
            },
            year_distribution: vec![],
        };
        StatsPanel::from_summary(&summary)
    }

    #[test]
    fn test_dashboard_exposes_page_contract() {
        let dom = MemoryDom::dashboard(&UiConfig::default());
        for id in [
            ElementId::ToastContainer,
            ElementId::GenerateButton,
            ElementId::GenerateStatus,
            ElementId::GenerateProgress,
            ElementId::TopicSelect,
            ElementId::LimitInput,
            ElementId::TopPapersResult,
            ElementId::CacheIndicator,
            ElementId::StatsResult,
        ] {
            assert!(dom.contains(id), "missing {}", id);
        }
        assert!(!dom.contains(ElementId::TopicChart));
        assert_eq!(dom.value(ElementId::LimitInput).unwrap(), "10");
        assert_eq!(
            dom.element(ElementId::GenerateButton).unwrap().label.as_deref(),
            Some(GENERATE_LABEL)
        );
    }

    #[test]
    fn test_missing_element_is_an_error() {
        let dom = MemoryDom::new();
        assert_eq!(
            dom.set_visible(ElementId::CacheIndicator, true),
            Err(DomError::ElementNotFound(ElementId::CacheIndicator))
        );
    }

    #[test]
    fn test_stats_content_creates_and_drops_canvases() {
        let dom = MemoryDom::dashboard(&UiConfig::default());

        dom.set_content(ElementId::StatsResult, Content::Stats(panel(true, false)))
            .unwrap();
        assert!(dom.contains(ElementId::TopicChart));
        assert!(!dom.contains(ElementId::CitationsChart));

        dom.set_content(ElementId::StatsResult, Content::loading("Loading"))
            .unwrap();
        assert!(!dom.contains(ElementId::TopicChart));
    }

    #[test]
    fn test_new_stats_content_clears_old_drawing() {
        let dom = MemoryDom::dashboard(&UiConfig::default());
        dom.set_content(ElementId::StatsResult, Content::Stats(panel(true, true)))
            .unwrap();
        dom.set_content(
            ElementId::TopicChart,
            Content::Chart(ChartSpec::topic_doughnut(&[])),
        )
        .unwrap();

        // Visibility changes keep the drawing
        dom.set_visible(ElementId::StatsResult, true).unwrap();
        assert!(matches!(
            dom.content(ElementId::TopicChart),
            Some(Content::Chart(_))
        ));

        dom.set_content(ElementId::StatsResult, Content::Stats(panel(true, false)))
            .unwrap();
        assert_eq!(dom.content(ElementId::TopicChart), Some(Content::Empty));
    }
}
