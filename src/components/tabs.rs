use crate::dom::{Dom, DomError, ElementId, Tab};
use std::sync::Arc;
use tracing::debug;

/// Switches the visible panel and the highlighted tab button.
pub struct TabController {
    dom: Arc<dyn Dom>,
}

impl TabController {
    pub fn new(dom: Arc<dyn Dom>) -> Self {
        Self { dom }
    }

    /// Activate `tab`, highlighting `source` if given, otherwise the tab's own
    /// button. Fails when the page has no panel for the tab.
    pub fn activate(&self, tab: Tab, source: Option<ElementId>) -> Result<(), DomError> {
        let panel = ElementId::TabPanel(tab);
        if !self.dom.contains(panel) {
            return Err(DomError::ElementNotFound(panel));
        }

        for other in Tab::ALL {
            for id in [ElementId::TabPanel(other), ElementId::TabButton(other)] {
                if self.dom.contains(id) {
                    self.dom.set_active(id, false)?;
                }
            }
        }

        self.dom.set_active(panel, true)?;

        let button = source.unwrap_or(ElementId::TabButton(tab));
        if let Err(e) = self.dom.set_active(button, true) {
            debug!(%tab, "No button to highlight: {}", e);
        }

        debug!(%tab, "Tab activated");
        Ok(())
    }

    /// Activate a tab by its string identifier (`generate`, `top-papers`, `stats`).
    pub fn activate_by_id(&self, id: &str) -> Result<Tab, DomError> {
        let tab: Tab = id.parse()?;
        self.activate(tab, None)?;
        Ok(tab)
    }

    pub fn active_tab(&self) -> Option<Tab> {
        Tab::ALL.into_iter().find(|tab| {
            self.dom
                .element(ElementId::TabPanel(*tab))
                .map(|el| el.active)
                .unwrap_or(false)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UiConfig;
    use crate::dom::MemoryDom;

    fn setup() -> (Arc<MemoryDom>, TabController) {
        let dom = Arc::new(MemoryDom::dashboard(&UiConfig::default()));
        let tabs = TabController::new(dom.clone());
        (dom, tabs)
    }

    fn active(dom: &MemoryDom, id: ElementId) -> bool {
        dom.element(id).unwrap().active
    }

    #[test]
    fn test_activate_switches_panel_and_button() {
        let (dom, tabs) = setup();
        tabs.activate(Tab::Stats, None).unwrap();

        assert!(active(&dom, ElementId::TabPanel(Tab::Stats)));
        assert!(active(&dom, ElementId::TabButton(Tab::Stats)));
        for tab in [Tab::Generate, Tab::TopPapers] {
            assert!(!active(&dom, ElementId::TabPanel(tab)));
            assert!(!active(&dom, ElementId::TabButton(tab)));
        }
        assert_eq!(tabs.active_tab(), Some(Tab::Stats));
    }

    #[test]
    fn test_activate_highlights_source_control() {
        let (dom, tabs) = setup();
        tabs.activate(Tab::TopPapers, Some(ElementId::TabButton(Tab::Stats)))
            .unwrap();

        assert!(active(&dom, ElementId::TabPanel(Tab::TopPapers)));
        assert!(active(&dom, ElementId::TabButton(Tab::Stats)));
        assert!(!active(&dom, ElementId::TabButton(Tab::TopPapers)));
    }

    #[test]
    fn test_missing_panel_is_element_not_found() {
        let (dom, tabs) = setup();
        dom.remove(ElementId::TabPanel(Tab::Stats));

        assert_eq!(
            tabs.activate(Tab::Stats, None),
            Err(DomError::ElementNotFound(ElementId::TabPanel(Tab::Stats)))
        );
        // Nothing was deactivated
        assert_eq!(tabs.active_tab(), Some(Tab::Generate));
    }

    #[test]
    fn test_activate_by_id() {
        let (_dom, tabs) = setup();
        assert_eq!(tabs.activate_by_id("top-papers").unwrap(), Tab::TopPapers);
        assert!(matches!(
            tabs.activate_by_id("settings"),
            Err(DomError::UnknownTab(_))
        ));
    }
}
