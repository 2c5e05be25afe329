use crate::dom::{Dom, ElementId};
use crate::types::{CitedTopicEntry, TopicDistributionEntry};
use crate::view::{ChartSpec, Content};
use std::sync::Arc;
use tracing::debug;

/// Draws the statistics charts onto their canvases.
///
/// The canvases only exist while the statistics panel shows the matching
/// section, so both renderers quietly do nothing when theirs is missing.
pub struct ChartRenderer {
    dom: Arc<dyn Dom>,
}

impl ChartRenderer {
    pub fn new(dom: Arc<dyn Dom>) -> Self {
        Self { dom }
    }

    /// Doughnut of papers per topic. Returns whether anything was drawn.
    pub fn render_topic_chart(&self, entries: &[TopicDistributionEntry]) -> bool {
        self.draw(ElementId::TopicChart, ChartSpec::topic_doughnut(entries))
    }

    /// Bar chart of citations per topic. Returns whether anything was drawn.
    pub fn render_citations_chart(&self, entries: &[CitedTopicEntry]) -> bool {
        self.draw(ElementId::CitationsChart, ChartSpec::citations_bar(entries))
    }

    fn draw(&self, canvas: ElementId, spec: ChartSpec) -> bool {
        match self.dom.set_content(canvas, Content::Chart(spec)) {
            Ok(()) => true,
            Err(e) => {
                debug!("Skipping chart: {}", e);
                false
            }
        }
    }
}
