use super::charts::ChartRenderer;
use crate::api::DashboardApi;
use crate::dom::{Dom, DomError, ElementId};
use crate::view::{Content, StatsPanel, StatusMessage};
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq)]
pub enum StatsOutcome {
    Rendered {
        topic_chart: bool,
        citations_chart: bool,
    },
    Failed(String),
}

/// Summary cards, distribution tables and the two charts.
pub struct StatsView {
    api: Arc<dyn DashboardApi>,
    dom: Arc<dyn Dom>,
    charts: ChartRenderer,
}

impl StatsView {
    pub fn new(api: Arc<dyn DashboardApi>, dom: Arc<dyn Dom>) -> Self {
        let charts = ChartRenderer::new(dom.clone());
        Self { api, dom, charts }
    }

    pub async fn load_stats(&self) -> Result<StatsOutcome, DomError> {
        self.dom
            .set_content(ElementId::StatsResult, Content::loading("Loading statistics..."))?;

        let summary = match self.api.stats().await {
            Ok(summary) => summary,
            Err(e) => {
                warn!("Loading statistics failed: {}", e);
                self.dom.set_content(
                    ElementId::StatsResult,
                    Content::Status(StatusMessage::error(&e)),
                )?;
                return Ok(StatsOutcome::Failed(e.to_string()));
            }
        };

        info!(
            total_papers = summary.total_papers,
            topics = summary.topic_distribution.len(),
            "Statistics loaded"
        );

        // Inserting the panel creates the canvases for its sections
        let panel = StatsPanel::from_summary(&summary);
        self.dom
            .set_content(ElementId::StatsResult, Content::Stats(panel))?;

        let topic_chart = !summary.topic_distribution.is_empty()
            && self.charts.render_topic_chart(&summary.topic_distribution);
        let citations_chart = !summary.most_cited_topics.is_empty()
            && self.charts.render_citations_chart(&summary.most_cited_topics);

        Ok(StatsOutcome::Rendered {
            topic_chart,
            citations_chart,
        })
    }
}
