use super::html::render_page;
use crate::components::{Dashboard, QueryMode, QueryOutcome, StatsOutcome};
use crate::dom::{Dom, ElementId, Tab};
use crate::types::AppResult;
use chrono::Utc;
use std::path::Path;
use tracing::{info, warn};

/// Optional top papers query to include in a snapshot.
#[derive(Debug, Clone)]
pub struct SnapshotQuery {
    pub topic: String,
    pub limit: u32,
    pub mode: QueryMode,
}

/// Load the dashboard data into the page and render it.
///
/// Backend failures end up inline on the page like they would in a browser,
/// so a snapshot is produced even when the backend is down.
pub async fn capture(dashboard: &Dashboard, query: Option<&SnapshotQuery>) -> AppResult<String> {
    if let StatsOutcome::Failed(e) = dashboard.stats.load_stats().await? {
        warn!("Snapshot without statistics: {}", e);
    }

    let mut focus = Tab::Stats;
    if let Some(query) = query {
        dashboard.dom.set_value(ElementId::TopicSelect, &query.topic)?;
        dashboard
            .dom
            .set_value(ElementId::LimitInput, &query.limit.to_string())?;
        let outcome = dashboard.papers.query_from_inputs(query.mode).await?;
        if let QueryOutcome::Failed(e) = outcome {
            warn!(topic = %query.topic, "Snapshot without top papers: {}", e);
        }
        focus = Tab::TopPapers;
    }
    dashboard.tabs.activate(focus, None)?;

    Ok(render_page(&*dashboard.dom, Utc::now())?)
}

/// Capture and write the page to `path`.
pub async fn write_snapshot(
    dashboard: &Dashboard,
    query: Option<&SnapshotQuery>,
    path: &Path,
) -> AppResult<()> {
    let html = capture(dashboard, query).await?;
    tokio::fs::write(path, html).await?;
    info!(path = %path.display(), "Snapshot written");
    Ok(())
}
