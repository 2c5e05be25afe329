use super::notifier::Notifier;
use super::stats::StatsView;
use crate::api::DashboardApi;
use crate::utils::format_thousands;
use crate::view::Severity;
use std::sync::Arc;
use tracing::{error, info};

/// Health check and reset actions against the backend.
///
/// Results are reported as toasts; none of these touch a result panel
/// except `clear_database`, which reloads the statistics afterwards.
pub struct Maintenance {
    api: Arc<dyn DashboardApi>,
    notifier: Arc<Notifier>,
    stats: Arc<StatsView>,
}

impl Maintenance {
    pub fn new(api: Arc<dyn DashboardApi>, notifier: Arc<Notifier>, stats: Arc<StatsView>) -> Self {
        Self {
            api,
            notifier,
            stats,
        }
    }

    /// Returns the reported status, or `None` when the backend is unreachable.
    pub async fn check_health(&self) -> Option<String> {
        match self.api.health().await {
            Ok(health) => {
                info!(status = %health.status, "Backend health");
                let severity = if health.status == "healthy" {
                    Severity::Success
                } else {
                    Severity::Warning
                };
                self.notifier
                    .notify(format!("Backend status: {}", health.status), severity);
                Some(health.status)
            }
            Err(e) => {
                error!("Health check failed: {}", e);
                self.notifier
                    .notify(format!("Backend unreachable: {}", e), Severity::Error);
                None
            }
        }
    }

    /// Returns whether the database was cleared.
    pub async fn clear_database(&self) -> bool {
        let cleared = match self.api.clear_database().await {
            Ok(result) => {
                info!(
                    papers = result.papers_deleted,
                    citations = result.citations_deleted,
                    "Database cleared"
                );
                self.notifier.notify(
                    format!(
                        "Deleted {} papers and {} citations",
                        format_thousands(result.papers_deleted),
                        format_thousands(result.citations_deleted)
                    ),
                    Severity::Success,
                );
                true
            }
            Err(e) => {
                error!("Clearing database failed: {}", e);
                self.notifier
                    .notify(format!("Error: {}", e), Severity::Error);
                false
            }
        };

        if cleared {
            if let Err(e) = self.stats.load_stats().await {
                error!("Reloading statistics failed: {}", e);
            }
        }
        cleared
    }

    /// Evict one cached top papers entry. Returns whether the backend confirmed it.
    pub async fn clear_cache(&self, topic: &str, limit: u32) -> bool {
        match self.api.clear_cache(topic, limit).await {
            Ok(result) => match (result.error, result.cache_key) {
                (Some(reason), _) => {
                    self.notifier
                        .notify(format!("{}: {}", result.message, reason), Severity::Warning);
                    false
                }
                (None, Some(key)) => {
                    info!(cache_key = %key, "Cache entry cleared");
                    self.notifier
                        .notify(format!("{}: {}", result.message, key), Severity::Success);
                    true
                }
                (None, None) => {
                    self.notifier.notify(result.message, Severity::Success);
                    true
                }
            },
            Err(e) => {
                error!(topic, limit, "Clearing cache failed: {}", e);
                self.notifier
                    .notify(format!("Error: {}", e), Severity::Error);
                false
            }
        }
    }
}
