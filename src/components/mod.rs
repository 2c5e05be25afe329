//! Dashboard Components
//!
//! Each component owns one concern of the page and talks to the backend
//! through [`DashboardApi`]:
//!
//! - **Notifier**: transient toasts
//! - **TabController**: which panel is visible
//! - **DataGenerator**: the long-running generate job with simulated progress
//! - **PapersQuery**: cached and bypass top papers queries with the cache banner
//! - **StatsView** + **ChartRenderer**: summary cards, tables and charts
//! - **Maintenance**: health check, database and cache resets
//!
//! Components share nothing but the page and the scheduler. [`Dashboard`]
//! wires them together for the front ends.

pub mod charts;
pub mod generator;
pub mod maintenance;
pub mod notifier;
pub mod papers;
pub mod stats;
pub mod tabs;

pub use charts::ChartRenderer;
pub use generator::{DataGenerator, GenerateOutcome};
pub use maintenance::Maintenance;
pub use notifier::Notifier;
pub use papers::{PapersQuery, QueryMode, QueryOutcome};
pub use stats::{StatsOutcome, StatsView};
pub use tabs::TabController;

use crate::api::DashboardApi;
use crate::config::Config;
use crate::dom::MemoryDom;
use crate::scheduler::Scheduler;
use std::sync::Arc;
use tracing::info;

/// Every component bound to one in-memory page.
pub struct Dashboard {
    pub dom: Arc<MemoryDom>,
    pub scheduler: Scheduler,
    pub notifier: Arc<Notifier>,
    pub tabs: TabController,
    pub generator: DataGenerator,
    pub papers: PapersQuery,
    pub stats: Arc<StatsView>,
    pub maintenance: Maintenance,
}

impl Dashboard {
    pub fn new(config: &Config, api: Arc<dyn DashboardApi>) -> Self {
        let ui = &config.ui;
        let dom = Arc::new(MemoryDom::dashboard(ui));
        let scheduler = Scheduler::new();

        let notifier = Arc::new(Notifier::new(dom.clone(), scheduler.clone(), ui));
        let stats = Arc::new(StatsView::new(api.clone(), dom.clone()));

        Self {
            tabs: TabController::new(dom.clone()),
            generator: DataGenerator::new(
                api.clone(),
                dom.clone(),
                notifier.clone(),
                scheduler.clone(),
                ui,
            ),
            papers: PapersQuery::new(api.clone(), dom.clone(), ui),
            maintenance: Maintenance::new(api, notifier.clone(), stats.clone()),
            stats,
            notifier,
            scheduler,
            dom,
        }
    }

    /// Cancel every pending toast and progress timer.
    pub fn shutdown(&self) {
        info!("Shutting down dashboard timers");
        self.scheduler.shutdown();
    }
}
