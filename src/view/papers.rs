use crate::api::ResponseMeta;
use crate::types::Paper;
use crate::utils::{format_elapsed_ms, format_thousands};
use std::time::Duration;

/// Shown instead of a table when a topic has no papers yet.
pub const EMPTY_RESULTS_MESSAGE: &str =
    "No data for this topic yet. Generate data from the \"Generate Data\" tab first.";

const DEFAULT_CACHED_STATUS: &str = "UNKNOWN";
const DEFAULT_BYPASS_STATUS: &str = "BYPASS";
const DEFAULT_BYPASS_SOURCE: &str = "DATABASE";

/// One ranked row of the top papers table.
#[derive(Debug, Clone, PartialEq)]
pub struct PaperRow {
    /// 1-based position in the response
    pub rank: usize,
    pub title: String,
    pub topic: String,
    pub year: i32,
    pub citation_count: u64,
    pub growth_rate: f64,
}

impl PaperRow {
    pub fn citations_display(&self) -> String {
        format_thousands(self.citation_count)
    }

    pub fn growth_display(&self) -> String {
        format!("{}%", self.growth_rate)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PapersTable {
    pub rows: Vec<PaperRow>,
}

impl PapersTable {
    /// Rows keep the response order; rank is index + 1.
    pub fn from_papers(papers: &[Paper]) -> Self {
        let rows = papers
            .iter()
            .enumerate()
            .map(|(index, paper)| PaperRow {
                rank: index + 1,
                title: paper.title.clone(),
                topic: paper.topic.clone(),
                year: paper.published_year,
                citation_count: paper.citation_count,
                growth_rate: paper.citation_growth_rate,
            })
            .collect();
        Self { rows }
    }

    pub fn footer(&self) -> String {
        format!("Showing {} papers", self.rows.len())
    }
}

/// Which path served a top papers response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerState {
    Hit,
    Miss,
    Bypass,
}

/// The cache indicator shown above the results table.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheBanner {
    pub state: BannerState,
    /// Client-side round trip, display only
    pub elapsed_ms: String,
    pub cache_status: String,
    pub cache_key: String,
    pub source: String,
    /// Seconds until the next identical query should hit the cache
    pub ttl_hint_secs: Option<u64>,
}

impl CacheBanner {
    /// Banner for the cached endpoint: only an exact `HIT` counts as a hit.
    pub fn cached(meta: &ResponseMeta, elapsed: Duration, ttl: Duration) -> Self {
        let cache_status = meta
            .cache_status
            .clone()
            .unwrap_or_else(|| DEFAULT_CACHED_STATUS.to_string());
        let hit = cache_status == "HIT";

        Self {
            state: if hit { BannerState::Hit } else { BannerState::Miss },
            elapsed_ms: format_elapsed_ms(elapsed),
            cache_status,
            cache_key: meta.cache_key.clone().unwrap_or_default(),
            source: if hit { "REDIS" } else { "DATABASE" }.to_string(),
            ttl_hint_secs: (!hit).then(|| ttl.as_secs()),
        }
    }

    /// Banner for the bypass endpoint, whatever the headers say.
    pub fn bypass(meta: &ResponseMeta, elapsed: Duration) -> Self {
        Self {
            state: BannerState::Bypass,
            elapsed_ms: format_elapsed_ms(elapsed),
            cache_status: meta
                .cache_status
                .clone()
                .unwrap_or_else(|| DEFAULT_BYPASS_STATUS.to_string()),
            cache_key: meta.cache_key.clone().unwrap_or_default(),
            source: meta
                .source
                .clone()
                .unwrap_or_else(|| DEFAULT_BYPASS_SOURCE.to_string()),
            ttl_hint_secs: None,
        }
    }

    pub fn headline(&self) -> &'static str {
        match self.state {
            BannerState::Hit => "CACHE HIT",
            BannerState::Miss => "CACHE MISS",
            BannerState::Bypass => "CACHE BYPASS",
        }
    }

    pub fn badge(&self) -> &'static str {
        match self.state {
            BannerState::Hit => "REDIS",
            BannerState::Miss | BannerState::Bypass => "DATABASE",
        }
    }

    pub fn description(&self) -> &'static str {
        match self.state {
            BannerState::Hit => "Served from the Redis cache",
            BannerState::Miss => "Served from the PostgreSQL database",
            BannerState::Bypass => "Served from the PostgreSQL database (cache skipped)",
        }
    }

    pub fn ttl_hint(&self) -> Option<String> {
        self.ttl_hint_secs.map(|secs| {
            format!("The next identical query should come from the cache ({}s TTL)", secs)
        })
    }

    /// `hit` or `miss`; bypass shares the miss styling.
    pub fn css_class(&self) -> &'static str {
        match self.state {
            BannerState::Hit => "hit",
            BannerState::Miss | BannerState::Bypass => "miss",
        }
    }
}
