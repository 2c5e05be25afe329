//! Test doubles shared by the component tests.

use crate::api::{ApiError, DashboardApi, Fetched, ResponseMeta};
use crate::types::{
    CacheClearResult, ClearResult, CitedTopicEntry, GenerateResult, HealthStatus, Paper,
    StatsSummary, TopicDistributionEntry, YearEntry,
};
use async_trait::async_trait;
use std::sync::Mutex;
use std::time::Duration;

/// Canned responses with an optional artificial latency on generation.
pub struct StubApi {
    pub generate: Result<GenerateResult, ApiError>,
    pub generate_delay: Duration,
    pub papers: Result<Fetched<Vec<Paper>>, ApiError>,
    pub stats: Result<StatsSummary, ApiError>,
    pub health: Result<HealthStatus, ApiError>,
    pub clear: Result<ClearResult, ApiError>,
    pub clear_cache: Result<CacheClearResult, ApiError>,
    pub(crate) calls: Mutex<Vec<String>>,
}

impl Default for StubApi {
    fn default() -> Self {
        Self {
            generate: Ok(GenerateResult {
                papers_created: 10_000,
                citations_created: 1_000_000,
                message: None,
            }),
            generate_delay: Duration::ZERO,
            papers: Ok(Fetched {
                data: papers(3),
                meta: ResponseMeta::default(),
            }),
            stats: Ok(summary()),
            health: Ok(HealthStatus {
                status: "healthy".to_string(),
            }),
            clear: Ok(ClearResult {
                papers_deleted: 10_000,
                citations_deleted: 1_000_000,
                message: None,
            }),
            clear_cache: Ok(CacheClearResult {
                message: "Cache cleared".to_string(),
                cache_key: Some("top_papers:AI:10".to_string()),
                error: None,
            }),
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl StubApi {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

pub fn papers(n: usize) -> Vec<Paper> {
    (0..n)
        .map(|i| Paper {
            id: Some(i as i64 + 1),
            title: format!("Research Paper {}", i + 1),
            topic: "AI".to_string(),
            published_year: 2020 - i as i32,
            citation_count: 1_000 - i as u64 * 10,
            citation_growth_rate: 5.0,
        })
        .collect()
}

pub fn summary() -> StatsSummary {
    StatsSummary {
        total_papers: 10_000,
        total_citations: 1_000_000,
        average_citations_per_paper: 100.0,
        topic_distribution: vec![
            TopicDistributionEntry {
                topic: "AI".to_string(),
                count: 6_000,
            },
            TopicDistributionEntry {
                topic: "NLP".to_string(),
                count: 4_000,
            },
        ],
        most_cited_topics: vec![CitedTopicEntry {
            topic: "AI".to_string(),
            citation_count: 600_000,
        }],
        year_distribution: (0..12)
            .map(|i| YearEntry {
                year: 2024 - i,
                count: 400,
            })
            .collect(),
    }
}

#[async_trait]
impl DashboardApi for StubApi {
    async fn generate(&self) -> Result<GenerateResult, ApiError> {
        self.record("generate".to_string());
        if !self.generate_delay.is_zero() {
            tokio::time::sleep(self.generate_delay).await;
        }
        self.generate.clone()
    }

    async fn top_papers(&self, topic: &str, limit: u32) -> Result<Fetched<Vec<Paper>>, ApiError> {
        self.record(format!("top_papers:{}:{}", topic, limit));
        self.papers.clone()
    }

    async fn top_papers_db(
        &self,
        topic: &str,
        limit: u32,
    ) -> Result<Fetched<Vec<Paper>>, ApiError> {
        self.record(format!("top_papers_db:{}:{}", topic, limit));
        self.papers.clone()
    }

    async fn stats(&self) -> Result<StatsSummary, ApiError> {
        self.record("stats".to_string());
        self.stats.clone()
    }

    async fn health(&self) -> Result<HealthStatus, ApiError> {
        self.record("health".to_string());
        self.health.clone()
    }

    async fn clear_database(&self) -> Result<ClearResult, ApiError> {
        self.record("clear".to_string());
        self.clear.clone()
    }

    async fn clear_cache(&self, topic: &str, limit: u32) -> Result<CacheClearResult, ApiError> {
        self.record(format!("clear_cache:{}:{}", topic, limit));
        self.clear_cache.clone()
    }
}
