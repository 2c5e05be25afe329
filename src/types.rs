// Wire types returned by the citation backend

use serde::{Deserialize, Serialize};

/// A ranked paper as returned by `/top-papers` and `/top-papers-db`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paper {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub title: String,
    pub topic: String,
    pub published_year: i32,
    pub citation_count: u64,
    /// Growth rate as a percentage (e.g. `12.5` means 12.5 %)
    pub citation_growth_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicDistributionEntry {
    pub topic: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CitedTopicEntry {
    pub topic: String,
    pub citation_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearEntry {
    pub year: i32,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsSummary {
    pub total_papers: u64,
    pub total_citations: u64,
    pub average_citations_per_paper: f64,
    #[serde(default)]
    pub topic_distribution: Vec<TopicDistributionEntry>,
    #[serde(default)]
    pub most_cited_topics: Vec<CitedTopicEntry>,
    #[serde(default)]
    pub year_distribution: Vec<YearEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateResult {
    pub papers_created: u64,
    pub citations_created: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClearResult {
    pub papers_deleted: u64,
    pub citations_deleted: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheClearResult {
    pub message: String,
    #[serde(default)]
    pub cache_key: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

/// Errors surfaced by whole-page operations such as writing a snapshot.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Dom(#[from] crate::dom::DomError),

    #[error("Chart serialization failed: {0}")]
    Chart(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AppResult<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_summary_tolerates_missing_collections() {
        let summary: StatsSummary = serde_json::from_str(
            r#"{"total_papers": 10, "total_citations": 40, "average_citations_per_paper": 4.0}"#,
        )
        .unwrap();
        assert!(summary.topic_distribution.is_empty());
        assert!(summary.most_cited_topics.is_empty());
        assert!(summary.year_distribution.is_empty());
    }

    #[test]
    fn test_paper_accepts_backend_shape() {
        let paper: Paper = serde_json::from_str(
            r#"{"id": 7, "title": "Research Paper 7", "topic": "AI", "published_year": 2021,
                "citation_count": 154, "citation_growth_rate": 12.5}"#,
        )
        .unwrap();
        assert_eq!(paper.id, Some(7));
        assert_eq!(paper.citation_count, 154);
        assert_eq!(paper.citation_growth_rate, 12.5);
    }
}
