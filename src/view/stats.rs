use crate::types::StatsSummary;
use crate::utils::{format_thousands, percentage};

/// The year table only lists this many entries.
pub const YEAR_ROW_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct StatCard {
    pub icon: &'static str,
    pub value: String,
    pub label: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TopicShareRow {
    pub topic: String,
    pub count: u64,
    pub percentage: f64,
}

impl TopicShareRow {
    pub fn percentage_display(&self) -> String {
        format!("{:.1}%", self.percentage)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CitedTopicRow {
    pub topic: String,
    pub citation_count: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct YearRow {
    pub year: i32,
    pub count: u64,
}

/// Everything the statistics tab shows, minus the chart drawings.
#[derive(Debug, Clone, PartialEq)]
pub struct StatsPanel {
    pub cards: Vec<StatCard>,
    pub topic_distribution: Vec<TopicShareRow>,
    pub most_cited: Vec<CitedTopicRow>,
    pub years: Vec<YearRow>,
}

impl StatsPanel {
    pub fn from_summary(summary: &StatsSummary) -> Self {
        let cards = vec![
            StatCard {
                icon: "📄",
                value: format_thousands(summary.total_papers),
                label: "Total Papers",
            },
            StatCard {
                icon: "🔗",
                value: format_thousands(summary.total_citations),
                label: "Total Citations",
            },
            StatCard {
                icon: "📊",
                value: summary.average_citations_per_paper.to_string(),
                label: "Avg Citations/Paper",
            },
        ];

        let total: u64 = summary.topic_distribution.iter().map(|t| t.count).sum();
        let topic_distribution = summary
            .topic_distribution
            .iter()
            .map(|t| TopicShareRow {
                topic: t.topic.clone(),
                count: t.count,
                percentage: percentage(t.count, total),
            })
            .collect();

        let most_cited = summary
            .most_cited_topics
            .iter()
            .map(|t| CitedTopicRow {
                topic: t.topic.clone(),
                citation_count: t.citation_count,
            })
            .collect();

        // Backend sends years newest first
        let years = summary
            .year_distribution
            .iter()
            .take(YEAR_ROW_LIMIT)
            .map(|y| YearRow {
                year: y.year,
                count: y.count,
            })
            .collect();

        Self {
            cards,
            topic_distribution,
            most_cited,
            years,
        }
    }

    /// Whether the topic section (and its doughnut canvas) is present.
    pub fn has_topic_section(&self) -> bool {
        !self.topic_distribution.is_empty()
    }

    /// Whether the most-cited section (and its bar canvas) is present.
    pub fn has_citations_section(&self) -> bool {
        !self.most_cited.is_empty()
    }

    pub fn has_year_section(&self) -> bool {
        !self.years.is_empty()
    }
}
