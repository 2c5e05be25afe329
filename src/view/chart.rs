//! Chart definitions in Chart.js configuration shape.
//!
//! The HTML snapshot embeds the serialized form verbatim; the terminal
//! dashboard reads labels, values and colors back out of the same struct.

use crate::types::{CitedTopicEntry, TopicDistributionEntry};
use serde::Serialize;

/// Slice colors for the topic doughnut, cycled past ten topics.
pub const TOPIC_PALETTE: [&str; 10] = [
    "#667eea", "#764ba2", "#f093fb", "#4facfe", "#00f2fe", "#43e97b", "#fa709a", "#fee140",
    "#30cfd0", "#330867",
];

pub const BAR_FILL: &str = "rgba(102, 126, 234, 0.8)";
pub const BAR_BORDER: &str = "#667eea";
pub const SLICE_BORDER: &str = "#fff";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Doughnut,
    Bar,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub data: ChartData,
    pub options: ChartOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub data: Vec<u64>,
    pub background_color: Colors,
    pub border_color: String,
    pub border_width: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Colors {
    Single(String),
    PerPoint(Vec<String>),
}

impl Colors {
    pub fn at(&self, index: usize) -> &str {
        match self {
            Colors::Single(color) => color,
            Colors::PerPoint(colors) if colors.is_empty() => BAR_BORDER,
            Colors::PerPoint(colors) => &colors[index % colors.len()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub responsive: bool,
    pub maintain_aspect_ratio: bool,
    pub plugins: Plugins,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scales: Option<Scales>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Plugins {
    pub legend: Legend,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub display: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<LegendPosition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<LegendLabels>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendPosition {
    Top,
    Right,
    Bottom,
    Left,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendLabels {
    pub padding: u32,
    pub font: Font,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Font {
    pub size: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scales {
    pub y: Axis,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Axis {
    pub begin_at_zero: bool,
    pub ticks: Ticks,
}

/// Tick formatting is a JS callback in Chart.js, so it is not serialized;
/// renderers apply it themselves.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ticks {
    #[serde(skip)]
    pub format: TickFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TickFormat {
    #[default]
    Plain,
    Thousands,
}

impl ChartSpec {
    /// Doughnut of paper counts per topic.
    pub fn topic_doughnut(entries: &[TopicDistributionEntry]) -> Self {
        let colors = (0..entries.len())
            .map(|i| TOPIC_PALETTE[i % TOPIC_PALETTE.len()].to_string())
            .collect();

        Self {
            kind: ChartKind::Doughnut,
            data: ChartData {
                labels: entries.iter().map(|e| e.topic.clone()).collect(),
                datasets: vec![Dataset {
                    label: None,
                    data: entries.iter().map(|e| e.count).collect(),
                    background_color: Colors::PerPoint(colors),
                    border_color: SLICE_BORDER.to_string(),
                    border_width: 2,
                    border_radius: None,
                }],
            },
            options: ChartOptions {
                responsive: true,
                maintain_aspect_ratio: true,
                plugins: Plugins {
                    legend: Legend {
                        display: true,
                        position: Some(LegendPosition::Right),
                        labels: Some(LegendLabels {
                            padding: 15,
                            font: Font { size: 12 },
                        }),
                    },
                },
                scales: None,
            },
        }
    }

    /// Bar chart of total citations per topic.
    pub fn citations_bar(entries: &[CitedTopicEntry]) -> Self {
        Self {
            kind: ChartKind::Bar,
            data: ChartData {
                labels: entries.iter().map(|e| e.topic.clone()).collect(),
                datasets: vec![Dataset {
                    label: Some("Citations".to_string()),
                    data: entries.iter().map(|e| e.citation_count).collect(),
                    background_color: Colors::Single(BAR_FILL.to_string()),
                    border_color: BAR_BORDER.to_string(),
                    border_width: 2,
                    border_radius: Some(8),
                }],
            },
            options: ChartOptions {
                responsive: true,
                maintain_aspect_ratio: true,
                plugins: Plugins {
                    legend: Legend {
                        display: false,
                        position: None,
                        labels: None,
                    },
                },
                scales: Some(Scales {
                    y: Axis {
                        begin_at_zero: true,
                        ticks: Ticks {
                            format: TickFormat::Thousands,
                        },
                    },
                }),
            },
        }
    }

    pub fn labels(&self) -> &[String] {
        &self.data.labels
    }

    /// Values of the first dataset (both charts carry exactly one).
    pub fn values(&self) -> &[u64] {
        self.data
            .datasets
            .first()
            .map(|d| d.data.as_slice())
            .unwrap_or(&[])
    }

    pub fn color_at(&self, index: usize) -> &str {
        self.data
            .datasets
            .first()
            .map(|d| d.background_color.at(index))
            .unwrap_or(BAR_BORDER)
    }

    pub fn y_tick_format(&self) -> TickFormat {
        self.options
            .scales
            .as_ref()
            .map(|s| s.y.ticks.format)
            .unwrap_or_default()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topics(n: usize) -> Vec<TopicDistributionEntry> {
        (0..n)
            .map(|i| TopicDistributionEntry {
                topic: format!("topic-{}", i),
                count: (i as u64 + 1) * 10,
            })
            .collect()
    }

    #[test]
    fn test_doughnut_has_one_slice_per_topic() {
        let spec = ChartSpec::topic_doughnut(&topics(4));
        assert_eq!(spec.kind, ChartKind::Doughnut);
        assert_eq!(spec.labels().len(), 4);
        assert_eq!(spec.values(), &[10, 20, 30, 40]);
        assert_eq!(spec.color_at(3), TOPIC_PALETTE[3]);
    }

    #[test]
    fn test_doughnut_palette_cycles_past_ten() {
        let spec = ChartSpec::topic_doughnut(&topics(12));
        assert_eq!(spec.color_at(10), TOPIC_PALETTE[0]);
        assert_eq!(spec.color_at(11), TOPIC_PALETTE[1]);
    }

    #[test]
    fn test_doughnut_serializes_as_chartjs_config() {
        let json: serde_json::Value =
            serde_json::from_str(&ChartSpec::topic_doughnut(&topics(2)).to_json().unwrap())
                .unwrap();
        assert_eq!(json["type"], "doughnut");
        assert_eq!(json["options"]["plugins"]["legend"]["position"], "right");
        assert_eq!(json["options"]["plugins"]["legend"]["labels"]["padding"], 15);
        assert_eq!(json["data"]["datasets"][0]["borderColor"], "#fff");
        assert!(json["options"].get("scales").is_none());
    }

    #[test]
    fn test_bar_has_zero_based_axis_and_no_legend() {
        let entries = vec![
            CitedTopicEntry {
                topic: "AI".to_string(),
                citation_count: 120_000,
            },
            CitedTopicEntry {
                topic: "NLP".to_string(),
                citation_count: 95_000,
            },
        ];
        let spec = ChartSpec::citations_bar(&entries);
        assert_eq!(spec.y_tick_format(), TickFormat::Thousands);
        assert_eq!(spec.color_at(1), BAR_FILL);

        let json: serde_json::Value = serde_json::from_str(&spec.to_json().unwrap()).unwrap();
        assert_eq!(json["type"], "bar");
        assert_eq!(json["options"]["plugins"]["legend"]["display"], false);
        assert_eq!(json["options"]["scales"]["y"]["beginAtZero"], true);
        assert_eq!(json["data"]["datasets"][0]["label"], "Citations");
        assert_eq!(json["data"]["datasets"][0]["borderRadius"], 8);
    }
}
