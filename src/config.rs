use anyhow::{bail, Result};
use serde::Deserialize;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Topics the backend generator assigns to synthetic papers.
pub const TOPICS: [&str; 10] = [
    "AI",
    "Machine Learning",
    "Deep Learning",
    "NLP",
    "Computer Vision",
    "Robotics",
    "Data Science",
    "Statistics",
    "Mathematics",
    "Physics",
];

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    pub ui: UiConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Base URL including the version prefix, e.g. `http://localhost:8000/api/v1`
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    pub default_topic: String,
    pub default_limit: u32,
    pub toast_duration_ms: u64,
    pub toast_exit_ms: u64,
    pub progress_tick_ms: u64,
    pub cache_ttl_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    pub dir: Option<PathBuf>,
    pub filter: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            api: ApiConfig {
                base_url: env::var("DASHBOARD_API_URL")
                    .unwrap_or_else(|_| "http://localhost:8000/api/v1".to_string()),
            },
            ui: UiConfig {
                default_topic: env::var("DASHBOARD_DEFAULT_TOPIC")
                    .unwrap_or_else(|_| TOPICS[0].to_string()),
                default_limit: env::var("DASHBOARD_DEFAULT_LIMIT")
                    .unwrap_or_else(|_| "10".to_string())
                    .parse()?,
                toast_duration_ms: env::var("DASHBOARD_TOAST_MS")
                    .unwrap_or_else(|_| "3000".to_string())
                    .parse()?,
                toast_exit_ms: env::var("DASHBOARD_TOAST_EXIT_MS")
                    .unwrap_or_else(|_| "300".to_string())
                    .parse()?,
                progress_tick_ms: env::var("DASHBOARD_PROGRESS_TICK_MS")
                    .unwrap_or_else(|_| "1000".to_string())
                    .parse()?,
                cache_ttl_secs: env::var("DASHBOARD_CACHE_TTL_SECS")
                    .unwrap_or_else(|_| "60".to_string())
                    .parse()?,
            },
            log: LogConfig {
                dir: env::var("DASHBOARD_LOG_DIR").ok().map(PathBuf::from),
                filter: env::var("RUST_LOG")
                    .unwrap_or_else(|_| "citation_dashboard=info".to_string()),
            },
        };
        config.ui.validate()?;
        Ok(config)
    }

    /// Override the backend base URL (CLI flag takes precedence over env).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.api.base_url = base_url.into();
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: "http://localhost:8000/api/v1".to_string(),
            },
            ui: UiConfig::default(),
            log: LogConfig {
                dir: None,
                filter: "citation_dashboard=info".to_string(),
            },
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            default_topic: TOPICS[0].to_string(),
            default_limit: 10,
            toast_duration_ms: 3000,
            toast_exit_ms: 300,
            progress_tick_ms: 1000,
            cache_ttl_secs: 60,
        }
    }
}

impl UiConfig {
    /// The progress ticker needs a non-zero period.
    pub fn validate(&self) -> Result<()> {
        if self.progress_tick_ms == 0 {
            bail!("DASHBOARD_PROGRESS_TICK_MS must be greater than zero");
        }
        Ok(())
    }

    pub fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.toast_duration_ms)
    }

    pub fn toast_exit(&self) -> Duration {
        Duration::from_millis(self.toast_exit_ms)
    }

    pub fn progress_tick(&self) -> Duration {
        Duration::from_millis(self.progress_tick_ms)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}
