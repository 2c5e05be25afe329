//! Backend API
//!
//! The dashboard talks to a versioned REST surface (`/api/v1` by default):
//!
//! - `POST /generate` - start synthetic data generation
//! - `GET /top-papers` - ranked papers through the Redis cache
//! - `GET /top-papers-db` - ranked papers straight from PostgreSQL
//! - `GET /stats` - aggregate statistics
//! - `GET /health`, `DELETE /clear`, `DELETE /cache/{topic}/{limit}` - maintenance
//!
//! Components depend on the [`DashboardApi`] trait so tests can swap in a stub.

pub mod client;

pub use client::HttpApi;

use crate::types::{
    CacheClearResult, ClearResult, GenerateResult, HealthStatus, Paper, StatsSummary,
};
use async_trait::async_trait;
use thiserror::Error;

pub const CACHE_STATUS_HEADER: &str = "X-Cache-Status";
pub const CACHE_KEY_HEADER: &str = "X-Cache-Key";
pub const SOURCE_HEADER: &str = "X-Source";

/// Every failure is reduced to a readable message; callers render it inline.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    #[error("HTTP error! status: {0}")]
    Status(u16),

    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Invalid response body: {0}")]
    Decode(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Cache metadata the backend reports in response headers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResponseMeta {
    pub cache_status: Option<String>,
    pub cache_key: Option<String>,
    pub source: Option<String>,
}

/// A decoded body together with its response headers.
#[derive(Debug, Clone, PartialEq)]
pub struct Fetched<T> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[async_trait]
pub trait DashboardApi: Send + Sync {
    async fn generate(&self) -> Result<GenerateResult, ApiError>;

    async fn top_papers(&self, topic: &str, limit: u32) -> Result<Fetched<Vec<Paper>>, ApiError>;

    async fn top_papers_db(
        &self,
        topic: &str,
        limit: u32,
    ) -> Result<Fetched<Vec<Paper>>, ApiError>;

    async fn stats(&self) -> Result<StatsSummary, ApiError>;

    async fn health(&self) -> Result<HealthStatus, ApiError>;

    async fn clear_database(&self) -> Result<ClearResult, ApiError>;

    async fn clear_cache(&self, topic: &str, limit: u32) -> Result<CacheClearResult, ApiError>;
}
