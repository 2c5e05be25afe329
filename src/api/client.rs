use super::{
    ApiError, DashboardApi, Fetched, ResponseMeta, CACHE_KEY_HEADER, CACHE_STATUS_HEADER,
    SOURCE_HEADER,
};
use crate::config::ApiConfig;
use crate::types::{
    CacheClearResult, ClearResult, GenerateResult, HealthStatus, Paper, StatsSummary,
};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, CONTENT_TYPE};
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

/// reqwest-backed client for the citation backend.
pub struct HttpApi {
    client: Client,
    base_url: String,
}

impl HttpApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &ApiConfig) -> Self {
        Self::new(config.base_url.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Response, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), url = %response.url(), "Backend returned error status");
            return Err(ApiError::Status(status.as_u16()));
        }

        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.send(self.client.get(self.url(path))).await?;
        Self::decode(response).await
    }

    async fn fetch_papers(
        &self,
        path: &str,
        topic: &str,
        limit: u32,
    ) -> Result<Fetched<Vec<Paper>>, ApiError> {
        let limit = limit.to_string();
        let request = self
            .client
            .get(self.url(path))
            .query(&[("topic", topic), ("limit", limit.as_str())]);

        let response = self.send(request).await?;
        let meta = response_meta(response.headers());
        debug!(?meta, topic, "Fetched ranked papers");

        let data = Self::decode(response).await?;
        Ok(Fetched { data, meta })
    }
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Pull the cache headers out of a response.
pub fn response_meta(headers: &HeaderMap) -> ResponseMeta {
    ResponseMeta {
        cache_status: header_value(headers, CACHE_STATUS_HEADER),
        cache_key: header_value(headers, CACHE_KEY_HEADER),
        source: header_value(headers, SOURCE_HEADER),
    }
}

#[async_trait]
impl DashboardApi for HttpApi {
    async fn generate(&self) -> Result<GenerateResult, ApiError> {
        let request = self
            .client
            .post(self.url("/generate"))
            .header(CONTENT_TYPE, "application/json");
        let response = self.send(request).await?;
        Self::decode(response).await
    }

    async fn top_papers(&self, topic: &str, limit: u32) -> Result<Fetched<Vec<Paper>>, ApiError> {
        self.fetch_papers("/top-papers", topic, limit).await
    }

    async fn top_papers_db(
        &self,
        topic: &str,
        limit: u32,
    ) -> Result<Fetched<Vec<Paper>>, ApiError> {
        self.fetch_papers("/top-papers-db", topic, limit).await
    }

    async fn stats(&self) -> Result<StatsSummary, ApiError> {
        self.get_json("/stats").await
    }

    async fn health(&self) -> Result<HealthStatus, ApiError> {
        self.get_json("/health").await
    }

    async fn clear_database(&self) -> Result<ClearResult, ApiError> {
        let response = self.send(self.client.delete(self.url("/clear"))).await?;
        Self::decode(response).await
    }

    async fn clear_cache(&self, topic: &str, limit: u32) -> Result<CacheClearResult, ApiError> {
        let mut url =
            Url::parse(&self.url("/cache")).map_err(|e| ApiError::InvalidUrl(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.base_url.clone()))?
            .push(topic)
            .push(&limit.to_string());

        let response = self.send(self.client.delete(url)).await?;
        Self::decode(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let api = HttpApi::new("http://localhost:8000/api/v1/");
        assert_eq!(api.base_url(), "http://localhost:8000/api/v1");
        assert_eq!(api.url("/stats"), "http://localhost:8000/api/v1/stats");
    }

    #[test]
    fn test_response_meta_reads_cache_headers() {
        let mut headers = HeaderMap::new();
        headers.insert("x-cache-status", HeaderValue::from_static("HIT"));
        headers.insert("x-cache-key", HeaderValue::from_static("top_papers:AI:5"));

        let meta = response_meta(&headers);
        assert_eq!(meta.cache_status.as_deref(), Some("HIT"));
        assert_eq!(meta.cache_key.as_deref(), Some("top_papers:AI:5"));
        assert_eq!(meta.source, None);
    }

    #[test]
    fn test_blank_headers_count_as_absent() {
        let mut headers = HeaderMap::new();
        headers.insert("x-source", HeaderValue::from_static(""));
        assert_eq!(response_meta(&headers).source, None);
    }
}
