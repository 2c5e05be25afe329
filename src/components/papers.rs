use crate::api::DashboardApi;
use crate::config::UiConfig;
use crate::dom::{Dom, DomError, ElementId};
use crate::view::papers::EMPTY_RESULTS_MESSAGE;
use crate::view::{BannerState, CacheBanner, Content, PapersTable, Severity, StatusMessage};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{info, warn};

/// Which backend path a query goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryMode {
    /// `/top-papers`, served from Redis when warm
    Cached,
    /// `/top-papers-db`, always PostgreSQL
    Bypass,
}

#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome {
    Rendered { rows: usize, banner: BannerState },
    Empty(BannerState),
    Failed(String),
}

/// Fetches the most cited papers for a topic and renders banner + table.
pub struct PapersQuery {
    api: Arc<dyn DashboardApi>,
    dom: Arc<dyn Dom>,
    cache_ttl: Duration,
}

impl PapersQuery {
    pub fn new(api: Arc<dyn DashboardApi>, dom: Arc<dyn Dom>, ui: &UiConfig) -> Self {
        Self {
            api,
            dom,
            cache_ttl: ui.cache_ttl(),
        }
    }

    pub async fn query_cached(&self, topic: &str, limit: u32) -> Result<QueryOutcome, DomError> {
        self.run(QueryMode::Cached, topic, limit).await
    }

    pub async fn query_uncached(
        &self,
        topic: &str,
        limit: u32,
    ) -> Result<QueryOutcome, DomError> {
        self.run(QueryMode::Bypass, topic, limit).await
    }

    /// Query using the topic select and limit input on the page.
    pub async fn query_from_inputs(&self, mode: QueryMode) -> Result<QueryOutcome, DomError> {
        let topic = self.dom.value(ElementId::TopicSelect)?;
        let raw_limit = self.dom.value(ElementId::LimitInput)?;

        match raw_limit.trim().parse::<u32>() {
            Ok(limit) => self.run(mode, &topic, limit).await,
            Err(_) => {
                let message = format!("Invalid limit: '{}'", raw_limit);
                self.dom.set_content(
                    ElementId::TopPapersResult,
                    Content::Status(StatusMessage::error(&message)),
                )?;
                Ok(QueryOutcome::Failed(message))
            }
        }
    }

    async fn run(&self, mode: QueryMode, topic: &str, limit: u32) -> Result<QueryOutcome, DomError> {
        self.dom
            .set_content(ElementId::TopPapersResult, Content::loading("Loading..."))?;
        self.dom.set_visible(ElementId::CacheIndicator, false)?;
        self.dom
            .set_content(ElementId::CacheIndicator, Content::Empty)?;

        let started = Instant::now();
        let response = match mode {
            QueryMode::Cached => self.api.top_papers(topic, limit).await,
            QueryMode::Bypass => self.api.top_papers_db(topic, limit).await,
        };
        let elapsed = started.elapsed();

        let fetched = match response {
            Ok(fetched) => fetched,
            Err(e) => {
                warn!(topic, limit, ?mode, "Top papers query failed: {}", e);
                self.dom.set_content(
                    ElementId::TopPapersResult,
                    Content::Status(StatusMessage::error(&e)),
                )?;
                return Ok(QueryOutcome::Failed(e.to_string()));
            }
        };

        let banner = match mode {
            QueryMode::Cached => CacheBanner::cached(&fetched.meta, elapsed, self.cache_ttl),
            QueryMode::Bypass => CacheBanner::bypass(&fetched.meta, elapsed),
        };
        let state = banner.state;
        info!(
            topic,
            limit,
            cache = ?state,
            rows = fetched.data.len(),
            elapsed_ms = %banner.elapsed_ms,
            "Top papers loaded"
        );

        self.dom
            .set_content(ElementId::CacheIndicator, Content::Banner(banner))?;
        self.dom.set_visible(ElementId::CacheIndicator, true)?;

        if fetched.data.is_empty() {
            self.dom.set_content(
                ElementId::TopPapersResult,
                Content::status(Severity::Info, EMPTY_RESULTS_MESSAGE),
            )?;
            return Ok(QueryOutcome::Empty(state));
        }

        let table = PapersTable::from_papers(&fetched.data);
        let rows = table.rows.len();
        self.dom
            .set_content(ElementId::TopPapersResult, Content::Papers(table))?;

        Ok(QueryOutcome::Rendered {
            rows,
            banner: state,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiError, Fetched, ResponseMeta};
    use crate::dom::MemoryDom;
    use crate::testing::{papers, StubApi};

    fn setup(api: StubApi) -> (Arc<MemoryDom>, Arc<StubApi>, PapersQuery) {
        let ui = UiConfig::default();
        let dom = Arc::new(MemoryDom::dashboard(&ui));
        let api = Arc::new(api);
        let query = PapersQuery::new(api.clone(), dom.clone(), &ui);
        (dom, api, query)
    }

    fn with_papers(n: usize, status: Option<&str>) -> StubApi {
        StubApi {
            papers: Ok(Fetched {
                data: papers(n),
                meta: ResponseMeta {
                    cache_status: status.map(String::from),
                    cache_key: Some("top_papers:ai:5".to_string()),
                    source: None,
                },
            }),
            ..StubApi::default()
        }
    }

    fn banner(dom: &MemoryDom) -> CacheBanner {
        match dom.content(ElementId::CacheIndicator) {
            Some(Content::Banner(banner)) => banner,
            other => panic!("expected banner, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_cached_hit_renders_ranked_table() {
        let (dom, api, query) = setup(with_papers(5, Some("HIT")));

        let outcome = query.query_cached("ai", 5).await.unwrap();
        assert_eq!(
            outcome,
            QueryOutcome::Rendered {
                rows: 5,
                banner: BannerState::Hit
            }
        );
        assert_eq!(api.calls(), vec!["top_papers:ai:5".to_string()]);

        let banner = banner(&dom);
        assert_eq!(banner.state, BannerState::Hit);
        assert_eq!(banner.cache_key, "top_papers:ai:5");
        assert!(dom.element(ElementId::CacheIndicator).unwrap().visible);

        match dom.content(ElementId::TopPapersResult) {
            Some(Content::Papers(table)) => {
                let ranks: Vec<_> = table.rows.iter().map(|r| r.rank).collect();
                assert_eq!(ranks, vec![1, 2, 3, 4, 5]);
                let expected: Vec<_> = papers(5).into_iter().map(|p| p.title).collect();
                let titles: Vec<_> = table.rows.iter().map(|r| r.title.clone()).collect();
                assert_eq!(titles, expected);
            }
            other => panic!("expected table, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_cached_miss_carries_ttl_hint() {
        let (dom, _api, query) = setup(with_papers(2, Some("MISS")));
        query.query_cached("AI", 2).await.unwrap();

        let banner = banner(&dom);
        assert_eq!(banner.state, BannerState::Miss);
        assert_eq!(banner.ttl_hint_secs, Some(60));
    }

    #[tokio::test]
    async fn test_missing_cache_header_is_a_miss() {
        let (dom, _api, query) = setup(with_papers(2, None));
        query.query_cached("AI", 2).await.unwrap();
        assert_eq!(banner(&dom).state, BannerState::Miss);
    }

    #[tokio::test]
    async fn test_bypass_is_always_bypass() {
        let (dom, api, query) = setup(with_papers(3, Some("HIT")));

        let outcome = query.query_uncached("NLP", 3).await.unwrap();
        assert_eq!(
            outcome,
            QueryOutcome::Rendered {
                rows: 3,
                banner: BannerState::Bypass
            }
        );
        assert_eq!(api.calls(), vec!["top_papers_db:NLP:3".to_string()]);

        let banner = banner(&dom);
        assert_eq!(banner.state, BannerState::Bypass);
        assert_eq!(banner.source, "DATABASE");
    }

    #[tokio::test]
    async fn test_empty_result_shows_guidance() {
        let (dom, _api, query) = setup(with_papers(0, Some("MISS")));

        let outcome = query.query_cached("Physics", 10).await.unwrap();
        assert_eq!(outcome, QueryOutcome::Empty(BannerState::Miss));
        assert_eq!(
            dom.content(ElementId::TopPapersResult),
            Some(Content::status(Severity::Info, EMPTY_RESULTS_MESSAGE))
        );
    }

    #[tokio::test]
    async fn test_failure_renders_inline_error_and_hides_banner() {
        let (dom, _api, query) = setup(StubApi {
            papers: Err(ApiError::Status(503)),
            ..StubApi::default()
        });

        let outcome = query.query_cached("AI", 10).await.unwrap();
        assert_eq!(
            outcome,
            QueryOutcome::Failed("HTTP error! status: 503".to_string())
        );
        assert!(!dom.element(ElementId::CacheIndicator).unwrap().visible);
        match dom.content(ElementId::TopPapersResult) {
            Some(Content::Status(status)) => {
                assert_eq!(status.severity, Severity::Error);
                assert!(status.text.contains("503"));
            }
            other => panic!("expected error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_query_from_inputs_reads_controls() {
        let (dom, api, query) = setup(with_papers(1, Some("HIT")));
        dom.set_value(ElementId::TopicSelect, "Machine Learning").unwrap();
        dom.set_value(ElementId::LimitInput, " 25 ").unwrap();

        query.query_from_inputs(QueryMode::Bypass).await.unwrap();
        assert_eq!(
            api.calls(),
            vec!["top_papers_db:Machine Learning:25".to_string()]
        );
    }

    #[tokio::test]
    async fn test_invalid_limit_skips_request() {
        let (dom, api, query) = setup(StubApi::default());
        dom.set_value(ElementId::LimitInput, "ten").unwrap();

        let outcome = query.query_from_inputs(QueryMode::Cached).await.unwrap();
        assert!(matches!(outcome, QueryOutcome::Failed(_)));
        assert!(api.calls().is_empty());
    }
}
