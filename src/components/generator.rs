use super::notifier::Notifier;
use crate::api::DashboardApi;
use crate::config::UiConfig;
use crate::dom::memory::GENERATE_LABEL;
use crate::dom::{Dom, DomError, Element, ElementId};
use crate::scheduler::{Scheduler, TaskHandle};
use crate::types::GenerateResult;
use crate::utils::format_thousands;
use crate::view::{Content, Severity, StatusMessage};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, error, info, warn};

pub const BUSY_LABEL: &str = "Generating...";
pub const PROGRESS_STEP: u8 = 2;
/// The backend reports no progress, so the simulation stops short of done.
pub const PROGRESS_CAP: u8 = 90;
pub const HIDE_PROGRESS_AFTER: Duration = Duration::from_secs(2);

const WORKING_MESSAGE: &str = "Generating data, please wait... This can take 5-10 minutes.";

#[derive(Debug, Clone, PartialEq)]
pub enum GenerateOutcome {
    Completed(GenerateResult),
    Failed(String),
    /// Another generation was still in flight; no request was sent
    AlreadyRunning,
}

/// Triggers backend data generation and animates a simulated progress bar.
pub struct DataGenerator {
    api: Arc<dyn DashboardApi>,
    dom: Arc<dyn Dom>,
    notifier: Arc<Notifier>,
    scheduler: Scheduler,
    tick: Duration,
    in_flight: AtomicBool,
    /// Pending hide of the previous run's progress bar
    hide_progress: Mutex<Option<TaskHandle>>,
}

/// Clears the in-flight flag on every exit path.
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl DataGenerator {
    pub fn new(
        api: Arc<dyn DashboardApi>,
        dom: Arc<dyn Dom>,
        notifier: Arc<Notifier>,
        scheduler: Scheduler,
        ui: &UiConfig,
    ) -> Self {
        Self {
            api,
            dom,
            notifier,
            scheduler,
            tick: ui.progress_tick(),
            in_flight: AtomicBool::new(false),
            hide_progress: Mutex::new(None),
        }
    }

    pub fn is_running(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub async fn generate(&self) -> Result<GenerateOutcome, DomError> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            warn!("Generation requested while one is already running");
            self.notifier
                .notify("Data generation is already running", Severity::Warning);
            return Ok(GenerateOutcome::AlreadyRunning);
        }
        let _in_flight = InFlight(&self.in_flight);
        self.cancel_pending_hide();

        self.dom.set_enabled(ElementId::GenerateButton, false)?;
        self.dom.set_label(ElementId::GenerateButton, BUSY_LABEL)?;
        self.dom.set_content(
            ElementId::GenerateStatus,
            Content::status(Severity::Info, WORKING_MESSAGE),
        )?;
        self.dom.set_visible(ElementId::GenerateStatus, true)?;
        self.dom
            .set_content(ElementId::GenerateProgress, Content::Progress(0))?;
        self.dom.set_visible(ElementId::GenerateProgress, true)?;

        let dom = self.dom.clone();
        let ticker = self
            .scheduler
            .every(self.tick, move || {
                let _ = dom.update(ElementId::GenerateProgress, &mut advance_progress);
            })
            .into_guard();

        info!("Starting data generation");
        let result = self.api.generate().await;
        drop(ticker);

        match result {
            Ok(created) => {
                let papers = format_thousands(created.papers_created);
                let citations = format_thousands(created.citations_created);
                info!(
                    papers = created.papers_created,
                    citations = created.citations_created,
                    "Data generation complete"
                );

                self.dom
                    .set_content(ElementId::GenerateProgress, Content::Progress(100))?;
                self.dom.set_content(
                    ElementId::GenerateStatus,
                    Content::Status(
                        StatusMessage::new(
                            Severity::Success,
                            format!("{} papers and {} citations created.", papers, citations),
                        )
                        .with_headline("Success!"),
                    ),
                )?;
                self.notifier.notify(
                    format!("{} papers and {} citations created!", papers, citations),
                    Severity::Success,
                );
                self.restore_button()?;

                let dom = self.dom.clone();
                let hide = self.scheduler.after(HIDE_PROGRESS_AFTER, move || {
                    if let Err(e) = dom.set_visible(ElementId::GenerateProgress, false) {
                        debug!("Progress bar not hidden: {}", e);
                    }
                });
                if let Ok(mut pending) = self.hide_progress.lock() {
                    *pending = Some(hide);
                }

                Ok(GenerateOutcome::Completed(created))
            }
            Err(e) => {
                error!("Data generation failed: {}", e);
                self.dom.set_content(
                    ElementId::GenerateStatus,
                    Content::Status(StatusMessage::error(&e)),
                )?;
                self.restore_button()?;
                Ok(GenerateOutcome::Failed(e.to_string()))
            }
        }
    }

    fn cancel_pending_hide(&self) {
        if let Some(hide) = self.hide_progress.lock().ok().and_then(|mut p| p.take()) {
            hide.cancel();
        }
    }

    fn restore_button(&self) -> Result<(), DomError> {
        self.dom.set_enabled(ElementId::GenerateButton, true)?;
        self.dom.set_label(ElementId::GenerateButton, GENERATE_LABEL)
    }
}

/// One simulated step. Runs under the page lock, so a completed bar (100)
/// is never pulled back down by a late tick.
fn advance_progress(el: &mut Element) {
    if let Content::Progress(p) = el.content {
        if p < PROGRESS_CAP {
            el.content = Content::Progress(p.saturating_add(PROGRESS_STEP).min(PROGRESS_CAP));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::dom::MemoryDom;
    use crate::testing::StubApi;
    use tokio::time::sleep;

    struct Fixture {
        dom: Arc<MemoryDom>,
        api: Arc<StubApi>,
        notifier: Arc<Notifier>,
        generator: Arc<DataGenerator>,
    }

    fn fixture(api: StubApi) -> Fixture {
        let ui = UiConfig::default();
        let scheduler = Scheduler::new();
        let dom = Arc::new(MemoryDom::dashboard(&ui));
        let api = Arc::new(api);
        let notifier = Arc::new(Notifier::new(dom.clone(), scheduler.clone(), &ui));
        let generator = Arc::new(DataGenerator::new(
            api.clone(),
            dom.clone(),
            notifier.clone(),
            scheduler,
            &ui,
        ));
        Fixture {
            dom,
            api,
            notifier,
            generator,
        }
    }

    fn progress(dom: &MemoryDom) -> u8 {
        match dom.content(ElementId::GenerateProgress) {
            Some(Content::Progress(p)) => p,
            other => panic!("expected progress, got {:?}", other),
        }
    }

    fn button(dom: &MemoryDom) -> Element {
        dom.element(ElementId::GenerateButton).unwrap()
    }

    #[test]
    fn test_advance_progress_caps_and_respects_completion() {
        let mut el = Element::default().with_content(Content::Progress(88));
        advance_progress(&mut el);
        assert_eq!(el.content, Content::Progress(90));
        advance_progress(&mut el);
        assert_eq!(el.content, Content::Progress(90));

        let mut done = Element::default().with_content(Content::Progress(100));
        advance_progress(&mut done);
        assert_eq!(done.content, Content::Progress(100));
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_flow() {
        let f = fixture(StubApi {
            generate_delay: Duration::from_secs(5),
            ..StubApi::default()
        });

        let generator = f.generator.clone();
        let task = tokio::spawn(async move { generator.generate().await });

        sleep(Duration::from_millis(3500)).await;
        assert!(!button(&f.dom).enabled);
        assert_eq!(button(&f.dom).label.as_deref(), Some(BUSY_LABEL));
        assert_eq!(progress(&f.dom), 6);
        assert!(f.generator.is_running());

        let outcome = task.await.unwrap().unwrap();
        assert!(matches!(outcome, GenerateOutcome::Completed(_)));
        assert_eq!(progress(&f.dom), 100);
        assert!(button(&f.dom).enabled);
        assert_eq!(button(&f.dom).label.as_deref(), Some(GENERATE_LABEL));
        assert!(!f.generator.is_running());

        match f.dom.content(ElementId::GenerateStatus) {
            Some(Content::Status(status)) => {
                assert_eq!(status.severity, Severity::Success);
                assert!(status.text.contains("10,000 papers"));
                assert!(status.text.contains("1,000,000 citations"));
            }
            other => panic!("unexpected status {:?}", other),
        }
        assert_eq!(f.notifier.visible()[0].severity, Severity::Success);

        assert!(f.dom.element(ElementId::GenerateProgress).unwrap().visible);
        sleep(HIDE_PROGRESS_AFTER + Duration::from_millis(100)).await;
        assert!(!f.dom.element(ElementId::GenerateProgress).unwrap().visible);
    }

    #[tokio::test(start_paused = true)]
    async fn test_simulated_progress_stops_at_cap() {
        let f = fixture(StubApi {
            generate_delay: Duration::from_secs(120),
            ..StubApi::default()
        });

        let generator = f.generator.clone();
        let task = tokio::spawn(async move { generator.generate().await });

        sleep(Duration::from_secs(60)).await;
        assert_eq!(progress(&f.dom), PROGRESS_CAP);

        task.await.unwrap().unwrap();
        assert_eq!(progress(&f.dom), 100);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_restores_trigger() {
        let f = fixture(StubApi {
            generate: Err(ApiError::Status(500)),
            generate_delay: Duration::from_millis(2500),
            ..StubApi::default()
        });

        let outcome = f.generator.generate().await.unwrap();
        assert_eq!(
            outcome,
            GenerateOutcome::Failed("HTTP error! status: 500".to_string())
        );

        let button = button(&f.dom);
        assert!(button.enabled);
        assert_eq!(button.label.as_deref(), Some(GENERATE_LABEL));

        match f.dom.content(ElementId::GenerateStatus) {
            Some(Content::Status(status)) => {
                assert_eq!(status.severity, Severity::Error);
                assert_eq!(status.text, "Error: HTTP error! status: 500");
            }
            other => panic!("unexpected status {:?}", other),
        }

        // Progress froze where the simulation was
        let frozen = progress(&f.dom);
        assert_eq!(frozen, 4);
        sleep(Duration::from_secs(5)).await;
        assert_eq!(progress(&f.dom), frozen);
    }

    #[tokio::test(start_paused = true)]
    async fn test_overlapping_calls_are_deduplicated() {
        let f = fixture(StubApi {
            generate_delay: Duration::from_secs(5),
            ..StubApi::default()
        });

        let generator = f.generator.clone();
        let first = tokio::spawn(async move { generator.generate().await });
        sleep(Duration::from_millis(100)).await;

        let second = f.generator.generate().await.unwrap();
        assert_eq!(second, GenerateOutcome::AlreadyRunning);
        assert_eq!(f.notifier.visible()[0].severity, Severity::Warning);

        assert!(matches!(
            first.await.unwrap().unwrap(),
            GenerateOutcome::Completed(_)
        ));
        assert_eq!(f.api.calls(), vec!["generate".to_string()]);

        // A fresh call is allowed once the first finished
        assert!(matches!(
            f.generator.generate().await.unwrap(),
            GenerateOutcome::Completed(_)
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_run_cancels_previous_progress_hide() {
        let f = fixture(StubApi {
            generate_delay: Duration::from_secs(5),
            ..StubApi::default()
        });

        f.generator.generate().await.unwrap();
        sleep(Duration::from_secs(1)).await;

        let generator = f.generator.clone();
        let second = tokio::spawn(async move { generator.generate().await });

        // Past the point where the first run's hide would have fired
        sleep(Duration::from_millis(1500)).await;
        assert!(f.generator.is_running());
        assert!(f.dom.element(ElementId::GenerateProgress).unwrap().visible);

        second.await.unwrap().unwrap();
        sleep(HIDE_PROGRESS_AFTER + Duration::from_millis(100)).await;
        assert!(!f.dom.element(ElementId::GenerateProgress).unwrap().visible);
    }
}
