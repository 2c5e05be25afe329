use crate::config::UiConfig;
use crate::dom::{Dom, DomError, Element, ElementId};
use crate::scheduler::Scheduler;
use crate::view::{Content, Severity, Toast};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Transient toast messages in the toast container.
///
/// Each toast stays for the display duration, is then marked as leaving for
/// the exit animation, and is removed after that. There is no queue limit;
/// concurrent toasts simply stack.
pub struct Notifier {
    dom: Arc<dyn Dom>,
    scheduler: Scheduler,
    display: Duration,
    exit: Duration,
    next_id: AtomicU64,
}

impl Notifier {
    pub fn new(dom: Arc<dyn Dom>, scheduler: Scheduler, ui: &UiConfig) -> Self {
        Self {
            dom,
            scheduler,
            display: ui.toast_duration(),
            exit: ui.toast_exit(),
            next_id: AtomicU64::new(1),
        }
    }

    /// Show a toast and schedule its removal. Returns the toast id.
    pub fn notify(&self, message: impl Into<String>, severity: Severity) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let toast = Toast {
            id,
            message: message.into(),
            severity,
            leaving: false,
        };
        debug!(id, %severity, message = %toast.message, "Showing toast");

        let mut pending = Some(toast);
        if let Err(e) = update_toasts(self.dom.as_ref(), &mut |toasts: &mut Vec<Toast>| {
            if let Some(t) = pending.take() {
                toasts.push(t);
            }
        }) {
            warn!("Toast dropped: {}", e);
            return id;
        }

        let dom = self.dom.clone();
        self.scheduler.after(self.display, move || {
            if let Err(e) = update_toasts(dom.as_ref(), &mut |toasts: &mut Vec<Toast>| {
                if let Some(t) = toasts.iter_mut().find(|t| t.id == id) {
                    t.leaving = true;
                }
            }) {
                debug!(id, "Toast not marked leaving: {}", e);
            }
        });

        let dom = self.dom.clone();
        self.scheduler.after(self.display + self.exit, move || {
            if let Err(e) = update_toasts(dom.as_ref(), &mut |toasts: &mut Vec<Toast>| {
                toasts.retain(|t| t.id != id)
            }) {
                debug!(id, "Toast not removed: {}", e);
            }
        });

        id
    }

    /// Remove a toast right away.
    pub fn dismiss(&self, id: u64) {
        if let Err(e) = update_toasts(self.dom.as_ref(), &mut |toasts: &mut Vec<Toast>| {
            toasts.retain(|t| t.id != id)
        }) {
            debug!(id, "Toast not dismissed: {}", e);
        }
    }

    /// Toasts currently in the container, oldest first.
    pub fn visible(&self) -> Vec<Toast> {
        match self.dom.content(ElementId::ToastContainer) {
            Some(Content::Toasts(toasts)) => toasts,
            _ => Vec::new(),
        }
    }
}

fn update_toasts(dom: &dyn Dom, f: &mut dyn FnMut(&mut Vec<Toast>)) -> Result<(), DomError> {
    dom.update(ElementId::ToastContainer, &mut |el: &mut Element| {
        if !matches!(el.content, Content::Toasts(_)) {
            el.content = Content::Toasts(Vec::new());
        }
        if let Content::Toasts(toasts) = &mut el.content {
            f(toasts);
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::MemoryDom;
    use tokio::time::sleep;

    fn notifier() -> (Notifier, Scheduler) {
        let scheduler = Scheduler::new();
        let dom: Arc<dyn Dom> = Arc::new(MemoryDom::dashboard(&UiConfig::default()));
        (
            Notifier::new(dom, scheduler.clone(), &UiConfig::default()),
            scheduler,
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_toast_leaves_then_disappears() {
        let (notifier, _scheduler) = notifier();
        let id = notifier.notify("Saved", Severity::Success);

        let toasts = notifier.visible();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].id, id);
        assert!(!toasts[0].leaving);

        sleep(Duration::from_millis(3100)).await;
        let toasts = notifier.visible();
        assert_eq!(toasts.len(), 1);
        assert!(toasts[0].leaving);

        sleep(Duration::from_millis(300)).await;
        assert!(notifier.visible().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_toasts_overlap_without_limit() {
        let (notifier, _scheduler) = notifier();
        for i in 0..5 {
            notifier.notify(format!("toast {}", i), Severity::Info);
        }
        assert_eq!(notifier.visible().len(), 5);

        sleep(Duration::from_secs(4)).await;
        assert!(notifier.visible().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dismiss_removes_immediately() {
        let (notifier, _scheduler) = notifier();
        let first = notifier.notify("first", Severity::Info);
        notifier.notify("second", Severity::Warning);

        notifier.dismiss(first);
        let toasts = notifier.visible();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].message, "second");
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_keeps_toasts_in_place() {
        let (notifier, scheduler) = notifier();
        notifier.notify("stays", Severity::Info);
        scheduler.shutdown();

        sleep(Duration::from_secs(5)).await;
        assert_eq!(notifier.visible().len(), 1);
    }

    #[tokio::test]
    async fn test_missing_container_is_tolerated() {
        let dom: Arc<dyn Dom> = Arc::new(MemoryDom::new());
        let notifier = Notifier::new(dom, Scheduler::new(), &UiConfig::default());
        notifier.notify("nowhere to go", Severity::Error);
        assert!(notifier.visible().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_container_removed_mid_lifecycle_is_tolerated() {
        let dom = Arc::new(MemoryDom::dashboard(&UiConfig::default()));
        let notifier = Notifier::new(dom.clone(), Scheduler::new(), &UiConfig::default());
        let id = notifier.notify("orphaned", Severity::Info);

        dom.remove(ElementId::ToastContainer);
        notifier.dismiss(id);
        sleep(Duration::from_secs(4)).await;

        assert!(dom.element(ElementId::ToastContainer).is_none());
        assert!(notifier.visible().is_empty());
    }
}
