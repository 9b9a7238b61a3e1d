//! Execution event listeners.

use std::sync::{Arc, Mutex, MutexGuard};

use super::BackendError;
use crate::model::ProjectResultReport;

/// Receives execution events from a backend.
///
/// Every method defaults to doing nothing.
pub trait ExecutionListener: Send + Sync {
    /// The server accepted a recipe.
    fn request_sent(&self, _report: &ProjectResultReport) {}

    /// An execution reached a terminal status.
    fn execution_finished(&self, _report: &ProjectResultReport) {}

    /// Submitting or executing a recipe failed.
    fn error_occurred(&self, _error: &BackendError) {}
}

/// The set of listeners a backend notifies.
#[derive(Default)]
pub struct ListenerRegistry {
    listeners: Mutex<Vec<Arc<dyn ExecutionListener>>>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, listener: Arc<dyn ExecutionListener>) {
        self.lock().push(listener);
    }

    /// Remove every registration of `listener`.
    pub fn remove(&self, listener: &Arc<dyn ExecutionListener>) {
        self.lock().retain(|l| !Arc::ptr_eq(l, listener));
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn notify_request_sent(&self, report: &ProjectResultReport) {
        for listener in self.snapshot() {
            listener.request_sent(report);
        }
    }

    pub fn notify_execution_finished(&self, report: &ProjectResultReport) {
        for listener in self.snapshot() {
            listener.execution_finished(report);
        }
    }

    pub fn notify_error(&self, error: &BackendError) {
        for listener in self.snapshot() {
            listener.error_occurred(error);
        }
    }

    // Listeners may add or remove listeners while being notified.
    fn snapshot(&self) -> Vec<Arc<dyn ExecutionListener>> {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Arc<dyn ExecutionListener>>> {
        self.listeners.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ExecutionStatus;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct Counting {
        sent: AtomicUsize,
        finished: AtomicUsize,
        errors: AtomicUsize,
    }

    impl ExecutionListener for Counting {
        fn request_sent(&self, _report: &ProjectResultReport) {
            self.sent.fetch_add(1, Ordering::SeqCst);
        }

        fn execution_finished(&self, _report: &ProjectResultReport) {
            self.finished.fetch_add(1, Ordering::SeqCst);
        }

        fn error_occurred(&self, _error: &BackendError) {
            self.errors.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn notifies_registered_listeners() {
        let registry = ListenerRegistry::new();
        let counting = Arc::new(Counting::default());
        registry.add(counting.clone());

        let report = ProjectResultReport::new("e", ExecutionStatus::Finished);
        registry.notify_request_sent(&report);
        registry.notify_execution_finished(&report);
        registry.notify_error(&BackendError::Api {
            status: 500,
            message: String::new(),
        });

        assert_eq!(counting.sent.load(Ordering::SeqCst), 1);
        assert_eq!(counting.finished.load(Ordering::SeqCst), 1);
        assert_eq!(counting.errors.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn remove_matches_by_identity() {
        let registry = ListenerRegistry::new();
        let first: Arc<dyn ExecutionListener> = Arc::new(Counting::default());
        let second: Arc<dyn ExecutionListener> = Arc::new(Counting::default());
        registry.add(first.clone());
        registry.add(second.clone());

        registry.remove(&first);

        assert_eq!(registry.len(), 1);
        registry.remove(&second);
        assert!(registry.is_empty());
    }

    #[test]
    fn removing_unknown_listener_is_noop() {
        let registry = ListenerRegistry::new();
        let known: Arc<dyn ExecutionListener> = Arc::new(Counting::default());
        let unknown: Arc<dyn ExecutionListener> = Arc::new(Counting::default());
        registry.add(known);

        registry.remove(&unknown);

        assert_eq!(registry.len(), 1);
    }
}
