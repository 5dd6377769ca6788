use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;

use gis_analyst::{AnalysisListener, EventStatus};

/// Listener that records every notification it receives
#[derive(Debug)]
pub struct RecordingListener<R> {
    pub label: &'static str,
    calls: Mutex<Vec<(Arc<R>, EventStatus)>>,
    /// Shared log of labels in notification order, across listeners
    order: Option<Arc<Mutex<Vec<&'static str>>>>,
}

impl<R> RecordingListener<R> {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            label: "listener",
            calls: Mutex::new(Vec::new()),
            order: None,
        })
    }

    pub fn labelled(label: &'static str, order: Arc<Mutex<Vec<&'static str>>>) -> Arc<Self> {
        Arc::new(Self {
            label,
            calls: Mutex::new(Vec::new()),
            order: Some(order),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn statuses(&self) -> Vec<EventStatus> {
        self.calls.lock().iter().map(|(_, status)| *status).collect()
    }

    pub fn last_result(&self) -> Option<Arc<R>> {
        self.calls.lock().last().map(|(result, _)| result.clone())
    }
}

#[async_trait]
impl<R> AnalysisListener<R> for RecordingListener<R>
where
    R: Send + Sync + 'static,
{
    async fn on_status_changed(&self, result: Arc<R>, status: EventStatus) {
        self.calls.lock().push((result, status));
        if let Some(order) = &self.order {
            order.lock().push(self.label);
        }
    }
}
