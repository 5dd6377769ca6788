//! Caller-supplied completion callbacks.

use async_trait::async_trait;
use std::sync::Arc;

use crate::constants::EventStatus;

/// Receives exactly one notification per accepted submission
///
/// `result` is the service's current result at the moment the task finished:
/// the freshly decoded response on success, or whatever was stored before on
/// failure (the empty default if nothing has succeeded yet).
#[async_trait]
pub trait AnalysisListener<R>: Send + Sync + 'static
where
    R: Send + Sync + 'static,
{
    async fn on_status_changed(&self, result: Arc<R>, status: EventStatus);
}

/// Adapter turning a plain closure into a listener
pub struct ListenerFn<F>(F);

impl<F> std::fmt::Debug for ListenerFn<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ListenerFn")
    }
}

/// Wrap a closure as an [`AnalysisListener`]
///
/// ```rust
/// use gis_analyst::services::listener_fn;
/// use gis_analyst::analyst::DatasetAnalystResult;
/// use gis_analyst::EventStatus;
/// use std::sync::Arc;
///
/// let listener = listener_fn(|result: Arc<DatasetAnalystResult>, status: EventStatus| {
///     println!("{status}: {} features", result.feature_count);
/// });
/// # let _ = listener;
/// ```
pub fn listener_fn<R, F>(f: F) -> Arc<ListenerFn<F>>
where
    R: Send + Sync + 'static,
    F: Fn(Arc<R>, EventStatus) + Send + Sync + 'static,
{
    Arc::new(ListenerFn(f))
}

#[async_trait]
impl<R, F> AnalysisListener<R> for ListenerFn<F>
where
    R: Send + Sync + 'static,
    F: Fn(Arc<R>, EventStatus) + Send + Sync + 'static,
{
    async fn on_status_changed(&self, result: Arc<R>, status: EventStatus) {
        (self.0)(result, status)
    }
}
