//! # Analysis Task
//!
//! One request/response cycle for one submission:
//!
//! ```text
//! Created → Running → CompletedOk     → listener(current result, Complete)
//!                   └→ CompletedFailed → listener(current result, Failed) + failure log
//! ```
//!
//! Every failure between encoding and decoding is caught here and turned into a
//! `Failed` notification, panics included, so nothing escapes to the
//! dispatcher's worker. The listener is called exactly once, after the outcome
//! is settled.

use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::analyst::AnalysisKind;
use crate::constants::EventStatus;
use crate::endpoint::Endpoint;
use super::dispatcher::panic_message;
use crate::error::{AnalystError, AnalystResult};
use crate::logging::log_analysis_failure;
use crate::services::{AnalysisListener, ResultHolder};
use crate::transport::{RequestTimeout, Transport};

/// What a successful round-trip did to the result holder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseOutcome {
    /// A non-empty body was decoded and replaced the stored result
    Stored,
    /// The server answered with an empty body; the stored result is untouched
    EmptyBody,
}

pub struct AnalysisTask<K: AnalysisKind> {
    task_id: Uuid,
    params: K::Params,
    listener: Arc<dyn AnalysisListener<K::Output>>,
    endpoint: Arc<Endpoint>,
    timeout: RequestTimeout,
    transport: Arc<dyn Transport>,
    holder: ResultHolder<K::Output>,
}

impl<K: AnalysisKind> std::fmt::Debug for AnalysisTask<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalysisTask")
            .field("kind", &K::NAME)
            .field("task_id", &self.task_id)
            .field("base_url", &self.endpoint.base_url().as_str())
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl<K: AnalysisKind> AnalysisTask<K> {
    pub fn new(
        params: K::Params,
        listener: Arc<dyn AnalysisListener<K::Output>>,
        endpoint: Arc<Endpoint>,
        timeout: RequestTimeout,
        transport: Arc<dyn Transport>,
        holder: ResultHolder<K::Output>,
    ) -> Self {
        Self {
            task_id: Uuid::new_v4(),
            params,
            listener,
            endpoint,
            timeout,
            transport,
            holder,
        }
    }

    pub fn task_id(&self) -> Uuid {
        self.task_id
    }

    /// Run the round-trip and notify the listener once
    pub async fn run(self) {
        debug!(
            service = K::NAME,
            task_id = %self.task_id,
            timeout = ?self.timeout,
            "Analysis task running"
        );

        let status = match AssertUnwindSafe(self.execute()).catch_unwind().await {
            Ok(Ok(outcome)) => {
                debug!(
                    service = K::NAME,
                    task_id = %self.task_id,
                    outcome = ?outcome,
                    "Analysis task completed"
                );
                EventStatus::Complete
            }
            Ok(Err(error)) => {
                log_analysis_failure(K::NAME, self.task_id, &error);
                EventStatus::Failed
            }
            Err(panic) => {
                let error = AnalystError::Runtime(format!(
                    "analysis round-trip panicked: {}",
                    panic_message(&*panic)
                ));
                log_analysis_failure(K::NAME, self.task_id, &error);
                EventStatus::Failed
            }
        };

        self.listener
            .on_status_changed(self.holder.current(), status)
            .await;
    }

    async fn execute(&self) -> AnalystResult<ResponseOutcome> {
        let payload = K::payload(&self.params).map_err(AnalystError::Encoding)?;
        let body = serde_json::to_string(&payload).map_err(AnalystError::Encoding)?;
        let url = self.endpoint.service_url(&K::resource_path(&self.params))?;

        let response = self
            .transport
            .post(&url, body, self.timeout.as_duration())
            .await?;

        match response {
            Some(text) if !text.is_empty() => {
                let decoded: K::Output =
                    serde_json::from_str(&text).map_err(AnalystError::Decoding)?;
                self.holder.replace(decoded);
                Ok(ResponseOutcome::Stored)
            }
            _ => Ok(ResponseOutcome::EmptyBody),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyst::{
        DatasetAnalystResult, DatasetBuffer, DatasetBufferAnalystParameters,
    };
    use crate::endpoint::format_base_url;
    use crate::error::TransportError;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::time::Duration;
    use url::Url;

    struct ScriptedTransport {
        reply: Mutex<Option<Result<Option<String>, TransportError>>>,
        seen: Mutex<Vec<(String, String, Option<Duration>)>>,
    }

    impl ScriptedTransport {
        fn new(reply: Result<Option<String>, TransportError>) -> Arc<Self> {
            Arc::new(Self {
                reply: Mutex::new(Some(reply)),
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl Transport for ScriptedTransport {
        async fn post(
            &self,
            url: &Url,
            body: String,
            timeout: Option<Duration>,
        ) -> Result<Option<String>, TransportError> {
            self.seen.lock().push((url.to_string(), body, timeout));
            self.reply.lock().take().unwrap_or(Ok(None))
        }
    }

    #[derive(Default)]
    struct Recorder {
        calls: Mutex<Vec<(u64, EventStatus)>>,
    }

    #[async_trait]
    impl AnalysisListener<DatasetAnalystResult> for Recorder {
        async fn on_status_changed(&self, result: Arc<DatasetAnalystResult>, status: EventStatus) {
            self.calls.lock().push((result.feature_count, status));
        }
    }

    fn endpoint() -> Arc<Endpoint> {
        let base = format_base_url("http://gis.example.com/spatialanalyst")
            .unwrap()
            .unwrap();
        Arc::new(Endpoint::new(base, None))
    }

    fn task(
        transport: Arc<ScriptedTransport>,
        recorder: Arc<Recorder>,
        holder: ResultHolder<DatasetAnalystResult>,
    ) -> AnalysisTask<DatasetBuffer> {
        AnalysisTask::new(
            DatasetBufferAnalystParameters::new("Roads"),
            recorder,
            endpoint(),
            RequestTimeout::from_seconds(-1),
            transport,
            holder,
        )
    }

    #[tokio::test]
    async fn test_success_stores_and_reports_complete() {
        let transport = ScriptedTransport::new(Ok(Some(r#"{"featureCount":3}"#.to_string())));
        let recorder = Arc::new(Recorder::default());
        let holder = ResultHolder::default();

        task(transport.clone(), recorder.clone(), holder.clone())
            .run()
            .await;

        assert_eq!(*recorder.calls.lock(), vec![(3, EventStatus::Complete)]);
        assert_eq!(holder.current().feature_count, 3);

        let seen = transport.seen.lock();
        assert_eq!(seen.len(), 1);
        assert_eq!(
            seen[0].0,
            "http://gis.example.com/spatialanalyst/datasets/Roads/buffer.json?asynchronousReturn=false&returnContent=true"
        );
        assert!(seen[0].1.contains("\"bufferAnalystParameter\""));
        assert_eq!(seen[0].2, Some(Duration::from_secs(5)));
    }

    #[tokio::test]
    async fn test_empty_body_keeps_previous_result() {
        let transport = ScriptedTransport::new(Ok(Some(String::new())));
        let recorder = Arc::new(Recorder::default());
        let holder = ResultHolder::new(DatasetAnalystResult {
            feature_count: 9,
            ..DatasetAnalystResult::default()
        });

        task(transport, recorder.clone(), holder.clone()).run().await;

        assert_eq!(*recorder.calls.lock(), vec![(9, EventStatus::Complete)]);
        assert_eq!(holder.current().feature_count, 9);
    }

    #[tokio::test]
    async fn test_transport_failure_reports_failed_with_prior_value() {
        let transport = ScriptedTransport::new(Err(TransportError::connection("refused")));
        let recorder = Arc::new(Recorder::default());
        let holder = ResultHolder::new(DatasetAnalystResult {
            feature_count: 4,
            ..DatasetAnalystResult::default()
        });

        task(transport, recorder.clone(), holder.clone()).run().await;

        assert_eq!(*recorder.calls.lock(), vec![(4, EventStatus::Failed)]);
        assert_eq!(holder.current().feature_count, 4);
    }

    struct PanickingTransport;

    #[async_trait]
    impl Transport for PanickingTransport {
        async fn post(
            &self,
            _url: &Url,
            _body: String,
            _timeout: Option<Duration>,
        ) -> Result<Option<String>, TransportError> {
            panic!("transport exploded");
        }
    }

    #[tokio::test]
    async fn test_transport_panic_reports_failed_once() {
        let recorder = Arc::new(Recorder::default());
        let holder = ResultHolder::new(DatasetAnalystResult {
            feature_count: 6,
            ..DatasetAnalystResult::default()
        });

        AnalysisTask::<DatasetBuffer>::new(
            DatasetBufferAnalystParameters::new("Roads"),
            recorder.clone(),
            endpoint(),
            RequestTimeout::Default,
            Arc::new(PanickingTransport),
            holder.clone(),
        )
        .run()
        .await;

        assert_eq!(*recorder.calls.lock(), vec![(6, EventStatus::Failed)]);
        assert_eq!(holder.current().feature_count, 6);
    }

    #[tokio::test]
    async fn test_malformed_body_reports_failed() {
        let transport = ScriptedTransport::new(Ok(Some("<html>oops</html>".to_string())));
        let recorder = Arc::new(Recorder::default());
        let holder = ResultHolder::default();

        task(transport, recorder.clone(), holder.clone()).run().await;

        assert_eq!(*recorder.calls.lock(), vec![(0, EventStatus::Failed)]);
        assert_eq!(*holder.current(), DatasetAnalystResult::default());
    }
}
