//! # Analysis Service
//!
//! Gatekeeper and orchestrator for one analysis kind. The service validates a
//! submission, wraps it in an [`AnalysisTask`], hands it to its own
//! [`Dispatcher`], and keeps the latest decoded result.

use parking_lot::RwLock;
use std::marker::PhantomData;
use std::sync::Arc;
use url::Url;
use uuid::Uuid;

use super::listener::AnalysisListener;
use super::result_holder::ResultHolder;
use crate::analyst::{
    AnalysisKind, DatasetBuffer, DatasetOverlay, GeometryOverlay, RejectReason,
};
use crate::config::AnalystClientConfig;
use crate::endpoint::{format_base_url, Endpoint};
use crate::error::AnalystResult;
use crate::execution::{AnalysisTask, CompletionHandle, Dispatcher, DispatcherUsage};
use crate::logging::log_rejected_submission;
use crate::transport::{HttpTransport, RequestTimeout, Transport};

pub type DatasetBufferAnalystService = AnalysisService<DatasetBuffer>;
pub type DatasetOverlayAnalystService = AnalysisService<DatasetOverlay>;
pub type GeometryOverlayAnalystService = AnalysisService<GeometryOverlay>;

/// Client for one kind of remote spatial analysis
///
/// Must be created inside a Tokio runtime; the service's dispatcher runs on it.
///
/// ```rust,no_run
/// use gis_analyst::analyst::DatasetBufferAnalystParameters;
/// use gis_analyst::services::{listener_fn, DatasetBufferAnalystService};
/// use gis_analyst::EventStatus;
///
/// # async fn example() -> gis_analyst::AnalystResult<()> {
/// let service = DatasetBufferAnalystService::new(
///     "http://localhost:8090/iserver/services/spatialanalyst-sample/restjsr/spatialanalyst",
/// )?;
///
/// let handle = service.process(
///     DatasetBufferAnalystParameters::new("Road_L@Jingjin"),
///     listener_fn(|result: std::sync::Arc<gis_analyst::analyst::DatasetAnalystResult>, status: EventStatus| {
///         println!("buffer {status}: {:?}", result.dataset);
///     }),
/// );
/// handle.wait().await;
/// service.shutdown().await;
/// # Ok(())
/// # }
/// ```
pub struct AnalysisService<K: AnalysisKind> {
    endpoint: Option<Arc<Endpoint>>,
    timeout: RwLock<RequestTimeout>,
    transport: Arc<dyn Transport>,
    holder: ResultHolder<K::Output>,
    dispatcher: Dispatcher,
    _kind: PhantomData<fn() -> K>,
}

impl<K: AnalysisKind> std::fmt::Debug for AnalysisService<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalysisService")
            .field("kind", &K::NAME)
            .field(
                "base_url",
                &self.endpoint.as_ref().map(|e| e.base_url().as_str()),
            )
            .field("timeout", &*self.timeout.read())
            .field("dispatcher", &self.dispatcher)
            .finish()
    }
}

impl<K: AnalysisKind> AnalysisService<K> {
    /// Service for `url` with the HTTP transport and default settings
    pub fn new(url: &str) -> AnalystResult<Self> {
        Self::with_config(AnalystClientConfig::with_base_url(url))
    }

    /// Service configured from the config file and `GIS_ANALYST_*` environment variables
    pub fn from_config() -> AnalystResult<Self> {
        Self::with_config(AnalystClientConfig::load()?)
    }

    /// Service built from a full configuration, using the HTTP transport
    pub fn with_config(config: AnalystClientConfig) -> AnalystResult<Self> {
        let transport = Arc::new(HttpTransport::new(config.user_agent.as_deref())?);
        Self::with_transport(config, transport)
    }

    /// Service with an injected transport
    ///
    /// An empty base URL is accepted; every `process` call is then rejected.
    pub fn with_transport(
        config: AnalystClientConfig,
        transport: Arc<dyn Transport>,
    ) -> AnalystResult<Self> {
        config.validate()?;

        let endpoint = format_base_url(&config.base_url)?
            .map(|base| Arc::new(Endpoint::new(base, config.credential.clone())));

        let dispatcher_id = format!("{}-{}", K::NAME, &Uuid::new_v4().simple().to_string()[..8]);
        let dispatcher = Dispatcher::new(dispatcher_id, config.max_concurrent_requests)?;

        Ok(Self {
            endpoint,
            timeout: RwLock::new(RequestTimeout::from_seconds(config.timeout_seconds)),
            transport,
            holder: ResultHolder::default(),
            dispatcher,
            _kind: PhantomData,
        })
    }

    /// Submit one analysis request
    ///
    /// Returns at once. A submission without a base URL or with a missing
    /// required field is dropped: no task runs, the listener is never called,
    /// and the returned handle is detached.
    pub fn process(
        &self,
        params: K::Params,
        listener: Arc<dyn AnalysisListener<K::Output>>,
    ) -> CompletionHandle {
        let endpoint = match self.accept(&params) {
            Ok(endpoint) => endpoint,
            Err(reason) => {
                log_rejected_submission(K::NAME, &reason.to_string());
                return CompletionHandle::detached();
            }
        };

        let task = AnalysisTask::<K>::new(
            params,
            listener,
            endpoint,
            *self.timeout.read(),
            self.transport.clone(),
            self.holder.clone(),
        );
        let task_id = task.task_id();
        self.dispatcher.submit(task_id, task.run())
    }

    fn accept(&self, params: &K::Params) -> Result<Arc<Endpoint>, RejectReason> {
        let endpoint = self.endpoint.clone().ok_or(RejectReason::BaseUrlUnset)?;
        K::validate(params)?;
        Ok(endpoint)
    }

    /// Timeout for tasks submitted from now on: negative uses the 5 s default, zero disables it
    pub fn set_timeout(&self, seconds: i64) {
        *self.timeout.write() = RequestTimeout::from_seconds(seconds);
    }

    pub fn timeout(&self) -> RequestTimeout {
        *self.timeout.read()
    }

    /// Most recently decoded result, or the empty default
    ///
    /// May be stale while requests are in flight; wait on the handle first for
    /// a value that reflects a specific submission.
    pub fn last_result(&self) -> Arc<K::Output> {
        self.holder.current()
    }

    pub fn base_url(&self) -> Option<&Url> {
        self.endpoint.as_ref().map(|e| e.base_url())
    }

    pub fn usage(&self) -> DispatcherUsage {
        self.dispatcher.usage()
    }

    /// Run every accepted submission to completion and stop the worker pool
    pub async fn shutdown(&self) {
        self.dispatcher.shutdown().await;
    }
}
