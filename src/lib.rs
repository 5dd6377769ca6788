#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # GIS Analyst Client
//!
//! Async client for remote spatial analysis services (dataset buffer, dataset
//! overlay, geometry overlay).
//!
//! ## Overview
//!
//! All spatial computation happens on the server. Each call to
//! [`AnalysisService::process`](services::AnalysisService::process) packages the
//! parameters, performs exactly one HTTP round-trip on a bounded worker pool, and
//! notifies the caller's listener exactly once with `Complete` or `Failed`.
//!
//! ## Architecture
//!
//! ```text
//! AnalysisService<K> ──process()──▶ AnalysisTask<K> ──submit()──▶ Dispatcher (N slots, FIFO)
//!        │                                 │                            │
//!        ├─ ResultHolder (last writer wins)◀┘                            └─▶ CompletionHandle
//!        └─ last_result()
//! ```
//!
//! ## Module Organization
//!
//! - [`analyst`] - Parameters, payloads and results per analysis kind
//! - [`services`] - The generic service, listeners and the result slot
//! - [`execution`] - Dispatcher, completion handles and the task round-trip
//! - [`transport`] - HTTP seam and timeout policy
//! - [`endpoint`] - Base URL normalization and request URL assembly
//! - [`config`] - Client configuration (file and environment)
//! - [`error`] - Structured error handling
//! - [`logging`] - Structured logging setup
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gis_analyst::analyst::{DatasetAnalystResult, DatasetBufferAnalystParameters};
//! use gis_analyst::services::{listener_fn, DatasetBufferAnalystService};
//! use gis_analyst::EventStatus;
//! use std::sync::Arc;
//!
//! # async fn example() -> gis_analyst::AnalystResult<()> {
//! gis_analyst::logging::init_structured_logging();
//!
//! let service = DatasetBufferAnalystService::new("http://localhost:8090/iserver/services/spatialanalyst-sample/restjsr/spatialanalyst")?;
//! service.set_timeout(10);
//!
//! let handle = service.process(
//!     DatasetBufferAnalystParameters::new("Road_L@Jingjin"),
//!     listener_fn(|result: Arc<DatasetAnalystResult>, status: EventStatus| {
//!         println!("{status}: {} features", result.feature_count);
//!     }),
//! );
//!
//! handle.wait().await;
//! println!("last result: {:?}", service.last_result());
//! # Ok(())
//! # }
//! ```

pub mod analyst;
pub mod config;
pub mod constants;
pub mod endpoint;
pub mod error;
pub mod execution;
pub mod logging;
pub mod services;
pub mod transport;

pub use config::{AnalystClientConfig, Credential};
pub use constants::EventStatus;
pub use error::{AnalystError, AnalystResult, TransportError};
pub use execution::CompletionHandle;
pub use services::{
    AnalysisListener, AnalysisService, DatasetBufferAnalystService, DatasetOverlayAnalystService,
    GeometryOverlayAnalystService,
};
pub use transport::{HttpTransport, RequestTimeout, Transport};
