//! # Analysis Services
//!
//! The caller-facing API: one generic service per analysis kind, the listener
//! trait it notifies, and the result slot it maintains.

pub mod analysis_service;
pub mod listener;
pub mod result_holder;

pub use analysis_service::{
    AnalysisService, DatasetBufferAnalystService, DatasetOverlayAnalystService,
    GeometryOverlayAnalystService,
};
pub use listener::{listener_fn, AnalysisListener, ListenerFn};
pub use result_holder::ResultHolder;
