//! # Analysis Kinds
//!
//! Parameters, wire payloads and result types for each supported analysis,
//! expressed as [`AnalysisKind`] policies for the generic service.

pub mod buffer;
pub mod common;
pub mod dataset_overlay;
pub mod geometry_overlay;
pub mod kind;

pub use buffer::{DatasetBuffer, DatasetBufferAnalystParameters, DatasetBufferAnalystResult};
pub use common::{
    BufferDistance, BufferEndType, BufferSetting, DataReturnMode, DataReturnOption,
    DatasetAnalystResult, Feature, FilterParameter, Geometry, GeometryType,
    OverlayOperationType, Point2D, Recordset,
};
pub use dataset_overlay::{
    DatasetOverlay, DatasetOverlayAnalystParameters, DatasetOverlayAnalystResult,
};
pub use geometry_overlay::{
    GeometryOverlay, GeometryOverlayAnalystParameters, GeometryOverlayAnalystResult,
};
pub use kind::{AnalysisKind, RejectReason};
