//! Geometry overlay analysis on two ad-hoc geometries.

use serde::{Deserialize, Serialize};

use super::common::{Geometry, OverlayOperationType};
use super::kind::{AnalysisKind, RejectReason};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeometryOverlayAnalystParameters {
    pub source_geometry: Option<Geometry>,
    pub operate_geometry: Option<Geometry>,
    pub operation: OverlayOperationType,
}

impl GeometryOverlayAnalystParameters {
    pub fn new(source: Geometry, operate: Geometry, operation: OverlayOperationType) -> Self {
        Self {
            source_geometry: Some(source),
            operate_geometry: Some(operate),
            operation,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GeometryOverlayPayload<'a> {
    operation: OverlayOperationType,
    source_geometry: Option<&'a Geometry>,
    operate_geometry: Option<&'a Geometry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeometryOverlayAnalystResult {
    pub succeed: bool,
    pub message: Option<String>,
    pub result_geometry: Option<Geometry>,
}

/// `POST {base}/geometry/overlay.json`
#[derive(Debug, Clone, Copy, Default)]
pub struct GeometryOverlay;

impl AnalysisKind for GeometryOverlay {
    type Params = GeometryOverlayAnalystParameters;
    type Output = GeometryOverlayAnalystResult;

    const NAME: &'static str = "geometry-overlay";

    fn validate(params: &Self::Params) -> Result<(), RejectReason> {
        if params.operate_geometry.is_none() {
            return Err(RejectReason::MissingField("operateGeometry"));
        }
        if params.source_geometry.is_none() {
            return Err(RejectReason::MissingField("sourceGeometry"));
        }
        Ok(())
    }

    fn payload(params: &Self::Params) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(GeometryOverlayPayload {
            operation: params.operation,
            source_geometry: params.source_geometry.as_ref(),
            operate_geometry: params.operate_geometry.as_ref(),
        })
    }

    fn resource_path(_params: &Self::Params) -> Vec<&str> {
        vec!["geometry", "overlay.json"]
    }
}
