//! Wire types shared by the analysis kinds.
//!
//! Field names follow the server's camelCase JSON; enum values are the
//! server's upper-case constants.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BufferEndType {
    #[default]
    Round,
    Flat,
}

/// Buffer radius, either a constant or a field expression evaluated per feature
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BufferDistance {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<String>,
    pub value: f64,
}

impl BufferDistance {
    pub fn value(value: f64) -> Self {
        Self { exp: None, value }
    }

    pub fn expression(exp: impl Into<String>) -> Self {
        Self {
            exp: Some(exp.into()),
            value: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BufferSetting {
    pub end_type: BufferEndType,
    pub left_distance: BufferDistance,
    pub right_distance: BufferDistance,
    /// Segments used to approximate a half circle
    pub semicircle_line_segment: u32,
}

impl Default for BufferSetting {
    fn default() -> Self {
        Self {
            end_type: BufferEndType::Round,
            left_distance: BufferDistance::value(100.0),
            right_distance: BufferDistance::value(100.0),
            semicircle_line_segment: 4,
        }
    }
}

/// Attribute filter applied to a dataset before analysis
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterParameter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute_filter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub fields: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_by: Option<String>,
}

impl FilterParameter {
    pub fn attribute(filter: impl Into<String>) -> Self {
        Self {
            attribute_filter: Some(filter.into()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DataReturnMode {
    DatasetOnly,
    DatasetAndRecordset,
    #[default]
    RecordsetOnly,
}

/// How the server should return the analysis output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataReturnOption {
    pub expect_count: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dataset: Option<String>,
    pub data_return_mode: DataReturnMode,
    pub delete_existed_dataset: bool,
}

impl Default for DataReturnOption {
    fn default() -> Self {
        Self {
            expect_count: 1000,
            dataset: None,
            data_return_mode: DataReturnMode::RecordsetOnly,
            delete_existed_dataset: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OverlayOperationType {
    Clip,
    Erase,
    Identity,
    #[default]
    Intersect,
    Union,
    Update,
    Xor,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GeometryType {
    #[default]
    Point,
    Line,
    Region,
    Text,
    /// Any type this client has no dedicated variant for
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Server-side geometry: a point list split into parts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Geometry {
    pub id: i64,
    #[serde(rename = "type")]
    pub geometry_type: GeometryType,
    /// Point count of each part
    pub parts: Vec<u32>,
    pub points: Vec<Point2D>,
}

impl Geometry {
    /// Single-part closed region from a ring of points
    pub fn region(points: Vec<Point2D>) -> Self {
        Self {
            id: 0,
            geometry_type: GeometryType::Region,
            parts: vec![u32::try_from(points.len()).unwrap_or(u32::MAX)],
            points,
        }
    }

    pub fn line(points: Vec<Point2D>) -> Self {
        Self {
            geometry_type: GeometryType::Line,
            ..Self::region(points)
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Feature {
    pub field_names: Vec<String>,
    pub field_values: Vec<String>,
    pub geometry: Option<Geometry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Recordset {
    pub dataset_name: String,
    pub fields: Vec<String>,
    pub field_captions: Vec<String>,
    pub field_types: Vec<String>,
    pub features: Vec<Feature>,
}

/// Response of the dataset-level analyses (buffer and overlay)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DatasetAnalystResult {
    pub succeed: bool,
    pub message: Option<String>,
    /// Result dataset name when the server persisted the output
    pub dataset: Option<String>,
    pub recordset: Option<Recordset>,
    pub feature_count: u64,
}
