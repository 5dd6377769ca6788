//! Dataset overlay analysis: overlays a source dataset with an operate dataset
//! or a set of operate regions.

use serde::Serialize;

use super::common::{
    DataReturnOption, DatasetAnalystResult, FilterParameter, Geometry, OverlayOperationType,
};
use super::kind::{require_non_empty, AnalysisKind, RejectReason};

#[derive(Debug, Clone, PartialEq)]
pub struct DatasetOverlayAnalystParameters {
    pub source_dataset: String,
    pub operate_dataset: String,
    pub operation: OverlayOperationType,
    pub source_dataset_filter: FilterParameter,
    pub operate_dataset_filter: FilterParameter,
    pub operate_regions: Vec<Geometry>,
    pub tolerance: f64,
    pub result_setting: DataReturnOption,
    /// Source fields to keep in the output; empty keeps none
    pub source_dataset_fields: Vec<String>,
    pub operate_dataset_fields: Vec<String>,
}

impl DatasetOverlayAnalystParameters {
    pub fn new(
        source_dataset: impl Into<String>,
        operate_dataset: impl Into<String>,
        operation: OverlayOperationType,
    ) -> Self {
        Self {
            source_dataset: source_dataset.into(),
            operate_dataset: operate_dataset.into(),
            operation,
            source_dataset_filter: FilterParameter::default(),
            operate_dataset_filter: FilterParameter::default(),
            operate_regions: Vec::new(),
            tolerance: 0.0,
            result_setting: DataReturnOption::default(),
            source_dataset_fields: Vec::new(),
            operate_dataset_fields: Vec::new(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OverlayPayload<'a> {
    operation: OverlayOperationType,
    operate_dataset: &'a str,
    operate_dataset_filter: &'a FilterParameter,
    operate_regions: &'a [Geometry],
    source_dataset_filter: &'a FilterParameter,
    tolerance: f64,
    data_return_option: &'a DataReturnOption,
    source_dataset_fields: &'a [String],
    operate_dataset_fields: &'a [String],
}

pub type DatasetOverlayAnalystResult = DatasetAnalystResult;

/// `POST {base}/datasets/{sourceDataset}/overlay.json`
#[derive(Debug, Clone, Copy, Default)]
pub struct DatasetOverlay;

impl AnalysisKind for DatasetOverlay {
    type Params = DatasetOverlayAnalystParameters;
    type Output = DatasetOverlayAnalystResult;

    const NAME: &'static str = "dataset-overlay";

    fn validate(params: &Self::Params) -> Result<(), RejectReason> {
        require_non_empty(&params.operate_dataset, "operateDataset")?;
        require_non_empty(&params.source_dataset, "sourceDataset")
    }

    fn payload(params: &Self::Params) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(OverlayPayload {
            operation: params.operation,
            operate_dataset: &params.operate_dataset,
            operate_dataset_filter: &params.operate_dataset_filter,
            operate_regions: &params.operate_regions,
            source_dataset_filter: &params.source_dataset_filter,
            tolerance: params.tolerance,
            data_return_option: &params.result_setting,
            source_dataset_fields: &params.source_dataset_fields,
            operate_dataset_fields: &params.operate_dataset_fields,
        })
    }

    fn resource_path(params: &Self::Params) -> Vec<&str> {
        vec!["datasets", params.source_dataset.as_str(), "overlay.json"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_validation_requires_both_datasets() {
        let valid = DatasetOverlayAnalystParameters::new(
            "Landuse_R@Jingjin",
            "Lake_R@Jingjin",
            OverlayOperationType::Clip,
        );
        assert!(DatasetOverlay::validate(&valid).is_ok());

        let mut missing_operate = valid.clone();
        missing_operate.operate_dataset.clear();
        assert_eq!(
            DatasetOverlay::validate(&missing_operate),
            Err(RejectReason::MissingField("operateDataset"))
        );

        let mut missing_source = valid;
        missing_source.source_dataset.clear();
        assert_eq!(
            DatasetOverlay::validate(&missing_source),
            Err(RejectReason::MissingField("sourceDataset"))
        );
    }

    #[test]
    fn test_payload_and_path() {
        let mut params = DatasetOverlayAnalystParameters::new(
            "Landuse_R@Jingjin",
            "Lake_R@Jingjin",
            OverlayOperationType::Union,
        );
        params.tolerance = 0.5;
        params.source_dataset_fields = vec!["NAME".to_string()];

        let payload = DatasetOverlay::payload(&params).unwrap();
        assert_eq!(payload["operation"], "UNION");
        assert_eq!(payload["operateDataset"], "Lake_R@Jingjin");
        assert_eq!(payload["tolerance"], 0.5);
        assert_eq!(payload["sourceDatasetFields"], json!(["NAME"]));
        assert_eq!(payload["operateRegions"], json!([]));
        assert!(payload.get("sourceDataset").is_none());

        assert_eq!(
            DatasetOverlay::resource_path(&params),
            vec!["datasets", "Landuse_R@Jingjin", "overlay.json"]
        );
    }
}
