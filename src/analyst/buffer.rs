//! Dataset buffer analysis: buffers the features of a dataset that match a filter.

use serde::Serialize;

use super::common::{BufferSetting, DataReturnOption, DatasetAnalystResult, FilterParameter};
use super::kind::{require_non_empty, AnalysisKind, RejectReason};

#[derive(Debug, Clone, PartialEq)]
pub struct DatasetBufferAnalystParameters {
    /// Dataset identifier, e.g. `Roads@Changchun`
    pub dataset: String,
    pub filter_query_parameter: FilterParameter,
    pub buffer_setting: BufferSetting,
    pub result_setting: DataReturnOption,
    pub is_attribute_retained: bool,
    pub is_union: bool,
}

impl DatasetBufferAnalystParameters {
    pub fn new(dataset: impl Into<String>) -> Self {
        Self {
            dataset: dataset.into(),
            filter_query_parameter: FilterParameter::default(),
            buffer_setting: BufferSetting::default(),
            result_setting: DataReturnOption::default(),
            is_attribute_retained: true,
            is_union: false,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BufferPayload<'a> {
    is_attribute_retained: bool,
    is_union: bool,
    buffer_analyst_parameter: &'a BufferSetting,
    filter_query_parameter: &'a FilterParameter,
    data_return_option: &'a DataReturnOption,
}

pub type DatasetBufferAnalystResult = DatasetAnalystResult;

/// `POST {base}/datasets/{dataset}/buffer.json`
#[derive(Debug, Clone, Copy, Default)]
pub struct DatasetBuffer;

impl AnalysisKind for DatasetBuffer {
    type Params = DatasetBufferAnalystParameters;
    type Output = DatasetBufferAnalystResult;

    const NAME: &'static str = "dataset-buffer";

    fn validate(params: &Self::Params) -> Result<(), RejectReason> {
        require_non_empty(&params.dataset, "dataset")
    }

    fn payload(params: &Self::Params) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(BufferPayload {
            is_attribute_retained: params.is_attribute_retained,
            is_union: params.is_union,
            buffer_analyst_parameter: &params.buffer_setting,
            filter_query_parameter: &params.filter_query_parameter,
            data_return_option: &params.result_setting,
        })
    }

    fn resource_path(params: &Self::Params) -> Vec<&str> {
        vec!["datasets", params.dataset.as_str(), "buffer.json"]
    }
}
