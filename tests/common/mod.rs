#![allow(dead_code)]

pub mod mock_transport;
pub mod recording_listener;
pub mod strategies;

pub use mock_transport::*;
pub use recording_listener::*;

pub const TEST_BASE_URL: &str =
    "http://gis.example.com/iserver/services/spatialanalyst-sample/restjsr/spatialanalyst";

pub fn test_config() -> gis_analyst::AnalystClientConfig {
    gis_analyst::AnalystClientConfig::with_base_url(TEST_BASE_URL)
}
