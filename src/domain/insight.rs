use serde::{Deserialize, Serialize};
use validator::Validate;

/// Inbound request for insight generation. The API key is supplied by the
/// caller per request and never stored.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct InsightRequest {
    #[validate(length(min = 1))]
    pub api_key: String,
}

impl InsightRequest {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }
}

/// Aggregate digest of the current dataset's measure column.
///
/// `grouped` pairs the latitude column's raw cell rendering with the mean
/// of the measure values sharing it, in deterministic key order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightSummary {
    pub total: f64,
    pub average: f64,
    pub grouped: Vec<(String, f64)>,
}
