use axiom_canonical::{timestamp, ValueMap};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::proof::DeterministicProof;

/// Response envelope returned by the execute and status endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AxiomResponse {
    /// Server request identifier, usable with the status endpoint.
    pub request_id: String,
    /// When the response was produced.
    #[serde(with = "timestamp::iso8601")]
    pub timestamp: DateTime<Utc>,
    /// Computation result.
    pub result: AxiomResult,
    /// Proof binding this response to the request nonce.
    pub proof: DeterministicProof,
    /// Execution and rate limit metadata.
    pub metadata: ResponseMetadata,
}

/// Result section of a response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxiomResult {
    /// Server status string, e.g. `completed`.
    pub status: String,
    /// Result payload.
    pub data: ValueMap,
    /// Confidence in `[0, 1]`. Values outside the range fail to decode.
    #[serde(deserialize_with = "unit_interval")]
    pub confidence: f64,
    /// Optional explanation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
}

impl AxiomResult {
    /// True when the confidence lies within `[0, 1]`.
    pub fn confidence_in_range(&self) -> bool {
        in_unit_interval(self.confidence)
    }
}

fn in_unit_interval(value: f64) -> bool {
    (0.0..=1.0).contains(&value)
}

fn unit_interval<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let value = f64::deserialize(deserializer)?;
    if !in_unit_interval(value) {
        return Err(serde::de::Error::custom(format!(
            "confidence {value} outside [0, 1]"
        )));
    }
    Ok(value)
}

/// Metadata section of a response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMetadata {
    /// Server-side execution time in seconds.
    pub execution_time: f64,
    /// API version that served the request.
    pub api_version: String,
    /// Serving node.
    pub node_id: String,
    /// Serving region.
    pub region: String,
    /// Remaining requests in the current rate limit window.
    pub rate_limit_remaining: i64,
    /// When the rate limit window resets.
    #[serde(with = "timestamp::iso8601")]
    pub rate_limit_reset: DateTime<Utc>,
}
