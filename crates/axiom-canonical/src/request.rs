use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::canonicalizer::{CanonicalizationError, Path};
use crate::identifiers::Nonce;
use crate::timestamp::{self, format_iso8601};
use crate::value::{map_to_json, Value, ValueMap};

/// A request to the remote compute API.
///
/// Immutable once built: every field is private and only readable. The nonce
/// binds the server's proof to this particular request instance, so a retry
/// must build a new request rather than resend an old one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRequest {
    operation: String,
    parameters: ValueMap,
    #[serde(with = "timestamp::iso8601")]
    timestamp: DateTime<Utc>,
    nonce: Nonce,
}

impl TransactionRequest {
    /// Builds a request stamped with the current time (whole seconds) and a fresh nonce.
    pub fn new(operation: impl Into<String>, parameters: ValueMap) -> Self {
        Self {
            operation: operation.into(),
            parameters,
            timestamp: timestamp::now_seconds(),
            nonce: Nonce::generate(),
        }
    }

    /// Replaces the nonce.
    pub fn with_nonce(mut self, nonce: Nonce) -> Self {
        self.nonce = nonce;
        self
    }

    /// Replaces the timestamp.
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Operation name, e.g. `predict`.
    pub fn operation(&self) -> &str {
        &self.operation
    }

    /// Operation parameters.
    pub fn parameters(&self) -> &ValueMap {
        &self.parameters
    }

    /// Looks up a single parameter.
    pub fn parameter(&self, key: &str) -> Option<&Value> {
        self.parameters.get(key)
    }

    /// Creation time.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Request nonce.
    pub fn nonce(&self) -> &Nonce {
        &self.nonce
    }

    /// Wire JSON for this request. Non-finite parameters are rejected with their path.
    pub fn to_json(&self) -> Result<serde_json::Value, CanonicalizationError> {
        let mut map = serde_json::Map::new();
        map.insert(
            "operation".into(),
            serde_json::Value::String(self.operation.clone()),
        );
        map.insert(
            "parameters".into(),
            serde_json::Value::Object(map_to_json(
                &self.parameters,
                &Path::root().push_field("parameters"),
            )?),
        );
        map.insert(
            "timestamp".into(),
            serde_json::Value::String(format_iso8601(&self.timestamp)),
        );
        map.insert(
            "nonce".into(),
            serde_json::Value::String(self.nonce.as_str().to_string()),
        );
        Ok(serde_json::Value::Object(map))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed() -> TransactionRequest {
        let mut params = ValueMap::new();
        params.insert("x".into(), Value::Int(1));
        TransactionRequest::new("predict", params)
            .with_nonce(Nonce::new("n1".into()))
            .with_timestamp(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
    }

    #[test]
    fn new_requests_get_distinct_nonces() {
        let a = TransactionRequest::new("predict", ValueMap::new());
        let b = TransactionRequest::new("predict", ValueMap::new());
        assert_ne!(a.nonce(), b.nonce());
        assert_eq!(a.timestamp().timestamp_subsec_nanos(), 0);
    }

    #[test]
    fn serde_shape_matches_wire_json() {
        let req = fixed();
        assert_eq!(serde_json::to_value(&req).unwrap(), req.to_json().unwrap());
    }

    #[test]
    fn decodes_from_wire_json() {
        let req: TransactionRequest = serde_json::from_str(
            r#"{"operation":"predict","parameters":{"x":1},"timestamp":"2024-01-01T00:00:00Z","nonce":"n1"}"#,
        )
        .unwrap();
        assert_eq!(req, fixed());
    }

    #[test]
    fn non_finite_parameter_reports_path() {
        let mut params = ValueMap::new();
        params.insert("bad".into(), Value::Float(f64::INFINITY));
        let err = TransactionRequest::new("op", params).to_json().unwrap_err();
        assert!(matches!(err, CanonicalizationError::NonFiniteNumber(p) if p == "parameters.bad"));
    }
}
