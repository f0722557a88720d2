use canonical_json::to_string;
use serde_json::Value as JsonValue;

use crate::request::TransactionRequest;
use crate::value::Value;
use std::fmt;

/// Error returned when canonicalization fails.
#[derive(thiserror::Error, Debug)]
pub enum CanonicalizationError {
    /// A value outside the supported value union (e.g. `null`) was found.
    #[error("unsupported value at {0}")]
    Unsupported(String),
    /// Non-finite number (NaN/Infinity) detected.
    #[error("non-finite number detected at {0}")]
    NonFiniteNumber(String),
    /// The canonical JSON encoder rejected the input.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

/// Helper for building JSON paths during validation.
#[derive(Debug, Clone)]
pub(crate) struct Path {
    segments: Vec<String>,
}

impl Path {
    pub(crate) fn root() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    pub(crate) fn push_field(&self, field: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(field.to_string());
        Self { segments }
    }

    pub(crate) fn push_index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(format!("[{}]", index));
        Self { segments }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            write!(f, "root")
        } else {
            write!(f, "{}", self.segments.join("."))
        }
    }
}

/// Canonicalizer that emits deterministic bytes.
///
/// Output is RFC 8785 style canonical JSON: object members sorted by key, no
/// insignificant whitespace, and locale-independent number formatting. The
/// same logical input always yields the same bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct Canonicalizer;

impl Canonicalizer {
    /// Creates a new canonicalizer.
    pub fn new() -> Self {
        Self
    }

    /// Canonicalizes an arbitrary JSON value.
    pub fn canonicalize(&self, value: &JsonValue) -> Result<Vec<u8>, CanonicalizationError> {
        self.validate(value, Path::root())?;
        let canonical =
            to_string(value).map_err(|err| CanonicalizationError::Serialization(err.to_string()))?;
        Ok(canonical.into_bytes())
    }

    /// Canonicalizes a [`Value`] tree.
    pub fn canonicalize_value(&self, value: &Value) -> Result<Vec<u8>, CanonicalizationError> {
        self.canonicalize(&value.to_json()?)
    }

    /// Canonicalizes a request into the bytes that get signed and sent.
    pub fn canonicalize_request(
        &self,
        request: &TransactionRequest,
    ) -> Result<Vec<u8>, CanonicalizationError> {
        self.canonicalize(&request.to_json()?)
    }

    #[allow(clippy::only_used_in_recursion)]
    fn validate(&self, value: &JsonValue, path: Path) -> Result<(), CanonicalizationError> {
        match value {
            JsonValue::Object(map) => {
                for (key, child) in map {
                    self.validate(child, path.push_field(key))?;
                }
                Ok(())
            }
            JsonValue::Array(items) => {
                for (idx, item) in items.iter().enumerate() {
                    self.validate(item, path.push_index(idx))?;
                }
                Ok(())
            }
            JsonValue::Number(num) => match num.as_f64() {
                Some(f) if !f.is_finite() => {
                    Err(CanonicalizationError::NonFiniteNumber(path.to_string()))
                }
                _ => Ok(()),
            },
            JsonValue::Null => Err(CanonicalizationError::Unsupported(path.to_string())),
            JsonValue::String(_) | JsonValue::Bool(_) => Ok(()),
        }
    }
}

/// Canonicalizes a request with the default canonicalizer.
pub fn canonicalize_request(request: &TransactionRequest) -> Result<Vec<u8>, CanonicalizationError> {
    Canonicalizer::new().canonicalize_request(request)
}
