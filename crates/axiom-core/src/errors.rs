use thiserror::Error;

use crate::proof::ProofRejection;

/// Failure reported by the transport collaborator before any status was received.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The request did not complete within the transport timeout.
    #[error("request timed out")]
    Timeout,
    /// Connection could not be established.
    #[error("connection failed: {0}")]
    Connect(String),
    /// Any other transport failure.
    #[error("{0}")]
    Other(String),
}

/// Closed error taxonomy for transactions.
#[derive(Error, Debug)]
pub enum AxiomError {
    /// Malformed input, rejected before or by the server. Fix the input.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    /// Credential rejected. Re-authenticate before retrying.
    #[error("authentication failed, check the API key")]
    AuthenticationFailed,
    /// Too many requests. Back off and retry later.
    #[error("rate limit exceeded, try again later")]
    RateLimitExceeded,
    /// Server-side fault.
    #[error("server error ({code}): {detail}")]
    ServerError {
        /// HTTP status code.
        code: u16,
        /// Server-provided detail.
        detail: String,
    },
    /// Status or envelope outside what the protocol expects.
    #[error("invalid response from server")]
    InvalidResponse,
    /// Body did not decode into the response shape.
    #[error("failed to decode response: {0}")]
    DecodingError(#[source] serde_json::Error),
    /// Proof failed structural or binding checks. Never retried silently.
    #[error("proof verification failed: {0}")]
    InvalidProof(#[source] ProofRejection),
    /// Transport failure.
    #[error("network error: {0}")]
    NetworkError(#[from] TransportError),
}

impl AxiomError {
    /// Whether a fresh attempt (with a new nonce) may succeed without caller changes.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AxiomError::RateLimitExceeded
                | AxiomError::ServerError { .. }
                | AxiomError::InvalidResponse
                | AxiomError::NetworkError(_)
        )
    }

    /// True for proof failures, which indicate tampering, replay or a stale proof.
    pub fn is_trust_failure(&self) -> bool {
        matches!(self, AxiomError::InvalidProof(_))
    }

    /// Stable snake_case code for this error kind.
    pub fn code(&self) -> &'static str {
        match self {
            AxiomError::InvalidRequest(_) => "invalid_request",
            AxiomError::AuthenticationFailed => "authentication_failed",
            AxiomError::RateLimitExceeded => "rate_limit_exceeded",
            AxiomError::ServerError { .. } => "server_error",
            AxiomError::InvalidResponse => "invalid_response",
            AxiomError::DecodingError(_) => "decoding_error",
            AxiomError::InvalidProof(_) => "invalid_proof",
            AxiomError::NetworkError(_) => "network_error",
        }
    }
}

impl From<ProofRejection> for AxiomError {
    fn from(reason: ProofRejection) -> Self {
        AxiomError::InvalidProof(reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all() -> Vec<AxiomError> {
        vec![
            AxiomError::InvalidRequest("bad".into()),
            AxiomError::AuthenticationFailed,
            AxiomError::RateLimitExceeded,
            AxiomError::ServerError {
                code: 503,
                detail: "down".into(),
            },
            AxiomError::InvalidResponse,
            AxiomError::DecodingError(serde_json::from_str::<u8>("x").unwrap_err()),
            AxiomError::InvalidProof(ProofRejection::NonceMismatch),
            AxiomError::NetworkError(TransportError::Timeout),
        ]
    }

    #[test]
    fn retry_advice_follows_taxonomy() {
        let retryable: Vec<_> = all().iter().map(AxiomError::is_retryable).collect();
        assert_eq!(
            retryable,
            vec![false, false, true, true, true, false, false, true]
        );
    }

    #[test]
    fn only_proof_failures_are_trust_failures() {
        let trust: Vec<_> = all().iter().map(AxiomError::is_trust_failure).collect();
        assert_eq!(
            trust,
            vec![false, false, false, false, false, false, true, false]
        );
    }

    #[test]
    fn codes_are_distinct() {
        let codes: std::collections::HashSet<_> = all().iter().map(AxiomError::code).collect();
        assert_eq!(codes.len(), 8);
    }

    #[test]
    fn messages_do_not_leak_key_material() {
        for err in all() {
            let msg = err.to_string();
            assert!(!msg.contains("Bearer"), "{msg}");
        }
        assert_eq!(
            AxiomError::ServerError {
                code: 503,
                detail: "down".into()
            }
            .to_string(),
            "server error (503): down"
        );
    }
}
