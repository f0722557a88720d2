//! Signed transaction protocol.

use std::collections::BTreeMap;

use axiom_canonical::{Canonicalizer, RequestId, TransactionRequest};
use axiom_core::{
    sign, ApiKey, AxiomError, AxiomResponse, ProofVerifier, StatusClass,
};
use chrono::Utc;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::transport::{HttpRequest, HttpResponse, Method, ReqwestTransport, Transport};

/// Header carrying the request signature.
pub const SIGNATURE_HEADER: &str = "X-Axiom-Signature";

const MAX_ERROR_DETAIL: usize = 512;

/// Canonical bytes of a request together with their signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    /// Exact bytes that were signed; also the request body.
    pub body: Vec<u8>,
    /// `base64(HMAC-SHA256(key, body))`.
    pub signature: String,
}

/// Client for the execute and status endpoints.
///
/// Holds only immutable state, so one client can serve many concurrent
/// transactions (share it behind an `Arc`).
pub struct AxiomClient<T> {
    endpoint: String,
    api_key: ApiKey,
    transport: T,
    canonicalizer: Canonicalizer,
    verifier: ProofVerifier,
}

impl AxiomClient<ReqwestTransport> {
    /// Builds a client that talks HTTP through `reqwest`.
    pub fn from_config(config: &ClientConfig, api_key: ApiKey) -> Result<Self, AxiomError> {
        let transport = ReqwestTransport::new(config.timeout())?;
        Ok(Self::new(config, api_key, transport))
    }
}

impl<T: Transport> AxiomClient<T> {
    /// Builds a client over an arbitrary transport.
    pub fn new(config: &ClientConfig, api_key: ApiKey, transport: T) -> Self {
        Self {
            endpoint: config.endpoint().to_string(),
            api_key,
            transport,
            canonicalizer: Canonicalizer::new(),
            verifier: ProofVerifier::new(config.freshness_policy()),
        }
    }

    /// Base URL requests are sent to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Canonicalizes and signs a request with the client's credential.
    pub fn sign_request(&self, request: &TransactionRequest) -> Result<SignedRequest, AxiomError> {
        if request.operation().trim().is_empty() {
            return Err(AxiomError::InvalidRequest("operation must not be empty".into()));
        }
        let body = self
            .canonicalizer
            .canonicalize_request(request)
            .map_err(|e| AxiomError::InvalidRequest(e.to_string()))?;
        let signature = sign(&body, self.api_key.as_bytes());
        Ok(SignedRequest { body, signature })
    }

    /// Signs and submits a request, returning the response only if its proof
    /// is fresh, uses the pinned algorithm, and carries this request's nonce.
    #[tracing::instrument(
        skip(self, request),
        fields(operation = %request.operation(), nonce = %request.nonce())
    )]
    pub async fn execute_transaction(
        &self,
        request: &TransactionRequest,
    ) -> Result<AxiomResponse, AxiomError> {
        let signed = self.sign_request(request)?;

        let mut headers = self.auth_headers();
        headers.insert("Content-Type".into(), "application/json".into());
        headers.insert(SIGNATURE_HEADER.into(), signed.signature);

        let http_request = HttpRequest {
            method: Method::Post,
            url: format!("{}/execute", self.endpoint),
            headers,
            body: signed.body,
        };
        debug!(
            method = http_request.method.as_str(),
            url = %http_request.url,
            "dispatching signed transaction"
        );
        let response = self.transport.send(http_request).await?;
        debug!(status = response.status, "transaction response received");

        check_status(&response)?;
        let decoded: AxiomResponse =
            serde_json::from_slice(&response.body).map_err(AxiomError::DecodingError)?;

        if let Err(reason) = self.verifier.verify_response(&decoded, request, Utc::now()) {
            warn!(request_id = %decoded.request_id, %reason, "rejecting response proof");
            return Err(AxiomError::InvalidProof(reason));
        }
        Ok(decoded)
    }

    /// Fetches a previous result by request id. Not signed, and the proof is not checked.
    #[tracing::instrument(skip(self))]
    pub async fn query_status(&self, request_id: &str) -> Result<AxiomResponse, AxiomError> {
        let id = RequestId::parse(request_id).map_err(|e| AxiomError::InvalidRequest(e.to_string()))?;

        let http_request = HttpRequest {
            method: Method::Get,
            url: format!("{}/status/{}", self.endpoint, id),
            headers: self.auth_headers(),
            body: Vec::new(),
        };
        debug!(method = http_request.method.as_str(), url = %http_request.url, "querying status");
        let response = self.transport.send(http_request).await?;
        if response.status != 200 {
            debug!(status = response.status, "status query rejected");
            return Err(AxiomError::InvalidResponse);
        }
        serde_json::from_slice(&response.body).map_err(AxiomError::DecodingError)
    }

    fn auth_headers(&self) -> BTreeMap<String, String> {
        let mut headers = BTreeMap::new();
        headers.insert(
            "Authorization".into(),
            format!("Bearer {}", self.api_key.expose()),
        );
        headers
    }
}

fn check_status(response: &HttpResponse) -> Result<(), AxiomError> {
    match StatusClass::from_code(response.status) {
        StatusClass::Success => Ok(()),
        StatusClass::Unauthorized => Err(AxiomError::AuthenticationFailed),
        StatusClass::RateLimited => Err(AxiomError::RateLimitExceeded),
        StatusClass::ClientError => Err(AxiomError::InvalidRequest(format!(
            "client error: {}",
            response.status
        ))),
        StatusClass::ServerError => Err(AxiomError::ServerError {
            code: response.status,
            detail: error_detail(&response.body),
        }),
        StatusClass::Unexpected => Err(AxiomError::InvalidResponse),
    }
}

fn error_detail(body: &[u8]) -> String {
    match std::str::from_utf8(body).map(str::trim) {
        Ok(text) if !text.is_empty() => text.chars().take(MAX_ERROR_DETAIL).collect(),
        _ => "server error".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            body: body.as_bytes().to_vec(),
        }
    }

    #[test]
    fn status_mapping() {
        assert!(check_status(&response(200, "")).is_ok());
        assert!(matches!(
            check_status(&response(401, "")),
            Err(AxiomError::AuthenticationFailed)
        ));
        assert!(matches!(
            check_status(&response(429, "")),
            Err(AxiomError::RateLimitExceeded)
        ));
        assert!(matches!(
            check_status(&response(404, "")),
            Err(AxiomError::InvalidRequest(msg)) if msg == "client error: 404"
        ));
        assert!(matches!(
            check_status(&response(503, " maintenance \n")),
            Err(AxiomError::ServerError { code: 503, detail }) if detail == "maintenance"
        ));
        assert!(matches!(
            check_status(&response(304, "")),
            Err(AxiomError::InvalidResponse)
        ));
    }

    #[test]
    fn server_error_detail_falls_back_and_truncates() {
        assert_eq!(error_detail(b""), "server error");
        assert_eq!(error_detail(&[0xff, 0xfe]), "server error");
        assert_eq!(error_detail("x".repeat(2000).as_bytes()).len(), MAX_ERROR_DETAIL);
    }
}
