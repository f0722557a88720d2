//! Shared helpers for client integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axiom_canonical::timestamp::format_iso8601;
use axiom_client::{AxiomClient, ClientConfig, HttpRequest, HttpResponse, Transport};
use axiom_core::{ApiKey, TransportError};
use chrono::{DateTime, Utc};
use serde_json::{json, Value};

type Responder = dyn Fn(&HttpRequest) -> Result<HttpResponse, TransportError> + Send + Sync;

/// In-memory transport that records requests and answers from a closure.
pub struct ScriptedTransport {
    responder: Box<Responder>,
    pub requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub fn new<F>(responder: F) -> Arc<Self>
    where
        F: Fn(&HttpRequest) -> Result<HttpResponse, TransportError> + Send + Sync + 'static,
    {
        Arc::new(Self {
            responder: Box::new(responder),
            requests: Mutex::new(Vec::new()),
        })
    }

    /// Always answers with `status` and `body`.
    pub fn fixed(status: u16, body: impl Into<Vec<u8>>) -> Arc<Self> {
        let body = body.into();
        Self::new(move |_| {
            Ok(HttpResponse {
                status,
                body: body.clone(),
            })
        })
    }

    pub fn recorded(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(request.clone());
        (self.responder)(&request)
    }
}

pub fn test_config() -> ClientConfig {
    ClientConfig {
        base_url: "https://api.test/v1".into(),
        ..ClientConfig::default()
    }
}

pub fn client_with(transport: Arc<ScriptedTransport>) -> AxiomClient<Arc<ScriptedTransport>> {
    AxiomClient::new(&test_config(), ApiKey::new("k"), transport)
}

/// Response body whose proof carries the given fields.
pub fn response_json(nonce: &str, algorithm: &str, proof_time: DateTime<Utc>) -> Value {
    json!({
        "requestId": "req-1",
        "timestamp": format_iso8601(&Utc::now()),
        "result": {
            "status": "completed",
            "data": {"y": 0.75},
            "confidence": 0.93,
            "reasoning": "linear fit"
        },
        "proof": {
            "algorithm": algorithm,
            "signature": "c2lnbmF0dXJl",
            "hash": "9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08",
            "timestamp": format_iso8601(&proof_time),
            "nonce": nonce
        },
        "metadata": {
            "executionTime": 0.042,
            "apiVersion": "1.0.0",
            "nodeId": "node-7",
            "region": "eu-west-1",
            "rateLimitRemaining": 99,
            "rateLimitReset": format_iso8601(&Utc::now())
        }
    })
}

/// Transport that echoes the request nonce into a fresh, valid proof.
pub fn echo_transport() -> Arc<ScriptedTransport> {
    ScriptedTransport::new(|req| {
        let body: Value = serde_json::from_slice(&req.body).unwrap();
        let nonce = body["nonce"].as_str().unwrap().to_string();
        Ok(HttpResponse {
            status: 200,
            body: serde_json::to_vec(&response_json(&nonce, "HMAC-SHA256", Utc::now())).unwrap(),
        })
    })
}
