//! Async client that signs Axiom transactions and verifies response proofs.
//!
//! This crate provides:
//! - [`AxiomClient`]: `execute_transaction` and `query_status`
//! - A [`Transport`] trait with a `reqwest` implementation
//! - [`ClientConfig`] loaded from TOML and `AXIOM_*` environment variables
//! - [`CredentialStore`] for API keys, with an in-memory implementation
//! - [`AxiomSession`], an explicit context with bounded transaction history
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use axiom_canonical::{TransactionRequest, Value, ValueMap};
//! use axiom_client::{AxiomClient, ClientConfig};
//! use axiom_core::ApiKey;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ClientConfig::load(None)?;
//! let client = AxiomClient::from_config(&config, ApiKey::new("sk-example"))?;
//!
//! let mut params = ValueMap::new();
//! params.insert("x".into(), Value::Int(1));
//! let request = TransactionRequest::new("predict", params);
//!
//! let response = client.execute_transaction(&request).await?;
//! println!("{} -> {}", response.request_id, response.result.status);
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]

/// Signed transaction protocol.
pub mod client;
/// Client configuration.
pub mod config;
/// Credential storage interface.
pub mod credentials;
/// Session context and transaction history.
pub mod session;
/// Transport collaborator.
pub mod transport;

pub use client::{AxiomClient, SignedRequest, SIGNATURE_HEADER};
pub use config::{ClientConfig, ConfigError, DEFAULT_BASE_URL};
pub use credentials::{CredentialError, CredentialStore, InMemoryCredentialStore};
pub use session::{AxiomSession, SessionStats, DEFAULT_HISTORY_CAPACITY};
pub use transport::{HttpRequest, HttpResponse, Method, ReqwestTransport, Transport};
