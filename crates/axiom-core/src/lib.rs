//! Signing, proof verification, and error taxonomy for Axiom transactions.
//!
//! This crate provides:
//! - HMAC-SHA256 request signatures, SHA-256 hashing, nonces and key derivation
//! - The server's deterministic proof and its freshness predicate
//! - Response envelope types
//! - Total status-code classification
//! - Proof-to-request binding checks
//! - The closed [`AxiomError`] taxonomy and caller-side transaction records
//!
//! Core invariants:
//! - Canonicalization, signing and proof verification are pure functions
//! - A proof is trusted only for the request whose nonce it carries
//! - The proof algorithm is pinned to `HMAC-SHA256`, compared exactly
//!
#![deny(missing_docs)]

pub mod crypto;
/// Error taxonomy.
pub mod errors;
pub mod proof;
/// Response envelope types.
pub mod response;
/// Transport status classification.
pub mod status;
/// Caller-side transaction records.
pub mod transaction;
pub mod verification;

pub use crypto::{
    derive_key, generate_nonce, generate_secure_token, hash, hash_str, is_timestamp_within, sign,
    verify, ApiKey, SymmetricKey, DEFAULT_NONCE_BYTES,
};
pub use errors::{AxiomError, TransportError};
pub use proof::{DeterministicProof, FreshnessPolicy, ProofRejection, PROOF_ALGORITHM};
pub use response::{AxiomResponse, AxiomResult, ResponseMetadata};
pub use status::StatusClass;
pub use transaction::{Transaction, TransactionError, TransactionStatus, TransactionType};
pub use verification::ProofVerifier;
