//! Canonical request model and deterministic encoding for Axiom transactions.
//!
//! Everything that participates in request signing lives in this crate: the
//! [`Value`] sum type carried in parameters, the immutable
//! [`TransactionRequest`], the ISO-8601 timestamp codec used on the wire, and
//! the [`Canonicalizer`] that turns a request into the exact bytes that are
//! signed and sent.
//!
#![deny(missing_docs)]

/// Canonicalization helpers for deterministic signing.
pub mod canonicalizer;
/// SHA-256 hex digests.
pub mod digest;
/// Identifier newtypes (nonces, request ids).
pub mod identifiers;
/// Signed request model.
pub mod request;
/// ISO-8601 timestamp codec shared by every wire type.
pub mod timestamp;
/// Validation errors for identifier and digest newtypes.
pub mod validation;
/// JSON-like value sum type.
pub mod value;

pub use canonicalizer::{canonicalize_request, CanonicalizationError, Canonicalizer};
pub use digest::HexDigest;
pub use identifiers::{Nonce, RequestId};
pub use request::TransactionRequest;
pub use validation::ValidationError;
pub use value::{Value, ValueMap};
