//! HMAC-SHA256 signing, SHA-256 hashing, nonce generation and key derivation.
//!
//! Signatures are `base64(HMAC-SHA256(key, bytes))` using the standard padded
//! alphabet, so every signature is exactly 44 characters. Verification decodes
//! the signature and compares MACs in constant time.

use std::fmt;

use axiom_canonical::HexDigest;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, Duration, Utc};
use hmac::{Hmac, Mac};
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};
use zeroize::Zeroize;

type HmacSha256 = Hmac<Sha256>;

/// Default nonce entropy in bytes.
pub const DEFAULT_NONCE_BYTES: usize = 32;

/// Length of an encoded signature (base64 of a 32-byte MAC).
pub const SIGNATURE_LEN: usize = 44;

/// Caller-held API credential. Used both as bearer token and HMAC key.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wraps a raw API key.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Raw key string, for the bearer header.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Key bytes used for HMAC.
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

impl Drop for ApiKey {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

/// 256-bit symmetric key.
#[derive(Clone, PartialEq, Eq)]
pub struct SymmetricKey([u8; 32]);

impl SymmetricKey {
    /// Wraps raw key bytes.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Raw key bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Lowercase hex encoding of the key.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SymmetricKey(<redacted>)")
    }
}

impl Drop for SymmetricKey {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

fn mac_for(key: &[u8]) -> HmacSha256 {
    // HMAC accepts keys of any length, so this cannot fail.
    <HmacSha256 as Mac>::new_from_slice(key).expect("HMAC accepts any key length")
}

/// Signs `bytes` with `key`, returning the base64 encoded MAC.
pub fn sign(bytes: &[u8], key: &[u8]) -> String {
    let mut mac = mac_for(key);
    mac.update(bytes);
    STANDARD.encode(mac.finalize().into_bytes())
}

/// Verifies a signature produced by [`sign`]. Malformed signatures are rejected.
pub fn verify(signature: &str, bytes: &[u8], key: &[u8]) -> bool {
    if signature.len() != SIGNATURE_LEN {
        return false;
    }
    let Ok(provided) = STANDARD.decode(signature) else {
        return false;
    };
    let mut mac = mac_for(key);
    mac.update(bytes);
    mac.verify_slice(&provided).is_ok()
}

/// SHA-256 of `data` as 64 lowercase hex characters.
pub fn hash(data: &[u8]) -> String {
    HexDigest::of(data).into_string()
}

/// SHA-256 of a UTF-8 string as 64 lowercase hex characters.
pub fn hash_str(data: &str) -> String {
    hash(data.as_bytes())
}

/// Returns `length_bytes` bytes from the OS CSPRNG, base64 encoded.
pub fn generate_nonce(length_bytes: usize) -> String {
    let mut bytes = vec![0u8; length_bytes];
    OsRng.fill_bytes(&mut bytes);
    STANDARD.encode(bytes)
}

/// Opaque token: a UUIDv4 followed by 16 random bytes.
pub fn generate_secure_token() -> String {
    format!("{}-{}", uuid::Uuid::new_v4(), generate_nonce(16))
}

/// Derives a symmetric key as `SHA-256(password || salt)`.
///
/// Single unsalted-iteration hashing is fast, so this must not protect a
/// low-entropy secret against offline brute force.
pub fn derive_key(password: &str, salt: &str) -> SymmetricKey {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hasher.update(salt.as_bytes());
    SymmetricKey(hasher.finalize().into())
}

/// True when `timestamp` lies within `tolerance` of `now`, in either direction.
pub fn is_timestamp_within(timestamp: DateTime<Utc>, now: DateTime<Utc>, tolerance: Duration) -> bool {
    let delta = now - timestamp;
    delta <= tolerance && delta >= -tolerance
}
