//! Server-issued deterministic proof and its structural validity predicate.

use axiom_canonical::timestamp;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// The only proof algorithm accepted. Compared byte-for-byte.
pub const PROOF_ALGORITHM: &str = "HMAC-SHA256";

/// Default maximum proof age in seconds.
pub const DEFAULT_MAX_PROOF_AGE_SECS: i64 = 300;

/// Proof attached to every response, binding it to the request nonce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeterministicProof {
    /// Algorithm tag; must equal [`PROOF_ALGORITHM`].
    pub algorithm: String,
    /// Opaque encoded MAC output.
    pub signature: String,
    /// Opaque encoded hash.
    pub hash: String,
    /// When the server issued the proof.
    #[serde(with = "timestamp::iso8601")]
    pub timestamp: DateTime<Utc>,
    /// Nonce of the request this proof answers.
    pub nonce: String,
}

impl DeterministicProof {
    /// Structural validity under the default [`FreshnessPolicy`].
    ///
    /// True iff signature and hash are non-empty, the algorithm is exactly
    /// `HMAC-SHA256`, and the proof is younger than 300 seconds at `now`.
    /// Does not check which request the proof belongs to.
    pub fn is_valid(&self, now: DateTime<Utc>) -> bool {
        FreshnessPolicy::default().check(self, now).is_ok()
    }

    /// Age of the proof at `now`; negative for future-dated proofs.
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        now - self.timestamp
    }
}

/// Why a proof was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProofRejection {
    /// Signature field was empty.
    #[error("proof signature is empty")]
    EmptySignature,
    /// Hash field was empty.
    #[error("proof hash is empty")]
    EmptyHash,
    /// Algorithm was not the pinned value.
    #[error("unsupported proof algorithm '{0}'")]
    UnsupportedAlgorithm(String),
    /// Proof older than the freshness window.
    #[error("proof is stale ({age_secs}s old, limit {max_age_secs}s)")]
    Stale {
        /// Observed age in seconds.
        age_secs: i64,
        /// Configured limit in seconds.
        max_age_secs: i64,
    },
    /// Proof timestamp lies further in the future than the allowed skew.
    #[error("proof is future-dated by {ahead_secs}s")]
    FutureDated {
        /// Seconds ahead of the verifier clock.
        ahead_secs: i64,
    },
    /// Proof nonce differs from the request nonce.
    #[error("proof nonce does not match request nonce")]
    NonceMismatch,
}

/// Freshness and shape rules for a proof.
///
/// The default policy only bounds age (`now - timestamp < 300s`) and accepts
/// future-dated proofs. Setting `max_future_skew` adds an upper bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FreshnessPolicy {
    /// Exclusive upper bound on proof age.
    pub max_age: Duration,
    /// Inclusive bound on how far in the future a proof may be dated.
    pub max_future_skew: Option<Duration>,
}

impl Default for FreshnessPolicy {
    fn default() -> Self {
        Self {
            max_age: Duration::seconds(DEFAULT_MAX_PROOF_AGE_SECS),
            max_future_skew: None,
        }
    }
}

impl FreshnessPolicy {
    /// Policy with a custom age bound and optional future skew bound.
    pub fn new(max_age: Duration, max_future_skew: Option<Duration>) -> Self {
        Self {
            max_age,
            max_future_skew,
        }
    }

    /// Checks a proof, returning the first violated rule.
    pub fn check(&self, proof: &DeterministicProof, now: DateTime<Utc>) -> Result<(), ProofRejection> {
        if proof.signature.is_empty() {
            return Err(ProofRejection::EmptySignature);
        }
        if proof.hash.is_empty() {
            return Err(ProofRejection::EmptyHash);
        }
        if proof.algorithm != PROOF_ALGORITHM {
            return Err(ProofRejection::UnsupportedAlgorithm(proof.algorithm.clone()));
        }

        let age = proof.age(now);
        if age >= self.max_age {
            return Err(ProofRejection::Stale {
                age_secs: age.num_seconds(),
                max_age_secs: self.max_age.num_seconds(),
            });
        }
        if let Some(skew) = self.max_future_skew {
            if -age > skew {
                return Err(ProofRejection::FutureDated {
                    ahead_secs: (-age).num_seconds(),
                });
            }
        }
        Ok(())
    }
}
