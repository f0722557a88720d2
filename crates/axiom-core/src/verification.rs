//! Binding a response proof to the request that produced it.

use axiom_canonical::TransactionRequest;
use chrono::{DateTime, Utc};

use crate::proof::{DeterministicProof, FreshnessPolicy, ProofRejection, PROOF_ALGORITHM};
use crate::response::AxiomResponse;

/// Checks proofs against the request they claim to answer.
///
/// Verification is pure: it reads the proof, the request and the supplied
/// clock value, and nothing else.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProofVerifier {
    policy: FreshnessPolicy,
}

impl ProofVerifier {
    /// Creates a verifier with the given freshness policy.
    pub fn new(policy: FreshnessPolicy) -> Self {
        Self { policy }
    }

    /// Freshness policy in effect.
    pub fn policy(&self) -> &FreshnessPolicy {
        &self.policy
    }

    /// Accepts the proof only if it is structurally valid, uses the pinned
    /// algorithm, and carries the request's nonce.
    pub fn verify(
        &self,
        proof: &DeterministicProof,
        request: &TransactionRequest,
        now: DateTime<Utc>,
    ) -> Result<(), ProofRejection> {
        self.policy.check(proof, now)?;

        // Checked again independently of the policy.
        if proof.algorithm != PROOF_ALGORITHM {
            return Err(ProofRejection::UnsupportedAlgorithm(proof.algorithm.clone()));
        }
        if proof.nonce != request.nonce().as_str() {
            return Err(ProofRejection::NonceMismatch);
        }
        Ok(())
    }

    /// Verifies the proof embedded in a response.
    pub fn verify_response(
        &self,
        response: &AxiomResponse,
        request: &TransactionRequest,
        now: DateTime<Utc>,
    ) -> Result<(), ProofRejection> {
        self.verify(&response.proof, request, now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axiom_canonical::{Nonce, ValueMap};
    use chrono::Duration;

    fn request(nonce: &str) -> TransactionRequest {
        TransactionRequest::new("predict", ValueMap::new()).with_nonce(Nonce::new(nonce.into()))
    }

    fn proof(nonce: &str, ts: DateTime<Utc>) -> DeterministicProof {
        DeterministicProof {
            algorithm: PROOF_ALGORITHM.into(),
            signature: "sig".into(),
            hash: "hash".into(),
            timestamp: ts,
            nonce: nonce.into(),
        }
    }

    #[test]
    fn accepts_matching_nonce() {
        let now = Utc::now();
        assert!(ProofVerifier::default()
            .verify(&proof("abc", now), &request("abc"), now)
            .is_ok());
    }

    #[test]
    fn rejects_nonce_mismatch_on_otherwise_valid_proof() {
        let now = Utc::now();
        let p = proof("xyz", now);
        assert!(p.is_valid(now));
        assert_eq!(
            ProofVerifier::default().verify(&p, &request("abc"), now),
            Err(ProofRejection::NonceMismatch)
        );
    }

    #[test]
    fn nonce_comparison_is_exact() {
        let now = Utc::now();
        let verifier = ProofVerifier::default();
        for other in ["ABC", "abc ", " abc", "ab"] {
            assert_eq!(
                verifier.verify(&proof(other, now), &request("abc"), now),
                Err(ProofRejection::NonceMismatch)
            );
        }
    }

    #[test]
    fn structural_failure_precedes_binding() {
        let now = Utc::now();
        let stale = proof("xyz", now - Duration::seconds(301));
        assert!(matches!(
            ProofVerifier::default().verify(&stale, &request("abc"), now),
            Err(ProofRejection::Stale { .. })
        ));
    }

    #[test]
    fn custom_policy_is_applied() {
        let now = Utc::now();
        let verifier = ProofVerifier::new(FreshnessPolicy::new(Duration::seconds(10), None));
        assert!(verifier
            .verify(&proof("abc", now - Duration::seconds(11)), &request("abc"), now)
            .is_err());
    }
}
