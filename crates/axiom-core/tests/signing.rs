use axiom_canonical::{canonicalize_request, Nonce, TransactionRequest, Value, ValueMap};
use axiom_core::{
    crypto, generate_nonce, hash_str, sign, verify, DeterministicProof, FreshnessPolicy,
    ProofVerifier, PROOF_ALGORITHM,
};
use chrono::{Duration, TimeZone, Utc};

fn make_request() -> TransactionRequest {
    let mut params = ValueMap::new();
    params.insert("x".into(), Value::Int(1));
    params.insert(
        "features".into(),
        Value::Array(vec![Value::Float(0.25), Value::String("cat".into())]),
    );
    TransactionRequest::new("predict", params)
        .with_nonce(Nonce::parse("n1").unwrap())
        .with_timestamp(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
}

#[test]
fn signature_over_canonical_request_verifies() {
    let bytes = canonicalize_request(&make_request()).unwrap();
    let signature = sign(&bytes, b"k");
    assert!(verify(&signature, &bytes, b"k"));
    assert_eq!(signature, sign(&canonicalize_request(&make_request()).unwrap(), b"k"));
}

#[test]
fn changing_any_request_field_changes_signature() {
    let base = make_request();
    let sig = sign(&canonicalize_request(&base).unwrap(), b"k");

    let other_nonce = base.clone().with_nonce(Nonce::parse("n2").unwrap());
    let later = base
        .clone()
        .with_timestamp(base.timestamp() + Duration::seconds(1));
    for variant in [other_nonce, later] {
        let bytes = canonicalize_request(&variant).unwrap();
        assert!(!verify(&sig, &bytes, b"k"));
    }
}

#[test]
fn round_trip_holds_for_assorted_inputs() {
    let keys: [&[u8]; 4] = [b"", b"k", b"a much longer key that exceeds nothing", &[0xff; 128]];
    let inputs: [&[u8]; 4] = [b"", b"x", b"{\"a\":1}", &[0u8; 1024]];
    for key in keys {
        for input in inputs {
            let sig = sign(input, key);
            assert!(verify(&sig, input, key));
            if !input.is_empty() {
                let mut mutated = input.to_vec();
                let last = mutated.len() - 1;
                mutated[last] = mutated[last].wrapping_add(1);
                assert!(!verify(&sig, &mutated, key));
            }
        }
    }
}

#[test]
fn hash_output_shape() {
    let long = "x".repeat(10_000);
    for input in ["test string", "", "äöü", long.as_str()] {
        assert_eq!(hash_str(input).len(), 64);
    }
}

#[test]
fn ten_thousand_nonces_are_unique() {
    let nonces: std::collections::HashSet<String> =
        (0..10_000).map(|_| generate_nonce(crypto::DEFAULT_NONCE_BYTES)).collect();
    assert_eq!(nonces.len(), 10_000);
}

#[test]
fn proof_for_request_verifies_end_to_end() {
    let request = make_request();
    let now = Utc::now();
    let proof = DeterministicProof {
        algorithm: PROOF_ALGORITHM.into(),
        signature: sign(&canonicalize_request(&request).unwrap(), b"server"),
        hash: hash_str("result"),
        timestamp: now - Duration::seconds(5),
        nonce: "n1".into(),
    };
    assert!(proof.is_valid(now));
    assert!(ProofVerifier::new(FreshnessPolicy::default())
        .verify(&proof, &request, now)
        .is_ok());
}
