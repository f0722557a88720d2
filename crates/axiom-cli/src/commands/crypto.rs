//! Local signing, hashing and key commands. None of these touch the network.

use axiom_canonical::Canonicalizer;
use axiom_core::{generate_nonce, hash as sha256_hex};

use crate::input;

/// Bytes to sign or verify: raw input, or its canonical JSON form.
fn payload(input: Option<String>, canonical: bool) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    if canonical {
        let value = input::read_json(input.as_deref())?;
        let bytes = Canonicalizer::new()
            .canonicalize(&value)
            .map_err(|e| format!("Canonicalization failed: {}", e))?;
        Ok(bytes)
    } else {
        Ok(input::read_bytes(input.as_deref())?)
    }
}

pub fn hash(text: Option<String>, input: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let bytes = match text {
        Some(text) => text.into_bytes(),
        None => input::read_bytes(input.as_deref())?,
    };
    println!("{}", sha256_hex(&bytes));
    Ok(())
}

pub fn sign(key: String, canonical: bool, input: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let bytes = payload(input, canonical)?;
    println!("{}", axiom_core::sign(&bytes, key.as_bytes()));
    Ok(())
}

pub fn verify_signature(
    key: String,
    signature: String,
    canonical: bool,
    input: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let bytes = payload(input, canonical)?;
    if axiom_core::verify(signature.trim(), &bytes, key.as_bytes()) {
        println!("valid");
        Ok(())
    } else {
        Err("signature does not match".into())
    }
}

pub fn nonce(bytes: usize, count: usize) -> Result<(), Box<dyn std::error::Error>> {
    if bytes == 0 {
        return Err("--bytes must be greater than zero".into());
    }
    for _ in 0..count {
        println!("{}", generate_nonce(bytes));
    }
    Ok(())
}

pub fn derive_key(password: String, salt: String) -> Result<(), Box<dyn std::error::Error>> {
    tracing::warn!("derive-key is a single SHA-256 pass and is not suitable for password storage");
    println!("{}", axiom_core::derive_key(&password, &salt).to_hex());
    Ok(())
}
