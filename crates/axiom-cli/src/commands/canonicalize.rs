//! Canonicalize command implementation.

use axiom_canonical::Canonicalizer;

use crate::input;

pub fn run(input: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let canonicalizer = Canonicalizer::new();

    let value = input::read_json(input.as_deref())?;
    let bytes = canonicalizer
        .canonicalize(&value)
        .map_err(|e| format!("Canonicalization failed: {}", e))?;

    println!("{}", String::from_utf8_lossy(&bytes));
    Ok(())
}
