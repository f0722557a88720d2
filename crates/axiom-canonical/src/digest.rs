use regex::Regex;
use serde::{Deserialize, Serialize};
use sha2::{Digest as Sha2Digest, Sha256};
use std::fmt;

use crate::validation::ValidationError;

/// Lowercase hex SHA-256 digest (always 64 characters).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HexDigest(String);

impl HexDigest {
    /// Hashes `data` with SHA-256.
    pub fn of(data: &[u8]) -> Self {
        Self(hex::encode(Sha256::digest(data)))
    }

    /// Constructs a validated digest from its hex form.
    pub fn new(hex: impl Into<String>) -> Result<Self, ValidationError> {
        let hex = hex.into();
        let re = Regex::new(r"^[0-9a-f]{64}$").expect("invalid regex");
        if !re.is_match(&hex) {
            return Err(ValidationError::PatternMismatch {
                field: "digest",
                value: hex,
            });
        }
        Ok(Self(hex))
    }

    /// Borrows the hex string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the digest, returning the hex string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for HexDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_vector() {
        assert_eq!(
            HexDigest::of(b"abc").as_str(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn rejects_uppercase_and_short() {
        assert!(HexDigest::new("AB".repeat(32)).is_err());
        assert!(HexDigest::new("ab").is_err());
        assert!(HexDigest::new("ab".repeat(32)).is_ok());
    }
}
