use crate::validation::ValidationError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! newtype {
    ($name:ident, $doc:expr, $pattern:expr) => {
        newtype!($name, $doc, $pattern, |_: &str| true);
    };
    ($name:ident, $doc:expr, $pattern:expr, $accept:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates a new instance without validation; callers are responsible for conformity.
            pub fn new(value: String) -> Self {
                Self(value)
            }

            /// Parses a validated identifier from a string.
            pub fn parse(value: impl Into<String>) -> Result<Self, ValidationError> {
                let s = value.into();
                if s.is_empty() {
                    return Err(ValidationError::Empty {
                        field: stringify!($name),
                    });
                }
                let accept = $accept;
                let matches = Regex::new($pattern).expect("invalid regex").is_match(&s);
                if !matches || !accept(s.as_str()) {
                    return Err(ValidationError::PatternMismatch {
                        field: stringify!($name),
                        value: s,
                    });
                }
                Ok(Self(s))
            }

            /// Borrows the inner string.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

newtype!(
    Nonce,
    "Single-use request nonce (printable ASCII, no spaces, 1-256 chars).",
    r"^[!-~]{1,256}$"
);
newtype!(
    RequestId,
    "Server-assigned request identifier, safe to embed in a URL path.",
    r"^[A-Za-z0-9._:-]{1,128}$",
    // `.` and `..` are path segments, not ids.
    |s: &str| !s.chars().all(|c| c == '.')
);

impl Nonce {
    /// Generates a random UUIDv4 nonce (122 bits of entropy).
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}
