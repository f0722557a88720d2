//! Reading command input from a file or stdin.

use std::io::{self, Read};

use thiserror::Error;

/// Errors raised while reading command input.
#[derive(Error, Debug)]
pub enum InputError {
    #[error("Failed to read file {path}: {source}")]
    File { path: String, source: io::Error },
    #[error("Failed to read stdin: {0}")]
    Stdin(#[from] io::Error),
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Raw bytes of `path`, or all of stdin when no path is given.
pub fn read_bytes(path: Option<&str>) -> Result<Vec<u8>, InputError> {
    match path {
        Some(path) => std::fs::read(path).map_err(|source| InputError::File {
            path: path.to_string(),
            source,
        }),
        None => {
            let mut buffer = Vec::new();
            io::stdin().read_to_end(&mut buffer)?;
            Ok(buffer)
        }
    }
}

/// Parses the input as JSON.
pub fn read_json(path: Option<&str>) -> Result<serde_json::Value, InputError> {
    let bytes = read_bytes(path)?;
    Ok(serde_json::from_slice(&bytes)?)
}
