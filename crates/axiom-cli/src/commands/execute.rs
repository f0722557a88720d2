//! Execute command implementation.

use axiom_canonical::{Nonce, TransactionRequest, Value, ValueMap};

use crate::commands::connect;
use crate::output;
use crate::RemoteArgs;

/// Parses `--params` into a parameter map. Absent means empty.
fn parse_params(params: Option<&str>) -> Result<ValueMap, Box<dyn std::error::Error>> {
    let Some(raw) = params else {
        return Ok(ValueMap::new());
    };
    let json: serde_json::Value =
        serde_json::from_str(raw).map_err(|e| format!("Invalid --params JSON: {}", e))?;
    match Value::from_json(&json).map_err(|e| format!("Invalid --params: {}", e))? {
        Value::Object(map) => Ok(map),
        _ => Err("--params must be a JSON object".into()),
    }
}

pub async fn run(
    operation: String,
    params: Option<String>,
    nonce: Option<String>,
    remote: RemoteArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let parameters = parse_params(params.as_deref())?;
    let mut request = TransactionRequest::new(operation, parameters);
    if let Some(nonce) = nonce {
        let nonce = Nonce::parse(nonce).map_err(|e| format!("Invalid --nonce: {}", e))?;
        request = request.with_nonce(nonce);
    }

    let client = connect(remote)?;
    let response = client.execute_transaction(&request).await?;

    println!("{}", output::format_response(&response));
    eprintln!("{}", output::summary_line(&response));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn params_must_be_an_object() {
        assert!(parse_params(None).unwrap().is_empty());
        let map = parse_params(Some(r#"{"x": 1, "tags": ["a"]}"#)).unwrap();
        assert_eq!(map.get("x"), Some(&Value::Int(1)));
        assert!(parse_params(Some("[1, 2]")).is_err());
        assert!(parse_params(Some(r#"{"x": null}"#)).is_err());
        assert!(parse_params(Some("{")).is_err());
    }
}
