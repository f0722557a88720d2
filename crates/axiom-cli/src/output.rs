//! Output formatting utilities.

use axiom_core::AxiomResponse;
use serde_json::Value;

/// Formats a value as pretty JSON.
pub fn format_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

/// Formats a response as pretty JSON.
pub fn format_response(response: &AxiomResponse) -> String {
    serde_json::to_value(response)
        .map(|v| format_json(&v))
        .unwrap_or_else(|_| "{}".to_string())
}

/// One-line summary written to stderr after a verified transaction.
pub fn summary_line(response: &AxiomResponse) -> String {
    format!(
        "{:<24} {:<12} confidence={:.2} node={} remaining={}",
        truncate(&response.request_id, 24),
        response.result.status,
        response.result.confidence,
        response.metadata.node_id,
        response.metadata.rate_limit_remaining
    )
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
