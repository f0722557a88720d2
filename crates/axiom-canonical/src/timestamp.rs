use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};

/// Formats a timestamp as ISO-8601 UTC with a `Z` suffix.
///
/// Fractional seconds are emitted only when present, so whole-second
/// timestamps render as `2024-01-01T00:00:00Z`.
pub fn format_iso8601(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Parses an RFC 3339 / ISO-8601 date-time and normalizes it to UTC.
pub fn parse_iso8601(s: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(s).map(|dt| dt.with_timezone(&Utc))
}

/// Current wall-clock time truncated to whole seconds.
pub fn now_seconds() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(0)
}

/// Serde adapter for `DateTime<Utc>` fields on wire types.
pub mod iso8601 {
    use super::{format_iso8601, parse_iso8601};
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    /// Serializes as ISO-8601 text.
    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_iso8601(ts))
    }

    /// Deserializes from ISO-8601 text.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let s = String::deserialize(deserializer)?;
        parse_iso8601(&s).map_err(serde::de::Error::custom)
    }
}
