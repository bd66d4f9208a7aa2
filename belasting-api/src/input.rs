//! Lenient parsing of amounts typed into the savings form.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use tracing::warn;

/// Normalizes input for decimal parsing: trims whitespace, drops a leading
/// euro sign and removes commas (thousands separator).
fn normalize_amount_input(s: &str) -> String {
    s.trim().trim_start_matches('€').trim().replace(',', "")
}

/// Parses a user-typed amount.
///
/// Empty input is 0. Exponent notation such as `1e21` is accepted. Input
/// that is not a number, or is out of `Decimal` range, is 0 with a warning.
pub fn parse_amount(s: &str) -> Decimal {
    let normalized = normalize_amount_input(s);
    if normalized.is_empty() {
        return Decimal::ZERO;
    }
    normalized
        .parse::<Decimal>()
        .or_else(|e| Decimal::from_scientific(&normalized).map_err(|_| e))
        .unwrap_or_else(|e| {
            warn!(input = %s, "unparsable amount treated as 0: {}", e);
            Decimal::ZERO
        })
}

/// Accepts a JSON number, a numeric string or null; anything else is 0.
pub fn deserialize_lenient_amount<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => parse_amount(&n.to_string()),
        Some(serde_json::Value::String(s)) => parse_amount(&s),
        Some(serde_json::Value::Null) | None => Decimal::ZERO,
        Some(other) => {
            warn!(input = %other, "non-numeric amount treated as 0");
            Decimal::ZERO
        }
    })
}
