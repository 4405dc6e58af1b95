//! Cache version token
//!
//! Identifies which revision of the remote dataset is materialized locally.
//! Tokens are compared by equality only.
//!
//! The remote metadata table may hold the token as a JSON string or a JSON
//! number. Both forms are normalized to their text so `"3"`, `3` and `3.0`
//! compare equal.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::error::DomainError;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub struct CacheVersion(String);

impl CacheVersion {
    pub fn new(token: impl Into<String>) -> Result<Self, DomainError> {
        let token = token.into();
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("Cache version cannot be empty"));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Normalize a raw JSON value from the remote store.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, DomainError> {
        match value {
            serde_json::Value::String(text) => Self::new(text.as_str()),
            serde_json::Value::Number(number) => Self::new(number_token(number)),
            other => Err(DomainError::parse(format!(
                "Cache version must be a string or number, got {}",
                other
            ))),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Integral floats render without the fraction so `3.0` matches `"3"`.
fn number_token(number: &serde_json::Number) -> String {
    match number.as_f64() {
        Some(value)
            if !number.is_i64()
                && !number.is_u64()
                && value.fract() == 0.0
                && value.abs() < 9_007_199_254_740_992.0 =>
        {
            format!("{}", value as i64)
        }
        _ => number.to_string(),
    }
}

impl fmt::Display for CacheVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<CacheVersion> for String {
    fn from(version: CacheVersion) -> String {
        version.0
    }
}

impl<'de> Deserialize<'de> for CacheVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Self::from_json(&value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn string_and_number_tokens_compare_equal() {
        let from_text = CacheVersion::from_json(&json!("42")).expect("string token");
        let from_number = CacheVersion::from_json(&json!(42)).expect("number token");
        assert_eq!(from_text, from_number);
    }

    #[test]
    fn token_is_trimmed() {
        let version = CacheVersion::new(" 2024-06-01 ").expect("token");
        assert_eq!(version.as_str(), "2024-06-01");
    }

    #[test]
    fn rejects_empty_and_structured_tokens() {
        assert!(CacheVersion::new("").is_err());
        assert!(CacheVersion::from_json(&json!(null)).is_err());
        assert!(CacheVersion::from_json(&json!({"v": 1})).is_err());
    }

    #[test]
    fn deserializes_from_number() {
        let version: CacheVersion = serde_json::from_str("7").expect("number");
        assert_eq!(version.as_str(), "7");
        assert_eq!(serde_json::to_string(&version).expect("ser"), "\"7\"");
    }

    #[test]
    fn integral_float_matches_integer_token() {
        let from_float = CacheVersion::from_json(&json!(3.0)).expect("float token");
        assert_eq!(from_float, CacheVersion::new("3").expect("token"));

        let fractional = CacheVersion::from_json(&json!(3.5)).expect("float token");
        assert_eq!(fractional.as_str(), "3.5");
    }
}
