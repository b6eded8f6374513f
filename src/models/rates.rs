//! Exchange rate table and the remote response envelope

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Currency code -> units per one unit of the base currency.
///
/// Replaced wholesale on every refresh, never patched entry by entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RateTable {
    rates: BTreeMap<String, f64>,
}

impl RateTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, code: impl Into<String>, value: f64) {
        self.rates.insert(code.into(), value);
    }

    pub fn value(&self, code: &str) -> Option<f64> {
        self.rates.get(code).copied()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.rates.contains_key(code)
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// All known currency codes, sorted.
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.rates.keys().map(String::as_str)
    }

    /// Cross rate between two currencies quoted against the same base:
    /// one unit of `from` is worth `rate_between(from, to)` units of `to`.
    pub fn rate_between(&self, from: &str, to: &str) -> Option<f64> {
        let from_value = self.value(from)?;
        let to_value = self.value(to)?;
        if from_value <= 0.0 {
            return None;
        }
        Some(to_value / from_value)
    }
}

impl FromIterator<(String, f64)> for RateTable {
    fn from_iter<T: IntoIterator<Item = (String, f64)>>(iter: T) -> Self {
        Self {
            rates: iter.into_iter().collect(),
        }
    }
}

/// Body shape of the remote rate endpoint: `{"base": "USD", "rates": {...}}`.
#[derive(Debug, Clone, Deserialize)]
pub struct RatesResponse {
    #[serde(default)]
    pub base: Option<String>,
    pub rates: RateTable,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> RateTable {
        [("USD".to_string(), 1.0), ("EUR".to_string(), 0.9), ("JPY".to_string(), 150.0)]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_rate_between() {
        let t = table();
        assert_eq!(t.rate_between("USD", "EUR"), Some(0.9));
        assert_eq!(t.rate_between("EUR", "EUR"), Some(1.0));
        assert_eq!(t.rate_between("USD", "XXX"), None);
    }

    #[test]
    fn test_rate_between_rejects_nonpositive_base() {
        let mut t = table();
        t.insert("BAD", 0.0);
        assert_eq!(t.rate_between("BAD", "USD"), None);
    }

    #[test]
    fn test_codes_sorted() {
        let t = table();
        let codes: Vec<&str> = t.codes().collect();
        assert_eq!(codes, vec!["EUR", "JPY", "USD"]);
    }

    #[test]
    fn test_response_deserialization() {
        let body = r#"{"base":"USD","date":"2024-01-01","rates":{"EUR":0.9,"GBP":0.78}}"#;
        let response: RatesResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.base.as_deref(), Some("USD"));
        assert_eq!(response.rates.value("GBP"), Some(0.78));
    }
}
