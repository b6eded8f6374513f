//! Rate retrieval: the source trait and its HTTP implementation

use crate::models::{RateTable, RatesResponse};
use thiserror::Error;

/// Default remote endpoint; the base currency is appended as a path segment.
pub const DEFAULT_ENDPOINT: &str = "https://api.exchangerate-api.com/v4/latest";

#[derive(Debug, Error)]
pub enum RateError {
    #[error("rate request failed: {0}")]
    Request(String),
    #[error("malformed rate response: {0}")]
    Malformed(String),
}

/// One-shot retrieval of the full rate table for a base currency.
///
/// No retry or backoff; a single attempt per invocation.
pub trait RateSource {
    fn fetch(&self, base: &str) -> Result<RateTable, RateError>;
}

/// Fixed table, for tests and offline embedding.
#[derive(Debug, Clone, Default)]
pub struct StaticRateSource {
    pub table: RateTable,
}

impl StaticRateSource {
    pub fn new(table: RateTable) -> Self {
        Self { table }
    }
}

impl RateSource for StaticRateSource {
    fn fetch(&self, _base: &str) -> Result<RateTable, RateError> {
        Ok(self.table.clone())
    }
}

/// Blocking HTTP GET of `{endpoint}/{base}` expecting a JSON body with a
/// `rates` field.
#[cfg(feature = "http")]
#[derive(Debug, Clone)]
pub struct HttpRateSource {
    endpoint: String,
}

#[cfg(feature = "http")]
impl HttpRateSource {
    pub fn new() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }

    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }
}

#[cfg(feature = "http")]
impl Default for HttpRateSource {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "http")]
impl RateSource for HttpRateSource {
    fn fetch(&self, base: &str) -> Result<RateTable, RateError> {
        let url = format!("{}/{}", self.endpoint, base);
        let response = reqwest::blocking::get(&url)
            .and_then(|r| r.error_for_status())
            .map_err(|e| RateError::Request(e.to_string()))?;
        let body: RatesResponse = response
            .json()
            .map_err(|e| RateError::Malformed(e.to_string()))?;
        if body.rates.is_empty() {
            return Err(RateError::Malformed("empty rates field".to_string()));
        }
        Ok(body.rates)
    }
}
