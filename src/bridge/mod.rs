//! Popup surface view-model: currency pickers, swap, rate info
//!
//! Only active when a companion popup exists; the engine owns one and routes
//! selections and swaps through its own state so the pair is persisted and a
//! reconversion is scheduled on every change.

use crate::models::{CurrencyPair, PairSide, RateTable};

/// Dropdown state of the two currency pickers.
#[derive(Debug, Default)]
pub struct PopupBridge {
    open_list: Option<PairSide>,
    query: String,
}

impl PopupBridge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens the searchable code list for one side, resetting the filter.
    pub fn open_picker(&mut self, side: PairSide) {
        self.open_list = Some(side);
        self.query.clear();
    }

    pub fn close_list(&mut self) {
        self.open_list = None;
        self.query.clear();
    }

    pub fn open_list(&self) -> Option<PairSide> {
        self.open_list
    }

    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Codes shown in the open dropdown: all known codes, sorted, filtered
    /// by the current query (case-insensitive substring).
    pub fn visible_codes(&self, table: Option<&RateTable>) -> Vec<String> {
        let Some(table) = table else {
            return Vec::new();
        };
        let needle = self.query.to_ascii_uppercase();
        table
            .codes()
            .filter(|code| needle.is_empty() || code.to_ascii_uppercase().contains(&needle))
            .map(str::to_string)
            .collect()
    }

    /// Effective exchange rate line, e.g. `1 USD = 0.9000 EUR`.
    pub fn rate_info(table: Option<&RateTable>, pair: &CurrencyPair) -> Option<String> {
        let rate = table?.rate_between(&pair.from, &pair.to)?;
        Some(format!("1 {} = {:.4} {}", pair.from, rate, pair.to))
    }
}
