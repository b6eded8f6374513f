//! Cross-context messages exchanged with a companion popup surface

use serde::{Deserialize, Serialize};

/// Messages the engine consumes from other extension contexts.
///
/// Wire shape: `{"action": "toggleSelection", "selectionMode": true}` and
/// `{"action": "currencyUpdated", "fromCurrency": "USD", "toCurrency": "EUR"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Message {
    #[serde(rename_all = "camelCase")]
    ToggleSelection { selection_mode: bool },
    #[serde(rename_all = "camelCase")]
    CurrencyUpdated {
        from_currency: String,
        to_currency: String,
    },
}

/// Acknowledgement sent back for every handled message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub success: bool,
}

impl MessageResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}
