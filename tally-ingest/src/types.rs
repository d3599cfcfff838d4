use serde::{Deserialize, Serialize};

/// Raw strings as typed into an entry form, before any validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormEntry {
    pub date: String,
    pub amount: String,
    /// Type tag, e.g. "debit" or "credit"
    pub kind: String,
    pub description: String,
    #[serde(default)]
    pub merchant_name: Option<String>,
    #[serde(default)]
    pub card_type: Option<String>,
}
