//! Transaction record types for the in-memory ledger

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{LedgerError, Result};
use crate::time::{parse_date, serde_date};

/// Type tag counted by the debit-specific aggregates.
pub const DEBIT: &str = "debit";
/// Type tag counted against debits by [`crate::TransactionStore::dominant_type`].
pub const CREDIT: &str = "credit";

/// Opaque record identifier.
///
/// Datasets use both JSON strings and JSON integers. The two kinds never
/// compare equal: `Text("40")` and `Number(40)` are different ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TransactionId {
    Number(i64),
    Text(String),
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionId::Number(n) => write!(f, "{n}"),
            TransactionId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for TransactionId {
    fn from(n: i64) -> Self {
        TransactionId::Number(n)
    }
}

impl From<&str> for TransactionId {
    fn from(s: &str) -> Self {
        TransactionId::Text(s.to_string())
    }
}

impl From<String> for TransactionId {
    fn from(s: String) -> Self {
        TransactionId::Text(s)
    }
}

/// One ledger entry.
///
/// The serialized shape matches the dataset files field for field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(rename = "transaction_id")]
    pub id: TransactionId,
    /// Calendar date; time-of-day is dropped on parse
    #[serde(rename = "transaction_date", with = "serde_date")]
    pub date: NaiveDate,
    /// Signed amount, independent of `kind`
    #[serde(rename = "transaction_amount")]
    pub amount: f64,
    /// Open tag; only "debit" and "credit" drive type-specific aggregates
    #[serde(rename = "transaction_type")]
    pub kind: String,
    #[serde(rename = "transaction_description", default)]
    pub description: String,
    #[serde(default)]
    pub merchant_name: String,
    /// Display only
    #[serde(default)]
    pub card_type: String,
}

impl Transaction {
    pub fn new(
        id: impl Into<TransactionId>,
        date: NaiveDate,
        amount: f64,
        kind: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            date,
            amount,
            kind: kind.into(),
            description: description.into(),
            merchant_name: String::new(),
            card_type: String::new(),
        }
    }

    pub fn with_merchant(mut self, merchant_name: impl Into<String>) -> Self {
        self.merchant_name = merchant_name.into();
        self
    }

    pub fn with_card(mut self, card_type: impl Into<String>) -> Self {
        self.card_type = card_type.into();
        self
    }

    pub fn is_debit(&self) -> bool {
        self.kind == DEBIT
    }

    pub fn is_credit(&self) -> bool {
        self.kind == CREDIT
    }

    /// Compact JSON rendering of this record, in dataset shape.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// A record whose date has not been validated yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionDraft {
    #[serde(rename = "transaction_id")]
    pub id: TransactionId,
    #[serde(rename = "transaction_date")]
    pub date: String,
    #[serde(rename = "transaction_amount")]
    pub amount: f64,
    #[serde(rename = "transaction_type")]
    pub kind: String,
    #[serde(rename = "transaction_description", default)]
    pub description: String,
    #[serde(default)]
    pub merchant_name: String,
    #[serde(default)]
    pub card_type: String,
}

impl TryFrom<TransactionDraft> for Transaction {
    type Error = LedgerError;

    fn try_from(draft: TransactionDraft) -> Result<Self> {
        let date = parse_date(&draft.date)?;
        if !draft.amount.is_finite() {
            return Err(LedgerError::InvalidAmount(draft.amount.to_string()));
        }
        Ok(Self {
            id: draft.id,
            date,
            amount: draft.amount,
            kind: draft.kind,
            description: draft.description,
            merchant_name: draft.merchant_name,
            card_type: draft.card_type,
        })
    }
}
