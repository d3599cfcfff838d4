//! Entry-form parsing: user-typed strings into a validated [`Transaction`].
//!
//! Rules:
//! - date must parse (time-of-day is dropped)
//! - amount is trimmed and must be a finite decimal
//! - type and description are required
//! - rows added through the form are numbered `len + 1`

use anyhow::{Context, Result};
use tally_core::{LedgerError, Transaction, TransactionId, TransactionStore, parse_date};

use crate::types::FormEntry;

fn parse_amount(raw: &str) -> Result<f64, LedgerError> {
    let s = raw.trim();
    match s.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(LedgerError::InvalidAmount(raw.to_string())),
    }
}

fn required<'a>(value: &'a str, field: &'static str) -> Result<&'a str, LedgerError> {
    let v = value.trim();
    if v.is_empty() {
        return Err(LedgerError::MissingField(field));
    }
    Ok(v)
}

/// Validate a form entry into a record carrying `id`.
pub fn parse_form_entry(entry: &FormEntry, id: impl Into<TransactionId>) -> Result<Transaction> {
    let date = parse_date(&entry.date).context("form date")?;
    let amount = parse_amount(&entry.amount).context("form amount")?;
    let kind = required(&entry.kind, "transaction_type")?;
    let description = required(&entry.description, "transaction_description")?;

    let mut txn = Transaction::new(id, date, amount, kind, description);
    if let Some(merchant) = entry.merchant_name.as_deref() {
        txn = txn.with_merchant(merchant.trim());
    }
    if let Some(card) = entry.card_type.as_deref() {
        txn = txn.with_card(card.trim());
    }
    Ok(txn)
}

/// Parse a form entry and append it with the next sequential id.
pub fn add_form_entry<'a>(store: &'a mut TransactionStore, entry: &FormEntry) -> Result<&'a Transaction> {
    let next_id = i64::try_from(store.len() + 1).context("store too large for a numeric id")?;
    let txn = parse_form_entry(entry, next_id)?;
    store.append(txn);
    store
        .all()
        .last()
        .context("store empty right after append")
}

/// First `words` whitespace-separated words of `text`, single-spaced.
pub fn short_description(text: &str, words: usize) -> String {
    text.split_whitespace()
        .take(words)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn entry(date: &str, amount: &str) -> FormEntry {
        FormEntry {
            date: date.to_string(),
            amount: amount.to_string(),
            kind: "debit".to_string(),
            description: "Weekly groceries at the corner shop".to_string(),
            merchant_name: Some(" SuperMart ".to_string()),
            card_type: None,
        }
    }

    #[test]
    fn test_parse_form_entry() {
        let txn = parse_form_entry(&entry("2024-03-30", " -12.50 "), 5i64).unwrap();
        assert_eq!(txn.id, TransactionId::Number(5));
        assert_eq!(txn.date, NaiveDate::from_ymd_opt(2024, 3, 30).unwrap());
        assert_eq!(txn.amount, -12.5);
        assert_eq!(txn.merchant_name, "SuperMart");
        assert_eq!(txn.card_type, "");
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(parse_form_entry(&entry("2024-02-30", "1"), 1i64).is_err());
        assert!(parse_form_entry(&entry("2024-02-01", "abc"), 1i64).is_err());
        assert!(parse_form_entry(&entry("2024-02-01", "inf"), 1i64).is_err());
        assert!(parse_form_entry(&entry("2024-02-01", ""), 1i64).is_err());

        let mut blank = entry("2024-02-01", "1");
        blank.description = "   ".to_string();
        let err = parse_form_entry(&blank, 1i64).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LedgerError>(),
            Some(LedgerError::MissingField("transaction_description"))
        ));
    }

    #[test]
    fn test_add_form_entry_numbers_rows() {
        let mut store = TransactionStore::new();
        let first = add_form_entry(&mut store, &entry("2024-01-01", "10")).unwrap().id.clone();
        let second = add_form_entry(&mut store, &entry("2024-01-02", "20")).unwrap().id.clone();
        assert_eq!(first, TransactionId::Number(1));
        assert_eq!(second, TransactionId::Number(2));
        assert_eq!(store.total_amount(), 30.0);
    }

    #[test]
    fn test_failed_entry_leaves_store_untouched() {
        let mut store = TransactionStore::new();
        assert!(add_form_entry(&mut store, &entry("bogus", "10")).is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn test_short_description() {
        assert_eq!(
            short_description("Weekly groceries at the corner shop", 4),
            "Weekly groceries at the"
        );
        assert_eq!(short_description("  two   words ", 4), "two words");
        assert_eq!(short_description("", 4), "");
    }
}
