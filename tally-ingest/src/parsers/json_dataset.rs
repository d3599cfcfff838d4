//! JSON dataset loader.
//!
//! Expected shape: a top-level array of objects keyed
//!   transaction_id, transaction_date, transaction_amount, transaction_type,
//!   transaction_description, merchant_name, card_type
//!
//! Dates are validated here, once. The first malformed record aborts the load.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tally_core::{Transaction, TransactionDraft, TransactionStore};

/// Parse dataset text into validated records, keeping file order.
pub fn parse_dataset_str(text: &str) -> Result<Vec<Transaction>> {
    let drafts: Vec<TransactionDraft> =
        serde_json::from_str(text).context("dataset is not a JSON array of transactions")?;

    let mut out = Vec::with_capacity(drafts.len());
    for (i, draft) in drafts.into_iter().enumerate() {
        let id = draft.id.clone();
        let record = Transaction::try_from(draft)
            .with_context(|| format!("record #{i} (id {id})"))?;
        out.push(record);
    }

    Ok(out)
}

/// Load a dataset file into a fresh store.
pub fn load_dataset(path: impl AsRef<Path>) -> Result<TransactionStore> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let records = parse_dataset_str(&text).with_context(|| format!("parsing {}", path.display()))?;

    tracing::info!(count = records.len(), path = %path.display(), "dataset loaded");
    Ok(TransactionStore::from_records(records))
}

/// Write records back in dataset shape (pretty-printed).
pub fn write_dataset(path: impl AsRef<Path>, records: &[Transaction]) -> Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(records).context("serialize dataset")?;
    fs::write(path, json).with_context(|| format!("write {}", path.display()))?;

    tracing::info!(count = records.len(), path = %path.display(), "dataset written");
    Ok(())
}
