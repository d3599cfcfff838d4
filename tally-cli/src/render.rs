//! Console rendering for query results.

use tally_core::{Transaction, format_date};
use tally_ingest::short_description;

use crate::config::DisplaySection;

pub fn amount(value: f64, display: &DisplaySection) -> String {
    format!("{:.*}", display.precision, value)
}

/// Row class used by listings: zero counts as positive.
pub fn sign_class(t: &Transaction) -> &'static str {
    if t.amount >= 0.0 {
        "positive"
    } else {
        "negative"
    }
}

/// One listing line with a shortened description.
pub fn row(t: &Transaction, display: &DisplaySection) -> String {
    format!(
        "{} | {} | {} | {} | {} | {}",
        t.id,
        format_date(t.date),
        t.kind,
        amount(t.amount, display),
        t.merchant_name,
        short_description(&t.description, display.description_words)
    )
}

/// Full record view, description untruncated.
pub fn detail(t: &Transaction, display: &DisplaySection) -> String {
    format!(
        "id {} || {} || {} || {} || {} || {}\n{}",
        t.id,
        format_date(t.date),
        t.kind,
        amount(t.amount, display),
        t.merchant_name,
        t.card_type,
        t.description
    )
}

pub fn listing(title: &str, records: &[&Transaction], display: &DisplaySection) -> String {
    let mut out = format!("## {title} ({})\n", records.len());
    if records.is_empty() {
        out.push_str("(none)\n");
    }
    for t in records {
        out.push_str("- ");
        out.push_str(&row(t, display));
        out.push('\n');
    }
    out
}
