//! TransactionStore: ordered, append-only ledger with ad hoc queries.
//!
//! Design:
//! - Records live in one `Vec` in insertion order. That order is the order
//!   of every listing query.
//! - Every query is a single O(n) pass. No indexes: datasets are small and
//!   queries are ad hoc.
//! - Month aggregates count into a month-indexed table, then scan it from
//!   January up. A later month only wins with a strictly higher count, so
//!   ties go to the lowest month number.

use chrono::{Datelike, Month, NaiveDate};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

use crate::error::Result;
use crate::transaction::{Transaction, TransactionDraft, TransactionId};

const MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

/// Which of debit/credit has more records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DominantType {
    Debit,
    Credit,
    Equal,
}

impl DominantType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DominantType::Debit => "debit",
            DominantType::Credit => "credit",
            DominantType::Equal => "equal",
        }
    }
}

impl fmt::Display for DominantType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Default, Clone)]
pub struct TransactionStore {
    records: Vec<Transaction>,
}

impl TransactionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from already-validated records, keeping their order.
    pub fn from_records(records: impl IntoIterator<Item = Transaction>) -> Self {
        let records: Vec<Transaction> = records.into_iter().collect();
        tracing::debug!(count = records.len(), "store seeded");
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Append a record at the end. Duplicate ids are not rejected.
    pub fn append(&mut self, record: Transaction) {
        tracing::debug!(id = %record.id, date = %record.date, "append transaction");
        self.records.push(record);
    }

    /// Validate a raw record and append it, failing on a malformed date.
    pub fn ingest(&mut self, draft: TransactionDraft) -> Result<&Transaction> {
        let record = Transaction::try_from(draft).inspect_err(|e| {
            tracing::warn!(error = %e, "rejected transaction");
        })?;
        self.append(record);
        let idx = self.records.len() - 1;
        Ok(&self.records[idx])
    }

    /// All records in insertion order, as a read-only view.
    pub fn all(&self) -> &[Transaction] {
        &self.records
    }

    pub fn unique_types(&self) -> BTreeSet<&str> {
        self.records.iter().map(|t| t.kind.as_str()).collect()
    }

    /// Sum of every amount; `0.0` for an empty store.
    pub fn total_amount(&self) -> f64 {
        self.records.iter().map(|t| t.amount).sum()
    }

    /// Sum of amounts whose date matches every given component.
    ///
    /// `None` matches any value for that component; all three `None` is the
    /// same as [`Self::total_amount`].
    pub fn total_amount_by_date(
        &self,
        year: Option<i32>,
        month: Option<u32>,
        day: Option<u32>,
    ) -> f64 {
        self.records
            .iter()
            .filter(|t| {
                year.is_none_or(|y| t.date.year() == y)
                    && month.is_none_or(|m| t.date.month() == m)
                    && day.is_none_or(|d| t.date.day() == d)
            })
            .map(|t| t.amount)
            .sum()
    }

    /// Exact, case-sensitive match on the type tag.
    pub fn by_type(&self, kind: &str) -> Vec<&Transaction> {
        self.records.iter().filter(|t| t.kind == kind).collect()
    }

    /// Records dated within `[start, end]`. Empty when `start > end`.
    pub fn in_date_range(&self, start: NaiveDate, end: NaiveDate) -> Vec<&Transaction> {
        self.records
            .iter()
            .filter(|t| start <= t.date && t.date <= end)
            .collect()
    }

    pub fn by_merchant(&self, name: &str) -> Vec<&Transaction> {
        self.records
            .iter()
            .filter(|t| t.merchant_name == name)
            .collect()
    }

    /// Mean amount, or `None` for an empty store.
    ///
    /// The mean of zero records is undefined; callers decide what to show.
    pub fn average_amount(&self) -> Option<f64> {
        if self.records.is_empty() {
            return None;
        }
        Some(self.total_amount() / self.records.len() as f64)
    }

    /// Records with `min <= amount <= max`. Empty when `min > max`.
    pub fn by_amount_range(&self, min: f64, max: f64) -> Vec<&Transaction> {
        self.records
            .iter()
            .filter(|t| min <= t.amount && t.amount <= max)
            .collect()
    }

    pub fn total_debit_amount(&self) -> f64 {
        self.records
            .iter()
            .filter(|t| t.is_debit())
            .map(|t| t.amount)
            .sum()
    }

    /// Month number (1-12) with the most records, year ignored.
    ///
    /// Ties go to the lowest month. An empty store yields `1`.
    pub fn most_frequent_month(&self) -> u32 {
        busiest_month0(self.records.iter()) as u32 + 1
    }

    /// Month with the most debit records. Same tie-break as
    /// [`Self::most_frequent_month`]; January when there are no debits.
    pub fn most_frequent_debit_month(&self) -> Month {
        MONTHS[busiest_month0(self.records.iter().filter(|t| t.is_debit()))]
    }

    /// Debit vs credit by record count. Other type tags are ignored.
    pub fn dominant_type(&self) -> DominantType {
        let (debit, credit) = self.records.iter().fold((0usize, 0usize), |(d, c), t| {
            if t.is_debit() {
                (d + 1, c)
            } else if t.is_credit() {
                (d, c + 1)
            } else {
                (d, c)
            }
        });

        match debit.cmp(&credit) {
            std::cmp::Ordering::Greater => DominantType::Debit,
            std::cmp::Ordering::Less => DominantType::Credit,
            std::cmp::Ordering::Equal => DominantType::Equal,
        }
    }

    /// Records dated strictly before `date`.
    pub fn before(&self, date: NaiveDate) -> Vec<&Transaction> {
        self.records.iter().filter(|t| t.date < date).collect()
    }

    /// First record with this id, if any.
    pub fn find_by_id(&self, id: &TransactionId) -> Option<&Transaction> {
        self.records.iter().find(|t| &t.id == id)
    }

    pub fn descriptions(&self) -> Vec<&str> {
        self.records.iter().map(|t| t.description.as_str()).collect()
    }
}

// Zero-based month with the highest count; 0 when nothing was counted.
fn busiest_month0<'a>(records: impl Iterator<Item = &'a Transaction>) -> usize {
    let mut counts = [0usize; 12];
    for t in records {
        counts[t.date.month0() as usize] += 1;
    }

    let mut best = 0;
    let mut best_count = 0;
    for (month0, &count) in counts.iter().enumerate() {
        if count > best_count {
            best = month0;
            best_count = count;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::{CREDIT, DEBIT};

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn txn(id: i64, d: &str, amount: f64, kind: &str) -> Transaction {
        Transaction::new(id, date(d), amount, kind, format!("txn {id}"))
    }

    fn scenario() -> TransactionStore {
        TransactionStore::from_records([
            txn(1, "2019-01-02", 100.0, DEBIT),
            txn(2, "2019-02-10", 50.0, CREDIT),
            txn(3, "2019-02-15", 75.0, DEBIT),
        ])
    }

    fn ids(records: &[&Transaction]) -> Vec<TransactionId> {
        records.iter().map(|t| t.id.clone()).collect()
    }

    #[test]
    fn test_scenario_totals() {
        let store = scenario();
        assert_eq!(store.total_amount(), 225.0);
        assert_eq!(store.total_amount_by_date(Some(2019), Some(2), None), 125.0);
        assert_eq!(store.total_amount_by_date(None, None, None), 225.0);
        assert_eq!(store.total_amount_by_date(None, None, Some(15)), 75.0);
        assert_eq!(store.total_amount_by_date(Some(2020), None, None), 0.0);
        assert_eq!(store.total_debit_amount(), 175.0);
    }

    #[test]
    fn test_scenario_months_and_types() {
        let store = scenario();
        assert_eq!(store.most_frequent_month(), 2);
        assert_eq!(store.most_frequent_debit_month(), Month::January);
        assert_eq!(store.dominant_type(), DominantType::Debit);
    }

    #[test]
    fn test_before_is_strict() {
        let store = scenario();
        assert_eq!(ids(&store.before(date("2019-02-01"))), vec![TransactionId::Number(1)]);
        assert!(store.before(date("2019-01-02")).is_empty());
    }

    #[test]
    fn test_month_tie_goes_to_lowest_month() {
        // Insertion order puts March first; March and May tie.
        let store = TransactionStore::from_records([
            txn(1, "2019-05-01", 1.0, DEBIT),
            txn(2, "2020-03-01", 1.0, DEBIT),
            txn(3, "2019-05-20", 1.0, CREDIT),
            txn(4, "2021-03-09", 1.0, CREDIT),
        ]);
        assert_eq!(store.most_frequent_month(), 3);
        assert_eq!(store.most_frequent_debit_month(), Month::March);
    }

    #[test]
    fn test_empty_store_defaults() {
        let store = TransactionStore::new();
        assert_eq!(store.total_amount(), 0.0);
        assert_eq!(store.average_amount(), None);
        assert_eq!(store.most_frequent_month(), 1);
        assert_eq!(store.most_frequent_debit_month(), Month::January);
        assert_eq!(store.dominant_type(), DominantType::Equal);
        assert!(store.unique_types().is_empty());
        assert!(store.descriptions().is_empty());
    }

    #[test]
    fn test_debit_month_ignores_credits() {
        let store = TransactionStore::from_records([
            txn(1, "2019-06-01", 1.0, CREDIT),
            txn(2, "2019-06-02", 1.0, CREDIT),
            txn(3, "2019-09-03", 1.0, DEBIT),
        ]);
        assert_eq!(store.most_frequent_month(), 6);
        assert_eq!(store.most_frequent_debit_month(), Month::September);
        assert_eq!(store.most_frequent_debit_month().name(), "September");
    }

    #[test]
    fn test_dominant_type_ignores_other_tags() {
        let store = TransactionStore::from_records([
            txn(1, "2019-06-01", 1.0, CREDIT),
            txn(2, "2019-06-02", 1.0, "refund"),
            txn(3, "2019-06-03", 1.0, "refund"),
            txn(4, "2019-06-04", 1.0, DEBIT),
        ]);
        assert_eq!(store.dominant_type(), DominantType::Equal);
        assert_eq!(store.dominant_type().to_string(), "equal");
    }

    #[test]
    fn test_average() {
        assert_eq!(scenario().average_amount(), Some(75.0));
    }

    #[test]
    fn test_ranges_are_inclusive_and_empty_when_inverted() {
        let store = scenario();
        assert_eq!(
            ids(&store.in_date_range(date("2019-01-02"), date("2019-02-10"))),
            vec![TransactionId::Number(1), TransactionId::Number(2)]
        );
        assert!(store.in_date_range(date("2019-03-01"), date("2019-01-01")).is_empty());

        assert_eq!(
            ids(&store.by_amount_range(50.0, 75.0)),
            vec![TransactionId::Number(2), TransactionId::Number(3)]
        );
        assert!(store.by_amount_range(100.0, 50.0).is_empty());
    }

    #[test]
    fn test_by_type_is_case_sensitive() {
        let store = scenario();
        assert_eq!(store.by_type(DEBIT).len(), 2);
        assert!(store.by_type("Debit").is_empty());
    }

    #[test]
    fn test_unique_types() {
        let mut store = scenario();
        store.append(txn(4, "2019-03-01", 5.0, "fee"));
        let types: Vec<&str> = store.unique_types().into_iter().collect();
        assert_eq!(types, vec!["credit", "debit", "fee"]);
    }

    #[test]
    fn test_find_by_id_returns_first_match() {
        let mut store = scenario();
        store.append(Transaction::new(2i64, date("2020-01-01"), 9.0, DEBIT, "dup"));
        let found = store.find_by_id(&TransactionId::Number(2)).unwrap();
        assert_eq!(found.amount, 50.0);
        assert!(store.find_by_id(&TransactionId::from("2")).is_none());
    }

    #[test]
    fn test_ingest_validates_date() {
        let mut store = TransactionStore::new();
        let draft = TransactionDraft {
            id: TransactionId::from("a"),
            date: "2019-02-31".to_string(),
            amount: 1.0,
            kind: DEBIT.to_string(),
            description: String::new(),
            merchant_name: String::new(),
            card_type: String::new(),
        };
        assert!(store.ingest(draft.clone()).is_err());
        assert!(store.is_empty());

        let ok = TransactionDraft {
            date: "2019-02-28T12:00:00".to_string(),
            ..draft
        };
        let appended = store.ingest(ok).unwrap();
        assert_eq!(appended.date, date("2019-02-28"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_can_be_shared_behind_a_lock() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TransactionStore>();
    }

    #[test]
    fn test_descriptions_in_order() {
        assert_eq!(scenario().descriptions(), vec!["txn 1", "txn 2", "txn 3"]);
    }
}
