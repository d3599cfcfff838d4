//! Single-query subcommands and how their answers are printed.

use anyhow::{Context, Result};
use clap::Subcommand;
use serde_json::json;
use tally_core::{Transaction, TransactionStore, parse_date};

use crate::config::DisplaySection;
use crate::render;

#[derive(Subcommand, Debug)]
pub enum Query {
    /// Every record in insertion order
    All,
    /// Distinct type tags
    Types,
    /// Sum of all amounts
    Total,
    /// Sum of amounts matching the given date parts
    TotalByDate {
        #[arg(long)]
        year: Option<i32>,
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=31))]
        day: Option<u32>,
    },
    /// Records with this exact type tag
    ByType { kind: String },
    /// Records dated within [from, to]
    Range { from: String, to: String },
    /// Records for this exact merchant name
    Merchant { name: String },
    /// Mean amount
    Average,
    /// Records with min <= amount <= max
    AmountRange {
        #[arg(allow_hyphen_values = true)]
        min: f64,
        #[arg(allow_hyphen_values = true)]
        max: f64,
    },
    /// Sum of debit amounts
    DebitTotal,
    /// Month number with the most records
    BusiestMonth,
    /// Month name with the most debit records
    BusiestDebitMonth,
    /// debit, credit or equal
    Dominant,
    /// Records dated strictly before this date
    Before { date: String },
    /// Record with this id
    Find { id: String },
    /// Every description in insertion order
    Descriptions,
}

/// Computed result of one query, borrowed from the store.
#[derive(Debug)]
pub enum Answer<'a> {
    Records(Vec<&'a Transaction>),
    Record(Option<&'a Transaction>),
    Amount(f64),
    Average(Option<f64>),
    Month(u32),
    Label(String),
    Strings(Vec<&'a str>),
}

impl Query {
    pub fn run<'a>(&self, store: &'a TransactionStore) -> Result<Answer<'a>> {
        let answer = match self {
            Query::All => Answer::Records(store.all().iter().collect()),
            Query::Types => Answer::Strings(store.unique_types().into_iter().collect()),
            Query::Total => Answer::Amount(store.total_amount()),
            Query::TotalByDate { year, month, day } => {
                Answer::Amount(store.total_amount_by_date(*year, *month, *day))
            }
            Query::ByType { kind } => Answer::Records(store.by_type(kind)),
            Query::Range { from, to } => {
                let start = parse_date(from).context("range start")?;
                let end = parse_date(to).context("range end")?;
                Answer::Records(store.in_date_range(start, end))
            }
            Query::Merchant { name } => Answer::Records(store.by_merchant(name)),
            Query::Average => Answer::Average(store.average_amount()),
            Query::AmountRange { min, max } => Answer::Records(store.by_amount_range(*min, *max)),
            Query::DebitTotal => Answer::Amount(store.total_debit_amount()),
            Query::BusiestMonth => Answer::Month(store.most_frequent_month()),
            Query::BusiestDebitMonth => {
                Answer::Label(store.most_frequent_debit_month().name().to_string())
            }
            Query::Dominant => Answer::Label(store.dominant_type().to_string()),
            Query::Before { date } => {
                let date = parse_date(date).context("before date")?;
                Answer::Records(store.before(date))
            }
            Query::Find { id } => Answer::Record(crate::lookup(store, id)),
            Query::Descriptions => Answer::Strings(store.descriptions()),
        };
        Ok(answer)
    }
}

impl Answer<'_> {
    pub fn render(&self, display: &DisplaySection) -> String {
        match self {
            Answer::Records(records) => records
                .iter()
                .map(|t| format!("{}\n", render::row(t, display)))
                .collect(),
            Answer::Record(Some(t)) => format!("{}\n", render::detail(t, display)),
            Answer::Record(None) => "not found\n".to_string(),
            Answer::Amount(v) => format!("{}\n", render::amount(*v, display)),
            Answer::Average(Some(v)) => format!("{}\n", render::amount(*v, display)),
            Answer::Average(None) => "n/a (no transactions)\n".to_string(),
            Answer::Month(m) => format!("{m}\n"),
            Answer::Label(s) => format!("{s}\n"),
            Answer::Strings(items) => items.iter().map(|s| format!("{s}\n")).collect(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        let value = match self {
            Answer::Records(records) => serde_json::to_value(records)?,
            Answer::Record(record) => serde_json::to_value(record)?,
            Answer::Amount(v) => json!(v),
            Answer::Average(v) => json!(v),
            Answer::Month(m) => json!(m),
            Answer::Label(s) => json!(s),
            Answer::Strings(items) => json!(items),
        };
        serde_json::to_string_pretty(&value).context("serialize answer")
    }
}
