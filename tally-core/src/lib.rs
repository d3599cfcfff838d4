//! tally-core: transaction records and the in-memory query store

pub mod error;
pub mod store;
pub mod time;
pub mod transaction;

pub use error::LedgerError;
pub use store::{DominantType, TransactionStore};
pub use time::{format_date, parse_date};
pub use transaction::{CREDIT, DEBIT, Transaction, TransactionDraft, TransactionId};
