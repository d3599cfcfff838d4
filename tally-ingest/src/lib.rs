//! tally-ingest: dataset loading and form entry parsing that feed the store.

pub mod types;
pub mod parsers;

pub use types::FormEntry;
pub use parsers::form::{add_form_entry, parse_form_entry, short_description};
pub use parsers::json_dataset::{load_dataset, parse_dataset_str, write_dataset};
