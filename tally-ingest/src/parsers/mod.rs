pub mod form;
pub mod json_dataset;
