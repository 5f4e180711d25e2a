// file: src/dataset/mod.rs
// description: tabular dataset module exports
// reference: internal module structure

pub mod column;
pub mod loader;
pub mod table;

pub use column::{Column, Record};
pub use loader::{SheetFormat, load_dataset, parse_csv_dataset, parse_dataset};
pub use table::{contains_ci, Dataset, Row, WorkingSet};
