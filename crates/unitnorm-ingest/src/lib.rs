pub mod csv_table;
pub mod error;

pub use csv_table::{LabelTable, read_label_table, write_label_table};
pub use error::IngestError;
