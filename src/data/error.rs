use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("Failed to read source '{source_name}' from '{path}'")]
    FileLoad {
        source_name: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unreadable delimited data in source '{source_name}'")]
    Csv {
        source_name: String,
        #[source]
        source: csv::Error,
    },

    #[error("Source '{source_name}' has no '{column}' column (found: {found:?})")]
    MissingColumn {
        source_name: String,
        column: String,
        found: Vec<String>,
    },

    #[error("Required column '{column}' is absent from the combined dataset")]
    Schema { column: String },

    #[error("Source '{source_name}', row {row}: expected {expected} fields, found {found}")]
    MalformedRow {
        source_name: String,
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Source '{source_name}', row {row}: '{value}' is not a dd-mm-yyyy date")]
    DateParse {
        source_name: String,
        row: usize,
        value: String,
    },

    #[error("Source '{source_name}', row {row}: '{value}' is not a number")]
    ValueParse {
        source_name: String,
        row: usize,
        value: String,
    },

    #[error("Invalid date boundary '{value}', expected yyyy-mm-dd")]
    InvalidDateBoundary { value: String },
}
