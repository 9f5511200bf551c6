use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Dataset file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read the dataset file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed delimited data: {0}")]
    Csv(#[from] csv::Error),

    #[error("Required column '{0}' is missing from the header row")]
    MissingColumn(String),

    #[error("Line {line}: column '{column}' holds an unparseable timestamp {value:?}")]
    TimestampParse {
        column: &'static str,
        line: u64,
        value: String,
    },

    #[error("Line {line}: {message}")]
    InvalidRow {
        line: u64,
        order_id: Option<String>,
        message: String,
    },
}
