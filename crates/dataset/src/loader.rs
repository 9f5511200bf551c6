use crate::error::DatasetError;
use crate::schema::ColumnIndex;
use core_types::OrderTable;
use csv::{ReaderBuilder, StringRecord, Trim};
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

/// How the delimited file is read.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    pub delimiter: u8,
    /// Fail on the first invalid row instead of skipping it.
    pub strict: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            strict: false,
        }
    }
}

/// A data row that was skipped because it violates the record schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowError {
    /// 1-based line in the source file; the header is line 1.
    pub line: u64,
    pub order_id: Option<String>,
    pub message: String,
}

/// The result of a successful load.
#[derive(Debug, Clone)]
pub struct LoadedDataset {
    pub table: OrderTable,
    pub rejected: Vec<RowError>,
    /// Data rows seen in the file, accepted or not.
    pub rows_read: usize,
}

/// Loads the order dataset at `path`.
pub fn load_orders(path: &Path, options: &LoadOptions) -> Result<LoadedDataset, DatasetError> {
    if !path.is_file() {
        return Err(DatasetError::FileNotFound(path.to_path_buf()));
    }
    info!(path = %path.display(), "Loading order dataset");

    let reader = ReaderBuilder::new()
        .has_headers(true)
        .delimiter(options.delimiter)
        .trim(Trim::All)
        .from_path(path)?;
    read_orders(reader, options)
}

/// Reads an order dataset from an already-configured CSV reader.
pub fn read_orders<R: Read>(
    mut reader: csv::Reader<R>,
    options: &LoadOptions,
) -> Result<LoadedDataset, DatasetError> {
    let columns = ColumnIndex::from_headers(reader.headers()?)?;

    let mut records = Vec::new();
    let mut rejected = Vec::new();
    let mut rows_read = 0usize;
    let mut row = StringRecord::new();

    while reader.read_record(&mut row)? {
        rows_read += 1;
        let line = row.position().map_or(rows_read as u64 + 1, |p| p.line());

        match columns.parse_row(&row, line) {
            Ok(record) => records.push(record),
            Err(DatasetError::InvalidRow {
                line,
                order_id,
                message,
            }) if !options.strict => {
                debug!(line, order_id = ?order_id, %message, "Skipping invalid row");
                rejected.push(RowError {
                    line,
                    order_id,
                    message,
                });
            }
            Err(e) => return Err(e),
        }
    }

    if !rejected.is_empty() {
        warn!(
            rejected = rejected.len(),
            rows_read, "Some rows violate the order schema and were skipped"
        );
    }

    let table = OrderTable::from_records(records);
    info!(
        rows = table.len(),
        approved = table.approved_len(),
        "Order dataset loaded"
    );

    Ok(LoadedDataset {
        table,
        rejected,
        rows_read,
    })
}
