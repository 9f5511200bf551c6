use crate::error::DatasetError;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use core_types::{OrderRecord, OrderTimestamps, ReviewScore, TimestampColumn};
use csv::StringRecord;
use rust_decimal::Decimal;
use rust_decimal::prelude::*;
use std::str::FromStr;

pub const ORDER_ID: &str = "order_id";
pub const PRODUCT_ID: &str = "product_id";
pub const CATEGORY: &str = "product_category_name_english";
pub const REVIEW_SCORE: &str = "review_score";
pub const PAYMENT_VALUE: &str = "payment_value";

const DATE_TIME_FORMATS: [&str; 3] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Header positions of every column the loader reads.
#[derive(Debug, Clone)]
pub struct ColumnIndex {
    order_id: usize,
    product_id: usize,
    category: usize,
    review_score: usize,
    payment_value: usize,
    timestamps: [(TimestampColumn, usize); 6],
}

impl ColumnIndex {
    /// Resolves the required columns by name. Unknown columns are ignored.
    pub fn from_headers(headers: &StringRecord) -> Result<Self, DatasetError> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| DatasetError::MissingColumn(name.to_string()))
        };

        let mut timestamps = [(TimestampColumn::ApprovedAt, 0); 6];
        for (slot, column) in timestamps.iter_mut().zip(TimestampColumn::ALL) {
            *slot = (column, find(column.column_name())?);
        }

        Ok(Self {
            order_id: find(ORDER_ID)?,
            product_id: find(PRODUCT_ID)?,
            category: find(CATEGORY)?,
            review_score: find(REVIEW_SCORE)?,
            payment_value: find(PAYMENT_VALUE)?,
            timestamps,
        })
    }

    /// Converts one data row into a typed record.
    ///
    /// Timestamp failures are `TimestampParse`; every other schema violation is
    /// `InvalidRow`, which the loader may downgrade to a skipped row.
    pub fn parse_row(&self, record: &StringRecord, line: u64) -> Result<OrderRecord, DatasetError> {
        let Some(order_id) = cell(record, self.order_id) else {
            return Err(DatasetError::InvalidRow {
                line,
                order_id: None,
                message: format!("'{}' is empty", ORDER_ID),
            });
        };
        let invalid = |message: String| DatasetError::InvalidRow {
            line,
            order_id: Some(order_id.to_string()),
            message,
        };

        let review_score = cell(record, self.review_score)
            .map(parse_review_score)
            .transpose()
            .map_err(invalid)?;
        let payment_value = cell(record, self.payment_value)
            .map(parse_payment_value)
            .transpose()
            .map_err(invalid)?;

        let mut timestamps = OrderTimestamps::default();
        for (column, index) in self.timestamps {
            let value = match cell(record, index) {
                Some(raw) => Some(parse_timestamp(raw).ok_or_else(|| DatasetError::TimestampParse {
                    column: column.column_name(),
                    line,
                    value: raw.to_string(),
                })?),
                None => None,
            };
            timestamps.set(column, value);
        }

        Ok(OrderRecord {
            row_index: 0,
            order_id: order_id.to_string(),
            product_id: cell(record, self.product_id).map(str::to_string),
            category: cell(record, self.category).map(str::to_string),
            review_score,
            payment_value,
            timestamps,
        })
    }
}

/// A trimmed, non-empty cell. Missing and blank cells are nulls.
fn cell(record: &StringRecord, index: usize) -> Option<&str> {
    record.get(index).map(str::trim).filter(|v| !v.is_empty())
}

/// Parses a date-time cell. A bare date is taken as midnight.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, DATE_FORMAT)
                .ok()
                .map(|date| date.and_time(NaiveTime::MIN))
        })
}

/// Accepts integral scores written either as "4" or as "4.0".
pub fn parse_review_score(raw: &str) -> Result<ReviewScore, String> {
    let value = Decimal::from_str(raw)
        .map_err(|_| format!("'{}' value {:?} is not a number", REVIEW_SCORE, raw))?;
    if !value.fract().is_zero() {
        return Err(format!("'{}' value {:?} is not an integer", REVIEW_SCORE, raw));
    }
    value
        .to_u8()
        .and_then(|v| ReviewScore::new(v).ok())
        .ok_or_else(|| format!("'{}' value {:?} is outside 1..=5", REVIEW_SCORE, raw))
}

pub fn parse_payment_value(raw: &str) -> Result<Decimal, String> {
    let value = Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .map_err(|_| format!("'{}' value {:?} is not a number", PAYMENT_VALUE, raw))?;
    if value.is_sign_negative() && !value.is_zero() {
        return Err(format!("'{}' value {:?} is negative", PAYMENT_VALUE, raw));
    }
    Ok(value)
}
