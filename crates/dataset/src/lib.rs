//! # Dataset Loader
//!
//! Turns the order-item CSV export into an immutable, approval-sorted
//! `OrderTable`. This is the only crate that touches the file system.
//!
//! - Columns are resolved by header name, so column order and extra columns
//!   do not matter.
//! - Every timestamp column is parsed up front. A cell that cannot be parsed
//!   fails the whole load.
//! - Rows that violate the record schema (empty order id, review score outside
//!   1..=5, negative payment) are skipped and reported, or fail the load in
//!   strict mode.

pub mod error;
pub mod loader;
pub mod schema;

pub use error::DatasetError;
pub use loader::{LoadOptions, LoadedDataset, RowError, load_orders, read_orders};
