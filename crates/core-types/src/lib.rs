//! # Core Types
//!
//! The typed order schema shared by every crate in the workspace. This crate has
//! no knowledge of files, configuration or rendering.

pub mod enums;
pub mod error;
pub mod range;
pub mod structs;
pub mod table;

// Re-export the core types to provide a clean public API.
pub use enums::TimestampColumn;
pub use error::CoreError;
pub use range::DateRange;
pub use structs::{OrderRecord, OrderTimestamps, ReviewScore};
pub use table::OrderTable;
