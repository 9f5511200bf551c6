//! # Aggregation Pipeline
//!
//! Turns a date-filtered slice of order rows into the derived views the
//! dashboard displays.
//!
//! ## Architectural Principles
//!
//! - **Pure logic:** this crate has no knowledge of files, configuration or
//!   rendering. It depends only on `core-types`.
//! - **Stateless calculation:** `AnalyticsEngine` holds no state. Each call is
//!   a full recomputation from the slice it is given, so it can be re-run
//!   for every filter change.
//!
//! ## Public API
//!
//! - `filter_by_date` / `FilterState`: select the rows approved in a date range.
//! - `AnalyticsEngine`: the daily orders, category sales and review score
//!   aggregators, plus `calculate` which bundles them into a `DashboardReport`.

pub mod engine;
pub mod error;
pub mod filter;
pub mod report;

pub use engine::AnalyticsEngine;
pub use error::AnalyticsError;
pub use filter::{FilterState, filter_by_date};
pub use report::{
    CategorySales, CategorySummary, DailyOrders, DailySummary, DashboardReport, ScoreCount,
    ScoreDistribution, UNKNOWN_CATEGORY,
};
