//! # Dashboard
//!
//! The presentation layer: it takes `DashboardReport`s from the analytics
//! crate and turns them into terminal tables, text charts and JSON. A
//! `Session` ties a shared order table to one user's date selection.

pub mod chart;
pub mod currency;
pub mod error;
pub mod render;
pub mod session;

pub use currency::CurrencyFormat;
pub use error::DashboardError;
pub use render::Renderer;
pub use session::Session;
