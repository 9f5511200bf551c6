use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalyticsError {
    #[error("Category ranking cutoff must be at least 1, got {0}")]
    InvalidCutoff(usize),
}
