use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Failed to write dashboard output: {0}")]
    Io(#[from] std::io::Error),

    #[error("Aggregation failed: {0}")]
    Analytics(#[from] analytics::AnalyticsError),

    #[error("Failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
}
