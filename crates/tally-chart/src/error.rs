use thiserror::Error;

/// Errors from drawing the chart.
#[derive(Debug, Error)]
pub enum ChartError {
    /// The terminal (or stdout) rejected a write or cursor query.
    #[error("Chart I/O error: {0}")]
    Io(#[from] std::io::Error),
}
