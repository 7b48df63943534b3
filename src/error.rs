//! Error taxonomy for chart construction and interaction.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChartError {
    /// CSV fetch/parse failure; the chart is not built.
    #[error("failed to load census data: {0}")]
    DataLoad(String),

    /// No records to derive a scale domain from.
    #[error("dataset is empty, nothing to chart")]
    EmptyDataset,

    /// A dimension key outside the closed X/Y enumerations.
    #[error("unknown dimension `{0}`")]
    UnknownDimension(String),

    /// Window too small to fit the fixed margins.
    #[error("viewport {width}x{height} leaves no room for the plot area")]
    Viewport { width: f64, height: f64 },

    #[error("invalid chart config: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<csv::Error> for ChartError {
    fn from(e: csv::Error) -> Self {
        ChartError::DataLoad(e.to_string())
    }
}
