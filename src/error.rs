//! Error type shared by the track model, the layers and the render integration.

use crate::tracker::TrackId;

/// Errors produced by annotation layers and their collaborators.
#[derive(Debug, thiserror::Error)]
pub enum LayerError {
    /// The layer type does not implement this generic layer operation.
    #[error("{layer} layer does not support {operation}")]
    UnsupportedOperation {
        layer: &'static str,
        operation: &'static str,
    },
    /// No track with this id exists in the track store.
    #[error("track {0} not found")]
    TrackNotFound(TrackId),
    /// The render surface cannot create features yet.
    #[error("render surface is not ready")]
    SurfaceNotReady,
    /// A data or draw call was made before `initialize`.
    #[error("layer used before initialize")]
    NotInitialized,
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid csv: {0}")]
    Csv(#[from] csv::Error),
    /// A CSV row that does not follow the track format.
    #[error("line {line}: {message}")]
    InvalidRow { line: u64, message: String },
}

impl LayerError {
    /// Whether this error only signals a missing capability of the layer type.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::UnsupportedOperation { .. })
    }
}

pub type Result<T> = std::result::Result<T, LayerError>;
