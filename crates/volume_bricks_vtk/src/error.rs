use volume_bricks_compress::CompressError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum VtkError {
    #[error("failed to read VTK data: {0}")]
    Io(#[from] std::io::Error),

    /// Neither ASCII nor BINARY, or a dataset other than structured points.
    #[error("unsupported VTK format: {0}")]
    UnsupportedFormat(String),

    #[error("unsupported VTK data type {0:?}")]
    UnsupportedDataType(String),

    #[error("malformed VTK header on line {line}: {message}")]
    MalformedHeader { line: usize, message: String },

    #[error("VTK header has no DIMENSIONS")]
    MissingDimensions,

    /// No POINT_DATA count, or no SCALARS or FIELD array to read it from.
    #[error("VTK file has no point data")]
    NoPointData,

    #[error("VTK file declares {declared} points but its dimensions hold {expected}")]
    PointCountMismatch { declared: usize, expected: usize },

    #[error("VTK payload ended early: expected {expected} values or bytes, found {found}")]
    TruncatedPayload { expected: usize, found: usize },

    #[error("invalid number {0:?} in VTK payload")]
    InvalidNumber(String),
}

impl From<VtkError> for CompressError {
    fn from(error: VtkError) -> Self {
        CompressError::SourceUnavailable(Box::new(error))
    }
}
