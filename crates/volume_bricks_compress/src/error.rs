use volume_bricks_storage::StoreError;

use thiserror::Error;

/// Reasons a compression run is aborted. Every variant is fatal, and none of them is raised after
/// the first write into the sparse store.
#[derive(Debug, Error)]
pub enum CompressError {
    /// The sample buffer length does not match the declared dimensions.
    #[error("volume {dimensions:?} needs {expected} samples but the buffer holds {actual}")]
    DimensionMismatch {
        dimensions: [i32; 3],
        expected: usize,
        actual: usize,
    },

    #[error("volume dimensions {0:?} must all be positive")]
    NonPositiveDimension([i32; 3]),

    #[error("brick size {0} must be positive")]
    InvalidBrickSize(i32),

    #[error("quality {0} is not in [0, 1]")]
    InvalidQuality(f64),

    /// NaN or an infinity. Either one can make a similarity score NaN, e.g. the midrange of
    /// `[-inf, +inf]` or the distance from `+inf` to an infinite background.
    #[error("sample {index} is {value}, not a finite number")]
    NonFiniteSample { index: usize, value: f32 },

    /// The source declares a non-empty volume but provides no samples at all.
    #[error("volume source provided no samples")]
    EmptyVolumeData,

    #[error("volume source is unavailable: {0}")]
    SourceUnavailable(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("sparse store is unavailable: {0}")]
    SinkUnavailable(#[from] StoreError),
}

impl CompressError {
    /// Returns `true` for the errors caused by bad dimensions, samples or configuration.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Self::DimensionMismatch { .. }
                | Self::NonPositiveDimension(_)
                | Self::InvalidBrickSize(_)
                | Self::InvalidQuality(_)
                | Self::NonFiniteSample { .. }
        )
    }
}
