use crate::{CompressError, SimilarityMetric};

use serde::{Deserialize, Serialize};

/// Everything a compression run can be told.
///
/// ```
/// use volume_bricks_compress::{CompressionConfig, SimilarityMetric};
///
/// let config = CompressionConfig::default()
///     .with_quality(0.25)
///     .with_metric(SimilarityMetric::Farthest);
/// assert_eq!(config.brick_size, 32);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct CompressionConfig {
    /// Fraction of bricks, by count, whose samples are kept.
    pub quality: f64,
    /// Edge length of the cubic bricks.
    pub brick_size: i32,
    pub metric: SimilarityMetric,
}

impl CompressionConfig {
    pub const DEFAULT_QUALITY: f64 = 0.5;
    pub const DEFAULT_BRICK_SIZE: i32 = 32;

    pub const fn new(quality: f64, brick_size: i32, metric: SimilarityMetric) -> Self {
        Self {
            quality,
            brick_size,
            metric,
        }
    }

    pub fn with_quality(mut self, quality: f64) -> Self {
        self.quality = quality;

        self
    }

    pub fn with_brick_size(mut self, brick_size: i32) -> Self {
        self.brick_size = brick_size;

        self
    }

    pub fn with_metric(mut self, metric: SimilarityMetric) -> Self {
        self.metric = metric;

        self
    }

    pub fn validate(&self) -> Result<(), CompressError> {
        if self.brick_size <= 0 {
            return Err(CompressError::InvalidBrickSize(self.brick_size));
        }
        if !(0.0..=1.0).contains(&self.quality) {
            return Err(CompressError::InvalidQuality(self.quality));
        }

        Ok(())
    }
}

impl Default for CompressionConfig {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_QUALITY,
            Self::DEFAULT_BRICK_SIZE,
            SimilarityMetric::default(),
        )
    }
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = CompressionConfig::default();

        assert_eq!(config.quality, 0.5);
        assert_eq!(config.brick_size, 32);
        assert_eq!(config.metric, SimilarityMetric::Median);
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        let config = CompressionConfig::default();

        assert!(config.with_quality(0.0).validate().is_ok());
        assert!(config.with_quality(1.0).validate().is_ok());
        assert!(matches!(
            config.with_quality(1.5).validate(),
            Err(CompressError::InvalidQuality(_))
        ));
        assert!(matches!(
            config.with_quality(-0.1).validate(),
            Err(CompressError::InvalidQuality(_))
        ));
        assert!(config.with_quality(f64::NAN).validate().is_err());
        assert!(matches!(
            config.with_brick_size(0).validate(),
            Err(CompressError::InvalidBrickSize(0))
        ));
    }
}
