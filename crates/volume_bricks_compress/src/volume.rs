//! Dense volume sources.
//!
//! A volume is a `W x H x D` grid of `f32` samples, stored in row-major order: X varies fastest,
//! then Y, then Z. The sample at `(x, y, z)` lives at index `x + W * (y + H * z)`. Coordinates
//! always start at the origin.

use crate::CompressError;

use volume_bricks_core::prelude::*;
use volume_bricks_storage::Array3;

/// Anything that can lend out a dense, read-only volume.
pub trait VolumeSource {
    /// `(W, H, D)`.
    fn dimensions(&self) -> Point3i;

    /// All `W * H * D` samples in row-major order.
    fn samples(&self) -> &[f32];
}

impl<V> VolumeSource for &V
where
    V: VolumeSource + ?Sized,
{
    #[inline]
    fn dimensions(&self) -> Point3i {
        (**self).dimensions()
    }

    #[inline]
    fn samples(&self) -> &[f32] {
        (**self).samples()
    }
}

/// A borrowed sample buffer with its dimensions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DenseVolume<'a> {
    dimensions: Point3i,
    samples: &'a [f32],
}

impl<'a> DenseVolume<'a> {
    /// Nothing is checked here. Mismatched buffers are rejected when a compression run starts.
    pub fn new(dimensions: Point3i, samples: &'a [f32]) -> Self {
        Self {
            dimensions,
            samples,
        }
    }

    #[inline]
    pub fn extent(&self) -> Extent3i {
        Extent3i::from_dimensions(self.dimensions)
    }
}

impl<'a> VolumeSource for DenseVolume<'a> {
    #[inline]
    fn dimensions(&self) -> Point3i {
        self.dimensions
    }

    #[inline]
    fn samples(&self) -> &[f32] {
        self.samples
    }
}

/// The array is read as a volume anchored at the origin, whatever its minimum.
impl VolumeSource for Array3<f32> {
    #[inline]
    fn dimensions(&self) -> Point3i {
        self.extent().shape
    }

    #[inline]
    fn samples(&self) -> &[f32] {
        self.values_slice()
    }
}

/// Index of `p` in the sample buffer of a volume with `dimensions`.
#[inline]
pub fn sample_index(dimensions: Point3i, p: Point3i) -> usize {
    debug_assert!(Extent3i::from_dimensions(dimensions).contains(p));

    p.x() as usize
        + dimensions.x() as usize * (p.y() as usize + dimensions.y() as usize * p.z() as usize)
}

/// Checks that `source` describes a well-formed volume of finite samples.
pub fn validate_volume<V>(source: &V) -> Result<(), CompressError>
where
    V: VolumeSource + ?Sized,
{
    let dimensions = source.dimensions();
    if !(dimensions > Point3i::ZERO) {
        return Err(CompressError::NonPositiveDimension(dimensions.0));
    }

    let samples = source.samples();
    if samples.is_empty() {
        return Err(CompressError::EmptyVolumeData);
    }

    let expected = dimensions.volume_usize();
    if samples.len() != expected {
        return Err(CompressError::DimensionMismatch {
            dimensions: dimensions.0,
            expected,
            actual: samples.len(),
        });
    }

    if let Some(index) = samples.iter().position(|s| !s.is_finite()) {
        return Err(CompressError::NonFiniteSample {
            index,
            value: samples[index],
        });
    }

    Ok(())
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝
