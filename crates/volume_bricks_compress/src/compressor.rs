//! The compression pipeline.
//!
//! A run goes through `validate -> brick statistics -> background -> rank -> select and populate
//! -> prune`. All checks happen before the sparse store is even created, so a failed run never
//! leaves a partially written store behind.
//!
//! ```
//! use volume_bricks_compress::prelude::*;
//! use volume_bricks_core::prelude::*;
//! use volume_bricks_storage::prelude::*;
//!
//! let samples: Vec<f32> = (0..64).map(|i| if i < 8 { 1.0 } else { 0.0 }).collect();
//! let volume = DenseVolume::new(Point3i::fill(4), &samples);
//! let config = CompressionConfig::default().with_brick_size(2).with_quality(0.5);
//!
//! let (store, report) = compress(&volume, &config).unwrap();
//!
//! assert_eq!(store.background(), 0.0);
//! assert_eq!(report.total_bricks, 8);
//! assert_eq!(report.activated_bricks, 4);
//! assert_eq!(store.get(PointN([1, 1, 0])), 1.0);
//! ```

use crate::{
    compute_brick_statistics, estimate_background, rank_bricks, sample_index, select_bricks,
    validate_volume, volume_corners, CompressError, CompressionConfig, RankedBrick, VolumeSource,
};

use volume_bricks_core::prelude::*;
use volume_bricks_storage::{SparseStore, SparseVolume, StoreError, DEFAULT_CHUNK_SHAPE};

use serde::Serialize;
use std::fmt;

/// Every decision of a run, made before anything is written.
#[derive(Clone, Debug, PartialEq)]
pub struct CompressionPlan {
    pub dimensions: Point3i,
    pub background: f32,
    /// All bricks, most different from background first.
    pub ranked: Vec<RankedBrick>,
    /// How many leading bricks of `ranked` are kept.
    pub activate_count: usize,
    pub corners: Vec<Point3i>,
}

impl CompressionPlan {
    /// Validates `source` and `config`, then decides which bricks to keep.
    pub fn new<V>(source: &V, config: &CompressionConfig) -> Result<Self, CompressError>
    where
        V: VolumeSource + ?Sized,
    {
        config.validate()?;
        validate_volume(source)?;

        let dimensions = source.dimensions();
        let bricks = compute_brick_statistics(source, config.brick_size);
        let background =
            estimate_background(source.samples()).ok_or(CompressError::EmptyVolumeData)?;
        let ranked = rank_bricks(&bricks, config.metric, background);
        let activate_count = select_bricks(&ranked, config.quality).len();

        Ok(Self {
            dimensions,
            background,
            ranked,
            activate_count,
            corners: volume_corners(dimensions),
        })
    }

    #[inline]
    pub fn total_bricks(&self) -> usize {
        self.ranked.len()
    }

    /// The bricks whose samples are written.
    #[inline]
    pub fn activated(&self) -> &[RankedBrick] {
        &self.ranked[..self.activate_count]
    }

    /// Enumeration indices of the activated bricks, sorted.
    pub fn activated_indices(&self) -> Vec<usize> {
        let mut indices: Vec<usize> = self.activated().iter().map(|r| r.brick.index).collect();
        indices.sort_unstable();

        indices
    }

    /// Writes the true sample value of every corner and of every voxel in an activated brick.
    /// Returns the number of writes.
    ///
    /// `samples` must hold exactly as many values as the planned dimensions, or nothing is written.
    pub fn populate<S>(&self, samples: &[f32], store: &mut S) -> Result<usize, CompressError>
    where
        S: SparseStore<Value = f32>,
    {
        let dimensions = self.dimensions;
        let expected = dimensions.volume_usize();
        if samples.len() != expected {
            return Err(CompressError::DimensionMismatch {
                dimensions: dimensions.0,
                expected,
                actual: samples.len(),
            });
        }

        let mut written = 0;
        let mut write = |p: Point3i| {
            store.set_value(p, samples[sample_index(dimensions, p)]);
            written += 1;
        };

        for corner in self.corners.iter() {
            write(*corner);
        }
        for ranked in self.activated() {
            for p in ranked.brick.extent.iter_points() {
                write(p);
            }
        }

        Ok(written)
    }
}

/// What a run produced. Diagnostic only.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct CompressionReport {
    pub background: f32,
    pub total_bricks: usize,
    pub activated_bricks: usize,
    pub corner_count: usize,
    /// Number of `set_value` calls, counting voxels written both as a corner and in a brick twice.
    pub written_voxels: usize,
    /// Active voxels left after pruning.
    pub active_voxels: usize,
    pub memory_usage_bytes: usize,
}

impl fmt::Display for CompressionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Background value: {}", self.background)?;
        writeln!(
            f,
            "Activated bricks: {} of {}",
            self.activated_bricks, self.total_bricks
        )?;
        writeln!(f, "Corner samples: {}", self.corner_count)?;
        writeln!(f, "Voxel writes: {}", self.written_voxels)?;
        writeln!(f, "Active voxels: {}", self.active_voxels)?;
        write!(f, "Memory usage: {} bytes", self.memory_usage_bytes)
    }
}

/// Compresses `source` into a new `SparseVolume` whose background is the median sample.
pub fn compress<V>(
    source: &V,
    config: &CompressionConfig,
) -> Result<(SparseVolume<f32>, CompressionReport), CompressError>
where
    V: VolumeSource + ?Sized,
{
    compress_with(source, config, |background| {
        Ok(SparseVolume::new(DEFAULT_CHUNK_SHAPE, background))
    })
}

/// Compresses `source` into the store returned by `open_store`, which is handed the background
/// value. `open_store` is only called once every input check has passed, and its failure is
/// reported as `CompressError::SinkUnavailable`.
pub fn compress_with<V, S, F>(
    source: &V,
    config: &CompressionConfig,
    open_store: F,
) -> Result<(S, CompressionReport), CompressError>
where
    V: VolumeSource + ?Sized,
    S: SparseStore<Value = f32>,
    F: FnOnce(f32) -> Result<S, StoreError>,
{
    let span = tracing::info_span!(
        "compress_volume",
        quality = config.quality,
        brick_size = config.brick_size,
        metric = %config.metric
    );
    let _trace_guard = span.enter();

    let plan = CompressionPlan::new(source, config)?;
    tracing::debug!(
        dimensions = ?plan.dimensions.0,
        background = plan.background,
        total_bricks = plan.total_bricks(),
        activate_count = plan.activate_count,
        "planned compression"
    );

    let mut store = open_store(plan.background)?;
    let written_voxels = plan.populate(source.samples(), &mut store)?;
    store.prune();

    let report = CompressionReport {
        background: plan.background,
        total_bricks: plan.total_bricks(),
        activated_bricks: plan.activate_count,
        corner_count: plan.corners.len(),
        written_voxels,
        active_voxels: store.active_count(),
        memory_usage_bytes: store.memory_usage(),
    };
    tracing::info!(
        activated_bricks = report.activated_bricks,
        total_bricks = report.total_bricks,
        active_voxels = report.active_voxels,
        memory_usage_bytes = report.memory_usage_bytes,
        "compressed volume"
    );

    Ok((store, report))
}

// ████████╗███████╗███████╗████████╗███████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝
//    ██║   █████╗  ███████╗   ██║   ███████╗
//    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║
//    ██║   ███████╗███████║   ██║   ███████║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝
