//! Partitioning a volume into bricks and reducing each brick to its value range.
//!
//! Bricks are cubes of edge length `brick_size` whose minimum corners are multiples of
//! `brick_size`. The last brick along an axis is clipped to the volume when the dimension is not a
//! multiple of the brick size, so the bricks tile the volume exactly without overlap.

use crate::{sample_index, VolumeSource};

use volume_bricks_core::prelude::*;

use itertools::iproduct;

/// One cell of the brick grid with the range of the samples inside it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Brick {
    /// Position in enumeration order: Z outermost, then Y, then X innermost.
    pub index: usize,
    /// Clipped to the volume.
    pub extent: Extent3i,
    pub min_value: f32,
    pub max_value: f32,
}

impl Brick {
    #[inline]
    pub fn num_samples(&self) -> usize {
        self.extent.num_points()
    }
}

/// The grid of bricks covering a volume.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct BrickGrid {
    volume_extent: Extent3i,
    brick_size: i32,
}

impl BrickGrid {
    /// `dimensions` and `brick_size` must be positive.
    pub fn new(dimensions: Point3i, brick_size: i32) -> Self {
        debug_assert!(brick_size > 0);
        debug_assert!(dimensions > Point3i::ZERO);

        Self {
            volume_extent: Extent3i::from_dimensions(dimensions),
            brick_size,
        }
    }

    /// Number of bricks along each axis, `ceil(dimension / brick_size)`.
    #[inline]
    pub fn grid_shape(&self) -> Point3i {
        self.volume_extent.shape.div_ceil(self.brick_size)
    }

    #[inline]
    pub fn num_bricks(&self) -> usize {
        self.grid_shape().volume_usize()
    }

    /// The clipped extent of every brick, in enumeration order.
    pub fn brick_extents(&self) -> impl Iterator<Item = Extent3i> {
        let Self {
            volume_extent,
            brick_size,
        } = *self;

        // Clipping happens before adding the brick size, which may be close to `i32::MAX`.
        Extent3i::from_dimensions(self.grid_shape())
            .iter_points()
            .map(move |cell| {
                let minimum = cell * brick_size;
                let remaining = volume_extent.shape - minimum;

                Extent3i::from_min_and_shape(minimum, remaining.meet(&Point3i::fill(brick_size)))
            })
    }
}

/// Computes the value range of every brick of `source`. Each sample is visited exactly once.
///
/// `source` must already be validated.
pub fn compute_brick_statistics<V>(source: &V, brick_size: i32) -> Vec<Brick>
where
    V: VolumeSource + ?Sized,
{
    let dimensions = source.dimensions();
    let samples = source.samples();
    let grid = BrickGrid::new(dimensions, brick_size);

    let mut bricks = Vec::with_capacity(grid.num_bricks());
    for (index, extent) in grid.brick_extents().enumerate() {
        let (min_value, max_value) = brick_range(dimensions, samples, &extent);
        bricks.push(Brick {
            index,
            extent,
            min_value,
            max_value,
        });
    }

    bricks
}

fn brick_range(dimensions: Point3i, samples: &[f32], extent: &Extent3i) -> (f32, f32) {
    let min = extent.minimum;
    let lub = extent.least_upper_bound();
    let row_length = extent.shape.x() as usize;

    let mut min_value = f32::MAX;
    let mut max_value = f32::MIN;
    for (z, y) in iproduct!(min.z()..lub.z(), min.y()..lub.y()) {
        let row_start = sample_index(dimensions, PointN([min.x(), y, z]));
        for &value in &samples[row_start..row_start + row_length] {
            min_value = min_value.min(value);
            max_value = max_value.max(value);
        }
    }

    (min_value, max_value)
}

// ████████╗███████╗███████╗████████╗███████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝
//    ██║   █████╗  ███████╗   ██║   ███████╗
//    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║
//    ██║   ███████╗███████║   ██║   ███████║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DenseVolume;

    use pretty_assertions::assert_eq;
    use utilities::data_sets::{random_volume, volume_from_fn};

    #[test]
    fn bricks_tile_the_volume_without_overlap() {
        let grid = BrickGrid::new(PointN([7, 5, 3]), 2);
        assert_eq!(grid.grid_shape(), PointN([4, 3, 2]));
        assert_eq!(grid.num_bricks(), 24);

        let mut hits = vec![0; 7 * 5 * 3];
        for extent in grid.brick_extents() {
            for p in extent.iter_points() {
                hits[sample_index(PointN([7, 5, 3]), p)] += 1;
            }
        }

        assert!(hits.iter().all(|&h| h == 1));
    }

    #[test]
    fn brick_larger_than_any_volume_is_one_brick() {
        let grid = BrickGrid::new(PointN([5, 1, 1]), i32::MAX);

        assert_eq!(grid.grid_shape(), Point3i::ONES);
        assert_eq!(grid.num_bricks(), 1);
        assert_eq!(
            grid.brick_extents().collect::<Vec<_>>(),
            vec![Extent3i::from_dimensions(PointN([5, 1, 1]))]
        );
    }

    #[test]
    fn enumeration_is_z_outermost() {
        let grid = BrickGrid::new(PointN([4, 4, 4]), 2);
        let minimums: Vec<Point3i> = grid.brick_extents().map(|e| e.minimum).collect();

        assert_eq!(
            minimums,
            vec![
                PointN([0, 0, 0]),
                PointN([2, 0, 0]),
                PointN([0, 2, 0]),
                PointN([2, 2, 0]),
                PointN([0, 0, 2]),
                PointN([2, 0, 2]),
                PointN([0, 2, 2]),
                PointN([2, 2, 2]),
            ]
        );
    }

    #[test]
    fn partial_edge_brick_is_clipped() {
        let (dims, samples) = volume_from_fn(PointN([5, 2, 1]), |p| (p.x() * 10 + p.y()) as f32);
        let bricks = compute_brick_statistics(&DenseVolume::new(dims, &samples), 2);

        assert_eq!(bricks.len(), 3);
        let edge = bricks[2];
        assert_eq!(edge.index, 2);
        assert_eq!(edge.extent.minimum, PointN([4, 0, 0]));
        assert_eq!(edge.extent.shape, PointN([1, 2, 1]));
        assert_eq!(edge.num_samples(), 2);
        assert_eq!((edge.min_value, edge.max_value), (40.0, 41.0));
    }

    #[test]
    fn ranges_match_brute_force() {
        let (dims, samples) = random_volume(PointN([9, 6, 5]), 42);
        let volume = DenseVolume::new(dims, &samples);

        for brick in compute_brick_statistics(&volume, 4) {
            let values: Vec<f32> = brick
                .extent
                .iter_points()
                .map(|p| samples[sample_index(dims, p)])
                .collect();
            let min = values.iter().cloned().fold(f32::INFINITY, f32::min);
            let max = values.iter().cloned().fold(f32::NEG_INFINITY, f32::max);

            assert!(brick.min_value <= brick.max_value);
            assert_eq!(brick.min_value, min);
            assert_eq!(brick.max_value, max);
        }
    }
}
