use crate::{ActiveMask, Array3};

use volume_bricks_core::prelude::*;

use serde::{Deserialize, Serialize};

/// One piece of a `ChunkMap`: a dense array of values plus one activity bit per value. A voxel is
/// active once it has been written explicitly, and inactive voxels always hold the map's ambient
/// value.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ActiveChunk<T> {
    pub array: Array3<T>,
    pub active: ActiveMask,
}

impl<T> ActiveChunk<T> {
    /// Construct a new chunk with entirely ambient, inactive values.
    pub fn new_ambient(extent: Extent3i, ambient_value: T) -> Self
    where
        T: Clone,
    {
        Self {
            array: Array3::fill(extent, ambient_value),
            active: ActiveMask::new(extent.num_points()),
        }
    }

    #[inline]
    pub fn extent(&self) -> &Extent3i {
        self.array.extent()
    }

    /// Writes `value` at `p` and marks it active.
    #[inline]
    pub fn set_value(&mut self, p: Point3i, value: T) {
        let stride = self.array.stride_from_point(p);
        self.array.values_mut_slice()[stride.0] = value;
        self.active.activate(stride.0);
    }

    #[inline]
    pub fn is_active(&self, p: Point3i) -> bool {
        self.active.is_active(self.array.stride_from_point(p).0)
    }

    #[inline]
    pub fn num_active(&self) -> usize {
        self.active.count_active()
    }

    /// Deactivates every active voxel whose value equals `ambient_value`, so only voxels that differ
    /// from the ambient value stay active. Returns `true` iff some voxel is still active.
    pub fn prune(&mut self, ambient_value: &T) -> bool
    where
        T: PartialEq,
    {
        let Self { array, active } = self;
        for (i, value) in array.values_slice().iter().enumerate() {
            if active.is_active(i) && value == ambient_value {
                active.deactivate(i);
            }
        }

        active.any()
    }

    /// Returns `true` iff there is exactly one value and at least one activity bit per point.
    pub fn is_consistent(&self) -> bool {
        let num_points = self.extent().num_points();

        self.array.values_slice().len() == num_points && self.active.capacity() >= num_points
    }

    /// Bytes of heap memory held by the chunk.
    pub fn heap_bytes(&self) -> usize {
        self.array.heap_bytes() + self.active.heap_bytes()
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
    fn prune_deactivates_only_ambient_values() {
        let extent = Extent3i::from_min_and_shape(Point3i::fill(8), Point3i::fill(8));
        let mut chunk = ActiveChunk::new_ambient(extent, 0.5f32);

        chunk.set_value(PointN([8, 8, 8]), 0.5);
        chunk.set_value(PointN([9, 8, 8]), 2.0);
        assert_eq!(chunk.num_active(), 2);

        assert!(chunk.prune(&0.5));
        assert_eq!(chunk.num_active(), 1);
        assert!(!chunk.is_active(PointN([8, 8, 8])));
        assert!(chunk.is_active(PointN([9, 8, 8])));

        chunk.set_value(PointN([9, 8, 8]), 0.5);
        assert!(!chunk.prune(&0.5));
    }
}
