//! Dense 3-dimensional arrays.
//!
//! The domain of an array is located within an ambient space, a signed integer lattice where the
//! elements are `Point3i`. This means an array contains data at exactly the set of points in an
//! `Extent3i`, and no more. Values are stored in row-major order: X varies fastest, then Y, then
//! Z, which is also the layout of the scalar buffers read from volume files.
//!
//! ```
//! use volume_bricks_core::prelude::*;
//! use volume_bricks_storage::prelude::*;
//!
//! let extent = Extent3i::from_min_and_shape(Point3i::ZERO, Point3i::fill(4));
//! let mut array = Array3::fill(extent, 0.0f32);
//!
//! *array.get_mut(PointN([1, 2, 3])) = 5.0;
//!
//! assert_eq!(array.get(PointN([1, 2, 3])), 5.0);
//! assert_eq!(array.values_slice()[1 + 2 * 4 + 3 * 16], 5.0);
//! ```

use volume_bricks_core::prelude::*;

use serde::{Deserialize, Serialize};

/// A map from lattice location `PointN<N>` to data `T`, stored as a flat array on the heap.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ArrayN<N, T> {
    values: Vec<T>,
    extent: ExtentN<N>,
}

/// A 3-dimensional `ArrayN`.
pub type Array3<T> = ArrayN<[i32; 3], T>;

/// A flat offset into the values of an array.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Stride(pub usize);

impl<N, T> ArrayN<N, T> {
    #[inline]
    pub fn extent(&self) -> &ExtentN<N> {
        &self.extent
    }

    /// Returns the entire slice of values.
    #[inline]
    pub fn values_slice(&self) -> &[T] {
        &self.values
    }

    /// Returns the entire slice of values.
    #[inline]
    pub fn values_mut_slice(&mut self) -> &mut [T] {
        &mut self.values
    }

    /// Bytes of heap memory held by the values.
    #[inline]
    pub fn heap_bytes(&self) -> usize {
        self.values.capacity() * std::mem::size_of::<T>()
    }
}

impl<T> Array3<T> {
    /// Create a new `Array3` directly from the extent and values. This asserts that the number of
    /// points in the extent matches the length of the values `Vec`.
    pub fn new(extent: Extent3i, values: Vec<T>) -> Self {
        assert_eq!(extent.num_points(), values.len());

        Self { values, extent }
    }

    /// Creates a map that fills the entire `extent` with the same `value`.
    pub fn fill(extent: Extent3i, value: T) -> Self
    where
        T: Clone,
    {
        Self::new(extent, vec![value; extent.num_points()])
    }

    /// Create a new array for `extent` where each point's value is determined by the `filler`
    /// function.
    pub fn fill_with(extent: Extent3i, filler: impl FnMut(Point3i) -> T) -> Self {
        Self::new(extent, extent.iter_points().map(filler).collect())
    }

    /// Returns `true` iff this map contains point `p`.
    #[inline]
    pub fn contains(&self, p: Point3i) -> bool {
        self.extent.contains(p)
    }

    /// The flat offset of the point `p`, given in global coordinates.
    ///
    /// In debug mode only, asserts that `p` is contained in the array.
    #[inline]
    pub fn stride_from_point(&self, p: Point3i) -> Stride {
        debug_assert!(self.contains(p));

        let local = p - self.extent.minimum;
        let shape = self.extent.shape;

        let (x, y, z) = (local.x() as usize, local.y() as usize, local.z() as usize);

        Stride(x + shape.x() as usize * (y + shape.y() as usize * z))
    }

    #[inline]
    pub fn get_ref(&self, p: Point3i) -> &T {
        &self.values[self.stride_from_point(p).0]
    }

    #[inline]
    pub fn get_mut(&mut self, p: Point3i) -> &mut T {
        let stride = self.stride_from_point(p);

        &mut self.values[stride.0]
    }

    #[inline]
    pub fn get(&self, p: Point3i) -> T
    where
        T: Clone,
    {
        self.get_ref(p).clone()
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
    fn fill_with_is_row_major() {
        let extent = Extent3i::from_min_and_shape(PointN([1, 1, 1]), PointN([3, 2, 2]));
        let array = Array3::fill_with(extent, |p| p.x() + 10 * p.y() + 100 * p.z());

        assert_eq!(
            array.values_slice(),
            &[111, 112, 113, 121, 122, 123, 211, 212, 213, 221, 222, 223]
        );
    }

    #[test]
    fn stride_follows_iteration_order() {
        let extent = Extent3i::from_min_and_shape(PointN([-2, 0, 3]), PointN([5, 3, 2]));
        let array = Array3::fill(extent, 0u8);

        for (i, p) in extent.iter_points().enumerate() {
            assert_eq!(array.stride_from_point(p), Stride(i));
        }
    }
}
