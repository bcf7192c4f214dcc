use crate::{IntegerPoint, Ones, Point, PointN, SmallZero};

use serde::{Deserialize, Serialize};

/// An N-dimensional extent: the Cartesian product of a half-open interval `[a, b)` in each
/// dimension, stored as a minimum point and a shape. Bricks, chunks and whole volumes are all
/// described by extents.
#[derive(Debug, Deserialize, Eq, Serialize)]
pub struct ExtentN<N> {
    /// The least point contained in the extent.
    pub minimum: PointN<N>,
    /// The length of each dimension.
    pub shape: PointN<N>,
}

// Derive would require `N: Clone` and `N: PartialEq` rather than bounds on the point type.

impl<N> Clone for ExtentN<N>
where
    PointN<N>: Clone,
{
    #[inline]
    fn clone(&self) -> Self {
        Self {
            minimum: self.minimum.clone(),
            shape: self.shape.clone(),
        }
    }
}
impl<N> Copy for ExtentN<N> where PointN<N>: Copy {}

impl<N> PartialEq for ExtentN<N>
where
    PointN<N>: PartialEq,
{
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.minimum.eq(&other.minimum) && self.shape.eq(&other.shape)
    }
}

impl<N> ExtentN<N> {
    #[inline]
    pub const fn from_min_and_shape(minimum: PointN<N>, shape: PointN<N>) -> Self {
        Self { minimum, shape }
    }
}

impl<N> ExtentN<N>
where
    PointN<N>: Point,
{
    /// The least point `p` for which all points `q` in the extent satisfy `q < p`.
    #[inline]
    pub fn least_upper_bound(&self) -> PointN<N> {
        self.minimum + self.shape
    }

    #[inline]
    pub fn contains(&self, p: PointN<N>) -> bool {
        self.minimum <= p && p < self.least_upper_bound()
    }
}

impl<N> ExtentN<N>
where
    PointN<N>: IntegerPoint,
{
    /// Negative shape components are clamped to 0, so disjoint bounds give an empty extent.
    #[inline]
    pub fn from_min_and_lub(minimum: PointN<N>, least_upper_bound: PointN<N>) -> Self {
        let shape = (least_upper_bound - minimum).join(&PointN::ZERO);

        Self { minimum, shape }
    }

    /// Both `minimum` and `max` are contained in the extent.
    #[inline]
    pub fn from_min_and_max(minimum: PointN<N>, max: PointN<N>) -> Self {
        Self::from_min_and_lub(minimum, max + PointN::ONES)
    }

    /// The greatest point in the extent.
    #[inline]
    pub fn max(&self) -> PointN<N> {
        self.least_upper_bound() - PointN::ONES
    }
}

/// Integer extents can enumerate their points.
pub trait IntegerExtent<N> {
    type PointIter: Iterator<Item = PointN<N>>;

    fn num_points(&self) -> usize;

    #[inline]
    fn is_empty(&self) -> bool {
        self.num_points() == 0
    }

    /// Iterate over all points in the extent in row-major order (X fastest, then Y, then Z).
    fn iter_points(&self) -> Self::PointIter;
}

/// Returns the smallest extent containing all of the given points, or `None` if there are no
/// points.
pub fn bounding_extent<N, I>(mut points: I) -> Option<ExtentN<N>>
where
    I: Iterator<Item = PointN<N>>,
    PointN<N>: IntegerPoint,
{
    let first = points.next()?;
    let (min_point, max_point) = points.fold((first, first), |(min_point, max_point), p| {
        (min_point.meet(&p), max_point.join(&p))
    });

    Some(ExtentN::from_min_and_max(min_point, max_point))
}

// ████████╗███████╗███████╗████████╗███████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝
//    ██║   █████╗  ███████╗   ██║   ███████╗
//    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║
//    ██║   ███████╗███████║   ██║   ███████║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    #[test]
    fn disjoint_bounds_give_an_empty_extent() {
        let extent = Extent3i::from_min_and_lub(PointN([3, 0, 0]), PointN([1, 2, 2]));

        assert_eq!(extent.shape, PointN([0, 2, 2]));
        assert!(extent.is_empty());
    }

    #[test]
    fn contains_is_half_open() {
        let extent = Extent3i::from_min_and_shape(PointN([1, 1, 1]), Point3i::fill(2));

        assert!(extent.contains(PointN([1, 2, 1])));
        assert!(!extent.contains(PointN([3, 1, 1])));
        assert_eq!(extent.max(), PointN([2, 2, 2]));
    }

    #[test]
    fn bounding_extent_of_points() {
        assert_eq!(bounding_extent(std::iter::empty::<Point3i>()), None);
        assert_eq!(
            bounding_extent(vec![PointN([1, 5, 2]), PointN([3, 0, 2])].into_iter()),
            Some(Extent3i::from_min_and_max(
                PointN([1, 0, 2]),
                PointN([3, 5, 2])
            ))
        );
    }
}
