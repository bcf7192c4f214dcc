use core::ops::{Add, AddAssign, Sub, SubAssign};
use serde::{Deserialize, Serialize};

/// An N-dimensional point, which is usually just a primitive array of type `N`. Volumes in this
/// crate are always 3-dimensional, so you will mostly see `Point3i` for voxel coordinates and
/// volume dimensions, and `Point3f` for the physical origin and spacing of a dataset.
///
/// ```
/// use volume_bricks_core::prelude::*;
///
/// let p1 = PointN([1, 2, 3]);
/// let p2 = Point3i::new(3, 4, 5);
///
/// assert_eq!(p1 + p2, PointN([4, 6, 8]));
/// assert_eq!(p1 - p2, PointN([-2, -2, -2]));
/// assert_eq!(p1 * 2, PointN([2, 4, 6]));
/// ```
///
/// The partial order on points is component-wise: A < B iff every component of A is less than the
/// matching component of B. So a point is inside the extent between two others exactly when:
///
/// ```
/// use volume_bricks_core::PointN;
///
/// let min = PointN([0, 0, 0]);
/// let least_upper_bound = PointN([3, 3, 3]);
///
/// let p = PointN([0, 1, 2]);
/// assert!(min <= p && p < least_upper_bound);
/// ```
#[derive(Copy, Clone, Debug, Deserialize, Default, Eq, Hash, PartialEq, Serialize)]
pub struct PointN<N>(pub N);

/// The operations that extents need from their points.
pub trait Point:
    Add<Output = Self> + Copy + Ones + PartialOrd + SmallZero + Sub<Output = Self>
{
    type Scalar: Copy;

    /// Returns the point after applying `f` component-wise.
    fn map_components(&self, f: impl Fn(Self::Scalar) -> Self::Scalar) -> Self;
}

pub trait IntegerPoint: Point {
    /// Component-wise maximum.
    fn join(&self, other: &Self) -> Self;

    /// Component-wise minimum.
    fn meet(&self, other: &Self) -> Self;

    /// All corners of a unit cube, X varying fastest.
    fn corner_offsets() -> Vec<Self>;

    /// Returns `true` iff all dimensions are positive powers of 2.
    fn dimensions_are_powers_of_2(&self) -> bool;
}

impl<N> AddAssign for PointN<N>
where
    PointN<N>: Add<Output = Self> + Copy,
{
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<N> SubAssign for PointN<N>
where
    PointN<N>: Sub<Output = Self> + Copy,
{
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

pub trait Ones: Copy {
    /// A point of all ones.
    const ONES: Self;
}

// `num::Zero` can't be used in constants.
pub trait SmallZero: Copy {
    const ZERO: Self;
}

pub trait SmallOne: Copy {
    const ONE: Self;
}

macro_rules! impl_small_constants {
    ($($t:ty => $zero:expr, $one:expr);*) => {
        $(
            impl SmallZero for $t {
                const ZERO: $t = $zero;
            }
            impl SmallOne for $t {
                const ONE: $t = $one;
            }
        )*
    };
}

impl_small_constants!(i32 => 0, 1; f32 => 0.0, 1.0);
