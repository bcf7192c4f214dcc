use crate::{
    point::{SmallOne, SmallZero},
    IntegerPoint, Ones, Point, PointN,
};

use core::ops::{Add, Mul, Sub};
use std::cmp::Ordering;

/// A 3-dimensional point with scalar type `T`.
pub type Point3<T> = PointN<[T; 3]>;
/// A 3-dimensional point with scalar type `i32`.
pub type Point3i = PointN<[i32; 3]>;
/// A 3-dimensional point with scalar type `f32`.
pub type Point3f = PointN<[f32; 3]>;

impl<T> Point3<T> {
    #[inline]
    pub const fn new(x: T, y: T, z: T) -> Self {
        PointN([x, y, z])
    }
}

impl<T: Copy> Point3<T> {
    /// A point with every component equal to `value`.
    #[inline]
    pub fn fill(value: T) -> Self {
        PointN([value; 3])
    }

    #[inline]
    pub fn x(&self) -> T {
        self.0[0]
    }

    #[inline]
    pub fn y(&self) -> T {
        self.0[1]
    }

    #[inline]
    pub fn z(&self) -> T {
        self.0[2]
    }

    #[inline]
    fn zip_with(self, other: Self, f: impl Fn(T, T) -> T) -> Self {
        let [x1, y1, z1] = self.0;
        let [x2, y2, z2] = other.0;

        PointN([f(x1, x2), f(y1, y2), f(z1, z2)])
    }
}

impl Point3i {
    /// Component-wise `ceil(self / rhs)` for non-negative `self` and positive `rhs`.
    #[inline]
    pub fn div_ceil(&self, rhs: i32) -> Self {
        debug_assert!(rhs > 0);

        self.map_components(|c| if c > 0 { (c - 1) / rhs + 1 } else { 0 })
    }

    /// The product of all components in `usize`, or `None` if it does not fit. Negative
    /// components count as 0.
    #[inline]
    pub fn checked_volume(&self) -> Option<usize> {
        self.0
            .iter()
            .try_fold(1usize, |acc, &c| acc.checked_mul(c.max(0) as usize))
    }

    /// Like `checked_volume`, saturating at `usize::MAX`.
    #[inline]
    pub fn volume_usize(&self) -> usize {
        self.checked_volume().unwrap_or(usize::MAX)
    }
}

impl<T> Point for Point3<T>
where
    T: Copy + Add<Output = T> + PartialOrd + SmallOne + SmallZero + Sub<Output = T>,
{
    type Scalar = T;

    #[inline]
    fn map_components(&self, f: impl Fn(T) -> T) -> Self {
        PointN([f(self.x()), f(self.y()), f(self.z())])
    }
}

impl<T: SmallZero> SmallZero for Point3<T> {
    const ZERO: Self = PointN([T::ZERO; 3]);
}

impl<T: SmallOne> Ones for Point3<T> {
    const ONES: Self = PointN([T::ONE; 3]);
}

impl IntegerPoint for Point3i {
    #[inline]
    fn join(&self, other: &Self) -> Self {
        self.zip_with(*other, i32::max)
    }

    #[inline]
    fn meet(&self, other: &Self) -> Self {
        self.zip_with(*other, i32::min)
    }

    fn corner_offsets() -> Vec<Self> {
        (0..8)
            .map(|i| PointN([i & 1, (i >> 1) & 1, (i >> 2) & 1]))
            .collect()
    }

    fn dimensions_are_powers_of_2(&self) -> bool {
        self.0
            .iter()
            .all(|&c| c.is_positive() && (c as u32).is_power_of_two())
    }
}

impl<T> Add for Point3<T>
where
    T: Copy + Add<Output = T>,
{
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        self.zip_with(rhs, |a, b| a + b)
    }
}

impl<T> Sub for Point3<T>
where
    T: Copy + Sub<Output = T>,
{
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        self.zip_with(rhs, |a, b| a - b)
    }
}

/// Component-wise scaling.
impl<T> Mul for Point3<T>
where
    T: Copy + Mul<Output = T>,
{
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        self.zip_with(rhs, |a, b| a * b)
    }
}

impl<T> Mul<T> for Point3<T>
where
    T: Copy + Mul<Output = T>,
{
    type Output = Self;

    #[inline]
    fn mul(self, rhs: T) -> Self {
        self.zip_with(Self::fill(rhs), |a, b| a * b)
    }
}

// With this order an `Extent3i` contains `p` iff `p` is GEQ its minimum and LT its least upper
// bound.
impl<T> PartialOrd for Point3<T>
where
    T: Copy + PartialOrd,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self == other {
            Some(Ordering::Equal)
        } else if self < other {
            Some(Ordering::Less)
        } else if self > other {
            Some(Ordering::Greater)
        } else {
            None
        }
    }

    fn lt(&self, other: &Self) -> bool {
        self.0.iter().zip(other.0.iter()).all(|(a, b)| a < b)
    }

    fn gt(&self, other: &Self) -> bool {
        self.0.iter().zip(other.0.iter()).all(|(a, b)| a > b)
    }

    fn le(&self, other: &Self) -> bool {
        self.0.iter().zip(other.0.iter()).all(|(a, b)| a <= b)
    }

    fn ge(&self, other: &Self) -> bool {
        self.0.iter().zip(other.0.iter()).all(|(a, b)| a >= b)
    }
}

impl From<Point3i> for Point3f {
    #[inline]
    fn from(p: Point3i) -> Self {
        PointN([p.x() as f32, p.y() as f32, p.z() as f32])
    }
}

// ████████╗███████╗███████╗████████╗███████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝
//    ██║   █████╗  ███████╗   ██║   ███████╗
//    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║
//    ██║   ███████╗███████║   ██║   ███████║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝
