use crate::{extent::IntegerExtent, ExtentN, Point3, Point3i, PointN};

use core::ops::Range;
use itertools::{iproduct, ConsTuples, Product};

/// A 3-dimensional extent with scalar type `T`.
pub type Extent3<T> = ExtentN<[T; 3]>;
/// A 3-dimensional extent with scalar type `i32`.
pub type Extent3i = ExtentN<[i32; 3]>;

impl Extent3i {
    /// The extent of a whole `W x H x D` volume, anchored at the origin.
    #[inline]
    pub fn from_dimensions(dimensions: Point3i) -> Self {
        Self::from_min_and_shape(Point3i::fill(0), dimensions)
    }

    /// The 8 extremal corner points, deduplicated when some dimension is 1. Returns nothing for an
    /// empty extent.
    pub fn corners(&self) -> Vec<Point3i> {
        use crate::IntegerPoint;

        if self.is_empty() {
            return Vec::new();
        }

        let span = self.max() - self.minimum;
        let mut corners: Vec<Point3i> = Point3i::corner_offsets()
            .into_iter()
            .map(|offset| self.minimum + offset * span)
            .collect();
        corners.sort_by_key(|p| (p.z(), p.y(), p.x()));
        corners.dedup();

        corners
    }
}

/// An iterator over all points in an `Extent3<T>`.
pub struct Extent3PointIter<T>
where
    T: Clone,
    Range<T>: Iterator<Item = T>,
{
    product_iter: ConsTuples<RangeProduct3<T>, ((T, T), T)>,
}

type RangeProduct2<T> = Product<Range<T>, Range<T>>;
type RangeProduct3<T> = Product<RangeProduct2<T>, Range<T>>;

impl<T> Iterator for Extent3PointIter<T>
where
    T: Clone,
    Range<T>: Iterator<Item = T>,
{
    type Item = Point3<T>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.product_iter.next().map(|(z, y, x)| PointN([x, y, z]))
    }
}

impl IntegerExtent<[i32; 3]> for Extent3i {
    type PointIter = Extent3PointIter<i32>;

    #[inline]
    fn num_points(&self) -> usize {
        self.shape.volume_usize()
    }

    #[inline(always)]
    fn iter_points(&self) -> Self::PointIter {
        let lub = self.least_upper_bound();

        Extent3PointIter {
            // iproduct is opposite of row-major order.
            product_iter: iproduct!(
                self.minimum.z()..lub.z(),
                self.minimum.y()..lub.y(),
                self.minimum.x()..lub.x()
            ),
        }
    }
}

// ████████╗███████╗███████╗████████╗███████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝
//    ██║   █████╗  ███████╗   ██║   ███████╗
//    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║
//    ██║   ███████╗███████║   ██║   ███████║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝
