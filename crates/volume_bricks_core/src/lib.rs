//! The core data types for defining 3D integer lattices:
//! - `PointN`: an N-dimensional point, most importantly `Point3i`
//! - `ExtentN`: an N-dimensional extent, most importantly `Extent3i`

pub mod extent;
pub mod extent3;
pub mod int_math;
pub mod point;
pub mod point3;

pub use extent::{bounding_extent, ExtentN, IntegerExtent};
pub use extent3::{Extent3, Extent3i};
pub use point::{IntegerPoint, Ones, Point, PointN, SmallOne, SmallZero};
pub use point3::{Point3, Point3f, Point3i};

pub mod prelude {
    pub use super::{
        bounding_extent, Extent3, Extent3i, ExtentN, IntegerExtent, IntegerPoint, Ones,
        Point, Point3, Point3f, Point3i, PointN, SmallZero,
    };
}
