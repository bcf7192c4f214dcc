//! Loading dense volumes from legacy VTK structured points files.
//!
//! ```no_run
//! use volume_bricks_vtk::{load_vtk_file, VtkOptions};
//!
//! let volume = load_vtk_file("head.vtk", &VtkOptions::default()).unwrap();
//! println!("{:?} samples of {}", volume.dimensions, volume.scalar_type.name());
//! ```

pub mod error;
pub mod header;
pub mod loader;
pub mod scalar_type;

pub use error::*;
pub use header::*;
pub use loader::*;
pub use scalar_type::*;

pub mod prelude {
    pub use super::{load_vtk_file, read_vtk, ScalarType, VtkError, VtkOptions, VtkVolume};
}
