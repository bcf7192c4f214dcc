//! Quality-driven lossy compression of dense scalar volumes.
//!
//! This library is organized into several crates:
//! - **core**: lattice point and extent data types
//! - **storage**: dense arrays and the sparse, chunked `SparseVolume` store with its file format
//! - **compress**: brick statistics, background estimation, ranking and the quality cut
//! - **vtk**: loading legacy VTK structured points files as volume sources
//!
//! ```
//! use volume_bricks::prelude::*;
//!
//! // A 4x4x4 volume of zeros with one hot corner brick.
//! let mut samples = vec![0.0; 64];
//! samples[0] = 9.0;
//! let volume = DenseVolume::new(PointN([4, 4, 4]), &samples);
//!
//! let config = CompressionConfig::default().with_brick_size(2).with_quality(0.125);
//! let (store, report) = compress(&volume, &config).unwrap();
//!
//! assert_eq!(report.activated_bricks, 1);
//! assert_eq!(store.background(), 0.0);
//! assert_eq!(store.get(PointN([0, 0, 0])), 9.0);
//! ```

pub use volume_bricks_compress as compress;
pub use volume_bricks_core as core;
pub use volume_bricks_storage as storage;
pub use volume_bricks_vtk as vtk;

pub mod prelude {
    pub use super::compress::prelude::*;
    pub use super::core::prelude::*;
    pub use super::storage::prelude::*;
    pub use super::vtk::prelude::*;
}
