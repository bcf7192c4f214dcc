//! Quality-driven lossy compression of dense scalar volumes.
//!
//! The volume is cut into cubic bricks. Each brick is scored by how far its value range is from the
//! background (the median sample), and only the `quality` fraction of bricks that differ most from
//! the background is written into a `SparseStore`, together with the 8 corner samples of the
//! volume. Everything else reads back as the background value.
//!
//! The stages are public so they can be used on their own:
//!   - `compute_brick_statistics`: per-brick `[min, max]`
//!   - `estimate_background`: the median sample
//!   - `rank_bricks` and `select_bricks`: ordering by `SimilarityMetric` and the quality cut
//!   - `CompressionPlan`: all of the above, validated, ready to populate a store

pub mod background;
pub mod brick;
pub mod compressor;
pub mod config;
pub mod error;
pub mod selector;
pub mod similarity;
pub mod volume;

pub use background::*;
pub use brick::*;
pub use compressor::*;
pub use config::*;
pub use error::*;
pub use selector::*;
pub use similarity::*;
pub use volume::*;

pub mod prelude {
    pub use super::{
        compress, compress_with, CompressError, CompressionConfig, CompressionPlan,
        CompressionReport, DenseVolume, SimilarityMetric, VolumeSource,
    };
}
