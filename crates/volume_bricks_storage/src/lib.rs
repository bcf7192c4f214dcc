#![allow(clippy::type_complexity)]

//! Storage for 3-dimensional scalar volumes.
//!
//! The core storage types are:
//!   - `Array3`: dense array over an `Extent3i`, in row-major order
//!   - `ChunkHashMap`: sparse map of dense chunks with an ambient value and per-voxel activity
//!   - `SparseVolume`: the `SparseStore` built on `ChunkHashMap`, with prune, memory reporting and
//!     a compressed file format
//!
//! Chunks are serialized with `bincode` and then compressed with any `BytesCompression`. `Lz4` and
//! `Snappy` are available behind the `lz4` and `snap` features.

pub mod array;
pub mod bitset;
pub mod chunk;
pub mod chunk_indexer;
pub mod chunk_map;
pub mod chunk_storage;
pub mod compression;
pub mod error;
pub mod serialization;
pub mod sparse_store;

pub use array::*;
pub use bitset::*;
pub use chunk::*;
pub use chunk_indexer::*;
pub use chunk_map::*;
pub use chunk_storage::*;
pub use compression::*;
pub use error::*;
pub use serialization::*;
pub use sparse_store::*;

// Hash types to use for small keys like `PointN`.
pub type SmallKeyHashMap<K, V> = std::collections::HashMap<K, V, SmallKeyBuildHasher>;
pub type SmallKeyBuildHasher = ahash::RandomState;

pub mod prelude {
    pub use super::{
        ActiveChunk, Array3, BincodeCompression, BytesCompression, ChunkHashMap, ChunkIndexer,
        ChunkMap, ChunkReadStorage, ChunkWriteStorage, Compressed, Compression, IterChunks,
        SerializableChunks, SparseStore, SparseVolume, StoreError, Stride, DEFAULT_CHUNK_SHAPE,
    };

    #[cfg(feature = "lz4")]
    pub use super::Lz4;
    #[cfg(feature = "snap")]
    pub use super::Snappy;
}
