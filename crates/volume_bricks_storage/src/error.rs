//! Errors produced while writing or reading a serialized `SparseVolume`.

use thiserror::Error;

/// Things that can go wrong when a sparse volume meets a byte stream.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The underlying reader or writer failed.
    #[error("store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// A chunk or header could not be serialized.
    #[error("failed to encode store data: {0}")]
    Encode(#[source] bincode::Error),

    /// A chunk or header could not be deserialized.
    #[error("failed to decode store data: {0}")]
    Decode(#[source] bincode::Error),

    /// A decoded chunk does not fit the lattice described by the header.
    #[error("corrupt chunk at key {key:?}")]
    CorruptChunk { key: [i32; 3] },

    /// The stream does not start with a header this crate understands.
    #[error("invalid store header: {0}")]
    InvalidHeader(String),
}
