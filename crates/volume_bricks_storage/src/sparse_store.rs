//! The sparse volumetric store that compressed volumes are written into.
//!
//! A `SparseVolume` reads as its background value everywhere except at the voxels that were written
//! explicitly. Storage is a `ChunkHashMap` of small dense chunks, each with an activity mask, so
//! memory grows with the number of touched chunks rather than with the size of the volume.
//!
//! ```
//! use volume_bricks_core::prelude::*;
//! use volume_bricks_storage::prelude::*;
//!
//! let mut store = SparseVolume::new(DEFAULT_CHUNK_SHAPE, 0.0f32);
//! store.set_value(PointN([3, 4, 5]), 1.5);
//! store.set_value(PointN([3, 4, 6]), 0.0);
//! assert_eq!(store.active_count(), 2);
//!
//! // Writing the background value explicitly does not survive a prune.
//! store.prune();
//! assert_eq!(store.active_count(), 1);
//! assert_eq!(store.get(PointN([3, 4, 5])), 1.5);
//! assert_eq!(store.get(PointN([-100, 0, 0])), 0.0);
//! ```

use crate::{
    ActiveChunk, BincodeCompression, BytesCompression, ChunkHashMap, SerializableChunks,
    SmallKeyHashMap, StoreError,
};

use volume_bricks_core::prelude::*;

use bincode::Options;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::io::{Read, Write};

/// Chunk shape used when the caller has no preference. Matches the leaf size of common sparse
/// voxel trees.
pub const DEFAULT_CHUNK_SHAPE: Point3i = PointN([8; 3]);

const MAGIC: [u8; 4] = *b"VBRK";
const FORMAT_VERSION: u16 = 1;
/// Upper bound on the encoded size of a store header. The codec name is the only field that can
/// grow, so anything larger is corrupt.
const MAX_HEADER_BYTES: u64 = 1 << 16;

/// A sparse map from integer coordinate to value, with a background value for every coordinate that
/// was never written.
pub trait SparseStore {
    type Value;

    /// The value read at every inactive coordinate.
    fn background(&self) -> Self::Value;

    /// Write `value` at `p` and mark `p` active.
    fn set_value(&mut self, p: Point3i, value: Self::Value);

    fn get(&self, p: Point3i) -> Self::Value;

    /// Deactivate every active voxel equal to the background and release storage that no longer
    /// holds any active voxel.
    fn prune(&mut self);

    /// Bytes of memory held by the store.
    fn memory_usage(&self) -> usize;

    /// Number of active voxels.
    fn active_count(&self) -> usize;
}

/// The `SparseStore` implementation of this crate.
pub struct SparseVolume<T> {
    map: ChunkHashMap<T>,
}

#[derive(Deserialize, Serialize)]
struct StoreHeader<T> {
    version: u16,
    codec: String,
    chunk_shape: Point3i,
    background: T,
}

impl<T> SparseVolume<T> {
    /// An empty store where every coordinate reads as `background`.
    ///
    /// All dimensions of `chunk_shape` must be powers of 2.
    pub fn new(chunk_shape: Point3i, background: T) -> Self {
        Self {
            map: ChunkHashMap::new(chunk_shape, background),
        }
    }

    #[inline]
    pub fn chunk_shape(&self) -> Point3i {
        self.map.indexer.chunk_shape()
    }

    #[inline]
    pub fn num_chunks(&self) -> usize {
        self.map.num_chunks()
    }

    /// Returns `true` iff the value at `p` was written and has not been pruned since.
    #[inline]
    pub fn is_active(&self, p: Point3i) -> bool {
        self.map.is_active(p)
    }

    /// The smallest chunk-aligned extent that holds every stored chunk.
    pub fn bounding_extent(&self) -> Option<Extent3i> {
        self.map.bounding_extent()
    }

    /// All active voxels and their values, in no particular order.
    pub fn iter_active(&self) -> impl Iterator<Item = (Point3i, &T)> {
        self.map.iter_chunks().flat_map(|(_key, chunk)| {
            chunk
                .extent()
                .iter_points()
                .filter(move |p| chunk.is_active(*p))
                .map(move |p| (p, chunk.array.get_ref(p)))
        })
    }

    /// Write the store to `writer` as a small header followed by every chunk, bincode-serialized
    /// and compressed with `compression`.
    pub fn write_to<B, W>(&self, mut writer: W, compression: B) -> Result<(), StoreError>
    where
        T: Clone + DeserializeOwned + Serialize,
        B: BytesCompression + Copy,
        W: Write,
    {
        #[cfg(feature = "tracing")]
        let span = tracing::info_span!("write_sparse_volume", codec = B::NAME);
        #[cfg(feature = "tracing")]
        let _trace_guard = span.enter();

        let header = StoreHeader {
            version: FORMAT_VERSION,
            codec: B::NAME.to_string(),
            chunk_shape: self.chunk_shape(),
            background: self.map.ambient_value().clone(),
        };
        let chunks = futures::executor::block_on(SerializableChunks::from_iter(
            BincodeCompression::new(compression),
            self.map.iter_chunks().map(|(key, chunk)| (*key, chunk)),
        ))?;

        writer.write_all(&MAGIC)?;
        bincode::serialize_into(&mut writer, &header).map_err(StoreError::Encode)?;
        bincode::serialize_into(&mut writer, &chunks).map_err(StoreError::Encode)?;
        writer.flush()?;

        #[cfg(feature = "tracing")]
        tracing::debug!(num_chunks = chunks.num_chunks(), "wrote sparse volume");

        Ok(())
    }

    /// Read a store written by `write_to` with the same `BytesCompression`.
    pub fn read_from<B, R>(mut reader: R) -> Result<Self, StoreError>
    where
        T: Clone + DeserializeOwned + Serialize,
        B: BytesCompression,
        R: Read,
    {
        read_magic(&mut reader)?;

        let header: StoreHeader<T> = header_options()
            .deserialize_from(&mut reader)
            .map_err(StoreError::Decode)?;
        if header.version != FORMAT_VERSION {
            return Err(StoreError::InvalidHeader(format!(
                "unsupported format version {}",
                header.version
            )));
        }
        if header.codec != B::NAME {
            return Err(StoreError::InvalidHeader(format!(
                "chunks were compressed with {:?}, not {:?}",
                header.codec,
                B::NAME
            )));
        }
        if !header.chunk_shape.dimensions_are_powers_of_2() {
            return Err(StoreError::InvalidHeader(format!(
                "chunk shape {:?} is not a power of 2",
                header.chunk_shape.0
            )));
        }

        let chunks: SerializableChunks<ActiveChunk<T>, B> =
            bincode::deserialize_from(&mut reader).map_err(StoreError::Decode)?;
        let mut storage = SmallKeyHashMap::default();
        futures::executor::block_on(chunks.fill_storage(&mut storage))?;

        let map = ChunkHashMap::build_with_storage(header.chunk_shape, header.background, storage);
        for (key, chunk) in map.iter_chunks() {
            let expected_extent = map.indexer.extent_for_chunk_at_key(*key);
            if !map.indexer.chunk_key_is_valid(*key)
                || *chunk.extent() != expected_extent
                || !chunk.is_consistent()
            {
                return Err(StoreError::CorruptChunk { key: key.0 });
            }
        }

        Ok(Self { map })
    }
}

/// The leading fields of `StoreHeader`, which do not depend on the value type.
#[derive(Deserialize)]
struct CodecPrefix {
    version: u16,
    codec: String,
}

/// Reads the name of the `BytesCompression` that a store written by `write_to` was compressed
/// with, consuming only the start of its header.
pub fn read_codec_name(mut reader: impl Read) -> Result<String, StoreError> {
    read_magic(&mut reader)?;
    let prefix: CodecPrefix = header_options()
        .deserialize_from(&mut reader)
        .map_err(StoreError::Decode)?;
    if prefix.version != FORMAT_VERSION {
        return Err(StoreError::InvalidHeader(format!(
            "unsupported format version {}",
            prefix.version
        )));
    }

    Ok(prefix.codec)
}

/// The encoding of `bincode::serialize_into`, with a size limit so that a corrupt length prefix
/// fails instead of allocating.
fn header_options() -> impl Options {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .allow_trailing_bytes()
        .with_limit(MAX_HEADER_BYTES)
}

fn read_magic(reader: &mut impl Read) -> Result<(), StoreError> {
    let mut magic = [0u8; 4];
    reader.read_exact(&mut magic)?;
    if magic != MAGIC {
        return Err(StoreError::InvalidHeader(format!(
            "expected magic bytes {:?}, found {:?}",
            MAGIC, magic
        )));
    }

    Ok(())
}

impl<T> SparseStore for SparseVolume<T>
where
    T: Clone + PartialEq,
{
    type Value = T;

    #[inline]
    fn background(&self) -> T {
        self.map.ambient_value().clone()
    }

    #[inline]
    fn set_value(&mut self, p: Point3i, value: T) {
        self.map.set_value(p, value)
    }

    #[inline]
    fn get(&self, p: Point3i) -> T {
        self.map.get(p)
    }

    fn prune(&mut self) {
        self.map.prune()
    }

    fn memory_usage(&self) -> usize {
        let table = self.map.storage();
        let table_bytes = table.capacity()
            * (std::mem::size_of::<Point3i>() + std::mem::size_of::<ActiveChunk<T>>());
        let chunk_bytes: usize = self
            .map
            .iter_chunks()
            .map(|(_key, chunk)| chunk.heap_bytes())
            .sum();

        std::mem::size_of::<Self>() + table_bytes + chunk_bytes
    }

    fn active_count(&self) -> usize {
        self.map
            .iter_chunks()
            .map(|(_key, chunk)| chunk.num_active())
            .sum()
    }
}

// ████████╗███████╗███████╗████████╗███████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝
//    ██║   █████╗  ███████╗   ██║   ███████╗
//    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║
//    ██║   ███████╗███████║   ██║   ███████║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    fn filled_store() -> SparseVolume<f32> {
        let mut store = SparseVolume::new(DEFAULT_CHUNK_SHAPE, -1.0);
        let extent = Extent3i::from_min_and_shape(PointN([2, 3, 4]), PointN([10, 9, 3]));
        for p in extent.iter_points() {
            store.set_value(p, (p.x() * p.y() - p.z()) as f32);
        }

        store
    }

    #[test]
    fn unwritten_coordinates_read_as_background() {
        let store = SparseVolume::new(DEFAULT_CHUNK_SHAPE, 0.25f32);

        assert_eq!(store.get(PointN([0, 0, 0])), 0.25);
        assert_eq!(store.get(PointN([1000, -7, 3])), 0.25);
        assert_eq!(store.active_count(), 0);
        assert_eq!(store.num_chunks(), 0);
    }

    #[test]
    fn set_value_activates_voxels() {
        let store = filled_store();

        assert_eq!(store.active_count(), 10 * 9 * 3);
        assert_eq!(store.get(PointN([5, 5, 5])), 20.0);
        assert!(store.is_active(PointN([2, 3, 4])));
        assert!(!store.is_active(PointN([1, 3, 4])));
        assert_eq!(store.iter_active().count(), store.active_count());
    }

    #[test]
    fn prune_drops_background_values_and_empty_chunks() {
        let mut store = SparseVolume::new(DEFAULT_CHUNK_SHAPE, 0.0f32);
        let uniform = Extent3i::from_min_and_shape(Point3i::ZERO, Point3i::fill(16));
        for p in uniform.iter_points() {
            store.set_value(p, 0.0);
        }
        store.set_value(PointN([17, 0, 0]), 3.0);
        assert_eq!(store.num_chunks(), 9);
        let memory_before = store.memory_usage();

        store.prune();

        assert_eq!(store.active_count(), 1);
        assert_eq!(store.num_chunks(), 1);
        assert!(store.memory_usage() < memory_before);
        assert_eq!(store.get(PointN([17, 0, 0])), 3.0);
        assert_eq!(store.get(PointN([1, 1, 1])), 0.0);
    }

    #[test]
    fn bad_magic_is_rejected() {
        let bytes = b"NOPE and some more bytes".to_vec();

        let result = SparseVolume::<f32>::read_from::<TestCodec, _>(&bytes[..]);

        assert!(matches!(result, Err(StoreError::InvalidHeader(_))));
    }

    #[test]
    fn truncated_stream_is_an_error() {
        let result = SparseVolume::<f32>::read_from::<TestCodec, _>(&MAGIC[..]);

        assert!(matches!(result, Err(StoreError::Decode(_))));
    }

    #[test]
    fn huge_codec_name_length_is_a_decode_error() {
        let mut bytes = MAGIC.to_vec();
        bytes.extend_from_slice(&FORMAT_VERSION.to_le_bytes());
        bytes.extend_from_slice(&(1u64 << 40).to_le_bytes());
        bytes.extend_from_slice(b"identity");

        assert!(matches!(
            read_codec_name(&bytes[..]),
            Err(StoreError::Decode(_))
        ));
        assert!(matches!(
            SparseVolume::<f32>::read_from::<TestCodec, _>(&bytes[..]),
            Err(StoreError::Decode(_))
        ));
    }

    #[derive(Clone, Copy)]
    struct TestCodec;

    impl BytesCompression for TestCodec {
        const NAME: &'static str = "identity";

        fn compress_bytes(
            &self,
            bytes: &[u8],
            mut compressed_bytes: impl std::io::Write,
        ) -> std::io::Result<()> {
            compressed_bytes.write_all(bytes)
        }

        fn decompress_bytes(
            compressed_bytes: &[u8],
            bytes: &mut impl std::io::Write,
        ) -> std::io::Result<()> {
            bytes.write_all(compressed_bytes)
        }
    }

    #[test]
    fn write_and_read_round_trip() {
        let store = filled_store();

        let mut bytes = Vec::new();
        store.write_to(&mut bytes, TestCodec).unwrap();
        let restored = SparseVolume::<f32>::read_from::<TestCodec, _>(&bytes[..]).unwrap();

        assert_eq!(restored.chunk_shape(), store.chunk_shape());
        assert_eq!(restored.background(), -1.0);
        assert_eq!(restored.active_count(), store.active_count());
        for (p, value) in store.iter_active() {
            assert_eq!(restored.get(p), *value);
        }
    }

    #[test]
    fn codec_name_is_read_from_header() {
        let mut bytes = Vec::new();
        filled_store().write_to(&mut bytes, TestCodec).unwrap();

        assert_eq!(read_codec_name(&bytes[..]).unwrap(), "identity");
        assert!(matches!(
            read_codec_name(&b"junk"[..]),
            Err(StoreError::InvalidHeader(_))
        ));
    }

    #[cfg(feature = "lz4")]
    #[test]
    fn codec_mismatch_is_rejected() {
        use crate::Lz4;

        let mut bytes = Vec::new();
        filled_store().write_to(&mut bytes, Lz4::default()).unwrap();

        let result = SparseVolume::<f32>::read_from::<TestCodec, _>(&bytes[..]);

        assert!(matches!(result, Err(StoreError::InvalidHeader(_))));
    }

    #[cfg(feature = "snap")]
    #[test]
    fn snappy_round_trip_preserves_pruned_store() {
        use crate::Snappy;

        let mut store = filled_store();
        store.set_value(PointN([40, 40, 40]), -1.0);
        store.prune();

        let mut bytes = Vec::new();
        store.write_to(&mut bytes, Snappy).unwrap();
        let restored = SparseVolume::<f32>::read_from::<Snappy, _>(&bytes[..]).unwrap();

        assert_eq!(restored.num_chunks(), store.num_chunks());
        assert!(!restored.is_active(PointN([40, 40, 40])));
        assert_eq!(restored.get(PointN([11, 11, 6])), (11 * 11 - 6) as f32);
    }
}
