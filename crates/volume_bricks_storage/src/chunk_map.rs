//! A sparse lattice map made of up array chunks.
//!
//! # Indexing
//!
//! The map of chunks uses `Point3i` keys. The key for a chunk is the minimum point in that chunk,
//! which is always a multiple of the chunk shape. Chunk shape dimensions must be powers of 2, which
//! allows for efficiently calculating a chunk key from any point in the chunk.
//!
//! # Chunk Storage
//!
//! `ChunkMap<T, Store>` depends on a backing chunk storage `Store`, which can implement some of
//! `ChunkReadStorage` or `ChunkWriteStorage`. The `ChunkHashMap` alias uses a `SmallKeyHashMap`.
//!
//! # Example `ChunkHashMap` Usage
//! ```
//! use volume_bricks_core::prelude::*;
//! use volume_bricks_storage::prelude::*;
//!
//! let ambient_value = 0.0;
//! let mut map = ChunkHashMap::new(Point3i::fill(8), ambient_value);
//!
//! // Although we only write 2 points, 2 whole dense chunks will be inserted.
//! map.set_value(Point3i::ZERO, 1.0);
//! map.set_value(Point3i::fill(100), 2.0);
//! assert_eq!(map.num_chunks(), 2);
//!
//! assert_eq!(map.get(Point3i::ZERO), 1.0);
//! // Points that were never written take the ambient value, whether or not their chunk exists.
//! assert_eq!(map.get(Point3i::fill(1)), 0.0);
//! assert_eq!(map.get(Point3i::fill(-50)), 0.0);
//! ```

use crate::{
    ActiveChunk, ChunkIndexer, ChunkReadStorage, ChunkWriteStorage, IterChunks, SmallKeyHashMap,
};

use volume_bricks_core::prelude::*;

/// A lattice map made up of same-shaped `ActiveChunk`s. It takes a value at every possible
/// `Point3i`, because accesses made outside of the stored chunks will return some ambient value
/// specified on creation.
pub struct ChunkMap<T, Store> {
    /// Translates from lattice coordinates to chunk key space.
    pub indexer: ChunkIndexer,
    storage: Store,
    ambient_value: T,
}

/// A `ChunkMap` using `HashMap` as chunk storage.
pub type ChunkHashMap<T> = ChunkMap<T, SmallKeyHashMap<Point3i, ActiveChunk<T>>>;

impl<T> ChunkHashMap<T> {
    /// Create a new `ChunkMap` using a `SmallKeyHashMap` as the chunk storage.
    ///
    /// All dimensions of `chunk_shape` must be powers of 2.
    pub fn new(chunk_shape: Point3i, ambient_value: T) -> Self {
        Self::build_with_storage(chunk_shape, ambient_value, SmallKeyHashMap::default())
    }
}

impl<T, Store> ChunkMap<T, Store> {
    /// Create a new `ChunkMap` with the given `storage`.
    ///
    /// All dimensions of `chunk_shape` must be powers of 2.
    pub fn build_with_storage(chunk_shape: Point3i, ambient_value: T, storage: Store) -> Self {
        Self {
            indexer: ChunkIndexer::new(chunk_shape),
            storage,
            ambient_value,
        }
    }

    /// The value of every point that isn't held by an active voxel.
    #[inline]
    pub fn ambient_value(&self) -> &T {
        &self.ambient_value
    }

    /// Borrows the internal chunk storage.
    #[inline]
    pub fn storage(&self) -> &Store {
        &self.storage
    }
}

impl<T, Store> ChunkMap<T, Store>
where
    Store: ChunkReadStorage<ActiveChunk<T>>,
{
    /// Borrow the chunk at `key`.
    ///
    /// In debug mode only, asserts that `key` is valid.
    #[inline]
    pub fn get_chunk(&self, key: Point3i) -> Option<&ActiveChunk<T>> {
        debug_assert!(self.indexer.chunk_key_is_valid(key));

        self.storage.get(key)
    }

    #[inline]
    pub fn num_chunks(&self) -> usize {
        self.storage.len()
    }

    /// Borrow the value at `p`, or the ambient value if it lives in a vacant chunk.
    #[inline]
    pub fn get_ref(&self, p: Point3i) -> &T {
        let key = self.indexer.chunk_key_containing_point(p);

        self.get_chunk(key)
            .map(|chunk| chunk.array.get_ref(p))
            .unwrap_or(&self.ambient_value)
    }

    #[inline]
    pub fn get(&self, p: Point3i) -> T
    where
        T: Clone,
    {
        self.get_ref(p).clone()
    }

    /// Returns `true` iff the value at `p` was written and has not been pruned since.
    #[inline]
    pub fn is_active(&self, p: Point3i) -> bool {
        let key = self.indexer.chunk_key_containing_point(p);

        self.get_chunk(key)
            .map(|chunk| chunk.is_active(p))
            .unwrap_or(false)
    }
}

impl<T, Store> ChunkMap<T, Store>
where
    T: Clone,
    Store: ChunkWriteStorage<ActiveChunk<T>>,
{
    /// Mutably borrow the chunk at `key`. If the chunk doesn't exist, a new chunk is created with
    /// the ambient value.
    ///
    /// In debug mode only, asserts that `key` is valid.
    #[inline]
    pub fn get_mut_chunk_or_insert_ambient(&mut self, key: Point3i) -> &mut ActiveChunk<T> {
        debug_assert!(self.indexer.chunk_key_is_valid(key));

        let Self {
            indexer,
            storage,
            ambient_value,
        } = self;

        storage.get_mut_or_insert_with(key, || {
            ActiveChunk::new_ambient(
                indexer.extent_for_chunk_at_key(key),
                ambient_value.clone(),
            )
        })
    }

    /// Writes `value` at `p` and marks it active, inserting an ambient chunk if necessary.
    #[inline]
    pub fn set_value(&mut self, p: Point3i, value: T) {
        let key = self.indexer.chunk_key_containing_point(p);

        self.get_mut_chunk_or_insert_ambient(key).set_value(p, value);
    }

    /// Deactivates voxels equal to the ambient value and removes chunks left with no active voxels.
    pub fn prune(&mut self)
    where
        T: PartialEq,
    {
        let Self {
            storage,
            ambient_value,
            ..
        } = self;

        storage.retain(|_key, chunk| chunk.prune(ambient_value));
    }
}

impl<'a, T: 'a, Store> ChunkMap<T, Store>
where
    Store: IterChunks<'a, ActiveChunk<T>>,
{
    /// Iterate over `(key, chunk)` for every stored chunk, in no particular order.
    pub fn iter_chunks(&'a self) -> Store::Iter {
        self.storage.iter_chunks()
    }

    /// The smallest extent that bounds all chunks, if there are any.
    pub fn bounding_extent(&'a self) -> Option<Extent3i> {
        bounding_extent(self.storage.iter_chunks().flat_map(|(key, _chunk)| {
            let chunk_extent = self.indexer.extent_for_chunk_at_key(*key);

            vec![chunk_extent.minimum, chunk_extent.max()].into_iter()
        }))
    }
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝
