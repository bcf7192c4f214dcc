//! Backing storage for the chunks of a `ChunkMap`.
//!
//! A storage can be as simple as a `HashMap`, which provides good performance for both iteration
//! and random access.

use crate::SmallKeyHashMap;

use volume_bricks_core::Point3i;

use std::collections::hash_map;

/// Methods for reading chunks from storage.
pub trait ChunkReadStorage<Ch> {
    /// Borrow the chunk at `key`.
    fn get(&self, key: Point3i) -> Option<&Ch>;

    /// The number of stored chunks.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Methods for writing chunks into storage.
pub trait ChunkWriteStorage<Ch> {
    /// Mutably borrow the chunk at `key`.
    fn get_mut(&mut self, key: Point3i) -> Option<&mut Ch>;

    /// Mutably borrow the chunk at `key`. If the chunk doesn't exist, `create_chunk` is called to
    /// insert one.
    fn get_mut_or_insert_with(&mut self, key: Point3i, create_chunk: impl FnOnce() -> Ch)
        -> &mut Ch;

    /// Overwrite the chunk at `key` with `chunk`. Drops the previous value.
    fn write(&mut self, key: Point3i, chunk: Ch);

    /// Keep only the chunks for which `keep` returns `true`.
    fn retain(&mut self, keep: impl FnMut(&Point3i, &mut Ch) -> bool);
}

/// Iteration over the stored chunks.
pub trait IterChunks<'a, Ch: 'a> {
    type Iter: Iterator<Item = (&'a Point3i, &'a Ch)>;

    fn iter_chunks(&'a self) -> Self::Iter;
}

impl<Ch> ChunkReadStorage<Ch> for SmallKeyHashMap<Point3i, Ch> {
    #[inline]
    fn get(&self, key: Point3i) -> Option<&Ch> {
        self.get(&key)
    }

    #[inline]
    fn len(&self) -> usize {
        self.len()
    }
}

impl<Ch> ChunkWriteStorage<Ch> for SmallKeyHashMap<Point3i, Ch> {
    #[inline]
    fn get_mut(&mut self, key: Point3i) -> Option<&mut Ch> {
        self.get_mut(&key)
    }

    #[inline]
    fn get_mut_or_insert_with(
        &mut self,
        key: Point3i,
        create_chunk: impl FnOnce() -> Ch,
    ) -> &mut Ch {
        self.entry(key).or_insert_with(create_chunk)
    }

    #[inline]
    fn write(&mut self, key: Point3i, chunk: Ch) {
        self.insert(key, chunk);
    }

    #[inline]
    fn retain(&mut self, keep: impl FnMut(&Point3i, &mut Ch) -> bool) {
        self.retain(keep)
    }
}

impl<'a, Ch: 'a> IterChunks<'a, Ch> for SmallKeyHashMap<Point3i, Ch> {
    type Iter = hash_map::Iter<'a, Point3i, Ch>;

    fn iter_chunks(&'a self) -> Self::Iter {
        self.iter()
    }
}
