use volume_bricks_core::{int_math::round_down_multiple_of_pow2, prelude::*};

use serde::{Deserialize, Serialize};

/// Translates from lattice coordinates to chunk key space. The key of a chunk is its minimum point,
/// which is always a multiple of the chunk shape.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ChunkIndexer {
    chunk_shape: Point3i,
}

impl ChunkIndexer {
    /// All dimensions of `chunk_shape` must be powers of 2.
    #[inline]
    pub fn new(chunk_shape: Point3i) -> Self {
        assert!(chunk_shape.dimensions_are_powers_of_2());

        Self { chunk_shape }
    }

    /// The constant shape of a chunk. The same for all chunks.
    #[inline]
    pub fn chunk_shape(&self) -> Point3i {
        self.chunk_shape
    }

    /// Determines whether `key` is a valid chunk key. This means it must be a multiple of the chunk
    /// shape.
    #[inline]
    pub fn chunk_key_is_valid(&self, key: Point3i) -> bool {
        self.chunk_key_containing_point(key) == key
    }

    /// Returns the key of the chunk that contains `point`.
    #[inline]
    pub fn chunk_key_containing_point(&self, point: Point3i) -> Point3i {
        PointN([
            round_down_multiple_of_pow2(point.x(), self.chunk_shape.x()),
            round_down_multiple_of_pow2(point.y(), self.chunk_shape.y()),
            round_down_multiple_of_pow2(point.z(), self.chunk_shape.z()),
        ])
    }

    /// The extent spanned by the chunk at `key`.
    #[inline]
    pub fn extent_for_chunk_at_key(&self, key: Point3i) -> Extent3i {
        Extent3i::from_min_and_shape(key, self.chunk_shape)
    }
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunk_key_for_negative_point_rounds_down() {
        let indexer = ChunkIndexer::new(Point3i::fill(8));

        assert_eq!(
            indexer.chunk_key_containing_point(PointN([-1, 7, 8])),
            PointN([-8, 0, 8])
        );
        assert!(indexer.chunk_key_is_valid(PointN([-8, 0, 8])));
        assert!(!indexer.chunk_key_is_valid(PointN([-7, 0, 8])));
    }
}
