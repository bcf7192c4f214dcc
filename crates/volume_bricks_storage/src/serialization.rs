use crate::{
    BincodeCompression, BytesCompression, ChunkWriteStorage, Compressed, Compression, StoreError,
};

use volume_bricks_core::prelude::*;

use futures::future::join_all;
use itertools::Itertools;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// How many chunks are (de)compressed concurrently before moving on to the next batch.
const BATCH_SIZE: usize = 16;

/// A simple format for serializing a collection of chunks. All chunks are serialized with `bincode`,
/// then compressed using some `BytesCompression`.
#[derive(Deserialize, Serialize)]
#[serde(bound(serialize = "Ch: Serialize", deserialize = "Ch: DeserializeOwned"))]
pub struct SerializableChunks<Ch, B>
where
    Ch: DeserializeOwned + Serialize,
    B: BytesCompression,
{
    pub compressed_chunks: Vec<(Point3i, Compressed<BincodeCompression<Ch, B>>)>,
}

impl<Ch, B> SerializableChunks<Ch, B>
where
    Ch: DeserializeOwned + Serialize,
    B: BytesCompression,
{
    /// Returns a serializable version of this collection of chunks. This can be used to serialize
    /// any kind of chunk storage.
    pub async fn from_iter<'a>(
        compression: BincodeCompression<Ch, B>,
        chunks_iter: impl IntoIterator<Item = (Point3i, &'a Ch)>,
    ) -> Result<Self, StoreError>
    where
        B: Copy,
        Ch: 'a,
    {
        // Only do one parallel batch at a time so the whole map is never duplicated in memory.
        let mut compressed_chunks = Vec::new();
        for batch_of_chunks in &chunks_iter.into_iter().chunks(BATCH_SIZE) {
            for (key, compressed_chunk) in join_all(
                batch_of_chunks
                    .into_iter()
                    .map(|(key, chunk)| async move { (key, compression.compress(chunk)) }),
            )
            .await
            .into_iter()
            {
                compressed_chunks.push((key, compressed_chunk?));
            }
        }

        Ok(Self { compressed_chunks })
    }

    pub fn num_chunks(&self) -> usize {
        self.compressed_chunks.len()
    }

    /// Decompresses each chunk and inserts it into the given `storage`.
    ///
    /// Every chunk is decompressed before any is written, so a corrupt chunk leaves `storage`
    /// untouched.
    pub async fn fill_storage<Store>(self, storage: &mut Store) -> Result<(), StoreError>
    where
        Store: ChunkWriteStorage<Ch>,
    {
        let mut chunks = Vec::with_capacity(self.compressed_chunks.len());
        for batch_of_compressed_chunks in &self.compressed_chunks.into_iter().chunks(BATCH_SIZE) {
            for (key, chunk) in
                join_all(batch_of_compressed_chunks.into_iter().map(
                    |(key, compressed_chunk)| async move { (key, compressed_chunk.decompress()) },
                ))
                .await
                .into_iter()
            {
                chunks.push((key, chunk?));
            }
        }

        for (key, chunk) in chunks {
            storage.write(key, chunk);
        }

        Ok(())
    }
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝

#[cfg(test)]
mod test {
    use super::*;

    use crate::{ActiveChunk, ChunkHashMap, ChunkReadStorage, SmallKeyHashMap};

    #[cfg(feature = "lz4")]
    #[test]
    fn hash_map_serialize_and_deserialize_round_trip_lz4() {
        use crate::Lz4;

        do_serialize_and_deserialize_round_trip_test(Lz4 { level: 10 });
    }

    #[cfg(feature = "snap")]
    #[test]
    fn hash_map_serialize_and_deserialize_round_trip_snappy() {
        use crate::Snappy;

        do_serialize_and_deserialize_round_trip_test(Snappy);
    }

    #[cfg(feature = "snap")]
    #[test]
    fn corrupt_chunk_leaves_storage_untouched() {
        use crate::Snappy;

        let mut map = ChunkHashMap::new(Point3i::fill(8), 0);
        map.set_value(Point3i::ZERO, 1);
        map.set_value(Point3i::fill(50), 2);
        let mut serializable = futures::executor::block_on(SerializableChunks::from_iter(
            BincodeCompression::new(Snappy),
            map.iter_chunks().map(|(k, c)| (*k, c)),
        ))
        .unwrap();
        serializable.compressed_chunks[1].1 = Compressed::new(vec![0xFF; 12]);

        let mut storage: SmallKeyHashMap<Point3i, ActiveChunk<i32>> = SmallKeyHashMap::default();
        let result = futures::executor::block_on(serializable.fill_storage(&mut storage));

        assert!(result.is_err());
        assert!(ChunkReadStorage::is_empty(&storage));
    }

    fn do_serialize_and_deserialize_round_trip_test<B>(compression: B)
    where
        B: BytesCompression + Copy,
    {
        let mut map = ChunkHashMap::new(Point3i::fill(16), 0);
        let filled_extent = Extent3i::from_min_and_shape(Point3i::fill(-20), Point3i::fill(40));
        for p in filled_extent.iter_points() {
            map.set_value(p, p.x() + p.y() + p.z());
        }

        let serializable = futures::executor::block_on(SerializableChunks::from_iter(
            BincodeCompression::new(compression),
            map.iter_chunks().map(|(k, c)| (*k, c)),
        ))
        .unwrap();
        let serialized: Vec<u8> = bincode::serialize(&serializable).unwrap();
        let deserialized: SerializableChunks<ActiveChunk<i32>, B> =
            bincode::deserialize(&serialized).unwrap();

        let mut storage = SmallKeyHashMap::default();
        futures::executor::block_on(deserialized.fill_storage(&mut storage)).unwrap();
        let restored = ChunkHashMap::build_with_storage(Point3i::fill(16), 0, storage);

        assert_eq!(restored.num_chunks(), map.num_chunks());
        for p in filled_extent.iter_points() {
            assert_eq!(restored.get(p), p.x() + p.y() + p.z());
            assert!(restored.is_active(p));
        }
    }
}
