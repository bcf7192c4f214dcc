use super::{BytesCompression, Compressed, Compression};
use crate::StoreError;

use serde::{de::DeserializeOwned, Serialize};

/// Run some compression algorithm `A` after bincode serializing a type `T`. This provides a decent
/// default compression for any serializable type, including whole `ActiveChunk`s.
pub struct BincodeCompression<T, A> {
    pub compression: A,
    marker: std::marker::PhantomData<T>,
}

impl<T, A> Clone for BincodeCompression<T, A>
where
    A: Clone,
{
    fn clone(&self) -> Self {
        Self {
            compression: self.compression.clone(),
            marker: Default::default(),
        }
    }
}

impl<T, A> Copy for BincodeCompression<T, A> where A: Copy {}

impl<T, A> BincodeCompression<T, A> {
    pub fn new(compression: A) -> Self {
        Self {
            compression,
            marker: Default::default(),
        }
    }
}

impl<T, A> Compression for BincodeCompression<T, A>
where
    T: DeserializeOwned + Serialize,
    A: BytesCompression,
{
    type Data = T;
    type CompressedData = Vec<u8>;

    fn compress(&self, data: &Self::Data) -> Result<Compressed<Self>, StoreError> {
        let serialized = bincode::serialize(data).map_err(StoreError::Encode)?;

        let mut compressed_bytes = Vec::new();
        self.compression
            .compress_bytes(&serialized, &mut compressed_bytes)?;

        Ok(Compressed::new(compressed_bytes))
    }

    fn decompress(compressed: &Self::CompressedData) -> Result<Self::Data, StoreError> {
        let mut decompressed_bytes = Vec::new();
        A::decompress_bytes(compressed, &mut decompressed_bytes)?;

        bincode::deserialize(&decompressed_bytes).map_err(StoreError::Decode)
    }
}

// ████████╗███████╗███████╗████████╗███████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝
//    ██║   █████╗  ███████╗   ██║   ███████╗
//    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║
//    ██║   ███████╗███████║   ██║   ███████║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝

#[cfg(all(test, feature = "snap"))]
mod tests {
    use super::*;
    use crate::{ActiveChunk, Snappy};

    use volume_bricks_core::prelude::*;

    #[test]
    fn compress_and_decompress_chunk() {
        let extent = Extent3i::from_min_and_shape(Point3i::fill(-8), Point3i::fill(8));
        let mut chunk = ActiveChunk::new_ambient(extent, 0.25f32);
        chunk.set_value(PointN([-3, -2, -1]), 9.5);

        let compression = BincodeCompression::new(Snappy);
        let compressed = compression.compress(&chunk).unwrap();
        let decompressed = compressed.decompress().unwrap();

        assert_eq!(chunk, decompressed);
    }

    #[test]
    fn garbage_bytes_fail_to_decompress() {
        let garbage = vec![0xFFu8; 64];

        assert!(BincodeCompression::<ActiveChunk<f32>, Snappy>::decompress(&garbage).is_err());
    }
}
