use volume_bricks::prelude::*;
use volume_bricks::storage::read_codec_name;

use anyhow::{bail, Context, Result};

fn main() -> Result<()> {
    let _ = tracing_subscriber::fmt().try_init();

    let args: Vec<_> = std::env::args().collect();
    let path = match args.get(1) {
        Some(path) => path,
        None => bail!("usage: inspect_volume <input.vbr>"),
    };

    println!("Reading {}", path);
    let bytes = std::fs::read(path).with_context(|| format!("failed to read {}", path))?;
    let codec =
        read_codec_name(&bytes[..]).with_context(|| format!("{} is not a store file", path))?;
    let store = read_store(&codec, &bytes).with_context(|| format!("failed to decode {}", path))?;

    println!("Codec: {}", codec);
    println!("Chunk shape: {:?}", store.chunk_shape().0);
    println!("Background value: {}", store.background());
    println!("Chunks: {}", store.num_chunks());
    println!("Active voxels: {}", store.active_count());
    println!("Memory usage: {} bytes", store.memory_usage());
    match store.bounding_extent() {
        Some(extent) => println!(
            "Bounding extent: min {:?}, max {:?}",
            extent.minimum.0,
            extent.max().0
        ),
        None => println!("Bounding extent: empty"),
    }

    Ok(())
}

fn read_store(codec: &str, bytes: &[u8]) -> Result<SparseVolume<f32>> {
    #[cfg(feature = "lz4")]
    {
        if codec == Lz4::NAME {
            return Ok(SparseVolume::read_from::<Lz4, _>(bytes)?);
        }
    }
    #[cfg(feature = "snappy")]
    {
        if codec == Snappy::NAME {
            return Ok(SparseVolume::read_from::<Snappy, _>(bytes)?);
        }
    }

    bail!("unsupported codec {:?}", codec)
}
