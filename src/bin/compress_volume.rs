use volume_bricks::prelude::*;

use anyhow::{bail, Context, Result};
use std::fs::File;
use std::io::BufWriter;

const USAGE: &str = "usage: compress_volume <input.vtk> [quality=0.5] [output=output.vbr] \
                     [metric=median] [brick_size=32]";

fn main() -> Result<()> {
    let _ = tracing_subscriber::fmt().try_init();

    let args: Vec<_> = std::env::args().skip(1).collect();
    let input_path = match args.get(0) {
        Some(path) => path,
        None => bail!(USAGE),
    };
    let mut config = CompressionConfig::default();
    if let Some(quality) = args.get(1) {
        config.quality = quality
            .parse()
            .with_context(|| format!("invalid quality {:?}", quality))?;
    }
    let output_path = args.get(2).map(String::as_str).unwrap_or("output.vbr");
    if let Some(metric) = args.get(3) {
        config.metric = metric.parse()?;
    }
    if let Some(brick_size) = args.get(4) {
        config.brick_size = brick_size
            .parse()
            .with_context(|| format!("invalid brick size {:?}", brick_size))?;
    }
    config.validate()?;

    println!("Loading {}", input_path);
    let volume = load_vtk_file(input_path, &VtkOptions::default())
        .with_context(|| format!("failed to load {}", input_path))?;
    println!(
        "Dimensions: {:?}, spacing: {:?}, {} samples of {}",
        volume.dimensions.0,
        volume.spacing.0,
        volume.scalars.len(),
        volume.scalar_type.name()
    );

    println!(
        "Compressing with quality {}, brick size {}, metric {}\n",
        config.quality, config.brick_size, config.metric
    );
    let (store, report) = compress(&volume, &config).context("compression failed")?;
    println!("{}\n", report);

    let file = File::create(output_path)
        .with_context(|| format!("failed to create {}", output_path))?;
    store
        .write_to(BufWriter::new(file), Lz4::default())
        .with_context(|| format!("failed to write {}", output_path))?;
    println!("Wrote {}", output_path);

    Ok(())
}
