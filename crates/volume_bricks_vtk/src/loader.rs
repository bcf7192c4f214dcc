use crate::{read_header, Encoding, ScalarType, VtkError};

use volume_bricks_compress::VolumeSource;
use volume_bricks_core::prelude::*;
use volume_bricks_storage::Array3;

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct VtkOptions {
    /// Reduce every sample to an unsigned byte before widening it to `f32`. See
    /// `ScalarType::narrow_to_byte`.
    pub narrow_to_byte: bool,
}

/// A structured points dataset, with its samples widened to `f32`.
#[derive(Clone, Debug, PartialEq)]
pub struct VtkVolume {
    pub dimensions: Point3i,
    pub origin: Point3f,
    pub spacing: Point3f,
    pub scalar_name: String,
    /// The type the samples were stored as on disk.
    pub scalar_type: ScalarType,
    pub scalars: Vec<f32>,
}

impl VtkVolume {
    pub fn into_array(self) -> Array3<f32> {
        Array3::new(Extent3i::from_dimensions(self.dimensions), self.scalars)
    }
}

impl VolumeSource for VtkVolume {
    #[inline]
    fn dimensions(&self) -> Point3i {
        self.dimensions
    }

    #[inline]
    fn samples(&self) -> &[f32] {
        &self.scalars
    }
}

/// Opens and reads the file at `path`. See `read_vtk`.
pub fn load_vtk_file(path: impl AsRef<Path>, options: &VtkOptions) -> Result<VtkVolume, VtkError> {
    let path = path.as_ref();
    let span = tracing::info_span!("load_vtk_file", path = %path.display());
    let _trace_guard = span.enter();

    read_vtk(BufReader::new(File::open(path)?), options)
}

/// Reads a legacy structured points dataset. BINARY payloads are big-endian, ASCII payloads are
/// whitespace-separated numbers. Bytes past the last sample are ignored.
pub fn read_vtk(mut reader: impl BufRead, options: &VtkOptions) -> Result<VtkVolume, VtkError> {
    let header = read_header(&mut reader)?;
    tracing::debug!(
        "VTK {:?} title={:?} dimensions={:?} type={} components={}",
        header.encoding,
        header.title,
        header.dimensions.0,
        header.array.scalar_type.name(),
        header.array.components
    );

    let (count, byte_len) = header
        .payload_len()
        .ok_or_else(|| VtkError::MalformedHeader {
            line: 0,
            message: "payload size overflows".to_string(),
        })?;
    let values = match header.encoding {
        Encoding::Binary => {
            read_binary_payload(&mut reader, header.array.scalar_type, count, byte_len)?
        }
        Encoding::Ascii => read_ascii_payload(&mut reader, count)?,
    };

    let scalar_type = header.array.scalar_type;
    let scalars = values
        .into_iter()
        .step_by(header.array.components)
        .map(|v| {
            if options.narrow_to_byte {
                scalar_type.narrow_to_byte(v) as f32
            } else {
                v as f32
            }
        })
        .collect();

    Ok(VtkVolume {
        dimensions: header.dimensions,
        origin: header.origin,
        spacing: header.spacing,
        scalar_name: header.array.name,
        scalar_type,
        scalars,
    })
}

/// The buffer grows with what is actually read, so a header that promises more than the file holds
/// fails as a truncated payload.
fn read_binary_payload(
    reader: &mut impl Read,
    scalar_type: ScalarType,
    count: usize,
    expected: usize,
) -> Result<Vec<f64>, VtkError> {
    let mut bytes = Vec::new();
    reader.take(expected as u64).read_to_end(&mut bytes)?;
    if bytes.len() < expected {
        return Err(VtkError::TruncatedPayload {
            expected,
            found: bytes.len(),
        });
    }

    Ok(scalar_type.decode_big_endian(&bytes, count))
}

fn read_ascii_payload(reader: &mut impl Read, expected: usize) -> Result<Vec<f64>, VtkError> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;

    let mut values = Vec::new();
    for token in text.split_whitespace().take(expected) {
        let value = token
            .parse::<f64>()
            .map_err(|_| VtkError::InvalidNumber(token.to_string()))?;
        values.push(value);
    }
    if values.len() < expected {
        return Err(VtkError::TruncatedPayload {
            expected,
            found: values.len(),
        });
    }

    Ok(values)
}

// ████████╗███████╗███████╗████████╗███████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝
//    ██║   █████╗  ███████╗   ██║   ███████╗
//    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║
//    ██║   ███████╗███████║   ██║   ███████║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝
