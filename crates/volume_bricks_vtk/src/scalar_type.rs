use crate::VtkError;

use bytemuck::Pod;
use std::str::FromStr;

/// The element types a VTK scalar or field array can hold.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ScalarType {
    UnsignedChar,
    Char,
    UnsignedShort,
    Short,
    UnsignedInt,
    Int,
    Float,
    Double,
}

impl ScalarType {
    pub fn byte_size(self) -> usize {
        match self {
            Self::UnsignedChar | Self::Char => 1,
            Self::UnsignedShort | Self::Short => 2,
            Self::UnsignedInt | Self::Int | Self::Float => 4,
            Self::Double => 8,
        }
    }

    pub fn is_integer(self) -> bool {
        !matches!(self, Self::Float | Self::Double)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::UnsignedChar => "unsigned_char",
            Self::Char => "char",
            Self::UnsignedShort => "unsigned_short",
            Self::Short => "short",
            Self::UnsignedInt => "unsigned_int",
            Self::Int => "int",
            Self::Float => "float",
            Self::Double => "double",
        }
    }

    /// Decodes `count` big-endian values from the front of `bytes`.
    ///
    /// `bytes` must hold at least `count * self.byte_size()` bytes.
    pub fn decode_big_endian(self, bytes: &[u8], count: usize) -> Vec<f64> {
        match self {
            Self::UnsignedChar => bytes[..count].iter().map(|&v| v as f64).collect(),
            Self::Char => bytes[..count].iter().map(|&v| v as i8 as f64).collect(),
            Self::UnsignedShort => map_pod(bytes, count, |v: u16| u16::from_be(v) as f64),
            Self::Short => map_pod(bytes, count, |v: i16| i16::from_be(v) as f64),
            Self::UnsignedInt => map_pod(bytes, count, |v: u32| u32::from_be(v) as f64),
            Self::Int => map_pod(bytes, count, |v: i32| i32::from_be(v) as f64),
            Self::Float => map_pod(bytes, count, |v: u32| f32::from_bits(u32::from_be(v)) as f64),
            Self::Double => map_pod(bytes, count, |v: u64| f64::from_bits(u64::from_be(v))),
        }
    }

    /// Reduces `value` to an unsigned byte. Integers keep their low byte, floating point values
    /// saturate to `[0, 255]`.
    pub fn narrow_to_byte(self, value: f64) -> u8 {
        if self.is_integer() {
            value as i64 as u8
        } else {
            value as u8
        }
    }
}

/// Copies `count` values of `T` out of an unaligned byte buffer and converts each one.
fn map_pod<T: Pod>(bytes: &[u8], count: usize, convert: impl Fn(T) -> f64) -> Vec<f64> {
    let mut values = vec![T::zeroed(); count];
    let byte_len = count * std::mem::size_of::<T>();
    bytemuck::cast_slice_mut::<T, u8>(&mut values).copy_from_slice(&bytes[..byte_len]);

    values.into_iter().map(convert).collect()
}

impl FromStr for ScalarType {
    type Err = VtkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let scalar_type = match s.to_ascii_lowercase().as_str() {
            "unsigned_char" | "uint8" | "vtktypeuint8" => Self::UnsignedChar,
            "char" | "int8" | "vtktypeint8" => Self::Char,
            "unsigned_short" | "uint16" | "vtktypeuint16" => Self::UnsignedShort,
            "short" | "int16" | "vtktypeint16" => Self::Short,
            "unsigned_int" | "uint32" | "vtktypeuint32" => Self::UnsignedInt,
            "int" | "int32" | "vtktypeint32" => Self::Int,
            "float" | "float32" | "vtktypefloat32" => Self::Float,
            "double" | "float64" | "vtktypefloat64" => Self::Double,
            _ => return Err(VtkError::UnsupportedDataType(s.to_string())),
        };

        Ok(scalar_type)
    }
}

// ████████╗███████╗███████╗████████╗███████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝
//    ██║   █████╗  ███████╗   ██║   ███████╗
//    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║
//    ██║   ███████╗███████║   ██║   ███████║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝
