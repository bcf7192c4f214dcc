//! The text header of a legacy VTK structured points file.
//!
//! ```text
//! # vtk DataFile Version 3.0
//! any title
//! BINARY
//! DATASET STRUCTURED_POINTS
//! DIMENSIONS 256 256 128
//! ORIGIN 0 0 0
//! SPACING 1 1 1
//! POINT_DATA 8388608
//! SCALARS density unsigned_short 1
//! LOOKUP_TABLE default
//! <payload>
//! ```
//!
//! A `FIELD name count` line followed by an array line `name components tuples type` may take the
//! place of `SCALARS` and `LOOKUP_TABLE`. The payload starts on the line after whichever one ends
//! the header.

use crate::{ScalarType, VtkError};

use volume_bricks_core::prelude::*;

use std::io::BufRead;
use std::str::{FromStr, SplitWhitespace};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Encoding {
    Ascii,
    Binary,
}

/// The point data array that the payload holds.
#[derive(Clone, Debug, PartialEq)]
pub struct ArrayHeader {
    pub name: String,
    pub scalar_type: ScalarType,
    /// Values per point. Only the first component of each point is kept.
    pub components: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct VtkHeader {
    pub version: String,
    pub title: String,
    pub encoding: Encoding,
    pub dimensions: Point3i,
    pub origin: Point3f,
    pub spacing: Point3f,
    pub num_points: usize,
    pub array: ArrayHeader,
}

impl VtkHeader {
    /// The number of values and of binary bytes in the payload, or `None` if either overflows
    /// `usize`.
    pub fn payload_len(&self) -> Option<(usize, usize)> {
        let values = self.num_points.checked_mul(self.array.components)?;
        let bytes = values.checked_mul(self.array.scalar_type.byte_size())?;

        Some((values, bytes))
    }
}

/// Consumes the header from `reader`, leaving it positioned at the first byte of the payload.
pub fn read_header(reader: &mut impl BufRead) -> Result<VtkHeader, VtkError> {
    let mut lines = HeaderLines { reader, number: 0 };

    let version = lines.require("missing version line")?;
    let title = lines.require("missing title line")?;
    let format = lines.require("missing ASCII or BINARY line")?;
    let encoding = match format.trim().to_ascii_uppercase().as_str() {
        "ASCII" => Encoding::Ascii,
        "BINARY" => Encoding::Binary,
        _ => return Err(VtkError::UnsupportedFormat(format.trim().to_string())),
    };

    let mut dimensions = None;
    let mut origin = Point3f::ZERO;
    let mut spacing = Point3f::ONES;
    let mut num_points = None;
    let mut scalars: Option<ArrayHeader> = None;
    let mut array = None;
    let mut array_line = 0;

    while let Some(line) = lines.next()? {
        let line_number = lines.number;
        let mut tokens = line.split_whitespace();
        let keyword = match tokens.next() {
            Some(k) => k.to_ascii_uppercase(),
            None => continue,
        };

        match keyword.as_str() {
            "DATASET" => {
                let kind = parse_token::<String>(&mut tokens, line_number, "dataset type")?;
                if !kind.eq_ignore_ascii_case("STRUCTURED_POINTS") {
                    return Err(VtkError::UnsupportedFormat(kind));
                }
            }
            "DIMENSIONS" => {
                let dims = PointN(parse_triple::<i32>(&mut tokens, line_number)?);
                if !(dims > Point3i::ZERO) {
                    return Err(VtkError::MalformedHeader {
                        line: line_number,
                        message: format!("dimensions {:?} must all be positive", dims.0),
                    });
                }
                if dims.checked_volume().is_none() {
                    return Err(VtkError::MalformedHeader {
                        line: line_number,
                        message: format!("dimensions {:?} hold too many points", dims.0),
                    });
                }
                dimensions = Some(dims);
            }
            "ORIGIN" => origin = PointN(parse_triple::<f32>(&mut tokens, line_number)?),
            "SPACING" | "ASPECT_RATIO" => {
                spacing = PointN(parse_triple::<f32>(&mut tokens, line_number)?)
            }
            "POINT_DATA" => {
                num_points = Some(parse_token::<usize>(&mut tokens, line_number, "point count")?)
            }
            "SCALARS" => {
                let name = parse_token::<String>(&mut tokens, line_number, "scalar name")?;
                let scalar_type = parse_token::<String>(&mut tokens, line_number, "scalar type")?
                    .parse::<ScalarType>()?;
                let components = match tokens.next() {
                    Some(token) => parse_count(token, line_number)?,
                    None => 1,
                };
                array_line = line_number;
                scalars = Some(ArrayHeader {
                    name,
                    scalar_type,
                    components,
                });
            }
            "LOOKUP_TABLE" => {
                if let Some(scalars) = scalars.take() {
                    array = Some((scalars, None));
                    break;
                }
            }
            "FIELD" => {
                let array_line_text = lines.require("missing FIELD array line")?;
                let line_number = lines.number;
                array_line = line_number;
                let mut tokens = array_line_text.split_whitespace();
                let name = parse_token::<String>(&mut tokens, line_number, "array name")?;
                let components = parse_count(
                    &parse_token::<String>(&mut tokens, line_number, "component count")?,
                    line_number,
                )?;
                let tuples = parse_token::<usize>(&mut tokens, line_number, "tuple count")?;
                let scalar_type = parse_token::<String>(&mut tokens, line_number, "array type")?
                    .parse::<ScalarType>()?;
                array = Some((
                    ArrayHeader {
                        name,
                        scalar_type,
                        components,
                    },
                    Some(tuples),
                ));
                break;
            }
            // Cell data, comments and anything else before the point data are skipped.
            _ => {}
        }
    }

    let dimensions = dimensions.ok_or(VtkError::MissingDimensions)?;
    let expected = dimensions.volume_usize();

    let num_points = num_points.ok_or(VtkError::NoPointData)?;
    if num_points != expected {
        return Err(VtkError::PointCountMismatch {
            declared: num_points,
            expected,
        });
    }

    let (array, tuples) = array.ok_or(VtkError::NoPointData)?;
    if let Some(tuples) = tuples {
        if tuples != expected {
            return Err(VtkError::PointCountMismatch {
                declared: tuples,
                expected,
            });
        }
    }

    let header = VtkHeader {
        version: version.trim().to_string(),
        title: title.trim().to_string(),
        encoding,
        dimensions,
        origin,
        spacing,
        num_points,
        array,
    };
    if header.payload_len().is_none() {
        return Err(VtkError::MalformedHeader {
            line: array_line,
            message: format!(
                "{} points of {} components do not fit in memory",
                header.num_points, header.array.components
            ),
        });
    }

    Ok(header)
}

struct HeaderLines<'a, R> {
    reader: &'a mut R,
    number: usize,
}

impl<'a, R: BufRead> HeaderLines<'a, R> {
    fn next(&mut self) -> Result<Option<String>, VtkError> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        self.number += 1;

        Ok(Some(line.trim_end_matches(&['\r', '\n'][..]).to_string()))
    }

    fn require(&mut self, message: &str) -> Result<String, VtkError> {
        let number = self.number + 1;

        self.next()?.ok_or_else(|| VtkError::MalformedHeader {
            line: number,
            message: message.to_string(),
        })
    }
}

fn parse_token<T: FromStr>(
    tokens: &mut SplitWhitespace,
    line: usize,
    what: &str,
) -> Result<T, VtkError> {
    let token = tokens.next().ok_or_else(|| VtkError::MalformedHeader {
        line,
        message: format!("missing {}", what),
    })?;

    token.parse().map_err(|_| VtkError::MalformedHeader {
        line,
        message: format!("invalid {} {:?}", what, token),
    })
}

fn parse_triple<T: FromStr>(tokens: &mut SplitWhitespace, line: usize) -> Result<[T; 3], VtkError> {
    let x = parse_token(tokens, line, "x component")?;
    let y = parse_token(tokens, line, "y component")?;
    let z = parse_token(tokens, line, "z component")?;

    Ok([x, y, z])
}

fn parse_count(token: &str, line: usize) -> Result<usize, VtkError> {
    match token.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(VtkError::MalformedHeader {
            line,
            message: format!("invalid component count {:?}", token),
        }),
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
    use std::io::{Cursor, Read};

    fn parse(text: &str) -> Result<VtkHeader, VtkError> {
        read_header(&mut Cursor::new(text.as_bytes()))
    }

    #[test]
    fn scalars_header_leaves_reader_at_payload() {
        let text = "# vtk DataFile Version 3.0\n\
                    head scan\n\
                    BINARY\n\
                    DATASET STRUCTURED_POINTS\n\
                    DIMENSIONS 4 3 2\n\
                    ORIGIN 1 2 3\n\
                    SPACING 0.5 0.5 2\n\
                    POINT_DATA 24\n\
                    SCALARS density short\n\
                    LOOKUP_TABLE default\n\
                    PAYLOAD";
        let mut reader = Cursor::new(text.as_bytes());

        let header = read_header(&mut reader).unwrap();

        assert_eq!(
            header,
            VtkHeader {
                version: "# vtk DataFile Version 3.0".to_string(),
                title: "head scan".to_string(),
                encoding: Encoding::Binary,
                dimensions: PointN([4, 3, 2]),
                origin: PointN([1.0, 2.0, 3.0]),
                spacing: PointN([0.5, 0.5, 2.0]),
                num_points: 24,
                array: ArrayHeader {
                    name: "density".to_string(),
                    scalar_type: ScalarType::Short,
                    components: 1,
                },
            }
        );

        let mut rest = String::new();
        reader.read_to_string(&mut rest).unwrap();
        assert_eq!(rest, "PAYLOAD");
    }

    #[test]
    fn field_header_reads_array_line() {
        let header = parse(
            "# vtk DataFile Version 2.0\r\n\
             t\r\n\
             ASCII\r\n\
             DIMENSIONS 2 2 2\r\n\
             POINT_DATA 8\r\n\
             FIELD FieldData 1\r\n\
             pressure 1 8 double\r\n",
        )
        .unwrap();

        assert_eq!(header.encoding, Encoding::Ascii);
        assert_eq!(header.spacing, Point3f::ONES);
        assert_eq!(header.array.name, "pressure");
        assert_eq!(header.array.scalar_type, ScalarType::Double);
    }

    #[test]
    fn rejects_unknown_encoding() {
        let result = parse("# vtk\nt\nXML\nDIMENSIONS 1 1 1\n");

        assert!(matches!(result, Err(VtkError::UnsupportedFormat(f)) if f == "XML"));
    }

    #[test]
    fn rejects_other_datasets() {
        let result = parse("# vtk\nt\nASCII\nDATASET POLYDATA\n");

        assert!(matches!(result, Err(VtkError::UnsupportedFormat(f)) if f == "POLYDATA"));
    }

    #[test]
    fn missing_pieces() {
        assert!(matches!(
            parse("# vtk\nt\nASCII\nPOINT_DATA 8\n"),
            Err(VtkError::MissingDimensions)
        ));
        assert!(matches!(
            parse("# vtk\nt\nASCII\nDIMENSIONS 2 2 2\nSCALARS s float\nLOOKUP_TABLE default\n"),
            Err(VtkError::NoPointData)
        ));
        assert!(matches!(
            parse("# vtk\nt\nASCII\nDIMENSIONS 2 2 2\nPOINT_DATA 8\n"),
            Err(VtkError::NoPointData)
        ));
        assert!(matches!(
            parse("# vtk\nt\n"),
            Err(VtkError::MalformedHeader { line: 3, .. })
        ));
    }

    #[test]
    fn point_count_must_match_dimensions() {
        let result = parse("# vtk\nt\nASCII\nDIMENSIONS 2 2 2\nPOINT_DATA 7\n");

        assert!(matches!(
            result,
            Err(VtkError::PointCountMismatch {
                declared: 7,
                expected: 8
            })
        ));
    }

    #[test]
    fn unsupported_scalar_type() {
        let result = parse("# vtk\nt\nASCII\nDIMENSIONS 1 1 1\nPOINT_DATA 1\nSCALARS s bit\n");

        assert!(matches!(result, Err(VtkError::UnsupportedDataType(t)) if t == "bit"));
    }

    #[test]
    fn malformed_dimensions() {
        let result = parse("# vtk\nt\nASCII\nDIMENSIONS 2 two 2\n");

        assert!(matches!(result, Err(VtkError::MalformedHeader { line: 4, .. })));

        let result = parse("# vtk\nt\nASCII\n\nDIMENSIONS 2 0 2\n");
        assert!(matches!(result, Err(VtkError::MalformedHeader { line: 5, .. })));
    }

    #[test]
    fn dimensions_past_usize_are_malformed() {
        let result = parse("# vtk\nt\nASCII\nDIMENSIONS 2147483647 2147483647 2147483647\n");

        assert!(matches!(result, Err(VtkError::MalformedHeader { line: 4, .. })));
    }

    #[test]
    fn payload_size_past_usize_is_malformed() {
        let result = parse(
            "# vtk\nt\nBINARY\nDIMENSIONS 1 1 1\nPOINT_DATA 1\n\
             SCALARS s double 18446744073709551615\nLOOKUP_TABLE default\n",
        );
        assert!(matches!(result, Err(VtkError::MalformedHeader { line: 6, .. })));

        let header = parse(
            "# vtk\nt\nBINARY\nDIMENSIONS 1 1 1\nPOINT_DATA 1\n\
             SCALARS s double 3\nLOOKUP_TABLE default\n",
        )
        .unwrap();
        assert_eq!(header.payload_len(), Some((3, 24)));
    }
}
