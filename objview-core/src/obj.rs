/// Wavefront OBJ reader for vertex (`v`) and face (`f`) records
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::{debug, info, warn};
use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{digit1, multispace1},
    combinator::{eof, map_res, peek},
    number::complete::float,
    sequence::{preceded, terminated},
    IResult,
};

use crate::error::{ObjError, Result};
use crate::geometry::{Extrema, Mesh};

const EXTENSION: &str = ".obj";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Record {
    Vertex,
    Face,
}

/// Classify a line by its two-byte prefix. Lines shorter than two bytes
/// match nothing.
fn classify(line: &[u8]) -> Option<Record> {
    match line {
        [b'v', b' ', ..] => Some(Record::Vertex),
        [b'f', b' ', ..] => Some(Record::Face),
        _ => None,
    }
}

/// Parse an OBJ file into a [`Mesh`].
///
/// The path must end in the literal, case-sensitive suffix `.obj`; this is
/// checked before the filesystem is touched. The file is read twice: once
/// to count records, once to fill the buffers. Any failure discards the
/// partially built mesh.
pub fn parse(path: impl AsRef<Path>) -> Result<Mesh> {
    let path = path.as_ref();
    let result = parse_file(path);
    match &result {
        Ok(mesh) => {
            info!(
                "Loaded {}: {} vertices, {} facets",
                path.display(),
                mesh.vertex_count(),
                mesh.facets_count()
            );
            let e = mesh.extrema();
            debug!(
                "Bounds: [{:.3}, {:.3}, {:.3}] to [{:.3}, {:.3}, {:.3}]",
                e.min_x, e.min_y, e.min_z, e.max_x, e.max_y, e.max_z
            );
        }
        Err(err) => warn!("{err}"),
    }
    result
}

fn parse_file(path: &Path) -> Result<Mesh> {
    check_extension(path)?;

    let (vertex_count, facets_count) = count_records(path)?;
    debug!(
        "Count pass over {}: {} vertex lines, {} face lines",
        path.display(),
        vertex_count,
        facets_count
    );

    let mut vertices = vec![0.0; vertex_count as usize * 3];
    // Capacity only; faces contribute one index per corner, whatever their arity.
    let mut edges = Vec::with_capacity(facets_count as usize * 3);
    let mut extrema = Extrema::default();
    let mut offset = 0;

    for (number, line) in read_lines(path)? {
        let line = line?;
        match classify(&line) {
            Some(Record::Vertex) => {
                let position = parse_vertex_line(decode(&line, number)?, number)?;
                // The file may have grown between passes.
                let slot = vertices.get_mut(offset..offset + 3).ok_or_else(|| {
                    ObjError::malformed(number, "more vertex records than counted")
                })?;
                slot.copy_from_slice(&position);
                extrema.include(position);
                offset += 3;
            }
            Some(Record::Face) => parse_face_line(decode(&line, number)?, number, &mut edges)?,
            None => {}
        }
    }

    Ok(Mesh::from_parts(
        vertices,
        edges,
        vertex_count,
        facets_count,
        extrema,
    ))
}

fn check_extension(path: &Path) -> Result<()> {
    if path.to_string_lossy().ends_with(EXTENSION) {
        Ok(())
    } else {
        Err(ObjError::InvalidExtension {
            path: path.to_path_buf(),
        })
    }
}

fn count_records(path: &Path) -> Result<(u32, u32)> {
    let mut vertex_count = 0;
    let mut facets_count = 0;
    for (_, line) in read_lines(path)? {
        match classify(&line?) {
            Some(Record::Vertex) => vertex_count += 1,
            Some(Record::Face) => facets_count += 1,
            None => {}
        }
    }
    Ok((vertex_count, facets_count))
}

/// Open `path` and yield `(line number, raw line)` pairs with the line
/// terminator (`\n` or `\r\n`) removed. Lines are kept as bytes so records
/// that are skipped never need to be valid UTF-8. The handle is closed when
/// the iterator is dropped.
fn read_lines(path: &Path) -> Result<impl Iterator<Item = (usize, Result<Vec<u8>>)> + '_> {
    let file = File::open(path).map_err(|source| ObjError::FileOpen {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = BufReader::new(file);
    let mut number = 0;
    let mut failed = false;

    Ok(std::iter::from_fn(move || {
        if failed {
            return None;
        }
        let mut buf = Vec::new();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => None,
            Ok(_) => {
                number += 1;
                if buf.last() == Some(&b'\n') {
                    buf.pop();
                }
                if buf.last() == Some(&b'\r') {
                    buf.pop();
                }
                Some((number, Ok(buf)))
            }
            Err(source) => {
                failed = true;
                Some((
                    number + 1,
                    Err(ObjError::Read {
                        path: path.to_path_buf(),
                        source,
                    }),
                ))
            }
        }
    }))
}

/// Text of a `v` or `f` record
fn decode(line: &[u8], number: usize) -> Result<&str> {
    std::str::from_utf8(line)
        .map_err(|_| ObjError::malformed(number, "record is not valid UTF-8"))
}

fn parse_vertex_line(line: &str, number: usize) -> Result<[f32; 3]> {
    match parse_vertex(line) {
        Ok((_, position)) => Ok(position),
        Err(_) => {
            let found = line[1..].split_whitespace().take(3).count();
            let reason = if found < 3 {
                format!("expected 3 coordinates, found {found}")
            } else {
                format!("invalid coordinate in `{line}`")
            };
            Err(ObjError::malformed(number, reason))
        }
    }
}

fn parse_vertex(input: &str) -> IResult<&str, [f32; 3]> {
    let (input, _) = tag("v")(input)?;
    let (input, x) = coordinate(input)?;
    let (input, y) = coordinate(input)?;
    let (input, z) = coordinate(input)?;
    Ok((input, [x, y, z]))
}

/// One whitespace-separated float. The whole token must be numeric: a
/// trailing suffix such as `1.0x` is rejected rather than read as `1.0`.
fn coordinate(input: &str) -> IResult<&str, f32> {
    preceded(multispace1, terminated(float, peek(alt((multispace1, eof)))))(input)
}

fn face_index(input: &str) -> IResult<&str, u32> {
    map_res(digit1, |digits: &str| digits.parse::<u32>())(input)
}

/// Append one zero-based index for every digit run that directly follows a
/// space. Anything after a `/` in a corner (texture and normal references)
/// is skipped because it does not follow a space.
fn parse_face_line(line: &str, number: usize, edges: &mut Vec<u32>) -> Result<()> {
    let bytes = line.as_bytes();
    let mut i = 1;
    while i < bytes.len() {
        if bytes[i].is_ascii_digit() && bytes[i - 1] == b' ' {
            let (rest, index) = face_index(&line[i..]).map_err(|_| {
                ObjError::malformed(number, format!("face index out of range in `{line}`"))
            })?;
            let index = index
                .checked_sub(1)
                .ok_or_else(|| ObjError::malformed(number, "face indices are 1-based"))?;
            edges.push(index);
            i = line.len() - rest.len();
        } else {
            i += 1;
        }
    }
    Ok(())
}
