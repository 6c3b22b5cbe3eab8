//! Binary STL decoding.
//!
//! Layout (little-endian):
//!
//! | bytes         | contents                                   |
//! |---------------|--------------------------------------------|
//! | 0..80         | header, ignored                            |
//! | 80..84        | `u32` triangle count `N`                   |
//! | 84 + 50*i ... | normal (ignored), v0, v1, v2, attribute u16 |

use byteorder::{ByteOrder, LittleEndian};
use nalgebra::Point3;
use tracing::debug;

use crate::detect::HEADER_LEN;
use crate::error::{MeshError, MeshResult};

/// Offset of the first triangle record.
pub const BODY_OFFSET: usize = HEADER_LEN + 4;

/// Size of one triangle record.
pub const RECORD_LEN: usize = 50;

/// Offset of `v0` within a record; the 12-byte facet normal precedes it.
const VERTEX_OFFSET: usize = 12;

/// Read the triangle count declared in the header.
pub fn declared_triangle_count(bytes: &[u8]) -> MeshResult<u32> {
    if bytes.len() < BODY_OFFSET {
        return Err(MeshError::TruncatedInput {
            declared_triangles: 0,
            expected_len: BODY_OFFSET as u64,
            actual_len: bytes.len() as u64,
        });
    }
    Ok(LittleEndian::read_u32(&bytes[HEADER_LEN..BODY_OFFSET]))
}

/// Decode a binary STL into a position buffer of `3 * N` points.
///
/// `N` is taken from the header. If the buffer cannot hold `N` records the
/// decode fails with [`MeshError::TruncatedInput`]; bytes past the last record
/// are ignored.
pub fn decode_binary(bytes: &[u8]) -> MeshResult<Vec<Point3<f32>>> {
    let declared = declared_triangle_count(bytes)?;
    let expected_len = BODY_OFFSET as u64 + declared as u64 * RECORD_LEN as u64;

    if (bytes.len() as u64) < expected_len {
        return Err(MeshError::TruncatedInput {
            declared_triangles: declared,
            expected_len,
            actual_len: bytes.len() as u64,
        });
    }

    let count = declared as usize;
    let body = &bytes[BODY_OFFSET..BODY_OFFSET + count * RECORD_LEN];

    let mut positions = Vec::with_capacity(count * 3);
    for record in body.chunks_exact(RECORD_LEN) {
        let corners = &record[VERTEX_OFFSET..VERTEX_OFFSET + 36];
        for vertex in corners.chunks_exact(12) {
            positions.push(Point3::new(
                LittleEndian::read_f32(&vertex[0..4]),
                LittleEndian::read_f32(&vertex[4..8]),
                LittleEndian::read_f32(&vertex[8..12]),
            ));
        }
    }

    debug!(
        "Binary STL: {} triangles, {} trailing bytes ignored",
        count,
        bytes.len() as u64 - expected_len
    );

    Ok(positions)
}
