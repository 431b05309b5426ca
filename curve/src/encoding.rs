//! ZCash-style serialization of G2 points.
//!
//! Coordinates are written big-endian as `c1 || c0`. The three most
//! significant bits of the first byte carry metadata: compression, infinity,
//! and (compressed only) whether Y is the lexicographically largest root.
//! Decoding checks canonical coordinates but never curve or subgroup
//! membership; callers that need those call `is_on_curve`/`is_in_subgroup`.

use rayon::prelude::*;

use crate::error::EncodingError;
use crate::fp::Fp;
use crate::fp2::Fp2;
use crate::g2::{G2Affine, B_TWIST};

/// Byte size of a compressed G2 point.
pub const SIZE_OF_G2_COMPRESSED: usize = 48 * 2;

/// Byte size of an uncompressed G2 point.
pub const SIZE_OF_G2_UNCOMPRESSED: usize = SIZE_OF_G2_COMPRESSED * 2;

const FP_BYTES: usize = 48;

const M_MASK: u8 = 0b111 << 5;
const M_UNCOMPRESSED: u8 = 0b000 << 5;
const M_UNCOMPRESSED_INFINITY: u8 = 0b010 << 5;
const M_COMPRESSED_SMALLEST: u8 = 0b100 << 5;
const M_COMPRESSED_LARGEST: u8 = 0b101 << 5;
const M_COMPRESSED_INFINITY: u8 = 0b110 << 5;

fn write_fp2(out: &mut [u8], e: &Fp2) {
    e.c1.write_bytes_be(&mut out[..FP_BYTES]);
    e.c0.write_bytes_be(&mut out[FP_BYTES..2 * FP_BYTES]);
}

/// Reads `c1 || c0`; the metadata bits must already be cleared.
fn read_fp2(buf: &[u8]) -> Result<Fp2, EncodingError> {
    let c1 = Fp::from_bytes_be(&buf[..FP_BYTES])?;
    let c0 = Fp::from_bytes_be(&buf[FP_BYTES..2 * FP_BYTES])?;
    Ok(Fp2::new(c0, c1))
}

/// Copies the X bytes with metadata stripped.
fn strip_metadata(buf: &[u8]) -> [u8; SIZE_OF_G2_COMPRESSED] {
    let mut x = [0u8; SIZE_OF_G2_COMPRESSED];
    x.copy_from_slice(&buf[..SIZE_OF_G2_COMPRESSED]);
    x[0] &= !M_MASK;
    x
}

fn check_infinity_payload(buf: &[u8], len: usize) -> Result<(), EncodingError> {
    let payload_is_zero = buf[0] & !M_MASK == 0 && buf[1..len].iter().all(|b| *b == 0);
    if payload_is_zero {
        Ok(())
    } else {
        Err(EncodingError::NonZeroInfinity)
    }
}

/// Recovers Y from X and the sign carried by the metadata.
fn compute_y(x: &Fp2, m_data: u8) -> Result<Fp2, EncodingError> {
    let y_squared = x.square() * *x + B_TWIST;
    let y = Option::<Fp2>::from(y_squared.sqrt()).ok_or(EncodingError::NoSquareRoot)?;

    let largest = y.lexicographically_largest();
    let y = match (largest, m_data) {
        (true, M_COMPRESSED_SMALLEST) | (false, M_COMPRESSED_LARGEST) => -y,
        _ => y,
    };
    Ok(y)
}

impl G2Affine {
    /// Compressed encoding (`Bytes`): X and a sign bit for Y.
    pub fn to_compressed(&self) -> [u8; SIZE_OF_G2_COMPRESSED] {
        let mut res = [0u8; SIZE_OF_G2_COMPRESSED];
        if self.is_infinity() {
            res[0] = M_COMPRESSED_INFINITY;
            return res;
        }

        let msb_mask = if self.y.lexicographically_largest() {
            M_COMPRESSED_LARGEST
        } else {
            M_COMPRESSED_SMALLEST
        };
        write_fp2(&mut res, &self.x);
        res[0] |= msb_mask;
        res
    }

    /// Uncompressed encoding (`RawBytes`): both coordinates.
    pub fn to_uncompressed(&self) -> [u8; SIZE_OF_G2_UNCOMPRESSED] {
        let mut res = [0u8; SIZE_OF_G2_UNCOMPRESSED];
        if self.is_infinity() {
            res[0] = M_UNCOMPRESSED_INFINITY;
            return res;
        }

        write_fp2(&mut res[..SIZE_OF_G2_COMPRESSED], &self.x);
        write_fp2(&mut res[SIZE_OF_G2_COMPRESSED..], &self.y);
        res[0] |= M_UNCOMPRESSED;
        res
    }

    /// Decodes either encoding (`SetBytes`) and returns the point with the
    /// number of bytes consumed. Extra trailing bytes are ignored.
    pub fn from_bytes(buf: &[u8]) -> Result<(Self, usize), EncodingError> {
        if buf.len() < SIZE_OF_G2_COMPRESSED {
            return Err(EncodingError::ShortBuffer {
                needed: SIZE_OF_G2_COMPRESSED,
                actual: buf.len(),
            });
        }

        let m_data = buf[0] & M_MASK;
        match m_data {
            M_UNCOMPRESSED | M_UNCOMPRESSED_INFINITY => {
                if buf.len() < SIZE_OF_G2_UNCOMPRESSED {
                    return Err(EncodingError::ShortBuffer {
                        needed: SIZE_OF_G2_UNCOMPRESSED,
                        actual: buf.len(),
                    });
                }
            }
            M_COMPRESSED_SMALLEST | M_COMPRESSED_LARGEST | M_COMPRESSED_INFINITY => {}
            other => return Err(EncodingError::InvalidMetadata(other >> 5)),
        }

        if m_data == M_COMPRESSED_INFINITY {
            check_infinity_payload(buf, SIZE_OF_G2_COMPRESSED)?;
            return Ok((Self::INFINITY, SIZE_OF_G2_COMPRESSED));
        }
        if m_data == M_UNCOMPRESSED_INFINITY {
            check_infinity_payload(buf, SIZE_OF_G2_UNCOMPRESSED)?;
            return Ok((Self::INFINITY, SIZE_OF_G2_UNCOMPRESSED));
        }

        let x = read_fp2(&strip_metadata(buf))?;

        if m_data == M_UNCOMPRESSED {
            let y = read_fp2(&buf[SIZE_OF_G2_COMPRESSED..SIZE_OF_G2_UNCOMPRESSED])?;
            return Ok((G2Affine::new(x, y), SIZE_OF_G2_UNCOMPRESSED));
        }

        let y = compute_y(&x, m_data)?;
        Ok((G2Affine::new(x, y), SIZE_OF_G2_COMPRESSED))
    }

    /// Decodes a compressed encoding without curve or subgroup checks.
    pub fn from_compressed_unchecked(
        buf: &[u8; SIZE_OF_G2_COMPRESSED],
    ) -> Result<Self, EncodingError> {
        let m_data = buf[0] & M_MASK;
        if m_data & M_COMPRESSED_SMALLEST == 0 {
            return Err(EncodingError::InvalidMetadata(m_data >> 5));
        }
        Self::from_bytes(buf).map(|(p, _)| p)
    }

    /// Decodes many compressed points. X coordinates are parsed first, then
    /// the square roots run in parallel.
    pub fn decode_compressed_batch(
        bufs: &[[u8; SIZE_OF_G2_COMPRESSED]],
    ) -> Result<Vec<Self>, EncodingError> {
        // step 1: metadata and X, cheap and serial
        let mut pending = Vec::with_capacity(bufs.len());
        for buf in bufs {
            let m_data = buf[0] & M_MASK;
            match m_data {
                M_COMPRESSED_INFINITY => {
                    check_infinity_payload(buf, SIZE_OF_G2_COMPRESSED)?;
                    pending.push(None);
                }
                M_COMPRESSED_SMALLEST | M_COMPRESSED_LARGEST => {
                    let x = read_fp2(&strip_metadata(buf))?;
                    pending.push(Some((x, m_data)));
                }
                other => return Err(EncodingError::InvalidMetadata(other >> 5)),
            }
        }

        tracing::debug!(points = bufs.len(), "decoding compressed G2 points");

        // step 2: Y coordinates, compute intensive
        pending
            .into_par_iter()
            .map(|entry| match entry {
                None => Ok(G2Affine::INFINITY),
                Some((x, m_data)) => compute_y(&x, m_data).map(|y| G2Affine::new(x, y)),
            })
            .collect()
    }
}
