//! `expand_message_xmd` over SHA-256 and `hash_to_field` for `Fp`
//! (RFC 9380, sections 5.2 and 5.3.1).

use curve::Fp;
use sha2::{Digest, Sha256};

use crate::errors::HashToCurveError;

/// Input block size of SHA-256.
const B_IN_BYTES: usize = 64;
/// Output size of SHA-256.
const B_OUT_BYTES: usize = 32;
/// Bytes per field element: `ceil((ceil(log2(q)) + k) / 8)` with `k = 128`.
pub const L: usize = 64;

/// Expands `msg` into `len_in_bytes` uniform bytes bound to `dst`.
pub fn expand_message_xmd(
    msg: &[u8],
    dst: &[u8],
    len_in_bytes: usize,
) -> Result<Vec<u8>, HashToCurveError> {
    if dst.len() > 255 {
        return Err(HashToCurveError::DstTooLong(dst.len()));
    }
    let ell = len_in_bytes.div_ceil(B_OUT_BYTES);
    if ell > 255 || len_in_bytes > u16::MAX as usize {
        return Err(HashToCurveError::OutputTooLong(len_in_bytes));
    }

    let dst_len = [dst.len() as u8];
    let b_0 = Sha256::new()
        .chain_update([0u8; B_IN_BYTES])
        .chain_update(msg)
        .chain_update((len_in_bytes as u16).to_be_bytes())
        .chain_update([0u8])
        .chain_update(dst)
        .chain_update(dst_len)
        .finalize();

    let mut b_i = Sha256::new()
        .chain_update(b_0.as_slice())
        .chain_update([1u8])
        .chain_update(dst)
        .chain_update(dst_len)
        .finalize();

    let mut uniform_bytes = Vec::with_capacity(ell * B_OUT_BYTES);
    uniform_bytes.extend_from_slice(&b_i);
    for i in 2..=ell {
        let mut xored = [0u8; B_OUT_BYTES];
        for (x, (a, b)) in xored.iter_mut().zip(b_0.iter().zip(b_i.iter())) {
            *x = a ^ b;
        }
        b_i = Sha256::new()
            .chain_update(xored)
            .chain_update([i as u8])
            .chain_update(dst)
            .chain_update(dst_len)
            .finalize();
        uniform_bytes.extend_from_slice(&b_i);
    }
    uniform_bytes.truncate(len_in_bytes);
    Ok(uniform_bytes)
}

/// Hashes `msg` to `count` elements of `Fp`, each reduced from `L` bytes.
pub fn hash_to_field(msg: &[u8], dst: &[u8], count: usize) -> Result<Vec<Fp>, HashToCurveError> {
    let uniform_bytes = expand_message_xmd(msg, dst, count * L)?;
    Ok(uniform_bytes
        .chunks_exact(L)
        .map(Fp::from_bytes_wide_be)
        .collect())
}
