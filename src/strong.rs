//! The strong-hash adapter: a truncated cryptographic digest, dispatched on [`MagicNumber`].

use blake2::Blake2b;
use blake2::digest::consts::U32;
use digest::Digest;
use md4::Md4;

use crate::error::{Error, Result};
use crate::magic::MagicNumber;

type Blake2b256 = Blake2b<U32>;

/// Native digest size of MD4, in bytes.
pub const MD4_LEN: u32 = 16;
/// Native digest size of BLAKE2b-256, in bytes.
pub const BLAKE2_LEN: u32 = 32;

/// The largest `strongLen` this algorithm's native digest supports.
pub(crate) fn max_strong_len(sig_type: MagicNumber) -> Result<u32> {
    match sig_type {
        MagicNumber::Md4 => Ok(MD4_LEN),
        MagicNumber::Blake2 => Ok(BLAKE2_LEN),
        MagicNumber::Delta => Err(Error::BadMagic(sig_type.to_u32())),
    }
}

/// Hashes `data` with the algorithm named by `sig_type`, truncated to `strong_len` bytes.
pub(crate) fn strong_sum(data: &[u8], sig_type: MagicNumber, strong_len: u32) -> Result<Vec<u8>> {
    let strong_len = strong_len as usize;
    match sig_type {
        MagicNumber::Md4 => {
            let digest = Md4::digest(data);
            Ok(digest[..strong_len].to_vec())
        }
        MagicNumber::Blake2 => {
            let digest = Blake2b256::digest(data);
            Ok(digest[..strong_len].to_vec())
        }
        MagicNumber::Delta => Err(Error::BadMagic(sig_type.to_u32())),
    }
}
