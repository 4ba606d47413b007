//! rsync-style rolling checksum, signature, and delta core.
//!
//! This crate implements the differencing half of the rsync algorithm: given a
//! [`Signature`] built from a reference byte stream A, and a second byte stream B, it
//! produces a compact delta instruction stream that, combined with A, reconstructs B.
//!
//! Patch application — consuming a delta and A to reproduce B — is intentionally not
//! part of this crate; embedding applications that need reconstruction own that step.
//!
//! ```
//! use rdelta::{compute_delta, signature, MagicNumber};
//! use std::io::Cursor;
//!
//! let reference = b"the quick brown fox jumps over the lazy dog";
//! let target = b"the quick brown fox leaps over a lazy dog";
//!
//! let mut sig_wire = Vec::new();
//! let sig = signature(Cursor::new(reference), &mut sig_wire, 8, 16, MagicNumber::Md4)?;
//!
//! let mut delta_wire = Vec::new();
//! compute_delta(&sig, Cursor::new(target), &mut delta_wire)?;
//! # Ok::<(), rdelta::Error>(())
//! ```

mod delta;
mod magic;
mod signature;
mod strong;

pub mod error;
pub mod rolling;

pub use delta::compute_delta;
pub use error::{Error, Result};
pub use magic::MagicNumber;
pub use signature::{Signature, read_signature, signature};

/// Reads up to `buf.len()` bytes, retrying on `Interrupted`, and returns the number of
/// bytes actually read before EOF. A short read only means EOF when it returns `0` at
/// the start of a framed field; callers that require an exact count enforce that
/// themselves (see [`signature::read_signature`]'s header parsing).
pub(crate) fn read_fill<R: std::io::Read>(
    reader: &mut R,
    buf: &mut [u8],
) -> std::io::Result<usize> {
    let mut total = 0;
    while total < buf.len() {
        match reader.read(&mut buf[total..]) {
            Ok(0) => break,
            Ok(n) => total += n,
            Err(ref e) if e.kind() == std::io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn read_fill_stops_at_eof_without_erroring() {
        let mut reader = Cursor::new(b"abc");
        let mut buf = [0u8; 8];
        let n = read_fill(&mut reader, &mut buf).unwrap();
        assert_eq!(n, 3);
        assert_eq!(&buf[..3], b"abc");
    }

    #[test]
    fn public_api_round_trips_a_small_edit() {
        let reference = b"the quick brown fox jumps over the lazy dog".repeat(3);
        let mut target = reference.clone();
        target[10] = b'!';

        let mut sig_wire = Vec::new();
        let sig = signature(
            Cursor::new(&reference),
            &mut sig_wire,
            16,
            32,
            MagicNumber::Blake2,
        )
        .unwrap();

        let parsed = read_signature(Cursor::new(&sig_wire)).unwrap();
        assert_eq!(parsed.block_count(), sig.block_count());

        let mut delta_wire = Vec::new();
        compute_delta(&sig, Cursor::new(&target), &mut delta_wire).unwrap();

        assert_eq!(
            u32::from_be_bytes(delta_wire[..4].try_into().unwrap()),
            MagicNumber::DELTA
        );
        assert_eq!(*delta_wire.last().unwrap(), 0); // OP_END
    }
}
