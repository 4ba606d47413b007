//! The signature builder and reader (component C3): partitions a reference stream into
//! fixed-size blocks and materialises the `weak -> block` index the delta scanner probes.

use std::collections::HashMap;
use std::io::{Read, Write};

use crate::error::{Error, Result};
use crate::magic::MagicNumber;
use crate::read_fill;
use crate::rolling::RollingChecksum;
use crate::strong;

/// An in-memory index over a reference stream: a weak-digest lookup table backed by a
/// per-block strong digest, built once and consulted read-only by every subsequent
/// [`crate::compute_delta`] call.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Signature {
    sig_type: MagicNumber,
    block_len: u32,
    strong_len: u32,
    strong_sigs: Vec<Vec<u8>>,
    weak2block: HashMap<u32, usize>,
}

impl Signature {
    /// The strong-hash algorithm this signature was built with.
    #[must_use]
    pub const fn sig_type(&self) -> MagicNumber {
        self.sig_type
    }

    /// The block size A was partitioned into.
    #[must_use]
    pub const fn block_len(&self) -> u32 {
        self.block_len
    }

    /// The truncation length of the strong digests.
    #[must_use]
    pub const fn strong_len(&self) -> u32 {
        self.strong_len
    }

    /// The number of blocks in the reference stream this signature describes.
    #[must_use]
    pub fn block_count(&self) -> usize {
        self.strong_sigs.len()
    }

    /// The block index reachable via a weak digest, if any. The lookup is always
    /// single-valued: on a weak-digest collision during build, only the first block is
    /// reachable (see the module-level docs on [`Signature`]).
    pub(crate) fn block_for_weak(&self, weak: u32) -> Option<usize> {
        self.weak2block.get(&weak).copied()
    }

    /// The stored strong digest for block `index`.
    pub(crate) fn strong_at(&self, index: usize) -> &[u8] {
        &self.strong_sigs[index]
    }

    fn insert(&mut self, weak: u32, strong: Vec<u8>) {
        let index = self.strong_sigs.len();
        self.weak2block.entry(weak).or_insert(index);
        self.strong_sigs.push(strong);
    }
}

/// Builds a [`Signature`] over `input`, writing the framed wire format to `output` as it
/// goes, and returns the in-memory index for immediate use.
///
/// # Errors
/// Returns [`Error::BadParameter`] if `sig_type` is not a signature algorithm or
/// `strong_len` exceeds its native digest size, or [`Error::Io`] if reading or writing
/// fails.
pub fn signature<R: Read, W: Write>(
    mut input: R,
    mut output: W,
    block_len: u32,
    strong_len: u32,
    sig_type: MagicNumber,
) -> Result<Signature> {
    let max = strong::max_strong_len(sig_type)?;
    if strong_len > max {
        return Err(Error::BadParameter { strong_len, max });
    }

    output.write_all(&sig_type.to_u32().to_be_bytes())?;
    output.write_all(&block_len.to_be_bytes())?;
    output.write_all(&strong_len.to_be_bytes())?;

    let mut sig = Signature {
        sig_type,
        block_len,
        strong_len,
        strong_sigs: Vec::new(),
        weak2block: HashMap::new(),
    };

    let mut block = vec![0u8; block_len as usize];
    loop {
        let n = read_fill(&mut input, &mut block)?;
        if n == 0 {
            break;
        }
        let data = &block[..n];

        let weak = RollingChecksum::compute(data);
        let strong = strong::strong_sum(data, sig_type, strong_len)?;

        output.write_all(&weak.to_be_bytes())?;
        output.write_all(&strong)?;

        sig.insert(weak, strong);
    }

    log::debug!(
        "built signature: {} blocks of {block_len} bytes, strong_len={strong_len}",
        sig.block_count()
    );

    Ok(sig)
}

/// Parses a [`Signature`] previously written by [`signature`].
///
/// # Errors
/// Returns [`Error::BadMagic`] if the header names an unrecognized algorithm, or
/// [`Error::Truncated`] if any framed field stops short of its declared length.
pub fn read_signature<R: Read>(mut reader: R) -> Result<Signature> {
    let sig_type = MagicNumber::try_from(read_header_u32(&mut reader)?)?;
    let block_len = read_header_u32(&mut reader)?;
    let strong_len = read_header_u32(&mut reader)?;

    let mut sig = Signature {
        sig_type,
        block_len,
        strong_len,
        strong_sigs: Vec::new(),
        weak2block: HashMap::new(),
    };

    loop {
        let mut weak_buf = [0u8; 4];
        let n = read_fill(&mut reader, &mut weak_buf)?;
        if n == 0 {
            break;
        }
        if n < 4 {
            return Err(Error::Truncated {
                expected: 4,
                actual: n,
            });
        }
        let weak = u32::from_be_bytes(weak_buf);

        let mut strong = vec![0u8; strong_len as usize];
        let sn = read_fill(&mut reader, &mut strong)?;
        if sn != strong.len() {
            return Err(Error::Truncated {
                expected: strong.len(),
                actual: sn,
            });
        }

        sig.insert(weak, strong);
    }

    Ok(sig)
}

/// Reads a required u32 header field, treating any short read (including a clean EOF
/// before the first byte) as truncation rather than a legitimate end of stream.
fn read_header_u32<R: Read>(reader: &mut R) -> Result<u32> {
    let mut buf = [0u8; 4];
    let n = read_fill(reader, &mut buf)?;
    if n != 4 {
        return Err(Error::Truncated {
            expected: 4,
            actual: n,
        });
    }
    Ok(u32::from_be_bytes(buf))
}
