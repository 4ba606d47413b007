//! The delta scanner and encoder (component C4): a content-defined matcher over the
//! target stream that emits a coalesced instruction stream against a [`Signature`].

use std::collections::VecDeque;
use std::io::{BufReader, Read, Write};

use crate::error::Result;
use crate::magic::MagicNumber;
use crate::read_fill;
use crate::rolling::RollingChecksum;
use crate::signature::Signature;
use crate::strong;

const OP_END: u8 = 0;
const OP_LIT_BASE: u8 = 65;
const OP_COPY_BASE: u8 = 69;

/// Smallest unsigned width (1, 2, 4, or 8 bytes) that represents `n`.
fn size_of(n: u64) -> u8 {
    if n <= u64::from(u8::MAX) {
        1
    } else if n <= u64::from(u16::MAX) {
        2
    } else if n <= u64::from(u32::MAX) {
        4
    } else {
        8
    }
}

/// Maps a width in `{1, 2, 4, 8}` to its `0..4` index in the opcode table.
const fn width_index(width: u8) -> u8 {
    match width {
        1 => 0,
        2 => 1,
        4 => 2,
        _ => 3,
    }
}

fn write_be<W: Write>(out: &mut W, n: u64, width: u8) -> Result<()> {
    match width {
        1 => out.write_all(&[n as u8])?,
        2 => out.write_all(&(n as u16).to_be_bytes())?,
        4 => out.write_all(&(n as u32).to_be_bytes())?,
        _ => out.write_all(&n.to_be_bytes())?,
    }
    Ok(())
}

/// The coalescing accumulator `M`: at most one pending run, flushed to the wire only
/// when a new instruction of a different (or non-contiguous) kind arrives.
enum Pending {
    None,
    Literal(Vec<u8>),
    Copy { pos: u64, len: u64 },
}

struct Encoder<W: Write> {
    out: W,
    pending: Pending,
}

impl<W: Write> Encoder<W> {
    fn new(out: W) -> Self {
        Self {
            out,
            pending: Pending::None,
        }
    }

    fn literal(&mut self, b: u8) -> Result<()> {
        match &mut self.pending {
            Pending::Literal(buf) => buf.push(b),
            Pending::None => self.pending = Pending::Literal(vec![b]),
            Pending::Copy { .. } => {
                self.flush()?;
                self.pending = Pending::Literal(vec![b]);
            }
        }
        Ok(())
    }

    fn copy(&mut self, pos: u64, len: u64) -> Result<()> {
        match &mut self.pending {
            Pending::Copy {
                pos: p,
                len: existing_len,
            } if *p + *existing_len == pos => {
                *existing_len += len;
            }
            Pending::None => {
                self.pending = Pending::Copy { pos, len };
            }
            _ => {
                self.flush()?;
                self.pending = Pending::Copy { pos, len };
            }
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        match std::mem::replace(&mut self.pending, Pending::None) {
            Pending::None => {}
            Pending::Literal(bytes) => {
                let width = size_of(bytes.len() as u64);
                self.out
                    .write_all(&[OP_LIT_BASE + width_index(width)])?;
                write_be(&mut self.out, bytes.len() as u64, width)?;
                self.out.write_all(&bytes)?;
            }
            Pending::Copy { pos, len } => {
                let pos_width = size_of(pos);
                let len_width = size_of(len);
                let opcode =
                    OP_COPY_BASE + width_index(pos_width) * 4 + width_index(len_width);
                self.out.write_all(&[opcode])?;
                write_be(&mut self.out, pos, pos_width)?;
                write_be(&mut self.out, len, len_width)?;
            }
        }
        Ok(())
    }

    fn finish(mut self) -> Result<()> {
        self.flush()?;
        self.out.write_all(&[OP_END])?;
        Ok(())
    }
}

/// Scans `input` against `sig` and writes the framed delta instruction stream to
/// `output`: literal runs where no match was found, coalesced copy runs where it was.
///
/// # Errors
/// Returns [`crate::Error::Io`] if reading from `input` or writing to `output` fails.
pub fn compute_delta<R: Read, W: Write>(sig: &Signature, input: R, mut output: W) -> Result<()> {
    output.write_all(&MagicNumber::Delta.to_u32().to_be_bytes())?;

    let block_len = sig.block_len() as usize;
    let mut input = BufReader::new(input);
    let mut encoder = Encoder::new(&mut output);

    let mut window: VecDeque<u8> = VecDeque::with_capacity(block_len);
    let mut rolling = RollingChecksum::new();

    let mut matched_bytes: u64 = 0;
    let mut false_positives: u64 = 0;
    let mut total_bytes: u64 = 0;

    let mut byte = [0u8; 1];
    loop {
        let n = read_fill(&mut input, &mut byte)?;
        if n == 0 {
            break;
        }
        total_bytes += 1;
        let incoming = byte[0];

        if window.len() == block_len {
            let outgoing = *window.front().expect("window is full");
            encoder.literal(outgoing)?;
            window.pop_front();
            rolling.roll_out(outgoing);
        }

        window.push_back(incoming);
        rolling.roll_in(incoming);

        if window.len() < block_len {
            continue;
        }

        if let Some(block_idx) = sig.block_for_weak(rolling.digest()) {
            let current = window.make_contiguous();
            let candidate = strong::strong_sum(current, sig.sig_type(), sig.strong_len())?;
            if candidate.as_slice() == sig.strong_at(block_idx) {
                let pos = block_idx as u64 * block_len as u64;
                encoder.copy(pos, block_len as u64)?;
                matched_bytes += block_len as u64;
                window.clear();
                rolling.reset();
            } else {
                false_positives += 1;
                log::trace!(
                    "weak-hash hit at block {block_idx} was a false positive (strong mismatch)"
                );
            }
        }
    }

    for b in window {
        encoder.literal(b)?;
    }
    encoder.finish()?;

    log::debug!(
        "delta: {total_bytes} bytes scanned, {matched_bytes} matched, {false_positives} false positives"
    );

    Ok(())
}
