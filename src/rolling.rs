//! The weak rolling checksum: an Adler-style sum over a sliding byte window, O(1) to slide.
//!
//! This is the historical librsync rolling checksum: natural 16-bit wraparound with a
//! `CHAR_OFFSET` term folded into every byte, not the prime-modulus Adler-32 some texts
//! describe. Wire compatibility with existing signature/delta streams depends on that.

/// Added to every byte before it is folded into the running sums.
pub const CHAR_OFFSET: u16 = 31;

/// A weak checksum over a conceptual sliding window.
///
/// The checksum does not retain the window's bytes; callers that need to roll a byte out
/// are responsible for remembering it (see [`crate::delta`]'s ring buffer).
#[derive(Debug, Clone, Default)]
pub struct RollingChecksum {
    s1: u16,
    s2: u16,
    count: u64,
}

impl RollingChecksum {
    /// A fresh checksum over an empty window.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The current 32-bit digest: `(s2 << 16) | s1`.
    #[must_use]
    pub const fn digest(&self) -> u32 {
        ((self.s2 as u32) << 16) | (self.s1 as u32)
    }

    /// Rolls one byte into the window.
    pub fn roll_in(&mut self, b: u8) {
        self.s1 = self.s1.wrapping_add(u16::from(b)).wrapping_add(CHAR_OFFSET);
        self.s2 = self.s2.wrapping_add(self.s1);
        self.count += 1;
    }

    /// Rolls one byte out of the window. `b` must be the byte that entered the window
    /// least recently among those still counted.
    pub fn roll_out(&mut self, b: u8) {
        let term = u16::from(b).wrapping_add(CHAR_OFFSET);
        self.s1 = self.s1.wrapping_sub(term);
        self.s2 = self.s2.wrapping_sub((self.count as u16).wrapping_mul(term));
        self.count -= 1;
    }

    /// Resets to the empty-window state.
    pub fn reset(&mut self) {
        self.s1 = 0;
        self.s2 = 0;
        self.count = 0;
    }

    /// Folds an entire slice into the checksum in one call. Produces the same result as
    /// rolling every byte in individually via [`Self::roll_in`].
    ///
    /// The inner loop is unrolled 16-wide and defers the `CHAR_OFFSET` contribution to a
    /// single closed-form correction at the end, rather than paying it per byte.
    pub fn update(&mut self, data: &[u8]) {
        let mut chunks = data.chunks_exact(16);
        for chunk in &mut chunks {
            for &b in chunk {
                self.s1 = self.s1.wrapping_add(u16::from(b));
                self.s2 = self.s2.wrapping_add(self.s1);
            }
        }
        for &b in chunks.remainder() {
            self.s1 = self.s1.wrapping_add(u16::from(b));
            self.s2 = self.s2.wrapping_add(self.s1);
        }

        let len = data.len();
        let offset = usize::from(CHAR_OFFSET);
        let s1_correction = len.wrapping_mul(offset) as u16;
        let s2_correction = (len.wrapping_mul(len + 1) / 2).wrapping_mul(offset) as u16;
        self.s1 = self.s1.wrapping_add(s1_correction);
        self.s2 = self.s2.wrapping_add(s2_correction);
        self.count += len as u64;
    }

    /// Computes the digest of a standalone byte slice from a fresh state.
    #[must_use]
    pub fn compute(data: &[u8]) -> u32 {
        let mut sum = Self::new();
        sum.update(data);
        sum.digest()
    }
}
