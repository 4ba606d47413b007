//! The wire-level magic numbers that tag signature and delta streams.

use crate::error::Error;

/// Identifies a signature's strong-hash algorithm, or tags a delta stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MagicNumber {
    /// Signature built with MD4 as the strong hash.
    Md4,
    /// Signature built with BLAKE2b-256 as the strong hash.
    Blake2,
    /// Header tag of a delta instruction stream.
    Delta,
}

impl MagicNumber {
    /// `SIG_MD4` — a signature file with MD4 strong sums.
    pub const SIG_MD4: u32 = 0x7273_0136;
    /// `SIG_BLAKE` — a signature file with BLAKE2b strong sums.
    pub const SIG_BLAKE: u32 = 0x7273_0137;
    /// `DELTA` — the header of a delta instruction stream.
    pub const DELTA: u32 = 0x7273_0236;

    /// The big-endian wire representation of this tag.
    #[must_use]
    pub const fn to_u32(self) -> u32 {
        match self {
            Self::Md4 => Self::SIG_MD4,
            Self::Blake2 => Self::SIG_BLAKE,
            Self::Delta => Self::DELTA,
        }
    }
}

impl TryFrom<u32> for MagicNumber {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            Self::SIG_MD4 => Ok(Self::Md4),
            Self::SIG_BLAKE => Ok(Self::Blake2),
            Self::DELTA => Ok(Self::Delta),
            other => Err(Error::BadMagic(other)),
        }
    }
}
