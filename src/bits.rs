//! Bit sequences: single codewords and whole encoded streams.
//!
//! Both render as strings of `0`s and `1`s and parse back from them.

use std::{fmt, str};

use bitvec::prelude::*;

use crate::error::ParseBitsError;

fn parse_bits(s: &str) -> Result<BitVec, ParseBitsError> {
    let mut bits = BitVec::with_capacity(s.len());
    for (position, found) in s.chars().enumerate() {
        match found {
            '0' => bits.push(false),
            '1' => bits.push(true),
            _ => return Err(ParseBitsError::NonBinary { position, found }),
        }
    }
    Ok(bits)
}

fn write_bits(bits: &BitSlice, f: &mut fmt::Formatter) -> fmt::Result {
    for bit in bits.iter().by_vals() {
        f.write_str(if bit { "1" } else { "0" })?;
    }
    Ok(())
}

/// bit-path of one symbol, read from the root (0 = left, 1 = right)
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Codeword {
    bits: BitVec,
}

impl Codeword {
    pub(crate) fn from_bits(bits: BitVec) -> Self {
        Codeword { bits }
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn bits(&self) -> &BitSlice {
        &self.bits
    }

    /// whether `other` starts with every digit of this codeword
    pub fn is_prefix_of(&self, other: &Codeword) -> bool {
        self.len() <= other.len()
            && self
                .bits
                .iter()
                .by_vals()
                .zip(other.bits.iter().by_vals())
                .all(|(a, b)| a == b)
    }
}

impl fmt::Display for Codeword {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write_bits(&self.bits, f)
    }
}

impl str::FromStr for Codeword {
    type Err = ParseBitsError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ParseBitsError::Empty);
        }
        parse_bits(s).map(Codeword::from_bits)
    }
}

/// concatenated codewords of a symbol sequence, in input order
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EncodedStream {
    bits: BitVec,
}

impl EncodedStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn bits(&self) -> &BitSlice {
        &self.bits
    }

    pub(crate) fn push_codeword(&mut self, codeword: &Codeword) {
        self.bits.extend_from_bitslice(codeword.bits());
    }
}

impl From<BitVec> for EncodedStream {
    fn from(bits: BitVec) -> Self {
        EncodedStream { bits }
    }
}

impl fmt::Display for EncodedStream {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write_bits(&self.bits, f)
    }
}

/// an empty string is a valid, empty stream
impl str::FromStr for EncodedStream {
    type Err = ParseBitsError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_bits(s).map(EncodedStream::from)
    }
}
