//! Errors reported while building a code or encoding/decoding with it.

use thiserror::Error;

/// Failures of the Huffman pipeline
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// there were no symbols to build a tree from
    #[error("cannot build a Huffman tree from an empty alphabet")]
    EmptyAlphabet,

    /// the symbol at `position` has no codeword in the table
    #[error("symbol at position {position} has no codeword")]
    UnknownSymbol {
        /// index of the offending symbol in the input sequence
        position: usize,
    },

    /// the stream ended in the middle of a codeword
    #[error("encoded stream ends with {trailing_bits} bit(s) of an incomplete codeword")]
    TruncatedStream {
        /// digits consumed since the last complete symbol
        trailing_bits: usize,
    },

    /// the digit at `position` leads nowhere in the tree
    #[error("digit at position {position} does not match any branch of the tree")]
    CorruptStream {
        /// index of the offending digit in the stream
        position: usize,
    },
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Rejected textual bit strings
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseBitsError {
    /// a codeword needs at least one digit
    #[error("empty codeword")]
    Empty,

    /// there is something other than 0s and 1s in the string
    #[error("non-binary character {found:?} at position {position}")]
    NonBinary { position: usize, found: char },
}
