//! # huffman_code
//!
//! Builds a prefix-free binary code from the symbol frequencies of a sequence,
//! and uses it to turn the sequence into a bit string and back.
//!
//! ```rust
//! use huffman_code::Codec;
//!
//! let text = "abracadabra";
//! let codec = Codec::from_sequence(text.chars())?;
//! let encoded = codec.encode(text.chars())?;
//! let decoded: String = codec.decode(&encoded)?.into_iter().collect();
//! assert_eq!(decoded, text);
//! # Ok::<(), huffman_code::Error>(())
//! ```

pub mod bits;
pub mod code;
pub mod codec;
pub mod error;
pub mod frequency;
pub mod tree;

pub use bits::{Codeword, EncodedStream};
pub use code::CodeTable;
pub use codec::Codec;
pub use error::{Error, ParseBitsError, Result};
pub use frequency::{count_occurrences, FrequencyTable};
pub use tree::{Node, Tree};
