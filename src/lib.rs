//! Squeezer, a streaming digram substitution codec for text files.
//!
//! Compresses 7-bit data by finding the most frequent adjacent byte pairs of the input
//! and giving each of up to 128 of them a single byte code from the upper half of the
//! byte range. The dictionary travels in a fixed 256 byte header at the start of the
//! compressed file.
//!
//! Basic usage to compress a file is as follows:
//!
//! `$> squeezer enc notes.txt notes.sqz`
//!
//! and to get it back:
//!
//! `$> squeezer dec notes.sqz notes.txt`
//!
//! Input bytes of 128 or more collide with the dictionary codes and are refused.
//!
pub mod bytestream;
pub mod compression;
pub mod error;
pub mod tools;

pub use compression::compress::{encode, encode_bytes, encode_file, encode_with, EncodeReport};
pub use compression::decompress::{check_file, decode, decode_bytes, decode_file, DecodeReport};
pub use error::{Result, SqueezeError};
pub use tools::dictionary::Dictionary;
pub use tools::freq_table::{FreqTable, PairEntry};
pub use tools::options::CodecOptions;
