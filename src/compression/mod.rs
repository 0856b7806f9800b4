//! The compression module holds both directions of the squeezer codec.
//!
//! Encoding happens in the following steps:
//! - Frequency count: every adjacent byte pair (digram) of the source is counted into a
//!   table kept sorted by descending count.
//! - Dictionary selection: the 128 top ranked digrams get the codes 128..=255.
//! - Substitution: the source is read again and each dictionary digram is replaced by
//!   its code, greedily from left to right. Everything else is copied as is.
//!
//! The compressed file starts with a 256 byte header, the dictionary written as 128
//! pairs in code order, followed by the substituted body.
//!
//! Decoding reads the header back and expands each code byte of the body to its pair.
//! It needs no look ahead and no state between buffers.
//!

pub mod compress;
pub mod decompress;
