//! The bytestream module forms the I/O subsystem of squeezer.
//!
//! Both directions work on a fixed working buffer. The reader hands the codec one
//! chunk at a time, and the writer accumulates output and dumps it to the sink before
//! it can overflow. Neither side knows anything about digrams.
//!
pub mod bytereader;
pub mod bytewriter;
