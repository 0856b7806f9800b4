//! The tools module provides the building blocks for the squeezer codec.
//!
//! The tools are:
//! - cli: Command line interface for squeezer.
//! - dictionary: The 128 slot digram dictionary and its file header.
//! - freq_table: Digram frequency table, kept sorted by count.
//! - options: Settings shared by every codec operation.
//! - staging: Write output files through a temporary file.
//!
pub mod cli;
pub mod dictionary;
pub mod freq_table;
pub mod options;
pub mod staging;
