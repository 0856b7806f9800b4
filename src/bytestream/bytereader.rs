//! ByteReader: chunked input for the squeezer codec.
//!
//! Reads the source a working buffer at a time. Each call to `chunk()` hands out the
//! next slice of fresh data; the codec never sees how the OS actually split the reads.
//!
//! NOTE: This module can read from any I/O source that supports the read() call.
//!

use std::io::{ErrorKind, Read};

use log::trace;

use crate::error::{Result, SqueezeError, SOURCE_LABEL};

/// Reads a source stream in chunks of at most `buffer.len()` bytes.
#[derive(Debug)]
pub struct ByteReader<R> {
    buffer: Vec<u8>,
    source: R,
    /// Total bytes handed out so far, header included.
    consumed: u64,
}

impl<R: Read> ByteReader<R> {
    /// Creates a new ByteReader with a working buffer of `buffer_size` bytes (at least 1).
    pub fn new(source: R, buffer_size: usize) -> Self {
        Self {
            buffer: vec![0; buffer_size.max(1)],
            source,
            consumed: 0,
        }
    }

    /// Read once into the buffer, retrying interrupted reads. Returns the byte count.
    fn fill(&mut self, start: usize) -> Result<usize> {
        loop {
            match self.source.read(&mut self.buffer[start..]) {
                Ok(size) => return Ok(size),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(SqueezeError::input(SOURCE_LABEL, e)),
            }
        }
    }

    /// Return the next chunk of data, or None when the source is exhausted.
    pub fn chunk(&mut self) -> Result<Option<&[u8]>> {
        let size = self.fill(0)?;
        if size == 0 {
            return Ok(None);
        }
        self.consumed += size as u64;
        trace!("Read a chunk of {} bytes.", size);
        Ok(Some(&self.buffer[..size]))
    }

    /// Read exactly N bytes, tolerating short reads. If the stream ends first, the
    /// Err carries how many bytes were found.
    pub fn exact<const N: usize>(&mut self) -> Result<std::result::Result<[u8; N], usize>> {
        let mut out = [0_u8; N];
        let mut found = 0;
        while found < N {
            let want = (N - found).min(self.buffer.len());
            let size = loop {
                match self.source.read(&mut self.buffer[..want]) {
                    Ok(size) => break size,
                    Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                    Err(e) => return Err(SqueezeError::input(SOURCE_LABEL, e)),
                }
            };
            if size == 0 {
                self.consumed += found as u64;
                return Ok(Err(found));
            }
            out[found..found + size].copy_from_slice(&self.buffer[..size]);
            found += size;
        }
        self.consumed += N as u64;
        Ok(Ok(out))
    }

    /// Total number of bytes handed out so far.
    pub fn consumed(&self) -> u64 {
        self.consumed
    }

    /// Give back the underlying source.
    pub fn into_inner(self) -> R {
        self.source
    }
}
