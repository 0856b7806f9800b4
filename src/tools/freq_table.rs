use std::io::Read;

use log::{debug, trace};
use rustc_hash::FxHashMap;

use crate::bytestream::bytereader::ByteReader;
use crate::error::{Result, SqueezeError};

/// Bytes at or above this value are reserved for dictionary codes.
pub const CHARACTER_OFFSET: u8 = 128;

/// One observed digram and how often it has been seen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PairEntry {
    pub byte0: u8,
    pub byte1: u8,
    pub count: u64,
    /// Position in the table, 0 = most frequent.
    pub rank: usize,
}

impl PairEntry {
    pub fn pair(&self) -> (u8, u8) {
        (self.byte0, self.byte1)
    }
}

/// Digram frequency table, always sorted by descending count. Ties keep the order in
/// which the entries reached that count.
#[derive(Debug, Default)]
pub struct FreqTable {
    entries: Vec<PairEntry>,
    /// Current position of every pair in `entries`.
    positions: FxHashMap<(u8, u8), usize>,
}

impl FreqTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one more occurrence of (byte0, byte1) and restore the ordering.
    pub fn update(&mut self, byte0: u8, byte1: u8) -> Result<()> {
        let mut pos = match self.positions.get(&(byte0, byte1)).copied() {
            Some(pos) => pos,
            None => {
                let rank = self.entries.len();
                self.entries
                    .try_reserve(1)
                    .map_err(|_| SqueezeError::AllocationFailure { entries: rank })?;
                self.positions.insert((byte0, byte1), rank);
                self.entries.push(PairEntry {
                    byte0,
                    byte1,
                    count: 1,
                    rank,
                });
                return Ok(());
            }
        };

        self.entries[pos].count += 1;
        // Move it forward while it strictly beats the one ahead. Ties stay put.
        while pos > 0 && self.entries[pos].count > self.entries[pos - 1].count {
            self.entries.swap(pos, pos - 1);
            self.entries[pos].rank = pos;
            self.positions.insert(self.entries[pos].pair(), pos);
            pos -= 1;
        }
        self.entries[pos].rank = pos;
        self.positions.insert((byte0, byte1), pos);
        Ok(())
    }

    /// Count every digram in `chunk`, including the one formed with `previous`, the last
    /// byte of the preceding chunk. `offset` is the stream position of `chunk[0]`.
    /// Returns the new last byte.
    pub fn observe(&mut self, previous: Option<u8>, chunk: &[u8], offset: u64) -> Result<Option<u8>> {
        check_literals(chunk, offset)?;
        let first = match chunk.first() {
            Some(&b) => b,
            None => return Ok(previous),
        };
        if let Some(last) = previous {
            self.update(last, first)?;
        }
        for pair in chunk.windows(2) {
            self.update(pair[0], pair[1])?;
        }
        Ok(chunk.last().copied())
    }

    /// Build the table over a whole stream, reading it `buffer_size` bytes at a time.
    pub fn from_reader<R: Read>(source: R, buffer_size: usize) -> Result<(Self, u64)> {
        let mut table = FreqTable::new();
        let mut br = ByteReader::new(source, buffer_size);
        let mut previous = None;
        let mut offset = 0;
        while let Some(chunk) = br.chunk()? {
            previous = table.observe(previous, chunk, offset)?;
            offset += chunk.len() as u64;
            trace!("Counted {} bytes, {} distinct digrams.", offset, table.len());
        }
        debug!(
            "Frequency table holds {} distinct digrams over {} bytes.",
            table.len(),
            offset
        );
        Ok((table, offset))
    }

    /// Entries in rank order.
    pub fn entries(&self) -> &[PairEntry] {
        &self.entries
    }

    /// Current entry for a pair, if it has been seen.
    pub fn get(&self, byte0: u8, byte1: u8) -> Option<&PairEntry> {
        self.positions
            .get(&(byte0, byte1))
            .map(|&pos| &self.entries[pos])
    }

    /// Current rank of a pair, if it has been seen.
    pub fn rank(&self, byte0: u8, byte1: u8) -> Option<usize> {
        self.positions.get(&(byte0, byte1)).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Reject any byte that collides with the dictionary code space.
pub(crate) fn check_literals(chunk: &[u8], offset: u64) -> Result<()> {
    match chunk.iter().position(|&b| b >= CHARACTER_OFFSET) {
        Some(idx) => Err(SqueezeError::ReservedByte {
            offset: offset + idx as u64,
            byte: chunk[idx],
        }),
        None => Ok(()),
    }
}
