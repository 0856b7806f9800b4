use log::debug;
use rustc_hash::FxHashMap;

use super::freq_table::{FreqTable, CHARACTER_OFFSET};

/// Maximum number of digrams we can keep, one per reserved byte value.
pub const LIMIT_DICTIONARY: usize = 128;
/// Size of the compressed file header: one (byte0, byte1) per dictionary slot.
pub const HEADER_SIZE: usize = LIMIT_DICTIONARY * 2;

/// The frozen index -> digram mapping shared by encoder and decoder.
#[derive(Clone, Debug)]
pub struct Dictionary {
    slots: [(u8, u8); LIMIT_DICTIONARY],
    /// Number of live slots. Everything past this is zero padding.
    live: usize,
    /// Pair -> index lookup over the live slots. Lower index wins on duplicates.
    index: FxHashMap<(u8, u8), u8>,
}

impl Dictionary {
    fn from_slots(slots: [(u8, u8); LIMIT_DICTIONARY], live: usize) -> Self {
        let mut index = FxHashMap::default();
        for (idx, &pair) in slots[..live].iter().enumerate() {
            index.entry(pair).or_insert(idx as u8);
        }
        Self { slots, live, index }
    }

    /// Take the top ranked entries of the table, padding unused slots with (0, 0).
    pub fn select(table: &FreqTable) -> Self {
        let mut slots = [(0_u8, 0_u8); LIMIT_DICTIONARY];
        let live = table.len().min(LIMIT_DICTIONARY);
        for (slot, entry) in slots.iter_mut().zip(table.entries()) {
            *slot = entry.pair();
        }
        debug!("Selected {} digrams for the dictionary.", live);
        Self::from_slots(slots, live)
    }

    /// Rebuild the dictionary from a compressed file header. Trailing (0, 0) slots are
    /// treated as padding.
    pub fn from_header(header: &[u8; HEADER_SIZE]) -> Self {
        let mut slots = [(0_u8, 0_u8); LIMIT_DICTIONARY];
        for (slot, raw) in slots.iter_mut().zip(header.chunks_exact(2)) {
            *slot = (raw[0], raw[1]);
        }
        let live = slots
            .iter()
            .rposition(|&pair| pair != (0, 0))
            .map_or(0, |last| last + 1);
        Self::from_slots(slots, live)
    }

    /// Serialize all 128 slots in index order.
    pub fn header(&self) -> [u8; HEADER_SIZE] {
        let mut header = [0_u8; HEADER_SIZE];
        for (raw, &(byte0, byte1)) in header.chunks_exact_mut(2).zip(self.slots.iter()) {
            raw[0] = byte0;
            raw[1] = byte1;
        }
        header
    }

    /// Code byte for a digram, if it is in the dictionary.
    pub fn code(&self, byte0: u8, byte1: u8) -> Option<u8> {
        self.index
            .get(&(byte0, byte1))
            .map(|&idx| idx + CHARACTER_OFFSET)
    }

    /// The digram a code byte stands for. `code` must be >= 128.
    pub fn expand(&self, code: u8) -> (u8, u8) {
        self.slots[(code - CHARACTER_OFFSET) as usize]
    }

    /// Digram in slot `idx`.
    pub fn slot(&self, idx: usize) -> (u8, u8) {
        self.slots[idx]
    }

    /// Number of live (non padding) slots.
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn select_pads_with_zeros() {
        let mut table = FreqTable::new();
        table.observe(None, b"aaaa", 0).unwrap();
        let dict = Dictionary::select(&table);
        assert_eq!(dict.len(), 1);
        assert_eq!(dict.slot(0), (b'a', b'a'));
        let header = dict.header();
        assert_eq!(&header[..2], b"aa");
        assert!(header[2..].iter().all(|&b| b == 0));
        assert_eq!(dict.code(0, 0), None);
        assert_eq!(dict.code(b'a', b'a'), Some(128));
    }

    #[test]
    fn select_keeps_only_top_ranked() {
        let mut table = FreqTable::new();
        // 200 distinct pairs, the later ones seen more often
        for i in 0..200_u32 {
            let pair = ((i / 100) as u8, (i % 100) as u8);
            for _ in 0..=(i / 50) {
                table.update(pair.0, pair.1).unwrap();
            }
        }
        let dict = Dictionary::select(&table);
        assert_eq!(dict.len(), LIMIT_DICTIONARY);
        for idx in 0..LIMIT_DICTIONARY {
            assert_eq!(dict.slot(idx), table.entries()[idx].pair());
            let (b0, b1) = dict.slot(idx);
            assert_eq!(dict.code(b0, b1), Some(idx as u8 + 128));
        }
        // The least frequent (seen once) pairs did not make the cut
        assert_eq!(dict.code(0, 0), None);
    }

    #[test]
    fn header_round_trip() {
        let mut table = FreqTable::new();
        table
            .observe(None, b"Making a silly test. Making a silly test.", 0)
            .unwrap();
        let dict = Dictionary::select(&table);
        let parsed = Dictionary::from_header(&dict.header());
        assert_eq!(parsed.len(), dict.len());
        for code in 128..=255_u8 {
            assert_eq!(parsed.expand(code), dict.expand(code));
        }
    }

    #[test]
    fn empty_header() {
        let dict = Dictionary::from_header(&[0; HEADER_SIZE]);
        assert!(dict.is_empty());
        assert_eq!(dict.expand(255), (0, 0));
    }
}
