use std::fs::File;
use std::io::{Cursor, Read, Seek, SeekFrom, Write};
use std::path::Path;

use log::{debug, info, trace};

use crate::bytestream::bytereader::ByteReader;
use crate::bytestream::bytewriter::ByteWriter;
use crate::error::{Result, SqueezeError, SOURCE_LABEL};
use crate::tools::dictionary::{Dictionary, HEADER_SIZE};
use crate::tools::freq_table::{check_literals, FreqTable};
use crate::tools::options::CodecOptions;
use crate::tools::staging::staged;

/*
    Encoding makes two passes over the source.

    The first pass counts every digram of the logical byte stream into the frequency
    table, and the top 128 entries become the dictionary. The second pass writes the
    dictionary header and then walks the stream again, greedily replacing each
    dictionary digram with its code byte.

    The source is read a buffer at a time. A digram may straddle two buffers, so the
    last byte of a buffer is held back (the carry) whenever it was not consumed by a
    pair, and it is paired with the first byte of the next buffer.
*/

/// What an encode pass did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodeReport {
    /// Bytes read from the source.
    pub read: u64,
    /// Body bytes written, header excluded.
    pub written: u64,
    /// Number of live dictionary slots.
    pub dictionary: usize,
}

impl EncodeReport {
    /// Compression score, final body size over initial size. Zero for an empty source.
    pub fn score(&self) -> f64 {
        if self.read == 0 {
            0.0
        } else {
            self.written as f64 / self.read as f64
        }
    }
}

/// Encode `source` into `sink`. The source is read twice, so it has to be seekable.
pub fn encode<R: Read + Seek, W: Write>(
    mut source: R,
    sink: W,
    opts: &CodecOptions,
) -> Result<EncodeReport> {
    info!("Building the frequency table.");
    let (table, total) = FreqTable::from_reader(&mut source, opts.buffer_size)?;
    let dictionary = Dictionary::select(&table);
    // We don't need the table anymore
    drop(table);

    source
        .seek(SeekFrom::Start(0))
        .map_err(|e| SqueezeError::input(SOURCE_LABEL, e))?;

    info!("Encoding {} bytes.", total);
    encode_with(&dictionary, source, sink, opts)
}

/// Write the header of `dictionary` followed by `source` with every dictionary digram
/// substituted.
pub fn encode_with<R: Read, W: Write>(
    dictionary: &Dictionary,
    source: R,
    sink: W,
    opts: &CodecOptions,
) -> Result<EncodeReport> {
    let mut br = ByteReader::new(source, opts.buffer_size);
    let mut bw = ByteWriter::new(sink, opts.buffer_size);
    bw.put_block(&dictionary.header())?;

    let mut carry = None;
    let mut offset = 0;
    while let Some(chunk) = br.chunk()? {
        check_literals(chunk, offset)?;
        carry = encode_chunk(dictionary, carry, chunk, &mut bw)?;
        offset += chunk.len() as u64;
    }
    // Nothing left to pair the last byte with
    if let Some(last) = carry {
        bw.out8(last)?;
    }
    bw.flush()?;

    let report = EncodeReport {
        read: offset,
        written: bw.total() - HEADER_SIZE as u64,
        dictionary: dictionary.len(),
    };
    debug!(
        "Read {} bytes, wrote {} body bytes with {} digrams.",
        report.read, report.written, report.dictionary
    );
    Ok(report)
}

/// Substitute one buffer of data. `carry` is the pending last byte of the previous
/// buffer. Returns the new pending byte, if the last byte of this buffer was not
/// consumed.
pub fn encode_chunk<W: Write>(
    dictionary: &Dictionary,
    carry: Option<u8>,
    chunk: &[u8],
    bw: &mut ByteWriter<W>,
) -> Result<Option<u8>> {
    let mut idx = 0;
    if let Some(pending) = carry {
        let next = match chunk.first() {
            Some(&next) => next,
            None => return Ok(Some(pending)),
        };
        match dictionary.code(pending, next) {
            Some(code) => {
                trace!("Digram across buffers matched code {}.", code);
                bw.out8(code)?;
                idx = 1;
            }
            None => bw.out8(pending)?,
        }
    }

    while idx + 1 < chunk.len() {
        match dictionary.code(chunk[idx], chunk[idx + 1]) {
            Some(code) => {
                bw.out8(code)?;
                idx += 2;
            }
            None => {
                bw.out8(chunk[idx])?;
                idx += 1;
            }
        }
    }
    Ok(chunk.get(idx).copied())
}

/// Encode an in-memory buffer. Returns the compressed file and its score.
pub fn encode_bytes(data: &[u8], opts: &CodecOptions) -> Result<(Vec<u8>, f64)> {
    let mut out = Vec::with_capacity(HEADER_SIZE + data.len());
    let report = encode(Cursor::new(data), &mut out, opts)?;
    Ok((out, report.score()))
}

/// Encode the file at `input` into a new file at `output`. The output only appears once
/// everything was written; an existing output is replaced only when `force` is set.
pub fn encode_file(
    input: &Path,
    output: &Path,
    opts: &CodecOptions,
    force: bool,
) -> Result<EncodeReport> {
    info!("Compressing {} into {}.", input.display(), output.display());
    let fin = File::open(input).map_err(|e| SqueezeError::input(input.display().to_string(), e))?;
    staged(output, force, |fout| encode(&fin, fout, opts))
        .map_err(|e| e.with_paths(input, output))
}
