use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;

use log::{debug, error, info};

use crate::bytestream::bytereader::ByteReader;
use crate::bytestream::bytewriter::ByteWriter;
use crate::error::{Result, SqueezeError};
use crate::tools::dictionary::{Dictionary, HEADER_SIZE};
use crate::tools::freq_table::CHARACTER_OFFSET;
use crate::tools::options::CodecOptions;
use crate::tools::staging::staged;

/// What a decode pass did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodeReport {
    /// Body bytes read, header excluded.
    pub read: u64,
    /// Bytes written after expansion.
    pub written: u64,
    /// Number of live dictionary slots found in the header.
    pub dictionary: usize,
}

/// Decode a compressed stream. Nothing is written to `sink` unless a complete header
/// could be read.
pub fn decode<R: Read, W: Write>(
    source: R,
    sink: W,
    opts: &CodecOptions,
) -> Result<DecodeReport> {
    let mut br = ByteReader::new(source, opts.buffer_size);
    let header = match br.exact::<HEADER_SIZE>()? {
        Ok(header) => header,
        Err(found) => {
            error!(
                "Impossible to find the dictionary: read {} bytes instead of {}.",
                found, HEADER_SIZE
            );
            return Err(SqueezeError::InvalidHeader {
                found,
                expected: HEADER_SIZE,
            });
        }
    };
    let dictionary = Dictionary::from_header(&header);
    debug!("Found {} digrams in the header.", dictionary.len());

    let mut bw = ByteWriter::new(sink, opts.buffer_size);
    while let Some(chunk) = br.chunk()? {
        for &byte in chunk {
            if byte >= CHARACTER_OFFSET {
                bw.out16(dictionary.expand(byte))?;
            } else {
                bw.out8(byte)?;
            }
        }
    }
    bw.flush()?;

    let report = DecodeReport {
        read: br.consumed() - HEADER_SIZE as u64,
        written: bw.total(),
        dictionary: dictionary.len(),
    };
    debug!(
        "Read {} body bytes, wrote {} bytes.",
        report.read, report.written
    );
    Ok(report)
}

/// Decode an in-memory compressed file.
pub fn decode_bytes(data: &[u8], opts: &CodecOptions) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(data.len() * 2);
    decode(data, &mut out, opts)?;
    Ok(out)
}

/// Decode the file at `input` into a new file at `output`. The output only appears once
/// everything was written; an existing output is replaced only when `force` is set.
pub fn decode_file(
    input: &Path,
    output: &Path,
    opts: &CodecOptions,
    force: bool,
) -> Result<DecodeReport> {
    info!("Expanding {} into {}.", input.display(), output.display());
    let fin = File::open(input).map_err(|e| SqueezeError::input(input.display().to_string(), e))?;
    staged(output, force, |fout| decode(&fin, fout, opts))
        .map_err(|e| e.with_paths(input, output))
}

/// Test compressed file integrity: decode it and throw the output away.
pub fn check_file(input: &Path, opts: &CodecOptions) -> Result<DecodeReport> {
    info!("Checking {}.", input.display());
    let fin = File::open(input).map_err(|e| SqueezeError::input(input.display().to_string(), e))?;
    decode(fin, io::sink(), opts).map_err(|e| e.with_paths(input, Path::new("<none>")))
}
