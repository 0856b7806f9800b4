use std::io::Write;

use log::trace;

use crate::error::{Result, SqueezeError, SINK_LABEL};

/// Buffered output for the codec. Bytes are queued in an accumulator of fixed capacity
/// which is written to the sink whenever it gets within two bytes of being full, so a
/// two byte emission always has room.
pub struct ByteWriter<W: Write> {
    /// Output accumulator waiting to be written.
    output: Vec<u8>,
    /// Capacity of the accumulator (at least 2).
    capacity: usize,
    /// Handle to the output stream
    writer: W,
    /// Count of bytes handed to the sink so far.
    written: u64,
}

impl<W: Write> ByteWriter<W> {
    /// Create a new ByteWriter over `writer` with an accumulator of `capacity` bytes.
    pub fn new(writer: W, capacity: usize) -> Self {
        let capacity = capacity.max(2);
        Self {
            output: Vec::with_capacity(capacity),
            capacity,
            writer,
            written: 0,
        }
    }

    /// Write a block verbatim, bypassing the accumulator. Used for the header.
    pub fn put_block(&mut self, data: &[u8]) -> Result<()> {
        self.drain()?;
        self.writer
            .write_all(data)
            .map_err(|e| SqueezeError::output(SINK_LABEL, e))?;
        self.written += data.len() as u64;
        Ok(())
    }

    /// Make sure there is room for at least two more bytes.
    fn make_room(&mut self) -> Result<()> {
        if self.output.len() > self.capacity - 2 {
            self.drain()?;
        }
        Ok(())
    }

    /// Queue a single byte.
    pub fn out8(&mut self, byte: u8) -> Result<()> {
        self.make_room()?;
        self.output.push(byte);
        Ok(())
    }

    /// Queue two bytes together.
    pub fn out16(&mut self, pair: (u8, u8)) -> Result<()> {
        self.make_room()?;
        self.output.push(pair.0);
        self.output.push(pair.1);
        Ok(())
    }

    /// Write out everything in the accumulator.
    fn drain(&mut self) -> Result<()> {
        if self.output.is_empty() {
            return Ok(());
        }
        trace!("Writing {} bytes.", self.output.len());
        self.writer
            .write_all(&self.output)
            .map_err(|e| SqueezeError::output(SINK_LABEL, e))?;
        self.written += self.output.len() as u64;
        self.output.clear();
        Ok(())
    }

    /// Flush the accumulator and the sink. MUST be called before the sink is used or
    /// data may be left in the accumulator.
    pub fn flush(&mut self) -> Result<()> {
        self.drain()?;
        self.writer
            .flush()
            .map_err(|e| SqueezeError::output(SINK_LABEL, e))
    }

    /// Bytes written to the sink plus bytes still queued.
    pub fn total(&self) -> u64 {
        self.written + self.output.len() as u64
    }

    /// Flush and give back the underlying sink.
    pub fn into_inner(mut self) -> Result<W> {
        self.flush()?;
        Ok(self.writer)
    }
}

#[cfg(test)]
mod test {
    use super::ByteWriter;
    use std::io::{self, Write};

    /// Records the size of every write it receives.
    #[derive(Default)]
    struct Spy {
        data: Vec<u8>,
        writes: Vec<usize>,
    }

    impl Write for Spy {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.writes.push(buf.len());
            self.data.extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn out8_test() {
        let mut bw = ByteWriter::new(Spy::default(), 16);
        bw.out8(b'x').unwrap();
        let spy = bw.into_inner().unwrap();
        assert_eq!(spy.data, b"x");
    }

    #[test]
    fn never_overfills_accumulator() {
        let mut bw = ByteWriter::new(Spy::default(), 4);
        bw.out8(1).unwrap();
        bw.out16((2, 3)).unwrap();
        bw.out16((4, 5)).unwrap();
        bw.out8(6).unwrap();
        assert_eq!(bw.total(), 6);
        let spy = bw.into_inner().unwrap();
        assert_eq!(spy.data, vec![1, 2, 3, 4, 5, 6]);
        assert!(spy.writes.iter().all(|&w| w <= 4));
    }

    #[test]
    fn put_block_keeps_order() {
        let mut bw = ByteWriter::new(Spy::default(), 8);
        bw.out8(9).unwrap();
        bw.put_block(&[1, 2, 3]).unwrap();
        bw.out8(4).unwrap();
        let spy = bw.into_inner().unwrap();
        assert_eq!(spy.data, vec![9, 1, 2, 3, 4]);
    }

    #[test]
    fn write_errors_name_the_sink() {
        let mut bw = ByteWriter::new(Broken, 8);
        bw.out8(1).unwrap();
        let err = bw.flush().unwrap_err();
        assert!(matches!(
            err,
            crate::error::SqueezeError::OutputUnavailable { .. }
        ));
    }
}
