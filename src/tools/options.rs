/// Default working buffer size, for both reading and writing.
pub const BUFFER_SIZE: usize = 1024;

/// Settings shared by every codec operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodecOptions {
    /// Size of the working buffers used to stream the input and the output. Never
    /// changes the produced bytes, only how often we read and write.
    pub buffer_size: usize,
}

impl CodecOptions {
    pub fn new() -> Self {
        Self {
            buffer_size: BUFFER_SIZE,
        }
    }

    /// Set the working buffer size. The output side needs room for a two byte code, so
    /// anything below 2 is raised to 2.
    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size.max(2);
        self
    }
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self::new()
    }
}

#[test]
fn buffer_size_is_clamped() {
    assert_eq!(CodecOptions::default().buffer_size, 1024);
    assert_eq!(CodecOptions::new().with_buffer_size(0).buffer_size, 2);
    assert_eq!(CodecOptions::new().with_buffer_size(7).buffer_size, 7);
}
