//! Errors reported by the squeezer codec.
//!
//! Every failure aborts the operation in progress. I/O failures keep the name of the
//! stream (or file path) they happened on along with the underlying OS error so the
//! front end can print a useful diagnostic.

use std::io;
use std::path::Path;

use thiserror::Error;

/// Label used for the reading side of an operation when no path is known.
pub const SOURCE_LABEL: &str = "source stream";
/// Label used for the writing side of an operation when no path is known.
pub const SINK_LABEL: &str = "sink stream";

#[derive(Error, Debug)]
pub enum SqueezeError {
    #[error("impossible to access the input '{name}' because {source}")]
    InputUnavailable {
        name: String,
        #[source]
        source: io::Error,
    },

    #[error("impossible to access the output '{name}' because {source}")]
    OutputUnavailable {
        name: String,
        #[source]
        source: io::Error,
    },

    #[error("seems impossible to allocate more memory for the frequency table ({entries} entries)")]
    AllocationFailure { entries: usize },

    #[error("impossible to find the dictionary in the header (we read {found} bytes instead of {expected})")]
    InvalidHeader { found: usize, expected: usize },

    #[error("byte {byte:#04x} at offset {offset} is outside the 7-bit literal range")]
    ReservedByte { offset: u64, byte: u8 },
}

impl SqueezeError {
    pub(crate) fn input(name: impl Into<String>, source: io::Error) -> Self {
        SqueezeError::InputUnavailable {
            name: name.into(),
            source,
        }
    }

    pub(crate) fn output(name: impl Into<String>, source: io::Error) -> Self {
        SqueezeError::OutputUnavailable {
            name: name.into(),
            source,
        }
    }

    /// Replace the generic stream labels with the real file paths.
    pub(crate) fn with_paths(self, input: &Path, output: &Path) -> Self {
        match self {
            SqueezeError::InputUnavailable { source, .. } => {
                Self::input(input.display().to_string(), source)
            }
            SqueezeError::OutputUnavailable { source, .. } => {
                Self::output(output.display().to_string(), source)
            }
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, SqueezeError>;

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn with_paths_relabels_io_errors() {
        let err = SqueezeError::input(SOURCE_LABEL, io::Error::from(io::ErrorKind::NotFound));
        let err = err.with_paths(Path::new("in.txt"), Path::new("out.sqz"));
        match err {
            SqueezeError::InputUnavailable { name, .. } => assert_eq!(name, "in.txt"),
            other => panic!("unexpected error {:?}", other),
        }

        let err = SqueezeError::output(SINK_LABEL, io::Error::from(io::ErrorKind::PermissionDenied));
        let err = err.with_paths(Path::new("in.txt"), Path::new("out.sqz"));
        assert!(err.to_string().contains("out.sqz"));
    }

    #[test]
    fn with_paths_keeps_format_errors() {
        let err = SqueezeError::InvalidHeader {
            found: 100,
            expected: 256,
        };
        let err = err.with_paths(Path::new("a"), Path::new("b"));
        assert!(matches!(err, SqueezeError::InvalidHeader { found: 100, .. }));
    }
}
