use std::path::PathBuf;
use std::{fmt::Display, fmt::Formatter};

use clap::{Parser, Subcommand};
use log::{info, LevelFilter};

use super::options::{CodecOptions, BUFFER_SIZE};

/// Command Line Interpretation - uses external CLAP crate.
#[derive(Parser, Debug)]
#[clap(
    version,
    about = "Compress/Decompress text files using a dictionary of the most frequent byte pairs",
    long_about = "
    Squeezer counts every pair of adjacent bytes in a text file and replaces the 128
    most frequent pairs with a single byte each. The dictionary is stored in a 256 byte
    header at the start of the compressed file.

    Only 7-bit input is supported: bytes of 128 and above are used as dictionary codes."
)]
pub struct Args {
    /// What to do
    #[clap(subcommand)]
    pub mode: Mode,

    /// Sets verbosity. -v shows progress, -vvv is chatty
    #[clap(short = 'v', long = "verbose", parse(from_occurrences))]
    pub verbose: u64,

    /// Suppress noncritical messages
    #[clap(short = 'q', long = "quiet")]
    pub quiet: bool,

    /// Overwrite existing output files
    #[clap(short = 'f', long = "force")]
    pub force: bool,

    /// Working buffer size in bytes. Does not change the output.
    #[clap(short = 'b', long = "buffer-size", default_value_t = BUFFER_SIZE)]
    pub buffer_size: usize,
}

/// Encode, Decode, Check
#[derive(Subcommand, Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Compress <input> into <output>
    #[clap(name = "enc")]
    Encode { input: PathBuf, output: PathBuf },
    /// Decompress <input> into <output>
    #[clap(name = "dec")]
    Decode { input: PathBuf, output: PathBuf },
    /// Test compressed file integrity
    #[clap(name = "check")]
    Check { input: PathBuf },
}

impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Encode { .. } => write!(f, "enc"),
            Mode::Decode { .. } => write!(f, "dec"),
            Mode::Check { .. } => write!(f, "check"),
        }
    }
}

impl Args {
    /// Log level to use for this run.
    pub fn level_filter(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Error;
        }
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    /// Codec settings requested on the command line.
    pub fn options(&self) -> CodecOptions {
        CodecOptions::new().with_buffer_size(self.buffer_size)
    }

    /// Report initialization status to the user.
    pub fn report(&self) {
        info!("---- Squeezer Initialization Start ----");
        info!("Verbosity set to {}", log::max_level());
        info!("Operational mode set to {}", self.mode);
        info!("Buffer size set to {}", self.options().buffer_size);
        if self.force {
            info!("Forcing file overwriting")
        };
        info!("---- Squeezer Initialization End ----");
    }
}

/// Parse the command line.
pub fn sqzopts_init() -> Args {
    Args::parse()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn enc_test() {
        let args = Args::try_parse_from(["squeezer", "-vv", "enc", "a.txt", "a.sqz"]).unwrap();
        assert_eq!(
            args.mode,
            Mode::Encode {
                input: PathBuf::from("a.txt"),
                output: PathBuf::from("a.sqz")
            }
        );
        assert_eq!(args.level_filter(), LevelFilter::Debug);
        assert_eq!(args.options(), CodecOptions::default());
        assert!(!args.force);
        assert_eq!(args.mode.to_string(), "enc");
    }

    #[test]
    fn dec_test() {
        let args =
            Args::try_parse_from(["squeezer", "-q", "-f", "-b", "1", "dec", "a.sqz", "a.txt"])
                .unwrap();
        assert_eq!(args.mode.to_string(), "dec");
        assert_eq!(args.level_filter(), LevelFilter::Error);
        assert!(args.force);
        assert_eq!(args.options().buffer_size, 2);
    }

    #[test]
    fn check_test() {
        let args = Args::try_parse_from(["squeezer", "check", "a.sqz"]).unwrap();
        assert_eq!(
            args.mode,
            Mode::Check {
                input: PathBuf::from("a.sqz")
            }
        );
        assert_eq!(args.level_filter(), LevelFilter::Warn);
    }

    #[test]
    fn bad_usage_is_rejected() {
        assert!(Args::try_parse_from(["squeezer"]).is_err());
        assert!(Args::try_parse_from(["squeezer", "enc", "only-one"]).is_err());
        assert!(Args::try_parse_from(["squeezer", "zip", "a", "b"]).is_err());
    }
}
