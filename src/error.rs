use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while loading or decoding a control ROM image
#[derive(Debug, Error)]
pub enum RomError {
    /// The ROM (or wave ROM) file could not be read
    #[error("failed to read ROM file '{}': {source}", path.display())]
    UnreadableFile {
        /// Path that was opened
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: io::Error,
    },

    /// The ROM file exists but holds no data
    #[error("ROM file '{}' is empty", path.display())]
    EmptyFile {
        /// Path that was opened
        path: PathBuf,
    },

    /// No known model signature matched the image
    #[error("unrecognized control ROM ({len} bytes): no model signature matched")]
    UnrecognizedModel {
        /// Size of the rejected image
        len: usize,
    },

    /// A table or waveform read would run past the end of the loaded data
    #[error("{table} range 0x{start:06X}..0x{end:06X} exceeds image size 0x{len:06X}")]
    TruncatedImage {
        /// Table (or payload) being read
        table: &'static str,
        /// First byte of the range
        start: usize,
        /// One past the last byte of the range
        end: usize,
        /// Size of the buffer that was read from
        len: usize,
    },

    /// A record decoded to a value outside its valid domain
    #[error("{table} record {index}: {detail}")]
    CorruptRecord {
        /// Table the record belongs to
        table: &'static str,
        /// Index of the record within its table
        index: usize,
        /// What was wrong with it
        detail: String,
    },

    /// A demo song could not be written
    #[error("failed to write demo song '{}': {source}", path.display())]
    DemoExport {
        /// Output file
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: io::Error,
    },

    /// A decoded sample could not be written as WAV
    #[error("failed to write WAV file '{}': {source}", path.display())]
    WavExport {
        /// Output file
        path: PathBuf,
        /// Underlying encoder failure
        #[source]
        source: hound::Error,
    },

    /// The configuration file could not be read or parsed
    #[error("invalid configuration '{}': {detail}", path.display())]
    Config {
        /// Configuration file
        path: PathBuf,
        /// Parser or I/O message
        detail: String,
    },
}

/// Result type used throughout the decoder
pub type Result<T> = std::result::Result<T, RomError>;
