//! Error types for speechwave

use thiserror::Error;

/// Result type alias for speechwave operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for speechwave
#[derive(Error, Debug)]
pub enum Error {
    /// Source file missing or unreadable
    #[error("Cannot open source file: {0}")]
    FileNotOpen(String),

    /// Malformed or missing RIFF/WAVE header
    #[error("Header parse error: {0}")]
    HeaderParse(String),

    /// Audio format tag is not linear PCM
    #[error("Unsupported WAV format tag: {0:#06x} (only PCM, tag 1)")]
    UnsupportedFormat(u16),

    /// Slice bounds violate the range invariants
    #[error("Invalid range: {0}")]
    InvalidRange(String),

    /// Encode target bit depth outside {8, 16, 32}
    #[error("Unsupported output bit depth: {0} (supported: 8, 16, 32)")]
    UnsupportedBitDepth(u16),

    /// Internal invariant violated during encoding; always a defect
    #[error("Encoding consistency check failed: {0}")]
    EncodingConsistency(String),

    /// Destination unwritable
    #[error("Write error: {0}")]
    IoWrite(String),

    /// Feature engine failure at the collaborator boundary
    #[error("Feature engine error: {0}")]
    Engine(String),

    /// Initialization error
    #[error("Initialization error: {0}")]
    Init(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a file-not-open error
    pub fn file_not_open<S: Into<String>>(msg: S) -> Self {
        Error::FileNotOpen(msg.into())
    }

    /// Create a header parse error
    pub fn header_parse<S: Into<String>>(msg: S) -> Self {
        Error::HeaderParse(msg.into())
    }

    /// Create an invalid range error
    pub fn invalid_range<S: Into<String>>(msg: S) -> Self {
        Error::InvalidRange(msg.into())
    }

    /// Create an encoding consistency error
    pub fn encoding_consistency<S: Into<String>>(msg: S) -> Self {
        Error::EncodingConsistency(msg.into())
    }

    /// Create a write error
    pub fn io_write<S: Into<String>>(msg: S) -> Self {
        Error::IoWrite(msg.into())
    }

    /// Create a feature engine error
    pub fn engine<S: Into<String>>(msg: S) -> Self {
        Error::Engine(msg.into())
    }
}
