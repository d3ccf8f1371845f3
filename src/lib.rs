//! speechwave - speech feature extraction glue with a normalized PCM WAV codec
//!
//! The crate decodes PCM WAV files into a bit-depth-agnostic normalized
//! sample domain, slices waveforms by time range, and re-serializes them as
//! valid RIFF/WAVE byte streams. Around that codec it carries the typed
//! boundaries to two external collaborators: a speech-feature-extraction
//! engine and an asynchronous audio output driver.
//!
//! # Architecture
//!
//! - `codec`: per-sample conversion between on-disk PCM encodings and the
//!   normalized `i32` domain
//! - `format`: RIFF/WAVE container handling (decode, time-range extraction,
//!   encode)
//! - `engine`: feature-extraction collaborator boundary
//! - `playback`: audio-output collaborator boundary

pub mod codec;
pub mod engine;
pub mod error;
pub mod format;
pub mod playback;

pub use error::{Error, Result};

/// speechwave version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const VERSION_MAJOR: u32 = 0;
pub const VERSION_MINOR: u32 = 1;
pub const VERSION_PATCH: u32 = 0;

/// Configuration for the speechwave library
#[derive(Debug, Clone)]
pub struct Config {
    /// Enable verbose logging
    pub verbose: bool,
    /// Enable debug output
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            verbose: false,
            debug: false,
        }
    }
}

/// Initialize the speechwave library with the given configuration
pub fn init(config: Config) -> Result<()> {
    if config.verbose || config.debug {
        let level = if config.debug { "debug" } else { "info" };
        tracing_subscriber::fmt()
            .with_env_filter(level)
            .try_init()
            .map_err(|e| Error::Init(format!("Failed to install tracing subscriber: {}", e)))?;
    }

    Ok(())
}
