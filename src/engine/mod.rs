//! Feature-extraction collaborator boundary
//!
//! The speech-feature engine itself (spectral/cepstral analysis, RASTA
//! filtering, linear prediction) is an external component; this module
//! carries its typed contract. Configuration travels as an in-memory value
//! handed to the engine at each call, so no temporary-file side channel or
//! cleanup path exists.

use crate::error::Result;
use crate::format::wav::WavFormat;
use ndarray::{Array1, Array2};
use std::path::{Path, PathBuf};

/// Serialized engine configuration, passed by value at every extraction
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngineConfig {
    text: String,
}

impl EngineConfig {
    /// Wrap a serialized configuration string
    pub fn new<S: Into<String>>(text: S) -> Self {
        EngineConfig { text: text.into() }
    }

    /// The configuration text as the engine consumes it
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Per-file output of a feature extraction run
#[derive(Debug, Clone)]
pub struct FeatureOutput {
    /// Feature matrix, frames x feature dimensions
    pub features: Array2<f64>,
    /// Timestamp of each frame in seconds
    pub timestamps: Array1<f64>,
    /// Descriptor of the analyzed file
    pub format: WavFormat,
    /// Segment frame start times, when the configuration produces
    /// segmentation
    pub frame_starts: Option<Array1<f64>>,
    /// Segment frame end times
    pub frame_ends: Option<Array1<f64>>,
}

impl FeatureOutput {
    /// Number of analysis frames
    pub fn num_frames(&self) -> usize {
        self.features.nrows()
    }
}

/// The feature-extraction engine seam
///
/// Implementations receive the audio file path and the configuration and
/// return per-frame features; failures surface as `Error::Engine`.
pub trait FeatureEngine {
    fn extract(&mut self, path: &Path, config: &EngineConfig) -> Result<FeatureOutput>;
}

/// Run the engine over a list of files, collecting one output per file
///
/// Processing is fail-fast: the first engine error aborts the batch.
pub fn extract_batch<E: FeatureEngine>(
    engine: &mut E,
    files: &[PathBuf],
    config: &EngineConfig,
) -> Result<Vec<FeatureOutput>> {
    let mut outputs = Vec::with_capacity(files.len());
    for path in files {
        tracing::debug!(file = %path.display(), "extracting features");
        outputs.push(engine.extract(path, config)?);
    }
    Ok(outputs)
}
