//! Audio-output collaborator boundary
//!
//! The hardware driver is external; this module owns the session
//! arithmetic it is driven by. Playback state (buffer, read cursor) is a
//! value held by a [`PlaybackSession`], so concurrent sessions never share
//! state.

use crate::error::{Error, Result};
use crate::format::wav::WavFormat;

/// Result of filling one driver block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamStatus {
    /// More sample data remains
    Continue,
    /// The buffer is exhausted; the remainder of the block was zero-filled
    Complete,
}

/// A scoped playback session over an interleaved normalized buffer
///
/// The session owns the buffer for the stream's lifetime, which keeps it
/// valid and unmodified while the driver reads from it.
#[derive(Debug)]
pub struct PlaybackSession {
    samples: Vec<i32>,
    channels: usize,
    sample_rate: u32,
    cursor: usize,
}

impl PlaybackSession {
    /// Create a session over an interleaved buffer
    pub fn new(samples: Vec<i32>, format: &WavFormat) -> Self {
        PlaybackSession {
            samples,
            channels: format.channels as usize,
            sample_rate: format.sample_rate,
            cursor: 0,
        }
    }

    /// Channel count of the stream
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Sample rate of the stream in Hz
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Whole frames not yet handed to the driver
    pub fn frames_remaining(&self) -> usize {
        (self.samples.len() - self.cursor) / self.channels
    }

    /// True once every frame has been handed out
    pub fn is_finished(&self) -> bool {
        self.cursor >= self.samples.len()
    }

    /// Fill one driver block from the cursor
    ///
    /// `out` must hold a whole number of frames. Copies as many whole
    /// frames as remain; once the buffer runs short the rest of the block
    /// is zero-filled and the stream signals completion. A block that is
    /// filled exactly returns `Continue`; the following call completes.
    pub fn fill(&mut self, out: &mut [i32]) -> StreamStatus {
        debug_assert_eq!(out.len() % self.channels, 0);

        let requested_frames = out.len() / self.channels;
        let frames = requested_frames.min(self.frames_remaining());
        let count = frames * self.channels;

        out[..count].copy_from_slice(&self.samples[self.cursor..self.cursor + count]);
        self.cursor += count;

        if frames < requested_frames {
            out[count..].fill(0);
            StreamStatus::Complete
        } else {
            StreamStatus::Continue
        }
    }
}

/// Push-model driver seam
///
/// `start` covers driver initialization and stream open as one atomic
/// step: on error the implementation must leave the driver torn down.
/// After a successful `start`, callers guarantee a paired `stop` on every
/// path.
pub trait AudioSink {
    fn start(&mut self, channels: u16, sample_rate: u32) -> Result<()>;
    fn write(&mut self, interleaved: &[i32]) -> Result<()>;
    fn stop(&mut self) -> Result<()>;
}

/// Stream a buffer through a sink in blocks of `block_frames` frames
///
/// Drives a [`PlaybackSession`] to completion, including the final
/// zero-filled block. `stop` is called on every path once `start`
/// succeeded, write errors included.
pub fn play<S: AudioSink>(
    sink: &mut S,
    samples: Vec<i32>,
    format: &WavFormat,
    block_frames: usize,
) -> Result<()> {
    if block_frames == 0 {
        return Err(Error::invalid_range("Playback block size must be nonzero"));
    }

    let mut session = PlaybackSession::new(samples, format);
    sink.start(format.channels, format.sample_rate)?;

    tracing::debug!(
        frames = session.frames_remaining(),
        sample_rate = session.sample_rate(),
        "starting playback"
    );

    let mut block = vec![0i32; block_frames * session.channels()];
    let result = loop {
        let status = session.fill(&mut block);
        if let Err(e) = sink.write(&block) {
            break Err(e);
        }
        if status == StreamStatus::Complete {
            break Ok(());
        }
    };

    let stopped = sink.stop();
    result.and(stopped)
}
