//! WAV file decoding into normalized sample buffers

use super::header::{WavFormat, WavHeader};
use crate::codec::narrow_to_i16;
use crate::error::{Error, Result};
use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;

/// Requested layout of the decoded channel buffers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelLayout {
    /// One buffer, samples alternating per channel in file order
    Interleaved,
    /// One buffer per channel; mono input fills both identically
    Split,
}

/// A decoded waveform: the source descriptor plus normalized channel data
#[derive(Debug, Clone)]
pub struct DecodedWave {
    /// Format descriptor, carried unchanged from the file header
    pub format: WavFormat,
    /// Layout the buffers were decoded into
    pub layout: ChannelLayout,
    /// Channel buffers: one for `Interleaved`, two for `Split`
    pub data: Vec<Vec<i32>>,
}

impl DecodedWave {
    /// Number of whole sample frames decoded
    pub fn num_frames(&self) -> usize {
        match self.layout {
            ChannelLayout::Interleaved => self.data[0].len() / self.format.channels as usize,
            ChannelLayout::Split => self.data[0].len(),
        }
    }

    /// The interleaved buffer, or the single mono buffer
    ///
    /// For split stereo data there is no interleaved view; use
    /// [`left`](Self::left) and [`right`](Self::right).
    pub fn interleaved(&self) -> &[i32] {
        &self.data[0]
    }

    /// Left channel buffer (split layout), or the whole buffer otherwise
    pub fn left(&self) -> &[i32] {
        &self.data[0]
    }

    /// Right channel buffer (split layout), or the whole buffer otherwise
    pub fn right(&self) -> &[i32] {
        self.data.last().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Scale every buffer down to the signed 16-bit range
    pub fn to_i16(&self) -> Vec<Vec<i16>> {
        self.data
            .iter()
            .map(|buf| buf.iter().map(|&s| narrow_to_i16(s)).collect())
            .collect()
    }
}

/// A WAV file opened for decoding
///
/// The file handle lives exactly as long as this value; header or format
/// errors during [`open`](Self::open) drop the handle before returning.
#[derive(Debug)]
pub struct WavReader {
    reader: BufReader<File>,
    header: WavHeader,
}

impl WavReader {
    /// Open a WAV file and parse its header
    ///
    /// Fails with `FileNotOpen` when the file is missing or unreadable,
    /// `HeaderParse` when the RIFF/fmt/data chunks cannot be located, and
    /// `UnsupportedFormat` when the audio format tag is not linear PCM.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .map_err(|e| Error::file_not_open(format!("{}: {}", path.display(), e)))?;

        let mut reader = BufReader::new(file);
        let header = WavHeader::read(&mut reader)?;

        tracing::debug!(
            path = %path.display(),
            sample_rate = header.format.sample_rate,
            channels = header.format.channels,
            bits = header.format.bits_per_sample,
            "parsed WAV header"
        );

        Ok(WavReader { reader, header })
    }

    /// The parsed header
    pub fn header(&self) -> &WavHeader {
        &self.header
    }

    /// The format descriptor
    pub fn format(&self) -> &WavFormat {
        &self.header.format
    }

    /// Decode the file's sample data into normalized buffers
    ///
    /// Reads from the data chunk to the end of the file; a trailing partial
    /// frame is discarded silently rather than treated as an error.
    pub fn decode(mut self, layout: ChannelLayout) -> Result<DecodedWave> {
        let format = self.header.format.clone();
        let encoding = format.sample_encoding()?;

        self.reader
            .seek(SeekFrom::Start(self.header.data_start))
            .map_err(|e| Error::header_parse(format!("Failed to seek to sample data: {}", e)))?;

        let mut raw = Vec::new();
        self.reader.read_to_end(&mut raw)?;

        let channels = format.channels as usize;
        let bytes_per_sample = encoding.bytes_per_sample();
        let frame_bytes = channels * bytes_per_sample;
        let num_frames = raw.len() / frame_bytes;

        tracing::debug!(
            frames = num_frames,
            dropped_bytes = raw.len() - num_frames * frame_bytes,
            "decoding sample data"
        );

        let data = match layout {
            ChannelLayout::Interleaved => {
                let mut buf = Vec::with_capacity(num_frames * channels);
                for sample in 0..num_frames * channels {
                    let start = sample * bytes_per_sample;
                    buf.push(encoding.decode(&raw[start..start + bytes_per_sample]));
                }
                vec![buf]
            }
            ChannelLayout::Split if channels == 1 => {
                let mut left = Vec::with_capacity(num_frames);
                for frame in 0..num_frames {
                    let start = frame * bytes_per_sample;
                    left.push(encoding.decode(&raw[start..start + bytes_per_sample]));
                }
                // Mono fills both outputs without decoding twice.
                let right = left.clone();
                vec![left, right]
            }
            ChannelLayout::Split => {
                let mut left = Vec::with_capacity(num_frames);
                let mut right = Vec::with_capacity(num_frames);
                for frame in 0..num_frames {
                    let start = frame * frame_bytes;
                    left.push(encoding.decode(&raw[start..start + bytes_per_sample]));
                    right.push(encoding.decode(
                        &raw[start + bytes_per_sample..start + 2 * bytes_per_sample],
                    ));
                }
                vec![left, right]
            }
        };

        Ok(DecodedWave {
            format,
            layout,
            data,
        })
    }
}

/// Open and decode a WAV file in one step
pub fn decode_file(path: &Path, layout: ChannelLayout) -> Result<DecodedWave> {
    WavReader::open(path)?.decode(layout)
}
