//! WAV file header structures and parsing

use super::{ChunkHeader, DATA_CHUNK, FMT_CHUNK, RIFF_MAGIC, WAVE_MAGIC};
use crate::codec::SampleEncoding;
use crate::error::{Error, Result};
use std::io::{Read, Seek, SeekFrom};

/// RIFF audio format tag for linear PCM
pub const FORMAT_TAG_PCM: u16 = 0x0001;

/// Parsed `fmt ` chunk of a PCM WAV file
///
/// This is the format descriptor carried through decoding, slicing and
/// re-encoding. Only linear PCM reaches this type; non-PCM tags are
/// rejected during parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WavFormat {
    /// Number of channels (1 = mono, 2 = stereo)
    pub channels: u16,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Average bytes per second
    pub byte_rate: u32,
    /// Bytes per sample frame across all channels
    pub block_align: u16,
    /// Declared bits per sample (the payload width, which for 24-bit data
    /// may be narrower than the container)
    pub bits_per_sample: u16,
}

impl WavFormat {
    /// Build a descriptor from channel count, rate and bit depth
    ///
    /// The block align and byte rate are derived assuming the container
    /// width equals the payload width.
    pub fn new(channels: u16, sample_rate: u32, bits_per_sample: u16) -> Result<Self> {
        let block_align = channels * (bits_per_sample / 8);
        let format = WavFormat {
            channels,
            sample_rate,
            byte_rate: sample_rate * block_align as u32,
            block_align,
            bits_per_sample,
        };
        format.validate()?;
        Ok(format)
    }

    /// Parse a WAV format chunk from its raw bytes
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() < 16 {
            return Err(Error::header_parse("WAV format chunk too small"));
        }

        let format_tag = u16::from_le_bytes([data[0], data[1]]);
        if format_tag != FORMAT_TAG_PCM {
            return Err(Error::UnsupportedFormat(format_tag));
        }

        let format = WavFormat {
            channels: u16::from_le_bytes([data[2], data[3]]),
            sample_rate: u32::from_le_bytes([data[4], data[5], data[6], data[7]]),
            byte_rate: u32::from_le_bytes([data[8], data[9], data[10], data[11]]),
            block_align: u16::from_le_bytes([data[12], data[13]]),
            bits_per_sample: u16::from_le_bytes([data[14], data[15]]),
        };
        format.validate()?;
        Ok(format)
    }

    /// Container bytes of one sample on one channel
    pub fn bytes_per_sample(&self) -> usize {
        (self.block_align / self.channels) as usize
    }

    /// Sample encoding implied by the container width and bit depth
    pub fn sample_encoding(&self) -> Result<SampleEncoding> {
        SampleEncoding::from_layout(self.bytes_per_sample(), self.bits_per_sample)
    }

    /// Validate descriptor invariants
    pub fn validate(&self) -> Result<()> {
        match self.channels {
            1 | 2 => {}
            other => {
                return Err(Error::header_parse(format!(
                    "Unsupported channel count: {} (mono or stereo only)",
                    other
                )))
            }
        }

        if self.sample_rate == 0 {
            return Err(Error::header_parse("Invalid sample rate: 0"));
        }

        if self.block_align == 0 || self.block_align % self.channels != 0 {
            return Err(Error::header_parse(format!(
                "Block align {} does not divide into {} channels",
                self.block_align, self.channels
            )));
        }

        // Pins the layout to a known sample encoding (8/16/24-packed/
        // 24-in-32/32).
        self.sample_encoding()?;

        Ok(())
    }
}

/// Complete parsed WAV file header
#[derive(Debug, Clone)]
pub struct WavHeader {
    /// Total file size as declared by the RIFF chunk (chunk size + 8)
    pub file_size: u32,
    /// Format descriptor from the `fmt ` chunk
    pub format: WavFormat,
    /// Data chunk size in bytes
    pub data_size: u32,
    /// Data chunk start position in the file
    pub data_start: u64,
}

impl WavHeader {
    /// Read and parse a WAV header from a reader
    ///
    /// Leaves the reader positioned at the start of the sample data.
    pub fn read<R: Read + Seek>(reader: &mut R) -> Result<Self> {
        let mut riff_header = [0u8; 12];
        reader
            .read_exact(&mut riff_header)
            .map_err(|e| Error::header_parse(format!("Failed to read RIFF header: {}", e)))?;

        if &riff_header[0..4] != RIFF_MAGIC {
            return Err(Error::header_parse("Not a valid RIFF file"));
        }
        if &riff_header[8..12] != WAVE_MAGIC {
            return Err(Error::header_parse("Not a valid WAVE file"));
        }

        let file_size = u32::from_le_bytes([
            riff_header[4],
            riff_header[5],
            riff_header[6],
            riff_header[7],
        ]) + 8;

        let format = Self::find_and_parse_fmt_chunk(reader)?;
        let (data_size, data_start) = Self::find_data_chunk(reader)?;

        Ok(WavHeader {
            file_size,
            format,
            data_size,
            data_start,
        })
    }

    /// Scan chunks until `fmt ` is found and parse it
    fn find_and_parse_fmt_chunk<R: Read + Seek>(reader: &mut R) -> Result<WavFormat> {
        loop {
            let chunk = Self::next_chunk(reader, "fmt chunk not found")?;

            if &chunk.id == FMT_CHUNK {
                let mut fmt_data = vec![0u8; chunk.size as usize];
                reader
                    .read_exact(&mut fmt_data)
                    .map_err(|e| Error::header_parse(format!("Failed to read fmt chunk: {}", e)))?;

                return WavFormat::from_bytes(&fmt_data);
            }

            Self::skip_chunk(reader, chunk.size)?;
        }
    }

    /// Scan chunks until `data` is found; returns its size and start offset
    fn find_data_chunk<R: Read + Seek>(reader: &mut R) -> Result<(u32, u64)> {
        loop {
            let chunk = Self::next_chunk(reader, "data chunk not found")?;

            if &chunk.id == DATA_CHUNK {
                let data_start = reader
                    .stream_position()
                    .map_err(|e| Error::header_parse(format!("Failed to get position: {}", e)))?;
                return Ok((chunk.size, data_start));
            }

            Self::skip_chunk(reader, chunk.size)?;
        }
    }

    fn next_chunk<R: Read>(reader: &mut R, missing: &str) -> Result<ChunkHeader> {
        let mut chunk_header = [0u8; 8];
        if reader.read_exact(&mut chunk_header).is_err() {
            return Err(Error::header_parse(missing));
        }
        ChunkHeader::from_bytes(&chunk_header).ok_or_else(|| Error::header_parse(missing))
    }

    fn skip_chunk<R: Read + Seek>(reader: &mut R, size: u32) -> Result<()> {
        reader
            .seek(SeekFrom::Current(size as i64))
            .map_err(|e| Error::header_parse(format!("Failed to skip chunk: {}", e)))?;

        // RIFF chunks are word-aligned.
        if size % 2 != 0 {
            reader.seek(SeekFrom::Current(1)).ok();
        }
        Ok(())
    }

    /// Number of whole sample frames declared by the data chunk
    pub fn num_frames(&self) -> u64 {
        self.data_size as u64 / self.format.block_align as u64
    }

    /// Duration in seconds
    pub fn duration_seconds(&self) -> f64 {
        self.num_frames() as f64 / self.format.sample_rate as f64
    }
}
