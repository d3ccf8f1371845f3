//! WAV file encoding from normalized sample buffers

use super::header::WavFormat;
use super::{ChunkHeader, DATA_CHUNK, FMT_CHUNK, RIFF_MAGIC, WAVE_MAGIC};
use crate::codec::{widen_from_i16, SampleEncoding};
use crate::error::{Error, Result};
use bytes::Bytes;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Byte length of the assembled header: RIFF chunk preamble (12) + `fmt `
/// chunk (24) + data chunk preamble (8)
const HEADER_LEN: usize = 44;

/// Encode an interleaved normalized buffer into a complete RIFF/WAVE stream
///
/// The frame count is derived from the buffer length, so a sliced buffer
/// plus its unchanged descriptor is always self-consistent. Output depths
/// are limited to 8, 16 and 32 bits; anything else fails with
/// `UnsupportedBitDepth` before any bytes are produced.
pub fn encode_wave(format: &WavFormat, samples: &[i32]) -> Result<Bytes> {
    let encoding = SampleEncoding::for_output(format.bits_per_sample)?;

    let channels = format.channels as usize;
    if channels == 0 || samples.len() % channels != 0 {
        return Err(Error::encoding_consistency(format!(
            "Interleaved buffer of {} samples does not divide into {} channels",
            samples.len(),
            channels
        )));
    }

    let num_frames = samples.len() / channels;
    let block_align = format.channels * (format.bits_per_sample / 8);
    let data_chunk_size = num_frames as u32 * block_align as u32;

    // RIFF size field: header chunk remainder (4) + fmt chunk (24) + data
    // chunk preamble (8) + sample bytes.
    let file_size = 4 + 24 + 8 + data_chunk_size;

    let mut out = Vec::with_capacity(HEADER_LEN + data_chunk_size as usize);

    out.extend_from_slice(RIFF_MAGIC);
    out.extend_from_slice(&file_size.to_le_bytes());
    out.extend_from_slice(WAVE_MAGIC);

    let fmt_chunk = ChunkHeader {
        id: *FMT_CHUNK,
        size: 16,
    };
    out.extend_from_slice(&fmt_chunk.to_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&format.channels.to_le_bytes());
    out.extend_from_slice(&format.sample_rate.to_le_bytes());

    let byte_rate =
        (format.channels as u32 * format.sample_rate * format.bits_per_sample as u32) / 8;
    out.extend_from_slice(&byte_rate.to_le_bytes());
    out.extend_from_slice(&block_align.to_le_bytes());
    out.extend_from_slice(&format.bits_per_sample.to_le_bytes());

    let data_chunk = ChunkHeader {
        id: *DATA_CHUNK,
        size: data_chunk_size,
    };
    out.extend_from_slice(&data_chunk.to_bytes());

    for &sample in samples {
        encoding.encode_into(sample, &mut out)?;
    }

    // The declared sizes must agree with what was actually assembled; a
    // mismatch is a codec defect, not a data problem.
    if file_size as usize != out.len() - 8 {
        return Err(Error::encoding_consistency(format!(
            "File size field {} != {} produced bytes - 8",
            file_size,
            out.len()
        )));
    }
    if data_chunk_size as usize != out.len() - HEADER_LEN {
        return Err(Error::encoding_consistency(format!(
            "Data chunk size field {} != {} produced sample bytes",
            data_chunk_size,
            out.len() - HEADER_LEN
        )));
    }

    tracing::debug!(
        frames = num_frames,
        bits = format.bits_per_sample,
        bytes = out.len(),
        "assembled WAV stream"
    );

    Ok(Bytes::from(out))
}

/// Encode a buffer and write it to `path` as a whole-file overwrite
///
/// No partial-file recovery is attempted; create or write failures map to
/// `IoWrite`.
pub fn write_wave_file(path: &Path, format: &WavFormat, samples: &[i32]) -> Result<()> {
    let stream = encode_wave(format, samples)?;

    let mut file = File::create(path)
        .map_err(|e| Error::io_write(format!("{}: {}", path.display(), e)))?;
    file.write_all(&stream)
        .map_err(|e| Error::io_write(format!("{}: {}", path.display(), e)))?;

    Ok(())
}

/// Write a buffer held in the signed 16-bit range, widening it first
pub fn write_wave_file_i16(path: &Path, format: &WavFormat, samples: &[i16]) -> Result<()> {
    let widened: Vec<i32> = samples.iter().map(|&s| widen_from_i16(s)).collect();
    write_wave_file(path, format, &widened)
}

/// Interleave split stereo buffers and write them
///
/// The descriptor must be stereo and the channel buffers equally long.
pub fn write_wave_file_split(
    path: &Path,
    format: &WavFormat,
    left: &[i32],
    right: &[i32],
) -> Result<()> {
    if format.channels != 2 {
        return Err(Error::encoding_consistency(
            "Split-channel save requires a stereo descriptor",
        ));
    }
    if left.len() != right.len() {
        return Err(Error::encoding_consistency(format!(
            "Split channel buffers differ in length: {} vs {}",
            left.len(),
            right.len()
        )));
    }

    let mut interleaved = Vec::with_capacity(left.len() * 2);
    for (&l, &r) in left.iter().zip(right.iter()) {
        interleaved.push(l);
        interleaved.push(r);
    }

    write_wave_file(path, format, &interleaved)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_24_bit_output() {
        let format = WavFormat {
            channels: 1,
            sample_rate: 16000,
            byte_rate: 48000,
            block_align: 3,
            bits_per_sample: 24,
        };
        let err = encode_wave(&format, &[0, 1, 2]).unwrap_err();
        assert!(matches!(err, Error::UnsupportedBitDepth(24)));
    }

    #[test]
    fn test_rejects_ragged_stereo_buffer() {
        let format = WavFormat::new(2, 44100, 16).unwrap();
        let err = encode_wave(&format, &[0, 1, 2]).unwrap_err();
        assert!(matches!(err, Error::EncodingConsistency(_)));
    }

    #[test]
    fn test_header_fields_16_bit_stereo() {
        let format = WavFormat::new(2, 44100, 16).unwrap();
        let samples = vec![0i32; 200]; // 100 frames
        let stream = encode_wave(&format, &samples).unwrap();

        assert_eq!(&stream[0..4], b"RIFF");
        let file_size = u32::from_le_bytes([stream[4], stream[5], stream[6], stream[7]]);
        assert_eq!(file_size as usize, stream.len() - 8);
        assert_eq!(&stream[8..12], b"WAVE");

        assert_eq!(&stream[12..16], b"fmt ");
        assert_eq!(
            u32::from_le_bytes([stream[16], stream[17], stream[18], stream[19]]),
            16
        );
        assert_eq!(u16::from_le_bytes([stream[20], stream[21]]), 1);
        assert_eq!(u16::from_le_bytes([stream[22], stream[23]]), 2);
        assert_eq!(
            u32::from_le_bytes([stream[24], stream[25], stream[26], stream[27]]),
            44100
        );
        assert_eq!(
            u32::from_le_bytes([stream[28], stream[29], stream[30], stream[31]]),
            176_400
        );
        assert_eq!(u16::from_le_bytes([stream[32], stream[33]]), 4);
        assert_eq!(u16::from_le_bytes([stream[34], stream[35]]), 16);

        assert_eq!(&stream[36..40], b"data");
        let data_size = u32::from_le_bytes([stream[40], stream[41], stream[42], stream[43]]);
        assert_eq!(data_size, 100 * 2 * 2);
        assert_eq!(stream.len(), 44 + data_size as usize);
    }

    #[test]
    fn test_split_save_requires_stereo() {
        let format = WavFormat::new(1, 8000, 16).unwrap();
        let err =
            write_wave_file_split(Path::new("/tmp/unused.wav"), &format, &[0], &[0]).unwrap_err();
        assert!(matches!(err, Error::EncodingConsistency(_)));
    }
}
