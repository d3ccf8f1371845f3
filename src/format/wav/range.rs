//! Time-range extraction from decoded waveforms

use super::decoder::{decode_file, ChannelLayout};
use super::encoder::write_wave_file;
use super::header::WavFormat;
use crate::error::{Error, Result};
use std::path::Path;

/// Slice an interleaved buffer down to `[start_seconds, end_seconds)`
///
/// The bounds must satisfy `0 <= start < end <= duration`, where the
/// duration is computed over whole frames (`samples.len() / channels`).
/// Any violation fails with `InvalidRange` and produces no partial result.
/// The descriptor is not modified; the returned buffer's frame count is
/// implied by its length.
pub fn slice_seconds(
    format: &WavFormat,
    samples: &[i32],
    start_seconds: f64,
    end_seconds: f64,
) -> Result<Vec<i32>> {
    if format.sample_rate == 0 {
        return Err(Error::invalid_range("Sample rate is zero"));
    }
    if start_seconds.is_nan() || end_seconds.is_nan() || start_seconds < 0.0 {
        return Err(Error::invalid_range(format!(
            "Bounds [{}, {}) are not valid times",
            start_seconds, end_seconds
        )));
    }
    if start_seconds >= end_seconds {
        return Err(Error::invalid_range(format!(
            "Start {}s is not before end {}s",
            start_seconds, end_seconds
        )));
    }

    let channels = format.channels as usize;
    let rate = format.sample_rate as f64;
    let num_frames = samples.len() / channels;
    let duration = num_frames as f64 / rate;

    if end_seconds > duration {
        return Err(Error::invalid_range(format!(
            "End {}s is past the waveform duration {}s",
            end_seconds, duration
        )));
    }

    let start_index = (start_seconds * rate).floor() as usize * channels;
    // Clamp guards float round-off when end_seconds lands exactly on the
    // duration.
    let end_index = ((end_seconds * rate).floor() as usize * channels).min(samples.len());

    Ok(samples[start_index..end_index.max(start_index)].to_vec())
}

/// Decode a file and slice it by time range
pub fn extract_range(
    path: &Path,
    start_seconds: f64,
    end_seconds: f64,
) -> Result<(WavFormat, Vec<i32>)> {
    let wave = decode_file(path, ChannelLayout::Interleaved)?;
    let subset = slice_seconds(&wave.format, wave.interleaved(), start_seconds, end_seconds)?;
    Ok((wave.format, subset))
}

/// Decode, slice and re-encode a file's time range to a new path
pub fn extract_range_to_file(
    src_path: &Path,
    start_seconds: f64,
    end_seconds: f64,
    dst_path: &Path,
) -> Result<()> {
    let (format, subset) = extract_range(src_path, start_seconds, end_seconds)?;
    write_wave_file(dst_path, &format, &subset)
}
