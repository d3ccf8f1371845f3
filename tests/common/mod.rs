//! Common test utilities for speechwave integration tests
//!
//! Helpers for synthesizing RIFF/WAVE byte streams at every supported
//! sample layout and for generating test signals.

#![allow(dead_code)]

use std::io::Write;
use tempfile::NamedTempFile;

/// Assemble a complete WAV byte stream around a raw sample payload
pub fn synth_wav(
    format_tag: u16,
    channels: u16,
    sample_rate: u32,
    bits_per_sample: u16,
    block_align: u16,
    payload: &[u8],
) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(44 + payload.len());

    bytes.extend_from_slice(b"RIFF");
    bytes.extend_from_slice(&(36 + payload.len() as u32).to_le_bytes());
    bytes.extend_from_slice(b"WAVE");

    bytes.extend_from_slice(b"fmt ");
    bytes.extend_from_slice(&16u32.to_le_bytes());
    bytes.extend_from_slice(&format_tag.to_le_bytes());
    bytes.extend_from_slice(&channels.to_le_bytes());
    bytes.extend_from_slice(&sample_rate.to_le_bytes());
    bytes.extend_from_slice(&(sample_rate * block_align as u32).to_le_bytes());
    bytes.extend_from_slice(&block_align.to_le_bytes());
    bytes.extend_from_slice(&bits_per_sample.to_le_bytes());

    bytes.extend_from_slice(b"data");
    bytes.extend_from_slice(&(payload.len() as u32).to_le_bytes());
    bytes.extend_from_slice(payload);

    bytes
}

/// 16-bit PCM stream from interleaved i16 samples
pub fn synth_wav_i16(channels: u16, sample_rate: u32, samples: &[i16]) -> Vec<u8> {
    let mut payload = Vec::with_capacity(samples.len() * 2);
    for s in samples {
        payload.extend_from_slice(&s.to_le_bytes());
    }
    synth_wav(1, channels, sample_rate, 16, channels * 2, &payload)
}

/// 8-bit PCM stream from raw bytes
pub fn synth_wav_u8(channels: u16, sample_rate: u32, samples: &[u8]) -> Vec<u8> {
    synth_wav(1, channels, sample_rate, 8, channels, samples)
}

/// Packed 24-bit PCM stream from 3-byte little-endian sample groups
pub fn synth_wav_i24_packed(channels: u16, sample_rate: u32, samples: &[[u8; 3]]) -> Vec<u8> {
    let mut payload = Vec::with_capacity(samples.len() * 3);
    for s in samples {
        payload.extend_from_slice(s);
    }
    synth_wav(1, channels, sample_rate, 24, channels * 3, &payload)
}

/// 24-bit payload in 4-byte containers
pub fn synth_wav_i24_in_32(channels: u16, sample_rate: u32, words: &[i32]) -> Vec<u8> {
    let mut payload = Vec::with_capacity(words.len() * 4);
    for w in words {
        payload.extend_from_slice(&w.to_le_bytes());
    }
    synth_wav(1, channels, sample_rate, 24, channels * 4, &payload)
}

/// 32-bit PCM stream from interleaved i32 samples
pub fn synth_wav_i32(channels: u16, sample_rate: u32, samples: &[i32]) -> Vec<u8> {
    let mut payload = Vec::with_capacity(samples.len() * 4);
    for s in samples {
        payload.extend_from_slice(&s.to_le_bytes());
    }
    synth_wav(1, channels, sample_rate, 32, channels * 4, &payload)
}

/// One second of a sine wave as i16 samples, mono
pub fn sine_i16(sample_rate: u32, frames: usize, frequency: f64) -> Vec<i16> {
    (0..frames)
        .map(|i| {
            let t = i as f64 / sample_rate as f64;
            (0.5 * (2.0 * std::f64::consts::PI * frequency * t).sin() * 32767.0) as i16
        })
        .collect()
}

/// Persist a byte stream to a named temp file
pub fn write_temp(bytes: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(bytes).expect("write temp file");
    file.flush().expect("flush temp file");
    file
}
