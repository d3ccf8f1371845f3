//! Sample-level codec between on-disk PCM bytes and the normalized domain

pub mod sample;

pub use sample::{narrow_to_i16, widen_from_i16, SampleEncoding, NORMALIZED_MAX};
