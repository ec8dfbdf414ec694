//! Audio decoder implementations

pub mod symphonia;

pub use self::symphonia::SymphoniaDecoder;

use crate::core::AudioFrame;
use crate::error::AudioResult;
use std::path::Path;

/// Trait for audio decoders
pub trait Decoder {
    /// Get next block of audio from the stream
    fn decode_frame(&mut self) -> AudioResult<Option<AudioFrame>>;

    /// Check if decoder is finished
    fn is_finished(&self) -> bool;
}

/// Decode a whole file into a single mono frame at its native rate
pub fn decode_file_mono<P: AsRef<Path>>(path: P) -> AudioResult<AudioFrame> {
    let mut decoder = SymphoniaDecoder::from_file(path)?;
    let sample_rate = decoder.sample_rate();

    let mut samples = Vec::new();
    while let Some(frame) = decoder.decode_frame()? {
        samples.extend(frame.into_mono().into_samples());
    }

    AudioFrame::mono(samples, sample_rate)
}
