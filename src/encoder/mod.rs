//! Export of recordings to container formats

pub mod wav;

pub use wav::{encode_wav_bytes, Pcm16WavEncoder};

use crate::core::AudioFrame;
use crate::error::AudioResult;

/// Consumer of finished audio
pub trait Encoder {
    /// Append a block of audio
    fn encode(&mut self, frame: &AudioFrame) -> AudioResult<()>;

    /// Write trailing headers; no further audio is accepted afterwards
    fn finalize(&mut self) -> AudioResult<()> {
        Ok(())
    }
}
