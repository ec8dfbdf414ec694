//! Audio filter implementations

pub mod resample;

pub use resample::Resample;

use crate::core::AudioFrame;
use crate::error::AudioResult;

/// Trait for whole-buffer audio filters applied before a session
pub trait Filter {
    /// Process an audio frame through this filter
    fn process(&mut self, frame: &AudioFrame) -> AudioResult<AudioFrame>;
}
