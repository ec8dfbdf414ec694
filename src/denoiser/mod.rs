//! Denoising transforms over fixed-size frames

pub mod gate;
pub mod passthrough;
pub mod rnnoise;

pub use gate::NoiseGate;
pub use passthrough::Passthrough;
pub use rnnoise::Rnnoise;

use crate::error::{AudioError, AudioResult};

/// A synchronous transform from one input frame to one output frame.
///
/// The framer hands in exactly one frame of `N` samples and an output slice of
/// the same length, and reuses both buffers on the next call, so
/// implementations must not keep references to either. The call should finish
/// within one frame duration; the framer does not enforce this.
pub trait Denoiser {
    /// Denoise `input` into `output`, returning the number of samples written.
    ///
    /// Anything other than `output.len()` is treated as a malformed frame and
    /// ends the session.
    fn transform(&mut self, input: &[f32], output: &mut [f32]) -> AudioResult<usize>;

    /// Short name for logs
    fn name(&self) -> &'static str;

    /// Frame size this denoiser requires, if it only supports one
    fn required_frame_size(&self) -> Option<usize> {
        None
    }
}

impl<D: Denoiser + ?Sized> Denoiser for Box<D> {
    fn transform(&mut self, input: &[f32], output: &mut [f32]) -> AudioResult<usize> {
        (**self).transform(input, output)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn required_frame_size(&self) -> Option<usize> {
        (**self).required_frame_size()
    }
}

/// Built-in denoiser choices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenoiserKind {
    /// Identity transform
    Passthrough,
    /// Frame-level noise gate
    Gate,
    /// RNNoise recurrent network
    Rnnoise,
}

impl DenoiserKind {
    /// Parse a denoiser name as accepted on the command line
    pub fn from_name(name: &str) -> AudioResult<Self> {
        match name.to_ascii_lowercase().as_str() {
            "passthrough" | "identity" | "none" => Ok(DenoiserKind::Passthrough),
            "gate" => Ok(DenoiserKind::Gate),
            "rnnoise" => Ok(DenoiserKind::Rnnoise),
            other => Err(AudioError::ConfigError(format!(
                "Unknown denoiser '{}', expected passthrough, gate or rnnoise",
                other
            ))),
        }
    }

    /// Construct the denoiser
    pub fn build(self) -> Box<dyn Denoiser> {
        match self {
            DenoiserKind::Passthrough => Box::new(Passthrough),
            DenoiserKind::Gate => Box::new(NoiseGate::default()),
            DenoiserKind::Rnnoise => Box::new(Rnnoise::new()),
        }
    }
}
