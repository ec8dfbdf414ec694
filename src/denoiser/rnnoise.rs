use crate::error::{AudioError, AudioResult};
use log::trace;
use nnnoiseless::DenoiseState;

/// Scale between normalized f32 samples and the i16 range RNNoise expects
const PCM_SCALE: f32 = 32768.0;

/// RNNoise denoiser backed by `nnnoiseless`.
///
/// The network carries recurrent state between frames, so one instance belongs
/// to one session. It only accepts frames of [`Rnnoise::FRAME_SIZE`] samples
/// (10 ms at 48 kHz).
pub struct Rnnoise {
    state: Box<DenoiseState<'static>>,
    scaled_in: Vec<f32>,
    scaled_out: Vec<f32>,
    last_vad: f32,
}

impl Rnnoise {
    /// Frame size required by RNNoise
    pub const FRAME_SIZE: usize = DenoiseState::FRAME_SIZE;

    /// Create a fresh RNNoise state
    pub fn new() -> Self {
        Rnnoise {
            state: DenoiseState::new(),
            scaled_in: vec![0.0; Self::FRAME_SIZE],
            scaled_out: vec![0.0; Self::FRAME_SIZE],
            last_vad: 0.0,
        }
    }

    /// Voice activity probability of the last frame
    pub fn last_vad(&self) -> f32 {
        self.last_vad
    }
}

impl Default for Rnnoise {
    fn default() -> Self {
        Self::new()
    }
}

impl super::Denoiser for Rnnoise {
    fn transform(&mut self, input: &[f32], output: &mut [f32]) -> AudioResult<usize> {
        if input.len() != Self::FRAME_SIZE || output.len() != Self::FRAME_SIZE {
            return Err(AudioError::TransformFailed(format!(
                "RNNoise needs {}-sample frames, got {} in / {} out",
                Self::FRAME_SIZE,
                input.len(),
                output.len()
            )));
        }

        for (dst, &x) in self.scaled_in.iter_mut().zip(input) {
            *dst = x * PCM_SCALE;
        }

        self.last_vad = self.state.process_frame(&mut self.scaled_out, &self.scaled_in);
        trace!("rnnoise vad {:.2}", self.last_vad());

        for (dst, &y) in output.iter_mut().zip(&self.scaled_out) {
            *dst = y / PCM_SCALE;
        }

        Ok(Self::FRAME_SIZE)
    }

    fn name(&self) -> &'static str {
        "rnnoise"
    }

    fn required_frame_size(&self) -> Option<usize> {
        Some(Self::FRAME_SIZE)
    }
}
