use crate::error::AudioResult;

/// Identity denoiser: copies each frame through unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

impl super::Denoiser for Passthrough {
    fn transform(&mut self, input: &[f32], output: &mut [f32]) -> AudioResult<usize> {
        let n = input.len().min(output.len());
        output[..n].copy_from_slice(&input[..n]);
        Ok(n)
    }

    fn name(&self) -> &'static str {
        "passthrough"
    }
}
