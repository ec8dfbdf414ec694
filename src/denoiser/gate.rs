use crate::error::{AudioError, AudioResult};

/// Frame-level noise gate.
///
/// Frames whose RMS falls below `threshold` are attenuated by `floor_gain`;
/// louder frames pass through unchanged. Stateless, so any frame size works.
#[derive(Clone, Debug)]
pub struct NoiseGate {
    threshold: f32,
    floor_gain: f32,
}

impl Default for NoiseGate {
    fn default() -> Self {
        NoiseGate {
            threshold: 0.01,
            floor_gain: 0.1,
        }
    }
}

impl NoiseGate {
    /// Create a gate with an RMS threshold and the gain applied below it
    pub fn new(threshold: f32, floor_gain: f32) -> AudioResult<Self> {
        if !(threshold >= 0.0) {
            return Err(AudioError::ConfigError(format!(
                "Gate threshold must be non-negative, got {}",
                threshold
            )));
        }
        if !(0.0..=1.0).contains(&floor_gain) {
            return Err(AudioError::ConfigError(format!(
                "Gate floor gain must be between 0.0 and 1.0, got {}",
                floor_gain
            )));
        }

        Ok(NoiseGate {
            threshold,
            floor_gain,
        })
    }

    /// RMS threshold
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    fn rms(samples: &[f32]) -> f32 {
        if samples.is_empty() {
            return 0.0;
        }

        let sum_squared: f32 = samples.iter().map(|&s| s * s).sum();
        (sum_squared / samples.len() as f32).sqrt()
    }
}

impl super::Denoiser for NoiseGate {
    fn transform(&mut self, input: &[f32], output: &mut [f32]) -> AudioResult<usize> {
        let n = input.len().min(output.len());
        let gain = if Self::rms(&input[..n]) < self.threshold {
            self.floor_gain
        } else {
            1.0
        };

        for (out, &x) in output[..n].iter_mut().zip(&input[..n]) {
            *out = x * gain;
        }

        Ok(n)
    }

    fn name(&self) -> &'static str {
        "gate"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::denoiser::Denoiser;

    #[test]
    fn test_quiet_frame_attenuated() {
        let mut gate = NoiseGate::new(0.1, 0.5).unwrap();
        let input = [0.01, -0.01, 0.02, -0.02];
        let mut output = [0.0; 4];

        gate.transform(&input, &mut output).unwrap();
        assert_eq!(output, [0.005, -0.005, 0.01, -0.01]);
    }

    #[test]
    fn test_loud_frame_untouched() {
        let mut gate = NoiseGate::new(0.1, 0.5).unwrap();
        let input = [0.5, -0.5, 0.5, -0.5];
        let mut output = [0.0; 4];

        gate.transform(&input, &mut output).unwrap();
        assert_eq!(output, input);
    }

    #[test]
    fn test_default_settings() {
        let gate = NoiseGate::default();
        assert_eq!(gate.threshold(), 0.01);
        assert_eq!(NoiseGate::new(0.2, 0.5).unwrap().threshold(), 0.2);
    }

    #[test]
    fn test_invalid_settings() {
        assert!(NoiseGate::new(-1.0, 0.5).is_err());
        assert!(NoiseGate::new(f32::NAN, 0.5).is_err());
        assert!(NoiseGate::new(0.1, 1.5).is_err());
    }
}
