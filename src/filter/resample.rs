use crate::core::{AudioFrame, Channels};
use crate::error::{AudioError, AudioResult};
use log::debug;
use rubato::{FftFixedInOut, Resampler};

/// Input block size handed to the FFT resampler
const RESAMPLE_CHUNK: usize = 1024;

/// Mono sample-rate converter, used to bring file input to the session rate
pub struct Resample {
    output_rate: u32,
}

impl Resample {
    /// Create a resampler targeting `output_rate`
    pub fn new(output_rate: u32) -> AudioResult<Self> {
        if output_rate == 0 {
            return Err(AudioError::InvalidSampleRate { rate: 0 });
        }

        Ok(Resample { output_rate })
    }

    /// Get the output sample rate
    pub fn output_rate(&self) -> u32 {
        self.output_rate
    }

    /// Number of output samples that correspond to `len` input samples
    fn expected_len(len: usize, input_rate: u32, output_rate: u32) -> usize {
        (len as u64 * output_rate as u64).div_ceil(input_rate as u64) as usize
    }

    fn resample_mono(&self, input: &[f32], input_rate: u32) -> AudioResult<Vec<f32>> {
        let mut resampler = FftFixedInOut::<f32>::new(
            input_rate as usize,
            self.output_rate as usize,
            RESAMPLE_CHUNK,
            1,
        )
        .map_err(|e| AudioError::ResamplingError(e.to_string()))?;

        let delay = resampler.output_delay();
        let expected = Self::expected_len(input.len(), input_rate, self.output_rate);
        let chunk_size = resampler.input_frames_next();
        let mut block = vec![0.0f32; chunk_size];
        let mut output = Vec::with_capacity(expected + delay + chunk_size);

        // Keep feeding (zero padding past the end) until the delayed tail is out
        let mut pos = 0;
        while output.len() < delay + expected {
            block.fill(0.0);
            if pos < input.len() {
                let end = (pos + chunk_size).min(input.len());
                block[..end - pos].copy_from_slice(&input[pos..end]);
            }
            pos += chunk_size;

            let result = resampler
                .process(&[block.as_slice()], None)
                .map_err(|e| AudioError::ResamplingError(e.to_string()))?;
            output.extend_from_slice(&result[0]);
        }

        output.drain(..delay);
        output.truncate(expected);
        Ok(output)
    }
}

impl super::Filter for Resample {
    fn process(&mut self, frame: &AudioFrame) -> AudioResult<AudioFrame> {
        if frame.channels() != Channels::Mono {
            return Err(AudioError::InvalidChannels {
                expected: 1,
                got: frame.channels().count(),
            });
        }

        if frame.sample_rate() == self.output_rate {
            return Ok(frame.clone());
        }

        debug!(
            "resampling {} samples from {} Hz to {} Hz",
            frame.samples().len(),
            frame.sample_rate(),
            self.output_rate
        );

        let resampled = self.resample_mono(frame.samples(), frame.sample_rate())?;
        AudioFrame::mono(resampled, self.output_rate)
    }
}
