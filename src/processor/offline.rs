use super::framer::StreamingFramer;
use super::ProcessingStats;
use crate::denoiser::Denoiser;
use crate::error::{AudioError, AudioResult};
use log::info;
use std::time::{Duration, Instant};

/// Result of denoising a whole recording
#[derive(Debug, Clone)]
pub struct DenoiseOutput {
    /// Denoised samples, aligned with and as long as the input
    pub samples: Vec<f32>,
    /// Session summary
    pub stats: ProcessingStats,
}

/// Denoise a complete recording through a fresh streaming session.
///
/// The recording is fed in `chunk_size` pieces, the way a render callback
/// would deliver it, with timestamps derived from the sample position so
/// metrics windows follow audio time. One frame of silence is appended to push
/// the tail through the denoiser, and the framer's latency is cut from the
/// front of the result.
pub fn denoise_buffer<D: Denoiser>(
    mut framer: StreamingFramer<D>,
    samples: &[f32],
    chunk_size: usize,
) -> AudioResult<DenoiseOutput> {
    if chunk_size == 0 {
        return Err(AudioError::ConfigError(
            "Chunk size must be greater than zero".to_string(),
        ));
    }
    if framer.samples_in() != 0 {
        return Err(AudioError::ProcessingError(
            "Batch denoising needs a framer that has not processed audio".to_string(),
        ));
    }

    let latency = framer.latency_samples();
    let sample_rate = framer.config().sample_rate as f64;
    let total = samples.len() + latency;

    let mut padded = Vec::with_capacity(total);
    padded.extend_from_slice(samples);
    padded.resize(total, 0.0);

    let mut output = vec![0.0; total];
    let started = Instant::now();

    let mut pos = 0;
    for (chunk_in, chunk_out) in padded.chunks(chunk_size).zip(output.chunks_mut(chunk_size)) {
        let now = Duration::from_secs_f64(pos as f64 / sample_rate);
        framer.process_into(chunk_in, chunk_out, now)?;
        pos += chunk_in.len();
    }

    let elapsed = started.elapsed();
    output.drain(..latency);

    let stats = ProcessingStats {
        frames_processed: framer.frames_completed(),
        samples_processed: samples.len() as u64,
        audio_duration: Duration::from_secs_f64(samples.len() as f64 / sample_rate),
        elapsed,
    };

    info!(
        "denoised {} samples in {} frames with {}: {:?} ({:.1}x real time)",
        stats.samples_processed,
        stats.frames_processed,
        framer.denoiser().name(),
        stats.elapsed,
        stats.realtime_factor()
    );

    Ok(DenoiseOutput {
        samples: output,
        stats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FramerConfig;
    use crate::denoiser::{NoiseGate, Passthrough};

    fn framer(frame_size: usize) -> StreamingFramer<Passthrough> {
        StreamingFramer::new(FramerConfig::default().with_frame_size(frame_size), Passthrough).unwrap()
    }

    #[test]
    fn test_identity_round_trip_is_aligned() {
        let input: Vec<f32> = (0..1000).map(|i| (i as f32 * 0.01).sin()).collect();

        let result = denoise_buffer(framer(64), &input, 100).unwrap();
        assert_eq!(result.samples, input);
        // 1000 + 64 samples of which 1024 form whole frames
        assert_eq!(result.stats.frames_processed, 16);
        assert_eq!(result.stats.samples_processed, 1000);
    }

    #[test]
    fn test_chunk_size_does_not_matter() {
        let input: Vec<f32> = (0..777).map(|i| ((i % 50) as f32 - 25.0) / 100.0).collect();
        let gate = || {
            StreamingFramer::new(
                FramerConfig::default().with_frame_size(32),
                NoiseGate::new(0.1, 0.2).unwrap(),
            )
            .unwrap()
        };

        let a = denoise_buffer(gate(), &input, 4096).unwrap();
        let b = denoise_buffer(gate(), &input, 7).unwrap();
        assert_eq!(a.samples, b.samples);
    }

    #[test]
    fn test_empty_recording() {
        let result = denoise_buffer(framer(16), &[], 4096).unwrap();
        assert!(result.samples.is_empty());
        assert_eq!(result.stats.frames_processed, 1);
    }

    #[test]
    fn test_rejects_zero_chunk_and_used_framer() {
        assert!(denoise_buffer(framer(16), &[0.0; 4], 0).is_err());

        let mut used = framer(16);
        used.process(&[0.0; 4], Duration::ZERO).unwrap();
        assert!(denoise_buffer(used, &[0.0; 4], 16).is_err());
    }
}
