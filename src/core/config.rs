use crate::error::{AudioError, AudioResult};
use std::time::Duration;

/// Frame size the DTLN model was trained on
pub const DEFAULT_FRAME_SIZE: usize = 512;

/// Default metrics flush period
pub const DEFAULT_METRICS_INTERVAL: Duration = Duration::from_millis(5000);

/// Default session sample rate in Hz
pub const DEFAULT_SAMPLE_RATE: u32 = 16000;

/// Default render chunk used when feeding a recorded buffer in batch
pub const DEFAULT_CHUNK_SIZE: usize = 4096;

/// Settings for one streaming session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FramerConfig {
    /// Fixed transform unit N, in samples
    pub frame_size: usize,
    /// Period between metrics snapshots
    pub metrics_interval: Duration,
    /// Session sample rate in Hz
    pub sample_rate: u32,
}

impl Default for FramerConfig {
    fn default() -> Self {
        FramerConfig {
            frame_size: DEFAULT_FRAME_SIZE,
            metrics_interval: DEFAULT_METRICS_INTERVAL,
            sample_rate: DEFAULT_SAMPLE_RATE,
        }
    }
}

impl FramerConfig {
    /// Set the frame size
    pub fn with_frame_size(mut self, frame_size: usize) -> Self {
        self.frame_size = frame_size;
        self
    }

    /// Set the metrics interval
    pub fn with_metrics_interval(mut self, interval: Duration) -> Self {
        self.metrics_interval = interval;
        self
    }

    /// Set the metrics interval in milliseconds
    pub fn with_metrics_interval_ms(self, interval_ms: u64) -> Self {
        self.with_metrics_interval(Duration::from_millis(interval_ms))
    }

    /// Set the sample rate
    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    /// Reject settings the framer cannot run with
    pub fn validate(&self) -> AudioResult<()> {
        if self.frame_size == 0 {
            return Err(AudioError::ConfigError(
                "Frame size must be greater than zero".to_string(),
            ));
        }

        if self.metrics_interval.is_zero() {
            return Err(AudioError::ConfigError(
                "Metrics interval must be greater than zero".to_string(),
            ));
        }

        if self.sample_rate == 0 {
            return Err(AudioError::InvalidSampleRate { rate: 0 });
        }

        Ok(())
    }

    /// Duration of one frame at the session rate.
    ///
    /// This is both the real-time budget of a single transform and the fixed
    /// output latency of the framer.
    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs_f64(self.frame_size as f64 / self.sample_rate as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FramerConfig::default();
        assert_eq!(config.frame_size, 512);
        assert_eq!(config.metrics_interval, Duration::from_millis(5000));
        assert_eq!(config.sample_rate, 16000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = FramerConfig::default()
            .with_frame_size(480)
            .with_metrics_interval_ms(1000)
            .with_sample_rate(48000);

        assert_eq!(config.frame_size, 480);
        assert_eq!(config.metrics_interval, Duration::from_secs(1));
        assert_eq!(config.frame_duration(), Duration::from_millis(10));
    }

    #[test]
    fn test_validate_rejects_zero() {
        assert!(FramerConfig::default().with_frame_size(0).validate().is_err());
        assert!(FramerConfig::default().with_metrics_interval_ms(0).validate().is_err());
        assert!(FramerConfig::default().with_sample_rate(0).validate().is_err());
    }

    #[test]
    fn test_frame_duration_default() {
        // 512 samples at 16 kHz
        assert_eq!(FramerConfig::default().frame_duration(), Duration::from_millis(32));
    }
}
