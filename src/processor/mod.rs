//! Streaming frame resegmentation, metrics and batch processing

pub mod accumulator;
pub mod backlog;
pub mod framer;
pub mod metrics;
pub mod offline;

pub use accumulator::InputAccumulator;
pub use backlog::OutputBacklog;
pub use framer::StreamingFramer;
pub use metrics::{
    ChannelSink, JsonLinesSink, LogSink, MetricsSink, MetricsSnapshot, MetricsWindow, NullSink,
    WindowTotals,
};
pub use offline::{denoise_buffer, DenoiseOutput};

use std::time::Duration;

/// Summary of a finished processing session
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProcessingStats {
    /// Total frames passed through the denoiser
    pub frames_processed: u64,
    /// Total input samples processed
    pub samples_processed: u64,
    /// Length of the processed audio
    pub audio_duration: Duration,
    /// Wall-clock time spent processing
    pub elapsed: Duration,
}

impl ProcessingStats {
    /// Audio seconds processed per wall-clock second
    pub fn realtime_factor(&self) -> f64 {
        if self.elapsed.is_zero() {
            return f64::INFINITY;
        }
        self.audio_duration.as_secs_f64() / self.elapsed.as_secs_f64()
    }
}
