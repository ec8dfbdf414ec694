use super::accumulator::InputAccumulator;
use super::backlog::OutputBacklog;
use super::metrics::{MetricsSink, MetricsWindow, NullSink, WindowTotals};
use crate::core::FramerConfig;
use crate::denoiser::Denoiser;
use crate::error::{AudioError, AudioResult};
use log::{debug, trace, warn};
use std::time::Duration;

/// Adapts caller-sized audio chunks to a fixed-frame denoiser.
///
/// Each call to [`process_into`](Self::process_into) takes a chunk of any
/// length and writes a chunk of the same length. Output trails input by exactly
/// one frame (`N` samples): the first `N` samples of a session are silence,
/// after which sample `i` of the output is sample `i - N` of the denoised
/// stream. The result does not depend on how the input is split into chunks.
///
/// One framer serves one session and owns its denoiser. After a fatal denoiser
/// error the framer refuses further input.
pub struct StreamingFramer<D: Denoiser> {
    config: FramerConfig,
    denoiser: D,
    accumulator: InputAccumulator,
    backlog: OutputBacklog,
    metrics: MetricsWindow,
    sink: Box<dyn MetricsSink>,
    frames_completed: u64,
    samples_in: u64,
    samples_out: u64,
    failed: bool,
}

impl<D: Denoiser> StreamingFramer<D> {
    /// Create a framer for one session
    pub fn new(config: FramerConfig, denoiser: D) -> AudioResult<Self> {
        config.validate()?;

        if let Some(required) = denoiser.required_frame_size() {
            if required != config.frame_size {
                return Err(AudioError::ConfigError(format!(
                    "Denoiser '{}' requires {}-sample frames, configured frame size is {}",
                    denoiser.name(),
                    required,
                    config.frame_size
                )));
            }
        }

        debug!(
            "framer created: denoiser={}, frame_size={}, metrics_interval={:?}",
            denoiser.name(),
            config.frame_size,
            config.metrics_interval
        );

        Ok(StreamingFramer {
            accumulator: InputAccumulator::new(config.frame_size),
            backlog: OutputBacklog::new(config.frame_size),
            metrics: MetricsWindow::new(config.metrics_interval, Duration::ZERO),
            sink: Box::new(NullSink),
            frames_completed: 0,
            samples_in: 0,
            samples_out: 0,
            failed: false,
            config,
            denoiser,
        })
    }

    /// Send metrics snapshots to `sink`
    pub fn with_sink(mut self, sink: impl MetricsSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    /// Start the first metrics window at `start` instead of zero
    pub fn starting_at(mut self, start: Duration) -> Self {
        self.metrics = MetricsWindow::new(self.metrics.interval(), start);
        self
    }

    /// Process one chunk, returning a newly allocated output chunk
    pub fn process(&mut self, input: &[f32], now: Duration) -> AudioResult<Vec<f32>> {
        let mut output = vec![0.0; input.len()];
        self.process_into(input, &mut output, now)?;
        Ok(output)
    }

    /// Process one chunk into a caller-provided output of the same length.
    ///
    /// Does not allocate. An empty chunk only runs the metrics flush check.
    pub fn process_into(&mut self, input: &[f32], output: &mut [f32], now: Duration) -> AudioResult<()> {
        if self.failed {
            return Err(AudioError::ProcessingError(
                "Session ended after a denoiser failure".to_string(),
            ));
        }

        if input.len() != output.len() {
            return Err(AudioError::BufferError(format!(
                "Output chunk has {} samples, input has {}",
                output.len(),
                input.len()
            )));
        }

        if let Some(snapshot) = self.metrics.poll(now) {
            if let Err(e) = self.sink.publish(&snapshot) {
                debug!("dropping metrics snapshot: {}", e);
            }
        }

        // Each step stays within the current frame: drain the samples that
        // precede this input, then collect the input itself. The backlog is
        // therefore empty whenever a frame completes.
        let mut pos = 0;
        while pos < input.len() {
            let step = (input.len() - pos).min(self.accumulator.remaining());
            self.backlog.drain_into(&mut output[pos..pos + step]);
            self.accumulator.push(&input[pos..pos + step]);
            pos += step;

            if self.accumulator.is_full() {
                self.complete_frame()?;
            }
        }

        self.samples_in += input.len() as u64;
        self.samples_out += output.len() as u64;
        debug_assert!(self.check_invariants().is_ok());
        Ok(())
    }

    fn complete_frame(&mut self) -> AudioResult<()> {
        let expected = self.config.frame_size;
        let result = self
            .denoiser
            .transform(self.accumulator.frame(), self.backlog.frame_mut());

        let written = match result {
            Ok(written) => written,
            Err(e) => {
                let e = if e.is_fatal() {
                    e
                } else {
                    AudioError::TransformFailed(e.to_string())
                };
                return Err(self.fail(e));
            }
        };

        if written != expected {
            return Err(self.fail(AudioError::MalformedFrame {
                expected,
                got: written,
            }));
        }

        self.metrics
            .record_frame(self.accumulator.frame(), self.backlog.frame());
        self.backlog.rewind();
        self.accumulator.reset();
        self.frames_completed += 1;

        if self.frames_completed == 1 {
            debug!("first frame denoised by {}", self.denoiser.name());
        }
        trace!("frame {} complete", self.frames_completed);
        Ok(())
    }

    fn fail(&mut self, err: AudioError) -> AudioError {
        warn!(
            "denoiser {} failed after {} frames: {}",
            self.denoiser.name(),
            self.frames_completed,
            err
        );
        self.failed = true;
        err
    }

    /// Verify cursor and backlog bounds
    pub fn check_invariants(&self) -> AudioResult<()> {
        let n = self.config.frame_size;
        let cursor = self.accumulator.cursor();
        let fill = self.backlog.fill();

        if cursor >= n {
            return Err(AudioError::ProcessingError(format!(
                "accumulator left full between calls ({} of {})",
                cursor, n
            )));
        }
        if fill > n {
            return Err(AudioError::ProcessingError(format!(
                "backlog fill {} exceeds frame size {}",
                fill, n
            )));
        }

        let expected_fill = if self.frames_completed == 0 { 0 } else { n - cursor };
        if fill != expected_fill {
            return Err(AudioError::ProcessingError(format!(
                "backlog fill {} out of step with accumulator cursor {}",
                fill, cursor
            )));
        }

        Ok(())
    }

    /// Session configuration
    pub fn config(&self) -> &FramerConfig {
        &self.config
    }

    /// The denoiser owned by this session
    pub fn denoiser(&self) -> &D {
        &self.denoiser
    }

    /// Fixed output delay in samples
    pub fn latency_samples(&self) -> usize {
        self.config.frame_size
    }

    /// Frames passed through the denoiser
    pub fn frames_completed(&self) -> u64 {
        self.frames_completed
    }

    /// Total input samples accepted
    pub fn samples_in(&self) -> u64 {
        self.samples_in
    }

    /// Total output samples delivered
    pub fn samples_out(&self) -> u64 {
        self.samples_out
    }

    /// Input samples waiting for the current frame to fill
    pub fn pending_input(&self) -> usize {
        self.accumulator.cursor()
    }

    /// Denoised samples not yet delivered
    pub fn backlog_fill(&self) -> usize {
        self.backlog.fill()
    }

    /// Sums accumulated in the current metrics window
    pub fn window_totals(&self) -> WindowTotals {
        self.metrics.totals()
    }

    /// Whether a fatal denoiser error ended this session
    pub fn is_failed(&self) -> bool {
        self.failed
    }
}
