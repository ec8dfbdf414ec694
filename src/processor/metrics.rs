//! Periodic signal statistics for a streaming session.
//!
//! [`MetricsWindow`] accumulates per-frame sums on the audio path without
//! allocating. Once per interval the sums are turned into per-second rates,
//! handed to a [`MetricsSink`] and reset.

use crate::error::{AudioError, AudioResult};
use log::{debug, info};
use serde::Serialize;
use std::io::Write;
use std::sync::mpsc::{SyncSender, TrySendError};
use std::time::Duration;

/// Per-second rates for one metrics window
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct MetricsSnapshot {
    /// Samples pushed through the denoiser per second
    pub avg_samples_processed: f64,
    /// Sum of absolute input sample values per second
    pub avg_input_signal: f64,
    /// Sum of absolute output sample values per second
    pub avg_output_signal: f64,
    /// Signal added by the denoiser per second
    pub avg_signal_enhancement: f64,
    /// Signal removed by the denoiser per second
    pub avg_signal_suppression: f64,
}

/// Raw sums accumulated since the last flush
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WindowTotals {
    /// Samples in completed frames
    pub samples_processed: u64,
    /// Σ|x| over denoiser input
    pub input_energy: f64,
    /// Σ|y| over denoiser output
    pub output_energy: f64,
    /// Σ of positive per-frame (output - input) differences
    pub enhancement_energy: f64,
    /// Σ of magnitudes of negative per-frame differences
    pub suppression_energy: f64,
}

impl WindowTotals {
    fn rates(&self, interval: Duration) -> MetricsSnapshot {
        // Divide by the configured window, never by the frame count, so an
        // idle window reports zeros.
        let secs = interval.as_secs_f64();
        if secs <= 0.0 {
            return MetricsSnapshot::default();
        }
        MetricsSnapshot {
            avg_samples_processed: self.samples_processed as f64 / secs,
            avg_input_signal: self.input_energy / secs,
            avg_output_signal: self.output_energy / secs,
            avg_signal_enhancement: self.enhancement_energy / secs,
            avg_signal_suppression: self.suppression_energy / secs,
        }
    }
}

fn total_signal(samples: &[f32]) -> f64 {
    samples.iter().map(|&s| s.abs() as f64).sum()
}

/// Accumulate-and-reset cycle producing [`MetricsSnapshot`]s
#[derive(Debug, Clone)]
pub struct MetricsWindow {
    interval: Duration,
    last_flush: Duration,
    totals: WindowTotals,
}

impl MetricsWindow {
    /// Create a window that first flushes `interval` after `start`.
    ///
    /// A zero interval flushes on every poll and reports zero rates.
    pub fn new(interval: Duration, start: Duration) -> Self {
        MetricsWindow {
            interval,
            last_flush: start,
            totals: WindowTotals::default(),
        }
    }

    /// Flush period
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Time of the last flush
    pub fn last_flush(&self) -> Duration {
        self.last_flush
    }

    /// Sums accumulated in the current window
    pub fn totals(&self) -> WindowTotals {
        self.totals
    }

    /// Account for one completed frame
    pub fn record_frame(&mut self, input: &[f32], output: &[f32]) {
        let input_signal = total_signal(input);
        let output_signal = total_signal(output);
        let difference = output_signal - input_signal;

        self.totals.input_energy += input_signal;
        self.totals.output_energy += output_signal;
        if difference >= 0.0 {
            self.totals.enhancement_energy += difference;
        } else {
            self.totals.suppression_energy += difference.abs();
        }
        self.totals.samples_processed += input.len() as u64;
    }

    /// Whether a full interval has elapsed since the last flush
    pub fn is_due(&self, now: Duration) -> bool {
        now.saturating_sub(self.last_flush) >= self.interval
    }

    /// Snapshot the current rates and start a new window at `now`
    pub fn flush(&mut self, now: Duration) -> MetricsSnapshot {
        let snapshot = self.totals.rates(self.interval);
        self.totals = WindowTotals::default();
        self.last_flush = now;
        snapshot
    }

    /// Flush if due
    pub fn poll(&mut self, now: Duration) -> Option<MetricsSnapshot> {
        if self.is_due(now) {
            Some(self.flush(now))
        } else {
            None
        }
    }
}

/// Out-of-band consumer of metrics snapshots.
///
/// Delivery failures are not fatal: the framer logs them and drops the
/// snapshot.
pub trait MetricsSink {
    /// Deliver one snapshot
    fn publish(&mut self, snapshot: &MetricsSnapshot) -> AudioResult<()>;
}

impl<F: FnMut(&MetricsSnapshot)> MetricsSink for F {
    fn publish(&mut self, snapshot: &MetricsSnapshot) -> AudioResult<()> {
        self(snapshot);
        Ok(())
    }
}

/// Discards every snapshot
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl MetricsSink for NullSink {
    fn publish(&mut self, _snapshot: &MetricsSnapshot) -> AudioResult<()> {
        Ok(())
    }
}

/// Writes each snapshot to the `log` facade at info level.
///
/// Logging runs on the thread that calls the framer, so this sink suits batch
/// processing rather than real-time audio callbacks.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl MetricsSink for LogSink {
    fn publish(&mut self, s: &MetricsSnapshot) -> AudioResult<()> {
        info!(
            "noise suppression: {:.0} samples/s, input {:.2}/s, output {:.2}/s, enhancement {:.2}/s, suppression {:.2}/s",
            s.avg_samples_processed,
            s.avg_input_signal,
            s.avg_output_signal,
            s.avg_signal_enhancement,
            s.avg_signal_suppression
        );
        Ok(())
    }
}

/// Forwards snapshots over a bounded channel without blocking.
///
/// A full or disconnected channel drops the snapshot.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    sender: SyncSender<MetricsSnapshot>,
}

impl ChannelSink {
    /// Wrap the sending half of a `sync_channel`
    pub fn new(sender: SyncSender<MetricsSnapshot>) -> Self {
        ChannelSink { sender }
    }
}

impl MetricsSink for ChannelSink {
    fn publish(&mut self, snapshot: &MetricsSnapshot) -> AudioResult<()> {
        match self.sender.try_send(*snapshot) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(_)) => Err(AudioError::MetricsDropped("channel full")),
            Err(TrySendError::Disconnected(_)) => {
                Err(AudioError::MetricsDropped("channel disconnected"))
            }
        }
    }
}

/// Writes each snapshot as one line of JSON.
///
/// Serializes and writes on the calling thread. Use [`ChannelSink`] from a
/// real-time audio callback.
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    /// Create a sink writing to `writer`
    pub fn new(writer: W) -> Self {
        JsonLinesSink { writer }
    }

    /// Recover the writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> MetricsSink for JsonLinesSink<W> {
    fn publish(&mut self, snapshot: &MetricsSnapshot) -> AudioResult<()> {
        let line = serde_json::to_string(snapshot)
            .map_err(|e| AudioError::ProcessingError(e.to_string()))?;
        writeln!(self.writer, "{}", line)?;
        debug!("metrics snapshot written ({} bytes)", line.len());
        Ok(())
    }
}
