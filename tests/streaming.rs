use denoise_rs::denoiser::{NoiseGate, Passthrough};
use denoise_rs::processor::{ChannelSink, MetricsSnapshot};
use denoise_rs::{AudioResult, Denoiser, FramerConfig, StreamingFramer};
use std::sync::mpsc::sync_channel;
use std::time::Duration;

const N: usize = 512;

/// Deterministic chunk lengths in 0..=max
fn chunk_lengths(seed: u64, count: usize, max: usize) -> Vec<usize> {
    let mut state = seed;
    (0..count)
        .map(|_| {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            ((state >> 33) as usize) % (max + 1)
        })
        .collect()
}

fn signal(len: usize) -> Vec<f32> {
    (0..len)
        .map(|i| 0.3 * (i as f32 * 0.05).sin() + 0.01 * ((i * 7919 % 101) as f32 / 101.0 - 0.5))
        .collect()
}

fn run_chunked<D: Denoiser>(framer: &mut StreamingFramer<D>, input: &[f32], lengths: &[usize]) -> Vec<f32> {
    let mut output = Vec::with_capacity(input.len());
    let mut pos = 0;
    for &len in lengths {
        let end = (pos + len).min(input.len());
        output.extend(framer.process(&input[pos..end], Duration::ZERO).unwrap());
        framer.check_invariants().unwrap();
        pos = end;
    }
    output.extend(framer.process(&input[pos..], Duration::ZERO).unwrap());
    framer.check_invariants().unwrap();
    output
}

/// Doubles even frames and halves odd ones
struct Alternating {
    frame: usize,
}

impl Denoiser for Alternating {
    fn transform(&mut self, input: &[f32], output: &mut [f32]) -> AudioResult<usize> {
        let gain = if self.frame % 2 == 0 { 2.0 } else { 0.5 };
        self.frame += 1;
        for (y, &x) in output.iter_mut().zip(input) {
            *y = x * gain;
        }
        Ok(output.len())
    }

    fn name(&self) -> &'static str {
        "alternating"
    }
}

#[test]
fn output_length_matches_input_for_any_chunking() {
    let input = signal(20_000);
    for (seed, max) in [(1, 50), (2, 700), (3, 3000), (4, 1)] {
        let lengths = chunk_lengths(seed, 200, max);
        let mut framer = StreamingFramer::new(FramerConfig::default(), Passthrough).unwrap();

        let output = run_chunked(&mut framer, &input, &lengths);
        assert_eq!(output.len(), input.len());
        assert_eq!(framer.samples_in(), framer.samples_out());
    }
}

#[test]
fn first_frame_of_output_is_silence() {
    let input = vec![0.75f32; 4 * N];
    for (seed, max) in [(5, 128), (6, 1024), (7, 4096)] {
        let lengths = chunk_lengths(seed, 50, max);
        let mut framer = StreamingFramer::new(FramerConfig::default(), Passthrough).unwrap();

        let output = run_chunked(&mut framer, &input, &lengths);
        assert!(output[..N].iter().all(|&s| s == 0.0));
        assert!(output[N..].iter().all(|&s| s == 0.75));
    }
}

#[test]
fn exactly_one_frame_in_one_call() {
    let input = signal(N);
    let mut framer = StreamingFramer::new(FramerConfig::default(), Passthrough).unwrap();

    let first = framer.process(&input, Duration::ZERO).unwrap();
    assert_eq!(first, vec![0.0; N]);
    assert_eq!(framer.backlog_fill(), N);

    let second = framer.process(&vec![0.0; N], Duration::ZERO).unwrap();
    assert_eq!(second, input);
}

#[test]
fn multiple_frames_in_one_call() {
    let mut framer = StreamingFramer::new(FramerConfig::default(), Passthrough).unwrap();
    framer.process(&signal(100), Duration::ZERO).unwrap();
    let before = framer.window_totals().samples_processed;

    // Realign so the next call completes exactly k frames
    framer.process(&signal(N - 100), Duration::ZERO).unwrap();
    let aligned = framer.window_totals().samples_processed;
    assert_eq!(aligned - before, N as u64);

    let k = 5;
    framer.process(&signal(k * N), Duration::ZERO).unwrap();
    assert_eq!(framer.frames_completed(), 1 + k as u64);
    assert_eq!(framer.window_totals().samples_processed - aligned, (k * N) as u64);
}

#[test]
fn chunking_does_not_change_output() {
    let input = signal(1000);
    let gate = || {
        StreamingFramer::new(FramerConfig::default(), NoiseGate::new(0.2, 0.3).unwrap()).unwrap()
    };

    let mut one = gate();
    let whole = one.process(&input, Duration::ZERO).unwrap();

    let mut two = gate();
    let mut split = two.process(&input[..400], Duration::ZERO).unwrap();
    split.extend(two.process(&input[400..], Duration::ZERO).unwrap());

    assert_eq!(whole, split);

    let long = signal(10_000);
    let mut a = gate();
    let mut b = gate();
    let out_a = run_chunked(&mut a, &long, &chunk_lengths(11, 100, 900));
    let out_b = run_chunked(&mut b, &long, &chunk_lengths(12, 100, 128));
    assert_eq!(out_a, out_b);
}

#[test]
fn idle_window_reports_zero_rates() {
    let (tx, rx) = sync_channel(4);
    let mut framer = StreamingFramer::new(FramerConfig::default(), Passthrough)
        .unwrap()
        .with_sink(ChannelSink::new(tx));

    // Partial frame only: nothing completes in the first window
    framer.process(&signal(N - 1), Duration::from_millis(10)).unwrap();
    framer.process(&[], Duration::from_millis(5000)).unwrap();

    let snapshot = rx.try_recv().unwrap();
    assert_eq!(snapshot, MetricsSnapshot::default());
    for rate in [
        snapshot.avg_samples_processed,
        snapshot.avg_input_signal,
        snapshot.avg_output_signal,
        snapshot.avg_signal_enhancement,
        snapshot.avg_signal_suppression,
    ] {
        assert!(!rate.is_nan());
    }
}

#[test]
fn enhancement_minus_suppression_matches_signed_difference() {
    let frame_size = 64;
    let input = signal(frame_size * 9 + 17);
    let config = FramerConfig::default().with_frame_size(frame_size);
    let mut framer = StreamingFramer::new(config, Alternating { frame: 0 }).unwrap();

    run_chunked(&mut framer, &input, &chunk_lengths(21, 40, 50));
    assert_eq!(framer.frames_completed(), 9);

    let expected: f64 = input
        .chunks_exact(frame_size)
        .enumerate()
        .map(|(i, frame)| {
            let gain = if i % 2 == 0 { 2.0f32 } else { 0.5 };
            let input_signal: f64 = frame.iter().map(|&x| x.abs() as f64).sum();
            let output_signal: f64 = frame.iter().map(|&x| (x * gain).abs() as f64).sum();
            output_signal - input_signal
        })
        .sum();

    let totals = framer.window_totals();
    let recorded = totals.enhancement_energy - totals.suppression_energy;
    assert!((recorded - expected).abs() < 1e-9);
    assert!(totals.enhancement_energy > 0.0);
    assert!(totals.suppression_energy > 0.0);
}

#[test]
fn sessions_are_independent() {
    let input = signal(3 * N);
    let mut a = StreamingFramer::new(FramerConfig::default(), Passthrough).unwrap();
    let mut b = StreamingFramer::new(FramerConfig::default(), Passthrough).unwrap();

    let out_a = a.process(&input, Duration::ZERO).unwrap();
    b.process(&vec![1.0; 100], Duration::ZERO).unwrap();
    let out_a2 = a.process(&input, Duration::ZERO).unwrap();

    assert_eq!(&out_a[N..], &input[..2 * N]);
    assert_eq!(&out_a2[..N], &input[2 * N..]);
    assert_eq!(b.pending_input(), 100);
}

#[test]
fn each_snapshot_covers_frames_completed_in_its_window() {
    let frame_size = 64;
    let interval = Duration::from_millis(500);
    let config = FramerConfig::default()
        .with_frame_size(frame_size)
        .with_metrics_interval_ms(500);
    let (tx, rx) = sync_channel(8);
    let mut framer = StreamingFramer::new(config, Alternating { frame: 0 })
        .unwrap()
        .with_sink(ChannelSink::new(tx));

    let input = signal(460);
    // (chunk end, timestamp in ms). The 500 ms call flushes the first window
    // and then completes three more frames.
    let calls = [(100, 0), (200, 250), (400, 500), (400, 750), (460, 1000), (460, 1500)];
    let mut pos = 0;
    for (end, ms) in calls {
        framer
            .process(&input[pos..end], Duration::from_millis(ms))
            .unwrap();
        pos = end;
    }
    assert_eq!(framer.frames_completed(), 7);

    let frame_difference = |i: usize| -> f64 {
        let frame = &input[i * frame_size..(i + 1) * frame_size];
        let gain = if i % 2 == 0 { 2.0f32 } else { 0.5 };
        let input_signal: f64 = frame.iter().map(|&x| x.abs() as f64).sum();
        let output_signal: f64 = frame.iter().map(|&x| (x * gain).abs() as f64).sum();
        output_signal - input_signal
    };

    let snapshots: Vec<MetricsSnapshot> = rx.try_iter().collect();
    let windows = [0..3, 3..6, 6..7];
    assert_eq!(snapshots.len(), windows.len());

    let secs = interval.as_secs_f64();
    for (snapshot, frames) in snapshots.iter().zip(windows) {
        let expected_samples = (frames.len() * frame_size) as f64;
        let expected_difference: f64 = frames.map(&frame_difference).sum();

        assert_eq!(snapshot.avg_samples_processed * secs, expected_samples);
        let recorded =
            (snapshot.avg_signal_enhancement - snapshot.avg_signal_suppression) * secs;
        assert!((recorded - expected_difference).abs() < 1e-9);
    }
}
