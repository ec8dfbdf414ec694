#![warn(missing_docs)]

//! # denoise-rs: streaming speech denoising
//!
//! Feeds audio of any chunk size through a denoiser that only understands
//! fixed-size frames, with a fixed one-frame latency and periodic signal
//! metrics.
//!
//! ## Features
//!
//! - **Stream** - `StreamingFramer` resegments caller chunks into model frames
//! - **Denoise** - pluggable `Denoiser` trait (passthrough, noise gate, RNNoise)
//! - **Measure** - per-second signal enhancement/suppression snapshots
//! - **Batch** - denoise a whole recording with the latency removed
//! - **Export** - mono 16-bit PCM WAV, to file or bytes
//! - **CLI** - `denoise` binary for files
//!
//! ## Quick Start
//!
//! ```ignore
//! use denoise_rs::{FramerConfig, StreamingFramer};
//! use denoise_rs::denoiser::Passthrough;
//! use std::time::Duration;
//!
//! let mut framer = StreamingFramer::new(FramerConfig::default(), Passthrough)?;
//!
//! // Render callback: 128 samples in, 128 samples out
//! let input = [0.0f32; 128];
//! let mut output = [0.0f32; 128];
//! framer.process_into(&input, &mut output, Duration::from_millis(8))?;
//! ```

/// Core audio types and configuration
pub mod core;
/// Error types for audio operations
pub mod error;
/// Audio decoder implementations
pub mod decoder;
/// Fixed-frame denoisers
pub mod denoiser;
/// Audio filter implementations
pub mod filter;
/// Audio encoder implementations
pub mod encoder;
/// Streaming framer, metrics and batch processing
pub mod processor;

pub use crate::core::{AudioFrame, Channels, FramerConfig};
pub use denoiser::Denoiser;
pub use error::{AudioError, AudioResult};
pub use processor::{MetricsSnapshot, StreamingFramer};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
