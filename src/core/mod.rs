//! Core audio types and session configuration

/// Audio frame and channel types
pub mod audio;
/// Streaming session configuration
pub mod config;

pub use audio::{AudioFrame, Channels};
pub use config::FramerConfig;
