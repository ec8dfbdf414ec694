use std::io;
use thiserror::Error;

/// Result type for audio operations
pub type AudioResult<T> = Result<T, AudioError>;

/// Error types for capture, denoising and export
#[derive(Error, Debug)]
pub enum AudioError {
    /// IO error (file operations, disk access)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Unsupported audio format
    #[error("Unsupported audio format: {0}")]
    UnsupportedFormat(String),

    /// Decoding failed
    #[error("Decode error: {0}")]
    DecodeError(String),

    /// Encoding failed
    #[error("Encode error: {0}")]
    EncodeError(String),

    /// Resampling operation failed
    #[error("Resampling error: {0}")]
    ResamplingError(String),

    /// Invalid channel configuration
    #[error("Invalid channel configuration: expected {expected}, got {got}")]
    InvalidChannels {
        /// Expected number of channels
        expected: u32,
        /// Got number of channels
        got: u32,
    },

    /// Invalid sample rate
    #[error("Invalid sample rate: {rate}")]
    InvalidSampleRate {
        /// The invalid sample rate
        rate: u32,
    },

    /// Buffer-related error
    #[error("Buffer error: {0}")]
    BufferError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The denoiser produced a frame of the wrong length
    #[error("Malformed frame from denoiser: expected {expected} samples, got {got}")]
    MalformedFrame {
        /// Configured frame size
        expected: usize,
        /// Samples actually written
        got: usize,
    },

    /// The denoiser failed to transform a frame
    #[error("Denoiser transform failed: {0}")]
    TransformFailed(String),

    /// A metrics snapshot could not be delivered and was dropped
    #[error("Metrics snapshot dropped: {0}")]
    MetricsDropped(&'static str),

    /// Audio processing error
    #[error("Processing error: {0}")]
    ProcessingError(String),
}

impl AudioError {
    /// Whether this error ends the processing session.
    ///
    /// A framer that returned a fatal error refuses further input and must be
    /// dropped by the caller.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            AudioError::MalformedFrame { .. } | AudioError::TransformFailed(_)
        )
    }
}

impl From<symphonia::core::errors::Error> for AudioError {
    fn from(err: symphonia::core::errors::Error) -> Self {
        match err {
            symphonia::core::errors::Error::IoError(e) => AudioError::Io(e),
            symphonia::core::errors::Error::Unsupported(what) => {
                AudioError::UnsupportedFormat(what.to_string())
            }
            e => AudioError::DecodeError(e.to_string()),
        }
    }
}

impl From<hound::Error> for AudioError {
    fn from(err: hound::Error) -> Self {
        match err {
            hound::Error::IoError(e) => AudioError::Io(e),
            e => AudioError::EncodeError(e.to_string()),
        }
    }
}
