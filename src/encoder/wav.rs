use crate::core::{AudioFrame, Channels};
use crate::error::{AudioError, AudioResult};
use hound::{SampleFormat, WavSpec, WavWriter};
use std::fs::File;
use std::io::{BufWriter, Cursor, Seek, Write};
use std::path::Path;

/// Mono 16-bit PCM, the layout the denoised recordings are exported in
fn pcm16_spec(sample_rate: u32) -> WavSpec {
    WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    }
}

/// Convert a float sample to PCM16.
///
/// Clamps to [-1, 1] and scales asymmetrically so both -1.0 and 1.0 map to
/// the ends of the i16 range.
pub fn to_pcm16(sample: f32) -> i16 {
    let s = sample.clamp(-1.0, 1.0);
    if s < 0.0 {
        (s * 32768.0) as i16
    } else {
        (s * 32767.0) as i16
    }
}

/// Encode a whole mono recording into an in-memory WAV file
pub fn encode_wav_bytes(samples: &[f32], sample_rate: u32) -> AudioResult<Vec<u8>> {
    let mut cursor = Cursor::new(Vec::with_capacity(44 + samples.len() * 2));
    {
        let mut encoder = Pcm16WavEncoder::new(&mut cursor, sample_rate)?;
        encoder.write_samples(samples)?;
        super::Encoder::finalize(&mut encoder)?;
    }

    Ok(cursor.into_inner())
}

/// Streaming mono PCM16 WAV encoder
pub struct Pcm16WavEncoder<W: Write + Seek> {
    writer: Option<WavWriter<W>>,
    sample_rate: u32,
}

impl Pcm16WavEncoder<BufWriter<File>> {
    /// Create an encoder writing to a file
    pub fn create<P: AsRef<Path>>(path: P, sample_rate: u32) -> AudioResult<Self> {
        if sample_rate == 0 {
            return Err(AudioError::InvalidSampleRate { rate: 0 });
        }

        let writer = WavWriter::create(path, pcm16_spec(sample_rate))?;
        Ok(Pcm16WavEncoder {
            writer: Some(writer),
            sample_rate,
        })
    }
}

impl<W: Write + Seek> Pcm16WavEncoder<W> {
    /// Create an encoder over any seekable writer
    pub fn new(inner: W, sample_rate: u32) -> AudioResult<Self> {
        if sample_rate == 0 {
            return Err(AudioError::InvalidSampleRate { rate: 0 });
        }

        let writer = WavWriter::new(inner, pcm16_spec(sample_rate))?;
        Ok(Pcm16WavEncoder {
            writer: Some(writer),
            sample_rate,
        })
    }

    /// Get the sample rate
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Get the number of samples written
    pub fn samples_written(&self) -> u32 {
        self.writer.as_ref().map(|w| w.len()).unwrap_or(0)
    }

    /// Append raw mono samples
    pub fn write_samples(&mut self, samples: &[f32]) -> AudioResult<()> {
        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| AudioError::ProcessingError("Encoder already finalized".to_string()))?;

        for &sample in samples {
            writer.write_sample(to_pcm16(sample))?;
        }
        Ok(())
    }
}

impl<W: Write + Seek> super::Encoder for Pcm16WavEncoder<W> {
    fn encode(&mut self, frame: &AudioFrame) -> AudioResult<()> {
        if frame.sample_rate() != self.sample_rate {
            return Err(AudioError::InvalidSampleRate {
                rate: frame.sample_rate(),
            });
        }

        if frame.channels() != Channels::Mono {
            return Err(AudioError::InvalidChannels {
                expected: 1,
                got: frame.channels().count(),
            });
        }

        self.write_samples(frame.samples())
    }

    fn finalize(&mut self) -> AudioResult<()> {
        if let Some(writer) = self.writer.take() {
            writer.finalize()?;
        }
        Ok(())
    }
}
