use crate::core::{AudioFrame, Channels};
use crate::error::{AudioError, AudioResult};
use log::debug;
use std::fs::File;
use std::path::Path;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{CODEC_TYPE_NULL, DecoderOptions};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::{FormatOptions, FormatReader};
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

/// Symphonia-based audio file decoder
pub struct SymphoniaDecoder {
    reader: Box<dyn FormatReader>,
    decoder: Box<dyn symphonia::core::codecs::Decoder>,
    track_id: u32,
    sample_rate: u32,
    channels: Channels,
    finished: bool,
}

impl SymphoniaDecoder {
    /// Open and probe an audio file
    pub fn from_file<P: AsRef<Path>>(path: P) -> AudioResult<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let mss = MediaSourceStream::new(Box::new(file), Default::default());

        let mut hint = Hint::new();
        if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
            hint.with_extension(ext);
        }

        let probed = symphonia::default::get_probe()
            .format(&hint, mss, &FormatOptions::default(), &MetadataOptions::default())
            .map_err(|e| AudioError::UnsupportedFormat(e.to_string()))?;
        let reader = probed.format;

        let track = reader
            .tracks()
            .iter()
            .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
            .ok_or_else(|| AudioError::DecodeError("No audio track found".to_string()))?;

        let track_id = track.id;
        let sample_rate = track
            .codec_params
            .sample_rate
            .ok_or_else(|| AudioError::DecodeError("Unknown sample rate".to_string()))?;
        let channels = match track.codec_params.channels {
            Some(layout) => Channels::from_count(layout.count() as u32)?,
            None => return Err(AudioError::DecodeError("Unknown channel count".to_string())),
        };

        let decoder = symphonia::default::get_codecs()
            .make(&track.codec_params, &DecoderOptions::default())
            .map_err(|e| AudioError::UnsupportedFormat(e.to_string()))?;

        debug!(
            "opened {}: {} Hz, {}",
            path.display(),
            sample_rate,
            channels.name()
        );

        Ok(SymphoniaDecoder {
            reader,
            decoder,
            track_id,
            sample_rate,
            channels,
            finished: false,
        })
    }

    /// Get sample rate
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Get channels
    pub fn channels(&self) -> Channels {
        self.channels
    }
}

impl super::Decoder for SymphoniaDecoder {
    fn decode_frame(&mut self) -> AudioResult<Option<AudioFrame>> {
        if self.finished {
            return Ok(None);
        }

        loop {
            let packet = match self.reader.next_packet() {
                Ok(packet) => packet,
                Err(SymphoniaError::IoError(ref e))
                    if e.kind() == std::io::ErrorKind::UnexpectedEof =>
                {
                    self.finished = true;
                    return Ok(None);
                }
                Err(e) => return Err(e.into()),
            };

            if packet.track_id() != self.track_id {
                continue;
            }

            let decoded = match self.decoder.decode(&packet) {
                Ok(decoded) => decoded,
                // Corrupt packets are skipped rather than ending the stream
                Err(SymphoniaError::DecodeError(msg)) => {
                    debug!("skipping undecodable packet: {}", msg);
                    continue;
                }
                Err(e) => return Err(e.into()),
            };

            let spec = *decoded.spec();
            let mut buffer = SampleBuffer::<f32>::new(decoded.capacity() as u64, spec);
            buffer.copy_interleaved_ref(decoded);

            if buffer.samples().is_empty() {
                continue;
            }

            return AudioFrame::new(buffer.samples().to_vec(), self.sample_rate, self.channels)
                .map(Some);
        }
    }

    fn is_finished(&self) -> bool {
        self.finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::Decoder;
    use crate::encoder::encode_wav_bytes;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_invalid_file() {
        let result = SymphoniaDecoder::from_file("/nonexistent/file.mp3");
        assert!(result.is_err());
    }

    #[test]
    fn test_decode_pcm16_wav() {
        let samples: Vec<f32> = (0..1600).map(|i| if i % 2 == 0 { 0.5 } else { -0.5 }).collect();
        let bytes = encode_wav_bytes(&samples, 16000).unwrap();

        let mut file = Builder::new().suffix(".wav").tempfile().unwrap();
        file.write_all(&bytes).unwrap();
        file.flush().unwrap();

        let mut decoder = SymphoniaDecoder::from_file(file.path()).unwrap();
        assert_eq!(decoder.sample_rate(), 16000);
        assert_eq!(decoder.channels(), Channels::Mono);

        let mut decoded = Vec::new();
        while let Some(frame) = decoder.decode_frame().unwrap() {
            decoded.extend_from_slice(frame.samples());
        }
        assert!(decoder.is_finished());
        assert_eq!(decoded.len(), samples.len());
        assert!((decoded[0] - 0.5).abs() < 1e-3);
        assert!((decoded[1] + 0.5).abs() < 1e-3);
    }
}
