use denoise_rs::denoiser::Passthrough;
use denoise_rs::encoder::encode_wav_bytes;
use denoise_rs::processor::denoise_buffer;
use denoise_rs::{FramerConfig, StreamingFramer};

#[test]
fn batch_denoise_then_export() {
    let config = FramerConfig::default();
    let input: Vec<f32> = (0..16000).map(|i| 0.25 * (i as f32 * 0.01).sin()).collect();

    let framer = StreamingFramer::new(config, Passthrough).unwrap();
    let result = denoise_buffer(framer, &input, 4096).unwrap();
    assert_eq!(result.samples, input);
    assert_eq!(result.stats.samples_processed, 16000);

    let bytes = encode_wav_bytes(&result.samples, config.sample_rate).unwrap();
    assert_eq!(bytes.len(), 44 + 2 * input.len());
    assert_eq!(&bytes[0..4], b"RIFF");
    assert_eq!(&bytes[36..40], b"data");
}
