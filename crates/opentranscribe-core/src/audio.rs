//! Audio file decoding and resampling.
//!
//! whisper.cpp requires 16kHz mono f32 PCM. WAV is decoded with hound and
//! MP3 with minimp3; anything else is converted to WAV through the ffmpeg
//! CLI first. There is deliberately no up-front codec validation: a file the
//! decoder cannot handle surfaces as the job's error.

use std::path::Path;

use crate::error::CoreError;

/// Target sample rate for whisper.cpp
pub const WHISPER_SAMPLE_RATE: u32 = 16000;

/// Load an audio file as 16kHz mono f32 samples ready for transcription
pub fn load_samples(path: &Path) -> Result<Vec<f32>, CoreError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let (samples, sample_rate, channels) = match extension.as_str() {
        "wav" => decode_wav(path)?,
        "mp3" => decode_mp3(&std::fs::read(path)?)?,
        _ => {
            // m4a and friends: convert through ffmpeg first
            let wav_path = convert_to_wav(path)?;
            let decoded = decode_wav(&wav_path);
            let _ = std::fs::remove_file(&wav_path);
            decoded?
        }
    };

    if samples.is_empty() {
        return Err(CoreError::Decode(format!(
            "No audio data decoded from {}",
            path.display()
        )));
    }

    resample_to_16k(&samples, sample_rate, channels)
}

/// Decode a WAV file to f32 samples
fn decode_wav(path: &Path) -> Result<(Vec<f32>, u32, u16), CoreError> {
    let mut reader =
        hound::WavReader::open(path).map_err(|e| CoreError::Decode(e.to_string()))?;
    let spec = reader.spec();

    let samples: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Float => reader
            .samples::<f32>()
            .collect::<Result<_, _>>()
            .map_err(|e| CoreError::Decode(e.to_string()))?,
        hound::SampleFormat::Int => {
            let max = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max))
                .collect::<Result<_, _>>()
                .map_err(|e| CoreError::Decode(e.to_string()))?
        }
    };

    Ok((samples, spec.sample_rate, spec.channels))
}

/// Decode MP3 data to f32 samples
fn decode_mp3(mp3_data: &[u8]) -> Result<(Vec<f32>, u32, u16), CoreError> {
    use minimp3::{Decoder, Frame};

    let mut decoder = Decoder::new(mp3_data);
    let mut samples = Vec::new();
    let mut sample_rate = 0u32;
    let mut channels = 0u16;

    loop {
        match decoder.next_frame() {
            Ok(Frame {
                data,
                sample_rate: sr,
                channels: ch,
                ..
            }) => {
                sample_rate = sr as u32;
                channels = ch as u16;
                samples.extend(data.iter().map(|&s| s as f32 / i16::MAX as f32));
            }
            Err(minimp3::Error::Eof) => break,
            Err(e) => return Err(CoreError::Decode(format!("MP3 decode error: {e:?}"))),
        }
    }

    if samples.is_empty() {
        return Err(CoreError::Decode("No audio data decoded from MP3".into()));
    }

    Ok((samples, sample_rate, channels))
}

/// Convert an audio file to a temporary WAV using the ffmpeg CLI
fn convert_to_wav(input_path: &Path) -> Result<std::path::PathBuf, CoreError> {
    let unique_id = format!(
        "{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0),
    );
    let wav_path = std::env::temp_dir().join(format!("opentranscribe_{unique_id}.wav"));

    crate::verbose!("Converting {} to WAV via ffmpeg", input_path.display());

    let input = input_path.to_str().ok_or_else(|| {
        CoreError::Decode(format!("Path is not valid UTF-8: {}", input_path.display()))
    })?;
    let output = std::process::Command::new("ffmpeg")
        .args([
            "-hide_banner",
            "-loglevel",
            "error",
            "-i",
            input,
            "-ar",
            "16000",
            "-ac",
            "1",
            "-y",
            wav_path.to_str().unwrap_or_default(),
        ])
        .output()
        .map_err(|e| {
            CoreError::Decode(format!(
                "Failed to execute ffmpeg (is it installed?): {e}"
            ))
        })?;

    if !output.status.success() {
        let _ = std::fs::remove_file(&wav_path);
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(CoreError::Decode(format!("ffmpeg conversion failed: {stderr}")));
    }

    Ok(wav_path)
}

/// Resample audio to 16kHz mono
pub fn resample_to_16k(
    samples: &[f32],
    source_rate: u32,
    channels: u16,
) -> Result<Vec<f32>, CoreError> {
    use rubato::{FftFixedIn, Resampler};

    let mono_samples = if channels > 1 {
        downmix_to_mono(samples, channels)
    } else {
        samples.to_vec()
    };

    if source_rate == WHISPER_SAMPLE_RATE {
        return Ok(mono_samples);
    }

    let mut resampler = FftFixedIn::<f32>::new(
        source_rate as usize,
        WHISPER_SAMPLE_RATE as usize,
        1024, // chunk size
        2,    // sub-chunks
        1,    // channels (mono)
    )
    .map_err(|e| CoreError::Decode(format!("Failed to create resampler: {e}")))?;

    let mut output = Vec::new();
    let chunk_size = resampler.input_frames_max();

    for chunk in mono_samples.chunks(chunk_size) {
        let mut padded = chunk.to_vec();
        if padded.len() < chunk_size {
            padded.resize(chunk_size, 0.0);
        }

        let result = resampler
            .process(&[padded], None)
            .map_err(|e| CoreError::Decode(format!("Resampling failed: {e}")))?;
        output.extend_from_slice(&result[0]);
    }

    Ok(output)
}

/// Convert multichannel audio to mono by averaging all channels
fn downmix_to_mono(samples: &[f32], channels: u16) -> Vec<f32> {
    samples
        .chunks(channels as usize)
        .map(|frame| frame.iter().sum::<f32>() / channels as f32)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_downmix_to_mono() {
        let stereo = vec![0.5, 0.3, 0.8, 0.2, 1.0, 0.0];
        let mono = downmix_to_mono(&stereo, 2);
        assert_eq!(mono.len(), 3);
        assert!((mono[0] - 0.4).abs() < 0.001);
        assert!((mono[1] - 0.5).abs() < 0.001);
        assert!((mono[2] - 0.5).abs() < 0.001);
    }

    #[test]
    fn test_resample_passthrough_16k() {
        let samples = vec![0.1, 0.2, 0.3, 0.4, 0.5];
        let result = resample_to_16k(&samples, 16000, 1).unwrap();
        assert_eq!(result, samples);
    }

    #[test]
    fn test_resample_halves_48k() {
        let samples = vec![0.0; 48000];
        let result = resample_to_16k(&samples, 48000, 1).unwrap();
        // FftFixedIn pads the last partial chunk, so allow chunk-size slack
        let expected = 16000;
        assert!((result.len() as i64 - expected as i64).abs() < 1024);
    }

    #[test]
    fn test_load_samples_wav_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tone.wav");

        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 16000,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(&path, spec).unwrap();
        for i in 0..1600 {
            let value = ((i as f32 * 0.05).sin() * 8000.0) as i16;
            writer.write_sample(value).unwrap();
        }
        writer.finalize().unwrap();

        let samples = load_samples(&path).unwrap();
        assert_eq!(samples.len(), 1600);
        assert!(samples.iter().all(|s| s.abs() <= 1.0));
    }

    #[test]
    fn test_load_samples_missing_file() {
        let err = load_samples(Path::new("/nonexistent/audio.wav")).unwrap_err();
        assert!(matches!(err, CoreError::Decode(_)));
    }
}
