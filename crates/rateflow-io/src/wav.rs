//! WAV file reading and writing, deinterleaved per channel.

use crate::Result;
use hound::{SampleFormat, WavReader, WavWriter};
use std::path::Path;

/// WAV file specification.
#[derive(Debug, Clone, Copy)]
pub struct WavSpec {
    /// Number of audio channels (1 = mono, 2 = stereo, ...).
    pub channels: u16,
    /// Sample rate in Hz (e.g., 44100, 48000).
    pub sample_rate: u32,
    /// Bit depth per sample (e.g., 16, 24, 32).
    pub bits_per_sample: u16,
}

impl From<hound::WavSpec> for WavSpec {
    fn from(spec: hound::WavSpec) -> Self {
        Self {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
        }
    }
}

impl From<WavSpec> for hound::WavSpec {
    fn from(spec: WavSpec) -> Self {
        hound::WavSpec {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
            sample_format: if spec.bits_per_sample == 32 {
                SampleFormat::Float
            } else {
                SampleFormat::Int
            },
        }
    }
}

/// Read a WAV file, deinterleaving into one `Vec<f32>` per channel.
///
/// Unlike a mixdown-to-mono reader, every channel is kept independent so
/// the caller can run a separate mono converter per channel and
/// re-interleave afterwards.
pub fn read_wav<P: AsRef<Path>>(path: P) -> Result<(Vec<Vec<f32>>, WavSpec)> {
    let reader = WavReader::open(path)?;
    let spec = WavSpec::from(reader.spec());
    let channels = spec.channels as usize;

    let interleaved: Vec<f32> = match reader.spec().sample_format {
        SampleFormat::Float => reader.into_samples::<f32>().collect::<std::result::Result<Vec<_>, _>>()?,
        SampleFormat::Int => {
            let max_val = (1i32 << (spec.bits_per_sample - 1)) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max_val))
                .collect::<std::result::Result<Vec<_>, _>>()?
        }
    };

    let frames = interleaved.len() / channels.max(1);
    let mut per_channel = vec![Vec::with_capacity(frames); channels];
    for frame in interleaved.chunks(channels) {
        for (ch, &sample) in frame.iter().enumerate() {
            per_channel[ch].push(sample);
        }
    }

    Ok((per_channel, spec))
}

/// Write one `Vec<f32>` per channel to a WAV file, re-interleaving them.
///
/// All channels must be the same length; shorter channels are treated as
/// silence-padded to the longest one.
pub fn write_wav<P: AsRef<Path>>(path: P, channels: &[Vec<f32>], spec: WavSpec) -> Result<()> {
    let hound_spec = hound::WavSpec::from(spec);
    let mut writer = WavWriter::create(path, hound_spec)?;
    let num_frames = channels.iter().map(Vec::len).max().unwrap_or(0);

    if spec.bits_per_sample == 32 {
        for frame in 0..num_frames {
            for channel in channels {
                writer.write_sample(channel.get(frame).copied().unwrap_or(0.0))?;
            }
        }
    } else {
        let max_val = (1i32 << (spec.bits_per_sample - 1)) as f32;
        for frame in 0..num_frames {
            for channel in channels {
                let sample = channel.get(frame).copied().unwrap_or(0.0);
                let int_sample = (sample * max_val).clamp(-max_val, max_val - 1.0) as i32;
                writer.write_sample(int_sample)?;
            }
        }
    }

    writer.finalize()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn mono_roundtrip_f32() {
        let samples: Vec<f32> = (0..1000).map(|i| (i as f32 / 1000.0).sin()).collect();
        let spec = WavSpec {
            channels: 1,
            sample_rate: 48000,
            bits_per_sample: 32,
        };

        let file = NamedTempFile::new().unwrap();
        write_wav(file.path(), &[samples.clone()], spec).unwrap();

        let (loaded, loaded_spec) = read_wav(file.path()).unwrap();
        assert_eq!(loaded_spec.sample_rate, 48000);
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].len(), samples.len());
        for (a, b) in samples.iter().zip(loaded[0].iter()) {
            assert!((a - b).abs() < 1e-6);
        }
    }

    #[test]
    fn mono_roundtrip_i16() {
        let samples: Vec<f32> = (0..1000).map(|i| (i as f32 / 1000.0).sin() * 0.9).collect();
        let spec = WavSpec {
            channels: 1,
            sample_rate: 44100,
            bits_per_sample: 16,
        };

        let file = NamedTempFile::new().unwrap();
        write_wav(file.path(), &[samples.clone()], spec).unwrap();

        let (loaded, loaded_spec) = read_wav(file.path()).unwrap();
        assert_eq!(loaded_spec.sample_rate, 44100);
        for (a, b) in samples.iter().zip(loaded[0].iter()) {
            assert!((a - b).abs() < 0.001);
        }
    }

    #[test]
    fn stereo_channels_stay_independent() {
        let left: Vec<f32> = (0..500).map(|i| (i as f32 / 500.0).sin()).collect();
        let right: Vec<f32> = (0..500).map(|i| (i as f32 / 500.0).cos()).collect();
        let spec = WavSpec {
            channels: 2,
            sample_rate: 48000,
            bits_per_sample: 32,
        };

        let file = NamedTempFile::new().unwrap();
        write_wav(file.path(), &[left.clone(), right.clone()], spec).unwrap();

        let (loaded, loaded_spec) = read_wav(file.path()).unwrap();
        assert_eq!(loaded_spec.channels, 2);
        assert_eq!(loaded.len(), 2);
        for (a, b) in left.iter().zip(loaded[0].iter()) {
            assert!((a - b).abs() < 1e-6);
        }
        for (a, b) in right.iter().zip(loaded[1].iter()) {
            assert!((a - b).abs() < 1e-6);
        }
    }

    #[test]
    fn five_point_one_channels_roundtrip() {
        let channels: Vec<Vec<f32>> = (0..6)
            .map(|ch| (0..100).map(|i| ((i + ch) as f32 / 100.0).sin()).collect())
            .collect();
        let spec = WavSpec {
            channels: 6,
            sample_rate: 48000,
            bits_per_sample: 24,
        };

        let file = NamedTempFile::new().unwrap();
        write_wav(file.path(), &channels, spec).unwrap();

        let (loaded, loaded_spec) = read_wav(file.path()).unwrap();
        assert_eq!(loaded_spec.channels, 6);
        assert_eq!(loaded.len(), 6);
        for (original, recovered) in channels.iter().zip(loaded.iter()) {
            for (a, b) in original.iter().zip(recovered.iter()) {
                assert!((a - b).abs() < 1e-3);
            }
        }
    }
}
