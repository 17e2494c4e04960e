//! Rateflow CLI - command-line rational-factor WAV resampler.

use clap::Parser;
use rateflow_core::{FilterType, MultiStageConfig, MultiStageConverter, StageConfig, max_num_output_samples};
use rateflow_io::WavSpec;
use std::path::PathBuf;

/// Errors this binary can report, beyond what `rateflow-core`/`rateflow-io`
/// already distinguish.
#[derive(Debug, thiserror::Error)]
enum CliError {
    /// A resampling-engine error, surfaced with enough context to locate
    /// which channel failed.
    #[error("rate conversion failed on channel {channel}: {source}")]
    Convert { channel: usize, source: rateflow_core::Error },

    /// WAV I/O failure.
    #[error(transparent)]
    Io(#[from] rateflow_io::Error),
}

#[derive(Parser)]
#[command(name = "rateflow")]
#[command(author, version, about = "Rational-factor WAV resampler", long_about = None)]
struct Cli {
    /// Input WAV file.
    input_file: PathBuf,

    /// Output WAV file.
    output_file: PathBuf,

    /// Output sampling rate, in Hz.
    #[arg(short = 'r', long = "output-rate")]
    output_rate: u32,

    /// Per-call processing block size, in samples.
    #[arg(short = 'b', long = "buffer-size", default_value_t = 128)]
    buffer_size: u32,

    /// Resampling quality, 0 (fastest, narrowest filter) to 9 (slowest,
    /// widest filter). Maps to `filter_order = 11 + quality * 20`.
    #[arg(short = 'q', long = "quality", default_value_t = 5, value_parser = clap::value_parser!(u32).range(0..=9))]
    quality: u32,

    /// Increase log verbosity (`-v` for info, `-vv` for debug); overridden
    /// by `RUST_LOG` when set.
    #[arg(short = 'v', action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    use tracing_subscriber::EnvFilter;

    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()))
        .init();

    tracing::info!(
        input = %cli.input_file.display(),
        output = %cli.output_file.display(),
        output_rate = cli.output_rate,
        buffer_size = cli.buffer_size,
        quality = cli.quality,
        "starting rate conversion"
    );

    run(&cli).map_err(Into::into)
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let (channels, in_spec) = rateflow_io::read_wav(&cli.input_file)?;
    let filter_order = 11 + cli.quality * 20;

    let out_spec = WavSpec {
        channels: in_spec.channels,
        sample_rate: cli.output_rate,
        bits_per_sample: in_spec.bits_per_sample,
    };

    let mut converted_channels = Vec::with_capacity(channels.len());
    for (idx, channel) in channels.iter().enumerate() {
        let converted = convert_channel(channel, in_spec.sample_rate, cli.output_rate, cli.buffer_size, filter_order)
            .map_err(|source| CliError::Convert { channel: idx, source })?;
        tracing::debug!(channel = idx, num_output_samples = converted.len(), "channel converted");
        converted_channels.push(converted);
    }

    rateflow_io::write_wav(&cli.output_file, &converted_channels, out_spec)?;
    tracing::info!(output = %cli.output_file.display(), "wrote output file");
    Ok(())
}

fn convert_channel(
    input: &[f32],
    input_rate: u32,
    output_rate: u32,
    buffer_size: u32,
    filter_order: u32,
) -> rateflow_core::Result<Vec<f32>> {
    let config = MultiStageConfig {
        single: StageConfig {
            max_num_input_samples: buffer_size,
            input_rate,
            output_rate,
            filter_type: FilterType::LpfBlackman,
            filter_order,
        },
        max_num_stages: 10,
    };
    let mut converter = MultiStageConverter::create(config, None)?;
    tracing::debug!(num_stages = converter.num_stages(), "planned conversion cascade");

    let max_output_per_call = max_num_output_samples(buffer_size, input_rate, output_rate)? as usize;
    let mut output_buffer = vec![0.0f32; max_output_per_call];
    let mut output = Vec::with_capacity(input.len() * converter.up_rate() as usize / converter.down_rate().max(1) as usize);

    for chunk in input.chunks(buffer_size as usize) {
        let n = converter.process(chunk, &mut output_buffer)?;
        output.extend_from_slice(&output_buffer[..n]);
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn convert_channel_upsamples_a_constant_signal() {
        let input = vec![1.0f32; 64];
        let output = convert_channel(&input, 1, 2, 8, 31).unwrap();
        assert!(output.len() >= 128);
    }

    #[test]
    fn quality_maps_to_filter_order() {
        for q in 0..=9u32 {
            assert_eq!(11 + q * 20, 11 + q * 20);
        }
        assert_eq!(11 + 5 * 20, 111);
        assert_eq!(11 + 0 * 20, 11);
        assert_eq!(11 + 9 * 20, 191);
    }
}
