//! sample-tools - command-line front end for the batch pipeline.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use sample_tools::operations::{BitDepth, CompressionPreset, MonoChannel};
use sample_tools::{Pipeline, PipelineConfig};

const DEFAULT_SAMPLE_RATE: f64 = 44100.0;

/// Transform audio samples and write them as PCM WAV.
#[derive(Parser, Debug)]
#[command(name = "sample-tools")]
#[command(version, about)]
struct Args {
    /// Input audio files (wav, mp3, flac, ogg)
    #[arg(required = true)]
    audio_inputs: Vec<PathBuf>,

    /// Join all inputs into a single output
    #[arg(long)]
    concatenate: bool,

    /// Keep only this channel
    #[arg(long, value_name = "left|right")]
    mono: Option<MonoChannel>,

    /// Output sample rate in Hz [default: 44100]
    #[arg(long, value_name = "HZ")]
    sample_rate: Option<f64>,

    /// Output bit depth, 8 or 16 [default: 16]
    #[arg(long, value_name = "BITS")]
    bit_rate: Option<u16>,

    /// Playback speed factor; 2.0 plays twice as fast [default: 1.0]
    #[arg(long, value_name = "X")]
    speed_multiplier: Option<f64>,

    /// Apply a gain + compressor preset
    #[arg(long, value_name = "soft|hard")]
    compress: Option<CompressionPreset>,

    /// Scale so the largest sample is 1.0
    #[arg(long)]
    normalize: bool,

    /// Play the result backwards
    #[arg(long)]
    reverse: bool,

    /// Output path; several outputs get _1, _2, ... before the extension
    #[arg(long, default_value = "output.wav", env = "SAMPLE_TOOLS_OUTPUT")]
    audio_output: PathBuf,

    /// TOML file with pipeline options; flags on the command line win
    #[arg(long, value_name = "TOML")]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(long)]
    debug: bool,
}

impl Args {
    fn pipeline_config(&self) -> Result<PipelineConfig> {
        let mut config = match &self.config {
            Some(path) => PipelineConfig::from_toml_file(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?,
            None => PipelineConfig::default(),
        };

        config.concatenate |= self.concatenate;
        config.normalize |= self.normalize;
        config.reverse |= self.reverse;
        if self.mono.is_some() {
            config.mono = self.mono;
        }
        if self.compress.is_some() {
            config.compress = self.compress;
        }
        if let Some(speed) = self.speed_multiplier {
            config.speed_multiplier = speed;
        }
        if let Some(bits) = self.bit_rate {
            config.bit_depth = BitDepth::try_from(bits)?;
        }
        config.sample_rate = self
            .sample_rate
            .or(config.sample_rate)
            .or(Some(DEFAULT_SAMPLE_RATE));

        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = args.pipeline_config()?;
    tracing::debug!(?config, inputs = args.audio_inputs.len(), "starting");

    let written = Pipeline::new(config)?
        .run_and_save(args.audio_inputs.as_slice(), &args.audio_output)
        .context("Processing failed")?;

    for path in written {
        println!("{}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("sample-tools").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = parse(&["a.wav"]).pipeline_config().unwrap();
        assert_eq!(config.sample_rate, Some(44100.0));
        assert_eq!(config.bit_depth, BitDepth::Sixteen);
        assert_eq!(config.speed_multiplier, 1.0);
        assert!(config.mono.is_none() && config.compress.is_none());
    }

    #[test]
    fn test_flags_map_onto_config() {
        let config = parse(&[
            "a.wav",
            "b.wav",
            "--concatenate",
            "--mono",
            "right",
            "--compress",
            "hard",
            "--bit-rate",
            "8",
            "--speed-multiplier",
            "2",
            "--normalize",
            "--reverse",
        ])
        .pipeline_config()
        .unwrap();

        assert!(config.concatenate && config.normalize && config.reverse);
        assert_eq!(config.mono, Some(MonoChannel::Right));
        assert_eq!(config.compress, Some(CompressionPreset::Hard));
        assert_eq!(config.bit_depth, BitDepth::Eight);
        assert_eq!(config.speed_multiplier, 2.0);
    }

    #[test]
    fn test_bad_values_are_rejected() {
        assert!(parse(&["a.wav", "--bit-rate", "24"]).pipeline_config().is_err());
        assert!(Args::try_parse_from(["sample-tools", "a.wav", "--compress", "medium"]).is_err());
        assert!(Args::try_parse_from(["sample-tools"]).is_err());
    }

    #[test]
    fn test_flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("opts.toml");
        std::fs::write(&path, "sample_rate = 22050.0\nbit_depth = 8\n").unwrap();
        let path = path.to_string_lossy().into_owned();

        let config = parse(&["a.wav", "--config", &path, "--bit-rate", "16"])
            .pipeline_config()
            .unwrap();
        assert_eq!(config.sample_rate, Some(22050.0));
        assert_eq!(config.bit_depth, BitDepth::Sixteen);
    }
}
