//! Pipeline configuration.

use std::path::Path;

use serde::Deserialize;

use crate::operations::{BitDepth, CompressionPreset, MonoChannel};
use crate::{AudioError, AudioResult};

/// Options for one pipeline run.
///
/// Every field maps onto exactly one stage or Loader/Encoder parameter.
/// Unknown keys in a configuration file are rejected.
///
/// # Example
/// ```rust
/// use sample_tools::pipeline::PipelineConfig;
/// use sample_tools::operations::{BitDepth, CompressionPreset};
///
/// let config = PipelineConfig::from_toml_str(r#"
///     compress = "hard"
///     normalize = true
///     bit_depth = 8
/// "#).unwrap();
/// assert_eq!(config.compress, Some(CompressionPreset::Hard));
/// assert_eq!(config.bit_depth, BitDepth::Eight);
/// assert_eq!(config.speed_multiplier, 1.0);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Join every input into a single buffer.
    pub concatenate: bool,
    /// Keep only this channel of each buffer.
    pub mono: Option<MonoChannel>,
    /// Nominal output rate. `None` keeps each source's own rate.
    pub sample_rate: Option<f64>,
    /// Playback speed factor applied while loading.
    pub speed_multiplier: f64,
    /// Gain + compressor preset.
    pub compress: Option<CompressionPreset>,
    /// Scale so the largest sample becomes 1.0.
    pub normalize: bool,
    /// Play the audio backwards.
    pub reverse: bool,
    /// Reverse the channel axis too, swapping left and right.
    pub reverse_all_axes: bool,
    /// PCM bit depth of the written files.
    pub bit_depth: BitDepth,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            concatenate: false,
            mono: None,
            sample_rate: None,
            speed_multiplier: 1.0,
            compress: None,
            normalize: false,
            reverse: false,
            reverse_all_axes: false,
            bit_depth: BitDepth::default(),
        }
    }
}

impl PipelineConfig {
    /// Parse a TOML document and validate it.
    pub fn from_toml_str(source: &str) -> AudioResult<Self> {
        let config: Self = toml::from_str(source)
            .map_err(|e| AudioError::configuration(format!("invalid configuration: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a TOML configuration file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> AudioResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "loaded configuration file");
        Self::from_toml_str(&source)
    }

    /// Check numeric options. Runs before any file is read or written.
    pub fn validate(&self) -> AudioResult<()> {
        if let Some(rate) = self.sample_rate {
            if !rate.is_finite() || rate <= 0.0 {
                return Err(AudioError::configuration(format!(
                    "sample rate must be positive, got {rate}"
                )));
            }
        }
        if !self.speed_multiplier.is_finite() || self.speed_multiplier <= 0.0 {
            return Err(AudioError::configuration(format!(
                "speed multiplier must be positive, got {}",
                self.speed_multiplier
            )));
        }
        if self.reverse_all_axes && !self.reverse {
            tracing::warn!("reverse_all_axes has no effect unless reverse is enabled");
        }
        Ok(())
    }
}
