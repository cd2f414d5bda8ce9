//! Supporting types and enums for audio operations.
//!
//! This module contains the option types the pipeline is configured with. Every
//! textual form accepted by the command line or a config file parses through
//! `FromStr`/`TryFrom` here, and unknown values are configuration errors.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::{AudioError, LEFT, RIGHT};

/// Which physical channel to keep when reducing to mono.
///
/// This is channel selection, not a downmix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MonoChannel {
    /// Keep channel 0.
    Left,
    /// Keep channel 1.
    Right,
}

impl MonoChannel {
    /// Zero-based channel index this selector refers to.
    pub const fn index(self) -> usize {
        match self {
            Self::Left => LEFT,
            Self::Right => RIGHT,
        }
    }
}

impl FromStr for MonoChannel {
    type Err = AudioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            other => Err(AudioError::configuration(format!(
                "unknown mono channel '{other}', expected 'left' or 'right'"
            ))),
        }
    }
}

impl fmt::Display for MonoChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => write!(f, "left"),
            Self::Right => write!(f, "right"),
        }
    }
}

/// Named gain + compressor settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompressionPreset {
    /// +2 dB gain, -10 dB threshold, 10:1.
    Soft,
    /// +10 dB gain, -20 dB threshold, 20:1.
    Hard,
}

impl CompressionPreset {
    /// Parameters for this preset.
    pub const fn parameters(self) -> DynamicsParams {
        match self {
            Self::Soft => DynamicsParams {
                gain_db: 2.0,
                threshold_db: -10.0,
                ratio: 10.0,
                attack_ms: DEFAULT_ATTACK_MS,
                release_ms: DEFAULT_RELEASE_MS,
            },
            Self::Hard => DynamicsParams {
                gain_db: 10.0,
                threshold_db: -20.0,
                ratio: 20.0,
                attack_ms: DEFAULT_ATTACK_MS,
                release_ms: DEFAULT_RELEASE_MS,
            },
        }
    }
}

impl FromStr for CompressionPreset {
    type Err = AudioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "soft" => Ok(Self::Soft),
            "hard" => Ok(Self::Hard),
            other => Err(AudioError::configuration(format!(
                "unknown compression preset '{other}', expected 'soft' or 'hard'"
            ))),
        }
    }
}

impl fmt::Display for CompressionPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Soft => write!(f, "soft"),
            Self::Hard => write!(f, "hard"),
        }
    }
}

/// Compressor attack time used by every preset, in milliseconds.
pub const DEFAULT_ATTACK_MS: f32 = 1.0;
/// Compressor release time used by every preset, in milliseconds.
pub const DEFAULT_RELEASE_MS: f32 = 100.0;

/// Gain stage followed by a feed-forward compressor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DynamicsParams {
    /// Static gain applied before compression, in dB.
    pub gain_db: f32,
    /// Compressor threshold in dBFS.
    pub threshold_db: f32,
    /// Compression ratio (N:1).
    pub ratio: f32,
    /// Envelope attack time in milliseconds.
    pub attack_ms: f32,
    /// Envelope release time in milliseconds.
    pub release_ms: f32,
}

impl DynamicsParams {
    /// Validate compressor parameters.
    pub fn validate(&self) -> Result<(), AudioError> {
        if !self.gain_db.is_finite() || !self.threshold_db.is_finite() {
            return Err(AudioError::configuration("gain and threshold must be finite"));
        }
        if self.ratio < 1.0 {
            return Err(AudioError::configuration(format!(
                "ratio must be >= 1.0, got {}",
                self.ratio
            )));
        }
        if self.attack_ms < 0.0 || self.release_ms < 0.0 {
            return Err(AudioError::configuration(
                "attack and release times must not be negative",
            ));
        }
        Ok(())
    }
}

/// Integer PCM depth of the encoded WAV.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "u16")]
pub enum BitDepth {
    /// Unsigned 8-bit, offset by 127.
    Eight,
    /// Signed 16-bit.
    #[default]
    Sixteen,
}

impl BitDepth {
    /// Bits per sample.
    pub const fn bits(self) -> u16 {
        match self {
            Self::Eight => 8,
            Self::Sixteen => 16,
        }
    }

    /// Bytes per sample.
    pub const fn bytes(self) -> u16 {
        self.bits() / 8
    }
}

impl TryFrom<u16> for BitDepth {
    type Error = AudioError;

    fn try_from(bits: u16) -> Result<Self, Self::Error> {
        match bits {
            8 => Ok(Self::Eight),
            16 => Ok(Self::Sixteen),
            other => Err(AudioError::configuration(format!(
                "unsupported bit depth {other}, expected 8 or 16"
            ))),
        }
    }
}

impl fmt::Display for BitDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bits())
    }
}
