//! Stage descriptors and the fixed order they run in.

use std::fmt;

use crate::operations::editing::reverse_all_axes;
use crate::operations::{
    AudioChannelOps, AudioDynamicRange, AudioEditing, AudioProcessing, CompressionPreset,
    MonoChannel,
};
use crate::pipeline::PipelineConfig;
use crate::{AudioBuffer, AudioResult};

/// The kinds of transform stage, independent of their parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageKind {
    /// Channel selection.
    Mono,
    /// Joining buffers.
    Concatenate,
    /// Gain and compressor.
    Compress,
    /// Peak normalization.
    Normalize,
    /// Time reversal.
    Reverse,
}

/// Order in which enabled stages run. Loading and resampling happen before the
/// first stage, encoding after the last.
pub const STAGE_ORDER: [StageKind; 5] = [
    StageKind::Mono,
    StageKind::Concatenate,
    StageKind::Compress,
    StageKind::Normalize,
    StageKind::Reverse,
];

/// A configured transform applied to the whole set of buffers in a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Stage {
    /// Keep one channel of every buffer.
    Mono(MonoChannel),
    /// Join all buffers into one, upmixing mono to stereo where needed.
    Concatenate,
    /// Gain then compressor, from a preset.
    Compress(CompressionPreset),
    /// Signed-peak normalization.
    Normalize,
    /// Time reversal, optionally also reversing channel order.
    Reverse {
        /// Also swap channel order.
        all_axes: bool,
    },
}

impl Stage {
    /// Which kind of stage this is.
    pub const fn kind(&self) -> StageKind {
        match self {
            Self::Mono(_) => StageKind::Mono,
            Self::Concatenate => StageKind::Concatenate,
            Self::Compress(_) => StageKind::Compress,
            Self::Normalize => StageKind::Normalize,
            Self::Reverse { .. } => StageKind::Reverse,
        }
    }

    /// The stage of `kind` if `config` enables it.
    pub fn from_config(kind: StageKind, config: &PipelineConfig) -> Option<Self> {
        match kind {
            StageKind::Mono => config.mono.map(Self::Mono),
            StageKind::Concatenate => config.concatenate.then_some(Self::Concatenate),
            StageKind::Compress => config.compress.map(Self::Compress),
            StageKind::Normalize => config.normalize.then_some(Self::Normalize),
            StageKind::Reverse => config.reverse.then_some(Self::Reverse {
                all_axes: config.reverse_all_axes,
            }),
        }
    }

    /// Enabled stages of `config`, in [`STAGE_ORDER`].
    pub fn all_from_config(config: &PipelineConfig) -> Vec<Self> {
        STAGE_ORDER
            .iter()
            .filter_map(|&kind| Self::from_config(kind, config))
            .collect()
    }

    /// Human-readable description for logging.
    pub fn description(&self) -> String {
        match self {
            Self::Mono(channel) => format!("mono ({channel})"),
            Self::Concatenate => "concatenate".to_string(),
            Self::Compress(preset) => format!("compress ({preset})"),
            Self::Normalize => "normalize".to_string(),
            Self::Reverse { all_axes: false } => "reverse".to_string(),
            Self::Reverse { all_axes: true } => "reverse (all axes)".to_string(),
        }
    }

    /// Run the stage over every buffer.
    pub fn apply(&self, buffers: Vec<AudioBuffer>) -> AudioResult<Vec<AudioBuffer>> {
        match *self {
            Self::Mono(channel) => buffers
                .iter()
                .map(|audio| audio.select_channel(channel))
                .collect(),
            Self::Concatenate => Ok(vec![AudioBuffer::concatenate(buffers)?]),
            Self::Compress(preset) => buffers
                .into_iter()
                .map(|mut audio| {
                    audio.apply_dynamics_preset(preset)?;
                    Ok(audio)
                })
                .collect(),
            Self::Normalize => buffers
                .into_iter()
                .map(|mut audio| {
                    audio.normalize_peak()?;
                    Ok(audio)
                })
                .collect(),
            Self::Reverse { all_axes: true } => buffers.iter().map(reverse_all_axes).collect(),
            Self::Reverse { all_axes: false } => Ok(buffers
                .into_iter()
                .map(|mut audio| {
                    audio.reverse_in_place();
                    audio
                })
                .collect()),
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description())
    }
}
