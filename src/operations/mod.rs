//! Audio processing operations.
//!
//! Each pipeline stage is an extension trait on [`crate::AudioBuffer`]:
//!
//! - [`traits`] - Core trait definitions
//! - [`channels`] - Channel selection and upmixing
//! - [`editing`] - Reversal and concatenation
//! - [`dynamic_range`] - Gain and compression
//! - [`processing`] - Peak normalization
//! - [`types`] - Supporting types and enums
//!
//! ## Quick Start
//!
//! ```rust
//! use sample_tools::AudioBuffer;
//! use sample_tools::operations::*;
//! use ndarray::array;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let stereo = AudioBuffer::new(array![[0.1f32, 0.4], [0.2, 0.3]], 44100.0)?;
//!
//! let mut mono = stereo.select_channel(MonoChannel::Right)?;
//! mono.apply_dynamics_preset(CompressionPreset::Soft)?;
//! mono.normalize_peak()?;
//! mono.reverse_in_place();
//! # Ok(())
//! # }
//! ```

pub mod traits;
pub mod types;

pub mod channels;
pub mod dynamic_range;
pub mod editing;
pub mod processing;

pub use traits::{AudioChannelOps, AudioDynamicRange, AudioEditing, AudioProcessing};

pub use types::{BitDepth, CompressionPreset, DynamicsParams, MonoChannel};
