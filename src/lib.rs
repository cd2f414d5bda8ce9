// Correctness and logic
#![warn(clippy::unit_cmp)] // Detects comparing unit types
#![warn(clippy::match_same_arms)] // Duplicate match arms

// Performance-focused
#![warn(clippy::inefficient_to_string)] // `format!("{}", x)` vs `x.to_string()`
#![warn(clippy::map_clone)] // Cloning inside `map()` unnecessarily
#![warn(clippy::unnecessary_to_owned)] // Detects redundant `.to_owned()` or `.clone()`
#![warn(clippy::needless_collect)] // Avoids `.collect().iter()` chains

// Style and idiomatic Rust
#![warn(clippy::redundant_clone)] // Detects unnecessary `.clone()`
#![warn(clippy::needless_return)] // Avoids `return` at the end of functions
#![warn(clippy::manual_map)] // Use `.map()` instead of manual `match`
#![warn(clippy::unwrap_used)] // Avoids using `unwrap()`

// Maintainability
#![warn(clippy::missing_panics_doc)] // Docs for functions that might panic
#![warn(missing_docs)]

//! # sample_tools
//!
//! A deterministic batch audio pipeline: decode files, optionally reduce them
//! to one channel, join them, compress, normalize and reverse them, then write
//! 8- or 16-bit PCM WAV.
//!
//! ## Overview
//!
//! Audio is held in an [`AudioBuffer`], a channel x frame `ndarray` of `f32`
//! samples tagged with a sample rate. Every transform is an extension trait in
//! [`operations`], and [`pipeline::Pipeline`] runs the enabled ones in the
//! fixed order given by [`pipeline::STAGE_ORDER`]:
//!
//! 1. Load (decode, then resample to `sample_rate / speed_multiplier`)
//! 2. Mono (select the left or right channel)
//! 3. Concatenate (upmix to the widest input, then join along time)
//! 4. Compress (preset gain, then compressor)
//! 5. Normalize (divide by the signed maximum)
//! 6. Reverse (time axis)
//! 7. Encode (PCM WAV)
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sample_tools::pipeline::{Pipeline, PipelineConfig};
//! use sample_tools::operations::{CompressionPreset, MonoChannel};
//!
//! # fn main() -> Result<(), sample_tools::AudioError> {
//! let config = PipelineConfig {
//!     mono: Some(MonoChannel::Left),
//!     compress: Some(CompressionPreset::Soft),
//!     normalize: true,
//!     sample_rate: Some(44100.0),
//!     ..PipelineConfig::default()
//! };
//! for path in Pipeline::new(config)?.run_and_save(&["kick.wav", "snare.wav"], "out.wav")? {
//!     println!("{}", path.display());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Every fallible call returns [`AudioResult`]. Configuration problems are
//! reported before any file is read or written; decode failures abort the run.
//! Nothing in the pipeline clamps samples, so overshoot from the compress stage
//! saturates at the integer limits when encoded.

mod error;
mod repr;

pub mod io;
pub mod operations;
pub mod pipeline;
pub mod resampling;

pub use crate::error::{AudioError, AudioResult};
pub use crate::io::save;
pub use crate::pipeline::{Pipeline, PipelineConfig, process};
pub use crate::repr::AudioBuffer;

/// Left channel index.
pub const LEFT: usize = 0;
/// Right channel index.
pub const RIGHT: usize = 1;
/// Widest channel layout the pipeline handles.
pub const MAX_CHANNELS: usize = 2;
