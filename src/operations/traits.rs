//! Core trait definitions for audio operations.
//!
//! Each trait covers one stage of the pipeline and is implemented for
//! [`AudioBuffer`] in its own module.

use crate::operations::types::{CompressionPreset, DynamicsParams, MonoChannel};
use crate::{AudioBuffer, AudioResult};

/// Channel manipulation operations.
pub trait AudioChannelOps {
    /// Returns a single-channel buffer holding exactly one physical channel.
    ///
    /// # Errors
    /// Returns [`crate::AudioError::ChannelMismatch`] if `Right` is requested on a
    /// mono buffer.
    fn select_channel(&self, channel: MonoChannel) -> AudioResult<AudioBuffer>;

    /// Duplicates a mono buffer's only channel into two channels.
    ///
    /// Stereo buffers are returned unchanged.
    fn duplicate_to_stereo(&self) -> AudioResult<AudioBuffer>;

    /// Upmixes the buffer until it has `channels` channels.
    fn match_channels(self, channels: usize) -> AudioResult<AudioBuffer>;
}

/// Time-domain editing operations.
pub trait AudioEditing {
    /// Reverses the order of frames.
    ///
    /// Only the time axis is reversed; channel order is left as is.
    fn reverse(&self) -> AudioBuffer;

    /// Reverses the order of frames in place.
    fn reverse_in_place(&mut self);

    /// Joins buffers end to end in input order.
    ///
    /// Mono buffers are duplicated to stereo when any segment is stereo. Sample
    /// rates are not reconciled; the result carries the first segment's rate.
    ///
    /// # Errors
    /// Returns [`crate::AudioError::InvalidInput`] if `segments` is empty.
    fn concatenate(segments: Vec<AudioBuffer>) -> AudioResult<AudioBuffer>;
}

/// Gain and compression.
pub trait AudioDynamicRange {
    /// Multiplies every sample by `10^(gain_db / 20)`.
    fn apply_gain(&mut self, gain_db: f32);

    /// Runs a feed-forward peak compressor over every channel.
    ///
    /// The envelope follower is time-constant based, so the buffer's sample rate
    /// determines how many frames an attack or release spans.
    fn apply_compressor(&mut self, params: &DynamicsParams) -> AudioResult<()>;

    /// Applies a preset's gain stage, then its compressor.
    fn apply_dynamics_preset(&mut self, preset: CompressionPreset) -> AudioResult<()>;
}

/// Level processing.
pub trait AudioProcessing {
    /// Scales every sample by `1 / max(samples)`.
    ///
    /// The signed maximum is used, not the maximum magnitude, so a negative
    /// excursion larger than the positive peak will end up below -1.0.
    ///
    /// # Errors
    /// Returns [`crate::AudioError::NumericDegeneracy`] when the maximum is zero
    /// or the buffer is empty.
    fn normalize_peak(&mut self) -> AudioResult<()>;

    /// Multiplies every sample by `factor`.
    fn scale(&mut self, factor: f32);
}
