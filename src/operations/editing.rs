//! Time-axis editing: reversal and concatenation.

use ndarray::{Axis, concatenate, s};

use crate::operations::traits::{AudioChannelOps, AudioEditing};
use crate::{AudioBuffer, AudioError, AudioResult};

impl AudioEditing for AudioBuffer {
    fn reverse(&self) -> AudioBuffer {
        let mut reversed = self.clone();
        reversed.reverse_in_place();
        reversed
    }

    fn reverse_in_place(&mut self) {
        let mut samples = self.samples_mut();
        // Time axis only: rows (channels) keep their order.
        for mut channel in samples.rows_mut() {
            let len = channel.len();
            for i in 0..len / 2 {
                channel.swap(i, len - 1 - i);
            }
        }
    }

    fn concatenate(segments: Vec<AudioBuffer>) -> AudioResult<AudioBuffer> {
        let Some(first) = segments.first() else {
            return Err(AudioError::invalid_input(
                "Cannot concatenate empty segment list",
            ));
        };
        let sample_rate = first.sample_rate();
        let max_channels = segments
            .iter()
            .map(AudioBuffer::num_channels)
            .max()
            .unwrap_or(1);

        if segments.iter().any(|seg| seg.sample_rate() != sample_rate) {
            tracing::warn!(
                sample_rate,
                "concatenating segments with differing sample rates; keeping the first"
            );
        }

        let matched = segments
            .into_iter()
            .map(|seg| seg.match_channels(max_channels))
            .collect::<AudioResult<Vec<_>>>()?;

        let views: Vec<_> = matched.iter().map(|seg| seg.samples()).collect();
        let joined = concatenate(Axis(1), &views)
            .map_err(|e| AudioError::invalid_input(format!("Concatenation failed: {e}")))?;

        tracing::debug!(
            segments = matched.len(),
            channels = max_channels,
            frames = joined.ncols(),
            "concatenated"
        );
        AudioBuffer::new(joined, sample_rate)
    }
}

/// Returns a copy with both axes reversed: frames run backwards and left/right swap.
///
/// Selected by `reverse_all_axes` in the pipeline configuration.
pub fn reverse_all_axes(audio: &AudioBuffer) -> AudioResult<AudioBuffer> {
    let flipped = audio.samples().slice(s![..;-1, ..;-1]).to_owned();
    AudioBuffer::new(flipped, audio.sample_rate())
}
