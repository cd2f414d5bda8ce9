//! Core in-memory audio representation.
//!
//! [`AudioBuffer`] pairs a channel × frame `ndarray` matrix of `f32` samples with
//! its sample rate. Axis 0 is the channel (left = row 0, right = row 1), axis 1 is
//! time. Every pipeline stage receives and returns buffers with one or two channels.
//!
//! Samples are nominally in `[-1.0, 1.0]` straight after decoding. Gain and
//! compression may push them outside that range and nothing here clamps them.
//!
//! # Examples
//!
//! ```rust
//! use sample_tools::AudioBuffer;
//! use ndarray::array;
//!
//! let mono = AudioBuffer::new_mono(array![0.1f32, 0.2, 0.3], 44100.0).unwrap();
//! assert_eq!(mono.num_channels(), 1);
//! assert_eq!(mono.num_frames(), 3);
//!
//! let stereo = AudioBuffer::new(array![[0.1f32, 0.2], [0.3, 0.4]], 48000.0).unwrap();
//! assert!(stereo.is_stereo());
//! ```

use std::fmt::Display;

use ndarray::{Array1, Array2, ArrayView1, ArrayView2, ArrayViewMut2, Axis};

use crate::{AudioError, AudioResult, LEFT, MAX_CHANNELS};

/// Decoded audio held entirely in memory.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    samples: Array2<f32>,
    sample_rate: f64,
}

impl AudioBuffer {
    /// Creates a buffer from a `(channels, frames)` matrix.
    ///
    /// # Errors
    /// Returns [`AudioError::InvalidInput`] if the channel count is not 1 or 2,
    /// or if the sample rate is not a positive finite number.
    pub fn new(samples: Array2<f32>, sample_rate: f64) -> AudioResult<Self> {
        let channels = samples.nrows();
        if channels == 0 || channels > MAX_CHANNELS {
            return Err(AudioError::invalid_input(format!(
                "buffers must have 1 or {MAX_CHANNELS} channels, got {channels}"
            )));
        }
        validate_sample_rate(sample_rate)?;
        Ok(Self {
            samples,
            sample_rate,
        })
    }

    /// Creates a single-channel buffer.
    pub fn new_mono(samples: Array1<f32>, sample_rate: f64) -> AudioResult<Self> {
        Self::new(samples.insert_axis(Axis(0)), sample_rate)
    }

    /// Creates a two-channel buffer from separate left and right signals.
    ///
    /// # Errors
    /// Returns [`AudioError::InvalidInput`] if the channels differ in length.
    pub fn new_stereo(left: Array1<f32>, right: Array1<f32>, sample_rate: f64) -> AudioResult<Self> {
        if left.len() != right.len() {
            return Err(AudioError::invalid_input(format!(
                "left has {} frames but right has {}",
                left.len(),
                right.len()
            )));
        }
        let samples = ndarray::stack(Axis(0), &[left.view(), right.view()])
            .map_err(|e| AudioError::invalid_input(e.to_string()))?;
        Self::new(samples, sample_rate)
    }

    /// Creates a buffer from frame-interleaved samples (`L R L R ...`).
    ///
    /// # Errors
    /// Returns [`AudioError::InvalidInput`] if `interleaved.len()` is not a multiple
    /// of `channels`.
    pub fn from_interleaved(
        interleaved: Vec<f32>,
        channels: usize,
        sample_rate: f64,
    ) -> AudioResult<Self> {
        if channels == 0 || interleaved.len() % channels != 0 {
            return Err(AudioError::invalid_input(format!(
                "{} interleaved samples cannot be split into {channels} channel(s)",
                interleaved.len()
            )));
        }
        let frames = interleaved.len() / channels;
        let by_frame = Array2::from_shape_vec((frames, channels), interleaved)
            .map_err(|e| AudioError::invalid_input(e.to_string()))?;
        let samples = by_frame.reversed_axes().as_standard_layout().into_owned();
        Self::new(samples, sample_rate)
    }

    /// Number of channels (1 or 2).
    pub fn num_channels(&self) -> usize {
        self.samples.nrows()
    }

    /// Number of frames, i.e. samples per channel.
    pub fn num_frames(&self) -> usize {
        self.samples.ncols()
    }

    /// Total sample count across all channels.
    pub fn total_samples(&self) -> usize {
        self.samples.len()
    }

    /// Sample rate in Hz.
    pub const fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Retags the buffer with a new sample rate without touching the samples.
    pub fn set_sample_rate(&mut self, sample_rate: f64) -> AudioResult<()> {
        validate_sample_rate(sample_rate)?;
        self.sample_rate = sample_rate;
        Ok(())
    }

    /// Returns true for single-channel buffers.
    pub fn is_mono(&self) -> bool {
        self.num_channels() == 1
    }

    /// Returns true for two-channel buffers.
    pub fn is_stereo(&self) -> bool {
        self.num_channels() == 2
    }

    /// Returns true if the buffer holds no frames.
    pub fn is_empty(&self) -> bool {
        self.num_frames() == 0
    }

    /// Duration in seconds.
    pub fn duration_seconds(&self) -> f64 {
        self.num_frames() as f64 / self.sample_rate
    }

    /// Read-only view of the `(channels, frames)` matrix.
    pub fn samples(&self) -> ArrayView2<'_, f32> {
        self.samples.view()
    }

    /// Mutable view of the `(channels, frames)` matrix.
    pub fn samples_mut(&mut self) -> ArrayViewMut2<'_, f32> {
        self.samples.view_mut()
    }

    /// Consumes the buffer and returns its sample matrix.
    pub fn into_samples(self) -> Array2<f32> {
        self.samples
    }

    /// View of one channel, or `None` if it does not exist.
    pub fn channel(&self, index: usize) -> Option<ArrayView1<'_, f32>> {
        (index < self.num_channels()).then(|| self.samples.row(index))
    }

    /// View of the left (first) channel. Always present.
    pub fn left(&self) -> ArrayView1<'_, f32> {
        self.samples.row(LEFT)
    }

    /// Signed maximum over every sample of every channel.
    ///
    /// Returns `None` for an empty buffer.
    pub fn max_sample(&self) -> Option<f32> {
        self.samples.iter().copied().reduce(f32::max)
    }

    /// Signed minimum over every sample of every channel.
    pub fn min_sample(&self) -> Option<f32> {
        self.samples.iter().copied().reduce(f32::min)
    }

    /// Samples in frame order with channels interleaved (`L R L R ...`).
    pub fn to_interleaved_vec(&self) -> Vec<f32> {
        self.samples.t().iter().copied().collect()
    }
}

fn validate_sample_rate(sample_rate: f64) -> AudioResult<()> {
    if !sample_rate.is_finite() || sample_rate <= 0.0 {
        return Err(AudioError::invalid_input(format!(
            "sample rate must be a positive number, got {sample_rate}"
        )));
    }
    Ok(())
}

impl Display for AudioBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "AudioBuffer: {} ch × {} frames @ {} Hz",
            self.num_channels(),
            self.num_frames(),
            self.sample_rate
        )?;
        for (ch, row) in self.samples.rows().into_iter().enumerate() {
            let preview = 3.min(row.len());
            write!(f, "\nCh {ch}: [")?;
            for (i, val) in row.iter().take(preview).enumerate() {
                write!(f, "{val:.4}")?;
                if i + 1 < preview {
                    write!(f, ", ")?;
                }
            }
            if row.len() > preview {
                write!(f, ", ...")?;
            }
            write!(f, "]")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_new_rejects_bad_channel_counts() {
        let three = Array2::<f32>::zeros((3, 4));
        assert!(AudioBuffer::new(three, 44100.0).is_err());

        let none = Array2::<f32>::zeros((0, 4));
        assert!(AudioBuffer::new(none, 44100.0).is_err());
    }

    #[test]
    fn test_new_rejects_bad_sample_rate() {
        let data = array![0.0f32, 1.0];
        assert!(AudioBuffer::new_mono(data.clone(), 0.0).is_err());
        assert!(AudioBuffer::new_mono(data.clone(), -44100.0).is_err());
        assert!(AudioBuffer::new_mono(data, f64::NAN).is_err());
    }

    #[test]
    fn test_from_interleaved_splits_channels() {
        let audio =
            AudioBuffer::from_interleaved(vec![1.0, -1.0, 2.0, -2.0, 3.0, -3.0], 2, 8000.0)
                .unwrap();

        assert_eq!(audio.num_channels(), 2);
        assert_eq!(audio.num_frames(), 3);
        assert_eq!(audio.channel(0).unwrap(), array![1.0f32, 2.0, 3.0]);
        assert_eq!(audio.channel(1).unwrap(), array![-1.0f32, -2.0, -3.0]);
        assert_eq!(audio.to_interleaved_vec(), vec![1.0, -1.0, 2.0, -2.0, 3.0, -3.0]);
    }

    #[test]
    fn test_from_interleaved_rejects_ragged_input() {
        assert!(AudioBuffer::from_interleaved(vec![1.0, 2.0, 3.0], 2, 8000.0).is_err());
    }

    #[test]
    fn test_new_stereo_requires_equal_lengths() {
        let result = AudioBuffer::new_stereo(array![1.0f32, 2.0], array![1.0f32], 44100.0);
        assert!(result.is_err());
    }

    #[test]
    fn test_max_sample_is_signed() {
        let audio = AudioBuffer::new_mono(array![-0.9f32, 0.2, 0.5], 44100.0).unwrap();
        assert_eq!(audio.max_sample(), Some(0.5));
        assert_eq!(audio.min_sample(), Some(-0.9));
    }

    #[test]
    fn test_channel_out_of_range() {
        let audio = AudioBuffer::new_mono(array![0.1f32], 44100.0).unwrap();
        assert!(audio.channel(1).is_none());
    }

    #[test]
    fn test_duration() {
        let audio = AudioBuffer::new_mono(Array1::zeros(22050), 44100.0).unwrap();
        assert_eq!(audio.duration_seconds(), 0.5);
    }
}
