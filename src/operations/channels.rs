//! Channel manipulation operations.
//!
//! - `select_channel`: keep one physical channel (left = 0, right = 1)
//! - `duplicate_to_stereo`: copy a mono signal to both left and right
//! - `match_channels`: upmix to a target channel count before combining buffers

use ndarray::{Axis, concatenate};

use crate::operations::traits::AudioChannelOps;
use crate::operations::types::MonoChannel;
use crate::{AudioBuffer, AudioError, AudioResult, MAX_CHANNELS};

impl AudioChannelOps for AudioBuffer {
    fn select_channel(&self, channel: MonoChannel) -> AudioResult<AudioBuffer> {
        let index = channel.index();
        let selected = self.channel(index).ok_or(AudioError::ChannelMismatch {
            requested: index,
            available: self.num_channels(),
        })?;
        tracing::debug!(%channel, channels = self.num_channels(), "selecting channel");
        AudioBuffer::new_mono(selected.to_owned(), self.sample_rate())
    }

    fn duplicate_to_stereo(&self) -> AudioResult<AudioBuffer> {
        if self.is_stereo() {
            return Ok(self.clone());
        }
        let mono = self.samples();
        let stereo = concatenate(Axis(0), &[mono, mono])
            .map_err(|e| AudioError::invalid_input(e.to_string()))?;
        AudioBuffer::new(stereo, self.sample_rate())
    }

    fn match_channels(self, channels: usize) -> AudioResult<AudioBuffer> {
        match channels {
            c if c == self.num_channels() => Ok(self),
            MAX_CHANNELS if self.is_mono() => self.duplicate_to_stereo(),
            _ => Err(AudioError::invalid_input(format!(
                "cannot convert {} channel(s) to {channels}",
                self.num_channels()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn stereo() -> AudioBuffer {
        AudioBuffer::new(array![[0.1f32, 0.2, 0.3], [-0.1, -0.2, -0.3]], 44100.0).unwrap()
    }

    #[test]
    fn test_select_left_returns_channel_zero() {
        let mono = stereo().select_channel(MonoChannel::Left).unwrap();
        assert_eq!(mono.num_channels(), 1);
        assert_eq!(mono.left(), array![0.1f32, 0.2, 0.3]);
    }

    #[test]
    fn test_select_right_returns_channel_one() {
        let mono = stereo().select_channel(MonoChannel::Right).unwrap();
        assert_eq!(mono.num_channels(), 1);
        assert_eq!(mono.left(), array![-0.1f32, -0.2, -0.3]);
    }

    #[test]
    fn test_select_is_not_a_downmix() {
        let mono = stereo().select_channel(MonoChannel::Left).unwrap();
        assert_ne!(mono.left()[0], 0.0);
    }

    #[test]
    fn test_select_right_on_mono_fails() {
        let audio = AudioBuffer::new_mono(array![0.5f32, 0.5], 44100.0).unwrap();
        match audio.select_channel(MonoChannel::Right) {
            Err(AudioError::ChannelMismatch {
                requested,
                available,
            }) => {
                assert_eq!(requested, 1);
                assert_eq!(available, 1);
            }
            other => panic!("expected channel mismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_select_left_on_mono_is_identity() {
        let audio = AudioBuffer::new_mono(array![0.5f32, -0.5], 22050.0).unwrap();
        let mono = audio.select_channel(MonoChannel::Left).unwrap();
        assert_eq!(mono, audio);
    }

    #[test]
    fn test_duplicate_to_stereo() {
        let audio = AudioBuffer::new_mono(array![0.1f32, 0.4], 44100.0).unwrap();
        let stereo = audio.duplicate_to_stereo().unwrap();
        assert_eq!(stereo.num_channels(), 2);
        assert_eq!(stereo.channel(0).unwrap(), array![0.1f32, 0.4]);
        assert_eq!(stereo.channel(1).unwrap(), array![0.1f32, 0.4]);
    }

    #[test]
    fn test_match_channels() {
        let audio = AudioBuffer::new_mono(array![0.1f32], 44100.0).unwrap();
        assert_eq!(audio.clone().match_channels(1).unwrap(), audio);
        assert_eq!(audio.clone().match_channels(2).unwrap().num_channels(), 2);
        assert!(stereo().match_channels(1).is_err());
    }
}
