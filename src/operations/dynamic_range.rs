//! Gain and compression.
//!
//! The compressor is a feed-forward design with a per-channel peak envelope
//! follower. Gain reduction is computed directly on the linear envelope:
//! below the threshold the gain is unity, above it the output level grows at
//! `1 / ratio` of the input level. Nothing here clamps the output.

use crate::operations::traits::AudioDynamicRange;
use crate::operations::types::{CompressionPreset, DynamicsParams};
use crate::{AudioBuffer, AudioResult};

/// Convert decibels to linear amplitude.
pub fn db_to_linear(db: f32) -> f32 {
    10.0f32.powf(db / 20.0)
}

/// Convert linear amplitude to decibels, floored at -80 dB.
pub fn linear_to_db(linear: f32) -> f32 {
    if linear > 0.0 {
        20.0 * linear.log10()
    } else {
        -80.0
    }
}

/// One-pole ballistic coefficient for a time constant in milliseconds.
fn ballistic_coeff(time_ms: f32, sample_rate: f32) -> f32 {
    if time_ms < 1.0e-3 {
        0.0
    } else {
        (-2.0 * std::f32::consts::PI * 1000.0 / (time_ms * sample_rate)).exp()
    }
}

/// Envelope follower for attack and release processing.
///
/// Tracks the rectified input with separate rising (attack) and falling
/// (release) coefficients.
#[derive(Debug, Clone)]
pub struct EnvelopeFollower {
    envelope: f32,
    attack_coeff: f32,
    release_coeff: f32,
}

impl EnvelopeFollower {
    /// Create a new envelope follower.
    ///
    /// # Arguments
    /// * `attack_ms` - Attack time in milliseconds
    /// * `release_ms` - Release time in milliseconds
    /// * `sample_rate` - Sample rate in Hz
    pub fn new(attack_ms: f32, release_ms: f32, sample_rate: f32) -> Self {
        Self {
            envelope: 0.0,
            attack_coeff: ballistic_coeff(attack_ms, sample_rate),
            release_coeff: ballistic_coeff(release_ms, sample_rate),
        }
    }

    /// Process a sample and return the updated envelope.
    pub fn process(&mut self, input: f32) -> f32 {
        let level = input.abs();
        let coeff = if level > self.envelope {
            self.attack_coeff
        } else {
            self.release_coeff
        };
        self.envelope = level + coeff * (self.envelope - level);
        self.envelope
    }

    /// Reset the envelope follower state.
    pub fn reset(&mut self) {
        self.envelope = 0.0;
    }
}

/// Linear gain for a given envelope level.
fn compression_gain(envelope: f32, threshold: f32, ratio: f32) -> f32 {
    if envelope < threshold {
        1.0
    } else {
        (envelope / threshold).powf(1.0 / ratio - 1.0)
    }
}

impl AudioDynamicRange for AudioBuffer {
    fn apply_gain(&mut self, gain_db: f32) {
        let gain = db_to_linear(gain_db);
        self.samples_mut().mapv_inplace(|x| x * gain);
    }

    fn apply_compressor(&mut self, params: &DynamicsParams) -> AudioResult<()> {
        params.validate()?;

        let sample_rate = self.sample_rate() as f32;
        let threshold = db_to_linear(params.threshold_db);
        let mut follower = EnvelopeFollower::new(params.attack_ms, params.release_ms, sample_rate);
        let mut min_gain = 1.0f32;
        let mut samples = self.samples_mut();

        // Channels are compressed independently, no stereo linking.
        for mut channel in samples.rows_mut() {
            follower.reset();
            for sample in channel.iter_mut() {
                let envelope = follower.process(*sample);
                let gain = compression_gain(envelope, threshold, params.ratio);
                min_gain = min_gain.min(gain);
                *sample *= gain;
            }
        }
        tracing::debug!(max_reduction_db = -linear_to_db(min_gain), "compressed");
        Ok(())
    }

    fn apply_dynamics_preset(&mut self, preset: CompressionPreset) -> AudioResult<()> {
        let params = preset.parameters();
        tracing::debug!(
            %preset,
            gain_db = params.gain_db,
            threshold_db = params.threshold_db,
            ratio = params.ratio,
            "applying dynamics preset"
        );
        self.apply_gain(params.gain_db);
        self.apply_compressor(&params)
    }
}
