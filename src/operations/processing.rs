//! Level processing: peak normalization and scaling.

use crate::operations::traits::AudioProcessing;
use crate::{AudioBuffer, AudioError, AudioResult};

impl AudioProcessing for AudioBuffer {
    fn normalize_peak(&mut self) -> AudioResult<()> {
        let peak = self.max_sample().ok_or_else(|| {
            AudioError::NumericDegeneracy("cannot normalize an empty buffer".to_string())
        })?;

        if peak == 0.0 {
            return Err(AudioError::NumericDegeneracy(
                "peak sample is zero, normalizing would divide by zero".to_string(),
            ));
        }
        if !peak.is_finite() {
            return Err(AudioError::NumericDegeneracy(format!(
                "peak sample is {peak}"
            )));
        }
        if peak < 0.0 {
            tracing::warn!(peak, "signed peak is negative; normalizing will invert polarity");
        }

        tracing::debug!(peak, trough = self.min_sample(), "peak normalizing");
        self.scale(1.0 / peak);
        Ok(())
    }

    fn scale(&mut self, factor: f32) {
        self.samples_mut().mapv_inplace(|x| x * factor);
    }
}
