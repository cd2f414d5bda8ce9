//! Module for handling audio sample resampling operations.
//! Uses rubato for high-quality resampling.

use ndarray::Array2;
use rubato::{
    Resampler, SincFixedIn, SincInterpolationParameters, SincInterpolationType, WindowFunction,
};

use crate::{AudioBuffer, AudioError, AudioResult};

const CHUNK_SIZE: usize = 1024;

fn resample_error(context: &str, e: impl std::fmt::Display) -> AudioError {
    AudioError::Resample(format!("{context}: {e}"))
}

/// Resamples every channel from `audio.sample_rate()` to `target_sample_rate`.
///
/// rubato's sinc resampler is already centred on each input frame, so content at
/// input frame `n` lands at output frame `n * ratio`. The filter is flushed until
/// the output holds `ceil(frames * ratio)` frames. The returned buffer is tagged
/// with `target_sample_rate`.
///
/// # Errors
/// Returns [`AudioError::Resample`] if rubato rejects the ratio or fails while
/// processing, and [`AudioError::InvalidInput`] for a non-positive target rate.
///
/// # Example
/// ```rust
/// use sample_tools::{AudioBuffer, resampling::resample};
/// use ndarray::Array1;
///
/// let audio = AudioBuffer::new_mono(Array1::zeros(4410), 44100.0).unwrap();
/// let resampled = resample(&audio, 22050.0).unwrap();
/// assert_eq!(resampled.sample_rate(), 22050.0);
/// assert_eq!(resampled.num_frames(), 2205);
/// ```
pub fn resample(audio: &AudioBuffer, target_sample_rate: f64) -> AudioResult<AudioBuffer> {
    if !target_sample_rate.is_finite() || target_sample_rate <= 0.0 {
        return Err(AudioError::invalid_input(format!(
            "target sample rate must be positive, got {target_sample_rate}"
        )));
    }

    let input_rate = audio.sample_rate();
    if input_rate == target_sample_rate || audio.is_empty() {
        let mut same = audio.clone();
        same.set_sample_rate(target_sample_rate)?;
        return Ok(same);
    }

    let ratio = target_sample_rate / input_rate;
    let channels = audio.num_channels();
    let frames = audio.num_frames();
    let expected = (frames as f64 * ratio).ceil() as usize;

    tracing::debug!(
        from = input_rate,
        to = target_sample_rate,
        channels,
        frames,
        "resampling"
    );

    let mut resampler = SincFixedIn::<f32>::new(
        ratio,
        1.0,
        SincInterpolationParameters {
            sinc_len: 256,
            f_cutoff: 0.95,
            interpolation: SincInterpolationType::Cubic,
            oversampling_factor: 256,
            window: WindowFunction::BlackmanHarris2,
        },
        CHUNK_SIZE.min(frames),
        channels,
    )
    .map_err(|e| resample_error("Failed to create resampler", e))?;

    let input: Vec<Vec<f32>> = audio
        .samples()
        .rows()
        .into_iter()
        .map(|row| row.to_vec())
        .collect();
    let mut output: Vec<Vec<f32>> = vec![Vec::with_capacity(expected); channels];

    let mut position = 0;
    while position + resampler.input_frames_next() <= frames {
        let next = resampler.input_frames_next();
        let chunk: Vec<&[f32]> = input
            .iter()
            .map(|ch| &ch[position..position + next])
            .collect();
        let processed = resampler
            .process(chunk.as_slice(), None)
            .map_err(|e| resample_error("Chunk resampling failed", e))?;
        append(&mut output, processed);
        position += next;
    }

    if position < frames {
        let tail: Vec<&[f32]> = input.iter().map(|ch| &ch[position..]).collect();
        let processed = resampler
            .process_partial(Some(tail.as_slice()), None)
            .map_err(|e| resample_error("Final chunk resampling failed", e))?;
        append(&mut output, processed);
    }

    // Flush the filter until the last input frames have come out.
    while output[0].len() < expected {
        let processed = resampler
            .process_partial(None::<&[Vec<f32>]>, None)
            .map_err(|e| resample_error("Flushing resampler failed", e))?;
        if processed.first().is_none_or(Vec::is_empty) {
            break;
        }
        append(&mut output, processed);
    }

    let mut flat = Vec::with_capacity(channels * expected);
    for mut channel in output {
        channel.resize(expected, 0.0);
        flat.extend(channel);
    }

    let samples = Array2::from_shape_vec((channels, expected), flat)
        .map_err(|e| resample_error("Failed to assemble output", e))?;
    AudioBuffer::new(samples, target_sample_rate)
}

fn append(output: &mut [Vec<f32>], processed: Vec<Vec<f32>>) {
    for (dst, src) in output.iter_mut().zip(processed) {
        dst.extend(src);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array1, array};

    fn sine(frames: usize, sample_rate: f64) -> Array1<f32> {
        Array1::from_iter((0..frames).map(|i| {
            (i as f64 * 2.0 * std::f64::consts::PI * 440.0 / sample_rate).sin() as f32 * 0.5
        }))
    }

    #[test]
    fn test_resample_mono() {
        let audio = AudioBuffer::new_mono(sine(4410, 44100.0), 44100.0).unwrap();
        let resampled = resample(&audio, 48000.0).unwrap();

        assert_eq!(resampled.sample_rate(), 48000.0);
        assert_eq!(resampled.num_channels(), 1);
        assert_eq!(resampled.num_frames(), 4800);
    }

    #[test]
    fn test_resample_stereo_keeps_channels() {
        let audio = AudioBuffer::new_stereo(
            sine(3000, 44100.0),
            sine(3000, 44100.0).mapv(|x| -x),
            44100.0,
        )
        .unwrap();
        let resampled = resample(&audio, 11025.0).unwrap();

        assert_eq!(resampled.num_channels(), 2);
        assert_eq!(resampled.num_frames(), 750);
        // Polarity of the right channel survives.
        let mid = 300;
        let left = resampled.channel(0).unwrap()[mid];
        let right = resampled.channel(1).unwrap()[mid];
        assert!((left + right).abs() < 1e-3);
    }

    #[test]
    fn test_fractional_ratio() {
        let audio = AudioBuffer::new_mono(sine(2000, 44100.0), 44100.0).unwrap();
        let resampled = resample(&audio, 44100.0 / 3.0).unwrap();
        assert_eq!(resampled.num_frames(), 667);
    }

    fn impulse(frames: usize, at: usize) -> Array1<f32> {
        let mut signal = Array1::zeros(frames);
        signal[at] = 1.0;
        signal
    }

    fn peak_frame(audio: &AudioBuffer) -> usize {
        let channel = audio.channel(0).unwrap();
        let mut best = 0;
        for (i, &x) in channel.iter().enumerate() {
            if x.abs() > channel[best].abs() {
                best = i;
            }
        }
        best
    }

    #[test]
    fn test_impulse_lands_at_scaled_position() {
        for target in [22050.0, 88200.0, 4410.0] {
            let ratio = target / 44100.0;
            let audio = AudioBuffer::new_mono(impulse(8820, 4000), 44100.0).unwrap();
            let resampled = resample(&audio, target).unwrap();

            let expected = (4000.0 * ratio).round() as usize;
            let found = peak_frame(&resampled);
            assert!(
                found.abs_diff(expected) <= 1,
                "{target} Hz: peak at {found}, expected {expected}"
            );
        }
    }

    #[test]
    fn test_impulse_near_start_survives() {
        let audio = AudioBuffer::new_mono(impulse(1000, 50), 44100.0).unwrap();
        let resampled = resample(&audio, 22050.0).unwrap();

        assert_eq!(resampled.num_frames(), 500);
        assert!(peak_frame(&resampled).abs_diff(25) <= 1);
        assert!(resampled.channel(0).unwrap()[peak_frame(&resampled)].abs() > 0.3);
    }

    #[test]
    fn test_tail_is_not_cut() {
        // Content in the last frames must still be present after flushing.
        let audio = AudioBuffer::new_mono(impulse(4410, 4300), 44100.0).unwrap();
        let resampled = resample(&audio, 48000.0).unwrap();

        let expected = (4300.0 * 48000.0 / 44100.0_f64).round() as usize;
        assert!(peak_frame(&resampled).abs_diff(expected) <= 1);
    }

    #[test]
    fn test_no_resampling_needed() {
        let audio = AudioBuffer::new_mono(array![1.0f32, 0.0, -1.0], 44100.0).unwrap();
        let result = resample(&audio, 44100.0).unwrap();
        assert_eq!(result, audio);
    }

    #[test]
    fn test_invalid_target_rate() {
        let audio = AudioBuffer::new_mono(array![1.0f32, 0.0], 44100.0).unwrap();
        assert!(resample(&audio, 0.0).is_err());
        assert!(resample(&audio, -8000.0).is_err());
    }
}
