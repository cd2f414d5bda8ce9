//! PCM WAV encoding.
//!
//! Samples are quantized with Rust's saturating float-to-int casts. Nothing is
//! clamped beforehand, so overshoot from the gain and compression stages clips
//! at the integer limits.

use std::path::{Path, PathBuf};

use hound::{SampleFormat, WavSpec, WavWriter};

use crate::operations::BitDepth;
use crate::{AudioBuffer, AudioError, AudioResult};

/// Quantize a sample to signed 16-bit: `round(x * 32767)`.
pub fn quantize_i16(sample: f32) -> i16 {
    (sample * 32767.0).round() as i16
}

/// Quantize a sample to offset-biased unsigned 8-bit: `round(x * 127) + 127`.
pub fn quantize_u8(sample: f32) -> u8 {
    ((sample * 127.0).round() + 127.0) as u8
}

/// Output path for buffer `index` (zero-based) out of `count`.
///
/// A single output keeps `output` as is. Several outputs get `_<index + 1>`
/// inserted before the extension: `out.wav` becomes `out_1.wav`, `out_2.wav`, ...
pub fn output_path(output: &Path, index: usize, count: usize) -> PathBuf {
    if count == 1 {
        return output.to_path_buf();
    }
    let stem = output
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match output.extension() {
        Some(ext) => format!("{stem}_{}.{}", index + 1, ext.to_string_lossy()),
        None => format!("{stem}_{}", index + 1),
    };
    output.with_file_name(name)
}

fn wav_sample_rate(sample_rate: f64) -> AudioResult<u32> {
    let rounded = sample_rate.round();
    if !rounded.is_finite() || rounded < 1.0 || rounded > f64::from(u32::MAX) {
        return Err(AudioError::configuration(format!(
            "sample rate {sample_rate} cannot be stored in a WAV header"
        )));
    }
    Ok(rounded as u32)
}

/// Write one buffer as PCM WAV and return the absolute path written.
///
/// The sample rate in the header is `sample_rate`, not the buffer's own tag.
pub fn write_wav(
    audio: &AudioBuffer,
    sample_rate: f64,
    bit_depth: BitDepth,
    path: impl AsRef<Path>,
) -> AudioResult<PathBuf> {
    let path = path.as_ref();
    let spec = WavSpec {
        channels: audio.num_channels() as u16,
        sample_rate: wav_sample_rate(sample_rate)?,
        bits_per_sample: bit_depth.bits(),
        sample_format: SampleFormat::Int,
    };

    let mut writer = WavWriter::create(path, spec)?;
    // Frame-major: every channel of frame 0, then frame 1, ...
    let interleaved = audio.samples().reversed_axes();
    match bit_depth {
        BitDepth::Eight => {
            for &sample in interleaved.iter() {
                // hound stores 8-bit samples as i8 + 128.
                let byte = quantize_u8(sample);
                writer.write_sample((i16::from(byte) - 128) as i8)?;
            }
        }
        BitDepth::Sixteen => {
            for &sample in interleaved.iter() {
                writer.write_sample(quantize_i16(sample))?;
            }
        }
    }
    writer.finalize()?;

    let absolute = std::path::absolute(path)?;
    tracing::info!(
        path = %absolute.display(),
        channels = spec.channels,
        frames = audio.num_frames(),
        samples = audio.total_samples(),
        sample_rate = spec.sample_rate,
        bits = spec.bits_per_sample,
        "wrote wav"
    );
    Ok(absolute)
}

/// Encode every buffer to its own WAV file.
///
/// `bit_rate` must be 8 or 16; anything else fails before a file is touched.
/// Returns the absolute paths in buffer order, named per [`output_path`].
///
/// # Errors
/// [`AudioError::Configuration`] for an unsupported bit depth or sample rate,
/// [`AudioError::InvalidInput`] for an empty buffer list, and
/// [`AudioError::Encode`]/[`AudioError::Io`] if writing fails. A failure part way
/// through may leave earlier files on disk.
pub fn save(
    buffers: &[AudioBuffer],
    sample_rate: f64,
    bit_rate: u16,
    output: impl AsRef<Path>,
) -> AudioResult<Vec<PathBuf>> {
    let bit_depth = BitDepth::try_from(bit_rate)?;
    wav_sample_rate(sample_rate)?;
    if buffers.is_empty() {
        return Err(AudioError::invalid_input("no buffers to save"));
    }

    let output = output.as_ref();
    let count = buffers.len();
    buffers
        .iter()
        .enumerate()
        .map(|(i, audio)| write_wav(audio, sample_rate, bit_depth, output_path(output, i, count)))
        .collect()
}
