//! File decoding and the Loader stage.

use std::fs::File;
use std::path::Path;

use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{CODEC_TYPE_NULL, DecoderOptions};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::resampling::resample;
use crate::{AudioBuffer, AudioError, AudioResult, MAX_CHANNELS};

/// Something that turns a file into an [`AudioBuffer`] at the file's own sample rate.
pub trait AudioDecoder {
    /// Decode the whole file.
    ///
    /// # Errors
    /// Returns [`AudioError::Decode`] if the file is unreadable, corrupt, or in an
    /// unsupported format.
    fn decode(&self, path: &Path) -> AudioResult<AudioBuffer>;
}

/// Decoder backed by symphonia. Handles WAV, MP3, FLAC and Ogg Vorbis.
#[derive(Debug, Clone, Copy, Default)]
pub struct SymphoniaDecoder;

impl AudioDecoder for SymphoniaDecoder {
    fn decode(&self, path: &Path) -> AudioResult<AudioBuffer> {
        tracing::debug!(path = %path.display(), "decoding audio file");

        let file = File::open(path).map_err(|e| AudioError::decode(path, e.to_string()))?;
        let mss = MediaSourceStream::new(Box::new(file), Default::default());

        let mut hint = Hint::new();
        if let Some(extension) = path.extension().and_then(|e| e.to_str()) {
            hint.with_extension(extension);
        }

        let probed = symphonia::default::get_probe()
            .format(
                &hint,
                mss,
                &FormatOptions::default(),
                &MetadataOptions::default(),
            )
            .map_err(|e| AudioError::decode(path, format!("unsupported format: {e}")))?;
        let mut format = probed.format;

        let track = format
            .tracks()
            .iter()
            .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
            .ok_or_else(|| AudioError::decode(path, "no audio track found"))?;
        let track_id = track.id;
        let mut sample_rate = track.codec_params.sample_rate;
        let mut channels = track.codec_params.channels.map(|c| c.count());

        if let Some(count) = channels {
            check_channel_count(path, count)?;
        }

        let mut decoder = symphonia::default::get_codecs()
            .make(&track.codec_params, &DecoderOptions::default())
            .map_err(|e| AudioError::decode(path, format!("unsupported codec: {e}")))?;

        let mut interleaved: Vec<f32> = Vec::new();

        loop {
            let packet = match format.next_packet() {
                Ok(packet) => packet,
                Err(SymphoniaError::IoError(e))
                    if e.kind() == std::io::ErrorKind::UnexpectedEof =>
                {
                    break;
                }
                Err(SymphoniaError::ResetRequired) => break,
                Err(e) => {
                    return Err(AudioError::decode(path, format!("error reading packet: {e}")));
                }
            };

            if packet.track_id() != track_id {
                continue;
            }

            let decoded = match decoder.decode(&packet) {
                Ok(decoded) => decoded,
                Err(SymphoniaError::DecodeError(e)) => {
                    tracing::warn!(path = %path.display(), error = e, "skipping corrupt packet");
                    continue;
                }
                Err(e) => return Err(AudioError::decode(path, e.to_string())),
            };

            let spec = *decoded.spec();
            let count = spec.channels.count();
            match channels {
                Some(expected) if expected != count => {
                    return Err(AudioError::decode(
                        path,
                        format!("channel count changed mid-stream ({expected} -> {count})"),
                    ));
                }
                Some(_) => {}
                None => {
                    check_channel_count(path, count)?;
                    channels = Some(count);
                }
            }
            sample_rate.get_or_insert(spec.rate);

            let mut sample_buf = SampleBuffer::<f32>::new(decoded.capacity() as u64, spec);
            sample_buf.copy_interleaved_ref(decoded);
            interleaved.extend_from_slice(sample_buf.samples());
        }

        let (Some(channels), Some(sample_rate)) = (channels, sample_rate) else {
            return Err(AudioError::decode(path, "no decodable audio in file"));
        };

        let audio = AudioBuffer::from_interleaved(interleaved, channels, f64::from(sample_rate))
            .map_err(|e| AudioError::decode(path, e.to_string()))?;

        tracing::debug!(
            path = %path.display(),
            channels,
            frames = audio.num_frames(),
            sample_rate,
            "audio decoding complete"
        );
        Ok(audio)
    }
}

fn check_channel_count(path: &Path, count: usize) -> AudioResult<()> {
    if count == 0 || count > MAX_CHANNELS {
        return Err(AudioError::decode(
            path,
            format!("{count} channels; only mono and stereo sources are supported"),
        ));
    }
    Ok(())
}

/// Decodes files and brings them to the requested rate and speed.
///
/// The resampling target is `target_sample_rate / speed_multiplier`, while the
/// returned buffer is tagged with the nominal `target_sample_rate`. A multiplier
/// above one therefore shortens the audio and raises its pitch on playback.
/// Without a target rate the source rate is the nominal rate.
#[derive(Debug, Clone)]
pub struct Loader<D = SymphoniaDecoder> {
    decoder: D,
    target_sample_rate: Option<f64>,
    speed_multiplier: f64,
}

impl Loader<SymphoniaDecoder> {
    /// Create a loader backed by [`SymphoniaDecoder`].
    ///
    /// # Errors
    /// Returns [`AudioError::Configuration`] for a non-positive or non-finite rate
    /// or multiplier.
    pub fn new(target_sample_rate: Option<f64>, speed_multiplier: f64) -> AudioResult<Self> {
        Self::with_decoder(SymphoniaDecoder, target_sample_rate, speed_multiplier)
    }
}

impl<D: AudioDecoder> Loader<D> {
    /// Create a loader around any [`AudioDecoder`].
    ///
    /// # Errors
    /// Returns [`AudioError::Configuration`] for a non-positive or non-finite rate
    /// or multiplier.
    pub fn with_decoder(
        decoder: D,
        target_sample_rate: Option<f64>,
        speed_multiplier: f64,
    ) -> AudioResult<Self> {
        if let Some(rate) = target_sample_rate {
            if !rate.is_finite() || rate <= 0.0 {
                return Err(AudioError::configuration(format!(
                    "sample rate must be positive, got {rate}"
                )));
            }
        }
        if !speed_multiplier.is_finite() || speed_multiplier <= 0.0 {
            return Err(AudioError::configuration(format!(
                "speed multiplier must be positive, got {speed_multiplier}"
            )));
        }
        Ok(Self {
            decoder,
            target_sample_rate,
            speed_multiplier,
        })
    }

    /// Nominal rate buffers are tagged with, if one was requested.
    pub fn target_sample_rate(&self) -> Option<f64> {
        self.target_sample_rate
    }

    /// Playback speed factor.
    pub fn speed_multiplier(&self) -> f64 {
        self.speed_multiplier
    }

    /// Decode `path` and resample it to the effective rate.
    pub fn load(&self, path: impl AsRef<Path>) -> AudioResult<AudioBuffer> {
        let path = path.as_ref();
        let decoded = self.decoder.decode(path)?;
        let source_rate = decoded.sample_rate();
        let nominal_rate = self.target_sample_rate.unwrap_or(source_rate);
        let effective_rate = nominal_rate / self.speed_multiplier;

        let mut audio = if effective_rate == source_rate {
            decoded
        } else {
            resample(&decoded, effective_rate)?
        };
        audio.set_sample_rate(nominal_rate)?;

        tracing::info!(
            path = %path.display(),
            channels = audio.num_channels(),
            frames = audio.num_frames(),
            seconds = audio.duration_seconds(),
            source_rate,
            effective_rate,
            sample_rate = nominal_rate,
            "loaded"
        );
        Ok(audio)
    }
}
