//! The batch pipeline: load, transform in a fixed order, encode.
//!
//! ```text
//! Loader -> [mono] -> [concatenate] -> [compress] -> [normalize] -> [reverse] -> WAV
//! ```
//!
//! Each bracketed stage runs only when enabled in [`PipelineConfig`]; the order
//! between them is [`STAGE_ORDER`] and cannot be changed.
//!
//! # Example
//! ```rust,no_run
//! use sample_tools::pipeline::{Pipeline, PipelineConfig};
//!
//! # fn example() -> Result<(), sample_tools::AudioError> {
//! let config = PipelineConfig {
//!     concatenate: true,
//!     normalize: true,
//!     sample_rate: Some(44100.0),
//!     ..PipelineConfig::default()
//! };
//! let written = Pipeline::new(config)?.run_and_save(&["a.wav", "b.mp3"], "joined.wav")?;
//! println!("{}", written[0].display());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod stage;

use std::path::{Path, PathBuf};

pub use config::PipelineConfig;
pub use stage::{STAGE_ORDER, Stage, StageKind};

use crate::io::{AudioDecoder, Loader, SymphoniaDecoder, output_path, save, write_wav};
use crate::{AudioBuffer, AudioError, AudioResult};

/// A validated configuration together with its loader and ordered stages.
#[derive(Debug, Clone)]
pub struct Pipeline<D = SymphoniaDecoder> {
    config: PipelineConfig,
    loader: Loader<D>,
    stages: Vec<Stage>,
}

impl Pipeline<SymphoniaDecoder> {
    /// Build a pipeline that decodes with symphonia.
    ///
    /// # Errors
    /// Returns [`AudioError::Configuration`] if `config` fails validation.
    pub fn new(config: PipelineConfig) -> AudioResult<Self> {
        Self::with_decoder(config, SymphoniaDecoder)
    }
}

impl<D: AudioDecoder> Pipeline<D> {
    /// Build a pipeline around a custom decoder.
    pub fn with_decoder(config: PipelineConfig, decoder: D) -> AudioResult<Self> {
        config.validate()?;
        let loader = Loader::with_decoder(decoder, config.sample_rate, config.speed_multiplier)?;
        let stages = Stage::all_from_config(&config);
        Ok(Self {
            config,
            loader,
            stages,
        })
    }

    /// The validated configuration.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Enabled stages in execution order.
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Load every input and run the stages over the results.
    ///
    /// Any decode failure aborts the run.
    pub fn run<P: AsRef<Path>>(&self, inputs: &[P]) -> AudioResult<Vec<AudioBuffer>> {
        if inputs.is_empty() {
            return Err(AudioError::invalid_input("no input files given"));
        }
        let buffers = inputs
            .iter()
            .map(|path| self.loader.load(path))
            .collect::<AudioResult<Vec<_>>>()?;
        self.process_buffers(buffers)
    }

    /// Run the stages over buffers that are already in memory.
    pub fn process_buffers(&self, buffers: Vec<AudioBuffer>) -> AudioResult<Vec<AudioBuffer>> {
        if buffers.is_empty() {
            return Err(AudioError::invalid_input("no buffers to process"));
        }
        self.stages.iter().try_fold(buffers, |buffers, stage| {
            tracing::debug!(
                stage = %stage,
                buffers = buffers.len(),
                channels = buffers.first().map(AudioBuffer::num_channels),
                frames = buffers.first().map(AudioBuffer::num_frames),
                "applying stage"
            );
            stage.apply(buffers)
        })
    }

    /// [`run`](Self::run), then write the results to `output`.
    ///
    /// With a configured sample rate every file is written at that rate;
    /// otherwise each buffer keeps its own. Returns the absolute paths written.
    pub fn run_and_save<P: AsRef<Path>>(
        &self,
        inputs: &[P],
        output: impl AsRef<Path>,
    ) -> AudioResult<Vec<PathBuf>> {
        let buffers = self.run(inputs)?;
        let bit_depth = self.config.bit_depth;
        match self.config.sample_rate {
            Some(rate) => save(&buffers, rate, bit_depth.bits(), output),
            None => {
                let output = output.as_ref();
                let count = buffers.len();
                buffers
                    .iter()
                    .enumerate()
                    .map(|(i, audio)| {
                        write_wav(
                            audio,
                            audio.sample_rate(),
                            bit_depth,
                            output_path(output, i, count),
                        )
                    })
                    .collect()
            }
        }
    }
}

/// Load `inputs` and run them through the stages `config` enables.
///
/// # Example
/// ```rust,no_run
/// use sample_tools::pipeline::{process, PipelineConfig};
///
/// let config = PipelineConfig { reverse: true, ..PipelineConfig::default() };
/// let buffers = process(&["clip.wav"], &config).unwrap();
/// ```
pub fn process<P: AsRef<Path>>(
    inputs: &[P],
    config: &PipelineConfig,
) -> AudioResult<Vec<AudioBuffer>> {
    Pipeline::new(config.clone())?.run(inputs)
}
