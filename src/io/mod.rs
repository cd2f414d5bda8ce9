//! Reading audio files into [`crate::AudioBuffer`]s and writing them back out as WAV.

pub mod decoder;
pub mod wav;

pub use decoder::{AudioDecoder, Loader, SymphoniaDecoder};
pub use wav::{output_path, quantize_i16, quantize_u8, save, write_wav};
