//! Rateflow IO - WAV file reading and writing for the resampler CLI.
//!
//! This crate provides:
//!
//! - **WAV file I/O**: [`read_wav`] and [`write_wav`] for loading/saving
//!   PCM or IEEE-float WAV files, deinterleaved into one buffer per channel
//!   so the CLI can run one mono converter per channel.
//!
//! ## Quick Start
//!
//! ```no_run
//! use rateflow_io::{read_wav, write_wav};
//!
//! let (channels, spec) = read_wav("input.wav")?;
//! write_wav("output.wav", &channels, spec)?;
//! # Ok::<(), rateflow_io::Error>(())
//! ```

mod wav;

pub use wav::{WavSpec, read_wav, write_wav};

/// Error types for WAV I/O operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type for WAV I/O operations.
pub type Result<T> = std::result::Result<T, Error>;
