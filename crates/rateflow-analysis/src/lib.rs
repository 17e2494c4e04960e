//! Rateflow Analysis - spectral inspection of resampled audio
//!
//! A thin FFT wrapper for offline inspection of a resampler's output (e.g.
//! checking for aliasing or verifying a passband gain). It has no
//! dependency on `rateflow-core` and is not exercised by the resampler
//! itself.
//!
//! - [`fft`] - windowed FFT/IFFT over real signals
//!
//! # Example
//!
//! ```
//! use rateflow_analysis::{Fft, Window};
//!
//! let mut signal = vec![1.0f32; 256];
//! Window::Hann.apply(&mut signal);
//! let fft = Fft::new(256);
//! let spectrum = fft.forward(&signal);
//! assert_eq!(spectrum.len(), 256 / 2 + 1);
//! ```

pub mod fft;

pub use fft::{Fft, Window, magnitude_db, phase_rad};
