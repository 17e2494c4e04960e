//! Rateflow Core - streaming rational-factor audio resampling
//!
//! This crate provides a rational-factor (L/M) polyphase sample-rate
//! converter: upsample by zero-insertion, lowpass-filter, downsample, with
//! the zero-inserted taps skipped rather than multiplied through. A single
//! wide-ratio conversion can also be planned into a cascade of narrower,
//! cheaper stages.
//!
//! # Layout
//!
//! - [`ring_buffer`] - byte-granular circular queue with a contiguous-read
//!   guarantee across wrap points
//! - [`math`] - `gcd` and bounded prime factorisation
//! - [`window`] - windowed-sinc linear-phase FIR lowpass design
//! - [`stage`] - [`SingleStageConverter`], the streaming polyphase resampler
//! - [`planner`] - factors a reduced `(L, M)` into a stage cascade
//! - [`multi_stage`] - [`MultiStageConverter`], the cascade driver
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible. Disable the default `std` feature in
//! your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! rateflow-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Example
//!
//! ```
//! use rateflow_core::{FilterType, SingleStageConverter, StageConfig};
//!
//! let mut converter = SingleStageConverter::create(
//!     StageConfig {
//!         max_num_input_samples: 8,
//!         input_rate: 1,
//!         output_rate: 2,
//!         filter_type: FilterType::None,
//!         filter_order: 1,
//!     },
//!     None,
//! )
//! .unwrap();
//!
//! let input = [1.0f32; 8];
//! let mut output = [0.0f32; 16];
//! let n = converter.process(&input, &mut output).unwrap();
//! assert_eq!(n, 16);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod error;
pub mod math;
pub mod multi_stage;
pub mod planner;
pub mod ring_buffer;
pub mod stage;
pub mod window;

pub use error::{Error, Result};
pub use math::{factorize, gcd};
pub use multi_stage::{MultiStageConfig, MultiStageConverter, max_num_output_samples};
pub use planner::{MAX_NUM_STAGES, plan_stages};
pub use ring_buffer::{RingBuffer, RingBufferConfig};
pub use stage::{FilterType, SingleStageConverter, StageConfig};
pub use window::{WindowKind, design_lowpass};
