//! The single-stage polyphase rational resampler.
//!
//! Converts a stream at one rate to `up_rate/down_rate` times that rate by
//! the classic upsample (zero-insert) → lowpass-filter → downsample
//! pipeline, but without ever materialising the zero-inserted block through
//! the filter: `process` sums only the taps that land on a real sample.

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std as alloc;

use alloc::vec::Vec;

use crate::error::{Error, Result};
use crate::math::gcd;
use crate::ring_buffer::{RingBuffer, RingBufferConfig};
use crate::window::{WindowKind, design_lowpass};

/// Lowpass window choice for a stage, or no filtering at all.
///
/// `None` is only valid with `filter_order == 1`; the converter then uses
/// the identity tap `{1.0}` rather than anything the window designer
/// produces (see the module-level design note in [`crate`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterType {
    /// Pass-through; requires `filter_order == 1`.
    None,
    /// Hann-windowed sinc lowpass.
    LpfHann,
    /// Blackman-windowed sinc lowpass.
    LpfBlackman,
    /// Nuttall-windowed sinc lowpass.
    LpfNuttall,
    /// Blackman-Nuttall-windowed sinc lowpass.
    LpfBlackmanNuttall,
}

impl FilterType {
    fn window(self) -> Option<WindowKind> {
        match self {
            FilterType::None => None,
            FilterType::LpfHann => Some(WindowKind::Hann),
            FilterType::LpfBlackman => Some(WindowKind::Blackman),
            FilterType::LpfNuttall => Some(WindowKind::Nuttall),
            FilterType::LpfBlackmanNuttall => Some(WindowKind::BlackmanNuttall),
        }
    }
}

/// Construction parameters for one [`SingleStageConverter`].
#[derive(Debug, Clone, Copy)]
pub struct StageConfig {
    /// Upper bound on samples passed to a single `process` call.
    pub max_num_input_samples: u32,
    /// Sample rate of the stream entering this stage.
    pub input_rate: u32,
    /// Sample rate this stage produces.
    pub output_rate: u32,
    /// Which (if any) lowpass window to design the FIR from.
    pub filter_type: FilterType,
    /// FIR length; must be odd, and exactly 1 when `filter_type` is `None`.
    pub filter_order: u32,
}

impl StageConfig {
    /// Reduce `output_rate/input_rate` to its lowest terms and validate the
    /// construction contract, without allocating anything.
    fn reduced_rates(&self) -> Result<(u32, u32)> {
        if self.max_num_input_samples == 0 || self.input_rate == 0 || self.output_rate == 0 {
            return Err(Error::InvalidArgument);
        }
        if self.filter_order == 0 || self.filter_order % 2 == 0 {
            return Err(Error::InvalidArgument);
        }
        if self.filter_type == FilterType::None && self.filter_order != 1 {
            return Err(Error::InvalidArgument);
        }
        let g = gcd(self.input_rate, self.output_rate);
        let up_rate = self.output_rate / g;
        let down_rate = self.input_rate / g;
        if up_rate.saturating_mul(self.max_num_input_samples) < down_rate {
            return Err(Error::InvalidArgument);
        }
        Ok((up_rate, down_rate))
    }
}

/// A streaming L/M rational resampler (one stage of a cascade, or the
/// whole conversion when used alone).
#[derive(Debug)]
pub struct SingleStageConverter {
    up_rate: u32,
    down_rate: u32,
    filter_order: u32,
    filter_coef: Vec<f32>,
    interp_buffer: Vec<f32>,
    ring: RingBuffer,
    interp_offset: u32,
    max_num_input_samples: u32,
}

impl SingleStageConverter {
    /// Minimum number of bytes a converter built from `cfg` will occupy.
    ///
    /// Pure and idempotent; does not allocate. Pass the result (or a larger
    /// number) as the `work_size_budget` argument to [`Self::create`] to
    /// get an auditable, checkable construction.
    pub fn calculate_work_size(cfg: &StageConfig) -> Result<usize> {
        let (up_rate, down_rate) = cfg.reduced_rates()?;
        let buffer_num_samples = cfg.max_num_input_samples as usize * up_rate as usize
            + (down_rate as usize - 1)
            + cfg.filter_order as usize;
        let max_required_samples = down_rate.max(cfg.filter_order) as usize;
        let ring_bytes = (buffer_num_samples + 1) * 4 + max_required_samples * 4;
        let interp_bytes = cfg.max_num_input_samples as usize * up_rate as usize * 4;
        let filter_bytes = cfg.filter_order as usize * 4;
        Ok(ring_bytes + interp_bytes + filter_bytes + core::mem::size_of::<Self>())
    }

    /// Construct and [`start`](Self::start) a new converter.
    ///
    /// `work_size_budget`, if given, is checked against
    /// [`Self::calculate_work_size`] before any storage is reserved;
    /// supplying a budget smaller than required fails with
    /// [`Error::InvalidArgument`]. The storage itself is ordinary
    /// heap-allocated `Vec`s, not carved out of the budget.
    pub fn create(cfg: StageConfig, work_size_budget: Option<usize>) -> Result<Self> {
        let work_size = Self::calculate_work_size(&cfg)?;
        if let Some(budget) = work_size_budget {
            if budget < work_size {
                return Err(Error::InvalidArgument);
            }
        }
        let (up_rate, down_rate) = cfg.reduced_rates()?;

        let filter_coef = if let Some(window) = cfg.filter_type.window() {
            let cutoff = 0.5 / up_rate.max(down_rate) as f32;
            let mut coef = design_lowpass(cutoff, cfg.filter_order, window);
            for tap in &mut coef {
                *tap *= up_rate as f32;
            }
            coef
        } else {
            let mut coef = alloc::vec![0.0f32; cfg.filter_order as usize];
            coef[0] = 1.0;
            coef
        };

        let buffer_num_samples = cfg.max_num_input_samples as usize * up_rate as usize
            + (down_rate as usize - 1)
            + cfg.filter_order as usize;
        let max_required_samples = down_rate.max(cfg.filter_order) as usize;
        let ring = RingBuffer::new(RingBufferConfig {
            max_size: buffer_num_samples * 4,
            max_required_size: max_required_samples * 4,
        })?;

        #[cfg(feature = "tracing")]
        tracing::debug!(up_rate, down_rate, filter_order = cfg.filter_order, "creating single-stage converter");

        let mut converter = Self {
            up_rate,
            down_rate,
            filter_order: cfg.filter_order,
            filter_coef,
            interp_buffer: alloc::vec![0.0f32; cfg.max_num_input_samples as usize * up_rate as usize],
            ring,
            interp_offset: 0,
            max_num_input_samples: cfg.max_num_input_samples,
        };
        converter.start();
        Ok(converter)
    }

    /// Interpolation factor (`L`), after reducing by `gcd`.
    pub fn up_rate(&self) -> u32 {
        self.up_rate
    }

    /// Decimation factor (`M`), after reducing by `gcd`.
    pub fn down_rate(&self) -> u32 {
        self.down_rate
    }

    /// Per-call input-sample ceiling this converter was built for.
    pub fn max_num_input_samples(&self) -> u32 {
        self.max_num_input_samples
    }

    /// Re-arm for a fresh stream: clears the delay line and re-primes the
    /// `filter_order - 1` leading zeros that burn in the filter's group
    /// delay. Does not reallocate.
    pub fn start(&mut self) {
        #[cfg(feature = "tracing")]
        tracing::trace!(filter_order = self.filter_order, "re-arming single-stage converter");

        self.ring.clear();
        for sample in &mut self.interp_buffer {
            *sample = 0.0;
        }
        let priming = alloc::vec![0.0f32; (self.filter_order - 1) as usize];
        let primed = self.ring.put_f32(&priming);
        debug_assert!(primed.is_ok(), "priming zeros exceed configured ring capacity");
        self.interp_offset = (self.filter_order - 1) % self.up_rate;
    }

    /// Convert one block. Returns the number of samples written to the
    /// front of `output`.
    pub fn process(&mut self, input: &[f32], output: &mut [f32]) -> Result<usize> {
        if input.len() as u32 > self.max_num_input_samples {
            return Err(Error::TooManyInputs);
        }

        let buffered = self.ring.remain() / 4 - (self.filter_order as usize - 1);
        let up = self.up_rate as usize;
        let down = self.down_rate as usize;
        let num_output = (buffered + up * input.len()) / down;
        if num_output > output.len() {
            return Err(Error::InsufficientBuffer);
        }

        let active_len = input.len() * up;
        for sample in &mut self.interp_buffer[..active_len] {
            *sample = 0.0;
        }
        for (k, &sample) in input.iter().enumerate() {
            self.interp_buffer[k * up] = sample;
        }
        let pushed = self.ring.put_f32(&self.interp_buffer[..active_len]);
        debug_assert!(pushed.is_ok(), "zero-inserted block exceeds configured ring capacity");

        let order = self.filter_order as usize;
        for out in output.iter_mut().take(num_output) {
            // The convolution needs to see the full `order`-tap span of the
            // delay line, but each output only advances the read position
            // by `down` samples — the ring was sized (`max_required_size =
            // max(down, order)`) precisely so this window is always
            // available as one contiguous slice.
            let window = self.ring.get_window(order * 4, down * 4)?;
            let acc = if up > 1 {
                let mut acc = 0.0f32;
                let mut tap = self.interp_offset as usize;
                while tap < order {
                    acc += read_sample(window, tap) * self.filter_coef[tap];
                    tap += up;
                }
                acc
            } else {
                symmetric_dot(window, &self.filter_coef, order)
            };
            *out = acc;
            self.interp_offset = (self.interp_offset + down as u32 * (self.up_rate - 1)) % self.up_rate;
        }

        Ok(num_output)
    }
}

fn read_sample(bytes: &[u8], sample_idx: usize) -> f32 {
    let i = sample_idx * 4;
    f32::from_ne_bytes([bytes[i], bytes[i + 1], bytes[i + 2], bytes[i + 3]])
}

/// Dot product exploiting the filter's even symmetry: taps `t` and
/// `order-1-t` share a coefficient, so each pair costs one multiply instead
/// of two.
fn symmetric_dot(window: &[u8], filter_coef: &[f32], order: usize) -> f32 {
    let half = (order - 1) / 2;
    let mut acc = 0.0f32;
    for t in 0..=half {
        let j = order - 1 - t;
        let s_t = read_sample(window, t);
        acc += if j == t {
            s_t * filter_coef[t]
        } else {
            (s_t + read_sample(window, j)) * filter_coef[t]
        };
    }
    acc
}
