//! Cascaded multi-stage driver: plans a schedule of single-stage converters
//! and pumps samples through them back-to-back.

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std as alloc;

use alloc::vec::Vec;

use crate::error::{Error, Result};
use crate::math::gcd;
use crate::planner::plan_stages;
use crate::stage::{FilterType, SingleStageConverter, StageConfig};

/// Construction parameters for a [`MultiStageConverter`].
#[derive(Debug, Clone, Copy)]
pub struct MultiStageConfig {
    /// Template applied to every planned stage: `input_rate`/`output_rate`
    /// give the overall `(L_total, M_total)` ratio, while `filter_type` and
    /// `filter_order` are shared by every stage in the cascade.
    pub single: StageConfig,
    /// Upper bound on the number of stages the planner may emit (1..=10).
    pub max_num_stages: u32,
}

/// The smallest per-call input-sample ceiling a block of `num_stages`
/// downstream stages, each converting at `l_i/m_i`, must be given so that a
/// full `Ni`-sample block at the head never starves a later stage.
///
/// Mirrors [`SingleStageConverter::process`]'s own output-count formula:
/// `⌈(Ni·out_rate + out_rate + in_rate − 1) / in_rate⌉`, the contract
/// documented for callers sizing output buffers around a single converter.
pub fn max_num_output_samples(ni: u32, in_rate: u32, out_rate: u32) -> Result<u32> {
    if in_rate == 0 {
        return Err(Error::InvalidArgument);
    }
    let numerator = (ni as u64) * out_rate as u64 + out_rate as u64 + in_rate as u64 - 1;
    Ok((numerator / in_rate as u64) as u32)
}

fn plan_and_size_stages(cfg: &MultiStageConfig) -> Result<Vec<StageConfig>> {
    let single = cfg.single;
    if single.max_num_input_samples == 0 || single.input_rate == 0 || single.output_rate == 0 {
        return Err(Error::InvalidArgument);
    }
    if !(1..=10).contains(&cfg.max_num_stages) {
        return Err(Error::InvalidArgument);
    }

    let g = gcd(single.input_rate, single.output_rate);
    let up_total = single.output_rate / g;
    let down_total = single.input_rate / g;
    let schedule = plan_stages(up_total, down_total, cfg.max_num_stages as usize)?;

    let mut stage_cfgs = Vec::with_capacity(schedule.len());
    let mut max_input = single.max_num_input_samples;
    for &(l, m) in &schedule {
        stage_cfgs.push(StageConfig {
            max_num_input_samples: max_input,
            input_rate: m,
            output_rate: l,
            filter_type: single.filter_type,
            filter_order: single.filter_order,
        });
        max_input = max_num_output_samples(max_input, m, l)?;
    }
    Ok(stage_cfgs)
}

/// A cascade of [`SingleStageConverter`]s, driven back-to-back to realise a
/// rational factor too wide-band for one stage to convert efficiently.
#[derive(Debug)]
pub struct MultiStageConverter {
    up_rate: u32,
    down_rate: u32,
    stages: Vec<SingleStageConverter>,
    process_buffers: [Vec<f32>; 2],
    max_num_input_samples: u32,
    max_num_buffer_samples: usize,
}

impl MultiStageConverter {
    /// Minimum number of bytes a converter built from `cfg` will occupy:
    /// the sum of every planned stage's [`SingleStageConverter::calculate_work_size`]
    /// plus the two shared process buffers.
    pub fn calculate_work_size(cfg: &MultiStageConfig) -> Result<usize> {
        let stage_cfgs = plan_and_size_stages(cfg)?;
        let g = gcd(cfg.single.input_rate, cfg.single.output_rate);
        let up_total = cfg.single.output_rate / g;
        let max_num_buffer_samples = up_total as usize * cfg.single.max_num_input_samples as usize;

        let mut total = 2 * max_num_buffer_samples * 4 + core::mem::size_of::<Self>();
        for stage_cfg in &stage_cfgs {
            total += SingleStageConverter::calculate_work_size(stage_cfg)?;
        }
        Ok(total)
    }

    /// Construct and [`start`](Self::start) a new cascade.
    pub fn create(cfg: MultiStageConfig, work_size_budget: Option<usize>) -> Result<Self> {
        let work_size = Self::calculate_work_size(&cfg)?;
        if let Some(budget) = work_size_budget {
            if budget < work_size {
                return Err(Error::InvalidArgument);
            }
        }

        let stage_cfgs = plan_and_size_stages(&cfg)?;
        let mut stages = Vec::with_capacity(stage_cfgs.len());
        for stage_cfg in stage_cfgs {
            stages.push(SingleStageConverter::create(stage_cfg, None)?);
        }

        let g = gcd(cfg.single.input_rate, cfg.single.output_rate);
        let up_rate = cfg.single.output_rate / g;
        let down_rate = cfg.single.input_rate / g;
        let max_num_buffer_samples = up_rate as usize * cfg.single.max_num_input_samples as usize;

        #[cfg(feature = "tracing")]
        tracing::debug!(up_rate, down_rate, num_stages = stages.len(), "creating multi-stage converter");

        let mut converter = Self {
            up_rate,
            down_rate,
            stages,
            process_buffers: [
                alloc::vec![0.0f32; max_num_buffer_samples],
                alloc::vec![0.0f32; max_num_buffer_samples],
            ],
            max_num_input_samples: cfg.single.max_num_input_samples,
            max_num_buffer_samples,
        };
        converter.start();
        Ok(converter)
    }

    /// Overall interpolation factor (`L_total`), after reducing by `gcd`.
    pub fn up_rate(&self) -> u32 {
        self.up_rate
    }

    /// Overall decimation factor (`M_total`), after reducing by `gcd`.
    pub fn down_rate(&self) -> u32 {
        self.down_rate
    }

    /// Number of single-stage converters this cascade was planned into.
    pub fn num_stages(&self) -> usize {
        self.stages.len()
    }

    /// Re-arm every stage for a fresh stream. Does not reallocate.
    pub fn start(&mut self) {
        for stage in &mut self.stages {
            stage.start();
        }
    }

    /// Convert one block through the whole cascade. Returns the number of
    /// samples written to the front of `output`.
    pub fn process(&mut self, input: &[f32], output: &mut [f32]) -> Result<usize> {
        if input.len() as u32 > self.max_num_input_samples {
            return Err(Error::TooManyInputs);
        }

        let [first, second] = &mut self.process_buffers;
        first[..input.len()].copy_from_slice(input);

        let mut pin = 0usize;
        let mut n = input.len();
        for stage in &mut self.stages {
            let (pin_buf, pout_buf) = if pin == 0 {
                (&first[..n], &mut second[..self.max_num_buffer_samples])
            } else {
                (&second[..n], &mut first[..self.max_num_buffer_samples])
            };
            let m = stage.process(pin_buf, pout_buf)?;
            if m == 0 {
                return Ok(0);
            }
            pin = 1 - pin;
            n = m;
        }

        if n > output.len() {
            return Err(Error::InsufficientBuffer);
        }
        let result_buf = if pin == 0 { &first } else { &second };
        output[..n].copy_from_slice(&result_buf[..n]);
        Ok(n)
    }
}
