//! Multi-stage planner: factors a reduced `(up_total, down_total)` pair
//! into an ordered cascade of narrow-band `(up, down)` stages.

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std as alloc;

use alloc::vec::Vec;

use crate::error::{Error, Result};
use crate::math::factorize;

/// Upper bound on the number of stages a cascade may contain.
pub const MAX_NUM_STAGES: usize = 10;

/// Largest divisor `f > 1` of `u` (other than `u` itself) for which
/// `u / f > d` still holds. Returns `None` if `u` is prime or no such
/// divisor exists — in both cases `u` is left alone by the reduction pass.
fn largest_valid_divisor(u: u32, d: u32) -> Option<u32> {
    let mut best = None;
    let mut i = 1u32;
    while i.saturating_mul(i) <= u {
        if u % i == 0 {
            let complement = u / i;
            for candidate in [i, complement] {
                if candidate > 1 && candidate != u && u / candidate > d {
                    best = Some(best.map_or(candidate, |b: u32| b.max(candidate)));
                }
            }
        }
        i += 1;
    }
    best
}

/// Plan a cascade of `(up, down)` stages whose products reduce to
/// `(up_total, down_total)`.
///
/// Follows the documented heuristic literally (primary pass, then a
/// reduction pass that trims any stage whose up-factor overshoots its
/// down-factor by 2x or more) rather than searching for a globally optimal
/// decomposition, since the literal heuristic is what downstream test
/// vectors are anchored to.
pub fn plan_stages(up_total: u32, down_total: u32, max_num_stages: usize) -> Result<Vec<(u32, u32)>> {
    let up_factors = factorize(up_total, MAX_NUM_STAGES);
    let down_factors = factorize(down_total, MAX_NUM_STAGES);

    let mut stages: Vec<(u32, u32)> = Vec::new();
    let mut up_idx = 0usize;
    for &d in &down_factors {
        let mut u = 1u32;
        while u <= d && up_idx < up_factors.len() {
            u *= up_factors[up_idx];
            up_idx += 1;
        }
        stages.push((u, d));
    }
    while up_idx < up_factors.len() {
        stages.push((up_factors[up_idx], 1));
        up_idx += 1;
    }

    // Reduction pass: idempotent until no stage changes.
    loop {
        let mut changed = false;
        for i in 0..stages.len() {
            let (u, d) = stages[i];
            if u >= 2 * d {
                if let Some(f) = largest_valid_divisor(u, d) {
                    stages[i].0 = u / f;
                    if let Some(j) = (i + 1..stages.len()).find(|&j| stages[j].0 < stages[j].1) {
                        stages[j].0 *= f;
                    } else {
                        stages.push((f, 1));
                    }
                    changed = true;
                    break;
                }
            }
        }
        if !changed {
            break;
        }
    }

    if stages.len() > max_num_stages.min(MAX_NUM_STAGES) {
        return Err(Error::InvalidArgument);
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(up_total, down_total, num_stages = stages.len(), "planned resampling cascade");

    Ok(stages)
}
