//! Windowed-sinc linear-phase lowpass filter design.

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std as alloc;

use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use libm::{cosf, sinf};

#[cfg(feature = "std")]
fn sinf(x: f32) -> f32 {
    x.sin()
}

#[cfg(feature = "std")]
fn cosf(x: f32) -> f32 {
    x.cos()
}

const PI: f32 = core::f32::consts::PI;

/// Window applied on top of the ideal-sinc response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowKind {
    /// `w(x) = 1`, i.e. the ideal-sinc response truncated, unshaped.
    Rectangular,
    /// `0.5 - 0.5*cos(2*pi*x)`.
    Hann,
    /// `0.42 - 0.5*cos(2*pi*x) + 0.08*cos(4*pi*x)`.
    Blackman,
    /// `0.355768 - 0.487396*cos(2*pi*x) + 0.144232*cos(4*pi*x) - 0.012604*cos(6*pi*x)`.
    Nuttall,
    /// `0.3635819 - 0.4891775*cos(2*pi*x) + 0.1365995*cos(4*pi*x) - 0.0106411*cos(6*pi*x)`.
    BlackmanNuttall,
}

impl WindowKind {
    fn value(self, x: f32) -> f32 {
        match self {
            WindowKind::Rectangular => 1.0,
            WindowKind::Hann => 0.5 - 0.5 * cosf(2.0 * PI * x),
            WindowKind::Blackman => {
                0.42 - 0.5 * cosf(2.0 * PI * x) + 0.08 * cosf(4.0 * PI * x)
            }
            WindowKind::Nuttall => {
                0.355_768 - 0.487_396 * cosf(2.0 * PI * x) + 0.144_232 * cosf(4.0 * PI * x)
                    - 0.012_604 * cosf(6.0 * PI * x)
            }
            WindowKind::BlackmanNuttall => {
                0.363_581_9 - 0.489_177_5 * cosf(2.0 * PI * x) + 0.136_599_5 * cosf(4.0 * PI * x)
                    - 0.010_641_1 * cosf(6.0 * PI * x)
            }
        }
    }
}

/// `sinc(x) = sin(x)/x`, with the removable singularity at zero patched in.
fn sinc(x: f32) -> f32 {
    if x.abs() > 1.0e-8 { sinf(x) / x } else { 1.0 }
}

/// Design an odd-length linear-phase FIR lowpass filter.
///
/// `cutoff` is normalised to the sample rate (Nyquist = 0.5). `order` must
/// be odd; this is a precondition of the caller, not re-validated here,
/// matching the single-stage converter's own argument checking.
///
/// When `order == 1` the single tap is left at `2*cutoff` (the sinc value
/// at the window's only sample), not rewritten to `1.0` — a degenerate
/// rectangular window, not an identity pass-through. Callers that want a
/// true identity filter construct `{1.0}` themselves; see the single-stage
/// converter's handling of `FilterType::None`.
pub fn design_lowpass(cutoff: f32, order: u32, window: WindowKind) -> Vec<f32> {
    let n = order as usize;
    let half = (order as f32 - 1.0) / 2.0;

    let mut coef: Vec<f32> = (0..n)
        .map(|i| {
            let x = i as f32 - half;
            2.0 * cutoff * sinc(2.0 * PI * cutoff * x)
        })
        .collect();

    if n == 1 {
        return coef;
    }

    for (i, c) in coef.iter_mut().enumerate() {
        *c *= window.value(i as f32 / (order as f32 - 1.0));
    }
    coef
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_one_leaves_sinc_value_unchanged() {
        let coef = design_lowpass(0.25, 1, WindowKind::Hann);
        assert_eq!(coef.len(), 1);
        assert!((coef[0] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn even_symmetry_holds_for_every_window() {
        for window in [
            WindowKind::Rectangular,
            WindowKind::Hann,
            WindowKind::Blackman,
            WindowKind::Nuttall,
            WindowKind::BlackmanNuttall,
        ] {
            let coef = design_lowpass(0.2, 11, window);
            for i in 0..coef.len() {
                assert!(
                    (coef[i] - coef[coef.len() - 1 - i]).abs() < 1e-5,
                    "window {window:?} broke symmetry at tap {i}"
                );
            }
        }
    }

    #[test]
    fn rectangular_window_is_unshaped_sinc() {
        let coef = design_lowpass(0.3, 7, WindowKind::Rectangular);
        let half = 3.0f32;
        for (i, &c) in coef.iter().enumerate() {
            let x = i as f32 - half;
            let expected = 2.0 * 0.3 * sinc(2.0 * PI * 0.3 * x);
            assert!((c - expected).abs() < 1e-6);
        }
    }
}
