// strategies/continuity.rs
//
// Continuity correction. Exponential damping only looks at the current gap,
// so under uneven frame pacing the rate of change of its output jumps from
// tick to tick. This strategy integrates the residual's derivative with a
// truncated Taylor series instead, keeping that rate continuous.

use crate::state::DamperState;
use super::{degenerate, ExponentialResidual};

/// `0!` through `7!`.
const FACTORIALS: [f64; 8] = [1.0, 1.0, 2.0, 6.0, 24.0, 120.0, 720.0, 5040.0];

const MAX_ORDER: u32 = 7;

/// Below this gap the correction is skipped.
const NEGLIGIBLE_GAP: f32 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContinuityCorrected {
    pub residual: f32,
    /// Taylor expansion order, clamped to 1..=7.
    pub order: u32,
}

impl ContinuityCorrected {
    pub fn new(residual: f32, order: u32) -> Self {
        Self { residual, order }
    }

    /// Reads `previous_residual`; the caller commits afterwards.
    ///
    /// The new residual is `previous + (previous * d + (gap - previous) / dt) * c`
    /// with `d = ln(r) / T` and `c` the truncated series for `(exp(d * dt) - 1) / d`.
    /// Writing `c = dt * (1 + tail)` turns `gap - residual` into two small terms,
    /// so nothing cancels when `dt` is tiny.
    pub fn step(&self, state: &DamperState, gap: f32, dt: f32, damp_time: f32) -> f32 {
        if let Some(output) = degenerate(gap, dt, damp_time) {
            return output;
        }
        if gap.abs() < NEGLIGIBLE_GAP {
            return ExponentialResidual::new(self.residual).step(gap, dt, damp_time);
        }

        let previous = state.previous_residual as f64;
        let derivative = (self.residual.ln() / damp_time) as f64;
        let dt = dt as f64;
        let tail = self.series_tail(derivative * dt);

        let output = -(gap as f64 - previous) * tail - previous * derivative * dt * (1.0 + tail);
        output as f32
    }

    /// `sum_{i=2..order} x^(i-1) / i!`, i.e. the series for
    /// `(exp(x) - 1) / x - 1` truncated at `order`.
    fn series_tail(&self, x: f64) -> f64 {
        let order = self.order.clamp(1, MAX_ORDER) as usize;
        let mut sum = 0.0;
        let mut x_pow = x;
        for factorial in &FACTORIALS[2..=order] {
            sum += x_pow / factorial;
            x_pow *= x;
        }
        sum
    }
}
