use super::degenerate;
use super::exponential::decay_exponent;

/// Exponential damping summed across `substeps` equal slices of one tick.
///
/// Closed-form geometric series instead of an explicit loop. With one
/// sub-step this is exactly [`ExponentialResidual`](super::ExponentialResidual).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubsteppedResidual {
    pub residual: f32,
    pub substeps: u32,
}

impl SubsteppedResidual {
    pub fn new(residual: f32, substeps: u32) -> Self {
        Self { residual, substeps }
    }

    /// `gap * (1 - q * (1 - q^n) / (n * (1 - q)))` with `q` the per-slice
    /// remaining fraction. Both `1 - q` and `1 - q^n` go through `exp_m1`,
    /// and the outer difference is taken in f64; small ticks cancel otherwise.
    #[inline]
    pub fn step(&self, gap: f32, dt: f32, damp_time: f32) -> f32 {
        if let Some(output) = degenerate(gap, dt, damp_time) {
            return output;
        }

        let n = self.substeps.max(1) as f64;
        let total = decay_exponent(self.residual, dt, damp_time) as f64;
        let slice = total / n;
        if slice == 0.0 {
            // residual of 1, or a tick too short to register
            return 0.0;
        }

        let series = slice.exp() * total.exp_m1() / (n * slice.exp_m1());
        (gap as f64 * (1.0 - series)) as f32
    }
}
