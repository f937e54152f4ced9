use super::degenerate;

/// Residual-based exponential damping.
///
/// Holding the target still and applying this every tick leaves exactly
/// `residual` of the starting gap after `damp_time` seconds, whatever the
/// frame pacing. Memoryless: the caller supplies a fresh gap each tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExponentialResidual {
    pub residual: f32,
}

impl ExponentialResidual {
    pub fn new(residual: f32) -> Self {
        Self { residual }
    }

    #[inline]
    pub fn step(&self, gap: f32, dt: f32, damp_time: f32) -> f32 {
        if let Some(output) = degenerate(gap, dt, damp_time) {
            return output;
        }
        -gap * decay_exponent(self.residual, dt, damp_time).exp_m1()
    }
}

/// `ln(r) * dt / T`, so the fraction of a gap left after `dt` seconds is
/// `exp` of this. Use `exp_m1` on it for the fraction resolved; `1 - exp`
/// cancels at small `dt`.
#[inline]
pub fn decay_exponent(residual: f32, dt: f32, damp_time: f32) -> f32 {
    residual.ln() * dt / damp_time
}
