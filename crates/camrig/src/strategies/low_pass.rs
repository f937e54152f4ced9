use crate::state::DamperState;
use super::exponential::decay_exponent;
use super::{
    degenerate, implied_elapsed, needs_fallback, within_tolerance, ExponentialResidual,
    ALPHA_EPSILON,
};

/// Smooths the residual's per-tick change near the reset boundary instead of
/// clamping time. Same trigger window as [`RangeRestricted`](super::RangeRestricted).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LowPassCorrected {
    pub residual: f32,
    pub tolerance: f32,
    /// Blend toward the current delta, in [0, 1]. Smaller means smoother.
    pub beta: f32,
}

impl LowPassCorrected {
    pub fn new(residual: f32, tolerance: f32, beta: f32) -> Self {
        Self {
            residual,
            tolerance,
            beta,
        }
    }

    /// Updates `delta_residual` inside the window; the caller commits
    /// `previous_residual` afterwards.
    pub fn step(&self, state: &mut DamperState, gap: f32, dt: f32, damp_time: f32) -> f32 {
        if let Some(output) = degenerate(gap, dt, damp_time) {
            return output;
        }
        let naive = ExponentialResidual::new(self.residual);
        let previous = state.previous_residual;
        if needs_fallback(previous, gap) {
            return naive.step(gap, dt, damp_time);
        }

        // Change from the previous residual to the one exponential damping
        // would leave this tick.
        let resolved = naive.step(gap, dt, damp_time);
        let current_delta = gap * decay_exponent(self.residual, dt, damp_time).exp_m1()
            + (gap - previous);

        let alpha = implied_elapsed(self.residual, previous / gap, damp_time);
        let ratio = dt / (alpha + ALPHA_EPSILON);

        if within_tolerance(ratio, self.tolerance) {
            state.delta_residual =
                (1.0 - self.beta) * state.delta_residual + self.beta * current_delta;
            gap - (state.delta_residual + previous)
        } else {
            resolved
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESIDUAL: f32 = 0.01;
    const DAMP_TIME: f32 = 1.0;

    fn state_implying(alpha: f32, gap: f32) -> DamperState {
        DamperState {
            previous_residual: gap * (RESIDUAL.ln() * alpha / DAMP_TIME).exp(),
            ..DamperState::default()
        }
    }

    #[test]
    fn full_beta_tracks_current_delta() {
        let gap = 10.0;
        let mut state = state_implying(0.1, gap);
        let out = LowPassCorrected::new(RESIDUAL, 0.1, 1.0).step(&mut state, gap, 0.105, DAMP_TIME);
        let naive = ExponentialResidual::new(RESIDUAL).step(gap, 0.105, DAMP_TIME);
        assert!((out - naive).abs() < 1e-4, "{} vs {}", out, naive);
    }

    #[test]
    fn zero_beta_holds_previous_delta() {
        let gap = 10.0;
        let mut state = state_implying(0.1, gap);
        state.delta_residual = -0.25;
        let out = LowPassCorrected::new(RESIDUAL, 0.1, 0.0).step(&mut state, gap, 0.095, DAMP_TIME);
        assert!((state.delta_residual + 0.25).abs() < 1e-6);
        let expected = gap - (state.previous_residual - 0.25);
        assert!((out - expected).abs() < 1e-5);
    }

    #[test]
    fn outside_window_leaves_delta_untouched() {
        let gap = 10.0;
        let mut state = state_implying(0.1, gap);
        state.delta_residual = 1.5;
        let out = LowPassCorrected::new(RESIDUAL, 0.1, 0.5).step(&mut state, gap, 0.4, DAMP_TIME);
        let naive = ExponentialResidual::new(RESIDUAL).step(gap, 0.4, DAMP_TIME);
        assert!((out - naive).abs() < 1e-5);
        assert_eq!(state.delta_residual, 1.5);
    }

    #[test]
    fn held_target_converges_monotonically() {
        let damper = LowPassCorrected::new(RESIDUAL, 0.1, 0.001);
        let mut state = DamperState::default();
        let mut gap: f32 = 12.0;
        for _ in 0..120 {
            let out = damper.step(&mut state, gap, 1.0 / 60.0, 0.2);
            state.commit(gap, out);
            let next = gap - out;
            assert!(next.abs() <= gap.abs(), "{} -> {}", gap, next);
            gap = next;
        }
        assert!(gap.abs() < 1e-3, "gap {}", gap);
    }
}
