// strategies/restricted.rs
//
// Range restriction. When the target reverses or the frame time lands right
// at the point where exponential damping would have resolved the previous
// residual, the naive model snaps for one frame. Near that boundary the
// elapsed time is pulled toward the time implied by the previous residual.

use crate::state::DamperState;
use super::{
    degenerate, implied_elapsed, needs_fallback, within_tolerance, ExponentialResidual,
    ALPHA_EPSILON,
};

/// How elapsed time is corrected inside the tolerance window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Restriction {
    /// Clamp to the implied elapsed time.
    Hard,
    /// Compress the deviation from the implied elapsed time along a curve.
    /// Larger `power` compacts harder.
    Soft { power: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeRestricted {
    pub residual: f32,
    pub tolerance: f32,
    pub restriction: Restriction,
}

impl RangeRestricted {
    pub fn hard(residual: f32, tolerance: f32) -> Self {
        Self {
            residual,
            tolerance,
            restriction: Restriction::Hard,
        }
    }

    pub fn soft(residual: f32, tolerance: f32, power: f32) -> Self {
        Self {
            residual,
            tolerance,
            restriction: Restriction::Soft { power },
        }
    }

    /// Reads `previous_residual`; the caller commits afterwards.
    pub fn step(&self, state: &DamperState, gap: f32, dt: f32, damp_time: f32) -> f32 {
        if let Some(output) = degenerate(gap, dt, damp_time) {
            return output;
        }
        let naive = ExponentialResidual::new(self.residual);
        if needs_fallback(state.previous_residual, gap) {
            return naive.step(gap, dt, damp_time);
        }

        let effective_dt = self.effective_elapsed(state.previous_residual / gap, dt, damp_time);
        naive.step(gap, effective_dt, damp_time)
    }

    /// Elapsed time to feed the exponential model, never negative.
    fn effective_elapsed(&self, residual_ratio: f32, dt: f32, damp_time: f32) -> f32 {
        let alpha = implied_elapsed(self.residual, residual_ratio, damp_time);
        let ratio = dt / (alpha + ALPHA_EPSILON);
        let tolerance = self.tolerance;

        if !within_tolerance(ratio, tolerance) {
            return dt;
        }

        let corrected = match self.restriction {
            Restriction::Soft { power } if tolerance > 0.0 => {
                let mut delta = (1.0 - ratio).abs();
                delta = (delta * (1.0 + tolerance).ln() / tolerance).exp() - 1.0;
                delta *= (delta / tolerance).powf(power);

                if ratio <= 1.0 {
                    alpha * (1.0 - delta)
                } else {
                    alpha * (1.0 + delta)
                }
            }
            _ => alpha,
        };
        corrected.max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESIDUAL: f32 = 0.01;
    const DAMP_TIME: f32 = 1.0;

    /// State whose previous residual implies `alpha` seconds for `gap`.
    fn state_implying(alpha: f32, gap: f32) -> DamperState {
        DamperState {
            previous_residual: gap * (RESIDUAL.ln() * alpha / DAMP_TIME).exp(),
            ..DamperState::default()
        }
    }

    #[test]
    fn hard_clamps_to_implied_elapsed() {
        let gap = 10.0;
        let state = state_implying(0.1, gap);
        let out = RangeRestricted::hard(RESIDUAL, 0.1).step(&state, gap, 0.105, DAMP_TIME);
        let expected = gap - state.previous_residual;
        assert!((out - expected).abs() < 1e-3, "{} vs {}", out, expected);
    }

    #[test]
    fn soft_lies_between_hard_and_naive() {
        let gap = 10.0;
        let dt = 0.105;
        let state = state_implying(0.1, gap);

        let hard = RangeRestricted::hard(RESIDUAL, 0.1).step(&state, gap, dt, DAMP_TIME);
        let soft = RangeRestricted::soft(RESIDUAL, 0.1, 3.0).step(&state, gap, dt, DAMP_TIME);
        let naive = ExponentialResidual::new(RESIDUAL).step(gap, dt, DAMP_TIME);

        assert!(hard < soft && soft < naive, "hard {} soft {} naive {}", hard, soft, naive);
    }

    #[test]
    fn outside_window_is_naive() {
        let gap = 10.0;
        let state = state_implying(0.1, gap);
        let out = RangeRestricted::hard(RESIDUAL, 0.1).step(&state, gap, 0.5, DAMP_TIME);
        let naive = ExponentialResidual::new(RESIDUAL).step(gap, 0.5, DAMP_TIME);
        assert_eq!(out, naive);
    }

    #[test]
    fn reversal_falls_back_to_naive() {
        let state = DamperState {
            previous_residual: 5.0,
            ..DamperState::default()
        };
        let out = RangeRestricted::soft(RESIDUAL, 0.1, 3.0).step(&state, -3.0, 0.016, DAMP_TIME);
        let naive = ExponentialResidual::new(RESIDUAL).step(-3.0, 0.016, DAMP_TIME);
        assert_eq!(out, naive);
    }

    #[test]
    fn never_overshoots_gap() {
        let gaps = [-500.0, -3.0, -0.001, 0.00005, 0.2, 7.0, 900.0];
        let previous = [-400.0, -2.9, -0.5, 0.0, 0.1, 1.0, 6.5, 899.0, 1200.0];
        let elapsed = [0.0001, 0.008, 0.016, 0.033, 0.1, 0.25, 1.0, 3.0];
        let residuals = [0.0001, 0.01, 0.3, 0.9, 0.9999];

        for &residual in &residuals {
            for restriction in [Restriction::Hard, Restriction::Soft { power: 3.0 }] {
                let damper = RangeRestricted {
                    residual,
                    tolerance: 0.1,
                    restriction,
                };
                for &gap in &gaps {
                    for &prev in &previous {
                        let state = DamperState {
                            previous_residual: prev,
                            ..DamperState::default()
                        };
                        for &dt in &elapsed {
                            let out = damper.step(&state, gap, dt, 0.2);
                            assert!(
                                out.abs() <= gap.abs() * (1.0 + 1e-6),
                                "r {} gap {} prev {} dt {}: {}",
                                residual,
                                gap,
                                prev,
                                dt,
                                out
                            );
                        }
                    }
                }
            }
        }
    }
}
