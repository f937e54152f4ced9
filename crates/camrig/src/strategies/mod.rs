// strategies/mod.rs
//
// Scalar damping strategies. Each one turns (gap, elapsed time) into how far
// to move this tick. Every `step` is total: dt <= 0 moves nothing and a damp
// time <= 0 snaps the whole gap.

pub mod exponential;
pub mod substepped;
pub mod continuity;
pub mod restricted;
pub mod low_pass;
pub mod spring;
pub mod half_life;
pub mod numeric_spring;

pub use exponential::ExponentialResidual;
pub use substepped::SubsteppedResidual;
pub use continuity::ContinuityCorrected;
pub use restricted::{RangeRestricted, Restriction};
pub use low_pass::LowPassCorrected;
pub use spring::AnalyticSpring;
pub use half_life::HalfLifeSpring;
pub use numeric_spring::NumericSpring;

/// Below this gap the reset-boundary strategies fall back to `ExponentialResidual`.
pub(crate) const NEGLIGIBLE_GAP: f32 = 1e-4;

/// Additive guard on the implied elapsed time before dividing by it.
pub(crate) const ALPHA_EPSILON: f32 = 1e-5;

/// Output for input no strategy integrates: nothing elapsed, or no damping.
#[inline]
pub(crate) fn degenerate(gap: f32, dt: f32, damp_time: f32) -> Option<f32> {
    if dt <= 0.0 {
        Some(0.0)
    } else if damp_time <= 0.0 {
        Some(gap)
    } else {
        None
    }
}

/// Elapsed time implied by state continuity: how long exponential damping
/// takes to shrink `gap` to `previous_residual`, given `previous_residual / gap`.
#[inline]
pub(crate) fn implied_elapsed(residual: f32, residual_ratio: f32, damp_time: f32) -> f32 {
    residual_ratio.ln() * damp_time / residual.ln()
}

/// Whether `ratio` lies inside `[1 - tolerance, 1 + tolerance]`.
#[inline]
pub(crate) fn within_tolerance(ratio: f32, tolerance: f32) -> bool {
    ratio >= 1.0 - tolerance && ratio <= 1.0 + tolerance
}

/// The reset-boundary strategies skip correction when there is no usable
/// previous residual: a negligible gap, no prior tick, or a sign reversal.
#[inline]
pub(crate) fn needs_fallback(previous_residual: f32, gap: f32) -> bool {
    gap.abs() < NEGLIGIBLE_GAP || previous_residual / gap <= 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::DamperState;

    fn primed() -> DamperState {
        DamperState {
            previous_residual: 4.0,
            delta_residual: -0.5,
            velocity: 3.0,
        }
    }

    /// (gap, dt, damp time) through every strategy, called directly.
    fn outputs(gap: f32, dt: f32, damp_time: f32) -> Vec<f32> {
        let mut state = primed();
        vec![
            ExponentialResidual::new(0.01).step(gap, dt, damp_time),
            SubsteppedResidual::new(0.01, 10).step(gap, dt, damp_time),
            ContinuityCorrected::new(0.01, 5).step(&state, gap, dt, damp_time),
            RangeRestricted::hard(0.01, 0.1).step(&state, gap, dt, damp_time),
            RangeRestricted::soft(0.01, 0.1, 3.0).step(&state, gap, dt, damp_time),
            LowPassCorrected::new(0.01, 0.1, 0.001).step(&mut state, gap, dt, damp_time),
            HalfLifeSpring::new(1.0).step(&mut state, gap, dt, damp_time),
        ]
    }

    #[test]
    fn every_strategy_is_total_on_its_own() {
        for dt in [0.0, -0.5] {
            assert!(outputs(10.0, dt, 0.2).iter().all(|&out| out == 0.0), "dt {}", dt);
        }
        for damp_time in [0.0, -1.0] {
            assert!(outputs(10.0, 0.016, damp_time).iter().all(|&out| out == 10.0));
        }

        // The frequency-driven springs have no damp time; only dt is degenerate.
        let mut state = primed();
        assert_eq!(AnalyticSpring::new(6.0, 0.5).step(&mut state, 10.0, 0.0), 0.0);
        assert_eq!(NumericSpring::new(250.0, 0.5, 1.0 / 60.0).step(&mut state, 10.0, 0.0), 0.0);
        assert_eq!(state, primed());
    }

    #[test]
    fn fallback_on_reversal_or_negligible_gap() {
        assert!(needs_fallback(0.0, 5.0));
        assert!(needs_fallback(-1.0, 5.0));
        assert!(needs_fallback(1.0, 1e-5));
        assert!(!needs_fallback(4.0, 5.0));
    }
}
