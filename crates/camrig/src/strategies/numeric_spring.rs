// strategies/numeric_spring.rs
//
// Spring integrated numerically in sub-steps no longer than `max_substep`.
// Each sub-step pulls velocity toward the target in proportion to the
// remaining gap, then bleeds off a share of it. At sub-steps of exactly
// `max_substep` the share bled off is `residual`; shorter sub-steps bleed
// proportionally less so that splitting a tick does not change the result.
// `velocity` is the rate at which the value closes on the target.

use crate::state::DamperState;

/// Upper bound on sub-steps per tick. Longer ticks use longer sub-steps.
const MAX_SUBSTEPS: f32 = 4096.0;

/// Slack on the sub-step count so that a tick of exactly `n` sub-steps
/// is not split into `n + 1` by rounding.
const SUBSTEP_SLACK: f32 = 1e-3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericSpring {
    /// Stiffness. Larger pulls back to rest harder.
    pub coefficient: f32,
    /// Share of velocity lost per `max_substep`, in [0, 1]. Larger feels more
    /// like plain damping; a small coefficient with a large residual relaxes.
    pub residual: f32,
    /// Longest sub-step in seconds.
    pub max_substep: f32,
}

impl NumericSpring {
    pub fn new(coefficient: f32, residual: f32, max_substep: f32) -> Self {
        Self {
            coefficient,
            residual,
            max_substep,
        }
    }

    /// Advances `velocity` and returns how far the value moves this tick.
    pub fn step(&self, state: &mut DamperState, gap: f32, dt: f32) -> f32 {
        if dt <= 0.0 {
            return 0.0;
        }

        let max_substep = if self.max_substep > 0.0 { self.max_substep } else { dt };
        let substeps = (dt / max_substep - SUBSTEP_SLACK).ceil().clamp(1.0, MAX_SUBSTEPS);
        let h = dt / substeps;
        let retention = (1.0 - self.residual.clamp(0.0, 1.0)).powf(h / max_substep);

        let mut velocity = state.velocity;
        let mut remaining = gap;
        for _ in 0..substeps as u32 {
            velocity = retention * velocity + h * self.coefficient * remaining;
            remaining -= velocity * h;
        }

        state.velocity = velocity;
        gap - remaining
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const H: f32 = 1.0 / 60.0;

    fn spring() -> NumericSpring {
        NumericSpring::new(250.0, 0.5, H)
    }

    #[test]
    fn first_substep_from_rest() {
        // v = h * k * gap, moved = v * h
        let mut state = DamperState::default();
        let out = spring().step(&mut state, 10.0, H);
        assert!((out - 250.0 * 10.0 * H * H).abs() < 1e-5, "{}", out);
        assert!((state.velocity - 250.0 * 10.0 * H).abs() < 1e-3);
    }

    #[test]
    fn full_substep_keeps_one_minus_residual() {
        let mut state = DamperState {
            velocity: 8.0,
            ..DamperState::default()
        };
        spring().step(&mut state, 0.0, H);
        assert!((state.velocity - 4.0).abs() < 1e-5, "{}", state.velocity);
    }

    #[test]
    fn long_tick_matches_split_ticks() {
        let spring = spring();
        let mut whole = DamperState::default();
        let long = spring.step(&mut whole, 10.0, 3.0 * H);

        let mut split = DamperState::default();
        let mut gap: f32 = 10.0;
        for _ in 0..3 {
            gap -= spring.step(&mut split, gap, H);
        }
        assert!(((10.0 - long) - gap).abs() < 1e-4, "{} vs {}", 10.0 - long, gap);
        assert!((whole.velocity - split.velocity).abs() < 1e-3);
    }

    #[test]
    fn held_target_converges_monotonically() {
        // k = 250 and half the velocity lost per 1/60 s is overdamped.
        let spring = spring();
        for dt in [1.0 / 30.0, H, 1e-3] {
            let mut state = DamperState::default();
            let mut gap: f32 = 40.0;
            let ticks = (3.0 / dt).ceil() as usize;
            for _ in 0..ticks {
                let next = gap - spring.step(&mut state, gap, dt);
                assert!(next <= gap + 1e-5 && next >= -1e-4, "dt {}: {} -> {}", dt, gap, next);
                gap = next;
            }
            assert!(gap.abs() < 1e-2, "dt {}: final gap {}", dt, gap);
        }
    }

    #[test]
    fn small_coefficient_with_low_residual_oscillates() {
        let spring = NumericSpring::new(150.0, 0.05, H);
        let mut state = DamperState::default();
        let mut gap: f32 = 10.0;
        let mut crossed = false;
        for _ in 0..120 {
            gap -= spring.step(&mut state, gap, H);
            crossed |= gap < 0.0;
        }
        assert!(crossed, "expected overshoot");
    }

    #[test]
    fn zero_elapsed_does_not_move() {
        let mut state = DamperState {
            velocity: 2.0,
            ..DamperState::default()
        };
        assert_eq!(spring().step(&mut state, 5.0, 0.0), 0.0);
        assert_eq!(spring().step(&mut state, 5.0, -1.0), 0.0);
        assert_eq!(state.velocity, 2.0);
    }
}
