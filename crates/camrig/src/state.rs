/// Persisted per-channel damping state.
///
/// Owned by exactly one channel of one behavior. Starts at rest and is
/// discarded with its owner; it is never shared or saved.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DamperState {
    /// Gap left unresolved after the previous tick (`gap - output`).
    pub previous_residual: f32,
    /// Smoothed change of residual. Low-pass strategy only.
    pub delta_residual: f32,
    /// Spring velocity. Spring strategies only.
    pub velocity: f32,
}

impl DamperState {
    pub const REST: Self = Self {
        previous_residual: 0.0,
        delta_residual: 0.0,
        velocity: 0.0,
    };

    /// Record what was left of `gap` after applying `output`.
    /// Must run between one step and the next for the residual-based
    /// correction strategies; skipping it leaves them on stale state.
    #[inline]
    pub fn commit(&mut self, gap: f32, output: f32) {
        self.previous_residual = gap - output;
    }

    /// By-value form of [`commit`](Self::commit).
    #[inline]
    pub fn committed(mut self, gap: f32, output: f32) -> Self {
        self.commit(gap, output);
        self
    }

    pub fn reset(&mut self) {
        *self = Self::REST;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commit_records_residual() {
        let state = DamperState::default().committed(10.0, 7.5);
        assert!((state.previous_residual - 2.5).abs() < 1e-6);
        assert_eq!(state.velocity, 0.0);
    }

    #[test]
    fn reset_returns_to_rest() {
        let mut state = DamperState {
            previous_residual: 1.0,
            delta_residual: -0.5,
            velocity: 3.0,
        };
        state.reset();
        assert_eq!(state, DamperState::REST);
    }
}
