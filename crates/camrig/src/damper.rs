// damper.rs
//
// Single-channel damping: the strategy selected by `DampMethod`, the shared
// degenerate-input guard, and `DampChannel`, which owns a strategy plus its
// persisted state for one axis of one behavior.
//
// Usage per tick:
//   let delta = channel.step(gap, dt);   // how far to move
//   channel.set_output(applied);         // optional, if the caller adjusted it
//   channel.commit();                    // optional, keeps correction state fresh

use crate::config::{DampConfig, DampMethod};
use crate::state::DamperState;
use crate::strategies::{
    AnalyticSpring, ContinuityCorrected, ExponentialResidual, HalfLifeSpring, LowPassCorrected,
    NumericSpring, RangeRestricted, SubsteppedResidual,
};

/// One damping strategy with its tunables.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Strategy {
    Exponential(ExponentialResidual),
    Substepped(SubsteppedResidual),
    ContinuityCorrected(ContinuityCorrected),
    /// Hard and soft restriction.
    RangeRestricted(RangeRestricted),
    LowPassCorrected(LowPassCorrected),
    AnalyticSpring(AnalyticSpring),
    HalfLifeSpring(HalfLifeSpring),
    NumericSpring(NumericSpring),
}

impl Strategy {
    /// Build the strategy `config.method` selects.
    pub fn from_config(config: &DampConfig) -> Self {
        let residual = config.residual;
        match config.method {
            DampMethod::Exponential => Strategy::Exponential(ExponentialResidual::new(residual)),
            DampMethod::Substepped => {
                Strategy::Substepped(SubsteppedResidual::new(residual, config.substeps))
            }
            DampMethod::ContinuityCorrected => {
                Strategy::ContinuityCorrected(ContinuityCorrected::new(residual, config.order))
            }
            DampMethod::RangeRestricted => {
                Strategy::RangeRestricted(RangeRestricted::hard(residual, config.tolerance))
            }
            DampMethod::SoftRangeRestricted => Strategy::RangeRestricted(RangeRestricted::soft(
                residual,
                config.tolerance,
                config.power,
            )),
            DampMethod::LowPassCorrected => Strategy::LowPassCorrected(LowPassCorrected::new(
                residual,
                config.tolerance,
                config.low_pass_beta,
            )),
            DampMethod::AnalyticSpring => Strategy::AnalyticSpring(AnalyticSpring::new(
                config.frequency,
                config.damping_ratio,
            )),
            DampMethod::HalfLifeSpring => {
                Strategy::HalfLifeSpring(HalfLifeSpring::new(config.damping_ratio))
            }
            DampMethod::NumericSpring => Strategy::NumericSpring(NumericSpring::new(
                config.spring_coefficient,
                config.spring_residual,
                config.max_substep,
            )),
        }
    }
}

/// A strategy bound to a damp time. Pure: all state is passed in and out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScalarDamper {
    pub strategy: Strategy,
    /// Seconds; zero or less snaps. Half-life for `HalfLifeSpring`.
    pub damp_time: f32,
}

impl ScalarDamper {
    pub fn new(strategy: Strategy, damp_time: f32) -> Self {
        Self {
            strategy,
            damp_time,
        }
    }

    /// Build from a config, taking the damp time of channel `axis`.
    pub fn from_config(config: &DampConfig, axis: usize) -> Self {
        Self::new(Strategy::from_config(config), config.damp_time.axis(axis))
    }

    /// Build from a config with an explicit damp time, overriding the config's.
    pub fn with_damp_time(config: &DampConfig, damp_time: f32) -> Self {
        Self::new(Strategy::from_config(config), damp_time)
    }

    /// Damp `gap` over `dt` seconds. Returns the distance to move this tick
    /// and the state after the step (before commit).
    ///
    /// `dt <= 0` moves nothing and leaves state untouched; a damp time of
    /// zero or less snaps the full gap and stops any spring.
    pub fn step(&self, state: DamperState, gap: f32, dt: f32) -> (f32, DamperState) {
        if dt <= 0.0 {
            return (0.0, state);
        }
        if self.damp_time <= 0.0 {
            return (gap, DamperState { velocity: 0.0, ..state });
        }

        let mut next = state;
        let output = match &self.strategy {
            Strategy::Exponential(s) => s.step(gap, dt, self.damp_time),
            Strategy::Substepped(s) => s.step(gap, dt, self.damp_time),
            Strategy::ContinuityCorrected(s) => s.step(&next, gap, dt, self.damp_time),
            Strategy::RangeRestricted(s) => s.step(&next, gap, dt, self.damp_time),
            Strategy::LowPassCorrected(s) => s.step(&mut next, gap, dt, self.damp_time),
            Strategy::AnalyticSpring(s) => s.step(&mut next, gap, dt),
            Strategy::HalfLifeSpring(s) => s.step(&mut next, gap, dt, self.damp_time),
            Strategy::NumericSpring(s) => s.step(&mut next, gap, dt),
        };
        (output, next)
    }
}

/// One damping lane: a strategy, its state, and the last input/output pair.
#[derive(Debug, Clone)]
pub struct DampChannel {
    damper: ScalarDamper,
    state: DamperState,
    input: f32,
    output: f32,
}

impl DampChannel {
    pub fn new(damper: ScalarDamper) -> Self {
        Self {
            damper,
            state: DamperState::REST,
            input: 0.0,
            output: 0.0,
        }
    }

    pub fn from_config(config: &DampConfig, axis: usize) -> Self {
        Self::new(ScalarDamper::from_config(config, axis))
    }

    /// Damp `gap` over `dt` seconds and return how far to move.
    pub fn step(&mut self, gap: f32, dt: f32) -> f32 {
        let (output, state) = self.damper.step(self.state, gap, dt);
        self.input = gap;
        self.output = output;
        self.state = state;
        output
    }

    /// Override the output of the last step with what was actually applied.
    pub fn set_output(&mut self, output: f32) {
        self.output = output;
    }

    /// Record the residual left by the last step.
    pub fn commit(&mut self) {
        self.state.commit(self.input, self.output);
    }

    /// Back to rest, as when the owning behavior is re-activated.
    pub fn reset(&mut self) {
        self.state.reset();
        self.input = 0.0;
        self.output = 0.0;
    }

    pub fn damper(&self) -> &ScalarDamper {
        &self.damper
    }

    pub fn damper_mut(&mut self) -> &mut ScalarDamper {
        &mut self.damper
    }

    pub fn state(&self) -> &DamperState {
        &self.state
    }

    pub fn input(&self) -> f32 {
        self.input
    }

    pub fn output(&self) -> f32 {
        self.output
    }
}
