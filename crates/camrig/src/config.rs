// config.rs
//
// Damping configuration: which strategy a channel uses and its tunables.
// Plain value objects; nothing here is validated, out-of-range values are
// only reported through `log` when loaded from JSON.

use std::f32::consts::PI;
use glam::Vec3;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Damping strategy selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DampMethod {
    /// Residual-based exponential decay. The default for almost everything.
    #[default]
    Exponential,
    /// Exponential decay summed over equal sub-steps in closed form.
    Substepped,
    /// Exponential decay with a Taylor-series continuity correction.
    ContinuityCorrected,
    /// Clamps elapsed time near the reset boundary.
    RangeRestricted,
    /// Compresses elapsed time near the reset boundary along a curve.
    SoftRangeRestricted,
    /// Low-pass filters the residual derivative near the reset boundary.
    LowPassCorrected,
    /// Closed-form spring-mass-damper driven by frequency and damping ratio.
    AnalyticSpring,
    /// Spring parameterized by half-life (the damp time) and damping ratio.
    HalfLifeSpring,
    /// Spring integrated numerically in bounded sub-steps.
    NumericSpring,
}

/// Damp time, either shared by all channels or given per axis.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum DampTime {
    Uniform(f32),
    /// X/Y/Z, or Roll/Pitch/Yaw for rotators.
    PerAxis(Vec3),
}

impl Default for DampTime {
    fn default() -> Self {
        DampTime::Uniform(0.2)
    }
}

impl DampTime {
    /// Damp time for channel `axis` (0, 1 or 2).
    #[inline]
    pub fn axis(&self, axis: usize) -> f32 {
        match self {
            DampTime::Uniform(t) => *t,
            DampTime::PerAxis(v) => v[axis],
        }
    }

    pub fn as_vec3(&self) -> Vec3 {
        match self {
            DampTime::Uniform(t) => Vec3::splat(*t),
            DampTime::PerAxis(v) => *v,
        }
    }
}

impl From<f32> for DampTime {
    fn from(t: f32) -> Self {
        DampTime::Uniform(t)
    }
}

impl From<Vec3> for DampTime {
    fn from(v: Vec3) -> Self {
        DampTime::PerAxis(v)
    }
}

/// A set of parameters describing damping.
///
/// Every strategy reads `damp_time`; the other fields are only consulted by
/// the strategies noted on each of them.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DampConfig {
    pub method: DampMethod,
    /// Seconds for the gap to shrink to `residual` of itself. Zero snaps.
    /// Doubles as the half-life for `HalfLifeSpring`.
    pub damp_time: DampTime,
    /// Fraction of the gap remaining after `damp_time`, in (0, 1).
    pub residual: f32,
    /// Taylor expansion order for `ContinuityCorrected` (1..=7).
    pub order: u32,
    /// Sub-step count for `Substepped`.
    pub substeps: u32,
    /// Width of the restriction window around the reset boundary.
    pub tolerance: f32,
    /// Curve compaction for `SoftRangeRestricted`.
    pub power: f32,
    /// Low-pass blend factor in [0, 1]. Smaller means smoother.
    pub low_pass_beta: f32,
    /// Spring angular frequency (rad/s).
    pub frequency: f32,
    /// 0 = undamped, <1 underdamped, 1 critical, >1 overdamped.
    pub damping_ratio: f32,
    /// Stiffness for `NumericSpring`.
    pub spring_coefficient: f32,
    /// Share of `NumericSpring` velocity lost per `max_substep`, in [0, 1].
    pub spring_residual: f32,
    /// Longest `NumericSpring` sub-step in seconds.
    pub max_substep: f32,
}

impl Default for DampConfig {
    fn default() -> Self {
        Self {
            method: DampMethod::Exponential,
            damp_time: DampTime::default(),
            residual: 0.01,
            order: 5,
            substeps: 10,
            tolerance: 0.1,
            power: 3.0,
            low_pass_beta: 0.001,
            frequency: PI,
            damping_ratio: 1.0,
            spring_coefficient: 250.0,
            spring_residual: 0.5,
            max_substep: 1.0 / 60.0,
        }
    }
}

impl DampConfig {
    pub fn new(method: DampMethod) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    /// Parse a config from a JSON string. Missing fields take defaults.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let config: Self = serde_json::from_str(json)?;
        log::debug!("loaded damp config: {:?}", config);
        config.warn_out_of_range();
        Ok(config)
    }

    // -- Builder methods --

    pub fn with_method(mut self, method: DampMethod) -> Self {
        self.method = method;
        self
    }

    pub fn with_damp_time(mut self, damp_time: impl Into<DampTime>) -> Self {
        self.damp_time = damp_time.into();
        self
    }

    pub fn with_residual(mut self, residual: f32) -> Self {
        self.residual = residual;
        self
    }

    pub fn with_order(mut self, order: u32) -> Self {
        self.order = order;
        self
    }

    pub fn with_substeps(mut self, substeps: u32) -> Self {
        self.substeps = substeps;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f32) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_power(mut self, power: f32) -> Self {
        self.power = power;
        self
    }

    pub fn with_low_pass_beta(mut self, beta: f32) -> Self {
        self.low_pass_beta = beta;
        self
    }

    pub fn with_spring(mut self, frequency: f32, damping_ratio: f32) -> Self {
        self.frequency = frequency;
        self.damping_ratio = damping_ratio;
        self
    }

    pub fn with_numeric_spring(mut self, coefficient: f32, residual: f32) -> Self {
        self.spring_coefficient = coefficient;
        self.spring_residual = residual;
        self
    }

    pub fn with_max_substep(mut self, max_substep: f32) -> Self {
        self.max_substep = max_substep;
        self
    }

    /// Report (but keep) values outside their documented ranges.
    pub fn warn_out_of_range(&self) {
        if !(self.residual > 0.0 && self.residual < 1.0) {
            log::warn!("damp residual {} is outside (0, 1)", self.residual);
        }
        let times = self.damp_time.as_vec3();
        if times.min_element() < 0.0 {
            log::warn!("negative damp time {:?}", times);
        }
        if !(1..=7).contains(&self.order) {
            log::warn!("continuity order {} will be clamped to 1..=7", self.order);
        }
        if self.tolerance < 0.0 {
            log::warn!("negative restriction tolerance {}", self.tolerance);
        }
        if !(0.0..=1.0).contains(&self.low_pass_beta) {
            log::warn!("low-pass beta {} is outside [0, 1]", self.low_pass_beta);
        }
        if self.damping_ratio < 0.0 {
            log::warn!("negative spring damping ratio {}", self.damping_ratio);
        }
        if !(0.0..=1.0).contains(&self.spring_residual) {
            log::warn!("spring residual {} is outside [0, 1]", self.spring_residual);
        }
        if self.max_substep <= 0.0 {
            log::warn!("max sub-step {} is not positive; ticks will not be split", self.max_substep);
        }
    }
}
