pub mod config;
pub mod state;
pub mod strategies;
pub mod damper;
pub mod rotator;
pub mod vector;
pub mod dispatch;

// Re-export key types at crate root for convenience
pub use config::{DampConfig, DampMethod, DampTime};
pub use state::DamperState;
pub use damper::{DampChannel, ScalarDamper, Strategy};
pub use rotator::Rotator;
pub use vector::{RotatorDamper, VectorDamper};
pub use dispatch::{
    commit_states, damp_rotator, damp_rotator_per_axis, damp_value, damp_vec3,
    damp_vec3_per_axis,
};

// Strategies, usable directly without a config
pub use strategies::{
    AnalyticSpring, ContinuityCorrected, ExponentialResidual, HalfLifeSpring, LowPassCorrected,
    NumericSpring, RangeRestricted, Restriction, SubsteppedResidual,
};

pub use glam::Vec3;
