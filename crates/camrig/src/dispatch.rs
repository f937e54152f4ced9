// dispatch.rs
//
// Stateless entry points: route a `DampConfig` plus an explicit damp time to
// the matching strategy, for callers that keep their own `DamperState`s
// instead of owning `DampChannel`s. Each call advances in-step state
// (spring velocity, low-pass delta); committing the residual is separate.
//
// Usage:
//   let mut states = [DamperState::REST; 3];
//   let delta = damp_vec3(&config, dt, gap, 0.3, &mut states);
//   commit_states(&mut states, gap.to_array(), delta.to_array());

use glam::Vec3;
use crate::config::DampConfig;
use crate::damper::{ScalarDamper, Strategy};
use crate::rotator::Rotator;
use crate::state::DamperState;

/// Damp a single value. `damp_time` overrides `config.damp_time`.
pub fn damp_value(
    config: &DampConfig,
    dt: f32,
    gap: f32,
    damp_time: f32,
    state: &mut DamperState,
) -> f32 {
    let damper = ScalarDamper::with_damp_time(config, damp_time);
    let (output, next) = damper.step(*state, gap, dt);
    *state = next;
    output
}

/// Damp a vector with the same damp time on every axis.
pub fn damp_vec3(
    config: &DampConfig,
    dt: f32,
    gap: Vec3,
    damp_time: f32,
    states: &mut [DamperState; 3],
) -> Vec3 {
    damp_vec3_per_axis(config, dt, gap, Vec3::splat(damp_time), states)
}

/// Damp a vector with a damp time per axis.
pub fn damp_vec3_per_axis(
    config: &DampConfig,
    dt: f32,
    gap: Vec3,
    damp_times: Vec3,
    states: &mut [DamperState; 3],
) -> Vec3 {
    Vec3::from_array(damp_components(config, dt, gap.to_array(), damp_times, states))
}

/// Damp a rotator with the same damp time on every angle.
pub fn damp_rotator(
    config: &DampConfig,
    dt: f32,
    gap: Rotator,
    damp_time: f32,
    states: &mut [DamperState; 3],
) -> Rotator {
    damp_rotator_per_axis(config, dt, gap, Vec3::splat(damp_time), states)
}

/// Damp a rotator with a damp time per angle (X = roll, Y = pitch, Z = yaw).
pub fn damp_rotator_per_axis(
    config: &DampConfig,
    dt: f32,
    gap: Rotator,
    damp_times: Vec3,
    states: &mut [DamperState; 3],
) -> Rotator {
    let damped = damp_components(config, dt, gap.to_vec3().to_array(), damp_times, states);
    Rotator::from_vec3(Vec3::from_array(damped))
}

/// Record the residuals left by the last damp call, one per component.
pub fn commit_states(states: &mut [DamperState; 3], gaps: [f32; 3], outputs: [f32; 3]) {
    for ((state, gap), output) in states.iter_mut().zip(gaps).zip(outputs) {
        state.commit(gap, output);
    }
}

fn damp_components(
    config: &DampConfig,
    dt: f32,
    gaps: [f32; 3],
    damp_times: Vec3,
    states: &mut [DamperState; 3],
) -> [f32; 3] {
    // One strategy for all three; only the damp time differs per axis.
    let strategy = Strategy::from_config(config);
    std::array::from_fn(|axis| {
        let damper = ScalarDamper::new(strategy, damp_times[axis]);
        let (output, next) = damper.step(states[axis], gaps[axis], dt);
        states[axis] = next;
        output
    })
}
