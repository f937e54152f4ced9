// strategies/spring.rs
//
// Second-order spring-mass-damper, advanced by its exact closed-form solution
// each tick rather than by numerical integration. The gap is the spring's
// displacement; `velocity` is the rate of change of the gap. The closed forms
// run in f64: at small dt the output `gap - x` is second order in dt.

use crate::state::DamperState;

/// Additive guard on the damped frequency before dividing by it.
const SPRING_EPSILON: f64 = 1e-5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalyticSpring {
    /// Angular frequency (rad/s).
    pub frequency: f32,
    /// 0 = undamped, <1 underdamped, 1 critical, >1 overdamped.
    pub damping_ratio: f32,
}

impl AnalyticSpring {
    pub fn new(frequency: f32, damping_ratio: f32) -> Self {
        Self {
            frequency,
            damping_ratio,
        }
    }

    /// Advances `velocity` and returns how far the value moves this tick.
    /// The damp time plays no part; only `dt <= 0` is degenerate here.
    pub fn step(&self, state: &mut DamperState, gap: f32, dt: f32) -> f32 {
        if dt <= 0.0 {
            return 0.0;
        }
        let omega = self.frequency as f64;
        let zeta = self.damping_ratio as f64;
        let (gap, velocity, dt) = (gap as f64, state.velocity as f64, dt as f64);

        let (x, v) = if zeta <= 0.0 {
            undamped(omega, gap, velocity, dt)
        } else if zeta < 1.0 {
            underdamped(omega, zeta, gap, velocity, dt)
        } else if (zeta - 1.0).abs() <= f32::EPSILON as f64 {
            // Velocity is re-derived from the decayed displacement.
            let x = gap * (-omega * dt).exp();
            (x, -omega * x)
        } else {
            overdamped(omega, zeta, gap, velocity, dt)
        };

        state.velocity = v as f32;
        (gap - x) as f32
    }
}

/// Lossless sinusoid exchanging displacement and velocity.
fn undamped(omega: f64, gap: f64, velocity: f64, dt: f64) -> (f64, f64) {
    let (sine, cosine) = (omega * dt).sin_cos();
    let x = velocity / omega * sine + gap * cosine;
    let v = velocity * cosine - omega * gap * sine;
    (x, v)
}

fn underdamped(omega: f64, zeta: f64, gap: f64, velocity: f64, dt: f64) -> (f64, f64) {
    let omega_d = omega * (1.0 - zeta * zeta).sqrt();
    let omega_zeta = omega * zeta;
    let (sine, cosine) = (omega_d * dt).sin_cos();
    let decay = (-omega_zeta * dt).exp();

    let c1 = gap;
    let c2 = (velocity + omega_zeta * gap) / (omega_d + SPRING_EPSILON);
    let x = c1 * decay * cosine + c2 * decay * sine;
    let v = -omega_zeta * x + (velocity + omega_zeta * gap) * decay * cosine
        - gap * omega_d * decay * sine;
    (x, v)
}

/// Sum of two decaying exponentials.
fn overdamped(omega: f64, zeta: f64, gap: f64, velocity: f64, dt: f64) -> (f64, f64) {
    let root = (zeta * zeta - 1.0).sqrt();
    let fast = -omega * (zeta + root);
    let slow = -omega * (zeta - root);

    let c1 = (-velocity / omega - (zeta - root) * gap) / (2.0 * root + SPRING_EPSILON);
    let c2 = gap - c1;
    let t1 = c1 * (dt * fast).exp();
    let t2 = c2 * (dt * slow).exp();
    (t1 + t2, fast * t1 + slow * t2)
}
