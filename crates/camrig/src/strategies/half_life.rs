// strategies/half_life.rs
//
// Spring parameterized by half-life instead of frequency. Treats the current
// value as sitting at 0 and the target at `gap` with zero target velocity;
// `velocity` is the velocity of the moving value. Uses a cheap rational
// approximation of exp(-x), which is accurate enough for damping. Evaluated
// in f64 since `x` nearly cancels against `gap` at small dt.

use std::f64::consts::LN_2;
use crate::state::DamperState;

const EPSILON: f64 = 1e-8;

/// Floor on the damping ratio; zero would divide by zero.
const MIN_DAMPING_RATIO: f32 = 1e-3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HalfLifeSpring {
    pub damping_ratio: f32,
}

impl HalfLifeSpring {
    pub fn new(damping_ratio: f32) -> Self {
        Self { damping_ratio }
    }

    /// Advances `velocity` and returns how far the value moves this tick.
    /// A half-life of zero or less snaps and stops the spring.
    pub fn step(&self, state: &mut DamperState, gap: f32, dt: f32, half_life: f32) -> f32 {
        if dt <= 0.0 {
            return 0.0;
        }
        if half_life <= 0.0 {
            state.velocity = 0.0;
            return gap;
        }
        let zeta = self.damping_ratio.max(MIN_DAMPING_RATIO) as f64;
        let (gap, velocity, dt, half_life) =
            (gap as f64, state.velocity as f64, dt as f64, half_life as f64);

        let damping = 4.0 * LN_2 / (half_life + EPSILON);
        let stiffness = (damping / (zeta * 2.0)).powi(2);
        let y = damping / 2.0;
        // Offset of the current value (0) from the target.
        let j0 = -gap;

        let critical = damping * damping / 4.0;
        let discriminant = stiffness - critical;

        let (x, v) = if discriminant.abs() < 1e-5 * critical.max(1.0) {
            let j1 = velocity + j0 * y;
            let e = fast_negexp(y * dt);
            let x = j0 * e + dt * j1 * e + gap;
            let v = -y * j0 * e - y * dt * j1 * e + j1 * e;
            (x, v)
        } else if discriminant > 0.0 {
            let w = discriminant.sqrt();
            let mut j = ((velocity + y * j0).powi(2) / (w * w + EPSILON) + j0 * j0).sqrt();
            let p = ((velocity + j0 * y) / (-j0 * w + EPSILON)).atan();
            if j0 <= 0.0 {
                j = -j;
            }

            let e = fast_negexp(y * dt);
            let (sine, cosine) = (w * dt + p).sin_cos();
            let x = j * e * cosine + gap;
            let v = -y * j * e * cosine - w * j * e * sine;
            (x, v)
        } else {
            let root = (damping * damping - 4.0 * stiffness).sqrt();
            let y0 = (damping + root) / 2.0;
            let y1 = (damping - root) / 2.0;
            let j1 = (gap * y0 - velocity) / (y1 - y0);
            let j0 = j0 - j1;

            let e0 = fast_negexp(y0 * dt);
            let e1 = fast_negexp(y1 * dt);
            let x = j0 * e0 + j1 * e1 + gap;
            let v = -y0 * j0 * e0 - y1 * j1 * e1;
            (x, v)
        };

        state.velocity = v as f32;
        x as f32
    }
}

#[inline]
fn fast_negexp(x: f64) -> f64 {
    1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x)
}
