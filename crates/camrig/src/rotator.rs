use std::ops::{Add, Sub};
use glam::Vec3;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Euler rotation in degrees. Used for rotation gaps, one channel per angle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rotator {
    pub roll: f32,
    pub pitch: f32,
    pub yaw: f32,
}

impl Rotator {
    pub const ZERO: Self = Self {
        roll: 0.0,
        pitch: 0.0,
        yaw: 0.0,
    };

    pub const fn new(roll: f32, pitch: f32, yaw: f32) -> Self {
        Self { roll, pitch, yaw }
    }

    /// Each angle wrapped into (-180, 180].
    pub fn normalized(self) -> Self {
        Self {
            roll: normalize_degrees(self.roll),
            pitch: normalize_degrees(self.pitch),
            yaw: normalize_degrees(self.yaw),
        }
    }

    /// Shortest signed per-axis rotation taking `from` to `to`.
    /// This is the gap a rotation damper should be fed.
    pub fn delta(from: Self, to: Self) -> Self {
        (to - from).normalized()
    }

    /// x = roll, y = pitch, z = yaw.
    pub fn to_vec3(self) -> Vec3 {
        Vec3::new(self.roll, self.pitch, self.yaw)
    }

    pub fn from_vec3(v: Vec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

fn normalize_degrees(angle: f32) -> f32 {
    let wrapped = (angle + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped <= -180.0 {
        wrapped + 360.0
    } else {
        wrapped
    }
}

impl Add for Rotator {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.roll + rhs.roll, self.pitch + rhs.pitch, self.yaw + rhs.yaw)
    }
}

impl Sub for Rotator {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.roll - rhs.roll, self.pitch - rhs.pitch, self.yaw - rhs.yaw)
    }
}
