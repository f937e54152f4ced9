// vector.rs
//
// Three-channel dampers for vector and rotation gaps. Each component gets its
// own independently configured channel; there is no coupling between them.
//
// Usage:
//   let mut damper = VectorDamper::new(&config);
//   let delta = damper.step(target - position, dt);
//   position += delta;
//   damper.commit();
//
// or, in one call:
//   position = damper.follow(position, target, dt);

use glam::Vec3;
use crate::config::DampConfig;
use crate::damper::DampChannel;
use crate::rotator::Rotator;

/// Damps a `Vec3` gap. Channels are X, Y, Z.
#[derive(Debug, Clone)]
pub struct VectorDamper {
    channels: [DampChannel; 3],
}

impl VectorDamper {
    /// Same strategy on every axis; per-axis damp times come from
    /// `config.damp_time`.
    pub fn new(config: &DampConfig) -> Self {
        Self::from_channels(std::array::from_fn(|axis| DampChannel::from_config(config, axis)))
    }

    /// Independently configured channels, e.g. a spring on Z only.
    pub fn from_channels(channels: [DampChannel; 3]) -> Self {
        Self { channels }
    }

    pub fn step(&mut self, gap: Vec3, dt: f32) -> Vec3 {
        Vec3::new(
            self.channels[0].step(gap.x, dt),
            self.channels[1].step(gap.y, dt),
            self.channels[2].step(gap.z, dt),
        )
    }

    /// Step toward `target`, commit, and return the new position.
    pub fn follow(&mut self, current: Vec3, target: Vec3, dt: f32) -> Vec3 {
        let delta = self.step(target - current, dt);
        self.commit();
        current + delta
    }

    pub fn set_output(&mut self, output: Vec3) {
        for (channel, value) in self.channels.iter_mut().zip(output.to_array()) {
            channel.set_output(value);
        }
    }

    pub fn commit(&mut self) {
        self.channels.iter_mut().for_each(DampChannel::commit);
    }

    pub fn reset(&mut self) {
        self.channels.iter_mut().for_each(DampChannel::reset);
    }

    pub fn output(&self) -> Vec3 {
        Vec3::new(
            self.channels[0].output(),
            self.channels[1].output(),
            self.channels[2].output(),
        )
    }

    pub fn channel(&self, axis: usize) -> &DampChannel {
        &self.channels[axis]
    }

    pub fn channel_mut(&mut self, axis: usize) -> &mut DampChannel {
        &mut self.channels[axis]
    }
}

/// Damps a `Rotator` gap. Channels are roll, pitch, yaw; per-axis damp
/// times map X to roll, Y to pitch and Z to yaw.
#[derive(Debug, Clone)]
pub struct RotatorDamper {
    channels: [DampChannel; 3],
}

impl RotatorDamper {
    pub fn new(config: &DampConfig) -> Self {
        Self::from_channels(std::array::from_fn(|axis| DampChannel::from_config(config, axis)))
    }

    pub fn from_channels(channels: [DampChannel; 3]) -> Self {
        Self { channels }
    }

    pub fn step(&mut self, gap: Rotator, dt: f32) -> Rotator {
        Rotator::new(
            self.channels[0].step(gap.roll, dt),
            self.channels[1].step(gap.pitch, dt),
            self.channels[2].step(gap.yaw, dt),
        )
    }

    /// Step toward `target` the short way round, commit, and return the new
    /// rotation.
    pub fn follow(&mut self, current: Rotator, target: Rotator, dt: f32) -> Rotator {
        let delta = self.step(Rotator::delta(current, target), dt);
        self.commit();
        current + delta
    }

    pub fn set_output(&mut self, output: Rotator) {
        self.channels[0].set_output(output.roll);
        self.channels[1].set_output(output.pitch);
        self.channels[2].set_output(output.yaw);
    }

    pub fn commit(&mut self) {
        self.channels.iter_mut().for_each(DampChannel::commit);
    }

    pub fn reset(&mut self) {
        self.channels.iter_mut().for_each(DampChannel::reset);
    }

    pub fn output(&self) -> Rotator {
        Rotator::new(
            self.channels[0].output(),
            self.channels[1].output(),
            self.channels[2].output(),
        )
    }

    pub fn channel(&self, axis: usize) -> &DampChannel {
        &self.channels[axis]
    }

    pub fn channel_mut(&mut self, axis: usize) -> &mut DampChannel {
        &mut self.channels[axis]
    }
}
