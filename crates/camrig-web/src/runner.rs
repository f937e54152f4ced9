use camrig::{DampConfig, Rotator, RotatorDamper, Vec3, VectorDamper};

/// A damper registered by the host.
#[derive(Debug, Clone)]
pub enum DamperSlot {
    Vector(VectorDamper),
    Rotator(RotatorDamper),
}

/// Owns every damper the host has registered and the output of the last step.
///
/// The wasm exports keep one of these in a `thread_local!` and forward to it,
/// because wasm-bindgen cannot hand out references to Rust-owned dampers.
/// Slots are addressed by index; three-component values travel as x/y/z
/// (roll/pitch/yaw for rotators).
#[derive(Debug, Default)]
pub struct RigRunner {
    slots: Vec<DamperSlot>,
    /// Flat buffer of the last step's output for direct memory reads.
    output: [f32; 3],
}

impl RigRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_vector(&mut self, config: &DampConfig) -> u32 {
        self.push(DamperSlot::Vector(VectorDamper::new(config)))
    }

    pub fn add_rotator(&mut self, config: &DampConfig) -> u32 {
        self.push(DamperSlot::Rotator(RotatorDamper::new(config)))
    }

    /// Parse a JSON config and register a vector damper for it.
    pub fn add_vector_json(&mut self, json: &str) -> Result<u32, serde_json::Error> {
        let config = DampConfig::from_json(json)?;
        Ok(self.add_vector(&config))
    }

    /// Parse a JSON config and register a rotator damper for it.
    pub fn add_rotator_json(&mut self, json: &str) -> Result<u32, serde_json::Error> {
        let config = DampConfig::from_json(json)?;
        Ok(self.add_rotator(&config))
    }

    fn push(&mut self, slot: DamperSlot) -> u32 {
        let id = self.slots.len() as u32;
        log::debug!("registered damper slot {}: {:?}", id, slot);
        self.slots.push(slot);
        id
    }

    /// Step a slot. Returns false (and leaves the output buffer alone) for an
    /// unknown slot.
    pub fn step(&mut self, slot: u32, x: f32, y: f32, z: f32, dt: f32) -> bool {
        let Some(damper) = self.slots.get_mut(slot as usize) else {
            return false;
        };
        self.output = match damper {
            DamperSlot::Vector(d) => d.step(Vec3::new(x, y, z), dt).to_array(),
            DamperSlot::Rotator(d) => {
                let r = d.step(Rotator::new(x, y, z), dt);
                [r.roll, r.pitch, r.yaw]
            }
        };
        true
    }

    pub fn set_output(&mut self, slot: u32, x: f32, y: f32, z: f32) {
        match self.slots.get_mut(slot as usize) {
            Some(DamperSlot::Vector(d)) => d.set_output(Vec3::new(x, y, z)),
            Some(DamperSlot::Rotator(d)) => d.set_output(Rotator::new(x, y, z)),
            None => {}
        }
    }

    pub fn commit(&mut self, slot: u32) {
        match self.slots.get_mut(slot as usize) {
            Some(DamperSlot::Vector(d)) => d.commit(),
            Some(DamperSlot::Rotator(d)) => d.commit(),
            None => {}
        }
    }

    pub fn reset(&mut self, slot: u32) {
        match self.slots.get_mut(slot as usize) {
            Some(DamperSlot::Vector(d)) => d.reset(),
            Some(DamperSlot::Rotator(d)) => d.reset(),
            None => {}
        }
    }

    pub fn output(&self) -> [f32; 3] {
        self.output
    }

    // ---- Pointer accessors for direct memory reads ----

    pub fn output_ptr(&self) -> *const f32 {
        self.output.as_ptr()
    }

    pub fn output_len(&self) -> u32 {
        self.output.len() as u32
    }

    pub fn slot_count(&self) -> u32 {
        self.slots.len() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camrig::DampMethod;

    #[test]
    fn slots_are_numbered_in_order() {
        let mut runner = RigRunner::new();
        assert_eq!(runner.add_vector(&DampConfig::default()), 0);
        assert_eq!(runner.add_rotator(&DampConfig::default()), 1);
        assert_eq!(runner.slot_count(), 2);
    }

    #[test]
    fn step_writes_output_buffer() {
        let mut runner = RigRunner::new();
        let id = runner
            .add_vector_json(r#"{ "method": "exponential", "damp_time": 1.0 }"#)
            .unwrap();

        assert!(runner.step(id, 100.0, 0.0, -100.0, 1.0));
        let [x, y, z] = runner.output();
        assert!((x - 99.0).abs() < 1e-3);
        assert_eq!(y, 0.0);
        assert!((z + 99.0).abs() < 1e-3);
        assert_eq!(runner.output_len(), 3);
    }

    #[test]
    fn unknown_slot_is_ignored() {
        let mut runner = RigRunner::new();
        assert!(!runner.step(7, 1.0, 1.0, 1.0, 0.016));
        runner.commit(7);
        runner.set_output(7, 0.0, 0.0, 0.0);
        runner.reset(7);
        assert_eq!(runner.output(), [0.0; 3]);
    }

    #[test]
    fn bad_json_is_an_error() {
        let mut runner = RigRunner::new();
        assert!(runner.add_rotator_json("{ not json").is_err());
        assert_eq!(runner.slot_count(), 0);
    }

    #[test]
    fn rotator_slot_round_trip() {
        let mut runner = RigRunner::new();
        let config = DampConfig::new(DampMethod::ContinuityCorrected);
        let id = runner.add_rotator(&config);

        runner.step(id, 10.0, 20.0, 30.0, 0.016);
        runner.set_output(id, 1.0, 2.0, 3.0);
        runner.commit(id);
        assert!(runner.step(id, 9.0, 18.0, 27.0, 0.016));
        let out = runner.output();
        assert!(out.iter().all(|v| *v > 0.0));
    }
}
