pub mod runner;

pub use runner::{DamperSlot, RigRunner};

use std::cell::RefCell;
use wasm_bindgen::prelude::*;

thread_local! {
    static RUNNER: RefCell<RigRunner> = RefCell::new(RigRunner::new());
}

fn with_runner<R>(f: impl FnOnce(&mut RigRunner) -> R) -> R {
    RUNNER.with(|cell| f(&mut cell.borrow_mut()))
}

/// Install the panic hook and console logger, and drop any registered dampers.
#[wasm_bindgen]
pub fn rig_init() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    with_runner(|r| *r = RigRunner::new());
    log::info!("camrig: initialized");
}

/// Register a vector damper from a JSON `DampConfig`. Returns its slot.
#[wasm_bindgen]
pub fn rig_add_vector_damper(json: &str) -> Result<u32, JsValue> {
    with_runner(|r| r.add_vector_json(json)).map_err(|e| {
        log::warn!("rig_add_vector_damper: {}", e);
        JsValue::from_str(&e.to_string())
    })
}

/// Register a rotator damper from a JSON `DampConfig`. Returns its slot.
#[wasm_bindgen]
pub fn rig_add_rotator_damper(json: &str) -> Result<u32, JsValue> {
    with_runner(|r| r.add_rotator_json(json)).map_err(|e| {
        log::warn!("rig_add_rotator_damper: {}", e);
        JsValue::from_str(&e.to_string())
    })
}

#[wasm_bindgen]
pub fn rig_step(slot: u32, x: f32, y: f32, z: f32, dt: f32) -> bool {
    with_runner(|r| r.step(slot, x, y, z, dt))
}

#[wasm_bindgen]
pub fn rig_set_output(slot: u32, x: f32, y: f32, z: f32) {
    with_runner(|r| r.set_output(slot, x, y, z));
}

#[wasm_bindgen]
pub fn rig_commit(slot: u32) {
    with_runner(|r| r.commit(slot));
}

#[wasm_bindgen]
pub fn rig_reset(slot: u32) {
    with_runner(|r| r.reset(slot));
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_output_ptr() -> *const f32 {
    with_runner(|r| r.output_ptr())
}

#[wasm_bindgen]
pub fn get_output_len() -> u32 {
    with_runner(|r| r.output_len())
}

#[wasm_bindgen]
pub fn get_slot_count() -> u32 {
    with_runner(|r| r.slot_count())
}
