pub mod runner;

pub use runner::SceneRunner;

use std::cell::RefCell;

use wasm_bindgen::prelude::*;

use cosmic_engine::{InputEvent, SceneConfig};

thread_local! {
    static RUNNER: RefCell<Option<SceneRunner>> = RefCell::new(None);
}

fn with_runner<R>(f: impl FnOnce(&mut SceneRunner) -> R) -> R {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        let runner = borrow
            .as_mut()
            .expect("Scene not initialized. Call scene_init() first.");
        f(runner)
    })
}

#[wasm_bindgen]
pub fn scene_init() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(SceneRunner::new(SceneConfig::default()));
    });
    log::info!("cosmic scene: initialized");
}

#[wasm_bindgen]
pub fn scene_tick(dt: f32) {
    with_runner(|r| r.tick(dt));
}

#[wasm_bindgen]
pub fn scene_resize(width: u32, height: u32, dpr: f32) {
    with_runner(|r| r.resize(width, height, dpr));
}

#[wasm_bindgen]
pub fn scene_pointer_down(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerDown { x, y }));
}

#[wasm_bindgen]
pub fn scene_pointer_move(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerMove { x, y }));
}

#[wasm_bindgen]
pub fn scene_pointer_up(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerUp { x, y }));
}

#[wasm_bindgen]
pub fn scene_pointer_cancel() {
    with_runner(|r| r.push_input(InputEvent::PointerCancel));
}

#[wasm_bindgen]
pub fn start_transition() {
    with_runner(|r| r.start_transition());
}

#[wasm_bindgen]
pub fn enter_drawing() {
    with_runner(|r| r.enter_drawing());
}

#[wasm_bindgen]
pub fn enter_landing() {
    with_runner(|r| r.enter_landing());
}

#[wasm_bindgen]
pub fn set_brush_config(json: &str) {
    with_runner(|r| r.set_brush(json));
}

#[wasm_bindgen]
pub fn clear_artwork() {
    with_runner(|r| r.clear_artwork());
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_pixels_ptr() -> *const u8 {
    with_runner(|r| r.pixels_ptr())
}

#[wasm_bindgen]
pub fn get_pixels_len() -> u32 {
    with_runner(|r| r.pixels_len())
}

#[wasm_bindgen]
pub fn get_artwork_ptr() -> *const u8 {
    with_runner(|r| r.artwork_ptr())
}

#[wasm_bindgen]
pub fn get_artwork_len() -> u32 {
    with_runner(|r| r.artwork_len())
}

#[wasm_bindgen]
pub fn get_events_ptr() -> *const f32 {
    with_runner(|r| r.events_ptr())
}

#[wasm_bindgen]
pub fn get_events_len() -> u32 {
    with_runner(|r| r.events_len())
}

#[wasm_bindgen]
pub fn get_width() -> u32 {
    with_runner(|r| r.width())
}

#[wasm_bindgen]
pub fn get_height() -> u32 {
    with_runner(|r| r.height())
}

#[wasm_bindgen]
pub fn get_cursor_x() -> f32 {
    with_runner(|r| r.cursor_x())
}

#[wasm_bindgen]
pub fn get_cursor_y() -> f32 {
    with_runner(|r| r.cursor_y())
}

#[wasm_bindgen]
pub fn get_is_drawing() -> bool {
    with_runner(|r| r.is_drawing())
}
