pub mod runner;

pub use runner::GameRunner;

use std::cell::RefCell;

use tilerun_engine::InputEvent;
use wasm_bindgen::prelude::*;

thread_local! {
    static RUNNER: RefCell<Option<GameRunner>> = RefCell::new(None);
}

/// Run `f` against the live runner. `None` until `game_init` has succeeded.
fn with_runner<R>(f: impl FnOnce(&mut GameRunner) -> R) -> Option<R> {
    RUNNER.with(|cell| cell.borrow_mut().as_mut().map(f))
}

/// Start a session. `config_json` may be empty for defaults; each entry of
/// `levels` is one level's text.
#[wasm_bindgen]
pub fn game_init(
    config_json: &str,
    levels: Vec<String>,
    tile_width: f32,
    tile_height: f32,
) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let levels: Vec<&str> = levels.iter().map(String::as_str).collect();
    let runner = GameRunner::from_text(config_json, &levels, tile_width, tile_height)
        .map_err(|err| {
            log::warn!("tilerun: init failed: {}", err);
            JsValue::from_str(&err.to_string())
        })?;

    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });
    log::info!("tilerun: initialized");
    Ok(())
}

#[wasm_bindgen]
pub fn game_tick(dt: f32) {
    with_runner(|r| r.tick(dt));
}

#[wasm_bindgen]
pub fn game_pointer_down(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerDown { x, y }));
}

#[wasm_bindgen]
pub fn game_pointer_up(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerUp { x, y }));
}

#[wasm_bindgen]
pub fn game_key_down(key_code: u32) {
    with_runner(|r| r.push_input(InputEvent::KeyDown { key_code }));
}

#[wasm_bindgen]
pub fn game_key_up(key_code: u32) {
    with_runner(|r| r.push_input(InputEvent::KeyUp { key_code }));
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_instances_ptr() -> *const f32 {
    with_runner(|r| r.instances_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_instance_count() -> u32 {
    with_runner(|r| r.instance_count()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_sound_events_ptr() -> *const u8 {
    with_runner(|r| r.sound_events_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_sound_events_len() -> u32 {
    with_runner(|r| r.sound_events_len()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_game_events_ptr() -> *const f32 {
    with_runner(|r| r.game_events_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_game_events_len() -> u32 {
    with_runner(|r| r.game_events_len()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_world_width() -> f32 {
    with_runner(|r| r.world_width()).unwrap_or(0.0)
}

#[wasm_bindgen]
pub fn get_world_height() -> f32 {
    with_runner(|r| r.world_height()).unwrap_or(0.0)
}

#[wasm_bindgen]
pub fn get_score() -> f64 {
    with_runner(|r| r.score()).unwrap_or(0.0)
}

#[wasm_bindgen]
pub fn get_level() -> u32 {
    with_runner(|r| r.level()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn is_paused() -> bool {
    with_runner(|r| r.is_paused()).unwrap_or(false)
}

#[wasm_bindgen]
pub fn is_finished() -> bool {
    with_runner(|r| r.is_finished()).unwrap_or(false)
}
