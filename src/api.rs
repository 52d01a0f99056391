use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Mutex, MutexGuard};

use once_cell::sync::Lazy;
use wasm_bindgen::prelude::*;

use crate::game::GameInstance;

/// Live games keyed by id. One lock spans lookup and move application, so at
/// most one move is in flight per registry at a time.
static GAMES: Lazy<Mutex<HashMap<u32, GameInstance>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));
static NEXT_GAME_ID: AtomicU32 = AtomicU32::new(1);

/// Registers a fresh game and returns its id.
#[wasm_bindgen]
pub fn create_game() -> Result<u32, JsValue> {
    let id = NEXT_GAME_ID.fetch_add(1, Ordering::Relaxed);
    lock_games()?.insert(id, GameInstance::new());
    Ok(id)
}

/// Applies one move for the color whose turn it is and returns the updated
/// snapshot. Rejected moves leave the game untouched.
#[wasm_bindgen]
pub fn make_move(game_id: u32, row: u8, col: u8) -> Result<JsValue, JsValue> {
    let mut games = lock_games()?;
    let game = find_game(&mut games, game_id)?;
    game.place(row, col).map_err(|err| JsValue::from_str(&err))?;
    to_js(&game.to_game_state())
}

/// Returns the current snapshot without moving.
#[wasm_bindgen]
pub fn game_state(game_id: u32) -> Result<JsValue, JsValue> {
    let mut games = lock_games()?;
    let game = find_game(&mut games, game_id)?;
    to_js(&game.to_game_state())
}

/// Returns the standing; `winner` is 0 while the game is still in progress.
#[wasm_bindgen]
pub fn game_result(game_id: u32) -> Result<JsValue, JsValue> {
    let mut games = lock_games()?;
    let game = find_game(&mut games, game_id)?;
    to_js(&game.to_game_result())
}

/// Drops a finished or abandoned game. Returns `false` for unknown ids.
#[wasm_bindgen]
pub fn remove_game(game_id: u32) -> Result<bool, JsValue> {
    Ok(lock_games()?.remove(&game_id).is_some())
}

fn lock_games() -> Result<MutexGuard<'static, HashMap<u32, GameInstance>>, JsValue> {
    GAMES
        .lock()
        .map_err(|_| JsValue::from_str("game registry lock poisoned"))
}

fn find_game<'a>(
    games: &'a mut HashMap<u32, GameInstance>,
    game_id: u32,
) -> Result<&'a mut GameInstance, JsValue> {
    games
        .get_mut(&game_id)
        .ok_or_else(|| JsValue::from_str("unknown game id"))
}

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|err| JsValue::from_str(&err.to_string()))
}
