use serde::Serialize;

/// One accepted move, in playable 1-based coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Move {
    pub row: u8,
    pub col: u8,
    /// Mover color code: 1=black, 2=white.
    pub color: u8,
}

/// Public game snapshot handed to observers after every accepted move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    /// Contract:
    /// - Playable 9x9 grid in row-major order; the sentinel frame is not exported.
    /// - 0=empty, 1=black, 2=white, 3=neutral.
    pub stones: Vec<u8>,
    /// Claimed territory, same layout and encoding as `stones`.
    pub territory: Vec<u8>,
    pub current_color: u8,
    pub is_game_over: bool,
    /// Contract:
    /// - 0 while the game is in progress.
    /// - Winner color code once `is_game_over` is set.
    pub winner: u8,
    /// Every accepted move in play order.
    pub moves: Vec<Move>,
}

/// Final standing after game over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameResult {
    pub winner: u8,
    pub black_territory: u8,
    pub white_territory: u8,
}
