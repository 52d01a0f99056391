use crate::board::{BOARD_SIZE, Board, Color};
use crate::region::RegionScan;
use crate::types::{GameResult, GameState, Move};

/// Margin black territory must clear over white on a settled board.
const TERRITORY_MARGIN: f32 = 2.5;

/// One running game: the current board snapshot plus turn state.
///
/// Fully synchronous; a host serializes `place` calls per game instance.
#[derive(Debug, Clone)]
pub struct GameInstance {
    board: Board,
    pub current_color: Color,
    pub winner: Option<Color>,
    pub is_game_over: bool,
    moves: Vec<Move>,
}

impl GameInstance {
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            current_color: Color::Black,
            winner: None,
            is_game_over: false,
            moves: Vec::new(),
        }
    }

    /// Plays one stone for the color whose turn it is.
    ///
    /// On success the board advances to a fresh snapshot and the turn flips,
    /// unless this move ended the game. On `Err` nothing changes and the turn
    /// does not advance.
    pub fn place(&mut self, row: u8, col: u8) -> Result<(), String> {
        if self.is_game_over {
            return Err("game is already over".to_string());
        }

        let (row, col) = check_coords(row, col)?;

        let mut board = self.board.clone();
        if !board.place_stone(row, col, self.current_color) {
            return Err("cell is not open".to_string());
        }
        self.moves.push(Move {
            row: row as u8,
            col: col as u8,
            color: self.current_color.code(),
        });

        let captured = run_region_pipeline(&mut board, row, col, self.current_color);

        if captured {
            self.winner = Some(self.current_color);
            self.is_game_over = true;
        } else if let Some(winner) = full_board_winner(&board) {
            self.winner = Some(winner);
            self.is_game_over = true;
        } else {
            self.current_color = self.current_color.opponent();
        }

        self.board = board;
        Ok(())
    }

    pub fn to_game_state(&self) -> GameState {
        GameState {
            stones: self.board.stone_codes().to_vec(),
            territory: self.board.territory_codes().to_vec(),
            current_color: self.current_color.code(),
            is_game_over: self.is_game_over,
            winner: self.winner.map_or(0, Color::code),
            moves: self.moves.clone(),
        }
    }

    pub fn to_game_result(&self) -> GameResult {
        let (black_territory, white_territory) = self.board.territory_counts();
        GameResult {
            winner: self.winner.map_or(0, Color::code),
            black_territory,
            white_territory,
        }
    }

    #[cfg(test)]
    fn set_board_for_test(&mut self, board: Board, current_color: Color) {
        self.board = board;
        self.current_color = current_color;
        self.winner = None;
        self.is_game_over = false;
        self.moves.clear();
    }
}

impl Default for GameInstance {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs scan + adjudication on each neighbor of the placed stone, in fixed
/// order: up, down, left, right. Returns `true` as soon as a scanned pocket
/// turns out captured; remaining directions are skipped and no territory is
/// awarded for that pocket.
fn run_region_pipeline(board: &mut Board, row: usize, col: usize, color: Color) -> bool {
    let neighbors = [
        (row - 1, col),
        (row + 1, col),
        (row, col - 1),
        (row, col + 1),
    ];

    for (scan_row, scan_col) in neighbors {
        let scan = RegionScan::run(board, scan_row, scan_col, color);
        if scan.is_captured() {
            return true;
        }
        if scan.claims_territory() {
            board.claim(&scan.cells, color);
        }
    }

    false
}

/// Decides the winner once no playable cell is left open.
///
/// Black needs a margin over `TERRITORY_MARGIN`; every other settled board
/// goes to white. There is no draw.
fn full_board_winner(board: &Board) -> Option<Color> {
    if board.has_open_cell() {
        return None;
    }

    let (black, white) = board.territory_counts();
    if black as f32 > white as f32 + TERRITORY_MARGIN {
        Some(Color::Black)
    } else {
        Some(Color::White)
    }
}

fn check_coords(row: u8, col: u8) -> Result<(usize, usize), String> {
    let (row, col) = (row as usize, col as usize);
    if !(1..=BOARD_SIZE).contains(&row) || !(1..=BOARD_SIZE).contains(&col) {
        return Err("row/col out of range".to_string());
    }
    Ok((row, col))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::CENTER;

    fn fully_claimed_board(black_cells: usize) -> Board {
        let mut black = Vec::new();
        let mut white = Vec::new();
        for row in 1..=BOARD_SIZE {
            for col in 1..=BOARD_SIZE {
                if (row, col) == CENTER {
                    continue;
                }
                if black.len() < black_cells {
                    black.push((row, col));
                } else {
                    white.push((row, col));
                }
            }
        }

        let mut board = Board::new();
        board.claim(&black, Color::Black);
        board.claim(&white, Color::White);
        board
    }

    #[test]
    fn t01_initial_state_is_black_to_move() {
        let game = GameInstance::new();
        let state = game.to_game_state();

        assert_eq!(state.current_color, 1);
        assert!(!state.is_game_over);
        assert_eq!(state.winner, 0);
        assert!(state.moves.is_empty());
        assert_eq!(state.stones[40], 3); // fixed neutral point
        assert_eq!(state.territory[40], 3);
        assert_eq!(game.to_game_result().winner, 0);
    }

    #[test]
    fn t02_rejected_moves_change_nothing() {
        let mut game = GameInstance::new();
        game.place(4, 4).unwrap();
        let before = game.to_game_state();

        let err = game.place(0, 4).unwrap_err();
        assert!(err.contains("out of range"));
        assert!(game.place(4, 10).is_err());
        assert!(game.place(4, 4).is_err()); // occupied
        assert!(game.place(5, 5).is_err()); // neutral point
        assert_eq!(game.to_game_state(), before);
    }

    #[test]
    fn t03_turns_alternate_black_white_black() {
        let mut game = GameInstance::new();
        assert_eq!(game.current_color, Color::Black);

        game.place(3, 3).unwrap();
        assert_eq!(game.current_color, Color::White);

        game.place(7, 7).unwrap();
        assert_eq!(game.current_color, Color::Black);
        assert_eq!(game.to_game_state().moves.len(), 2);
    }

    #[test]
    fn closing_a_corner_pocket_awards_it_to_the_mover() {
        let mut game = GameInstance::new();
        game.place(1, 2).unwrap(); // black
        game.place(8, 8).unwrap(); // white
        game.place(2, 1).unwrap(); // black closes the corner

        let state = game.to_game_state();
        assert_eq!(state.territory[0], 1); // playable (1,1) is black territory
        assert!(!state.is_game_over);
        assert_eq!(state.current_color, 2);
        assert_eq!(game.to_game_result().black_territory, 1);
    }

    #[test]
    fn pocket_holding_an_opponent_stone_is_not_awarded() {
        let mut game = GameInstance::new();
        game.place(1, 2).unwrap(); // black
        game.place(1, 1).unwrap(); // white takes the corner
        game.place(2, 2).unwrap(); // black
        game.place(9, 9).unwrap(); // white
        game.place(3, 1).unwrap(); // black closes the pocket

        let state = game.to_game_state();
        assert_eq!(state.territory[0], 0); // white stone keeps the pocket open
        assert_eq!(state.territory[9], 0); // playable (2,1) stays blank
        assert!(!state.is_game_over);
    }

    #[test]
    fn capture_ends_the_game_on_the_closing_move() {
        let mut game = GameInstance::new();
        game.place(1, 2).unwrap(); // black
        game.place(1, 1).unwrap(); // white plays into the corner
        game.place(2, 1).unwrap(); // black removes its last liberty

        assert!(game.is_game_over);
        assert_eq!(game.winner, Some(Color::Black));

        let state = game.to_game_state();
        assert_eq!(state.winner, 1);
        assert_eq!(state.current_color, 1); // turn never flipped

        let err = game.place(9, 9).unwrap_err();
        assert!(err.contains("over"));
    }

    #[test]
    fn winner_margin_is_asymmetric_and_never_draws() {
        assert_eq!(full_board_winner(&fully_claimed_board(43)), Some(Color::Black));
        assert_eq!(full_board_winner(&fully_claimed_board(42)), Some(Color::Black)); // 42 > 40.5
        assert_eq!(full_board_winner(&fully_claimed_board(41)), Some(Color::White)); // 41 < 41.5
        assert_eq!(full_board_winner(&fully_claimed_board(40)), Some(Color::White)); // even split
    }

    #[test]
    fn board_with_an_open_cell_is_undecided() {
        let mut board = Board::new();
        let mut cells = Vec::new();
        for row in 1..=BOARD_SIZE {
            for col in 1..=BOARD_SIZE {
                if (row, col) == CENTER || (row, col) == (9, 9) {
                    continue;
                }
                cells.push((row, col));
            }
        }
        board.claim(&cells, Color::Black);
        assert_eq!(full_board_winner(&board), None);

        // A bare stone settles a cell without claiming it.
        assert!(board.place_stone(9, 9, Color::White));
        assert_eq!(full_board_winner(&board), Some(Color::Black));
    }

    #[test]
    fn settling_the_final_pocket_finishes_the_game() {
        let mut claimed = Vec::new();
        for row in 1..=BOARD_SIZE {
            for col in 1..=BOARD_SIZE {
                if (row, col) == CENTER || (row, col) == (1, 1) || (row, col) == (2, 1) {
                    continue;
                }
                claimed.push((row, col));
            }
        }
        let mut board = Board::new();
        board.claim(&claimed, Color::Black);

        let mut game = GameInstance::new();
        game.set_board_for_test(board, Color::Black);
        game.place(2, 1).unwrap();

        assert!(game.is_game_over);
        assert_eq!(game.winner, Some(Color::Black));
        assert_eq!(game.to_game_result().black_territory, 79);
    }
}
