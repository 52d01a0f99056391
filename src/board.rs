/// Playable lines per side.
pub const BOARD_SIZE: usize = 9;
/// Grid side including the sentinel ring.
pub(crate) const GRID_SIZE: usize = BOARD_SIZE + 2;
pub(crate) const NUM_CELLS: usize = GRID_SIZE * GRID_SIZE;
/// The fixed neutral point, in playable coordinates.
pub(crate) const CENTER: (usize, usize) = (5, 5);

/// Owner of a stone or a claimed cell. `Neutral` only ever marks the fixed
/// center point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Black,
    White,
    Neutral,
}

impl Color {
    pub fn opponent(self) -> Self {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
            Color::Neutral => Color::Neutral,
        }
    }

    /// Snapshot code: 1=black, 2=white, 3=neutral.
    pub fn code(self) -> u8 {
        match self {
            Color::Black => 1,
            Color::White => 2,
            Color::Neutral => 3,
        }
    }
}

/// Outer edge a sentinel cell belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderSide {
    Top,
    Right,
    Bottom,
    Left,
}

impl BorderSide {
    /// Index into a `[bool; 4]` of border flags: top, right, bottom, left.
    pub(crate) fn index(self) -> usize {
        match self {
            BorderSide::Top => 0,
            BorderSide::Right => 1,
            BorderSide::Bottom => 2,
            BorderSide::Left => 3,
        }
    }
}

/// One grid cell. Sentinels carry a border tag and never hold a stone or
/// territory; playable cells never carry a border tag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cell {
    pub stone: Option<Color>,
    pub territory: Option<Color>,
    pub border: Option<BorderSide>,
}

/// Playable 9x9 grid wrapped in a ring of tagged border sentinels.
///
/// Cloning is a flat copy of the cell array; the move pipeline works on a
/// clone and swaps it in, so a board value handed out is never mutated again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [Cell; NUM_CELLS],
}

impl Board {
    /// Creates the initial board: tagged sentinel ring, the neutral point at
    /// the center, every other cell open.
    ///
    /// Corner sentinels take the tag of the horizontal edge they sit on. They
    /// are unreachable from any playable cell by 4-connected traversal, so the
    /// choice only keeps the tagging uniform.
    pub fn new() -> Self {
        let mut cells = [Cell::default(); NUM_CELLS];

        for col in 0..GRID_SIZE {
            cells[cell_index(0, col)].border = Some(BorderSide::Top);
            cells[cell_index(GRID_SIZE - 1, col)].border = Some(BorderSide::Bottom);
        }
        for row in 1..=BOARD_SIZE {
            cells[cell_index(row, 0)].border = Some(BorderSide::Left);
            cells[cell_index(row, GRID_SIZE - 1)].border = Some(BorderSide::Right);
        }

        let center = &mut cells[cell_index(CENTER.0, CENTER.1)];
        center.stone = Some(Color::Neutral);
        center.territory = Some(Color::Neutral);

        Self { cells }
    }

    pub(crate) fn cell(&self, row: usize, col: usize) -> &Cell {
        debug_assert!(row < GRID_SIZE && col < GRID_SIZE);
        &self.cells[cell_index(row, col)]
    }

    /// Places one stone on an open playable cell.
    /// Returns `false` and leaves the board unchanged when the target is out
    /// of the playable range, already holds a stone, or is claimed territory.
    pub fn place_stone(&mut self, row: usize, col: usize, color: Color) -> bool {
        if !is_playable(row, col) {
            return false;
        }

        let cell = &mut self.cells[cell_index(row, col)];
        if cell.stone.is_some() || cell.territory.is_some() {
            return false;
        }

        cell.stone = Some(color);
        true
    }

    /// Awards the listed cells to `color`. A claimed cell never changes hands,
    /// so callers only pass cells the scanner found unclaimed.
    pub(crate) fn claim(&mut self, cells: &[(usize, usize)], color: Color) {
        for &(row, col) in cells {
            self.cells[cell_index(row, col)].territory = Some(color);
        }
    }

    /// Returns `true` while any playable cell has neither stone nor territory.
    pub fn has_open_cell(&self) -> bool {
        self.playable_cells()
            .any(|cell| cell.stone.is_none() && cell.territory.is_none())
    }

    /// Returns `(black_territory, white_territory)` over playable cells.
    pub fn territory_counts(&self) -> (u8, u8) {
        let mut black = 0;
        let mut white = 0;
        for cell in self.playable_cells() {
            match cell.territory {
                Some(Color::Black) => black += 1,
                Some(Color::White) => white += 1,
                _ => {}
            }
        }
        (black, white)
    }

    /// Converts playable stones to `[u8; 81]` where 0=empty, 1=black,
    /// 2=white, 3=neutral.
    pub fn stone_codes(&self) -> [u8; BOARD_SIZE * BOARD_SIZE] {
        let mut codes = [0u8; BOARD_SIZE * BOARD_SIZE];
        for (slot, cell) in codes.iter_mut().zip(self.playable_cells()) {
            *slot = code_of(cell.stone);
        }
        codes
    }

    /// Same encoding as `stone_codes`, over claimed territory.
    pub fn territory_codes(&self) -> [u8; BOARD_SIZE * BOARD_SIZE] {
        let mut codes = [0u8; BOARD_SIZE * BOARD_SIZE];
        for (slot, cell) in codes.iter_mut().zip(self.playable_cells()) {
            *slot = code_of(cell.territory);
        }
        codes
    }

    fn playable_cells(&self) -> impl Iterator<Item = &Cell> {
        (1..=BOARD_SIZE)
            .flat_map(move |row| (1..=BOARD_SIZE).map(move |col| self.cell(row, col)))
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn cell_index(row: usize, col: usize) -> usize {
    row * GRID_SIZE + col
}

fn is_playable(row: usize, col: usize) -> bool {
    (1..=BOARD_SIZE).contains(&row) && (1..=BOARD_SIZE).contains(&col)
}

fn code_of(owner: Option<Color>) -> u8 {
    owner.map_or(0, Color::code)
}
