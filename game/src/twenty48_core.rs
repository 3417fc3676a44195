use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::tile_rng::{SeededTiles, Spawned, TileRng, spawn_tile};

pub const BOARD_SIZE: usize = 4;
pub const STARTING_TILES: usize = 2;

pub type Grid = [[u32; BOARD_SIZE]; BOARD_SIZE];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    fn is_vertical(self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }

    /// Right and Down slide toward the high index, so rows are mirrored before sliding left.
    fn is_mirrored(self) -> bool {
        matches!(self, Direction::Right | Direction::Down)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    WrongRowCount { found: usize },
    WrongRowLength { row: usize, found: usize },
    InvalidTile { row: usize, col: usize, value: u32 },
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::WrongRowCount { found } => {
                write!(f, "board must have {BOARD_SIZE} rows, got {found}")
            }
            BoardError::WrongRowLength { row, found } => {
                write!(f, "board row {row} must have {BOARD_SIZE} cells, got {found}")
            }
            BoardError::InvalidTile { row, col, value } => write!(
                f,
                "cell ({row}, {col}) holds {value}; tiles must be 0 or a power of two in 2..={MAX_TILE}"
            ),
        }
    }
}

impl std::error::Error for BoardError {}

/// Largest tile a 4x4 board can hold: sixteen cells starting from 4s top out at 2^17.
pub const MAX_TILE: u32 = 1 << 17;

pub fn is_valid_tile(value: u32) -> bool {
    value == 0 || (value >= 2 && value <= MAX_TILE && value.is_power_of_two())
}

/// A 4x4 grid where 0 is empty and every other cell is a power of two >= 2.
///
/// The only ways in are the validating constructors, so every `Board` in circulation already
/// satisfies the tile invariant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<u32>>", into = "Vec<Vec<u32>>")]
pub struct Board {
    cells: Grid,
}

impl Board {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_grid(grid: Grid) -> Result<Self, BoardError> {
        for (row, cells) in grid.iter().enumerate() {
            for (col, &value) in cells.iter().enumerate() {
                if !is_valid_tile(value) {
                    return Err(BoardError::InvalidTile { row, col, value });
                }
            }
        }
        Ok(Self { cells: grid })
    }

    pub fn from_rows<R: AsRef<[u32]>>(rows: &[R]) -> Result<Self, BoardError> {
        if rows.len() != BOARD_SIZE {
            return Err(BoardError::WrongRowCount { found: rows.len() });
        }
        let mut grid = [[0; BOARD_SIZE]; BOARD_SIZE];
        for (row, (dst, src)) in grid.iter_mut().zip(rows).enumerate() {
            let src = src.as_ref();
            if src.len() != BOARD_SIZE {
                return Err(BoardError::WrongRowLength {
                    row,
                    found: src.len(),
                });
            }
            dst.copy_from_slice(src);
        }
        Self::from_grid(grid)
    }

    pub fn grid(&self) -> &Grid {
        &self.cells
    }

    pub fn get(&self, row: usize, col: usize) -> Option<u32> {
        self.cells.get(row)?.get(col).copied()
    }

    /// Row-major coordinates of every empty cell.
    pub fn empty_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells.iter().enumerate().flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .filter(|&(_, &v)| v == 0)
                .map(move |(c, _)| (r, c))
        })
    }

    pub fn empty_count(&self) -> usize {
        self.empty_cells().count()
    }

    pub fn max_tile(&self) -> u32 {
        self.cells.iter().flatten().copied().max().unwrap_or(0)
    }

    /// Places a spawned tile. Only the spawner writes cells after construction.
    pub(crate) fn place(&mut self, row: usize, col: usize, value: u32) {
        debug_assert!(is_valid_tile(value));
        debug_assert_eq!(self.cells[row][col], 0);
        self.cells[row][col] = value;
    }

    pub fn shifted(&self, direction: Direction) -> MoveOutcome {
        let (board, gained) = apply_move(self, direction);
        MoveOutcome {
            changed: board != *self,
            board,
            gained,
        }
    }

    pub fn can_move(&self, direction: Direction) -> bool {
        self.shifted(direction).changed
    }

    /// True when the board is full and no two neighbours (in a row or a column) can merge.
    pub fn is_terminal(&self) -> bool {
        if self.cells.iter().flatten().any(|&v| v == 0) {
            return false;
        }
        let mergeable = |x: u32, y: u32| x == y && x < MAX_TILE;
        for a in 0..BOARD_SIZE {
            for b in 0..BOARD_SIZE - 1 {
                if mergeable(self.cells[a][b], self.cells[a][b + 1])
                    || mergeable(self.cells[b][a], self.cells[b + 1][a])
                {
                    return false;
                }
            }
        }
        true
    }
}

impl TryFrom<Grid> for Board {
    type Error = BoardError;

    fn try_from(grid: Grid) -> Result<Self, Self::Error> {
        Board::from_grid(grid)
    }
}

impl TryFrom<Vec<Vec<u32>>> for Board {
    type Error = BoardError;

    fn try_from(rows: Vec<Vec<u32>>) -> Result<Self, Self::Error> {
        Board::from_rows(&rows)
    }
}

impl From<Board> for Vec<Vec<u32>> {
    fn from(board: Board) -> Self {
        board.cells.iter().map(|row| row.to_vec()).collect()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            let line: Vec<String> = row
                .iter()
                .map(|&v| match v {
                    0 => format!("{:>5}", "."),
                    v => format!("{v:>5}"),
                })
                .collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    pub board: Board,
    pub gained: u32,
    pub changed: bool,
}

fn compact(row: [u32; BOARD_SIZE]) -> impl Iterator<Item = u32> {
    row.into_iter().filter(|&v| v != 0)
}

fn packed(tiles: impl Iterator<Item = u32>) -> [u32; BOARD_SIZE] {
    let mut row = [0; BOARD_SIZE];
    for (slot, v) in row.iter_mut().zip(tiles) {
        *slot = v;
    }
    row
}

/// Slides one row toward index 0 and returns it with the points earned.
///
/// A single left-to-right pass merges equal neighbours; a tile produced by a merge does not
/// merge again in the same pass, so `[2, 2, 2, 2]` becomes `[4, 4, 0, 0]`. A pair of
/// `MAX_TILE`s stays put so the result never leaves the valid tile range.
pub fn slide_row_left(row: [u32; BOARD_SIZE]) -> ([u32; BOARD_SIZE], u32) {
    let mut tiles = packed(compact(row));
    let mut gained = 0u32;
    for i in 0..BOARD_SIZE - 1 {
        if tiles[i] != 0 && tiles[i] < MAX_TILE && tiles[i] == tiles[i + 1] {
            tiles[i] *= 2;
            tiles[i + 1] = 0;
            gained = gained.saturating_add(tiles[i]);
        }
    }
    (packed(compact(tiles)), gained)
}

fn transpose(grid: Grid) -> Grid {
    let mut out = [[0; BOARD_SIZE]; BOARD_SIZE];
    for (r, row) in grid.iter().enumerate() {
        for (c, &v) in row.iter().enumerate() {
            out[c][r] = v;
        }
    }
    out
}

fn mirror_rows(mut grid: Grid) -> Grid {
    for row in grid.iter_mut() {
        row.reverse();
    }
    grid
}

/// Pure move: the board after sliding every line toward `direction`, plus the merge points.
pub fn apply_move(board: &Board, direction: Direction) -> (Board, u32) {
    let mut grid = board.cells;
    if direction.is_vertical() {
        grid = transpose(grid);
    }
    if direction.is_mirrored() {
        grid = mirror_rows(grid);
    }

    let mut gained = 0u32;
    for row in grid.iter_mut() {
        let (slid, points) = slide_row_left(*row);
        *row = slid;
        gained = gained.saturating_add(points);
    }

    if direction.is_mirrored() {
        grid = mirror_rows(grid);
    }
    if direction.is_vertical() {
        grid = transpose(grid);
    }
    (Board { cells: grid }, gained)
}

pub fn is_terminal(board: &Board) -> bool {
    board.is_terminal()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Twenty48Snapshot {
    pub board: Board,
    pub score: u32,
    pub game_over: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveReport {
    pub direction: Direction,
    pub changed: bool,
    pub gained: u32,
    pub spawned: Option<Spawned>,
    pub game_over: bool,
}

/// Board state plus score and the tile source that feeds it.
#[derive(Debug, Clone)]
pub struct Twenty48Core<R: TileRng = SeededTiles> {
    board: Board,
    score: u32,
    game_over: bool,
    rng: R,
}

impl<R: TileRng> Twenty48Core<R> {
    /// An empty board with score 0. Call `initialize_game` to place the starting tiles.
    pub fn new(rng: R) -> Self {
        Self {
            board: Board::empty(),
            score: 0,
            game_over: false,
            rng,
        }
    }

    /// Resumes from an existing position.
    pub fn with_board(board: Board, score: u32, rng: R) -> Self {
        Self {
            game_over: board.is_terminal(),
            board,
            score,
            rng,
        }
    }

    pub fn initialize_game(&mut self) {
        self.board = Board::empty();
        self.score = 0;
        for _ in 0..STARTING_TILES {
            self.spawn_tile();
        }
        self.game_over = self.board.is_terminal();
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn max_tile(&self) -> u32 {
        self.board.max_tile()
    }

    pub fn empty_count(&self) -> usize {
        self.board.empty_count()
    }

    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    pub fn snapshot(&self) -> Twenty48Snapshot {
        Twenty48Snapshot {
            board: self.board,
            score: self.score,
            game_over: self.game_over,
        }
    }

    pub fn spawn_tile(&mut self) -> Option<Spawned> {
        spawn_tile(&mut self.board, &mut self.rng)
    }

    /// Slides the board. A move that changes nothing spawns nothing and scores nothing.
    pub fn apply(&mut self, direction: Direction) -> MoveReport {
        let outcome = self.board.shifted(direction);
        if !outcome.changed {
            return MoveReport {
                direction,
                changed: false,
                gained: 0,
                spawned: None,
                game_over: self.game_over,
            };
        }

        self.board = outcome.board;
        self.score = self.score.saturating_add(outcome.gained);
        let spawned = self.spawn_tile();
        self.game_over = self.board.is_terminal();
        debug!(
            "move {direction:?}: +{} (score {}), spawned {spawned:?}",
            outcome.gained, self.score
        );

        MoveReport {
            direction,
            changed: true,
            gained: outcome.gained,
            spawned,
            game_over: self.game_over,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile_rng::ScriptedTiles;
    use rand::{Rng, SeedableRng, rngs::StdRng};

    fn board(grid: Grid) -> Board {
        Board::from_grid(grid).expect("test board should be valid")
    }

    /// A random valid board: each cell empty or 2..=2048.
    fn random_board(rng: &mut StdRng, empty_weight: u32) -> Board {
        let mut grid = [[0; BOARD_SIZE]; BOARD_SIZE];
        for cell in grid.iter_mut().flatten() {
            let roll = rng.gen_range(0..11 + empty_weight);
            *cell = if roll < empty_weight { 0 } else { 1 << (roll - empty_weight + 1) };
        }
        board(grid)
    }

    #[test]
    fn four_equal_tiles_merge_as_two_pairs() {
        assert_eq!(slide_row_left([2, 2, 2, 2]), ([4, 4, 0, 0], 8));
    }

    #[test]
    fn gaps_are_compacted_before_merging() {
        assert_eq!(slide_row_left([0, 2, 0, 2]), ([4, 0, 0, 0], 4));
    }

    #[test]
    fn three_equal_tiles_merge_only_the_leading_pair() {
        assert_eq!(slide_row_left([2, 2, 2, 0]), ([4, 2, 0, 0], 4));
        assert_eq!(slide_row_left([4, 4, 8, 0]), ([8, 8, 0, 0], 8));
    }

    #[test]
    fn locked_row_is_unchanged() {
        assert_eq!(slide_row_left([2, 4, 8, 16]), ([2, 4, 8, 16], 0));
        assert_eq!(slide_row_left([0, 0, 0, 0]), ([0, 0, 0, 0], 0));
    }

    #[test]
    fn slide_right_mirrors_the_row() {
        let b = board([[2, 0, 2, 4], [0; 4], [0; 4], [0; 4]]);
        let (moved, gained) = apply_move(&b, Direction::Right);
        assert_eq!(moved.grid()[0], [0, 0, 4, 4]);
        assert_eq!(gained, 4);
    }

    #[test]
    fn vertical_moves_work_on_columns() {
        let b = board([[2, 0, 0, 0], [2, 0, 0, 0], [4, 0, 0, 0], [0, 0, 0, 8]]);

        let (up, up_gain) = apply_move(&b, Direction::Up);
        assert_eq!(up, board([[4, 0, 0, 8], [4, 0, 0, 0], [0; 4], [0; 4]]));
        assert_eq!(up_gain, 4);

        let (down, down_gain) = apply_move(&b, Direction::Down);
        assert_eq!(down, board([[0; 4], [0; 4], [4, 0, 0, 0], [4, 0, 0, 8]]));
        assert_eq!(down_gain, 4);
    }

    #[test]
    fn score_is_summed_across_rows() {
        let b = board([[2, 2, 0, 0], [4, 4, 0, 0], [8, 8, 8, 8], [0; 4]]);
        let outcome = b.shifted(Direction::Left);
        assert_eq!(outcome.gained, 4 + 8 + 16 + 16);
        assert!(outcome.changed);
    }

    #[test]
    fn move_without_merges_is_idempotent() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let b = random_board(&mut rng, 6);
            for dir in Direction::ALL {
                let once = b.shifted(dir);
                if once.gained != 0 {
                    continue;
                }
                let twice = once.board.shifted(dir);
                assert!(!twice.changed, "{dir:?} not idempotent on\n{b}");
            }
        }
    }

    #[test]
    fn repeated_move_only_changes_the_board_by_merging() {
        let mut rng = StdRng::seed_from_u64(17);
        for _ in 0..500 {
            let b = random_board(&mut rng, 6);
            for dir in Direction::ALL {
                let once = b.shifted(dir).board;
                let twice = once.shifted(dir);
                // Tiles are already packed, so any change must come from a merge.
                assert_eq!(twice.changed, twice.gained > 0, "{dir:?} on\n{b}");
                assert!(twice.board.empty_count() >= once.empty_count());
            }
        }
    }

    #[test]
    fn pair_made_by_a_merge_merges_on_the_next_move() {
        let (first, first_gain) = slide_row_left([4, 4, 8, 0]);
        assert_eq!((first, first_gain), ([8, 8, 0, 0], 8));

        let (second, second_gain) = slide_row_left(first);
        assert_eq!((second, second_gain), ([16, 0, 0, 0], 16));
    }

    #[test]
    fn sliding_preserves_total_and_width() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..500 {
            let b = random_board(&mut rng, 6);
            let row = b.grid()[0];
            let (slid, gained) = slide_row_left(row);
            assert_eq!(slid.len(), BOARD_SIZE);
            // Every merge doubles one tile and removes its partner, so the sum is preserved
            // and the points equal the value of the merged tiles.
            assert_eq!(row.iter().sum::<u32>(), slid.iter().sum::<u32>());
            let tiles_before = row.iter().filter(|&&v| v != 0).count();
            let tiles_after = slid.iter().filter(|&&v| v != 0).count();
            let merges = tiles_before - tiles_after;
            assert!(gained as usize >= merges * 4 || merges == 0);
            // Nonzero tiles are packed to the left.
            assert!(slid.windows(2).all(|w| w[0] != 0 || w[1] == 0));
        }
    }

    #[test]
    fn terminal_iff_no_direction_changes_the_board() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut terminal_seen = 0;
        for _ in 0..5_000 {
            let b = random_board(&mut rng, 0);
            let stuck = Direction::ALL.iter().all(|&d| !b.can_move(d));
            assert_eq!(b.is_terminal(), stuck, "disagreement on\n{b}");
            terminal_seen += usize::from(stuck);
        }
        assert!(terminal_seen > 0, "sweep should include terminal boards");
    }

    #[test]
    fn full_board_without_pairs_is_terminal() {
        let locked = board([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]]);
        assert!(locked.is_terminal());
        assert!(is_terminal(&locked));

        let horizontal_pair = board([[2, 2, 8, 4], [4, 8, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]]);
        assert!(!horizontal_pair.is_terminal());

        let vertical_pair = board([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 4]]);
        assert!(!vertical_pair.is_terminal());
    }

    #[test]
    fn board_with_an_empty_cell_is_not_terminal() {
        let b = board([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 0]]);
        assert!(!b.is_terminal());
    }

    #[test]
    fn invalid_boards_are_rejected() {
        assert_eq!(
            Board::from_grid([[3, 0, 0, 0], [0; 4], [0; 4], [0; 4]]),
            Err(BoardError::InvalidTile { row: 0, col: 0, value: 3 })
        );
        assert_eq!(
            Board::from_grid([[0; 4], [0; 4], [0; 4], [0, 0, 0, 1]]),
            Err(BoardError::InvalidTile { row: 3, col: 3, value: 1 })
        );
        assert_eq!(
            Board::from_rows(&[vec![0; 4], vec![0; 4], vec![0; 4]]),
            Err(BoardError::WrongRowCount { found: 3 })
        );
        assert_eq!(
            Board::from_rows(&[vec![0; 4], vec![0; 5], vec![0; 4], vec![0; 4]]),
            Err(BoardError::WrongRowLength { row: 1, found: 5 })
        );
    }

    #[test]
    fn tiles_above_the_largest_reachable_value_are_rejected() {
        assert!(Board::from_grid([[MAX_TILE, 0, 0, 0], [0; 4], [0; 4], [0; 4]]).is_ok());
        assert_eq!(
            Board::from_grid([[MAX_TILE * 2, 0, 0, 0], [0; 4], [0; 4], [0; 4]]),
            Err(BoardError::InvalidTile { row: 0, col: 0, value: MAX_TILE * 2 })
        );
        assert_eq!(
            Board::from_grid([[1 << 31, 1 << 31, 0, 0], [0; 4], [0; 4], [0; 4]]),
            Err(BoardError::InvalidTile { row: 0, col: 0, value: 1 << 31 })
        );
    }

    #[test]
    fn largest_tiles_do_not_merge_past_the_limit() {
        assert_eq!(slide_row_left([MAX_TILE, MAX_TILE, 0, 0]), ([MAX_TILE, MAX_TILE, 0, 0], 0));
        assert_eq!(slide_row_left([0, MAX_TILE, 0, MAX_TILE]), ([MAX_TILE, MAX_TILE, 0, 0], 0));
        assert_eq!(slide_row_left([MAX_TILE / 2, MAX_TILE / 2, 0, 0]), ([MAX_TILE, 0, 0, 0], MAX_TILE));

        let b = board([[MAX_TILE, MAX_TILE, 0, 0], [0; 4], [0; 4], [0; 4]]);
        let outcome = b.shifted(Direction::Left);
        assert!(!outcome.changed);
        assert_eq!(outcome.gained, 0);
        assert!(outcome.board.grid().iter().flatten().all(|&v| is_valid_tile(v)));
    }

    #[test]
    fn full_board_whose_only_pair_is_at_the_limit_is_terminal() {
        let b = board([
            [MAX_TILE, MAX_TILE, 2, 4],
            [4, 2, 4, 2],
            [2, 4, 2, 4],
            [4, 2, 4, 2],
        ]);
        assert!(b.is_terminal());
        assert!(Direction::ALL.iter().all(|&d| !b.can_move(d)));
    }

    #[test]
    fn board_serde_validates_tiles() {
        let b = board([[2, 0, 0, 0], [0; 4], [0; 4], [0, 0, 0, 2048]]);
        let json = serde_json::to_string(&b).unwrap();
        assert_eq!(json, "[[2,0,0,0],[0,0,0,0],[0,0,0,0],[0,0,0,2048]]");
        assert_eq!(serde_json::from_str::<Board>(&json).unwrap(), b);

        assert!(serde_json::from_str::<Board>("[[6,0,0,0],[0,0,0,0],[0,0,0,0],[0,0,0,0]]").is_err());
        assert!(serde_json::from_str::<Board>("[[0,0,0,0]]").is_err());
    }

    #[test]
    fn initialize_game_places_two_tiles() {
        let mut core = Twenty48Core::new(SeededTiles::from_seed(1));
        core.initialize_game();
        assert_eq!(core.empty_count(), BOARD_SIZE * BOARD_SIZE - STARTING_TILES);
        assert_eq!(core.score(), 0);
        assert!(!core.is_game_over());
        assert!(core.board().grid().iter().flatten().all(|&v| matches!(v, 0 | 2 | 4)));
    }

    #[test]
    fn noop_move_neither_spawns_nor_scores() {
        let b = board([[2, 4, 0, 0], [0; 4], [0; 4], [0; 4]]);
        let mut core = Twenty48Core::with_board(b, 10, ScriptedTiles::default());

        let report = core.apply(Direction::Left);
        assert!(!report.changed);
        assert_eq!(report.spawned, None);
        assert_eq!(core.board(), &b);
        assert_eq!(core.score(), 10);
    }

    #[test]
    fn changing_move_scores_and_spawns_one_tile() {
        let b = board([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]);
        // Empty cells after the move, row-major: (0,1) is index 0.
        let mut core = Twenty48Core::with_board(b, 0, ScriptedTiles::new([0], [true]));

        let report = core.apply(Direction::Left);
        assert!(report.changed);
        assert_eq!(report.gained, 4);
        assert_eq!(core.score(), 4);
        assert_eq!(core.board().grid()[0], [4, 4, 0, 0]);
        assert_eq!(
            report.spawned,
            Some(Spawned { row: 0, col: 1, value: 4 })
        );
    }

    #[test]
    fn move_that_fills_the_last_gap_can_end_the_game() {
        let b = board([[2, 4, 2, 0], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]]);
        let mut core = Twenty48Core::with_board(b, 0, ScriptedTiles::new([0], [false]));

        let report = core.apply(Direction::Right);
        assert!(report.changed);
        assert_eq!(core.board().grid()[0], [2, 2, 4, 2]);
        assert!(!report.game_over, "the new 2 pairs with its neighbour");

        let b = board([[4, 2, 4, 0], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]]);
        let mut core = Twenty48Core::with_board(b, 0, ScriptedTiles::new([0], [false]));
        let report = core.apply(Direction::Right);
        assert_eq!(core.board().grid()[0], [2, 4, 2, 4]);
        assert!(report.game_over);
        assert!(core.is_game_over());
    }

    #[test]
    fn display_renders_one_line_per_row() {
        let b = board([[2, 0, 0, 0], [0; 4], [0; 4], [0, 0, 0, 1024]]);
        let text = b.to_string();
        assert_eq!(text.lines().count(), BOARD_SIZE);
        assert!(text.lines().next().unwrap().trim_start().starts_with('2'));
        assert!(text.lines().last().unwrap().ends_with("1024"));
    }
}
