//! Go rules engine: 19x19 grid, captures and suicide rejection
//!
//! # Move resolution
//!
//! `place_stone` works on a tentative copy of the position:
//! 1. reject occupied or off-board cells outright
//! 2. snapshot the board, place the stone, hand the turn over
//! 3. for each orthogonal neighbour (west, north, east, south) holding an
//!    opposing stone, flood its group; a group with no liberties is removed
//! 4. flood the new stone's own group; with no liberties left (captures
//!    already resolved) the snapshot is restored, turn flag included
//!
//! # Liberties
//!
//! A group is flooded with an explicit stack and a visited grid, so a large
//! single-colour blob on a nearly full board cannot blow the call stack, and
//! each stone and each liberty is counted exactly once.

use std::fmt;

pub const BOARD_SIZE: usize = 19;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stone {
    Black,
    White,
}

impl Stone {
    pub fn opponent(self) -> Stone {
        match self {
            Stone::Black => Stone::White,
            Stone::White => Stone::Black,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub x: usize,
    pub y: usize,
}

impl Cell {
    pub fn new(x: usize, y: usize) -> Self {
        Cell { x, y }
    }

    /// Whether the cell lies on the 19x19 grid. `Cell::new` does not check.
    pub fn is_on_board(self) -> bool {
        self.x < BOARD_SIZE && self.y < BOARD_SIZE
    }

    /// Bounds-checked conversion from signed coordinates.
    pub fn checked(x: i32, y: i32) -> Option<Cell> {
        let in_range = |v: i32| v >= 0 && (v as usize) < BOARD_SIZE;
        if in_range(x) && in_range(y) {
            Some(Cell::new(x as usize, y as usize))
        } else {
            None
        }
    }

    /// Orthogonal neighbours in west, north, east, south order, on-board only.
    pub fn neighbors(self) -> impl Iterator<Item = Cell> {
        let Cell { x, y } = self;
        [
            (x > 0).then(|| Cell::new(x - 1, y)),
            (y > 0).then(|| Cell::new(x, y - 1)),
            (x + 1 < BOARD_SIZE).then(|| Cell::new(x + 1, y)),
            (y + 1 < BOARD_SIZE).then(|| Cell::new(x, y + 1)),
        ]
        .into_iter()
        .flatten()
    }
}

/// A maximal set of connected same-coloured stones and its liberties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub color: Stone,
    pub stones: Vec<Cell>,
    pub liberties: Vec<Cell>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Stone placed; `captured` lists every opposing stone removed.
    Placed { captured: Vec<Cell> },
    Occupied,
    OutOfBounds,
    /// Would have left its own group without liberties; board untouched.
    Suicide,
}

impl MoveOutcome {
    pub fn is_legal(&self) -> bool {
        matches!(self, MoveOutcome::Placed { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    grid: [[Option<Stone>; BOARD_SIZE]; BOARD_SIZE],
    black_to_move: bool,
}

impl Board {
    pub fn new() -> Self {
        Board {
            grid: [[None; BOARD_SIZE]; BOARD_SIZE],
            black_to_move: true,
        }
    }

    pub fn black_to_move(&self) -> bool {
        self.black_to_move
    }

    pub fn to_move(&self) -> Stone {
        if self.black_to_move {
            Stone::Black
        } else {
            Stone::White
        }
    }

    /// Stone at `(x, y)`; off-board coordinates read as empty.
    pub fn get(&self, x: i32, y: i32) -> Option<Stone> {
        Cell::checked(x, y).and_then(|cell| self.stone_at(cell))
    }

    /// Off-board cells read as empty.
    pub fn stone_at(&self, cell: Cell) -> Option<Stone> {
        if !cell.is_on_board() {
            return None;
        }
        self.grid[cell.x][cell.y]
    }

    /// Write a cell directly, bypassing the rules. For setting up positions.
    /// Writes to off-board cells are ignored.
    pub fn set(&mut self, cell: Cell, stone: Option<Stone>) {
        if cell.is_on_board() {
            self.grid[cell.x][cell.y] = stone;
        }
    }

    pub fn set_black_to_move(&mut self, black: bool) {
        self.black_to_move = black;
    }

    pub fn stone_count(&self) -> usize {
        self.grid.iter().flatten().filter(|c| c.is_some()).count()
    }

    /// Flood the group containing `cell`. `None` when the cell is empty or
    /// off the board.
    pub fn group(&self, cell: Cell) -> Option<Group> {
        let color = self.stone_at(cell)?;

        let mut in_group = [[false; BOARD_SIZE]; BOARD_SIZE];
        let mut is_liberty = [[false; BOARD_SIZE]; BOARD_SIZE];
        let mut stones = Vec::new();
        let mut liberties = Vec::new();
        let mut stack = vec![cell];
        in_group[cell.x][cell.y] = true;

        while let Some(current) = stack.pop() {
            stones.push(current);
            for next in current.neighbors() {
                match self.stone_at(next) {
                    None => {
                        if !is_liberty[next.x][next.y] {
                            is_liberty[next.x][next.y] = true;
                            liberties.push(next);
                        }
                    }
                    Some(stone) if stone == color => {
                        if !in_group[next.x][next.y] {
                            in_group[next.x][next.y] = true;
                            stack.push(next);
                        }
                    }
                    Some(_) => {}
                }
            }
        }

        Some(Group {
            color,
            stones,
            liberties,
        })
    }

    /// Play the side to move at `(x, y)`.
    pub fn place_stone(&mut self, x: i32, y: i32) -> MoveOutcome {
        let Some(cell) = Cell::checked(x, y) else {
            return MoveOutcome::OutOfBounds;
        };
        if self.stone_at(cell).is_some() {
            return MoveOutcome::Occupied;
        }

        let color = self.to_move();
        let snapshot = self.clone();
        self.set(cell, Some(color));
        self.black_to_move = !self.black_to_move;

        let mut captured = Vec::new();
        for neighbor in cell.neighbors() {
            if self.stone_at(neighbor) != Some(color.opponent()) {
                continue;
            }
            if let Some(group) = self.group(neighbor) {
                if group.liberties.is_empty() {
                    for stone in group.stones {
                        self.set(stone, None);
                        captured.push(stone);
                    }
                }
            }
        }

        let own_liberties = self
            .group(cell)
            .map(|group| group.liberties.len())
            .unwrap_or(0);
        if own_liberties == 0 {
            *self = snapshot;
            return MoveOutcome::Suicide;
        }

        MoveOutcome::Placed { captured }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for y in 0..BOARD_SIZE {
            for x in 0..BOARD_SIZE {
                let c = match self.grid[x][y] {
                    None => '.',
                    Some(Stone::Black) => 'X',
                    Some(Stone::White) => 'O',
                };
                write!(f, "{}", c)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(mut cells: Vec<Cell>) -> Vec<Cell> {
        cells.sort();
        cells
    }

    #[test]
    fn test_first_move_is_black() {
        let mut board = Board::new();
        assert!(board.place_stone(3, 3).is_legal());
        assert_eq!(board.get(3, 3), Some(Stone::Black));
        assert!(!board.black_to_move());
    }

    #[test]
    fn test_occupied_cell_is_rejected() {
        let mut board = Board::new();
        board.place_stone(3, 3);
        let before = board.clone();

        assert_eq!(board.place_stone(3, 3), MoveOutcome::Occupied);
        assert_eq!(board, before);
    }

    #[test]
    fn test_out_of_bounds_is_rejected() {
        let mut board = Board::new();
        assert_eq!(board.place_stone(-1, 0), MoveOutcome::OutOfBounds);
        assert_eq!(board.place_stone(0, 19), MoveOutcome::OutOfBounds);
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_corner_capture() {
        let mut board = Board::new();
        board.place_stone(1, 0); // black
        board.place_stone(0, 0); // white
        let outcome = board.place_stone(0, 1); // black completes the surround

        assert_eq!(
            outcome,
            MoveOutcome::Placed {
                captured: vec![Cell::new(0, 0)]
            }
        );
        assert_eq!(board.get(0, 0), None);
        assert_eq!(board.stone_count(), 2);
    }

    #[test]
    fn test_suicide_is_rolled_back() {
        let mut board = Board::new();
        board.set(Cell::new(1, 0), Some(Stone::White));
        board.set(Cell::new(0, 1), Some(Stone::White));
        let before = board.clone();

        assert_eq!(board.place_stone(0, 0), MoveOutcome::Suicide);
        assert_eq!(board, before);
        assert!(board.black_to_move());
    }

    #[test]
    fn test_capture_resolves_before_suicide_check() {
        let mut board = Board::new();
        board.set(Cell::new(1, 0), Some(Stone::White));
        board.set(Cell::new(0, 1), Some(Stone::White));
        board.set(Cell::new(2, 0), Some(Stone::Black));
        board.set(Cell::new(1, 1), Some(Stone::Black));

        let outcome = board.place_stone(0, 0);

        assert_eq!(
            outcome,
            MoveOutcome::Placed {
                captured: vec![Cell::new(1, 0)]
            }
        );
        assert_eq!(board.get(0, 0), Some(Stone::Black));
        assert_eq!(board.get(0, 1), Some(Stone::White));
    }

    #[test]
    fn test_multiple_groups_captured_at_once() {
        // Two separate white stones each left with a single liberty at (1,1)
        let mut board = Board::new();
        for (x, y, stone) in [
            (1, 0, Stone::White),
            (0, 1, Stone::White),
            (0, 0, Stone::Black),
            (2, 0, Stone::Black),
            (0, 2, Stone::Black),
        ] {
            board.set(Cell::new(x, y), Some(stone));
        }
        // (0,0) has no liberties of its own until the captures free it
        let outcome = board.place_stone(1, 1);
        match outcome {
            MoveOutcome::Placed { captured } => {
                assert_eq!(sorted(captured), vec![Cell::new(0, 1), Cell::new(1, 0)]);
            }
            other => panic!("expected placement, got {:?}", other),
        }
    }

    #[test]
    fn test_two_stone_group_captured_whole() {
        let mut board = Board::new();
        for (x, y) in [(4, 5), (5, 4), (6, 4), (7, 5), (5, 6)] {
            board.set(Cell::new(x, y), Some(Stone::Black));
        }
        board.set(Cell::new(5, 5), Some(Stone::White));
        board.set(Cell::new(6, 5), Some(Stone::White));

        let outcome = board.place_stone(6, 6);

        match outcome {
            MoveOutcome::Placed { captured } => {
                assert_eq!(sorted(captured), vec![Cell::new(5, 5), Cell::new(6, 5)]);
            }
            other => panic!("expected placement, got {:?}", other),
        }
        assert_eq!(board.get(5, 5), None);
        assert_eq!(board.get(6, 5), None);
        assert_eq!(board.get(6, 6), Some(Stone::Black));
        assert_eq!(board.stone_count(), 6);
    }

    #[test]
    fn test_off_board_cells_are_skipped() {
        let mut board = Board::new();
        board.place_stone(0, 0);

        assert_eq!(board.stone_at(Cell::new(19, 0)), None);
        assert_eq!(board.stone_at(Cell::new(0, usize::MAX)), None);
        assert!(board.group(Cell::new(0, 19)).is_none());

        let before = board.clone();
        board.set(Cell::new(19, 19), Some(Stone::White));
        assert_eq!(board, before);
        assert!(Cell::new(18, 18).is_on_board());
        assert!(!Cell::new(18, 19).is_on_board());
    }

    #[test]
    fn test_group_liberties_are_deduplicated() {
        let mut board = Board::new();
        board.set(Cell::new(5, 5), Some(Stone::Black));
        board.set(Cell::new(6, 5), Some(Stone::Black));
        board.set(Cell::new(5, 6), Some(Stone::Black));
        board.set(Cell::new(6, 6), Some(Stone::Black));

        let group = board.group(Cell::new(5, 5)).unwrap();
        assert_eq!(group.stones.len(), 4);
        // A 2x2 block has 8 distinct liberties
        assert_eq!(group.liberties.len(), 8);
    }

    #[test]
    fn test_group_of_empty_cell_is_none() {
        assert!(Board::new().group(Cell::new(9, 9)).is_none());
    }

    #[test]
    fn test_neighbors_at_corner() {
        let around: Vec<Cell> = Cell::new(0, 0).neighbors().collect();
        assert_eq!(around, vec![Cell::new(1, 0), Cell::new(0, 1)]);

        let around: Vec<Cell> = Cell::new(18, 18).neighbors().collect();
        assert_eq!(around, vec![Cell::new(17, 18), Cell::new(18, 17)]);
    }

    #[test]
    fn test_full_board_group_does_not_overflow() {
        let mut board = Board::new();
        for x in 0..BOARD_SIZE {
            for y in 0..BOARD_SIZE {
                board.set(Cell::new(x, y), Some(Stone::Black));
            }
        }
        board.set(Cell::new(9, 9), None);

        let group = board.group(Cell::new(0, 0)).unwrap();
        assert_eq!(group.stones.len(), BOARD_SIZE * BOARD_SIZE - 1);
        assert_eq!(group.liberties, vec![Cell::new(9, 9)]);
    }
}
