//! Board state and the flip algorithm.

use tracing::{debug, trace};

use crate::error::{IllegalMoveError, MoveRejection};
use crate::layout::Layout;
use crate::types::{Cell, Color, Pos, StoneCounts};

/// The eight compass directions as `(dx, dy)` steps, in the canonical order
/// used for flip sequencing: NW, N, NE, W, E, SW, S, SE.
const DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// One capturable run of opposing stones: the positions walked outward from
/// the placement cell, in order, up to (not including) the first same-color
/// stone.
pub type Ray = Vec<Pos>;

/// The rays captured by one placement, in canonical direction order.
///
/// Ephemeral: computed fresh per query and owned by the caller, never stored
/// on the board. The ordering only matters to consumers that sequence flip
/// animations; the engine itself relies on it for nothing but determinism.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlipSet {
    rays: Vec<Ray>,
}

impl FlipSet {
    fn push(&mut self, ray: Ray) {
        if !ray.is_empty() {
            self.rays.push(ray);
        }
    }

    /// True when no direction yields a capture.
    pub fn is_empty(&self) -> bool {
        self.rays.is_empty()
    }

    /// The captured rays, one per capturing direction.
    pub fn rays(&self) -> &[Ray] {
        &self.rays
    }

    /// Total number of captured positions across all rays.
    pub fn flipped_count(&self) -> usize {
        self.rays.iter().map(Vec::len).sum()
    }

    /// Iterates over every captured position, ray by ray.
    pub fn positions(&self) -> impl Iterator<Item = Pos> + '_ {
        self.rays.iter().flatten().copied()
    }
}

/// Square Othello board.
///
/// The single source of truth for placement legality and flip computation.
/// Cells mutate only through [`Board::place_stone`] and [`Board::reset`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Creates a board from a validated layout.
    pub fn new(layout: &Layout) -> Self {
        Self {
            size: layout.size(),
            cells: layout.cells().to_vec(),
        }
    }

    /// Replaces the whole board state with the given layout.
    pub fn reset(&mut self, layout: &Layout) {
        debug!(size = layout.size(), "resetting board");
        self.size = layout.size();
        self.cells = layout.cells().to_vec();
    }

    /// Board side length.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the cell at `pos`, or `None` out of bounds.
    pub fn get(&self, pos: Pos) -> Option<Cell> {
        self.index(pos).map(|i| self.cells[i])
    }

    fn index(&self, pos: Pos) -> Option<usize> {
        (pos.x < self.size && pos.y < self.size).then(|| pos.y * self.size + pos.x)
    }

    /// Computes the rays `color` would capture by placing at `pos`.
    ///
    /// Empty when `pos` is occupied, out of bounds, or no direction ends a
    /// run of opposing stones with a same-color stone. `pos` is placeable
    /// for `color` iff the result is non-empty.
    pub fn legal_flips(&self, pos: Pos, color: Color) -> FlipSet {
        let mut flips = FlipSet::default();
        match self.get(pos) {
            Some(Cell::Empty) => {}
            _ => return flips,
        }

        for dir in DIRECTIONS {
            flips.push(self.ray_from(pos, dir, color));
        }
        flips
    }

    /// Walks outward from `pos` along `(dx, dy)`, collecting opposing stones.
    /// The run is capturable only if it is terminated by a same-color stone;
    /// reaching an empty cell or the edge discards it.
    fn ray_from(&self, pos: Pos, (dx, dy): (i32, i32), color: Color) -> Ray {
        let mut run = Ray::new();
        let mut x = pos.x as i32;
        let mut y = pos.y as i32;

        loop {
            x += dx;
            y += dy;
            if x < 0 || y < 0 || x >= self.size as i32 || y >= self.size as i32 {
                return Ray::new();
            }
            let here = Pos::new(x as usize, y as usize);
            match self.cells[here.y * self.size + here.x] {
                Cell::Empty => return Ray::new(),
                Cell::Stone(c) if c == color => return run,
                Cell::Stone(_) => run.push(here),
            }
        }
    }

    /// Places a stone for `color` at `pos` and flips every captured ray.
    ///
    /// Returns the applied [`FlipSet`] so callers can animate exactly those
    /// cells. On failure nothing is mutated.
    pub fn place_stone(&mut self, pos: Pos, color: Color) -> Result<FlipSet, IllegalMoveError> {
        let flips = self.legal_flips(pos, color);
        if flips.is_empty() {
            let reason = match self.get(pos) {
                None => MoveRejection::OutOfBounds,
                Some(Cell::Stone(_)) => MoveRejection::Occupied,
                Some(Cell::Empty) => MoveRejection::NoCapture,
            };
            return Err(IllegalMoveError { pos, color, reason });
        }

        let idx = self.index(pos).expect("legal move is in bounds");
        self.cells[idx] = Cell::Stone(color);
        for flipped in flips.positions() {
            self.cells[flipped.y * self.size + flipped.x] = Cell::Stone(color);
        }

        trace!(%pos, %color, flipped = flips.flipped_count(), "placed stone");
        Ok(flips)
    }

    /// True iff at least one empty cell is placeable for `color`.
    ///
    /// Full-board rescan; fine for the board sizes in use (≤ ~12x12).
    pub fn has_legal_move(&self, color: Color) -> bool {
        self.positions()
            .any(|pos| !self.legal_flips(pos, color).is_empty())
    }

    /// Every placeable position for `color`, in row-major order.
    pub fn legal_positions(&self, color: Color) -> Vec<Pos> {
        self.positions()
            .filter(|&pos| !self.legal_flips(pos, color).is_empty())
            .collect()
    }

    /// Counts the stones of each color.
    pub fn stone_counts(&self) -> StoneCounts {
        let mut counts = StoneCounts::default();
        for cell in &self.cells {
            match cell {
                Cell::Stone(Color::Black) => counts.black += 1,
                Cell::Stone(Color::White) => counts.white += 1,
                Cell::Empty => {}
            }
        }
        counts
    }

    /// True iff no cell is empty.
    pub fn all_filled(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_empty())
    }

    /// True iff some color has zero stones left. A wipeout ends the game
    /// even while empty cells remain.
    pub fn any_color_wiped_out(&self) -> bool {
        let counts = self.stone_counts();
        counts.black == 0 || counts.white == 0
    }

    fn positions(&self) -> impl Iterator<Item = Pos> + '_ {
        let size = self.size;
        (0..size).flat_map(move |y| (0..size).map(move |x| Pos::new(x, y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standard_board() -> Board {
        Board::new(&Layout::standard(8).unwrap())
    }

    #[test]
    fn initial_black_legal_moves_are_four_expected_cells() {
        let board = standard_board();
        let expected = vec![
            Pos::new(2, 3),
            Pos::new(5, 4),
            Pos::new(3, 2),
            Pos::new(4, 5),
        ];
        let mut legal = board.legal_positions(Color::Black);
        legal.sort_by_key(|p| (p.y, p.x));
        let mut want = expected;
        want.sort_by_key(|p| (p.y, p.x));
        assert_eq!(legal, want);
        assert!(board.has_legal_move(Color::Black));
    }

    #[test]
    fn opening_move_flips_one_white_stone() {
        let mut board = standard_board();

        let flips = board.place_stone(Pos::new(2, 3), Color::Black).unwrap();

        assert_eq!(flips.rays(), &[vec![Pos::new(3, 3)]]);
        assert_eq!(flips.flipped_count(), 1);
        let counts = board.stone_counts();
        assert_eq!((counts.black, counts.white), (4, 1));
    }

    #[test]
    fn rejected_placements_carry_the_right_reason() {
        let mut board = standard_board();

        let occupied = board.place_stone(Pos::new(3, 3), Color::Black).unwrap_err();
        assert_eq!(occupied.reason, MoveRejection::Occupied);

        let outside = board.place_stone(Pos::new(8, 0), Color::Black).unwrap_err();
        assert_eq!(outside.reason, MoveRejection::OutOfBounds);

        let barren = board.place_stone(Pos::new(0, 0), Color::Black).unwrap_err();
        assert_eq!(barren.reason, MoveRejection::NoCapture);
    }

    #[test]
    fn failed_placement_leaves_board_unchanged() {
        let mut board = standard_board();
        let before = board.clone();

        board.place_stone(Pos::new(0, 0), Color::Black).unwrap_err();

        assert_eq!(board, before);
    }

    #[test]
    fn rays_walk_multiple_stones_in_one_direction() {
        // Row 0 is `. B W W W .`; placing at (5,0) walks west over three
        // whites before reaching the black stone at (1,0).
        let layout = Layout::from_grid(&[
            vec![0, 1, 2, 2, 2, 0],
            vec![0; 6],
            vec![0; 6],
            vec![0; 6],
            vec![0; 6],
            vec![0; 6],
        ])
        .unwrap();
        let board = Board::new(&layout);

        let flips = board.legal_flips(Pos::new(5, 0), Color::Black);
        assert_eq!(
            flips.rays(),
            &[vec![Pos::new(4, 0), Pos::new(3, 0), Pos::new(2, 0)]]
        );
    }
}
