//! Board module - manages the game grid
//!
//! The board is a `columns x rows` grid where each cell is empty or holds the
//! color of a locked piece. Storage is a flat row-major vector sized once at
//! construction; no operation ever changes the dimensions.
//!
//! Coordinates: (x, y) where x grows left to right from 0 and y grows top to
//! bottom from 0. The region above the grid (`y < 0`) is always free, so pieces
//! may spawn and rotate partially above the visible rows.

use crate::error::EngineError;
use crate::piece::Piece;
use crate::types::Cell;

/// The game board using flat array storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    columns: u16,
    rows: u16,
    /// Flat array of cells, row-major order (y * columns + x)
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board
    pub fn new(columns: u16, rows: u16) -> Self {
        Self {
            columns,
            rows,
            cells: vec![None; columns as usize * rows as usize],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i16, y: i16) -> Option<usize> {
        if x < 0 || x >= self.columns as i16 || y < 0 || y >= self.rows as i16 {
            return None;
        }
        Some((y as usize) * (self.columns as usize) + (x as usize))
    }

    pub fn columns(&self) -> u16 {
        self.columns
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i16, y: i16) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i16, y: i16, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Occupancy of `(x, y)`.
    ///
    /// Rows above the grid are always free. Any other coordinate outside the
    /// grid is a caller defect.
    pub fn is_occupied(&self, x: i16, y: i16) -> Result<bool, EngineError> {
        if y < 0 {
            return Ok(false);
        }
        self.get(x, y)
            .map(|cell| cell.is_some())
            .ok_or(EngineError::OutOfBoundsAccess { x, y })
    }

    /// Whether `piece` sits on or below the floor, or overlaps a locked cell.
    ///
    /// Probing the current position after a gravity step detects landing;
    /// probing a translated copy validates a hypothetical move. Cells above the
    /// grid never collide.
    pub fn collides(&self, piece: &Piece) -> Result<bool, EngineError> {
        for (x, y) in piece.cells() {
            if y < 0 {
                continue;
            }
            if y >= self.rows as i16 || self.is_occupied(x, y)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Whether a rotated candidate fits: inside the side walls, above the floor,
    /// and clear of locked cells. Rows above the grid are allowed.
    pub fn can_rotate(&self, candidate: &Piece) -> bool {
        candidate.cells().all(|(x, y)| {
            if x < 0 || x >= self.columns as i16 || y >= self.rows as i16 {
                return false;
            }
            y < 0 || matches!(self.get(x, y), Some(None))
        })
    }

    /// Lock `piece` into the grid one row above its anchor.
    ///
    /// Collision fires once the piece has moved one row past its last legal
    /// position, so every filled cell is committed at `(x + dx, y + dy - 1)`.
    /// Nothing is written if any target falls outside the grid.
    pub fn merge(&mut self, piece: &Piece) -> Result<(), EngineError> {
        // First check all targets are inside the grid
        for (x, y) in piece.cells() {
            if self.index(x, y - 1).is_none() {
                return Err(EngineError::OutOfBoundsAccess { x, y: y - 1 });
            }
        }

        for (x, y) in piece.cells() {
            self.set(x, y - 1, Some(piece.color));
        }
        Ok(())
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= self.rows as usize {
            return false;
        }
        self.row(y).iter().all(|cell| cell.is_some())
    }

    /// Cells of row `y`, left to right. Panics if `y` is not a board row.
    pub fn row(&self, y: usize) -> &[Cell] {
        let width = self.columns as usize;
        let start = y * width;
        &self.cells[start..start + width]
    }

    /// Remove every full row, shifting the rows above down and inserting empty
    /// rows at the top. Returns the number of rows removed.
    ///
    /// Uses a two-pointer pass from the bottom up, so it never allocates.
    pub fn clear_completed_rows(&mut self) -> usize {
        let width = self.columns as usize;
        let mut cleared = 0;
        let mut write_y = self.rows as usize;

        for read_y in (0..self.rows as usize).rev() {
            if self.is_row_full(read_y) {
                cleared += 1;
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src_start = read_y * width;
                    self.cells
                        .copy_within(src_start..src_start + width, write_y * width);
                }
            }
        }

        self.cells[..write_y * width].fill(None);
        cleared
    }

    /// Whether a just-spawned piece cannot be placed: any filled cell above the
    /// grid, below the floor, outside the side walls, or on a locked cell.
    pub fn is_game_over(&self, piece: &Piece) -> bool {
        piece
            .cells()
            .any(|(x, y)| y < 0 || !matches!(self.get(x, y), Some(None)))
    }

    /// Clear the entire board
    pub fn reset(&mut self) {
        self.cells.fill(None);
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of occupied cells.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Color, ShapeKind};

    const RED: Color = Color::new(255, 0, 0);

    fn piece(kind: ShapeKind, x: i16, y: i16) -> Piece {
        let mut p = Piece::spawn(kind, RED, 10);
        p.x = x;
        p.y = y;
        p
    }

    fn fill_row(board: &mut Board, y: i16) {
        for x in 0..board.columns() as i16 {
            board.set(x, y, Some(RED));
        }
    }

    #[test]
    fn test_board_index_calculation() {
        let board = Board::new(10, 20);
        assert_eq!(board.index(0, 0), Some(0));
        assert_eq!(board.index(9, 0), Some(9));
        assert_eq!(board.index(0, 1), Some(10));
        assert_eq!(board.index(9, 19), Some(199));
        assert_eq!(board.index(-1, 0), None);
        assert_eq!(board.index(10, 0), None);
        assert_eq!(board.index(0, 20), None);
    }

    #[test]
    fn test_is_occupied_bounds() {
        let mut board = Board::new(10, 20);
        board.set(3, 4, Some(RED));

        assert!(board.is_occupied(3, 4).unwrap());
        assert!(!board.is_occupied(4, 4).unwrap());
        assert!(!board.is_occupied(3, -1).unwrap());
        assert!(!board.is_occupied(42, -5).unwrap());

        assert!(matches!(
            board.is_occupied(10, 0),
            Err(EngineError::OutOfBoundsAccess { x: 10, y: 0 })
        ));
        assert!(board.is_occupied(-1, 0).is_err());
        assert!(board.is_occupied(0, 20).is_err());
    }

    #[test]
    fn test_collides_with_floor() {
        let board = Board::new(10, 20);
        assert!(!board.collides(&piece(ShapeKind::I, 4, 19)).unwrap());
        assert!(board.collides(&piece(ShapeKind::I, 4, 20)).unwrap());

        // T is two rows tall: row 18 is the lowest legal anchor.
        assert!(!board.collides(&piece(ShapeKind::T, 4, 18)).unwrap());
        assert!(board.collides(&piece(ShapeKind::T, 4, 19)).unwrap());
    }

    #[test]
    fn test_collides_with_locked_cell() {
        let mut board = Board::new(10, 20);
        board.set(5, 10, Some(RED));
        assert!(board.collides(&piece(ShapeKind::O, 4, 9)).unwrap());
        assert!(board.collides(&piece(ShapeKind::O, 5, 10)).unwrap());
        assert!(!board.collides(&piece(ShapeKind::O, 6, 10)).unwrap());
    }

    #[test]
    fn test_collides_ignores_cells_above_grid() {
        let mut board = Board::new(10, 20);
        fill_row(&mut board, 0);
        // O at y = -2 occupies rows -2 and -1 only.
        assert!(!board.collides(&piece(ShapeKind::O, 4, -2)).unwrap());
        assert!(board.collides(&piece(ShapeKind::O, 4, -1)).unwrap());
    }

    #[test]
    fn test_collides_reports_side_wall_access() {
        let board = Board::new(10, 20);
        assert!(matches!(
            board.collides(&piece(ShapeKind::I, 8, 5)),
            Err(EngineError::OutOfBoundsAccess { x: 10, y: 5 })
        ));
    }

    #[test]
    fn test_can_rotate_walls_and_floor() {
        let board = Board::new(10, 20);
        let vertical_i = |x, y| {
            let p = piece(ShapeKind::I, x, y);
            p.with_mask(p.rotate())
        };

        assert!(board.can_rotate(&vertical_i(0, 0)));
        assert!(board.can_rotate(&vertical_i(9, 16)));
        assert!(!board.can_rotate(&vertical_i(-1, 0)));
        assert!(!board.can_rotate(&vertical_i(10, 0)));
        assert!(!board.can_rotate(&vertical_i(9, 17)));
        // Poking above the grid is fine.
        assert!(board.can_rotate(&vertical_i(3, -2)));
    }

    #[test]
    fn test_can_rotate_blocked_by_locked_cell() {
        let mut board = Board::new(10, 20);
        board.set(4, 2, Some(RED));
        let p = piece(ShapeKind::I, 4, 0);
        assert!(!board.can_rotate(&p.with_mask(p.rotate())));
    }

    #[test]
    fn test_merge_commits_one_row_up() {
        let mut board = Board::new(10, 20);
        let landed = piece(ShapeKind::O, 0, 19);
        assert!(board.collides(&landed).unwrap());

        board.merge(&landed).unwrap();
        assert_eq!(board.get(0, 18), Some(Some(RED)));
        assert_eq!(board.get(1, 18), Some(Some(RED)));
        assert_eq!(board.get(0, 19), Some(Some(RED)));
        assert_eq!(board.get(1, 19), Some(Some(RED)));
        assert_eq!(board.occupied_count(), 4);
    }

    #[test]
    fn test_merge_out_of_bounds_writes_nothing() {
        let mut board = Board::new(10, 20);
        // Top row of the mask would land on y = -1.
        let err = board.merge(&piece(ShapeKind::O, 4, 0)).unwrap_err();
        assert!(matches!(err, EngineError::OutOfBoundsAccess { x: 4, y: -1 }));
        assert_eq!(board.occupied_count(), 0);
    }

    #[test]
    fn test_clear_single_row_shifts_down() {
        let mut board = Board::new(10, 20);
        fill_row(&mut board, 19);
        board.set(2, 18, Some(RED));

        assert_eq!(board.clear_completed_rows(), 1);
        assert_eq!(board.get(2, 19), Some(Some(RED)));
        assert_eq!(board.occupied_count(), 1);
        assert_eq!(board.cells().len(), 200);
    }

    #[test]
    fn test_clear_non_adjacent_rows() {
        let mut board = Board::new(10, 20);
        fill_row(&mut board, 19);
        board.set(0, 18, Some(RED));
        fill_row(&mut board, 17);
        board.set(9, 16, Some(RED));

        assert_eq!(board.clear_completed_rows(), 2);
        assert_eq!(board.get(0, 19), Some(Some(RED)));
        assert_eq!(board.get(9, 18), Some(Some(RED)));
        assert_eq!(board.occupied_count(), 2);
        assert!((0..20).all(|y| !board.is_row_full(y)));
    }

    #[test]
    fn test_clear_no_rows() {
        let mut board = Board::new(10, 20);
        board.set(0, 19, Some(RED));
        let before = board.clone();
        assert_eq!(board.clear_completed_rows(), 0);
        assert_eq!(board, before);
    }

    #[test]
    fn test_is_game_over() {
        let mut board = Board::new(10, 20);
        let spawned = piece(ShapeKind::T, 4, 0);
        assert!(!board.is_game_over(&spawned));

        board.set(5, 1, Some(RED));
        assert!(board.is_game_over(&spawned));

        let above = piece(ShapeKind::T, 4, -1);
        assert!(Board::new(10, 20).is_game_over(&above));
    }

    #[test]
    fn test_reset_keeps_dimensions() {
        let mut board = Board::new(7, 9);
        fill_row(&mut board, 3);
        board.reset();
        assert_eq!((board.columns(), board.rows()), (7, 9));
        assert_eq!(board.cells().len(), 63);
        assert_eq!(board.occupied_count(), 0);
    }
}
