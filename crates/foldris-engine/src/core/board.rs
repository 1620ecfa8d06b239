use crate::InvalidDimensions;

use super::piece::{Piece, Position};

/// A single cell of the playfield grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, derive_more::IsVariant)]
#[repr(u8)]
pub enum Cell {
    /// Nothing here.
    #[default]
    Empty,
    /// Locked piece material.
    Filled,
    /// The falling piece, overlay only.
    Active,
    /// Landing preview, overlay only. Not written by any current transition.
    Ghost,
}

/// The playfield: a `rows x cols` grid of cells, dimensions fixed for the
/// lifetime of a game.
///
/// Boards are immutable values. Every operation that changes cells returns a
/// new board, so snapshots taken at different points in a game never share
/// mutable structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: Vec<Vec<Cell>>,
}

impl Board {
    /// Creates an all-empty board.
    pub fn new(rows: usize, cols: usize) -> Result<Self, InvalidDimensions> {
        if rows == 0 || cols == 0 {
            return Err(InvalidDimensions { rows, cols });
        }
        Ok(Self {
            rows: vec![vec![Cell::Empty; cols]; rows],
        })
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn col_count(&self) -> usize {
        self.rows[0].len()
    }

    /// Returns an iterator over the rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.rows.iter().map(Vec::as_slice)
    }

    #[must_use]
    pub fn cell(&self, x: usize, y: usize) -> Cell {
        self.rows[y][x]
    }

    /// True iff every absolute cell of `piece` anchored at `position` is
    /// horizontally inside `[0, cols)` and either above the board or an empty
    /// in-bounds cell.
    ///
    /// Rows above the board (`y < 0`) fit: the piece has not reached them
    /// yet. Rows at or below the floor (`y >= rows`) block. Spawn and drop
    /// collision both rely on that asymmetry.
    #[must_use]
    pub fn does_piece_fit(&self, piece: &Piece, position: Position) -> bool {
        piece.cells().iter().all(|offset| {
            let y = position.y + offset.y;
            let Ok(x) = usize::try_from(position.x + offset.x) else {
                return false;
            };
            if x >= self.col_count() {
                return false;
            }
            if y < 0 {
                return true;
            }
            match usize::try_from(y) {
                Ok(y) if y < self.row_count() => self.rows[y][x].is_empty(),
                _ => false,
            }
        })
    }

    /// Returns a new board with each absolute piece cell set to `cell`.
    ///
    /// Callers must establish that the placement fits first
    /// ([`Self::does_piece_fit`] / [`Self::drop_position`]); writing an
    /// out-of-range cell is an invariant breach and panics.
    #[must_use]
    pub fn write_piece(&self, piece: &Piece, position: Position, cell: Cell) -> Board {
        let mut board = self.clone();
        for offset in piece.cells() {
            let x = usize::try_from(position.x + offset.x)
                .expect("piece cell written outside the board");
            let y = usize::try_from(position.y + offset.y)
                .expect("piece cell written outside the board");
            board.rows[y][x] = cell;
        }
        board
    }

    /// Overlays the falling piece as [`Cell::Active`] for display.
    ///
    /// Returns the board unchanged when there is no piece. The overlay is a
    /// projection for rendering and is never persisted into a snapshot.
    #[must_use]
    pub fn draw_piece(&self, piece: Option<&Piece>, position: Position) -> Board {
        match piece {
            Some(piece) => self.write_piece(piece, position, Cell::Active),
            None => self.clone(),
        }
    }

    /// The lowest anchor at or below `position` where the piece still fits.
    ///
    /// Scans downward from `position.y` to the first colliding row and stops
    /// one above it, or at the bottom row when nothing collides. Never
    /// returns an anchor above the input position.
    #[must_use]
    pub fn drop_position(&self, piece: &Piece, position: Position) -> Position {
        let row_count = i32::try_from(self.row_count()).expect("board dimensions fit in i32");
        let collision_y = (position.y..row_count)
            .find(|&y| !self.does_piece_fit(piece, Position::new(position.x, y)));
        let drop_y = match collision_y {
            Some(y) => y - 1,
            None => row_count - 1,
        };
        Position::new(position.x, drop_y.max(position.y))
    }

    /// Indices of rows with no empty cell, in ascending order.
    #[must_use]
    pub fn filled_row_indexes(&self) -> Vec<usize> {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row.iter().all(|cell| !cell.is_empty()))
            .map(|(index, _)| index)
            .collect()
    }

    /// Removes every filled row and prepends that many empty rows on top.
    ///
    /// Surviving rows keep their relative order, so content above a cleared
    /// row falls by the number of rows cleared below it.
    #[must_use]
    pub fn collapse_filled_rows(&self) -> Board {
        let cols = self.col_count();
        let survivors: Vec<Vec<Cell>> = self
            .rows
            .iter()
            .filter(|row| row.iter().any(|cell| cell.is_empty()))
            .cloned()
            .collect();
        let cleared = self.row_count() - survivors.len();
        let mut rows = vec![vec![Cell::Empty; cols]; cleared];
        rows.extend(survivors);
        Board { rows }
    }

    /// Replaces filled rows with empty rows in place, without shifting.
    ///
    /// Intermediate frame of the clear animation;
    /// [`Self::collapse_filled_rows`] does the real removal.
    #[must_use]
    pub fn clear_filled_rows(&self) -> Board {
        let cols = self.col_count();
        let rows = self
            .rows
            .iter()
            .map(|row| {
                if row.iter().any(|cell| cell.is_empty()) {
                    row.clone()
                } else {
                    vec![Cell::Empty; cols]
                }
            })
            .collect();
        Board { rows }
    }
}

#[cfg(test)]
mod tests {
    use crate::core::piece::PieceKind;

    use super::*;

    fn board_3x3_with_filled_middle_row() -> Board {
        // [0 P 0]
        // [1 1 1]
        // [Z 0 0]
        //
        // P and Z are distinguishable markers (Active / Ghost) so the tests
        // can see exactly which rows moved.
        let mut board = Board::new(3, 3).unwrap();
        board.rows[0][1] = Cell::Active;
        board.rows[1] = vec![Cell::Filled; 3];
        board.rows[2][0] = Cell::Ghost;
        board
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new(4, 5).unwrap();
        assert_eq!(board.row_count(), 4);
        assert_eq!(board.col_count(), 5);
        assert!(
            board
                .rows()
                .all(|row| row.iter().all(|cell| cell.is_empty()))
        );
    }

    #[test]
    fn test_new_rejects_zero_dimensions() {
        assert!(Board::new(0, 8).is_err());
        assert!(Board::new(12, 0).is_err());
        assert!(Board::new(0, 0).is_err());
    }

    #[test]
    fn test_piece_fits_on_empty_board() {
        let board = Board::new(6, 6).unwrap();
        let piece = Piece::new(PieceKind::T);
        assert!(board.does_piece_fit(&piece, Position::new(2, 2)));
    }

    #[test]
    fn test_piece_does_not_fit_outside_columns() {
        let board = Board::new(6, 6).unwrap();
        let piece = Piece::new(PieceKind::I);
        // I spans dx -1..=2: anchor 0 pokes out left, anchor 4 pokes out right.
        assert!(!board.does_piece_fit(&piece, Position::new(0, 2)));
        assert!(!board.does_piece_fit(&piece, Position::new(4, 2)));
        assert!(board.does_piece_fit(&piece, Position::new(1, 2)));
    }

    #[test]
    fn test_rows_above_the_board_fit() {
        let board = Board::new(6, 6).unwrap();
        let piece = Piece::new(PieceKind::O);
        // O spans dy -1..=0; at y = 0 its top cells sit above the board.
        assert!(board.does_piece_fit(&piece, Position::new(2, 0)));
        // Entirely above the board also fits: those rows are unreachable.
        assert!(board.does_piece_fit(&piece, Position::new(2, -3)));
    }

    #[test]
    fn test_rows_below_the_floor_block() {
        let board = Board::new(6, 6).unwrap();
        let piece = Piece::new(PieceKind::O);
        assert!(board.does_piece_fit(&piece, Position::new(2, 5)));
        assert!(!board.does_piece_fit(&piece, Position::new(2, 6)));
    }

    #[test]
    fn test_occupied_cells_block() {
        let piece = Piece::new(PieceKind::O);
        let board = Board::new(6, 6)
            .unwrap()
            .write_piece(&piece, Position::new(2, 5), Cell::Filled);
        assert!(!board.does_piece_fit(&piece, Position::new(2, 5)));
        assert!(board.does_piece_fit(&piece, Position::new(0, 5)));
    }

    #[test]
    fn test_write_piece_sets_exactly_the_piece_cells() {
        let board = Board::new(4, 4).unwrap();
        let piece = Piece::new(PieceKind::O);
        let written = board.write_piece(&piece, Position::new(1, 2), Cell::Filled);

        let filled: Vec<(usize, usize)> = (0..4)
            .flat_map(|y| (0..4).map(move |x| (x, y)))
            .filter(|&(x, y)| written.cell(x, y).is_filled())
            .collect();
        assert_eq!(filled, [(1, 1), (2, 1), (1, 2), (2, 2)]);
        // The source board is untouched.
        assert!(board.rows().all(|row| row.iter().all(|c| c.is_empty())));
    }

    #[test]
    fn test_draw_piece_overlays_active_cells() {
        let board = Board::new(4, 4).unwrap();
        let piece = Piece::new(PieceKind::O);
        let drawn = board.draw_piece(Some(&piece), Position::new(1, 2));
        assert!(drawn.cell(1, 1).is_active());
        assert!(drawn.cell(2, 2).is_active());
    }

    #[test]
    fn test_draw_piece_without_piece_is_identity() {
        let board = Board::new(4, 4).unwrap();
        assert_eq!(board.draw_piece(None, Position::new(1, 2)), board);
    }

    #[test]
    fn test_drop_position_reaches_the_floor() {
        let board = Board::new(8, 6).unwrap();
        let piece = Piece::new(PieceKind::I);
        // I is flat (dy = 0): it rests on the bottom row.
        let drop = board.drop_position(&piece, Position::new(2, 1));
        assert_eq!(drop, Position::new(2, 7));
        assert!(board.does_piece_fit(&piece, drop));
    }

    #[test]
    fn test_drop_position_stops_on_filled_cells() {
        let flat = Piece::new(PieceKind::I);
        let board = Board::new(8, 6)
            .unwrap()
            .write_piece(&flat, Position::new(2, 7), Cell::Filled);
        let drop = board.drop_position(&flat, Position::new(2, 1));
        assert_eq!(drop, Position::new(2, 6));
        assert!(board.does_piece_fit(&flat, drop));
    }

    #[test]
    fn test_drop_position_never_moves_upward() {
        let piece = Piece::new(PieceKind::O);
        let board = Board::new(8, 6).unwrap();
        // Fill the whole floor region below the piece.
        let board = (0..3).fold(board, |board, i| {
            board.write_piece(
                &Piece::new(PieceKind::I),
                Position::new(1, 5 + i),
                Cell::Filled,
            )
        });
        let position = Position::new(2, 6);
        let drop = board.drop_position(&piece, position);
        assert!(drop.y >= position.y);
    }

    #[test]
    fn test_filled_row_indexes_after_write() {
        let board = Board::new(4, 4).unwrap();
        assert_eq!(board.filled_row_indexes(), Vec::<usize>::new());

        let flat = Piece::new(PieceKind::I);
        let board = board.write_piece(&flat, Position::new(1, 3), Cell::Filled);
        assert_eq!(board.filled_row_indexes(), [3]);

        let board = board.write_piece(&flat, Position::new(1, 1), Cell::Filled);
        assert_eq!(board.filled_row_indexes(), [1, 3]);
    }

    #[test]
    fn test_any_non_empty_cell_counts_for_filled_rows() {
        // Overlay markers count as material: "filled" means "not empty".
        let mut board = Board::new(2, 2).unwrap();
        board.rows[0] = vec![Cell::Active, Cell::Ghost];
        assert_eq!(board.filled_row_indexes(), [0]);
    }

    #[test]
    fn test_collapse_without_filled_rows_is_identity() {
        let board = Board::new(5, 4).unwrap().write_piece(
            &Piece::new(PieceKind::O),
            Position::new(1, 4),
            Cell::Filled,
        );
        assert_eq!(board.collapse_filled_rows(), board);
    }

    #[test]
    fn test_collapse_shifts_content_down() {
        // [0 P 0]    [0 0 0]
        // [1 1 1] => [0 P 0]
        // [Z 0 0]    [Z 0 0]
        let board = board_3x3_with_filled_middle_row();
        let collapsed = board.collapse_filled_rows();

        let mut expected = Board::new(3, 3).unwrap();
        expected.rows[1][1] = Cell::Active;
        expected.rows[2][0] = Cell::Ghost;
        assert_eq!(collapsed, expected);
    }

    #[test]
    fn test_clear_blanks_filled_rows_in_place() {
        // [0 P 0]    [0 P 0]
        // [1 1 1] => [0 0 0]
        // [Z 0 0]    [Z 0 0]
        let board = board_3x3_with_filled_middle_row();
        let cleared = board.clear_filled_rows();

        let mut expected = Board::new(3, 3).unwrap();
        expected.rows[0][1] = Cell::Active;
        expected.rows[2][0] = Cell::Ghost;
        assert_eq!(cleared, expected);
    }

    #[test]
    fn test_collapse_multiple_rows() {
        let flat = Piece::new(PieceKind::I);
        let mut board = Board::new(4, 4).unwrap();
        board.rows[0][0] = Cell::Filled;
        let board = board
            .write_piece(&flat, Position::new(1, 2), Cell::Filled)
            .write_piece(&flat, Position::new(1, 3), Cell::Filled);
        assert_eq!(board.filled_row_indexes(), [2, 3]);

        let collapsed = board.collapse_filled_rows();
        assert_eq!(collapsed.filled_row_indexes(), Vec::<usize>::new());
        // The lone marker fell two rows.
        assert!(collapsed.cell(0, 2).is_filled());
        assert!(collapsed.cell(0, 0).is_empty());
    }
}
