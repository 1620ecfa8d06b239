use rand::{Rng, distr::StandardUniform, prelude::Distribution};

/// Offset in piece-local space, relative to the anchor cell.
///
/// Offsets may be negative (cells above or left of the anchor).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Rotates the offset 90° clockwise about the piece's local origin:
    /// `(x, y) -> (-y, x)`. Four applications return the original offset.
    #[must_use]
    pub const fn rotated(self) -> Self {
        Self {
            x: -self.y,
            y: self.x,
        }
    }
}

/// Anchor coordinate in board space.
///
/// Absolute piece cells are `position + offset`; the anchor itself need not
/// be one of the piece's cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub const fn left(self) -> Self {
        Self::new(self.x - 1, self.y)
    }

    #[must_use]
    pub const fn right(self) -> Self {
        Self::new(self.x + 1, self.y)
    }

    #[must_use]
    pub const fn down(self) -> Self {
        Self::new(self.x, self.y + 1)
    }
}

/// Enum representing the type of piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum PieceKind {
    /// I-piece.
    I = 0,
    /// T-piece.
    T = 1,
    /// O-piece.
    O = 2,
    /// J-piece.
    J = 3,
    /// L-piece.
    L = 4,
    /// S-piece.
    S = 5,
    /// Z-piece.
    Z = 6,
}

impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        match rng.random_range(0..=6) {
            0 => PieceKind::I,
            1 => PieceKind::T,
            2 => PieceKind::O,
            3 => PieceKind::J,
            4 => PieceKind::L,
            5 => PieceKind::S,
            _ => PieceKind::Z,
        }
    }
}

impl PieceKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    /// All piece kinds, in declaration order.
    pub const ALL: [PieceKind; PieceKind::LEN] = [
        PieceKind::I,
        PieceKind::T,
        PieceKind::O,
        PieceKind::J,
        PieceKind::L,
        PieceKind::S,
        PieceKind::Z,
    ];

    /// Spawn-orientation offsets relative to the anchor.
    const fn spawn_offsets(self) -> [Point; 4] {
        const fn p(x: i32, y: i32) -> Point {
            Point::new(x, y)
        }
        match self {
            PieceKind::I => [p(-1, 0), p(0, 0), p(1, 0), p(2, 0)],
            PieceKind::T => [p(0, -1), p(-1, 0), p(0, 0), p(1, 0)],
            PieceKind::O => [p(0, -1), p(1, -1), p(0, 0), p(1, 0)],
            PieceKind::J => [p(-1, -1), p(-1, 0), p(0, 0), p(1, 0)],
            PieceKind::L => [p(1, -1), p(-1, 0), p(0, 0), p(1, 0)],
            PieceKind::S => [p(0, -1), p(1, -1), p(-1, 0), p(0, 0)],
            PieceKind::Z => [p(-1, -1), p(0, -1), p(0, 0), p(1, 0)],
        }
    }

    /// Returns the single character representation of this piece kind.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::T => 'T',
            PieceKind::O => 'O',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
        }
    }
}

/// A tetromino: an immutable kind plus its current orientation.
///
/// The orientation is the set of 4 cell offsets around the anchor. Movement
/// lives in [`Position`](crate::core::Position); rotation replaces the offset
/// set and returns a new `Piece`. Whether a piece placement is valid is the
/// board's concern, not the piece's.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    kind: PieceKind,
    cells: [Point; 4],
}

impl Piece {
    /// Creates the piece in its spawn orientation.
    #[must_use]
    pub const fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            cells: kind.spawn_offsets(),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub const fn cells(&self) -> &[Point; 4] {
        &self.cells
    }

    /// The piece rotated 90° clockwise: same kind, every offset rotated.
    ///
    /// No bounds checking here; callers gate on
    /// [`Board::does_piece_fit`](crate::core::Board::does_piece_fit) before
    /// adopting the rotation.
    #[must_use]
    pub fn rotated(&self) -> Self {
        let mut cells = self.cells;
        for cell in &mut cells {
            *cell = cell.rotated();
        }
        Self {
            kind: self.kind,
            cells,
        }
    }
}
