use crate::core::{Board, Piece, Position};

/// Preview panel dimensions and the anchor the next piece is drawn at.
///
/// Every spawn orientation spans `dx -1..=2`, `dy -1..=0`, so anchored at
/// (1, 1) all 7 kinds land inside the 2x4 grid.
const PREVIEW_ROWS: usize = 2;
const PREVIEW_COLS: usize = 4;
const PREVIEW_ANCHOR: Position = Position::new(1, 1);

/// Display frame selector for the line-clear animation.
///
/// While a snapshot is collapsing, the shell flips between the pre-collapse
/// board and its blanked variant before settling on the live board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollapseFrame {
    /// The board as it was before the collapse, filled rows intact.
    Previous,
    /// The same board with its filled rows blanked in place.
    Cleared,
    /// The live, post-collapse board.
    #[default]
    Current,
}

/// The clear-animation script: the shell shows each frame for a fixed delay,
/// then reports completion with
/// [`GameEvent::CollapseFinished`](crate::engine::GameEvent::CollapseFinished).
pub const COLLAPSE_ANIMATION: [CollapseFrame; 5] = [
    CollapseFrame::Previous,
    CollapseFrame::Cleared,
    CollapseFrame::Previous,
    CollapseFrame::Cleared,
    CollapseFrame::Current,
];

/// One immutable snapshot of the whole game.
///
/// A snapshot is produced once per accepted event by exactly one transition
/// of the [`Reducer`](crate::engine::Reducer) and never mutated afterwards.
/// The board, piece, and position are owned by value; consecutive snapshots
/// share no mutable structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub(crate) board: Board,
    /// Pre-collapse board held while the clear animation runs; absent during
    /// normal play.
    pub(crate) collapse_board: Option<Board>,
    /// Absent only once the game is over.
    pub(crate) active_piece: Option<Piece>,
    pub(crate) next_piece: Piece,
    pub(crate) position: Position,
    pub(crate) live: bool,
    pub(crate) paused: bool,
    pub(crate) scores: usize,
}

impl GameState {
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn collapse_board(&self) -> Option<&Board> {
        self.collapse_board.as_ref()
    }

    #[must_use]
    pub fn active_piece(&self) -> Option<&Piece> {
        self.active_piece.as_ref()
    }

    #[must_use]
    pub fn next_piece(&self) -> &Piece {
        &self.next_piece
    }

    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    #[must_use]
    pub fn is_live(&self) -> bool {
        self.live
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    #[must_use]
    pub fn scores(&self) -> usize {
        self.scores
    }

    /// True while the clear animation owns the display.
    #[must_use]
    pub fn is_collapsing(&self) -> bool {
        self.collapse_board.is_some()
    }

    /// Gate value for the gravity tick channel: ticks are forwarded only
    /// while the game is live, unpaused, and not mid-collapse.
    #[must_use]
    pub fn is_ticking(&self) -> bool {
        self.live && !self.paused && !self.is_collapsing()
    }

    /// The main display grid for a given animation frame: the frame's base
    /// board with the falling piece overlaid.
    ///
    /// Outside a collapse every frame shows the live board.
    #[must_use]
    pub fn primary_board_at(&self, frame: CollapseFrame) -> Board {
        let base = match (frame, &self.collapse_board) {
            (CollapseFrame::Previous, Some(before)) => before.clone(),
            (CollapseFrame::Cleared, Some(before)) => before.clear_filled_rows(),
            _ => self.board.clone(),
        };
        base.draw_piece(self.active_piece.as_ref(), self.position)
    }

    /// The main display grid outside the clear animation.
    #[must_use]
    pub fn primary_board(&self) -> Board {
        self.primary_board_at(CollapseFrame::Current)
    }

    /// The fixed-size next-piece preview grid.
    #[must_use]
    pub fn preview_board(&self) -> Board {
        Board::new(PREVIEW_ROWS, PREVIEW_COLS)
            .expect("preview dimensions are fixed and valid")
            .draw_piece(Some(&self.next_piece), PREVIEW_ANCHOR)
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        core::PieceKind,
        engine::{GameEvent, Reducer, ScriptedPieceSource},
    };

    use super::*;

    fn collapsing_state() -> GameState {
        // A 4-wide board where a single dropped I clears the bottom row.
        let mut reducer = Reducer::new(ScriptedPieceSource::new(vec![PieceKind::I]));
        let state = reducer.seed_state(6, 4).unwrap();
        let state = reducer.apply(&state, GameEvent::PauseToggle);
        let state = reducer.apply(&state, GameEvent::HardDrop);
        assert!(state.is_collapsing());
        state
    }

    #[test]
    fn test_ticking_requires_live_unpaused_and_not_collapsing() {
        let mut reducer = Reducer::new(ScriptedPieceSource::new(vec![PieceKind::T]));
        let state = reducer.seed_state(6, 4).unwrap();
        assert!(!state.is_ticking(), "seed state is paused");

        let state = reducer.apply(&state, GameEvent::PauseToggle);
        assert!(state.is_ticking());

        let state = collapsing_state();
        assert!(!state.is_ticking(), "collapse suspends ticking");
    }

    #[test]
    fn test_primary_board_frames_during_collapse() {
        let state = collapsing_state();
        let locked_cells = |board: &Board| {
            board
                .rows()
                .flat_map(|row| row.iter())
                .filter(|cell| cell.is_filled())
                .count()
        };

        // Previous: the locked row is still visible.
        let previous = state.primary_board_at(CollapseFrame::Previous);
        assert_eq!(locked_cells(&previous), 4);

        // Cleared: same layout with the locked row blanked in place.
        let cleared = state.primary_board_at(CollapseFrame::Cleared);
        assert_eq!(locked_cells(&cleared), 0);

        // Current: the live, collapsed board.
        let current = state.primary_board_at(CollapseFrame::Current);
        assert_eq!(locked_cells(&current), 0);

        // Every frame overlays the freshly spawned piece.
        for board in [&previous, &cleared, &current] {
            assert!(board.rows().any(|row| row.iter().any(|cell| cell.is_active())));
        }
    }

    #[test]
    fn test_primary_board_overlays_the_active_piece() {
        let mut reducer = Reducer::new(ScriptedPieceSource::new(vec![PieceKind::O]));
        let state = reducer.seed_state(6, 4).unwrap();
        let primary = state.primary_board();

        let active_cells = primary
            .rows()
            .flat_map(|row| row.iter())
            .filter(|cell| cell.is_active())
            .count();
        assert_eq!(active_cells, 4);
        // The overlay is a projection: the snapshot's own board stays clean.
        assert!(
            state
                .board()
                .rows()
                .all(|row| row.iter().all(|cell| cell.is_empty()))
        );
    }

    #[test]
    fn test_preview_board_shows_the_next_piece() {
        for kind in PieceKind::ALL {
            let mut reducer = Reducer::new(ScriptedPieceSource::new(vec![kind]));
            let state = reducer.seed_state(6, 4).unwrap();

            let preview = state.preview_board();
            assert_eq!(preview.row_count(), 2);
            assert_eq!(preview.col_count(), 4);
            let active_cells = preview
                .rows()
                .flat_map(|row| row.iter())
                .filter(|cell| cell.is_active())
                .count();
            assert_eq!(active_cells, 4, "{kind:?} preview must show 4 cells");
        }
    }

    #[test]
    fn test_snapshots_do_not_share_boards() {
        let mut reducer = Reducer::new(ScriptedPieceSource::new(vec![PieceKind::T]));
        let before = reducer.seed_state(6, 4).unwrap();
        let before_board = before.board().clone();

        let unpaused = reducer.apply(&before, GameEvent::PauseToggle);
        let after = reducer.apply(&unpaused, GameEvent::HardDrop);

        assert_eq!(*before.board(), before_board, "old snapshot unchanged");
        assert_ne!(*after.board(), before_board, "new snapshot has new board");
        assert!(
            after
                .board()
                .rows()
                .any(|row| row.iter().any(|cell| cell.is_filled()))
        );
    }
}
