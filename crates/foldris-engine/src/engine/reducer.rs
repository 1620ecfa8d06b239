use crate::{
    InvalidDimensions,
    core::{Board, Cell, Piece, Position},
    engine::{GameState, PieceSource},
};

/// Points per simultaneously cleared row; two rows together score 200.
const SCORE_PER_ROW: usize = 100;

/// Rows between the top edge and the spawn anchor.
const SPAWN_ROW: i32 = 2;

/// Input alphabet of the state machine.
///
/// Events carry no payload. The shell maps raw key codes onto these before
/// they reach the reducer; anything unmapped is dropped there, so the reducer
/// never sees an unrecognized input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    MoveLeft,
    MoveRight,
    Rotate,
    HardDrop,
    PauseToggle,
    /// Periodic gravity pulse. The shell gates it on
    /// [`GameState::is_ticking`]; the reducer ignores it otherwise anyway.
    GravityTick,
    /// The final frame of the clear animation has been shown.
    CollapseFinished,
}

/// Folds input events into successive immutable snapshots.
///
/// The piece source is an injected capability, not part of the state: two
/// reducers fed the same events from the same source produce identical
/// snapshot sequences. Every transition is total; an event whose
/// precondition is unmet returns the previous snapshot unchanged.
#[derive(Debug)]
pub struct Reducer<S> {
    source: S,
}

impl<S: PieceSource> Reducer<S> {
    #[must_use]
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Builds the seed snapshot: empty board, freshly drawn active and next
    /// pieces, zero score, paused and waiting for the player.
    ///
    /// A board too small to hold the first piece at its spawn anchor starts
    /// the game already over, the same way a blocked spawn ends one.
    pub fn seed_state(
        &mut self,
        rows: usize,
        cols: usize,
    ) -> Result<GameState, InvalidDimensions> {
        let board = Board::new(rows, cols)?;
        let position = spawn_position(&board);
        let first = Piece::new(self.source.next_piece());
        let next_piece = Piece::new(self.source.next_piece());
        let live = board.does_piece_fit(&first, position);
        Ok(GameState {
            active_piece: live.then_some(first),
            board,
            collapse_board: None,
            next_piece,
            position,
            live,
            paused: true,
            scores: 0,
        })
    }

    /// Applies one event, producing the next snapshot.
    #[must_use]
    pub fn apply(&mut self, state: &GameState, event: GameEvent) -> GameState {
        match event {
            GameEvent::MoveLeft => shift(state, Position::left),
            GameEvent::MoveRight => shift(state, Position::right),
            GameEvent::Rotate => rotate(state),
            GameEvent::HardDrop => self.hard_drop(state),
            GameEvent::PauseToggle => pause_toggle(state),
            GameEvent::GravityTick => self.gravity_tick(state),
            GameEvent::CollapseFinished => collapse_finished(state),
        }
    }

    fn hard_drop(&mut self, state: &GameState) -> GameState {
        if !state.is_ticking() {
            return state.clone();
        }
        let Some(piece) = state.active_piece else {
            return state.clone();
        };
        let target = state.board.drop_position(&piece, state.position);
        self.lock_piece(state, &piece, target)
    }

    fn gravity_tick(&mut self, state: &GameState) -> GameState {
        if !state.is_ticking() {
            return state.clone();
        }
        let Some(piece) = state.active_piece else {
            return state.clone();
        };
        let below = state.position.down();
        if state.board.does_piece_fit(&piece, below) {
            return GameState {
                position: below,
                ..state.clone()
            };
        }
        self.lock_piece(state, &piece, state.position)
    }

    /// Locks the piece, then runs the collapse check and the spawn check, in
    /// that order: scoring must see the pre-spawn board, and the spawn test
    /// must see the post-collapse board.
    fn lock_piece(&mut self, state: &GameState, piece: &Piece, position: Position) -> GameState {
        let mut next = state.clone();
        next.board = state.board.write_piece(piece, position, Cell::Filled);
        next.active_piece = None;
        next.position = spawn_position(&next.board);

        let filled = next.board.filled_row_indexes();
        if !filled.is_empty() {
            next.collapse_board = Some(next.board.clone());
            next.board = next.board.collapse_filled_rows();
            next.scores += SCORE_PER_ROW * filled.len();
        }

        let candidate = next.next_piece;
        if next.board.does_piece_fit(&candidate, next.position) {
            next.active_piece = Some(candidate);
            next.next_piece = Piece::new(self.source.next_piece());
        } else {
            next.live = false;
        }
        next
    }
}

/// Spawn anchor: horizontally centered, [`SPAWN_ROW`] rows below the top.
fn spawn_position(board: &Board) -> Position {
    let x = i32::try_from((board.col_count() - 1) / 2).expect("board dimensions fit in i32");
    Position::new(x, SPAWN_ROW)
}

fn shift(state: &GameState, direction: fn(Position) -> Position) -> GameState {
    if !state.is_ticking() {
        return state.clone();
    }
    let Some(piece) = &state.active_piece else {
        return state.clone();
    };
    let moved = direction(state.position);
    if state.board.does_piece_fit(piece, moved) {
        GameState {
            position: moved,
            ..state.clone()
        }
    } else {
        state.clone()
    }
}

fn rotate(state: &GameState) -> GameState {
    if !state.is_ticking() {
        return state.clone();
    }
    let Some(piece) = &state.active_piece else {
        return state.clone();
    };
    let rotated = piece.rotated();
    if state.board.does_piece_fit(&rotated, state.position) {
        GameState {
            active_piece: Some(rotated),
            ..state.clone()
        }
    } else {
        state.clone()
    }
}

fn pause_toggle(state: &GameState) -> GameState {
    if !state.live {
        return state.clone();
    }
    GameState {
        paused: !state.paused,
        ..state.clone()
    }
}

fn collapse_finished(state: &GameState) -> GameState {
    if state.collapse_board.is_none() {
        return state.clone();
    }
    GameState {
        collapse_board: None,
        ..state.clone()
    }
}
