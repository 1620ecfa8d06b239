//! Game state machine: immutable snapshots folded from input events.
//!
//! - [`GameState`] - One snapshot of the whole game, plus display projections
//! - [`Reducer`] - Folds [`GameEvent`]s into successive snapshots
//! - [`PieceSource`] - Injected capability supplying the next piece kind
//!
//! # Game Flow
//!
//! 1. Build a [`Reducer`] around a piece source and take the seed snapshot
//!    from [`Reducer::seed_state`]
//! 2. Feed it one event per player key or gravity tick; each call returns the
//!    next snapshot and never mutates the previous one
//! 3. When a snapshot starts collapsing, play the
//!    [`COLLAPSE_ANIMATION`] frame script and feed
//!    [`GameEvent::CollapseFinished`] after the last frame
//! 4. The game ends when a freshly locked board leaves no room to spawn; the
//!    snapshot reports it via [`GameState::is_live`]
//!
//! # Example
//!
//! ```
//! use foldris_engine::{GameEvent, Reducer, RandomPieceSource};
//!
//! let mut reducer = Reducer::new(RandomPieceSource::new());
//! let state = reducer.seed_state(12, 8)?;
//!
//! // Games start paused; unpause and let gravity act once.
//! let state = reducer.apply(&state, GameEvent::PauseToggle);
//! let state = reducer.apply(&state, GameEvent::GravityTick);
//! assert!(state.is_live());
//! # Ok::<(), foldris_engine::InvalidDimensions>(())
//! ```

pub use self::{game_state::*, piece_source::*, reducer::*};

mod game_state;
mod piece_source;
mod reducer;
