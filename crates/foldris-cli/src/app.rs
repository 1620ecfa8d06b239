use std::{
    collections::HashMap,
    time::{Duration, Instant},
};

use crossterm::event::{Event, KeyCode};
use foldris_engine::{
    COLLAPSE_ANIMATION, CollapseFrame, GameEvent, GameState, PieceSource, Reducer,
};
use ratatui::{DefaultTerminal, Frame};

use crate::{
    tui::{EventLoop, ShellEvent},
    ui::widgets::GameDisplay,
};

/// Delay between clear-animation frames.
const COLLAPSE_FRAME_DELAY: Duration = Duration::from_millis(50);
/// Minimum spacing between accepted presses of the same key.
const KEY_DEBOUNCE: Duration = Duration::from_millis(100);

#[derive(Debug)]
pub struct PlayApp<S> {
    reducer: Reducer<S>,
    state: GameState,
    display_frame: CollapseFrame,
    events: EventLoop,
    debounce: KeyDebounce,
    is_exiting: bool,
}

impl<S: PieceSource> PlayApp<S> {
    pub fn new(reducer: Reducer<S>, state: GameState, tick_interval: Duration) -> Self {
        let mut events = EventLoop::new(tick_interval, COLLAPSE_FRAME_DELAY);
        events.set_tick_gate(state.is_ticking());
        Self {
            reducer,
            state,
            display_frame: CollapseFrame::Current,
            events,
            debounce: KeyDebounce::new(KEY_DEBOUNCE),
            is_exiting: false,
        }
    }

    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> anyhow::Result<()> {
        while !self.is_exiting {
            match self.events.next()? {
                ShellEvent::Tick => self.apply(GameEvent::GravityTick),
                ShellEvent::Render => {
                    terminal.draw(|frame| self.draw(frame))?;
                }
                ShellEvent::CollapseFrame { frame, last } => {
                    self.display_frame = frame;
                    if last {
                        self.apply(GameEvent::CollapseFinished);
                    }
                }
                ShellEvent::Crossterm(event) => self.handle_event(&event),
            }
        }
        Ok(())
    }

    /// Feeds one event through the reducer and re-derives the shell gates
    /// from the new snapshot.
    fn apply(&mut self, event: GameEvent) {
        let was_collapsing = self.state.is_collapsing();
        self.state = self.reducer.apply(&self.state, event);

        if self.state.is_collapsing() && !was_collapsing {
            self.events.schedule_frames(COLLAPSE_ANIMATION);
        }
        if !self.state.is_collapsing() {
            self.display_frame = CollapseFrame::Current;
        }
        self.events.set_tick_gate(self.state.is_ticking());
    }

    fn handle_event(&mut self, event: &Event) {
        let Some(key) = event.as_key_event() else {
            return;
        };
        if key.code == KeyCode::Char('q') {
            self.is_exiting = true;
            return;
        }
        let game_event = match key.code {
            KeyCode::Left => GameEvent::MoveLeft,
            KeyCode::Right => GameEvent::MoveRight,
            KeyCode::Up => GameEvent::Rotate,
            KeyCode::Char(' ') => GameEvent::HardDrop,
            KeyCode::Enter => GameEvent::PauseToggle,
            // Unmapped keys never reach the reducer.
            _ => return,
        };
        if !self.debounce.accept(key.code, Instant::now()) {
            return;
        }
        self.apply(game_event);
    }

    fn draw(&self, frame: &mut Frame) {
        frame.render_widget(
            GameDisplay::new(&self.state, self.display_frame),
            frame.area(),
        );
    }
}

/// Drops repeats of the same key arriving inside the debounce window, so a
/// held key cannot flood the reducer.
#[derive(Debug)]
struct KeyDebounce {
    window: Duration,
    last_accepted: HashMap<KeyCode, Instant>,
}

impl KeyDebounce {
    fn new(window: Duration) -> Self {
        Self {
            window,
            last_accepted: HashMap::new(),
        }
    }

    fn accept(&mut self, code: KeyCode, now: Instant) -> bool {
        match self.last_accepted.get(&code) {
            Some(&previous) if now.duration_since(previous) < self.window => false,
            _ => {
                self.last_accepted.insert(code, now);
                true
            }
        }
    }
}
