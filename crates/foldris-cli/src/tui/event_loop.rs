use std::{
    collections::VecDeque,
    io,
    time::{Duration, Instant},
};

use crossterm::event;
use foldris_engine::CollapseFrame;

use crate::tui::event::ShellEvent;

/// Ordered event source for the shell: a gateable gravity tick, a one-shot
/// timed frame sequence for the clear animation, render scheduling, and
/// terminal input, merged into a single stream.
///
/// The gravity schedule keeps running while the gate is closed; due ticks
/// are swallowed instead of forwarded, so pausing or a clear animation never
/// shifts the cadence.
#[derive(Debug)]
pub struct EventLoop {
    tick_interval: Duration,
    tick_gate: bool,
    last_tick: Instant,
    frame_interval: Duration,
    frames: VecDeque<CollapseFrame>,
    next_frame_at: Option<Instant>,
    dirty: bool,
}

impl EventLoop {
    pub fn new(tick_interval: Duration, frame_interval: Duration) -> Self {
        Self {
            tick_interval,
            tick_gate: false,
            last_tick: Instant::now(),
            frame_interval,
            frames: VecDeque::new(),
            next_frame_at: None,
            dirty: true, // Initial render is required on startup
        }
    }

    /// Opens or closes the gravity gate; callers pass the latest snapshot's
    /// `is_ticking` value after every transition.
    pub fn set_tick_gate(&mut self, open: bool) {
        self.tick_gate = open;
    }

    /// Starts the timed frame sub-stream: one frame per `frame_interval`,
    /// starting one interval from now. Replaces any sequence still pending.
    pub fn schedule_frames(&mut self, frames: impl IntoIterator<Item = CollapseFrame>) {
        self.frames = frames.into_iter().collect();
        self.next_frame_at = (!self.frames.is_empty()).then(|| Instant::now() + self.frame_interval);
    }

    /// Returns the next event, blocking until one is due.
    ///
    /// Pending animation frames win over a due tick, a due tick over a
    /// redraw, and the loop polls the terminal only while nothing else is
    /// ready.
    pub fn next(&mut self) -> io::Result<ShellEvent> {
        loop {
            let now = Instant::now();

            if let Some(frame_at) = self.next_frame_at
                && now >= frame_at
            {
                let frame = self.frames.pop_front().expect("scheduled frame missing");
                let last = self.frames.is_empty();
                self.next_frame_at = (!last).then(|| frame_at + self.frame_interval);
                self.dirty = true;
                return Ok(ShellEvent::CollapseFrame { frame, last });
            }

            if now.duration_since(self.last_tick) >= self.tick_interval {
                self.last_tick = now;
                if self.tick_gate {
                    self.dirty = true;
                    return Ok(ShellEvent::Tick);
                }
                // Gate closed: the schedule advances, the event is dropped.
                continue;
            }

            if self.dirty {
                self.dirty = false;
                return Ok(ShellEvent::Render);
            }

            if !event::poll(self.compute_timeout(now))? {
                continue;
            }
            self.dirty = true;
            return Ok(event::read()?.into());
        }
    }

    fn compute_timeout(&self, now: Instant) -> Duration {
        let next_tick_at = self.last_tick + self.tick_interval;
        let deadline = match self.next_frame_at {
            Some(frame_at) => next_tick_at.min(frame_at),
            None => next_tick_at,
        };
        deadline.saturating_duration_since(now)
    }
}
