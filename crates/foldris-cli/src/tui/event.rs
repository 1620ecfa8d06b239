use crossterm::event::Event as CrosstermEvent;
use foldris_engine::CollapseFrame;

/// Events delivered to the shell loop, in arrival order.
#[derive(Debug, Clone, derive_more::From)]
pub enum ShellEvent {
    /// Gravity pulse, forwarded only while the tick gate is open.
    Tick,
    /// Redraw timing.
    Render,
    /// Next frame of the clear animation; `last` marks the end of the script.
    CollapseFrame { frame: CollapseFrame, last: bool },
    /// Terminal events such as key input, mouse, and resize.
    #[from]
    Crossterm(CrosstermEvent),
}
