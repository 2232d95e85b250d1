use crossterm::event::Event as CrosstermEvent;

/// Events processed by TUI applications.
#[derive(Debug, Clone, derive_more::IsVariant)]
pub(super) enum TuiEvent<T> {
    /// Game logic update timing (based on `tick_interval`).
    Tick,
    /// Screen render timing (based on the render mode).
    Render,
    /// A task scheduled by the application became due.
    Timer(T),
    /// Terminal events such as key input, mouse, and resize.
    Crossterm(CrosstermEvent),
}
