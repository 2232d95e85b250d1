use std::{
    io,
    time::{Duration, Instant},
};

use crate::{
    App,
    event::TuiEvent,
    event_loop::{EventLoop, RenderMode},
    timer::Scheduler,
};

/// TUI application runtime.
///
/// Manages the event loop and executes applications that implement the `App`
/// trait. `T` is the type of tasks the application schedules for later.
#[derive(Debug)]
pub struct Runtime<T> {
    events: EventLoop<T>,
    started_at: Instant,
}

impl<T> Default for Runtime<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Runtime<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            events: EventLoop::new(),
            started_at: Instant::now(),
        }
    }

    /// Sets the tick rate (Hz, ticks per second).
    pub fn set_tick_rate(&mut self, rate: Option<f64>) {
        self.set_tick_interval(rate.map(|rate| Duration::from_secs_f64(1.0 / rate)));
    }

    pub fn set_tick_interval(&mut self, interval: Option<Duration>) {
        self.events.set_tick_interval(interval);
    }

    pub fn set_render_mode(&mut self, mode: RenderMode) {
        self.events.set_render_mode(mode);
    }

    /// Monotonic time since the runtime was created.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }

    /// Runs the application.
    ///
    /// 1. Calls `app.init()` for initialization
    /// 2. Runs the event loop until `app.should_exit()` returns true
    ///    - `Event::Tick`: calls `app.update()`
    ///    - `Event::Timer`: calls `app.handle_task()`
    ///    - `Event::Render`: calls `app.draw()`
    ///    - `Event::Crossterm`: calls `app.handle_event()`
    pub fn run<A>(mut self, app: &mut A) -> io::Result<()>
    where
        A: App<Task = T>,
    {
        app.init(&mut self);

        ratatui::run(|terminal| {
            while !app.should_exit() {
                match self.events.next()? {
                    TuiEvent::Tick => {
                        app.update(&mut self);
                    }
                    TuiEvent::Timer(task) => {
                        app.handle_task(&mut self, task);
                    }
                    TuiEvent::Render => {
                        terminal.draw(|f| app.draw(f))?;
                    }
                    TuiEvent::Crossterm(event) => {
                        app.handle_event(&mut self, event);
                    }
                }
            }
            Ok(())
        })
    }
}

impl<T> Scheduler<T> for Runtime<T> {
    fn schedule(&mut self, delay: Duration, task: T) {
        self.events.schedule_at(Instant::now() + delay, task);
    }
}
