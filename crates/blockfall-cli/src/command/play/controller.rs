use std::time::Duration;

use blockfall_ai::placement_search::PlacementSearch;
use blockfall_engine::{CompletePieceDropError, GameSession};
use blockfall_runtime::Scheduler;

/// Who controls the falling piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum Mode {
    /// The placement search moves every piece; no gravity.
    Autonomous,
    /// Keyboard input and gravity.
    Manual,
}

impl Mode {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Mode::Autonomous => Mode::Manual,
            Mode::Manual => Mode::Autonomous,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Mode::Autonomous => "AI is ON",
            Mode::Manual => "Player Mode",
        }
    }
}

/// Player input, already decoded from key presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveLeft,
    MoveRight,
    SoftDrop,
    HardDrop,
    Rotate,
    ToggleMode,
}

/// Work deferred through the [`Scheduler`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    /// Let the AI place the piece identified by `piece_id`.
    ///
    /// Ignored if by then the mode changed, the game is over or another piece
    /// is falling.
    AiMove { piece_id: u64 },
    /// Start a new game after a top-out.
    Restart,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerConfig {
    /// Delay between a spawn and the AI placing the piece.
    pub ai_delay: Duration,
    /// Gravity interval in manual mode.
    pub drop_interval: Duration,
    /// Time the game-over grid stays on screen before restarting.
    pub restart_delay: Duration,
}

impl ControllerConfig {
    pub const DEFAULT: Self = Self {
        ai_delay: Duration::from_millis(100),
        drop_interval: Duration::from_millis(1000),
        restart_delay: Duration::from_millis(500),
    };
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Drives a [`GameSession`] from frames, player actions and scheduled tasks.
#[derive(Debug)]
pub struct GameController {
    session: GameSession,
    mode: Mode,
    search: PlacementSearch<'static>,
    config: ControllerConfig,
    last_frame: Option<Duration>,
    drop_counter: Duration,
}

impl GameController {
    pub fn new(
        session: GameSession,
        mode: Mode,
        search: PlacementSearch<'static>,
        config: ControllerConfig,
    ) -> Self {
        Self {
            session,
            mode,
            search,
            config,
            last_frame: None,
            drop_counter: Duration::ZERO,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Schedules the work the first piece needs.
    pub fn start(&mut self, sched: &mut impl Scheduler<Task>) {
        tracing::info!(mode = self.mode.label(), "game started");
        if self.session.session_state().is_game_over() {
            self.schedule_restart(sched);
        } else {
            self.on_spawn(sched);
        }
    }

    /// Advances the gravity clock to `now`.
    ///
    /// `now` is a monotonic timestamp. The clock follows every frame, but
    /// time only accumulates towards the next drop in manual mode while the
    /// game is running.
    pub fn frame(&mut self, now: Duration, sched: &mut impl Scheduler<Task>) {
        let delta = self
            .last_frame
            .map_or(Duration::ZERO, |last| now.saturating_sub(last));
        self.last_frame = Some(now);

        if !self.mode.is_manual() || !self.session.session_state().is_playing() {
            return;
        }
        self.drop_counter += delta;
        if self.drop_counter > self.config.drop_interval {
            self.soft_drop(sched);
        }
    }

    /// Applies a player action.
    ///
    /// Piece movement is only accepted in manual mode while the game is
    /// running. The mode can be toggled at any time.
    pub fn dispatch(&mut self, action: Action, sched: &mut impl Scheduler<Task>) {
        match action {
            Action::ToggleMode => self.toggle_mode(sched),
            _ if !self.mode.is_manual() || !self.session.session_state().is_playing() => {}
            Action::MoveLeft => _ = self.session.try_move_left(),
            Action::MoveRight => _ = self.session.try_move_right(),
            Action::Rotate => _ = self.session.try_rotate(),
            Action::SoftDrop => self.soft_drop(sched),
            Action::HardDrop => {
                let outcome = self.session.hard_drop_and_complete();
                self.after_lock(outcome, sched);
            }
        }
    }

    pub fn run_task(&mut self, task: Task, sched: &mut impl Scheduler<Task>) {
        match task {
            Task::AiMove { piece_id } => self.ai_move(piece_id, sched),
            Task::Restart => {
                self.session.restart();
                self.drop_counter = Duration::ZERO;
                self.on_spawn(sched);
            }
        }
    }

    fn toggle_mode(&mut self, sched: &mut impl Scheduler<Task>) {
        self.mode = self.mode.toggled();
        tracing::info!(mode = self.mode.label(), "mode toggled");
        self.on_spawn(sched);
    }

    fn soft_drop(&mut self, sched: &mut impl Scheduler<Task>) {
        self.drop_counter = Duration::ZERO;
        if let Some(outcome) = self.session.auto_drop_and_complete() {
            self.after_lock(outcome, sched);
        }
    }

    fn ai_move(&mut self, piece_id: u64, sched: &mut impl Scheduler<Task>) {
        if !self.mode.is_autonomous()
            || !self.session.session_state().is_playing()
            || piece_id != self.session.piece_id()
        {
            tracing::trace!(piece_id, "stale AI move ignored");
            return;
        }

        let Some(placement) = self
            .search
            .find_best_placement(self.session.grid(), self.session.falling_piece())
        else {
            tracing::warn!(piece_id, "AI found no placement");
            self.session.top_out();
            self.schedule_restart(sched);
            return;
        };
        let outcome = self.session.apply_placement_and_complete(placement.piece());
        self.after_lock(outcome, sched);
    }

    fn after_lock(
        &mut self,
        (cleared_lines, result): (usize, Result<(), CompletePieceDropError>),
        sched: &mut impl Scheduler<Task>,
    ) {
        if cleared_lines > 0 {
            tracing::info!(
                cleared_lines,
                score = self.session.stats().score(),
                "lines cleared"
            );
        }
        match result {
            Ok(()) => self.on_spawn(sched),
            Err(CompletePieceDropError::NewPieceCollision) => self.schedule_restart(sched),
        }
    }

    fn on_spawn(&mut self, sched: &mut impl Scheduler<Task>) {
        if self.mode.is_autonomous() && self.session.session_state().is_playing() {
            let piece_id = self.session.piece_id();
            sched.schedule(self.config.ai_delay, Task::AiMove { piece_id });
        }
    }

    fn schedule_restart(&mut self, sched: &mut impl Scheduler<Task>) {
        sched.schedule(self.config.restart_delay, Task::Restart);
    }
}
