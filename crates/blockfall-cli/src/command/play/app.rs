use blockfall_runtime::{App, RenderMode, Runtime};
use crossterm::event::{Event, KeyCode};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
};

use crate::{
    command::play::controller::{Action, GameController, Task},
    ui::widgets::{KeyBinding, KeyBindingDisplay, SessionDisplay},
};

const MANUAL_BINDINGS: &[KeyBinding] = &[
    (&["←", "→"], "Move"),
    (&["↓"], "Soft Drop"),
    (&["↑"], "Rotate"),
    (&["Space"], "Hard Drop"),
    (&["A"], "AI"),
    (&["Q"], "Quit"),
];

const AUTONOMOUS_BINDINGS: &[KeyBinding] = &[(&["A"], "Player Mode"), (&["Q"], "Quit")];

#[derive(Debug)]
pub struct PlayApp {
    controller: GameController,
    fps: u32,
    is_exiting: bool,
}

impl PlayApp {
    pub fn new(controller: GameController, fps: u32) -> Self {
        Self {
            controller,
            fps,
            is_exiting: false,
        }
    }

    pub fn controller(&self) -> &GameController {
        &self.controller
    }
}

fn action_for_key(code: KeyCode) -> Option<Action> {
    let action = match code {
        KeyCode::Left => Action::MoveLeft,
        KeyCode::Right => Action::MoveRight,
        KeyCode::Down => Action::SoftDrop,
        KeyCode::Up => Action::Rotate,
        KeyCode::Char(' ') => Action::HardDrop,
        KeyCode::Char('a' | 'A') => Action::ToggleMode,
        _ => return None,
    };
    Some(action)
}

impl App for PlayApp {
    type Task = Task;

    fn init(&mut self, runtime: &mut Runtime<Task>) {
        let fps = f64::from(self.fps);
        runtime.set_tick_rate(Some(fps));
        runtime.set_render_mode(RenderMode::interval_from_rate(fps));
        self.controller.start(runtime);
    }

    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    fn handle_event(&mut self, runtime: &mut Runtime<Task>, event: Event) {
        let Some(event) = event.as_key_event() else {
            return;
        };
        if matches!(event.code, KeyCode::Char('q' | 'Q')) {
            self.is_exiting = true;
            return;
        }
        if let Some(action) = action_for_key(event.code) {
            self.controller.dispatch(action, runtime);
        }
    }

    fn handle_task(&mut self, runtime: &mut Runtime<Task>, task: Task) {
        tracing::trace!(?task, "task due");
        self.controller.run_task(task, runtime);
    }

    fn draw(&self, frame: &mut Frame) {
        let mode = self.controller.mode();
        let session_display =
            SessionDisplay::new(self.controller.session()).mode(mode.label(), mode.is_autonomous());
        let bindings = if mode.is_autonomous() {
            AUTONOMOUS_BINDINGS
        } else {
            MANUAL_BINDINGS
        };

        let [main_area, help_area] =
            Layout::vertical([Constraint::Length(22), Constraint::Length(1)]).areas(frame.area());
        frame.render_widget(session_display, main_area);
        frame.render_widget(KeyBindingDisplay::new(bindings), help_area);
    }

    fn update(&mut self, runtime: &mut Runtime<Task>) {
        let now = runtime.elapsed();
        self.controller.frame(now, runtime);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(action_for_key(KeyCode::Left), Some(Action::MoveLeft));
        assert_eq!(action_for_key(KeyCode::Right), Some(Action::MoveRight));
        assert_eq!(action_for_key(KeyCode::Down), Some(Action::SoftDrop));
        assert_eq!(action_for_key(KeyCode::Up), Some(Action::Rotate));
        assert_eq!(action_for_key(KeyCode::Char(' ')), Some(Action::HardDrop));
        assert_eq!(action_for_key(KeyCode::Char('a')), Some(Action::ToggleMode));
        assert_eq!(action_for_key(KeyCode::Char('x')), None);
    }
}
