use crate::celebration::Confetti;
use crate::config::Config;
use crate::session::Session;
use crate::texts::TextSet;

/// Which screen the TUI is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Typing,
    Results,
}

/// Top-level application state shared between the event loop and the
/// renderer.
#[derive(Debug)]
pub struct App {
    pub session: Session,
    pub state: AppState,
    pub config: Config,
    pub confetti: Confetti,
    texts: TextSet,
    custom_text: Option<String>,
}

impl App {
    pub fn new(config: Config, custom_text: Option<String>) -> Self {
        let texts = TextSet::new("english");
        let target = custom_text.clone().unwrap_or_else(|| texts.pick());
        let limit = config.timer_mode.then_some(config.time_limit_secs as f64);

        Self {
            session: Session::new(target, limit),
            state: AppState::Typing,
            config,
            confetti: Confetti::new(),
            texts,
            custom_text,
        }
    }

    fn time_limit(&self) -> Option<f64> {
        self.config.timer_mode.then_some(self.config.time_limit_secs as f64)
    }

    /// Append one typed character to the session input.
    pub fn type_char(&mut self, c: char) {
        let mut value = self.session.input().to_string();
        value.push(c);
        self.session.on_input(&value);
    }

    /// Remove the last typed character from the session input.
    pub fn backspace(&mut self) {
        let mut value = self.session.input().to_string();
        value.pop();
        self.session.on_input(&value);
    }

    /// Start over with the same target text.
    pub fn retry(&mut self) {
        self.session.reset(None);
        self.back_to_typing();
    }

    /// Start over with a freshly picked text (the custom prompt wins if
    /// one was given on the command line).
    pub fn new_text(&mut self) {
        let target = self
            .custom_text
            .clone()
            .unwrap_or_else(|| self.texts.pick());
        self.session.reset(Some(target));
        self.back_to_typing();
    }

    /// Flip timed mode for the next session. Never called mid-session:
    /// the results screen is the only place this is reachable from.
    pub fn toggle_timer(&mut self) {
        self.config.timer_mode = !self.config.timer_mode;
        let target = self.session.target.clone();
        self.session = Session::new(target, self.time_limit());
        self.back_to_typing();
    }

    pub fn toggle_theme(&mut self) {
        self.config.theme = self.config.theme.toggled();
    }

    /// Move to the results screen, firing confetti for sessions that
    /// clear the celebration thresholds.
    pub fn finish(&mut self, width: u16, height: u16) {
        self.state = AppState::Results;
        if self
            .session
            .stats()
            .is_some_and(|s| s.merits_celebration())
        {
            self.confetti.launch(width, height);
        }
    }

    fn back_to_typing(&mut self) {
        self.state = AppState::Typing;
        self.confetti = Confetti::new();
    }
}
