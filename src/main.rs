use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    time::Duration,
};
use typr::{
    app::{App, AppState},
    config::{Config, ConfigStore, FileConfigStore, Theme},
    runtime::{AppEvent, CrosstermEventSource, EventSource, Runner},
    TICK_RATE_MS,
};

/// terminal typing speed test
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A terminal typing speed test. Type the displayed text and get words-per-minute and accuracy, optionally racing a countdown timer."
)]
pub struct Cli {
    /// number of seconds to race against, enabling timed mode
    #[clap(short = 's', long)]
    seconds: Option<u64>,

    /// enable timed mode with the configured time limit
    #[clap(short = 't', long)]
    timed: bool,

    /// custom text to type instead of a random sample
    #[clap(short = 'p', long)]
    prompt: Option<String>,

    /// color theme, overriding the configured one
    #[clap(long, value_enum)]
    theme: Option<Theme>,
}

impl Cli {
    /// Layer command-line overrides on top of the stored config.
    fn apply(&self, mut config: Config) -> Config {
        if let Some(secs) = self.seconds {
            config.timer_mode = true;
            config.time_limit_secs = secs;
        } else if self.timed {
            config.timer_mode = true;
        }
        if let Some(theme) = self.theme {
            config.theme = theme;
        }
        config
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let store = FileConfigStore::new();
    let config = cli.apply(store.load());

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config, cli.prompt.clone());
    let runner = Runner::new(
        CrosstermEventSource::new(),
        Duration::from_millis(TICK_RATE_MS),
    );
    let res = run(&mut terminal, &mut app, &runner, &store);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn run<B: Backend, E: EventSource, S: ConfigStore>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &Runner<E>,
    store: &S,
) -> Result<(), Box<dyn Error>> {
    loop {
        terminal.draw(|f| f.render_widget(&*app, f.area()))?;

        match runner.step() {
            AppEvent::Tick => {
                app.session.on_tick();
                if app.state == AppState::Typing && app.session.is_over() {
                    let size = terminal.size().unwrap_or_default();
                    app.finish(size.width, size.height);
                }
                app.confetti.update();
            }
            AppEvent::Resize => {}
            AppEvent::Key(key) => match key.code {
                KeyCode::Esc => break,
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => break,
                KeyCode::Backspace if app.state == AppState::Typing => {
                    app.backspace();
                }
                KeyCode::Left if app.state == AppState::Typing => {
                    app.retry();
                }
                KeyCode::Right if app.state == AppState::Typing => {
                    app.new_text();
                }
                KeyCode::Char(c) => match app.state {
                    AppState::Typing => {
                        app.type_char(c);
                        if app.session.is_over() {
                            let size = terminal.size().unwrap_or_default();
                            app.finish(size.width, size.height);
                        }
                    }
                    AppState::Results => match c {
                        'r' => app.retry(),
                        'n' => app.new_text(),
                        't' => {
                            app.toggle_timer();
                            let _ = store.save(&app.config);
                        }
                        'd' => {
                            app.toggle_theme();
                            let _ = store.save(&app.config);
                        }
                        _ => {}
                    },
                },
                _ => {}
            },
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_default_values() {
        let cli = Cli::parse_from(["typr"]);

        assert_eq!(cli.seconds, None);
        assert!(!cli.timed);
        assert_eq!(cli.prompt, None);
        assert_eq!(cli.theme, None);
    }

    #[test]
    fn test_cli_seconds() {
        let cli = Cli::parse_from(["typr", "-s", "30"]);
        assert_eq!(cli.seconds, Some(30));

        let cli = Cli::parse_from(["typr", "--seconds", "120"]);
        assert_eq!(cli.seconds, Some(120));
    }

    #[test]
    fn test_cli_timed_flag() {
        let cli = Cli::parse_from(["typr", "-t"]);
        assert!(cli.timed);

        let cli = Cli::parse_from(["typr", "--timed"]);
        assert!(cli.timed);
    }

    #[test]
    fn test_cli_custom_prompt() {
        let cli = Cli::parse_from(["typr", "-p", "hello world"]);
        assert_eq!(cli.prompt, Some("hello world".to_string()));

        let cli = Cli::parse_from(["typr", "--prompt", "custom text"]);
        assert_eq!(cli.prompt, Some("custom text".to_string()));
    }

    #[test]
    fn test_cli_theme() {
        let cli = Cli::parse_from(["typr", "--theme", "light"]);
        assert_eq!(cli.theme, Some(Theme::Light));

        let cli = Cli::parse_from(["typr", "--theme", "dark"]);
        assert_eq!(cli.theme, Some(Theme::Dark));
    }

    #[test]
    fn test_apply_seconds_enables_timed_mode() {
        let cli = Cli::parse_from(["typr", "-s", "30"]);
        let config = cli.apply(Config::default());

        assert!(config.timer_mode);
        assert_eq!(config.time_limit_secs, 30);
    }

    #[test]
    fn test_apply_timed_flag_keeps_configured_limit() {
        let cli = Cli::parse_from(["typr", "-t"]);
        let config = cli.apply(Config {
            time_limit_secs: 45,
            ..Config::default()
        });

        assert!(config.timer_mode);
        assert_eq!(config.time_limit_secs, 45);
    }

    #[test]
    fn test_apply_without_flags_leaves_config_alone() {
        let cli = Cli::parse_from(["typr"]);
        let stored = Config {
            timer_mode: true,
            time_limit_secs: 90,
            theme: Theme::Light,
        };

        assert_eq!(cli.apply(stored.clone()), stored);
    }

    #[test]
    fn test_apply_theme_override() {
        let cli = Cli::parse_from(["typr", "--theme", "light"]);
        let config = cli.apply(Config::default());

        assert_eq!(config.theme, Theme::Light);
    }

    #[test]
    fn test_run_loop_with_test_backend() {
        use ratatui::backend::TestBackend;
        use std::sync::mpsc;
        use typr::runtime::TestEventSource;

        let (tx, rx) = mpsc::channel();
        for c in "hi".chars() {
            tx.send(AppEvent::Key(crossterm::event::KeyEvent::new(
                KeyCode::Char(c),
                KeyModifiers::NONE,
            )))
            .unwrap();
        }
        tx.send(AppEvent::Key(crossterm::event::KeyEvent::new(
            KeyCode::Esc,
            KeyModifiers::NONE,
        )))
        .unwrap();

        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut app = App::new(Config::default(), Some("hi".to_string()));
        let runner = Runner::new(TestEventSource::new(rx), Duration::from_millis(5));

        struct NullStore;
        impl ConfigStore for NullStore {
            fn load(&self) -> Config {
                Config::default()
            }
            fn save(&self, _cfg: &Config) -> std::io::Result<()> {
                Ok(())
            }
        }

        run(&mut terminal, &mut app, &runner, &NullStore).unwrap();

        assert_eq!(app.state, AppState::Results);
        assert!(app.session.is_over());
    }
}
