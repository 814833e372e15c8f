use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use chrono::Local;
use verse_core::{update, Msg, VerseState};
use verse_logging::{verse_error, verse_info};

use super::config::{AppConfig, CONFIG_FILENAME};
use super::effects::EffectRunner;
use super::logging;
use super::ui::{self, constants::*};

const POLL_INTERVAL: Duration = Duration::from_millis(20);

enum Input {
    Msg(Msg),
    Quit,
    /// Stdin reached end of file; quit once nothing is in flight.
    Closed,
}

pub fn run_app() -> ExitCode {
    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILENAME));
    let config = AppConfig::load(&config_path).unwrap_or_else(|err| {
        eprintln!("Warning: {err}; using defaults");
        AppConfig::default()
    });

    let level = match config.level() {
        Ok(level) => level,
        Err(err) => {
            eprintln!("Error: {err}");
            return ExitCode::FAILURE;
        }
    };
    logging::initialize(config.log_destination, level);

    let endpoint = match config.endpoint_url() {
        Ok(endpoint) => endpoint,
        Err(err) => {
            verse_error!("{}", err);
            eprintln!("Error: {err}");
            return ExitCode::FAILURE;
        }
    };

    let runner = EffectRunner::new(endpoint, config.fetch_settings());
    let input_rx = spawn_input_reader();
    let mut app = App::new(runner);
    app.dispatch(Msg::LoadRequested);
    app.run(input_rx);
    ExitCode::SUCCESS
}

struct App {
    state: VerseState,
    runner: EffectRunner,
}

impl App {
    fn new(runner: EffectRunner) -> Self {
        Self {
            state: VerseState::new(),
            runner,
        }
    }

    fn run(&mut self, input_rx: mpsc::Receiver<Input>) {
        let mut input_closed = false;
        loop {
            let mut idle = true;
            while let Ok(input) = input_rx.try_recv() {
                idle = false;
                match input {
                    Input::Msg(msg) => self.dispatch(msg),
                    Input::Quit => return,
                    Input::Closed => input_closed = true,
                }
            }
            while let Some(msg) = self.runner.poll() {
                idle = false;
                self.dispatch(msg);
            }
            if input_closed && self.state.in_flight().is_none() {
                verse_info!("Input closed; exiting");
                return;
            }
            if idle {
                thread::sleep(POLL_INTERVAL);
            }
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        self.runner.enqueue(effects);
        if self.state.consume_dirty() {
            self.render();
        }
    }

    fn render(&self) {
        let today = Local::now().format(DATE_FORMAT).to_string();
        let mut stdout = io::stdout().lock();
        let _ = writeln!(stdout, "\n{}", ui::render::render(&self.state.view(), &today));
        let _ = stdout.flush();
    }
}

fn spawn_input_reader() -> mpsc::Receiver<Input> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if let Some(input) = parse_command(&line) {
                if tx.send(input).is_err() {
                    return;
                }
            }
        }
        let _ = tx.send(Input::Closed);
    });
    rx
}

fn parse_command(line: &str) -> Option<Input> {
    let command = line.trim().to_ascii_lowercase();
    if RETRY_KEYS.contains(&command.as_str()) {
        Some(Input::Msg(Msg::RetryClicked))
    } else if REFRESH_KEYS.contains(&command.as_str()) {
        Some(Input::Msg(Msg::RefreshClicked))
    } else if QUIT_KEYS.contains(&command.as_str()) {
        Some(Input::Quit)
    } else {
        None
    }
}
