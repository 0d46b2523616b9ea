use std::collections::VecDeque;
use std::time::Duration;

use anyhow::Context;
use registry_core::{update, AppState, Msg};
use registry_engine::EngineHandle;
use registry_logging::{registry_debug, registry_info};

use super::commands::{parse_command, Command, CommandError, HELP_TEXT};
use super::config::{config_path_from_args, load_config, BASE_URL_ENV};
use super::console::{Console, LineEvent, TerminalConsole};
use super::effects::EffectRunner;
use super::{logging, render};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

pub fn run_app() -> anyhow::Result<()> {
    let config_path = config_path_from_args(std::env::args().skip(1));
    let config = load_config(&config_path)?
        .with_base_url_override(std::env::var(BASE_URL_ENV).ok());
    logging::initialize(config.log_destination, config.level_filter());
    registry_info!("Starting registry client with config {:?}", config_path);

    let engine = EngineHandle::new(config.api_settings())
        .with_context(|| format!("invalid backend url {:?}", config.base_url))?;

    let mut app = App::new(EffectRunner::new(engine), TerminalConsole::spawn_stdin());
    app.console.show(&[HELP_TEXT.to_string(), String::new()]);
    app.start();

    loop {
        app.pump_engine();
        match app.console.next_line(POLL_INTERVAL) {
            LineEvent::Line(line) => {
                if app.handle_line(&line) == Flow::Quit {
                    break;
                }
            }
            LineEvent::Idle => {}
            LineEvent::Closed => break,
        }
    }

    app.shutdown();
    registry_info!("Registry client stopped");
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

struct App<C: Console> {
    state: AppState,
    runner: EffectRunner,
    console: C,
}

impl<C: Console> App<C> {
    fn new(runner: EffectRunner, console: C) -> Self {
        Self {
            state: AppState::new(),
            runner,
            console,
        }
    }

    /// Mounts the listing, which triggers its initial load.
    fn start(&mut self) {
        let view = self.state.view();
        self.console.show(&render::render(&view));
        self.dispatch(Msg::ListingMounted);
    }

    fn handle_line(&mut self, line: &str) -> Flow {
        match parse_command(line) {
            Ok(Command::Quit) => return Flow::Quit,
            Ok(Command::Help) => self.console.show(&[HELP_TEXT.to_string()]),
            Ok(command) => {
                if let Some(msg) = command.into_msg() {
                    self.dispatch(msg);
                }
            }
            Err(CommandError::Empty) => {}
            Err(err) => self.console.show(&[err.to_string()]),
        }
        Flow::Continue
    }

    fn pump_engine(&mut self) {
        while let Some(msg) = self.runner.try_next() {
            self.dispatch(msg);
        }
    }

    /// Waits for one engine event and applies it. Returns false on timeout.
    #[cfg(test)]
    fn wait_for_engine(&mut self, timeout: Duration) -> bool {
        match self.runner.wait_next(timeout) {
            Some(msg) => {
                self.dispatch(msg);
                true
            }
            None => false,
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        let mut inbox = VecDeque::from([msg]);
        while let Some(msg) = inbox.pop_front() {
            registry_debug!("dispatch {:?}", msg);
            let state = std::mem::take(&mut self.state);
            let (state, effects) = update(state, msg);
            self.state = state;
            inbox.extend(self.runner.run(effects, &mut self.console));
        }

        if self.state.consume_dirty() {
            let view = self.state.view();
            self.console.show(&render::render(&view));
        }
    }

    /// Disposes both components; releases the pending reset timer, if any.
    fn shutdown(&mut self) {
        self.dispatch(Msg::FormDisposed);
        self.dispatch(Msg::ListingUnmounted);
    }
}
