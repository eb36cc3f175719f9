//! Main TUI application.

use std::io;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::{info, warn};

use super::event::{InputThread, SharedPrompt};
use super::render::TuiSink;
use crate::collector::OsSources;
use crate::config::Config;
use crate::connection::Connection;
use crate::scheduler::{Command, Scheduler};

/// Interactive monitor: terminal, input thread and scheduler.
pub struct App {
    conn: Box<dyn Connection>,
    config: Config,
    os: OsSources,
}

impl App {
    pub fn new(conn: Box<dyn Connection>, config: Config, os: OsSources) -> Self {
        Self { conn, config, os }
    }

    /// Runs the monitor until the operator quits or SIGINT arrives.
    pub fn run(self) -> io::Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;

        let (tx, rx) = mpsc::channel();
        let signal_tx = tx.clone();
        if let Err(e) = ctrlc::set_handler(move || {
            let _ = signal_tx.send(Command::Shutdown);
        }) {
            warn!(error = %e, "cannot install SIGINT handler");
        }

        let prompt: SharedPrompt = Arc::new(Mutex::new(None));
        let input = InputThread::spawn(tx, Arc::clone(&prompt));

        let sink = TuiSink::new(terminal, prompt);
        let mut scheduler = Scheduler::new(self.conn, self.config, self.os, sink, rx);
        let result = match input {
            Ok(input) => {
                let result = scheduler.run();
                input.stop();
                result
            }
            Err(e) => Err(e),
        };

        // Restore terminal
        let terminal = scheduler.sink_mut().terminal_mut();
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        info!("monitor closed");
        result
    }
}
