//! Keyboard input thread.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use tracing::{debug, warn};

use super::input::KeyMapper;
use crate::scheduler::Command;

/// Prompt text shared between the input thread and the display.
pub type SharedPrompt = Arc<Mutex<Option<String>>>;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Polls terminal events and forwards mapped commands to the scheduler.
pub struct InputThread {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl InputThread {
    pub fn spawn(commands: Sender<Command>, prompt: SharedPrompt) -> io::Result<Self> {
        let stop = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stop);
        let handle = thread::Builder::new()
            .name("pgtop-input".to_string())
            .spawn(move || {
                if let Err(e) = input_loop(&flag, &commands, &prompt) {
                    warn!(error = %e, "input thread failed");
                    let _ = commands.send(Command::Shutdown);
                }
                debug!("input thread stopped");
            })?;
        Ok(Self {
            stop,
            handle: Some(handle),
        })
    }

    /// Stops polling and waits for the thread.
    pub fn stop(mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn input_loop(stop: &AtomicBool, commands: &Sender<Command>, prompt: &SharedPrompt) -> io::Result<()> {
    let mut mapper = KeyMapper::new();
    while !stop.load(Ordering::Relaxed) {
        if !event::poll(POLL_INTERVAL)? {
            continue;
        }
        let cmd = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                let cmd = mapper.handle_key(key);
                if let Ok(mut line) = prompt.lock() {
                    *line = mapper.prompt_line();
                }
                cmd
            }
            Event::Resize(_, _) => Some(Command::Redraw),
            _ => None,
        };
        if let Some(cmd) = cmd {
            // Scheduler gone: nothing left to drive.
            if commands.send(cmd).is_err() {
                break;
            }
        }
    }
    Ok(())
}
