//! Input handling and keybindings.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::config::View;
use crate::scheduler::Command;

/// Question the operator is currently answering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prompt {
    /// Pid to cancel or terminate.
    Pid { mode: &'static str },
    /// Group letters for the process mask.
    Mask,
    /// Minimum age, `HH:MM:SS`.
    MinAge,
}

impl Prompt {
    fn question(self) -> &'static str {
        match self {
            Prompt::Pid { mode: "cancel" } => "PID to cancel: ",
            Prompt::Pid { .. } => "PID to terminate: ",
            Prompt::Mask => "Mask: i idle, x idle_xact, a active, w waiting, o others: ",
            Prompt::MinAge => "Min age (HH:MM:SS): ",
        }
    }

    fn answer(self, input: String) -> Command {
        match self {
            Prompt::Pid { mode } => Command::SignalSingle {
                mode: mode.to_string(),
                target: input,
            },
            Prompt::Mask => Command::SetMask(input),
            Prompt::MinAge => Command::SetMinAge(input),
        }
    }
}

/// Turns key presses into scheduler commands.
///
/// Keys that open a prompt collect input until Enter; Esc abandons it. Every
/// prompt change yields [`Command::Redraw`] so the prompt line is repainted.
#[derive(Debug, Default)]
pub struct KeyMapper {
    prompt: Option<(Prompt, String)>,
}

impl KeyMapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text of the open prompt including what was typed so far.
    pub fn prompt_line(&self) -> Option<String> {
        self.prompt
            .as_ref()
            .map(|(p, input)| format!("{}{}", p.question(), input))
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Command> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Some(Command::Shutdown);
        }
        match self.prompt.take() {
            Some((prompt, input)) => Some(self.handle_prompt(prompt, input, key)),
            None => self.handle_normal(key),
        }
    }

    fn open(&mut self, prompt: Prompt) -> Option<Command> {
        self.prompt = Some((prompt, String::new()));
        Some(Command::Redraw)
    }

    fn handle_prompt(&mut self, prompt: Prompt, mut input: String, key: KeyEvent) -> Command {
        match key.code {
            KeyCode::Enter => return prompt.answer(input),
            KeyCode::Esc => return Command::Redraw,
            KeyCode::Backspace => {
                input.pop();
            }
            KeyCode::Char(c) => input.push(c),
            _ => {}
        }
        self.prompt = Some((prompt, input));
        Command::Redraw
    }

    fn handle_normal(&mut self, key: KeyEvent) -> Option<Command> {
        let cmd = match key.code {
            KeyCode::Char('q') => Command::Shutdown,
            KeyCode::Char(' ') => Command::ForceUpdate,

            // Views
            KeyCode::Char('d') => Command::SwitchView(View::Databases),
            KeyCode::Char('t') => Command::SwitchView(View::Tables),
            KeyCode::Char('i') => Command::SwitchView(View::Indexes),
            KeyCode::Char('f') => Command::SwitchView(View::Functions),
            KeyCode::Char('a') => Command::SwitchView(View::Activity),

            // Sorting
            KeyCode::Char('<') | KeyCode::Left => Command::SortPrev,
            KeyCode::Char('>') | KeyCode::Right => Command::SortNext,

            // Signals
            KeyCode::Char('c') => return self.open(Prompt::Pid { mode: "cancel" }),
            KeyCode::Char('k') => return self.open(Prompt::Pid { mode: "terminate" }),
            KeyCode::Char('C') => Command::SignalGroup {
                mode: "cancel".to_string(),
            },
            KeyCode::Char('K') => Command::SignalGroup {
                mode: "terminate".to_string(),
            },
            KeyCode::Char('M') => return self.open(Prompt::Mask),
            KeyCode::Char('m') => Command::ShowMask,
            KeyCode::Char('A') => return self.open(Prompt::MinAge),
            _ => return None,
        };
        Some(cmd)
    }
}
