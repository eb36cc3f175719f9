//! Terminal user interface for pgtop.
//!
//! The scheduler draws through [`TuiSink`]; a separate input thread maps keys
//! to scheduler commands.

mod app;
mod event;
mod input;
mod render;
mod style;

pub use app::App;
pub use event::{InputThread, SharedPrompt};
pub use input::{KeyMapper, Prompt};
pub use render::TuiSink;
