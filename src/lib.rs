// Library surface for headless/integration tests and reuse.
// Terminal setup and CLI parsing live in main.rs.
pub mod app;
pub mod clock;
pub mod config;
pub mod error;
pub mod keymap;
pub mod language;
pub mod lines;
pub mod mode;
pub mod runtime;
pub mod session;
pub mod stats;
pub mod ui;

pub use error::{Error, Result};
pub use mode::{Mode, ModeKind};
pub use session::Session;
pub use stats::TypingStats;

/// How often the event loop re-checks a running session
pub const TICK_RATE_MS: u64 = 100;
