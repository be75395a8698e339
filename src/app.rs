use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::info;

use crate::clock::{Clock, SystemClock};
use crate::error::Result;
use crate::keymap::KeyMap;
use crate::language::{Vocabulary, WordSource};
use crate::runtime::AppEvent;
use crate::session::Session;
use crate::stats::TypingStats;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Typing,
    Results,
}

/// Whether the event loop should keep going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// Presentation state around a session: which screen is up and the
/// statistics frozen when the session ended
#[derive(Debug)]
pub struct App<S = Vocabulary, C = SystemClock> {
    pub session: Session<S, C>,
    pub state: AppState,
    pub final_stats: Option<TypingStats>,
    pub keymap: KeyMap,
    pub language: String,
}

impl<S: WordSource, C: Clock> App<S, C> {
    pub fn new(session: Session<S, C>, keymap: KeyMap, language: impl Into<String>) -> Self {
        Self {
            session,
            state: AppState::Typing,
            final_stats: None,
            keymap,
            language: language.into(),
        }
    }

    pub fn on_event(&mut self, event: &AppEvent) -> Result<Control> {
        match event {
            AppEvent::Key(key) => self.on_key(key),
            AppEvent::Tick => {
                self.on_tick();
                Ok(Control::Continue)
            }
            AppEvent::Resize => Ok(Control::Continue),
        }
    }

    pub fn on_key(&mut self, key: &KeyEvent) -> Result<Control> {
        if self.keymap.is_quit(key) {
            return Ok(Control::Quit);
        }

        match self.state {
            AppState::Results => {
                if self.keymap.is_restart(key) {
                    self.restart()?;
                }
            }
            AppState::Typing => {
                self.on_typing_key(key)?;
                self.on_tick();
            }
        }

        Ok(Control::Continue)
    }

    fn on_typing_key(&mut self, key: &KeyEvent) -> Result<()> {
        if self.session.is_finished() {
            return Ok(());
        }

        // a next-line key bound to a character is still typed mid-line
        if self.keymap.is_next_line(key) && self.session.handle_enter()? {
            return Ok(());
        }

        match key.code {
            KeyCode::Backspace => self.session.remove_character(),
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
                    && (' '..='~').contains(&c) =>
            {
                self.session.add_character(c)?
            }
            _ => {}
        }
        Ok(())
    }

    /// Capture the final statistics once the session has ended
    pub fn on_tick(&mut self) {
        if self.state != AppState::Typing
            || !self.session.is_started()
            || !self.session.is_finished()
        {
            return;
        }

        let stats = self.session.stats();
        info!(
            wpm = stats.wpm,
            accuracy = stats.accuracy,
            chars = stats.characters_typed,
            "session finished"
        );
        self.final_stats = Some(stats);
        self.state = AppState::Results;
    }

    pub fn restart(&mut self) -> Result<()> {
        self.session.reset()?;
        self.state = AppState::Typing;
        self.final_stats = None;
        Ok(())
    }
}
