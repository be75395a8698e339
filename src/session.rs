use std::collections::HashSet;
use std::time::Duration;

use tracing::debug;

use crate::clock::{Clock, SystemClock};
use crate::error::Result;
use crate::language::WordSource;
use crate::lines::{completed_words, count_words, wrap_lines};
use crate::mode::Mode;
use crate::stats::{Tally, TypingStats};

pub const LINES_PER_VIEW: usize = 3;
pub const CHARS_PER_LINE: usize = 50;

/// Time-bound sessions refill once fewer than this many words are left
const REFILL_THRESHOLD: usize = 50;
const REFILL_WORDS: usize = 100;

/// Everything that `reset` throws away
#[derive(Debug, Clone)]
struct TypingState {
    words: Vec<String>,
    lines: Vec<String>,
    line_input: String,
    cursor: usize,
    global_pos: usize,
    errors: HashSet<usize>,
    total_errors: usize,
    words_consumed: usize,
    started_at: Option<std::time::Instant>,
}

impl TypingState {
    fn new<S: WordSource>(mode: Mode, source: &mut S) -> Result<Self> {
        let words = source.generate(mode.initial_words())?;
        let lines = wrap_lines(&words, CHARS_PER_LINE, LINES_PER_VIEW);

        Ok(Self {
            words,
            lines,
            line_input: String::new(),
            cursor: 0,
            global_pos: 0,
            errors: HashSet::new(),
            total_errors: 0,
            words_consumed: 0,
            started_at: None,
        })
    }

    fn current_line_len(&self) -> usize {
        self.lines[0].chars().count()
    }
}

/// A typing test: the word buffer, the visible window over it and the
/// keystroke bookkeeping needed for live and final statistics.
///
/// Driven one event at a time by its owner; time is only read when asked.
#[derive(Debug)]
pub struct Session<S = crate::language::Vocabulary, C = SystemClock> {
    mode: Mode,
    source: S,
    clock: C,
    state: TypingState,
}

impl<S: WordSource> Session<S, SystemClock> {
    pub fn new(mode: Mode, source: S) -> Result<Self> {
        Self::with_clock(mode, source, SystemClock)
    }

    pub fn duration(secs: u64, source: S) -> Result<Self> {
        Self::new(Mode::Duration(secs), source)
    }

    pub fn word_count(target: usize, source: S) -> Result<Self> {
        Self::new(Mode::WordCount(target), source)
    }
}

impl<S: WordSource, C: Clock> Session<S, C> {
    pub fn with_clock(mode: Mode, mut source: S, clock: C) -> Result<Self> {
        let state = TypingState::new(mode, &mut source)?;
        Ok(Self {
            mode,
            source,
            clock,
            state,
        })
    }

    /// Start timing. Only the first call has an effect.
    pub fn start(&mut self) {
        if self.state.started_at.is_none() {
            self.state.started_at = Some(self.clock.now());
            debug!(mode = ?self.mode, "session started");
        }
    }

    pub fn is_started(&self) -> bool {
        self.state.started_at.is_some()
    }

    pub fn is_finished(&self) -> bool {
        if !self.is_started() {
            return false;
        }

        match self.mode {
            Mode::Duration(secs) => self.elapsed() >= Duration::from_secs(secs),
            Mode::WordCount(target) => self.words_typed() >= target,
        }
    }

    /// Feed one typed character.
    ///
    /// Mid-line every character is accepted and compared against the expected
    /// one, wrong characters included. At the end of the line only a space is
    /// accepted, and it moves the window to the next line.
    pub fn add_character(&mut self, ch: char) -> Result<()> {
        self.start();
        if self.is_finished() {
            return Ok(());
        }

        let expected = self.state.lines[0].chars().nth(self.state.cursor);
        match expected {
            None => {
                if ch == ' ' {
                    self.advance(ch);
                    self.shift_lines()?;
                }
            }
            Some(expected) => {
                if ch != expected {
                    self.state.errors.insert(self.state.global_pos);
                    self.state.total_errors += 1;
                }
                self.advance(ch);
            }
        }

        Ok(())
    }

    /// Enter commits a fully typed line, the same as a trailing space.
    /// Returns false when the line is not finished yet.
    pub fn handle_enter(&mut self) -> Result<bool> {
        if self.is_finished() || self.state.cursor != self.state.current_line_len() {
            return Ok(false);
        }

        self.advance(' ');
        self.shift_lines()?;
        Ok(true)
    }

    /// Backspace, limited to what was typed on the current line
    pub fn remove_character(&mut self) {
        let state = &mut self.state;
        if state.cursor == 0 || state.line_input.pop().is_none() {
            return;
        }

        state.cursor -= 1;
        state.global_pos -= 1;
        state.errors.remove(&state.global_pos);
    }

    /// Throw away all progress and start over with fresh words, same mode
    pub fn reset(&mut self) -> Result<()> {
        self.state = TypingState::new(self.mode, &mut self.source)?;
        debug!(mode = ?self.mode, "session reset");
        Ok(())
    }

    fn advance(&mut self, ch: char) {
        self.state.line_input.push(ch);
        self.state.cursor += 1;
        self.state.global_pos += 1;
    }

    fn shift_lines(&mut self) -> Result<()> {
        let state = &mut self.state;
        state.words_consumed += count_words(&state.lines[0]);
        state.cursor = 0;
        state.line_input.clear();

        let remaining = state.words.len().saturating_sub(state.words_consumed);
        let refill = if self.mode.extends_buffer() && remaining < REFILL_THRESHOLD {
            self.source.generate(REFILL_WORDS).map(|more| {
                state.words.extend(more);
                debug!(buffer = state.words.len(), "word buffer refilled");
            })
        } else {
            Ok(())
        };

        // the window moves on even when the refill failed
        let rest = state.words.get(state.words_consumed..).unwrap_or_default();
        state.lines = wrap_lines(rest, CHARS_PER_LINE, LINES_PER_VIEW);
        debug!(words_consumed = state.words_consumed, "line shift");
        refill.map_err(Into::into)
    }

    /// Completed lines plus the words finished on the current line
    pub fn words_typed(&self) -> usize {
        self.state.words_consumed + completed_words(&self.state.lines[0], self.state.cursor)
    }

    pub fn visible_lines(&self) -> &[String] {
        &self.state.lines
    }

    pub fn cursor_position(&self) -> usize {
        self.state.cursor
    }

    /// What has been typed on the first visible line
    pub fn current_input(&self) -> &str {
        &self.state.line_input
    }

    pub fn global_position(&self) -> usize {
        self.state.global_pos
    }

    pub fn uncorrected_errors(&self) -> &HashSet<usize> {
        &self.state.errors
    }

    pub fn total_errors(&self) -> usize {
        self.state.total_errors
    }

    pub fn words_consumed(&self) -> usize {
        self.state.words_consumed
    }

    /// Size of the word buffer, including words already typed
    pub fn buffered_words(&self) -> usize {
        self.state.words.len()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn elapsed(&self) -> Duration {
        self.state
            .started_at
            .map(|t| self.clock.now().saturating_duration_since(t))
            .unwrap_or_default()
    }

    /// Whole seconds left in a time-bound session, 0 for word-bound ones
    pub fn remaining_time(&self) -> u64 {
        match self.mode {
            Mode::Duration(secs) => secs.saturating_sub(self.elapsed().as_secs()),
            Mode::WordCount(_) => 0,
        }
    }

    /// Words left in a word-bound session, 0 for time-bound ones
    pub fn remaining_words(&self) -> usize {
        match self.mode {
            Mode::WordCount(target) => target.saturating_sub(self.words_typed()),
            Mode::Duration(_) => 0,
        }
    }

    pub fn stats(&self) -> TypingStats {
        if !self.is_started() {
            return TypingStats::default();
        }

        let tally = Tally {
            characters_typed: self.state.global_pos,
            uncorrected_errors: self.state.errors.len(),
            total_errors: self.state.total_errors,
            total_chars: self.state.lines.join(" ").chars().count(),
        };
        TypingStats::compute(tally, self.elapsed(), self.is_finished())
    }
}
