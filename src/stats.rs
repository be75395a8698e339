use std::time::Duration;

/// Characters per "word" in the WPM formulas
const CHARS_PER_WORD: f64 = 5.0;

/// Statistics for a typing session, live or final
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TypingStats {
    /// Net words per minute: gross WPM minus the uncorrected error rate
    pub wpm: f64,
    pub gross_wpm: f64,
    pub accuracy: f64,
    pub characters_typed: usize,
    pub correct_chars: usize,
    /// Characters currently on screen, the three visible lines joined by spaces
    pub total_chars: usize,
    pub uncorrected_errors: usize,
    pub total_errors: usize,
    pub elapsed: Duration,
    pub is_complete: bool,
}

/// Raw counters a session hands over for statistics
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Tally {
    pub characters_typed: usize,
    pub uncorrected_errors: usize,
    pub total_errors: usize,
    pub total_chars: usize,
}

impl TypingStats {
    pub fn compute(tally: Tally, elapsed: Duration, is_complete: bool) -> Self {
        let minutes = elapsed.as_secs_f64() / 60.0;

        let (gross_wpm, error_rate) = if minutes > 0.0 {
            (
                tally.characters_typed as f64 / CHARS_PER_WORD / minutes,
                tally.uncorrected_errors as f64 / minutes,
            )
        } else {
            (0.0, 0.0)
        };

        let correct_chars = tally.characters_typed.saturating_sub(tally.total_errors);
        let accuracy = if tally.characters_typed > 0 {
            correct_chars as f64 / tally.characters_typed as f64 * 100.0
        } else {
            0.0
        };

        Self {
            wpm: (gross_wpm - error_rate).max(0.0),
            gross_wpm,
            accuracy,
            characters_typed: tally.characters_typed,
            correct_chars,
            total_chars: tally.total_chars,
            uncorrected_errors: tally.uncorrected_errors,
            total_errors: tally.total_errors,
            elapsed,
            is_complete,
        }
    }
}
