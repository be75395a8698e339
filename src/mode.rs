use std::{ops::RangeInclusive, str::FromStr};

use clap::ValueEnum;

use crate::error::{Error, Result};

pub const DURATION_RANGE: RangeInclusive<u64> = 10..=300;
pub const WORDS_RANGE: RangeInclusive<u64> = 10..=500;

/// Words requested up front for a time-bound session
const DURATION_INITIAL_WORDS: usize = 200;

/// The two ways a session can end, each carrying its parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Ends once this many seconds have passed since the first keystroke
    Duration(u64),
    /// Ends once this many words have been typed
    WordCount(usize),
}

impl Mode {
    pub fn from_kind(kind: ModeKind, duration_secs: u64, target_words: usize) -> Self {
        match kind {
            ModeKind::Time => Mode::Duration(duration_secs),
            ModeKind::Word => Mode::WordCount(target_words),
        }
    }

    /// Size of the word buffer a fresh session starts with
    pub fn initial_words(&self) -> usize {
        match *self {
            Mode::Duration(_) => DURATION_INITIAL_WORDS,
            Mode::WordCount(target) => target,
        }
    }

    /// Only time-bound sessions grow their buffer; word-bound ones are finite
    pub fn extends_buffer(&self) -> bool {
        matches!(self, Mode::Duration(_))
    }

    /// Check the parameter against the ranges the CLI accepts
    pub fn validate(&self) -> Result<()> {
        let (name, range, value) = match *self {
            Mode::Duration(secs) => ("duration", DURATION_RANGE, secs),
            Mode::WordCount(target) => ("word count", WORDS_RANGE, target as u64),
        };

        if range.contains(&value) {
            Ok(())
        } else {
            Err(Error::OutOfRange {
                name,
                min: *range.start(),
                max: *range.end(),
                value,
            })
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum ModeKind {
    Time,
    Word,
}

impl FromStr for ModeKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "time" => Ok(ModeKind::Time),
            "word" => Ok(ModeKind::Word),
            _ => Err(Error::InvalidMode(s.to_string())),
        }
    }
}
