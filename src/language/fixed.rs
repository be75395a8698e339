use super::{WordSource, WordSourceError};

/// Deterministic source that cycles through a fixed list of words
#[derive(Debug, Clone)]
pub struct FixedSource {
    words: Vec<String>,
    next: usize,
    calls: usize,
}

impl FixedSource {
    /// Blank words and words containing whitespace are dropped
    pub fn new<I, T>(words: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            words: words
                .into_iter()
                .map(Into::into)
                .filter(|w: &String| !w.is_empty() && !w.contains(char::is_whitespace))
                .collect(),
            next: 0,
            calls: 0,
        }
    }

    /// Number of times `generate` has been called
    pub fn calls(&self) -> usize {
        self.calls
    }
}

impl WordSource for FixedSource {
    fn generate(&mut self, n: usize) -> Result<Vec<String>, WordSourceError> {
        if self.words.is_empty() {
            return Err(WordSourceError::EmptyVocabulary("fixed".to_string()));
        }
        self.calls += 1;

        let out = (0..n)
            .map(|i| self.words[(self.next + i) % self.words.len()].clone())
            .collect();
        self.next = (self.next + n) % self.words.len();
        Ok(out)
    }
}
