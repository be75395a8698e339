pub mod vocabulary;
pub mod fixed;

use thiserror::Error;

// Re-export the main types for convenience
pub use vocabulary::{list_languages, Language, Vocabulary};
pub use fixed::FixedSource;

/// Failures raised while resolving a language or producing words
#[derive(Debug, Error)]
pub enum WordSourceError {
    #[error("language '{id}' not available (available: {available})")]
    UnknownLanguage { id: String, available: String },

    #[error("language '{0}' has no words")]
    EmptyVocabulary(String),

    #[error("malformed language file '{id}': {source}")]
    Malformed {
        id: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Supplies the words a session is typed against.
///
/// Implementations return exactly `n` words per call, none containing whitespace.
pub trait WordSource {
    fn generate(&mut self, n: usize) -> Result<Vec<String>, WordSourceError>;
}

impl<W: WordSource + ?Sized> WordSource for Box<W> {
    fn generate(&mut self, n: usize) -> Result<Vec<String>, WordSourceError> {
        (**self).generate(n)
    }
}
