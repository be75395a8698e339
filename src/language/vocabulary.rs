use include_dir::{include_dir, Dir};
use itertools::Itertools;
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use serde::Deserialize;
use serde_json::from_str;

use super::{WordSource, WordSourceError};

static LANG_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/lang");

#[derive(Deserialize, Clone, Debug)]
pub struct Language {
    pub name: String,
    #[serde(default)]
    pub size: u32,
    pub words: Vec<String>,
}

impl Language {
    /// Load an embedded word list by its identifier (the file stem)
    pub fn load(id: &str) -> Result<Self, WordSourceError> {
        let contents = LANG_DIR
            .get_file(format!("{id}.json"))
            .and_then(|file| file.contents_utf8())
            .ok_or_else(|| WordSourceError::UnknownLanguage {
                id: id.to_string(),
                available: list_languages().join(", "),
            })?;

        let mut lang: Language = from_str(contents).map_err(|source| WordSourceError::Malformed {
            id: id.to_string(),
            source,
        })?;

        // words must never carry whitespace, the line windowing counts on it
        lang.words = lang
            .words
            .into_iter()
            .filter_map(|w| {
                let w = w.trim();
                (!w.is_empty() && !w.contains(char::is_whitespace)).then(|| w.to_string())
            })
            .collect();

        if lang.words.is_empty() {
            return Err(WordSourceError::EmptyVocabulary(id.to_string()));
        }

        Ok(lang)
    }
}

/// Identifiers of every embedded language, sorted
pub fn list_languages() -> Vec<String> {
    LANG_DIR
        .files()
        .filter(|f| f.path().extension().is_some_and(|ext| ext == "json"))
        .filter_map(|f| f.path().file_stem()?.to_str().map(str::to_string))
        .sorted()
        .collect()
}

/// Word source backed by an embedded language, sampling words at random
#[derive(Debug)]
pub struct Vocabulary {
    id: String,
    language: Language,
    rng: StdRng,
}

impl Vocabulary {
    pub fn load(id: &str) -> Result<Self, WordSourceError> {
        Ok(Self {
            id: id.to_string(),
            language: Language::load(id)?,
            rng: StdRng::from_entropy(),
        })
    }

    /// Same as [`Vocabulary::load`] with a fixed RNG seed, for reproducible word sequences
    pub fn with_seed(id: &str, seed: u64) -> Result<Self, WordSourceError> {
        Ok(Self {
            id: id.to_string(),
            language: Language::load(id)?,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    /// Switch to another language. The current selection is kept on failure.
    pub fn set_language(&mut self, id: &str) -> Result<(), WordSourceError> {
        self.language = Language::load(id)?;
        self.id = id.to_string();
        Ok(())
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn language(&self) -> &Language {
        &self.language
    }
}

impl WordSource for Vocabulary {
    fn generate(&mut self, n: usize) -> Result<Vec<String>, WordSourceError> {
        let words = &self.language.words;
        (0..n)
            .map(|_| {
                words
                    .choose(&mut self.rng)
                    .cloned()
                    .ok_or_else(|| WordSourceError::EmptyVocabulary(self.id.clone()))
            })
            .collect()
    }
}
