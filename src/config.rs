use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Keybindings {
    pub quit: Vec<String>,
    pub restart: Vec<String>,
    pub next_line: Vec<String>,
}

impl Default for Keybindings {
    fn default() -> Self {
        Self {
            quit: vec!["ctrl+c".to_string(), "esc".to_string()],
            restart: vec!["enter".to_string()],
            next_line: vec!["enter".to_string()],
        }
    }
}

/// User preferences; command line flags take precedence over these
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// `time` or `word`, parsed when the session is built
    pub mode: String,
    pub duration: u64,
    pub words: usize,
    pub language: String,
    pub keybindings: Keybindings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: "time".to_string(),
            duration: 30,
            words: 50,
            language: "en".to_string(),
            keybindings: Keybindings::default(),
        }
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", "typtea") {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("typtea_config.json")
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    /// Missing or unreadable files yield the defaults
    fn load(&self) -> Config {
        let Ok(bytes) = fs::read(&self.path) else {
            return Config::default();
        };

        match serde_json::from_slice::<Config>(&bytes) {
            Ok(cfg) => cfg,
            Err(err) => {
                warn!(path = %self.path.display(), %err, "ignoring unreadable config");
                Config::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write_config(path: &Path, cfg: &Config) {
        fs::write(path, serde_json::to_vec_pretty(cfg).unwrap()).unwrap();
    }

    #[test]
    fn roundtrip_default_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let cfg = Config::default();
        write_config(&path, &cfg);
        assert_eq!(FileConfigStore::with_path(&path).load(), cfg);
    }

    #[test]
    fn save_and_load_custom_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let store = FileConfigStore::with_path(&path);
        let cfg = Config {
            mode: "word".into(),
            duration: 60,
            words: 100,
            language: "rust".into(),
            keybindings: Keybindings {
                quit: vec!["ctrl+q".into()],
                restart: vec!["tab".into()],
                next_line: vec!["enter".into()],
            },
        };
        write_config(&path, &cfg);
        let loaded = store.load();
        assert_eq!(cfg, loaded);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let store = FileConfigStore::with_path(dir.path().join("absent.json"));
        assert_eq!(store.load(), Config::default());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "mode": "word", "keybindings": { "quit": ["q"] } }"#).unwrap();

        let cfg = FileConfigStore::with_path(&path).load();
        assert_eq!(cfg.mode, "word");
        assert_eq!(cfg.words, 50);
        assert_eq!(cfg.keybindings.quit, vec!["q"]);
        assert_eq!(cfg.keybindings.restart, vec!["enter"]);
    }

    #[test]
    fn malformed_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();

        assert_eq!(FileConfigStore::with_path(&path).load(), Config::default());
    }
}
