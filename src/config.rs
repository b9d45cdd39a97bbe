//! Runtime configuration

use crate::session::Theme;
use std::path::PathBuf;

/// Environment variable naming the library file
pub const LIBRARY_ENV: &str = "SONG_COLLECTOR_LIBRARY";

/// Library location used when none is given
pub const DEFAULT_LIBRARY_PATH: &str = "~/.local/share/song-collector/library.json";

#[derive(Debug, Clone)]
pub struct Config {
    /// JSON document holding the library
    pub library_path: PathBuf,

    /// Table style
    pub theme: Theme,

    pub verbose: bool,
}

impl Config {
    /// Configuration for `library_path`, expanding a leading `~`
    pub fn new(library_path: &str) -> Self {
        Self {
            library_path: expand_path(library_path),
            theme: Theme::Light,
            verbose: false,
        }
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Default log filter: `debug` when verbose, `info` otherwise
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "info"
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_LIBRARY_PATH)
    }
}

/// Expand `~` to the home directory
pub fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_path_unchanged() {
        let config = Config::new("/tmp/library.json").with_theme(Theme::Dark);
        assert_eq!(config.library_path, PathBuf::from("/tmp/library.json"));
        assert_eq!(config.theme, Theme::Dark);
        assert!(!config.verbose);
        assert_eq!(config.log_level(), "info");
    }

    #[test]
    fn test_verbose_raises_log_level() {
        let config = Config::new("/tmp/library.json").with_verbose(true);
        assert_eq!(config.log_level(), "debug");
    }

    #[test]
    fn test_default_path() {
        let config = Config::default();
        assert!(config.library_path.ends_with("song-collector/library.json"));
    }
}
