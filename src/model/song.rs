use crate::error::{LibraryError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Lowest accepted rating
pub const MIN_RATING: i32 = 1;

/// Highest accepted rating
pub const MAX_RATING: i32 = 5;

/// A single song in the collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    /// Track title
    pub title: String,

    /// Artist name
    pub artist: String,

    /// Length in seconds
    pub duration_seconds: i64,

    /// Genre (may be empty)
    pub genre: String,

    /// Rating from 1 to 5
    pub rating: i32,

    /// Path to the audio file, empty when none was chosen
    #[serde(default)]
    pub filepath: String,

    /// Path to the album cover image, empty when none was chosen
    #[serde(default)]
    pub cover_path: String,

    /// Store-assigned identifier
    #[serde(default)]
    pub id: u32,
}

/// Duration and rating checks shared by creation and loading
fn check_bounds(duration_seconds: i64, rating: i32) -> Result<()> {
    if duration_seconds < 0 {
        return Err(LibraryError::validation(
            "duration_seconds",
            format!("duration must be non-negative, got {}", duration_seconds),
        ));
    }
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(LibraryError::validation(
            "rating",
            format!(
                "rating must be between {} and {}, got {}",
                MIN_RATING, MAX_RATING, rating
            ),
        ));
    }
    Ok(())
}

/// Editable fields of a song, as entered by the user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SongFields {
    pub title: String,
    pub artist: String,
    pub duration_seconds: i64,
    pub genre: String,
    pub rating: i32,
    pub filepath: String,
    pub cover_path: String,
}

impl SongFields {
    /// Check the creation-time invariants
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(LibraryError::validation("title", "title is required"));
        }
        if self.artist.trim().is_empty() {
            return Err(LibraryError::validation("artist", "artist is required"));
        }
        check_bounds(self.duration_seconds, self.rating)
    }

    pub(crate) fn into_song(self, id: u32) -> Song {
        Song {
            title: self.title,
            artist: self.artist,
            duration_seconds: self.duration_seconds,
            genre: self.genre,
            rating: self.rating,
            filepath: self.filepath,
            cover_path: self.cover_path,
            id,
        }
    }
}

impl From<&Song> for SongFields {
    fn from(song: &Song) -> Self {
        Self {
            title: song.title.clone(),
            artist: song.artist.clone(),
            duration_seconds: song.duration_seconds,
            genre: song.genre.clone(),
            rating: song.rating,
            filepath: song.filepath.clone(),
            cover_path: song.cover_path.clone(),
        }
    }
}

impl Song {
    /// Range checks applied to every record read from disk
    pub fn check_bounds(&self) -> Result<()> {
        check_bounds(self.duration_seconds, self.rating)
    }

    pub fn duration_minutes(&self) -> f64 {
        self.duration_seconds as f64 / 60.0
    }

    /// Whether an audio file was attached to this song
    pub fn has_file(&self) -> bool {
        !self.filepath.is_empty()
    }

    /// Audio file path, if one was attached
    pub fn audio_path(&self) -> Option<&Path> {
        self.has_file().then(|| Path::new(&self.filepath))
    }

    /// Cover image path, if one was attached
    pub fn cover(&self) -> Option<&Path> {
        (!self.cover_path.is_empty()).then(|| Path::new(&self.cover_path))
    }

    /// Word-overlap similarity between `keyword` and "title artist".
    ///
    /// Both sides are lowercased and split on whitespace; the score is the
    /// Jaccard index of the two word sets, in `0.0..=1.0`. An empty set on
    /// either side scores 0.
    pub fn similarity_score(&self, keyword: &str) -> f64 {
        let keyword = keyword.to_lowercase();
        let keyword_words: HashSet<&str> = keyword.split_whitespace().collect();

        let text = format!("{} {}", self.title, self.artist).to_lowercase();
        let song_words: HashSet<&str> = text.split_whitespace().collect();

        if keyword_words.is_empty() || song_words.is_empty() {
            return 0.0;
        }

        let common = keyword_words.intersection(&song_words).count();
        let union = keyword_words.union(&song_words).count();
        common as f64 / union as f64
    }
}
