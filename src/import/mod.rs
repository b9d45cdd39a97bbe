//! Building songs from audio files on disk
//!
//! Tags are read with lofty; whatever is missing falls back to the file
//! name or a placeholder so every readable file yields a song.

use crate::model::SongFields;
use anyhow::{Context, Result};
use lofty::file::{AudioFile, TaggedFileExt};
use lofty::probe::Probe;
use lofty::tag::Accessor;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// File extensions treated as audio
pub const AUDIO_EXTENSIONS: [&str; 4] = ["mp3", "wav", "flac", "m4a"];

/// Artist used when a file carries no artist tag
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// Rating given to imported songs
pub const DEFAULT_RATING: i32 = 3;

/// Metadata pulled from an audio file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackTags {
    pub title: String,
    pub artist: String,
    pub genre: String,
    pub duration_seconds: i64,
}

impl TrackTags {
    /// Tags derived from the file name alone
    pub fn from_file_name(path: &Path) -> Self {
        let title = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("Unknown")
            .to_string();

        Self {
            title,
            artist: UNKNOWN_ARTIST.to_string(),
            genre: String::new(),
            duration_seconds: 0,
        }
    }

    /// Song fields for these tags, pointing at `path`
    pub fn into_fields(self, path: &Path) -> SongFields {
        SongFields {
            title: self.title,
            artist: self.artist,
            duration_seconds: self.duration_seconds,
            genre: self.genre,
            rating: DEFAULT_RATING,
            filepath: path.display().to_string(),
            cover_path: String::new(),
        }
    }
}

fn non_empty(text: Option<std::borrow::Cow<'_, str>>) -> Option<String> {
    text.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

/// Read title, artist, genre and duration from an audio file
pub fn read_tags(path: &Path) -> Result<TrackTags> {
    let tagged_file = Probe::open(path)
        .with_context(|| format!("Failed to open audio file: {}", path.display()))?
        .read()
        .with_context(|| format!("Failed to read tags from: {}", path.display()))?;

    let mut tags = TrackTags::from_file_name(path);
    tags.duration_seconds = tagged_file.properties().duration().as_secs() as i64;

    if let Some(tag) = tagged_file.primary_tag().or_else(|| tagged_file.first_tag()) {
        if let Some(title) = non_empty(tag.title()) {
            tags.title = title;
        }
        if let Some(artist) = non_empty(tag.artist()) {
            tags.artist = artist;
        }
        if let Some(genre) = non_empty(tag.genre()) {
            tags.genre = genre;
        }
    } else {
        log::debug!("No tags in {:?}, using file name", path);
    }

    Ok(tags)
}

/// Whether `path` has one of the accepted audio extensions
pub fn is_audio_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| AUDIO_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// All audio files under `dir`, sorted by path
pub fn scan_audio_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).follow_links(true) {
        let entry = entry.with_context(|| format!("Failed to scan {}", dir.display()))?;
        if entry.file_type().is_file() && is_audio_file(entry.path()) {
            files.push(entry.into_path());
        }
    }
    files.sort();

    log::info!("Found {} audio file(s) under {:?}", files.len(), dir);
    Ok(files)
}

/// Song fields for every readable file at `path` (a file or a directory).
///
/// Files whose tags cannot be read are logged and skipped.
pub fn collect_songs(path: &Path) -> Result<Vec<SongFields>> {
    let files = if path.is_dir() {
        scan_audio_files(path)?
    } else {
        vec![path.to_path_buf()]
    };

    let mut songs = Vec::with_capacity(files.len());
    for file in files {
        match read_tags(&file) {
            Ok(tags) => songs.push(tags.into_fields(&file)),
            Err(e) => log::warn!("Skipping {:?}: {:#}", file, e),
        }
    }
    Ok(songs)
}
