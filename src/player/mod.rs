//! Playback by delegation
//!
//! Nothing here decodes audio. A single song's file is handed to the OS
//! default application; several songs are written to an M3U playlist first
//! and the playlist is opened instead.

mod launcher;
mod playlist;

pub use launcher::{MediaLauncher, RecordingLauncher, SystemLauncher};
pub use playlist::{playlist_contents, write_playlist_in, PLAYLIST_EXTENSION};

use crate::model::{Library, Song};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlayError {
    #[error("No valid audio files to play")]
    NothingToPlay,

    #[error("Song {0} has no audio file")]
    NoAudioFile(u32),

    #[error("Could not create playlist: {0}")]
    Playlist(#[from] std::io::Error),

    #[error("Cannot open {path:?}: {reason}")]
    Launch { path: PathBuf, reason: String },
}

/// Audio files of `songs` that are set and exist on disk, in order
pub fn playable_paths(songs: &[Song]) -> Vec<PathBuf> {
    songs
        .iter()
        .filter_map(|s| s.audio_path())
        .filter(|p| p.exists())
        .map(|p| p.to_path_buf())
        .collect()
}

/// Plays songs through a [`MediaLauncher`]
pub struct Player<L: MediaLauncher> {
    launcher: L,
    playlist_dir: PathBuf,
}

impl<L: MediaLauncher> Player<L> {
    /// Create a player that writes playlists to the system temp directory
    pub fn new(launcher: L) -> Self {
        Self {
            launcher,
            playlist_dir: std::env::temp_dir(),
        }
    }

    /// Write generated playlists to `dir` instead
    pub fn with_playlist_dir(mut self, dir: PathBuf) -> Self {
        self.playlist_dir = dir;
        self
    }

    pub fn launcher(&self) -> &L {
        &self.launcher
    }

    /// Play `songs` in order, returning the path that was opened
    pub fn play(&self, songs: &[Song]) -> Result<PathBuf, PlayError> {
        let paths = playable_paths(songs);
        log::info!("{} of {} song(s) are playable", paths.len(), songs.len());

        let target = match paths.as_slice() {
            [] => return Err(PlayError::NothingToPlay),
            [single] => single.clone(),
            _ => write_playlist_in(&self.playlist_dir, &paths)?,
        };

        self.launcher.open(&target)?;
        Ok(target)
    }

    /// Play the whole library in its current order
    pub fn play_all(&self, library: &Library) -> Result<PathBuf, PlayError> {
        if library.is_empty() {
            return Err(PlayError::NothingToPlay);
        }
        self.play(library.songs())
    }

    /// Play one song chosen at random, returning it
    pub fn play_random(&self, library: &Library) -> Result<Song, PlayError> {
        let song = library.random_song().ok_or(PlayError::NothingToPlay)?;
        let path = song.audio_path().ok_or(PlayError::NoAudioFile(song.id))?;

        log::info!("Random pick: {} - {}", song.artist, song.title);
        self.launcher.open(path)?;
        Ok(song)
    }
}
