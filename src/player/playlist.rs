//! M3U playlists for multi-song playback

use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::Builder;

/// Extension the OS uses to pick a player for the playlist
pub const PLAYLIST_EXTENSION: &str = ".m3u";

/// Playlist body: one path per line
pub fn playlist_contents(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| format!("{}\n", p.display()))
        .collect()
}

/// Write a playlist to a new `.m3u` file in `dir` that outlives this process
pub fn write_playlist_in(dir: &Path, paths: &[PathBuf]) -> std::io::Result<PathBuf> {
    let mut file = Builder::new()
        .prefix("song-collector-")
        .suffix(PLAYLIST_EXTENSION)
        .tempfile_in(dir)?;
    file.write_all(playlist_contents(paths).as_bytes())?;
    file.flush()?;

    // The media player reads the file after we return, so keep it on disk
    let (_, path) = file.keep().map_err(|e| e.error)?;
    log::debug!("Wrote {} entries to playlist {:?}", paths.len(), path);
    Ok(path)
}
