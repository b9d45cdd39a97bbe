//! Reading and writing the library document
//!
//! Saves go through a temporary file in the target directory that is
//! renamed over the destination, so an interrupted write never leaves a
//! truncated library behind. Loads decode and check the whole document
//! before anything is replaced.

use crate::error::{LibraryError, Result};
use crate::model::{Library, LibraryDocument};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::Path;
use tempfile::NamedTempFile;

fn io_error(path: &Path, source: std::io::Error) -> LibraryError {
    LibraryError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Write `library` to `path` as pretty-printed JSON
pub fn save_library(library: &Library, path: &Path) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(|e| io_error(dir, e))?;

    let temp = NamedTempFile::new_in(dir).map_err(|e| io_error(dir, e))?;
    {
        let mut writer = BufWriter::new(temp.as_file());
        serde_json::to_writer_pretty(&mut writer, &library.serialize()).map_err(|source| {
            LibraryError::Json {
                path: path.to_path_buf(),
                source,
            }
        })?;
        writer.flush().map_err(|e| io_error(path, e))?;
    }
    temp.as_file().sync_all().map_err(|e| io_error(path, e))?;
    temp.persist(path).map_err(|e| io_error(path, e.error))?;

    log::info!("Saved {} song(s) to {:?}", library.len(), path);
    Ok(())
}

/// Read the document at `path` without touching any existing library
pub fn read_document(path: &Path) -> Result<LibraryDocument> {
    let file = File::open(path).map_err(|e| io_error(path, e))?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| LibraryError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Load a library from `path`
pub fn load_library(path: &Path) -> Result<Library> {
    let library = Library::from_document(read_document(path)?)?;
    log::info!("Loaded {} song(s) from {:?}", library.len(), path);
    Ok(library)
}

/// Load `path`, or start an empty library if the file does not exist yet
pub fn open_or_default(path: &Path) -> Result<Library> {
    match load_library(path) {
        Err(LibraryError::Io { source, .. }) if source.kind() == ErrorKind::NotFound => {
            log::info!("No library at {:?}, starting empty", path);
            Ok(Library::new())
        }
        other => other,
    }
}

impl Library {
    /// Replace this library with the one stored at `path`.
    ///
    /// On error `self` is left exactly as it was.
    pub fn load_from(&mut self, path: &Path) -> Result<()> {
        let document = read_document(path)?;
        self.deserialize(document)?;
        log::info!("Loaded {} song(s) from {:?}", self.len(), path);
        Ok(())
    }

    /// Write this library to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        save_library(self, path)
    }
}
