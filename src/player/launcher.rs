//! Handing files to the host's default application

use super::PlayError;
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Opens a file with whatever the desktop associates with it
pub trait MediaLauncher {
    fn open(&self, path: &Path) -> Result<(), PlayError>;
}

/// Launcher backed by the platform's "open with default app" command
#[derive(Debug, Default)]
pub struct SystemLauncher;

impl SystemLauncher {
    pub fn new() -> Self {
        Self
    }

    fn command(path: &Path) -> Command {
        if cfg!(target_os = "windows") {
            let mut cmd = Command::new("cmd");
            cmd.args(["/C", "start", ""]).arg(path);
            cmd
        } else if cfg!(target_os = "macos") {
            let mut cmd = Command::new("open");
            cmd.arg(path);
            cmd
        } else {
            let mut cmd = Command::new("xdg-open");
            cmd.arg(path);
            cmd
        }
    }
}

impl MediaLauncher for SystemLauncher {
    fn open(&self, path: &Path) -> Result<(), PlayError> {
        log::debug!("Opening {:?} with the default application", path);

        let status = Self::command(path)
            .status()
            .map_err(|source| PlayError::Launch {
                path: path.to_path_buf(),
                reason: source.to_string(),
            })?;

        if !status.success() {
            return Err(PlayError::Launch {
                path: path.to_path_buf(),
                reason: format!("launcher exited with {}", status),
            });
        }
        Ok(())
    }
}

/// Launcher that only remembers what it was asked to open
#[derive(Debug, Default)]
pub struct RecordingLauncher {
    opened: RefCell<Vec<PathBuf>>,
}

impl RecordingLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every path passed to `open`, oldest first
    pub fn opened(&self) -> Vec<PathBuf> {
        self.opened.borrow().clone()
    }
}

impl MediaLauncher for RecordingLauncher {
    fn open(&self, path: &Path) -> Result<(), PlayError> {
        log::debug!("Recording open request for {:?}", path);
        self.opened.borrow_mut().push(path.to_path_buf());
        Ok(())
    }
}
