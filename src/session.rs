//! Presentation state for one running session
//!
//! Holds what the user interface tracks between actions: the colour theme,
//! which songs are selected, and the cover preview of a single selection.

use crate::artwork::{CoverPreview, COVER_PLACEHOLDER, COVER_UNREADABLE};
use crate::model::Library;
use std::path::PathBuf;

/// Table style for the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// What the cover area currently shows
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CoverState {
    #[default]
    Placeholder,
    Loaded(CoverPreview),
    Unreadable(PathBuf),
}

impl CoverState {
    pub fn label(&self) -> String {
        match self {
            CoverState::Placeholder => COVER_PLACEHOLDER.to_string(),
            CoverState::Loaded(cover) => cover.describe(),
            CoverState::Unreadable(_) => COVER_UNREADABLE.to_string(),
        }
    }
}

/// Theme, selection and cover preview carried between commands
#[derive(Debug, Clone, Default)]
pub struct Session {
    theme: Theme,
    selection: Vec<u32>,
    cover: CoverState,
}

impl Session {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            ..Default::default()
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn selection(&self) -> &[u32] {
        &self.selection
    }

    pub fn cover(&self) -> &CoverState {
        &self.cover
    }

    /// The song being edited: set only when exactly one song is selected
    pub fn current_edit_id(&self) -> Option<u32> {
        match self.selection.as_slice() {
            [id] => Some(*id),
            _ => None,
        }
    }

    /// Select `ids`, dropping any the library does not contain.
    ///
    /// A single selection with an existing cover file loads its preview;
    /// anything else resets the cover area.
    pub fn select(&mut self, library: &Library, ids: &[u32]) {
        self.selection = ids
            .iter()
            .copied()
            .filter(|id| library.get(*id).is_some())
            .collect();

        self.cover = match self.current_edit_id().and_then(|id| library.get(id)) {
            Some(song) => match song.cover().filter(|p| p.exists()) {
                Some(path) => match CoverPreview::load(path) {
                    Ok(preview) => CoverState::Loaded(preview),
                    Err(e) => {
                        log::warn!("{:#}", e);
                        CoverState::Unreadable(path.to_path_buf())
                    }
                },
                None => CoverState::Placeholder,
            },
            None => CoverState::Placeholder,
        };
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
        self.cover = CoverState::Placeholder;
    }
}
