use super::Song;
use serde::{Deserialize, Serialize};

/// On-disk form of a library: the id counter plus every song in list order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LibraryDocument {
    /// Next id to hand out; absent in older or hand-written files
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_id: Option<u32>,

    #[serde(default)]
    pub songs: Vec<Song>,
}
