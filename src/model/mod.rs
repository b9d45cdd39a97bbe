//! Song library data model
//!
//! Songs live in a single ordered list owned by [`Library`]; every
//! lookup is a linear scan over it.

mod document;
mod library;
mod song;
mod sort;

pub use document::LibraryDocument;
pub use library::Library;
pub use song::{Song, SongFields, MAX_RATING, MIN_RATING};
pub use sort::SortKey;
