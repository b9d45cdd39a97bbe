//! Song Collector - personal song library manager
//!
//! Keeps an ordered collection of songs in a JSON document and offers
//! editing, sorting, word-overlap search, genre statistics, and playback
//! through the desktop's default media application.

pub mod artwork;
pub mod config;
pub mod error;
pub mod import;
pub mod model;
pub mod player;
pub mod session;
pub mod storage;
pub mod view;

pub use config::Config;
pub use error::LibraryError;
pub use model::{Library, SortKey, Song, SongFields};
pub use player::{MediaLauncher, Player, SystemLauncher};
pub use session::{Session, Theme};
