use super::Song;
use std::cmp::{Ordering, Reverse};
use std::fmt;
use std::str::FromStr;

/// Recognized orderings for the song list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// Case-insensitive title, A to Z
    Title,
    /// Shortest first
    Duration,
    /// Highest rated first
    Rating,
    /// Most recently added first
    Newest,
    /// Earliest added first
    Oldest,
}

impl SortKey {
    pub const ALL: [SortKey; 5] = [
        SortKey::Title,
        SortKey::Duration,
        SortKey::Rating,
        SortKey::Newest,
        SortKey::Oldest,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SortKey::Title => "Title",
            SortKey::Duration => "Duration",
            SortKey::Rating => "Rating",
            SortKey::Newest => "Newest",
            SortKey::Oldest => "Oldest",
        }
    }

    pub(crate) fn compare(&self, a: &Song, b: &Song) -> Ordering {
        match self {
            SortKey::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
            SortKey::Duration => a.duration_seconds.cmp(&b.duration_seconds),
            SortKey::Rating => Reverse(a.rating).cmp(&Reverse(b.rating)),
            SortKey::Newest => Reverse(a.id).cmp(&Reverse(b.id)),
            SortKey::Oldest => a.id.cmp(&b.id),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::ALL
            .into_iter()
            .find(|key| key.name() == s)
            .ok_or_else(|| {
                format!(
                    "unknown sort key {:?} (expected one of Title, Duration, Rating, Newest, Oldest)",
                    s
                )
            })
    }
}
