use super::{LibraryDocument, SortKey, Song, SongFields};
use crate::error::{LibraryError, Result};
use rand::seq::SliceRandom;
use rand::Rng;

/// The song collection: an ordered list of songs and the next id to assign
#[derive(Debug, Clone, PartialEq)]
pub struct Library {
    /// Songs in display order (insertion order unless sorted)
    songs: Vec<Song>,

    /// Never decremented, so ids are not reused after removal
    next_id: u32,
}

impl Library {
    /// Create a new empty library
    pub fn new() -> Self {
        Self {
            songs: Vec::new(),
            next_id: 1,
        }
    }

    /// Validate `fields` and append them as a new song with a fresh id
    pub fn create(&mut self, fields: SongFields) -> Result<Song> {
        fields.validate()?;
        let next_id = self
            .next_id
            .checked_add(1)
            .ok_or_else(|| LibraryError::validation("id", "id space exhausted"))?;

        let song = fields.into_song(self.next_id);
        self.songs.push(song.clone());
        self.next_id = next_id;

        log::debug!("Added song {}: {} - {}", song.id, song.artist, song.title);
        Ok(song)
    }

    /// Remove the first song with this id
    pub fn remove(&mut self, id: u32) -> bool {
        match self.songs.iter().position(|s| s.id == id) {
            Some(index) => {
                let song = self.songs.remove(index);
                log::debug!("Removed song {}: {}", song.id, song.title);
                true
            }
            None => false,
        }
    }

    /// Get a song by id
    pub fn get(&self, id: u32) -> Option<Song> {
        self.songs.iter().find(|s| s.id == id).cloned()
    }

    /// Snapshot of the current ordering
    pub fn list(&self) -> Vec<Song> {
        self.songs.clone()
    }

    /// Overwrite every field of the song with this id.
    ///
    /// Unlike [`Library::create`] this does not check rating or duration
    /// bounds; callers that care must validate first.
    pub fn update(&mut self, id: u32, fields: SongFields) -> bool {
        let Some(song) = self.songs.iter_mut().find(|s| s.id == id) else {
            return false;
        };

        song.title = fields.title;
        song.artist = fields.artist;
        song.duration_seconds = fields.duration_seconds;
        song.genre = fields.genre;
        song.rating = fields.rating;
        song.filepath = fields.filepath;
        song.cover_path = fields.cover_path;

        log::debug!("Updated song {}", id);
        true
    }

    /// Stable in-place sort
    pub fn sort(&mut self, key: SortKey) {
        self.songs.sort_by(|a, b| key.compare(a, b));
    }

    /// Sort by key name; unknown names leave the order untouched
    pub fn sort_by_name(&mut self, key: &str) {
        match key.parse::<SortKey>() {
            Ok(key) => self.sort(key),
            Err(e) => log::debug!("Ignoring sort request: {}", e),
        }
    }

    /// Songs with a non-zero similarity to `keyword`, best match first.
    /// Equal scores keep list order.
    pub fn search(&self, keyword: &str) -> Vec<Song> {
        let mut scored: Vec<(&Song, f64)> = self
            .songs
            .iter()
            .map(|s| (s, s.similarity_score(keyword)))
            .filter(|(_, score)| *score > 0.0)
            .collect();

        scored.sort_by(|a, b| b.1.total_cmp(&a.1));
        scored.into_iter().map(|(s, _)| s.clone()).collect()
    }

    /// Number of songs per genre, in order of first appearance
    pub fn genre_counts(&self) -> Vec<(String, usize)> {
        let mut counts: Vec<(String, usize)> = Vec::new();
        for song in &self.songs {
            match counts.iter_mut().find(|(genre, _)| *genre == song.genre) {
                Some((_, count)) => *count += 1,
                None => counts.push((song.genre.clone(), 1)),
            }
        }
        counts
    }

    /// Total length in seconds of `songs`, or of the whole library
    pub fn total_duration(&self, songs: Option<&[Song]>) -> i64 {
        songs
            .unwrap_or(&self.songs)
            .iter()
            .map(|s| s.duration_seconds)
            .sum()
    }

    /// Resolve a selection of ids, skipping unknown ones
    pub fn songs_by_ids(&self, ids: &[u32]) -> Vec<Song> {
        ids.iter().filter_map(|id| self.get(*id)).collect()
    }

    /// Pick a song uniformly at random
    pub fn random_song(&self) -> Option<Song> {
        self.random_song_with(&mut rand::thread_rng())
    }

    /// Pick a song using the given random source
    pub fn random_song_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Song> {
        self.songs.choose(rng).cloned()
    }

    /// Snapshot of the library in its persisted shape
    pub fn serialize(&self) -> LibraryDocument {
        LibraryDocument {
            next_id: Some(self.next_id),
            songs: self.songs.clone(),
        }
    }

    /// Replace the whole library with the document's contents.
    ///
    /// Every record must have a non-negative duration and a rating in range,
    /// and no id may be the largest `u32`. On error nothing is replaced.
    /// The id counter becomes the larger of the stored counter and one past
    /// the highest loaded id.
    pub fn deserialize(&mut self, document: LibraryDocument) -> Result<()> {
        for song in &document.songs {
            song.check_bounds()?;
        }

        let max_id = document.songs.iter().map(|s| s.id).max().unwrap_or(0);
        let after_max = max_id.checked_add(1).ok_or_else(|| {
            LibraryError::validation("id", format!("id {} leaves no room for new songs", max_id))
        })?;

        self.next_id = document.next_id.unwrap_or(after_max).max(after_max);
        self.songs = document.songs;
        Ok(())
    }

    /// Build a library from a decoded document
    pub fn from_document(document: LibraryDocument) -> Result<Self> {
        let mut library = Self::new();
        library.deserialize(document)?;
        Ok(library)
    }

    /// Id the next created song will receive
    pub fn next_id(&self) -> u32 {
        self.next_id
    }

    /// Number of songs
    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    /// Songs in their current order
    pub fn songs(&self) -> &[Song] {
        &self.songs
    }
}

impl Default for Library {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn fields(title: &str, artist: &str, genre: &str, rating: i32, duration: i64) -> SongFields {
        SongFields {
            title: title.to_string(),
            artist: artist.to_string(),
            duration_seconds: duration,
            genre: genre.to_string(),
            rating,
            ..Default::default()
        }
    }

    fn ids(songs: &[Song]) -> Vec<u32> {
        songs.iter().map(|s| s.id).collect()
    }

    #[test]
    fn test_library_creation() {
        let lib = Library::new();
        assert_eq!(lib.len(), 0);
        assert!(lib.is_empty());
        assert_eq!(lib.next_id(), 1);
    }

    #[test]
    fn test_create_assigns_increasing_ids() {
        let mut lib = Library::new();
        let a = lib.create(fields("A", "X", "Rock", 3, 100)).unwrap();
        let b = lib.create(fields("B", "X", "Rock", 3, 100)).unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(ids(&lib.list()), vec![1, 2]);
    }

    #[test]
    fn test_invalid_create_does_not_append() {
        let mut lib = Library::new();
        lib.create(fields("A", "X", "Rock", 3, 100)).unwrap();

        for bad in [
            fields("B", "X", "Rock", 0, 100),
            fields("B", "X", "Rock", 6, 100),
            fields("B", "X", "Rock", 3, -1),
        ] {
            let err = lib.create(bad).unwrap_err();
            assert!(err.is_validation());
        }

        assert_eq!(lib.len(), 1);
        assert_eq!(lib.next_id(), 2);
    }

    #[test]
    fn test_ids_not_reused_after_remove() {
        let mut lib = Library::new();
        lib.create(fields("A", "X", "", 1, 1)).unwrap();
        let b = lib.create(fields("B", "X", "", 1, 1)).unwrap();

        assert!(lib.remove(b.id));
        assert!(lib.get(b.id).is_none());
        assert!(!lib.remove(b.id));

        let c = lib.create(fields("C", "X", "", 1, 1)).unwrap();
        assert_eq!(c.id, 3);
    }

    #[test]
    fn test_list_is_a_snapshot() {
        let mut lib = Library::new();
        lib.create(fields("A", "X", "", 1, 1)).unwrap();

        let mut snapshot = lib.list();
        snapshot[0].title = "Changed".to_string();
        snapshot.clear();

        assert_eq!(lib.len(), 1);
        assert_eq!(lib.get(1).unwrap().title, "A");
    }

    #[test]
    fn test_update_missing_id_changes_nothing() {
        let mut lib = Library::new();
        lib.create(fields("A", "X", "", 1, 1)).unwrap();
        lib.create(fields("B", "X", "", 1, 1)).unwrap();
        let before = lib.clone();

        assert!(!lib.update(42, fields("Z", "Z", "", 2, 2)));
        assert_eq!(lib, before);
    }

    #[test]
    fn test_update_keeps_id_and_position() {
        let mut lib = Library::new();
        lib.create(fields("A", "X", "", 1, 1)).unwrap();
        lib.create(fields("B", "X", "", 1, 1)).unwrap();

        let mut new_fields = fields("B2", "Y", "Jazz", 4, 30);
        new_fields.filepath = "/music/b2.mp3".to_string();
        assert!(lib.update(2, new_fields));

        let list = lib.list();
        assert_eq!(ids(&list), vec![1, 2]);
        assert_eq!(list[1].title, "B2");
        assert_eq!(list[1].genre, "Jazz");
        assert_eq!(list[1].filepath, "/music/b2.mp3");
    }

    #[test]
    fn test_update_does_not_validate_bounds() {
        let mut lib = Library::new();
        lib.create(fields("A", "X", "", 3, 10)).unwrap();

        assert!(lib.update(1, fields("A", "X", "", 9, -5)));
        let song = lib.get(1).unwrap();
        assert_eq!(song.rating, 9);
        assert_eq!(song.duration_seconds, -5);
    }

    #[test]
    fn test_sort_keys() {
        let mut lib = Library::new();
        lib.create(fields("banana", "X", "", 2, 300)).unwrap();
        lib.create(fields("Apple", "X", "", 5, 100)).unwrap();
        lib.create(fields("cherry", "X", "", 4, 200)).unwrap();

        lib.sort(SortKey::Title);
        assert_eq!(ids(lib.songs()), vec![2, 1, 3]);

        lib.sort(SortKey::Duration);
        assert_eq!(ids(lib.songs()), vec![2, 3, 1]);

        lib.sort(SortKey::Rating);
        assert!(lib.songs().windows(2).all(|w| w[0].rating >= w[1].rating));

        lib.sort(SortKey::Newest);
        assert_eq!(ids(lib.songs()), vec![3, 2, 1]);

        lib.sort(SortKey::Oldest);
        assert_eq!(ids(lib.songs()), vec![1, 2, 3]);
    }

    #[test]
    fn test_sort_is_stable() {
        let mut lib = Library::new();
        lib.create(fields("A", "X", "", 3, 1)).unwrap();
        lib.create(fields("B", "X", "", 5, 1)).unwrap();
        lib.create(fields("C", "X", "", 3, 1)).unwrap();

        lib.sort(SortKey::Rating);
        assert_eq!(ids(lib.songs()), vec![2, 1, 3]);
    }

    #[test]
    fn test_unknown_sort_name_is_ignored() {
        let mut lib = Library::new();
        lib.create(fields("b", "X", "", 1, 1)).unwrap();
        lib.create(fields("a", "X", "", 1, 1)).unwrap();

        lib.sort_by_name("Artist");
        assert_eq!(ids(lib.songs()), vec![1, 2]);

        lib.sort_by_name("Title");
        assert_eq!(ids(lib.songs()), vec![2, 1]);
    }

    #[test]
    fn test_search_ranks_by_score() {
        let mut lib = Library::new();
        lib.create(fields("Blue Moon", "Sam", "", 3, 1)).unwrap();
        lib.create(fields("Red Sun", "Sam Blue", "", 3, 1)).unwrap();
        lib.create(fields("Unrelated", "Nobody", "", 3, 1)).unwrap();

        let results = lib.search("blue sam");
        assert_eq!(ids(&results), vec![1, 2]);
    }

    #[test]
    fn test_search_ties_keep_list_order() {
        let mut lib = Library::new();
        lib.create(fields("One", "Band", "", 3, 1)).unwrap();
        lib.create(fields("Two", "Band", "", 3, 1)).unwrap();
        lib.sort(SortKey::Newest);

        assert_eq!(ids(&lib.search("band")), vec![2, 1]);
    }

    #[test]
    fn test_search_empty_keyword() {
        let mut lib = Library::new();
        lib.create(fields("Blue Moon", "Sam", "", 3, 1)).unwrap();
        assert!(lib.search("").is_empty());
    }

    #[test]
    fn test_genre_counts_in_first_seen_order() {
        let mut lib = Library::new();
        for genre in ["Rock", "Pop", "Rock"] {
            lib.create(fields("T", "A", genre, 3, 1)).unwrap();
        }
        assert_eq!(
            lib.genre_counts(),
            vec![("Rock".to_string(), 2), ("Pop".to_string(), 1)]
        );
    }

    #[test]
    fn test_total_duration() {
        let mut lib = Library::new();
        lib.create(fields("A", "X", "", 1, 100)).unwrap();
        lib.create(fields("B", "X", "", 1, 50)).unwrap();
        assert_eq!(lib.total_duration(None), 150);

        let subset = lib.songs_by_ids(&[2]);
        assert_eq!(lib.total_duration(Some(&subset)), 50);
        let none: Vec<Song> = Vec::new();
        assert_eq!(lib.total_duration(Some(none.as_slice())), 0);
    }

    #[test]
    fn test_songs_by_ids_keeps_selection_order() {
        let mut lib = Library::new();
        lib.create(fields("A", "X", "", 1, 1)).unwrap();
        lib.create(fields("B", "X", "", 1, 1)).unwrap();
        assert_eq!(ids(&lib.songs_by_ids(&[2, 9, 1])), vec![2, 1]);
    }

    #[test]
    fn test_random_song() {
        let mut lib = Library::new();
        let mut rng = StdRng::seed_from_u64(7);
        assert!(lib.random_song_with(&mut rng).is_none());

        lib.create(fields("A", "X", "", 1, 1)).unwrap();
        lib.create(fields("B", "X", "", 1, 1)).unwrap();
        let picked = lib.random_song_with(&mut rng).unwrap();
        assert!(picked.id == 1 || picked.id == 2);
    }

    #[test]
    fn test_serialize_round_trip() {
        let mut lib = Library::new();
        lib.create(fields("A", "X", "Rock", 1, 10)).unwrap();
        lib.create(fields("B", "Y", "Pop", 5, 20)).unwrap();
        lib.remove(1);

        let restored = Library::from_document(lib.serialize()).unwrap();
        assert_eq!(restored, lib);
        assert_eq!(restored.next_id(), 3);
    }

    #[test]
    fn test_deserialize_counter_covers_loaded_ids() {
        let mut lib = Library::new();
        lib.create(fields("A", "X", "", 1, 1)).unwrap();
        let mut doc = lib.serialize();
        doc.songs[0].id = 10;
        doc.next_id = Some(2);

        lib.deserialize(doc).unwrap();
        assert_eq!(lib.next_id(), 11);
        assert_eq!(lib.create(fields("B", "X", "", 1, 1)).unwrap().id, 11);
    }

    #[test]
    fn test_deserialize_keeps_higher_persisted_counter() {
        let doc = LibraryDocument {
            next_id: Some(50),
            songs: Vec::new(),
        };
        assert_eq!(Library::from_document(doc).unwrap().next_id(), 50);
    }

    #[test]
    fn test_create_fails_cleanly_when_ids_run_out() {
        let doc = LibraryDocument {
            next_id: Some(u32::MAX),
            songs: Vec::new(),
        };
        let mut lib = Library::from_document(doc).unwrap();

        let err = lib.create(fields("Late", "X", "", 3, 10)).unwrap_err();
        assert!(err.is_validation());
        assert!(lib.is_empty());
        assert_eq!(lib.next_id(), u32::MAX);
    }

    #[test]
    fn test_deserialize_rejects_largest_id() {
        let mut lib = Library::new();
        lib.create(fields("A", "X", "", 1, 1)).unwrap();
        let before = lib.clone();

        let mut doc = lib.serialize();
        doc.songs[0].id = u32::MAX;
        doc.next_id = Some(1);

        assert!(lib.deserialize(doc).unwrap_err().is_validation());
        assert_eq!(lib, before);
    }

    #[test]
    fn test_deserialize_rejects_out_of_range_records() {
        let mut lib = Library::new();
        lib.create(fields("A", "X", "", 1, 1)).unwrap();
        let before = lib.clone();

        let mut doc = lib.serialize();
        doc.songs.push(Song {
            rating: 9,
            id: 2,
            ..doc.songs[0].clone()
        });
        assert!(lib.deserialize(doc.clone()).unwrap_err().is_validation());

        doc.songs[1].rating = 2;
        doc.songs[1].duration_seconds = -7;
        assert!(lib.deserialize(doc).unwrap_err().is_validation());
        assert_eq!(lib, before);
    }
}
