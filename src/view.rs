//! Text rendering of library contents

use crate::model::{Library, Song};
use crate::session::{CoverState, Theme};
use comfy_table::presets::{UTF8_BORDERS_ONLY, UTF8_FULL};
use comfy_table::{Cell, Color, Table};

const SONG_HEADER: [&str; 7] = ["id", "title", "artist", "genre", "duration", "rating", "file"];

fn styled_table(theme: Theme, header: &[&str]) -> Table {
    let mut table = Table::new();
    match theme {
        Theme::Light => {
            table.load_preset(UTF8_FULL);
            table.set_header(header.iter().map(|h| Cell::new(h)));
        }
        Theme::Dark => {
            table.load_preset(UTF8_BORDERS_ONLY);
            table.set_header(header.iter().map(|h| Cell::new(h).fg(Color::Cyan)));
        }
    }
    table
}

/// Hours, minutes and seconds as `H:MM:SS`
pub fn format_hms(total_seconds: i64) -> String {
    let (minutes, seconds) = (total_seconds.div_euclid(60), total_seconds.rem_euclid(60));
    let (hours, minutes) = (minutes.div_euclid(60), minutes.rem_euclid(60));
    format!("{}:{:02}:{:02}", hours, minutes, seconds)
}

/// Display cells for one song
pub fn song_row(song: &Song) -> Vec<String> {
    vec![
        song.id.to_string(),
        song.title.clone(),
        song.artist.clone(),
        song.genre.clone(),
        format!("{}s", song.duration_seconds),
        song.rating.to_string(),
        if song.has_file() { "♪" } else { "—" }.to_string(),
    ]
}

/// Song list as a table, one row per song
pub fn songs_table(songs: &[Song], theme: Theme) -> Table {
    let mut table = styled_table(theme, &SONG_HEADER);
    for song in songs {
        table.add_row(song_row(song));
    }
    table
}

/// Summary line under the song list, e.g. `Total: 3 song(s), 0:10:05`
pub fn totals_line(library: &Library, songs: &[Song]) -> String {
    format!(
        "Total: {} song(s), {}",
        songs.len(),
        format_hms(library.total_duration(Some(songs)))
    )
}

/// One "genre: count" line per genre
pub fn genre_lines(counts: &[(String, usize)]) -> Vec<String> {
    counts
        .iter()
        .map(|(genre, count)| format!("{}: {} song(s)", genre, count))
        .collect()
}

/// Every field of one song plus the cover preview state
pub fn details_table(song: &Song, cover: &CoverState, theme: Theme) -> Table {
    let mut table = styled_table(theme, &["field", "value"]);
    let rows = [
        ("id", song.id.to_string()),
        ("title", song.title.clone()),
        ("artist", song.artist.clone()),
        ("duration", format!("{}s ({:.1} min)", song.duration_seconds, song.duration_minutes())),
        ("genre", song.genre.clone()),
        ("rating", song.rating.to_string()),
        ("audio file", song.filepath.clone()),
        ("cover", cover.label()),
    ];
    for (field, value) in rows {
        table.add_row(vec![field.to_string(), value]);
    }
    table
}
