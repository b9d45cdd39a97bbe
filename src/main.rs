use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use song_collector::config::{Config, DEFAULT_LIBRARY_PATH, LIBRARY_ENV};
use song_collector::model::{Library, SortKey, Song, SongFields};
use song_collector::{import, storage, view};
use song_collector::{Player, Session, SystemLauncher, Theme};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "song-collector")]
#[command(about = "Manage a personal song library", long_about = None)]
struct Args {
    /// Path to the library file
    #[arg(short = 'l', long, env = LIBRARY_ENV, default_value = DEFAULT_LIBRARY_PATH)]
    library: String,

    /// Use the dark table style
    #[arg(long)]
    dark: bool,

    /// Verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Add a song
    Add(AddArgs),

    /// Edit fields of an existing song
    Edit(EditArgs),

    /// Delete songs by id
    Remove {
        #[arg(required = true)]
        ids: Vec<u32>,
    },

    /// Show every field of one song
    Show { id: u32 },

    /// List all songs in their current order
    List,

    /// Reorder the library (Title, Duration, Rating, Newest, Oldest)
    Sort { key: String },

    /// Smart search over titles and artists
    Search { keyword: Vec<String> },

    /// Song count per genre
    Stats,

    /// Play the given songs
    Play {
        #[arg(required = true)]
        ids: Vec<u32>,
    },

    /// Play the whole library
    PlayAll,

    /// Play one song at random
    PlayRandom,

    /// Add songs from an audio file or a directory of them
    Import { path: PathBuf },

    /// Write a copy of the library to another file
    Save { path: PathBuf },

    /// Replace the library with the contents of another file
    Load { path: PathBuf },
}

#[derive(clap::Args, Debug)]
struct AddArgs {
    #[arg(long)]
    title: String,

    #[arg(long)]
    artist: String,

    /// Duration in seconds
    #[arg(long, allow_hyphen_values = true)]
    duration: i64,

    #[arg(long, default_value = "")]
    genre: String,

    /// Rating from 1 to 5
    #[arg(long, allow_hyphen_values = true)]
    rating: i32,

    /// Audio file
    #[arg(long, default_value = "")]
    file: String,

    /// Cover image
    #[arg(long, default_value = "")]
    cover: String,
}

impl AddArgs {
    fn into_fields(self) -> SongFields {
        SongFields {
            title: self.title.trim().to_string(),
            artist: self.artist.trim().to_string(),
            duration_seconds: self.duration,
            genre: self.genre.trim().to_string(),
            rating: self.rating,
            filepath: self.file.trim().to_string(),
            cover_path: self.cover.trim().to_string(),
        }
    }
}

#[derive(clap::Args, Debug)]
struct EditArgs {
    id: u32,

    #[arg(long)]
    title: Option<String>,

    #[arg(long)]
    artist: Option<String>,

    #[arg(long, allow_hyphen_values = true)]
    duration: Option<i64>,

    #[arg(long)]
    genre: Option<String>,

    #[arg(long, allow_hyphen_values = true)]
    rating: Option<i32>,

    #[arg(long)]
    file: Option<String>,

    #[arg(long)]
    cover: Option<String>,
}

impl EditArgs {
    /// Current fields of `song` with the given overrides applied
    fn apply_to(self, song: &Song) -> SongFields {
        let mut fields = SongFields::from(song);
        let trimmed = |s: String| s.trim().to_string();

        if let Some(title) = self.title {
            fields.title = trimmed(title);
        }
        if let Some(artist) = self.artist {
            fields.artist = trimmed(artist);
        }
        if let Some(duration) = self.duration {
            fields.duration_seconds = duration;
        }
        if let Some(genre) = self.genre {
            fields.genre = trimmed(genre);
        }
        if let Some(rating) = self.rating {
            fields.rating = rating;
        }
        if let Some(file) = self.file {
            fields.filepath = trimmed(file);
        }
        if let Some(cover) = self.cover {
            fields.cover_path = trimmed(cover);
        }
        fields
    }
}

fn print_songs(library: &Library, songs: &[Song], session: &Session) {
    println!("{}", view::songs_table(songs, session.theme()));
    println!("{}", view::totals_line(library, songs));
}

/// Run one command; returns whether the library changed
fn run(command: Command, library: &mut Library, session: &mut Session) -> Result<bool> {
    let player = || Player::new(SystemLauncher::new());

    match command {
        Command::Add(args) => {
            let song = library.create(args.into_fields())?;
            println!("Added song {}: {} - {}", song.id, song.artist, song.title);
            Ok(true)
        }
        Command::Edit(args) => {
            session.select(library, &[args.id]);
            let Some(id) = session.current_edit_id() else {
                bail!("Could not find song {} to update", args.id);
            };
            let song = library
                .get(id)
                .with_context(|| format!("Could not find song {} to update", id))?;

            // The store does not re-check bounds on update, so check here
            let fields = args.apply_to(&song);
            fields.validate()?;
            if !library.update(id, fields) {
                bail!("Could not find song {} to update", id);
            }
            println!("Updated song {}", id);
            Ok(true)
        }
        Command::Remove { ids } => {
            let mut changed = false;
            for id in ids {
                if library.remove(id) {
                    println!("Removed song {}", id);
                    changed = true;
                } else {
                    log::warn!("No song with id {}", id);
                }
            }
            session.clear_selection();
            Ok(changed)
        }
        Command::Show { id } => {
            session.select(library, &[id]);
            let song = library
                .get(id)
                .with_context(|| format!("No song with id {}", id))?;
            println!("{}", view::details_table(&song, session.cover(), session.theme()));
            Ok(false)
        }
        Command::List => {
            print_songs(library, library.songs(), session);
            Ok(false)
        }
        Command::Sort { key } => {
            let known = key.parse::<SortKey>().is_ok();
            if !known {
                log::warn!("Unknown sort key {:?}, order unchanged", key);
            }
            library.sort_by_name(&key);
            print_songs(library, library.songs(), session);
            Ok(known)
        }
        Command::Search { keyword } => {
            let keyword = keyword.join(" ");
            if keyword.trim().is_empty() {
                bail!("Enter a keyword first");
            }
            let results = library.search(&keyword);
            if results.is_empty() {
                println!("No matching songs.");
            }
            print_songs(library, &results, session);
            Ok(false)
        }
        Command::Stats => {
            let counts = library.genre_counts();
            if counts.is_empty() {
                println!("No songs in collection.");
            }
            for line in view::genre_lines(&counts) {
                println!("{}", line);
            }
            Ok(false)
        }
        Command::Play { ids } => {
            session.select(library, &ids);
            let songs = library.songs_by_ids(session.selection());
            let opened = player().play(&songs)?;
            println!("Playing {}", opened.display());
            Ok(false)
        }
        Command::PlayAll => {
            let opened = player().play_all(library)?;
            println!("Playing {}", opened.display());
            Ok(false)
        }
        Command::PlayRandom => {
            let song = player().play_random(library)?;
            session.select(library, &[song.id]);
            println!("Playing {}: {} - {}", song.id, song.artist, song.title);
            Ok(false)
        }
        Command::Import { path } => {
            let mut added = 0;
            for fields in import::collect_songs(&path)? {
                match library.create(fields) {
                    Ok(song) => {
                        log::debug!("Imported {}", song.filepath);
                        added += 1;
                    }
                    Err(e) => log::warn!("Skipping imported song: {}", e),
                }
            }
            println!("Imported {} song(s)", added);
            Ok(added > 0)
        }
        Command::Save { path } => {
            let path = song_collector::config::expand_path(&path.to_string_lossy());
            library.save_to(&path)?;
            println!("Library saved to {}", path.display());
            Ok(false)
        }
        Command::Load { path } => {
            let path = song_collector::config::expand_path(&path.to_string_lossy());
            library
                .load_from(&path)
                .with_context(|| format!("Could not load library from {}", path.display()))?;
            session.clear_selection();
            println!("Loaded {} song(s) from {}", library.len(), path.display());
            Ok(true)
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let theme = if args.dark { Theme::Dark } else { Theme::Light };
    let config = Config::new(&args.library)
        .with_theme(theme)
        .with_verbose(args.verbose);

    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(config.log_level()))
        .init();

    log::debug!("Using library {:?}", config.library_path);

    let mut library = storage::open_or_default(&config.library_path)
        .with_context(|| format!("Could not open library {:?}", config.library_path))?;
    let mut session = Session::new(config.theme);

    if run(args.command, &mut library, &mut session)? {
        library
            .save_to(&config.library_path)
            .with_context(|| format!("Could not save library {:?}", config.library_path))?;
    }

    Ok(())
}
