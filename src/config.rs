//! This module holds the command-line configuration of the game and turns it into a ready-to-use
//! session store.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context as _, Result};
use clap::Parser;
use tracing::info;

use crate::engine::{Engine, DEFAULT_MAX_LIVES};
use crate::genre::GenreCatalog;
use crate::provider::{RemoteWords, WordProvider, WordTable, DEFAULT_ENDPOINT};
use crate::session::SessionStore;

/// This struct holds the command-line arguments, parsed by clap's derive API. Every option can
/// also be given through an environment variable.
#[derive(Parser, Debug)]
#[command(name = "hangword", version, about)]
#[command(next_line_help = true)]
pub(crate) struct Cli {
    /// The genre picked when none, or an unknown one, is chosen.
    ///
    /// Defaults to the first genre on offer.
    #[arg(long, env = "HANGWORD_DEFAULT_GENRE", value_name = "NAME")]
    default_genre: Option<String>,
    /// The words API to query when playing with remote words.
    #[arg(long, env = "HANGWORD_ENDPOINT", value_name = "URL", default_value = DEFAULT_ENDPOINT)]
    endpoint: String,
    /// A genre to offer when playing with remote words; repeat it to offer several.
    ///
    /// Defaults to the built-in genres.
    #[arg(long = "genre", value_name = "NAME", requires = "remote")]
    genres: Vec<String>,
    /// The lives each game starts with.
    #[arg(long, env = "HANGWORD_MAX_LIVES", value_name = "LIVES", default_value_t = DEFAULT_MAX_LIVES)]
    #[arg(value_parser = clap::value_parser!(u8).range(1..=26))]
    max_lives: u8,
    /// Draw secret words from the remote words API instead of a local table.
    #[arg(long, env = "HANGWORD_REMOTE", conflicts_with = "words")]
    remote: bool,
    /// How long to wait for the words API before giving up, in seconds.
    #[arg(long, env = "HANGWORD_TIMEOUT", value_name = "SECS", default_value_t = 5)]
    #[arg(value_parser = clap::value_parser!(u64).range(1..=120))]
    timeout: u64,
    /// A words file to draw secret words from, with one `genre: word, word, ...` line per genre.
    ///
    /// Defaults to the built-in words.
    #[arg(long, env = "HANGWORD_WORDS", value_name = "FILE")]
    words: Option<PathBuf>,
}

impl Cli {
    /// Builds the session store the options describe: the word source, the genres it offers, and
    /// the engine rules.
    pub(crate) fn build_store(&self) -> Result<SessionStore> {
        let (provider, genres) = if self.remote {
            let genres = if self.genres.is_empty() {
                WordTable::builtin().genres()
            } else {
                self.genres.clone()
            };
            let remote: Box<dyn WordProvider> = Box::new(RemoteWords::new(
                &self.endpoint,
                Duration::from_secs(self.timeout),
            ));
            info!(endpoint = %self.endpoint, timeout = self.timeout, "drawing words remotely");

            (remote, genres)
        } else {
            let table = match self.words {
                Some(ref path) => WordTable::from_file(path)
                    .with_context(|| format!("loading words from {}", path.display()))?,
                None => WordTable::builtin(),
            };
            let genres = table.genres();
            let local: Box<dyn WordProvider> = Box::new(table);

            (local, genres)
        };

        let mut catalog = GenreCatalog::new(genres).context("building the genre list")?;
        if let Some(ref genre) = self.default_genre {
            catalog = catalog.with_default(genre);
        }

        Ok(SessionStore::new(
            Engine::new(catalog, provider).with_max_lives(self.max_lives),
        ))
    }
}
