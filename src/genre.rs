//! This module contains the catalog of genres a player may pick from.
//!
//! The catalog is a closed, ordered list configured when the game starts. Asking for a genre the
//! catalog doesn't hold is never fatal: [`GenreCatalog::resolve`] falls back to the default genre
//! so that the player can keep on playing.

use tracing::warn;

use crate::engine::GameError;

/// This structure holds the genres on offer, in display order, and the one used by default.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenreCatalog {
    /// The genre used when none, or an unknown one, is asked for.
    default: String,
    /// Every genre on offer, without duplicates.
    genres: Vec<String>,
}

impl GenreCatalog {
    /// Builds a catalog from `genres`, keeping their order and dropping blanks and duplicates.
    /// The first genre becomes the default.
    ///
    /// # Errors
    ///
    /// Fails with [`GameError::NoGenres`] if no genre is left after dropping blanks.
    pub fn new<I, S>(genres: I) -> Result<Self, GameError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut unique: Vec<String> = Vec::new();

        for genre in genres {
            let genre = genre.as_ref().trim();
            if !genre.is_empty() && !unique.iter().any(|known| known.eq_ignore_ascii_case(genre)) {
                unique.push(genre.to_owned());
            }
        }

        let default = unique.first().cloned().ok_or(GameError::NoGenres)?;
        Ok(Self {
            default,
            genres: unique,
        })
    }

    /// Returns the genre used when none, or an unknown one, is asked for.
    #[must_use]
    pub fn default_genre(&self) -> &str {
        &self.default
    }

    /// Looks up `genre`, ignoring case and surrounding whitespace, and returns the catalog's own
    /// spelling of it.
    ///
    /// # Errors
    ///
    /// Fails with [`GameError::UnknownGenre`] if the catalog doesn't offer the genre.
    pub fn find(&self, genre: &str) -> Result<&str, GameError> {
        let wanted = genre.trim();

        self.genres
            .iter()
            .find(|known| known.eq_ignore_ascii_case(wanted))
            .map(String::as_str)
            .ok_or_else(|| GameError::UnknownGenre(wanted.to_owned()))
    }

    /// Returns every genre on offer, in display order.
    #[must_use]
    pub fn genres(&self) -> &[String] {
        &self.genres
    }

    /// Returns the genre to play for `requested`, degrading to the default genre when nothing was
    /// asked for or the request names a genre the catalog doesn't offer.
    #[must_use]
    pub fn resolve(&self, requested: Option<&str>) -> &str {
        let Some(requested) = requested else {
            return &self.default;
        };

        self.find(requested).unwrap_or_else(|err| {
            warn!(%err, fallback = %self.default, "falling back to the default genre");
            self.default.as_str()
        })
    }

    /// Makes `genre` the default genre. An unknown genre is reported and the current default is
    /// kept.
    #[must_use]
    pub fn with_default(mut self, genre: &str) -> Self {
        match self.find(genre).map(str::to_owned) {
            Ok(found) => self.default = found,
            Err(err) => warn!(%err, kept = %self.default, "ignoring the configured default genre"),
        }

        self
    }
}
