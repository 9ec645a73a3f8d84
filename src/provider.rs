//! This module contains the word sources the game can draw its secret words from.
//!
//! A word source only has to answer one question: given a genre, hand back a candidate word. The
//! engine never trusts the answer and validates every word itself, so providers are free to return
//! raw text straight from wherever they read it.

use std::path::PathBuf;

mod remote;
#[cfg(test)]
mod scripted;
mod table;

pub use remote::{RemoteWords, DEFAULT_ENDPOINT};
#[cfg(test)]
pub(crate) use scripted::ScriptedWords;
pub use table::WordTable;

/// This enum holds the ways in which a word source can fail to produce a usable word.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum WordSourceError {
    /// The source produced a word, but it was empty or contained something other than letters.
    #[error("the word source returned an unusable word {word:?}")]
    InvalidWord {
        /// The word exactly as the source returned it.
        word: String,
    },
    /// A words file could not be parsed.
    #[error("line {line} of the words file is malformed: {reason}")]
    Malformed {
        /// The one-based line number of the offending line.
        line: usize,
        /// What was wrong with the line.
        reason: String,
    },
    /// The source has no words for the requested genre.
    #[error("the word source has no words for genre {genre:?}")]
    NoWords {
        /// The genre that was requested.
        genre: String,
    },
    /// The remote word API answered with a non-success status code.
    #[error("the word API answered with status {0}")]
    Status(u16),
    /// The remote word API did not answer in time.
    #[error("the word API timed out")]
    TimedOut,
    /// The remote word API could not be reached or its answer could not be read.
    #[error("the word API could not be reached: {0}")]
    Transport(String),
    /// A words file could not be read from disk.
    #[error("the words file {} could not be read: {reason}", .path.display())]
    Unreadable {
        /// The path of the words file.
        path: PathBuf,
        /// The underlying I/O failure.
        reason: String,
    },
}

/// A source of secret words, keyed by genre.
///
/// Implementations must be safe to call repeatedly and from several threads, as a single provider
/// is shared by every session of a [`crate::SessionStore`].
pub trait WordProvider: Send + Sync {
    /// Returns a candidate secret word for `genre`.
    ///
    /// # Errors
    ///
    /// Returns a [`WordSourceError`] when the source is unavailable, times out or has nothing to
    /// offer for the genre.
    fn fetch_word(&self, genre: &str) -> Result<String, WordSourceError>;
}
