//! This module holds the in-memory word table, either built in or read from a words file.
//!
//! A words file has one genre per line, followed by a colon and a comma-separated list of words.
//! Lines starting with `#` and blank lines are skipped. A genre may appear on several lines, in
//! which case its words are merged; genre names are compared ignoring case and the first spelling
//! wins.
//!
//! ```text
//! # genre: words
//! Animals: ELEPHANT, GIRAFFE, TIGER
//! Sports: SOCCER, HOCKEY
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::{LazyLock, Mutex, PoisonError};

use fastrand::Rng;
use regex::Regex;
use tracing::debug;

use super::{WordProvider, WordSourceError};

/// The words the game ships with, used when no words file is given.
const SEED: &[(&str, &[&str])] = &[
    (
        "Technology",
        &["PYTHON", "FLASK", "JAVASCRIPT", "DATABASE", "ALGORITHM", "SERVER"],
    ),
    (
        "Animals",
        &["ELEPHANT", "GIRAFFE", "TIGER", "PENGUIN", "KANGAROO", "SQUIRREL"],
    ),
    (
        "Sports",
        &[
            "BASKETBALL",
            "FOOTBALL",
            "SOCCER",
            "HOCKEY",
            "TENNIS",
            "VOLLEYBALL",
            "MARATHON",
            "TOUCHDOWN",
        ],
    ),
];

/// Matches a `genre: words` line, capturing both halves without surrounding whitespace.
static LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    // the pattern is a constant; the parsing tests below compile it
    Regex::new(r"\A\s*(?P<genre>[^:]*?)\s*:\s*(?P<words>.*?)\s*\z").expect("valid line pattern")
});

/// This structure holds every word the table knows of, grouped by genre.
pub struct WordTable {
    /// The random number generator used to pick a word out of a genre.
    rng: Mutex<Rng>,
    /// The words of each genre, with genres kept in sorted order.
    words: BTreeMap<String, Vec<String>>,
}

impl WordTable {
    /// Returns the table with the built-in genres and words.
    #[must_use]
    pub fn builtin() -> Self {
        let mut table = Self::empty();

        for &(genre, words) in SEED {
            for word in words {
                table.insert(genre, word);
            }
        }

        table
    }

    /// Reads a table from the words file at `path`.
    ///
    /// # Errors
    ///
    /// Fails with [`WordSourceError::Unreadable`] if the file can't be read, and with
    /// [`WordSourceError::Malformed`] if any of its lines can't be parsed.
    pub fn from_file(path: &Path) -> Result<Self, WordSourceError> {
        let contents = fs::read_to_string(path).map_err(|err| WordSourceError::Unreadable {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;

        Self::parse(&contents)
    }

    /// Returns the genres present in the table, sorted.
    #[must_use]
    pub fn genres(&self) -> Vec<String> {
        self.words.keys().cloned().collect()
    }

    /// Parses a table out of the contents of a words file.
    ///
    /// # Errors
    ///
    /// Fails with [`WordSourceError::Malformed`] on the first line that isn't a comment, blank, or
    /// a `genre: words` pair with a non-empty genre and at least one word.
    pub fn parse(contents: &str) -> Result<Self, WordSourceError> {
        let mut table = Self::empty();

        for (index, line) in contents.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let malformed = |reason: &str| WordSourceError::Malformed {
                line: index + 1,
                reason: reason.to_owned(),
            };
            let captures = LINE_RE
                .captures(trimmed)
                .ok_or_else(|| malformed("expected `genre: word, word, ...`"))?;
            let genre = captures.name("genre").map_or("", |found| found.as_str());
            let words = captures.name("words").map_or("", |found| found.as_str());

            if genre.is_empty() {
                return Err(malformed("the genre is empty"));
            }

            let mut added = 0_usize;
            for word in words.split(',').map(str::trim).filter(|word| !word.is_empty()) {
                table.insert(genre, word);
                added += 1;
            }

            if added == 0 {
                return Err(malformed("the genre has no words"));
            }
        }

        debug!(genres = table.words.len(), "parsed words file");
        Ok(table)
    }

    /// Replaces the random number generator with one seeded by `seed`, making word picks
    /// reproducible.
    #[must_use]
    pub fn with_seed(self, seed: u64) -> Self {
        Self {
            rng: Mutex::new(Rng::with_seed(seed)),
            ..self
        }
    }

    /// Returns a table without any genre.
    fn empty() -> Self {
        Self {
            rng: Mutex::new(Rng::new()),
            words: BTreeMap::new(),
        }
    }

    /// Adds `word` to `genre`, skipping words the genre already holds. A genre spelled with
    /// different case than a known one is the known one.
    fn insert(&mut self, genre: &str, word: &str) {
        let key = self
            .words
            .keys()
            .find(|known| known.eq_ignore_ascii_case(genre))
            .cloned()
            .unwrap_or_else(|| genre.to_owned());
        let words = self.words.entry(key).or_default();
        if !words.iter().any(|known| known.eq_ignore_ascii_case(word)) {
            words.push(word.to_owned());
        }
    }
}

impl WordProvider for WordTable {
    fn fetch_word(&self, genre: &str) -> Result<String, WordSourceError> {
        let no_words = || WordSourceError::NoWords {
            genre: genre.to_owned(),
        };
        let words = self.words.get(genre).ok_or_else(no_words)?;
        let index = self
            .rng
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .usize(..words.len().max(1));

        words.get(index).cloned().ok_or_else(no_words)
    }
}
