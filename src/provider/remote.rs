//! This module contains the word source backed by a remote word API.
//!
//! The API is queried for words whose meaning is close to the genre name, Datamuse style, and one
//! of the single-word answers is picked at random. Every request carries a global timeout so a
//! slow API can never hold up the start of a game for longer than configured.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use fastrand::Rng;
use serde::Deserialize;
use tracing::debug;
use ureq::Agent;

use super::{WordProvider, WordSourceError};

/// The word API queried when no other endpoint is configured.
pub const DEFAULT_ENDPOINT: &str = "https://api.datamuse.com/words";

/// How many related words to ask the API for on each request.
const MAX_RESULTS: u16 = 100;

/// The shortest word worth playing with.
const MIN_LEN: usize = 4;

/// This structure holds a single entry of the API's answer. Other fields in the answer, such as
/// the relevance score, are not of interest and are skipped.
#[derive(Deserialize)]
struct Entry {
    /// The related word or phrase.
    word: String,
}

/// This structure queries a remote word API for words related to a genre.
pub struct RemoteWords {
    /// The HTTP agent, configured with the request timeout.
    agent: Agent,
    /// The URL of the words endpoint.
    endpoint: String,
    /// The random number generator used to pick one of the candidate words.
    rng: Mutex<Rng>,
}

impl RemoteWords {
    /// Returns a source querying `endpoint`, giving up on any request after `timeout`.
    #[must_use]
    pub fn new(endpoint: &str, timeout: Duration) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .build()
            .into();

        Self {
            agent,
            endpoint: endpoint.to_owned(),
            rng: Mutex::new(Rng::new()),
        }
    }
}

impl WordProvider for RemoteWords {
    fn fetch_word(&self, genre: &str) -> Result<String, WordSourceError> {
        let response = self
            .agent
            .get(&self.endpoint)
            .query("ml", genre)
            .query("max", MAX_RESULTS.to_string())
            .call()
            .map_err(classify)?;
        let entries: Vec<Entry> = response.into_body().read_json().map_err(classify)?;
        let words = candidates(entries);
        debug!(genre, candidates = words.len(), "word API answered");

        let index = self
            .rng
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .usize(..words.len().max(1));

        words
            .get(index)
            .cloned()
            .ok_or_else(|| WordSourceError::NoWords {
                genre: genre.to_owned(),
            })
    }
}

/// Keeps the entries that are a single word of letters only and long enough to be fun; the API
/// happily answers with phrases like "ice hockey" or with abbreviations.
fn candidates(entries: Vec<Entry>) -> Vec<String> {
    entries
        .into_iter()
        .map(|entry| entry.word)
        .filter(|word| word.len() >= MIN_LEN && word.bytes().all(|byte| byte.is_ascii_alphabetic()))
        .collect()
}

/// Maps an HTTP failure onto the word source error it stands for.
fn classify(err: ureq::Error) -> WordSourceError {
    debug!(%err, "word API request failed");

    match err {
        ureq::Error::StatusCode(code) => WordSourceError::Status(code),
        ureq::Error::Timeout(_) => WordSourceError::TimedOut,
        other => WordSourceError::Transport(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn entries(words: &[&str]) -> Vec<Entry> {
        words
            .iter()
            .map(|word| Entry {
                word: (*word).to_owned(),
            })
            .collect()
    }

    #[test]
    fn candidates_skip_phrases_and_short_words() {
        assert_eq!(
            candidates(entries(&["ice hockey", "puck", "nhl", "goalie", "hat-trick", "caf\u{e9}"])),
            ["puck", "goalie"],
            "only plain words of four letters or more should survive"
        );
    }

    #[test]
    fn no_candidates_means_no_words() {
        assert!(
            candidates(entries(&["a b", "x"])).is_empty(),
            "nothing here is playable"
        );
    }

    #[rstest]
    #[case(404, WordSourceError::Status(404))]
    #[case(429, WordSourceError::Status(429))]
    #[case(503, WordSourceError::Status(503))]
    fn status_codes_are_kept(#[case] code: u16, #[case] expected: WordSourceError) {
        assert_eq!(
            classify(ureq::Error::StatusCode(code)),
            expected,
            "the status code should be carried over"
        );
    }

    #[test]
    fn unreachable_endpoint_is_a_source_error() {
        let source = RemoteWords::new("http://127.0.0.1:9/words", Duration::from_secs(1));

        assert!(
            matches!(
                source.fetch_word("animals"),
                Err(WordSourceError::Transport(_) | WordSourceError::TimedOut)
            ),
            "a closed port should not produce a word"
        );
    }
}
