//! A word source that replays a fixed script of answers, for driving the engine in tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use super::{WordProvider, WordSourceError};

/// This structure answers word requests from a queue, one entry per call, and counts the calls.
pub(crate) struct ScriptedWords {
    /// How many times a word was requested.
    calls: AtomicUsize,
    /// The answers still to be handed out.
    script: Mutex<VecDeque<Result<String, WordSourceError>>>,
}

impl ScriptedWords {
    /// Returns a source answering with each of `words` in turn.
    pub(crate) fn new(words: &[&str]) -> Self {
        Self::from_answers(words.iter().map(|word| Ok((*word).to_owned())))
    }

    /// Returns a source answering with each of `answers` in turn.
    pub(crate) fn from_answers<I>(answers: I) -> Self
    where
        I: IntoIterator<Item = Result<String, WordSourceError>>,
    {
        Self {
            calls: AtomicUsize::new(0),
            script: Mutex::new(answers.into_iter().collect()),
        }
    }

    /// Returns how many words were requested so far.
    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl WordProvider for ScriptedWords {
    fn fetch_word(&self, genre: &str) -> Result<String, WordSourceError> {
        let _ = self.calls.fetch_add(1, Ordering::SeqCst);

        self.script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| {
                Err(WordSourceError::NoWords {
                    genre: genre.to_owned(),
                })
            })
    }
}

impl WordProvider for std::sync::Arc<ScriptedWords> {
    fn fetch_word(&self, genre: &str) -> Result<String, WordSourceError> {
        self.as_ref().fetch_word(genre)
    }
}
