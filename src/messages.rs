//! This module holds the fixed vocabulary of messages shown to the player.
//!
//! Presentation layers key their styling off the message text, so two rules hold for every
//! message: the substring `WON` only ever appears when the game has been won, and `OVER` only ever
//! appears when it has been lost. The secret word is echoed in title case so it can't sneak either
//! substring into a message.

use console::style;

use crate::engine::{GameSession, Outcome};
use crate::provider::WordSourceError;

/// The message shown when no word could be drawn to start a game.
pub(crate) const UNAVAILABLE: &str = "Could not fetch a word right now. Please try again.";

/// Returns the message for `outcome`, the result of the last operation on `session`.
pub(crate) fn outcome_message(outcome: Outcome, session: &GameSession) -> String {
    match outcome {
        Outcome::AlreadyGuessed(letter) => {
            format!("You already guessed '{letter}'. Try a new letter.")
        }
        Outcome::Correct(letter) => format!("Good guess! '{letter}' is in the word."),
        Outcome::Incorrect(letter) => format!(
            "'{letter}' is not in the word. Lives left: {}.",
            session.lives_remaining()
        ),
        Outcome::Invalid => "Invalid input. Please enter a single letter (A-Z).".to_owned(),
        Outcome::Lost => format!(
            "GAME OVER. The word was {}.",
            title_case(session.secret_word())
        ),
        Outcome::Started => "New game! Guess a letter to start.".to_owned(),
        Outcome::Won => format!("You WON! The word was {}.", title_case(session.secret_word())),
    }
}

/// Returns a short, styled reason for a failed word fetch, to show under [`UNAVAILABLE`].
pub(crate) fn word_source_error(err: &WordSourceError) -> String {
    let reason = match *err {
        WordSourceError::InvalidWord { .. } => "no usable word",
        WordSourceError::Malformed { .. } => "malformed words file",
        WordSourceError::NoWords { .. } => "no words for this genre",
        WordSourceError::Status(429) => "rate limited",
        WordSourceError::Status(code) if code >= 500 => "word service down",
        WordSourceError::Status(_) => "bad request",
        WordSourceError::TimedOut => "timed out",
        WordSourceError::Transport(_) => "word service unreachable",
        WordSourceError::Unreadable { .. } => "unreadable words file",
    };

    format!("{}", style(reason).bold().underlined())
}

/// Returns `word` with only its first letter in upper case.
fn title_case(word: &str) -> String {
    let mut chars = word.chars();

    chars.next().map_or_else(String::new, |first| {
        first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect()
    })
}
