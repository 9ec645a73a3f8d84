//! This module assembles the view model: the flat set of values a presentation layer renders
//! without any further logic.

use serde::Serialize;

use crate::art;
use crate::engine::{GameSession, Outcome};
use crate::messages::outcome_message;

/// The placeholder shown for letters not guessed yet.
pub const PLACEHOLDER: char = '_';

/// This structure holds everything needed to render a game.
#[expect(
    clippy::arbitrary_source_item_ordering,
    reason = "The fields follow the order the page renders them in."
)]
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ViewModel {
    /// The genre being played.
    pub current_genre: String,
    /// The lives left.
    pub lives: u8,
    /// The lives the game started with.
    pub max_lives: u8,
    /// Every genre on offer, in display order.
    pub genres: Vec<String>,
    /// The gallows drawing for the lives lost so far.
    pub hangman_art: &'static str,
    /// The secret word with every letter not guessed yet replaced by [`PLACEHOLDER`].
    pub display_word: String,
    /// The message for the last operation.
    pub message: String,
    /// The letters guessed so far, in the order they were first guessed.
    pub guessed_letters: Vec<char>,
    /// Whether the game is won or lost.
    pub is_game_over: bool,
    /// What the last operation amounted to. Not part of the rendered fields; presentation layers
    /// may use it to style the message instead of matching on its text.
    #[serde(skip)]
    pub outcome: Outcome,
}

impl ViewModel {
    /// Assembles the view of `session`, offering `genres`, after an operation that resulted in
    /// `outcome`.
    #[must_use]
    pub fn assemble(session: &GameSession, genres: &[String], outcome: Outcome) -> Self {
        Self {
            current_genre: session.genre().to_owned(),
            lives: session.lives_remaining(),
            max_lives: session.max_lives(),
            genres: genres.to_vec(),
            hangman_art: art::stage(session.max_lives(), session.lives_remaining()),
            display_word: display_word(session.secret_word(), session.guessed_letters()),
            message: outcome_message(outcome, session),
            guessed_letters: session.guessed_letters().to_vec(),
            is_game_over: session.is_over(),
            outcome,
        }
    }

    /// Returns the display word with a space between positions, for plain-text renderers.
    #[must_use]
    pub fn spaced_word(&self) -> String {
        let mut spaced = String::with_capacity(self.display_word.len() * 2);

        for (index, letter) in self.display_word.chars().enumerate() {
            if index > 0 {
                spaced.push(' ');
            }
            spaced.push(letter);
        }

        spaced
    }
}

/// Returns `secret_word` with every letter missing from `guessed` replaced by [`PLACEHOLDER`]. The
/// result has one character per letter of the word, in upper case.
#[must_use]
pub fn display_word(secret_word: &str, guessed: &[char]) -> String {
    secret_word
        .chars()
        .map(|letter| letter.to_ascii_uppercase())
        .map(|letter| {
            if guessed.contains(&letter) {
                letter
            } else {
                PLACEHOLDER
            }
        })
        .collect()
}
