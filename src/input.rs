//! This module contains all functions related to taking input from the player. They all use the
//! `dialoguer` crate to prompt on the terminal.
//!
//! Guesses are taken as raw text on purpose: the engine is the one that decides what a valid guess
//! is, and the view it hands back tells the player what went wrong.

use anyhow::{anyhow, Result};
use console::{style, Term};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};

/// This enum holds the choices offered once a game is over.
#[expect(
    clippy::arbitrary_source_item_ordering,
    reason = "It's best if the items reflect the actual order they are displayed in the menu."
)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum EndAction {
    /// Play another game of the same genre.
    PlayAgain,
    /// Pick another genre, then play.
    ChangeGenre,
    /// Leave the game.
    Quit,
}

impl EndAction {
    /// Every choice, in menu order.
    const ALL: [Self; 3] = [Self::PlayAgain, Self::ChangeGenre, Self::Quit];

    /// Returns the menu label of the choice.
    const fn label(self) -> &'static str {
        match self {
            Self::PlayAgain => "Play again",
            Self::ChangeGenre => "Choose another genre",
            Self::Quit => "Quit",
        }
    }
}

/// This function asks what to do now that the game is over.
pub(crate) fn end_of_game(term: &Term) -> Result<EndAction> {
    let labels = EndAction::ALL.map(EndAction::label);
    let index = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(format!("{}", style("What next?").bold()))
        .items(&labels)
        .default(0)
        .interact_on(term)?;

    EndAction::ALL
        .get(index)
        .copied()
        .ok_or_else(|| anyhow!("no menu entry at {index}"))
}

/// This function asks whether to try drawing a word again after the word source failed.
pub(crate) fn retry(term: &Term) -> Result<bool> {
    let answer = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(format!("{}", style("Try again?").bold()))
        .default(true)
        .interact_on(term)?;

    Ok(answer)
}

/// This function asks the player to pick a genre out of `genres`, with `current` selected first.
pub(crate) fn select_genre(term: &Term, genres: &[String], current: &str) -> Result<String> {
    let start = genres
        .iter()
        .position(|genre| genre == current)
        .unwrap_or_default();
    let index = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(format!("{}", style("Pick a genre").bold()))
        .items(genres)
        .default(start)
        .interact_on(term)?;

    genres
        .get(index)
        .cloned()
        .ok_or_else(|| anyhow!("no genre at {index}"))
}

/// This function takes the player's next guess. Any text is accepted, empty included.
pub(crate) fn take_guess(term: &Term) -> Result<String> {
    let input: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(format!("{}", style("Guess a letter").bold()))
        .allow_empty(true)
        .interact_text_on(term)?;

    Ok(input)
}
