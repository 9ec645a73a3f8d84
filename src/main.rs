//! # hangword
//!
//! This crate is a game of hangman played on the terminal. A secret word is drawn for the genre
//! you pick, and you guess it one letter at a time before the gallows drawing is complete.
//!
//! Words come either from a small built-in table, from a words file of your own, or from a remote
//! word API queried for words related to the genre.

#![expect(
    unused_crate_dependencies,
    reason = "The dependencies are used in the library crate."
)]

use anyhow::Result;
use hangword::init;

fn main() -> Result<()> {
    init()
}
