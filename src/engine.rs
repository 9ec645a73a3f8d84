//! The engine module contains the core of the game: a single game's state and the rules that move
//! it forward.
//!
//! A [`GameSession`] starts out in progress and ends either won or lost. Guesses never take a
//! finished game anywhere; only drawing a new word through the [`Engine`] starts over.

use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::genre::GenreCatalog;
use crate::provider::{WordProvider, WordSourceError};

/// The number of lives a game starts with unless configured otherwise.
pub const DEFAULT_MAX_LIVES: u8 = 6;

/// How many words are requested from the provider before giving up on finding a usable one.
pub const MAX_WORD_ATTEMPTS: usize = 3;

/// The shortest secret word the engine accepts.
const MIN_WORD_LEN: usize = 2;

/// This enum holds the errors the game can run into. None of them is fatal; each one is scoped to
/// the request or session that caused it.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// The guess was not a single letter from A to Z. The session is left untouched.
    #[error("invalid guess {0:?}; expected a single letter from A to Z")]
    InvalidGuess(String),
    /// There are no genres to play with.
    #[error("no genres are configured")]
    NoGenres,
    /// The genre isn't offered. Only strict lookups report this; starting a game falls back to
    /// the default genre instead.
    #[error("unknown genre {0:?}")]
    UnknownGenre(String),
    /// No usable secret word could be obtained, so no game was started.
    #[error("could not get a secret word")]
    WordSource(#[from] WordSourceError),
}

/// This enum holds what the last operation on a session amounted to. It drives the message shown
/// to the player and lets a presentation layer style it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "letter", rename_all = "snake_case")]
pub enum Outcome {
    /// The letter had been guessed before; nothing changed.
    AlreadyGuessed(char),
    /// The letter is in the word.
    Correct(char),
    /// The letter is not in the word and cost a life.
    Incorrect(char),
    /// The input wasn't a single letter; nothing changed.
    Invalid,
    /// The game has been lost.
    Lost,
    /// A new game has just started.
    Started,
    /// The game has been won.
    Won,
}

/// This enum holds the stage a game is at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    /// Guesses are still being taken.
    InProgress,
    /// The player ran out of lives.
    Lost,
    /// Every letter of the word has been guessed.
    Won,
}

/// This structure holds the state of a single game.
///
/// Once the game is won or lost its guesses and lives are frozen until a new game replaces it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameSession {
    /// The genre the secret word was drawn from.
    genre: String,
    /// The letters guessed so far, upper-cased, in the order they were first guessed.
    guessed_letters: Vec<char>,
    /// The lives left, never above `max_lives`.
    lives_remaining: u8,
    /// The lives the game started with.
    max_lives: u8,
    /// The upper-cased secret word.
    secret_word: String,
    /// Whether the game is still on, won or lost.
    status: Status,
}

impl GameSession {
    /// Starts a game of `genre` around `secret_word` with `max_lives` lives. The word is trimmed
    /// and upper-cased; a game needs at least one life, so zero is bumped to one.
    ///
    /// # Errors
    ///
    /// Fails with [`WordSourceError::InvalidWord`] if the word is too short or holds anything
    /// other than the letters A to Z.
    pub fn new(genre: &str, secret_word: &str, max_lives: u8) -> Result<Self, GameError> {
        let word = normalize_word(secret_word).ok_or_else(|| WordSourceError::InvalidWord {
            word: secret_word.to_owned(),
        })?;
        let max_lives = max_lives.max(1);

        Ok(Self {
            genre: genre.to_owned(),
            guessed_letters: Vec::new(),
            lives_remaining: max_lives,
            max_lives,
            secret_word: word,
            status: Status::InProgress,
        })
    }

    /// Applies a guess and returns what it amounted to.
    ///
    /// A finished game ignores the guess and reports how it ended. A letter guessed before changes
    /// nothing. A new letter is recorded, costs a life if the word doesn't hold it, and may end the
    /// game; a win is checked before a loss.
    ///
    /// # Errors
    ///
    /// Fails with [`GameError::InvalidGuess`] if `raw`, once trimmed, isn't exactly one letter
    /// from A to Z. The session is left untouched.
    pub fn apply_guess(&mut self, raw: &str) -> Result<Outcome, GameError> {
        match self.status {
            Status::Won => return Ok(Outcome::Won),
            Status::Lost => return Ok(Outcome::Lost),
            Status::InProgress => {}
        }

        let letter = normalize_guess(raw)?;
        if self.guessed_letters.contains(&letter) {
            debug!(%letter, "letter already guessed");
            return Ok(Outcome::AlreadyGuessed(letter));
        }

        self.guessed_letters.push(letter);
        let hit = self.secret_word.contains(letter);
        if !hit {
            self.lives_remaining = self.lives_remaining.saturating_sub(1);
        }

        self.status = if self.is_word_complete() {
            Status::Won
        } else if self.lives_remaining == 0 {
            Status::Lost
        } else {
            Status::InProgress
        };

        let outcome = match self.status {
            Status::Won => Outcome::Won,
            Status::Lost => Outcome::Lost,
            Status::InProgress if hit => Outcome::Correct(letter),
            Status::InProgress => Outcome::Incorrect(letter),
        };
        debug!(%letter, ?outcome, lives = self.lives_remaining, "applied guess");

        Ok(outcome)
    }

    /// Returns the genre the secret word was drawn from.
    #[must_use]
    pub fn genre(&self) -> &str {
        &self.genre
    }

    /// Returns the letters guessed so far, in the order they were first guessed.
    #[must_use]
    pub fn guessed_letters(&self) -> &[char] {
        &self.guessed_letters
    }

    /// Returns whether the game is won or lost.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.status != Status::InProgress
    }

    /// Returns the lives left.
    #[must_use]
    pub const fn lives_remaining(&self) -> u8 {
        self.lives_remaining
    }

    /// Returns the lives the game started with.
    #[must_use]
    pub const fn max_lives(&self) -> u8 {
        self.max_lives
    }

    /// Returns the secret word. It is meant for the server side only; players see the word
    /// through [`crate::ViewModel::display_word`].
    #[must_use]
    pub fn secret_word(&self) -> &str {
        &self.secret_word
    }

    /// Returns the stage the game is at.
    #[must_use]
    pub const fn status(&self) -> Status {
        self.status
    }

    /// Returns whether every letter of the secret word has been guessed.
    fn is_word_complete(&self) -> bool {
        self.secret_word
            .chars()
            .all(|letter| self.guessed_letters.contains(&letter))
    }
}

/// This structure starts games: it knows the genres on offer, where words come from, and how many
/// lives a game gets.
pub struct Engine {
    /// The genres on offer.
    catalog: GenreCatalog,
    /// The lives each new game starts with.
    max_lives: u8,
    /// Where secret words come from.
    provider: Box<dyn WordProvider>,
}

impl Engine {
    /// Returns an engine drawing words from `provider` for the genres in `catalog`, with
    /// [`DEFAULT_MAX_LIVES`] lives per game.
    #[must_use]
    pub fn new(catalog: GenreCatalog, provider: Box<dyn WordProvider>) -> Self {
        Self {
            catalog,
            max_lives: DEFAULT_MAX_LIVES,
            provider,
        }
    }

    /// Returns the genres on offer.
    #[must_use]
    pub const fn catalog(&self) -> &GenreCatalog {
        &self.catalog
    }

    /// Starts a new game for the same genre as `session`, with a fresh word, full lives and no
    /// guesses. The genre isn't checked against the catalog again.
    ///
    /// # Errors
    ///
    /// Fails with [`GameError::WordSource`] when no usable word could be drawn.
    pub fn restart_same_genre(&self, session: &GameSession) -> Result<GameSession, GameError> {
        self.draw(session.genre())
    }

    /// Starts a new game for `genre`. A missing or unknown genre falls back to the catalog's
    /// default genre.
    ///
    /// # Errors
    ///
    /// Fails with [`GameError::WordSource`] when the provider fails, or keeps handing out unusable
    /// words for [`MAX_WORD_ATTEMPTS`] tries.
    pub fn start_game(&self, genre: Option<&str>) -> Result<GameSession, GameError> {
        self.draw(self.catalog.resolve(genre))
    }

    /// Sets the lives each new game starts with.
    #[must_use]
    pub fn with_max_lives(self, max_lives: u8) -> Self {
        Self {
            max_lives: max_lives.max(1),
            ..self
        }
    }

    /// Asks the provider for a word of `genre` until it hands out a usable one.
    fn draw(&self, genre: &str) -> Result<GameSession, GameError> {
        let mut rejected = String::new();

        for attempt in 1..=MAX_WORD_ATTEMPTS {
            let word = self.provider.fetch_word(genre).inspect_err(|err| {
                error!(%err, genre, "word source failed");
            })?;

            match GameSession::new(genre, &word, self.max_lives) {
                Ok(session) => {
                    info!(
                        genre,
                        letters = session.secret_word().len(),
                        lives = session.max_lives(),
                        "started a new game"
                    );
                    return Ok(session);
                }
                Err(_) => {
                    warn!(genre, attempt, word = %word, "rejected unusable word");
                    rejected = word;
                }
            }
        }

        Err(WordSourceError::InvalidWord { word: rejected }.into())
    }
}

/// Returns the single upper-cased letter `raw` stands for, ignoring surrounding whitespace.
fn normalize_guess(raw: &str) -> Result<char, GameError> {
    let mut chars = raw.trim().chars();

    match (chars.next(), chars.next()) {
        (Some(letter), None) if letter.is_ascii_alphabetic() => Ok(letter.to_ascii_uppercase()),
        _ => Err(GameError::InvalidGuess(raw.to_owned())),
    }
}

/// Returns `raw` trimmed and upper-cased, if it is a playable word.
fn normalize_word(raw: &str) -> Option<String> {
    let word = raw.trim();

    (word.len() >= MIN_WORD_LEN && word.bytes().all(|byte| byte.is_ascii_alphabetic()))
        .then(|| word.to_ascii_uppercase())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use proptest::prelude::*;
    use rstest::rstest;

    use super::*;
    use crate::provider::ScriptedWords;

    fn session(word: &str, max_lives: u8) -> GameSession {
        GameSession::new("Technology", word, max_lives).unwrap()
    }

    fn guess(session: &mut GameSession, raw: &str) -> Outcome {
        session.apply_guess(raw).unwrap()
    }

    fn engine(words: &[&str]) -> (Engine, Arc<ScriptedWords>) {
        let provider = Arc::new(ScriptedWords::new(words));
        let catalog = GenreCatalog::new(["Technology", "Animals"]).unwrap();

        (
            Engine::new(catalog, Box::new(Arc::clone(&provider))),
            provider,
        )
    }

    #[test]
    fn python_is_won_letter_by_letter() {
        let mut game = session("PYTHON", 6);

        assert_eq!(guess(&mut game, "P"), Outcome::Correct('P'), "P is in PYTHON");
        assert_eq!(game.lives_remaining(), 6, "a correct guess costs nothing");

        assert_eq!(guess(&mut game, "Z"), Outcome::Incorrect('Z'), "Z is not in PYTHON");
        assert_eq!(game.lives_remaining(), 5, "a wrong guess costs a life");

        assert_eq!(guess(&mut game, "p"), Outcome::AlreadyGuessed('P'), "guesses ignore case");
        assert_eq!(game.lives_remaining(), 5, "a repeated guess costs nothing");

        for letter in ["Y", "T", "H", "O"] {
            assert!(
                matches!(guess(&mut game, letter), Outcome::Correct(_)),
                "{letter} is in PYTHON"
            );
        }
        assert_eq!(guess(&mut game, "N"), Outcome::Won, "the last letter wins");
        assert_eq!(game.status(), Status::Won, "the game should be won");
        assert_eq!(game.guessed_letters(), ['P', 'Z', 'Y', 'T', 'H', 'O', 'N'], "order is kept");
    }

    #[test]
    fn last_life_loses() {
        let mut game = session("CAT", 1);

        assert_eq!(guess(&mut game, "X"), Outcome::Lost, "one wrong guess should lose");
        assert_eq!(game.lives_remaining(), 0, "no lives should be left");
        assert!(game.is_over(), "the game should be over");
    }

    #[test]
    fn finished_game_ignores_guesses() {
        let mut game = session("CAT", 1);
        let _ = guess(&mut game, "X");
        let frozen = game.clone();

        assert_eq!(guess(&mut game, "C"), Outcome::Lost, "a lost game stays lost");
        assert_eq!(guess(&mut game, "ab"), Outcome::Lost, "even bad input is ignored");
        assert_eq!(game, frozen, "nothing should change after the game is over");
    }

    #[rstest]
    #[case("ab")]
    #[case("")]
    #[case("   ")]
    #[case("7")]
    #[case("?")]
    #[case("\u{e9}")]
    fn invalid_guesses_leave_the_session_untouched(#[case] raw: &str) {
        let mut game = session("PYTHON", 6);
        let _ = guess(&mut game, "Z");
        let before = game.clone();

        assert_eq!(
            game.apply_guess(raw),
            Err(GameError::InvalidGuess(raw.to_owned())),
            "{raw:?} is not a letter"
        );
        assert_eq!(game, before, "an invalid guess must not change anything");
    }

    #[test]
    fn guesses_are_trimmed() {
        let mut game = session("PYTHON", 6);

        assert_eq!(guess(&mut game, "  y\n"), Outcome::Correct('Y'), "whitespace is ignored");
    }

    #[rstest]
    #[case("")]
    #[case("A")]
    #[case("ICE CREAM")]
    #[case("R2D2")]
    #[case("CAF\u{c9}")]
    fn unusable_words_are_rejected(#[case] word: &str) {
        assert_eq!(
            GameSession::new("Food", word, 6),
            Err(GameError::WordSource(WordSourceError::InvalidWord {
                word: word.to_owned()
            })),
            "{word:?} should not be playable"
        );
    }

    #[test]
    fn words_are_normalized() {
        assert_eq!(session(" python ", 6).secret_word(), "PYTHON", "words are upper-cased");
    }

    #[test]
    fn start_game_uses_a_fresh_session() {
        let (engine, provider) = engine(&["rust"]);
        let game = engine.start_game(Some("Technology")).unwrap();

        assert_eq!(game.genre(), "Technology", "the requested genre should be played");
        assert_eq!(game.secret_word(), "RUST", "the provider's word should be used");
        assert_eq!(game.lives_remaining(), DEFAULT_MAX_LIVES, "lives should be full");
        assert!(game.guessed_letters().is_empty(), "no letter should be guessed yet");
        assert_eq!(game.status(), Status::InProgress, "the game should be on");
        assert_eq!(provider.calls(), 1, "the provider should be asked exactly once");
    }

    #[test]
    fn unknown_genre_falls_back_to_default() {
        let (engine, _) = engine(&["TIGER"]);

        assert_eq!(
            engine.start_game(Some("Cheeses")).unwrap().genre(),
            "Technology",
            "an unknown genre should fall back to the default"
        );
    }

    #[test]
    fn unusable_words_are_retried() {
        let (engine, provider) = engine(&["", "two words", "TIGER"]);

        assert_eq!(
            engine.start_game(None).unwrap().secret_word(),
            "TIGER",
            "the first usable word should be played"
        );
        assert_eq!(provider.calls(), 3, "two words should have been rejected");
    }

    #[test]
    fn retries_are_bounded() {
        let (engine, provider) = engine(&["1", "2", "3", "FOURTH"]);

        assert_eq!(
            engine.start_game(None).map(|game| game.secret_word().to_owned()),
            Err(GameError::WordSource(WordSourceError::InvalidWord {
                word: "3".to_owned()
            })),
            "the engine should give up after the last attempt"
        );
        assert_eq!(provider.calls(), MAX_WORD_ATTEMPTS, "no more words should be asked for");
    }

    #[test]
    fn provider_failures_are_word_source_errors() {
        let provider = ScriptedWords::from_answers([Err(WordSourceError::TimedOut)]);
        let catalog = GenreCatalog::new(["Sports"]).unwrap();
        let engine = Engine::new(catalog, Box::new(provider));

        assert_eq!(
            engine.start_game(Some("Sports")).map(|game| game.max_lives()),
            Err(GameError::WordSource(WordSourceError::TimedOut)),
            "a timeout should surface as a word source error"
        );
    }

    #[rstest]
    #[case::after_a_loss(&["X", "Q"], Status::Lost)]
    #[case::after_a_win(&["T", "I", "G", "E", "R"], Status::Won)]
    fn restart_keeps_the_genre_and_resets_the_game(
        #[case] letters: &[&str],
        #[case] ending: Status,
    ) {
        let (engine, _) = engine(&["TIGER", "PENGUIN"]);
        let engine = engine.with_max_lives(2);
        let mut game = engine.start_game(Some("animals")).unwrap();
        for letter in letters {
            let _ = guess(&mut game, letter);
        }
        assert_eq!(game.status(), ending, "the first game should have ended");

        let fresh = engine.restart_same_genre(&game).unwrap();
        assert_eq!(fresh.genre(), "Animals", "the genre should be kept");
        assert_eq!(fresh.secret_word(), "PENGUIN", "a new word should be drawn");
        assert_eq!(fresh.lives_remaining(), 2, "lives should be reset");
        assert!(fresh.guessed_letters().is_empty(), "guesses should be reset");
        assert_eq!(fresh.status(), Status::InProgress, "the game should be on again");
    }

    fn secret_words() -> impl Strategy<Value = String> {
        "[A-Z]{2,12}"
    }

    fn guess_runs() -> impl Strategy<Value = Vec<char>> {
        prop::collection::vec(prop::char::range('A', 'Z'), 0..40)
    }

    proptest! {
        /// A game is won exactly when every letter of the word has been guessed.
        #[test]
        fn prop_won_iff_word_covered(word in secret_words(), letters in guess_runs(), lives in 1_u8..10) {
            let mut game = session(&word, lives);
            for letter in letters {
                let _ = game.apply_guess(&letter.to_string()).unwrap();
            }

            let covered = word.chars().all(|letter| game.guessed_letters().contains(&letter));
            prop_assert_eq!(game.status() == Status::Won, covered);
            if game.status() == Status::Lost {
                prop_assert_eq!(game.lives_remaining(), 0);
            }
        }

        /// Lives never go up while a game is played.
        #[test]
        fn prop_lives_never_increase(word in secret_words(), letters in guess_runs()) {
            let mut game = session(&word, DEFAULT_MAX_LIVES);
            let mut lives = game.lives_remaining();
            for letter in letters {
                let _ = game.apply_guess(&letter.to_string()).unwrap();
                prop_assert!(game.lives_remaining() <= lives);
                lives = game.lives_remaining();
            }
        }

        /// Guessing a letter a second time changes nothing.
        #[test]
        fn prop_repeated_guess_is_idempotent(word in secret_words(), letters in guess_runs(), repeat in prop::char::range('a', 'z')) {
            let mut game = session(&word, DEFAULT_MAX_LIVES);
            for letter in letters {
                let _ = game.apply_guess(&letter.to_string()).unwrap();
            }
            let _ = game.apply_guess(&repeat.to_string()).unwrap();
            let once = game.clone();

            let _ = game.apply_guess(&repeat.to_ascii_uppercase().to_string()).unwrap();
            prop_assert_eq!(game, once);
        }
    }
}
