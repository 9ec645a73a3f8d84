//! This module keeps one game per player, keyed by an opaque session identifier.
//!
//! The identifier belongs to whoever talks to the players (a web layer, the terminal front end).
//! Every operation on a stored game is a single read-modify-write under the store's lock, so two
//! requests racing on the same session can't both charge a life for the same letter. Drawing a
//! word may be slow and happens outside the lock.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::debug;

use crate::engine::{Engine, GameError, GameSession, Outcome};
use crate::view::ViewModel;

/// The length of the identifiers made by [`SessionId::generate`].
const GENERATED_LEN: usize = 24;

/// This structure is an opaque identifier for a player's session.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(String);

impl SessionId {
    /// Returns a random alphanumeric identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(
            std::iter::repeat_with(fastrand::alphanumeric)
                .take(GENERATED_LEN)
                .collect(),
        )
    }

    /// Wraps an identifier handed out by someone else.
    #[must_use]
    pub fn new(id: &str) -> Self {
        Self(id.to_owned())
    }

    /// Returns the identifier as text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

/// This structure holds a stored game along with the outcome of the last operation on it.
struct Slot {
    /// What the last operation amounted to.
    outcome: Outcome,
    /// The game itself.
    session: GameSession,
}

/// This structure stores the active game of every player and runs the game operations on them.
pub struct SessionStore {
    /// Starts new games.
    engine: Engine,
    /// The active game of each session.
    slots: Mutex<HashMap<SessionId, Slot>>,
}

impl SessionStore {
    /// Returns an empty store starting its games with `engine`.
    #[must_use]
    pub fn new(engine: Engine) -> Self {
        Self {
            engine,
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// Applies a guess to the game of `id` and returns the resulting view. A session without a
    /// game gets one in the default genre first.
    ///
    /// Invalid input is not an error here: the view carries the invalid-input message and the game
    /// is left as it was.
    ///
    /// # Errors
    ///
    /// Fails with [`GameError::WordSource`] only if a game had to be started and no word could be
    /// drawn.
    pub fn apply_guess(&self, id: &SessionId, raw: &str) -> Result<ViewModel, GameError> {
        let mut fresh = None;

        loop {
            let mut slots = self.lock();
            let slot = match fresh.take() {
                // another request may have started a game while the word was drawn
                Some(session) => Some(slots.entry(id.clone()).or_insert(Slot {
                    outcome: Outcome::Started,
                    session,
                })),
                None => slots.get_mut(id),
            };

            if let Some(slot) = slot {
                slot.outcome = match slot.session.apply_guess(raw) {
                    Ok(outcome) => outcome,
                    Err(GameError::InvalidGuess(input)) => {
                        debug!(session = %id, ?input, "rejected guess");
                        Outcome::Invalid
                    }
                    Err(err) => return Err(err),
                };

                return Ok(self.view_of(slot));
            }

            drop(slots);
            fresh = Some(self.engine.start_game(None)?);
        }
    }

    /// Returns the genre played when none, or an unknown one, is asked for.
    #[must_use]
    pub fn default_genre(&self) -> &str {
        self.engine.catalog().default_genre()
    }

    /// Returns the genres on offer, in display order.
    #[must_use]
    pub fn genres(&self) -> &[String] {
        self.engine.catalog().genres()
    }

    /// Forgets the game of `id`, returning whether there was one.
    pub fn remove(&self, id: &SessionId) -> bool {
        self.lock().remove(id).is_some()
    }

    /// Starts a new game for the genre of `id`'s current game, or in the default genre if `id`
    /// has no game yet.
    ///
    /// # Errors
    ///
    /// Fails with [`GameError::WordSource`] if no word could be drawn; the current game is kept.
    pub fn restart_same_genre(&self, id: &SessionId) -> Result<ViewModel, GameError> {
        let session = match self.session(id) {
            Some(current) => self.engine.restart_same_genre(&current)?,
            None => self.engine.start_game(None)?,
        };

        Ok(self.replace(id, session))
    }

    /// Returns a copy of the game of `id`, if there is one.
    #[must_use]
    pub fn session(&self, id: &SessionId) -> Option<GameSession> {
        self.lock().get(id).map(|slot| slot.session.clone())
    }

    /// Starts a new game for `id` in `genre`, replacing any game it had. A missing or unknown
    /// genre falls back to the default genre.
    ///
    /// # Errors
    ///
    /// Fails with [`GameError::WordSource`] if no word could be drawn; the current game is kept.
    pub fn start_game(&self, id: &SessionId, genre: Option<&str>) -> Result<ViewModel, GameError> {
        let session = self.engine.start_game(genre)?;

        Ok(self.replace(id, session))
    }

    /// Returns the view of `id`'s game, starting one in the default genre if it has none.
    ///
    /// # Errors
    ///
    /// Fails with [`GameError::WordSource`] if a game had to be started and no word could be
    /// drawn.
    pub fn view(&self, id: &SessionId) -> Result<ViewModel, GameError> {
        if let Some(slot) = self.lock().get(id) {
            return Ok(self.view_of(slot));
        }

        self.start_game(id, None)
    }

    /// Locks the slots, carrying on with whatever state a panicking holder left behind.
    fn lock(&self) -> MutexGuard<'_, HashMap<SessionId, Slot>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Stores `session` as the new game of `id` and returns its view.
    fn replace(&self, id: &SessionId, session: GameSession) -> ViewModel {
        let slot = Slot {
            outcome: Outcome::Started,
            session,
        };
        let view = self.view_of(&slot);
        let _ = self.lock().insert(id.clone(), slot);

        view
    }

    /// Assembles the view of a stored game.
    fn view_of(&self, slot: &Slot) -> ViewModel {
        ViewModel::assemble(&slot.session, self.genres(), slot.outcome)
    }
}
