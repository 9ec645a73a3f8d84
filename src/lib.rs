//! The library components of the game. They allow drawing a secret word for a genre, playing it
//! out letter by letter, and rendering the result through a flat view model.
//!
//! The core is the [`engine`]: a [`GameSession`] is a single game, started by an [`Engine`] from a
//! word drawn out of a [`WordProvider`]. The [`SessionStore`] keeps one game per player and is the
//! entry point for whatever talks to the players; the terminal front end started by [`init()`] is
//! one such caller.

pub mod art;
mod config;
pub mod engine;
mod game;
pub mod genre;
mod input;
mod messages;
pub mod provider;
pub mod session;
pub mod view;

pub use engine::{Engine, GameError, GameSession, Outcome, Status};
pub use game::init;
pub use genre::GenreCatalog;
pub use provider::{RemoteWords, WordProvider, WordSourceError, WordTable};
pub use session::{SessionId, SessionStore};
pub use view::ViewModel;
