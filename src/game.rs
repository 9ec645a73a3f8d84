//! The game module contains the terminal front end: it is the player-facing caller of the session
//! store.
//!
//! It contains the `init()` function to set up logging and the store and run the game loop, as
//! well as the rendering of a view model onto the terminal.

use std::io;
use std::time::Duration;

use anyhow::{anyhow, Result};
use clap::Parser;
use console::{style, Term};
use indicatif::ProgressBar;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Cli;
use crate::engine::{GameError, Outcome};
use crate::input::{end_of_game, retry, select_genre, take_guess, EndAction};
use crate::messages::{word_source_error, UNAVAILABLE};
use crate::session::SessionId;
use crate::view::ViewModel;

/// The environment variable holding the log filter.
const LOG_ENV: &str = "HANGWORD_LOG";

/// Sets up logging and the session store from the command line, then runs games until the player
/// quits. This is a `main()` function of sorts though it is still called from main.rs.
///
/// # Errors
///
/// The function may return any one of the following errors:
///
/// - io::Error
/// - dialoguer::Error
/// - hangword::WordSourceError, when a words file can't be loaded
/// - hangword::GameError, when no genres are configured
pub fn init() -> Result<()> {
    let cli = Cli::parse();
    init_tracing()?;

    let store = cli.build_store()?;
    let term = Term::stdout();
    let id = SessionId::generate();
    info!(session = %id, "starting the terminal session");

    init_message(&term)?;
    let mut genre = select_genre(&term, store.genres(), store.default_genre())?;
    let Some(mut view) = fetch(&term, || store.start_game(&id, Some(&genre)))? else {
        return goodbye(&term);
    };

    // game loop
    loop {
        draw(&term, &view)?;

        if !view.is_game_over {
            let guess = take_guess(&term)?;
            view = store.apply_guess(&id, &guess)?;
            continue;
        }

        let next = match end_of_game(&term)? {
            EndAction::PlayAgain => fetch(&term, || store.restart_same_genre(&id))?,
            EndAction::ChangeGenre => {
                genre = select_genre(&term, store.genres(), &view.current_genre)?;
                fetch(&term, || store.start_game(&id, Some(&genre)))?
            }
            EndAction::Quit => None,
        };

        match next {
            Some(fresh) => view = fresh,
            None => break goodbye(&term),
        }
    }
}

/// Installs the log subscriber. Logs go to standard error so they don't get in the way of the
/// game screen; only warnings are shown unless `HANGWORD_LOG` says otherwise.
fn init_tracing() -> Result<()> {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|err| anyhow!(err))
}

/// This function clears the screen, hides the cursor and shows the welcome message. The title of
/// the console window is also set to the name of the game.
fn init_message(term: &Term) -> Result<()> {
    const MSG: &str = "Welcome to the game of hangword";
    let msg = style(MSG).bold();

    term.clear_screen()?;
    term.set_title("hangword");
    term.hide_cursor()?;

    term.write_line(&format!("{msg}"))?;
    Ok(())
}

/// Runs `start` behind a spinner until it yields a game, offering to retry whenever no word could
/// be drawn. Returns `None` if the player gives up.
fn fetch<F>(term: &Term, start: F) -> Result<Option<ViewModel>>
where
    F: Fn() -> Result<ViewModel, GameError>,
{
    loop {
        let spinner = ProgressBar::new_spinner();
        spinner.set_message("Drawing a word...");
        spinner.enable_steady_tick(Duration::from_millis(50));
        let result = start();
        spinner.finish_and_clear();

        match result {
            Ok(view) => break Ok(Some(view)),
            Err(GameError::WordSource(err)) => {
                term.write_line(&format!("{}", style(UNAVAILABLE).red().bold()))?;
                term.write_line(&word_source_error(&err))?;

                if !retry(term)? {
                    break Ok(None);
                }
            }
            Err(err) => break Err(err.into()),
        }
    }
}

/// Draws the game described by `view`: the gallows, the word, the lives, the letters guessed so
/// far and the last message, styled after what the last operation amounted to.
fn draw(term: &Term, view: &ViewModel) -> Result<()> {
    term.clear_screen()?;
    term.write_line(&format!(
        "{} {}",
        style("Genre:").bold(),
        style(&view.current_genre).cyan()
    ))?;
    term.write_line("")?;
    term.write_line(view.hangman_art)?;
    term.write_line("")?;
    term.write_line(&format!("{}", style(view.spaced_word()).bold()))?;
    term.write_line("")?;
    term.write_line(&format!("Lives: {}/{}", view.lives, view.max_lives))?;

    let guessed: Vec<String> = view.guessed_letters.iter().map(char::to_string).collect();
    term.write_line(&format!("Guessed: {}", guessed.join(" ")))?;
    term.write_line("")?;

    let message = match view.outcome {
        Outcome::Won => style(&view.message).green().bold(),
        Outcome::Lost => style(&view.message).red().bold(),
        Outcome::Incorrect(_) | Outcome::Invalid | Outcome::AlreadyGuessed(_) => {
            style(&view.message).yellow()
        }
        Outcome::Correct(_) | Outcome::Started => style(&view.message).bold(),
    };
    term.write_line(&format!("{message}"))?;

    Ok(())
}

/// Clears the screen and gives the cursor back.
fn goodbye(term: &Term) -> Result<()> {
    term.clear_screen()?;
    term.show_cursor()?;

    Ok(())
}
