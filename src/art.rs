//! The gallows drawings, one per wrong guess.

/// The empty gallows.
const EMPTY: &str = "   -----
   |   |
       |
       |
       |
       |
---------";

/// The gallows with a head.
const HEAD: &str = "   -----
   |   |
   O   |
       |
       |
       |
---------";

/// The gallows with a head and a body.
const BODY: &str = "   -----
   |   |
   O   |
   |   |
       |
       |
---------";

/// The gallows with one arm up.
const LEFT_ARM: &str = "   -----
   |   |
   O   |
  /|   |
       |
       |
---------";

/// The gallows with both arms up.
const RIGHT_ARM: &str = "   -----
   |   |
   O   |
  /|\\  |
       |
       |
---------";

/// The gallows with one leg down.
const LEFT_LEG: &str = "   -----
   |   |
   O   |
  /|\\  |
  /    |
       |
---------";

/// The complete drawing.
const FULL: &str = "   -----
   |   |
   O   |
  /|\\  |
  / \\  |
       |
---------";

/// Every stage of the drawing, from no wrong guesses up to the complete figure.
pub const STAGES: [&str; 7] = [EMPTY, HEAD, BODY, LEFT_ARM, RIGHT_ARM, LEFT_LEG, FULL];

/// Returns the drawing for a game with `max_lives` lives of which `lives_remaining` are left.
///
/// The stage is the number of lives lost. Games with more lives than there are stages keep
/// showing the complete figure once it is reached.
#[must_use]
pub fn stage(max_lives: u8, lives_remaining: u8) -> &'static str {
    let misses = usize::from(max_lives.saturating_sub(lives_remaining));

    STAGES.get(misses).copied().unwrap_or(FULL)
}
