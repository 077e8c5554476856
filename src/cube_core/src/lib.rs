#![warn(clippy::pedantic)]
#![allow(clippy::similar_names, clippy::too_many_lines)]

//! State, move algebra, scrambling and a layer-by-layer solver for the 3x3x3
//! cube.
//!
//! The canonical state is the cubie model ([`Cube`]); the facelet view
//! ([`FaceletCube`]) is a projection of it and the only shape exchanged with
//! rendering collaborators. Everything here is synchronous and owns its
//! state exclusively.

pub(crate) mod algorithms;
pub mod cubie;
pub mod face;
pub mod facelet;
pub mod moves;
pub mod notation;
pub mod scramble;
pub mod solver;

pub use cubie::{Corner, Cube, Edge, InvalidStateError, Layer};
pub use face::Face;
pub use facelet::{Color, ColorScheme, ColorSchemeError, FaceletCube, ParseFaceletsError};
pub use moves::{Move, MoveSequence, Rotation, Turns};
pub use notation::ParseMoveError;
pub use scramble::{ScrambleConfig, Scrambler};
pub use solver::{SolveError, Solver, SolverConfig, Stage};

#[macro_export]
macro_rules! start {
    ($msg:expr) => {
        concat!("⏳ ", $msg)
    };
}

#[macro_export]
macro_rules! working {
    ($msg:expr) => {
        concat!("🛠  ", $msg)
    };
}

#[macro_export]
macro_rules! success {
    ($msg:expr) => {
        concat!("✅ ", $msg)
    };
}

/// The solved cube.
#[must_use]
pub fn create_solved() -> Cube {
    Cube::solved()
}

/// Apply a single move, returning the new state.
#[must_use]
pub fn apply(cube: &Cube, move_: Move) -> Cube {
    let mut next = cube.clone();
    next.apply_move(move_);
    next
}

/// Apply every move of `sequence` in order, returning the new state.
#[must_use]
pub fn apply_all(cube: &Cube, sequence: &MoveSequence) -> Cube {
    let mut next = cube.clone();
    next.apply_sequence(sequence);
    next
}

/// Generate a random scramble of `length` quarter turns with the default
/// scramble policy.
#[must_use]
pub fn scramble(length: usize) -> MoveSequence {
    Scrambler::new(ScrambleConfig::default()).generate_with_length(length)
}

/// Solve `cube` with the default solver configuration.
///
/// # Errors
///
/// See [`SolveError`].
pub fn solve(cube: &Cube) -> Result<MoveSequence, SolveError> {
    Solver::new().solve(cube)
}

#[must_use]
pub fn is_solved(cube: &Cube) -> bool {
    cube.is_solved()
}

/// Parse a single move token such as `R`, `Ri` or `R2`.
///
/// # Errors
///
/// See [`ParseMoveError`].
pub fn parse_move(token: &str) -> Result<Move, ParseMoveError> {
    token.parse()
}

#[must_use]
pub fn format_move(move_: Move) -> String {
    move_.to_string()
}

/// Parse whitespace separated move tokens.
///
/// # Errors
///
/// Fails on the first token that does not parse. See [`ParseMoveError`].
pub fn parse_sequence(text: &str) -> Result<MoveSequence, ParseMoveError> {
    text.parse()
}

#[must_use]
pub fn format_sequence(sequence: &MoveSequence) -> String {
    sequence.to_string()
}
