//! Human readable move tokens: a face letter (`U`, `D`, `F`, `B`, `L`, `R`)
//! optionally followed by `i` (counter-clockwise) or `2` (half turn).

use crate::{
    face::Face,
    moves::{Move, MoveSequence, Turns},
};
use itertools::Itertools;
use std::{
    fmt::{self, Display},
    str::FromStr,
};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseMoveError {
    #[error("Invalid move token {0:?}, expected a face letter optionally followed by `i` or `2`")]
    InvalidMoveToken(String),
    #[error("Invalid face {0:?}, expected one of U, D, F, B, L, R")]
    InvalidFace(char),
}

impl FromStr for Move {
    type Err = ParseMoveError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let mut chars = token.chars();
        let Some(letter) = chars.next() else {
            return Err(ParseMoveError::InvalidMoveToken(token.to_owned()));
        };
        let face = Face::try_from(letter)?;
        let turns = match (chars.next(), chars.next()) {
            (None, _) => Turns::Clockwise,
            (Some('i'), None) => Turns::CounterClockwise,
            (Some('2'), None) => Turns::Half,
            _ => return Err(ParseMoveError::InvalidMoveToken(token.to_owned())),
        };
        Ok(Move::new(face, turns))
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suffix = match self.turns() {
            Turns::Clockwise => "",
            Turns::Half => "2",
            Turns::CounterClockwise => "i",
        };
        write!(f, "{}{suffix}", self.face())
    }
}

impl FromStr for MoveSequence {
    type Err = ParseMoveError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        text.split_whitespace().map(str::parse::<Move>).collect()
    }
}

impl Display for MoveSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.iter().join(" "))
    }
}
