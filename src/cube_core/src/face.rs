use crate::notation::ParseMoveError;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// One of the six faces of the cube. The discriminant doubles as the index
/// of the face in facelet storage and in the move tables.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Face {
    #[serde(rename = "U")]
    Up,
    #[serde(rename = "D")]
    Down,
    #[serde(rename = "F")]
    Front,
    #[serde(rename = "B")]
    Back,
    #[serde(rename = "L")]
    Left,
    #[serde(rename = "R")]
    Right,
}

/// The three axes through opposite face centers.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Axis {
    UpDown,
    FrontBack,
    LeftRight,
}

impl Face {
    pub const ALL: [Self; 6] = {
        use Face::*;
        let v = [Up, Down, Front, Back, Left, Right];

        let mut i = 0;
        while i < v.len() {
            assert!(i == v[i] as usize);
            i += 1;
        }

        v
    };

    /// The four side faces, counter-clockwise as seen from above.
    pub const SIDES: [Self; 4] = [Face::Front, Face::Right, Face::Back, Face::Left];

    #[must_use]
    pub fn letter(self) -> char {
        match self {
            Face::Up => 'U',
            Face::Down => 'D',
            Face::Front => 'F',
            Face::Back => 'B',
            Face::Left => 'L',
            Face::Right => 'R',
        }
    }

    #[must_use]
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'U' => Some(Face::Up),
            'D' => Some(Face::Down),
            'F' => Some(Face::Front),
            'B' => Some(Face::Back),
            'L' => Some(Face::Left),
            'R' => Some(Face::Right),
            _ => None,
        }
    }

    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Face::Up => Face::Down,
            Face::Down => Face::Up,
            Face::Front => Face::Back,
            Face::Back => Face::Front,
            Face::Left => Face::Right,
            Face::Right => Face::Left,
        }
    }

    #[must_use]
    pub fn axis(self) -> Axis {
        match self {
            Face::Up | Face::Down => Axis::UpDown,
            Face::Front | Face::Back => Axis::FrontBack,
            Face::Left | Face::Right => Axis::LeftRight,
        }
    }

    /// The face that takes this face's place after the whole cube is turned
    /// `quarter_turns` times about the Up axis, carrying Front to Right,
    /// Right to Back, Back to Left and Left to Front. Up and Down are fixed.
    ///
    /// An algorithm written for the front-right slot and reframed by one
    /// quarter turn acts on the right-back slot in exactly the same way.
    #[must_use]
    pub fn reframed(self, quarter_turns: u8) -> Self {
        match Face::SIDES.iter().position(|&side| side == self) {
            Some(i) => Face::SIDES[(i + quarter_turns as usize) % 4],
            None => self,
        }
    }
}

impl TryFrom<char> for Face {
    type Error = ParseMoveError;

    fn try_from(letter: char) -> Result<Self, Self::Error> {
        Face::from_letter(letter).ok_or(ParseMoveError::InvalidFace(letter))
    }
}

impl Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_round_trip() {
        for face in Face::ALL {
            assert_eq!(Face::from_letter(face.letter()), Some(face));
            assert_eq!(Face::try_from(face.letter()).unwrap(), face);
        }
        assert!(matches!(
            Face::try_from('X'),
            Err(ParseMoveError::InvalidFace('X'))
        ));
    }

    #[test]
    fn opposite_is_an_involution_on_the_same_axis() {
        for face in Face::ALL {
            assert_ne!(face.opposite(), face);
            assert_eq!(face.opposite().opposite(), face);
            assert_eq!(face.opposite().axis(), face.axis());
        }
    }

    #[test]
    fn reframing_cycles_the_sides() {
        assert_eq!(Face::Front.reframed(1), Face::Right);
        assert_eq!(Face::Right.reframed(1), Face::Back);
        assert_eq!(Face::Left.reframed(1), Face::Front);
        assert_eq!(Face::Front.reframed(3), Face::Left);
        assert_eq!(Face::Up.reframed(2), Face::Up);
        assert_eq!(Face::Down.reframed(1), Face::Down);
        for face in Face::ALL {
            assert_eq!(face.reframed(4), face);
        }
    }
}
