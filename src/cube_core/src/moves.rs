use crate::face::Face;
use std::ops::Index;

/// How far a face is turned, in clockwise quarter turns.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Turns {
    Clockwise = 1,
    Half = 2,
    CounterClockwise = 3,
}

impl Turns {
    pub const ALL: [Self; 3] = [Turns::Clockwise, Turns::Half, Turns::CounterClockwise];

    /// Normalize a signed quarter turn count modulo 4. Returns `None` when
    /// the count amounts to no turn at all.
    #[must_use]
    pub fn from_quarter_turns(quarter_turns: i32) -> Option<Self> {
        match quarter_turns.rem_euclid(4) {
            1 => Some(Turns::Clockwise),
            2 => Some(Turns::Half),
            3 => Some(Turns::CounterClockwise),
            _ => None,
        }
    }

    #[must_use]
    pub fn quarter_turns(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub fn inverse(self) -> Self {
        match self {
            Turns::Clockwise => Turns::CounterClockwise,
            Turns::Half => Turns::Half,
            Turns::CounterClockwise => Turns::Clockwise,
        }
    }

    /// `+1` for clockwise, `-1` for counter-clockwise, `0` for a half turn,
    /// which has no direction.
    #[must_use]
    pub fn sign(self) -> i8 {
        match self {
            Turns::Clockwise => 1,
            Turns::Half => 0,
            Turns::CounterClockwise => -1,
        }
    }
}

/// A turn of one face.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Move {
    face: Face,
    turns: Turns,
}

impl Move {
    #[must_use]
    pub fn new(face: Face, turns: Turns) -> Self {
        Move { face, turns }
    }

    #[must_use]
    pub fn clockwise(face: Face) -> Self {
        Move::new(face, Turns::Clockwise)
    }

    #[must_use]
    pub fn counter_clockwise(face: Face) -> Self {
        Move::new(face, Turns::CounterClockwise)
    }

    #[must_use]
    pub fn half(face: Face) -> Self {
        Move::new(face, Turns::Half)
    }

    /// A move of `quarter_turns` clockwise quarter turns, normalized modulo
    /// 4. `None` if the count is a multiple of 4.
    #[must_use]
    pub fn from_quarter_turns(face: Face, quarter_turns: i32) -> Option<Self> {
        Turns::from_quarter_turns(quarter_turns).map(|turns| Move::new(face, turns))
    }

    #[must_use]
    pub fn face(self) -> Face {
        self.face
    }

    #[must_use]
    pub fn turns(self) -> Turns {
        self.turns
    }

    #[must_use]
    pub fn inverse(self) -> Self {
        Move::new(self.face, self.turns.inverse())
    }

    #[must_use]
    pub fn reframed(self, quarter_turns: u8) -> Self {
        Move::new(self.face.reframed(quarter_turns), self.turns)
    }
}

/// An ordered list of moves, applied first to last.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct MoveSequence(pub Vec<Move>);

impl MoveSequence {
    #[must_use]
    pub fn new() -> Self {
        MoveSequence(vec![])
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.0.iter()
    }

    pub fn push(&mut self, move_: Move) {
        self.0.push(move_);
    }

    pub fn extend_from(&mut self, other: &MoveSequence) {
        self.0.extend_from_slice(&other.0);
    }

    /// This sequence followed by `other`.
    #[must_use]
    pub fn then(mut self, other: &MoveSequence) -> Self {
        self.extend_from(other);
        self
    }

    /// The sequence that undoes this one.
    #[must_use]
    pub fn inverse(&self) -> Self {
        self.0.iter().rev().map(|move_| move_.inverse()).collect()
    }

    #[must_use]
    pub fn reframed(&self, quarter_turns: u8) -> Self {
        self.0
            .iter()
            .map(|move_| move_.reframed(quarter_turns))
            .collect()
    }

    /// This sequence repeated `count` times.
    #[must_use]
    pub fn repeated(&self, count: usize) -> Self {
        MoveSequence(self.0.repeat(count))
    }

    /// Merge runs of moves on the same face, dropping runs that cancel out.
    /// The result has the same effect on every state.
    #[must_use]
    pub fn simplified(&self) -> Self {
        let mut merged: Vec<Move> = Vec::with_capacity(self.0.len());
        for &move_ in &self.0 {
            match merged.last() {
                Some(&last) if last.face == move_.face => {
                    merged.pop();
                    let total = i32::from(last.turns.quarter_turns())
                        + i32::from(move_.turns.quarter_turns());
                    if let Some(combined) = Move::from_quarter_turns(move_.face, total) {
                        merged.push(combined);
                    }
                }
                _ => merged.push(move_),
            }
        }
        MoveSequence(merged)
    }

    /// The number of quarter turns, counting a half turn as two.
    #[must_use]
    pub fn quarter_turn_count(&self) -> usize {
        self.0
            .iter()
            .map(|move_| match move_.turns {
                Turns::Half => 2,
                Turns::Clockwise | Turns::CounterClockwise => 1,
            })
            .sum()
    }
}

impl FromIterator<Move> for MoveSequence {
    fn from_iter<T: IntoIterator<Item = Move>>(iter: T) -> Self {
        MoveSequence(iter.into_iter().collect())
    }
}

impl IntoIterator for MoveSequence {
    type Item = Move;
    type IntoIter = std::vec::IntoIter<Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a MoveSequence {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Index<usize> for MoveSequence {
    type Output = Move;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl From<Vec<Move>> for MoveSequence {
    fn from(moves: Vec<Move>) -> Self {
        MoveSequence(moves)
    }
}

/// Both outer layers of an axis turned together in the same rotational
/// direction. Centers never move in this model, so this is the face-turn
/// pair a reorientation about that axis is built from rather than a
/// relabeling of the faces.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Rotation {
    /// `R Li`
    X,
    /// `U Di`
    Y,
    /// `F Bi`
    Z,
}

impl Rotation {
    #[must_use]
    pub fn moves(self) -> MoveSequence {
        let (face, opposite) = match self {
            Rotation::X => (Face::Right, Face::Left),
            Rotation::Y => (Face::Up, Face::Down),
            Rotation::Z => (Face::Front, Face::Back),
        };
        MoveSequence(vec![
            Move::clockwise(face),
            Move::counter_clockwise(opposite),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(moves: &[(Face, Turns)]) -> MoveSequence {
        moves
            .iter()
            .map(|&(face, turns)| Move::new(face, turns))
            .collect()
    }

    #[test]
    fn quarter_turns_normalize_modulo_four() {
        assert_eq!(Turns::from_quarter_turns(0), None);
        assert_eq!(Turns::from_quarter_turns(4), None);
        assert_eq!(Turns::from_quarter_turns(-4), None);
        assert_eq!(Turns::from_quarter_turns(5), Some(Turns::Clockwise));
        assert_eq!(Turns::from_quarter_turns(-1), Some(Turns::CounterClockwise));
        assert_eq!(Turns::from_quarter_turns(6), Some(Turns::Half));
        assert_eq!(Turns::from_quarter_turns(-2), Some(Turns::Half));
    }

    #[test]
    fn inverse_reverses_and_inverts() {
        let sequence = seq(&[
            (Face::Right, Turns::Clockwise),
            (Face::Up, Turns::Half),
            (Face::Front, Turns::CounterClockwise),
        ]);
        let expected = seq(&[
            (Face::Front, Turns::Clockwise),
            (Face::Up, Turns::Half),
            (Face::Right, Turns::CounterClockwise),
        ]);
        assert_eq!(sequence.inverse(), expected);
        assert_eq!(sequence.inverse().inverse(), sequence);
        assert_eq!(sequence.clone().then(&expected).simplified(), MoveSequence::new());
    }

    #[test]
    fn simplification_merges_same_face_runs() {
        let sequence = seq(&[
            (Face::Right, Turns::Clockwise),
            (Face::Right, Turns::Clockwise),
            (Face::Up, Turns::Clockwise),
            (Face::Up, Turns::CounterClockwise),
            (Face::Right, Turns::Clockwise),
            (Face::Left, Turns::Half),
        ]);
        // R R -> R2, U Ui cancels, then R2 R -> Ri
        let expected = seq(&[
            (Face::Right, Turns::CounterClockwise),
            (Face::Left, Turns::Half),
        ]);
        assert_eq!(sequence.simplified(), expected);
        assert!(seq(&[(Face::Down, Turns::Half), (Face::Down, Turns::Half)])
            .simplified()
            .is_empty());
    }

    #[test]
    fn quarter_turn_count_counts_half_turns_twice() {
        let sequence = seq(&[
            (Face::Right, Turns::Half),
            (Face::Up, Turns::CounterClockwise),
        ]);
        assert_eq!(sequence.len(), 2);
        assert_eq!(sequence.quarter_turn_count(), 3);
    }

    #[test]
    fn rotations_pair_opposite_faces() {
        for rotation in [Rotation::X, Rotation::Y, Rotation::Z] {
            let moves = rotation.moves();
            assert_eq!(moves.len(), 2);
            assert_eq!(moves[0].face().opposite(), moves[1].face());
            assert_eq!(moves[0].turns(), Turns::Clockwise);
            assert_eq!(moves[1].turns(), Turns::CounterClockwise);
        }
    }
}
