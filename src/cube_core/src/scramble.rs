use crate::{
    face::Face,
    moves::{Move, MoveSequence, Turns},
};
use log::trace;
use serde::{Deserialize, Serialize};

/// How many times a single move is redrawn before falling back to the first
/// allowed face.
const MAX_REDRAWS: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrambleConfig {
    /// Number of moves in a scramble.
    pub length: usize,
    /// Whether half turns may be drawn. Otherwise every move is a clockwise
    /// or counter-clockwise quarter turn.
    pub half_turns: bool,
    /// Seed for reproducible scrambles.
    pub seed: Option<u64>,
}

impl Default for ScrambleConfig {
    fn default() -> Self {
        ScrambleConfig {
            length: 20,
            half_turns: false,
            seed: None,
        }
    }
}

/// Draws random move sequences in which no move turns the same face as the
/// move before it and no three consecutive moves share an axis.
#[derive(Debug, Clone)]
pub struct Scrambler {
    config: ScrambleConfig,
    rng: fastrand::Rng,
}

impl Scrambler {
    #[must_use]
    pub fn new(config: ScrambleConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };
        Scrambler { config, rng }
    }

    #[must_use]
    pub fn config(&self) -> &ScrambleConfig {
        &self.config
    }

    /// A scramble of the configured length.
    pub fn generate(&mut self) -> MoveSequence {
        self.generate_with_length(self.config.length)
    }

    pub fn generate_with_length(&mut self, length: usize) -> MoveSequence {
        let mut scramble = MoveSequence::new();
        for _ in 0..length {
            let face = self.draw_face(&scramble);
            let turns = self.draw_turns();
            scramble.push(Move::new(face, turns));
        }
        scramble
    }

    fn draw_face(&mut self, so_far: &MoveSequence) -> Face {
        for redraw in 0..MAX_REDRAWS {
            let face = Face::ALL[self.rng.usize(..Face::ALL.len())];
            if allowed_after(so_far, face) {
                return face;
            }
            trace!("Redrawing scramble move {} (attempt {redraw}): {face} not allowed", so_far.len());
        }

        // At most one axis is ever excluded, so four faces always remain
        Face::ALL
            .into_iter()
            .find(|&face| allowed_after(so_far, face))
            .unwrap_or(Face::Up)
    }

    fn draw_turns(&mut self) -> Turns {
        if self.config.half_turns {
            Turns::ALL[self.rng.usize(..Turns::ALL.len())]
        } else if self.rng.bool() {
            Turns::Clockwise
        } else {
            Turns::CounterClockwise
        }
    }
}

/// Whether a move on `face` may follow `so_far`.
fn allowed_after(so_far: &MoveSequence, face: Face) -> bool {
    let mut recent = so_far.iter().rev();
    match (recent.next(), recent.next()) {
        (Some(last), _) if last.face() == face => false,
        (Some(last), Some(before)) => {
            !(last.face().axis() == face.axis() && before.face().axis() == face.axis())
        }
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;

    fn seeded(seed: u64) -> Scrambler {
        Scrambler::new(ScrambleConfig {
            seed: Some(seed),
            ..ScrambleConfig::default()
        })
    }

    #[test]
    fn default_length_is_twenty() {
        assert_eq!(seeded(1).generate().len(), 20);
        assert_eq!(seeded(1).generate_with_length(0).len(), 0);
        assert_eq!(seeded(1).generate_with_length(57).len(), 57);
    }

    #[test]
    fn consecutive_moves_never_share_a_face() {
        let mut scrambler = seeded(42);
        for _ in 0..200 {
            let scramble = scrambler.generate();
            for (a, b) in scramble.iter().tuple_windows() {
                assert_ne!(a.face(), b.face(), "{scramble}");
            }
        }
    }

    #[test]
    fn no_three_moves_in_a_row_share_an_axis() {
        let mut scrambler = seeded(7);
        for _ in 0..200 {
            let scramble = scrambler.generate_with_length(40);
            for (a, b, c) in scramble.iter().tuple_windows() {
                let axis = a.face().axis();
                assert!(
                    b.face().axis() != axis || c.face().axis() != axis,
                    "{scramble}"
                );
            }
        }
    }

    #[test]
    fn quarter_turns_only_by_default() {
        let mut scrambler = seeded(3);
        for _ in 0..50 {
            assert!(
                scrambler
                    .generate()
                    .iter()
                    .all(|move_| move_.turns() != Turns::Half)
            );
        }
    }

    #[test]
    fn half_turns_can_be_enabled() {
        let mut scrambler = Scrambler::new(ScrambleConfig {
            half_turns: true,
            seed: Some(9),
            ..ScrambleConfig::default()
        });
        let moves = scrambler.generate_with_length(500);
        assert!(moves.iter().any(|move_| move_.turns() == Turns::Half));
    }

    #[test]
    fn seeds_make_scrambles_reproducible() {
        assert_eq!(seeded(1234).generate(), seeded(1234).generate());
        assert_ne!(seeded(1).generate(), seeded(2).generate());
    }

    #[test]
    fn every_face_is_drawn() {
        let moves = seeded(5).generate_with_length(600);
        for face in Face::ALL {
            assert!(moves.iter().any(|move_| move_.face() == face));
        }
    }
}
