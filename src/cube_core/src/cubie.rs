//! The canonical cube state: where each of the 20 movable pieces sits and how
//! it is twisted. Centers never move and are not stored.

use crate::{
    face::Face,
    facelet::{Color, ColorScheme, FaceletCube},
    moves::{Move, MoveSequence},
};
use std::sync::LazyLock;
use thiserror::Error;

/// A corner slot, or the corner piece that belongs in it when solved. The
/// first letter names the Up or Down face, which carries the piece's
/// reference sticker.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Corner {
    Urf,
    Ufl,
    Ulb,
    Ubr,
    Dfr,
    Dlf,
    Dbl,
    Drb,
}

/// An edge slot, or the edge piece that belongs in it when solved. The first
/// letter names the face carrying the piece's reference sticker.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Edge {
    Ur,
    Uf,
    Ul,
    Ub,
    Dr,
    Df,
    Dl,
    Db,
    Fr,
    Fl,
    Bl,
    Br,
}

/// The horizontal layer a piece slot belongs to.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Layer {
    Up,
    Middle,
    Down,
}

impl Corner {
    pub const ALL: [Self; 8] = {
        use Corner::*;
        let v = [Urf, Ufl, Ulb, Ubr, Dfr, Dlf, Dbl, Drb];

        let mut i = 0;
        while i < v.len() {
            assert!(i == v[i] as usize);
            i += 1;
        }

        v
    };

    #[must_use]
    pub fn layer(self) -> Layer {
        if (self as usize) < 4 {
            Layer::Up
        } else {
            Layer::Down
        }
    }
}

impl Edge {
    pub const ALL: [Self; 12] = {
        use Edge::*;
        let v = [Ur, Uf, Ul, Ub, Dr, Df, Dl, Db, Fr, Fl, Bl, Br];

        let mut i = 0;
        while i < v.len() {
            assert!(i == v[i] as usize);
            i += 1;
        }

        v
    };

    #[must_use]
    pub fn layer(self) -> Layer {
        match self as usize {
            0..4 => Layer::Up,
            4..8 => Layer::Down,
            _ => Layer::Middle,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidStateError {
    #[error("Expected 9 facelets of color {color}, found {count}")]
    ColorCount { color: Color, count: usize },
    #[error("Two faces share the center color {0}")]
    DuplicateCenter(Color),
    #[error("The stickers in corner slot {0:?} do not form a corner piece")]
    UnknownCorner(Corner),
    #[error("The stickers in edge slot {0:?} do not form an edge piece")]
    UnknownEdge(Edge),
    #[error("Piece or orientation value out of range: {0}")]
    OutOfRange(&'static str),
    #[error("Corner piece {0:?} appears more than once")]
    DuplicateCorner(Corner),
    #[error("Edge piece {0:?} appears more than once")]
    DuplicateEdge(Edge),
    #[error("Corner twists do not sum to a multiple of 3")]
    CornerTwist,
    #[error("Edge flips do not sum to a multiple of 2")]
    EdgeFlip,
    #[error("Corner and edge permutations have different parities")]
    Parity,
}

/// A cube state in the cubie model.
///
/// `cp[slot]` is the corner piece sitting in `slot` and `co[slot]` its twist:
/// the index, within the slot's clockwise sticker order, of the sticker
/// showing the piece's Up/Down color. Edges are the same with two stickers.
/// Every value of this type is reachable from the solved state.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cube {
    pub(crate) cp: [u8; 8],
    pub(crate) co: [u8; 8],
    pub(crate) ep: [u8; 12],
    pub(crate) eo: [u8; 12],
}

/// The clockwise quarter turn of each face, indexed by `Face as usize`.
/// Derived from the facelet-level turn so that both views agree by
/// construction.
static QUARTER_TURNS: LazyLock<[Cube; 6]> = LazyLock::new(|| {
    Face::ALL.map(|face| {
        let mut facelets = FaceletCube::solved(&ColorScheme::default());
        facelets.turn(Move::clockwise(face));
        Cube::try_from(&facelets).expect("A quarter turn of the solved cube is a valid state")
    })
});

impl Default for Cube {
    fn default() -> Self {
        Cube::solved()
    }
}

impl Cube {
    pub const SOLVED: Cube = Cube {
        cp: [0, 1, 2, 3, 4, 5, 6, 7],
        co: [0; 8],
        ep: [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11],
        eo: [0; 12],
    };

    #[must_use]
    pub fn solved() -> Self {
        Cube::SOLVED
    }

    /// Build a state from raw permutation and orientation vectors.
    ///
    /// # Errors
    ///
    /// If the vectors do not describe a state reachable from solved. See
    /// `InvalidStateError`.
    pub fn try_from_parts(
        cp: [u8; 8],
        co: [u8; 8],
        ep: [u8; 12],
        eo: [u8; 12],
    ) -> Result<Self, InvalidStateError> {
        let cube = Cube { cp, co, ep, eo };
        cube.validate()?;
        Ok(cube)
    }

    /// Check the reachability invariants: both permutations are bijections,
    /// twists sum to 0 mod 3, flips sum to 0 mod 2, and the two permutation
    /// parities agree.
    ///
    /// # Errors
    ///
    /// The first invariant found violated.
    pub fn validate(&self) -> Result<(), InvalidStateError> {
        let mut seen_corners = [false; 8];
        for (&piece, &ori) in self.cp.iter().zip(&self.co) {
            if piece >= 8 || ori >= 3 {
                return Err(InvalidStateError::OutOfRange("corner"));
            }
            if std::mem::replace(&mut seen_corners[piece as usize], true) {
                return Err(InvalidStateError::DuplicateCorner(
                    Corner::ALL[piece as usize],
                ));
            }
        }

        let mut seen_edges = [false; 12];
        for (&piece, &ori) in self.ep.iter().zip(&self.eo) {
            if piece >= 12 || ori >= 2 {
                return Err(InvalidStateError::OutOfRange("edge"));
            }
            if std::mem::replace(&mut seen_edges[piece as usize], true) {
                return Err(InvalidStateError::DuplicateEdge(Edge::ALL[piece as usize]));
            }
        }

        if self.co.iter().map(|&ori| u32::from(ori)).sum::<u32>() % 3 != 0 {
            return Err(InvalidStateError::CornerTwist);
        }
        if self.eo.iter().map(|&ori| u32::from(ori)).sum::<u32>() % 2 != 0 {
            return Err(InvalidStateError::EdgeFlip);
        }
        if permutation_is_odd(&self.cp) != permutation_is_odd(&self.ep) {
            return Err(InvalidStateError::Parity);
        }
        Ok(())
    }

    /// Compose `a` and `b` into self: the state reached by applying `b` to
    /// `a`.
    pub fn replace_compose(&mut self, a: &Self, b: &Self) {
        // Orientation sums stay below twice the modulus, so the wrapped
        // difference reduces them without a branch
        for i in 0..8 {
            let from = b.cp[i] as usize;
            let ori = a.co[from] + b.co[i];
            self.cp[i] = a.cp[from];
            self.co[i] = ori.min(ori.wrapping_sub(3));
        }
        for i in 0..12 {
            let from = b.ep[i] as usize;
            let ori = a.eo[from] + b.eo[i];
            self.ep[i] = a.ep[from];
            self.eo[i] = ori.min(ori.wrapping_sub(2));
        }
    }

    #[must_use]
    pub fn compose(&self, other: &Self) -> Self {
        let mut result = Cube::SOLVED;
        result.replace_compose(self, other);
        result
    }

    #[must_use]
    pub fn inverse(&self) -> Self {
        let mut result = Cube::SOLVED;
        for i in 0..8 {
            let piece = self.cp[i] as usize;
            result.cp[piece] = i as u8;
            result.co[piece] = (3 - self.co[i]) % 3;
        }
        for i in 0..12 {
            let piece = self.ep[i] as usize;
            result.ep[piece] = i as u8;
            result.eo[piece] = self.eo[i];
        }
        result
    }

    /// Apply one move. A move of `n` quarter turns is the clockwise quarter
    /// turn of its face applied `n` times.
    pub fn apply_move(&mut self, move_: Move) {
        let quarter_turn = &QUARTER_TURNS[move_.face() as usize];
        for _ in 0..move_.turns().quarter_turns() {
            let current = self.clone();
            self.replace_compose(&current, quarter_turn);
        }
    }

    /// Turn `face` by a signed number of clockwise quarter turns. The count
    /// is taken modulo 4 and a multiple of 4 leaves the state untouched.
    pub fn apply_quarter_turns(&mut self, face: Face, quarter_turns: i32) {
        if let Some(move_) = Move::from_quarter_turns(face, quarter_turns) {
            self.apply_move(move_);
        }
    }

    pub fn apply_sequence(&mut self, sequence: &MoveSequence) {
        for &move_ in sequence {
            self.apply_move(move_);
        }
    }

    /// A copy of this state with `sequence` applied.
    #[must_use]
    pub fn applied(&self, sequence: &MoveSequence) -> Self {
        let mut result = self.clone();
        result.apply_sequence(sequence);
        result
    }

    #[must_use]
    pub fn is_solved(&self) -> bool {
        *self == Cube::SOLVED
    }

    /// The piece in `slot` and its twist.
    #[must_use]
    pub fn corner_at(&self, slot: Corner) -> (Corner, u8) {
        (
            Corner::ALL[self.cp[slot as usize] as usize],
            self.co[slot as usize],
        )
    }

    /// The piece in `slot` and its flip.
    #[must_use]
    pub fn edge_at(&self, slot: Edge) -> (Edge, u8) {
        (
            Edge::ALL[self.ep[slot as usize] as usize],
            self.eo[slot as usize],
        )
    }

    /// The slot currently holding `piece`, and the piece's twist there.
    #[must_use]
    pub fn locate_corner(&self, piece: Corner) -> Option<(Corner, u8)> {
        self.cp
            .iter()
            .position(|&p| p == piece as u8)
            .map(|slot| (Corner::ALL[slot], self.co[slot]))
    }

    /// The slot currently holding `piece`, and the piece's flip there.
    #[must_use]
    pub fn locate_edge(&self, piece: Edge) -> Option<(Edge, u8)> {
        self.ep
            .iter()
            .position(|&p| p == piece as u8)
            .map(|slot| (Edge::ALL[slot], self.eo[slot]))
    }

    /// Whether `corner` is in its own slot, untwisted.
    #[must_use]
    pub fn corner_solved(&self, corner: Corner) -> bool {
        self.corner_at(corner) == (corner, 0)
    }

    /// Whether `edge` is in its own slot, unflipped.
    #[must_use]
    pub fn edge_solved(&self, edge: Edge) -> bool {
        self.edge_at(edge) == (edge, 0)
    }

    /// The facelet projection in the default color scheme.
    #[must_use]
    pub fn facelets(&self) -> FaceletCube {
        FaceletCube::from_cube(self, &ColorScheme::default())
    }

    #[must_use]
    pub fn to_facelets(&self, scheme: &ColorScheme) -> FaceletCube {
        FaceletCube::from_cube(self, scheme)
    }
}

/// Whether a permutation is odd, by counting inversions.
pub(crate) fn permutation_is_odd(permutation: &[u8]) -> bool {
    let mut inversions = 0;
    for (i, &a) in permutation.iter().enumerate() {
        inversions += permutation[i + 1..].iter().filter(|&&b| b < a).count();
    }
    inversions % 2 == 1
}
