//! Fixed move sequences used by the layer-by-layer solver. Each is written
//! for the front or front-right position and reframed about the Up axis for
//! the other three.

use crate::{
    face::Face,
    moves::{Move, MoveSequence},
};
use std::sync::LazyLock;

fn parse(text: &str) -> MoveSequence {
    text.parse()
        .expect("Built-in algorithms are written in valid notation")
}

/// Brings an up-facing Down edge from the front top slot straight down.
pub(crate) static CROSS_DROP: LazyLock<MoveSequence> = LazyLock::new(|| parse("F2"));

/// Brings a front-facing Down edge from the front top slot into the front
/// bottom slot, restoring the right bottom slot.
pub(crate) static CROSS_FLIP_IN: LazyLock<MoveSequence> =
    LazyLock::new(|| parse("Ui Ri F R"));

/// Lifts the front-right middle edge into the Up layer, leaving the Down
/// layer as it was.
pub(crate) static CROSS_LIFT: LazyLock<MoveSequence> = LazyLock::new(|| parse("Fi U F"));

/// Swaps the front-right Down corner with the corner above it, adding two to
/// its twist each time. One, three or five applications solve a corner
/// sitting above its slot, depending on its twist.
pub(crate) static SEXY: LazyLock<MoveSequence> = LazyLock::new(|| parse("R U Ri Ui"));

/// Inserts the edge at the front top slot, Right color up, into the
/// front-right middle slot.
pub(crate) static INSERT_FROM_FRONT: LazyLock<MoveSequence> =
    LazyLock::new(|| parse("U R Ui Ri Ui Fi U F"));

/// Inserts the edge at the right top slot, Front color up, into the
/// front-right middle slot.
pub(crate) static INSERT_FROM_RIGHT: LazyLock<MoveSequence> =
    LazyLock::new(|| parse("Ui Fi U F U R Ui Ri"));

/// Last layer edge orientation, for the line and dot cases.
pub(crate) static ORIENT_LINE: LazyLock<MoveSequence> =
    LazyLock::new(|| parse("F R U Ri Ui Fi"));

/// Last layer edge orientation, for the L case.
pub(crate) static ORIENT_ANGLE: LazyLock<MoveSequence> =
    LazyLock::new(|| parse("F U R Ui Ri Fi"));

/// Cycles three last layer corners, leaving the up-front-right corner in
/// place and every edge untouched. The corner above the right-back slot
/// moves to the back-left, that one to the left-front, and that one to the
/// right-back.
pub(crate) static NIKLAS: LazyLock<MoveSequence> =
    LazyLock::new(|| parse("U R Ui Li U Ri Ui L"));

/// Twists the up-front-right corner counter-clockwise by one step while
/// scrambling the Down layer. Three applications restore the Down layer.
pub(crate) static CORNER_TWIST: LazyLock<MoveSequence> =
    LazyLock::new(|| parse("Ri Di R D Ri Di R D"));

/// Cycles three last layer edges, leaving the back edge in place. The front
/// edge moves to the right, the right to the left and the left to the front.
pub(crate) static U_PERM_A: LazyLock<MoveSequence> =
    LazyLock::new(|| parse("R Ui R U R U R Ui Ri Ui R2"));

/// The inverse cycle of [`U_PERM_A`].
pub(crate) static U_PERM_B: LazyLock<MoveSequence> =
    LazyLock::new(|| parse("R2 U R U Ri Ui Ri Ui Ri U Ri"));

/// `quarter_turns` clockwise turns of the Up face, normalized modulo 4.
pub(crate) fn up_turns(quarter_turns: i32) -> MoveSequence {
    Move::from_quarter_turns(Face::Up, quarter_turns)
        .into_iter()
        .collect()
}

/// The Up turn carrying whatever sits above frame `from` to above frame
/// `to`. A clockwise Up turn moves every top slot back one frame.
pub(crate) fn up_setup(from: u8, to: u8) -> MoveSequence {
    up_turns(i32::from(from) - i32::from(to))
}
