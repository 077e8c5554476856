//! The sticker-level view of the cube: six faces of nine colored facelets.
//!
//! Within a face, facelets are numbered in reading order, 0 to 8, with 4 the
//! center. Side faces are read with Up on top, Up is read with Back on top,
//! and Down is read from below with Front on top.

use crate::{
    cubie::{Corner, Cube, Edge, InvalidStateError},
    face::Face,
    moves::Move,
};
use serde::{Deserialize, Serialize};
use std::{
    fmt::{self, Display},
    str::FromStr,
};
use thiserror::Error;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    #[serde(rename = "W")]
    White,
    #[serde(rename = "Y")]
    Yellow,
    #[serde(rename = "R")]
    Red,
    #[serde(rename = "O")]
    Orange,
    #[serde(rename = "G")]
    Green,
    #[serde(rename = "B")]
    Blue,
}

impl Color {
    pub const ALL: [Self; 6] = [
        Color::White,
        Color::Yellow,
        Color::Red,
        Color::Orange,
        Color::Green,
        Color::Blue,
    ];

    #[must_use]
    pub fn letter(self) -> char {
        match self {
            Color::White => 'W',
            Color::Yellow => 'Y',
            Color::Red => 'R',
            Color::Orange => 'O',
            Color::Green => 'G',
            Color::Blue => 'B',
        }
    }

    #[must_use]
    pub fn from_letter(letter: char) -> Option<Self> {
        Color::ALL.into_iter().find(|color| color.letter() == letter)
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Which color each face shows when the cube is solved. Every face has its
/// own color.
///
/// Deserializing fills omitted faces from the default scheme and rejects
/// schemes that repeat a color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ColorSchemeRepr", into = "ColorSchemeRepr")]
pub struct ColorScheme {
    pub up: Color,
    pub down: Color,
    pub front: Color,
    pub back: Color,
    pub left: Color,
    pub right: Color,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorSchemeError {
    #[error("The color {0} is used by more than one face")]
    RepeatedColor(Color),
}

#[derive(Serialize, Deserialize)]
#[serde(default)]
struct ColorSchemeRepr {
    #[serde(rename = "U")]
    up: Color,
    #[serde(rename = "D")]
    down: Color,
    #[serde(rename = "F")]
    front: Color,
    #[serde(rename = "B")]
    back: Color,
    #[serde(rename = "L")]
    left: Color,
    #[serde(rename = "R")]
    right: Color,
}

impl Default for ColorSchemeRepr {
    fn default() -> Self {
        ColorScheme::default().into()
    }
}

impl TryFrom<ColorSchemeRepr> for ColorScheme {
    type Error = ColorSchemeError;

    fn try_from(repr: ColorSchemeRepr) -> Result<Self, Self::Error> {
        let scheme = ColorScheme {
            up: repr.up,
            down: repr.down,
            front: repr.front,
            back: repr.back,
            left: repr.left,
            right: repr.right,
        };
        scheme.validate()?;
        Ok(scheme)
    }
}

impl From<ColorScheme> for ColorSchemeRepr {
    fn from(scheme: ColorScheme) -> Self {
        ColorSchemeRepr {
            up: scheme.up,
            down: scheme.down,
            front: scheme.front,
            back: scheme.back,
            left: scheme.left,
            right: scheme.right,
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        ColorScheme {
            up: Color::White,
            down: Color::Yellow,
            front: Color::Red,
            back: Color::Orange,
            left: Color::Green,
            right: Color::Blue,
        }
    }
}

impl ColorScheme {
    #[must_use]
    pub fn color(&self, face: Face) -> Color {
        match face {
            Face::Up => self.up,
            Face::Down => self.down,
            Face::Front => self.front,
            Face::Back => self.back,
            Face::Left => self.left,
            Face::Right => self.right,
        }
    }

    /// Check that no two faces share a color. A scheme that fails this
    /// projects to stickers that cannot be read back as a cube.
    ///
    /// # Errors
    ///
    /// The first color found on a second face.
    pub fn validate(&self) -> Result<(), ColorSchemeError> {
        let colors = Face::ALL.map(|face| self.color(face));
        for (i, color) in colors.iter().enumerate() {
            if colors[..i].contains(color) {
                return Err(ColorSchemeError::RepeatedColor(*color));
            }
        }
        Ok(())
    }
}

type Facelet = (Face, usize);

/// The stickers of each corner slot, indexed by `Corner as usize`, starting
/// with the Up/Down sticker and going clockwise around the corner.
pub(crate) const CORNER_FACELETS: [[Facelet; 3]; 8] = {
    use Face::*;
    [
        [(Up, 8), (Right, 0), (Front, 2)],
        [(Up, 6), (Front, 0), (Left, 2)],
        [(Up, 0), (Left, 0), (Back, 2)],
        [(Up, 2), (Back, 0), (Right, 2)],
        [(Down, 2), (Front, 8), (Right, 6)],
        [(Down, 0), (Left, 8), (Front, 6)],
        [(Down, 6), (Back, 8), (Left, 6)],
        [(Down, 8), (Right, 8), (Back, 6)],
    ]
};

/// The stickers of each edge slot, indexed by `Edge as usize`, reference
/// sticker first.
pub(crate) const EDGE_FACELETS: [[Facelet; 2]; 12] = {
    use Face::*;
    [
        [(Up, 5), (Right, 1)],
        [(Up, 7), (Front, 1)],
        [(Up, 3), (Left, 1)],
        [(Up, 1), (Back, 1)],
        [(Down, 5), (Right, 7)],
        [(Down, 1), (Front, 7)],
        [(Down, 3), (Left, 7)],
        [(Down, 7), (Back, 7)],
        [(Front, 5), (Right, 3)],
        [(Front, 3), (Left, 5)],
        [(Back, 5), (Left, 3)],
        [(Back, 3), (Right, 5)],
    ]
};

/// `new[k] = old[ROTATION[k]]` turns a face's own stickers clockwise.
const ROTATION: [usize; 9] = [6, 3, 0, 7, 4, 1, 8, 5, 2];

/// The four strips of three stickers bordering each face, indexed by
/// `Face as usize`. A clockwise turn moves strip `k + 1` onto strip `k`.
const BANDS: [[(Face, [usize; 3]); 4]; 6] = {
    use Face::*;
    [
        [
            (Front, [0, 1, 2]),
            (Right, [0, 1, 2]),
            (Back, [0, 1, 2]),
            (Left, [0, 1, 2]),
        ],
        [
            (Front, [6, 7, 8]),
            (Left, [6, 7, 8]),
            (Back, [6, 7, 8]),
            (Right, [6, 7, 8]),
        ],
        [
            (Up, [6, 7, 8]),
            (Left, [8, 5, 2]),
            (Down, [2, 1, 0]),
            (Right, [0, 3, 6]),
        ],
        [
            (Up, [0, 1, 2]),
            (Right, [2, 5, 8]),
            (Down, [8, 7, 6]),
            (Left, [6, 3, 0]),
        ],
        [
            (Up, [0, 3, 6]),
            (Back, [8, 5, 2]),
            (Down, [0, 3, 6]),
            (Front, [0, 3, 6]),
        ],
        [
            (Up, [2, 5, 8]),
            (Front, [2, 5, 8]),
            (Down, [2, 5, 8]),
            (Back, [6, 3, 0]),
        ],
    ]
};

/// Six faces of nine colors, indexed by `Face as usize` and then by facelet.
///
/// Any coloring can be represented, including impossible ones. Converting to
/// a [`Cube`] is where validity is checked.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "FaceletRepr", into = "FaceletRepr")]
pub struct FaceletCube {
    faces: [[Color; 9]; 6],
}

/// The interchange shape: one nine-color array per face letter.
#[derive(Serialize, Deserialize)]
#[allow(non_snake_case)]
struct FaceletRepr {
    U: [Color; 9],
    D: [Color; 9],
    F: [Color; 9],
    B: [Color; 9],
    L: [Color; 9],
    R: [Color; 9],
}

impl From<FaceletRepr> for FaceletCube {
    fn from(repr: FaceletRepr) -> Self {
        FaceletCube {
            faces: [repr.U, repr.D, repr.F, repr.B, repr.L, repr.R],
        }
    }
}

impl From<FaceletCube> for FaceletRepr {
    #[allow(non_snake_case)]
    fn from(cube: FaceletCube) -> Self {
        let [U, D, F, B, L, R] = cube.faces;
        FaceletRepr { U, D, F, B, L, R }
    }
}

impl Default for FaceletCube {
    fn default() -> Self {
        FaceletCube::solved(&ColorScheme::default())
    }
}

impl FaceletCube {
    #[must_use]
    pub fn solved(scheme: &ColorScheme) -> Self {
        FaceletCube {
            faces: Face::ALL.map(|face| [scheme.color(face); 9]),
        }
    }

    #[must_use]
    pub fn from_faces(faces: [[Color; 9]; 6]) -> Self {
        FaceletCube { faces }
    }

    #[must_use]
    pub fn faces(&self) -> &[[Color; 9]; 6] {
        &self.faces
    }

    #[must_use]
    pub fn face(&self, face: Face) -> &[Color; 9] {
        &self.faces[face as usize]
    }

    #[must_use]
    pub fn get(&self, face: Face, index: usize) -> Color {
        self.faces[face as usize][index]
    }

    pub fn set(&mut self, face: Face, index: usize, color: Color) {
        self.faces[face as usize][index] = color;
    }

    pub fn swap(&mut self, a: (Face, usize), b: (Face, usize)) {
        let color_a = self.get(a.0, a.1);
        let color_b = self.get(b.0, b.1);
        self.set(a.0, a.1, color_b);
        self.set(b.0, b.1, color_a);
    }

    #[must_use]
    pub fn center(&self, face: Face) -> Color {
        self.get(face, 4)
    }

    /// Whether every face shows a single color.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.faces
            .iter()
            .all(|face| face.iter().all(|&color| color == face[4]))
    }

    /// Turn the stickers directly. This agrees with [`Cube::apply_move`]
    /// followed by projection.
    pub fn turn(&mut self, move_: Move) {
        for _ in 0..move_.turns().quarter_turns() {
            self.turn_clockwise(move_.face());
        }
    }

    fn turn_clockwise(&mut self, face: Face) {
        let old = self.faces;
        let turned = face as usize;
        for (k, &from) in ROTATION.iter().enumerate() {
            self.faces[turned][k] = old[turned][from];
        }

        let bands = &BANDS[turned];
        for k in 0..4 {
            let (to_face, to) = bands[k];
            let (from_face, from) = bands[(k + 1) % 4];
            for n in 0..3 {
                self.faces[to_face as usize][to[n]] = old[from_face as usize][from[n]];
            }
        }
    }

    /// The unfolded net: Up above Front, Down below it, and Left, Front,
    /// Right, Back side by side. One row of text per facelet row.
    #[must_use]
    pub fn net(&self) -> Vec<Vec<Option<Color>>> {
        let mut rows = vec![];
        let blank = [None; 3];
        let row_of = |face: Face, row: usize| -> [Option<Color>; 3] {
            let face = self.face(face);
            [
                Some(face[row * 3]),
                Some(face[row * 3 + 1]),
                Some(face[row * 3 + 2]),
            ]
        };

        for row in 0..3 {
            rows.push([blank, row_of(Face::Up, row)].concat());
        }
        for row in 0..3 {
            rows.push(
                [
                    row_of(Face::Left, row),
                    row_of(Face::Front, row),
                    row_of(Face::Right, row),
                    row_of(Face::Back, row),
                ]
                .concat(),
            );
        }
        for row in 0..3 {
            rows.push([blank, row_of(Face::Down, row)].concat());
        }
        rows
    }

    /// Project a cubie state onto stickers.
    #[must_use]
    pub fn from_cube(cube: &Cube, scheme: &ColorScheme) -> Self {
        let mut result = FaceletCube::solved(scheme);

        for (slot, stickers) in CORNER_FACELETS.iter().enumerate() {
            let piece = &CORNER_FACELETS[cube.cp[slot] as usize];
            let twist = cube.co[slot] as usize;
            for (n, &(home, _)) in piece.iter().enumerate() {
                let (face, index) = stickers[(n + twist) % 3];
                result.set(face, index, scheme.color(home));
            }
        }

        for (slot, stickers) in EDGE_FACELETS.iter().enumerate() {
            let piece = &EDGE_FACELETS[cube.ep[slot] as usize];
            let flip = cube.eo[slot] as usize;
            for (n, &(home, _)) in piece.iter().enumerate() {
                let (face, index) = stickers[(n + flip) % 2];
                result.set(face, index, scheme.color(home));
            }
        }

        result
    }

    /// Relabel every sticker with the face whose center shares its color.
    fn face_labels(&self) -> Result<[[Face; 9]; 6], InvalidStateError> {
        let centers = Face::ALL.map(|face| self.center(face));
        for (i, color) in centers.iter().enumerate() {
            if centers[..i].contains(color) {
                return Err(InvalidStateError::DuplicateCenter(*color));
            }
        }

        for color in centers {
            let count = self.faces.iter().flatten().filter(|&&c| c == color).count();
            if count != 9 {
                return Err(InvalidStateError::ColorCount { color, count });
            }
        }

        let mut labels = [[Face::Up; 9]; 6];
        for (face_labels, face) in labels.iter_mut().zip(&self.faces) {
            for (label, color) in face_labels.iter_mut().zip(face) {
                // With six distinct centers every palette color is a center
                let Some(i) = centers.iter().position(|c| c == color) else {
                    return Err(InvalidStateError::ColorCount {
                        color: *color,
                        count: 0,
                    });
                };
                *label = Face::ALL[i];
            }
        }
        Ok(labels)
    }
}

impl TryFrom<&FaceletCube> for Cube {
    type Error = InvalidStateError;

    /// Recover the cubie state from stickers, rejecting colorings that no
    /// sequence of moves can produce.
    fn try_from(facelets: &FaceletCube) -> Result<Self, Self::Error> {
        let labels = facelets.face_labels()?;
        let label = |(face, index): Facelet| labels[face as usize][index];

        let mut cp = [0; 8];
        let mut co = [0; 8];
        for (slot, stickers) in CORNER_FACELETS.iter().enumerate() {
            let seen = stickers.map(label);
            let Some(twist) = seen
                .iter()
                .position(|&face| face == Face::Up || face == Face::Down)
            else {
                return Err(InvalidStateError::UnknownCorner(Corner::ALL[slot]));
            };
            let piece = CORNER_FACELETS.iter().position(|home| {
                home[0].0 == seen[twist]
                    && home[1].0 == seen[(twist + 1) % 3]
                    && home[2].0 == seen[(twist + 2) % 3]
            });
            let Some(piece) = piece else {
                return Err(InvalidStateError::UnknownCorner(Corner::ALL[slot]));
            };
            cp[slot] = piece as u8;
            co[slot] = twist as u8;
        }

        let mut ep = [0; 12];
        let mut eo = [0; 12];
        for (slot, stickers) in EDGE_FACELETS.iter().enumerate() {
            let seen = stickers.map(label);
            let found = EDGE_FACELETS.iter().enumerate().find_map(|(piece, home)| {
                if home[0].0 == seen[0] && home[1].0 == seen[1] {
                    Some((piece, 0))
                } else if home[0].0 == seen[1] && home[1].0 == seen[0] {
                    Some((piece, 1))
                } else {
                    None
                }
            });
            let Some((piece, flip)) = found else {
                return Err(InvalidStateError::UnknownEdge(Edge::ALL[slot]));
            };
            ep[slot] = piece as u8;
            eo[slot] = flip;
        }

        Cube::try_from_parts(cp, co, ep, eo)
    }
}

impl TryFrom<FaceletCube> for Cube {
    type Error = InvalidStateError;

    fn try_from(facelets: FaceletCube) -> Result<Self, Self::Error> {
        Cube::try_from(&facelets)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseFaceletsError {
    #[error("Expected 54 facelets, found {0}")]
    Length(usize),
    #[error("Unknown color letter {0:?}, expected one of W, Y, R, O, G, B")]
    Color(char),
}

impl FromStr for FaceletCube {
    type Err = ParseFaceletsError;

    /// Parse 54 color letters, face by face in the order U D F B L R, each
    /// face in reading order. Whitespace is ignored.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let colors = text
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| Color::from_letter(c).ok_or(ParseFaceletsError::Color(c)))
            .collect::<Result<Vec<_>, _>>()?;
        if colors.len() != 54 {
            return Err(ParseFaceletsError::Length(colors.len()));
        }

        let mut faces = [[Color::White; 9]; 6];
        for (face, chunk) in faces.iter_mut().zip(colors.chunks_exact(9)) {
            face.copy_from_slice(chunk);
        }
        Ok(FaceletCube { faces })
    }
}

impl Display for FaceletCube {
    /// The compact form accepted by `FromStr`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for color in self.faces.iter().flatten() {
            write!(f, "{color}")?;
        }
        Ok(())
    }
}
