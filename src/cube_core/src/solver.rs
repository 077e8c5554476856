//! A layer-by-layer solver. The Down layer is built first, then the middle
//! layer, then the Up layer in four steps.
//!
//! Each step locates the pieces it works on, classifies which of a few fixed
//! cases they are in, and applies the algorithm for that case. Afterwards it
//! checks that it achieved what it was meant to without breaking anything
//! solved earlier, so a wrong case is reported rather than silently
//! producing a non-solution.
//!
//! Positions around the Up axis are numbered by frame: frame `k` is the side
//! `Face::SIDES[k]` together with the slots between it and the next side, so
//! frame 0 holds the front edges and the front-right corners. Algorithms are
//! written for frame 0 and reframed.

use crate::{
    algorithms::{
        CORNER_TWIST, CROSS_DROP, CROSS_FLIP_IN, CROSS_LIFT, INSERT_FROM_FRONT,
        INSERT_FROM_RIGHT, NIKLAS, ORIENT_ANGLE, ORIENT_LINE, SEXY, U_PERM_A, U_PERM_B,
        up_setup, up_turns,
    },
    cubie::{Corner, Cube, Edge, InvalidStateError, Layer, permutation_is_odd},
    face::Face,
    facelet::EDGE_FACELETS,
    moves::MoveSequence,
    start, success, working,
};
use log::{debug, info, trace};
use serde::{Deserialize, Serialize};
use std::{
    fmt::{self, Display},
    time::Instant,
};
use thiserror::Error;

/// Down edges in the order the cross is built, indexed by frame.
const CROSS_EDGES: [Edge; 4] = [Edge::Df, Edge::Dr, Edge::Db, Edge::Dl];
/// Down corners in the order they are inserted, indexed by frame.
const DOWN_CORNERS: [Corner; 4] = [Corner::Dfr, Corner::Drb, Corner::Dbl, Corner::Dlf];
/// Middle edges in the order they are inserted, indexed by frame.
const MIDDLE_EDGES: [Edge; 4] = [Edge::Fr, Edge::Br, Edge::Bl, Edge::Fl];
const UP_CORNERS: [Corner; 4] = [Corner::Urf, Corner::Ubr, Corner::Ulb, Corner::Ufl];
const UP_EDGES: [Edge; 4] = [Edge::Uf, Edge::Ur, Edge::Ub, Edge::Ul];

/// How many applications of [`SEXY`] solve a corner sitting above its slot,
/// indexed by its twist.
const SEXY_REPEATS: [usize; 3] = [3, 1, 5];

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Stage {
    Cross,
    FirstLayerCorners,
    MiddleEdges,
    LastLayerEdgeOrientation,
    LastLayerCornerPermutation,
    LastLayerCornerOrientation,
    LastLayerEdgePermutation,
}

impl Stage {
    pub const ALL: [Self; 7] = [
        Stage::Cross,
        Stage::FirstLayerCorners,
        Stage::MiddleEdges,
        Stage::LastLayerEdgeOrientation,
        Stage::LastLayerCornerPermutation,
        Stage::LastLayerCornerOrientation,
        Stage::LastLayerEdgePermutation,
    ];
}

impl Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Cross => "cross",
            Stage::FirstLayerCorners => "first layer corners",
            Stage::MiddleEdges => "middle edges",
            Stage::LastLayerEdgeOrientation => "last layer edge orientation",
            Stage::LastLayerCornerPermutation => "last layer corner permutation",
            Stage::LastLayerCornerOrientation => "last layer corner orientation",
            Stage::LastLayerEdgePermutation => "last layer edge permutation",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolveError {
    #[error("Refusing to solve an invalid state: {0}")]
    InvalidState(#[from] InvalidStateError),
    #[error("Internal inconsistency during the {stage} stage: {reason}")]
    Inconsistency { stage: Stage, reason: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Merge consecutive turns of the same face in the output.
    pub simplify: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig { simplify: true }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Solver {
    config: SolverConfig,
}

impl Solver {
    #[must_use]
    pub fn new() -> Self {
        Solver::default()
    }

    #[must_use]
    pub fn with_config(config: SolverConfig) -> Self {
        Solver { config }
    }

    #[must_use]
    pub fn with_simplify(mut self, simplify: bool) -> Self {
        self.config.simplify = simplify;
        self
    }

    #[must_use]
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Find a move sequence that takes `cube` to the solved state.
    ///
    /// # Errors
    ///
    /// If `cube` fails validation, or if a stage cannot establish its goal.
    /// The latter indicates a defect and is never returned for a valid state.
    pub fn solve(&self, cube: &Cube) -> Result<MoveSequence, SolveError> {
        let mut solution = MoveSequence::new();
        for (_, moves) in self.solve_by_stage(cube)? {
            solution.extend_from(&moves);
        }
        if self.config.simplify {
            solution = solution.simplified();
        }
        Ok(solution)
    }

    /// Like [`Solver::solve`], but keeps the moves of each stage apart.
    /// Stages that had nothing to do contribute an empty sequence.
    ///
    /// # Errors
    ///
    /// See [`Solver::solve`].
    pub fn solve_by_stage(&self, cube: &Cube) -> Result<Vec<(Stage, MoveSequence)>, SolveError> {
        cube.validate()?;

        info!(start!("Solving cube"));
        let start = Instant::now();

        let mut progress = Progress {
            cube: cube.clone(),
            moves: MoveSequence::new(),
        };
        let mut stages = Vec::with_capacity(Stage::ALL.len());
        for stage in Stage::ALL {
            let stage_start = Instant::now();
            match stage {
                Stage::Cross => progress.cross()?,
                Stage::FirstLayerCorners => progress.first_layer_corners()?,
                Stage::MiddleEdges => progress.middle_edges()?,
                Stage::LastLayerEdgeOrientation => progress.last_layer_edge_orientation()?,
                Stage::LastLayerCornerPermutation => progress.last_layer_corner_permutation()?,
                Stage::LastLayerCornerOrientation => progress.last_layer_corner_orientation()?,
                Stage::LastLayerEdgePermutation => progress.last_layer_edge_permutation()?,
            }

            let mut moves = std::mem::take(&mut progress.moves);
            if self.config.simplify {
                moves = moves.simplified();
            }
            debug!(
                working!("Finished {} with {} moves in {:.3}s"),
                stage,
                moves.len(),
                stage_start.elapsed().as_secs_f64()
            );
            stages.push((stage, moves));
        }

        if !progress.cube.is_solved() {
            return Err(SolveError::Inconsistency {
                stage: Stage::LastLayerEdgePermutation,
                reason: "every stage finished but the cube is not solved",
            });
        }

        info!(
            success!("Solved in {} moves in {:.3}s"),
            stages.iter().map(|(_, moves)| moves.len()).sum::<usize>(),
            start.elapsed().as_secs_f64()
        );
        Ok(stages)
    }
}

/// The frame an edge slot belongs to.
fn edge_frame(slot: Edge) -> u8 {
    match slot {
        Edge::Uf | Edge::Df | Edge::Fr => 0,
        Edge::Ur | Edge::Dr | Edge::Br => 1,
        Edge::Ub | Edge::Db | Edge::Bl => 2,
        Edge::Ul | Edge::Dl | Edge::Fl => 3,
    }
}

/// The frame a corner slot belongs to.
fn corner_frame(slot: Corner) -> u8 {
    match slot {
        Corner::Urf | Corner::Dfr => 0,
        Corner::Ubr | Corner::Drb => 1,
        Corner::Ulb | Corner::Dbl => 2,
        Corner::Ufl | Corner::Dlf => 3,
    }
}

fn next_frame(frame: u8) -> u8 {
    (frame + 1) % 4
}

/// Where a cross edge is, relative to the frame it belongs in.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum CrossCase {
    Solved,
    /// In a Down slot, either the wrong one or flipped.
    Down { frame: u8 },
    Middle { frame: u8 },
    /// In the Up layer, Down sticker facing up.
    UpFacingUp { frame: u8 },
    /// In the Up layer, Down sticker on the side.
    UpFacingSide { frame: u8 },
}

impl CrossCase {
    fn classify(cube: &Cube, target: Edge) -> Result<Self, SolveError> {
        if cube.edge_solved(target) {
            return Ok(CrossCase::Solved);
        }
        let (slot, flip) = locate_edge(cube, target, Stage::Cross)?;
        let frame = edge_frame(slot);
        Ok(match slot.layer() {
            Layer::Down => CrossCase::Down { frame },
            Layer::Middle => CrossCase::Middle { frame },
            Layer::Up if flip == 0 => CrossCase::UpFacingUp { frame },
            Layer::Up => CrossCase::UpFacingSide { frame },
        })
    }

    /// The moves for this case when the edge belongs in frame `target`. The
    /// Down and middle cases only lift the edge into the Up layer.
    fn algorithm(self, target: u8) -> MoveSequence {
        match self {
            CrossCase::Solved => MoveSequence::new(),
            CrossCase::Down { frame } => CROSS_DROP.reframed(frame),
            CrossCase::Middle { frame } => CROSS_LIFT.reframed(frame),
            CrossCase::UpFacingUp { frame } => {
                up_setup(frame, target).then(&CROSS_DROP.reframed(target))
            }
            CrossCase::UpFacingSide { frame } => {
                up_setup(frame, target).then(&CROSS_FLIP_IN.reframed(target))
            }
        }
    }
}

/// Where a first layer corner is.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum CornerCase {
    Solved,
    /// In a Down slot, either the wrong one or twisted.
    Down { frame: u8 },
    Up { frame: u8, twist: u8 },
}

impl CornerCase {
    fn classify(cube: &Cube, target: Corner) -> Result<Self, SolveError> {
        if cube.corner_solved(target) {
            return Ok(CornerCase::Solved);
        }
        let (slot, twist) = locate_corner(cube, target, Stage::FirstLayerCorners)?;
        let frame = corner_frame(slot);
        Ok(match slot.layer() {
            Layer::Up => CornerCase::Up { frame, twist },
            Layer::Down | Layer::Middle => CornerCase::Down { frame },
        })
    }

    /// The moves for this case when the corner belongs in frame `target`.
    /// The Down case only lifts the corner into the Up layer.
    fn algorithm(self, target: u8) -> MoveSequence {
        match self {
            CornerCase::Solved => MoveSequence::new(),
            CornerCase::Down { frame } => SEXY.reframed(frame),
            CornerCase::Up { frame, twist } => up_setup(frame, target)
                .then(&SEXY.reframed(target).repeated(SEXY_REPEATS[usize::from(twist)])),
        }
    }
}

/// Where a middle layer edge is.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum MiddleEdgeCase {
    Solved,
    /// In a middle slot, either the wrong one or flipped.
    Middle { frame: u8 },
    /// In the Up layer with the color of its slot's right-hand side facing
    /// up, so it goes in from the front top slot.
    FromFront { frame: u8 },
    /// In the Up layer with the color of its slot's front side facing up, so
    /// it goes in from the right top slot.
    FromRight { frame: u8 },
}

impl MiddleEdgeCase {
    fn classify(cube: &Cube, target: Edge, target_frame: u8) -> Result<Self, SolveError> {
        if cube.edge_solved(target) {
            return Ok(MiddleEdgeCase::Solved);
        }
        let (slot, flip) = locate_edge(cube, target, Stage::MiddleEdges)?;
        let frame = edge_frame(slot);
        match slot.layer() {
            Layer::Middle => Ok(MiddleEdgeCase::Middle { frame }),
            Layer::Up => {
                // The sticker on the Up face is the piece's sticker `flip`
                let (up_facing, _) = EDGE_FACELETS[target as usize][usize::from(flip)];
                if up_facing == Face::Right.reframed(target_frame) {
                    Ok(MiddleEdgeCase::FromFront { frame })
                } else {
                    Ok(MiddleEdgeCase::FromRight { frame })
                }
            }
            Layer::Down => Err(SolveError::Inconsistency {
                stage: Stage::MiddleEdges,
                reason: "middle edge found in the Down layer",
            }),
        }
    }

    /// The moves for this case when the edge belongs in frame `target`. The
    /// middle case only ejects the edge into the Up layer.
    fn algorithm(self, target: u8) -> MoveSequence {
        match self {
            MiddleEdgeCase::Solved => MoveSequence::new(),
            MiddleEdgeCase::Middle { frame } => INSERT_FROM_FRONT.reframed(frame),
            MiddleEdgeCase::FromFront { frame } => {
                up_setup(frame, target).then(&INSERT_FROM_FRONT.reframed(target))
            }
            MiddleEdgeCase::FromRight { frame } => up_setup(frame, next_frame(target))
                .then(&INSERT_FROM_RIGHT.reframed(target)),
        }
    }
}

/// The pattern of Up edges with their Up sticker facing up.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum EdgeOrientationCase {
    Oriented,
    /// Flipped edges in frames `frame` and `frame + 2`.
    Line { frame: u8 },
    /// Flipped edges in frames `frame` and `frame + 1`.
    Angle { frame: u8 },
    /// All four flipped.
    Dot,
}

impl EdgeOrientationCase {
    fn classify(cube: &Cube) -> Result<Self, SolveError> {
        let flipped = UP_EDGES.map(|slot| cube.edge_at(slot).1 != 0);
        let at = |frame: u8| flipped[usize::from(frame % 4)];
        let case = match flipped.iter().filter(|&&f| f).count() {
            0 => Some(EdgeOrientationCase::Oriented),
            4 => Some(EdgeOrientationCase::Dot),
            2 => (0..4).find_map(|frame| {
                if at(frame) && at(frame + 2) {
                    Some(EdgeOrientationCase::Line { frame })
                } else if at(frame) && at(frame + 1) {
                    Some(EdgeOrientationCase::Angle { frame })
                } else {
                    None
                }
            }),
            _ => None,
        };
        case.ok_or(SolveError::Inconsistency {
            stage: Stage::LastLayerEdgeOrientation,
            reason: "an odd number of last layer edges is flipped",
        })
    }

    /// A dot becomes an angle, the other cases orient every edge.
    fn algorithm(self) -> MoveSequence {
        match self {
            EdgeOrientationCase::Oriented => MoveSequence::new(),
            EdgeOrientationCase::Line { frame } => ORIENT_LINE.reframed(frame),
            EdgeOrientationCase::Angle { frame } => ORIENT_ANGLE.reframed(frame),
            EdgeOrientationCase::Dot => ORIENT_LINE.clone(),
        }
    }
}

/// An even permutation of four last layer pieces, indexed by frame.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum CycleCase {
    Placed,
    /// Three pieces cycle around the one in `fixed`. `forward` holds when
    /// the piece after `fixed` belongs one frame further on.
    ThreeCycle { fixed: u8, forward: bool },
    /// Two pairs swapped.
    DoubleSwap,
}

impl CycleCase {
    /// Classify from `homes[frame]`, the frame the piece sitting in `frame`
    /// belongs to.
    fn classify(homes: [u8; 4], stage: Stage) -> Result<Self, SolveError> {
        let home = |frame: u8| homes[usize::from(frame)];
        let fixed = (0..4).filter(|&frame| home(frame) == frame).collect::<Vec<_>>();
        match *fixed.as_slice() {
            [_, _, _, _] => Ok(CycleCase::Placed),
            [fixed] => {
                let after = next_frame(fixed);
                Ok(CycleCase::ThreeCycle {
                    fixed,
                    forward: home(after) == next_frame(after),
                })
            }
            [] if (0..4).all(|frame| home(home(frame)) == frame) => Ok(CycleCase::DoubleSwap),
            _ => Err(SolveError::Inconsistency {
                stage,
                reason: "last layer pieces are not an even permutation",
            }),
        }
    }
}

/// The state being solved and the moves applied to it so far in the
/// current stage.
struct Progress {
    cube: Cube,
    moves: MoveSequence,
}

impl Progress {
    fn apply(&mut self, sequence: &MoveSequence) {
        self.cube.apply_sequence(sequence);
        self.moves.extend_from(sequence);
    }

    fn cross(&mut self) -> Result<(), SolveError> {
        let stage = Stage::Cross;
        for (frame, &target) in (0_u8..).zip(&CROSS_EDGES) {
            // At most one lift and one insertion
            for _ in 0..2 {
                let case = CrossCase::classify(&self.cube, target)?;
                trace!("{stage} {target:?}: {case:?}");
                if case == CrossCase::Solved {
                    break;
                }
                self.apply(&case.algorithm(frame));
            }

            let done = &CROSS_EDGES[..=usize::from(frame)];
            finished(stage, done.iter().all(|&e| self.cube.edge_solved(e)))?;
        }
        Ok(())
    }

    fn first_layer_corners(&mut self) -> Result<(), SolveError> {
        let stage = Stage::FirstLayerCorners;
        for (frame, &target) in (0_u8..).zip(&DOWN_CORNERS) {
            for _ in 0..2 {
                let case = CornerCase::classify(&self.cube, target)?;
                trace!("{stage} {target:?}: {case:?}");
                if case == CornerCase::Solved {
                    break;
                }
                self.apply(&case.algorithm(frame));
            }

            let done = &DOWN_CORNERS[..=usize::from(frame)];
            finished(
                stage,
                CROSS_EDGES.iter().all(|&e| self.cube.edge_solved(e))
                    && done.iter().all(|&c| self.cube.corner_solved(c)),
            )?;
        }
        Ok(())
    }

    fn middle_edges(&mut self) -> Result<(), SolveError> {
        let stage = Stage::MiddleEdges;
        for (frame, &target) in (0_u8..).zip(&MIDDLE_EDGES) {
            for _ in 0..2 {
                let case = MiddleEdgeCase::classify(&self.cube, target, frame)?;
                trace!("{stage} {target:?}: {case:?}");
                if case == MiddleEdgeCase::Solved {
                    break;
                }
                self.apply(&case.algorithm(frame));
            }

            let done = &MIDDLE_EDGES[..=usize::from(frame)];
            finished(
                stage,
                first_layer_solved(&self.cube) && done.iter().all(|&e| self.cube.edge_solved(e)),
            )?;
        }
        Ok(())
    }

    fn last_layer_edge_orientation(&mut self) -> Result<(), SolveError> {
        let stage = Stage::LastLayerEdgeOrientation;
        // A dot takes two algorithms
        for _ in 0..2 {
            let case = EdgeOrientationCase::classify(&self.cube)?;
            trace!("{stage}: {case:?}");
            if case == EdgeOrientationCase::Oriented {
                break;
            }
            self.apply(&case.algorithm());
        }
        finished(
            stage,
            first_two_layers_solved(&self.cube) && oriented_up_edges(&self.cube) == 4,
        )
    }

    fn last_layer_corner_permutation(&mut self) -> Result<(), SolveError> {
        let stage = Stage::LastLayerCornerPermutation;

        // Corner three-cycles are even, so the Up face is turned until the
        // remaining corner permutation is even too.
        let Some(setup) = (0..4).find(|&turns| {
            let cube = self.cube.applied(&up_turns(turns));
            !permutation_is_odd(&cube.cp[..4])
        }) else {
            return Err(SolveError::Inconsistency {
                stage,
                reason: "no Up turn makes the corner permutation even",
            });
        };
        self.apply(&up_turns(setup));

        // A double swap becomes a three-cycle after one algorithm
        for _ in 0..2 {
            let homes = UP_CORNERS.map(|slot| corner_frame(self.cube.corner_at(slot).0));
            let case = CycleCase::classify(homes, stage)?;
            trace!("{stage}: {case:?}");
            let algorithm = match case {
                CycleCase::Placed => break,
                CycleCase::ThreeCycle { fixed, forward } if forward => NIKLAS.reframed(fixed),
                CycleCase::ThreeCycle { fixed, .. } => NIKLAS.inverse().reframed(fixed),
                CycleCase::DoubleSwap => NIKLAS.clone(),
            };
            self.apply(&algorithm);
        }
        finished(
            stage,
            first_two_layers_solved(&self.cube)
                && oriented_up_edges(&self.cube) == 4
                && placed_up_corners(&self.cube) == 4,
        )
    }

    fn last_layer_corner_orientation(&mut self) -> Result<(), SolveError> {
        let stage = Stage::LastLayerCornerOrientation;

        // Each twisted corner is brought to the front-right slot and twisted
        // in place. The Down layer is scrambled in between and comes back
        // once the total twist applied is a multiple of three.
        let mut offset = 0;
        for _ in 0..4 {
            let Some(frame) = (0_u8..4)
                .find(|&frame| self.cube.corner_at(UP_CORNERS[usize::from(frame)]).1 != 0)
            else {
                break;
            };
            let turns = i32::from(frame);
            self.apply(&up_turns(turns));
            offset += turns;

            let twist = self.cube.corner_at(Corner::Urf).1;
            trace!("{stage}: twist {twist} in frame {frame}");
            self.apply(&CORNER_TWIST.repeated(usize::from(twist)));
        }
        self.apply(&up_turns(-offset));

        finished(
            stage,
            first_two_layers_solved(&self.cube)
                && oriented_up_edges(&self.cube) == 4
                && UP_CORNERS.iter().all(|&c| self.cube.corner_solved(c)),
        )
    }

    fn last_layer_edge_permutation(&mut self) -> Result<(), SolveError> {
        let stage = Stage::LastLayerEdgePermutation;
        // A double swap becomes a three-cycle after one algorithm
        for _ in 0..2 {
            let homes = UP_EDGES.map(|slot| edge_frame(self.cube.edge_at(slot).0));
            let case = CycleCase::classify(homes, stage)?;
            trace!("{stage}: {case:?}");
            // The U perms keep the back edge, two frames on from the front
            let algorithm = match case {
                CycleCase::Placed => break,
                CycleCase::ThreeCycle { fixed, forward } => {
                    let perm = if forward { &*U_PERM_A } else { &*U_PERM_B };
                    perm.reframed((fixed + 2) % 4)
                }
                CycleCase::DoubleSwap => U_PERM_A.clone(),
            };
            self.apply(&algorithm);
        }
        finished(stage, self.cube.is_solved())
    }
}

fn locate_edge(cube: &Cube, piece: Edge, stage: Stage) -> Result<(Edge, u8), SolveError> {
    cube.locate_edge(piece)
        .ok_or(SolveError::Inconsistency {
            stage,
            reason: "edge piece missing from the state",
        })
}

fn locate_corner(cube: &Cube, piece: Corner, stage: Stage) -> Result<(Corner, u8), SolveError> {
    cube.locate_corner(piece)
        .ok_or(SolveError::Inconsistency {
            stage,
            reason: "corner piece missing from the state",
        })
}

fn finished(stage: Stage, goal_reached: bool) -> Result<(), SolveError> {
    if goal_reached {
        Ok(())
    } else {
        Err(SolveError::Inconsistency {
            stage,
            reason: "stage goal not reached by its case algorithms",
        })
    }
}

fn first_layer_solved(cube: &Cube) -> bool {
    CROSS_EDGES.iter().all(|&e| cube.edge_solved(e))
        && DOWN_CORNERS.iter().all(|&c| cube.corner_solved(c))
}

fn first_two_layers_solved(cube: &Cube) -> bool {
    first_layer_solved(cube) && MIDDLE_EDGES.iter().all(|&e| cube.edge_solved(e))
}

fn oriented_up_edges(cube: &Cube) -> usize {
    UP_EDGES.iter().filter(|&&e| cube.edge_at(e).1 == 0).count()
}

fn placed_up_corners(cube: &Cube) -> usize {
    UP_CORNERS
        .iter()
        .filter(|&&c| cube.corner_at(c).0 == c)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::Move;

    fn scrambled(text: &str) -> Cube {
        Cube::solved().applied(&text.parse().unwrap())
    }

    #[test_log::test]
    fn solved_cube_needs_no_moves() {
        let solver = Solver::new();
        assert!(solver.solve(&Cube::solved()).unwrap().is_empty());
        for (_, moves) in solver.solve_by_stage(&Cube::solved()).unwrap() {
            assert!(moves.is_empty());
        }
    }

    #[test_log::test]
    fn single_moves_are_solved() {
        let solver = Solver::new();
        for face in Face::ALL {
            for move_ in [
                Move::clockwise(face),
                Move::half(face),
                Move::counter_clockwise(face),
            ] {
                let mut cube = Cube::solved();
                cube.apply_move(move_);
                let solution = solver.solve(&cube).unwrap();
                assert!(cube.applied(&solution).is_solved(), "{move_}");
            }
        }
    }

    #[test_log::test]
    fn each_stage_establishes_its_goal() {
        let cube = scrambled("R U2 Fi L D B2 Ri U Li F2 D2 B U R2 Di Fi L2");
        let stages = Solver::new().solve_by_stage(&cube).unwrap();
        assert_eq!(
            stages.iter().map(|(stage, _)| *stage).collect::<Vec<_>>(),
            Stage::ALL
        );

        let mut state = cube;
        for (stage, moves) in &stages {
            state.apply_sequence(moves);
            let reached = match stage {
                Stage::Cross => CROSS_EDGES.iter().all(|&e| state.edge_solved(e)),
                Stage::FirstLayerCorners => first_layer_solved(&state),
                Stage::MiddleEdges => first_two_layers_solved(&state),
                Stage::LastLayerEdgeOrientation => {
                    first_two_layers_solved(&state) && oriented_up_edges(&state) == 4
                }
                Stage::LastLayerCornerPermutation => placed_up_corners(&state) == 4,
                Stage::LastLayerCornerOrientation => {
                    UP_CORNERS.iter().all(|&c| state.corner_solved(c))
                }
                Stage::LastLayerEdgePermutation => state.is_solved(),
            };
            assert!(reached, "{stage} did not reach its goal");
        }
    }

    #[test_log::test]
    fn last_layer_cases_are_handled() {
        // Each leaves the first two layers solved
        for case in [
            "F R U Ri Ui Fi",
            "R U Ri U R U2 Ri",
            "R U Ri Ui Ri F R2 Ui Ri Ui R U Ri Fi",
            "R2 U R U Ri Ui Ri Ui Ri U Ri",
            "U R Ui Li U Ri Ui L",
            "Ri Di R D Ri Di R D U Ri Di R D Ri Di R D Ri Di R D Ri Di R D Ui",
            "U",
            "U2",
        ] {
            let cube = scrambled(case);
            assert!(first_two_layers_solved(&cube), "{case}");
            let solution = Solver::new().solve(&cube).unwrap();
            assert!(cube.applied(&solution).is_solved(), "{case}");
        }
    }

    #[test]
    fn simplification_can_be_turned_off() {
        let cube = scrambled("R U F D L B");
        let raw = Solver::new().with_simplify(false).solve(&cube).unwrap();
        let simplified = Solver::new().solve(&cube).unwrap();
        assert!(cube.applied(&raw).is_solved());
        assert!(cube.applied(&simplified).is_solved());
        assert!(simplified.len() <= raw.len());
        assert_eq!(raw.simplified(), simplified);
        assert!(!Solver::new().with_simplify(false).config().simplify);
    }

    #[test]
    fn cross_cases_are_classified() {
        let case = |cube: &Cube, target| CrossCase::classify(cube, target).unwrap();
        assert_eq!(case(&Cube::solved(), Edge::Df), CrossCase::Solved);
        assert_eq!(case(&scrambled("F"), Edge::Df), CrossCase::Middle { frame: 3 });
        assert_eq!(case(&scrambled("D"), Edge::Df), CrossCase::Down { frame: 1 });
        assert_eq!(
            case(&Cube::solved().applied(&CROSS_FLIP_IN.inverse()), Edge::Df),
            CrossCase::UpFacingSide { frame: 0 }
        );

        let cube = scrambled("R2");
        let found = case(&cube, Edge::Dr);
        assert_eq!(found, CrossCase::UpFacingUp { frame: 1 });
        assert!(cube.applied(&found.algorithm(1)).is_solved());
    }

    #[test]
    fn first_layer_corner_cases_are_classified() {
        let cube = scrambled("R U Ri");
        let found = CornerCase::classify(&cube, Corner::Dfr).unwrap();
        assert_eq!(found, CornerCase::Up { frame: 3, twist: 2 });
        assert!(first_layer_solved(&cube.applied(&found.algorithm(0))));

        // Twisted in its own slot: lifted, then inserted
        let mut cube = Cube::solved().applied(&SEXY.repeated(2));
        let found = CornerCase::classify(&cube, Corner::Dfr).unwrap();
        assert_eq!(found, CornerCase::Down { frame: 0 });
        cube.apply_sequence(&found.algorithm(0));
        let found = CornerCase::classify(&cube, Corner::Dfr).unwrap();
        assert_eq!(found, CornerCase::Up { frame: 0, twist: 0 });
        cube.apply_sequence(&found.algorithm(0));
        assert!(cube.is_solved());
    }

    #[test]
    fn middle_edge_cases_are_classified() {
        let case = |cube: &Cube, target, frame| {
            MiddleEdgeCase::classify(cube, target, frame).unwrap()
        };

        let cube = Cube::solved().applied(&INSERT_FROM_FRONT.inverse());
        let found = case(&cube, Edge::Fr, 0);
        assert_eq!(found, MiddleEdgeCase::FromFront { frame: 0 });
        assert!(cube.applied(&found.algorithm(0)).is_solved());

        let cube = Cube::solved().applied(&INSERT_FROM_RIGHT.inverse());
        assert_eq!(case(&cube, Edge::Fr, 0), MiddleEdgeCase::FromRight { frame: 1 });

        // The back-right edge keeps its Back sticker as reference
        let cube = Cube::solved().applied(&INSERT_FROM_FRONT.reframed(1).inverse());
        let found = case(&cube, Edge::Br, 1);
        assert_eq!(found, MiddleEdgeCase::FromFront { frame: 1 });
        assert!(cube.applied(&found.algorithm(1)).is_solved());

        assert_eq!(
            case(&scrambled("R2"), Edge::Fr, 0),
            MiddleEdgeCase::Middle { frame: 1 }
        );
    }

    #[test]
    fn edge_orientation_cases_are_classified() {
        let case = |cube: &Cube| EdgeOrientationCase::classify(cube).unwrap();
        assert_eq!(case(&Cube::solved()), EdgeOrientationCase::Oriented);
        assert_eq!(
            case(&Cube::solved().applied(&ORIENT_LINE.inverse())),
            EdgeOrientationCase::Line { frame: 0 }
        );
        assert_eq!(
            case(&Cube::solved().applied(&ORIENT_ANGLE.reframed(3).inverse())),
            EdgeOrientationCase::Angle { frame: 3 }
        );

        let mut cube = Cube::solved();
        cube.eo[..4].copy_from_slice(&[1; 4]);
        assert_eq!(case(&cube), EdgeOrientationCase::Dot);
        cube.eo[..4].copy_from_slice(&[1, 0, 1, 0]);
        assert_eq!(case(&cube), EdgeOrientationCase::Line { frame: 1 });
    }

    #[test]
    fn cycle_cases_are_classified() {
        let case = |homes| CycleCase::classify(homes, Stage::LastLayerEdgePermutation);
        assert_eq!(case([0, 1, 2, 3]), Ok(CycleCase::Placed));
        assert_eq!(
            case([0, 2, 3, 1]),
            Ok(CycleCase::ThreeCycle {
                fixed: 0,
                forward: true
            })
        );
        assert_eq!(
            case([0, 3, 1, 2]),
            Ok(CycleCase::ThreeCycle {
                fixed: 0,
                forward: false
            })
        );
        assert_eq!(case([1, 0, 3, 2]), Ok(CycleCase::DoubleSwap));
        for odd in [[1, 2, 3, 0], [1, 0, 2, 3]] {
            assert!(matches!(
                case(odd),
                Err(SolveError::Inconsistency {
                    stage: Stage::LastLayerEdgePermutation,
                    ..
                })
            ));
        }
    }

    #[test]
    fn three_cycles_match_their_algorithms() {
        let cube = Cube::solved().applied(&NIKLAS.inverse());
        let homes = UP_CORNERS.map(|slot| corner_frame(cube.corner_at(slot).0));
        assert_eq!(
            CycleCase::classify(homes, Stage::LastLayerCornerPermutation),
            Ok(CycleCase::ThreeCycle {
                fixed: 0,
                forward: true
            })
        );

        let cube = Cube::solved().applied(&U_PERM_B);
        let homes = UP_EDGES.map(|slot| edge_frame(cube.edge_at(slot).0));
        assert_eq!(
            CycleCase::classify(homes, Stage::LastLayerEdgePermutation),
            Ok(CycleCase::ThreeCycle {
                fixed: 2,
                forward: true
            })
        );
    }

    #[test]
    fn unmet_goals_are_hard_failures() {
        assert_eq!(
            finished(Stage::Cross, false),
            Err(SolveError::Inconsistency {
                stage: Stage::Cross,
                reason: "stage goal not reached by its case algorithms",
            })
        );
        assert_eq!(finished(Stage::Cross, true), Ok(()));

        // Middle edges on a cube whose first layer is broken
        let mut progress = Progress {
            cube: scrambled("R"),
            moves: MoveSequence::new(),
        };
        assert!(matches!(
            progress.middle_edges(),
            Err(SolveError::Inconsistency {
                stage: Stage::MiddleEdges,
                ..
            })
        ));

        // A single flipped edge matches no orientation case
        let mut cube = Cube::solved();
        cube.eo[Edge::Uf as usize] = 1;
        let mut progress = Progress {
            cube,
            moves: MoveSequence::new(),
        };
        assert!(matches!(
            progress.last_layer_edge_orientation(),
            Err(SolveError::Inconsistency {
                stage: Stage::LastLayerEdgeOrientation,
                ..
            })
        ));
    }
}
