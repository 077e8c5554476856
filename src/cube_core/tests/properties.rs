use cube_core::{
    Color, ColorScheme, Cube, Face, FaceletCube, Move, MoveSequence, ParseMoveError, Rotation,
    Turns, apply, apply_all, create_solved, format_move, format_sequence, is_solved, parse_move,
    parse_sequence,
};
use itertools::Itertools;
use serde_json::json;

fn random_cube(rng: &mut fastrand::Rng, length: usize) -> Cube {
    (0..length).fold(create_solved(), |cube, _| {
        let move_ = Move::new(Face::ALL[rng.usize(..6)], Turns::ALL[rng.usize(..3)]);
        apply(&cube, move_)
    })
}

#[test_log::test]
fn four_quarter_turns_are_the_identity() {
    let mut rng = fastrand::Rng::with_seed(1);
    for _ in 0..20 {
        let cube = random_cube(&mut rng, 30);
        for face in Face::ALL {
            let turned = (0..4).fold(cube.clone(), |c, _| apply(&c, Move::clockwise(face)));
            assert_eq!(turned, cube);
        }
    }
}

#[test_log::test]
fn clockwise_then_counter_clockwise_cancels() {
    let mut rng = fastrand::Rng::with_seed(2);
    for _ in 0..20 {
        let cube = random_cube(&mut rng, 30);
        for face in Face::ALL {
            let there = apply(&cube, Move::clockwise(face));
            assert_eq!(apply(&there, Move::counter_clockwise(face)), cube);
        }
    }
}

#[test_log::test]
fn legal_moves_keep_states_valid() {
    let mut rng = fastrand::Rng::with_seed(3);
    for length in 0..100 {
        let cube = random_cube(&mut rng, length);
        assert_eq!(cube.validate(), Ok(()));
        assert_eq!(Cube::try_from(&cube.facelets()), Ok(cube));
    }
}

#[test_log::test]
fn tokens_round_trip() {
    for face in Face::ALL {
        for turns in Turns::ALL {
            let move_ = Move::new(face, turns);
            let token = format_move(move_);
            assert_eq!(parse_move(&token), Ok(move_));
        }
    }
    let text = "R Ui F2 L D B2 Ri";
    assert_eq!(format_sequence(&parse_sequence(text).unwrap()), text);
    assert!(matches!(
        parse_move("Rx"),
        Err(ParseMoveError::InvalidMoveToken(_))
    ));
    assert_eq!(parse_move("Q2"), Err(ParseMoveError::InvalidFace('Q')));
}

#[test_log::test]
fn swapping_facelets_between_faces_breaks_solved() {
    let solved = create_solved();
    assert!(is_solved(&solved));
    assert!(solved.facelets().is_solved());

    let mut facelets = solved.facelets();
    facelets.swap((Face::Up, 0), (Face::Front, 4));
    assert!(!facelets.is_solved());

    let mut facelets = solved.facelets();
    facelets.swap((Face::Left, 3), (Face::Back, 8));
    assert!(!facelets.is_solved());
    assert!(Cube::try_from(&facelets).is_err());
}

#[test_log::test]
fn centers_never_move() {
    let mut rng = fastrand::Rng::with_seed(4);
    let scheme = ColorScheme::default();
    for _ in 0..20 {
        let facelets = random_cube(&mut rng, 25).facelets();
        for face in Face::ALL {
            assert_eq!(facelets.center(face), scheme.color(face));
        }
        for color in Color::ALL {
            let count = facelets
                .faces()
                .iter()
                .flatten()
                .filter(|&&c| c == color)
                .count();
            assert_eq!(count, 9);
        }
    }
}

#[test_log::test]
fn rotations_keep_the_cube_solvable_and_have_order_four() {
    for rotation in [Rotation::X, Rotation::Y, Rotation::Z] {
        let moves = rotation.moves();
        let once = apply_all(&create_solved(), &moves);
        assert!(!is_solved(&once));
        assert!(is_solved(&apply_all(&create_solved(), &moves.repeated(4))));
    }
}

#[test_log::test]
fn facelets_serialize_as_face_keyed_color_lists() {
    let face = |color: &'static str| vec![color; 9];
    let value = serde_json::to_value(FaceletCube::default()).unwrap();
    assert_eq!(
        value,
        json!({
            "U": face("W"),
            "D": face("Y"),
            "F": face("R"),
            "B": face("O"),
            "L": face("G"),
            "R": face("B"),
        })
    );

    let scrambled = apply_all(
        &create_solved(),
        &"R U Fi L2 D".parse::<MoveSequence>().unwrap(),
    )
    .facelets();
    let text = serde_json::to_string(&scrambled).unwrap();
    assert_eq!(serde_json::from_str::<FaceletCube>(&text).unwrap(), scrambled);

    let short = json!({ "U": vec!["W"; 8] });
    assert!(serde_json::from_value::<FaceletCube>(short).is_err());
}

#[test_log::test]
fn color_schemes_deserialize_with_defaults() {
    let scheme: ColorScheme = serde_json::from_value(json!({ "U": "Y", "D": "W" })).unwrap();
    assert_eq!(scheme.color(Face::Up), Color::Yellow);
    assert_eq!(scheme.color(Face::Front), Color::Red);

    let facelets = create_solved().to_facelets(&scheme);
    assert_eq!(
        facelets.face(Face::Up).iter().unique().collect_vec(),
        [&Color::Yellow]
    );
    assert_eq!(Cube::try_from(&facelets), Ok(create_solved()));
}

#[test_log::test]
fn color_schemes_that_repeat_a_color_are_rejected() {
    // Down keeps its default yellow
    let error = serde_json::from_value::<ColorScheme>(json!({ "U": "Y" })).unwrap_err();
    assert!(error.to_string().contains("more than one face"), "{error}");

    let swapped = json!({ "F": "G", "L": "R" });
    let scheme = serde_json::from_value::<ColorScheme>(swapped).unwrap();
    assert_eq!(scheme.validate(), Ok(()));
    assert_eq!(serde_json::to_value(&scheme).unwrap()["L"], json!("R"));
}
