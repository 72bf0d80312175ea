#![warn(clippy::pedantic)]

use approx::assert_relative_eq;
use petgraph::graph::{EdgeIndex, NodeIndex};
use trussreact::{
    equilibrium_system, is_solvable, point, resolve, solve, Editor, EditorConfig, Element,
    MatrixError, SolveError, Structure, StructureError, GRAVITY,
};

#[derive(Debug, Clone, Copy)]
struct Span {
    left: NodeIndex,
    right: NodeIndex,
    beams: [EdgeIndex; 3],
}

/// Two supports at x = -5 and x = 5 joined through two raised nodes.
fn build_symmetric_span() -> (Structure, Span) {
    let mut structure = Structure::new();
    let left = structure.add_support(point(-5.0, 0.0));
    let right = structure.add_support(point(5.0, 0.0));
    let a = structure.add_node(point(-1.0, 1.0));
    let b = structure.add_node(point(1.0, 1.0));
    let beams = [
        structure.add_beam(left, a).expect("beam accepted"),
        structure.add_beam(a, b).expect("beam accepted"),
        structure.add_beam(b, right).expect("beam accepted"),
    ];
    (structure, Span { left, right, beams })
}

fn total_weight(structure: &Structure) -> f64 {
    structure
        .beams()
        .map(|beam| structure.beam_weight(beam).expect("known beam"))
        .sum()
}

/// Check that the stored reactions satisfy every moment equation.
fn assert_moment_balance(structure: &Structure) {
    let (coefficients, rhs) = equilibrium_system(structure);
    let forces: Vec<f64> = structure
        .supports()
        .map(|support| structure.vertical_force(support).expect("support"))
        .collect();
    for (row, expected) in coefficients.iter().zip(rhs) {
        let moment: f64 = row.iter().zip(&forces).map(|(arm, force)| arm * force).sum();
        assert_relative_eq!(moment, expected, epsilon = 1.0e-9);
    }
}

#[test]
fn symmetric_span_shares_weight_equally() {
    let (mut structure, span) = build_symmetric_span();
    assert!(is_solvable(&structure));
    resolve(&mut structure).expect("span resolves");

    let half = total_weight(&structure) / 2.0;
    assert_relative_eq!(
        structure.vertical_force(span.left).expect("support"),
        half,
        epsilon = 1.0e-9
    );
    assert_relative_eq!(
        structure.vertical_force(span.right).expect("support"),
        half,
        epsilon = 1.0e-9
    );
    assert_moment_balance(&structure);
}

#[test]
fn one_sided_load_follows_the_lever_rule() {
    let mut structure = Structure::new();
    let near = structure.add_support(point(-5.0, 0.0));
    let far = structure.add_support(point(0.0, 0.0));
    let a = structure.add_node(point(4.0, 1.0));
    let b = structure.add_node(point(6.0, 1.0));
    let beam = structure.add_beam(a, b).expect("beam accepted");
    let weight = structure.beam_weight(beam).expect("known beam");

    // Deliberately ungated: the load is not attached to the supports.
    assert!(!is_solvable(&structure));
    solve(&mut structure).expect("equations are regular");

    assert_moment_balance(&structure);
    assert_relative_eq!(
        structure.vertical_force(near).expect("support"),
        -weight,
        epsilon = 1.0e-9
    );
    assert_relative_eq!(
        structure.vertical_force(far).expect("support"),
        2.0 * weight,
        epsilon = 1.0e-9
    );
}

#[test]
fn unloaded_supports_solve_to_zero() {
    let mut structure = Structure::new();
    let left = structure.add_support(point(-3.0, 0.0));
    let right = structure.add_support(point(3.0, 0.0));

    // Without a beam the two supports are separate pieces.
    assert!(!is_solvable(&structure));
    solve(&mut structure).expect("equations are regular");
    assert_relative_eq!(structure.vertical_force(left).expect("support"), 0.0);
    assert_relative_eq!(structure.vertical_force(right).expect("support"), 0.0);
}

#[test]
fn solvability_requires_two_supports_and_one_piece() {
    let mut structure = Structure::new();
    let left = structure.add_support(point(-5.0, 0.0));
    let node = structure.add_node(point(0.0, 2.0));
    structure.add_beam(left, node).expect("beam accepted");
    assert!(!is_solvable(&structure));

    let right = structure.add_support(point(5.0, 0.0));
    let island = structure.add_node(point(6.0, 2.0));
    structure.add_beam(right, island).expect("beam accepted");
    assert!(!is_solvable(&structure));
    assert_eq!(resolve(&mut structure), Err(SolveError::Unsolvable));

    structure.add_beam(node, right).expect("beam accepted");
    assert!(is_solvable(&structure));
    resolve(&mut structure).expect("structure resolves");
    assert_moment_balance(&structure);
}

#[test]
fn reversed_duplicate_beam_is_rejected() {
    let (mut structure, span) = build_symmetric_span();
    let (a, b) = structure
        .beam_endpoints(span.beams[1])
        .expect("known beam");
    assert_eq!(
        structure.add_beam(b, a),
        Err(StructureError::DuplicateBeam(b, a))
    );
    assert_eq!(structure.find_beam(b, a), Some(span.beams[1]));
}

#[test]
fn removing_a_node_removes_every_beam_touching_it() {
    let (mut structure, span) = build_symmetric_span();
    let (_, raised) = structure
        .beam_endpoints(span.beams[0])
        .expect("known beam");

    structure.remove_joint(raised).expect("joint removed");

    assert_eq!(structure.beam_count(), 1);
    for beam in structure.beams() {
        let (start, end) = structure.beam_endpoints(beam).expect("known beam");
        assert!(start != raised && end != raised);
    }
    assert!(!is_solvable(&structure));
}

#[test]
fn moved_joints_keep_their_beam_mass() {
    let (mut structure, span) = build_symmetric_span();
    let before = total_weight(&structure);
    let (_, raised) = structure
        .beam_endpoints(span.beams[0])
        .expect("known beam");

    structure
        .move_joint(raised, point(-1.0, 9.0))
        .expect("joint moved");

    assert_relative_eq!(total_weight(&structure), before);
    assert_relative_eq!(
        structure.beam_weight(span.beams[0]).expect("known beam"),
        f64::hypot(4.0, 1.0) * GRAVITY,
        epsilon = 1.0e-12
    );
}

#[test]
fn supports_sharing_an_x_position_are_singular() {
    let mut editor = Editor::new(EditorConfig::default());
    let left = editor.place_support(point(2.0, 0.0)).expect("placed");
    let right = editor.place_support(point(2.0, 0.0)).expect("placed");
    let top = editor.place_node(point(2.0, 3.0));
    editor.connect(left, top).expect("known joints");
    editor.connect(top, right).expect("known joints");

    assert_eq!(
        editor.resolve(),
        Err(SolveError::Matrix(MatrixError::SingularMatrix(2)))
    );
    assert!(!editor.is_resolved());
}

#[test]
fn editor_round_trip_through_a_resolve() {
    let mut editor = Editor::new(EditorConfig::default());
    let left = editor.place_support(point(-4.0, 1.0)).expect("placed");
    let right = editor.place_support(point(4.0, -1.0)).expect("placed");
    let top = editor.place_node(point(0.0, 3.0));
    editor.connect(left, top).expect("known joints");
    editor.connect(top, right).expect("known joints");

    editor.resolve().expect("resolves");
    let reactions = editor.reactions();
    assert_eq!(reactions.len(), 2);
    let half = total_weight(editor.structure()) / 2.0;
    for (_, force) in reactions {
        assert_relative_eq!(force, half, epsilon = 1.0e-9);
    }

    editor
        .delete(Element::Joint(top))
        .expect("joint deleted");
    assert!(!editor.is_resolved());
    assert_eq!(editor.structure().beam_count(), 0);
}
