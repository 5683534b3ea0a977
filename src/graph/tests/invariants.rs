use crate::graph::{is_active, is_inactive, realize_character, RbGraph, SignedCharacter};
use crate::test_utils::{graph_from_matrix, init_logger};

const MATRICES: &[&str] = &[
    "2 1\n1\n1",
    "2 1 0\n1\n1",
    "4 2\n1 0\n1 0\n0 1\n0 1",
    "3 2 0 1\n1 1\n1 0\n0 1",
    "3 3\n1 1 0\n1 1 1\n0 0 1",
    "3 2\n1 0\n0 1\n1 1",
    "5 7 3\n0 0 1 0 1 1 0\n0 1 1 1 0 0 0\n1 1 0 1 0 0 0\n1 1 1 1 1 0 1\n0 1 1 0 1 0 0",
];

/// The structural invariants every reachable graph state must satisfy.
fn check_invariants(g: &RbGraph) {
    assert_eq!(
        g.num_species() + g.num_characters(),
        g.num_vertices(),
        "counters must partition the vertex set"
    );

    let mut named = 0;
    for v in g.vertices() {
        assert_eq!(
            g.get_vertex(g.name(v)).unwrap(),
            v,
            "every name must resolve back to its vertex"
        );
        named += 1;
    }
    assert_eq!(named, g.num_vertices());

    for c in g.characters() {
        if g.degree(c) > 0 {
            assert!(
                is_active(c, g) || is_inactive(c, g),
                "character {} must be purely red or purely black",
                g.name(c)
            );
        }
    }
}

#[test]
fn realization_preserves_the_structural_invariants() {
    init_logger();

    for matrix in MATRICES {
        let mut g = graph_from_matrix(matrix);
        check_invariants(&g);

        let characters: Vec<String> = g.characters().map(|c| g.name(c).to_owned()).collect();
        for name in characters {
            // Feasibility does not matter here; any applied mutation must
            // leave the graph consistent.
            let _ = realize_character(&SignedCharacter::gain(name.clone()), &mut g);
            check_invariants(&g);
            let _ = realize_character(&SignedCharacter::lose(name), &mut g);
            check_invariants(&g);
        }
    }
}

#[test]
fn singleton_removal_is_exhaustive() {
    init_logger();

    for matrix in MATRICES {
        let mut g = graph_from_matrix(matrix);
        g.remove_singletons();
        assert!(g.vertices().all(|v| g.degree(v) > 0));
        check_invariants(&g);
    }
}

#[test]
fn component_split_partitions_the_vertex_set() {
    init_logger();

    for matrix in MATRICES {
        let g = graph_from_matrix(matrix);
        let Some(parts) = g.connected_components() else {
            continue;
        };

        let split_vertices: usize = parts.iter().map(|part| part.num_vertices()).sum();
        assert_eq!(split_vertices, g.num_vertices());
        for part in &parts {
            check_invariants(part);
            assert!(part.connected_components().is_none());
        }
    }
}
