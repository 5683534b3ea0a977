use crate::graph::{maximal_characters, maximal_reducible_graph};
use crate::test_utils::{graph_from_matrix, init_logger};

#[test]
fn nested_neighborhoods_keep_only_the_superset() {
    init_logger();
    let g = graph_from_matrix("3 3\n1 1 0\n1 1 0\n1 0 1");

    let cm = maximal_characters(&g, false);
    let names: Vec<&str> = cm.iter().map(|&c| g.name(c)).collect();
    assert_eq!(names, ["c0"]);
}

#[test]
fn overlapping_neighborhoods_are_both_maximal() {
    init_logger();
    let g = graph_from_matrix("3 2\n1 0\n1 1\n0 1");

    let cm = maximal_characters(&g, false);
    let names: Vec<&str> = cm.iter().map(|&c| g.name(c)).collect();
    assert_eq!(names, ["c0", "c1"]);
}

#[test]
fn a_later_superset_replaces_an_earlier_maximal() {
    init_logger();
    let g = graph_from_matrix("2 2\n1 1\n0 1");

    let cm = maximal_characters(&g, false);
    let names: Vec<&str> = cm.iter().map(|&c| g.name(c)).collect();
    assert_eq!(names, ["c1"]);
}

#[test]
fn equal_neighborhoods_count_once() {
    init_logger();
    let g = graph_from_matrix("2 2\n1 1\n1 1");

    let cm = maximal_characters(&g, false);
    let names: Vec<&str> = cm.iter().map(|&c| g.name(c)).collect();
    assert_eq!(names, ["c0"]);
}

#[test]
fn active_characters_are_skipped_unless_requested() {
    init_logger();
    let g = graph_from_matrix("2 2 0\n1 1\n1 1");

    let skipped = maximal_characters(&g, false);
    let names: Vec<&str> = skipped.iter().map(|&c| g.name(c)).collect();
    assert_eq!(names, ["c1"]);

    // With active characters included, c0's red neighborhood equals c1's
    // black one, and c0 is discovered first.
    let included = maximal_characters(&g, true);
    let names: Vec<&str> = included.iter().map(|&c| g.name(c)).collect();
    assert_eq!(names, ["c0"]);
}

#[test]
fn reducible_graph_keeps_maximal_and_active_characters() {
    init_logger();
    let g = graph_from_matrix("3 3 2\n1 1 1\n1 1 0\n0 0 1");

    let gm = maximal_reducible_graph(&g, true);
    assert!(gm.contains_vertex("c0"));
    assert!(!gm.contains_vertex("c1"));
    assert!(gm.contains_vertex("c2"));
    assert_eq!(gm.num_species(), 3);

    let gm = maximal_reducible_graph(&g, false);
    assert!(gm.contains_vertex("c0"));
    assert!(!gm.contains_vertex("c1"));
    assert!(!gm.contains_vertex("c2"));
    // s2 only carried the active character and became a singleton.
    assert!(!gm.contains_vertex("s2"));
}

#[test]
fn projection_is_a_fixed_point() {
    init_logger();
    let g = graph_from_matrix("3 3 2\n1 1 1\n1 1 0\n0 0 1");

    let gm = maximal_reducible_graph(&g, true);
    let again = maximal_reducible_graph(&gm, true);
    assert_eq!(gm.to_string(), again.to_string());
}
