use crate::graph::{Color, GraphError, RbGraph};
use crate::test_utils::{graph_from_matrix, init_logger};

#[test]
fn vertex_bookkeeping() {
    init_logger();
    let mut g = RbGraph::new();

    let s0 = g.add_species("s0").unwrap();
    let c0 = g.add_character("c0").unwrap();
    assert_eq!(g.num_species(), 1);
    assert_eq!(g.num_characters(), 1);
    assert_eq!(g.num_vertices(), 2);
    assert_eq!(g.get_vertex("s0").unwrap(), s0);
    assert_eq!(g.get_vertex("c0").unwrap(), c0);

    assert!(matches!(
        g.add_species("s0"),
        Err(GraphError::DuplicateVertex(_))
    ));
    assert!(matches!(
        g.add_character("c0"),
        Err(GraphError::DuplicateVertex(_))
    ));

    g.remove_vertex(s0).unwrap();
    assert_eq!(g.num_species(), 0);
    assert_eq!(g.num_characters(), 1);
    assert!(matches!(
        g.get_vertex("s0"),
        Err(GraphError::MissingVertex(_))
    ));
    assert!(g.remove_vertex(s0).is_err());
    assert!(g.remove_vertex_by_name("s0").is_err());
}

#[test]
fn duplicate_edges_keep_their_color() {
    init_logger();
    let mut g = RbGraph::new();
    let s0 = g.add_species("s0").unwrap();
    let c0 = g.add_character("c0").unwrap();

    let (e, added) = g.add_edge(s0, c0, Color::Black).unwrap();
    assert!(added);

    let (again, added) = g.add_edge(s0, c0, Color::Red).unwrap();
    assert!(!added);
    assert_eq!(e, again);
    assert_eq!(g.edge_color(e), Color::Black);
}

#[test]
fn edges_require_live_endpoints() {
    init_logger();
    let mut g = RbGraph::new();
    let s0 = g.add_species("s0").unwrap();
    let c0 = g.add_character("c0").unwrap();
    g.remove_vertex(c0).unwrap();

    assert!(matches!(
        g.add_edge(s0, c0, Color::Black),
        Err(GraphError::UnknownVertex(_))
    ));
}

#[test]
fn name_map_stays_in_lockstep() {
    init_logger();
    let mut g = graph_from_matrix("3 2\n1 0\n1 1\n0 1");

    for v in g.vertices().collect::<Vec<_>>() {
        assert_eq!(g.get_vertex(g.name(v)).unwrap(), v);
    }
    assert_eq!(g.num_species() + g.num_characters(), g.num_vertices());

    g.remove_vertex_by_name("s1").unwrap();
    g.remove_vertex_by_name("c0").unwrap();

    for v in g.vertices().collect::<Vec<_>>() {
        assert_eq!(g.get_vertex(g.name(v)).unwrap(), v);
    }
    assert_eq!(g.num_species() + g.num_characters(), g.num_vertices());
    assert!(!g.contains_vertex("s1"));
}

#[test]
fn singleton_removal_leaves_no_isolated_vertices() {
    init_logger();
    let mut g = RbGraph::new();
    let s0 = g.add_species("s0").unwrap();
    let c0 = g.add_character("c0").unwrap();
    g.add_species("s1").unwrap();
    g.add_character("c1").unwrap();
    g.add_edge(s0, c0, Color::Black).unwrap();

    g.remove_singletons();

    assert_eq!(g.num_vertices(), 2);
    assert!(g.contains_vertex("s0") && g.contains_vertex("c0"));
    assert!(g.vertices().all(|v| g.degree(v) > 0));
}

#[test]
fn copies_are_deep_and_order_preserving() {
    init_logger();
    let g = graph_from_matrix("3 2 1\n1 0\n1 1\n0 1");
    let mut copy = g.clone();

    assert_eq!(g.num_species(), copy.num_species());
    assert_eq!(g.num_characters(), copy.num_characters());
    assert_eq!(g.to_string(), copy.to_string());

    copy.remove_vertex_by_name("s0").unwrap();
    assert!(g.contains_vertex("s0"));
    assert_eq!(g.num_species(), 3);
}

#[test]
fn connected_graph_yields_no_components() {
    init_logger();
    let g = graph_from_matrix("2 1\n1\n1");
    assert!(g.connected_components().is_none());
}

#[test]
fn split_components_copies_each_part() {
    init_logger();
    let g = graph_from_matrix("4 2\n1 0\n1 0\n0 1\n0 1");
    let parts = g.connected_components().unwrap();

    assert_eq!(parts.len(), 2);
    for part in &parts {
        assert_eq!(part.num_species(), 2);
        assert_eq!(part.num_characters(), 1);
        assert!(part.vertices().all(|v| part.degree(v) > 0));
    }

    let mut species: Vec<String> = parts
        .iter()
        .flat_map(|part| part.species().map(|s| part.name(s).to_owned()).collect::<Vec<_>>())
        .collect();
    species.sort();
    assert_eq!(species, ["s0", "s1", "s2", "s3"]);
}

#[test]
fn display_is_deterministic() {
    init_logger();
    let g = graph_from_matrix("2 2 1\n1 1\n0 1");
    assert_eq!(
        g.to_string(),
        "s0: --- c0; -r- c1;\n\
         s1: -r- c1;\n\
         c0: --- s0;\n\
         c1: -r- s0; -r- s1;"
    );
}
