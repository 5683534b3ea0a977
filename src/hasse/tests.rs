use crate::graph::SignedCharacter;
use crate::hasse::HasseDiagram;
use crate::test_utils::{graph_from_matrix, init_logger};
use petgraph::stable_graph::NodeIndex;

/// Find the class containing the given species name.
fn class_of<'a>(hasse: &HasseDiagram<'a>, species: &str) -> NodeIndex {
    hasse
        .vertices()
        .find(|&v| hasse.vertex(v).species.iter().any(|name| name == species))
        .expect("species must appear in some class")
}

#[test]
fn equal_neighborhoods_collapse_into_one_class() {
    init_logger();
    let g = graph_from_matrix("2 2\n1 1\n1 1");
    let hasse = HasseDiagram::build(&g, &g);

    assert_eq!(hasse.num_vertices(), 1);
    let v = hasse.vertices().next().unwrap();
    assert_eq!(hasse.vertex(v).species, ["s0", "s1"]);
    assert_eq!(hasse.vertex(v).characters, ["c0", "c1"]);
    assert_eq!(hasse.out_degree(v), 0);
}

#[test]
fn included_classes_get_gain_labeled_edges() {
    init_logger();
    let g = graph_from_matrix("2 2\n1 0\n1 1");
    let hasse = HasseDiagram::build(&g, &g);

    assert_eq!(hasse.num_vertices(), 2);
    let small = class_of(&hasse, "s0");
    let large = class_of(&hasse, "s1");

    let edges = hasse.out_edges(small);
    assert_eq!(edges.len(), 1);
    let (from, to) = hasse.edge_endpoints(edges[0]);
    assert_eq!((from, to), (small, large));
    assert_eq!(
        hasse.edge(edges[0]).characters,
        vec![SignedCharacter::gain("c1")]
    );
    assert_eq!(hasse.out_degree(large), 0);
}

#[test]
fn transitive_edges_are_removed() {
    init_logger();
    let g = graph_from_matrix("3 3\n1 0 0\n1 1 0\n1 1 1");
    let hasse = HasseDiagram::build(&g, &g);

    assert_eq!(hasse.num_vertices(), 3);
    let a = class_of(&hasse, "s0");
    let b = class_of(&hasse, "s1");
    let c = class_of(&hasse, "s2");

    assert_eq!(hasse.out_edges(a).len(), 1);
    assert_eq!(hasse.edge_endpoints(hasse.out_edges(a)[0]).1, b);
    assert_eq!(hasse.out_edges(b).len(), 1);
    assert_eq!(hasse.edge_endpoints(hasse.out_edges(b)[0]).1, c);
    assert_eq!(hasse.out_edges(c).len(), 0);
    assert_eq!(hasse.in_degree(a), 0);
    assert_eq!(hasse.in_degree(c), 1);

    // A class's characters are its path's gains on top of the root's.
    let mut along_path: Vec<String> = hasse.vertex(a).characters.clone();
    along_path.extend(
        hasse
            .edge(hasse.out_edges(a)[0])
            .characters
            .iter()
            .chain(hasse.edge(hasse.out_edges(b)[0]).characters.iter())
            .map(|sc| sc.character.clone()),
    );
    assert_eq!(along_path, hasse.vertex(c).characters);
}

#[test]
fn red_incident_species_are_stripped_and_classes_spliced() {
    init_logger();
    // s1 sits between s0 and s2 in the inclusion order but carries the
    // active character c3, so its class dissolves into a bridging edge.
    let g = graph_from_matrix("3 4 3\n1 0 0 0\n1 1 0 1\n1 1 1 0");
    let hasse = HasseDiagram::build(&g, &g);

    assert_eq!(hasse.num_vertices(), 2);
    let a = class_of(&hasse, "s0");
    let c = class_of(&hasse, "s2");

    let edges = hasse.out_edges(a);
    assert_eq!(edges.len(), 1);
    assert_eq!(hasse.edge_endpoints(edges[0]).1, c);
    assert_eq!(
        hasse.edge(edges[0]).characters,
        vec![SignedCharacter::gain("c1"), SignedCharacter::gain("c2")]
    );
}

#[test]
fn spliced_labels_merge_without_duplicates() {
    init_logger();
    // Two dissolving middle classes bridge the same pair of survivors;
    // the second bridge must merge into the first edge, not replace it.
    let g = graph_from_matrix(
        "4 5 3 4\n1 0 0 0 0\n1 1 0 1 0\n1 0 1 0 1\n1 1 1 0 0",
    );
    let hasse = HasseDiagram::build(&g, &g);

    assert_eq!(hasse.num_vertices(), 2);
    let a = class_of(&hasse, "s0");
    let c = class_of(&hasse, "s3");

    let edges = hasse.out_edges(a);
    assert_eq!(edges.len(), 1);
    assert_eq!(hasse.edge_endpoints(edges[0]).1, c);

    let mut labels: Vec<String> = hasse.edge(edges[0])
        .characters
        .iter()
        .map(|sc| sc.to_string())
        .collect();
    labels.sort();
    assert_eq!(labels, ["c1+", "c2+"]);
}

#[test]
fn species_without_inactive_characters_are_ignored() {
    init_logger();
    let g = graph_from_matrix("2 2 1\n1 1\n0 1");
    let hasse = HasseDiagram::build(&g, &g);

    // s1 has no black edges and s0 is red-incident: nothing survives.
    assert_eq!(hasse.num_vertices(), 0);
}

#[test]
fn diagram_keeps_its_parents() {
    init_logger();
    let g = graph_from_matrix("2 2\n1 0\n1 1");
    let gm = g.clone();
    let hasse = HasseDiagram::build(&g, &gm);

    assert_eq!(hasse.source_graph().to_string(), g.to_string());
    assert_eq!(hasse.maximal_graph().to_string(), gm.to_string());
}
