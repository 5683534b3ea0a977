use crate::graph::{
    has_red_sigmagraph, is_inactive, realize_species, Color, RbGraph,
};
use log::trace;
use petgraph::stable_graph::NodeIndex;
use std::collections::BTreeSet;

/// The species incident to at least one red edge, in vertex order.
pub fn active_species(g: &RbGraph) -> Vec<NodeIndex> {
    g.species()
        .filter(|&s| g.adjacent(s).any(|(_, color)| color == Color::Red))
        .collect()
}

/// Names of the inactive characters adjacent to the species `s`.
pub fn species_inactive_characters(s: NodeIndex, g: &RbGraph) -> BTreeSet<String> {
    if !g.is_species(s) {
        return BTreeSet::new();
    }
    g.adjacent(s)
        .filter(|&(c, _)| is_inactive(c, g))
        .map(|(c, _)| g.name(c).to_owned())
        .collect()
}

/// Check if `u` carries every inactive character of `v`.
pub fn includes_species(u: NodeIndex, v: NodeIndex, g: &RbGraph) -> bool {
    species_inactive_characters(v, g).is_subset(&species_inactive_characters(u, g))
}

/// Sort species in place by degree, highest first.
pub fn order_by_degree(species: &mut [NodeIndex], g: &RbGraph) {
    species.sort_by_key(|&v| std::cmp::Reverse(g.degree(v)));
}

/// The species that share at least one character with `s`, excluding `s`.
fn sibling_species(s: NodeIndex, g: &RbGraph) -> Vec<NodeIndex> {
    let mut siblings = Vec::new();
    for (c, _) in g.adjacent(s) {
        for (u, _) in g.adjacent(c) {
            if u != s && !siblings.contains(&u) {
                siblings.push(u);
            }
        }
    }
    siblings
}

/// Check if realizing the species `s` is harmless: `s` is either fully
/// active already, or gaining its inactive characters on a copy of the
/// graph is feasible and creates no red Σ-graph.
pub fn is_quasi_active(s: NodeIndex, g: &RbGraph) -> bool {
    if !g.is_species(s) {
        return false;
    }
    let mut edges = g.adjacent(s).peekable();
    if edges.peek().is_some() && edges.all(|(_, color)| color == Color::Red) {
        return true;
    }

    let mut probe = g.clone();
    let Ok(sv) = probe.get_vertex(g.name(s)) else {
        return false;
    };
    let (_, feasible) = realize_species(sv, &mut probe);
    feasible && !has_red_sigmagraph(&probe)
}

/// Search for an active species whose realization, followed by that of a
/// sibling species including it, cannot create a red Σ-graph.
///
/// Candidates are visited by descending degree; for each, siblings with
/// exactly `i` more inactive characters are probed for increasing `i` on
/// a copy of the graph.
pub fn minimal_potentially_active_species(g: &RbGraph) -> Option<NodeIndex> {
    let mut candidates = active_species(g);
    order_by_degree(&mut candidates, g);

    for &v in &candidates {
        let inactive_v = species_inactive_characters(v, g).len();
        let siblings = sibling_species(v, g);

        for i in 1..g.num_characters() {
            for &u in &siblings {
                if !g.is_species(u) || !includes_species(u, v, g) {
                    continue;
                }
                if species_inactive_characters(u, g).len() != inactive_v + i {
                    continue;
                }

                let mut probe = g.clone();
                let Ok(pv) = probe.get_vertex(g.name(v)) else {
                    continue;
                };
                let (_, feasible_v) = realize_species(pv, &mut probe);
                if !feasible_v {
                    continue;
                }
                let Ok(pu) = probe.get_vertex(g.name(u)) else {
                    continue;
                };
                let (_, feasible_u) = realize_species(pu, &mut probe);
                if !feasible_u {
                    continue;
                }

                if !has_red_sigmagraph(&probe) {
                    trace!(
                        "potentially active species {} (with {})",
                        g.name(v),
                        g.name(u)
                    );
                    return Some(v);
                }
            }
        }
    }

    None
}
