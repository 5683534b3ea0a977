use crate::graph::{is_active, RbGraph};
use log::debug;
use petgraph::stable_graph::NodeIndex;
use std::collections::HashMap;

/// Build the list of maximal characters of `g`.
///
/// Let `S(c)` be the set of species adjacent to the character `c`. A
/// character is maximal when `S(c)` is not a proper subset of `S(c')` for
/// any other character `c'`. Two characters overlap when they share a
/// species but neither includes the other; overlapping characters are both
/// maximal.
///
/// Active characters are skipped unless `include_active` is set, in which
/// case their red neighborhoods take part in the comparison. The result is
/// in discovery order.
pub fn maximal_characters(g: &RbGraph, include_active: bool) -> Vec<NodeIndex> {
    let mut cm: Vec<NodeIndex> = Vec::new();
    let mut adjacency: HashMap<NodeIndex, Vec<NodeIndex>> = HashMap::new();

    'characters: for c in g.characters() {
        if !include_active && is_active(c, g) {
            continue;
        }

        let species: Vec<NodeIndex> = g.adjacent(c).map(|(s, _)| s).collect();
        adjacency.insert(c, species);

        if cm.is_empty() {
            cm.push(c);
            continue;
        }

        let s_c = &adjacency[&c];
        let mut replaced = false;
        let mut candidate = false;

        let mut i = 0;
        while i < cm.len() {
            let s_m = &adjacency[&cm[i]];
            let included = s_c.iter().filter(|s| s_m.contains(s)).count();
            let excluded = s_c.len() - included;

            if included == s_m.len() && excluded > 0 {
                // S(c) strictly contains S(m): m stops being maximal.
                cm.remove(i);
                replaced = true;
                continue;
            }
            if included < s_m.len() && excluded > 0 {
                // Incomparable: c may still be a new maximal character.
                candidate = true;
                i += 1;
                continue;
            }
            // S(c) equals or is contained in S(m): c is not maximal.
            continue 'characters;
        }

        if replaced || candidate {
            cm.push(c);
        }
    }

    cm
}

/// Build the maximal reducible graph of `g`: the subgraph induced by the
/// maximal characters and all species still attached to one of them.
/// When `keep_active` is set, the active characters of `g` survive too.
pub fn maximal_reducible_graph(g: &RbGraph, keep_active: bool) -> RbGraph {
    let mut gm = g.clone();

    let cm = maximal_characters(&gm, false);
    debug!(
        "maximal characters: {{ {} }}",
        cm.iter()
            .map(|&c| gm.name(c))
            .collect::<Vec<_>>()
            .join(" ")
    );

    let doomed: Vec<NodeIndex> = gm
        .characters()
        .filter(|c| !cm.contains(c))
        .filter(|&c| !(keep_active && is_active(c, &gm)))
        .collect();
    for c in doomed {
        gm.drop_vertex(c);
    }

    gm.remove_singletons();

    gm
}
