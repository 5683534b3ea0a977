use crate::graph::{Color, ComponentMap, RbGraph};
use petgraph::stable_graph::NodeIndex;
use std::collections::BTreeSet;

/// Check if `v` is an active character: at least one incident edge, all red.
pub fn is_active(v: NodeIndex, g: &RbGraph) -> bool {
    if !g.is_character(v) {
        return false;
    }
    let mut edges = g.adjacent(v).peekable();
    edges.peek().is_some() && edges.all(|(_, color)| color == Color::Red)
}

/// Check if `v` is an inactive character: at least one incident edge, all black.
///
/// A mixed character is neither active nor inactive.
pub fn is_inactive(v: NodeIndex, g: &RbGraph) -> bool {
    if !g.is_character(v) {
        return false;
    }
    let mut edges = g.adjacent(v).peekable();
    edges.peek().is_some() && edges.all(|(_, color)| color == Color::Black)
}

/// Check if `v` is a free character: active and connected by red edges to
/// every species of the graph.
pub fn is_free(v: NodeIndex, g: &RbGraph) -> bool {
    if !g.is_character(v) {
        return false;
    }
    let mut count = 0;
    for (_, color) in g.adjacent(v) {
        if color != Color::Red {
            return false;
        }
        count += 1;
    }
    count == g.num_species() && count > 0
}

/// Component-aware variant of [`is_free`]: compares against the species of
/// `v`'s connected component instead of the whole graph.
pub fn is_free_in(v: NodeIndex, g: &RbGraph, c_map: &ComponentMap) -> bool {
    if !g.is_character(v) {
        return false;
    }
    let total = g
        .species()
        .filter(|&s| c_map.same_component(s, v))
        .count();
    let mut count = 0;
    for (_, color) in g.adjacent(v) {
        if color != Color::Red {
            return false;
        }
        count += 1;
    }
    count == total && count > 0
}

/// Check if `v` is a universal character: inactive and connected by black
/// edges to every species of the graph.
pub fn is_universal(v: NodeIndex, g: &RbGraph) -> bool {
    if !g.is_character(v) {
        return false;
    }
    let mut count = 0;
    for (s, color) in g.adjacent(v) {
        if color != Color::Black || !g.is_species(s) {
            return false;
        }
        count += 1;
    }
    count == g.num_species() && count > 0
}

/// Component-aware variant of [`is_universal`].
pub fn is_universal_in(v: NodeIndex, g: &RbGraph, c_map: &ComponentMap) -> bool {
    if !g.is_character(v) {
        return false;
    }
    let total = g
        .species()
        .filter(|&s| c_map.same_component(s, v))
        .count();
    let mut count = 0;
    for (s, color) in g.adjacent(v) {
        if color != Color::Black || !g.is_species(s) {
            return false;
        }
        count += 1;
    }
    count == total && count > 0
}

/// The names of all active characters of `g`.
pub fn active_characters(g: &RbGraph) -> BTreeSet<String> {
    g.characters()
        .filter(|&c| is_active(c, g))
        .map(|c| g.name(c).to_owned())
        .collect()
}

/// The names of the active characters adjacent to the species `s`.
pub fn species_active_characters(s: NodeIndex, g: &RbGraph) -> BTreeSet<String> {
    if !g.is_species(s) {
        return BTreeSet::new();
    }
    g.adjacent(s)
        .filter(|&(_, color)| color == Color::Red)
        .map(|(c, _)| g.name(c).to_owned())
        .collect()
}

/// The names of the active characters in the connected component of the
/// species `s`.
pub fn component_active_characters(s: NodeIndex, g: &RbGraph) -> BTreeSet<String> {
    if !g.is_species(s) {
        return BTreeSet::new();
    }
    component_active_characters_in(s, g, &g.component_map())
}

/// [`component_active_characters`] with a precomputed component map.
pub fn component_active_characters_in(
    s: NodeIndex,
    g: &RbGraph,
    c_map: &ComponentMap,
) -> BTreeSet<String> {
    if !g.is_species(s) {
        return BTreeSet::new();
    }
    g.characters()
        .filter(|&c| is_active(c, g) && c_map.same_component(s, c))
        .map(|c| g.name(c).to_owned())
        .collect()
}

/// Check if `g` contains a red Σ-graph.
///
/// A red Σ-graph is the obstruction pattern of two active characters `c0`,
/// `c1` and three species `a`, `b`, `c` with `{a, b} ⊆ N_red(c0)`,
/// `{b, c} ⊆ N_red(c1)`, `a ∉ N(c1)` and `c ∉ N(c0)`. A red-black graph
/// containing one cannot be reduced to the empty graph.
pub fn has_red_sigmagraph(g: &RbGraph) -> bool {
    // Fewer than two active characters cannot form the pattern.
    let actives: Vec<NodeIndex> = g.characters().filter(|&c| is_active(c, g)).collect();
    if actives.len() < 2 {
        return false;
    }

    for (i, &c0) in actives.iter().enumerate() {
        for &c1 in &actives[i + 1..] {
            if has_red_sigmapath(c0, c1, g) {
                return true;
            }
        }
    }

    false
}

/// Check if the active characters `c0` and `c1` span a red Σ-graph in `g`.
///
/// Searches for a junction species connected to both by red edges, plus an
/// exclusive red neighbor on each side.
pub(crate) fn has_red_sigmapath(c0: NodeIndex, c1: NodeIndex, g: &RbGraph) -> bool {
    let mut junction: Option<NodeIndex> = None;
    let mut half_sigma = false;

    for (s, color) in g.adjacent(c0) {
        if color != Color::Red {
            continue;
        }

        let to_c1 = g.edge_between(c1, s);
        if junction.is_none() && matches!(to_c1, Some((_, Color::Red))) {
            junction = Some(s);
            continue;
        }
        if to_c1.is_some() {
            continue;
        }

        // s is red-adjacent to c0 and not adjacent to c1 at all.
        half_sigma = true;
        if junction.is_some() {
            break;
        }
    }

    if !half_sigma || junction.is_none() {
        return false;
    }

    for (s, color) in g.adjacent(c1) {
        if color != Color::Red || Some(s) == junction {
            continue;
        }
        if g.edge_between(c0, s).is_some() {
            continue;
        }
        return true;
    }

    false
}
