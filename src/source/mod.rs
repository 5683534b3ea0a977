//! Safe-source selection on the Hasse diagram.
//!
//! A *safe source* is a diagram source whose realization in the red-black
//! graph provably cannot create a red Σ-graph. The search walks the
//! diagram depth-first looking for safe chains; the root of a safe chain
//! must pass a standalone realizability check and carry a species without
//! red edges. When no root passes all three, two weaker fall-through tests
//! pick from the chain-safe candidates instead.

mod search;


use crate::graph::{
    component_active_characters, has_red_sigmagraph, is_inactive, realize, Color, SignedCharacter,
};
use crate::hasse::HasseDiagram;
use crate::reduction::SourcePolicy;
use log::debug;
use petgraph::stable_graph::NodeIndex;
use search::SourceSearch;

/// Compute the safe sources of `hasse`, in selection order.
///
/// Under [`SourcePolicy::FirstFound`] the search stops at the first safe
/// source; the other policies accumulate every candidate so the driver can
/// choose. An empty result means the reduction is stuck.
pub fn initial_states(hasse: &HasseDiagram<'_>, policy: &SourcePolicy) -> Vec<NodeIndex> {
    let accumulate = policy.accumulates();

    let (mut output, sources) = SourceSearch::run(hasse, accumulate);

    if output.is_empty() && sources.len() == 1 {
        // A single chain-safe candidate stands when it is realizable.
        if realize_source(sources[0], hasse) {
            output.push(sources[0]);
        }
    } else if output.is_empty() && sources.len() > 1 {
        output = covering_species_sources(&sources, hasse, accumulate);
        if output.is_empty() {
            output = min_active_degree_sources(&sources, hasse, accumulate);
        }
    }

    debug!(
        "safe sources: < {} >",
        output
            .iter()
            .map(|&v| hasse.describe(v))
            .collect::<Vec<_>>()
            .join(" ")
    );

    output
}

/// Check that realizing `source` cannot create a red Σ-graph.
///
/// Works on a copy of the maximal reducible graph: the species of the
/// class are first attached by black edges to every active character of
/// their component, then the still-inactive characters of the class are
/// gained.
pub(crate) fn realize_source(source: NodeIndex, hasse: &HasseDiagram<'_>) -> bool {
    let gm = hasse.maximal_graph();
    let vertex = hasse.vertex(source);

    let mut copy = gm.clone();

    let Some(first) = vertex.species.first() else {
        return false;
    };
    let Ok(s) = copy.get_vertex(first) else {
        return false;
    };

    let component_actives = component_active_characters(s, &copy);
    for species_name in &vertex.species {
        let Ok(sv) = copy.get_vertex(species_name) else {
            return false;
        };
        for active_name in &component_actives {
            let Ok(av) = copy.get_vertex(active_name) else {
                return false;
            };
            if copy.add_edge(sv, av, Color::Black).is_err() {
                return false;
            }
        }
    }

    let gains: Vec<SignedCharacter> = vertex
        .characters
        .iter()
        .filter(|name| match copy.get_vertex(name.as_str()) {
            Ok(c) => is_inactive(c, &copy),
            Err(_) => false,
        })
        .map(SignedCharacter::gain)
        .collect();

    let (_, feasible) = realize(&gains, &mut copy);
    if !feasible {
        debug!("source realization not feasible for {}", hasse.describe(source));
        return false;
    }

    !has_red_sigmagraph(&copy)
}

/// First fall-through test: keep the sources for which some outside
/// species covers all the source's characters by black edges, carries no
/// red edge, and touches at least one additional maximal character.
pub(crate) fn covering_species_sources(
    sources: &[NodeIndex],
    hasse: &HasseDiagram<'_>,
    accumulate: bool,
) -> Vec<NodeIndex> {
    let gm = hasse.maximal_graph();

    // Every character of the maximal reducible graph is maximal.
    let gm_characters: Vec<&str> = gm.characters().map(|c| gm.name(c)).collect();

    let mut output = Vec::new();

    for &source in sources {
        let vertex = hasse.vertex(source);
        let mut matched = false;

        'species: for s in gm.species() {
            // Species of the class itself were already covered by the
            // red-free-species check.
            if vertex.species.iter().any(|name| name == gm.name(s)) {
                continue;
            }

            let mut covered = 0;
            let mut additional = 0;
            for (c, color) in gm.adjacent(s) {
                if color == Color::Red {
                    continue 'species;
                }
                let name = gm.name(c);
                if vertex.characters.iter().any(|other| other == name) {
                    covered += 1;
                } else if gm_characters.contains(&name) {
                    additional += 1;
                }
            }

            if covered < vertex.characters.len() || additional == 0 {
                continue;
            }

            debug!("covering species {} for {}", gm.name(s), hasse.describe(source));
            matched = true;
            break;
        }

        if matched {
            output.push(source);
            if !accumulate {
                return output;
            }
        }
    }

    output
}

/// Second fall-through test: every species of every candidate must touch
/// an active character; the candidates whose weakest species ties the
/// global minimum of active degrees win.
pub(crate) fn min_active_degree_sources(
    sources: &[NodeIndex],
    hasse: &HasseDiagram<'_>,
    accumulate: bool,
) -> Vec<NodeIndex> {
    let gm = hasse.maximal_graph();

    let mut minima: Vec<(NodeIndex, usize)> = Vec::new();

    for &source in sources {
        let mut source_min: Option<usize> = None;

        for name in &hasse.vertex(source).species {
            let Ok(s) = gm.get_vertex(name) else {
                continue;
            };
            let active_degree = gm
                .adjacent(s)
                .filter(|&(_, color)| color == Color::Red)
                .count();

            if active_degree == 0 {
                // One species without active characters sinks the whole test.
                debug!("species {} has no active characters", name);
                return Vec::new();
            }

            source_min = Some(source_min.map_or(active_degree, |m| m.min(active_degree)));
        }

        if let Some(m) = source_min {
            minima.push((source, m));
        }
    }

    let Some(global_min) = minima.iter().map(|&(_, m)| m).min() else {
        return Vec::new();
    };

    let mut output = Vec::new();
    for (source, m) in minima {
        if m == global_min {
            output.push(source);
            if !accumulate {
                return output;
            }
        }
    }

    output
}
