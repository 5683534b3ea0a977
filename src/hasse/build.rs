use crate::graph::{Color, RbGraph, SignedCharacter};
use crate::hasse::{HasseDiagram, HasseEdge, HasseVertex};
use crate::numeric_suffix;
use log::{debug, trace};
use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use petgraph::visit::EdgeRef;
use petgraph::Direction;

/// Check if every string of `a` occurs in `b`.
fn is_included(a: &[String], b: &[String]) -> bool {
    a.iter().all(|s| b.contains(s))
}

/// Append `items` to `label`, skipping signed characters already present.
fn merge_label(label: &mut Vec<SignedCharacter>, items: &[SignedCharacter]) {
    for sc in items {
        if !label.contains(sc) {
            label.push(sc.clone());
        }
    }
}

impl<'g> HasseDiagram<'g> {
    /// Build the Hasse diagram of `gm`, the maximal reducible graph of `g`.
    ///
    /// Species are grouped by their inactive-character neighborhood and
    /// processed by ascending neighborhood size; classes included in a
    /// later class are connected by an edge labeled with the characters
    /// gained along it. The diagram is then transitively reduced and
    /// stripped of species that already carry red edges in `gm`.
    pub fn build(g: &'g RbGraph, gm: &'g RbGraph) -> HasseDiagram<'g> {
        let sort_key = |name: &str| (numeric_suffix(name), name.to_owned());

        // Per species, the sorted list of adjacent inactive character names.
        let mut neighborhoods: Vec<(String, Vec<String>)> = Vec::new();
        for s in gm.species() {
            let mut characters: Vec<String> = gm
                .adjacent(s)
                .filter(|&(_, color)| color == Color::Black)
                .map(|(c, _)| gm.name(c).to_owned())
                .collect();
            if characters.is_empty() {
                continue;
            }
            characters.sort_by_key(|name| sort_key(name));
            neighborhoods.push((gm.name(s).to_owned(), characters));
        }
        neighborhoods.sort_by_key(|(_, characters)| characters.len());

        let mut graph: StableDiGraph<HasseVertex, HasseEdge> = StableDiGraph::new();

        for (species_name, characters) in neighborhoods {
            if graph.node_count() == 0 {
                graph.add_node(HasseVertex {
                    species: vec![species_name],
                    characters,
                });
                continue;
            }

            // Stage the in-edges of the prospective new class; they are
            // only materialized when no existing class matches exactly.
            let mut staged: Vec<(NodeIndex, Vec<String>)> = Vec::new();
            let mut merged = false;

            for hv in graph.node_indices().collect::<Vec<_>>() {
                if graph[hv].characters == characters {
                    graph[hv].species.push(species_name.clone());
                    merged = true;
                    break;
                }

                if is_included(&graph[hv].characters, &characters) {
                    let gained: Vec<String> = characters
                        .iter()
                        .filter(|c| !graph[hv].characters.contains(*c))
                        .cloned()
                        .collect();
                    staged.push((hv, gained));
                }
            }

            if merged {
                continue;
            }

            let u = graph.add_node(HasseVertex {
                species: vec![species_name],
                characters,
            });
            for (hv, gained) in staged {
                graph.add_edge(
                    hv,
                    u,
                    HasseEdge {
                        characters: gained.into_iter().map(SignedCharacter::gain).collect(),
                    },
                );
            }
        }

        let mut hasse = HasseDiagram { graph, g, gm };

        hasse.transitive_reduction();

        for v in hasse.graph.node_indices().collect::<Vec<_>>() {
            hasse.graph[v]
                .species
                .sort_by_key(|name| sort_key(name));
        }

        hasse.reduce_diagram();

        debug!("Hasse diagram has {} classes", hasse.graph.node_count());

        hasse
    }

    /// Delete every edge shadowed by a longer path: for each internal
    /// vertex `u`, a direct edge from a predecessor of `u` to a successor
    /// of `u` is transitive and must go.
    fn transitive_reduction(&mut self) {
        for u in self.graph.node_indices().collect::<Vec<_>>() {
            let sources: Vec<NodeIndex> = self
                .graph
                .neighbors_directed(u, Direction::Incoming)
                .collect();
            let targets: Vec<NodeIndex> = self
                .graph
                .neighbors_directed(u, Direction::Outgoing)
                .collect();
            if sources.is_empty() || targets.is_empty() {
                continue;
            }

            for &s in &sources {
                for &t in &targets {
                    if let Some(e) = self.graph.find_edge(s, t) {
                        let _ = self.graph.remove_edge(e);
                    }
                }
            }
        }
    }

    /// Strip species that are incident to a red edge in `gm` from every
    /// class, and splice out the classes that become empty.
    fn reduce_diagram(&mut self) {
        let active_species: Vec<String> = self
            .gm
            .species()
            .filter(|&s| self.gm.adjacent(s).any(|(_, color)| color == Color::Red))
            .map(|s| self.gm.name(s).to_owned())
            .collect();

        if active_species.is_empty() {
            return;
        }
        trace!("active species removed from the diagram: {:?}", active_species);

        for v in self.graph.node_indices().collect::<Vec<_>>() {
            self.graph[v]
                .species
                .retain(|name| !active_species.contains(name));
        }

        let doomed: Vec<NodeIndex> = self
            .graph
            .node_indices()
            .filter(|&v| self.graph[v].species.is_empty())
            .collect();
        for v in doomed {
            self.splice_vertex(v);
        }
    }

    /// Remove `v`, bridging each of its in-edges to each of its out-edges.
    /// Labels of bridged paths are merged by signed-character identity.
    fn splice_vertex(&mut self, v: NodeIndex) {
        let in_edges: Vec<(NodeIndex, Vec<SignedCharacter>)> = self
            .graph
            .edges_directed(v, Direction::Incoming)
            .map(|e| (e.source(), e.weight().characters.clone()))
            .collect();
        let out_edges: Vec<(NodeIndex, Vec<SignedCharacter>)> = self
            .graph
            .edges_directed(v, Direction::Outgoing)
            .map(|e| (e.target(), e.weight().characters.clone()))
            .collect();

        for (s, in_label) in &in_edges {
            for (t, out_label) in &out_edges {
                let mut bridged = Vec::new();
                merge_label(&mut bridged, in_label);
                merge_label(&mut bridged, out_label);

                match self.graph.find_edge(*s, *t) {
                    Some(e) => merge_label(&mut self.graph[e].characters, &bridged),
                    None => {
                        self.graph.add_edge(*s, *t, HasseEdge { characters: bridged });
                    }
                }
            }
        }

        let _ = self.graph.remove_node(v);
    }

    #[cfg(test)]
    pub(crate) fn graph_mut(
        &mut self,
    ) -> &mut StableDiGraph<HasseVertex, HasseEdge> {
        &mut self.graph
    }
}
