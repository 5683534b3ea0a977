use crate::graph::{has_red_sigmagraph, is_active, realize, Color, SignedCharacter};
use crate::hasse::HasseDiagram;
use crate::source::realize_source;
use log::{debug, trace};
use petgraph::stable_graph::{EdgeIndex, NodeIndex};
use std::collections::HashMap;

/// Continuation decision of the safe-source walk.
///
/// One safe source is enough unless the caller accumulates; `Stop` ends
/// the walk early in that case.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub(crate) enum Flow {
    Continue,
    Stop,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum Visit {
    White,
    Gray,
    Black,
}

/// Depth-first walk over the Hasse diagram collecting safe sources.
///
/// The walk tracks a *chain*: the edges examined since the current root.
/// A chain closes on a forward/cross edge leading down to a sink, or when
/// the most recently discovered leaf finishes. A closed chain is tested:
/// its combined gains must be realizable on a copy of the maximal
/// reducible graph without creating a red Σ-graph, the root itself must be
/// realizable, and the root must contain a species free of red edges.
pub(crate) struct SourceSearch<'h, 'g> {
    hasse: &'h HasseDiagram<'g>,
    accumulate: bool,
    chain: Vec<EdgeIndex>,
    source_v: NodeIndex,
    last_v: NodeIndex,
    color: HashMap<NodeIndex, Visit>,
    safe_sources: Vec<NodeIndex>,
    sources: Vec<NodeIndex>,
}

impl<'h, 'g> SourceSearch<'h, 'g> {
    /// Run the walk; returns the safe sources and the chain-safe but
    /// unconfirmed sources, in discovery order.
    pub(crate) fn run(
        hasse: &'h HasseDiagram<'g>,
        accumulate: bool,
    ) -> (Vec<NodeIndex>, Vec<NodeIndex>) {
        let mut search = SourceSearch {
            hasse,
            accumulate,
            chain: Vec::new(),
            source_v: NodeIndex::end(),
            last_v: NodeIndex::end(),
            color: HashMap::new(),
            safe_sources: Vec::new(),
            sources: Vec::new(),
        };

        for root in hasse.vertices() {
            if search.visit_state(root) != Visit::White {
                continue;
            }
            trace!("start chain at {}", hasse.describe(root));
            search.source_v = root;
            search.chain.clear();
            if search.visit(root) == Flow::Stop {
                break;
            }
        }

        (search.safe_sources, search.sources)
    }

    fn visit_state(&self, v: NodeIndex) -> Visit {
        self.color.get(&v).copied().unwrap_or(Visit::White)
    }

    fn visit(&mut self, v: NodeIndex) -> Flow {
        self.color.insert(v, Visit::Gray);
        self.last_v = v;
        trace!("discover {}", self.hasse.describe(v));

        for e in self.hasse.out_edges(v) {
            let (_, target) = self.hasse.edge_endpoints(e);
            self.chain.push(e);

            match self.visit_state(target) {
                Visit::White => {
                    if self.visit(target) == Flow::Stop {
                        return Flow::Stop;
                    }
                }
                // The diagram is acyclic, so a gray target cannot occur.
                Visit::Gray => {}
                Visit::Black => {
                    if self.forward_or_cross(target) == Flow::Stop {
                        return Flow::Stop;
                    }
                }
            }
        }

        self.color.insert(v, Visit::Black);
        self.finish(v)
    }

    /// A forward or cross edge may close a chain when its target runs into
    /// a sink through out-degree-one vertices; the edges of that run are
    /// appended to the chain before the test.
    fn forward_or_cross(&mut self, target: NodeIndex) -> Flow {
        if self.hasse.out_degree(target) > 1 {
            return Flow::Continue;
        }

        let mut sink = target;
        while self.hasse.out_degree(sink) == 1 {
            let e = self.hasse.out_edges(sink)[0];
            self.chain.push(e);
            sink = self.hasse.edge_endpoints(e).1;
        }

        self.perform_test(sink)
    }

    /// Finishing the most recently discovered leaf closes the chain at
    /// that leaf; finishing any other vertex means the walk is
    /// backtracking.
    fn finish(&mut self, v: NodeIndex) -> Flow {
        if self.hasse.out_degree(v) > 0 || self.last_v != v {
            return Flow::Continue;
        }
        let in_chain = self
            .chain
            .iter()
            .any(|&e| self.hasse.edge_endpoints(e).0 == v);
        if in_chain {
            return Flow::Continue;
        }

        self.perform_test(v)
    }

    fn perform_test(&mut self, sink: NodeIndex) -> Flow {
        // A chain whose source was already decided brings nothing new.
        if self.safe_sources.last() == Some(&self.source_v)
            || self.sources.last() == Some(&self.source_v)
        {
            trace!("chain closed, but its source has already been processed");
            return Flow::Continue;
        }

        if !self.is_safe_chain(sink) {
            return Flow::Continue;
        }

        if !realize_source(self.source_v, self.hasse) {
            return Flow::Continue;
        }

        if self.has_red_free_species() {
            debug!("safe source {}", self.hasse.describe(self.source_v));
            self.safe_sources.push(self.source_v);
            return if self.accumulate {
                Flow::Continue
            } else {
                Flow::Stop
            };
        }

        // Candidates are only worth keeping while no safe source exists;
        // the fall-through tests never run otherwise.
        if !self.safe_sources.is_empty() {
            return Flow::Continue;
        }

        debug!("chain-safe source {}", self.hasse.describe(self.source_v));
        self.sources.push(self.source_v);
        Flow::Continue
    }

    /// Test the chain from `source_v` down to `sink` by realizing its
    /// combined gains on a copy of the maximal reducible graph.
    fn is_safe_chain(&self, sink: NodeIndex) -> bool {
        let gm = self.hasse.maximal_graph();

        if self.chain.is_empty() {
            trace!("empty chain");
            return true;
        }

        // Effective signed-character list: the source's own gains, then
        // the chain labels in order. A label re-occurrence supersedes its
        // earlier position. Edges left over from other chains are
        // recognized by characters outside the sink's class.
        let mut lsc: Vec<SignedCharacter> = self
            .hasse
            .vertex(self.source_v)
            .characters
            .iter()
            .map(SignedCharacter::gain)
            .collect();

        let sink_characters = &self.hasse.vertex(sink).characters;
        for &e in &self.chain {
            for sc in &self.hasse.edge(e).characters {
                if !sink_characters.contains(&sc.character) {
                    break;
                }
                if let Some(position) = lsc.iter().position(|other| other == sc) {
                    lsc.remove(position);
                }
                lsc.push(sc.clone());
            }
        }

        // Characters already active in gm have been realized before.
        lsc.retain(|sc| match gm.get_vertex(&sc.character) {
            Ok(c) => !is_active(c, gm),
            Err(_) => true,
        });

        trace!(
            "test chain < {} > on a copy of Gm",
            lsc.iter()
                .map(|sc| sc.to_string())
                .collect::<Vec<_>>()
                .join(" ")
        );

        let mut copy = gm.clone();
        let (_, feasible) = realize(&lsc, &mut copy);
        if !feasible {
            trace!("chain realization not feasible");
            return false;
        }

        !has_red_sigmagraph(&copy)
    }

    /// The source must contain a species that carries no red edge in the
    /// maximal reducible graph.
    fn has_red_free_species(&self) -> bool {
        let gm = self.hasse.maximal_graph();

        for name in &self.hasse.vertex(self.source_v).species {
            let Ok(s) = gm.get_vertex(name) else {
                continue;
            };
            if gm.adjacent(s).all(|(_, color)| color != Color::Red) {
                trace!("red-free source species {}", name);
                return true;
            }
        }

        false
    }
}
