//! The Hasse diagram of inclusion among species' maximal-character sets.
//!
//! Vertices are equivalence classes of species sharing the same inactive
//! character neighborhood in the maximal reducible graph; an edge `u -> v`
//! is labeled with the signed characters gained when moving from `u`'s
//! class to `v`'s. The diagram is acyclic and transitively reduced, and
//! every edge label is a non-empty list of gains.
//!
//! A [`HasseDiagram`] keeps references to the red-black graph `g` it was
//! derived from and to the maximal reducible graph `gm` it was built over;
//! the safe-source analysis bridges between the diagram and those graphs
//! by vertex name.

mod build;

#[cfg(test)]
mod tests;

use crate::graph::{RbGraph, SignedCharacter};
use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableDiGraph};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::fmt;

/// A class of species with identical inactive-character neighborhoods.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct HasseVertex {
    /// Sorted names of the species in the class.
    pub species: Vec<String>,
    /// Names of the characters common to the class.
    pub characters: Vec<String>,
}

/// Label of a Hasse edge: the characters gained along it.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct HasseEdge {
    pub characters: Vec<SignedCharacter>,
}

/// The inclusion diagram over a maximal reducible graph.
pub struct HasseDiagram<'g> {
    graph: StableDiGraph<HasseVertex, HasseEdge>,
    g: &'g RbGraph,
    gm: &'g RbGraph,
}

impl<'g> HasseDiagram<'g> {
    /// The red-black graph this diagram was derived from.
    pub fn source_graph(&self) -> &'g RbGraph {
        self.g
    }

    /// The maximal reducible graph this diagram was built over.
    pub fn maximal_graph(&self) -> &'g RbGraph {
        self.gm
    }

    pub fn vertices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.node_indices()
    }

    pub fn num_vertices(&self) -> usize {
        self.graph.node_count()
    }

    pub fn vertex(&self, v: NodeIndex) -> &HasseVertex {
        &self.graph[v]
    }

    pub fn edge(&self, e: EdgeIndex) -> &HasseEdge {
        &self.graph[e]
    }

    pub fn edge_endpoints(&self, e: EdgeIndex) -> (NodeIndex, NodeIndex) {
        self.graph
            .edge_endpoints(e)
            .expect("edge handles handed out by this diagram stay valid")
    }

    /// Outgoing edges of `v` in insertion order.
    pub fn out_edges(&self, v: NodeIndex) -> Vec<EdgeIndex> {
        let mut edges: Vec<EdgeIndex> = self
            .graph
            .edges_directed(v, Direction::Outgoing)
            .map(|e| e.id())
            .collect();
        edges.reverse();
        edges
    }

    pub fn out_degree(&self, v: NodeIndex) -> usize {
        self.graph
            .edges_directed(v, Direction::Outgoing)
            .count()
    }

    pub fn in_degree(&self, v: NodeIndex) -> usize {
        self.graph
            .edges_directed(v, Direction::Incoming)
            .count()
    }

    /// A `[ species ( characters ) ]` rendering of a vertex, used by the
    /// interactive source menu and the logs.
    pub fn describe(&self, v: NodeIndex) -> String {
        let vertex = &self.graph[v];
        format!(
            "[ {} ( {} ) ]",
            vertex.species.join(" "),
            vertex.characters.join(" ")
        )
    }
}

impl fmt::Display for HasseDiagram<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut lines = Vec::new();
        for v in self.graph.node_indices() {
            let mut line = format!("{}:", self.describe(v));
            for e in self.out_edges(v) {
                let (_, target) = self.edge_endpoints(e);
                let labels = self.graph[e]
                    .characters
                    .iter()
                    .map(|sc| sc.to_string())
                    .collect::<Vec<_>>()
                    .join(",");
                line.push_str(&format!(" -{}-> {};", labels, self.describe(target)));
            }
            lines.push(line);
        }
        write!(f, "{}", lines.join("\n"))
    }
}
