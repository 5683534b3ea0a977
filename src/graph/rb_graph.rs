use crate::numeric_suffix;
use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableUnGraph};
use petgraph::visit::EdgeRef;
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// Color of a red-black graph edge.
///
/// A character incident only on black edges is *inactive*; a character
/// incident only on red edges is *active*.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Color {
    Black,
    Red,
}

/// The two vertex kinds of the bipartite red-black graph.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Kind {
    Species,
    Character,
}

/// Payload of a red-black graph vertex.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Vertex {
    pub name: String,
    pub kind: Kind,
}

/// Errors raised by structural graph operations.
///
/// These indicate programmer or input errors; infeasibility of a
/// realization is a value, not an error (see [`crate::graph::realize`]).
#[derive(Clone, PartialEq, Eq, Debug, Error)]
pub enum GraphError {
    #[error("vertex named `{0}` already exists")]
    DuplicateVertex(String),
    #[error("no vertex named `{0}` in the graph")]
    MissingVertex(String),
    #[error("vertex #{0} is not in the graph")]
    UnknownVertex(usize),
}

/// An undirected bipartite graph over species and character vertices with
/// colored edges, plus a name index and per-kind vertex counters.
///
/// Vertices are addressed by stable handles ([`NodeIndex`]) that survive
/// unrelated removals; names are the only identity that survives copying,
/// so every cross-graph step resolves vertices through [`RbGraph::get_vertex`].
#[derive(Clone, Default)]
pub struct RbGraph {
    graph: StableUnGraph<Vertex, Color>,
    vertex_map: HashMap<String, NodeIndex>,
    num_species: usize,
    num_characters: usize,
}

/// Assignment of every vertex to its connected component.
pub struct ComponentMap {
    assignments: HashMap<NodeIndex, usize>,
    count: usize,
}

impl ComponentMap {
    /// The number of connected components.
    pub fn count(&self) -> usize {
        self.count
    }

    /// The component index of `v`. Panics when `v` is not a vertex of the
    /// graph this map was built from.
    pub fn component(&self, v: NodeIndex) -> usize {
        self.assignments[&v]
    }

    pub fn same_component(&self, u: NodeIndex, v: NodeIndex) -> bool {
        self.assignments[&u] == self.assignments[&v]
    }
}

impl RbGraph {
    pub fn new() -> RbGraph {
        RbGraph::default()
    }

    /// Add a species vertex named `name`.
    ///
    /// Fails when a vertex with this name already exists.
    pub fn add_species(&mut self, name: &str) -> Result<NodeIndex, GraphError> {
        self.add_vertex(name, Kind::Species)
    }

    /// Add a character vertex named `name`.
    ///
    /// Fails when a vertex with this name already exists.
    pub fn add_character(&mut self, name: &str) -> Result<NodeIndex, GraphError> {
        self.add_vertex(name, Kind::Character)
    }

    fn add_vertex(&mut self, name: &str, kind: Kind) -> Result<NodeIndex, GraphError> {
        if self.vertex_map.contains_key(name) {
            return Err(GraphError::DuplicateVertex(name.to_owned()));
        }
        Ok(self.insert_vertex(name, kind))
    }

    /// Insert a vertex that is known not to collide with an existing name.
    ///
    /// Used on copy paths where names come from another `RbGraph` and are
    /// unique by construction.
    pub(crate) fn insert_vertex(&mut self, name: &str, kind: Kind) -> NodeIndex {
        let v = self.graph.add_node(Vertex {
            name: name.to_owned(),
            kind,
        });
        self.vertex_map.insert(name.to_owned(), v);
        match kind {
            Kind::Species => self.num_species += 1,
            Kind::Character => self.num_characters += 1,
        }
        v
    }

    /// Remove `v` together with all its incident edges.
    ///
    /// Fails when `v` is not a vertex of this graph.
    pub fn remove_vertex(&mut self, v: NodeIndex) -> Result<(), GraphError> {
        if !self.graph.contains_node(v) {
            return Err(GraphError::UnknownVertex(v.index()));
        }
        self.drop_vertex(v);
        Ok(())
    }

    /// Remove the vertex named `name`; fails when no such vertex exists.
    pub fn remove_vertex_by_name(&mut self, name: &str) -> Result<(), GraphError> {
        let v = self.get_vertex(name)?;
        self.drop_vertex(v);
        Ok(())
    }

    /// Removal of a handle that is known to be live.
    pub(crate) fn drop_vertex(&mut self, v: NodeIndex) {
        let Some(data) = self.graph.remove_node(v) else {
            debug_assert!(false, "drop_vertex on a stale handle");
            return;
        };
        self.vertex_map.remove(&data.name);
        match data.kind {
            Kind::Species => self.num_species -= 1,
            Kind::Character => self.num_characters -= 1,
        }
    }

    /// Add an edge between `u` and `v` with the given color.
    ///
    /// When the edge already exists it is returned with a `false` flag and
    /// its color is left untouched. Fails when either endpoint is absent.
    pub fn add_edge(
        &mut self,
        u: NodeIndex,
        v: NodeIndex,
        color: Color,
    ) -> Result<(EdgeIndex, bool), GraphError> {
        for endpoint in [u, v] {
            if !self.graph.contains_node(endpoint) {
                return Err(GraphError::UnknownVertex(endpoint.index()));
            }
        }
        if let Some(e) = self.graph.find_edge(u, v) {
            return Ok((e, false));
        }
        Ok((self.graph.add_edge(u, v, color), true))
    }

    /// Edge insertion between handles that are known to be live and
    /// not yet connected.
    pub(crate) fn insert_edge(&mut self, u: NodeIndex, v: NodeIndex, color: Color) -> EdgeIndex {
        self.graph.add_edge(u, v, color)
    }

    /// Resolve a vertex by name in O(1); fails when absent.
    pub fn get_vertex(&self, name: &str) -> Result<NodeIndex, GraphError> {
        self.vertex_map
            .get(name)
            .copied()
            .ok_or_else(|| GraphError::MissingVertex(name.to_owned()))
    }

    pub fn contains_vertex(&self, name: &str) -> bool {
        self.vertex_map.contains_key(name)
    }

    /// The name of vertex `v`.
    pub fn name(&self, v: NodeIndex) -> &str {
        &self.graph[v].name
    }

    pub fn kind(&self, v: NodeIndex) -> Kind {
        self.graph[v].kind
    }

    pub fn is_species(&self, v: NodeIndex) -> bool {
        self.graph[v].kind == Kind::Species
    }

    pub fn is_character(&self, v: NodeIndex) -> bool {
        self.graph[v].kind == Kind::Character
    }

    pub fn num_species(&self) -> usize {
        self.num_species
    }

    pub fn num_characters(&self) -> usize {
        self.num_characters
    }

    pub fn num_vertices(&self) -> usize {
        self.graph.node_count()
    }

    /// A red-black graph is empty when it has no vertices.
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn vertices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.node_indices()
    }

    pub fn species(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph
            .node_indices()
            .filter(|&v| self.graph[v].kind == Kind::Species)
    }

    pub fn characters(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph
            .node_indices()
            .filter(|&v| self.graph[v].kind == Kind::Character)
    }

    /// The neighbors of `v` together with the color of the connecting
    /// edge, in edge insertion order.
    pub fn adjacent(&self, v: NodeIndex) -> impl Iterator<Item = (NodeIndex, Color)> + '_ {
        let mut edges: Vec<(NodeIndex, Color)> = self
            .graph
            .edges(v)
            .map(|e| {
                let other = if e.source() == v {
                    e.target()
                } else {
                    e.source()
                };
                (other, *e.weight())
            })
            .collect();
        edges.reverse();
        edges.into_iter()
    }

    pub fn degree(&self, v: NodeIndex) -> usize {
        self.graph.edges(v).count()
    }

    /// The edge between `u` and `v` with its color, when present.
    pub fn edge_between(&self, u: NodeIndex, v: NodeIndex) -> Option<(EdgeIndex, Color)> {
        self.graph.find_edge(u, v).map(|e| (e, self.graph[e]))
    }

    pub fn has_edge(&self, u: NodeIndex, v: NodeIndex) -> bool {
        self.graph.find_edge(u, v).is_some()
    }

    pub fn edge_color(&self, e: EdgeIndex) -> Color {
        self.graph[e]
    }

    pub fn remove_edge(&mut self, e: EdgeIndex) {
        let _ = self.graph.remove_edge(e);
    }

    /// Remove every edge incident on `v`, leaving the vertex in place.
    pub fn clear_edges(&mut self, v: NodeIndex) {
        let incident: Vec<EdgeIndex> = self.graph.edges(v).map(|e| e.id()).collect();
        for e in incident {
            let _ = self.graph.remove_edge(e);
        }
    }

    /// Flip the color of every edge incident on `v`.
    ///
    /// Used by the matrix reader to mark pre-active characters.
    pub fn invert_edge_colors(&mut self, v: NodeIndex) {
        let incident: Vec<EdgeIndex> = self.graph.edges(v).map(|e| e.id()).collect();
        for e in incident {
            let color = &mut self.graph[e];
            *color = match *color {
                Color::Black => Color::Red,
                Color::Red => Color::Black,
            };
        }
    }

    /// Remove every vertex of degree zero.
    pub fn remove_singletons(&mut self) {
        let singletons: Vec<NodeIndex> = self
            .graph
            .node_indices()
            .filter(|&v| self.graph.neighbors(v).next().is_none())
            .collect();
        for v in singletons {
            self.drop_vertex(v);
        }
    }

    /// Label every vertex with its connected component.
    pub fn component_map(&self) -> ComponentMap {
        let mut assignments = HashMap::new();
        let mut count = 0;
        for v in self.graph.node_indices() {
            if assignments.contains_key(&v) {
                continue;
            }
            assignments.insert(v, count);
            let mut stack = vec![v];
            while let Some(u) = stack.pop() {
                for w in self.graph.neighbors(u) {
                    if !assignments.contains_key(&w) {
                        assignments.insert(w, count);
                        stack.push(w);
                    }
                }
            }
            count += 1;
        }
        ComponentMap { assignments, count }
    }

    /// Split the graph into its connected components.
    ///
    /// Returns `None` when the graph is connected: the caller keeps working
    /// on the graph it already has instead of paying for a full copy. When
    /// disconnected, each entry is an owned copy of one component.
    pub fn connected_components(&self) -> Option<Vec<RbGraph>> {
        self.split_components(&self.component_map())
    }

    /// [`RbGraph::connected_components`] with a precomputed component map.
    pub fn split_components(&self, map: &ComponentMap) -> Option<Vec<RbGraph>> {
        if map.count() <= 1 {
            return None;
        }

        let mut parts: Vec<RbGraph> = (0..map.count()).map(|_| RbGraph::new()).collect();
        let mut images: HashMap<NodeIndex, NodeIndex> = HashMap::new();

        for v in self.vertices() {
            let data = &self.graph[v];
            let image = parts[map.component(v)].insert_vertex(&data.name, data.kind);
            images.insert(v, image);
        }

        // Copy edges from the species side only, so each edge is visited once.
        for s in self.species() {
            let part = map.component(s);
            for e in self.graph.edges(s) {
                let t = if e.source() == s {
                    e.target()
                } else {
                    e.source()
                };
                parts[part].insert_edge(images[&s], images[&t], *e.weight());
            }
        }

        Some(parts)
    }
}

impl fmt::Display for RbGraph {
    /// Deterministic adjacency-list rendering: species before characters,
    /// both sorted by the numeric suffix of the name, adjacency likewise.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sort_key = |name: &str| (numeric_suffix(name), name.to_owned());

        let mut lines = Vec::new();
        for kind in [Kind::Species, Kind::Character] {
            let mut vertices: Vec<NodeIndex> = self
                .vertices()
                .filter(|&v| self.graph[v].kind == kind)
                .collect();
            vertices.sort_by_key(|&v| sort_key(self.name(v)));

            for v in vertices {
                let mut edges: Vec<(NodeIndex, Color)> = self.adjacent(v).collect();
                edges.sort_by_key(|&(t, _)| sort_key(self.name(t)));

                let mut line = format!("{}:", self.name(v));
                for (t, color) in edges {
                    let mark = if color == Color::Red { "r" } else { "-" };
                    line.push_str(&format!(" -{}- {};", mark, self.name(t)));
                }
                lines.push(line);
            }
        }

        write!(f, "{}", lines.join("\n"))
    }
}

impl fmt::Debug for RbGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RbGraph {{ species: {}, characters: {} }}",
            self.num_species, self.num_characters
        )
    }
}
