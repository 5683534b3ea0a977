//! The red-black graph and its operators.
//!
//! A red-black graph is an undirected bipartite graph over *species* and
//! *character* vertices whose edges carry a color. Black edges record the
//! original species-character incidences of the input matrix; red edges
//! mark characters that have been *realized* (gained) for the species they
//! still separate.
//!
//! The module is split along the layers of the reduction engine:
//!
//! - [`RbGraph`] is the graph bundle itself: vertex storage with stable
//!   handles, a name index, species/character counters, copying and
//!   connected-component extraction.
//! - The predicate layer ([`is_active`], [`is_free`], [`is_universal`],
//!   [`has_red_sigmagraph`]) reads the coloring invariants.
//! - [`realize_character`] advances the graph by one signed character
//!   while maintaining those invariants.
//! - [`maximal_reducible_graph`] projects the graph onto its maximal
//!   characters.
//! - [`read_graph`] loads the initial graph from a species-character
//!   matrix file.

mod matrix;
mod maximal;
mod predicates;
mod rb_graph;
mod realize;
mod species;

#[cfg(test)]
mod tests;

pub use matrix::{parse_graph, read_graph, MatrixError};
pub use maximal::{maximal_characters, maximal_reducible_graph};
pub use predicates::{
    active_characters, component_active_characters, component_active_characters_in,
    has_red_sigmagraph, is_active, is_free, is_free_in, is_inactive, is_universal,
    is_universal_in, species_active_characters,
};
#[cfg(test)]
pub(crate) use predicates::has_red_sigmapath;
pub use rb_graph::{Color, ComponentMap, GraphError, Kind, RbGraph, Vertex};
pub use realize::{realize, realize_character, realize_species, Sign, SignedCharacter};
pub use species::{
    active_species, includes_species, is_quasi_active, minimal_potentially_active_species,
    order_by_degree, species_inactive_characters,
};
