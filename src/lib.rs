//! Persistent-phylogeny reconstruction through red-black graph reduction.
//!
//! The engine reduces a red-black graph, the bipartite encoding of a
//! species-character matrix, to the empty graph by a sequence of
//! character realizations, whenever such a reduction exists. The emitted
//! sequence of signed characters is a witness that the input matrix admits
//! a persistent phylogeny; reconstruction of the tree itself is out of
//! scope.
//!
//! The crate follows the layers of the algorithm: [`graph`] holds the
//! red-black graph with its predicates and the realize operator, [`hasse`]
//! derives the inclusion diagram of the maximal species classes, [`source`]
//! selects safe sources on that diagram, and [`reduction`] drives the
//! recursive reduction.

pub mod graph;
pub mod hasse;
pub mod reduction;
pub mod source;

#[cfg(test)]
mod test_utils;

/// Extract the numeric suffix of a vertex name (`s12` -> `12`).
///
/// Names without a digit sort after all numbered ones; ties are broken by
/// the full name at the call sites.
pub(crate) fn numeric_suffix(name: &str) -> u64 {
    let digits = name.trim_start_matches(|c: char| !c.is_ascii_digit());
    digits.parse().unwrap_or(u64::MAX)
}
