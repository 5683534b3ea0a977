use crate::graph::RbGraph;
use log::info;
use petgraph::stable_graph::NodeIndex;
use std::path::Path;
use thiserror::Error;

/// Errors raised while reading a species-character matrix file.
#[derive(Debug, Error)]
pub enum MatrixError {
    #[error("failed to read matrix file `{path}`: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("matrix file is empty")]
    Empty,
    #[error("malformed header: expected `<species> <characters> [pre-active…]`")]
    Header,
    #[error("pre-active character index {index} is out of range ({characters} characters)")]
    ActiveOutOfRange { index: usize, characters: usize },
    #[error("unexpected value `{0}` in matrix body")]
    UnexpectedValue(char),
    #[error("oversized matrix: expected {expected} cells")]
    Oversized { expected: usize },
    #[error("undersized matrix: expected {expected} cells, found {found}")]
    Undersized { expected: usize, found: usize },
}

/// Read a red-black graph from the matrix file at `path`.
///
/// See [`parse_graph`] for the format.
pub fn read_graph(path: impl AsRef<Path>) -> Result<RbGraph, MatrixError> {
    let path = path.as_ref();
    let input = std::fs::read_to_string(path).map_err(|source| MatrixError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_graph(&input)
}

/// Parse a red-black graph from matrix text.
///
/// The first line holds the species count, the character count and an
/// optional list of pre-active character indices. The remaining lines hold
/// a row-major 0/1 matrix with `num_species × num_characters` cells; a `1`
/// at row `s`, column `c` connects species `s{s}` to character `c{c}` by a
/// black edge. Pre-active characters have their edges recolored red once
/// the matrix is loaded.
pub fn parse_graph(input: &str) -> Result<RbGraph, MatrixError> {
    let mut lines = input.lines();
    let header = lines.next().ok_or(MatrixError::Empty)?;

    let mut fields = header.split_whitespace();
    let num_species: usize = fields
        .next()
        .and_then(|t| t.parse().ok())
        .ok_or(MatrixError::Header)?;
    let num_characters: usize = fields
        .next()
        .and_then(|t| t.parse().ok())
        .ok_or(MatrixError::Header)?;

    if num_species == 0 || num_characters == 0 {
        return Err(MatrixError::Header);
    }

    let mut pre_active = Vec::new();
    for field in fields {
        let index: usize = field.parse().map_err(|_| MatrixError::Header)?;
        if index >= num_characters {
            return Err(MatrixError::ActiveOutOfRange {
                index,
                characters: num_characters,
            });
        }
        pre_active.push(index);
    }

    let mut g = RbGraph::new();
    let species: Vec<NodeIndex> = (0..num_species)
        .map(|j| g.insert_vertex(&format!("s{}", j), crate::graph::Kind::Species))
        .collect();
    let characters: Vec<NodeIndex> = (0..num_characters)
        .map(|j| g.insert_vertex(&format!("c{}", j), crate::graph::Kind::Character))
        .collect();

    let expected = num_species * num_characters;
    let mut index = 0;
    for value in lines.flat_map(|line| line.chars()) {
        if value.is_whitespace() {
            continue;
        }
        if index >= expected {
            return Err(MatrixError::Oversized { expected });
        }
        match value {
            '1' => {
                let s = species[index / num_characters];
                let c = characters[index % num_characters];
                g.insert_edge(s, c, crate::graph::Color::Black);
            }
            '0' => {}
            other => return Err(MatrixError::UnexpectedValue(other)),
        }
        index += 1;
    }

    if index != expected {
        return Err(MatrixError::Undersized {
            expected,
            found: index,
        });
    }

    for index in pre_active {
        g.invert_edge_colors(characters[index]);
    }

    info!(
        "loaded matrix with {} species and {} characters",
        num_species, num_characters
    );

    Ok(g)
}
