use crate::graph::{is_active, is_inactive, Color, RbGraph};
use log::{debug, trace};
use petgraph::stable_graph::NodeIndex;
use std::fmt;

/// Whether a character is gained or lost by a realization step.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Sign {
    Gain,
    Lose,
}

/// A character name together with the direction of its realization.
///
/// The ordered list of signed characters produced by the reduction is the
/// witness that the input matrix admits a persistent phylogeny.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SignedCharacter {
    pub character: String,
    pub sign: Sign,
}

impl SignedCharacter {
    pub fn gain(character: impl Into<String>) -> SignedCharacter {
        SignedCharacter {
            character: character.into(),
            sign: Sign::Gain,
        }
    }

    pub fn lose(character: impl Into<String>) -> SignedCharacter {
        SignedCharacter {
            character: character.into(),
            sign: Sign::Lose,
        }
    }
}

impl fmt::Display for SignedCharacter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = match self.sign {
            Sign::Gain => '+',
            Sign::Lose => '-',
        };
        write!(f, "{}{}", self.character, sign)
    }
}

/// Apply the signed character `sc` to `g`.
///
/// Gaining an inactive character `c` replaces its black edges with red
/// edges to the complement of its neighborhood within its connected
/// component. Losing an active character requires it to be connected to
/// every species of its component; it is then disconnected entirely.
/// Singletons are removed after a successful mutation.
///
/// Returns the applied signed characters and a feasibility flag. Any other
/// sign/state combination, or an unknown character name, is infeasible and
/// yields `(empty, false)`.
pub fn realize_character(sc: &SignedCharacter, g: &mut RbGraph) -> (Vec<SignedCharacter>, bool) {
    let Ok(cv) = g.get_vertex(&sc.character) else {
        debug!("could not realize {}: no such character", sc);
        return (Vec::new(), false);
    };

    let c_map = g.component_map();

    if sc.sign == Sign::Gain && is_inactive(cv, g) {
        trace!("realizing {}", sc);

        let component_species: Vec<NodeIndex> = g
            .species()
            .filter(|&s| c_map.same_component(s, cv))
            .collect();

        for s in component_species {
            match g.edge_between(s, cv) {
                Some((e, _)) => g.remove_edge(e),
                None => {
                    g.insert_edge(s, cv, Color::Red);
                }
            }
        }
    } else if sc.sign == Sign::Lose && is_active(cv, g) {
        trace!("realizing {}", sc);

        // A lost character must be connected to every species of its component.
        let connected = g
            .species()
            .filter(|&s| c_map.same_component(s, cv))
            .all(|s| g.has_edge(s, cv));

        if !connected {
            debug!("could not realize {}: not connected to its whole component", sc);
            return (Vec::new(), false);
        }

        g.clear_edges(cv);
    } else {
        debug!("could not realize {}", sc);
        return (Vec::new(), false);
    }

    g.remove_singletons();

    (vec![sc.clone()], true)
}

/// Realize the signed characters of `lsc` in order.
///
/// Signed characters already emitted by this call are skipped. The
/// procedure stops at the first infeasible realization, returning that
/// step's payload and `false`.
pub fn realize(lsc: &[SignedCharacter], g: &mut RbGraph) -> (Vec<SignedCharacter>, bool) {
    let mut output = Vec::new();

    for sc in lsc {
        if output.contains(sc) {
            continue;
        }

        let (applied, feasible) = realize_character(sc, g);
        if !feasible {
            return (applied, false);
        }
        output.extend(applied);
    }

    (output, true)
}

/// Realize all inactive characters adjacent to the species `s` as gains,
/// in adjacency order.
pub fn realize_species(s: NodeIndex, g: &mut RbGraph) -> (Vec<SignedCharacter>, bool) {
    if !g.is_species(s) {
        return (Vec::new(), false);
    }

    let gains: Vec<SignedCharacter> = g
        .adjacent(s)
        .filter(|&(c, _)| is_inactive(c, g))
        .map(|(c, _)| SignedCharacter::gain(g.name(c)))
        .collect();

    realize(&gains, g)
}
