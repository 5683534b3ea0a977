//! The recursive reduction driver.
//!
//! [`reduce`] empties a red-black graph by realizing characters: free and
//! universal characters go first, disconnected graphs are reduced per
//! component, and everything else is driven by the safe-source analysis
//! over the Hasse diagram of the maximal reducible graph. The emitted
//! signed characters form the requested persistent-phylogeny witness.
//!
//! Source selection is steered by an explicit [`SourcePolicy`] carried in
//! a [`ReductionConfig`]; the policies only affect branching and never the
//! graph state.


use crate::graph::{
    is_free, is_universal, maximal_reducible_graph, realize, realize_character, RbGraph, Sign,
    SignedCharacter,
};
use crate::hasse::HasseDiagram;
use crate::source::initial_states;
use log::{debug, info};
use petgraph::stable_graph::NodeIndex;
use std::io::BufRead;
use thiserror::Error;

/// How the driver picks among the safe sources of one reduction step.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SourcePolicy {
    /// Take the first safe source the analysis finds.
    #[default]
    FirstFound,
    /// Take the n-th safe source, clamped to the last available one.
    Nth(usize),
    /// Ask on stdin which safe source to realize when several exist.
    Interactive,
    /// Try every safe source on a copy of the graph and keep the first
    /// complete reduction.
    Exhaustive,
}

impl SourcePolicy {
    /// Whether the safe-source analysis should keep collecting candidates
    /// after the first hit.
    pub(crate) fn accumulates(&self) -> bool {
        match self {
            SourcePolicy::FirstFound => false,
            SourcePolicy::Nth(n) => *n > 0,
            SourcePolicy::Interactive | SourcePolicy::Exhaustive => true,
        }
    }
}

/// Configuration of a reduction run.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct ReductionConfig {
    /// The safe-source selection policy.
    pub policy: SourcePolicy,
}

impl ReductionConfig {
    pub fn new() -> ReductionConfig {
        ReductionConfig::default()
    }

    pub fn policy(mut self, policy: SourcePolicy) -> ReductionConfig {
        self.policy = policy;
        self
    }
}

impl From<SourcePolicy> for ReductionConfig {
    fn from(policy: SourcePolicy) -> ReductionConfig {
        ReductionConfig { policy }
    }
}

/// No sequence of realizations empties the graph under the current policy.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Error)]
#[error("the graph admits no reduction under the current policy")]
pub struct NoReduction;

/// Reduce `g` to the empty graph, returning the realization sequence.
///
/// The graph is mutated in place; on [`NoReduction`] it is left in the
/// state of the failing step.
pub fn reduce(g: &mut RbGraph, config: &ReductionConfig) -> Result<Vec<SignedCharacter>, NoReduction> {
    g.remove_singletons();

    if g.is_empty() {
        debug!("G is empty");
        return Ok(Vec::new());
    }

    debug!(
        "working on G with {} species and {} characters",
        g.num_species(),
        g.num_characters()
    );

    // Free characters are lost first, universal characters gained next;
    // either shortcut restarts the reduction on the mutated graph.
    let free_name = g.characters().find(|&c| is_free(c, g)).map(|c| g.name(c).to_owned());
    if let Some(name) = free_name {
        info!("free character {}", name);
        let (mut output, _) = realize_character(&SignedCharacter::lose(name), g);
        output.extend(reduce(g, config)?);
        return Ok(output);
    }

    let universal_name = g.characters().find(|&c| is_universal(c, g)).map(|c| g.name(c).to_owned());
    if let Some(name) = universal_name {
        info!("universal character {}", name);
        let (mut output, _) = realize_character(&SignedCharacter::gain(name), g);
        output.extend(reduce(g, config)?);
        return Ok(output);
    }

    if let Some(components) = g.connected_components() {
        debug!("G splits into {} components", components.len());
        let mut output = Vec::new();
        for mut component in components {
            output.extend(reduce(&mut component, config)?);
        }
        return Ok(output);
    }

    let gm = maximal_reducible_graph(g, true);
    debug!("maximal reducible graph Gm:\n{}", gm);

    let hasse = HasseDiagram::build(g, &gm);
    debug!("Hasse diagram of Gm:\n{}", hasse);

    let sources = initial_states(&hasse, &config.policy);
    if sources.is_empty() {
        return Err(NoReduction);
    }

    if config.policy == SourcePolicy::Exhaustive {
        return reduce_exhaustively(g, config, &hasse, &sources);
    }

    let source = match &config.policy {
        SourcePolicy::Interactive if sources.len() > 1 => prompt_for_source(&hasse, &sources),
        SourcePolicy::Nth(n) if sources.len() > 1 && *n > 0 => {
            let source = sources[(*n).min(sources.len() - 1)];
            info!("source {} selected", hasse.describe(source));
            source
        }
        _ => sources[0],
    };

    let gains = source_gains(&hasse, source);
    info!(
        "realize < {} >",
        gains
            .iter()
            .map(|sc| sc.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    );

    let (mut output, _) = realize(&gains, g);
    output.extend(reduce(g, config)?);
    Ok(output)
}

/// Try each safe source on a copy of `g` and keep the first sequence that
/// completes; fail when every branch dead-ends.
fn reduce_exhaustively(
    g: &RbGraph,
    config: &ReductionConfig,
    hasse: &HasseDiagram<'_>,
    sources: &[NodeIndex],
) -> Result<Vec<SignedCharacter>, NoReduction> {
    let mut outcomes: Vec<Vec<SignedCharacter>> = Vec::new();

    for &source in sources {
        info!("trying safe source {}", hasse.describe(source));

        let mut attempt = g.clone();
        let gains = source_gains(hasse, source);
        let (mut applied, _) = realize(&gains, &mut attempt);

        match reduce(&mut attempt, config) {
            Ok(rest) => {
                info!("safe source {} succeeded", hasse.describe(source));
                applied.extend(rest);
                outcomes.push(applied);
            }
            Err(NoReduction) => {
                info!("safe source {} dead-ended", hasse.describe(source));
            }
        }
    }

    if outcomes.is_empty() {
        return Err(NoReduction);
    }

    for outcome in &outcomes {
        let shape = if is_partial(outcome) { "partial" } else { "complete" };
        info!(
            "{} reduction: < {} >",
            shape,
            outcome
                .iter()
                .map(|sc| sc.to_string())
                .collect::<Vec<_>>()
                .join(" ")
        );
    }

    Ok(outcomes.swap_remove(0))
}

/// The gains realized when a safe source is selected.
fn source_gains(hasse: &HasseDiagram<'_>, source: NodeIndex) -> Vec<SignedCharacter> {
    hasse
        .vertex(source)
        .characters
        .iter()
        .map(SignedCharacter::gain)
        .collect()
}

/// Print the source menu and read a 0-based index from stdin, re-prompting
/// on invalid input. End of input falls back to the first source.
fn prompt_for_source(hasse: &HasseDiagram<'_>, sources: &[NodeIndex]) -> NodeIndex {
    println!("List of available source indexes to choose from:");
    for (index, &source) in sources.iter().enumerate() {
        println!("  - {}: {}", index, hasse.describe(source));
    }

    let stdin = std::io::stdin();
    let mut input = String::new();

    loop {
        println!("Choose a source:");
        input.clear();

        match stdin.lock().read_line(&mut input) {
            Ok(0) | Err(_) => {
                info!("no input; falling back to the first source");
                return sources[0];
            }
            Ok(_) => {}
        }

        if let Ok(choice) = input.trim().parse::<usize>() {
            if choice < sources.len() {
                let source = sources[choice];
                println!("Source {} selected", hasse.describe(source));
                return source;
            }
        }

        println!("Error: invalid input.");
    }
}

/// A reduction is partial when it loses a character it never gained.
pub fn is_partial(reduction: &[SignedCharacter]) -> bool {
    let mut gained: Vec<&str> = Vec::new();

    for sc in reduction {
        match sc.sign {
            Sign::Gain => gained.push(&sc.character),
            Sign::Lose => {
                if !gained.iter().any(|name| *name == sc.character) {
                    return true;
                }
            }
        }
    }

    false
}
