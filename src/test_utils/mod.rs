use crate::graph::{parse_graph, RbGraph};

/// Initialize env_logger for tests. Safe to call multiple times.
pub fn init_logger() {
    let _ = env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Trace)
        .is_test(true)
        .try_init();
}

/// Build a red-black graph from an inline matrix literal.
///
/// # Example
///
/// `graph_from_matrix("2 2\n1 0\n1 1")` builds two species where `s1`
/// carries both characters.
pub fn graph_from_matrix(input: &str) -> RbGraph {
    parse_graph(input).expect("test matrix must parse")
}
