use crate::domain::graph::{Graph, SccResult};
use std::collections::HashSet;

/// Collapses each component of `scc` into one node.
///
/// Returns adjacency indexed by component id with exactly
/// `scc.component_count` entries. Intra-component edges are dropped and
/// parallel inter-component edges are kept once, in first-seen order.
pub fn build_condensation(graph: &Graph, scc: &SccResult) -> Vec<Vec<usize>> {
    let mut cond: Vec<Vec<usize>> = vec![Vec::new(); scc.component_count];
    let mut seen: HashSet<(usize, usize)> = HashSet::new();

    for &(u, v) in graph.edges() {
        let cu = scc.component_ids[u];
        let cv = scc.component_ids[v];
        if cu == cv {
            continue;
        }
        if seen.insert((cu, cv)) {
            cond[cu].push(cv);
        }
    }

    cond
}
