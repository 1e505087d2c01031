use crate::domain::graph::{Graph, SccResult};
use crate::domain::traits::SccDetector;
use crate::infrastructure::dfs_topo_sort::iterative_finish_order;

pub struct KosarajuSccDetector;

impl SccDetector for KosarajuSccDetector {
    fn compute_scc(&self, graph: &Graph) -> SccResult {
        kosaraju_scc(graph)
    }
}

fn kosaraju_scc(graph: &Graph) -> SccResult {
    let n = graph.node_count();

    let mut order: Vec<usize> = Vec::with_capacity(n);
    let mut seen = vec![false; n];

    for start in 0..n {
        if seen[start] {
            continue;
        }
        iterative_finish_order(start, graph.adjacency(), &mut seen, &mut order);
    }

    let rev = graph.reversed();

    let mut component_ids = vec![usize::MAX; n];
    let mut component_count = 0;

    for &v in order.iter().rev() {
        if component_ids[v] != usize::MAX {
            continue;
        }

        let mut stack = vec![v];
        component_ids[v] = component_count;

        while let Some(x) = stack.pop() {
            for &p in rev.successors(x) {
                if component_ids[p] == usize::MAX {
                    component_ids[p] = component_count;
                    stack.push(p);
                }
            }
        }

        component_count += 1;
    }

    SccResult {
        component_ids,
        component_count,
    }
}
