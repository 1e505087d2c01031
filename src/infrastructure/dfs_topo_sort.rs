//! Depth-first topological ordering.
//!
//! Works on any adjacency list: an input graph known to be acyclic, or the
//! condensation of an arbitrary graph. Cyclic input is not rejected, but edges
//! inside a cycle carry no ordering guarantee.

/// Topological order of `adjacency` by reversed DFS postorder.
///
/// Roots are taken in ascending node id, so the result is deterministic and
/// covers disconnected parts. `visited` is an optional caller-owned scratch
/// buffer; it is reset to `adjacency.len()` entries on entry and holds the final
/// visited state on return.
pub fn topological_order(
    adjacency: &[Vec<usize>],
    visited: Option<&mut Vec<bool>>,
) -> Vec<usize> {
    let n = adjacency.len();

    let mut owned = Vec::new();
    let seen = match visited {
        Some(buf) => buf,
        None => &mut owned,
    };
    seen.clear();
    seen.resize(n, false);

    let mut postorder: Vec<usize> = Vec::with_capacity(n);
    for start in 0..n {
        if seen[start] {
            continue;
        }
        iterative_finish_order(start, adjacency, seen, &mut postorder);
    }

    postorder.reverse();
    postorder
}

/// Appends every node reachable from `start` (and not yet `seen`) to `order`
/// in DFS finishing order.
pub(crate) fn iterative_finish_order(
    start: usize,
    edges: &[Vec<usize>],
    seen: &mut [bool],
    order: &mut Vec<usize>,
) {
    let mut stack: Vec<(usize, usize)> = Vec::new();
    stack.push((start, 0));

    while let Some((v, next_i)) = stack.pop() {
        if !seen[v] {
            seen[v] = true;
        }

        if next_i < edges[v].len() {
            let to = edges[v][next_i];
            stack.push((v, next_i + 1));
            if !seen[to] {
                stack.push((to, 0));
            }
            continue;
        }

        order.push(v);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diamond_puts_sink_last() {
        // 0 -> 1 -> 3, 0 -> 2 -> 3
        let adj = vec![vec![1, 2], vec![3], vec![3], vec![]];
        assert_eq!(topological_order(&adj, None), vec![0, 2, 1, 3]);
    }

    #[test]
    fn scratch_buffer_is_reset_and_reused() {
        let mut scratch = vec![true; 10];

        let order = topological_order(&[vec![1], vec![]], Some(&mut scratch));
        assert_eq!(order, vec![0, 1]);
        assert_eq!(scratch, vec![true, true]);

        let order = topological_order(&[vec![], vec![], vec![0]], Some(&mut scratch));
        assert_eq!(order, vec![2, 1, 0]);
        assert_eq!(scratch.len(), 3);
    }

    #[test]
    fn finish_order_skips_already_seen_nodes() {
        let adj = vec![vec![1], vec![], vec![1]];
        let mut seen = vec![false; 3];
        let mut order = Vec::new();

        iterative_finish_order(0, &adj, &mut seen, &mut order);
        iterative_finish_order(2, &adj, &mut seen, &mut order);
        assert_eq!(order, vec![1, 0, 2]);
    }

    #[test]
    fn cyclic_input_still_returns_every_node_once() {
        let adj = vec![vec![1], vec![2], vec![0]];
        let mut order = topological_order(&adj, None);
        order.sort_unstable();
        assert_eq!(order, vec![0, 1, 2]);
    }
}
