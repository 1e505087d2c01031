use crate::domain::graph::SccResult;

/// Expands a component order into a task order over the original nodes.
///
/// Entries that do not convert to a component id in `0..component_count`
/// (negative, too large) are skipped, as are repeats: the first occurrence of a
/// component wins. Each kept component contributes its members in ascending
/// node id. Components absent from `component_order` are not appended.
pub fn derive_task_order_from_component_order<I, T>(
    component_order: I,
    scc: &SccResult,
) -> Vec<usize>
where
    I: IntoIterator<Item = T>,
    T: TryInto<usize>,
{
    let members = scc.components();
    let mut consumed = vec![false; scc.component_count];
    let mut order = Vec::with_capacity(scc.component_ids.len());

    for raw in component_order {
        let Ok(cid) = TryInto::<usize>::try_into(raw) else {
            continue;
        };
        if cid >= scc.component_count || consumed[cid] {
            continue;
        }
        consumed[cid] = true;
        order.extend_from_slice(&members[cid]);
    }

    order
}
