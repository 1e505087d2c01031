use crate::domain::graph::{Graph, SccResult};
use crate::domain::traits::SccDetector;
use crate::usecase::order::{build_condensation, TaskPlan};
use anyhow::{anyhow, Result};
use std::collections::{BTreeMap, BTreeSet};

/// Checks that `plan` is a correct task order for `graph`.
///
/// The component partition is recomputed with `scc` and compared up to
/// renumbering, so plans produced by another detector still validate. The
/// derived fields (`component_order`, `condensation`, `components`,
/// `cyclic_components`) must agree with the plan's own partition.
pub fn validate_plan(graph: &Graph, plan: &TaskPlan, scc: &dyn SccDetector) -> Result<()> {
    let n = graph.node_count();
    if plan.nodes != n {
        return Err(anyhow!(
            "plan covers {} nodes but the graph has {n}",
            plan.nodes
        ));
    }

    // Task order must be a permutation of 0..n.
    let mut pos = vec![usize::MAX; n];
    for (i, &node) in plan.task_order.iter().enumerate() {
        if node >= n {
            return Err(anyhow!("task order references unknown node {node}"));
        }
        if pos[node] != usize::MAX {
            return Err(anyhow!("task order lists node {node} twice"));
        }
        pos[node] = i;
    }
    if let Some(missing) = pos.iter().position(|&p| p == usize::MAX) {
        return Err(anyhow!("task order is missing node {missing}"));
    }

    let fresh = scc.compute_scc(graph);
    if plan.component_ids.len() != n || plan.component_count != fresh.component_count {
        return Err(anyhow!(
            "plan has {} components over {} nodes, expected {} over {n}",
            plan.component_count,
            plan.component_ids.len(),
            fresh.component_count
        ));
    }

    // Same partition up to renumbering: the id mapping must be a bijection.
    let mut plan_to_fresh: BTreeMap<usize, usize> = BTreeMap::new();
    let mut fresh_to_plan: BTreeMap<usize, usize> = BTreeMap::new();
    for node in 0..n {
        let p = plan.component_ids[node];
        let f = fresh.component_ids[node];
        if p >= plan.component_count {
            return Err(anyhow!(
                "node {node} has component id {p}, outside 0..{}",
                plan.component_count
            ));
        }
        let a = *plan_to_fresh.entry(p).or_insert(f);
        let b = *fresh_to_plan.entry(f).or_insert(p);
        if a != f || b != p {
            return Err(anyhow!(
                "plan groups node {node} with nodes that are not mutually reachable"
            ));
        }
    }

    for &(u, v) in graph.edges() {
        if plan.component_ids[u] == plan.component_ids[v] {
            continue;
        }
        if pos[u] >= pos[v] {
            return Err(anyhow!(
                "edge {u} -> {v} crosses components but {u} is ordered after {v}"
            ));
        }
    }

    // Each component occupies one contiguous run, and the runs follow
    // component_order.
    let mut runs: Vec<usize> = Vec::with_capacity(plan.component_count);
    let mut seen = vec![false; plan.component_count];
    for &node in plan.task_order.iter() {
        let cid = plan.component_ids[node];
        if runs.last() == Some(&cid) {
            continue;
        }
        if seen[cid] {
            return Err(anyhow!(
                "component {cid} is split: node {node} is separated from its other members"
            ));
        }
        seen[cid] = true;
        runs.push(cid);
    }
    if runs != plan.component_order {
        return Err(anyhow!(
            "component order {:?} does not match the task order grouping {:?}",
            plan.component_order,
            runs
        ));
    }

    let own = SccResult {
        component_ids: plan.component_ids.clone(),
        component_count: plan.component_count,
    };
    let expected = build_condensation(graph, &own);
    let as_sets = |adj: &[Vec<usize>]| -> Vec<BTreeSet<usize>> {
        adj.iter().map(|s| s.iter().copied().collect()).collect()
    };
    if as_sets(&plan.condensation) != as_sets(&expected) {
        return Err(anyhow!(
            "condensation {:?} does not match the graph's cross-component edges {:?}",
            plan.condensation,
            expected
        ));
    }

    if plan.components != own.components() {
        return Err(anyhow!("component member lists disagree with component_ids"));
    }
    if plan.cyclic_components != own.cyclic_components(graph) {
        return Err(anyhow!(
            "cyclic components {:?} disagree with the graph",
            plan.cyclic_components
        ));
    }

    Ok(())
}
