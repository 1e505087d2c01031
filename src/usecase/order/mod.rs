mod condensation;
mod derive;

pub use condensation::build_condensation;
pub use derive::derive_task_order_from_component_order;

use crate::domain::graph::Graph;
use crate::domain::traits::SccDetector;
use crate::infrastructure::dfs_topo_sort::topological_order;
use crate::usecase::event::AppEvent;
use crate::usecase::stats::OrderStats;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// Everything computed on the way from a graph to its task order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskPlan {
    pub nodes: usize,
    pub edges: usize,
    pub component_count: usize,
    pub component_ids: Vec<usize>,
    pub components: Vec<Vec<usize>>,
    pub cyclic_components: Vec<usize>,
    pub component_order: Vec<usize>,
    pub condensation: Vec<Vec<usize>>,
    pub task_order: Vec<usize>,
}

pub async fn plan_task_order(
    graph: &Graph,
    scc: &dyn SccDetector,
    sink: Option<mpsc::Sender<AppEvent>>,
) -> Result<(TaskPlan, OrderStats)> {
    let mut stats = OrderStats {
        nodes: graph.node_count(),
        edges: graph.edge_count(),
        ..OrderStats::default()
    };

    emit(&sink, AppEvent::PhaseStarted { name: "scc".into() }).await;
    let scc_res = scc.compute_scc(graph);
    let cyclic_components = scc_res.cyclic_components(graph);
    stats.components = scc_res.component_count;
    stats.cyclic_components = cyclic_components.len();
    emit(
        &sink,
        AppEvent::SccComputed {
            nodes: graph.node_count(),
            edges: graph.edge_count(),
            components: scc_res.component_count,
            cyclic_components: cyclic_components.len(),
        },
    )
    .await;
    emit(&sink, AppEvent::PhaseFinished { name: "scc".into() }).await;

    emit(
        &sink,
        AppEvent::PhaseStarted {
            name: "condensation".into(),
        },
    )
    .await;
    let condensation = build_condensation(graph, &scc_res);
    stats.condensation_edges = condensation.iter().map(Vec::len).sum();
    stats.dropped_intra_component_edges = graph
        .edges()
        .iter()
        .filter(|&&(u, v)| scc_res.component_of(u) == scc_res.component_of(v))
        .count();
    emit(
        &sink,
        AppEvent::CondensationBuilt {
            components: condensation.len(),
            edges: stats.condensation_edges,
        },
    )
    .await;
    emit(
        &sink,
        AppEvent::PhaseFinished {
            name: "condensation".into(),
        },
    )
    .await;

    emit(
        &sink,
        AppEvent::PhaseStarted {
            name: "component_order".into(),
        },
    )
    .await;
    let component_order = topological_order(&condensation, None);
    emit(
        &sink,
        AppEvent::ComponentOrderComputed {
            order: component_order.clone(),
        },
    )
    .await;
    emit(
        &sink,
        AppEvent::PhaseFinished {
            name: "component_order".into(),
        },
    )
    .await;

    emit(
        &sink,
        AppEvent::PhaseStarted {
            name: "task_order".into(),
        },
    )
    .await;
    let task_order =
        derive_task_order_from_component_order(component_order.iter().copied(), &scc_res);
    emit(
        &sink,
        AppEvent::TaskOrderDerived {
            tasks: task_order.len(),
        },
    )
    .await;
    emit(
        &sink,
        AppEvent::PhaseFinished {
            name: "task_order".into(),
        },
    )
    .await;

    let plan = TaskPlan {
        nodes: graph.node_count(),
        edges: graph.edge_count(),
        component_count: scc_res.component_count,
        components: scc_res.components(),
        component_ids: scc_res.component_ids,
        cyclic_components,
        component_order,
        condensation,
        task_order,
    };

    emit(
        &sink,
        AppEvent::Finished {
            stats: stats.clone(),
        },
    )
    .await;
    Ok((plan, stats))
}

async fn emit(sink: &Option<mpsc::Sender<AppEvent>>, ev: AppEvent) {
    if let Some(tx) = sink {
        let _ = tx.send(ev).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::graph::GraphBuilder;
    use crate::infrastructure::scc_kosaraju::KosarajuSccDetector;

    #[tokio::test]
    async fn plan_for_cycle_with_tail() {
        let g = GraphBuilder::new()
            .add_edge(0, 1)
            .add_edge(1, 0)
            .add_edge(0, 2)
            .ensure_n(3)
            .build();

        let (plan, stats) = plan_task_order(&g, &KosarajuSccDetector, None)
            .await
            .expect("plan");

        assert_eq!(plan.component_count, 2);
        assert_eq!(plan.task_order, vec![0, 1, 2]);
        assert_eq!(plan.cyclic_components, vec![plan.component_ids[0]]);
        assert_eq!(stats.condensation_edges, 1);
        assert_eq!(stats.dropped_intra_component_edges, 2);
    }

    #[tokio::test]
    async fn plan_emits_phases_in_order() {
        let g = GraphBuilder::new().add_edge(0, 1).build();
        let (tx, mut rx) = mpsc::channel::<AppEvent>(64);

        plan_task_order(&g, &KosarajuSccDetector, Some(tx))
            .await
            .expect("plan");

        let mut started = Vec::new();
        let mut last = None;
        while let Some(ev) = rx.recv().await {
            if let AppEvent::PhaseStarted { name } = &ev {
                started.push(name.clone());
            }
            last = Some(ev);
        }

        assert_eq!(
            started,
            vec!["scc", "condensation", "component_order", "task_order"]
        );
        assert!(matches!(last, Some(AppEvent::Finished { .. })));
    }
}
