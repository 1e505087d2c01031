use crate::usecase::stats::OrderStats;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum AppEvent {
    PhaseStarted {
        name: String,
    },
    PhaseFinished {
        name: String,
    },

    GraphLoaded {
        nodes: usize,
        edges: usize,
    },

    SccComputed {
        nodes: usize,
        edges: usize,
        components: usize,
        cyclic_components: usize,
    },

    CondensationBuilt {
        components: usize,
        edges: usize,
    },

    ComponentOrderComputed {
        order: Vec<usize>,
    },

    TaskOrderDerived {
        tasks: usize,
    },

    Finished {
        stats: OrderStats,
    },
}
