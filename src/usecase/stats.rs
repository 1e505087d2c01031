use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct OrderStats {
    pub nodes: usize,
    pub edges: usize,
    pub components: usize,
    pub cyclic_components: usize,
    pub condensation_edges: usize,
    pub dropped_intra_component_edges: usize,
}
