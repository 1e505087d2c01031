/// Immutable directed graph over node ids `0..node_count`.
///
/// Adjacency and the edge list describe the same edges; the edge list keeps
/// insertion order. Build one with [`GraphBuilder`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    adjacency: Vec<Vec<usize>>,
    edges: Vec<(usize, usize)>,
}

impl Graph {
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn successors(&self, node: usize) -> &[usize] {
        &self.adjacency[node]
    }

    pub fn adjacency(&self) -> &[Vec<usize>] {
        &self.adjacency
    }

    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    /// Returns a new graph with every edge `(u, v)` turned into `(v, u)`.
    pub fn reversed(&self) -> Graph {
        let mut b = GraphBuilder::new().ensure_n(self.node_count());
        for &(u, v) in self.edges.iter() {
            b = b.add_edge(v, u);
        }
        b.build()
    }
}

/// Accumulates edges and a minimum node count, then freezes into a [`Graph`].
#[derive(Debug, Clone, Default)]
pub struct GraphBuilder {
    edges: Vec<(usize, usize)>,
    min_nodes: usize,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_edge(mut self, u: usize, v: usize) -> Self {
        self.edges.push((u, v));
        self
    }

    /// Raises the node count lower bound; never lowers it.
    pub fn ensure_n(mut self, n: usize) -> Self {
        self.min_nodes = self.min_nodes.max(n);
        self
    }

    pub fn build(self) -> Graph {
        let referenced = self
            .edges
            .iter()
            .map(|&(u, v)| u.max(v) + 1)
            .max()
            .unwrap_or(0);
        let n = referenced.max(self.min_nodes);

        let mut adjacency = vec![Vec::new(); n];
        for &(u, v) in self.edges.iter() {
            adjacency[u].push(v);
        }

        Graph {
            adjacency,
            edges: self.edges,
        }
    }
}

/// Partition of a graph's nodes into strongly connected components.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SccResult {
    /// Component id per node, dense in `0..component_count`.
    pub component_ids: Vec<usize>,
    pub component_count: usize,
}

impl SccResult {
    pub fn component_of(&self, node: usize) -> usize {
        self.component_ids[node]
    }

    /// Members of each component, indexed by component id, ascending node ids.
    pub fn components(&self) -> Vec<Vec<usize>> {
        let mut out = vec![Vec::new(); self.component_count];
        for (node, &cid) in self.component_ids.iter().enumerate() {
            out[cid].push(node);
        }
        out
    }

    /// Ids of components that contain a cycle: more than one member, or a
    /// single member with a self-loop.
    pub fn cyclic_components(&self, graph: &Graph) -> Vec<usize> {
        let components = self.components();
        components
            .iter()
            .enumerate()
            .filter(|(_, members)| match members.as_slice() {
                [only] => graph.successors(*only).contains(only),
                [] => false,
                _ => true,
            })
            .map(|(cid, _)| cid)
            .collect()
    }
}
