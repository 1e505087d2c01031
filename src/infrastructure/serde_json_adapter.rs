use crate::domain::graph::{Graph, GraphBuilder};
use crate::infrastructure::schema_validator::{validate_graph_file, validate_plan_file};
use crate::usecase::order::TaskPlan;
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use tokio::fs;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphFileDto {
    #[serde(default = "default_directed")]
    pub directed: bool,

    pub n: usize,

    #[serde(default)]
    pub edges: Vec<EdgeDto>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_model: Option<String>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EdgeDto {
    pub u: usize,
    pub v: usize,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub w: Option<f64>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Largest node count a graph file may declare.
pub const MAX_NODES: usize = 1 << 24;

fn default_directed() -> bool {
    true
}

impl Default for GraphFileDto {
    fn default() -> Self {
        Self {
            directed: true,
            n: 0,
            edges: Vec::new(),
            source: None,
            weight_model: None,
            extra: BTreeMap::new(),
        }
    }
}

impl GraphFileDto {
    /// Builds the graph, rejecting edges that point outside `0..n`.
    pub fn to_graph(&self) -> Result<Graph> {
        if self.n > MAX_NODES {
            return Err(anyhow!(
                "graph declares {} nodes, more than the supported {MAX_NODES}",
                self.n
            ));
        }

        let mut builder = GraphBuilder::new().ensure_n(self.n);

        for (i, e) in self.edges.iter().enumerate() {
            if e.u >= self.n || e.v >= self.n {
                return Err(anyhow!(
                    "edge #{i} ({} -> {}) references a node outside 0..{}",
                    e.u,
                    e.v,
                    self.n
                ));
            }
            builder = builder.add_edge(e.u, e.v);
            if !self.directed && e.u != e.v {
                builder = builder.add_edge(e.v, e.u);
            }
        }

        Ok(builder.build())
    }
}

pub fn parse_graph_json(raw: &str) -> Result<GraphFileDto> {
    let value: Value = serde_json::from_str(raw)?;
    validate_graph_file(&value)?;
    let dto: GraphFileDto = serde_json::from_value(value)?;
    Ok(dto)
}

pub async fn read_graph_file(path: &str) -> Result<Graph> {
    let raw = fs::read_to_string(path).await?;
    parse_graph_json(&raw)?.to_graph()
}

pub async fn read_plan_file(path: &str) -> Result<TaskPlan> {
    let raw = fs::read_to_string(path).await?;
    let value: Value = serde_json::from_str(&raw)?;
    validate_plan_file(&value)?;
    let plan: TaskPlan = serde_json::from_value(value)?;
    Ok(plan)
}

pub async fn write_plan_file(path: &str, plan: &TaskPlan) -> Result<()> {
    let pretty = serde_json::to_string_pretty(plan)?;
    fs::write(path, pretty).await?;
    Ok(())
}
