use anyhow::{anyhow, Result};
use jsonschema::{Draft, JSONSchema};
use once_cell::sync::Lazy;
use serde_json::Value;

static GRAPH_SCHEMA: Lazy<JSONSchema> = Lazy::new(|| {
    let schema_content = include_str!("../schemas/graph_schema.json");
    let schema: Value = serde_json::from_str(schema_content).expect("Invalid graph schema");
    JSONSchema::options()
        .with_draft(Draft::Draft7)
        .compile(&schema)
        .expect("Failed to compile graph schema")
});

static PLAN_SCHEMA: Lazy<JSONSchema> = Lazy::new(|| {
    let schema_content = include_str!("../schemas/plan_schema.json");
    let schema: Value = serde_json::from_str(schema_content).expect("Invalid plan schema");
    JSONSchema::options()
        .with_draft(Draft::Draft7)
        .compile(&schema)
        .expect("Failed to compile plan schema")
});

/// Validate a graph description against the graph schema
pub fn validate_graph_file(graph: &Value) -> Result<()> {
    validate_against(&GRAPH_SCHEMA, graph, "Graph file")
}

/// Validate a serialized task plan against the plan schema
pub fn validate_plan_file(plan: &Value) -> Result<()> {
    validate_against(&PLAN_SCHEMA, plan, "Plan file")
}

fn validate_against(schema: &JSONSchema, value: &Value, what: &str) -> Result<()> {
    match schema.validate(value) {
        Ok(()) => Ok(()),
        Err(errors) => {
            let error_list: Vec<String> = errors.map(|e| e.to_string()).collect();
            Err(anyhow!(
                "{what} validation failed:\n{}",
                error_list.join("\n")
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn graph_schema_requires_n() {
        let err = validate_graph_file(&json!({"edges": []})).unwrap_err();
        assert!(err.to_string().contains("Graph file validation failed"));
    }

    #[test]
    fn graph_schema_rejects_negative_endpoints() {
        let g = json!({"n": 2, "edges": [{"u": -1, "v": 0}]});
        assert!(validate_graph_file(&g).is_err());
    }

    #[test]
    fn plan_schema_requires_task_order() {
        let p = json!({
            "nodes": 0,
            "edges": 0,
            "component_count": 0,
            "component_ids": [],
            "components": [],
            "cyclic_components": [],
            "component_order": [],
            "condensation": []
        });
        assert!(validate_plan_file(&p).is_err());
    }
}
