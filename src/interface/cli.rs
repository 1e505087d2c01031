use crate::infrastructure::event_ndjson::spawn_ndjson_printer;
use crate::infrastructure::scc_kosaraju::KosarajuSccDetector;
use crate::infrastructure::serde_json_adapter::{read_graph_file, read_plan_file, write_plan_file};
use crate::usecase::event::AppEvent;
use crate::usecase::order::plan_task_order;
use crate::usecase::validate::validate_plan;
use anyhow::{anyhow, Context, Result};
use std::env;
use tokio::sync::mpsc;

pub async fn run() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    run_with_args(&args).await
}

pub async fn run_with_args(args: &[String]) -> Result<()> {
    let cmd = Cli::parse(args)?;

    match cmd {
        Cli::TasksOrder {
            input,
            output,
            emit_events,
            dry_run,
        } => {
            let (tx, rx) = mpsc::channel::<AppEvent>(1024);
            let printer = if emit_events {
                Some(spawn_ndjson_printer(rx))
            } else {
                drop(rx);
                None
            };

            let graph = read_graph_file(&input)
                .await
                .with_context(|| format!("reading input graph JSON: {input}"))?;

            if emit_events {
                let _ = tx
                    .send(AppEvent::GraphLoaded {
                        nodes: graph.node_count(),
                        edges: graph.edge_count(),
                    })
                    .await;
            }

            let scc = KosarajuSccDetector;
            let (plan, stats) = plan_task_order(&graph, &scc, Some(tx)).await?;

            if !dry_run {
                write_plan_file(&output, &plan)
                    .await
                    .with_context(|| format!("writing output plan JSON: {output}"))?;
            }

            if let Some(handle) = printer {
                handle.await.ok();
            }

            let order: Vec<String> = plan.task_order.iter().map(|t| t.to_string()).collect();
            eprintln!("task order: {}", order.join(" "));
            eprintln!(
                "summary: nodes={} edges={} components={} cyclic_components={} condensation_edges={}",
                stats.nodes,
                stats.edges,
                stats.components,
                stats.cyclic_components,
                stats.condensation_edges
            );

            Ok(())
        }

        Cli::TasksValidate { input, plan } => {
            let graph = read_graph_file(&input)
                .await
                .with_context(|| format!("reading input graph JSON: {input}"))?;
            let task_plan = read_plan_file(&plan)
                .await
                .with_context(|| format!("reading plan JSON: {plan}"))?;

            let scc = KosarajuSccDetector;
            validate_plan(&graph, &task_plan, &scc)
                .with_context(|| format!("validating plan {plan} against {input}"))?;

            eprintln!("ok: plan validated");
            Ok(())
        }
    }
}

#[derive(Debug)]
enum Cli {
    TasksOrder {
        input: String,
        output: String,
        emit_events: bool,
        dry_run: bool,
    },
    TasksValidate {
        input: String,
        plan: String,
    },
}

impl Cli {
    fn parse(args: &[String]) -> Result<Self> {
        // Expected:
        // <bin> tasks order --in/--input <graph.json> --out/--output <plan.json> [--emit-events] [--dry-run]
        // <bin> tasks validate --in/--input <graph.json> --plan <plan.json>
        if args.len() < 3 {
            return Err(anyhow!(usage()));
        }

        if args[1] != "tasks" {
            return Err(anyhow!(usage()));
        }

        match args[2].as_str() {
            "order" => Self::parse_order(args),
            "validate" => Self::parse_validate(args),
            _ => Err(anyhow!(usage())),
        }
    }

    fn parse_order(args: &[String]) -> Result<Self> {
        let mut input: Option<String> = None;
        let mut output: Option<String> = None;
        let mut emit_events = false;
        let mut dry_run = false;

        let mut i = 3;
        while i < args.len() {
            match args[i].as_str() {
                "--in" | "--input" => {
                    i += 1;
                    input = args.get(i).cloned();
                }
                "--out" | "--output" => {
                    i += 1;
                    output = args.get(i).cloned();
                }
                "--emit-events" => {
                    emit_events = true;
                }
                "--dry-run" => {
                    dry_run = true;
                }
                "-h" | "--help" => return Err(anyhow!(usage())),
                other => return Err(anyhow!(format!("unknown arg: {other}\n\n{}", usage()))),
            }
            i += 1;
        }

        let input = input.ok_or_else(|| anyhow!(format!("missing --in/--input\n\n{}", usage())))?;
        let output = if dry_run {
            output.unwrap_or_default()
        } else {
            output.ok_or_else(|| anyhow!(format!("missing --out/--output\n\n{}", usage())))?
        };

        Ok(Cli::TasksOrder {
            input,
            output,
            emit_events,
            dry_run,
        })
    }

    fn parse_validate(args: &[String]) -> Result<Self> {
        let mut input: Option<String> = None;
        let mut plan: Option<String> = None;

        let mut i = 3;
        while i < args.len() {
            match args[i].as_str() {
                "--in" | "--input" => {
                    i += 1;
                    input = args.get(i).cloned();
                }
                "--plan" => {
                    i += 1;
                    plan = args.get(i).cloned();
                }
                "-h" | "--help" => return Err(anyhow!(usage())),
                other => return Err(anyhow!(format!("unknown arg: {other}\n\n{}", usage()))),
            }
            i += 1;
        }

        let input = input.ok_or_else(|| anyhow!(format!("missing --in/--input\n\n{}", usage())))?;
        let plan = plan.ok_or_else(|| anyhow!(format!("missing --plan\n\n{}", usage())))?;

        Ok(Cli::TasksValidate { input, plan })
    }
}

fn usage() -> &'static str {
    "Usage:\n  tasks order --in/--input <graph.json> --out/--output <plan.json> [--emit-events] [--dry-run]\n  tasks validate --in/--input <graph.json> --plan <plan.json>\n\nEvents:\n  If --emit-events is set, NDJSON events are written to stdout; the task order and summary go to stderr.\n\nDry run:\n  --dry-run computes and prints the order without writing a plan; --out is then optional."
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn args(parts: &[&str]) -> Vec<String> {
        std::iter::once("bin")
            .chain(parts.iter().copied())
            .map(str::to_string)
            .collect()
    }

    fn write_cycle_graph(path: &std::path::Path) {
        std::fs::write(
            path,
            r#"{"directed":true,"n":3,"edges":[{"u":0,"v":1},{"u":1,"v":0},{"u":0,"v":2}]}"#,
        )
        .expect("write input");
    }

    #[test]
    fn parse_rejects_unknown_arg() {
        let err = Cli::parse(&args(&["tasks", "order", "--wat"]))
            .unwrap_err()
            .to_string();
        assert!(err.contains("unknown arg"));
        assert!(err.contains("Usage"));
    }

    #[test]
    fn parse_requires_in_and_out() {
        let err = Cli::parse(&args(&["tasks", "order", "--in", "g.json"]))
            .unwrap_err()
            .to_string();
        assert!(err.contains("missing --out/--output"));

        let err = Cli::parse(&args(&["tasks", "order", "--out", "p.json"]))
            .unwrap_err()
            .to_string();
        assert!(err.contains("missing --in/--input"));
    }

    #[test]
    fn parse_dry_run_makes_out_optional() {
        let cmd = Cli::parse(&args(&["tasks", "order", "--in", "g.json", "--dry-run"]))
            .expect("parse");
        match cmd {
            Cli::TasksOrder {
                input,
                output,
                emit_events,
                dry_run,
            } => {
                assert_eq!(input, "g.json");
                assert!(output.is_empty());
                assert!(!emit_events);
                assert!(dry_run);
            }
            _ => panic!("expected order"),
        }
    }

    #[test]
    fn parse_validate_requires_plan() {
        let err = Cli::parse(&args(&["tasks", "validate", "--in", "g.json"]))
            .unwrap_err()
            .to_string();
        assert!(err.contains("missing --plan"));

        let cmd = Cli::parse(&args(&[
            "tasks", "validate", "--in", "g.json", "--plan", "p.json",
        ]))
        .expect("parse");
        match cmd {
            Cli::TasksValidate { input, plan } => {
                assert_eq!(input, "g.json");
                assert_eq!(plan, "p.json");
            }
            _ => panic!("expected validate"),
        }
    }

    #[test]
    fn parse_rejects_other_command_groups() {
        let err = Cli::parse(&args(&["graph", "order"]))
            .unwrap_err()
            .to_string();
        assert!(err.contains("Usage"));
    }

    #[tokio::test]
    async fn run_with_args_writes_plan_that_validates() {
        let dir = tempdir().expect("tempdir");
        let input_path = dir.path().join("graph.json");
        let plan_path = dir.path().join("plan.json");
        write_cycle_graph(&input_path);

        let input = input_path.to_str().unwrap();
        let plan = plan_path.to_str().unwrap();

        run_with_args(&args(&["tasks", "order", "--in", input, "--out", plan]))
            .await
            .expect("order");
        assert!(plan_path.exists());

        let raw = std::fs::read_to_string(&plan_path).expect("read plan");
        let parsed: serde_json::Value = serde_json::from_str(&raw).expect("valid json");
        assert_eq!(parsed["task_order"], serde_json::json!([0, 1, 2]));

        run_with_args(&args(&["tasks", "validate", "--in", input, "--plan", plan]))
            .await
            .expect("validate");
    }

    #[tokio::test]
    async fn run_with_args_dry_run_writes_nothing() {
        let dir = tempdir().expect("tempdir");
        let input_path = dir.path().join("graph.json");
        write_cycle_graph(&input_path);

        run_with_args(&args(&[
            "tasks",
            "order",
            "--in",
            input_path.to_str().unwrap(),
            "--dry-run",
            "--emit-events",
        ]))
        .await
        .expect("order");

        let entries = std::fs::read_dir(dir.path()).expect("read_dir").count();
        assert_eq!(entries, 1);
    }

    #[tokio::test]
    async fn run_with_args_reports_unreadable_input() {
        let dir = tempdir().expect("tempdir");
        let missing = dir.path().join("nope.json");

        let err = run_with_args(&args(&[
            "tasks",
            "order",
            "--in",
            missing.to_str().unwrap(),
            "--dry-run",
        ]))
        .await
        .unwrap_err();
        assert!(format!("{err:#}").contains("reading input graph JSON"));
    }

    #[tokio::test]
    async fn run_uses_env_args_and_returns_usage_error_under_test_harness() {
        let err = run().await.unwrap_err().to_string();
        assert!(err.contains("Usage"));
    }
}
