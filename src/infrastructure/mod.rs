// Infrastructure layer: algorithm adapters, file I/O, serde, eventing
pub mod dfs_topo_sort;
pub mod event_ndjson;
pub mod scc_kosaraju;
pub mod schema_validator;
pub mod serde_json_adapter;
