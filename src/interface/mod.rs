// Interface layer: CLI entrypoints
pub mod cli;
