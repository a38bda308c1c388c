//! `pipedag list` command implementation.

use std::path::Path;

use colored::Colorize;
use pipedag::api::{self, ListResponse};

use super::input::open_store;
use super::output::print_json;

/// Run the list command.
pub fn run(database: Option<&Path>, brief: bool) -> anyhow::Result<bool> {
    let store = open_store(database)?;
    let response = api::list(&store);

    match (&response, brief) {
        (ListResponse::Pipelines { pipelines }, true) => {
            if pipelines.is_empty() {
                println!("{}", "No saved pipelines.".dimmed());
            }
            for pipeline in pipelines {
                let verdict = if pipeline.is_dag {
                    "DAG".green()
                } else {
                    "cyclic".red()
                };
                println!(
                    "{:>5}  {}  {} nodes, {} edges  {}  {}",
                    pipeline.id.to_string().cyan(),
                    pipeline.name.white().bold(),
                    pipeline.num_nodes,
                    pipeline.num_edges,
                    verdict,
                    pipeline.created_at.to_rfc3339().dimmed()
                );
            }
        }
        _ => print_json(&response)?,
    }

    Ok(matches!(response, ListResponse::Pipelines { .. }))
}
