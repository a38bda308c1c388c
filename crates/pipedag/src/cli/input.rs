//! Pipeline input loading and store resolution shared by commands.

use std::io::Read;
use std::path::Path;

use anyhow::Context;
use pipedag::api::PipelineRequest;
use pipedag::{Config, PipelineStore};

/// Read a pipeline request from `path`, or from stdin when `None` or `-`.
pub fn read_request(path: Option<&Path>) -> anyhow::Result<PipelineRequest> {
    let text = match path.filter(|p| *p != Path::new("-")) {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("failed to read pipeline from stdin")?;
            text
        }
    };

    serde_json::from_str(&text)
        .context("input is not a pipeline (expected {\"nodes\": [...], \"edges\": [...]})")
}

/// Open the store named on the command line, else the configured one.
pub fn open_store(database: Option<&Path>) -> anyhow::Result<PipelineStore> {
    let config = match database {
        Some(path) => Config {
            database_path: path.to_path_buf(),
        },
        None => Config::from_env()?,
    };

    tracing::debug!(path = %config.database_path.display(), "Opening pipeline store");
    config.open_store().with_context(|| {
        format!(
            "failed to open pipeline database {}",
            config.database_path.display()
        )
    })
}
