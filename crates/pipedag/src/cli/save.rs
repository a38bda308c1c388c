//! `pipedag save` command implementation.

use std::path::Path;

use pipedag::api::{self, SaveResponse};

use super::input::{open_store, read_request};
use super::output::print_json;

/// Run the save command.
pub fn run(
    database: Option<&Path>,
    input: Option<&Path>,
    name: Option<String>,
) -> anyhow::Result<bool> {
    let mut request = read_request(input)?;
    if name.is_some() {
        request.name = name;
    }

    let store = open_store(database)?;
    let response = api::save(&store, &request);
    print_json(&response)?;

    Ok(matches!(response, SaveResponse::Saved { .. }))
}
