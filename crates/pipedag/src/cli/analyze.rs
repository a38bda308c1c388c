//! `pipedag analyze` command implementation.

use std::path::Path;

use pipedag::api;

use super::input::read_request;
use super::output::print_json;

/// Run the analyze command.
pub fn run(input: Option<&Path>) -> anyhow::Result<bool> {
    let request = read_request(input)?;
    let response = api::analyze(&request);
    print_json(&response)?;
    Ok(response.error.is_none())
}
