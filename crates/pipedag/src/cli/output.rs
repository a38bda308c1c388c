//! Common output utilities for CLI commands.

use std::io::Write;

use serde::Serialize;

/// Print a payload as pretty JSON on stdout.
pub fn print_json<T: Serialize>(payload: &T) -> anyhow::Result<()> {
    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, payload)?;
    writeln!(stdout)?;
    Ok(())
}
