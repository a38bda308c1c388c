//! CLI command implementations.
//!
//! Each `run` returns `Ok(true)` when the printed payload reports success and
//! `Ok(false)` when it carries an `error`.

mod input;
pub mod output;

pub mod analyze;
pub mod list;
pub mod save;
