//! Helper functions for database row conversion and parsing.
//!
//! Rows are read into [`StoredPipeline`] (raw JSON text) while the statement is
//! live, then decoded into domain types once the connection is released.

// SQLite uses i64 for all integer storage. Node and edge counts are lengths of
// in-memory vectors, so these casts cannot lose information in practice.
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_truncation)]

use chrono::{DateTime, Local, SecondsFormat, Utc};

use crate::error::Result;
use crate::types::{GraphStats, PipelineId, PipelineRecord};

/// SQL column list for the pipelines table.
///
/// Use with `row_to_stored` for consistent column ordering.
pub(crate) const PIPELINES_COLUMNS: &str =
    "id, name, nodes, edges, num_nodes, num_edges, is_dag, created_at";

/// A pipelines row with its node and edge lists still encoded.
#[derive(Debug)]
pub(crate) struct StoredPipeline {
    id: i64,
    name: String,
    nodes: String,
    edges: String,
    num_nodes: i64,
    num_edges: i64,
    is_dag: bool,
    created_at: DateTime<Utc>,
}

impl StoredPipeline {
    /// Decode the JSON columns into a [`PipelineRecord`].
    pub(crate) fn decode(self) -> Result<PipelineRecord> {
        Ok(PipelineRecord {
            id: PipelineId::from(self.id),
            name: self.name,
            nodes: serde_json::from_str(&self.nodes)?,
            edges: serde_json::from_str(&self.edges)?,
            stats: GraphStats {
                num_nodes: self.num_nodes as usize,
                num_edges: self.num_edges as usize,
                is_dag: self.is_dag,
            },
            created_at: self.created_at,
        })
    }
}

/// Convert a database row to a [`StoredPipeline`].
///
/// Expected columns: see [`PIPELINES_COLUMNS`].
pub(crate) fn row_to_stored(row: &rusqlite::Row) -> rusqlite::Result<StoredPipeline> {
    Ok(StoredPipeline {
        id: row.get(0)?,
        name: row.get(1)?,
        nodes: row.get(2)?,
        edges: row.get(3)?,
        num_nodes: row.get(4)?,
        num_edges: row.get(5)?,
        is_dag: row.get(6)?,
        created_at: parse_timestamp(&row.get::<_, String>(7)?)?,
    })
}

/// Count to database integer.
pub(crate) fn count_to_sql(count: usize) -> i64 {
    count as i64
}

/// Render a creation timestamp for storage.
pub(crate) fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse a creation timestamp from the database.
///
/// Returns an error for malformed values, indicating possible database corruption.
pub(crate) fn parse_timestamp(s: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|at| at.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                7,
                rusqlite::types::Type::Text,
                format!("Invalid timestamp '{s}' in database: {e}. Database may be corrupted.")
                    .into(),
            )
        })
}

/// Name given to a pipeline saved without one: `Pipeline_<YYYYMMDD_HHMMSS>` in local time.
pub(crate) fn default_name(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local)
        .format("Pipeline_%Y%m%d_%H%M%S")
        .to_string()
}
