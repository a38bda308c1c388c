//! Database schema definition for the pipeline store.

/// Database schema definition.
///
/// `created_at` holds RFC 3339 UTC timestamps with fixed microsecond
/// precision, so text order is chronological order.
pub(crate) const SCHEMA: &str = r"
-- Saved pipelines (append-only)
CREATE TABLE IF NOT EXISTS pipelines (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    nodes TEXT NOT NULL,             -- JSON array of node objects
    edges TEXT NOT NULL,             -- JSON array of edge objects
    num_nodes INTEGER NOT NULL,
    num_edges INTEGER NOT NULL,
    is_dag INTEGER NOT NULL,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_pipelines_created ON pipelines(created_at DESC, id DESC);
";
