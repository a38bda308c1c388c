//! Save and list operations for the pipeline store.

use chrono::Utc;
use rusqlite::{params, TransactionBehavior};
use tracing::debug;

use super::{
    count_to_sql, default_name, format_timestamp, row_to_stored, PipelineStore, StoredPipeline,
    PIPELINES_COLUMNS,
};
use crate::analyzer;
use crate::error::Result;
use crate::types::{Edge, Node, PipelineId, PipelineRecord, SavedPipeline};

impl PipelineStore {
    /// Analyze a pipeline and append it to the store.
    ///
    /// The statistics are computed once, here, and stored alongside the graph.
    /// `name` falls back to `Pipeline_<YYYYMMDD_HHMMSS>` when absent or empty.
    /// The id and creation timestamp are assigned inside a write transaction,
    /// so either the whole record becomes visible or nothing does.
    ///
    /// # Errors
    ///
    /// - [`Error::Validation`](crate::Error::Validation) if a node or edge is malformed
    /// - [`Error::Serialization`](crate::Error::Serialization) if encoding fails
    /// - [`Error::Database`](crate::Error::Database) if the insert fails
    pub fn save(&self, name: Option<&str>, nodes: &[Node], edges: &[Edge]) -> Result<SavedPipeline> {
        let stats = analyzer::analyze(nodes, edges)?;
        let nodes_json = serde_json::to_string(nodes)?;
        let edges_json = serde_json::to_string(edges)?;

        let mut conn = self.connection()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        // Taken under the write lock so creation order follows id order.
        let created_at = Utc::now();
        let name = name
            .filter(|n| !n.is_empty())
            .map_or_else(|| default_name(created_at), str::to_string);

        tx.execute(
            "INSERT INTO pipelines (name, nodes, edges, num_nodes, num_edges, is_dag, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                name,
                nodes_json,
                edges_json,
                count_to_sql(stats.num_nodes),
                count_to_sql(stats.num_edges),
                stats.is_dag,
                format_timestamp(created_at),
            ],
        )?;
        let id = PipelineId::from(tx.last_insert_rowid());
        tx.commit()?;

        debug!(
            %id,
            %name,
            num_nodes = stats.num_nodes,
            num_edges = stats.num_edges,
            is_dag = stats.is_dag,
            "Saved pipeline"
        );

        Ok(SavedPipeline { id, stats })
    }

    /// Every saved pipeline, newest first (ties broken by id, highest first).
    ///
    /// # Errors
    ///
    /// - [`Error::Database`](crate::Error::Database) if the query fails or a row is corrupt
    /// - [`Error::Serialization`](crate::Error::Serialization) if stored nodes/edges cannot be decoded
    pub fn list(&self) -> Result<Vec<PipelineRecord>> {
        let rows = {
            let mut conn = self.connection()?;
            let tx = conn.transaction()?;
            let rows = {
                let mut stmt = tx.prepare(&format!(
                    "SELECT {PIPELINES_COLUMNS} FROM pipelines ORDER BY created_at DESC, id DESC"
                ))?;
                stmt.query_map([], row_to_stored)?
                    .collect::<std::result::Result<Vec<_>, _>>()?
            };
            tx.commit()?;
            rows
        };

        let records = rows
            .into_iter()
            .map(StoredPipeline::decode)
            .collect::<Result<Vec<_>>>()?;

        debug!(count = records.len(), "Listed pipelines");
        Ok(records)
    }
}
