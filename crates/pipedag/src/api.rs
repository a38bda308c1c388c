//! Request and response payloads for the pipeline operations.
//!
//! These functions are what a transport layer (HTTP handlers, the CLI) calls.
//! They never fail: every [`Error`](crate::Error) is turned into a payload
//! carrying an `error` message, so the caller always has something to send.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::analyzer;
use crate::error::{Error, Result};
use crate::store::PipelineStore;
use crate::types::{Edge, GraphStats, Node, PipelineId, PipelineRecord, SavedPipeline};

/// A submitted pipeline graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineRequest {
    /// Node objects, each with an `id`
    pub nodes: Vec<Node>,
    /// Edge objects, each with `source` and `target`
    pub edges: Vec<Edge>,
    /// Optional display name (only used when saving)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Result of the analyze operation.
///
/// On failure all counts are zero, `is_dag` is false and `error` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    /// Number of submitted nodes
    pub num_nodes: usize,
    /// Number of submitted edges
    pub num_edges: usize,
    /// Whether the graph is acyclic
    pub is_dag: bool,
    /// Failure message, if analysis failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<Result<GraphStats>> for AnalyzeResponse {
    fn from(result: Result<GraphStats>) -> Self {
        match result {
            Ok(stats) => Self {
                num_nodes: stats.num_nodes,
                num_edges: stats.num_edges,
                is_dag: stats.is_dag,
                error: None,
            },
            Err(e) => Self {
                num_nodes: 0,
                num_edges: 0,
                is_dag: false,
                error: Some(e.to_string()),
            },
        }
    }
}

/// Result of the save operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SaveResponse {
    /// The pipeline was stored
    Saved {
        /// Number of submitted nodes
        num_nodes: usize,
        /// Number of submitted edges
        num_edges: usize,
        /// Whether the graph is acyclic
        is_dag: bool,
        /// Identifier of the new record
        pipeline_id: PipelineId,
    },
    /// Nothing was stored
    Failed {
        /// Failure message
        error: String,
    },
}

impl From<Result<SavedPipeline>> for SaveResponse {
    fn from(result: Result<SavedPipeline>) -> Self {
        match result {
            Ok(saved) => Self::Saved {
                num_nodes: saved.stats.num_nodes,
                num_edges: saved.stats.num_edges,
                is_dag: saved.stats.is_dag,
                pipeline_id: saved.id,
            },
            Err(e) => Self::Failed {
                error: e.to_string(),
            },
        }
    }
}

/// A stored pipeline as returned by the list operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineSummary {
    /// Store-assigned identifier
    pub id: PipelineId,
    /// Display name
    pub name: String,
    /// Nodes as submitted
    pub nodes: Vec<Node>,
    /// Edges as submitted
    pub edges: Vec<Edge>,
    /// Number of nodes at save time
    pub num_nodes: usize,
    /// Number of edges at save time
    pub num_edges: usize,
    /// Acyclicity verdict at save time
    pub is_dag: bool,
    /// Insert time (RFC 3339, UTC)
    pub created_at: DateTime<Utc>,
}

impl From<PipelineRecord> for PipelineSummary {
    fn from(record: PipelineRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            nodes: record.nodes,
            edges: record.edges,
            num_nodes: record.stats.num_nodes,
            num_edges: record.stats.num_edges,
            is_dag: record.stats.is_dag,
            created_at: record.created_at,
        }
    }
}

/// Result of the list operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ListResponse {
    /// All stored pipelines, newest first
    Pipelines {
        /// The records
        pipelines: Vec<PipelineSummary>,
    },
    /// The store could not be read
    Failed {
        /// Failure message
        error: String,
    },
}

impl From<Result<Vec<PipelineRecord>>> for ListResponse {
    fn from(result: Result<Vec<PipelineRecord>>) -> Self {
        match result {
            Ok(records) => Self::Pipelines {
                pipelines: records.into_iter().map(PipelineSummary::from).collect(),
            },
            Err(e) => Self::Failed {
                error: e.to_string(),
            },
        }
    }
}

/// Liveness payload: `{"Ping": "Pong"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PingResponse {
    /// Always `"Pong"`
    #[serde(rename = "Ping")]
    pub ping: String,
}

/// Liveness check.
#[must_use]
pub fn ping() -> PingResponse {
    PingResponse {
        ping: "Pong".to_string(),
    }
}

/// Rejected input is a warning; anything else is the store's fault.
fn log_failure(operation: &str, e: &Error) {
    if e.is_internal_error() {
        error!(operation, error = %e, "Pipeline operation failed");
    } else {
        warn!(operation, error = %e, "Pipeline input rejected");
    }
}

/// Count nodes and edges and check acyclicity.
///
/// Edges naming unknown nodes are reported as a warning.
#[must_use]
pub fn analyze(request: &PipelineRequest) -> AnalyzeResponse {
    let result = analyzer::inspect(&request.nodes, &request.edges).map(|analysis| {
        if !analysis.unresolved.is_empty() {
            warn!(
                edges = ?analysis.unresolved,
                "Edges reference unknown nodes and were left out of the DAG check"
            );
        }
        analysis.stats
    });
    if let Err(e) = &result {
        log_failure("analyze", e);
    }
    AnalyzeResponse::from(result)
}

/// Analyze and persist a pipeline.
#[must_use]
pub fn save(store: &PipelineStore, request: &PipelineRequest) -> SaveResponse {
    let result = store.save(request.name.as_deref(), &request.nodes, &request.edges);
    if let Err(e) = &result {
        log_failure("save", e);
    }
    SaveResponse::from(result)
}

/// Every stored pipeline, newest first.
#[must_use]
pub fn list(store: &PipelineStore) -> ListResponse {
    let result = store.list();
    if let Err(e) = &result {
        log_failure("list", e);
    }
    ListResponse::from(result)
}
