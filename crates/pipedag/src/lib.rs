//! # Pipedag: Pipeline Graph Analysis and Storage
//!
//! Pipedag takes a pipeline described as nodes and directed edges, reports how
//! many of each it has and whether it is a DAG, and can keep the pipeline with
//! those statistics in a `SQLite` database for later listing.
//!
//! ## Design Philosophy
//!
//! - **Opaque payloads** - Only `id`, `source` and `target` are read; everything
//!   else a node or edge carries is stored and returned untouched
//! - **Permissive edges** - An edge naming an unknown node is counted but left
//!   out of the cycle check, rather than rejected
//! - **Computed once** - Statistics are stored with the pipeline and never
//!   recomputed, even if the analysis changes later
//! - **Library first** - The `api` module is the transport-facing surface; the
//!   `pipedag` binary is one such transport
//!
//! ## Quick Start
//!
//! ```no_run
//! use pipedag::{Edge, Node, PipelineStore};
//!
//! let nodes = vec![Node::new("load"), Node::new("transform"), Node::new("store")];
//! let edges = vec![Edge::new("load", "transform"), Edge::new("transform", "store")];
//!
//! let stats = pipedag::analyze(&nodes, &edges)?;
//! assert!(stats.is_dag);
//!
//! let store = PipelineStore::open(std::path::Path::new("pipelines.db"))?;
//! let saved = store.save(Some("nightly etl"), &nodes, &edges)?;
//! println!("saved pipeline {}", saved.id);
//!
//! for record in store.list()? {
//!     println!("{} {} (dag: {})", record.id, record.name, record.stats.is_dag);
//! }
//! # Ok::<(), pipedag::Error>(())
//! ```

pub mod analyzer;
pub mod api;
mod config;
mod error;
mod store;
mod types;

pub use analyzer::{Analysis, analyze, inspect, is_acyclic};
pub use config::{Config, DATABASE_URL_VAR, DEFAULT_DATABASE_PATH};
pub use error::{Element, Error, Problem, Result, ValidationError};
pub use store::PipelineStore;
pub use types::{
    Attributes, Edge, GraphStats, Node, NodeId, PipelineId, PipelineRecord, SavedPipeline,
};
