//! Domain types for pipeline graphs.
//!
//! - **Input**: `Node`, `Edge` (opaque JSON objects with identifier fields)
//! - **Results**: `GraphStats`, `SavedPipeline`
//! - **Entities**: `PipelineRecord` (stored in the database)
//!
//! ## Design Decisions
//!
//! | Decision | Choice | Rationale |
//! |----------|--------|-----------|
//! | Node/Edge payload | `serde_json::Map` | Caller metadata survives a save/list round trip untouched |
//! | Identifier | String or integer | Matches what pipeline editors emit; `"1"` and `1` differ |
//! | Field lookup | On demand | Malformed elements are reported with their index, not at deserialization |

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use crate::error::Problem;

/// Opaque key/value payload attached to a node or edge.
pub type Attributes = serde_json::Map<String, Value>;

// ============================================================================
// Strongly-typed ID wrappers
// ============================================================================

/// A strongly-typed pipeline ID, assigned by the store on insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PipelineId(pub i64);

impl From<i64> for PipelineId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for PipelineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a node, as referenced by edge endpoints.
///
/// Integers of any magnitude are accepted. Values that fit in `i64` or `u64`
/// are stored in canonical form, so `-0` and `0` name the same node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum NodeId {
    /// Integer identifier
    Integer(Number),
    /// String identifier
    String(String),
}

impl NodeId {
    /// Interpret a JSON value as a node identifier.
    ///
    /// Only strings and integer numbers qualify.
    ///
    /// # Errors
    ///
    /// Returns [`Problem::InvalidType`] for any other JSON value.
    pub fn from_value(value: &Value) -> Result<Self, Problem> {
        match value {
            Value::String(s) => Ok(Self::String(s.clone())),
            Value::Number(n) => integer(n).map(Self::Integer).ok_or(Problem::InvalidType),
            Value::Null | Value::Bool(_) | Value::Array(_) | Value::Object(_) => {
                Err(Problem::InvalidType)
            }
        }
    }
}

/// Canonical integer form of a JSON number, or `None` for non-integers.
fn integer(n: &Number) -> Option<Number> {
    if let Some(i) = n.as_i64() {
        return Some(Number::from(i));
    }
    if let Some(u) = n.as_u64() {
        return Some(Number::from(u));
    }

    // Beyond u64 the literal text is kept as parsed.
    let text = n.to_string();
    let digits = text.strip_prefix('-').unwrap_or(&text);
    (!digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())).then(|| n.clone())
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::String(s) => write!(f, "{s}"),
        }
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self::String(id.to_string())
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self::String(id)
    }
}

impl From<i64> for NodeId {
    fn from(id: i64) -> Self {
        Self::Integer(Number::from(id))
    }
}

impl From<u64> for NodeId {
    fn from(id: u64) -> Self {
        Self::Integer(Number::from(id))
    }
}

impl From<NodeId> for Value {
    fn from(id: NodeId) -> Self {
        match id {
            NodeId::Integer(n) => Value::Number(n),
            NodeId::String(s) => Value::String(s),
        }
    }
}

/// Look up an identifier field in an attribute map.
fn identifier(attributes: &Attributes, field: &str) -> Result<NodeId, Problem> {
    attributes
        .get(field)
        .ok_or(Problem::Missing)
        .and_then(NodeId::from_value)
}

// ============================================================================
// Graph elements
// ============================================================================

/// A pipeline node: an `id` field plus arbitrary caller metadata.
///
/// Serializes as the bare JSON object it was built from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Node(Attributes);

impl Node {
    /// Field holding the node identifier.
    pub const ID: &'static str = "id";

    /// Create a node with the given identifier and no metadata.
    #[must_use]
    pub fn new(id: impl Into<NodeId>) -> Self {
        let mut attributes = Attributes::new();
        attributes.insert(Self::ID.to_string(), id.into().into());
        Self(attributes)
    }

    /// Attach a metadata field.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// The node identifier.
    ///
    /// # Errors
    ///
    /// Returns the [`Problem`] with the `id` field if it is absent or not a
    /// string/integer.
    pub fn id(&self) -> Result<NodeId, Problem> {
        identifier(&self.0, Self::ID)
    }

    /// All fields of the node, including `id`.
    #[must_use]
    pub fn attributes(&self) -> &Attributes {
        &self.0
    }
}

impl From<Attributes> for Node {
    fn from(attributes: Attributes) -> Self {
        Self(attributes)
    }
}

/// A directed pipeline edge: `source` and `target` fields plus metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Edge(Attributes);

impl Edge {
    /// Field holding the source node identifier.
    pub const SOURCE: &'static str = "source";
    /// Field holding the target node identifier.
    pub const TARGET: &'static str = "target";

    /// Create an edge from `source` to `target` with no metadata.
    #[must_use]
    pub fn new(source: impl Into<NodeId>, target: impl Into<NodeId>) -> Self {
        let mut attributes = Attributes::new();
        attributes.insert(Self::SOURCE.to_string(), source.into().into());
        attributes.insert(Self::TARGET.to_string(), target.into().into());
        Self(attributes)
    }

    /// Attach a metadata field.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// The source node identifier.
    ///
    /// # Errors
    ///
    /// Returns the [`Problem`] with the `source` field.
    pub fn source(&self) -> Result<NodeId, Problem> {
        identifier(&self.0, Self::SOURCE)
    }

    /// The target node identifier.
    ///
    /// # Errors
    ///
    /// Returns the [`Problem`] with the `target` field.
    pub fn target(&self) -> Result<NodeId, Problem> {
        identifier(&self.0, Self::TARGET)
    }

    /// All fields of the edge, including `source` and `target`.
    #[must_use]
    pub fn attributes(&self) -> &Attributes {
        &self.0
    }
}

impl From<Attributes> for Edge {
    fn from(attributes: Attributes) -> Self {
        Self(attributes)
    }
}

// ============================================================================
// Results and entities
// ============================================================================

/// Structural statistics of a pipeline graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphStats {
    /// Number of nodes, counted as given
    pub num_nodes: usize,
    /// Number of edges, including edges with unknown endpoints
    pub num_edges: usize,
    /// Whether the graph has no cycle among its resolvable edges
    pub is_dag: bool,
}

/// Outcome of a successful save.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SavedPipeline {
    /// Store-assigned identifier of the new record
    pub id: PipelineId,
    /// Statistics computed at save time
    pub stats: GraphStats,
}

/// A persisted pipeline. Immutable once written.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineRecord {
    /// Store-assigned identifier
    pub id: PipelineId,
    /// Caller-provided name, or `Pipeline_<YYYYMMDD_HHMMSS>`
    pub name: String,
    /// Nodes exactly as submitted
    pub nodes: Vec<Node>,
    /// Edges exactly as submitted
    pub edges: Vec<Edge>,
    /// Statistics computed at save time (never recomputed)
    pub stats: GraphStats,
    /// When the store inserted the record
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case::string(json!("a"), NodeId::String("a".to_string()))]
    #[case::integer(json!(7), NodeId::from(7_i64))]
    #[case::negative(json!(-3), NodeId::from(-3_i64))]
    #[case::above_i64(json!(u64::MAX), NodeId::from(u64::MAX))]
    fn node_id_accepts_strings_and_integers(#[case] value: Value, #[case] expected: NodeId) {
        assert_eq!(NodeId::from_value(&value), Ok(expected));
    }

    #[rstest]
    #[case::float(json!(1.5))]
    #[case::boolean(json!(true))]
    #[case::null(json!(null))]
    #[case::array(json!(["a"]))]
    #[case::object(json!({"id": "a"}))]
    #[case::exponent(serde_json::from_str("1e3").expect("valid JSON"))]
    fn node_id_rejects_other_types(#[case] value: Value) {
        assert_eq!(NodeId::from_value(&value), Err(Problem::InvalidType));
    }

    #[test]
    fn string_and_integer_ids_are_distinct() {
        assert_ne!(NodeId::from("1"), NodeId::from(1_i64));
    }

    #[test]
    fn integer_ids_beyond_u64_are_kept_exactly() {
        let value: Value =
            serde_json::from_str("123456789012345678901234567890").expect("valid JSON");

        let id = NodeId::from_value(&value).expect("integer id");

        assert_eq!(id.to_string(), "123456789012345678901234567890");
        assert_eq!(Value::from(id), value);
    }

    #[test]
    fn negative_zero_names_the_same_node_as_zero() {
        let value: Value = serde_json::from_str("-0").expect("valid JSON");

        assert_eq!(NodeId::from_value(&value), Ok(NodeId::from(0_i64)));
    }

    #[test]
    fn node_serializes_as_plain_object() {
        let node = Node::new("input-1")
            .with("type", "customInput")
            .with("position", json!({"x": 10, "y": 20}));

        let value = serde_json::to_value(&node).expect("node should serialize");

        assert_eq!(
            value,
            json!({"id": "input-1", "type": "customInput", "position": {"x": 10, "y": 20}})
        );
    }

    #[test]
    fn edge_deserializes_without_endpoints() {
        let edge: Edge = serde_json::from_value(json!({"label": "dangling"}))
            .expect("any object is a structurally valid edge payload");

        assert_eq!(edge.source(), Err(Problem::Missing));
        assert_eq!(edge.target(), Err(Problem::Missing));
    }

    #[test]
    fn edge_endpoints_read_back() {
        let edge = Edge::new("a", 2_i64).with("animated", true);

        assert_eq!(edge.source(), Ok(NodeId::from("a")));
        assert_eq!(edge.target(), Ok(NodeId::from(2_i64)));
        assert_eq!(edge.attributes().get("animated"), Some(&json!(true)));
    }
}
