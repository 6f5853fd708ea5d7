use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A vertex as handed to the graph widget.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
	/// Optional identifier edges may refer to instead of the index.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<String>,
	/// Text drawn next to the node.
	#[serde(default)]
	pub label: String,
	/// Any other attributes the caller attached.
	#[serde(flatten)]
	pub attributes: Map<String, Value>,
}

impl Vertex {
	/// A vertex with only a label.
	pub fn labeled(label: impl Into<String>) -> Self {
		Self {
			label: label.into(),
			..Self::default()
		}
	}

	/// Set the identifier.
	pub fn with_id(mut self, id: impl Into<String>) -> Self {
		self.id = Some(id.into());
		self
	}
}

/// Reference from an edge to a vertex: its position in `vertices` or its id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeRef {
	/// Index into the vertex list.
	Index(usize),
	/// Value of a vertex `id`.
	Id(String),
}

impl From<usize> for NodeRef {
	fn from(index: usize) -> Self {
		Self::Index(index)
	}
}

impl From<&str> for NodeRef {
	fn from(id: &str) -> Self {
		Self::Id(id.into())
	}
}

/// An edge between two vertices of the same input.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Edge {
	/// Where the edge starts.
	pub source: NodeRef,
	/// Where the edge ends.
	pub target: NodeRef,
	/// Any other attributes the caller attached.
	#[serde(flatten)]
	pub attributes: Map<String, Value>,
}

impl Edge {
	/// An edge without extra attributes.
	pub fn new(source: impl Into<NodeRef>, target: impl Into<NodeRef>) -> Self {
		Self {
			source: source.into(),
			target: target.into(),
			attributes: Map::new(),
		}
	}
}

/// Input of the graph widget.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphInput {
	/// Nodes, in drawing order.
	#[serde(default)]
	pub vertices: Vec<Vertex>,
	/// Links between nodes.
	#[serde(default)]
	pub edges: Vec<Edge>,
}

/// An edge with its endpoints resolved to vertex indices. `None` marks an
/// endpoint that names no vertex.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Link {
	/// Index of the source vertex.
	pub source: Option<usize>,
	/// Index of the target vertex.
	pub target: Option<usize>,
}

impl Link {
	/// Both endpoints, when both resolved.
	pub fn endpoints(&self) -> Option<(usize, usize)> {
		Some((self.source?, self.target?))
	}
}

impl GraphInput {
	/// Resolve every edge, in order. Unknown endpoints become `None`.
	pub fn resolve_links(&self) -> Vec<Link> {
		let ids: HashMap<&str, usize> = self
			.vertices
			.iter()
			.enumerate()
			.filter_map(|(i, v)| v.id.as_deref().map(|id| (id, i)))
			.collect();
		let resolve = |node: &NodeRef| match node {
			NodeRef::Index(i) => (*i < self.vertices.len()).then_some(*i),
			NodeRef::Id(id) => ids.get(id.as_str()).copied(),
		};
		self.edges
			.iter()
			.map(|e| Link {
				source: resolve(&e.source),
				target: resolve(&e.target),
			})
			.collect()
	}
}
