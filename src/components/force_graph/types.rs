use std::collections::BTreeMap;

/// Position of a node in `Graph::nodes`.
pub type NodeIdx = usize;

/// One CSV row, checked against the expected columns at load time.
///
/// `None` means the row had no cell for that column.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawRecord {
	/// `source` cell.
	pub source: Option<String>,
	/// `target` cell.
	pub target: Option<String>,
	/// `type` cell.
	pub kind: Option<String>,
	/// Every other column, by header name.
	pub extra: BTreeMap<String, String>,
}

impl RawRecord {
	/// Row with all three known cells present and no extra columns.
	pub fn new(source: &str, target: &str, kind: &str) -> Self {
		Self {
			source: Some(source.into()),
			target: Some(target.into()),
			kind: Some(kind.into()),
			extra: BTreeMap::new(),
		}
	}
}

/// A graph vertex and its layout position.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
	/// Identifier from the `source`/`target` columns, also the label.
	pub id: String,
	/// Current x, written by the layout.
	pub x: f64,
	/// Current y, written by the layout.
	pub y: f64,
	/// Pinned x; overrides the layout while set.
	pub fx: Option<f64>,
	/// Pinned y; overrides the layout while set.
	pub fy: Option<f64>,
}

impl Node {
	/// Unpinned node at the origin.
	pub fn new(id: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			x: 0.0,
			y: 0.0,
			fx: None,
			fy: None,
		}
	}

	/// Whether either axis is pinned.
	pub fn is_pinned(&self) -> bool {
		self.fx.is_some() || self.fy.is_some()
	}
}

/// A directed, typed edge whose endpoints are resolved to node indices.
///
/// `source` and `target` index the owning graph's `nodes`; edges coming out
/// of [`build`](super::build) always satisfy this.
#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
	/// Tail node.
	pub source: NodeIdx,
	/// Head node, where the arrow points.
	pub target: NodeIdx,
	/// Edge type, picks the color and arrow marker.
	pub kind: String,
	/// Columns other than `source`, `target` and `type`, untouched.
	pub extra: BTreeMap<String, String>,
}

/// Nodes plus the edges between them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Graph {
	/// One entry per distinct id.
	pub nodes: Vec<Node>,
	/// Edges in input order.
	pub edges: Vec<Edge>,
}

impl Graph {
	/// True when there is nothing to draw.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty() && self.edges.is_empty()
	}

	/// Index of the node named `id`.
	pub fn node_index(&self, id: &str) -> Option<NodeIdx> {
		self.nodes.iter().position(|n| n.id == id)
	}

	/// Source and target nodes of `edge`, or `None` if either index is out of range.
	pub fn endpoints(&self, edge: &Edge) -> Option<(&Node, &Node)> {
		Some((self.nodes.get(edge.source)?, self.nodes.get(edge.target)?))
	}
}

/// Distinct edge types in order of first appearance.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EdgeTypes(Vec<String>);

impl EdgeTypes {
	/// Adds `kind` unless already present; returns its position either way.
	pub fn insert(&mut self, kind: &str) -> usize {
		match self.index_of(kind) {
			Some(i) => i,
			None => {
				self.0.push(kind.to_owned());
				self.0.len() - 1
			}
		}
	}

	/// Position of `kind`, which is also its color index.
	pub fn index_of(&self, kind: &str) -> Option<usize> {
		self.0.iter().position(|k| k == kind)
	}

	/// Number of distinct types.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// True when no edge survived.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Types in first-appearance order.
	pub fn iter(&self) -> impl Iterator<Item = &str> {
		self.0.iter().map(String::as_str)
	}
}

/// Everything derived from one batch of raw records.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BuildOutput {
	/// Surviving edges and their nodes.
	pub graph: Graph,
	/// Types of the surviving edges.
	pub types: EdgeTypes,
	/// Records rejected for a missing or empty endpoint.
	pub dropped: usize,
}
