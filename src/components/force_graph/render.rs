use super::types::{EdgeTypes, Graph, Node, NodeIdx};
use crate::config::ChartConfig;

/// d3 `schemeCategory10`.
const COLORS: &[&str] = &[
	"#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
	"#bcbd22", "#17becf",
];

/// Ordinal color scale over edge types.
#[derive(Clone, Copy, Debug, Default)]
pub struct Palette;

impl Palette {
	/// Color of the type at `type_idx`, cycling after ten.
	pub fn color_of(&self, type_idx: usize) -> &'static str {
		COLORS[type_idx % COLORS.len()]
	}
}

/// Arrowhead definition for one edge type.
#[derive(Clone, Debug, PartialEq)]
pub struct Marker {
	/// Element id, referenced by `marker-end`.
	pub id: String,
	/// Edge type it belongs to.
	pub kind: String,
	/// Fill of the arrowhead.
	pub color: &'static str,
}

/// Drawn edge.
#[derive(Clone, Debug, PartialEq)]
pub struct LinkPath {
	/// Node the arc starts at.
	pub source: NodeIdx,
	/// Node the arc ends at.
	pub target: NodeIdx,
	/// Edge type.
	pub kind: String,
	/// Stroke color, same as the type's marker.
	pub stroke: &'static str,
	/// `marker-end` attribute value.
	pub marker_end: String,
	/// Path geometry; empty when an endpoint is missing from the graph.
	pub d: String,
}

/// Drawn node: circle plus label, moved as a group.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeGlyph {
	/// Node this group draws.
	pub node: NodeIdx,
	/// Text next to the circle.
	pub label: String,
	/// `transform` attribute value.
	pub transform: String,
}

/// Visual state of one chart: built once, then kept in step with the layout.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
	/// `viewBox` of the root `<svg>`.
	pub view_box: String,
	/// One per edge type.
	pub markers: Vec<Marker>,
	/// One per edge.
	pub links: Vec<LinkPath>,
	/// One per node.
	pub nodes: Vec<NodeGlyph>,
	frames: u64,
}

/// Clockwise circular arc from `source` to `target` with radius equal to
/// their distance, so opposite edges between two nodes bend apart.
pub fn link_arc(source: &Node, target: &Node) -> String {
	let r = (target.x - source.x).hypot(target.y - source.y);
	format!(
		"M{},{} A{},{} 0 0,1 {},{}",
		source.x, source.y, r, r, target.x, target.y
	)
}

/// Group transform placing a node glyph at the node's position.
pub fn translate(node: &Node) -> String {
	format!("translate({},{})", node.x, node.y)
}

/// Id of the arrow marker for the type at `type_idx`.
pub fn marker_id(type_idx: usize) -> String {
	format!("arrow-{}", type_idx)
}

impl Scene {
	/// One marker per edge type, one path per edge, one group per node.
	pub fn build(graph: &Graph, types: &EdgeTypes, palette: &Palette, config: &ChartConfig) -> Self {
		let markers = types
			.iter()
			.enumerate()
			.map(|(i, kind)| Marker {
				id: marker_id(i),
				kind: kind.to_owned(),
				color: palette.color_of(i),
			})
			.collect();

		let links = graph
			.edges
			.iter()
			.map(|edge| {
				let type_idx = types.index_of(&edge.kind).unwrap_or_default();
				let d = graph
					.endpoints(edge)
					.map(|(source, target)| link_arc(source, target))
					.unwrap_or_default();
				LinkPath {
					source: edge.source,
					target: edge.target,
					kind: edge.kind.clone(),
					stroke: palette.color_of(type_idx),
					marker_end: format!("url(#{})", marker_id(type_idx)),
					d,
				}
			})
			.collect();

		let nodes = graph
			.nodes
			.iter()
			.enumerate()
			.map(|(i, node)| NodeGlyph {
				node: i,
				label: node.id.clone(),
				transform: translate(node),
			})
			.collect();

		Self {
			view_box: config.viewport.view_box(),
			markers,
			links,
			nodes,
			frames: 0,
		}
	}

	/// Per-tick update: link geometry first, then node positions.
	pub fn sync(&mut self, graph: &Graph) {
		for link in &mut self.links {
			if let (Some(source), Some(target)) =
				(graph.nodes.get(link.source), graph.nodes.get(link.target))
			{
				link.d = link_arc(source, target);
			}
		}
		for glyph in &mut self.nodes {
			if let Some(node) = graph.nodes.get(glyph.node) {
				glyph.transform = translate(node);
			}
		}
		self.frames += 1;
	}

	/// Number of ticks applied since the scene was built.
	pub fn frames(&self) -> u64 {
		self.frames
	}

	/// True when there is nothing to draw.
	pub fn is_empty(&self) -> bool {
		self.markers.is_empty() && self.links.is_empty() && self.nodes.is_empty()
	}
}
