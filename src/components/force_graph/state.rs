use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData};
use log::{debug, warn};

use super::types::{Graph, NodeIdx};
use crate::config::{SimulationConfig, Viewport};

/// Spacing of the initial spiral placement.
const INITIAL_RADIUS: f64 = 10.0;

/// Force layout over a [`Graph`].
///
/// Owns the graph and writes node positions back into it after every tick,
/// so [`Simulation::graph`] always reflects the latest step.
pub struct Simulation {
	graph: Graph,
	engine: ForceGraph<NodeIdx, ()>,
	config: SimulationConfig,
	alpha: f64,
	alpha_target: f64,
	ticks: u64,
}

impl Simulation {
	/// Seeds unplaced nodes on a spiral around the origin and loads the
	/// graph into the engine at full activity.
	pub fn new(mut graph: Graph, config: SimulationConfig) -> Self {
		let mut engine = ForceGraph::new(config.parameters());
		let golden_angle = PI * (3.0 - 5f64.sqrt());
		let mut handles: Vec<DefaultNodeIdx> = Vec::with_capacity(graph.nodes.len());

		for (i, node) in graph.nodes.iter_mut().enumerate() {
			if node.x == 0.0 && node.y == 0.0 {
				let radius = INITIAL_RADIUS * (0.5 + i as f64).sqrt();
				let angle = i as f64 * golden_angle;
				node.x = radius * angle.cos();
				node.y = radius * angle.sin();
			}
			if let Some(fx) = node.fx {
				node.x = fx;
			}
			if let Some(fy) = node.fy {
				node.y = fy;
			}

			handles.push(engine.add_node(NodeData {
				x: node.x as f32,
				y: node.y as f32,
				mass: config.node_mass,
				is_anchor: node.is_pinned(),
				user_data: i,
			}));
		}

		for edge in &graph.edges {
			// self-loops are drawn but exert no spring force
			if edge.source == edge.target {
				continue;
			}
			match (handles.get(edge.source), handles.get(edge.target)) {
				(Some(&src), Some(&tgt)) => {
					engine.add_edge(src, tgt, EdgeData::default());
				}
				_ => warn!(
					"edge {} -> {} points outside the graph, ignored by the layout",
					edge.source, edge.target
				),
			}
		}

		debug!(
			"simulation started with {} nodes and {} edges",
			graph.nodes.len(),
			graph.edges.len()
		);

		Self {
			graph,
			engine,
			config,
			alpha: 1.0,
			alpha_target: 0.0,
			ticks: 0,
		}
	}

	/// Graph with positions as of the last tick.
	pub fn graph(&self) -> &Graph {
		&self.graph
	}

	/// Settings the layout was created with.
	pub fn config(&self) -> &SimulationConfig {
		&self.config
	}

	/// Current activity level, in `[0, 1]`.
	pub fn alpha(&self) -> f64 {
		self.alpha
	}

	/// Level the activity relaxes toward.
	pub fn alpha_target(&self) -> f64 {
		self.alpha_target
	}

	/// Sets the resting activity, clamped to `[0, 1]`.
	pub fn set_alpha_target(&mut self, target: f64) {
		self.alpha_target = target.clamp(0.0, 1.0);
	}

	/// Ticks run so far.
	pub fn ticks(&self) -> u64 {
		self.ticks
	}

	/// True once the layout has cooled down and nothing keeps it warm.
	pub fn is_settled(&self) -> bool {
		self.alpha < self.config.alpha_min && self.alpha_target < self.config.alpha_min
	}

	/// Advances the layout by one step and copies positions into the graph.
	pub fn tick(&mut self) {
		self.alpha += (self.alpha_target - self.alpha) * self.config.alpha_decay;
		self.engine.update(self.config.time_step * self.alpha as f32);

		let pull = (self.config.centering * self.alpha) as f32;
		let nodes = &mut self.graph.nodes;
		self.engine.visit_nodes_mut(|n| {
			let node = &mut nodes[n.data.user_data];
			if n.data.is_anchor {
				n.data.x = node.fx.unwrap_or(node.x) as f32;
				n.data.y = node.fy.unwrap_or(node.y) as f32;
			} else {
				n.data.x -= n.data.x * pull;
				n.data.y -= n.data.y * pull;
			}
			node.x = node.fx.unwrap_or(n.data.x as f64);
			node.y = node.fy.unwrap_or(n.data.y as f64);
		});
		self.ticks += 1;
	}

	/// Holds `idx` at `(x, y)` until [`Simulation::unpin`].
	pub fn pin(&mut self, idx: NodeIdx, x: f64, y: f64) {
		let Some(node) = self.graph.nodes.get_mut(idx) else {
			return;
		};
		node.fx = Some(x);
		node.fy = Some(y);
		node.x = x;
		node.y = y;
		self.engine.visit_nodes_mut(|n| {
			if n.data.user_data == idx {
				n.data.x = x as f32;
				n.data.y = y as f32;
				n.data.is_anchor = true;
			}
		});
	}

	/// Returns `idx` to free simulation.
	pub fn unpin(&mut self, idx: NodeIdx) {
		let Some(node) = self.graph.nodes.get_mut(idx) else {
			return;
		};
		node.fx = None;
		node.fy = None;
		self.engine.visit_nodes_mut(|n| {
			if n.data.user_data == idx {
				n.data.is_anchor = false;
			}
		});
	}
}

/// Node held by the pointer, if any.
#[derive(Clone, Debug, Default)]
pub struct DragState {
	/// Dragged node.
	pub node: Option<NodeIdx>,
}

/// Layout plus pointer interaction for one mounted chart.
pub struct ForceGraphState {
	/// Layout over the chart's graph.
	pub simulation: Simulation,
	/// Current drag gesture.
	pub drag: DragState,
	/// Drawing area, for pointer mapping.
	pub viewport: Viewport,
}

impl ForceGraphState {
	/// Starts a layout over `graph` with no gesture in progress.
	pub fn new(graph: Graph, config: SimulationConfig, viewport: Viewport) -> Self {
		Self {
			simulation: Simulation::new(graph, config),
			drag: DragState::default(),
			viewport,
		}
	}

	/// Ticks the layout unless it has come to rest. Returns whether it moved.
	pub fn step(&mut self) -> bool {
		if self.simulation.is_settled() {
			return false;
		}
		self.simulation.tick();
		true
	}

	/// Gesture start: wakes the layout and pins `idx` where it stands.
	pub fn begin_drag(&mut self, idx: NodeIdx) {
		let Some(node) = self.simulation.graph().nodes.get(idx) else {
			return;
		};
		let (x, y) = (node.x, node.y);
		let target = self.simulation.config().drag_alpha_target;
		self.simulation.set_alpha_target(target);
		self.simulation.pin(idx, x, y);
		self.drag.node = Some(idx);
	}

	/// Gesture move: pins the dragged node at graph position `(x, y)`.
	pub fn drag_to(&mut self, x: f64, y: f64) {
		if let Some(idx) = self.drag.node {
			self.simulation.pin(idx, x, y);
		}
	}

	/// Gesture end: lets the layout cool down and releases the node.
	pub fn end_drag(&mut self) {
		if let Some(idx) = self.drag.node.take() {
			self.simulation.set_alpha_target(0.0);
			self.simulation.unpin(idx);
		}
	}

	/// Whether a gesture is in progress.
	pub fn is_dragging(&self) -> bool {
		self.drag.node.is_some()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::builder::build;
	use crate::components::force_graph::types::{Edge, RawRecord};

	fn triangle() -> Graph {
		build([
			RawRecord::new("A", "B", "x"),
			RawRecord::new("B", "C", "y"),
			RawRecord::new("C", "A", "x"),
		])
		.graph
	}

	#[test]
	fn initial_positions_are_distinct_and_deterministic() {
		let a = Simulation::new(triangle(), SimulationConfig::default());
		let b = Simulation::new(triangle(), SimulationConfig::default());
		assert_eq!(a.graph(), b.graph());

		let nodes = &a.graph().nodes;
		for (i, n) in nodes.iter().enumerate() {
			for m in &nodes[i + 1..] {
				assert!(n.x != m.x || n.y != m.y);
			}
		}
	}

	#[test]
	fn pinned_node_stays_put_across_ticks() {
		let mut sim = Simulation::new(triangle(), SimulationConfig::default());
		sim.pin(1, 50.0, -25.0);
		for _ in 0..20 {
			sim.tick();
			let node = &sim.graph().nodes[1];
			assert_eq!((node.x, node.y), (50.0, -25.0));
			assert_eq!((node.fx, node.fy), (Some(50.0), Some(-25.0)));
		}
	}

	#[test]
	fn unpin_clears_override() {
		let mut sim = Simulation::new(triangle(), SimulationConfig::default());
		sim.pin(0, 10.0, 10.0);
		sim.unpin(0);
		assert!(!sim.graph().nodes[0].is_pinned());
	}

	#[test]
	fn pin_out_of_range_is_ignored() {
		let mut sim = Simulation::new(triangle(), SimulationConfig::default());
		sim.pin(99, 1.0, 1.0);
		sim.unpin(99);
		assert!(sim.graph().nodes.iter().all(|n| !n.is_pinned()));
	}

	#[test]
	fn alpha_cools_down_until_settled() {
		let mut sim = Simulation::new(triangle(), SimulationConfig::default());
		assert!(!sim.is_settled());
		let mut previous = sim.alpha();
		for _ in 0..400 {
			sim.tick();
			assert!(sim.alpha() <= previous);
			previous = sim.alpha();
		}
		assert!(sim.is_settled());
		assert_eq!(sim.ticks(), 400);
	}

	#[test]
	fn alpha_target_keeps_layout_warm() {
		let mut sim = Simulation::new(triangle(), SimulationConfig::default());
		sim.set_alpha_target(0.3);
		for _ in 0..1000 {
			sim.tick();
		}
		assert!((sim.alpha() - 0.3).abs() < 1e-3);
		assert!(!sim.is_settled());
	}

	#[test]
	fn edges_outside_the_graph_are_ignored() {
		let mut graph = triangle();
		graph.edges.push(Edge {
			source: 0,
			target: 17,
			kind: "x".into(),
			extra: Default::default(),
		});
		let mut sim = Simulation::new(graph, SimulationConfig::default());
		sim.tick();
		assert_eq!(sim.graph().nodes.len(), 3);
		assert_eq!(sim.graph().edges.len(), 4);
	}

	#[test]
	fn empty_graph_ticks() {
		let mut sim = Simulation::new(Graph::default(), SimulationConfig::default());
		sim.tick();
		assert!(sim.graph().is_empty());
	}

	#[test]
	fn drag_gesture_pins_then_releases() {
		let mut state = ForceGraphState::new(
			triangle(),
			SimulationConfig::default(),
			Viewport::default(),
		);
		let (x, y) = {
			let n = &state.simulation.graph().nodes[2];
			(n.x, n.y)
		};

		state.begin_drag(2);
		assert!(state.is_dragging());
		assert_eq!(state.simulation.alpha_target(), 0.3);
		let node = &state.simulation.graph().nodes[2];
		assert_eq!((node.fx, node.fy), (Some(x), Some(y)));

		state.drag_to(120.0, 80.0);
		state.step();
		let node = &state.simulation.graph().nodes[2];
		assert_eq!((node.x, node.y), (120.0, 80.0));

		state.end_drag();
		assert!(!state.is_dragging());
		assert_eq!(state.simulation.alpha_target(), 0.0);
		assert!(!state.simulation.graph().nodes[2].is_pinned());
	}

	#[test]
	fn drag_wakes_a_settled_layout() {
		let mut state = ForceGraphState::new(
			triangle(),
			SimulationConfig::default(),
			Viewport::default(),
		);
		while state.step() {}
		assert!(!state.step());

		state.begin_drag(0);
		assert!(state.step());
	}

	#[test]
	fn drag_without_gesture_is_noop() {
		let mut state = ForceGraphState::new(
			triangle(),
			SimulationConfig::default(),
			Viewport::default(),
		);
		state.drag_to(1.0, 1.0);
		state.end_drag();
		assert!(state.simulation.graph().nodes.iter().all(|n| !n.is_pinned()));
		assert_eq!(state.simulation.alpha_target(), 0.0);
	}
}
