//! Chart and layout settings.

use force_graph::SimulationParameters;

/// Edge list fetched when the page has no `?data=` override.
pub const DEFAULT_DATA_URL: &str = "https://hub-0-1.github.io/techtree/liens.csv";

/// Logical drawing area, centered on the origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
	/// Logical width in graph units.
	pub width: f64,
	/// Logical height in graph units.
	pub height: f64,
}

impl Default for Viewport {
	fn default() -> Self {
		Self {
			width: 600.0,
			height: 600.0,
		}
	}
}

impl Viewport {
	/// `viewBox` attribute value: `[-w/2, -h/2, w, h]`.
	pub fn view_box(&self) -> String {
		format!(
			"{} {} {} {}",
			-self.width / 2.0,
			-self.height / 2.0,
			self.width,
			self.height
		)
	}

	/// Maps a client-space pointer position into graph space.
	///
	/// `rect` is the rendered SVG's bounding box as `(left, top, width, height)`.
	/// The SVG keeps the default `xMidYMid meet` aspect policy, so the viewport
	/// is scaled uniformly and centered inside the box.
	pub fn client_to_graph(&self, rect: (f64, f64, f64, f64), client: (f64, f64)) -> (f64, f64) {
		let (left, top, w, h) = rect;
		let scale = (w / self.width).min(h / self.height);
		if scale.is_nan() || scale <= 0.0 {
			return (0.0, 0.0);
		}
		(
			(client.0 - left - w / 2.0) / scale,
			(client.1 - top - h / 2.0) / scale,
		)
	}
}

/// Visual settings of the rendered chart.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartConfig {
	/// Edge list to fetch.
	pub data_url: String,
	/// Drawing area.
	pub viewport: Viewport,
	/// CSS `font` shorthand for labels.
	pub font: String,
	/// Circle radius of a node.
	pub node_radius: f64,
	/// Horizontal gap between a node's center and its label.
	pub label_offset: f64,
	/// Stroke width of the edges.
	pub link_width: f64,
	/// Distance from the arrow tip back to the path end, so arrows stop at the circle.
	pub marker_ref_x: f64,
	/// Width and height of an arrowhead.
	pub marker_size: f64,
}

impl Default for ChartConfig {
	fn default() -> Self {
		Self {
			data_url: DEFAULT_DATA_URL.into(),
			viewport: Viewport::default(),
			font: "12px sans-serif".into(),
			node_radius: 4.0,
			label_offset: 8.0,
			link_width: 1.5,
			marker_ref_x: 15.0,
			marker_size: 6.0,
		}
	}
}

impl ChartConfig {
	/// Same settings, fetching `url` instead.
	pub fn with_data_url(mut self, url: impl Into<String>) -> Self {
		self.data_url = url.into();
		self
	}
}

/// Layout engine tuning: the `force_graph` forces plus the activity schedule
/// and centering pull layered on top of them.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationConfig {
	/// Repulsion between every pair of nodes.
	pub force_charge: f32,
	/// Spring stiffness along edges.
	pub force_spring: f32,
	/// Cap on the force applied to a node per step.
	pub force_max: f32,
	/// Velocity scale of the engine.
	pub node_speed: f32,
	/// Velocity kept from one step to the next.
	pub damping_factor: f32,
	/// Mass given to every node.
	pub node_mass: f32,
	/// Seconds of simulated time per tick at full activity.
	pub time_step: f32,
	/// Fraction of the distance to the origin removed per tick at full activity.
	pub centering: f64,
	/// Share of the gap to `alpha_target` closed per tick.
	pub alpha_decay: f64,
	/// Activity below which the layout counts as settled.
	pub alpha_min: f64,
	/// Activity level held while a node is dragged.
	pub drag_alpha_target: f64,
}

impl Default for SimulationConfig {
	fn default() -> Self {
		let alpha_min = 0.001;
		Self {
			force_charge: 400.0,
			force_spring: 0.05,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
			node_mass: 10.0,
			time_step: 0.016,
			centering: 0.1,
			// reach alpha_min in ~300 ticks
			alpha_decay: 1.0 - f64::powf(alpha_min, 1.0 / 300.0),
			alpha_min,
			drag_alpha_target: 0.3,
		}
	}
}

impl SimulationConfig {
	/// Engine parameters for `force_graph`.
	pub fn parameters(&self) -> SimulationParameters {
		SimulationParameters {
			force_charge: self.force_charge,
			force_spring: self.force_spring,
			force_max: self.force_max,
			node_speed: self.node_speed,
			damping_factor: self.damping_factor,
		}
	}
}
