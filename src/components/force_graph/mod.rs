//! CSV edge list to interactive SVG force layout: loading, graph building,
//! layout, scene and the Leptos component that ties them together.

mod builder;
mod component;
mod loader;
mod render;
mod state;
mod types;

pub use builder::build;
pub use component::{ForceGraphSvg, TickLoop};
pub use loader::{fetch_records, parse_records};
pub use render::{LinkPath, Marker, NodeGlyph, Palette, Scene, link_arc};
pub use state::{DragState, ForceGraphState, Simulation};
pub use types::{BuildOutput, Edge, EdgeTypes, Graph, Node, NodeIdx, RawRecord};

use crate::error::LoadError;

/// Fetches `url` and builds the graph it describes.
pub async fn load_graph(url: &str) -> Result<BuildOutput, LoadError> {
	Ok(build(fetch_records(url).await?))
}
