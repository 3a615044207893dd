use std::collections::HashMap;

use log::{debug, warn};

use super::types::{BuildOutput, Edge, EdgeTypes, Graph, Node, NodeIdx, RawRecord};

fn endpoint(value: &Option<String>) -> Option<&str> {
	value.as_deref().filter(|s| !s.is_empty())
}

/// Turns raw rows into a graph whose edges point at their nodes by index.
///
/// Rows without a usable `source` or `target` are dropped without error.
/// Nodes and edge types keep the order in which they first appear, so the
/// same input always yields the same graph.
pub fn build(records: impl IntoIterator<Item = RawRecord>) -> BuildOutput {
	let mut id_to_idx: HashMap<String, NodeIdx> = HashMap::new();
	let mut nodes = Vec::new();
	let mut edges = Vec::new();
	let mut types = EdgeTypes::default();
	let mut dropped = 0;

	let mut resolve = |id: &str, nodes: &mut Vec<Node>| -> NodeIdx {
		if let Some(&idx) = id_to_idx.get(id) {
			return idx;
		}
		let idx = nodes.len();
		nodes.push(Node::new(id));
		id_to_idx.insert(id.to_owned(), idx);
		idx
	};

	for record in records {
		let (Some(source), Some(target)) = (endpoint(&record.source), endpoint(&record.target))
		else {
			dropped += 1;
			continue;
		};

		let kind = record.kind.clone().unwrap_or_default();
		types.insert(&kind);
		let source = resolve(source, &mut nodes);
		let target = resolve(target, &mut nodes);
		edges.push(Edge {
			source,
			target,
			kind,
			extra: record.extra,
		});
	}

	if dropped > 0 {
		warn!("dropped {} record(s) without source or target", dropped);
	}
	debug!(
		"built graph: {} nodes, {} edges, {} edge types",
		nodes.len(),
		edges.len(),
		types.len()
	);

	BuildOutput {
		graph: Graph { nodes, edges },
		types,
		dropped,
	}
}
