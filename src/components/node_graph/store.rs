//! Mutable node placements shadowing the host's graph document.
//!
//! A load replaces every placement; afterwards only drags move nodes. The
//! document data of each node is shared behind an `Rc`, so moving one node
//! never touches the others.

use std::collections::HashMap;
use std::rc::Rc;

use log::{info, warn};

use super::config::CanvasConfig;
use super::types::{GraphDocument, GraphEdge, GraphNode, Point, Size, SizeHint};

/// Current on-canvas geometry of one node plus its immutable document data.
#[derive(Clone, Debug, PartialEq)]
pub struct NodePlacement {
	pub node: Rc<GraphNode>,
	/// Top-left corner in world coordinates.
	pub position: Point,
	pub size: Size,
}

impl NodePlacement {
	/// Apply position and size defaults to a document node.
	pub fn from_document(node: &GraphNode, config: &CanvasConfig) -> Self {
		let hint = node.size.unwrap_or_default();
		Self {
			node: Rc::new(node.clone()),
			position: node.position.unwrap_or(Point::ORIGIN),
			size: Size::new(
				hint.width.unwrap_or(config.default_node_size.width),
				hint.height.unwrap_or(config.default_node_size.height),
			),
		}
	}

	pub fn id(&self) -> &str {
		&self.node.id
	}

	/// Bottom-right corner in world coordinates.
	pub fn far_corner(&self) -> Point {
		self.position + Point::new(self.size.width, self.size.height)
	}

	pub fn contains(&self, world: Point) -> bool {
		let far = self.far_corner();
		world.x >= self.position.x && world.x <= far.x && world.y >= self.position.y && world.y <= far.y
	}
}

/// Ordered node placements with lookup by id.
#[derive(Clone, Debug, Default)]
pub struct NodeStore {
	placements: Vec<NodePlacement>,
	by_id: HashMap<String, usize>,
}

impl NodeStore {
	/// Replace every placement with the nodes of a new document.
	pub fn load(&mut self, nodes: &[GraphNode], config: &CanvasConfig) {
		self.placements.clear();
		self.by_id.clear();
		for node in nodes {
			// First occurrence wins; later duplicates are neither drawn nor hit.
			if self.by_id.contains_key(&node.id) {
				warn!("node-graph: ignoring duplicate node id {}", node.id);
				continue;
			}
			self.by_id.insert(node.id.clone(), self.placements.len());
			self.placements.push(NodePlacement::from_document(node, config));
		}
		info!("node-graph: loaded {} node placements", self.placements.len());
	}

	/// Move exactly one node. Unknown ids are ignored.
	pub fn move_node(&mut self, id: &str, position: Point) {
		if let Some(&i) = self.by_id.get(id) {
			self.placements[i].position = position;
		}
	}

	pub fn get(&self, id: &str) -> Option<&NodePlacement> {
		self.by_id.get(id).map(|&i| &self.placements[i])
	}

	pub fn placements(&self) -> &[NodePlacement] {
		&self.placements
	}

	pub fn len(&self) -> usize {
		self.placements.len()
	}

	pub fn is_empty(&self) -> bool {
		self.placements.is_empty()
	}

	/// Topmost node containing a world point. Later nodes draw above earlier ones.
	pub fn node_at(&self, world: Point) -> Option<&NodePlacement> {
		self.placements.iter().rev().find(|p| p.contains(world))
	}

	/// Rebuild a document carrying the current positions and resolved sizes.
	pub fn to_document(&self, edges: &[GraphEdge]) -> GraphDocument {
		GraphDocument {
			nodes: self
				.placements
				.iter()
				.map(|p| GraphNode {
					position: Some(p.position),
					size: Some(SizeHint {
						width: Some(p.size.width),
						height: Some(p.size.height),
					}),
					..(*p.node).clone()
				})
				.collect(),
			edges: edges.to_vec(),
		}
	}
}
