//! Edge routing: anchor endpoints joined by a horizontal S-curve.
//!
//! Control points sit a fixed distance to the right of the start and to the
//! left of the end, independent of edge length, so curvature looks the same at
//! every zoom level (short edges look exaggerated).

use log::warn;

use super::anchors::resolve_anchor_position;
use super::config::CanvasConfig;
use super::store::NodeStore;
use super::types::{AnchorDirection, GraphEdge, Point};

/// A routed edge as a cubic Bézier curve in world space.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgePath {
	pub id: String,
	pub source: String,
	pub target: String,
	pub start: Point,
	pub control1: Point,
	pub control2: Point,
	pub end: Point,
}

impl EdgePath {
	/// Point on the curve at parameter `t` in `[0, 1]`.
	pub fn point_at(&self, t: f64) -> Point {
		let t = t.clamp(0.0, 1.0);
		let u = 1.0 - t;
		self.start * (u * u * u)
			+ self.control1 * (3.0 * u * u * t)
			+ self.control2 * (3.0 * u * t * t)
			+ self.end * (t * t * t)
	}

	/// Position of the traveling flow marker after `time` seconds.
	///
	/// `speed` is in full traversals per second; the marker loops from start
	/// to end.
	pub fn flow_marker(&self, time: f64, speed: f64) -> Point {
		self.point_at((time * speed).rem_euclid(1.0))
	}
}

/// Route a single edge from its source output anchor to its target input anchor.
pub fn route_edge(store: &NodeStore, edge: &GraphEdge, config: &CanvasConfig) -> EdgePath {
	let start = resolve_anchor_position(
		store,
		&edge.source,
		&edge.source_handle,
		AnchorDirection::Output,
		config,
	);
	let end = resolve_anchor_position(
		store,
		&edge.target,
		&edge.target_handle,
		AnchorDirection::Input,
		config,
	);
	let bend = Point::new(config.edge_control_offset, 0.0);
	EdgePath {
		id: edge.id.clone(),
		source: edge.source.clone(),
		target: edge.target.clone(),
		start,
		control1: start + bend,
		control2: end - bend,
		end,
	}
}

/// Route every edge in document order.
pub fn route_edges(store: &NodeStore, edges: &[GraphEdge], config: &CanvasConfig) -> Vec<EdgePath> {
	edges.iter().map(|edge| route_edge(store, edge, config)).collect()
}

/// Log edges whose endpoints reference nodes that are not loaded.
pub fn report_dangling(store: &NodeStore, edges: &[GraphEdge]) {
	for edge in edges {
		for id in [&edge.source, &edge.target] {
			if store.get(id).is_none() {
				warn!("node-graph: edge {} references unknown node {}", edge.id, id);
			}
		}
	}
}
