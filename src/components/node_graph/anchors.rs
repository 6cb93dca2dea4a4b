//! Anchor slot geometry.
//!
//! An anchor's slot is its index within its node's input or output list, not
//! its id: reordering a list moves the anchors on screen. Unknown nodes
//! resolve to the world origin and unknown anchor ids to slot 0, so edges that
//! briefly reference stale ids during a document swap still draw.

use super::config::{AnchorWidthMode, CanvasConfig};
use super::store::{NodePlacement, NodeStore};
use super::types::{Anchor, AnchorDirection, Point};

/// An anchor found under the pointer.
#[derive(Clone, Debug, PartialEq)]
pub struct AnchorRef {
	pub node_id: String,
	pub anchor: Anchor,
	pub direction: AnchorDirection,
	/// World position of the anchor dot.
	pub position: Point,
}

/// World position of the slot at `index` on one side of a node.
pub fn slot_position(
	placement: &NodePlacement,
	index: usize,
	direction: AnchorDirection,
	config: &CanvasConfig,
) -> Point {
	let y = placement.position.y + config.anchor_header_offset + index as f64 * config.anchor_pitch;
	let x = match direction {
		AnchorDirection::Input => placement.position.x,
		AnchorDirection::Output => {
			let width = match config.anchor_width_mode {
				AnchorWidthMode::Fixed => config.anchor_column_width,
				AnchorWidthMode::NodeWidth => placement.size.width,
			};
			placement.position.x + width
		}
	};
	Point::new(x, y)
}

/// World position of `anchor_id` on `node_id`, with fallbacks instead of errors.
pub fn resolve_anchor_position(
	store: &NodeStore,
	node_id: &str,
	anchor_id: &str,
	direction: AnchorDirection,
	config: &CanvasConfig,
) -> Point {
	let Some(placement) = store.get(node_id) else {
		return Point::ORIGIN;
	};
	let index = placement
		.node
		.anchors(direction)
		.iter()
		.position(|a| a.id == anchor_id)
		.unwrap_or(0);
	slot_position(placement, index, direction, config)
}

/// Anchor whose dot lies within `radius` world units of `world`.
///
/// Nodes are searched topmost first; the closest anchor on the first node with
/// a hit wins.
pub fn anchor_at(store: &NodeStore, world: Point, radius: f64, config: &CanvasConfig) -> Option<AnchorRef> {
	for placement in store.placements().iter().rev() {
		let mut best: Option<(f64, AnchorRef)> = None;
		for direction in [AnchorDirection::Input, AnchorDirection::Output] {
			for (index, anchor) in placement.node.anchors(direction).iter().enumerate() {
				let position = slot_position(placement, index, direction, config);
				let dist = position.distance(world);
				if dist <= radius && best.as_ref().is_none_or(|(d, _)| dist < *d) {
					best = Some((
						dist,
						AnchorRef {
							node_id: placement.id().to_string(),
							anchor: anchor.clone(),
							direction,
							position,
						},
					));
				}
			}
		}
		if let Some((_, hit)) = best {
			return Some(hit);
		}
	}
	None
}
