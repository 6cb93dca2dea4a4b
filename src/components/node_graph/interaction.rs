//! Pointer gesture state machine.
//!
//! At most one gesture is active per pointer session. A gesture can only start
//! from [`Interaction::Idle`], and pointer-up always returns to `Idle` no matter
//! where the pointer is.

use log::debug;

use super::config::CanvasConfig;
use super::store::NodeStore;
use super::types::Point;
use super::viewport::{Viewport, ZoomDirection};

/// The active pointer gesture.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Interaction {
	#[default]
	Idle,
	/// Moving one node. Positions are recomputed from the start of the
	/// gesture on every move, never accumulated.
	DraggingNode {
		node_id: String,
		pointer_start: Point,
		node_start: Point,
	},
	/// Moving the whole canvas.
	Panning { pointer_start: Point, offset_start: Point },
}

impl Interaction {
	pub fn is_idle(&self) -> bool {
		matches!(self, Interaction::Idle)
	}

	pub fn dragged_node(&self) -> Option<&str> {
		match self {
			Interaction::DraggingNode { node_id, .. } => Some(node_id),
			_ => None,
		}
	}

	/// Begin a gesture at a screen point.
	///
	/// Starts a node drag when the point hits a node, a pan otherwise. Ignored
	/// unless idle. Returns whether a gesture started.
	pub fn pointer_down(&mut self, pointer: Point, store: &NodeStore, viewport: &Viewport) -> bool {
		if !self.is_idle() {
			return false;
		}
		let world = viewport.screen_to_world(pointer);
		*self = match store.node_at(world) {
			Some(node) => Interaction::DraggingNode {
				node_id: node.id().to_string(),
				pointer_start: pointer,
				node_start: node.position,
			},
			None => Interaction::Panning {
				pointer_start: pointer,
				offset_start: viewport.offset,
			},
		};
		debug!("node-graph: gesture started: {:?}", self);
		true
	}

	/// Apply pointer movement to the active gesture. Returns whether anything moved.
	pub fn pointer_move(&self, pointer: Point, store: &mut NodeStore, viewport: &mut Viewport) -> bool {
		match self {
			Interaction::Idle => false,
			Interaction::DraggingNode {
				node_id,
				pointer_start,
				node_start,
			} => {
				let delta = (pointer - *pointer_start) / viewport.scale;
				store.move_node(node_id, *node_start + delta);
				true
			}
			Interaction::Panning {
				pointer_start,
				offset_start,
			} => {
				viewport.set_offset(*offset_start + (pointer - *pointer_start));
				true
			}
		}
	}

	/// End any gesture.
	pub fn pointer_up(&mut self) {
		if !self.is_idle() {
			debug!("node-graph: gesture ended");
		}
		*self = Interaction::Idle;
	}
}

/// Zoom by one wheel step around the cursor.
pub fn wheel(delta_y: f64, cursor: Point, viewport: &mut Viewport, config: &CanvasConfig) {
	viewport.zoom(ZoomDirection::from_wheel(delta_y), Some(cursor), config);
}
