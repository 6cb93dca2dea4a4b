//! Pan and zoom transform between world space and screen space.
//!
//! The transform always satisfies `screen = world * scale + offset`. Every
//! operation that changes `scale` around a fixed screen point recomputes
//! `offset` so the relation still holds at that point.

use log::info;

use super::config::CanvasConfig;
use super::store::NodePlacement;
use super::types::{Point, Size};

/// Direction of a discrete zoom step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ZoomDirection {
	In,
	Out,
}

impl ZoomDirection {
	/// Wheel convention: scrolling up (negative `delta_y`) zooms in.
	pub fn from_wheel(delta_y: f64) -> Self {
		if delta_y < 0.0 { Self::In } else { Self::Out }
	}
}

/// Scale and translation applied to the whole graph.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
	/// Zoom factor (1.0 = 100%), clamped to the configured range.
	pub scale: f64,
	/// World-to-screen translation in screen pixels.
	pub offset: Point,
}

impl Default for Viewport {
	fn default() -> Self {
		Self {
			scale: 1.0,
			offset: Point::ORIGIN,
		}
	}
}

impl Viewport {
	pub fn world_to_screen(&self, world: Point) -> Point {
		world * self.scale + self.offset
	}

	pub fn screen_to_world(&self, screen: Point) -> Point {
		(screen - self.offset) / self.scale
	}

	/// Multiply the scale by one zoom step and clamp it.
	///
	/// With an anchor, the world point under `anchor` stays under it.
	pub fn zoom(&mut self, direction: ZoomDirection, anchor: Option<Point>, config: &CanvasConfig) {
		let factor = match direction {
			ZoomDirection::In => config.zoom_in_factor,
			ZoomDirection::Out => config.zoom_out_factor,
		};
		let new_scale = config.clamp_scale(self.scale * factor);
		if let Some(anchor) = anchor {
			let ratio = new_scale / self.scale;
			self.offset = anchor - (anchor - self.offset) * ratio;
		}
		self.scale = new_scale;
	}

	/// Shift the offset by a screen-space delta.
	pub fn pan(&mut self, delta: Point) {
		self.offset = self.offset + delta;
	}

	pub fn set_offset(&mut self, offset: Point) {
		self.offset = offset;
	}

	/// Fit every node rectangle into `viewport_size` with `fit_padding` around it.
	///
	/// Never zooms in past `fit_max_scale`. No-op with no nodes.
	pub fn auto_fit(&mut self, nodes: &[NodePlacement], viewport_size: Size, config: &CanvasConfig) {
		let Some((min, max)) = bounding_box(nodes) else {
			return;
		};
		let (width, height) = (max.x - min.x, max.y - min.y);
		let fit_w = (viewport_size.width - config.fit_padding * 2.0) / width;
		let fit_h = (viewport_size.height - config.fit_padding * 2.0) / height;
		let scale = config.clamp_scale(fit_w.min(fit_h).min(config.fit_max_scale));

		let center = (min + max) / 2.0;
		let screen_center = Point::new(viewport_size.width / 2.0, viewport_size.height / 2.0);
		self.scale = scale;
		self.offset = screen_center - center * scale;
		info!(
			"node-graph: auto-fit {} nodes at scale {:.3}, offset ({:.1}, {:.1})",
			nodes.len(),
			self.scale,
			self.offset.x,
			self.offset.y
		);
	}
}

/// Axis-aligned bounds of all node rectangles as `(min, max)` corners.
pub fn bounding_box(nodes: &[NodePlacement]) -> Option<(Point, Point)> {
	let first = nodes.first()?;
	let init = (first.position, first.far_corner());
	Some(nodes.iter().fold(init, |(min, max), node| {
		let far = node.far_corner();
		(
			Point::new(min.x.min(node.position.x), min.y.min(node.position.y)),
			Point::new(max.x.max(far.x), max.y.max(far.y)),
		)
	}))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::node_graph::types::GraphNode;

	fn close(a: f64, b: f64) -> bool {
		(a - b).abs() < 1e-9
	}

	fn node_at(id: &str, x: f64, y: f64) -> NodePlacement {
		let node = GraphNode {
			id: id.into(),
			kind: String::new(),
			position: Some(Point::new(x, y)),
			size: None,
			input_anchors: vec![],
			output_anchors: vec![],
			fields: Default::default(),
		};
		NodePlacement::from_document(&node, &CanvasConfig::default())
	}

	#[test]
	fn zoom_keeps_anchor_point_fixed() {
		let config = CanvasConfig::default();
		let mut vp = Viewport {
			scale: 1.3,
			offset: Point::new(40.0, -25.0),
		};
		let cursor = Point::new(310.0, 220.0);
		let world_under_cursor = vp.screen_to_world(cursor);

		vp.zoom(ZoomDirection::In, Some(cursor), &config);

		let back = vp.world_to_screen(world_under_cursor);
		assert!(close(back.x, cursor.x) && close(back.y, cursor.y));
		assert!(close(vp.scale, 1.3 * 1.1));
	}

	#[test]
	fn zoom_without_anchor_leaves_offset() {
		let config = CanvasConfig::default();
		let mut vp = Viewport::default();
		vp.pan(Point::new(5.0, 6.0));
		vp.zoom(ZoomDirection::Out, None, &config);
		assert_eq!(vp.offset, Point::new(5.0, 6.0));
		assert!(close(vp.scale, 0.9));
	}

	#[test]
	fn zoom_is_clamped() {
		let config = CanvasConfig::default();
		let mut vp = Viewport::default();
		for _ in 0..100 {
			vp.zoom(ZoomDirection::In, Some(Point::new(10.0, 10.0)), &config);
			assert!(vp.scale <= 3.0);
		}
		assert!(close(vp.scale, 3.0));
		for _ in 0..200 {
			vp.zoom(ZoomDirection::Out, Some(Point::new(10.0, 10.0)), &config);
			assert!(vp.scale >= 0.1);
		}
		assert!(close(vp.scale, 0.1));
	}

	#[test]
	fn wheel_direction() {
		assert_eq!(ZoomDirection::from_wheel(-120.0), ZoomDirection::In);
		assert_eq!(ZoomDirection::from_wheel(120.0), ZoomDirection::Out);
	}

	#[test]
	fn auto_fit_with_no_nodes_is_noop() {
		let config = CanvasConfig::default();
		let mut vp = Viewport {
			scale: 2.0,
			offset: Point::new(1.0, 2.0),
		};
		let before = vp;
		vp.auto_fit(&[], Size::new(1000.0, 800.0), &config);
		assert_eq!(vp, before);
	}

	#[test]
	fn auto_fit_never_zooms_past_cap() {
		let config = CanvasConfig::default();
		let mut vp = Viewport::default();
		vp.auto_fit(&[node_at("a", 0.0, 0.0)], Size::new(4000.0, 4000.0), &config);
		assert!(close(vp.scale, 0.8));
		// Node center (160, 200) lands on the screen center.
		let center = vp.world_to_screen(Point::new(160.0, 200.0));
		assert!(close(center.x, 2000.0) && close(center.y, 2000.0));
	}

	#[test]
	fn auto_fit_is_idempotent() {
		let config = CanvasConfig::default();
		let nodes = [node_at("a", -50.0, 10.0), node_at("b", 900.0, 600.0)];
		let mut vp = Viewport::default();
		vp.auto_fit(&nodes, Size::new(1200.0, 700.0), &config);
		let first = vp;
		vp.auto_fit(&nodes, Size::new(1200.0, 700.0), &config);
		assert_eq!(vp, first);
	}

	#[test]
	fn bounding_box_spans_all_rectangles() {
		let nodes = [node_at("a", 0.0, 0.0), node_at("b", 500.0, -100.0)];
		let (min, max) = bounding_box(&nodes).unwrap();
		assert_eq!(min, Point::new(0.0, -100.0));
		assert_eq!(max, Point::new(820.0, 400.0));
	}
}
