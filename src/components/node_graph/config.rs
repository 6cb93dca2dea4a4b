//! Layout and navigation constants for the node canvas.
//!
//! Every magic number the geometry depends on lives here so hosts can tune
//! it (for example from a JSON blob) without touching the math.

use serde::{Deserialize, Serialize};

use super::types::Size;

/// How the horizontal position of output anchors is derived.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnchorWidthMode {
	/// Output anchors sit at `x + anchor_column_width` for every node,
	/// regardless of its configured width. Matches layouts saved by earlier
	/// versions of the editor.
	#[default]
	Fixed,
	/// Output anchors sit on each node's actual right edge.
	NodeWidth,
}

/// Geometry, zoom and auto-fit parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
	/// Size applied to nodes whose document entry omits a dimension.
	pub default_node_size: Size,
	/// Distance from a node's top edge to its first anchor slot.
	pub anchor_header_offset: f64,
	/// Vertical distance between consecutive anchor slots.
	pub anchor_pitch: f64,
	/// Horizontal distance from a node's left edge to its output anchors
	/// when `anchor_width_mode` is [`AnchorWidthMode::Fixed`].
	pub anchor_column_width: f64,
	pub anchor_width_mode: AnchorWidthMode,
	/// Horizontal offset of edge control points from their endpoints, in world units.
	pub edge_control_offset: f64,
	pub zoom_in_factor: f64,
	pub zoom_out_factor: f64,
	pub min_scale: f64,
	pub max_scale: f64,
	/// Screen-space margin kept around the bounding box on auto-fit.
	pub fit_padding: f64,
	/// Auto-fit only ever shrinks below this scale, never zooms in past it.
	pub fit_max_scale: f64,
	/// Delay between a document load and its auto-fit, in milliseconds.
	pub fit_delay_ms: u32,
}

impl Default for CanvasConfig {
	fn default() -> Self {
		Self {
			default_node_size: Size::new(320.0, 400.0),
			anchor_header_offset: 85.0,
			anchor_pitch: 45.0,
			anchor_column_width: 320.0,
			anchor_width_mode: AnchorWidthMode::Fixed,
			edge_control_offset: 80.0,
			zoom_in_factor: 1.1,
			zoom_out_factor: 0.9,
			min_scale: 0.1,
			max_scale: 3.0,
			fit_padding: 150.0,
			fit_max_scale: 0.8,
			fit_delay_ms: 100,
		}
	}
}

impl CanvasConfig {
	/// Clamp a scale into `[min_scale, max_scale]`. Never panics, even on an
	/// inverted range.
	pub fn clamp_scale(&self, scale: f64) -> f64 {
		scale.max(self.min_scale).min(self.max_scale)
	}

	/// Repair values the zoom math cannot work with: a non-positive or
	/// inverted scale range and zoom factors on the wrong side of 1.
	pub fn normalized(mut self) -> Self {
		let defaults = Self::default();
		let positive = |v: f64| v.is_finite() && v > 0.0;
		if !positive(self.min_scale) {
			self.min_scale = defaults.min_scale;
		}
		if !positive(self.max_scale) {
			self.max_scale = defaults.max_scale;
		}
		if self.min_scale > self.max_scale {
			std::mem::swap(&mut self.min_scale, &mut self.max_scale);
		}
		if !(self.zoom_in_factor.is_finite() && self.zoom_in_factor > 1.0) {
			self.zoom_in_factor = defaults.zoom_in_factor;
		}
		if !(positive(self.zoom_out_factor) && self.zoom_out_factor < 1.0) {
			self.zoom_out_factor = defaults.zoom_out_factor;
		}
		if !positive(self.fit_max_scale) {
			self.fit_max_scale = defaults.fit_max_scale;
		}
		self
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn partial_json_keeps_defaults() {
		let config: CanvasConfig =
			serde_json::from_str(r#"{"anchor_width_mode": "node_width", "fit_padding": 40}"#)
				.unwrap();
		assert_eq!(config.anchor_width_mode, AnchorWidthMode::NodeWidth);
		assert_eq!(config.fit_padding, 40.0);
		assert_eq!(config.anchor_pitch, 45.0);
		assert_eq!(config.default_node_size, Size::new(320.0, 400.0));
	}

	#[test]
	fn inverted_scale_range_is_swapped() {
		let config: CanvasConfig = serde_json::from_str(r#"{"min_scale": 4.0}"#).unwrap();
		assert_eq!(config.clamp_scale(1.0), 3.0);

		let config = config.normalized();
		assert_eq!((config.min_scale, config.max_scale), (3.0, 4.0));
		assert_eq!(config.clamp_scale(10.0), 4.0);
	}

	#[test]
	fn bad_zoom_factors_fall_back_to_defaults() {
		let config = CanvasConfig {
			zoom_in_factor: 0.5,
			zoom_out_factor: -1.0,
			min_scale: 0.0,
			..CanvasConfig::default()
		}
		.normalized();
		assert_eq!(config, CanvasConfig::default());
	}
}
