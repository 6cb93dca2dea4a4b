//! Zoom-dependent sizing for canvas visuals.
//!
//! # Coordinate Spaces
//!
//! - **World-space**: the coordinate system nodes are positioned in. Values
//!   in world-space grow and shrink with zoom.
//! - **Screen-space**: pixels on the canvas. Values in screen-space keep the
//!   same size at every zoom level.
//!
//! Rendering happens after the viewport transform is applied to the canvas, so
//! every value in [`ScaledValues`] is expressed in world units.

/// How a size reacts to the zoom level `k`.
#[derive(Clone, Debug)]
pub enum ScaleBehavior {
	/// Constant world-space size. Appears larger when zoomed in.
	World,
	/// Constant screen-space size in pixels.
	Screen,
	/// World-space size whose on-screen size is clamped to `[min_screen, max_screen]`.
	Clamped { min_screen: f64, max_screen: f64 },
}

impl ScaleBehavior {
	/// World-space value for `base` at zoom `k`.
	pub fn apply(&self, base: f64, k: f64) -> f64 {
		match self {
			ScaleBehavior::World => base,
			ScaleBehavior::Screen => base / k,
			ScaleBehavior::Clamped {
				min_screen,
				max_screen,
			} => base.clamp(min_screen / k, max_screen / k),
		}
	}
}

/// How an opacity reacts to the zoom level.
#[derive(Clone, Debug)]
pub enum AlphaBehavior {
	Constant,
	/// Zero at or below `zero_alpha_k`, fully visible at or above `full_alpha_k`.
	Fade { zero_alpha_k: f64, full_alpha_k: f64 },
}

impl AlphaBehavior {
	pub fn apply(&self, k: f64) -> f64 {
		match self {
			AlphaBehavior::Constant => 1.0,
			AlphaBehavior::Fade {
				zero_alpha_k,
				full_alpha_k,
			} => {
				if zero_alpha_k == full_alpha_k {
					return 1.0;
				}
				((k - zero_alpha_k) / (full_alpha_k - zero_alpha_k)).clamp(0.0, 1.0)
			}
		}
	}
}

/// Node card sizing.
#[derive(Clone, Debug)]
pub struct NodeScaleConfig {
	/// Header title font size in world units.
	pub title_size: f64,
	pub title_behavior: ScaleBehavior,
	/// Field and anchor label font size in world units.
	pub text_size: f64,
	pub text_behavior: ScaleBehavior,
	/// Field rows fade out when zoomed far out.
	pub text_alpha_behavior: AlphaBehavior,
	/// Longest field value rendered before truncation, in characters.
	pub field_max_chars: usize,
	/// Card border width in screen pixels.
	pub border_width: f64,
	/// Card corner radius in world units.
	pub corner_radius: f64,
}

/// Anchor dot sizing.
#[derive(Clone, Debug)]
pub struct AnchorScaleConfig {
	pub radius: f64,
	pub radius_behavior: ScaleBehavior,
}

/// Edge stroke and flow animation sizing.
#[derive(Clone, Debug)]
pub struct EdgeScaleConfig {
	/// Base and flow stroke width in screen pixels.
	pub line_width: f64,
	/// Dash pattern (dash, gap) of the flow stroke in world units.
	pub dash_pattern: (f64, f64),
	/// Dash travel speed in world units per second at the base dash length.
	pub flow_speed: f64,
	/// Dashes and gaps keep a minimum on-screen length when zoomed out.
	pub dash_behavior: ScaleBehavior,
	/// Traveling marker radius in world units.
	pub marker_radius: f64,
	pub marker_behavior: ScaleBehavior,
	/// Full start-to-end marker traversals per second.
	pub marker_speed: f64,
}

/// Complete scale configuration for all canvas elements.
#[derive(Clone, Debug)]
pub struct ScaleConfig {
	pub node: NodeScaleConfig,
	pub anchor: AnchorScaleConfig,
	pub edge: EdgeScaleConfig,
}

impl Default for ScaleConfig {
	fn default() -> Self {
		Self {
			node: NodeScaleConfig {
				title_size: 16.0,
				title_behavior: ScaleBehavior::Clamped {
					min_screen: 9.0,
					max_screen: 28.0,
				},
				text_size: 12.0,
				text_behavior: ScaleBehavior::World,
				text_alpha_behavior: AlphaBehavior::Fade {
					zero_alpha_k: 0.25,
					full_alpha_k: 0.45,
				},
				field_max_chars: 36,
				border_width: 1.0,
				corner_radius: 10.0,
			},
			anchor: AnchorScaleConfig {
				radius: 6.0,
				radius_behavior: ScaleBehavior::Clamped {
					min_screen: 3.0,
					max_screen: 14.0,
				},
			},
			edge: EdgeScaleConfig {
				line_width: 2.0,
				dash_pattern: (10.0, 8.0),
				flow_speed: 40.0,
				dash_behavior: ScaleBehavior::Clamped {
					min_screen: 4.0,
					max_screen: 30.0,
				},
				marker_radius: 4.0,
				marker_behavior: ScaleBehavior::Clamped {
					min_screen: 2.5,
					max_screen: 10.0,
				},
				marker_speed: 0.35,
			},
		}
	}
}

/// Scale values pre-computed for one zoom level. Build once per frame.
#[derive(Clone, Debug)]
pub struct ScaledValues {
	pub title_font: String,
	pub text_font: String,
	pub text_size: f64,
	pub text_alpha: f64,
	pub border_width: f64,
	pub anchor_radius: f64,
	pub edge_line_width: f64,
	/// Dash and gap lengths in world units.
	pub dash_pattern: (f64, f64),
	/// Dash travel speed, stretched with the dash pattern so the flow
	/// cycles at the same rate at every zoom level.
	pub flow_speed: f64,
	pub marker_radius: f64,
	/// Screen-space text size for overlays drawn without the viewport transform.
	pub overlay_font: String,
}

impl ScaledValues {
	pub fn new(config: &ScaleConfig, k: f64) -> Self {
		let title_size = config.node.title_behavior.apply(config.node.title_size, k);
		let text_size = config.node.text_behavior.apply(config.node.text_size, k);
		let (dash, gap) = config.edge.dash_pattern;
		let dash_pattern = (
			config.edge.dash_behavior.apply(dash, k),
			config.edge.dash_behavior.apply(gap, k),
		);
		Self {
			title_font: format!("600 {}px sans-serif", title_size),
			text_font: format!("{}px sans-serif", text_size),
			text_size,
			text_alpha: config.node.text_alpha_behavior.apply(k),
			border_width: ScaleBehavior::Screen.apply(config.node.border_width, k),
			anchor_radius: config
				.anchor
				.radius_behavior
				.apply(config.anchor.radius, k),
			edge_line_width: ScaleBehavior::Screen.apply(config.edge.line_width, k),
			dash_pattern,
			flow_speed: config.edge.flow_speed * dash_pattern.0 / dash,
			marker_radius: config
				.edge
				.marker_behavior
				.apply(config.edge.marker_radius, k),
			overlay_font: format!("{}px sans-serif", config.node.text_size),
		}
	}

	/// Dash offset for the flow animation; negative so dashes move source to target.
	pub fn dash_offset(&self, flow_time: f64) -> f64 {
		-flow_time * self.flow_speed
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn clamped_keeps_screen_size_in_bounds() {
		let behavior = ScaleBehavior::Clamped {
			min_screen: 3.0,
			max_screen: 14.0,
		};
		// At k = 0.25 a 6-unit dot would be 1.5px; clamped up to 3px = 12 world units.
		assert_eq!(behavior.apply(6.0, 0.25), 12.0);
		assert_eq!(behavior.apply(6.0, 1.0), 6.0);
		assert_eq!(behavior.apply(6.0, 4.0), 3.5);
	}

	#[test]
	fn dashes_stay_visible_when_zoomed_out() {
		let values = ScaledValues::new(&ScaleConfig::default(), 0.2);
		// 4px minimum at k = 0.2 is 20 world units for both dash and gap.
		assert_eq!(values.dash_pattern, (20.0, 20.0));
		assert_eq!(values.flow_speed, 80.0);
		assert!(values.dash_offset(1.0) < 0.0);

		let values = ScaledValues::new(&ScaleConfig::default(), 1.0);
		assert_eq!(values.dash_pattern, (10.0, 8.0));
		assert_eq!(values.flow_speed, 40.0);
		assert_eq!(values.edge_line_width, 2.0);
	}
}
