//! Visual theming for the node canvas.
//!
//! Provides colors for the background, node cards, anchors and edges, plus a
//! palette that gives each node kind a stable accent color.

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Lighten the color by a factor (0.0 = unchanged, 1.0 = white)
	pub fn lighten(self, factor: f64) -> Self {
		let f = factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 + (255.0 - self.r as f64) * f) as u8,
			g: (self.g as f64 + (255.0 - self.g as f64) * f) as u8,
			b: (self.b as f64 + (255.0 - self.b as f64) * f) as u8,
			a: self.a,
		}
	}

	/// Linear interpolation between two colors
	pub fn lerp(self, other: Color, t: f64) -> Self {
		let t = t.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 * (1.0 - t) + other.r as f64 * t) as u8,
			g: (self.g as f64 * (1.0 - t) + other.g as f64 * t) as u8,
			b: (self.b as f64 * (1.0 - t) + other.b as f64 * t) as u8,
			a: self.a * (1.0 - t) + other.a * t,
		}
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Accent colors assigned to node kinds.
#[derive(Clone, Debug)]
pub struct NodePalette {
	pub colors: Vec<Color>,
}

impl NodePalette {
	/// Muted slate blues and teals (default)
	pub fn slate() -> Self {
		Self {
			colors: vec![
				Color::rgb(94, 129, 172),  // Steel blue
				Color::rgb(100, 148, 160), // Teal gray
				Color::rgb(136, 112, 170), // Muted violet
				Color::rgb(170, 136, 100), // Tan
				Color::rgb(108, 160, 120), // Sage
				Color::rgb(176, 110, 120), // Dusty rose
				Color::rgb(143, 163, 180), // Cool gray
				Color::rgb(160, 150, 90),  // Olive
			],
		}
	}

	/// Cool teals and purples
	pub fn aurora() -> Self {
		Self {
			colors: vec![
				Color::rgb(100, 145, 135), // Eucalyptus
				Color::rgb(115, 135, 155), // Slate
				Color::rgb(130, 120, 150), // Wisteria
				Color::rgb(105, 140, 145), // Teal
				Color::rgb(120, 130, 160), // Periwinkle
				Color::rgb(125, 145, 140), // Sage
				Color::rgb(110, 125, 155), // Storm
				Color::rgb(135, 140, 150), // Pewter
			],
		}
	}

	pub fn get(&self, index: usize) -> Color {
		self.colors[index % self.colors.len()]
	}

	/// Stable color for a node kind. The same kind always maps to the same color.
	pub fn for_kind(&self, kind: &str) -> Color {
		// FNV-1a, stable across runs unlike the std hasher.
		let hash = kind.bytes().fold(0xcbf2_9ce4_8422_2325_u64, |h, b| {
			(h ^ b as u64).wrapping_mul(0x0100_0000_01b3)
		});
		self.get((hash % self.colors.len() as u64) as usize)
	}
}

/// Background style configuration.
#[derive(Clone, Debug)]
pub struct BackgroundStyle {
	pub color: Color,
	/// Secondary color for the radial gradient
	pub color_secondary: Color,
	pub use_gradient: bool,
	/// Vignette intensity (0.0 = none, 1.0 = strong)
	pub vignette: f64,
}

/// Edge visual style.
#[derive(Clone, Debug)]
pub struct EdgeStyle {
	/// Color of the static base stroke
	pub color: Color,
	/// Opacity of the static base stroke
	pub base_alpha: f64,
	/// Color of the dashed flow stroke
	pub flow_color: Color,
	/// Color of the traveling marker
	pub marker_color: Color,
}

/// Node card visual style.
#[derive(Clone, Debug)]
pub struct NodeStyle {
	pub body: Color,
	pub border: Color,
	/// Border color of hovered nodes and their neighbors
	pub highlight_border: Color,
	pub title: Color,
	pub text: Color,
	pub muted_text: Color,
	/// How far the accent color is lightened for the header strip
	pub header_lighten: f64,
	pub input_anchor: Color,
	pub output_anchor: Color,
	/// Tooltip background for inspected anchors
	pub tooltip: Color,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	pub name: &'static str,
	pub background: BackgroundStyle,
	pub edge: EdgeStyle,
	pub node: NodeStyle,
	pub palette: NodePalette,
}

impl Theme {
	/// Clean dark theme (default)
	pub fn default_theme() -> Self {
		Self {
			name: "default",
			background: BackgroundStyle {
				color: Color::rgb(22, 27, 34),
				color_secondary: Color::rgb(30, 35, 42),
				use_gradient: true,
				vignette: 0.15,
			},
			edge: EdgeStyle {
				color: Color::rgb(140, 160, 180),
				base_alpha: 0.25,
				flow_color: Color::rgba(150, 190, 230, 0.85),
				marker_color: Color::rgb(210, 230, 255),
			},
			node: NodeStyle {
				body: Color::rgb(36, 42, 52),
				border: Color::rgba(255, 255, 255, 0.12),
				highlight_border: Color::rgba(255, 255, 255, 0.8),
				title: Color::rgb(245, 247, 250),
				text: Color::rgb(205, 212, 222),
				muted_text: Color::rgb(130, 140, 155),
				header_lighten: 0.1,
				input_anchor: Color::rgb(120, 200, 160),
				output_anchor: Color::rgb(230, 170, 100),
				tooltip: Color::rgba(12, 14, 18, 0.92),
			},
			palette: NodePalette::slate(),
		}
	}

	/// Darker variant with cooler accents
	pub fn midnight() -> Self {
		Self {
			name: "midnight",
			background: BackgroundStyle {
				color: Color::rgb(18, 20, 28),
				color_secondary: Color::rgb(25, 28, 38),
				use_gradient: true,
				vignette: 0.2,
			},
			edge: EdgeStyle {
				color: Color::rgb(100, 120, 150),
				base_alpha: 0.3,
				flow_color: Color::rgba(130, 160, 210, 0.8),
				marker_color: Color::rgb(190, 210, 250),
			},
			node: NodeStyle {
				body: Color::rgb(28, 31, 42),
				border: Color::rgba(255, 255, 255, 0.1),
				highlight_border: Color::rgba(200, 215, 255, 0.85),
				title: Color::rgb(235, 238, 245),
				text: Color::rgb(190, 196, 210),
				muted_text: Color::rgb(115, 122, 140),
				header_lighten: 0.05,
				input_anchor: Color::rgb(110, 180, 170),
				output_anchor: Color::rgb(200, 150, 200),
				tooltip: Color::rgba(8, 9, 14, 0.92),
			},
			palette: NodePalette::aurora(),
		}
	}

	/// Look up a built-in theme by name.
	pub fn by_name(name: &str) -> Option<Self> {
		match name {
			"default" => Some(Self::default_theme()),
			"midnight" => Some(Self::midnight()),
			_ => None,
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::default_theme()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn kind_colors_are_stable() {
		let palette = NodePalette::slate();
		assert_eq!(palette.for_kind("chatModel"), palette.for_kind("chatModel"));
		assert_eq!(palette.for_kind(""), palette.get((0xcbf2_9ce4_8422_2325_u64 % 8) as usize));
	}

	#[test]
	fn css_output() {
		assert_eq!(Color::rgb(255, 0, 16).to_css(), "#ff0010");
		assert_eq!(Color::rgba(1, 2, 3, 0.5).to_css(), "rgba(1, 2, 3, 0.5)");
		assert_eq!(Theme::by_name("midnight").map(|t| t.name), Some("midnight"));
		assert!(Theme::by_name("neon").is_none());
	}
}
