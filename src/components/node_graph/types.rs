//! Graph document structures supplied by the host.
//!
//! The document is read-mostly: the canvas shadow-copies node placements into
//! the [`NodeStore`](super::store::NodeStore) and only writes positions back
//! when the host asks for a snapshot.

use std::ops::{Add, Div, Mul, Sub};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::error::DocumentError;

/// A 2D point or vector. World or screen space depending on context.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

impl Point {
	pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	pub fn distance(self, other: Point) -> f64 {
		let (dx, dy) = (self.x - other.x, self.y - other.y);
		(dx * dx + dy * dy).sqrt()
	}
}

impl Add for Point {
	type Output = Point;

	fn add(self, rhs: Point) -> Point {
		Point::new(self.x + rhs.x, self.y + rhs.y)
	}
}

impl Sub for Point {
	type Output = Point;

	fn sub(self, rhs: Point) -> Point {
		Point::new(self.x - rhs.x, self.y - rhs.y)
	}
}

impl Mul<f64> for Point {
	type Output = Point;

	fn mul(self, rhs: f64) -> Point {
		Point::new(self.x * rhs, self.y * rhs)
	}
}

impl Div<f64> for Point {
	type Output = Point;

	fn div(self, rhs: f64) -> Point {
		Point::new(self.x / rhs, self.y / rhs)
	}
}

/// Width and height of a rectangle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
	pub width: f64,
	pub height: f64,
}

impl Size {
	pub const fn new(width: f64, height: f64) -> Self {
		Self { width, height }
	}
}

/// Node size as it appears in a document; either dimension may be missing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SizeHint {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub width: Option<f64>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub height: Option<f64>,
}

/// A named connection point on a node.
///
/// Anchors are never addressed on their own: an anchor's geometric slot is its
/// index within the input or output list of its node.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
	/// Unique within its own list. Input and output lists are separate namespaces.
	pub id: String,
	/// Display label.
	#[serde(default)]
	pub name: String,
}

/// Which side of a node an anchor lives on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnchorDirection {
	Input,
	Output,
}

/// A node in the graph document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
	/// Unique identifier within the document. Edges reference nodes by this id.
	pub id: String,
	/// Category used for coloring and the header label. Not structurally significant.
	#[serde(rename = "type", default)]
	pub kind: String,
	/// Top-left corner in world coordinates. Defaults to the origin.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub position: Option<Point>,
	/// Defaults to the configured node size per missing dimension.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub size: Option<SizeHint>,
	#[serde(default)]
	pub input_anchors: Vec<Anchor>,
	#[serde(default)]
	pub output_anchors: Vec<Anchor>,
	/// Display values, rendered truncated.
	#[serde(default)]
	pub fields: Map<String, Value>,
}

impl GraphNode {
	pub fn anchors(&self, direction: AnchorDirection) -> &[Anchor] {
		match direction {
			AnchorDirection::Input => &self.input_anchors,
			AnchorDirection::Output => &self.output_anchors,
		}
	}
}

/// A directed edge from an output anchor to an input anchor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphEdge {
	pub id: String,
	/// Source node id.
	pub source: String,
	/// Target node id.
	pub target: String,
	/// Anchor id looked up in the source node's output list.
	#[serde(default)]
	pub source_handle: String,
	/// Anchor id looked up in the target node's input list.
	#[serde(default)]
	pub target_handle: String,
}

/// Complete graph document: nodes and edges.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphDocument {
	#[serde(default)]
	pub nodes: Vec<GraphNode>,
	#[serde(default)]
	pub edges: Vec<GraphEdge>,
}

impl GraphDocument {
	pub fn from_json(text: &str) -> Result<Self, DocumentError> {
		Ok(serde_json::from_str(text)?)
	}

	pub fn to_json(&self) -> Result<String, DocumentError> {
		Ok(serde_json::to_string_pretty(self)?)
	}
}

/// Render a field value as a single line of at most `max_chars` characters.
pub fn display_value(value: &Value, max_chars: usize) -> String {
	let text = match value {
		Value::String(s) => s.clone(),
		Value::Null => String::new(),
		other => other.to_string(),
	};
	let text = text.replace('\n', " ");
	if text.chars().count() <= max_chars {
		return text;
	}
	let mut truncated: String = text.chars().take(max_chars.saturating_sub(1)).collect();
	truncated.push('…');
	truncated
}
