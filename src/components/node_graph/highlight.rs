//! Hover highlighting with smooth per-node intensity transitions.

use std::collections::{HashMap, HashSet};

use super::types::GraphEdge;

/// Minimum time (seconds) a highlight is held before it can fade out.
/// Keeps nodes from flashing when the pointer skirts a node's border.
const MIN_HOLD_TIME: f64 = 0.12;

const FADE_IN_SPEED: f64 = 6.0;
const FADE_OUT_SPEED: f64 = 4.0;

/// Per-node highlight intensity for the hovered node and its neighbors.
///
/// Each node's intensity (0.0 to 1.0) eases towards 1.0 while it is in the
/// target set and decays towards 0.0 after leaving it, using exponential
/// smoothing: `value += (target - value) * (1 - e^(-speed * dt))`.
#[derive(Clone, Debug, Default)]
pub struct HighlightState {
	hovered: Option<String>,
	target_set: HashSet<String>,
	intensity: HashMap<String, f64>,
	hold_timer: HashMap<String, f64>,
	cached_max: f64,
}

impl HighlightState {
	pub fn hovered(&self) -> Option<&str> {
		self.hovered.as_deref()
	}

	/// Update the hovered node and recompute the target set from `edges`.
	pub fn set_hover(&mut self, node: Option<&str>, edges: &[GraphEdge]) {
		if self.hovered.as_deref() == node {
			return;
		}
		self.hovered = node.map(str::to_string);
		self.target_set.clear();

		if let Some(id) = node {
			self.target_set.insert(id.to_string());
			for edge in edges {
				if edge.source == id {
					self.target_set.insert(edge.target.clone());
				} else if edge.target == id {
					self.target_set.insert(edge.source.clone());
				}
			}
			for id in &self.target_set {
				self.hold_timer.insert(id.clone(), MIN_HOLD_TIME);
			}
		}
	}

	/// Drop all highlight state, e.g. after the node set is replaced.
	pub fn clear(&mut self) {
		*self = Self::default();
	}

	pub fn tick(&mut self, dt: f64) {
		let fade_in = 1.0 - (-FADE_IN_SPEED * dt).exp();
		let fade_out = (-FADE_OUT_SPEED * dt).exp();

		for id in &self.target_set {
			let value = self.intensity.entry(id.clone()).or_insert(0.0);
			*value += (1.0 - *value) * fade_in;
		}

		let targets = &self.target_set;
		self.hold_timer.retain(|id, timer| {
			if targets.contains(id) {
				true
			} else {
				*timer -= dt;
				*timer > 0.0
			}
		});

		let holds = &self.hold_timer;
		let mut max: f64 = 0.0;
		self.intensity.retain(|id, value| {
			if !targets.contains(id) && holds.get(id).copied().unwrap_or(0.0) <= 0.0 {
				*value *= fade_out;
			}
			max = max.max(*value);
			targets.contains(id) || *value > 0.005
		});
		self.cached_max = max;
	}

	pub fn node_intensity(&self, id: &str) -> f64 {
		self.intensity.get(id).copied().unwrap_or(0.0)
	}

	/// Geometric mean of the endpoint intensities.
	pub fn edge_intensity(&self, source: &str, target: &str) -> f64 {
		(self.node_intensity(source) * self.node_intensity(target)).sqrt()
	}

	/// Largest intensity of any node, used to dim everything else.
	pub fn max_intensity(&self) -> f64 {
		self.cached_max
	}
}
