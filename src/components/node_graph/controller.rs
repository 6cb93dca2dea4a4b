//! Single owner of all canvas state.
//!
//! The viewport, node store, gesture and hover state are only mutated here.
//! Hosts talk to the controller by sending [`Command`]s, either directly or
//! through a cloneable [`GraphHandle`]; every command reads the state current
//! at the time it runs, so host toolbar actions never act on a stale copy.

use std::cell::RefCell;
use std::rc::Rc;

use log::info;

use super::anchors::{AnchorRef, anchor_at};
use super::config::CanvasConfig;
use super::edges::{EdgePath, report_dangling, route_edges};
use super::highlight::HighlightState;
use super::interaction::{self, Interaction};
use super::store::NodeStore;
use super::types::{GraphDocument, GraphEdge, Point, Size};
use super::viewport::{Viewport, ZoomDirection};

/// Anchor hover radius in screen pixels.
const ANCHOR_HIT_RADIUS_PX: f64 = 10.0;

/// A request from the host or the input layer.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
	/// Replace the whole graph. Schedules a deferred auto-fit.
	Load(GraphDocument),
	/// Zoom in one step around the center of the canvas.
	ZoomIn,
	/// Zoom out one step around the center of the canvas.
	ZoomOut,
	/// Zoom one step keeping `anchor` (screen space) fixed.
	ZoomAt { direction: ZoomDirection, anchor: Point },
	/// Shift the view by a screen-space delta.
	Pan(Point),
	AutoFit,
	/// The canvas was resized to this many screen pixels.
	Resize(Size),
}

/// Canvas state plus the operations that mutate it.
#[derive(Debug)]
pub struct GraphController {
	config: CanvasConfig,
	store: NodeStore,
	edges: Vec<GraphEdge>,
	viewport: Viewport,
	viewport_size: Size,
	interaction: Interaction,
	highlight: HighlightState,
	inspected: Option<AnchorRef>,
	flow_time: f64,
	fit_pending: bool,
	/// Seconds since the pending fit was scheduled.
	fit_elapsed: f64,
}

impl Default for GraphController {
	fn default() -> Self {
		Self::new(CanvasConfig::default())
	}
}

impl GraphController {
	pub fn new(config: CanvasConfig) -> Self {
		Self {
			config: config.normalized(),
			store: NodeStore::default(),
			edges: Vec::new(),
			viewport: Viewport::default(),
			viewport_size: Size::new(800.0, 600.0),
			interaction: Interaction::Idle,
			highlight: HighlightState::default(),
			inspected: None,
			flow_time: 0.0,
			fit_pending: false,
			fit_elapsed: 0.0,
		}
	}

	pub fn dispatch(&mut self, command: Command) {
		match command {
			Command::Load(document) => self.load(document),
			Command::ZoomIn => self.zoom_centered(ZoomDirection::In),
			Command::ZoomOut => self.zoom_centered(ZoomDirection::Out),
			Command::ZoomAt { direction, anchor } => {
				self.viewport.zoom(direction, Some(anchor), &self.config)
			}
			Command::Pan(delta) => self.viewport.pan(delta),
			Command::AutoFit => self.auto_fit(),
			Command::Resize(size) => self.viewport_size = size,
		}
	}

	fn load(&mut self, document: GraphDocument) {
		info!(
			"node-graph: loading document with {} nodes, {} edges",
			document.nodes.len(),
			document.edges.len()
		);
		self.store.load(&document.nodes, &self.config);
		self.edges = document.edges;
		report_dangling(&self.store, &self.edges);
		self.interaction = Interaction::Idle;
		self.highlight.clear();
		self.inspected = None;
		self.fit_pending = true;
		self.fit_elapsed = 0.0;
	}

	fn zoom_centered(&mut self, direction: ZoomDirection) {
		let center = Point::new(self.viewport_size.width / 2.0, self.viewport_size.height / 2.0);
		self.viewport.zoom(direction, Some(center), &self.config);
	}

	fn auto_fit(&mut self) {
		self.fit_pending = false;
		self.viewport
			.auto_fit(self.store.placements(), self.viewport_size, &self.config);
	}

	/// Returns true once after each load, when an auto-fit should be scheduled.
	///
	/// Hosts that schedule the fit themselves call this; otherwise [`tick`]
	/// runs it after `fit_delay_ms`.
	///
	/// [`tick`]: GraphController::tick
	pub fn take_pending_fit(&mut self) -> bool {
		std::mem::take(&mut self.fit_pending)
	}

	pub fn set_config(&mut self, config: CanvasConfig) {
		self.config = config.normalized();
	}

	pub fn pointer_down(&mut self, pointer: Point) -> bool {
		let started = self.interaction.pointer_down(pointer, &self.store, &self.viewport);
		if started {
			self.inspected = None;
		}
		started
	}

	pub fn pointer_move(&mut self, pointer: Point) {
		if self
			.interaction
			.pointer_move(pointer, &mut self.store, &mut self.viewport)
		{
			return;
		}
		let world = self.viewport.screen_to_world(pointer);
		let radius = ANCHOR_HIT_RADIUS_PX / self.viewport.scale;
		self.inspected = anchor_at(&self.store, world, radius, &self.config);
		let hovered = self.store.node_at(world).map(|p| p.id().to_string());
		self.highlight.set_hover(hovered.as_deref(), &self.edges);
	}

	pub fn pointer_up(&mut self) {
		self.interaction.pointer_up();
	}

	/// The pointer left the canvas. Hover ends; gestures keep tracking.
	pub fn pointer_leave(&mut self) {
		self.inspected = None;
		self.highlight.set_hover(None, &self.edges);
	}

	pub fn wheel(&mut self, delta_y: f64, cursor: Point) {
		interaction::wheel(delta_y, cursor, &mut self.viewport, &self.config);
	}

	/// Advance flow animation, highlight smoothing and a pending fit by `dt` seconds.
	pub fn tick(&mut self, dt: f64) {
		self.flow_time += dt;
		self.highlight.tick(dt);
		if self.fit_pending {
			self.fit_elapsed += dt;
			// Held back until the active drag or pan ends.
			let due = self.fit_elapsed * 1000.0 >= self.config.fit_delay_ms as f64;
			if due && self.interaction.is_idle() {
				self.auto_fit();
			}
		}
	}

	/// Current document with dragged positions written back.
	pub fn snapshot(&self) -> GraphDocument {
		self.store.to_document(&self.edges)
	}

	/// Routed edges in world space for this frame.
	pub fn edge_paths(&self) -> Vec<EdgePath> {
		route_edges(&self.store, &self.edges, &self.config)
	}

	pub fn config(&self) -> &CanvasConfig {
		&self.config
	}

	pub fn store(&self) -> &NodeStore {
		&self.store
	}

	pub fn viewport(&self) -> &Viewport {
		&self.viewport
	}

	pub fn viewport_size(&self) -> Size {
		self.viewport_size
	}

	pub fn interaction(&self) -> &Interaction {
		&self.interaction
	}

	pub fn highlight(&self) -> &HighlightState {
		&self.highlight
	}

	pub fn inspected_anchor(&self) -> Option<&AnchorRef> {
		self.inspected.as_ref()
	}

	pub fn flow_time(&self) -> f64 {
		self.flow_time
	}
}

/// Cloneable host-side handle to a canvas controller.
///
/// Create one, pass it to the canvas component, and keep a clone for toolbar
/// buttons. The handle never needs to be re-registered.
#[derive(Clone, Debug, Default)]
pub struct GraphHandle {
	inner: Rc<RefCell<GraphController>>,
}

impl GraphHandle {
	pub fn new(config: CanvasConfig) -> Self {
		Self {
			inner: Rc::new(RefCell::new(GraphController::new(config))),
		}
	}

	pub fn dispatch(&self, command: Command) {
		self.inner.borrow_mut().dispatch(command);
	}

	pub fn zoom_in(&self) {
		self.dispatch(Command::ZoomIn);
	}

	pub fn zoom_out(&self) {
		self.dispatch(Command::ZoomOut);
	}

	pub fn auto_fit(&self) {
		self.dispatch(Command::AutoFit);
	}

	pub fn load(&self, document: GraphDocument) {
		self.dispatch(Command::Load(document));
	}

	pub fn snapshot(&self) -> GraphDocument {
		self.inner.borrow().snapshot()
	}

	pub fn with<R>(&self, f: impl FnOnce(&GraphController) -> R) -> R {
		f(&self.inner.borrow())
	}

	pub fn with_mut<R>(&self, f: impl FnOnce(&mut GraphController) -> R) -> R {
		f(&mut self.inner.borrow_mut())
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::components::node_graph::types::{Anchor, AnchorDirection, GraphNode};

	fn document() -> GraphDocument {
		GraphDocument {
			nodes: vec![GraphNode {
				id: "a".into(),
				kind: "chain".into(),
				position: Some(Point::new(0.0, 0.0)),
				size: None,
				input_anchors: vec![Anchor {
					id: "in".into(),
					name: "Input".into(),
				}],
				output_anchors: vec![],
				fields: Default::default(),
			}],
			edges: vec![],
		}
	}

	#[test]
	fn load_schedules_exactly_one_fit() {
		let mut ctrl = GraphController::default();
		assert!(!ctrl.take_pending_fit());
		ctrl.dispatch(Command::Load(document()));
		assert!(ctrl.take_pending_fit());
		assert!(!ctrl.take_pending_fit());
	}

	#[test]
	fn explicit_fit_clears_pending() {
		let mut ctrl = GraphController::default();
		ctrl.dispatch(Command::Load(document()));
		ctrl.dispatch(Command::AutoFit);
		assert!(!ctrl.take_pending_fit());
	}

	#[test]
	fn tick_runs_fit_after_delay() {
		let mut ctrl = GraphController::default();
		ctrl.dispatch(Command::Resize(Size::new(1000.0, 800.0)));
		ctrl.dispatch(Command::Load(document()));
		ctrl.tick(0.05);
		assert_eq!(ctrl.viewport().scale, 1.0);
		ctrl.tick(0.06);
		assert_eq!(ctrl.viewport().scale, 0.8);
		assert!(!ctrl.take_pending_fit());
	}

	#[test]
	fn pending_fit_waits_for_gesture_to_end() {
		let mut ctrl = GraphController::default();
		ctrl.dispatch(Command::Resize(Size::new(1000.0, 800.0)));
		ctrl.dispatch(Command::Load(document()));
		// Background pan started right after the load.
		assert!(ctrl.pointer_down(Point::new(600.0, 700.0)));
		ctrl.tick(0.2);
		ctrl.pointer_move(Point::new(610.0, 700.0));
		assert_eq!(*ctrl.viewport(), Viewport { scale: 1.0, offset: Point::new(10.0, 0.0) });

		ctrl.pointer_up();
		ctrl.tick(0.016);
		assert_eq!(ctrl.viewport().scale, 0.8);
	}

	#[test]
	fn inverted_zoom_range_does_not_panic() {
		let config: CanvasConfig = serde_json::from_str(r#"{"min_scale": 4.0}"#).unwrap();
		let mut ctrl = GraphController::new(config);
		ctrl.wheel(-100.0, Point::new(10.0, 10.0));
		assert_eq!(ctrl.viewport().scale, 3.0);

		ctrl.set_config(CanvasConfig {
			min_scale: 2.0,
			max_scale: 0.5,
			..CanvasConfig::default()
		});
		ctrl.dispatch(Command::ZoomOut);
		assert_eq!(ctrl.viewport().scale, 2.0);
	}

	#[test]
	fn toolbar_zoom_keeps_canvas_center_fixed() {
		let mut ctrl = GraphController::default();
		ctrl.dispatch(Command::Resize(Size::new(1000.0, 800.0)));
		let center = Point::new(500.0, 400.0);
		let world = ctrl.viewport().screen_to_world(center);

		ctrl.dispatch(Command::ZoomIn);
		ctrl.dispatch(Command::ZoomIn);
		ctrl.dispatch(Command::ZoomOut);

		let back = ctrl.viewport().world_to_screen(world);
		assert!((back.x - center.x).abs() < 1e-9 && (back.y - center.y).abs() < 1e-9);
	}

	#[test]
	fn handle_commands_see_current_state() {
		let handle = GraphHandle::default();
		let toolbar = handle.clone();
		handle.with_mut(|c| c.dispatch(Command::Resize(Size::new(1000.0, 800.0))));
		handle.load(document());
		// The clone was taken before the load and still fits the new nodes.
		toolbar.auto_fit();
		let vp = handle.with(|c| *c.viewport());
		assert!((vp.scale - 0.8).abs() < 1e-12);
	}

	#[test]
	fn hover_inspects_anchor_and_leave_keeps_gesture() {
		let mut ctrl = GraphController::default();
		ctrl.dispatch(Command::Load(document()));

		ctrl.pointer_move(Point::new(2.0, 86.0));
		let inspected = ctrl.inspected_anchor().unwrap();
		assert_eq!(inspected.anchor.name, "Input");
		assert_eq!(inspected.direction, AnchorDirection::Input);
		assert_eq!(ctrl.highlight().hovered(), Some("a"));

		assert!(ctrl.pointer_down(Point::new(50.0, 50.0)));
		ctrl.pointer_leave();
		ctrl.pointer_move(Point::new(60.0, 70.0));
		assert_eq!(ctrl.store().get("a").unwrap().position, Point::new(10.0, 20.0));
		assert_eq!(ctrl.interaction().dragged_node(), Some("a"));

		ctrl.pointer_up();
		assert!(ctrl.interaction().is_idle());
	}

	#[test]
	fn snapshot_round_trips_through_json() {
		let mut ctrl = GraphController::default();
		ctrl.dispatch(Command::Load(document()));
		ctrl.pointer_down(Point::new(10.0, 10.0));
		ctrl.pointer_move(Point::new(30.0, 10.0));
		ctrl.pointer_up();

		let json = ctrl.snapshot().to_json().unwrap();
		let reloaded = GraphDocument::from_json(&json).unwrap();
		assert_eq!(reloaded.nodes[0].position, Some(Point::new(20.0, 0.0)));
	}
}
