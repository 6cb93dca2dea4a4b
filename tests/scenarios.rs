//! End-to-end behavior of the canvas core through its public API.

#![allow(unused_crate_dependencies)]

use arch_graph::components::node_graph::anchors::resolve_anchor_position;
use arch_graph::components::node_graph::edges::route_edges;
use arch_graph::components::node_graph::store::NodeStore;
use arch_graph::components::node_graph::{
	AnchorDirection, CanvasConfig, Command, GraphController, GraphDocument, GraphHandle, Point,
	Size, Viewport, ZoomDirection,
};
use pretty_assertions::assert_eq;

const EPS: f64 = 1e-9;

fn assert_close(actual: Point, expected: Point) {
	assert!(
		(actual.x - expected.x).abs() < EPS && (actual.y - expected.y).abs() < EPS,
		"expected {:?}, got {:?}",
		expected,
		actual
	);
}

fn two_node_document() -> GraphDocument {
	GraphDocument::from_json(
		r#"{
			"nodes": [
				{
					"id": "A",
					"type": "llm",
					"position": { "x": 0, "y": 0 },
					"inputAnchors": [{ "id": "prompt", "name": "Prompt" }],
					"outputAnchors": [{ "id": "out", "name": "Output" }],
					"fields": { "model": "small" }
				},
				{
					"id": "B",
					"type": "chain",
					"position": { "x": 500, "y": 0 },
					"inputAnchors": [
						{ "id": "in", "name": "Input" },
						{ "id": "memory", "name": "Memory" }
					],
					"outputAnchors": []
				}
			],
			"edges": [
				{ "id": "e1", "source": "A", "target": "B", "sourceHandle": "out", "targetHandle": "in" }
			]
		}"#,
	)
	.unwrap()
}

fn numbered_document(count: usize) -> GraphDocument {
	let nodes = (0..count)
		.map(|i| format!(r#"{{ "id": "n{i}", "position": {{ "x": {}, "y": 0 }} }}"#, i * 400))
		.collect::<Vec<_>>()
		.join(",");
	GraphDocument::from_json(&format!(r#"{{ "nodes": [{nodes}], "edges": [] }}"#)).unwrap()
}

#[test]
fn reciprocal_zoom_restores_view() {
	let config = CanvasConfig {
		zoom_out_factor: 1.0 / 1.1,
		..CanvasConfig::default()
	};
	let mut viewport = Viewport::default();
	viewport.pan(Point::new(37.0, -12.0));
	let before = viewport;
	let cursor = Point::new(240.0, 180.0);

	viewport.zoom(ZoomDirection::In, Some(cursor), &config);
	viewport.zoom(ZoomDirection::Out, Some(cursor), &config);

	assert!((viewport.scale - before.scale).abs() < EPS);
	assert_close(viewport.offset, before.offset);
}

#[test]
fn cursor_stays_over_the_same_world_point() {
	let config = CanvasConfig::default();
	let mut viewport = Viewport::default();
	let cursor = Point::new(640.0, 360.0);
	let world = viewport.screen_to_world(cursor);

	for direction in [ZoomDirection::In, ZoomDirection::In, ZoomDirection::Out] {
		viewport.zoom(direction, Some(cursor), &config);
		assert_close(viewport.world_to_screen(world), cursor);
	}
}

#[test]
fn auto_fit_twice_is_stable() {
	let mut ctrl = GraphController::default();
	ctrl.dispatch(Command::Resize(Size::new(1280.0, 720.0)));
	ctrl.dispatch(Command::Load(numbered_document(4)));
	ctrl.dispatch(Command::AutoFit);
	let first = *ctrl.viewport();
	ctrl.dispatch(Command::AutoFit);
	assert_eq!(*ctrl.viewport(), first);
}

#[test]
fn drag_at_double_scale() {
	let config = CanvasConfig {
		zoom_in_factor: 2.0,
		..CanvasConfig::default()
	};
	let mut ctrl = GraphController::new(config);
	ctrl.dispatch(Command::Load(
		GraphDocument::from_json(r#"{ "nodes": [{ "id": "n", "position": { "x": 100, "y": 100 } }] }"#)
			.unwrap(),
	));
	ctrl.dispatch(Command::ZoomAt {
		direction: ZoomDirection::In,
		anchor: Point::ORIGIN,
	});
	assert_eq!(ctrl.viewport().scale, 2.0);

	ctrl.pointer_down(Point::new(220.0, 220.0));
	ctrl.pointer_move(Point::new(260.0, 240.0));
	ctrl.pointer_up();
	assert_eq!(ctrl.store().get("n").unwrap().position, Point::new(120.0, 110.0));
}

#[test]
fn unknown_target_handle_uses_first_input_slot() {
	let config = CanvasConfig::default();
	let mut doc = two_node_document();
	let mut store = NodeStore::default();
	store.load(&doc.nodes, &config);

	let first = resolve_anchor_position(&store, "B", "in", AnchorDirection::Input, &config);
	doc.edges[0].target_handle = "does-not-exist".into();
	let paths = route_edges(&store, &doc.edges, &config);

	assert_eq!(paths[0].end, first);
	assert_eq!(first, Point::new(500.0, 85.0));
}

#[test]
fn second_load_replaces_the_first() {
	let handle = GraphHandle::default();
	handle.load(numbered_document(5));
	handle.load(numbered_document(2));

	handle.with(|c| {
		assert_eq!(c.store().len(), 2);
		assert!(c.store().get("n4").is_none());
	});
	assert_eq!(handle.snapshot().nodes.len(), 2);
}

#[test]
fn zoom_stays_within_bounds() {
	let handle = GraphHandle::default();
	for _ in 0..100 {
		handle.zoom_in();
	}
	assert_eq!(handle.with(|c| c.viewport().scale), 3.0);
	for _ in 0..200 {
		handle.zoom_out();
	}
	assert_eq!(handle.with(|c| c.viewport().scale), 0.1);
}

#[test]
fn two_nodes_fit_into_viewport() {
	let mut ctrl = GraphController::default();
	ctrl.dispatch(Command::Resize(Size::new(1000.0, 800.0)));
	ctrl.dispatch(Command::Load(two_node_document()));
	assert!(ctrl.take_pending_fit());
	ctrl.dispatch(Command::AutoFit);

	let viewport = *ctrl.viewport();
	assert!(viewport.scale <= 0.8);
	let center = Point::new((0.0 + 500.0 + 320.0) / 2.0, (0.0 + 400.0) / 2.0);
	assert_close(viewport.world_to_screen(center), Point::new(500.0, 400.0));

	// The edge leaves A's first output slot and enters B's first input slot.
	let paths = ctrl.edge_paths();
	assert_eq!(paths.len(), 1);
	assert_eq!(paths[0].start, Point::new(320.0, 85.0));
	assert_eq!(paths[0].end, Point::new(500.0, 85.0));
	assert_eq!(paths[0].control1, Point::new(400.0, 85.0));
	assert_eq!(paths[0].control2, Point::new(420.0, 85.0));
}

#[test]
fn panning_survives_leaving_the_canvas() {
	let mut ctrl = GraphController::default();
	ctrl.dispatch(Command::Load(two_node_document()));
	// Below both nodes.
	assert!(ctrl.pointer_down(Point::new(100.0, 600.0)));
	ctrl.pointer_leave();
	ctrl.pointer_move(Point::new(-50.0, 650.0));
	ctrl.pointer_up();
	assert_eq!(ctrl.viewport().offset, Point::new(-150.0, 50.0));
	assert!(ctrl.interaction().is_idle());
}
