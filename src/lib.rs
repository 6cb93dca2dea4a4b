//! arch-graph: Interactive node-graph editor canvas for architecture documents.
//!
//! This crate provides a WASM-based canvas component that renders nodes with
//! named input/output anchors joined by animated curved edges, with pan, zoom,
//! node dragging and automatic fit-to-view.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::node_graph::{
	AnchorWidthMode, CanvasConfig, Command, DocumentError, GraphDocument, GraphEdge, GraphHandle,
	GraphNode, NodeGraphCanvas,
};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("arch-graph: logging initialized");
}

fn script_text(window: &Window, id: &str) -> Option<String> {
	let element = window.document()?.get_element_by_id(id)?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}

/// Load a graph document from a script element with id="graph-data".
/// Expected format: JSON with { nodes: [...], edges: [...] }
pub fn load_graph_document() -> Result<GraphDocument, DocumentError> {
	let text = web_sys::window()
		.and_then(|window| script_text(&window, "graph-data"))
		.ok_or_else(|| DocumentError::MissingElement("graph-data".into()))?;
	let document = GraphDocument::from_json(&text)?;
	info!(
		"arch-graph: loaded {} nodes, {} edges",
		document.nodes.len(),
		document.edges.len()
	);
	Ok(document)
}

/// Optional canvas tuning from a script element with id="graph-config".
fn load_canvas_config() -> Option<CanvasConfig> {
	let text = script_text(&web_sys::window()?, "graph-config")?;
	match serde_json::from_str::<CanvasConfig>(&text) {
		Ok(config) => {
			let normalized = config.clone().normalized();
			if normalized != config {
				warn!("arch-graph: canvas config had an unusable zoom range or factor, repaired");
			}
			Some(normalized)
		}
		Err(e) => {
			warn!("arch-graph: ignoring invalid canvas config: {}", e);
			None
		}
	}
}

/// Main application component.
/// Loads the graph document from the DOM and renders the editor with a toolbar.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let document = load_graph_document().unwrap_or_else(|e| {
		warn!("arch-graph: no graph document ({}), starting empty", e);
		GraphDocument::default()
	});
	let graph_signal = Signal::derive(move || document.clone());
	let config = load_canvas_config().unwrap_or_default();

	let handle = GraphHandle::new(config);
	let (zoom_in, zoom_out, fit, export) =
		(handle.clone(), handle.clone(), handle.clone(), handle.clone());

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Architecture Graph" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="fullscreen-graph">
			<NodeGraphCanvas data=graph_signal handle=handle fullscreen=true />
			<div class="graph-overlay">
				<h1>"Architecture"</h1>
				<p class="subtitle">"Drag nodes to move them. Scroll to zoom. Drag background to pan."</p>
			</div>
			<div class="graph-toolbar">
				<button title="Zoom in" on:click=move |_| zoom_in.zoom_in()>"+"</button>
				<button title="Zoom out" on:click=move |_| zoom_out.zoom_out()>"−"</button>
				<button title="Fit to view" on:click=move |_| fit.auto_fit()>"Fit"</button>
				<button
					title="Export layout"
					on:click=move |_| match export.snapshot().to_json() {
						Ok(json) => info!("arch-graph: exported layout\n{}", json),
						Err(e) => warn!("arch-graph: export failed: {}", e),
					}
				>
					"Export"
				</button>
			</div>
		</div>
	}
}
