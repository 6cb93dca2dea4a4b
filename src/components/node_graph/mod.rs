//! Node-graph editor canvas.
//!
//! Renders a graph of rectangular nodes with named input and output anchors
//! on an HTML canvas, joined by animated Bézier edges. Supports:
//! - Cursor-anchored wheel zoom, toolbar zoom and background panning
//! - Dragging nodes, with positions written back via [`GraphHandle::snapshot`]
//! - Deferred auto-fit after every document load
//! - Hover highlighting and anchor inspection
//!
//! Geometry lives in plain modules ([`viewport`], [`store`], [`anchors`],
//! [`edges`], [`interaction`]) that know nothing about the DOM; the
//! [`controller`] owns them and [`NodeGraphCanvas`] wires them to the browser.
//!
//! # Example
//!
//! ```ignore
//! use arch_graph::{GraphDocument, GraphHandle, NodeGraphCanvas};
//!
//! let handle = GraphHandle::default();
//! let toolbar = handle.clone();
//! let doc = GraphDocument::from_json(json)?;
//!
//! view! {
//!     <button on:click=move |_| toolbar.auto_fit()>"Fit"</button>
//!     <NodeGraphCanvas data=Signal::derive(move || doc.clone()) handle=handle />
//! }
//! ```

pub mod anchors;
mod component;
pub mod config;
pub mod controller;
pub mod edges;
pub mod error;
pub mod highlight;
pub mod interaction;
mod render;
pub mod scale;
pub mod store;
pub mod theme;
pub mod types;
pub mod viewport;

pub use component::NodeGraphCanvas;
pub use config::{AnchorWidthMode, CanvasConfig};
pub use controller::{Command, GraphController, GraphHandle};
pub use error::DocumentError;
pub use theme::Theme;
pub use types::{Anchor, AnchorDirection, GraphDocument, GraphEdge, GraphNode, Point, Size};
pub use viewport::{Viewport, ZoomDirection};
