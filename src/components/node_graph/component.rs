//! Leptos component wrapping the node graph canvas.
//!
//! The component creates an HTML canvas element and forwards mouse and wheel
//! events to a [`GraphController`](super::controller::GraphController). While a
//! drag or pan is active, move/up listeners live on the window so the gesture
//! keeps tracking after the pointer leaves the canvas. An animation loop runs
//! via `requestAnimationFrame`, ticking the controller (which also runs the
//! deferred auto-fit after a load) and redrawing.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::config::CanvasConfig;
use super::controller::{Command, GraphHandle};
use super::render;
use super::scale::ScaleConfig;
use super::theme::Theme;
use super::types::{GraphDocument, Point, Size};

/// Visual configuration owned by the render loop.
struct RenderContext {
	ctx: CanvasRenderingContext2d,
	scale: ScaleConfig,
	theme: Theme,
}

type Listener = Rc<RefCell<Option<Closure<dyn FnMut(MouseEvent)>>>>;

fn pointer_position(canvas: &HtmlCanvasElement, ev: &MouseEvent) -> Point {
	let rect = canvas.get_bounding_client_rect();
	Point::new(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	)
}

fn set_listener(window: &Window, event: &str, listener: &Listener, attach: bool) {
	let Some(ref cb) = *listener.borrow() else {
		return;
	};
	let result = if attach {
		window.add_event_listener_with_callback(event, cb.as_ref().unchecked_ref())
	} else {
		window.remove_event_listener_with_callback(event, cb.as_ref().unchecked_ref())
	};
	if let Err(e) = result {
		warn!("node-graph: failed to update {} listener: {:?}", event, e);
	}
}

fn set_cursor(canvas: &HtmlCanvasElement, cursor: &str) {
	// Fully qualified: the leptos prelude shadows `style` with its attribute builder.
	if let Err(e) = web_sys::HtmlElement::style(canvas).set_property("cursor", cursor) {
		warn!("node-graph: failed to set cursor: {:?}", e);
	}
}

/// Screen size of the canvas: the window when fullscreen, otherwise explicit
/// dimensions or the parent element.
fn measure(
	canvas: &HtmlCanvasElement,
	window: &Window,
	fullscreen: bool,
	width: Option<f64>,
	height: Option<f64>,
) -> Size {
	let window_dim = |v: Result<JsValue, JsValue>, fallback: f64| {
		v.ok().and_then(|v| v.as_f64()).unwrap_or(fallback)
	};
	if fullscreen {
		return Size::new(
			window_dim(window.inner_width(), 800.0),
			window_dim(window.inner_height(), 600.0),
		);
	}
	Size::new(
		width.unwrap_or_else(|| {
			canvas
				.parent_element()
				.map(|p| p.client_width() as f64)
				.unwrap_or(800.0)
		}),
		height.unwrap_or_else(|| {
			canvas
				.parent_element()
				.map(|p| p.client_height() as f64)
				.unwrap_or(600.0)
		}),
	)
}

/// Renders an interactive node graph on a canvas element.
///
/// Pass the graph via the reactive `data` signal; every new value fully
/// replaces the displayed graph and is auto-fitted shortly after. Pass a
/// [`GraphHandle`] to drive zoom and auto-fit from host controls or to read
/// back the edited document. The component sizes itself to its parent
/// container by default; set `fullscreen = true` to fill the window.
#[component]
pub fn NodeGraphCanvas(
	#[prop(into)] data: Signal<GraphDocument>,
	#[prop(optional)] handle: Option<GraphHandle>,
	#[prop(optional)] config: Option<CanvasConfig>,
	#[prop(optional, into)] theme: Option<String>,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let handle = handle.unwrap_or_default();
	if let Some(config) = config {
		handle.with_mut(|c| c.set_config(config));
	}
	let theme = theme
		.as_deref()
		.and_then(|name| {
			let found = Theme::by_name(name);
			if found.is_none() {
				warn!("node-graph: unknown theme {}, using default", name);
			}
			found
		})
		.unwrap_or_default();

	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let render_ctx: Rc<RefCell<Option<RenderContext>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let window_move: Listener = Rc::new(RefCell::new(None));
	let window_up: Listener = Rc::new(RefCell::new(None));

	let handle_load = handle.clone();
	Effect::new(move |_| {
		handle_load.load(data.get());
	});

	let (handle_init, render_init, animate_init, resize_init) = (
		handle.clone(),
		render_ctx.clone(),
		animate.clone(),
		resize_cb.clone(),
	);
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};

		let size = measure(&canvas, &window, fullscreen, width, height);
		canvas.set_width(size.width as u32);
		canvas.set_height(size.height as u32);
		handle_init.dispatch(Command::Resize(size));

		let ctx: CanvasRenderingContext2d = match canvas.get_context("2d") {
			Ok(Some(ctx)) => match ctx.dyn_into() {
				Ok(ctx) => ctx,
				Err(_) => return,
			},
			_ => {
				warn!("node-graph: 2d canvas context unavailable");
				return;
			}
		};
		*render_init.borrow_mut() = Some(RenderContext {
			ctx,
			scale: ScaleConfig::default(),
			theme: theme.clone(),
		});

		if fullscreen {
			let (handle_resize, canvas_resize) = (handle_init.clone(), canvas.clone());
			*resize_init.borrow_mut() = Some(Closure::new(move || {
				let Some(win) = web_sys::window() else {
					return;
				};
				let size = measure(&canvas_resize, &win, true, None, None);
				canvas_resize.set_width(size.width as u32);
				canvas_resize.set_height(size.height as u32);
				handle_resize.dispatch(Command::Resize(size));
			}));
			if let Some(ref cb) = *resize_init.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		let (handle_anim, render_anim, animate_inner) =
			(handle_init.clone(), render_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			let dt = 0.016;
			handle_anim.with_mut(|c| c.tick(dt));
			if let Some(ref r) = *render_anim.borrow() {
				handle_anim.with(|c| render::render(c, &r.ctx, &r.scale, &r.theme));
			}
			if let (Some(cb), Some(win)) = (&*animate_inner.borrow(), web_sys::window()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	// Window-level listeners for an active gesture.
	let (handle_wm, move_slot) = (handle.clone(), window_move.clone());
	*move_slot.borrow_mut() = Some(Closure::new(move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let p = pointer_position(&canvas, &ev);
		handle_wm.with_mut(|c| c.pointer_move(p));
	}));
	let (handle_wu, up_slot, move_detach, up_detach) = (
		handle.clone(),
		window_up.clone(),
		window_move.clone(),
		window_up.clone(),
	);
	*up_slot.borrow_mut() = Some(Closure::new(move |_: MouseEvent| {
		handle_wu.with_mut(|c| c.pointer_up());
		if let Some(window) = web_sys::window() {
			set_listener(&window, "mousemove", &move_detach, false);
			set_listener(&window, "mouseup", &up_detach, false);
		}
		if let Some(canvas) = canvas_ref.get() {
			let canvas: HtmlCanvasElement = canvas.into();
			set_cursor(&canvas, "grab");
		}
		debug!("node-graph: window gesture listeners detached");
	}));

	let (handle_md, move_attach, up_attach) =
		(handle.clone(), window_move.clone(), window_up.clone());
	let on_mousedown = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let p = pointer_position(&canvas, &ev);
		if !handle_md.with_mut(|c| c.pointer_down(p)) {
			return;
		}
		ev.prevent_default();
		set_cursor(&canvas, "grabbing");
		if let Some(window) = web_sys::window() {
			set_listener(&window, "mousemove", &move_attach, true);
			set_listener(&window, "mouseup", &up_attach, true);
		}
	};

	let handle_mm = handle.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let p = pointer_position(&canvas, &ev);
		// Active gestures are driven by the window listener.
		handle_mm.with_mut(|c| {
			if c.interaction().is_idle() {
				c.pointer_move(p);
			}
		});
	};

	let handle_ml = handle.clone();
	let on_mouseleave = move |_: MouseEvent| {
		handle_ml.with_mut(|c| c.pointer_leave());
	};

	let handle_wh = handle;
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let p = pointer_position(&canvas, &ev);
		handle_wh.with_mut(|c| c.wheel(ev.delta_y(), p));
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="node-graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
	}
}
