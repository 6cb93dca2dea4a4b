//! Canvas rendering for the node graph.
//!
//! Rendering uses multiple passes for correct z-ordering:
//! 1. Background (screen space)
//! 2. Edge base strokes, then dashed flow strokes and traveling markers (world space)
//! 3. Node cards in document order, so later nodes draw on top
//! 4. Vignette and the anchor tooltip (screen space)

use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::anchors::slot_position;
use super::controller::GraphController;
use super::edges::EdgePath;
use super::scale::{ScaleConfig, ScaledValues};
use super::store::NodePlacement;
use super::theme::{Color, Theme};
use super::types::{AnchorDirection, display_value};

/// Height of the colored header strip in world units; anchor slots start below it.
const HEADER_HEIGHT: f64 = 48.0;

/// Ease highlight transitions so they don't start or stop abruptly.
fn smooth_step(t: f64) -> f64 {
	t * t * (3.0 - 2.0 * t)
}

/// Renders the complete graph to the canvas.
pub fn render(
	graph: &GraphController,
	ctx: &CanvasRenderingContext2d,
	config: &ScaleConfig,
	theme: &Theme,
) {
	let viewport = graph.viewport();
	let scale = ScaledValues::new(config, viewport.scale);
	let size = graph.viewport_size();

	draw_background(ctx, size.width, size.height, theme);

	ctx.save();
	let _ = ctx.translate(viewport.offset.x, viewport.offset.y);
	let _ = ctx.scale(viewport.scale, viewport.scale);

	let paths = graph.edge_paths();
	draw_edges(graph, ctx, config, &scale, theme, &paths);
	draw_nodes(graph, ctx, config, &scale, theme);

	ctx.restore();

	if theme.background.vignette > 0.0 {
		draw_vignette(ctx, size.width, size.height, theme);
	}
	draw_anchor_tooltip(graph, ctx, &scale, theme);
}

fn draw_background(ctx: &CanvasRenderingContext2d, width: f64, height: f64, theme: &Theme) {
	let gradient = theme
		.background
		.use_gradient
		.then(|| {
			ctx.create_radial_gradient(
				width / 2.0,
				height / 2.0,
				0.0,
				width / 2.0,
				height / 2.0,
				width.max(height) * 0.8,
			)
			.ok()
		})
		.flatten();

	match gradient {
		Some(gradient) => {
			let _ = gradient.add_color_stop(0.0, &theme.background.color_secondary.to_css());
			let _ = gradient.add_color_stop(1.0, &theme.background.color.to_css());
			#[allow(deprecated)]
			ctx.set_fill_style(&gradient);
		}
		None => ctx.set_fill_style_str(&theme.background.color.to_css()),
	}

	ctx.fill_rect(0.0, 0.0, width, height);
}

fn draw_vignette(ctx: &CanvasRenderingContext2d, width: f64, height: f64, theme: &Theme) {
	let Ok(gradient) = ctx.create_radial_gradient(
		width / 2.0,
		height / 2.0,
		width.min(height) * 0.3,
		width / 2.0,
		height / 2.0,
		width.max(height) * 0.7,
	) else {
		return;
	};

	let _ = gradient.add_color_stop(0.0, "rgba(0, 0, 0, 0)");
	let _ = gradient.add_color_stop(
		1.0,
		&format!("rgba(0, 0, 0, {})", theme.background.vignette),
	);

	#[allow(deprecated)]
	ctx.set_fill_style(&gradient);
	ctx.fill_rect(0.0, 0.0, width, height);
}

fn trace_curve(ctx: &CanvasRenderingContext2d, path: &EdgePath) {
	ctx.begin_path();
	ctx.move_to(path.start.x, path.start.y);
	ctx.bezier_curve_to(
		path.control1.x,
		path.control1.y,
		path.control2.x,
		path.control2.y,
		path.end.x,
		path.end.y,
	);
}

fn draw_edges(
	graph: &GraphController,
	ctx: &CanvasRenderingContext2d,
	config: &ScaleConfig,
	scale: &ScaledValues,
	theme: &Theme,
	paths: &[EdgePath],
) {
	let highlight = graph.highlight();
	let max_t = smooth_step(highlight.max_intensity());
	let dim = |path: &EdgePath| {
		let edge_t = smooth_step(highlight.edge_intensity(&path.source, &path.target));
		if edge_t > 0.01 {
			1.0
		} else {
			1.0 - 0.7 * max_t
		}
	};

	// Pass 1: static base strokes
	let _ = ctx.set_line_dash(&js_sys::Array::new());
	ctx.set_line_width(scale.edge_line_width * 2.0);
	for path in paths {
		let color = theme.edge.color.with_alpha(theme.edge.base_alpha * dim(path));
		ctx.set_stroke_style_str(&color.to_css());
		trace_curve(ctx, path);
		ctx.stroke();
	}

	// Pass 2: dashed flow strokes
	let _ = ctx.set_line_dash(&js_sys::Array::of2(
		&JsValue::from_f64(scale.dash_pattern.0),
		&JsValue::from_f64(scale.dash_pattern.1),
	));
	ctx.set_line_dash_offset(scale.dash_offset(graph.flow_time()));
	ctx.set_line_width(scale.edge_line_width);
	for path in paths {
		let flow = theme.edge.flow_color;
		ctx.set_stroke_style_str(&flow.with_alpha(flow.a * dim(path)).to_css());
		trace_curve(ctx, path);
		ctx.stroke();
	}
	let _ = ctx.set_line_dash(&js_sys::Array::new());

	// Pass 3: traveling markers
	for path in paths {
		let marker = path.flow_marker(graph.flow_time(), config.edge.marker_speed);
		let color = theme.edge.marker_color;
		ctx.set_fill_style_str(&color.with_alpha(color.a * dim(path)).to_css());
		ctx.begin_path();
		let _ = ctx.arc(marker.x, marker.y, scale.marker_radius, 0.0, 2.0 * PI);
		ctx.fill();
	}
}

fn draw_nodes(
	graph: &GraphController,
	ctx: &CanvasRenderingContext2d,
	config: &ScaleConfig,
	scale: &ScaledValues,
	theme: &Theme,
) {
	let highlight = graph.highlight();
	let max_t = smooth_step(highlight.max_intensity());
	let dragged = graph.interaction().dragged_node();

	for placement in graph.store().placements() {
		let node_t = smooth_step(highlight.node_intensity(placement.id()));
		let dim_alpha = 1.0 - 0.6 * max_t;
		let alpha = dim_alpha + (1.0 - dim_alpha) * node_t;
		let emphasized = node_t.max(if dragged == Some(placement.id()) { 1.0 } else { 0.0 });

		ctx.set_global_alpha(alpha);
		draw_node_card(ctx, placement, config, scale, theme, emphasized);
		draw_node_anchors(graph, ctx, placement, scale, theme);
		draw_node_fields(graph, ctx, placement, config, scale, theme);
		ctx.set_global_alpha(1.0);
	}
}

fn trace_rounded_rect(ctx: &CanvasRenderingContext2d, x: f64, y: f64, w: f64, h: f64, r: f64) {
	let r = r.min(w / 2.0).min(h / 2.0).max(0.0);
	ctx.begin_path();
	ctx.move_to(x + r, y);
	let _ = ctx.arc_to(x + w, y, x + w, y + h, r);
	let _ = ctx.arc_to(x + w, y + h, x, y + h, r);
	let _ = ctx.arc_to(x, y + h, x, y, r);
	let _ = ctx.arc_to(x, y, x + w, y, r);
	ctx.close_path();
}

fn draw_node_card(
	ctx: &CanvasRenderingContext2d,
	placement: &NodePlacement,
	config: &ScaleConfig,
	scale: &ScaledValues,
	theme: &Theme,
	emphasis: f64,
) {
	let (x, y) = (placement.position.x, placement.position.y);
	let (w, h) = (placement.size.width, placement.size.height);
	let accent = theme.palette.for_kind(&placement.node.kind);
	let radius = config.node.corner_radius;

	trace_rounded_rect(ctx, x, y, w, h, radius);
	ctx.set_fill_style_str(&theme.node.body.to_css());
	ctx.fill();

	// Header strip, clipped to the rounded card
	ctx.save();
	trace_rounded_rect(ctx, x, y, w, h, radius);
	ctx.clip();
	ctx.set_fill_style_str(&accent.lighten(theme.node.header_lighten).to_css());
	ctx.fill_rect(x, y, w, HEADER_HEIGHT);
	ctx.restore();

	let border = theme.node.border.lerp(theme.node.highlight_border, emphasis);
	trace_rounded_rect(ctx, x, y, w, h, radius);
	ctx.set_stroke_style_str(&border.to_css());
	ctx.set_line_width(scale.border_width * (1.0 + emphasis));
	ctx.stroke();

	let title = if placement.node.kind.is_empty() {
		placement.id().to_string()
	} else {
		format!("{} · {}", placement.node.kind, placement.id())
	};
	ctx.set_font(&scale.title_font);
	ctx.set_fill_style_str(&theme.node.title.to_css());
	let _ = ctx.fill_text_with_max_width(&title, x + 14.0, y + 30.0, w - 28.0);
}

fn draw_node_anchors(
	graph: &GraphController,
	ctx: &CanvasRenderingContext2d,
	placement: &NodePlacement,
	scale: &ScaledValues,
	theme: &Theme,
) {
	let inspected = graph.inspected_anchor();
	ctx.set_font(&scale.text_font);

	for direction in [AnchorDirection::Input, AnchorDirection::Output] {
		let color = match direction {
			AnchorDirection::Input => theme.node.input_anchor,
			AnchorDirection::Output => theme.node.output_anchor,
		};
		for (index, anchor) in placement.node.anchors(direction).iter().enumerate() {
			let pos = slot_position(placement, index, direction, graph.config());
			let is_inspected = inspected.is_some_and(|a| {
				a.node_id == placement.id() && a.direction == direction && a.anchor.id == anchor.id
			});
			let radius = scale.anchor_radius * if is_inspected { 1.5 } else { 1.0 };

			ctx.begin_path();
			let _ = ctx.arc(pos.x, pos.y, radius, 0.0, 2.0 * PI);
			ctx.set_fill_style_str(&color.to_css());
			ctx.fill();

			if scale.text_alpha <= 0.01 {
				continue;
			}
			ctx.set_fill_style_str(&theme.node.text.with_alpha(scale.text_alpha).to_css());
			let label = if anchor.name.is_empty() { &anchor.id } else { &anchor.name };
			match direction {
				AnchorDirection::Input => {
					ctx.set_text_align("left");
					let _ = ctx.fill_text(label, pos.x + radius + 8.0, pos.y + scale.text_size / 3.0);
				}
				AnchorDirection::Output => {
					ctx.set_text_align("right");
					let _ = ctx.fill_text(label, pos.x - radius - 8.0, pos.y + scale.text_size / 3.0);
				}
			}
		}
	}
	ctx.set_text_align("left");
}

fn draw_node_fields(
	graph: &GraphController,
	ctx: &CanvasRenderingContext2d,
	placement: &NodePlacement,
	config: &ScaleConfig,
	scale: &ScaledValues,
	theme: &Theme,
) {
	if scale.text_alpha <= 0.01 || placement.node.fields.is_empty() {
		return;
	}
	let layout = graph.config();
	let rows = placement
		.node
		.input_anchors
		.len()
		.max(placement.node.output_anchors.len());
	let line_height = scale.text_size * 1.6;
	let (x, bottom) = (placement.position.x + 14.0, placement.far_corner().y - 10.0);
	let mut y = placement.position.y + layout.anchor_header_offset + rows as f64 * layout.anchor_pitch;

	ctx.set_font(&scale.text_font);
	for (name, value) in &placement.node.fields {
		if y > bottom {
			break;
		}
		let text = display_value(value, config.node.field_max_chars);
		ctx.set_fill_style_str(&theme.node.muted_text.with_alpha(scale.text_alpha).to_css());
		let _ = ctx.fill_text(&format!("{name}:"), x, y);
		ctx.set_fill_style_str(&theme.node.text.with_alpha(scale.text_alpha).to_css());
		let _ = ctx.fill_text_with_max_width(&text, x, y + line_height * 0.9, placement.size.width - 28.0);
		y += line_height * 2.0;
	}
}

fn draw_anchor_tooltip(
	graph: &GraphController,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
) {
	let Some(inspected) = graph.inspected_anchor() else {
		return;
	};
	let at = graph.viewport().world_to_screen(inspected.position);
	let side = match inspected.direction {
		AnchorDirection::Input => "input",
		AnchorDirection::Output => "output",
	};
	let text = format!("{} ({side}) · {}", inspected.anchor.name, inspected.anchor.id);

	ctx.set_font(&scale.overlay_font);
	let width = ctx
		.measure_text(&text)
		.map(|m| m.width())
		.unwrap_or(text.chars().count() as f64 * 7.0);
	let (bx, by) = (at.x + 12.0, at.y - 30.0);

	trace_rounded_rect(ctx, bx, by, width + 16.0, 22.0, 6.0);
	ctx.set_fill_style_str(&theme.node.tooltip.to_css());
	ctx.fill();
	ctx.set_fill_style_str(&Color::rgb(255, 255, 255).to_css());
	let _ = ctx.fill_text(&text, bx + 8.0, by + 15.0);
}
