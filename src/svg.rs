//! SVG visualization of a draw list.
//!
//! Generates a vertical sequence of annotated panels, one per drawing step,
//! each showing the canvas as it stands after that step: where sources were
//! blitted, how the canvas grew, and which regions were filled.
//!
//! # Example
//!
//! ```
//! use zencompose::{Size, StripDirection, StripOptions, compose_strip_from};
//! use zencompose::{SourceDecoder, SourceInfo, svg::render_draw_list_svg};
//!
//! struct Sizes;
//!
//! impl SourceDecoder for Sizes {
//!     type Source = Size;
//!     type Error = core::convert::Infallible;
//!
//!     fn read_info(&mut self, s: &Size) -> Result<SourceInfo, Self::Error> {
//!         Ok(SourceInfo::new(*s))
//!     }
//! }
//!
//! let options = StripOptions::new(StripDirection::Horizontal, 100).gap(5).margin(10);
//! let strip = compose_strip_from(&mut Sizes, &[Size::new(160, 160), Size::new(120, 160)], &options)
//!     .unwrap()
//!     .unwrap();
//!
//! let svg = render_draw_list_svg(&strip.draw);
//! assert!(svg.contains("165×100"));
//! ```

use crate::geometry::{Rect, Size};
use crate::mask::PointF;
use crate::plan::{DrawList, DrawOp};

/// Maximum pixel width for any panel in the SVG output.
const MAX_PANEL_W: f64 = 300.0;
/// Maximum pixel height for any panel in the SVG output.
const MAX_PANEL_H: f64 = 200.0;
/// Vertical gap between panels.
const PANEL_GAP: f64 = 50.0;
/// Horizontal margin.
const MARGIN_X: f64 = 50.0;
/// Top margin for first panel.
const MARGIN_TOP: f64 = 30.0;
/// Height of label text area above each panel.
const LABEL_H: f64 = 22.0;
/// Length of the connector between consecutive panels.
const ARROW_H: f64 = 34.0;
/// Space left above and below each connector inside the panel gap.
const ARROW_INSET: f64 = (PANEL_GAP - ARROW_H) / 2.0;

/// Something drawn on the canvas, in canvas pixels.
#[derive(Clone)]
enum Shape {
    Blit { x: f64, y: f64, w: f64, h: f64, source: usize },
    Fill(Vec<(f64, f64)>),
}

impl Shape {
    /// Map through a canvas resize: scale by `(sx, sy)`, then shift.
    fn remap(&self, sx: f64, sy: f64, dx: f64, dy: f64) -> Shape {
        match self {
            Shape::Blit { x, y, w, h, source } => Shape::Blit {
                x: x * sx + dx,
                y: y * sy + dy,
                w: w * sx,
                h: h * sy,
                source: *source,
            },
            Shape::Fill(points) => Shape::Fill(
                points
                    .iter()
                    .map(|(x, y)| (x * sx + dx, y * sy + dy))
                    .collect(),
            ),
        }
    }
}

/// A single panel: the canvas after one step.
struct Step {
    label: String,
    canvas: Size,
    shapes: Vec<Shape>,
    annotation: String,
}

/// Render a complete SVG document showing `list` step by step.
///
/// Consecutive fills are merged into one panel. Operations before the first
/// canvas is created draw onto an empty canvas and are still shown.
pub fn render_draw_list_svg(list: &DrawList) -> String {
    let steps = build_steps(list);
    render_steps(&steps)
}

fn build_steps(list: &DrawList) -> Vec<Step> {
    let mut steps: Vec<Step> = Vec::new();
    let mut canvas = Size::ZERO;
    let mut shapes: Vec<Shape> = Vec::new();
    let mut fills = 0usize;

    for op in list {
        match op {
            DrawOp::NewCanvas { size, background } => {
                canvas = *size;
                shapes.clear();
                fills = 0;
                steps.push(Step {
                    label: format!("Canvas  {}×{}", size.width, size.height),
                    canvas,
                    shapes: shapes.clone(),
                    annotation: format!("bg {background:?}"),
                });
            }
            DrawOp::ResizeCanvas { plan, .. } => {
                let (sx, sy) = ratio(plan.draw_size, plan.source);
                let (dx, dy) = (f64::from(plan.draw_offset.x), f64::from(plan.draw_offset.y));
                shapes = shapes.iter().map(|s| s.remap(sx, sy, dx, dy)).collect();
                canvas = plan.canvas;
                fills = 0;
                steps.push(Step {
                    label: format!("Grow  {}×{}", canvas.width, canvas.height),
                    canvas,
                    shapes: shapes.clone(),
                    annotation: format!(
                        "content {}×{} at ({}, {})",
                        plan.draw_size.width, plan.draw_size.height, dx, dy
                    ),
                });
            }
            DrawOp::Blit {
                source,
                orientation,
                dest,
                opacity,
                ..
            } => {
                shapes.push(blit_shape(*source, dest));
                fills = 0;
                let mut annotation = format!("at ({}, {})", dest.x, dest.y);
                if !orientation.is_identity() {
                    annotation.push_str(&format!(", {orientation:?}"));
                }
                if *opacity < 1.0 {
                    annotation.push_str(&format!(", opacity {opacity:.2}"));
                }
                steps.push(Step {
                    label: format!("Blit #{source}  {}×{}", dest.width, dest.height),
                    canvas,
                    shapes: shapes.clone(),
                    annotation,
                });
            }
            DrawOp::Fill { path, blend, .. } => {
                shapes.push(Shape::Fill(path.points().iter().map(to_f64).collect()));
                fills += 1;
                let step = Step {
                    label: format!("Fill ×{fills}"),
                    canvas,
                    shapes: shapes.clone(),
                    annotation: format!("{blend:?}"),
                };
                match steps.last_mut() {
                    Some(last) if fills > 1 => *last = step,
                    _ => steps.push(step),
                }
            }
        }
    }
    steps
}

fn blit_shape(source: usize, dest: &Rect) -> Shape {
    Shape::Blit {
        x: f64::from(dest.x),
        y: f64::from(dest.y),
        w: f64::from(dest.width),
        h: f64::from(dest.height),
        source,
    }
}

fn to_f64(p: &PointF) -> (f64, f64) {
    (f64::from(p.x), f64::from(p.y))
}

fn ratio(to: Size, from: Size) -> (f64, f64) {
    let axis = |t: u32, f: u32| if f == 0 { 1.0 } else { f64::from(t) / f64::from(f) };
    (axis(to.width, from.width), axis(to.height, from.height))
}

/// Scale a Size to fit within MAX_PANEL_W × MAX_PANEL_H, preserving aspect ratio.
fn scale_to_fit(size: Size) -> (f64, f64, f64) {
    let w = f64::from(size.width);
    let h = f64::from(size.height);
    if w == 0.0 || h == 0.0 {
        return (1.0, 1.0, 1.0);
    }
    let scale = (MAX_PANEL_W / w).min(MAX_PANEL_H / h);
    (w * scale, h * scale, scale)
}

fn render_steps(steps: &[Step]) -> String {
    if steps.is_empty() {
        return String::from(r#"<svg xmlns="http://www.w3.org/2000/svg" width="1" height="1"/>"#);
    }

    let n = steps.len() as f64;
    let total_h = 2.0 * MARGIN_TOP + n * (LABEL_H + MAX_PANEL_H) + (n - 1.0) * PANEL_GAP;
    let total_w = MAX_PANEL_W + 2.0 * MARGIN_X;

    let mut svg = String::with_capacity(4096);
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        total_w as u32, total_h as u32, total_w, total_h
    ));
    svg.push('\n');

    svg.push_str(
        r##"<style>
  text { font-family: ui-monospace, "DejaVu Sans Mono", monospace; }
  .step-title { font-size: 12px; font-weight: 600; fill: #222; }
  .step-note { font-size: 10px; fill: #555; }
  .src-index { font-size: 10px; font-weight: 600; fill: #1b1b1b; }
  .canvas-bg { fill: #f4f1ea; stroke: #8a8270; stroke-dasharray: 4 2; }
  .src { fill: #9fd6a8; stroke: #3f8a4c; stroke-width: 1.2; fill-opacity: 0.9; }
  .cutout { fill: #f2c46d; stroke: #a87a1e; stroke-width: 0.6; }
  .flow { stroke: #8a8270; stroke-width: 1.2; marker-end: url(#flow-tip); }
  #flow-tip path { fill: #8a8270; }
  @media (prefers-color-scheme: dark) {
    .step-title { fill: #eee; }
    .step-note { fill: #bbb; }
    .canvas-bg { fill: #26241f; stroke: #7a7364; }
    .src { fill: #2f6b3a; stroke: #7cc48a; }
    .cutout { fill: #7a5716; stroke: #e0aa45; }
    .flow { stroke: #a59c87; }
    #flow-tip path { fill: #a59c87; }
  }
</style>
<defs>
  <marker id="flow-tip" viewBox="0 0 10 10" refX="10" refY="5" markerWidth="7" markerHeight="7" orient="auto-start-reverse">
    <path d="M0,0 L10,5 L0,10 z"/>
  </marker>
</defs>
"##,
    );

    let mut y = MARGIN_TOP;
    let center_x = total_w / 2.0;

    for (i, step) in steps.iter().enumerate() {
        svg.push_str(&format!(
            r#"<text x="{}" y="{}" class="step-title" text-anchor="middle">{}</text>"#,
            center_x,
            y + 14.0,
            escape_xml(&step.label)
        ));
        svg.push('\n');
        y += LABEL_H;

        let (sw, sh, scale) = scale_to_fit(step.canvas);
        let panel_x = center_x - sw / 2.0;
        let panel_y = y;

        svg.push_str(&format!(
            r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" class="canvas-bg"/>"#,
            panel_x, panel_y, sw, sh
        ));
        svg.push('\n');

        for shape in &step.shapes {
            match shape {
                Shape::Blit { x, y, w, h, source } => {
                    let (bx, by) = (panel_x + x * scale, panel_y + y * scale);
                    svg.push_str(&format!(
                        r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" class="src"/>"#,
                        bx,
                        by,
                        w * scale,
                        h * scale
                    ));
                    svg.push_str(&format!(
                        r#"<text x="{:.1}" y="{:.1}" class="src-index" text-anchor="middle">{}</text>"#,
                        bx + w * scale / 2.0,
                        by + h * scale / 2.0 + 4.0,
                        source
                    ));
                    svg.push('\n');
                }
                Shape::Fill(points) => {
                    let pts: Vec<String> = points
                        .iter()
                        .map(|(px, py)| {
                            format!("{:.2},{:.2}", panel_x + px * scale, panel_y + py * scale)
                        })
                        .collect();
                    svg.push_str(&format!(
                        r#"<polygon points="{}" class="cutout"/>"#,
                        pts.join(" ")
                    ));
                    svg.push('\n');
                }
            }
        }

        if !step.annotation.is_empty() {
            svg.push_str(&format!(
                r#"<text x="{}" y="{:.1}" class="step-note" text-anchor="middle">{}</text>"#,
                center_x,
                panel_y + sh + 14.0,
                escape_xml(&step.annotation)
            ));
            svg.push('\n');
        }

        y += MAX_PANEL_H;

        if i < steps.len() - 1 {
            svg.push_str(&format!(
                r#"<line x1="{}" y1="{:.1}" x2="{}" y2="{:.1}" class="flow"/>"#,
                center_x,
                y + ARROW_INSET,
                center_x,
                y + ARROW_INSET + ARROW_H
            ));
            svg.push('\n');
            y += PANEL_GAP;
        }
    }

    svg.push_str("</svg>\n");
    svg
}

/// Escape special characters for XML text content.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
