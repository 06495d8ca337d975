//! Image rendering for annotations using tiny-skia
//!
//! These functions burn the box and center marker into a copy of the source
//! image for saving to disk.

use image::RgbaImage;
use tiny_skia::{
    Color, ColorU8, LineCap, LineJoin, Paint, PathBuilder, Pixmap, Stroke, Transform,
};

use super::geometry::{self, AnnotationStyle, LabelLayout, style};
use super::text;
use crate::config::ShapeColor;
use crate::domain::{AnnotationMode, BoundingBox};

/// Rendered raster plus the normalized box it shows
#[derive(Clone, Debug)]
pub struct AnnotatedResult {
    pub image: RgbaImage,
    pub bbox: BoundingBox,
}

/// Convert RgbaImage to Pixmap, apply drawing function, and copy back
///
/// tiny-skia works on premultiplied pixels. Only pixels the drawing touched
/// are demultiplied and written back; the rest keep their source bytes.
/// Sizes tiny-skia cannot allocate are left untouched.
fn with_pixmap(img: &mut RgbaImage, f: impl FnOnce(&mut Pixmap)) {
    let Some(mut pixmap) = Pixmap::new(img.width(), img.height()) else {
        log::warn!(
            "Cannot draw on {}x{} image, leaving it unchanged",
            img.width(),
            img.height()
        );
        return;
    };

    for (dst, src) in pixmap.pixels_mut().iter_mut().zip(img.pixels()) {
        let [r, g, b, a] = src.0;
        *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
    }
    let before = pixmap.pixels().to_vec();

    f(&mut pixmap);

    // Copy back what changed
    for ((dst, now), was) in img.pixels_mut().zip(pixmap.pixels()).zip(&before) {
        if now == was {
            continue;
        }
        let c = now.demultiply();
        dst.0 = [c.red(), c.green(), c.blue(), c.alpha()];
    }
}

fn solid_paint(color: ShapeColor, opacity: f32) -> Paint<'static> {
    let [r, g, b, _] = color.to_rgba_u8();
    let mut paint = Paint::default();
    paint.set_color_rgba8(r, g, b, opacity_u8(opacity));
    paint.anti_alias = true;
    paint
}

fn label_bg_paint() -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(0, 0, 0, opacity_u8(style::LABEL_BG_OPACITY));
    paint.anti_alias = true;
    paint
}

fn opacity_u8(opacity: f32) -> u8 {
    (opacity.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn text_paint() -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(Color::WHITE);
    paint.anti_alias = true;
    paint
}

/// Integer shown in labels
fn rounded(v: f64) -> i64 {
    v.round() as i64
}

/// Draw a label background and its white text
fn draw_label(pixmap: &mut Pixmap, label: &str, layout: &LabelLayout, font_size: f64) {
    if let Some(rect) = tiny_skia::Rect::from_xywh(
        layout.bg_x as f32,
        layout.bg_y as f32,
        layout.bg_width as f32,
        layout.bg_height as f32,
    ) {
        pixmap.fill_rect(rect, &label_bg_paint(), Transform::identity(), None);
    }
    text::draw_text(
        pixmap,
        label,
        layout.text_x as f32,
        layout.text_y as f32,
        font_size as f32,
        &text_paint(),
    );
}

/// Outline, 15% fill and the `(x1,y1)` corner label
fn draw_box(pixmap: &mut Pixmap, bbox: &BoundingBox, style: &AnnotationStyle, color: ShapeColor) {
    let (x1, y1) = (bbox.x1 as f32, bbox.y1 as f32);
    let (x2, y2) = (bbox.x2 as f32, bbox.y2 as f32);

    // Build rectangle path
    let mut pb = PathBuilder::new();
    pb.move_to(x1, y1);
    pb.line_to(x2, y1);
    pb.line_to(x2, y2);
    pb.line_to(x1, y2);
    pb.close();
    if let Some(path) = pb.finish() {
        let stroke = Stroke {
            width: style.line_width as f32,
            line_cap: LineCap::Butt,
            line_join: LineJoin::Miter,
            ..Default::default()
        };
        pixmap.stroke_path(&path, &solid_paint(color, 1.0), &stroke, Transform::identity(), None);
    }

    // Zero-area boxes have no interior to fill
    if let Some(rect) = tiny_skia::Rect::from_ltrb(x1, y1, x2, y2) {
        pixmap.fill_rect(
            rect,
            &solid_paint(color, style::FILL_OPACITY),
            Transform::identity(),
            None,
        );
    }

    let label = format!("({},{})", rounded(bbox.x1), rounded(bbox.y1));
    let text_width = text::text_width(&label, style.box_font_size);
    let layout = geometry::box_label_layout(
        bbox.x1,
        bbox.y1,
        text_width,
        style.box_font_size,
        pixmap.width(),
    );
    draw_label(pixmap, &label, &layout, style.box_font_size);
}

/// Center dot, cross and the `center(cx,cy)` label
fn draw_point(pixmap: &mut Pixmap, bbox: &BoundingBox, style: &AnnotationStyle, color: ShapeColor) {
    let summary = bbox.summarize();
    let (cx, cy) = (summary.center_x as f32, summary.center_y as f32);
    let paint = solid_paint(color, 1.0);

    if let Some(dot) = PathBuilder::from_circle(cx, cy, style.point_radius as f32) {
        pixmap.fill_path(&dot, &paint, tiny_skia::FillRule::Winding, Transform::identity(), None);
    }

    let arm = style.cross_size as f32;
    let mut pb = PathBuilder::new();
    pb.move_to(cx - arm, cy);
    pb.line_to(cx + arm, cy);
    pb.move_to(cx, cy - arm);
    pb.line_to(cx, cy + arm);
    if let Some(cross) = pb.finish() {
        let stroke = Stroke {
            width: style.line_width as f32,
            line_cap: LineCap::Butt,
            ..Default::default()
        };
        pixmap.stroke_path(&cross, &paint, &stroke, Transform::identity(), None);
    }

    let label = format!(
        "center({},{})",
        rounded(summary.center_x),
        rounded(summary.center_y)
    );
    let text_width = text::text_width(&label, style.center_font_size);
    let layout = geometry::center_label_layout(
        summary.center_x,
        summary.center_y,
        style.cross_size,
        text_width,
        style.center_font_size,
        pixmap.width(),
        pixmap.height(),
    );
    draw_label(pixmap, &label, &layout, style.center_font_size);
}

/// Render an annotated copy of `source`.
///
/// The raw box is normalized against the source dimensions first, so every
/// input renders. The same inputs always produce the same pixels.
pub fn render(
    source: &RgbaImage,
    raw: &BoundingBox,
    mode: AnnotationMode,
    color: ShapeColor,
) -> AnnotatedResult {
    let mut img = source.clone();
    let (width, height) = img.dimensions();
    let bbox = raw.normalize(width, height);
    let style = AnnotationStyle::for_dimensions(width, height);

    log::info!(
        "Drawing {} annotation on {}x{} image: bbox ({}, {}, {}, {}), line width {}",
        mode,
        width,
        height,
        bbox.x1,
        bbox.y1,
        bbox.x2,
        bbox.y2,
        style.line_width
    );

    with_pixmap(&mut img, |pixmap| {
        if mode.draws_box() {
            draw_box(pixmap, &bbox, &style, color);
        }
        if mode.draws_point() {
            draw_point(pixmap, &bbox, &style, color);
        }
    });

    AnnotatedResult { image: img, bbox }
}
