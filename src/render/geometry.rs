//! Style and label layout math
//!
//! Everything here is derived from the raster size and the normalized box,
//! so the drawing code in `image.rs` only has to paint.

/// Stroke and marker sizing constants
pub mod style {
    /// `sqrt(width * height)` is divided by this to get the line width
    pub const LINE_WIDTH_DIVISOR: f64 = 200.0;
    pub const MIN_LINE_WIDTH: f64 = 2.0;
    pub const MAX_LINE_WIDTH: f64 = 8.0;

    pub const BOX_FONT_FACTOR: f64 = 3.0;
    pub const MIN_BOX_FONT: f64 = 12.0;
    pub const MAX_BOX_FONT: f64 = 16.0;

    pub const RADIUS_FACTOR: f64 = 2.0;
    pub const MIN_RADIUS: f64 = 4.0;
    pub const MAX_RADIUS: f64 = 12.0;
    /// Cross arm length as a multiple of the point radius
    pub const CROSS_FACTOR: f64 = 3.0;

    pub const CENTER_FONT_FACTOR: f64 = 2.5;
    pub const MIN_CENTER_FONT: f64 = 10.0;
    pub const MAX_CENTER_FONT: f64 = 14.0;

    /// Opacity of the box interior fill
    pub const FILL_OPACITY: f32 = 0.15;
    /// Opacity of the black label backgrounds
    pub const LABEL_BG_OPACITY: f32 = 0.7;
}

/// Label padding and offsets in pixels
pub mod label {
    /// Horizontal room kept between the label and the right edge
    pub const EDGE_MARGIN: f64 = 4.0;
    /// Background is this much wider than the text
    pub const PADDING: f64 = 4.0;
    /// Box label sits this far above the top edge of the box
    pub const BOX_LABEL_LIFT: f64 = 2.0;
    /// Box label background is this much taller than the font
    pub const BOX_LABEL_EXTRA_HEIGHT: f64 = 4.0;
    /// Gap between the end of the cross arm and the center label
    pub const CENTER_LABEL_GAP: f64 = 5.0;
    /// Center label background is this much taller than the font
    pub const CENTER_LABEL_EXTRA_HEIGHT: f64 = 2.0;
}

/// Sizes derived from the raster dimensions
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnnotationStyle {
    pub line_width: f64,
    pub box_font_size: f64,
    pub point_radius: f64,
    /// Length of one cross arm from the center
    pub cross_size: f64,
    pub center_font_size: f64,
}

impl AnnotationStyle {
    pub fn for_dimensions(width: u32, height: u32) -> Self {
        let area = f64::from(width) * f64::from(height);
        let line_width = (area.sqrt() / style::LINE_WIDTH_DIVISOR)
            .clamp(style::MIN_LINE_WIDTH, style::MAX_LINE_WIDTH);
        let point_radius =
            (line_width * style::RADIUS_FACTOR).clamp(style::MIN_RADIUS, style::MAX_RADIUS);

        Self {
            line_width,
            box_font_size: (line_width * style::BOX_FONT_FACTOR)
                .clamp(style::MIN_BOX_FONT, style::MAX_BOX_FONT),
            point_radius,
            cross_size: point_radius * style::CROSS_FACTOR,
            center_font_size: (line_width * style::CENTER_FONT_FACTOR)
                .clamp(style::MIN_CENTER_FONT, style::MAX_CENTER_FONT),
        }
    }
}

/// Placement of a text label and its background
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LabelLayout {
    /// Background rectangle
    pub bg_x: f64,
    pub bg_y: f64,
    pub bg_width: f64,
    pub bg_height: f64,
    /// Top-left corner of the first glyph
    pub text_x: f64,
    pub text_y: f64,
}

/// Corner label placed above the top-left corner of the box.
///
/// `text_width` is the rendered width of the label text. The label is
/// pulled left so it stays inside the raster and pushed down so it never
/// starts above row zero.
pub fn box_label_layout(
    x1: f64,
    y1: f64,
    text_width: f64,
    font_size: f64,
    raster_width: u32,
) -> LabelLayout {
    let label_height = font_size + label::BOX_LABEL_EXTRA_HEIGHT;
    let x = x1.min(f64::from(raster_width) - text_width - label::EDGE_MARGIN);
    let bottom = label_height.max(y1 - label::BOX_LABEL_LIFT);
    let top = bottom - label_height;

    LabelLayout {
        bg_x: x,
        bg_y: top,
        bg_width: text_width + label::PADDING,
        bg_height: label_height,
        text_x: x + label::PADDING / 2.0,
        text_y: top + label::BOX_LABEL_EXTRA_HEIGHT / 2.0,
    }
}

/// Center label placed to the right of the cross arm.
///
/// The baseline follows the center vertically but is kept at least one font
/// height from the top and four pixels from the bottom.
pub fn center_label_layout(
    cx: f64,
    cy: f64,
    cross_size: f64,
    text_width: f64,
    font_size: f64,
    raster_width: u32,
    raster_height: u32,
) -> LabelLayout {
    let x = (cx + cross_size + label::CENTER_LABEL_GAP)
        .min(f64::from(raster_width) - text_width - label::EDGE_MARGIN);
    let baseline = font_size.max(cy.min(f64::from(raster_height) - label::EDGE_MARGIN));
    let top = baseline - font_size;

    LabelLayout {
        bg_x: x,
        bg_y: top,
        bg_width: text_width + label::PADDING,
        bg_height: font_size + label::CENTER_LABEL_EXTRA_HEIGHT,
        text_x: x + label::PADDING / 2.0,
        text_y: top + label::CENTER_LABEL_EXTRA_HEIGHT / 2.0,
    }
}
