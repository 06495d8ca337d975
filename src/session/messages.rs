//! Message types for an annotation session
//!
//! One message per user action in the form; `handlers::update` applies them.

use std::path::PathBuf;

use crate::config::ShapeColor;
use crate::domain::{AnnotationMode, BoundingBox, CoordField};
use crate::session::preview::CoordinatePreview;
use crate::session::state::RenderStep;

/// User actions on the annotation form
#[derive(Debug, Clone)]
pub enum Msg {
    /// New file selected or dropped
    Upload(Vec<u8>),
    /// One coordinate field edited
    EditField(CoordField, String),
    /// Free-text box string edited
    EditBboxText(String),
    /// Annotation type selected
    SetMode(AnnotationMode),
    /// Stroke/fill color picked
    SetColor(ShapeColor),
    /// Render button pressed
    RenderRequest,
    /// Answer to the last confirmation
    Acknowledge(bool),
    /// Loading indicator done, draw the result
    FinishRender,
    /// Download button pressed, save into this directory
    DownloadRequest(PathBuf),
    /// Clear button pressed
    Clear,
}

/// What the form should show after a message
#[derive(Debug, Clone)]
pub enum Reply {
    /// Image decoded with these dimensions
    Loaded { width: u32, height: u32 },
    /// Fresh preview, `None` hides it
    Preview(Option<CoordinatePreview>),
    /// Next step of a render request
    Render(RenderStep),
    /// Result drawn with this normalized box
    Rendered(BoundingBox),
    /// Download written here
    Saved(PathBuf),
    /// Mode or color changed
    Updated,
    Cleared,
}

impl Msg {
    pub fn edit_field(field: CoordField, value: impl Into<String>) -> Self {
        Msg::EditField(field, value.into())
    }

    pub fn edit_bbox_text(text: impl Into<String>) -> Self {
        Msg::EditBboxText(text.into())
    }

    pub fn accept() -> Self {
        Msg::Acknowledge(true)
    }

    pub fn decline() -> Self {
        Msg::Acknowledge(false)
    }
}
