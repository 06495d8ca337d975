use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::config::{AppConfig, ShapeColor};
use crate::domain::{AnnotationMode, BoundingBox, CoordField, Warning};
use crate::error::AnnotatorError;
use crate::export;
use crate::render::{self, AnnotatedResult};
use crate::session::form::CoordinateForm;
use crate::session::preview::CoordinatePreview;
use crate::source::SourceImage;

/// Where a render request stands after a call
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RenderStep {
    /// The user has to accept or decline this warning
    Confirm(Warning),
    /// All warnings accepted; call [`Session::finish_render`]
    Ready,
    /// A warning was declined and the request dropped
    Cancelled,
}

#[derive(Clone, Debug)]
struct PendingRender {
    raw: BoundingBox,
    warnings: VecDeque<Warning>,
}

/// Everything one annotation session holds.
///
/// The image and the rendered result are replaced or dropped only by the
/// transitions below; a rejected command leaves both as they were.
#[derive(Clone, Debug)]
pub struct Session {
    pub image: Option<SourceImage>,
    pub form: CoordinateForm,
    pub mode: AnnotationMode,
    pub color: ShapeColor,
    pub result: Option<AnnotatedResult>,
    pending: Option<PendingRender>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(&AppConfig::default())
    }
}

impl Session {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            image: None,
            form: CoordinateForm::default(),
            mode: config.default_mode,
            color: config.default_color,
            result: None,
            pending: None,
        }
    }

    /// Width and height of the loaded image
    pub fn image_bounds(&self) -> Option<(u32, u32)> {
        self.image.as_ref().map(SourceImage::dimensions)
    }

    /// Decode and load an upload, replacing the current image.
    ///
    /// A pending render is dropped. The last result stays available for
    /// download until the next render or clear.
    pub fn upload(&mut self, bytes: &[u8]) -> Result<(u32, u32), AnnotatorError> {
        let image = SourceImage::decode(bytes)?;
        let dims = image.dimensions();
        log::info!("Image loaded: {}x{}", dims.0, dims.1);
        self.image = Some(image);
        self.pending = None;
        Ok(dims)
    }

    /// Preview of the current form, hidden while any field is not a number
    pub fn preview(&self) -> Option<CoordinatePreview> {
        self.form
            .raw_box()
            .map(|bbox| CoordinatePreview::new(bbox, self.image_bounds()))
    }

    pub fn edit_field(&mut self, field: CoordField, value: &str) -> Option<CoordinatePreview> {
        self.form.set_field(field, value);
        self.preview()
    }

    pub fn edit_bbox_text(&mut self, text: &str) -> Option<CoordinatePreview> {
        self.form.set_bbox_text(text);
        self.preview()
    }

    /// Validate the form and start a render.
    ///
    /// Out-of-range coordinates are confirmed first, then swapped corners.
    pub fn request_render(&mut self) -> Result<RenderStep, AnnotatorError> {
        let (width, height) = self.image_bounds().ok_or(AnnotatorError::NoImageLoaded)?;
        let raw = self.form.bounding_box()?;

        let warnings: VecDeque<Warning> = Warning::for_box(raw, width, height).into();
        let step = match warnings.front() {
            Some(warning) => RenderStep::Confirm(*warning),
            None => RenderStep::Ready,
        };
        log::debug!(
            "Render requested for ({}, {}, {}, {}) on {}x{}: {:?}",
            raw.x1,
            raw.y1,
            raw.x2,
            raw.y2,
            width,
            height,
            step
        );
        self.pending = Some(PendingRender { raw, warnings });
        Ok(step)
    }

    /// Answer the warning returned by the last step
    pub fn acknowledge(&mut self, accept: bool) -> Result<RenderStep, AnnotatorError> {
        let pending = self
            .pending
            .as_mut()
            .filter(|p| !p.warnings.is_empty())
            .ok_or(AnnotatorError::NoPendingRender)?;

        if !accept {
            log::info!("Render cancelled by user");
            self.pending = None;
            return Ok(RenderStep::Cancelled);
        }

        pending.warnings.pop_front();
        Ok(match pending.warnings.front() {
            Some(next) => RenderStep::Confirm(*next),
            None => RenderStep::Ready,
        })
    }

    /// Draw the pending request once every warning has been accepted
    pub fn finish_render(&mut self) -> Result<&AnnotatedResult, AnnotatorError> {
        let raw = match &self.pending {
            Some(pending) if pending.warnings.is_empty() => pending.raw,
            _ => return Err(AnnotatorError::NoPendingRender),
        };
        let image = self.image.as_ref().ok_or(AnnotatorError::NoImageLoaded)?;

        let result = render::render(&image.rgba, &raw, self.mode, self.color);
        self.pending = None;
        Ok(self.result.insert(result))
    }

    pub fn has_pending_render(&self) -> bool {
        self.pending.is_some()
    }

    /// Write the last result into `dir` under a timestamped name
    pub fn download(&self, dir: &Path) -> Result<PathBuf, AnnotatorError> {
        self.download_at(dir, Utc::now())
    }

    pub fn download_at(&self, dir: &Path, now: DateTime<Utc>) -> Result<PathBuf, AnnotatorError> {
        let result = self.result.as_ref().ok_or(AnnotatorError::NothingToDownload)?;
        let path = dir.join(export::download_file_name(now));
        export::save_rgba(&result.image, &path)?;
        log::info!("Saved annotated image to {:?}", path);
        Ok(path)
    }

    /// Drop the image, the result and the form contents
    pub fn clear(&mut self) {
        self.image = None;
        self.result = None;
        self.pending = None;
        self.form.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BoxStatus;
    use chrono::TimeZone;
    use image::{Rgba, RgbaImage};

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, Rgba([40, 40, 40, 255]));
        export::encode_png(&img).unwrap()
    }

    fn session_with_image() -> Session {
        let mut session = Session::default();
        session.upload(&png_bytes(400, 300)).unwrap();
        session
    }

    #[test]
    fn test_render_without_image_is_rejected() {
        let mut session = Session::default();
        session.edit_bbox_text("1 2 3 4");
        assert!(matches!(
            session.request_render(),
            Err(AnnotatorError::NoImageLoaded)
        ));
        assert!(!session.has_pending_render());
    }

    #[test]
    fn test_render_with_bad_field_is_rejected() {
        let mut session = session_with_image();
        session.edit_bbox_text("10 10 50 50");
        session.edit_field(CoordField::X2, "fifty");
        assert!(matches!(
            session.request_render(),
            Err(AnnotatorError::InvalidCoordinate { field: CoordField::X2, .. })
        ));
        assert!(session.result.is_none());
    }

    #[test]
    fn test_valid_box_renders_without_confirmation() {
        let mut session = session_with_image();
        session.edit_bbox_text("100 50 200 150");

        assert_eq!(session.request_render().unwrap(), RenderStep::Ready);
        let result = session.finish_render().unwrap();
        assert_eq!(result.bbox, BoundingBox::new(100.0, 50.0, 200.0, 150.0));
        assert_eq!(result.image.dimensions(), (400, 300));
        assert!(!session.has_pending_render());
    }

    #[test]
    fn test_out_of_range_needs_confirmation() {
        let mut session = session_with_image();
        let preview = session.edit_bbox_text("50 50 500 250").unwrap();
        assert_eq!(preview.status, BoxStatus::OutOfRange);

        let step = session.request_render().unwrap();
        assert!(matches!(step, RenderStep::Confirm(Warning::OutOfRange { .. })));

        // Cannot finish before accepting
        assert!(matches!(
            session.finish_render(),
            Err(AnnotatorError::NoPendingRender)
        ));

        assert_eq!(session.acknowledge(true).unwrap(), RenderStep::Ready);
        let result = session.finish_render().unwrap();
        assert_eq!(result.bbox, BoundingBox::new(50.0, 50.0, 400.0, 250.0));
    }

    #[test]
    fn test_inverted_box_is_swapped_after_confirmation() {
        let mut session = session_with_image();
        let preview = session.edit_bbox_text("200,50,100,150").unwrap();
        assert_eq!(preview.status, BoxStatus::Inverted);

        let step = session.request_render().unwrap();
        assert!(matches!(step, RenderStep::Confirm(Warning::InvertedBox { .. })));
        assert_eq!(session.acknowledge(true).unwrap(), RenderStep::Ready);
        let result = session.finish_render().unwrap();
        assert_eq!(result.bbox, BoundingBox::new(100.0, 50.0, 200.0, 150.0));
    }

    #[test]
    fn test_both_warnings_are_asked_in_order() {
        let mut session = session_with_image();
        session.edit_bbox_text("300;50;100;350");

        assert!(matches!(
            session.request_render().unwrap(),
            RenderStep::Confirm(Warning::OutOfRange { .. })
        ));
        assert!(matches!(
            session.acknowledge(true).unwrap(),
            RenderStep::Confirm(Warning::InvertedBox { .. })
        ));
        assert_eq!(session.acknowledge(true).unwrap(), RenderStep::Ready);
        let result = session.finish_render().unwrap();
        assert_eq!(result.bbox, BoundingBox::new(100.0, 50.0, 300.0, 300.0));
    }

    #[test]
    fn test_negative_trailing_corner_asks_only_to_swap() {
        let mut session = session_with_image();
        let preview = session.edit_bbox_text("200 50 -10 150").unwrap();
        assert_eq!(preview.status, BoxStatus::Inverted);

        assert!(matches!(
            session.request_render().unwrap(),
            RenderStep::Confirm(Warning::InvertedBox { .. })
        ));
        assert_eq!(session.acknowledge(true).unwrap(), RenderStep::Ready);
        let result = session.finish_render().unwrap();
        assert_eq!(result.bbox, BoundingBox::new(0.0, 50.0, 200.0, 150.0));
    }

    #[test]
    fn test_decline_keeps_previous_result() {
        let mut session = session_with_image();
        session.edit_bbox_text("10 10 20 20");
        session.request_render().unwrap();
        session.finish_render().unwrap();
        let before = session.result.as_ref().unwrap().bbox;

        session.edit_bbox_text("10 10 900 20");
        session.request_render().unwrap();
        assert_eq!(session.acknowledge(false).unwrap(), RenderStep::Cancelled);
        assert!(!session.has_pending_render());
        assert_eq!(session.result.as_ref().unwrap().bbox, before);

        assert!(matches!(
            session.acknowledge(true),
            Err(AnnotatorError::NoPendingRender)
        ));
    }

    #[test]
    fn test_bad_upload_keeps_previous_image() {
        let mut session = session_with_image();
        assert!(matches!(
            session.upload(b"GIF89a but not really"),
            Err(AnnotatorError::DecodeFailure(_))
        ));
        assert_eq!(session.image_bounds(), Some((400, 300)));
    }

    #[test]
    fn test_new_upload_drops_pending_render() {
        let mut session = session_with_image();
        session.edit_bbox_text("0 0 999 999");
        session.request_render().unwrap();
        assert!(session.has_pending_render());

        assert_eq!(session.upload(&png_bytes(1000, 1000)).unwrap(), (1000, 1000));
        assert!(!session.has_pending_render());
        assert_eq!(session.preview().unwrap().status, BoxStatus::Valid);
    }

    #[test]
    fn test_download_without_render_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let session = session_with_image();

        assert!(matches!(
            session.download(dir.path()),
            Err(AnnotatorError::NothingToDownload)
        ));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_download_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_with_image();
        session.edit_bbox_text("100 50 200 150");
        session.request_render().unwrap();
        session.finish_render().unwrap();

        let now = Utc.timestamp_millis_opt(1_712_345_678_901).unwrap();
        let path = session.download_at(dir.path(), now).unwrap();
        assert_eq!(
            path.file_name().and_then(|n| n.to_str()),
            Some("annotated_image_1712345678901.png")
        );

        let saved = image::open(&path).unwrap().to_rgba8();
        assert_eq!(&saved, &session.result.as_ref().unwrap().image);
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut session = session_with_image();
        session.edit_bbox_text("100 50 200 150");
        session.request_render().unwrap();
        session.finish_render().unwrap();

        session.clear();
        assert!(session.image.is_none());
        assert!(session.result.is_none());
        assert_eq!(session.form, CoordinateForm::default());
        assert!(session.preview().is_none());
        assert!(matches!(
            session.request_render(),
            Err(AnnotatorError::NoImageLoaded)
        ));
    }

    #[test]
    fn test_preview_without_image_is_valid() {
        let mut session = Session::default();
        let preview = session.edit_bbox_text("200 50 100 150").unwrap();
        assert_eq!(preview.status, BoxStatus::Valid);
        assert_eq!(preview.summary.area, 10_000.0);
    }
}
