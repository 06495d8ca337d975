//! Uploaded image type

use image::{ImageFormat, RgbaImage};

use crate::error::AnnotatorError;

/// A decoded upload, kept as RGBA for drawing
#[derive(Clone, Debug)]
pub struct SourceImage {
    pub rgba: RgbaImage,
    /// Format the bytes were decoded from
    pub format: ImageFormat,
}

impl SourceImage {
    /// Decode an uploaded file in any format the `image` crate supports
    pub fn decode(bytes: &[u8]) -> Result<Self, AnnotatorError> {
        let format = image::guess_format(bytes)?;
        let rgba = image::load_from_memory_with_format(bytes, format)?.to_rgba8();
        log::debug!(
            "SourceImage decoded: {}x{} pixels from {:?}",
            rgba.width(),
            rgba.height(),
            format
        );
        Ok(Self { rgba, format })
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.rgba.dimensions()
    }
}
