//! PNG output and download naming

use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use image::RgbaImage;

use crate::config::SaveLocation;
use crate::error::AnnotatorError;

fn write_png<W: io::Write>(w: W, image: &RgbaImage) -> Result<(), png::EncodingError> {
    let mut encoder = png::Encoder::new(w, image.width(), image.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(image.as_raw())
}

/// Encode an image as an 8-bit RGBA PNG in memory
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, AnnotatorError> {
    let mut buffer = Vec::new();
    write_png(&mut buffer, image)?;
    Ok(buffer)
}

pub fn save_rgba(image: &RgbaImage, path: &Path) -> Result<(), AnnotatorError> {
    let file = std::fs::File::create(path)?;
    write_png(io::BufWriter::new(file), image)?;
    Ok(())
}

/// `annotated_image_<epoch-millis>.png`
pub fn download_file_name(now: DateTime<Utc>) -> String {
    format!("annotated_image_{}.png", now.timestamp_millis())
}

/// Directory downloads are written into.
///
/// Falls back to the folder under the home directory, then to the current
/// directory.
pub fn save_dir(location: SaveLocation) -> PathBuf {
    let (platform, folder) = match location {
        SaveLocation::Downloads => (dirs::download_dir(), "Downloads"),
        SaveLocation::Pictures => (dirs::picture_dir(), "Pictures"),
        SaveLocation::Documents => (dirs::document_dir(), "Documents"),
    };
    platform
        .or_else(|| dirs::home_dir().map(|h| h.join(folder)))
        .unwrap_or_else(|| PathBuf::from("."))
}
