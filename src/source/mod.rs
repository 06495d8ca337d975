//! Image source module
//!
//! Decodes uploaded files into the raster the renderer draws on.

pub mod image;

pub use self::image::SourceImage;
