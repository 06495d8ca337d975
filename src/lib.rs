//! Draw a bounding box and its center point onto a copy of an image.
//!
//! [`session::Session`] holds the uploaded image, the coordinate form and the
//! last result; [`render::render`] does the drawing.

pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod export;
pub mod render;
pub mod session;
pub mod source;

pub use error::AnnotatorError;
