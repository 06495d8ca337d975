//! Annotation rendering module
//!
//! This module contains:
//! - Style and label layout calculations
//! - Image rendering using tiny-skia
//! - Bitmap text for labels

pub mod geometry;
pub mod image;
pub mod text;

pub use self::image::{AnnotatedResult, render};
