//! Pure domain types with minimal dependencies
//!
//! Types here do not touch pixels or the filesystem.

pub mod annotation;
pub mod geometry;

pub use annotation::*;
pub use geometry::*;
