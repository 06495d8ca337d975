//! Error types for annotation sessions

use thiserror::Error;

use crate::domain::CoordField;

/// Errors surfaced to the user by session operations.
///
/// None of these are fatal: the session keeps its previous image and result.
#[derive(Error, Debug)]
pub enum AnnotatorError {
    /// Render requested before any image was uploaded
    #[error("no image loaded, upload an image first")]
    NoImageLoaded,

    /// One of the four coordinate fields is not a number
    #[error("invalid value {value:?} for {field}")]
    InvalidCoordinate {
        /// Field that failed to parse
        field: CoordField,
        /// Raw text of the field
        value: String,
    },

    /// Uploaded bytes are not a decodable image
    #[error("not a valid image: {0}")]
    DecodeFailure(#[from] image::ImageError),

    /// Download requested before anything was rendered
    #[error("no annotated image to download, render first")]
    NothingToDownload,

    /// Acknowledge or finish called without a pending render
    #[error("no render is waiting for confirmation")]
    NoPendingRender,

    /// Color string is not `#rgb` or `#rrggbb`
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// Annotation mode is not one of box, point, both
    #[error("invalid annotation mode: {0}")]
    InvalidMode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PNG encoding error: {0}")]
    Encoding(#[from] png::EncodingError),
}
