//! Annotation mode and render confirmations

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::geometry::BoundingBox;
use crate::error::AnnotatorError;

/// Which visual elements to burn into the image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnotationMode {
    /// Box outline, translucent fill and corner label
    #[default]
    Box,
    /// Center dot, cross and center label
    Point,
    /// Everything
    Both,
}

impl AnnotationMode {
    pub fn draws_box(self) -> bool {
        matches!(self, AnnotationMode::Box | AnnotationMode::Both)
    }

    pub fn draws_point(self) -> bool {
        matches!(self, AnnotationMode::Point | AnnotationMode::Both)
    }

    pub fn name(self) -> &'static str {
        match self {
            AnnotationMode::Box => "box",
            AnnotationMode::Point => "point",
            AnnotationMode::Both => "both",
        }
    }
}

impl fmt::Display for AnnotationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AnnotationMode {
    type Err = AnnotatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "box" => Ok(AnnotationMode::Box),
            "point" => Ok(AnnotationMode::Point),
            "both" => Ok(AnnotationMode::Both),
            _ => Err(AnnotatorError::InvalidMode(s.to_string())),
        }
    }
}

/// Condition the user has to accept before a render proceeds
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Warning {
    /// Some coordinate lies outside the image; accepting clamps it
    OutOfRange {
        bbox: BoundingBox,
        image_width: u32,
        image_height: u32,
    },
    /// Corners are swapped or collapsed; accepting reorders them
    InvertedBox { bbox: BoundingBox },
}

impl Warning {
    /// Warnings for a raw box, in the order they are asked
    pub fn for_box(bbox: BoundingBox, image_width: u32, image_height: u32) -> Vec<Warning> {
        let mut warnings = Vec::with_capacity(2);
        if bbox.is_out_of_range(image_width, image_height) {
            warnings.push(Warning::OutOfRange {
                bbox,
                image_width,
                image_height,
            });
        }
        if bbox.is_inverted() {
            warnings.push(Warning::InvertedBox { bbox });
        }
        warnings
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::OutOfRange {
                bbox,
                image_width,
                image_height,
            } => write!(
                f,
                "Some coordinates are outside the image.\n\
                 Image size: {} x {}\n\
                 Input: ({}, {}) to ({}, {})\n\
                 Coordinates will be clamped to the image.",
                image_width, image_height, bbox.x1, bbox.y1, bbox.x2, bbox.y2
            ),
            Warning::InvertedBox { bbox } => write!(
                f,
                "Corners are not top-left to bottom-right.\n\
                 Input: ({}, {}) to ({}, {})\n\
                 Corners will be swapped into order.",
                bbox.x1, bbox.y1, bbox.x2, bbox.y2
            ),
        }
    }
}
