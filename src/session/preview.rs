//! Live preview text for the coordinate form

use std::fmt;

use crate::domain::{BoundingBox, BoxStatus, Summary};

/// Status and measurements of the raw box, shown after every edit
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoordinatePreview {
    pub status: BoxStatus,
    pub bbox: BoundingBox,
    pub summary: Summary,
}

impl CoordinatePreview {
    /// Preview a raw box against the loaded image bounds, if any
    pub fn new(bbox: BoundingBox, bounds: Option<(u32, u32)>) -> Self {
        Self {
            status: bbox.classify(bounds),
            bbox,
            summary: bbox.summarize(),
        }
    }
}

impl fmt::Display for CoordinatePreview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let icon = if self.status.is_valid() { "[ok]" } else { "[!]" };
        let b = &self.bbox;
        let s = &self.summary;
        writeln!(f, "{} {}", icon, self.status)?;
        writeln!(f, "  top-left:     ({}, {})", b.x1, b.y1)?;
        writeln!(f, "  bottom-right: ({}, {})", b.x2, b.y2)?;
        writeln!(f, "  center:       ({:.1}, {:.1})", s.center_x, s.center_y)?;
        writeln!(f, "  width:  {:.1} px", s.width)?;
        writeln!(f, "  height: {:.1} px", s.height)?;
        write!(f, "  area:   {:.0} px²", s.area)
    }
}
