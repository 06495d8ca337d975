//! Bounding box geometry: normalization, summary and status

use std::fmt;
use std::str::FromStr;

/// Axis-aligned box given by two corners in image pixel coordinates.
///
/// Raw user input may have corners outside the image or swapped; use
/// [`BoundingBox::normalize`] to get a box that satisfies
/// `0 <= x1 <= x2 <= width` and `0 <= y1 <= y2 <= height`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BoundingBox {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl BoundingBox {
    /// Create a new box from corner coordinates
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Clamp every coordinate into the image and put the corners in order.
    ///
    /// Each axis is clamped and swapped on its own. Never fails: an all-zero
    /// box stays a zero-area box at the origin.
    pub fn normalize(&self, width: u32, height: u32) -> BoundingBox {
        let (w, h) = (f64::from(width), f64::from(height));

        let mut x1 = self.x1.clamp(0.0, w);
        let mut y1 = self.y1.clamp(0.0, h);
        let mut x2 = self.x2.clamp(0.0, w);
        let mut y2 = self.y2.clamp(0.0, h);

        if x1 >= x2 {
            std::mem::swap(&mut x1, &mut x2);
        }
        if y1 >= y2 {
            std::mem::swap(&mut y1, &mut y2);
        }

        BoundingBox { x1, y1, x2, y2 }
    }

    /// Width, height, center and area of the box
    pub fn summarize(&self) -> Summary {
        let width = (self.x2 - self.x1).abs();
        let height = (self.y2 - self.y1).abs();
        Summary {
            width,
            height,
            center_x: (self.x1 + self.x2) / 2.0,
            center_y: (self.y1 + self.y2) / 2.0,
            area: width * height,
        }
    }

    /// Check if the top-left corner is before the origin or the bottom-right
    /// corner is past the far edge.
    ///
    /// Only those four bounds are tested; a swapped corner that ends up
    /// outside is reported as inverted instead.
    pub fn is_out_of_range(&self, width: u32, height: u32) -> bool {
        let (w, h) = (f64::from(width), f64::from(height));
        self.x1 < 0.0 || self.x2 > w || self.y1 < 0.0 || self.y2 > h
    }

    /// Check if the corners are swapped or collapsed on either axis
    pub fn is_inverted(&self) -> bool {
        self.x1 >= self.x2 || self.y1 >= self.y2
    }

    /// Status shown in the live preview.
    ///
    /// Without image bounds every box is `Valid`. The range check wins when
    /// the box is both out of range and inverted.
    pub fn classify(&self, bounds: Option<(u32, u32)>) -> BoxStatus {
        let Some((width, height)) = bounds else {
            return BoxStatus::Valid;
        };
        if self.is_out_of_range(width, height) {
            BoxStatus::OutOfRange
        } else if self.is_inverted() {
            BoxStatus::Inverted
        } else {
            BoxStatus::Valid
        }
    }
}

/// Derived measurements of a bounding box
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Summary {
    pub width: f64,
    pub height: f64,
    pub center_x: f64,
    pub center_y: f64,
    pub area: f64,
}

/// Preview status of a raw bounding box
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoxStatus {
    Valid,
    OutOfRange,
    Inverted,
}

impl BoxStatus {
    pub fn is_valid(self) -> bool {
        self == BoxStatus::Valid
    }
}

impl fmt::Display for BoxStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BoxStatus::Valid => "Coordinates valid",
            BoxStatus::OutOfRange => "Coordinates outside the image",
            BoxStatus::Inverted => "Corners need to be swapped",
        })
    }
}

/// One of the four coordinate input fields
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CoordField {
    X1,
    Y1,
    X2,
    Y2,
}

impl CoordField {
    pub const ALL: [CoordField; 4] = [CoordField::X1, CoordField::Y1, CoordField::X2, CoordField::Y2];

    pub fn name(self) -> &'static str {
        match self {
            CoordField::X1 => "x1",
            CoordField::Y1 => "y1",
            CoordField::X2 => "x2",
            CoordField::Y2 => "y2",
        }
    }
}

impl fmt::Display for CoordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CoordField {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CoordField::ALL
            .into_iter()
            .find(|field| field.name().eq_ignore_ascii_case(s))
            .ok_or(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_well_formed(b: &BoundingBox, w: u32, h: u32) {
        let (w, h) = (f64::from(w), f64::from(h));
        assert!(0.0 <= b.x1 && b.x1 <= b.x2 && b.x2 <= w, "bad x range: {:?}", b);
        assert!(0.0 <= b.y1 && b.y1 <= b.y2 && b.y2 <= h, "bad y range: {:?}", b);
    }

    #[test]
    fn test_normalize_clamps_each_axis() {
        let raw = BoundingBox::new(50.0, 50.0, 500.0, 250.0);
        assert_eq!(raw.normalize(400, 300), BoundingBox::new(50.0, 50.0, 400.0, 250.0));

        let raw = BoundingBox::new(-20.0, -5.0, 100.0, 900.0);
        assert_eq!(raw.normalize(400, 300), BoundingBox::new(0.0, 0.0, 100.0, 300.0));
    }

    #[test]
    fn test_normalize_swaps_axes_independently() {
        let raw = BoundingBox::new(200.0, 50.0, 100.0, 150.0);
        assert_eq!(raw.normalize(400, 300), BoundingBox::new(100.0, 50.0, 200.0, 150.0));

        let raw = BoundingBox::new(100.0, 150.0, 200.0, 50.0);
        assert_eq!(raw.normalize(400, 300), BoundingBox::new(100.0, 50.0, 200.0, 150.0));

        let raw = BoundingBox::new(200.0, 150.0, 100.0, 50.0);
        assert_eq!(raw.normalize(400, 300), BoundingBox::new(100.0, 50.0, 200.0, 150.0));
    }

    #[test]
    fn test_normalize_degenerate_input() {
        let zero = BoundingBox::default().normalize(400, 300);
        assert_eq!(zero, BoundingBox::new(0.0, 0.0, 0.0, 0.0));
        assert_eq!(zero.summarize().area, 0.0);

        // Both corners past the right edge collapse onto it
        let raw = BoundingBox::new(500.0, 10.0, 600.0, 20.0);
        assert_eq!(raw.normalize(400, 300), BoundingBox::new(400.0, 10.0, 400.0, 20.0));
    }

    #[test]
    fn test_normalize_is_idempotent_and_well_formed() {
        let values = [-100.0, -0.5, 0.0, 12.25, 150.0, 299.9, 300.0, 399.0, 400.0, 1e6];
        let dims = [(1, 1), (400, 300), (300, 400), (1920, 1080)];

        for &(w, h) in &dims {
            for &a in &values {
                for &b in &values {
                    for &(c, d) in &[(a, b), (b, a), (values[3], values[7])] {
                        let raw = BoundingBox::new(a, c, b, d);
                        let once = raw.normalize(w, h);
                        assert_well_formed(&once, w, h);
                        assert_eq!(once.normalize(w, h), once);
                    }
                }
            }
        }
    }

    #[test]
    fn test_summarize() {
        let s = BoundingBox::new(100.0, 50.0, 200.0, 150.0).summarize();
        assert_eq!(s.width, 100.0);
        assert_eq!(s.height, 100.0);
        assert_eq!(s.center_x, 150.0);
        assert_eq!(s.center_y, 100.0);
        assert_eq!(s.area, 10_000.0);

        // Reversed corners still give non-negative extents
        let s = BoundingBox::new(200.0, 150.0, 100.0, 40.0).summarize();
        assert_eq!(s.width, 100.0);
        assert_eq!(s.height, 110.0);
        assert!(s.area >= 0.0);
    }

    #[test]
    fn test_classify() {
        let inside = BoundingBox::new(10.0, 10.0, 20.0, 20.0);
        assert_eq!(inside.classify(Some((400, 300))), BoxStatus::Valid);

        let out = BoundingBox::new(50.0, 50.0, 500.0, 250.0);
        assert_eq!(out.classify(Some((400, 300))), BoxStatus::OutOfRange);
        assert_eq!(out.classify(None), BoxStatus::Valid);

        let inverted = BoundingBox::new(200.0, 50.0, 100.0, 150.0);
        assert_eq!(inverted.classify(Some((400, 300))), BoxStatus::Inverted);

        // Range takes precedence over inversion
        let both = BoundingBox::new(-5.0, 50.0, -10.0, 150.0);
        assert_eq!(both.classify(Some((400, 300))), BoxStatus::OutOfRange);
    }

    #[test]
    fn test_range_checks_leading_and_trailing_corners_only() {
        // x2 is negative but only x1 < 0 and x2 > w count
        let swapped = BoundingBox::new(200.0, 50.0, -10.0, 150.0);
        assert!(!swapped.is_out_of_range(400, 300));
        assert_eq!(swapped.classify(Some((400, 300))), BoxStatus::Inverted);

        let past_right = BoundingBox::new(500.0, 50.0, 100.0, 150.0);
        assert!(!past_right.is_out_of_range(400, 300));

        assert!(BoundingBox::new(0.0, -1.0, 10.0, 10.0).is_out_of_range(400, 300));
        assert!(BoundingBox::new(0.0, 0.0, 10.0, 300.5).is_out_of_range(400, 300));
        assert!(!BoundingBox::new(0.0, 0.0, 400.0, 300.0).is_out_of_range(400, 300));
    }

    #[test]
    fn test_coord_field_parse() {
        assert_eq!("x1".parse::<CoordField>(), Ok(CoordField::X1));
        assert_eq!("Y2".parse::<CoordField>(), Ok(CoordField::Y2));
        assert!("z".parse::<CoordField>().is_err());
    }
}
