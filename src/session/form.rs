//! Coordinate form: four fields plus the free-text box string, kept in sync

use crate::domain::{BoundingBox, CoordField};
use crate::error::AnnotatorError;

/// Separators accepted between numbers in the free-text box string
const SEPARATORS: [char; 2] = [',', ';'];

/// Read the longest decimal number at the start of `text`.
///
/// Trailing characters are ignored, so `"12px"` reads as 12. Leading
/// whitespace is skipped. Infinite results are rejected.
fn parse_number(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let digits_from = |start: usize| {
        bytes[start..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut pos = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_digits = digits_from(pos);
    pos += int_digits;
    let mut end = pos;

    let mut frac_digits = 0;
    if bytes.get(pos) == Some(&b'.') {
        frac_digits = digits_from(pos + 1);
        if frac_digits > 0 {
            pos += 1 + frac_digits;
            end = pos;
        }
    }
    if int_digits + frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let sign = usize::from(matches!(bytes.get(end + 1), Some(b'+' | b'-')));
        let exp_digits = digits_from(end + 1 + sign);
        if exp_digits > 0 {
            end += 1 + sign + exp_digits;
        }
    }

    text[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse `"x1 y1 x2 y2"` with whitespace, commas or semicolons between numbers.
///
/// Each token is read like a leading number (`"12px"` is 12); tokens that
/// do not start with a number are skipped. The first four numbers are used
/// and the rest ignored; fewer than four gives `None`.
pub fn parse_bbox_str(text: &str) -> Option<BoundingBox> {
    let mut numbers = text
        .split(|c: char| c.is_whitespace() || SEPARATORS.contains(&c))
        .filter(|token| !token.is_empty())
        .filter_map(parse_number);

    Some(BoundingBox::new(
        numbers.next()?,
        numbers.next()?,
        numbers.next()?,
        numbers.next()?,
    ))
}

/// Raw text of the coordinate inputs
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CoordinateForm {
    pub x1: String,
    pub y1: String,
    pub x2: String,
    pub y2: String,
    pub bbox_text: String,
}

impl CoordinateForm {
    pub fn field(&self, field: CoordField) -> &str {
        match field {
            CoordField::X1 => &self.x1,
            CoordField::Y1 => &self.y1,
            CoordField::X2 => &self.x2,
            CoordField::Y2 => &self.y2,
        }
    }

    fn field_mut(&mut self, field: CoordField) -> &mut String {
        match field {
            CoordField::X1 => &mut self.x1,
            CoordField::Y1 => &mut self.y1,
            CoordField::X2 => &mut self.x2,
            CoordField::Y2 => &mut self.y2,
        }
    }

    /// Set one field; rewrites the box string once all four are filled in
    pub fn set_field(&mut self, field: CoordField, value: &str) {
        *self.field_mut(field) = value.trim().to_string();

        if CoordField::ALL.iter().all(|&f| !self.field(f).is_empty()) {
            self.bbox_text = format!("{} {} {} {}", self.x1, self.y1, self.x2, self.y2);
        }
    }

    /// Set the box string; fills the four fields when it holds four numbers.
    ///
    /// Returns whether the fields were updated.
    pub fn set_bbox_text(&mut self, text: &str) -> bool {
        self.bbox_text = text.to_string();
        let Some(bbox) = parse_bbox_str(text) else {
            return false;
        };
        self.x1 = bbox.x1.to_string();
        self.y1 = bbox.y1.to_string();
        self.x2 = bbox.x2.to_string();
        self.y2 = bbox.y2.to_string();
        true
    }

    /// Box from the four fields, or `None` if any is empty or not a number
    pub fn raw_box(&self) -> Option<BoundingBox> {
        self.bounding_box().ok()
    }

    /// Box from the four fields, naming the first field that does not parse
    pub fn bounding_box(&self) -> Result<BoundingBox, AnnotatorError> {
        let value = |field: CoordField| {
            let text = self.field(field);
            parse_number(text).ok_or_else(|| AnnotatorError::InvalidCoordinate {
                field,
                value: text.to_string(),
            })
        };
        Ok(BoundingBox::new(
            value(CoordField::X1)?,
            value(CoordField::Y1)?,
            value(CoordField::X2)?,
            value(CoordField::Y2)?,
        ))
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_separators() {
        let expected = Some(BoundingBox::new(100.0, 50.0, 200.0, 150.0));
        assert_eq!(parse_bbox_str("100 50 200 150"), expected);
        assert_eq!(parse_bbox_str("100,50,200,150"), expected);
        assert_eq!(parse_bbox_str("100;50;200;150"), expected);
        assert_eq!(parse_bbox_str("  100, 50;\t200 ,, 150  "), expected);
    }

    #[test]
    fn test_parse_takes_first_four_numbers() {
        assert_eq!(
            parse_bbox_str("1 2 3 4 5 6"),
            Some(BoundingBox::new(1.0, 2.0, 3.0, 4.0))
        );
        assert_eq!(
            parse_bbox_str("box: 1.5 x -2 3e1 4"),
            Some(BoundingBox::new(1.5, -2.0, 30.0, 4.0))
        );
    }

    #[test]
    fn test_number_prefix_is_read() {
        assert_eq!(parse_number("12px"), Some(12.0));
        assert_eq!(parse_number("  -3.5e2rest"), Some(-350.0));
        assert_eq!(parse_number(".5"), Some(0.5));
        assert_eq!(parse_number("7."), Some(7.0));
        assert_eq!(parse_number("4e"), Some(4.0));
        assert_eq!(parse_number("1e+"), Some(1.0));
        assert_eq!(parse_number("0x10"), Some(0.0));
        assert_eq!(parse_number("+8"), Some(8.0));
        assert_eq!(parse_number("px12"), None);
        assert_eq!(parse_number("-"), None);
        assert_eq!(parse_number("."), None);
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("1e999"), None);
    }

    #[test]
    fn test_parse_reads_units_after_numbers() {
        assert_eq!(
            parse_bbox_str("12px 5,7;9em"),
            Some(BoundingBox::new(12.0, 5.0, 7.0, 9.0))
        );
    }

    #[test]
    fn test_parse_needs_four_numbers() {
        assert_eq!(parse_bbox_str(""), None);
        assert_eq!(parse_bbox_str("1 2 3"), None);
        assert_eq!(parse_bbox_str("1 2 three 4"), None);
        assert_eq!(parse_bbox_str("1 2 NaN inf"), None);
    }

    #[test]
    fn test_fields_write_bbox_text_when_complete() {
        let mut form = CoordinateForm::default();
        form.set_field(CoordField::X1, "100");
        form.set_field(CoordField::Y1, "50");
        form.set_field(CoordField::X2, "200");
        assert_eq!(form.bbox_text, "");

        form.set_field(CoordField::Y2, " 150 ");
        assert_eq!(form.bbox_text, "100 50 200 150");
        assert_eq!(form.raw_box(), Some(BoundingBox::new(100.0, 50.0, 200.0, 150.0)));
    }

    #[test]
    fn test_bbox_text_fills_fields() {
        let mut form = CoordinateForm::default();
        assert!(form.set_bbox_text("10;20;30.5;40"));
        assert_eq!(form.x1, "10");
        assert_eq!(form.y1, "20");
        assert_eq!(form.x2, "30.5");
        assert_eq!(form.y2, "40");

        // Too few numbers leaves the fields alone
        assert!(!form.set_bbox_text("1 2"));
        assert_eq!(form.bbox_text, "1 2");
        assert_eq!(form.x1, "10");
    }

    #[test]
    fn test_bounding_box_names_bad_field() {
        let mut form = CoordinateForm::default();
        form.set_field(CoordField::X1, "1");
        form.set_field(CoordField::Y1, "abc");
        form.set_field(CoordField::X2, "3");
        form.set_field(CoordField::Y2, "4");

        match form.bounding_box() {
            Err(AnnotatorError::InvalidCoordinate { field, value }) => {
                assert_eq!(field, CoordField::Y1);
                assert_eq!(value, "abc");
            }
            other => panic!("expected invalid coordinate, got {:?}", other),
        }
        assert_eq!(form.raw_box(), None);
    }

    #[test]
    fn test_empty_field_is_invalid() {
        let form = CoordinateForm::default();
        assert!(matches!(
            form.bounding_box(),
            Err(AnnotatorError::InvalidCoordinate { field: CoordField::X1, .. })
        ));
    }
}
