use super::{as_number, as_object, field};
use crate::errors::ValidationError;
use crate::model::{RawValue, ValidatedViewport};

/// Validate the raw `viewport` field.
///
/// Fields are checked in the order x, y, zoom. Values are returned as-is;
/// zoom is not clamped.
pub fn validate_viewport(raw_viewport: &RawValue) -> Result<ValidatedViewport, ValidationError> {
    let obj = as_object(raw_viewport, "viewport")?;

    Ok(ValidatedViewport {
        x: as_number(field(obj, "x"), "viewport.x")?,
        y: as_number(field(obj, "y"), "viewport.y")?,
        zoom: as_number(field(obj, "zoom"), "viewport.zoom")?,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::errors::Expected;

    #[test]
    fn accepts_numbers_verbatim() {
        let vp = validate_viewport(&json!({ "x": 54.3, "y": -60, "zoom": 0.0001 })).unwrap();
        assert_eq!(vp, ValidatedViewport { x: 54.3, y: -60.0, zoom: 0.0001 });

        let vp = validate_viewport(&json!({ "x": 0, "y": 0, "zoom": 400 })).unwrap();
        assert_eq!(vp.zoom, 400.0);
    }

    #[test]
    fn must_be_object() {
        let e = validate_viewport(&json!([0, 0, 1])).unwrap_err();
        assert_eq!(e.to_string(), "viewport must be an object");
    }

    #[test]
    fn fields_checked_in_order() {
        let e = validate_viewport(&json!({})).unwrap_err();
        assert_eq!(e, ValidationError::shape("viewport.x", Expected::Number));

        let e = validate_viewport(&json!({ "x": 1, "zoom": "big" })).unwrap_err();
        assert_eq!(e.to_string(), "viewport.y must be a number");

        let e = validate_viewport(&json!({ "x": 1, "y": 2, "zoom": "1" })).unwrap_err();
        assert_eq!(e.to_string(), "viewport.zoom must be a number");
    }
}
