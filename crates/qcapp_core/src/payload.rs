//! Out-of-band values attached to the next form submission.
//!
//! htmx merges the JSON object in a form's `hx-vals` attribute into the
//! request parameters, so the payload is one flat object whose `points`
//! value is itself a JSON string. The server reads it back as the single
//! form field `points`.

use serde::{Deserialize, Serialize};

use crate::model::ClickPoints;

/// Values written to `hx-vals` right before the form is submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionPayload {
    /// JSON array of `{x, y}` objects
    pub points: String,
}

impl SubmissionPayload {
    pub fn from_points(points: &ClickPoints) -> Result<Self, serde_json::Error> {
        Ok(Self {
            points: points.to_json()?,
        })
    }

    /// Serialize for the `hx-vals` attribute.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Decode the markers carried by this payload.
    pub fn click_points(&self) -> Result<ClickPoints, serde_json::Error> {
        ClickPoints::from_json(&self.points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Point;

    #[test]
    fn test_empty_payload() {
        let payload = SubmissionPayload::from_points(&ClickPoints::new()).unwrap();
        assert_eq!(payload.to_json().unwrap(), r#"{"points":"[]"}"#);
    }

    #[test]
    fn test_points_are_a_nested_string() {
        let points = ClickPoints::from(vec![Point::new(200.0, 150.0)]);
        let json = SubmissionPayload::from_points(&points)
            .unwrap()
            .to_json()
            .unwrap();

        assert_eq!(json, r#"{"points":"[{\"x\":200.0,\"y\":150.0}]"}"#);

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value["points"].is_string());
    }

    #[test]
    fn test_payload_decodes_back_to_points() {
        let points = ClickPoints::from(vec![Point::new(3.5, 4.0), Point::new(10.0, 0.25)]);
        let json = SubmissionPayload::from_points(&points)
            .unwrap()
            .to_json()
            .unwrap();

        let payload: SubmissionPayload = serde_json::from_str(&json).unwrap();
        assert_eq!(payload.click_points().unwrap(), points);
    }
}
