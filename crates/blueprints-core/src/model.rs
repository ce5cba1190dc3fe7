use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::BlueprintError;

/// A 2D coordinate on a blueprint's draw path.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// A named, authored polyline. Point order defines the draw path.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Blueprint {
    pub author: String,
    pub name: String,
    #[serde(default)]
    pub points: Vec<Point>,
}

impl Blueprint {
    pub fn new(author: impl Into<String>, name: impl Into<String>, points: Vec<Point>) -> Self {
        Self {
            author: author.into(),
            name: name.into(),
            points,
        }
    }

    pub fn key(&self) -> BlueprintKey {
        BlueprintKey::new(&self.author, &self.name)
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn has_key(&self, author: &str, name: &str) -> bool {
        self.author == author && self.name == name
    }

    /// Check the record invariants: non-blank author and name, finite coordinates.
    pub fn validate(&self) -> Result<(), BlueprintError> {
        require_non_blank("author", &self.author)?;
        require_non_blank("name", &self.name)?;
        if let Some(idx) = self.points.iter().position(|p| !p.is_finite()) {
            return Err(BlueprintError::Validation(format!(
                "point {idx} of {}/{} has a non-finite coordinate",
                self.author, self.name
            )));
        }
        Ok(())
    }
}

/// Identity of a blueprint within a source.
#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct BlueprintKey {
    pub author: String,
    pub name: String,
}

impl BlueprintKey {
    pub fn new(author: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for BlueprintKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.author, self.name)
    }
}

/// Reject empty or whitespace-only identifiers.
pub fn require_non_blank(field: &str, value: &str) -> Result<(), BlueprintError> {
    if value.trim().is_empty() {
        return Err(BlueprintError::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn house() -> Blueprint {
        Blueprint::new(
            "johnconnor",
            "house",
            vec![
                Point::new(150.0, 120.0),
                Point::new(215.0, 115.0),
                Point::new(340.0, 240.0),
                Point::new(15.0, 215.0),
            ],
        )
    }

    #[test]
    fn wire_shape_matches_contract() {
        let json = serde_json::to_value(house()).unwrap();
        assert_eq!(json["author"], "johnconnor");
        assert_eq!(json["name"], "house");
        assert_eq!(json["points"][0]["x"], 150.0);
        assert_eq!(json["points"][3]["y"], 215.0);
    }

    #[test]
    fn integer_coordinates_deserialize() {
        let bp: Blueprint = serde_json::from_str(
            r#"{"author":"john","name":"line","points":[{"x":10,"y":10},{"x":10,"y":100}]}"#,
        )
        .unwrap();
        assert_eq!(bp.points, vec![Point::new(10.0, 10.0), Point::new(10.0, 100.0)]);
    }

    #[test]
    fn missing_points_defaults_to_empty() {
        let bp: Blueprint = serde_json::from_str(r#"{"author":"a","name":"b"}"#).unwrap();
        assert!(bp.points.is_empty());
    }

    #[test]
    fn validate_accepts_well_formed() {
        assert!(house().validate().is_ok());
        assert!(Blueprint::new("a", "empty", vec![]).validate().is_ok());
    }

    #[test]
    fn validate_rejects_blank_identifiers() {
        let err = Blueprint::new("  ", "house", vec![]).validate().unwrap_err();
        assert!(matches!(err, BlueprintError::Validation(ref m) if m.contains("author")));

        let err = Blueprint::new("a", "", vec![]).validate().unwrap_err();
        assert!(matches!(err, BlueprintError::Validation(ref m) if m.contains("name")));
    }

    #[test]
    fn validate_rejects_non_finite_points() {
        let bp = Blueprint::new("a", "b", vec![Point::new(0.0, 0.0), Point::new(f64::NAN, 1.0)]);
        let err = bp.validate().unwrap_err();
        assert!(matches!(err, BlueprintError::Validation(ref m) if m.contains("point 1")));
    }

    #[test]
    fn key_display() {
        assert_eq!(house().key().to_string(), "johnconnor/house");
        assert!(house().has_key("johnconnor", "house"));
        assert!(!house().has_key("johnconnor", "gear"));
    }
}
