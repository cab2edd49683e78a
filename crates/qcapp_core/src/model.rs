//! Click marker data model.
//!
//! Points live in canvas pixel space, i.e. the native resolution of the
//! image drawn on the canvas, never in CSS pixels.

use serde::{Deserialize, Serialize};

/// A 2D point in canvas pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Calculate distance to another point.
    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Result of toggling a marker at a position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Toggle {
    /// A new marker was appended at this position
    Added(Point),
    /// The marker at this index was removed
    Removed { index: usize, point: Point },
}

/// Ordered collection of click markers.
///
/// Uniqueness is not enforced: overlapping markers are all kept and all
/// drawn. Only the first marker under a click is removed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClickPoints {
    points: Vec<Point>,
}

impl ClickPoints {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Point> {
        self.points.iter()
    }

    pub fn as_slice(&self) -> &[Point] {
        &self.points
    }

    /// Index of the first marker (in insertion order) within `radius` of
    /// `at`. A closer marker at a higher index does not win.
    pub fn hit_test(&self, at: Point, radius: f64) -> Option<usize> {
        self.points.iter().position(|p| p.distance_to(&at) <= radius)
    }

    /// Remove the first marker under `at`, or append a new one there.
    pub fn toggle(&mut self, at: Point, radius: f64) -> Toggle {
        match self.hit_test(at, radius) {
            Some(index) => {
                let point = self.points.remove(index);
                Toggle::Removed { index, point }
            }
            None => {
                self.points.push(at);
                Toggle::Added(at)
            }
        }
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Serialize as a JSON array of `{x, y}` objects.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.points)
    }

    /// Parse a JSON array of `{x, y}` objects.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl From<Vec<Point>> for ClickPoints {
    fn from(points: Vec<Point>) -> Self {
        Self { points }
    }
}
