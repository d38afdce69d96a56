//! Planar geometry for polygon search
//!
//! Points are evaluated as `(x = longitude, y = latitude)` on a flat plane.
//! Containment is strict: a point lying on an edge or vertex is outside.

use crate::WellRecord;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tolerance for the on-edge test
const EDGE_EPSILON: f64 = 1e-12;

/// Errors raised while building a polygon
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeoError {
    /// Fewer than three distinct vertices
    #[error("A valid polygon with at least 3 coordinates is required (got {0})")]
    TooFewVertices(usize),

    /// A vertex had a NaN or infinite component
    #[error("Coordinate {0} is not a finite number")]
    NonFinite(usize),
}

/// A latitude/longitude pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude (y)
    pub latitude: f64,
    /// Longitude (x)
    pub longitude: f64,
}

impl Coordinate {
    /// Create a coordinate
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }
}

/// A simple polygon given as an implicitly closed ring of vertices
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<Coordinate>,
}

impl Polygon {
    /// Build a polygon from an ordered ring
    ///
    /// A final vertex equal to the first (explicit closure) is dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use wells_domain::{Coordinate, Polygon};
    ///
    /// let square = Polygon::new(vec![
    ///     Coordinate::new(0.0, 0.0),
    ///     Coordinate::new(0.0, 1.0),
    ///     Coordinate::new(1.0, 1.0),
    ///     Coordinate::new(1.0, 0.0),
    /// ]).unwrap();
    ///
    /// assert!(square.contains(Coordinate::new(0.5, 0.5)));
    /// assert!(!square.contains(Coordinate::new(0.0, 0.5))); // on an edge
    /// ```
    pub fn new(mut vertices: Vec<Coordinate>) -> Result<Self, GeoError> {
        if let Some(idx) = vertices.iter().position(|c| !c.is_finite()) {
            return Err(GeoError::NonFinite(idx));
        }

        if vertices.len() > 1 && vertices.first() == vertices.last() {
            vertices.pop();
        }

        let mut distinct: Vec<Coordinate> = Vec::with_capacity(vertices.len());
        for v in &vertices {
            if !distinct.contains(v) {
                distinct.push(*v);
            }
        }
        if distinct.len() < 3 {
            return Err(GeoError::TooFewVertices(distinct.len()));
        }

        Ok(Self { vertices })
    }

    /// The ring's vertices (without a closing duplicate)
    pub fn vertices(&self) -> &[Coordinate] {
        &self.vertices
    }

    /// Strict point-in-polygon test (even-odd ray casting)
    pub fn contains(&self, point: Coordinate) -> bool {
        if !point.is_finite() {
            return false;
        }

        let (px, py) = (point.longitude, point.latitude);
        let n = self.vertices.len();
        let mut inside = false;

        for i in 0..n {
            let a = self.vertices[i];
            let b = self.vertices[(i + 1) % n];
            let (ax, ay) = (a.longitude, a.latitude);
            let (bx, by) = (b.longitude, b.latitude);

            if on_segment((ax, ay), (bx, by), (px, py)) {
                return false;
            }

            if (ay > py) != (by > py) {
                let x_cross = ax + (py - ay) * (bx - ax) / (by - ay);
                if px < x_cross {
                    inside = !inside;
                }
            }
        }

        inside
    }

    /// Records strictly inside the polygon, in input order
    pub fn filter<'a, I>(&self, records: I) -> Vec<&'a WellRecord>
    where
        I: IntoIterator<Item = &'a WellRecord>,
    {
        records
            .into_iter()
            .filter(|r| self.contains(r.coordinate()))
            .collect()
    }
}

fn on_segment(a: (f64, f64), b: (f64, f64), p: (f64, f64)) -> bool {
    let cross = (b.0 - a.0) * (p.1 - a.1) - (b.1 - a.1) * (p.0 - a.0);
    if cross.abs() > EDGE_EPSILON {
        return false;
    }
    p.0 >= a.0.min(b.0) - EDGE_EPSILON
        && p.0 <= a.0.max(b.0) + EDGE_EPSILON
        && p.1 >= a.1.min(b.1) - EDGE_EPSILON
        && p.1 <= a.1.max(b.1) + EDGE_EPSILON
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ApiNumber;

    fn unit_square() -> Polygon {
        Polygon::new(vec![
            Coordinate::new(0.0, 0.0),
            Coordinate::new(0.0, 1.0),
            Coordinate::new(1.0, 1.0),
            Coordinate::new(1.0, 0.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_rejects_too_few_vertices() {
        let result = Polygon::new(vec![Coordinate::new(0.0, 0.0), Coordinate::new(1.0, 1.0)]);
        assert_eq!(result, Err(GeoError::TooFewVertices(2)));
    }

    #[test]
    fn test_rejects_degenerate_closed_ring() {
        // Three points, but the closing one repeats the first
        let result = Polygon::new(vec![
            Coordinate::new(0.0, 0.0),
            Coordinate::new(1.0, 1.0),
            Coordinate::new(0.0, 0.0),
        ]);
        assert!(matches!(result, Err(GeoError::TooFewVertices(2))));
    }

    #[test]
    fn test_rejects_non_finite() {
        let result = Polygon::new(vec![
            Coordinate::new(0.0, 0.0),
            Coordinate::new(f64::NAN, 1.0),
            Coordinate::new(1.0, 0.0),
        ]);
        assert_eq!(result, Err(GeoError::NonFinite(1)));
    }

    #[test]
    fn test_explicit_closure_is_dropped() {
        let polygon = Polygon::new(vec![
            Coordinate::new(0.0, 0.0),
            Coordinate::new(0.0, 1.0),
            Coordinate::new(1.0, 1.0),
            Coordinate::new(0.0, 0.0),
        ])
        .unwrap();
        assert_eq!(polygon.vertices().len(), 3);
    }

    #[test]
    fn test_interior_and_exterior() {
        let square = unit_square();
        assert!(square.contains(Coordinate::new(0.25, 0.75)));
        assert!(!square.contains(Coordinate::new(1.5, 0.5)));
        assert!(!square.contains(Coordinate::new(-0.1, 0.5)));
    }

    #[test]
    fn test_boundary_is_excluded() {
        let square = unit_square();
        assert!(!square.contains(Coordinate::new(0.0, 0.0)), "vertex");
        assert!(!square.contains(Coordinate::new(1.0, 0.5)), "north edge (latitude 1)");
        assert!(!square.contains(Coordinate::new(0.5, 1.0)), "east edge (longitude 1)");
    }

    #[test]
    fn test_concave_polygon() {
        // A "U" shape opening to the north
        let u = Polygon::new(vec![
            Coordinate::new(0.0, 0.0),
            Coordinate::new(0.0, 3.0),
            Coordinate::new(3.0, 3.0),
            Coordinate::new(3.0, 2.0),
            Coordinate::new(1.0, 2.0),
            Coordinate::new(1.0, 1.0),
            Coordinate::new(3.0, 1.0),
            Coordinate::new(3.0, 0.0),
        ])
        .unwrap();

        assert!(u.contains(Coordinate::new(0.5, 1.5)));
        assert!(!u.contains(Coordinate::new(2.0, 1.5)), "inside the notch");
        assert!(u.contains(Coordinate::new(2.0, 2.5)));
    }

    #[test]
    fn test_filter_keeps_order() {
        let square = unit_square();
        let mut a = WellRecord::new(ApiNumber::parse("a").unwrap());
        a.latitude = 0.5;
        a.longitude = 0.5;
        let b = WellRecord::new(ApiNumber::parse("b").unwrap()); // (0, 0) vertex
        let mut c = WellRecord::new(ApiNumber::parse("c").unwrap());
        c.latitude = 0.1;
        c.longitude = 0.9;

        let records = vec![a, b, c];
        let inside: Vec<&str> = square
            .filter(&records)
            .iter()
            .map(|r| r.api_number.as_str())
            .collect();
        assert_eq!(inside, vec!["a", "c"]);
    }
}
