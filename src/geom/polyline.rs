//! Labelled polylines and the point queries the priority resolver is built on.
//!
//! A [`Polyline3`] is an ordered run of positions with a stable string id. The
//! id is what assignments are keyed by; the label is only used when results
//! are handed back to the host (it defaults to the id).
//!
//! # Example
//!
//! ```ignore
//! use priority_engine::geom::{Point3, Polyline3, find_closest_point};
//!
//! let curve = Polyline3::new("plank-a", vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//! ]);
//! let hit = find_closest_point(Point3::new(0.9, 0.1, 0.0), curve.points()).unwrap();
//! assert_eq!(hit.index, 1);
//! ```

use serde::{Deserialize, Serialize};

use super::core::{Point3, Vec3};

/// Errors raised by operations that need an open, non-empty polyline.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PolylineError {
    /// The polyline loops back onto itself, so start and direction are undefined.
    #[error("polyline `{id}` is closed; start point and direction are undefined on a loop")]
    Closed { id: String },

    /// The polyline has no points to search.
    #[error("polyline `{id}` has no points")]
    Empty { id: String },

    /// The requested start index does not address a point of the polyline.
    #[error("start index {index} is out of bounds for polyline `{id}` with {len} points")]
    StartIndexOutOfBounds { id: String, index: usize, len: usize },
}

/// An ordered, identified sequence of positions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline3 {
    id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    label: Option<String>,
    points: Vec<Point3>,
    #[serde(default)]
    closed: bool,
}

impl Polyline3 {
    /// Create an open polyline whose label is its id.
    #[must_use]
    pub fn new(id: impl Into<String>, points: Vec<Point3>) -> Self {
        Self {
            id: id.into(),
            label: None,
            points,
            closed: false,
        }
    }

    /// Set the label reported in priority output.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Mark the polyline as looped.
    #[must_use]
    pub fn closed(mut self, closed: bool) -> Self {
        self.closed = closed;
        self
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.id)
    }

    #[must_use]
    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    #[must_use]
    pub const fn is_closed(&self) -> bool {
        self.closed
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Fails with [`PolylineError::Closed`] when the polyline is looped.
    pub fn ensure_open(&self) -> Result<(), PolylineError> {
        if self.closed {
            return Err(PolylineError::Closed {
                id: self.id.clone(),
            });
        }
        Ok(())
    }

    /// Closest vertex of this polyline to `point`.
    #[must_use]
    pub fn closest_point(&self, point: Point3) -> Option<ClosestPoint> {
        find_closest_point(point, &self.points)
    }
}

/// Result of a closest-vertex search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClosestPoint {
    /// The polyline vertex nearest to the query.
    pub position: Point3,
    /// Index of that vertex.
    pub index: usize,
    /// Euclidean distance from the query to the vertex.
    pub distance: f64,
}

/// Finds the vertex of `polyline` nearest to `point`.
///
/// Scans every vertex once; on equal distances the lowest index wins.
/// Vertices at a non-finite distance are skipped. Returns `None` when no
/// vertex is left to choose from.
#[must_use]
pub fn find_closest_point(point: Point3, polyline: &[Point3]) -> Option<ClosestPoint> {
    let mut best: Option<ClosestPoint> = None;

    for (index, &candidate) in polyline.iter().enumerate() {
        let distance = point.distance_to(candidate);
        if !distance.is_finite() {
            continue;
        }
        let closer = best.is_none_or(|current| distance < current.distance);
        if closer {
            best = Some(ClosestPoint {
                position: candidate,
                index,
                distance,
            });
        }
    }

    best
}

/// Returns a copy of `polyline` that starts at `new_start` and wraps around.
///
/// Equivalent to rotating the vertices left by `new_start`.
///
/// # Errors
/// Fails if the polyline is closed or `new_start` is not a valid vertex index.
pub fn shift_start_point(polyline: &Polyline3, new_start: usize) -> Result<Polyline3, PolylineError> {
    polyline.ensure_open()?;

    let len = polyline.len();
    if new_start >= len {
        log::warn!(
            "rejecting start index {new_start} for polyline `{}` ({len} points)",
            polyline.id()
        );
        return Err(PolylineError::StartIndexOutOfBounds {
            id: polyline.id.clone(),
            index: new_start,
            len,
        });
    }

    let mut shifted = polyline.clone();
    shifted.points.rotate_left(new_start);
    Ok(shifted)
}

/// Arithmetic mean of `points`, or `None` when there are none.
#[must_use]
pub fn mean_point(points: &[Point3]) -> Option<Point3> {
    if points.is_empty() {
        return None;
    }

    let sum = points
        .iter()
        .fold(Vec3::ZERO, |acc, point| acc + point.to_vec3());
    Some(Point3::from(sum / points.len() as f64))
}
