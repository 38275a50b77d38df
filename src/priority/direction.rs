use serde::{Deserialize, Serialize};

use crate::geom::{Point3, PolylineError, Polyline3};

use super::error::PriorityError;

/// The physical span of a point: where the member starts and ends in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EndpointPair {
    pub start: Point3,
    pub end: Point3,
}

impl EndpointPair {
    #[must_use]
    pub const fn new(start: Point3, end: Point3) -> Self {
        Self { start, end }
    }

    /// The same span traversed the other way.
    #[must_use]
    pub const fn reversed(self) -> Self {
        Self::new(self.end, self.start)
    }
}

/// Infers whether `samples` run along `polyline` in its own direction.
///
/// The first and last sample are snapped to their closest polyline vertices;
/// the result is `true` when the first snaps to an index no greater than the
/// last, `false` when the run is reversed.
///
/// # Errors
/// Fails on a closed or empty polyline, or with fewer than two samples.
pub fn find_direction(samples: &[Point3], polyline: &Polyline3) -> Result<bool, PriorityError> {
    polyline.ensure_open()?;

    let (Some(&first), Some(&last)) = (samples.first(), samples.last()) else {
        return Err(PriorityError::InsufficientSamples { count: 0 });
    };
    if samples.len() < 2 {
        return Err(PriorityError::InsufficientSamples {
            count: samples.len(),
        });
    }

    let empty = || PolylineError::Empty {
        id: polyline.id().to_string(),
    };
    let start = polyline.closest_point(first).ok_or_else(empty)?;
    let end = polyline.closest_point(last).ok_or_else(empty)?;

    Ok(start.index <= end.index)
}

/// [`find_direction`] for a start/end pair.
///
/// # Errors
/// Fails on a closed or empty polyline.
pub fn span_direction(span: EndpointPair, polyline: &Polyline3) -> Result<bool, PriorityError> {
    find_direction(&[span.start, span.end], polyline)
}
