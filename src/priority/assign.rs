use std::collections::{BTreeMap, HashMap, HashSet};

use crate::geom::{ClosestPoint, Point3, Polyline3};

use super::error::PriorityError;

/// Polyline id → names of the points assigned to it, ordered along the polyline.
///
/// Every input polyline has an entry, even when nothing was assigned to it.
pub type Assignment = BTreeMap<String, Vec<String>>;

/// Diagnostics for a point-to-polyline assignment pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssignmentDiagnostics {
    /// Number of input points.
    pub input_point_count: usize,
    /// Number of input polylines.
    pub polyline_count: usize,
    /// Number of points that ended up in some polyline's list.
    pub assigned_count: usize,
    /// Names of points with no polyline within the threshold, in input order.
    pub dropped_points: Vec<String>,
    /// Warnings generated during the operation.
    pub warnings: Vec<String>,
}

/// Assigns each named point to its nearest polyline within `threshold`.
///
/// See [`map_points_to_polylines_with_diagnostics`].
///
/// # Errors
/// Fails when `points` and `names` differ in length, or when names or
/// polyline ids are not unique.
pub fn map_points_to_polylines(
    polylines: &[Polyline3],
    points: &[Point3],
    names: &[String],
    threshold: f64,
) -> Result<Assignment, PriorityError> {
    map_points_to_polylines_with_diagnostics(polylines, points, names, threshold)
        .map(|(assignment, _)| assignment)
}

/// Assigns each named point to its nearest polyline within `threshold`.
///
/// Points are visited in input order. For each one the closest vertex of every
/// polyline is found and the polyline with the smallest distance wins; on equal
/// distances the earlier polyline wins. The point is assigned only if that
/// distance is `<= threshold`, so a threshold of zero needs an exact vertex hit
/// and a negative threshold assigns nothing.
///
/// Each list is then sorted by the index of the point's closest vertex along
/// its polyline. The sort is stable, so points sharing a vertex keep their
/// input order.
///
/// # Errors
/// Fails when `points` and `names` differ in length, or when names or
/// polyline ids are not unique. Nothing is computed in that case.
pub fn map_points_to_polylines_with_diagnostics(
    polylines: &[Polyline3],
    points: &[Point3],
    names: &[String],
    threshold: f64,
) -> Result<(Assignment, AssignmentDiagnostics), PriorityError> {
    let name_index = index_point_names(points, names)?;
    ensure_unique_polyline_ids(polylines)?;

    let mut diagnostics = AssignmentDiagnostics {
        input_point_count: points.len(),
        polyline_count: polylines.len(),
        ..Default::default()
    };

    if polylines.is_empty() {
        return Ok((Assignment::new(), diagnostics));
    }

    if threshold.is_nan() || threshold < 0.0 {
        diagnostics
            .warnings
            .push(format!("threshold {threshold} never assigns a point"));
    }

    let mut assignment: Assignment = polylines
        .iter()
        .map(|polyline| (polyline.id().to_string(), Vec::new()))
        .collect();

    for (&point, name) in points.iter().zip(names) {
        match nearest_polyline(point, polylines) {
            Some((polyline, hit)) if hit.distance <= threshold => {
                if let Some(list) = assignment.get_mut(polyline.id()) {
                    list.push(name.clone());
                    diagnostics.assigned_count += 1;
                }
            }
            nearest => {
                log::debug!(
                    "point `{name}` not assigned (nearest distance {:?}, threshold {threshold})",
                    nearest.map(|(_, hit)| hit.distance)
                );
                diagnostics.dropped_points.push(name.clone());
            }
        }
    }

    for polyline in polylines {
        if let Some(list) = assignment.get_mut(polyline.id()) {
            sort_along_polyline(list, polyline, points, &name_index);
        }
    }

    Ok((assignment, diagnostics))
}

/// Polyline with the globally nearest vertex; the first one wins ties.
fn nearest_polyline(point: Point3, polylines: &[Polyline3]) -> Option<(&Polyline3, ClosestPoint)> {
    let mut best: Option<(&Polyline3, ClosestPoint)> = None;

    for polyline in polylines {
        let Some(hit) = polyline.closest_point(point) else {
            continue;
        };
        if best.is_none_or(|(_, current)| hit.distance < current.distance) {
            best = Some((polyline, hit));
        }
    }

    best
}

fn sort_along_polyline(
    names: &mut Vec<String>,
    polyline: &Polyline3,
    points: &[Point3],
    name_index: &HashMap<&str, usize>,
) {
    let mut keyed: Vec<(usize, String)> = names
        .drain(..)
        .map(|name| {
            let along = name_index
                .get(name.as_str())
                .and_then(|&index| polyline.closest_point(points[index]))
                .map_or(usize::MAX, |hit| hit.index);
            (along, name)
        })
        .collect();

    keyed.sort_by_key(|(along, _)| *along);
    names.extend(keyed.into_iter().map(|(_, name)| name));
}

/// Maps each point name to its index, checking the parallel lists line up.
pub(crate) fn index_point_names<'a>(
    points: &[Point3],
    names: &'a [String],
) -> Result<HashMap<&'a str, usize>, PriorityError> {
    if points.len() != names.len() {
        return Err(PriorityError::LengthMismatch {
            what: "point names",
            expected: points.len(),
            actual: names.len(),
        });
    }

    let mut index = HashMap::with_capacity(names.len());
    for (i, name) in names.iter().enumerate() {
        if index.insert(name.as_str(), i).is_some() {
            return Err(PriorityError::DuplicatePointName { name: name.clone() });
        }
    }
    Ok(index)
}

pub(crate) fn ensure_unique_polyline_ids(polylines: &[Polyline3]) -> Result<(), PriorityError> {
    let mut seen = HashSet::with_capacity(polylines.len());
    for polyline in polylines {
        if !seen.insert(polyline.id()) {
            return Err(PriorityError::DuplicatePolylineId {
                id: polyline.id().to_string(),
            });
        }
    }
    Ok(())
}
