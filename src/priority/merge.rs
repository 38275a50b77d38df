use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::geom::{Point3, Polyline3};

use super::assign::{Assignment, ensure_unique_polyline_ids, index_point_names};
use super::direction::{EndpointPair, span_direction};
use super::error::PriorityError;

/// One point in a polyline's priority list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityEntry {
    pub name: String,
    /// `true` when the point runs in the polyline's own direction.
    pub direction: bool,
}

impl PriorityEntry {
    #[must_use]
    pub fn new(name: impl Into<String>, direction: bool) -> Self {
        Self {
            name: name.into(),
            direction,
        }
    }
}

/// Polyline label → ordered (name, direction) entries.
pub type PriorityMap = BTreeMap<String, Vec<PriorityEntry>>;

/// Diagnostics for a merge pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergeDiagnostics {
    /// Number of entries written across all polylines.
    pub entry_count: usize,
    /// Entries that had no endpoint pair and were given `direction = false`.
    pub defaulted_directions: Vec<String>,
    /// Warnings generated during the operation.
    pub warnings: Vec<String>,
}

/// Pairs every assigned point with its direction along its polyline.
///
/// See [`merge_priority_data_with_diagnostics`].
///
/// # Errors
/// Fails when an assignment names a polyline or point that is not in the
/// inputs, when a direction cannot be inferred, or when the inputs are
/// inconsistent.
pub fn merge_priority_data(
    assignment: &Assignment,
    points: &[Point3],
    endpoints: &[EndpointPair],
    names: &[String],
    polylines: &[Polyline3],
) -> Result<PriorityMap, PriorityError> {
    merge_priority_data_with_diagnostics(assignment, points, endpoints, names, polylines)
        .map(|(priority, _)| priority)
}

/// Pairs every assigned point with its direction along its polyline.
///
/// The order of each list in `assignment` is kept. For every name the endpoint
/// pair at the same index as the name is looked up and run through
/// [`span_direction`]. A name without an endpoint pair gets `false`.
///
/// The output is keyed by polyline label rather than id. The whole result is
/// built before it is returned; on error nothing is produced.
///
/// # Errors
/// Fails when an assignment names a polyline that is not in `polylines` or a
/// point that is not in `names`, when a polyline with assigned points is closed
/// or empty, or when the inputs are inconsistent (length mismatch, duplicate
/// names, ids or labels).
pub fn merge_priority_data_with_diagnostics(
    assignment: &Assignment,
    points: &[Point3],
    endpoints: &[EndpointPair],
    names: &[String],
    polylines: &[Polyline3],
) -> Result<(PriorityMap, MergeDiagnostics), PriorityError> {
    let mut diagnostics = MergeDiagnostics::default();
    if assignment.is_empty() {
        return Ok((PriorityMap::new(), diagnostics));
    }

    let name_index = index_point_names(points, names)?;
    ensure_unique_polyline_ids(polylines)?;
    let by_id: HashMap<&str, &Polyline3> = polylines
        .iter()
        .map(|polyline| (polyline.id(), polyline))
        .collect();

    let mut priority = PriorityMap::new();
    for (id, assigned) in assignment {
        let polyline = by_id
            .get(id.as_str())
            .copied()
            .ok_or_else(|| PriorityError::MissingPolyline { id: id.clone() })?;

        let mut entries = Vec::with_capacity(assigned.len());
        for name in assigned {
            let index = name_index
                .get(name.as_str())
                .copied()
                .ok_or_else(|| PriorityError::UnknownPointName { name: name.clone() })?;

            let direction = match endpoints.get(index) {
                Some(&span) => span_direction(span, polyline)?,
                None => {
                    log::warn!("no endpoints for `{name}` on `{id}`, assuming reversed");
                    diagnostics.defaulted_directions.push(name.clone());
                    false
                }
            };
            entries.push(PriorityEntry::new(name.clone(), direction));
        }

        diagnostics.entry_count += entries.len();
        let label = polyline.label().to_string();
        if priority.insert(label.clone(), entries).is_some() {
            return Err(PriorityError::DuplicatePolylineLabel { label });
        }
    }

    if !diagnostics.defaulted_directions.is_empty() {
        diagnostics.warnings.push(format!(
            "{} point(s) had no endpoint pair",
            diagnostics.defaulted_directions.len()
        ));
    }

    Ok((priority, diagnostics))
}
