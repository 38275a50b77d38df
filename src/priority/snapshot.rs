use serde::{Deserialize, Serialize};

use crate::geom::{Point3, Polyline3};

use super::assign::{Assignment, AssignmentDiagnostics, map_points_to_polylines_with_diagnostics};
use super::direction::EndpointPair;
use super::error::PriorityError;
use super::merge::{MergeDiagnostics, PriorityMap, merge_priority_data_with_diagnostics};

/// Options for a resolution pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolveOptions {
    /// Maximum distance (inclusive) between a point and a polyline vertex.
    pub threshold: f64,
}

impl ResolveOptions {
    /// Threshold used when neither the caller nor the snapshot sets one.
    pub const DEFAULT_THRESHOLD: f64 = 0.05;

    #[must_use]
    pub const fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// Set the assignment threshold.
    #[must_use]
    pub const fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self::new(Self::DEFAULT_THRESHOLD)
    }
}

/// Diagnostics for a full resolution pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolveDiagnostics {
    pub assignment: AssignmentDiagnostics,
    pub merge: MergeDiagnostics,
}

impl ResolveDiagnostics {
    /// All warnings of both stages.
    pub fn warnings(&self) -> impl Iterator<Item = &str> {
        self.assignment
            .warnings
            .iter()
            .chain(&self.merge.warnings)
            .map(String::as_str)
    }
}

/// The host's one-shot view of a scene: curves and the points to place on them.
///
/// `names`, `points` and `endpoints` are parallel lists. `endpoints` may be
/// shorter than the others; points past its end resolve as reversed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneSnapshot {
    pub polylines: Vec<Polyline3>,
    #[serde(default)]
    pub names: Vec<String>,
    #[serde(default)]
    pub points: Vec<Point3>,
    #[serde(default)]
    pub endpoints: Vec<EndpointPair>,
    /// Threshold stored with the scene; [`ResolveOptions`] wins when given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,
}

impl SceneSnapshot {
    /// Parse a snapshot from its JSON description.
    ///
    /// # Errors
    /// Returns the JSON error when the document does not match the schema.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Options taken from the snapshot, falling back to the defaults.
    #[must_use]
    pub fn options(&self) -> ResolveOptions {
        self.threshold
            .map_or_else(ResolveOptions::default, ResolveOptions::new)
    }

    /// Looks a polyline up by id.
    #[must_use]
    pub fn polyline(&self, id: &str) -> Option<&Polyline3> {
        self.polylines.iter().find(|polyline| polyline.id() == id)
    }

    /// Assigns the snapshot's points to its polylines.
    ///
    /// # Errors
    /// See [`map_points_to_polylines_with_diagnostics`].
    pub fn assign(
        &self,
        options: ResolveOptions,
    ) -> Result<(Assignment, AssignmentDiagnostics), PriorityError> {
        map_points_to_polylines_with_diagnostics(
            &self.polylines,
            &self.points,
            &self.names,
            options.threshold,
        )
    }

    /// Runs assignment and merge and returns the per-label priority lists.
    ///
    /// # Errors
    /// Any configuration error from either stage.
    pub fn resolve(
        &self,
        options: ResolveOptions,
    ) -> Result<(PriorityMap, ResolveDiagnostics), PriorityError> {
        let (assignment, assignment_diagnostics) = self.assign(options)?;
        let (priority, merge_diagnostics) = merge_priority_data_with_diagnostics(
            &assignment,
            &self.points,
            &self.endpoints,
            &self.names,
            &self.polylines,
        )?;

        log::debug!(
            "resolved {} of {} points onto {} polylines",
            assignment_diagnostics.assigned_count,
            assignment_diagnostics.input_point_count,
            assignment_diagnostics.polyline_count
        );

        Ok((
            priority,
            ResolveDiagnostics {
                assignment: assignment_diagnostics,
                merge: merge_diagnostics,
            },
        ))
    }
}
