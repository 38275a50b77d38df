use crate::geom::PolylineError;

/// Configuration errors reported by the priority resolver.
///
/// Empty point or polyline lists are not errors; they resolve to empty maps.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PriorityError {
    #[error(transparent)]
    Polyline(#[from] PolylineError),

    /// An assignment refers to a polyline id that is not in the snapshot.
    #[error("polyline `{id}` is not present in the snapshot")]
    MissingPolyline { id: String },

    /// Direction inference was given fewer than two samples.
    #[error("direction inference needs at least 2 samples, got {count}")]
    InsufficientSamples { count: usize },

    /// Two parallel input lists disagree in length.
    #[error("{what}: expected {expected} entries, got {actual}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// An assignment lists a point name that is not among the input names.
    #[error("point `{name}` is assigned but not among the input names")]
    UnknownPointName { name: String },

    #[error("point name `{name}` is used more than once")]
    DuplicatePointName { name: String },

    #[error("polyline id `{id}` is used more than once")]
    DuplicatePolylineId { id: String },

    #[error("polyline label `{label}` is used more than once")]
    DuplicatePolylineLabel { label: String },
}
