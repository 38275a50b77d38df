//! Curve priority resolution.
//!
//! Named points (plank members, picked positions) are assigned to their nearest
//! labelled polyline, ordered along it, and paired with the direction they run
//! in. All functions are pure over caller-owned snapshots.
//!
//! # Example
//!
//! ```ignore
//! use priority_engine::priority::{SceneSnapshot, ResolveOptions};
//!
//! let scene = SceneSnapshot::from_json(json)?;
//! let (priority, diagnostics) = scene.resolve(ResolveOptions::new(0.02))?;
//! for (label, entries) in &priority {
//!     println!("{label}: {entries:?}");
//! }
//! ```

mod assign;
mod direction;
mod error;
mod merge;
mod snapshot;

pub use assign::{
    Assignment, AssignmentDiagnostics, map_points_to_polylines,
    map_points_to_polylines_with_diagnostics,
};
pub use direction::{EndpointPair, find_direction, span_direction};
pub use error::PriorityError;
pub use merge::{
    MergeDiagnostics, PriorityEntry, PriorityMap, merge_priority_data,
    merge_priority_data_with_diagnostics,
};
pub use snapshot::{ResolveDiagnostics, ResolveOptions, SceneSnapshot};

#[cfg(test)]
mod tests;
