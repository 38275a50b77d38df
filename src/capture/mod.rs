//! Air-tap driven capture of fingertip joint poses.
//!
//! The host turns its input callbacks into a queue of [`GestureEvent`]s and
//! feeds them to a [`JointRecorder`], which owns the open take, the take
//! counter and the accumulated [`JointPoseLog`].

mod gesture;
mod recorder;

pub use gesture::{AIR_TAP_THRESHOLD, GestureEvent, Hand, JointPose, TrackedJoint};
pub use recorder::{JointPoseLog, JointRecorder, RecorderOptions, RecorderOutcome, RecorderState};
