//! Gesture events as delivered by the host's hand-tracking layer.
//!
//! The host polls its input system and pushes [`GestureEvent`]s into the
//! recorder; nothing in this crate subscribes to engine callbacks.

use serde::{Deserialize, Serialize};

use crate::geom::Point3;

/// Pinch strength above which an air tap counts as registered.
pub const AIR_TAP_THRESHOLD: f64 = 0.95;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Hand {
    Left,
    Right,
}

/// Hand joints the recorder can follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackedJoint {
    IndexTip,
    ThumbTip,
    Palm,
    Wrist,
}

/// A tracked joint's pose at one sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JointPose {
    pub position: Point3,
    /// Orientation quaternion `[x, y, z, w]`.
    #[serde(default = "identity_rotation")]
    pub rotation: [f64; 4],
}

impl JointPose {
    #[must_use]
    pub const fn at(position: Point3) -> Self {
        Self {
            position,
            rotation: identity_rotation(),
        }
    }
}

const fn identity_rotation() -> [f64; 4] {
    [0.0, 0.0, 0.0, 1.0]
}

/// One entry of the host's gesture stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GestureEvent {
    /// An air-tap action started; `value` is the pinch strength in `[0, 1]`.
    AirTap { hand: Hand, value: f64 },
    /// A joint pose sampled while the hand is tracked.
    Joint {
        hand: Hand,
        joint: TrackedJoint,
        pose: JointPose,
    },
}

impl GestureEvent {
    /// Whether this is an air tap strong enough to count as registered.
    #[must_use]
    pub fn is_registered_tap(&self) -> bool {
        matches!(self, Self::AirTap { value, .. } if *value > AIR_TAP_THRESHOLD)
    }
}
