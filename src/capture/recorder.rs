use std::collections::BTreeMap;

use serde::de::{self, Deserializer};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

use crate::geom::Point3;

use super::gesture::{GestureEvent, Hand, TrackedJoint};

/// Recorded takes of joint positions, in the order they were closed.
///
/// Serialises as a JSON object keyed by take number:
/// `{ "0": [[x, y, z], ...], "1": [...] }`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JointPoseLog {
    takes: Vec<Vec<Point3>>,
}

impl JointPoseLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.takes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.takes.is_empty()
    }

    #[must_use]
    pub fn take(&self, index: usize) -> Option<&[Point3]> {
        self.takes.get(index).map(Vec::as_slice)
    }

    pub fn takes(&self) -> impl Iterator<Item = &[Point3]> {
        self.takes.iter().map(Vec::as_slice)
    }

    /// Appends a take and returns its number.
    pub fn push(&mut self, take: Vec<Point3>) -> usize {
        self.takes.push(take);
        self.takes.len() - 1
    }

    /// # Errors
    /// Propagates serialisation failures from `serde_json`.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// # Errors
    /// Fails on malformed JSON or when take keys are not `0..n`.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl Serialize for JointPoseLog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.takes.len()))?;
        for (index, take) in self.takes.iter().enumerate() {
            map.serialize_entry(&index.to_string(), take)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for JointPoseLog {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, Vec<Point3>>::deserialize(deserializer)?;

        let mut numbered = Vec::with_capacity(raw.len());
        for (key, take) in raw {
            let index: usize = key
                .parse()
                .map_err(|_| de::Error::custom(format!("take key `{key}` is not a number")))?;
            numbered.push((index, take));
        }
        numbered.sort_by_key(|(index, _)| *index);

        for (expected, (index, _)) in numbered.iter().enumerate() {
            if *index != expected {
                return Err(de::Error::custom(format!(
                    "take numbers must run from 0 without gaps, missing {expected}"
                )));
            }
        }

        Ok(Self {
            takes: numbered.into_iter().map(|(_, take)| take).collect(),
        })
    }
}

/// Which hand and joint a recorder samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecorderOptions {
    pub hand: Hand,
    pub joint: TrackedJoint,
}

impl RecorderOptions {
    #[must_use]
    pub const fn new(hand: Hand, joint: TrackedJoint) -> Self {
        Self { hand, joint }
    }
}

impl Default for RecorderOptions {
    fn default() -> Self {
        Self::new(Hand::Right, TrackedJoint::IndexTip)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecorderState {
    Idle,
    Recording,
}

/// What a single event did to the recorder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecorderOutcome {
    /// A new take was opened.
    Started { take: usize },
    /// The open take was closed and stored in the log.
    Stopped { take: usize, samples: usize },
    /// A joint sample was appended to the open take.
    Sampled { take: usize, samples: usize },
    /// The event had no effect in the current state.
    Ignored,
}

/// Air-tap driven recorder of joint positions.
///
/// Every air tap toggles between [`RecorderState::Idle`] and
/// [`RecorderState::Recording`]. While recording, joint samples for the
/// configured hand and joint are buffered; closing a take moves the buffer
/// into the [`JointPoseLog`] under the next take number.
#[derive(Debug, Clone, Default)]
pub struct JointRecorder {
    options: RecorderOptions,
    recording: bool,
    buffer: Vec<Point3>,
    log: JointPoseLog,
}

impl JointRecorder {
    #[must_use]
    pub fn new(options: RecorderOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Continue recording on top of an existing log.
    #[must_use]
    pub fn with_log(mut self, log: JointPoseLog) -> Self {
        self.log = log;
        self
    }

    #[must_use]
    pub const fn options(&self) -> RecorderOptions {
        self.options
    }

    #[must_use]
    pub const fn state(&self) -> RecorderState {
        if self.recording {
            RecorderState::Recording
        } else {
            RecorderState::Idle
        }
    }

    /// Number of the take that is open, or that the next tap will open.
    #[must_use]
    pub fn current_take(&self) -> usize {
        self.log.len()
    }

    /// Samples in the open take.
    #[must_use]
    pub fn buffered(&self) -> &[Point3] {
        &self.buffer
    }

    #[must_use]
    pub const fn log(&self) -> &JointPoseLog {
        &self.log
    }

    /// Hands back the log; an open take is discarded.
    #[must_use]
    pub fn into_log(self) -> JointPoseLog {
        self.log
    }

    /// Advances the state machine by one event.
    pub fn handle(&mut self, event: &GestureEvent) -> RecorderOutcome {
        match event {
            GestureEvent::AirTap { hand, .. } => {
                log::debug!(
                    "{hand:?} air tap {}",
                    if event.is_registered_tap() {
                        "registered"
                    } else {
                        "not registered"
                    }
                );
                self.toggle()
            }
            GestureEvent::Joint { hand, joint, pose } => {
                if !self.recording || *hand != self.options.hand || *joint != self.options.joint {
                    return RecorderOutcome::Ignored;
                }
                self.buffer.push(pose.position);
                RecorderOutcome::Sampled {
                    take: self.current_take(),
                    samples: self.buffer.len(),
                }
            }
        }
    }

    /// Feeds a whole event stream and returns the outcome of each event.
    pub fn replay<'a, I>(&mut self, events: I) -> Vec<RecorderOutcome>
    where
        I: IntoIterator<Item = &'a GestureEvent>,
    {
        events.into_iter().map(|event| self.handle(event)).collect()
    }

    fn toggle(&mut self) -> RecorderOutcome {
        if self.recording {
            self.recording = false;
            let samples = self.buffer.len();
            let take = self.log.push(std::mem::take(&mut self.buffer));
            log::debug!("recording stopped, take {take} has {samples} poses");
            RecorderOutcome::Stopped { take, samples }
        } else {
            self.recording = true;
            self.buffer.clear();
            let take = self.current_take();
            log::debug!("recording take {take}");
            RecorderOutcome::Started { take }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{JointPoseLog, JointRecorder, RecorderOptions, RecorderOutcome, RecorderState};
    use crate::capture::{GestureEvent, Hand, JointPose, TrackedJoint};
    use crate::geom::Point3;

    fn tap(hand: Hand) -> GestureEvent {
        GestureEvent::AirTap { hand, value: 1.0 }
    }

    fn tip(hand: Hand, x: f64) -> GestureEvent {
        GestureEvent::Joint {
            hand,
            joint: TrackedJoint::IndexTip,
            pose: JointPose::at(Point3::new(x, 0.0, 0.0)),
        }
    }

    #[test]
    fn taps_toggle_recording() {
        let mut recorder = JointRecorder::default();
        assert_eq!(recorder.state(), RecorderState::Idle);

        assert_eq!(recorder.handle(&tap(Hand::Left)), RecorderOutcome::Started { take: 0 });
        assert_eq!(recorder.state(), RecorderState::Recording);

        assert_eq!(
            recorder.handle(&tap(Hand::Right)),
            RecorderOutcome::Stopped { take: 0, samples: 0 }
        );
        assert_eq!(recorder.state(), RecorderState::Idle);
        assert_eq!(recorder.log().len(), 1);
    }

    #[test]
    fn samples_only_while_recording_and_only_tracked_joint() {
        let mut recorder = JointRecorder::default();
        let outcomes = recorder.replay(&[
            tip(Hand::Right, 9.0),
            tap(Hand::Right),
            tip(Hand::Right, 1.0),
            tip(Hand::Left, 5.0),
            GestureEvent::Joint {
                hand: Hand::Right,
                joint: TrackedJoint::Palm,
                pose: JointPose::at(Point3::ORIGIN),
            },
            tip(Hand::Right, 2.0),
            tap(Hand::Right),
        ]);

        assert_eq!(outcomes[0], RecorderOutcome::Ignored);
        assert_eq!(outcomes[2], RecorderOutcome::Sampled { take: 0, samples: 1 });
        assert_eq!(outcomes[3], RecorderOutcome::Ignored);
        assert_eq!(outcomes[4], RecorderOutcome::Ignored);
        assert_eq!(outcomes[6], RecorderOutcome::Stopped { take: 0, samples: 2 });

        let xs: Vec<f64> = recorder.log().take(0).unwrap().iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![1.0, 2.0]);
    }

    #[test]
    fn each_take_gets_the_next_number() {
        let mut recorder = JointRecorder::new(RecorderOptions::new(Hand::Left, TrackedJoint::IndexTip));
        recorder.replay(&[
            tap(Hand::Left),
            tip(Hand::Left, 1.0),
            tap(Hand::Left),
            tap(Hand::Left),
            tip(Hand::Left, 2.0),
            tip(Hand::Left, 3.0),
            tap(Hand::Left),
        ]);

        assert_eq!(recorder.current_take(), 2);
        assert_eq!(recorder.log().take(0).map(<[Point3]>::len), Some(1));
        assert_eq!(recorder.log().take(1).map(<[Point3]>::len), Some(2));
    }

    #[test]
    fn resumed_recorder_continues_take_numbering() {
        let mut saved = JointPoseLog::new();
        saved.push(vec![Point3::new(7.0, 0.0, 0.0)]);

        let mut recorder = JointRecorder::default().with_log(saved);
        assert_eq!(recorder.current_take(), 1);

        recorder.replay(&[tap(Hand::Right), tip(Hand::Right, 8.0), tap(Hand::Right)]);
        let log = recorder.into_log();
        assert_eq!(log.len(), 2);
        assert_eq!(log.take(0).unwrap()[0].x, 7.0);
        assert_eq!(log.take(1).unwrap()[0].x, 8.0);
    }

    #[test]
    fn weak_tap_still_toggles() {
        let mut recorder = JointRecorder::default();
        let weak = GestureEvent::AirTap {
            hand: Hand::Right,
            value: 0.2,
        };
        assert!(!weak.is_registered_tap());
        assert_eq!(recorder.handle(&weak), RecorderOutcome::Started { take: 0 });
    }

    #[test]
    fn log_serialises_keyed_by_take() {
        let mut log = JointPoseLog::new();
        log.push(vec![Point3::new(1.0, 2.0, 3.0)]);
        log.push(Vec::new());

        let json = log.to_json().unwrap();
        assert_eq!(json, r#"{"0":[[1.0,2.0,3.0]],"1":[]}"#);
        assert_eq!(JointPoseLog::from_json(&json).unwrap(), log);
    }

    #[test]
    fn log_orders_takes_numerically() {
        let json = format!(
            "{{{}}}",
            (0..11)
                .map(|i| format!("\"{i}\": [[{i}, 0, 0]]"))
                .collect::<Vec<_>>()
                .join(",")
        );
        let log = JointPoseLog::from_json(&json).unwrap();
        assert_eq!(log.len(), 11);
        assert_eq!(log.take(10).unwrap()[0].x, 10.0);
        assert_eq!(log.take(2).unwrap()[0].x, 2.0);
    }

    #[test]
    fn log_rejects_gaps_and_non_numeric_keys() {
        assert!(JointPoseLog::from_json(r#"{"0": [], "2": []}"#).is_err());
        assert!(JointPoseLog::from_json(r#"{"first": []}"#).is_err());
    }
}
