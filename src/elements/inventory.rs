use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::geom::Point3;
use crate::priority::{EndpointPair, PriorityMap};

use super::Dimensions;
use super::mesh::MeshData;

/// Members to be placed, plus the priority order they were resolved into.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Inventory {
    pub priority: Vec<String>,
    /// Parallel to `priority`; `true` keeps the member's original direction.
    pub direction: Vec<bool>,
    pub priority_lengths: Vec<f64>,
    pub members: BTreeMap<String, MemberData>,
}

impl Inventory {
    /// Replaces `priority`, `direction` and `priority_lengths` with the
    /// resolved order.
    ///
    /// Curves are visited in `curve_order` first (labels missing from the map
    /// are skipped), then any remaining labels in map order. Lengths come from
    /// the member dimensions and are `0.0` for unknown members.
    pub fn apply_priority<S: AsRef<str>>(&mut self, priority: &PriorityMap, curve_order: &[S]) {
        let ordered = curve_order
            .iter()
            .map(|label| label.as_ref())
            .filter(|label| priority.contains_key(*label))
            .chain(
                priority
                    .keys()
                    .map(String::as_str)
                    .filter(|label| !curve_order.iter().any(|l| l.as_ref() == *label)),
            );

        self.priority.clear();
        self.direction.clear();
        self.priority_lengths.clear();

        for label in ordered {
            for entry in priority.get(label).into_iter().flatten() {
                let length = match self.members.get(&entry.name) {
                    Some(member) => member.dimensions.length,
                    None => {
                        log::warn!("priority names unknown member `{}`", entry.name);
                        0.0
                    }
                };
                self.priority.push(entry.name.clone());
                self.direction.push(entry.direction);
                self.priority_lengths.push(length);
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemberData {
    pub uid: String,
    pub dimensions: Dimensions,
    pub mesh: Option<MeshData>,
    pub types: Vec<i32>,
    /// Spans along the member's own axis, `[start, end, ...]` per part.
    pub parts: Vec<Vec<f64>>,
}

impl MemberData {
    /// Each part with at least two values as an x-axis span.
    #[must_use]
    pub fn endpoint_pairs(&self) -> Vec<EndpointPair> {
        self.parts
            .iter()
            .filter_map(|part| match part.as_slice() {
                [start, end, ..] => Some(EndpointPair::new(
                    Point3::new(*start, 0.0, 0.0),
                    Point3::new(*end, 0.0, 0.0),
                )),
                _ => None,
            })
            .collect()
    }
}
