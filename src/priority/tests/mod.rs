mod test_assign_basic;
mod test_merge_basic;

use crate::geom::{Point3, Polyline3};

/// Straight polyline along +X at height `y` with `count` unit-spaced vertices.
pub(super) fn line_x(id: &str, y: f64, count: u32) -> Polyline3 {
    Polyline3::new(
        id,
        (0..count)
            .map(|i| Point3::new(f64::from(i), y, 0.0))
            .collect(),
    )
}

pub(super) fn names(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| (*name).to_string()).collect()
}
