use super::{line_x, names};
use crate::geom::Point3;
use crate::priority::{
    Assignment, PriorityError, map_points_to_polylines, map_points_to_polylines_with_diagnostics,
};

#[test]
fn points_go_to_nearest_polyline_in_curve_order() {
    let polylines = vec![line_x("low", 0.0, 5), line_x("high", 1.0, 5)];
    let points = vec![
        Point3::new(3.0, 0.1, 0.0),
        Point3::new(1.0, 0.9, 0.0),
        Point3::new(0.0, 0.05, 0.0),
        Point3::new(4.0, 1.0, 0.0),
    ];
    let names = names(&["a", "b", "c", "d"]);

    let assignment = map_points_to_polylines(&polylines, &points, &names, 0.2).unwrap();

    assert_eq!(assignment["low"], vec!["c".to_string(), "a".to_string()]);
    assert_eq!(assignment["high"], vec!["b".to_string(), "d".to_string()]);
}

#[test]
fn every_polyline_gets_an_entry() {
    let polylines = vec![line_x("used", 0.0, 3), line_x("unused", 10.0, 3)];
    let points = vec![Point3::new(1.0, 0.0, 0.0)];
    let names = names(&["p"]);

    let assignment = map_points_to_polylines(&polylines, &points, &names, 0.5).unwrap();

    assert_eq!(assignment.len(), 2);
    assert!(assignment["unused"].is_empty());
}

#[test]
fn empty_polyline_list_yields_empty_mapping() {
    let points = vec![Point3::ORIGIN];
    let assignment = map_points_to_polylines(&[], &points, &names(&["p"]), 1.0).unwrap();
    assert_eq!(assignment, Assignment::new());
}

#[test]
fn threshold_is_inclusive() {
    let polylines = vec![line_x("line", 0.0, 2)];
    let points = vec![Point3::new(0.0, 0.5, 0.0)];

    let at = map_points_to_polylines(&polylines, &points, &names(&["p"]), 0.5).unwrap();
    assert_eq!(at["line"], names(&["p"]));

    let below = map_points_to_polylines(&polylines, &points, &names(&["p"]), 0.499).unwrap();
    assert!(below["line"].is_empty());
}

#[test]
fn zero_threshold_needs_exact_match() {
    let polylines = vec![line_x("line", 0.0, 3)];
    let points = vec![Point3::new(1.0, 0.0, 0.0), Point3::new(1.0, 1e-9, 0.0)];
    let names = names(&["exact", "near"]);

    let (assignment, diagnostics) =
        map_points_to_polylines_with_diagnostics(&polylines, &points, &names, 0.0).unwrap();

    assert_eq!(assignment["line"], vec!["exact".to_string()]);
    assert_eq!(diagnostics.dropped_points, vec!["near".to_string()]);
}

#[test]
fn negative_threshold_assigns_nothing() {
    let polylines = vec![line_x("line", 0.0, 3)];
    let points = vec![Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 0.0, 0.0)];
    let names = names(&["a", "b"]);

    let (assignment, diagnostics) =
        map_points_to_polylines_with_diagnostics(&polylines, &points, &names, -1.0).unwrap();

    assert!(assignment["line"].is_empty());
    assert_eq!(diagnostics.assigned_count, 0);
    assert_eq!(diagnostics.dropped_points.len(), 2);
    assert!(!diagnostics.warnings.is_empty());
}

#[test]
fn equidistant_polylines_prefer_the_first() {
    let polylines = vec![line_x("first", 1.0, 3), line_x("second", -1.0, 3)];
    let points = vec![Point3::new(1.0, 0.0, 0.0)];

    let assignment = map_points_to_polylines(&polylines, &points, &names(&["p"]), 2.0).unwrap();

    assert_eq!(assignment["first"], names(&["p"]));
    assert!(assignment["second"].is_empty());
}

#[test]
fn duplicate_positions_are_independent_points() {
    let polylines = vec![line_x("line", 0.0, 4)];
    let points = vec![
        Point3::new(2.0, 0.0, 0.0),
        Point3::new(2.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
    ];
    let point_names = names(&["x", "y", "z"]);

    let assignment = map_points_to_polylines(&polylines, &points, &point_names, 0.1).unwrap();

    // Stable order for points snapping to the same vertex.
    assert_eq!(assignment["line"], names(&["z", "x", "y"]));
}

#[test]
fn assignment_is_deterministic_and_exclusive() {
    let polylines = vec![
        line_x("a", 0.0, 6),
        line_x("b", 0.4, 6),
        line_x("c", 0.8, 6),
    ];
    let points: Vec<Point3> = (0..12)
        .map(|i| Point3::new(f64::from(i) * 0.4, f64::from(i % 5) * 0.2, 0.0))
        .collect();
    let names: Vec<String> = (0..12).map(|i| format!("p{i}")).collect();

    let first = map_points_to_polylines(&polylines, &points, &names, 0.3).unwrap();
    let second = map_points_to_polylines(&polylines, &points, &names, 0.3).unwrap();
    assert_eq!(first, second);

    let mut seen = std::collections::HashSet::new();
    for list in first.values() {
        for name in list {
            assert!(seen.insert(name.clone()), "{name} assigned twice");
        }
    }
}

#[test]
fn mismatched_names_are_rejected() {
    let polylines = vec![line_x("line", 0.0, 2)];
    let points = vec![Point3::ORIGIN, Point3::ORIGIN];

    let err = map_points_to_polylines(&polylines, &points, &names(&["only"]), 1.0).unwrap_err();
    assert_eq!(
        err,
        PriorityError::LengthMismatch {
            what: "point names",
            expected: 2,
            actual: 1,
        }
    );
}

#[test]
fn duplicate_names_and_ids_are_rejected() {
    let points = vec![Point3::ORIGIN, Point3::ORIGIN];

    let err = map_points_to_polylines(&[line_x("line", 0.0, 2)], &points, &names(&["p", "p"]), 1.0)
        .unwrap_err();
    assert!(matches!(err, PriorityError::DuplicatePointName { .. }));

    let twins = vec![line_x("twin", 0.0, 2), line_x("twin", 1.0, 2)];
    let err = map_points_to_polylines(&twins, &points, &names(&["p", "q"]), 1.0).unwrap_err();
    assert!(matches!(err, PriorityError::DuplicatePolylineId { .. }));
}
