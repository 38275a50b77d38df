use super::{line_x, names};
use crate::geom::Point3;
use crate::priority::{
    Assignment, EndpointPair, PriorityEntry, PriorityError, PriorityMap, map_points_to_polylines,
    merge_priority_data, merge_priority_data_with_diagnostics,
};

fn span(from: f64, to: f64, y: f64) -> EndpointPair {
    EndpointPair::new(Point3::new(from, y, 0.0), Point3::new(to, y, 0.0))
}

#[test]
fn empty_assignment_gives_empty_result() {
    let result = merge_priority_data(&Assignment::new(), &[], &[], &[], &[]).unwrap();
    assert_eq!(result, PriorityMap::new());
}

#[test]
fn entries_keep_order_and_carry_direction() {
    let polylines = vec![line_x("c0", 0.0, 6).with_label("Curve A")];
    let points = vec![Point3::new(4.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)];
    let point_names = names(&["late", "early"]);
    let endpoints = vec![span(5.0, 3.0, 0.0), span(0.0, 2.0, 0.0)];

    let assignment = map_points_to_polylines(&polylines, &points, &point_names, 0.1).unwrap();
    let result =
        merge_priority_data(&assignment, &points, &endpoints, &point_names, &polylines).unwrap();

    assert_eq!(
        result["Curve A"],
        vec![
            PriorityEntry::new("early", true),
            PriorityEntry::new("late", false),
        ]
    );
}

#[test]
fn missing_endpoints_default_to_reversed() {
    let polylines = vec![line_x("c0", 0.0, 4)];
    let points = vec![Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 0.0, 0.0)];
    let point_names = names(&["has_span", "no_span"]);
    let endpoints = vec![span(0.0, 3.0, 0.0)];

    let assignment = map_points_to_polylines(&polylines, &points, &point_names, 0.1).unwrap();
    let (result, diagnostics) = merge_priority_data_with_diagnostics(
        &assignment,
        &points,
        &endpoints,
        &point_names,
        &polylines,
    )
    .unwrap();

    assert_eq!(
        result["c0"],
        vec![
            PriorityEntry::new("has_span", true),
            PriorityEntry::new("no_span", false),
        ]
    );
    assert_eq!(diagnostics.defaulted_directions, names(&["no_span"]));
    assert_eq!(diagnostics.entry_count, 2);
}

#[test]
fn unknown_polyline_is_a_configuration_error() {
    let mut assignment = Assignment::new();
    assignment.insert("ghost".to_string(), Vec::new());

    let err = merge_priority_data(&assignment, &[], &[], &[], &[line_x("c0", 0.0, 2)]).unwrap_err();
    assert_eq!(
        err,
        PriorityError::MissingPolyline {
            id: "ghost".to_string()
        }
    );
}

#[test]
fn assigned_name_missing_from_names_is_a_configuration_error() {
    let polylines = vec![line_x("c0", 0.0, 3)];
    let points = vec![Point3::new(0.0, 0.0, 0.0)];
    let point_names = names(&["known"]);
    let endpoints = vec![span(0.0, 2.0, 0.0)];

    let mut assignment = Assignment::new();
    assignment.insert("c0".to_string(), names(&["known", "stray"]));

    let err = merge_priority_data(&assignment, &points, &endpoints, &point_names, &polylines)
        .unwrap_err();
    assert_eq!(
        err,
        PriorityError::UnknownPointName {
            name: "stray".to_string()
        }
    );
}

#[test]
fn closed_polyline_with_points_fails_atomically() {
    let polylines = vec![line_x("open", 0.0, 3), line_x("ring", 5.0, 3).closed(true)];
    let points = vec![Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 5.0, 0.0)];
    let point_names = names(&["a", "b"]);
    let endpoints = vec![span(0.0, 2.0, 0.0), span(0.0, 2.0, 5.0)];

    let assignment = map_points_to_polylines(&polylines, &points, &point_names, 0.1).unwrap();
    let result = merge_priority_data(&assignment, &points, &endpoints, &point_names, &polylines);

    assert!(matches!(result, Err(PriorityError::Polyline(_))));
}

#[test]
fn shared_labels_are_rejected() {
    let polylines = vec![
        line_x("c0", 0.0, 2).with_label("same"),
        line_x("c1", 3.0, 2).with_label("same"),
    ];
    let assignment = map_points_to_polylines(&polylines, &[], &[], 0.1).unwrap();

    let err = merge_priority_data(&assignment, &[], &[], &[], &polylines).unwrap_err();
    assert_eq!(
        err,
        PriorityError::DuplicatePolylineLabel {
            label: "same".to_string()
        }
    );
}
