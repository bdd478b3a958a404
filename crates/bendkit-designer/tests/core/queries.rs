use bendkit_core::BendError;
use bendkit_designer::{Bend, SegmentKind, Termination};

#[test]
fn test_steps_of_sharp_path() {
    let steps = Bend::new("5 l 90 w 5 l 45 w 5 l").steps().unwrap();
    assert_eq!(steps.len(), 3);

    let first = steps[0];
    assert_eq!(first.length, 5.0);
    assert_eq!(first.termination, Termination::Bend);
    assert_eq!(first.sign, 1);
    assert_eq!(first.angle, 90.0);
    assert!(!first.turn);

    assert_eq!(steps[2].termination, Termination::Cut);
    assert_eq!(steps[2].sign, 0);
}

#[test]
fn test_steps_flag_turn_on_opposite_bend() {
    let bend =
        Bend::new("10 d 20 s 100 l 60 150 div atan w 150 l 60 150 div atan neg w 125 l");
    let steps = bend.steps().unwrap();
    let second = steps[1];
    assert_eq!(second.length, 150.0);
    assert_eq!(second.termination, Termination::Bend);
    assert_eq!(second.sign, -1);
    assert!((second.angle - 21.80140948635181).abs() < 1e-9);
    assert!(second.turn);
}

#[test]
fn test_developed_length() {
    let bend = Bend::new("2 s 5 l 90 w 5 l 45 w 5 l -135 w 5 l");
    assert!((bend.length().unwrap() - 17.05553473089231).abs() < 1e-9);
}

#[test]
fn test_length_rejects_half_turn_bend() {
    let bend = Bend::new("2 s 5 l 180 w 5 l");
    assert!(matches!(
        bend.length().unwrap_err(),
        BendError::InvalidGeometry { .. }
    ));
    assert!(bend.commands().is_err());

    // sharp half turns have no tangent and still measure
    assert_eq!(Bend::new("5 l 180 w 5 l").length().unwrap(), 10.0);
}

#[test]
fn test_segment_midpoints() {
    let bend = Bend::new("2 s 5 l 90 w 5 l 45 w 5 l -135 w 5 l");
    let segments = bend.segments(false).unwrap();
    assert_eq!(segments.len(), 7);
    assert_eq!(segments[1].kind, SegmentKind::Arc);
    assert_eq!(segments[2].kind, SegmentKind::Line);
    assert!((segments[2].midpoint.y - 2.792893218813453).abs() < 1e-9);
}

#[test]
fn test_vertices_follow_projected_polyline() {
    let bend = Bend::new("2 s 5 l 90 w 5 l");
    let vertices = bend.vertices().unwrap();
    assert_eq!(vertices.len(), 3);
    assert!(vertices[1].approx_eq((5.0, 0.0).into(), 1e-12));
    assert!(vertices[2].approx_eq((5.0, 5.0).into(), 1e-12));
    assert_eq!(bend.inner_vertices().unwrap().len(), 1);
}

#[test]
fn test_bend_instructions() {
    let bend = Bend::new("2 s 5 l 90 w 5 l 45 w 5 l");
    let bends = bend.bend_instructions().unwrap();
    assert_eq!(bends.len(), 2);
    assert_eq!(bends[1].angle(), Some(45.0));
}
