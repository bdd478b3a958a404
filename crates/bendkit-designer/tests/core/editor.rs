use bendkit_core::BendError;
use bendkit_designer::Bend;

const PATH: &str = "1 d 1 s 5 l 90 w 5 l 0 w 5 l";

#[test]
fn test_remove_bend() {
    let bend = Bend::new(PATH);
    assert_eq!(bend.remove_bend(1).unwrap().path, "1 d 1 s 5 l 90 w 10 l");
}

#[test]
fn test_remove_first_bend_without_leading_straight() {
    let bend = Bend::new("90 w 5 l");
    assert_eq!(bend.remove_bend(0).unwrap().path, "5 l");
}

#[test]
fn test_remove_bend_out_of_range() {
    let err = Bend::new(PATH).remove_bend(2).unwrap_err();
    assert_eq!(
        err,
        BendError::IndexOutOfRange {
            kind: "bend",
            index: 2,
            count: 2
        }
    );
}

#[test]
fn test_toggle_straight_bend() {
    let bend = Bend::new(PATH);
    assert!(bend.is_bend_straight(1).unwrap());
    let toggled = bend.toggle_bend(1).unwrap();
    assert_eq!(toggled.path, "1 d 1 s 5 l 90 w 5 l 90 w 5 l");
    assert!(!toggled.is_bend_straight(1).unwrap());
}

#[test]
fn test_edits_keep_expressions() {
    let bend = Bend::new("20 s 100 l 60 150 div atan w 150 l");
    let edited = bend.set_segment_length(1, 120.0).unwrap();
    assert_eq!(edited.path, "20 s 100 l 60 150 div atan w 120 l");
    let reversed = bend.reverse().unwrap();
    assert_eq!(reversed.path, "20 s 150 l 60 150 div atan neg w 100 l");
}

#[test]
fn test_edits_accept_operands_pushed_ahead_of_their_word() {
    let bend = Bend::new("60 150 div atan 5 l w");
    assert!(bend.commands().is_ok());

    let edited = bend.set_segment_length(0, 3.0).unwrap();
    assert_eq!(edited.path, "3 l 60 150 div atan w");

    let reversed = bend.reverse().unwrap();
    assert_eq!(reversed.path, "60 150 div atan neg w 5 l");
    assert!((reversed.length().unwrap() - 5.0).abs() < 1e-9);
}

#[test]
fn test_reverse_preserves_length() {
    let bend = Bend::new("2 s 5 l 90 w 5 l 45 w 5 l -135 w 5 l");
    let reversed = bend.reverse().unwrap();
    assert!((bend.length().unwrap() - reversed.length().unwrap()).abs() < 1e-9);
}

#[test]
fn test_reverse_twice_restores_vertices() {
    let bend = Bend::new("1 d 2 s 5 l 90 w 5 l 45 w 5 l");
    let back = bend.reverse().unwrap().reverse().unwrap();
    let original = bend.vertices().unwrap();
    let restored = back.vertices().unwrap();
    assert_eq!(original.len(), restored.len());
    for (a, b) in original.iter().zip(&restored) {
        assert!(a.approx_eq(*b, 1e-8), "{} != {}", a, b);
    }
}

#[test]
fn test_bend_then_remove_restores_straight() {
    let bend = Bend::new("10 l");
    let edited = bend.bend(0, 0.5, 90.0).unwrap();
    assert_eq!(edited.path, "5 l 90 w 5 l");
    assert_eq!(edited.remove_bend(0).unwrap().path, "10 l");
}
