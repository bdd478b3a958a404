use bendkit_designer::{Bend, DrawCommand, RenderMode};

const B1: &str = "5 l 90 w 5 l 45 w 5 l";
const B2: &str = "2 s 5 l 90 w 5 l 45 w 5 l -135 w 5 l";

#[test]
fn test_print_sharp_path() {
    let bend = Bend::new(B1);
    assert_eq!(
        bend.print(false).unwrap(),
        "M 0 0 L 5 0 L 5 5 L 1.4644660940672627 8.535533905932738"
    );
}

#[test]
fn test_print_sharp_path_inverted() {
    let bend = Bend::new(B1);
    assert_eq!(
        bend.print(true).unwrap(),
        "M 0 0 L 5 0 L 5 -5 L 1.4644660940672627 -8.535533905932738"
    );
}

#[test]
fn test_print_radiused_path_inverted() {
    let bend = Bend::new(B2);
    assert_eq!(
        bend.print(true).unwrap(),
        "M 0 0 L 4 0 A 1 1 0 0 0 5 -1.0000000000000002 \
         L 5 -4.585786437626905 A 1 1 0 0 0 4.707106781186548 -5.292893218813452 \
         L 3.17157287525381 -6.82842712474619 A 1 1 0 0 1 3.878679656440358 -8.535533905932738 \
         L 6.464466094067263 -8.535533905932738"
    );
}

#[test]
fn test_commands_count() {
    let bend = Bend::new(B1);
    let commands = bend.commands().unwrap();
    assert_eq!(commands.len(), 4);
    assert!(matches!(commands[0], DrawCommand::MoveTo(_)));
}

#[test]
fn test_projected_and_radiused_end_together() {
    let bend = Bend::new(B2);
    let radiused = bend.commands().unwrap();
    let projected = bend.render(RenderMode::Projected).unwrap();
    let a = radiused.last().unwrap().end_point();
    let b = projected.last().unwrap().end_point();
    assert!(a.approx_eq(b, 1e-9));
}

#[test]
fn test_empty_path_renders_move_only() {
    let bend = Bend::new("");
    assert_eq!(bend.print(false).unwrap(), "M 0 0");
}

#[test]
fn test_malformed_path_is_reported() {
    let bend = Bend::new("5 l banana w");
    let err = bend.print(false).unwrap_err();
    assert!(err.to_string().contains("banana"));
}
