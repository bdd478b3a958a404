use bendkit_core::Vector2;
use bendkit_designer::{Bend, JoinEnd};

fn placed(path: &str, position: (f64, f64), direction: (f64, f64)) -> Bend {
    Bend::with_pose(path, position.into(), direction.into())
}

#[test]
fn test_join_rebuilds_corner() {
    let a = Bend::new("5 l 90 w 5 l");
    let b = placed("5 l", (5.0, 5.0), (0.0, 1.0));
    let joined = a.join(&b, JoinEnd::End, JoinEnd::Start).unwrap();
    assert_eq!(joined.path, "5 l 90 w 10 l");
}

#[test]
fn test_join_keeps_receiver_setup() {
    let a = Bend::new("2 s 5 l");
    let b = placed("4 s 5 l", (5.0, 0.0), (0.0, 1.0));
    let joined = a.append(&b).unwrap();
    assert_eq!(joined.path, "2 s 5 l 90 w 5 l");
}

#[test]
fn test_join_colinear_chain_is_associative() {
    let a = Bend::new("3 l");
    let b = placed("4 l", (3.0, 0.0), (1.0, 0.0));
    let c = placed("5 l", (7.0, 0.0), (1.0, 0.0));

    let left = a.append(&b).unwrap().append(&c).unwrap();
    let right = a.append(&b.append(&c).unwrap()).unwrap();

    let left = left.vertices().unwrap();
    let right = right.vertices().unwrap();
    assert_eq!(left.len(), 2);
    assert_eq!(left.len(), right.len());
    for (l, r) in left.iter().zip(&right) {
        assert!(l.approx_eq(*r, 1e-8));
    }
    assert!(left[1].approx_eq(Vector2::new(12.0, 0.0), 1e-8));
}

#[test]
fn test_join_both_starts() {
    let a = Bend::new("5 l");
    let b = placed("5 l", (0.0, 0.0), (0.0, 1.0));
    let joined = a.join(&b, JoinEnd::Start, JoinEnd::Start).unwrap();
    assert_eq!(joined.path, "5 l -90 w 5 l");
    let vertices = joined.vertices().unwrap();
    assert!(vertices[2].approx_eq(Vector2::new(0.0, 5.0), 1e-12));
}
