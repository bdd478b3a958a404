//! Property-based tests for bend path invariants using the `proptest` crate.

use proptest::prelude::*;

use bendkit_core::{format_number, Vector2};
use bendkit_designer::{Bend, PathProgram};

// ---------------------------------------------------------------------------
// Strategy helpers
// ---------------------------------------------------------------------------

/// Value with one decimal place in `[lo, hi)` tenths.
fn arb_tenths(lo: i32, hi: i32) -> impl Strategy<Value = f64> {
    (lo..hi).prop_map(|v| f64::from(v) / 10.0)
}

/// Straight lengths long enough that miter shifts never flip a run.
fn arb_length() -> impl Strategy<Value = f64> {
    arb_tenths(100, 500)
}

fn arb_angle() -> impl Strategy<Value = f64> {
    arb_tenths(-1500, 1500)
}

/// A canonical path string: optional setup, then alternating `l` and `w`.
fn arb_path() -> impl Strategy<Value = String> {
    (
        proptest::option::of(arb_tenths(1, 20)),
        proptest::option::of(arb_tenths(1, 40)),
        arb_length(),
        prop::collection::vec((arb_angle(), arb_length()), 0..6),
    )
        .prop_map(|(bar, bend, first, rest)| {
            let mut tokens = Vec::new();
            if let Some(bar) = bar {
                tokens.push(format!("{} d", format_number(bar)));
            }
            if let Some(bend) = bend {
                tokens.push(format!("{} s", format_number(bend)));
            }
            tokens.push(format!("{} l", format_number(first)));
            for (angle, length) in rest {
                tokens.push(format!("{} w", format_number(angle)));
                tokens.push(format!("{} l", format_number(length)));
            }
            tokens.join(" ")
        })
}

const TOL: f64 = 1e-8;

fn assert_same_polyline(a: &[Vector2], b: &[Vector2]) -> Result<(), TestCaseError> {
    prop_assert_eq!(a.len(), b.len());
    for (p, q) in a.iter().zip(b) {
        prop_assert!(p.approx_eq(*q, TOL), "{} != {}", p, q);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// 1. Developed length does not depend on direction
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn length_invariant_under_reverse(path in arb_path()) {
        let bend = Bend::new(path);
        let forward = bend.length().unwrap();
        let backward = bend.reverse().unwrap().length().unwrap();
        prop_assert!((forward - backward).abs() < TOL,
            "length {} != reversed length {}", forward, backward);
    }
}

// ---------------------------------------------------------------------------
// 2. Reversing twice walks the same polyline
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn reverse_is_an_involution_on_vertices(path in arb_path()) {
        let bend = Bend::new(path);
        let back = bend.reverse().unwrap().reverse().unwrap();
        assert_same_polyline(&bend.vertices().unwrap(), &back.vertices().unwrap())?;
    }
}

// ---------------------------------------------------------------------------
// 3. A single reverse visits the vertices in opposite order
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn reverse_flips_vertex_order(path in arb_path()) {
        let bend = Bend::new(path);
        let mut expected = bend.vertices().unwrap();
        expected.reverse();
        assert_same_polyline(&expected, &bend.reverse().unwrap().vertices().unwrap())?;
    }
}

// ---------------------------------------------------------------------------
// 4. Canonical path strings survive parse and serialize
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn canonical_path_reserializes(path in arb_path()) {
        let program = PathProgram::parse(&path).unwrap();
        prop_assert_eq!(program.to_string(), path);
    }
}

// ---------------------------------------------------------------------------
// 5. Joining colinear runs is associative
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn join_colinear_chain_associative(
        a in arb_length(),
        b in arb_length(),
        c in arb_length(),
        heading in -std::f64::consts::PI..std::f64::consts::PI,
    ) {
        let direction = Vector2::X.rotate(heading);
        let start_b = direction.scale(a);
        let start_c = direction.scale(a + b);

        let first = Bend::with_pose(format!("{} l", format_number(a)), Vector2::ZERO, direction);
        let second = Bend::with_pose(format!("{} l", format_number(b)), start_b, direction);
        let third = Bend::with_pose(format!("{} l", format_number(c)), start_c, direction);

        let left = first.append(&second).unwrap().append(&third).unwrap();
        let right = first.append(&second.append(&third).unwrap()).unwrap();

        let left = left.vertices().unwrap();
        let right = right.vertices().unwrap();
        prop_assert_eq!(left.len(), 2);
        for (p, q) in left.iter().zip(&right) {
            prop_assert!(p.approx_eq(*q, 1e-6), "{} != {}", p, q);
        }
    }
}
