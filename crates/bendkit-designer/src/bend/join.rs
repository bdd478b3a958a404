//! Joining two bends end to end.
//!
//! Both operands are reduced to their projected vertex lists in shared
//! coordinates, stitched at the chosen ends, and a fresh path is rebuilt
//! from the combined polyline with the receiver's bar and bend setup.

use std::fmt;
use std::str::FromStr;

use bendkit_core::{BendError, BendResult, Vector2, GEOMETRY_EPSILON};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::Bend;
use crate::compiler::miter_shift;
use crate::program::{OpKind, PathOp, PathProgram};

/// Which end of a bend takes part in a join.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JoinEnd {
    Start,
    #[default]
    End,
}

impl fmt::Display for JoinEnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JoinEnd::Start => write!(f, "start"),
            JoinEnd::End => write!(f, "end"),
        }
    }
}

impl FromStr for JoinEnd {
    type Err = BendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "start" => Ok(JoinEnd::Start),
            "end" => Ok(JoinEnd::End),
            _ => Err(BendError::InvalidParameter {
                name: "end",
                reason: format!("'{}' is neither 'start' nor 'end'", s),
            }),
        }
    }
}

/// Signed degrees folded into (-180, 180].
fn normalize_angle(angle: f64) -> f64 {
    let folded = angle.rem_euclid(360.0);
    if folded > 180.0 {
        folded - 360.0
    } else {
        folded
    }
}

/// True when `vertex` sits on the straight run from `previous` to `next`.
fn is_on_segment(previous: Vector2, vertex: Vector2, next: Vector2) -> bool {
    let incoming = vertex.subtract(previous);
    let outgoing = next.subtract(vertex);
    let scale = incoming.magnitude() * outgoing.magnitude();
    if scale == 0.0 {
        return false;
    }
    incoming.cross(outgoing).abs() <= GEOMETRY_EPSILON * scale && incoming.dot(outgoing) > 0.0
}

impl Bend {
    /// Join `end` of this bend to `other_end` of `other`.
    ///
    /// Operands are reversed as needed so the join happens at this bend's
    /// end and the other bend's start. A junction vertex shared by both
    /// (within 1e-8) is kept once; junction vertices lying on the straight
    /// run through their neighbours are dropped, merging the runs.
    pub fn join(&self, other: &Bend, end: JoinEnd, other_end: JoinEnd) -> BendResult<Bend> {
        let head = match end {
            JoinEnd::End => self.clone(),
            JoinEnd::Start => self.reverse()?,
        };
        let tail = match other_end {
            JoinEnd::Start => other.clone(),
            JoinEnd::End => other.reverse()?,
        };

        let mut vertices = head.vertices()?;
        let head_len = vertices.len();
        let mut tail_vertices = tail.vertices()?.into_iter().peekable();

        let shared = match (vertices.last(), tail_vertices.peek()) {
            (Some(last), Some(first)) => last.approx_eq(*first, GEOMETRY_EPSILON),
            _ => false,
        };
        if shared {
            tail_vertices.next();
            debug!("dropped duplicate junction vertex");
        }
        vertices.extend(tail_vertices);

        // Junction vertices, highest index first so removals keep the rest valid.
        let junction: Vec<usize> = match head_len.checked_sub(1) {
            Some(last) if shared => vec![last],
            Some(last) => vec![last + 1, last],
            None => Vec::new(),
        };
        for index in junction {
            if index == 0 || index + 1 >= vertices.len() {
                continue;
            }
            if is_on_segment(vertices[index - 1], vertices[index], vertices[index + 1]) {
                debug!(index, "merging colinear runs at junction");
                vertices.remove(index);
            }
        }

        head.rebuild_through(vertices)
    }

    /// Join `other`'s start onto this bend's end.
    pub fn append(&self, other: &Bend) -> BendResult<Bend> {
        self.join(other, JoinEnd::End, JoinEnd::Start)
    }

    /// Rebuild a path through `vertices`, keeping this bend's setup.
    fn rebuild_through(&self, mut vertices: Vec<Vector2>) -> BendResult<Bend> {
        let program = self.program()?;
        let setup: Vec<PathOp> = program
            .bar_diameter()
            .into_iter()
            .chain(program.bend_diameter())
            .cloned()
            .collect();
        let bar_radius = match program.bar_diameter() {
            Some(op) => op.value()? / 2.0,
            None => 0.0,
        };

        vertices.dedup_by(|next, previous| next.approx_eq(*previous, GEOMETRY_EPSILON));
        if vertices.len() < 2 {
            debug!(vertices = vertices.len(), "join left no segments");
            return Ok(self.with_program(&PathProgram::from_ops(setup)));
        }

        let directions: Vec<Vector2> = vertices
            .windows(2)
            .map(|pair| pair[1].subtract(pair[0]).normalize())
            .collect();
        if bar_radius != 0.0
            && directions
                .windows(2)
                .any(|pair| pair[0].dot(pair[1]) < GEOMETRY_EPSILON - 1.0)
        {
            return Err(BendError::geometry(
                "joined path doubles back on a bar with a diameter",
            ));
        }
        let angles: Vec<f64> = directions
            .windows(2)
            .map(|pair| normalize_angle(pair[1].angle_deg() - pair[0].angle_deg()))
            .collect();

        let mut ops = setup;
        for (index, pair) in vertices.windows(2).enumerate() {
            let before = index.checked_sub(1).map(|i| angles[i]);
            let after = angles.get(index).copied();
            let length = pair[0].distance(pair[1])
                + before.map_or(0.0, |angle| miter_shift(bar_radius, angle))
                + after.map_or(0.0, |angle| miter_shift(bar_radius, angle));

            ops.push(PathOp::literal(OpKind::Length, length));
            if let Some(angle) = after {
                ops.push(PathOp::literal(OpKind::Angle, angle));
            }
        }

        let program = PathProgram::from_ops(ops);
        debug!(path = %program, vertices = vertices.len(), "rebuilt joined bend");
        Ok(Bend::with_pose(
            program.to_string(),
            vertices[0],
            directions[0],
        ))
    }
}
