//! Derived geometry: segments, vertices, fabrication steps, developed length.

use bendkit_core::{deg2rad, sign, BendError, BendResult, Vector2, GEOMETRY_EPSILON};
use serde::{Deserialize, Serialize};

use super::Bend;
use crate::circle::{sagitta_arc, ArcCircle};
use crate::commands::DrawCommand;
use crate::instruction::Instruction;

/// Shape of a drawn segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    Line,
    Arc,
}

/// One drawn piece between consecutive pen positions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub kind: SegmentKind,
    pub start: Vector2,
    pub end: Vector2,
    /// Midpoint of the chord.
    pub midpoint: Vector2,
    /// The command that drew this segment.
    pub command: DrawCommand,
}

impl Segment {
    fn between(start: Vector2, command: DrawCommand) -> Self {
        let end = command.end_point();
        let kind = match command {
            DrawCommand::ArcTo { .. } => SegmentKind::Arc,
            _ => SegmentKind::Line,
        };
        Self {
            kind,
            start,
            end,
            midpoint: start.midpoint(end),
            command,
        }
    }

    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }

    /// Circle carrying an arc segment.
    pub fn arc_circle(&self) -> Option<ArcCircle> {
        match self.command {
            DrawCommand::ArcTo { bulge, .. } => sagitta_arc(self.start, self.end, bulge),
            _ => None,
        }
    }
}

/// How a fabrication step ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Termination {
    Cut,
    Bend,
}

/// One fabrication step: feed `length`, then bend or cut.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub length: f64,
    pub termination: Termination,
    /// Direction of the bend: -1, 0 or 1.
    pub sign: i8,
    /// Unsigned bend angle in degrees.
    pub angle: f64,
    /// Bends against the bar's first bend, so the part must be flipped.
    pub turn: bool,
}

impl Step {
    fn cut(length: f64) -> Self {
        Self {
            length,
            termination: Termination::Cut,
            sign: 0,
            angle: 0.0,
            turn: false,
        }
    }
}

fn segments_of(commands: &[DrawCommand]) -> Vec<Segment> {
    let Some(first) = commands.first() else {
        return Vec::new();
    };
    let mut previous = first.end_point();
    commands[1..]
        .iter()
        .map(|command| {
            let segment = Segment::between(previous, *command);
            previous = segment.end;
            segment
        })
        .collect()
}

impl Bend {
    /// Drawn segments of the manufactured geometry.
    ///
    /// With `invert_y` every command is mirrored first, flipping arc sweep
    /// and bulge sign.
    pub fn segments(&self, invert_y: bool) -> BendResult<Vec<Segment>> {
        let mut commands = self.commands()?;
        if invert_y {
            commands = commands.iter().map(DrawCommand::invert_y).collect();
        }
        Ok(segments_of(&commands))
    }

    /// Segments of the idealized polyline.
    pub fn projected_segments(&self) -> BendResult<Vec<Segment>> {
        Ok(segments_of(&self.projected_commands()?))
    }

    /// Corner points of the idealized polyline.
    ///
    /// The final endpoint is dropped when it closes the loop onto the first
    /// vertex.
    pub fn vertices(&self) -> BendResult<Vec<Vector2>> {
        let segments = self.projected_segments()?;
        let mut vertices: Vec<Vector2> = segments.iter().map(|s| s.start).collect();
        if let (Some(first), Some(last)) = (vertices.first().copied(), segments.last()) {
            if !last.end.approx_eq(first, GEOMETRY_EPSILON) {
                vertices.push(last.end);
            }
        }
        Ok(vertices)
    }

    /// Vertices without the two path endpoints.
    pub fn inner_vertices(&self) -> BendResult<Vec<Vector2>> {
        let vertices = self.vertices()?;
        if vertices.len() <= 2 {
            return Ok(Vec::new());
        }
        Ok(vertices[1..vertices.len() - 1].to_vec())
    }

    /// Instructions produced by `w`, in path order.
    pub fn bend_instructions(&self) -> BendResult<Vec<Instruction>> {
        Ok(self
            .instructions()?
            .into_iter()
            .filter(Instruction::is_bend)
            .collect())
    }

    pub fn bend_count(&self) -> BendResult<usize> {
        Ok(self.bend_instructions()?.len())
    }

    pub fn segment_count(&self) -> BendResult<usize> {
        Ok(self
            .instructions()?
            .iter()
            .filter(|i| matches!(i, Instruction::Forward { .. }))
            .count())
    }

    /// Fabrication sequence: every straight opens a step, every bend
    /// terminates the current one.
    pub fn steps(&self) -> BendResult<Vec<Step>> {
        let mut steps: Vec<Step> = Vec::new();
        for instruction in self.instructions()? {
            match instruction {
                Instruction::Forward {
                    projected_length, ..
                } => steps.push(Step::cut(projected_length)),
                Instruction::Turn { angle, .. } | Instruction::Bend { angle, .. } => {
                    let Some(current) = steps.len().checked_sub(1) else {
                        continue;
                    };
                    let direction = sign(angle) as i8;
                    steps[current].termination = Termination::Bend;
                    steps[current].sign = direction;
                    steps[current].angle = angle.abs();

                    let first = steps[0];
                    steps[current].turn =
                        first.termination == Termination::Bend && first.sign != direction;
                }
                Instruction::BarRadius { .. } | Instruction::BendRadius { .. } => {}
            }
        }
        Ok(steps)
    }

    /// Developed (flat) stock length: straights plus arc lengths.
    ///
    /// Fails with [`BendError::InvalidGeometry`] on a radiused bend with no
    /// finite tangent length, the same bends the renderer refuses to draw.
    pub fn length(&self) -> BendResult<f64> {
        let mut total = 0.0;
        for instruction in self.instructions()? {
            total += match instruction {
                Instruction::Forward { length, .. } => length,
                Instruction::Bend {
                    angle,
                    length_to_tangent,
                    ..
                } if !length_to_tangent.is_finite() => {
                    return Err(BendError::geometry(format!(
                        "bend of {} degrees has no finite tangent length",
                        angle
                    )));
                }
                Instruction::Bend { angle, radius, .. } => (radius * deg2rad(angle)).abs(),
                _ => 0.0,
            };
        }
        if !total.is_finite() {
            return Err(BendError::geometry(format!(
                "developed length of {} is not finite",
                total
            )));
        }
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segments_carry_midpoints() {
        let bend = Bend::new("5 l 90 w 5 l");
        let segments = bend.segments(false).unwrap();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].start, Vector2::ZERO);
        assert_eq!(segments[0].end, Vector2::new(5.0, 0.0));
        assert_eq!(segments[0].midpoint, Vector2::new(2.5, 0.0));
        assert_eq!(segments[0].kind, SegmentKind::Line);
    }

    #[test]
    fn test_closed_loop_drops_duplicate_vertex() {
        let bend = Bend::new("5 l 90 w 5 l 90 w 5 l 90 w 5 l");
        let vertices = bend.vertices().unwrap();
        assert_eq!(vertices.len(), 4);
        assert_eq!(bend.inner_vertices().unwrap().len(), 2);
    }

    #[test]
    fn test_step_without_straight_is_skipped() {
        let steps = Bend::new("90 w 5 l").steps().unwrap();
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].termination, Termination::Cut);
    }

    #[test]
    fn test_arc_segment_circle() {
        let bend = Bend::new("2 s 5 l 90 w 5 l");
        let segments = bend.segments(false).unwrap();
        assert_eq!(segments[1].kind, SegmentKind::Arc);
        let circle = segments[1].arc_circle().unwrap();
        assert!((circle.radius - 1.0).abs() < 1e-9);
        assert!(circle.center.approx_eq(Vector2::new(4.0, 1.0), 1e-9));
        assert!(segments[0].arc_circle().is_none());
    }

    #[test]
    fn test_counts() {
        let bend = Bend::new("1 d 1 s 5 l 90 w 5 l 0 w 5 l");
        assert_eq!(bend.bend_count().unwrap(), 2);
        assert_eq!(bend.segment_count().unwrap(), 3);
    }
}
