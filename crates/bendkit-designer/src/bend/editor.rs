//! Structural edits. Each reads the path into a [`PathProgram`](crate::program::PathProgram), changes
//! it, and returns a new [`Bend`].

use bendkit_core::{BendError, BendResult, GEOMETRY_EPSILON};
use tracing::debug;

use super::Bend;
use crate::pen::{trace_pen, RenderMode};
use crate::program::{OpKind, PathOp};

fn finite(name: &'static str, value: f64) -> BendResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(BendError::InvalidParameter {
            name,
            reason: format!("{} is not a finite number", value),
        })
    }
}

impl Bend {
    /// Split the `index`-th straight at fraction `t` and insert a bend of
    /// `angle` degrees there.
    pub fn bend(&self, index: usize, t: f64, angle: f64) -> BendResult<Bend> {
        if !(0.0..=1.0).contains(&t) {
            return Err(BendError::InvalidParameter {
                name: "t",
                reason: format!("{} is outside [0, 1]", t),
            });
        }
        let angle = finite("angle", angle)?;

        let mut program = self.program()?;
        let position = program.position_of(OpKind::Length, index)?;
        let segment_length = program.ops()[position].value()?;
        debug!(index, t, angle, segment_length, "inserting bend");

        program.splice(
            position..position + 1,
            [
                PathOp::literal(OpKind::Length, t * segment_length),
                PathOp::literal(OpKind::Angle, angle),
                PathOp::literal(OpKind::Length, (1.0 - t) * segment_length),
            ],
        );
        Ok(self.with_program(&program))
    }

    /// Cycle the `index`-th bend: positive to -90, negative to 0, zero to 90.
    pub fn toggle_bend(&self, index: usize) -> BendResult<Bend> {
        let mut program = self.program()?;
        let current = program.nth(OpKind::Angle, index)?.value()?;
        let next = if current > 0.0 {
            -90.0
        } else if current < 0.0 {
            0.0
        } else {
            90.0
        };
        debug!(index, current, next, "toggling bend");
        program.set_value(OpKind::Angle, index, next)?;
        Ok(self.with_program(&program))
    }

    /// True when the `index`-th bend has an angle of zero.
    pub fn is_bend_straight(&self, index: usize) -> BendResult<bool> {
        Ok(self.program()?.nth(OpKind::Angle, index)?.value()? == 0.0)
    }

    /// Delete the `index`-th bend, merging its neighbouring straights.
    ///
    /// A missing neighbour at either end of the path counts as length zero.
    pub fn remove_bend(&self, index: usize) -> BendResult<Bend> {
        let mut program = self.program()?;
        let position = program.position_of(OpKind::Angle, index)?;
        let ops = program.ops();

        let mut start = position;
        let mut end = position + 1;
        let mut merged = 0.0;
        if let Some(previous) = position.checked_sub(1).map(|p| &ops[p]) {
            if previous.kind == OpKind::Length {
                merged += previous.value()?;
                start -= 1;
            }
        }
        if let Some(next) = ops.get(position + 1) {
            if next.kind == OpKind::Length {
                merged += next.value()?;
                end += 1;
            }
        }
        debug!(index, merged, "removing bend");

        program.splice(start..end, [PathOp::literal(OpKind::Length, merged)]);
        Ok(self.with_program(&program))
    }

    /// Replace the length of the `index`-th straight.
    pub fn set_segment_length(&self, index: usize, length: f64) -> BendResult<Bend> {
        let length = finite("length", length)?;
        let mut program = self.program()?;
        program.set_value(OpKind::Length, index, length)?;
        Ok(self.with_program(&program))
    }

    /// Replace the angle of the `index`-th bend.
    pub fn set_bend_angle(&self, index: usize, angle: f64) -> BendResult<Bend> {
        let angle = finite("angle", angle)?;
        let mut program = self.program()?;
        program.set_value(OpKind::Angle, index, angle)?;
        Ok(self.with_program(&program))
    }

    /// The same bar described from its other end.
    pub fn reverse(&self) -> BendResult<Bend> {
        let program = self.program()?;
        let (commands, pen) = trace_pen(
            &self.instructions()?,
            self.initial_position,
            self.initial_direction,
            RenderMode::Projected,
        )?;

        let end = pen.position;
        let fallback = -pen.direction;
        let ends_with_straight = program
            .ops()
            .iter()
            .rev()
            .find(|op| !op.kind.is_setup())
            .is_some_and(|op| op.kind == OpKind::Length);

        let direction = match commands.len().checked_sub(2).map(|i| commands[i]) {
            Some(previous) if ends_with_straight => {
                // degenerate or backwards final runs keep the pen heading
                let towards = previous.end_point().subtract(end).normalize();
                if towards.dot(fallback) > GEOMETRY_EPSILON {
                    towards
                } else {
                    fallback
                }
            }
            _ => fallback,
        };

        let reversed = program.reversed();
        debug!(from = %self.path, to = %reversed, "reversed bend");
        Ok(Bend {
            path: reversed.to_string(),
            initial_position: end,
            initial_direction: direction,
        })
    }
}
