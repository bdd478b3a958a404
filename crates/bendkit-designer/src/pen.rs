//! Pen simulator
//!
//! Walks compiled instructions with a pen (position, unit direction, active
//! radii) and emits [`DrawCommand`]s. A fresh pen is created for every
//! render; nothing is cached between calls.

use bendkit_core::{sign, BendError, BendResult, Vector2};
use serde::{Deserialize, Serialize};

use crate::commands::DrawCommand;
use crate::instruction::Instruction;

/// Relative slack allowed when a bend's chord is checked against its radius.
const CHORD_TOLERANCE: f64 = 1e-9;

/// Which geometry the pen traces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Manufactured geometry: shortened straights joined by arcs.
    #[default]
    Radiused,
    /// Idealized polyline through the nominal corner points.
    Projected,
}

/// Ephemeral pen state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pen {
    pub position: Vector2,
    pub direction: Vector2,
    pub bar_radius: f64,
    pub bend_radius: f64,
}

impl Pen {
    pub fn new(position: Vector2, direction: Vector2) -> Self {
        Self {
            position,
            direction: direction.normalize(),
            bar_radius: 0.0,
            bend_radius: 0.0,
        }
    }

    /// Advance by one instruction, returning the command it draws, if any.
    pub fn step(
        &mut self,
        instruction: &Instruction,
        mode: RenderMode,
    ) -> BendResult<Option<DrawCommand>> {
        match *instruction {
            Instruction::BarRadius { radius } => {
                self.bar_radius = radius;
                Ok(None)
            }
            Instruction::BendRadius { radius } => {
                self.bend_radius = radius;
                Ok(None)
            }
            Instruction::Forward {
                length,
                pivot_length,
                ..
            } => {
                let distance = match mode {
                    RenderMode::Radiused => length,
                    RenderMode::Projected => pivot_length,
                };
                self.position = self.position.add(self.direction.scale(distance));
                Ok(Some(DrawCommand::LineTo(self.position)))
            }
            Instruction::Turn { angle, .. } => {
                self.direction = self.direction.rotate_deg(angle);
                Ok(None)
            }
            Instruction::Bend {
                angle,
                length_to_tangent,
                ..
            } => match mode {
                RenderMode::Projected => {
                    self.direction = self.direction.rotate_deg(angle);
                    Ok(None)
                }
                RenderMode::Radiused => self.arc(angle, length_to_tangent).map(Some),
            },
        }
    }

    fn arc(&mut self, angle: f64, length_to_tangent: f64) -> BendResult<DrawCommand> {
        if !length_to_tangent.is_finite() {
            return Err(BendError::geometry(format!(
                "bend of {} degrees has no finite tangent length",
                angle
            )));
        }

        let radius = self.bend_radius + self.bar_radius;
        let direction = self.direction.rotate_deg(angle);
        let start = self.position;
        let end = start
            .add(self.direction.scale(length_to_tangent))
            .add(direction.scale(length_to_tangent));

        let half_chord = start.distance(end) / 2.0;
        // rounding in the tangent construction grows with the tangent length
        let slack = CHORD_TOLERANCE * radius.abs().max(length_to_tangent.abs());
        if half_chord > radius.abs() + slack {
            return Err(BendError::geometry(format!(
                "chord of {} exceeds the diameter of radius {}",
                half_chord * 2.0,
                radius
            )));
        }
        let discriminant = (radius * radius - half_chord * half_chord).max(0.0);
        let sagitta = radius - discriminant.sqrt();
        let bulge = if half_chord == 0.0 {
            0.0
        } else {
            sign(angle) * sagitta / half_chord
        };

        self.position = end;
        self.direction = direction;

        Ok(DrawCommand::ArcTo {
            end,
            bulge,
            radius,
            rotation: 0.0,
            large_arc: angle.abs() > 180.0,
            sweep: angle > 0.0,
        })
    }
}

/// Simulate `instructions` from the given pose.
///
/// The returned list always starts with `MoveTo(initial_position)`.
pub fn render(
    instructions: &[Instruction],
    initial_position: Vector2,
    initial_direction: Vector2,
    mode: RenderMode,
) -> BendResult<Vec<DrawCommand>> {
    let (commands, _) = trace_pen(instructions, initial_position, initial_direction, mode)?;
    Ok(commands)
}

/// Like [`render`], also returning the pen in its final state.
pub fn trace_pen(
    instructions: &[Instruction],
    initial_position: Vector2,
    initial_direction: Vector2,
    mode: RenderMode,
) -> BendResult<(Vec<DrawCommand>, Pen)> {
    let mut pen = Pen::new(initial_position, initial_direction);
    let mut commands = Vec::with_capacity(instructions.len() + 1);
    commands.push(DrawCommand::MoveTo(initial_position));

    for instruction in instructions {
        if let Some(command) = pen.step(instruction, mode)? {
            commands.push(command);
        }
    }

    Ok((commands, pen))
}
