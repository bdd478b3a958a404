//! Draw commands emitted by the pen simulator.

use bendkit_core::{format_number, Vector2};
use serde::{Deserialize, Serialize};

/// A renderable path command.
///
/// `ArcTo` carries both a signed bulge (sagitta over half chord, sign = turn
/// direction) for CAD-style consumers and the endpoint arc parameters used by
/// SVG-style renderers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum DrawCommand {
    MoveTo(Vector2),
    LineTo(Vector2),
    ArcTo {
        end: Vector2,
        bulge: f64,
        radius: f64,
        rotation: f64,
        large_arc: bool,
        sweep: bool,
    },
}

impl DrawCommand {
    /// The point the pen ends at.
    pub fn end_point(&self) -> Vector2 {
        match self {
            DrawCommand::MoveTo(p) | DrawCommand::LineTo(p) => *p,
            DrawCommand::ArcTo { end, .. } => *end,
        }
    }

    /// Mirror across the x axis, flipping arc orientation to match.
    pub fn invert_y(&self) -> Self {
        match *self {
            DrawCommand::MoveTo(p) => DrawCommand::MoveTo(p.invert_y()),
            DrawCommand::LineTo(p) => DrawCommand::LineTo(p.invert_y()),
            DrawCommand::ArcTo {
                end,
                bulge,
                radius,
                rotation,
                large_arc,
                sweep,
            } => DrawCommand::ArcTo {
                end: end.invert_y(),
                bulge: -bulge,
                radius,
                rotation,
                large_arc,
                sweep: !sweep,
            },
        }
    }

    /// SVG path fragment: `M x y`, `L x y` or `A rx ry rot large sweep x y`.
    pub fn to_svg(&self) -> String {
        match self {
            DrawCommand::MoveTo(p) => format!("M {}", p),
            DrawCommand::LineTo(p) => format!("L {}", p),
            DrawCommand::ArcTo {
                end,
                radius,
                rotation,
                large_arc,
                sweep,
                ..
            } => format!(
                "A {r} {r} {} {} {} {}",
                format_number(*rotation),
                u8::from(*large_arc),
                u8::from(*sweep),
                end,
                r = format_number(*radius),
            ),
        }
    }
}

/// Space-joined SVG path data for a command list.
pub fn to_svg_path(commands: &[DrawCommand]) -> String {
    commands
        .iter()
        .map(DrawCommand::to_svg)
        .collect::<Vec<_>>()
        .join(" ")
}
