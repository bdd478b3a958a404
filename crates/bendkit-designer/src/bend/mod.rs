//! The [`Bend`] value: a path string plus the pen's starting pose.
//!
//! Queries compile and render on demand; edits return a new `Bend` and
//! never touch the receiver.

mod editor;
mod join;
mod queries;

pub use join::JoinEnd;
pub use queries::{Segment, SegmentKind, Step, Termination};

use bendkit_core::constants::{DEFAULT_DIRECTION, DEFAULT_POSITION};
use bendkit_core::{BendResult, Vector2};
use serde::{Deserialize, Serialize};

use crate::commands::{to_svg_path, DrawCommand};
use crate::compiler::compile;
use crate::instruction::Instruction;
use crate::pen::{render, RenderMode};
use crate::program::PathProgram;

/// A single bar bent into a 2D shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bend {
    /// Path string in the bend language.
    pub path: String,
    #[serde(default = "default_position")]
    pub initial_position: Vector2,
    /// Heading at the start; need not be unit length.
    #[serde(default = "default_direction")]
    pub initial_direction: Vector2,
}

fn default_position() -> Vector2 {
    DEFAULT_POSITION.into()
}

fn default_direction() -> Vector2 {
    DEFAULT_DIRECTION.into()
}

impl Default for Bend {
    fn default() -> Self {
        Self {
            path: String::new(),
            initial_position: default_position(),
            initial_direction: default_direction(),
        }
    }
}

impl Bend {
    /// A bend starting at the origin heading along +x.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn with_pose(path: impl Into<String>, position: Vector2, direction: Vector2) -> Self {
        Self {
            path: path.into(),
            initial_position: position,
            initial_direction: direction,
        }
    }

    pub fn with_initial_position(mut self, position: Vector2) -> Self {
        self.initial_position = position;
        self
    }

    pub fn with_initial_direction(mut self, direction: Vector2) -> Self {
        self.initial_direction = direction;
        self
    }

    /// Tokens of the path string.
    pub fn list(&self) -> Vec<&str> {
        self.path.split_whitespace().collect()
    }

    /// Compiled instruction list.
    pub fn instructions(&self) -> BendResult<Vec<Instruction>> {
        compile(&self.path)
    }

    /// Unevaluated op list used by the editor.
    pub fn program(&self) -> BendResult<PathProgram> {
        PathProgram::parse(&self.path)
    }

    /// Render in the given mode.
    pub fn render(&self, mode: RenderMode) -> BendResult<Vec<DrawCommand>> {
        render(
            &self.instructions()?,
            self.initial_position,
            self.initial_direction,
            mode,
        )
    }

    /// Manufactured geometry: lines and arcs.
    pub fn commands(&self) -> BendResult<Vec<DrawCommand>> {
        self.render(RenderMode::Radiused)
    }

    /// Idealized polyline ignoring bend radii.
    pub fn projected_commands(&self) -> BendResult<Vec<DrawCommand>> {
        self.render(RenderMode::Projected)
    }

    /// SVG path data for the manufactured geometry.
    pub fn print(&self, invert_y: bool) -> BendResult<String> {
        let commands = self.commands()?;
        if invert_y {
            let inverted: Vec<_> = commands.iter().map(DrawCommand::invert_y).collect();
            Ok(to_svg_path(&inverted))
        } else {
            Ok(to_svg_path(&commands))
        }
    }

    /// Same pose, new path.
    fn with_program(&self, program: &PathProgram) -> Self {
        Self {
            path: program.to_string(),
            initial_position: self.initial_position,
            initial_direction: self.initial_direction,
        }
    }
}
