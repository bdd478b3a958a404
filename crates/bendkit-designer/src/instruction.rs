//! Compiled path instructions.

use serde::{Deserialize, Serialize};

/// One typed step of a compiled bend path.
///
/// Instruction order is temporal: every `Forward`, `Turn` and `Bend` was
/// computed from the bar and bend radius in effect when its token was read.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Instruction {
    /// Half the bar width or diameter (`d`).
    BarRadius { radius: f64 },
    /// Half the programmed bend diameter (`s`).
    BendRadius { radius: f64 },
    /// A straight run (`l`).
    Forward {
        /// Programmed length shortened by tangent and miter allowances.
        length: f64,
        /// Length as written in the path.
        projected_length: f64,
        /// Length used for the idealized polyline.
        pivot_length: f64,
    },
    /// Sharp direction change, no bend radius in effect (`w`).
    Turn { angle: f64, shift: f64 },
    /// Radiused direction change (`w` with a bend radius).
    Bend {
        angle: f64,
        length_to_tangent: f64,
        shift: f64,
        /// Effective centerline radius (bend + bar).
        radius: f64,
    },
}

impl Instruction {
    /// True for the instructions a `w` token produces.
    pub fn is_bend(&self) -> bool {
        matches!(self, Instruction::Turn { .. } | Instruction::Bend { .. })
    }

    /// True for `d`/`s` setup instructions.
    pub fn is_setup(&self) -> bool {
        matches!(
            self,
            Instruction::BarRadius { .. } | Instruction::BendRadius { .. }
        )
    }

    /// Signed bend angle in degrees, for `Turn` and `Bend`.
    pub fn angle(&self) -> Option<f64> {
        match self {
            Instruction::Turn { angle, .. } | Instruction::Bend { angle, .. } => Some(*angle),
            _ => None,
        }
    }

    /// Miter compensation, for `Turn` and `Bend`.
    pub fn shift(&self) -> Option<f64> {
        match self {
            Instruction::Turn { shift, .. } | Instruction::Bend { shift, .. } => Some(*shift),
            _ => None,
        }
    }
}
