//! # BendKit Designer
//!
//! This crate implements the bend path language: a compact textual program
//! describing a single bar bent into a 2D shape, and everything derived from
//! it.
//!
//! ## Core Components
//!
//! ### Language
//! - **Compiler**: tokenizes a path string and reduces it to typed
//!   instructions, applying bar and bend radius compensation as it goes
//! - **Program**: the unevaluated op list used for structural edits
//!
//! ### Geometry
//! - **Pen**: walks instructions and emits move/line/arc draw commands in
//!   radiused or projected mode
//! - **Queries**: segments, vertices, fabrication steps and developed length
//! - **Circle fit**: recovers arc centers from bulge-encoded segments
//!
//! ### Editing
//! - **Editor**: insert, toggle, remove and retarget bends; reverse a path
//! - **Join**: stitch two bends into one path through their vertices
//!
//! ## Architecture
//!
//! ```text
//! path string ──compile──> instructions ──pen──> draw commands ──> queries
//!      ^
//!      └──serialize── PathProgram <──parse── path string   (editing)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use bendkit_designer::Bend;
//!
//! let bend = Bend::new("5 l 90 w 5 l 45 w 5 l");
//! assert_eq!(
//!     bend.print(false).unwrap(),
//!     "M 0 0 L 5 0 L 5 5 L 1.4644660940672627 8.535533905932738"
//! );
//! let edited = bend.remove_bend(1).unwrap();
//! assert_eq!(edited.path, "5 l 90 w 10 l");
//! ```

pub mod bend;
pub mod circle;
pub mod commands;
pub mod compiler;
pub mod instruction;
pub mod pen;
pub mod program;

pub use bend::{Bend, JoinEnd, Segment, SegmentKind, Step, Termination};
pub use circle::{sagitta_arc, ArcCircle};
pub use commands::{to_svg_path, DrawCommand};
pub use compiler::{compile, evaluate, miter_shift, tangent_length, Word};
pub use instruction::Instruction;
pub use pen::{render, trace_pen, Pen, RenderMode};
pub use program::{Block, OpKind, PathOp, PathProgram};
