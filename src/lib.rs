//! # BendKit
//!
//! A compact path language for bars bent into 2D shapes, with:
//! - A stack-based compiler from path strings to typed instructions
//! - Radiused and projected pen simulation producing lines and arcs
//! - Fabrication queries: developed length, bend steps, vertices
//! - Structural edits: insert, toggle, remove and retarget bends, reverse, join
//!
//! ## Architecture
//!
//! BendKit is organized as a workspace with multiple crates:
//!
//! 1. **bendkit-core** - Vector type, error taxonomy, number formatting
//! 2. **bendkit-designer** - Path compiler, pen, queries and editor
//! 3. **bendkit-settings** - Configuration files and validation
//! 4. **bendkit** - Command line tool that integrates all crates

pub mod report;

pub use bendkit_core::{
    BendError, BendResult, Error, MeasurementSystem, Result, Vector2, GEOMETRY_EPSILON,
};
pub use bendkit_designer as designer;
pub use bendkit_designer::{
    Bend, DrawCommand, Instruction, JoinEnd, PathProgram, RenderMode, Segment, SegmentKind, Step,
    Termination,
};
pub use bendkit_settings::{Config, EditingSettings, OutputSettings, PenSettings};

/// Binary name
pub const NAME: &str = "bendkit";

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Output on stderr, leaving stdout to command results
/// - RUST_LOG environment variable support (default `info`)
pub fn init_logging() -> anyhow::Result<()> {
    init_logging_with("info")
}

/// Initialize logging, using `default_directive` when RUST_LOG is unset.
pub fn init_logging_with(default_directive: &str) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive))?;

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
