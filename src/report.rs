//! Plain-text and JSON renderings of query and edit results for the CLI.

use bendkit_core::{format_length, format_number, MeasurementSystem, Vector2};
use bendkit_designer::{Bend, DrawCommand, Segment, SegmentKind, Step, Termination};
use serde::Serialize;

/// Serialize `value` as JSON, indented when `pretty` is set.
pub fn to_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
}

pub fn vertex_lines(vertices: &[Vector2]) -> String {
    vertices
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn command_lines(commands: &[DrawCommand]) -> String {
    commands
        .iter()
        .map(DrawCommand::to_svg)
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn segment_lines(segments: &[Segment]) -> String {
    segments
        .iter()
        .map(|segment| {
            let kind = match segment.kind {
                SegmentKind::Line => "line",
                SegmentKind::Arc => "arc",
            };
            format!(
                "{} {} -> {} ({})",
                kind,
                segment.start,
                segment.end,
                format_number(segment.length())
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// One line per step: `1: 5 mm, bend +90` style.
pub fn step_lines(steps: &[Step], system: MeasurementSystem) -> String {
    steps
        .iter()
        .enumerate()
        .map(|(index, step)| {
            let length = format_length(step.length, system);
            match step.termination {
                Termination::Cut => format!("{}: {}, cut", index + 1, length),
                Termination::Bend => format!(
                    "{}: {}, bend {}{}{}",
                    index + 1,
                    length,
                    if step.sign < 0 { "-" } else { "+" },
                    format_number(step.angle),
                    if step.turn { " (turn)" } else { "" }
                ),
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Path on the first line, followed by the pose when it is not the default.
pub fn bend_lines(bend: &Bend) -> String {
    let default = Bend::default();
    if bend.initial_position == default.initial_position
        && bend.initial_direction == default.initial_direction
    {
        return bend.path.clone();
    }
    format!(
        "{}\nposition {}\ndirection {}",
        bend.path, bend.initial_position, bend.initial_direction
    )
}
