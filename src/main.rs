//! BendKit - command line entry point
//!
//! Parses arguments, loads configuration, runs one query or edit on a path
//! string and prints the result to stdout.

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;
use tracing::debug;

use bendkit::report::{bend_lines, command_lines, segment_lines, step_lines, to_json, vertex_lines};
use bendkit::{init_logging_with, Bend, Config, JoinEnd, RenderMode, Vector2, NAME, VERSION};
use bendkit_core::format_length;

/// Parse `x,y` into a vector
fn parse_vector(value: &str) -> std::result::Result<Vector2, String> {
    let (x, y) = value
        .split_once(',')
        .ok_or_else(|| format!("expected x,y but got '{}'", value))?;
    let x: f64 = x.trim().parse().map_err(|e| format!("bad x '{}': {}", x, e))?;
    let y: f64 = y.trim().parse().map_err(|e| format!("bad y '{}': {}", y, e))?;
    Ok(Vector2::new(x, y))
}

fn path_arg() -> Arg {
    Arg::new("path")
        .value_name("PATH")
        .help("Bend path string, e.g. \"2 s 5 l 90 w 5 l\"")
        .required(true)
        .allow_hyphen_values(true)
}

fn index_arg(help: &'static str) -> Arg {
    Arg::new("index")
        .value_name("INDEX")
        .help(help)
        .required(true)
        .value_parser(clap::value_parser!(usize))
}

fn number_arg(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .value_name("VALUE")
        .help(help)
        .allow_negative_numbers(true)
        .value_parser(clap::value_parser!(f64))
}

fn end_arg(name: &'static str, default: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .long(name)
        .value_name("END")
        .help(help)
        .default_value(default)
        .value_parser(["start", "end"])
}

/// Build the CLI command parser
fn build_cli() -> Command {
    Command::new(NAME)
        .version(VERSION)
        .about("Compile, measure and edit bent bar shapes described by bend paths")
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Path to configuration file (TOML or JSON)")
                .global(true)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("invert-y")
                .long("invert-y")
                .help("Mirror output for y-down renderers")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print results as JSON")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("position")
                .long("position")
                .value_name("X,Y")
                .help("Initial pen position")
                .global(true)
                .allow_hyphen_values(true)
                .value_parser(parse_vector),
        )
        .arg(
            Arg::new("direction")
                .long("direction")
                .value_name("X,Y")
                .help("Initial pen direction")
                .global(true)
                .allow_hyphen_values(true)
                .value_parser(parse_vector),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging")
                .global(true)
                .action(ArgAction::Count),
        )
        .subcommand(
            Command::new("print")
                .about("Print SVG path data for the manufactured shape")
                .arg(path_arg()),
        )
        .subcommand(
            Command::new("commands")
                .about("List draw commands")
                .arg(path_arg())
                .arg(
                    Arg::new("projected")
                        .long("projected")
                        .help("Trace the idealized polyline instead")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("length")
                .about("Developed length of the bar")
                .arg(path_arg()),
        )
        .subcommand(
            Command::new("steps")
                .about("Fabrication steps")
                .arg(path_arg()),
        )
        .subcommand(
            Command::new("vertices")
                .about("Corner points of the idealized polyline")
                .arg(path_arg()),
        )
        .subcommand(
            Command::new("segments")
                .about("Drawn segments with midpoints")
                .arg(path_arg())
                .arg(
                    Arg::new("projected")
                        .long("projected")
                        .help("Segments of the idealized polyline")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("reverse")
                .about("Describe the bar from its other end")
                .arg(path_arg()),
        )
        .subcommand(
            Command::new("bend")
                .about("Insert a bend into a straight")
                .arg(path_arg())
                .arg(index_arg("Straight to split"))
                .arg(number_arg("at", "Split ratio in [0, 1]").long("at"))
                .arg(number_arg("angle", "Bend angle in degrees").long("angle")),
        )
        .subcommand(
            Command::new("toggle-bend")
                .about("Cycle a bend through +90, -90 and 0")
                .arg(path_arg())
                .arg(index_arg("Bend to toggle")),
        )
        .subcommand(
            Command::new("remove-bend")
                .about("Remove a bend, merging its straights")
                .arg(path_arg())
                .arg(index_arg("Bend to remove")),
        )
        .subcommand(
            Command::new("set-length")
                .about("Set the length of a straight")
                .arg(path_arg())
                .arg(index_arg("Straight to change"))
                .arg(number_arg("value", "New length").required(true)),
        )
        .subcommand(
            Command::new("set-angle")
                .about("Set the angle of a bend")
                .arg(path_arg())
                .arg(index_arg("Bend to change"))
                .arg(number_arg("value", "New angle in degrees").required(true)),
        )
        .subcommand(
            Command::new("join")
                .about("Join two bends into one path")
                .arg(path_arg())
                .arg(
                    Arg::new("other")
                        .value_name("OTHER")
                        .help("Path string of the bend to attach")
                        .required(true)
                        .allow_hyphen_values(true),
                )
                .arg(end_arg("end", "end", "End of the first bend to join at"))
                .arg(end_arg("other-end", "start", "End of the other bend to join at"))
                .arg(
                    Arg::new("other-position")
                        .long("other-position")
                        .value_name("X,Y")
                        .help("Initial position of the other bend")
                        .allow_hyphen_values(true)
                        .value_parser(parse_vector),
                )
                .arg(
                    Arg::new("other-direction")
                        .long("other-direction")
                        .value_name("X,Y")
                        .help("Initial direction of the other bend")
                        .allow_hyphen_values(true)
                        .value_parser(parse_vector),
                ),
        )
}

/// Load configuration and apply command line overrides
fn load_config(matches: &ArgMatches) -> Result<Config> {
    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::load_or_default().context("Failed to load default config")?,
    };

    if let Some(position) = matches.get_one::<Vector2>("position") {
        config.pen.initial_position = *position;
    }
    if let Some(direction) = matches.get_one::<Vector2>("direction") {
        config.pen.initial_direction = *direction;
    }
    if matches.get_flag("invert-y") {
        config.output.invert_y = true;
    }
    config.validate()?;
    Ok(config)
}

fn bend_from(sub: &ArgMatches, config: &Config) -> Bend {
    let path = sub.get_one::<String>("path").cloned().unwrap_or_default();
    Bend::with_pose(
        path,
        config.pen.initial_position,
        config.pen.initial_direction,
    )
}

fn index(sub: &ArgMatches) -> usize {
    sub.get_one::<usize>("index").copied().unwrap_or_default()
}

fn number(sub: &ArgMatches, name: &str) -> Option<f64> {
    sub.get_one::<f64>(name).copied()
}

fn join_end(sub: &ArgMatches, name: &str) -> Result<JoinEnd> {
    let value = sub.get_one::<String>(name).map(String::as_str).unwrap_or("end");
    Ok(value.parse()?)
}

/// Run the selected subcommand and return what to print
fn run(matches: &ArgMatches, config: &Config) -> Result<String> {
    let json = matches.get_flag("json");
    let pretty = config.output.pretty_json;
    let invert_y = config.output.invert_y;
    let system = config.output.measurement_system;

    let Some((name, sub)) = matches.subcommand() else {
        anyhow::bail!("no subcommand given");
    };
    let bend = bend_from(sub, config);
    debug!(command = name, path = %bend.path, "running");

    let edited = match name {
        "print" => {
            let svg = bend.print(invert_y)?;
            return Ok(if json { to_json(&svg, pretty)? } else { svg });
        }
        "commands" => {
            let mode = if sub.get_flag("projected") {
                RenderMode::Projected
            } else {
                RenderMode::Radiused
            };
            let mut commands = bend.render(mode)?;
            if invert_y {
                commands = commands.iter().map(|c| c.invert_y()).collect();
            }
            return Ok(if json {
                to_json(&commands, pretty)?
            } else {
                command_lines(&commands)
            });
        }
        "length" => {
            let length = bend.length()?;
            return Ok(if json {
                to_json(&serde_json::json!({ "length": length }), pretty)?
            } else {
                format_length(length, system)
            });
        }
        "steps" => {
            let steps = bend.steps()?;
            return Ok(if json {
                to_json(&steps, pretty)?
            } else {
                step_lines(&steps, system)
            });
        }
        "vertices" => {
            let mut vertices = bend.vertices()?;
            if invert_y {
                vertices = vertices.iter().map(|v| v.invert_y()).collect();
            }
            return Ok(if json {
                to_json(&vertices, pretty)?
            } else {
                vertex_lines(&vertices)
            });
        }
        "segments" => {
            let segments = if sub.get_flag("projected") {
                bend.projected_segments()?
            } else {
                bend.segments(invert_y)?
            };
            return Ok(if json {
                to_json(&segments, pretty)?
            } else {
                segment_lines(&segments)
            });
        }
        "reverse" => bend.reverse()?,
        "bend" => {
            let t = number(sub, "at").unwrap_or(config.editing.default_split_ratio);
            let angle = number(sub, "angle").unwrap_or(config.editing.default_bend_angle);
            bend.bend(index(sub), t, angle)?
        }
        "toggle-bend" => bend.toggle_bend(index(sub))?,
        "remove-bend" => bend.remove_bend(index(sub))?,
        "set-length" => {
            let value = number(sub, "value").context("missing length")?;
            bend.set_segment_length(index(sub), value)?
        }
        "set-angle" => {
            let value = number(sub, "value").context("missing angle")?;
            bend.set_bend_angle(index(sub), value)?
        }
        "join" => {
            let other = Bend::with_pose(
                sub.get_one::<String>("other").cloned().unwrap_or_default(),
                sub.get_one::<Vector2>("other-position")
                    .copied()
                    .unwrap_or(config.pen.initial_position),
                sub.get_one::<Vector2>("other-direction")
                    .copied()
                    .unwrap_or(config.pen.initial_direction),
            );
            bend.join(&other, join_end(sub, "end")?, join_end(sub, "other-end")?)?
        }
        other => anyhow::bail!("unknown subcommand '{}'", other),
    };

    Ok(if json {
        to_json(&edited, pretty)?
    } else {
        bend_lines(&edited)
    })
}

fn main() -> Result<()> {
    let matches = build_cli().get_matches();

    let level = match matches.get_count("verbose") {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    init_logging_with(level)?;

    let config = load_config(&matches)?;
    let output = run(&matches, &config)?;
    println!("{}", output);

    Ok(())
}
