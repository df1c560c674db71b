//! # VXM Tool
//!
//! Command-line inspector for `.vxm` files.
//!
//! ```text
//! vxm_tool [--config <file.toml>] info <file.vxm>
//! vxm_tool [--config <file.toml>] box <out.vxm> <sx> <sy> <sz> [material]
//! vxm_tool [--config <file.toml>] apply-edits <file.vxm> [material]
//! ```
//!
//! Log level is controlled with `RUST_LOG` (default `info`).

use std::path::PathBuf;
use std::process::ExitCode;

use thiserror::Error;
use tracing_subscriber::EnvFilter;
use voxelcore::grid::GridError;
use voxelcore::{ConfigError, CoreConfig, IVec3, ModelReport, VoxelEdits, VoxelGrid, VxmError};

const USAGE: &str = "\
Usage: vxm_tool [--config <file.toml>] <command>

Commands:
  info <file.vxm>                          Print dimensions, metadata and mesh stats
  box <out.vxm> <sx> <sy> <sz> [material]  Write a solid cuboid (material defaults to 1)
  apply-edits <file.vxm> [material]        Apply <file>.edits.json and save in place";

#[derive(Error, Debug)]
enum ToolError {
    #[error("{0}")]
    Usage(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Vxm(#[from] VxmError),
    #[error(transparent)]
    Grid(#[from] GridError),
}

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Info { path: PathBuf },
    Box { out: PathBuf, size: [i32; 3], material: u8 },
    ApplyEdits { path: PathBuf, material: u8 },
    Help,
}

#[derive(Debug, PartialEq, Eq)]
struct Invocation {
    config: Option<PathBuf>,
    command: Command,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match parse_args(&args).and_then(run) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            if matches!(e, ToolError::Usage(_)) {
                eprintln!();
                eprintln!("{USAGE}");
            }
            ExitCode::FAILURE
        }
    }
}

fn parse_args(args: &[String]) -> Result<Invocation, ToolError> {
    let mut config = None;
    let mut positional = Vec::new();

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => {
                let path = iter
                    .next()
                    .ok_or_else(|| ToolError::Usage("--config needs a file".into()))?;
                config = Some(PathBuf::from(path));
            }
            "-h" | "--help" => {
                return Ok(Invocation {
                    config,
                    command: Command::Help,
                })
            }
            _ => positional.push(arg.as_str()),
        }
    }

    let command = match positional.as_slice() {
        [] => Command::Help,
        ["info", path] => Command::Info {
            path: PathBuf::from(path),
        },
        ["box", out, sx, sy, sz, rest @ ..] if rest.len() <= 1 => Command::Box {
            out: PathBuf::from(out),
            size: [parse_size(sx)?, parse_size(sy)?, parse_size(sz)?],
            material: parse_material(rest.first().copied())?,
        },
        ["apply-edits", path, rest @ ..] if rest.len() <= 1 => Command::ApplyEdits {
            path: PathBuf::from(path),
            material: parse_material(rest.first().copied())?,
        },
        [name, ..] => {
            return Err(ToolError::Usage(format!(
                "unknown command or wrong arguments: {name}"
            )))
        }
    };

    Ok(Invocation { config, command })
}

fn parse_size(text: &str) -> Result<i32, ToolError> {
    text.parse::<i32>()
        .ok()
        .filter(|&s| s > 0)
        .ok_or_else(|| ToolError::Usage(format!("invalid size: {text}")))
}

fn parse_material(text: Option<&str>) -> Result<u8, ToolError> {
    let Some(text) = text else {
        return Ok(1);
    };
    text.parse::<u8>()
        .ok()
        .filter(|&m| m != 0)
        .ok_or_else(|| ToolError::Usage(format!("invalid material (1-255): {text}")))
}

fn run(invocation: Invocation) -> Result<(), ToolError> {
    let config = match &invocation.config {
        Some(path) => CoreConfig::from_toml_file(path)?,
        None => CoreConfig::default(),
    };
    let codec = config.codec();

    match invocation.command {
        Command::Help => println!("{USAGE}"),

        Command::Info { path } => {
            let document = codec.load_from_path(&path)?;
            let report = ModelReport::build(&document, &mut config.mesher());

            println!("┌─ {} ", path.display());
            for line in report.to_string().lines() {
                println!("│ {line}");
            }
            println!("└──────────────────────────────────────────────");
        }

        Command::Box {
            out,
            size: [sx, sy, sz],
            material,
        } => {
            let mut grid = VoxelGrid::new(sx, sy, sz)?;
            grid.fill_box(IVec3::ZERO, IVec3::new(sx, sy, sz), material);
            codec.save_to_path(&grid, &out, None, None)?;

            tracing::info!(path = %out.display(), sx, sy, sz, material, "wrote cuboid");
            println!("Wrote {sx} x {sy} x {sz} cuboid of material {material} to {}", out.display());
        }

        Command::ApplyEdits { path, material } => {
            let Some(edits) = VoxelEdits::try_load(&path)? else {
                println!("No edits sidecar at {}", VoxelEdits::edits_path(&path).display());
                return Ok(());
            };
            if edits.is_empty() {
                println!("Edits sidecar is empty, nothing to apply");
                return Ok(());
            }

            let mut document = codec.load_from_path(&path)?;
            let before = document.grid.solid_count();
            edits.apply(&mut document.grid, material);
            codec.save_document(&document, &path)?;

            tracing::info!(
                path = %path.display(),
                added = edits.added.len(),
                removed = edits.removed.len(),
                "applied edits"
            );
            println!(
                "Applied {} additions and {} removals: {} -> {} solid voxels",
                edits.added.len(),
                edits.removed.len(),
                before,
                document.grid.solid_count()
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_parse_info_with_config() {
        let invocation = parse_args(&args(&["--config", "core.toml", "info", "model.vxm"])).unwrap();
        assert_eq!(invocation.config, Some(PathBuf::from("core.toml")));
        assert_eq!(
            invocation.command,
            Command::Info {
                path: PathBuf::from("model.vxm")
            }
        );
    }

    #[test]
    fn test_parse_box() {
        let invocation = parse_args(&args(&["box", "out.vxm", "4", "5", "6", "3"])).unwrap();
        assert_eq!(
            invocation.command,
            Command::Box {
                out: PathBuf::from("out.vxm"),
                size: [4, 5, 6],
                material: 3
            }
        );

        let invocation = parse_args(&args(&["box", "out.vxm", "1", "1", "1"])).unwrap();
        assert!(matches!(invocation.command, Command::Box { material: 1, .. }));
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(parse_args(&args(&["box", "out.vxm", "0", "1", "1"])).is_err());
        assert!(parse_args(&args(&["box", "out.vxm", "1", "1"])).is_err());
        assert!(parse_args(&args(&["apply-edits", "m.vxm", "256"])).is_err());
        assert!(parse_args(&args(&["apply-edits", "m.vxm", "0"])).is_err());
        assert!(parse_args(&args(&["explode"])).is_err());
        assert!(parse_args(&args(&["info", "m.vxm", "--config"])).is_err());
    }

    #[test]
    fn test_parse_help() {
        assert_eq!(parse_args(&[]).unwrap().command, Command::Help);
        assert_eq!(parse_args(&args(&["info", "--help"])).unwrap().command, Command::Help);
    }
}
