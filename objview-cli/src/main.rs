/// objview CLI - inspect an OBJ file and its camera pipeline
///
/// Usage: objview-cli <file.obj> [--ortho] [--aspect <f>] [--scale <f>]
///                               [--rotate <x> <y> <z>] [--move <x> <y> <z>]
///
/// Set RUST_LOG=debug for parser and pipeline diagnostics.
mod report;

use anyhow::{bail, Context, Result};
use log::info;
use objview_core::{ProjectionMode, ProjectionSettings, ViewerSession};
use std::env;
use std::io::stdout;
use std::path::PathBuf;

#[derive(Debug, PartialEq)]
struct Options {
    path: PathBuf,
    mode: ProjectionMode,
    aspect: f32,
    scale: Option<f32>,
    rotation: Option<[f32; 3]>,
    position: Option<[f32; 3]>,
}

fn number(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<f32> {
    let value = args
        .next()
        .with_context(|| format!("{flag} expects a value"))?;
    value
        .parse()
        .with_context(|| format!("{flag}: `{value}` is not a number"))
}

fn triple(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<[f32; 3]> {
    Ok([number(args, flag)?, number(args, flag)?, number(args, flag)?])
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Options> {
    let mut args = args.into_iter();
    let mut path = None;
    let mut options = Options {
        path: PathBuf::new(),
        mode: ProjectionMode::Perspective,
        aspect: 1.0,
        scale: None,
        rotation: None,
        position: None,
    };

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--ortho" => options.mode = ProjectionMode::Orthographic,
            "--aspect" => options.aspect = number(&mut args, "--aspect")?,
            "--scale" => options.scale = Some(number(&mut args, "--scale")?),
            "--rotate" => options.rotation = Some(triple(&mut args, "--rotate")?),
            "--move" => options.position = Some(triple(&mut args, "--move")?),
            flag if flag.starts_with("--") => bail!("unknown option {flag}"),
            _ if path.is_some() => bail!("only one OBJ file can be inspected at a time"),
            _ => path = Some(PathBuf::from(&arg)),
        }
    }

    options.path = path.context("missing <file.obj> argument")?;
    Ok(options)
}

fn main() -> Result<()> {
    env_logger::init();

    let mut args = env::args();
    let program = args.next().unwrap_or_else(|| "objview-cli".to_string());
    let options = parse_args(args).with_context(|| {
        format!("usage: {program} <file.obj> [--ortho] [--aspect <f>] [--scale <f>] [--rotate <x> <y> <z>] [--move <x> <y> <z>]")
    })?;

    let settings = ProjectionSettings::perspective(options.aspect).with_mode(options.mode);
    let mut session = ViewerSession::new(settings);
    session
        .load(&options.path)
        .with_context(|| format!("failed to load {}", options.path.display()))?;

    if let Some(factor) = options.scale {
        session.set_scale(factor);
    }
    if let Some([x, y, z]) = options.position {
        session.set_position(x, y, z);
    }
    if let Some([x, y, z]) = options.rotation {
        session.set_rotation(x, y, z);
    }
    info!("Pipeline ready for {}", options.path.display());

    report::write_report(&mut stdout(), &session)?;
    Ok(())
}
