use std::f64::consts::PI;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{bail, Context, Result};

mod physics;
mod rendering;

use physics::constants::*;
use physics::{GeodesicIntegrator, Wormhole};
use rendering::renderer::{frame_to_image, render_frame, FrameParams};
use rendering::{Observer, RayBundle, Skybox};

const USAGE: &str = "\
Usage:
  wormhole-sim render <near-sky> <far-sky> [options]
      -o <out.png>        output image (default: wormhole.png)
      --width <px>        frame width (default: 1280)
      --height <px>       frame height (default: 720)
  wormhole-sim paths [options]
      -o <out>            output polylines; .ply viewer file or .bin raw
                          vertex dump (default: rays.ply)
      --grid <n>          rays per axis (default: 10)

Shared options:
  --lc / --thetac / --phic   observer position
  --rho / --a / --mass       wormhole shape parameters
  --dt / --steps / --vfov    integration step, step count, vertical fov (deg)";

fn main() -> Result<()> {
    env_logger::init();
    let mut args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        bail!("missing command\n{USAGE}");
    }
    match args.remove(0).as_str() {
        "render" => run_render(args),
        "paths" => run_paths(args),
        "--help" | "-h" => {
            println!("{USAGE}");
            Ok(())
        }
        other => bail!("unknown command '{other}'\n{USAGE}"),
    }
}

fn run_render(args: Vec<String>) -> Result<()> {
    let mut positional = Vec::new();
    let mut out = PathBuf::from("wormhole.png");
    let mut width = 1280u32;
    let mut height = 720u32;
    let mut observer = Observer::new(DEFAULT_OBSERVER_L, PI / 2.0, PI / 2.0, DEFAULT_VFOV_DEG);
    let mut wormhole = Wormhole::new(
        DEFAULT_THROAT_RADIUS,
        DEFAULT_TRANSITION_LENGTH,
        DEFAULT_MASS_PARAM,
    );
    let mut step = DEFAULT_STEP_SIZE;
    let mut iterations = DEFAULT_ITERATIONS;

    let mut it = args.into_iter();
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "-o" => out = PathBuf::from(take(&mut it, "-o")?),
            "--width" => width = parse(&mut it, "--width")?,
            "--height" => height = parse(&mut it, "--height")?,
            "--steps" => iterations = parse(&mut it, "--steps")?,
            "--dt" => step = parse(&mut it, "--dt")?,
            "--vfov" => observer.vfov = parse::<f64>(&mut it, "--vfov")?.to_radians(),
            "--lc" => observer.l = parse(&mut it, "--lc")?,
            "--thetac" => observer.theta = parse(&mut it, "--thetac")?,
            "--phic" => observer.phi = parse(&mut it, "--phic")?,
            "--rho" => wormhole.rho = parse(&mut it, "--rho")?,
            "--a" => wormhole.a = parse(&mut it, "--a")?,
            "--mass" => wormhole.m = parse(&mut it, "--mass")?,
            other if other.starts_with('-') => bail!("unknown option '{other}'\n{USAGE}"),
            _ => positional.push(arg),
        }
    }
    let [near, far] = positional.as_slice() else {
        bail!("render expects exactly two sky images\n{USAGE}");
    };

    let sky = Skybox::load(Path::new(near), Path::new(far))
        .with_context(|| "loading sky images")?;
    let params = FrameParams {
        observer,
        wormhole,
        step,
        iterations,
    };
    let frame = render_frame(&sky, &params, width, height);
    frame_to_image(&frame, width, height)
        .save(&out)
        .with_context(|| format!("saving {}", out.display()))?;
    log::info!("wrote {}", out.display());
    Ok(())
}

fn run_paths(args: Vec<String>) -> Result<()> {
    let mut out = PathBuf::from("rays.ply");
    let mut grid = PATH_GRID_SIZE;
    let mut observer = Observer::new(PATH_OBSERVER_L, PI / 2.0, 0.0, DEFAULT_VFOV_DEG);
    let mut wormhole = Wormhole::new(
        PATH_THROAT_RADIUS,
        PATH_TRANSITION_LENGTH,
        DEFAULT_MASS_PARAM,
    );
    let mut step = PATH_STEP_SIZE;
    let mut iterations = PATH_ITERATIONS;

    let mut it = args.into_iter();
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "-o" => out = PathBuf::from(take(&mut it, "-o")?),
            "--grid" => grid = parse(&mut it, "--grid")?,
            "--steps" => iterations = parse(&mut it, "--steps")?,
            "--dt" => step = parse(&mut it, "--dt")?,
            "--vfov" => observer.vfov = parse::<f64>(&mut it, "--vfov")?.to_radians(),
            "--lc" => observer.l = parse(&mut it, "--lc")?,
            "--thetac" => observer.theta = parse(&mut it, "--thetac")?,
            "--phic" => observer.phi = parse(&mut it, "--phic")?,
            "--rho" => wormhole.rho = parse(&mut it, "--rho")?,
            "--a" => wormhole.a = parse(&mut it, "--a")?,
            "--mass" => wormhole.m = parse(&mut it, "--mass")?,
            other => bail!("unknown option '{other}'\n{USAGE}"),
        }
    }

    let integrator = GeodesicIntegrator::new(step, iterations);
    let rays = RayBundle::trace(&observer, &wormhole, grid, grid, &integrator);

    if out.extension().is_some_and(|e| e == "bin") {
        // Raw interleaved f32 dump: (x, y, z, r, g, b) per vertex.
        let vertices = rays.vertices();
        std::fs::write(&out, bytemuck::cast_slice(&vertices))
            .with_context(|| format!("writing {}", out.display()))?;
    } else {
        let file = File::create(&out).with_context(|| format!("creating {}", out.display()))?;
        rays.write_ply(&mut BufWriter::new(file))
            .with_context(|| format!("writing {}", out.display()))?;
    }
    log::info!("wrote {} rays to {}", rays.paths().len(), out.display());
    Ok(())
}

fn take(it: &mut impl Iterator<Item = String>, flag: &str) -> Result<String> {
    it.next().with_context(|| format!("{flag} expects a value"))
}

fn parse<T: FromStr>(it: &mut impl Iterator<Item = String>, flag: &str) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw = take(it, flag)?;
    raw.parse()
        .with_context(|| format!("invalid value '{raw}' for {flag}"))
}
