use std::io::{self, Write};

use rayon::prelude::*;

use crate::physics::{GeodesicIntegrator, GeodesicState, Wormhole};
use crate::rendering::camera::Observer;
use crate::rendering::sky::ThroatSide;
use crate::rendering::Vertex;

/// A grid of rays fanned out from the observer and integrated into
/// polylines, one per grid cell. The stored trajectories are read-only once
/// traced; vertex buffers are derived views over them.
pub struct RayBundle {
    paths: Vec<Vec<GeodesicState>>,
}

impl RayBundle {
    /// Launch a `grid_w` x `grid_h` fan and integrate every ray to its full
    /// step count, one rayon task per ray.
    pub fn trace(
        observer: &Observer,
        wormhole: &Wormhole,
        grid_w: usize,
        grid_h: usize,
        integrator: &GeodesicIntegrator,
    ) -> Self {
        let paths = (0..grid_w * grid_h)
            .into_par_iter()
            .map(|idx| {
                let initial =
                    observer.grid_ray(idx % grid_w, idx / grid_w, grid_w, grid_h, wormhole);
                integrator.trace(initial, wormhole)
            })
            .collect();
        RayBundle { paths }
    }

    pub fn paths(&self) -> &[Vec<GeodesicState>] {
        &self.paths
    }

    /// Flatten to line-segment endpoints: two vertices per integration step
    /// per ray, each colored by the throat side of its own endpoint so a
    /// polyline changes color at the step where it crosses l = 0.
    pub fn vertices(&self) -> Vec<Vertex> {
        let per_ray = self.paths.first().map_or(0, |p| p.len().saturating_sub(1));
        let mut vertices = Vec::with_capacity(self.paths.len() * per_ray * 2);
        for path in &self.paths {
            for segment in path.windows(2) {
                for state in segment {
                    let p = state.cartesian();
                    vertices.push(Vertex::new(
                        [p[0] as f32, p[1] as f32, p[2] as f32],
                        ThroatSide::of(state.l).line_color(),
                    ));
                }
            }
        }
        vertices
    }

    /// Write the segment soup as an ASCII PLY with per-vertex colors, for
    /// inspection in any mesh viewer.
    pub fn write_ply<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let vertices = self.vertices();
        writeln!(out, "ply")?;
        writeln!(out, "format ascii 1.0")?;
        writeln!(out, "element vertex {}", vertices.len())?;
        writeln!(out, "property float x")?;
        writeln!(out, "property float y")?;
        writeln!(out, "property float z")?;
        writeln!(out, "property uchar red")?;
        writeln!(out, "property uchar green")?;
        writeln!(out, "property uchar blue")?;
        writeln!(out, "element edge {}", vertices.len() / 2)?;
        writeln!(out, "property int vertex1")?;
        writeln!(out, "property int vertex2")?;
        writeln!(out, "end_header")?;
        for v in &vertices {
            writeln!(
                out,
                "{} {} {} {} {} {}",
                v.position[0],
                v.position[1],
                v.position[2],
                (v.color[0] * 255.0) as u8,
                (v.color[1] * 255.0) as u8,
                (v.color[2] * 255.0) as u8
            )?;
        }
        for k in 0..vertices.len() / 2 {
            writeln!(out, "{} {}", 2 * k, 2 * k + 1)?;
        }
        Ok(())
    }
}
