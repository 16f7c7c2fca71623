use rayon::prelude::*;

use crate::physics::{GeodesicIntegrator, Wormhole};
use crate::rendering::camera::Observer;
use crate::rendering::sky::Skybox;

/// Everything a single frame depends on. Owned by the driving loop and
/// passed by value; the renderer keeps nothing between invocations.
#[derive(Debug, Clone, Copy)]
pub struct FrameParams {
    pub observer: Observer,
    pub wormhole: Wormhole,
    pub step: f64,
    pub iterations: usize,
}

/// Render one frame: one geodesic per pixel, integrated to its full step
/// count and resolved against the sky pair. Returns a row-major RGB buffer
/// of exactly width * height entries, rebuilt from scratch every call.
pub fn render_frame(sky: &Skybox, params: &FrameParams, width: u32, height: u32) -> Vec<[u8; 3]> {
    let integrator = GeodesicIntegrator::new(params.step, params.iterations);
    let started = std::time::Instant::now();

    let mut pixels = vec![[0u8; 3]; (width * height) as usize];
    pixels.par_iter_mut().enumerate().for_each(|(i, px)| {
        let x = i as u32 % width;
        let y = i as u32 / width;
        let ray = params.observer.pixel_ray(x, y, width, height, &params.wormhole);
        let terminal = integrator.final_state(ray, &params.wormhole);
        *px = sky.sample(&terminal);
    });

    log::info!(
        "rendered {}x{} frame ({} steps/ray) in {:.1} ms",
        width,
        height,
        params.iterations,
        started.elapsed().as_secs_f64() * 1e3
    );
    pixels
}

/// Pack a rendered buffer into an `RgbImage` for saving.
pub fn frame_to_image(pixels: &[[u8; 3]], width: u32, height: u32) -> image::RgbImage {
    let mut out = image::RgbImage::new(width, height);
    for y in 0..height {
        for x in 0..width {
            out.put_pixel(x, y, image::Rgb(pixels[(y * width + x) as usize]));
        }
    }
    out
}
